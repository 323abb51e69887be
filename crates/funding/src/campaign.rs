//! The module contains the client-side representation of a campaign.

use chrono::NaiveDate;

use crate::{FundingError, Money};

/// A fundraising campaign, converted from the wire DTO into exact amounts.
///
/// The server owns the authoritative totals and guarantees
/// `0 <= collected <= goal` for persisted rows. The client holds a
/// read-mostly copy per catalog fetch; the only local mutation is the
/// optimistic bump applied through [`CampaignCache`] after a successful
/// donation.
///
/// [`CampaignCache`]: crate::CampaignCache
#[derive(Clone, Debug, PartialEq)]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub goal: Money,
    pub collected: Money,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Campaign {
    /// Remaining funding capacity: `max(0, goal - collected)`.
    ///
    /// Never negative, even if a stale or inconsistent snapshot reports
    /// `collected > goal`.
    #[must_use]
    pub fn remaining(&self) -> Money {
        self.goal.saturating_sub(self.collected)
    }

    /// Returns `true` when nothing valid can be donated anymore.
    #[must_use]
    pub fn is_fully_funded(&self) -> bool {
        !self.remaining().is_positive()
    }

    /// Only `Active` campaigns accept donations.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }

    /// Funding progress in whole percent, capped at 100.
    #[must_use]
    pub fn percent_funded(&self) -> u16 {
        if !self.goal.is_positive() {
            return 0;
        }
        let pct = self.collected.minor().max(0) * 100 / self.goal.minor();
        pct.min(100) as u16
    }
}

impl TryFrom<api_types::campaign::Campaign> for Campaign {
    type Error = FundingError;

    /// Missing wire fields default the same way the original views do:
    /// collected to 0, description to empty, status to empty (not fundable).
    fn try_from(dto: api_types::campaign::Campaign) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            title: dto.title,
            description: dto.description.unwrap_or_default(),
            category: dto.category,
            goal: Money::try_from_major(dto.goal_amount)?,
            collected: Money::try_from_major_opt(dto.collected_amount)?,
            status: dto.status.unwrap_or_default(),
            start_date: dto.start_date,
            end_date: dto.end_date,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn campaign(id: i64, title: &str, goal_minor: i64, collected_minor: i64) -> Campaign {
        Campaign {
            id,
            title: title.to_string(),
            description: String::new(),
            category: Some("Charity".to_string()),
            goal: Money::new(goal_minor),
            collected: Money::new(collected_minor),
            status: "Active".to_string(),
            start_date: None,
            end_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::campaign;
    use super::*;

    #[test]
    fn remaining_is_goal_minus_collected() {
        let c = campaign(1, "Clean Water", 1000_00, 400_00);
        assert_eq!(c.remaining(), Money::new(600_00));
        assert!(!c.is_fully_funded());
    }

    #[test]
    fn remaining_never_negative() {
        let c = campaign(1, "Clean Water", 1000_00, 1200_00);
        assert_eq!(c.remaining(), Money::ZERO);
        assert!(c.is_fully_funded());
    }

    #[test]
    fn fully_funded_at_exact_goal() {
        let c = campaign(1, "Clean Water", 1000_00, 1000_00);
        assert_eq!(c.remaining(), Money::ZERO);
        assert!(c.is_fully_funded());
    }

    #[test]
    fn percent_funded_caps_at_100() {
        assert_eq!(campaign(1, "a", 1000_00, 400_00).percent_funded(), 40);
        assert_eq!(campaign(1, "a", 1000_00, 1200_00).percent_funded(), 100);
        assert_eq!(campaign(1, "a", 0, 100).percent_funded(), 0);
    }

    #[test]
    fn conversion_defaults_missing_fields() {
        let dto = api_types::campaign::Campaign {
            id: 7,
            title: "Books".to_string(),
            description: None,
            category: None,
            goal_amount: 1000.0,
            collected_amount: None,
            status: None,
            start_date: None,
            end_date: None,
        };
        let c = Campaign::try_from(dto).unwrap();
        assert_eq!(c.collected, Money::ZERO);
        assert_eq!(c.remaining(), Money::new(1000_00));
        assert!(!c.is_active());
    }
}
