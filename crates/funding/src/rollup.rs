//! Donation-history rollups for the reporting views.
//!
//! Donation lists are small and append-only per donor, so every call
//! recomputes from scratch; no aggregation state is kept between calls.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{FundingError, Money};

/// A donor's donation joined with what is known of its campaign.
///
/// The joined fields stay optional: a donation whose campaign data is
/// incomplete still shows up in every rollup under a fallback key.
#[derive(Clone, Debug, PartialEq)]
pub struct DonationRecord {
    pub id: i64,
    pub amount: Money,
    pub message: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub campaign_id: Option<i64>,
    pub campaign_title: Option<String>,
    pub campaign_category: Option<String>,
    pub campaign_goal: Option<Money>,
    pub campaign_start: Option<NaiveDate>,
    pub campaign_end: Option<NaiveDate>,
}

impl DonationRecord {
    /// Grouping key for the category rollup.
    #[must_use]
    pub fn category_key(&self) -> String {
        self.campaign_category
            .clone()
            .unwrap_or_else(|| "Other".to_string())
    }

    /// Grouping key for the campaign rollup: the title, or a label built
    /// from the campaign id when the title is missing.
    #[must_use]
    pub fn campaign_key(&self) -> String {
        match (&self.campaign_title, self.campaign_id) {
            (Some(title), _) => title.clone(),
            (None, Some(id)) => format!("Campaign {id}"),
            (None, None) => "Campaign".to_string(),
        }
    }
}

impl TryFrom<api_types::donation::Donation> for DonationRecord {
    type Error = FundingError;

    fn try_from(dto: api_types::donation::Donation) -> Result<Self, Self::Error> {
        let campaign = dto.campaign;
        Ok(Self {
            id: dto.id,
            amount: Money::try_from_major(dto.amount)?,
            message: dto.message,
            date: dto.donation_date,
            campaign_id: campaign.as_ref().map(|c| c.id),
            campaign_title: campaign.as_ref().map(|c| c.title.clone()),
            campaign_category: campaign.as_ref().and_then(|c| c.category.clone()),
            campaign_goal: campaign
                .as_ref()
                .map(|c| Money::try_from_major(c.goal_amount))
                .transpose()?,
            campaign_start: campaign.as_ref().and_then(|c| c.start_date),
            campaign_end: campaign.and_then(|c| c.end_date),
        })
    }
}

/// Sum of donation amounts per campaign category; uncategorized donations
/// group under `"Other"`.
#[must_use]
pub fn by_category(donations: &[DonationRecord]) -> BTreeMap<String, Money> {
    sum_by(donations, DonationRecord::category_key)
}

/// Sum of donation amounts per campaign title, with an id-based fallback
/// label so no donation drops out of the rollup.
#[must_use]
pub fn by_campaign_title(donations: &[DonationRecord]) -> BTreeMap<String, Money> {
    sum_by(donations, DonationRecord::campaign_key)
}

/// Sum of all donation amounts.
#[must_use]
pub fn total_donated(donations: &[DonationRecord]) -> Money {
    donations
        .iter()
        .fold(Money::ZERO, |acc, d| acc + d.amount)
}

/// Number of donations.
#[must_use]
pub fn count(donations: &[DonationRecord]) -> usize {
    donations.len()
}

fn sum_by(
    donations: &[DonationRecord],
    key: impl Fn(&DonationRecord) -> String,
) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for donation in donations {
        *totals.entry(key(donation)).or_default() += donation.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, amount_minor: i64, category: Option<&str>, title: Option<&str>) -> DonationRecord {
        DonationRecord {
            id,
            amount: Money::new(amount_minor),
            message: None,
            date: None,
            campaign_id: Some(id * 10),
            campaign_title: title.map(str::to_string),
            campaign_category: category.map(str::to_string),
            campaign_goal: None,
            campaign_start: None,
            campaign_end: None,
        }
    }

    #[test]
    fn by_category_groups_with_other_fallback() {
        let donations = vec![
            record(1, 100_00, Some("Charity"), Some("Clean Water")),
            record(2, 50_00, Some("Charity"), Some("Books")),
            record(3, 25_00, None, Some("Robotics")),
        ];

        let rollup = by_category(&donations);
        assert_eq!(rollup.get("Charity"), Some(&Money::new(150_00)));
        assert_eq!(rollup.get("Other"), Some(&Money::new(25_00)));
        assert_eq!(rollup.len(), 2);
    }

    #[test]
    fn by_campaign_title_never_drops_a_donation() {
        let mut orphan = record(3, 10_00, None, None);
        orphan.campaign_id = None;
        let donations = vec![
            record(1, 100_00, None, Some("Clean Water")),
            record(2, 40_00, None, None),
            orphan,
        ];

        let rollup = by_campaign_title(&donations);
        assert_eq!(rollup.get("Clean Water"), Some(&Money::new(100_00)));
        assert_eq!(rollup.get("Campaign 20"), Some(&Money::new(40_00)));
        assert_eq!(rollup.get("Campaign"), Some(&Money::new(10_00)));
    }

    #[test]
    fn rollups_are_order_independent() {
        let mut donations = vec![
            record(1, 100_00, Some("Charity"), Some("Clean Water")),
            record(2, 50_00, Some("Startup"), Some("Robotics")),
            record(3, 25_00, Some("Charity"), Some("Clean Water")),
        ];

        let categories = by_category(&donations);
        let titles = by_campaign_title(&donations);

        donations.reverse();
        assert_eq!(by_category(&donations), categories);
        assert_eq!(by_campaign_title(&donations), titles);
    }

    #[test]
    fn totals_agree_across_rollups() {
        let donations = vec![
            record(1, 100_00, Some("Charity"), Some("Clean Water")),
            record(2, 50_00, None, None),
            record(3, 25_00, Some("Startup"), Some("Robotics")),
        ];

        let total = total_donated(&donations);
        let by_cat: Money = by_category(&donations)
            .values()
            .fold(Money::ZERO, |acc, v| acc + *v);
        let by_title: Money = by_campaign_title(&donations)
            .values()
            .fold(Money::ZERO, |acc, v| acc + *v);

        assert_eq!(total, Money::new(175_00));
        assert_eq!(by_cat, total);
        assert_eq!(by_title, total);
        assert_eq!(count(&donations), 3);
    }

    #[test]
    fn empty_list_sums_to_zero() {
        assert_eq!(total_donated(&[]), Money::ZERO);
        assert_eq!(count(&[]), 0);
        assert!(by_category(&[]).is_empty());
    }
}
