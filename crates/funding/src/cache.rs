//! The client-held campaign list as a single owned state cell.
//!
//! Two code paths write campaign state: a catalog refresh and the
//! post-donation reconciliation. Both go through this cell and both install
//! a full replacement vector, so every update is observable as one swap and
//! no other component mutates campaign fields in place.

use crate::{Campaign, FundingError, Money, ResultFunding};

/// Cached fundable campaigns, replaced wholesale on refresh and bumped
/// optimistically after a successful donation.
#[derive(Clone, Debug, Default)]
pub struct CampaignCache {
    campaigns: Vec<Campaign>,
}

impl CampaignCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer one: a catalog fetch installs the server's latest snapshot.
    /// This is where any optimistic drift gets reconciled back to truth.
    pub fn replace(&mut self, campaigns: Vec<Campaign>) {
        self.campaigns = campaigns;
    }

    /// Writer two: after a successful submission, bump the one campaign's
    /// collected total by exactly the donated amount. Builds a replacement
    /// vector rather than patching in place.
    ///
    /// The bump does not re-check the goal: the server already accepted the
    /// write and stays authoritative on the next refresh.
    pub fn record_donation(&mut self, campaign_id: i64, amount: Money) -> ResultFunding<()> {
        if !self.campaigns.iter().any(|c| c.id == campaign_id) {
            return Err(FundingError::KeyNotFound(campaign_id.to_string()));
        }

        self.campaigns = self
            .campaigns
            .iter()
            .map(|c| {
                if c.id == campaign_id {
                    let mut bumped = c.clone();
                    bumped.collected += amount;
                    bumped
                } else {
                    c.clone()
                }
            })
            .collect();

        Ok(())
    }

    #[must_use]
    pub fn get(&self, campaign_id: i64) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == campaign_id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Campaign] {
        &self.campaigns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::test_support::campaign;

    #[test]
    fn record_donation_bumps_only_the_target() {
        let mut cache = CampaignCache::new();
        cache.replace(vec![
            campaign(1, "Clean Water", 1000_00, 400_00),
            campaign(2, "Books", 500_00, 100_00),
        ]);

        cache.record_donation(1, Money::new(600_00)).unwrap();

        assert_eq!(cache.get(1).unwrap().collected, Money::new(1000_00));
        assert_eq!(cache.get(1).unwrap().remaining(), Money::ZERO);
        // No other campaign's cached value changes.
        assert_eq!(cache.get(2).unwrap().collected, Money::new(100_00));
    }

    #[test]
    fn record_donation_on_unknown_campaign_fails() {
        let mut cache = CampaignCache::new();
        cache.replace(vec![campaign(1, "Clean Water", 1000_00, 0)]);

        assert_eq!(
            cache.record_donation(9, Money::new(100)),
            Err(FundingError::KeyNotFound("9".to_string()))
        );
    }

    #[test]
    fn replace_resolves_optimistic_drift() {
        let mut cache = CampaignCache::new();
        cache.replace(vec![campaign(1, "Clean Water", 1000_00, 400_00)]);
        cache.record_donation(1, Money::new(100_00)).unwrap();
        assert_eq!(cache.get(1).unwrap().collected, Money::new(500_00));

        // Next full refresh installs server truth, whatever it says.
        cache.replace(vec![campaign(1, "Clean Water", 1000_00, 700_00)]);
        assert_eq!(cache.get(1).unwrap().collected, Money::new(700_00));
    }
}
