//! Donation validation against a campaign's remaining capacity.

use api_types::donor::Donor;

use crate::{Campaign, FundingError, Money, ResultFunding};

/// What a successful submission reports back for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    pub donor_name: String,
    pub campaign_title: String,
    pub amount: Money,
}

impl Confirmation {
    #[must_use]
    pub fn new(donor: &Donor, campaign: &Campaign, amount: Money) -> Self {
        Self {
            donor_name: donor.name.clone(),
            campaign_title: campaign.title.clone(),
            amount,
        }
    }
}

/// Validates a proposed donation. Pure; performs no I/O.
///
/// The checks run in a fixed order and the first failure wins:
///
/// 1. a donor must be signed in;
/// 2. the campaign must have remaining capacity — callers check this before
///    opening any input surface, since there is nothing valid to submit;
/// 3. the raw input must parse to a strictly positive amount;
/// 4. the amount must not exceed the remaining capacity — the error carries
///    the exact remaining value so the donor can retry with a corrected
///    number. `amount == remaining` is accepted.
///
/// Run once when the form opens and again right before the write: the cached
/// campaign may have gone stale since the last catalog fetch.
pub fn validate(
    campaign: &Campaign,
    donor: Option<&Donor>,
    amount_input: &str,
) -> ResultFunding<Money> {
    if donor.is_none() {
        return Err(FundingError::NotAuthenticated);
    }

    let remaining = campaign.remaining();
    if !remaining.is_positive() {
        return Err(FundingError::FullyFunded(campaign.title.clone()));
    }

    let amount: Money = amount_input.parse()?;
    if !amount.is_positive() {
        return Err(FundingError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }

    if amount > remaining {
        return Err(FundingError::ExceedsRemaining { remaining });
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::test_support::campaign;

    fn donor() -> Donor {
        Donor {
            id: 1,
            name: "Asha".to_string(),
        }
    }

    #[test]
    fn rejects_missing_donor_first() {
        let c = campaign(1, "Clean Water", 1000_00, 0);
        assert_eq!(
            validate(&c, None, "100"),
            Err(FundingError::NotAuthenticated)
        );
    }

    #[test]
    fn fully_funded_rejected_before_amount_parsing() {
        let c = campaign(1, "Clean Water", 1000_00, 1000_00);
        let donor = donor();
        // Even a nonsense amount reports the capacity problem, since the
        // check gates opening the form in the first place.
        assert_eq!(
            validate(&c, Some(&donor), "not-a-number"),
            Err(FundingError::FullyFunded("Clean Water".to_string()))
        );
    }

    #[test]
    fn rejects_non_positive_and_unparseable_amounts() {
        let c = campaign(1, "Clean Water", 1000_00, 400_00);
        let donor = donor();
        assert!(matches!(
            validate(&c, Some(&donor), "0"),
            Err(FundingError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate(&c, Some(&donor), "-5"),
            Err(FundingError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate(&c, Some(&donor), ""),
            Err(FundingError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate(&c, Some(&donor), "12.345"),
            Err(FundingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn exceeding_reports_exact_remaining() {
        let c = campaign(1, "Clean Water", 1000_00, 400_00);
        let donor = donor();
        assert_eq!(
            validate(&c, Some(&donor), "700"),
            Err(FundingError::ExceedsRemaining {
                remaining: Money::new(600_00)
            })
        );
    }

    #[test]
    fn accepts_amounts_up_to_the_boundary() {
        let c = campaign(1, "Clean Water", 1000_00, 400_00);
        let donor = donor();
        assert_eq!(validate(&c, Some(&donor), "600"), Ok(Money::new(600_00)));
        assert_eq!(validate(&c, Some(&donor), "0.01"), Ok(Money::new(1)));
    }
}
