use std::{
    fmt,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::FundingError;

/// Money amount represented as **integer paise** (hundredths of a rupee).
///
/// Use this type for all monetary values in the core (goals, collected
/// totals, donation amounts) so summation stays exact regardless of how many
/// donations are rolled up or in which order.
///
/// The backend exchanges amounts as JSON numbers in major units; convert at
/// the boundary with [`Money::try_from_major`] and [`Money::to_major`].
///
/// # Examples
///
/// ```rust
/// use funding::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "₹12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use funding::Money;
///
/// assert_eq!("500".parse::<Money>().unwrap().minor(), 500_00);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 10_50);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer paise.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in paise.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Subtraction floored at zero. `remaining = goal.saturating_sub(collected)`
    /// can never go negative even against inconsistent inputs.
    #[must_use]
    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.checked_sub(rhs.0).unwrap_or(i64::MIN).max(0))
    }

    /// Converts a wire amount in major units into paise.
    ///
    /// The backend stores amounts as doubles; the nearest paise is taken so
    /// every value it can legitimately hold round-trips. Non-finite input is
    /// rejected, as are values outside the representable range.
    pub fn try_from_major(major: f64) -> Result<Self, FundingError> {
        if !major.is_finite() {
            return Err(FundingError::InvalidAmount(
                "amount is not a number".to_string(),
            ));
        }
        let minor = (major * 100.0).round();
        if minor.abs() >= i64::MAX as f64 {
            return Err(FundingError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Money(minor as i64))
    }

    /// Converts a wire amount in major units, defaulting a missing field to 0.
    pub fn try_from_major_opt(major: Option<f64>) -> Result<Self, FundingError> {
        major.map_or(Ok(Money::ZERO), Self::try_from_major)
    }

    /// The amount in major units, for composing request bodies.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let rupees = abs / 100;
        let paise = abs % 100;
        write!(f, "{sign}₹{rupees}.{paise:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl FromStr for Money {
    type Err = FundingError;

    /// Parses a decimal string into paise.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`; rejects empty input and more than 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || FundingError::InvalidAmount("empty amount".to_string());
        let invalid = || FundingError::InvalidAmount("invalid amount".to_string());
        let overflow = || FundingError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let rupees_str = parts.next().ok_or_else(invalid)?;
        let paise_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if rupees_str.is_empty() || !rupees_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let rupees: i64 = rupees_str.parse().map_err(|_| invalid())?;

        let paise: i64 = match paise_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(FundingError::InvalidAmount(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = rupees
            .checked_mul(100)
            .and_then(|v| v.checked_add(paise))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_inr() {
        assert_eq!(Money::new(0).to_string(), "₹0.00");
        assert_eq!(Money::new(1).to_string(), "₹0.01");
        assert_eq!(Money::new(10).to_string(), "₹0.10");
        assert_eq!(Money::new(1050).to_string(), "₹10.50");
        assert_eq!(Money::new(-1050).to_string(), "-₹10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("500".parse::<Money>().unwrap().minor(), 500_00);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
    }

    #[test]
    fn wire_conversion_round_trips() {
        let amount = Money::try_from_major(600.0).unwrap();
        assert_eq!(amount.minor(), 600_00);
        assert_eq!(amount.to_major(), 600.0);

        assert_eq!(Money::try_from_major_opt(None).unwrap(), Money::ZERO);
        assert!(Money::try_from_major(f64::NAN).is_err());
        assert!(Money::try_from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let goal = Money::new(1000_00);
        let collected = Money::new(1200_00);
        assert_eq!(goal.saturating_sub(collected), Money::ZERO);
        assert!(goal.saturating_sub(collected).is_zero());
        assert_eq!(collected.saturating_sub(goal), Money::new(200_00));
    }
}
