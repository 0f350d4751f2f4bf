use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::EngineError;

/// Signed BSK amount represented as **integer hundredths** (minor units).
///
/// Use this type for all BSK values to avoid floating-point drift.
///
/// The value is signed:
/// - positive = credit / incoming
/// - negative = debit / outgoing
///
/// # Examples
///
/// ```rust
/// use engine::Bsk;
///
/// let amount = Bsk::new(25_50);
/// assert_eq!(amount.minor(), 2550);
/// assert_eq!(amount.to_string(), "25.50");
/// assert_eq!(amount.format_signed(), "+25.50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Bsk(i64);

impl Bsk {
    pub const ZERO: Bsk = Bsk(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive (a credit).
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative (a debit).
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Formats with an explicit leading `+` for positive amounts.
    ///
    /// Negative amounts keep the default minus sign; zero gets no prefix.
    #[must_use]
    pub fn format_signed(self) -> String {
        if self.0 > 0 {
            format!("+{self}")
        } else {
            self.to_string()
        }
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Bsk) -> Option<Bsk> {
        self.0.checked_add(rhs.0).map(Bsk)
    }
}

impl fmt::Display for Bsk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl From<i64> for Bsk {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Bsk> for i64 {
    fn from(value: Bsk) -> Self {
        value.0
    }
}

impl Add for Bsk {
    type Output = Bsk;

    fn add(self, rhs: Bsk) -> Self::Output {
        Bsk(self.0 + rhs.0)
    }
}

impl AddAssign for Bsk {
    fn add_assign(&mut self, rhs: Bsk) {
        self.0 += rhs.0;
    }
}

impl Sub for Bsk {
    type Output = Bsk;

    fn sub(self, rhs: Bsk) -> Self::Output {
        Bsk(self.0 - rhs.0)
    }
}

impl SubAssign for Bsk {
    fn sub_assign(&mut self, rhs: Bsk) {
        self.0 -= rhs.0;
    }
}

impl Neg for Bsk {
    type Output = Bsk;

    fn neg(self) -> Self::Output {
        Bsk(-self.0)
    }
}

impl FromStr for Bsk {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts an optional leading `+`/`-` and at most two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

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

        if rest.is_empty() {
            return Err(empty());
        }

        let mut parts = rest.split('.');
        let whole_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if whole_str.is_empty() || !whole_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: i64 = whole_str.parse().map_err(|_| invalid())?;

        let frac: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(EngineError::InvalidAmount(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Bsk(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Bsk::new(0).to_string(), "0.00");
        assert_eq!(Bsk::new(1).to_string(), "0.01");
        assert_eq!(Bsk::new(2550).to_string(), "25.50");
        assert_eq!(Bsk::new(-50000).to_string(), "-500.00");
    }

    #[test]
    fn signed_format_prefixes_credits_only() {
        assert_eq!(Bsk::new(2550).format_signed(), "+25.50");
        assert_eq!(Bsk::new(-2550).format_signed(), "-25.50");
        assert_eq!(Bsk::new(0).format_signed(), "0.00");
    }

    #[test]
    fn parse_accepts_signs_and_decimals() {
        assert_eq!("10".parse::<Bsk>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Bsk>().unwrap().minor(), 1050);
        assert_eq!("-0.01".parse::<Bsk>().unwrap().minor(), -1);
        assert_eq!("+1.00".parse::<Bsk>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Bsk>().unwrap().minor(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Bsk>().is_err());
        assert!("12.345".parse::<Bsk>().is_err());
        assert!("1.2.3".parse::<Bsk>().is_err());
        assert!("abc".parse::<Bsk>().is_err());
    }
}
