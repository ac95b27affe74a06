use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Whole reward points. Signed so that spend deltas can be expressed as negatives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(i64);

impl Points {
    pub const ZERO: Points = Points(0);

    pub const fn new(value: i64) -> Self {
        Points(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Points)
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        Points(value)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Points {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Points(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Points {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Points(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Points {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Points(-self.0)
    }
}

impl std::ops::AddAssign for Points {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Points {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Points::ZERO, |acc, p| acc + p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(Points::default(), Points::ZERO);
    }

    #[test]
    fn display_formats_signed_integers() {
        assert_eq!(Points::new(300).to_string(), "300");
        assert_eq!(Points::new(-5).to_string(), "-5");
        assert_eq!(Points::ZERO.to_string(), "0");
    }

    #[test]
    fn arithmetic() {
        let mut p = Points::new(100);
        p += Points::new(50);
        assert_eq!(p, Points::new(150));
        p -= Points::new(30);
        assert_eq!(p, Points::new(120));
        assert_eq!(-p, Points::new(-120));
        assert_eq!(p - Points::new(20), Points::new(100));
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(
            Points::new(1).checked_add(Points::new(2)),
            Some(Points::new(3))
        );
        assert_eq!(Points::new(i64::MAX).checked_add(Points::new(1)), None);
    }

    #[test]
    fn sum_of_points() {
        let total: Points = [1, 2, 3].into_iter().map(Points::new).sum();
        assert_eq!(total, Points::new(6));
    }

    #[test]
    fn sign_checks() {
        assert!(Points::new(-1).is_negative());
        assert!(!Points::ZERO.is_negative());
        assert!(!Points::ZERO.is_positive());
        assert!(Points::new(1).is_positive());
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&Points::new(-7)).unwrap(), "-7");
    }
}
