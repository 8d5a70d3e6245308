use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Deref;
use std::str::FromStr;

/// How many whales we're showing. The inner value is unsigned, so a negative
/// count is unrepresentable; values arriving from outside (CLI flags, a host
/// setting the property) go through `TryFrom` or `FromStr`, which reject bad
/// input instead of clamping it.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Count(pub u32);

impl Count {
    /// A count of nothing.
    pub fn zero() -> Self {
        Self(0)
    }

    /// One more whale. Saturates at the ceiling; the count never goes
    /// backwards.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Count {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Values rejected at the assignment boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A negative number of whales doesn't mean anything here.
    #[error("count cannot be negative (got {0})")]
    Negative(i64),

    /// More whales than we can track.
    #[error("count is too large (got {0})")]
    TooLarge(i64),

    /// Whatever this was, it wasn't a whole number.
    #[error("could not read {0:?} as a count")]
    Unparseable(String),
}

impl TryFrom<i64> for Count {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self, Error> {
        if raw < 0 {
            return Err(Error::Negative(raw));
        }

        u32::try_from(raw).map(Self).map_err(|_| Error::TooLarge(raw))
    }
}

impl FromStr for Count {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::Unparseable(s.to_string()))?;

        Self::try_from(raw)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::proptest;

    #[test]
    fn rejects_negative_values() {
        assert_eq!(Count::try_from(-1), Err(Error::Negative(-1)));
    }

    #[test]
    fn parses_the_boundary_cases() {
        assert_eq!("0".parse(), Ok(Count::zero()));
        assert_eq!("42".parse(), Ok(Count(42)));
        assert_eq!("-3".parse::<Count>(), Err(Error::Negative(-3)));
        assert_eq!(
            "whale".parse::<Count>(),
            Err(Error::Unparseable("whale".to_string()))
        );
    }

    #[test]
    fn saturates_at_the_ceiling() {
        assert_eq!(Count(u32::MAX).next(), Count(u32::MAX));
    }

    proptest! {
        #[test]
        fn next_never_decreases(count: Count) {
            assert!(count.next() >= count);
        }

        #[test]
        fn accepts_all_representable_values(raw in 0..=i64::from(u32::MAX)) {
            let count = Count::try_from(raw).unwrap();

            assert_eq!(i64::from(count.0), raw);
        }
    }
}
