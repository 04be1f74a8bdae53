use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::error::{LotoError, Result};

/// The two value families a ticket or a draw is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickKind {
    /// 5 distinct numbers in 1..=49
    Numbers,
    /// 2 distinct stars in 1..=9
    Stars,
}

impl PickKind {
    /// How many values make up a complete pick
    pub const fn count(self) -> usize {
        match self {
            PickKind::Numbers => 5,
            PickKind::Stars => 2,
        }
    }

    /// Highest allowed value (lowest is always 1)
    pub const fn max(self) -> u8 {
        match self {
            PickKind::Numbers => 49,
            PickKind::Stars => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PickKind::Numbers => "numbers",
            PickKind::Stars => "stars",
        }
    }

    /// Check cardinality, range and distinctness, in that order
    pub fn validate(self, values: &[u8]) -> Result<()> {
        if values.len() != self.count() {
            return Err(LotoError::InvalidTicket(format!(
                "expected exactly {} {}, got {}",
                self.count(),
                self.label(),
                values.len()
            )));
        }

        if let Some(v) = values.iter().find(|&&v| v < 1 || v > self.max()) {
            return Err(LotoError::InvalidTicket(format!(
                "{} must be between 1 and {} (got {})",
                self.label(),
                self.max(),
                v
            )));
        }

        let distinct: HashSet<u8> = values.iter().copied().collect();
        if distinct.len() != values.len() {
            return Err(LotoError::InvalidTicket(format!("{} must be unique", self.label())));
        }

        Ok(())
    }

    pub fn is_valid(self, values: &[u8]) -> bool {
        self.validate(values).is_ok()
    }

    /// Uniform sample without replacement, in draw order
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<u8> {
        let pool: Vec<u8> = (1..=self.max()).collect();
        pool.choose_multiple(rng, self.count()).copied().collect()
    }
}

/// Parse a comma separated list such as `"3,17,22,40,41"`.
///
/// Empty items are skipped so trailing commas are tolerated.
pub fn parse_values(raw: &str) -> Result<Vec<u8>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .map_err(|_| LotoError::InvalidTicket(format!("'{}' is not a valid number", s)))
        })
        .collect()
}

/// Inverse of [`parse_values`]
pub fn join_values(values: &[u8]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(PickKind::Numbers.validate(&[1, 2, 3, 4, 49]).is_ok());
        assert!(PickKind::Stars.validate(&[1, 9]).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert!(PickKind::Numbers.validate(&[1, 2, 3, 4]).is_err());
        assert!(PickKind::Numbers.validate(&[0, 2, 3, 4, 5]).is_err());
        assert!(PickKind::Numbers.validate(&[1, 2, 3, 4, 50]).is_err());
        assert!(PickKind::Numbers.validate(&[1, 2, 3, 4, 4]).is_err());
        assert!(PickKind::Stars.validate(&[3, 10]).is_err());
        assert!(PickKind::Stars.validate(&[3, 3]).is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("1, 2,3,,").unwrap(), vec![1, 2, 3]);
        assert!(parse_values("1,a,3").is_err());
        assert!(parse_values("1,-2").is_err());
        assert!(parse_values("").unwrap().is_empty());
    }

    #[test]
    fn test_join_values() {
        assert_eq!(join_values(&[10, 20, 3]), "10,20,3");
        assert_eq!(join_values(&[]), "");
    }

    #[test]
    fn test_sample_is_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert!(PickKind::Numbers.is_valid(&PickKind::Numbers.sample(&mut rng)));
            assert!(PickKind::Stars.is_valid(&PickKind::Stars.sample(&mut rng)));
        }
    }
}
