use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::pick::{join_values, parse_values, PickKind};
use crate::error::Result;

/// Winning combination of one draw. Value order is the order of the draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draw {
    pub winning_numbers: Vec<u8>,
    pub winning_stars: Vec<u8>,
}

impl Draw {
    pub fn new(winning_numbers: Vec<u8>, winning_stars: Vec<u8>) -> Result<Self> {
        PickKind::Numbers.validate(&winning_numbers)?;
        PickKind::Stars.validate(&winning_stars)?;

        Ok(Self {
            winning_numbers,
            winning_stars,
        })
    }

    pub fn parse(numbers: &str, stars: &str) -> Result<Self> {
        Self::new(parse_values(numbers)?, parse_values(stars)?)
    }

    /// Sample 5 numbers and 2 stars uniformly without replacement
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            winning_numbers: PickKind::Numbers.sample(rng),
            winning_stars: PickKind::Stars.sample(rng),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        PickKind::Numbers.is_valid(&self.winning_numbers)
            && PickKind::Stars.is_valid(&self.winning_stars)
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | stars {}",
            join_values(&self.winning_numbers),
            join_values(&self.winning_stars)
        )
    }
}

/// A draw as recorded by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDraw {
    #[serde(flatten)]
    pub draw: Draw,
    pub drawn_at: chrono::DateTime<chrono::Utc>,
}
