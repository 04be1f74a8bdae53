use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::outcome::OutcomeRecord;
use crate::core::pick::{parse_values, PickKind};
use crate::error::{LotoError, Result};

/// A player's entry in the pool, with the result of the last draw written back
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Player name, unique within the pool
    pub name: String,

    /// 5 distinct numbers in 1..=49, in the order the player gave them
    pub chosen_numbers: Vec<u8>,

    /// 2 distinct stars in 1..=9
    pub chosen_stars: Vec<u8>,

    /// Gains from the last resolution
    #[serde(default)]
    pub gains: f64,

    #[serde(default)]
    pub matching_numbers: Vec<u8>,

    #[serde(default)]
    pub matching_stars: Vec<u8>,

    #[serde(default)]
    pub proximity_numbers: u32,

    #[serde(default)]
    pub proximity_stars: u32,
}

impl Ticket {
    /// Create a ticket, rejecting any pick with the wrong shape
    pub fn new(
        name: impl Into<String>,
        chosen_numbers: Vec<u8>,
        chosen_stars: Vec<u8>,
    ) -> Result<Self> {
        PickKind::Numbers.validate(&chosen_numbers)?;
        PickKind::Stars.validate(&chosen_stars)?;

        Ok(Self {
            name: name.into(),
            chosen_numbers,
            chosen_stars,
            gains: 0.0,
            matching_numbers: Vec::new(),
            matching_stars: Vec::new(),
            proximity_numbers: 0,
            proximity_stars: 0,
        })
    }

    /// Build a ticket from comma separated numbers and stars
    pub fn parse(name: impl Into<String>, numbers: &str, stars: &str) -> Result<Self> {
        Self::new(name, parse_values(numbers)?, parse_values(stars)?)
    }

    /// Quick pick: random numbers and stars
    pub fn random<R: Rng + ?Sized>(name: impl Into<String>, rng: &mut R) -> Self {
        Self {
            name: name.into(),
            chosen_numbers: PickKind::Numbers.sample(rng),
            chosen_stars: PickKind::Stars.sample(rng),
            gains: 0.0,
            matching_numbers: Vec::new(),
            matching_stars: Vec::new(),
            proximity_numbers: 0,
            proximity_stars: 0,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        PickKind::Numbers.is_valid(&self.chosen_numbers)
            && PickKind::Stars.is_valid(&self.chosen_stars)
    }

    /// Copy a resolved outcome onto this ticket
    pub fn apply_outcome(&mut self, record: &OutcomeRecord) {
        self.gains = record.gains;
        self.matching_numbers = record.matching_numbers.clone();
        self.matching_stars = record.matching_stars.clone();
        self.proximity_numbers = record.proximity_numbers;
        self.proximity_stars = record.proximity_stars;
    }
}

/// Names are letters (Latin-1 range included) and whitespace only
pub fn validate_name(name: &str) -> Result<()> {
    let allowed = |c: char| {
        c.is_ascii_alphabetic()
            || c.is_whitespace()
            || matches!(c, 'À'..='Ö' | 'Ø'..='ö' | 'ø'..='ÿ')
    };

    if name.trim().is_empty() || !name.chars().all(allowed) {
        return Err(LotoError::InvalidName(format!(
            "'{}' must contain only letters and spaces",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ticket_creation() {
        let ticket = Ticket::new("Alice", vec![1, 2, 3, 4, 5], vec![1, 2]).unwrap();
        assert_eq!(ticket.name, "Alice");
        assert_eq!(ticket.gains, 0.0);
        assert!(ticket.matching_numbers.is_empty());
        assert!(ticket.is_well_formed());
    }

    #[test]
    fn test_ticket_parse() {
        let ticket = Ticket::parse("Bob", "10,20,30,40,49", "1,2").unwrap();
        assert_eq!(ticket.chosen_numbers, vec![10, 20, 30, 40, 49]);
        assert_eq!(ticket.chosen_stars, vec![1, 2]);

        assert!(Ticket::parse("Bob", "10,20,30,40", "1,2").is_err());
        assert!(Ticket::parse("Bob", "10,20,30,40,49", "1,12").is_err());
        assert!(Ticket::parse("Bob", "10,10,30,40,49", "1,2").is_err());
    }

    #[test]
    fn test_random_ticket_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let ticket = Ticket::random("Player_1", &mut rng);
        assert!(ticket.is_well_formed());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jean Dupont").is_ok());
        assert!(validate_name("Hélène").is_ok());
        assert!(validate_name("R2D2").is_err());
        assert!(validate_name("bob_1").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_deserialize_without_outcome() {
        let json = r#"{"name":"Eve","chosen_numbers":[1,2,3,4,5],"chosen_stars":[8,9]}"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.proximity_numbers, 0);
        assert!(ticket.matching_stars.is_empty());
    }
}
