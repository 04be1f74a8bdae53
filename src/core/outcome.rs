use serde::{Deserialize, Serialize};

/// Result of comparing one ticket against one draw.
///
/// Lives only for the duration of a resolution; the fields that matter are
/// copied back onto the owning [`Ticket`](crate::core::Ticket).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeRecord {
    /// Position of the source ticket in the pool snapshot
    pub ticket_index: usize,

    /// Chosen numbers also present in the draw
    pub matching_numbers: Vec<u8>,

    /// Chosen stars also present in the draw
    pub matching_stars: Vec<u8>,

    /// Greedy distance between unmatched numbers (lower is better)
    pub proximity_numbers: u32,

    /// Greedy distance between unmatched stars (lower is better)
    pub proximity_stars: u32,

    /// |sum of winning numbers - sum of chosen numbers|, only used when nobody matched
    pub sum_proximity: u32,

    pub gains: f64,
}

impl OutcomeRecord {
    pub fn has_match(&self) -> bool {
        !self.matching_numbers.is_empty() || !self.matching_stars.is_empty()
    }

    /// Key shared by tied records: match counts then proximities
    pub fn tie_key(&self) -> (usize, usize, u32, u32) {
        (
            self.matching_numbers.len(),
            self.matching_stars.len(),
            self.proximity_numbers,
            self.proximity_stars,
        )
    }
}
