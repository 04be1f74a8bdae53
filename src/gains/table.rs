use serde::{Deserialize, Serialize};

use crate::error::{LotoError, Result};

/// Share of the prize pool, in percent, for ranks 1 to 10
pub const GAIN_PERCENTAGES: [f64; 10] = [40.0, 20.0, 12.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

/// Percent of the prize per rank slot.
///
/// Never mutated once built: [`PercentageTable::redistributed`] returns a
/// working copy for one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageTable {
    slots: Vec<f64>,
}

impl PercentageTable {
    pub fn new(slots: Vec<f64>) -> Result<Self> {
        if slots.is_empty() {
            return Err(LotoError::Other("percentage table needs at least one slot".into()));
        }
        if slots.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(LotoError::Other(format!(
                "percentage table slots must be finite and non-negative: {:?}",
                slots
            )));
        }
        Ok(Self { slots })
    }

    /// The 40/20/12/7/6/5/4/3/2/1 table
    pub fn standard() -> Self {
        Self {
            slots: GAIN_PERCENTAGES.to_vec(),
        }
    }

    /// Number of paid rank slots
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn total(&self) -> f64 {
        self.slots.iter().sum()
    }

    pub fn slots(&self) -> &[f64] {
        &self.slots
    }

    /// Working copy for a pool of `pool_size` tickets.
    ///
    /// With fewer tickets than slots only the first `pool_size` slots are
    /// kept, and the weight of the dropped slots is spread over them in
    /// proportion to their own weight.
    pub fn redistributed(&self, pool_size: usize) -> PercentageTable {
        if pool_size >= self.width() || pool_size == 0 {
            return self.clone();
        }

        let allocated = &self.slots[..pool_size];
        let total_allocated: f64 = allocated.iter().sum();
        if total_allocated <= 0.0 {
            return self.clone();
        }
        let missing = self.total() - total_allocated;

        let slots = allocated
            .iter()
            .map(|p| p + p / total_allocated * missing)
            .collect();

        PercentageTable { slots }
    }

    /// Sum of the slots for ranks `first_rank ..= first_rank + len - 1`,
    /// ignoring any rank past the end of the table
    pub fn slot_sum(&self, first_rank: usize, len: usize) -> f64 {
        let start = first_rank.saturating_sub(1).min(self.width());
        let end = (start + len).min(self.width());
        self.slots[start..end].iter().sum()
    }
}

impl Default for PercentageTable {
    fn default() -> Self {
        Self::standard()
    }
}
