pub mod distributor;
pub mod table;

pub use distributor::{distribute, round2};
pub use table::{PercentageTable, GAIN_PERCENTAGES};
