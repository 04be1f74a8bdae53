pub mod comparator;
pub mod policy;

pub use comparator::compare;
pub use policy::{rank, RankGroup, Ranking, RankingMode};
