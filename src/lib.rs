//! # Loto Engine
//!
//! Lottery draw resolution engine with:
//! - Exact matching plus greedy proximity scoring for every ticket
//! - Two-tier ranking (matches first, number-sum fallback when nobody matched)
//! - Prize pool split over the top 10 ranks with shared payouts for ties
//! - SQLite-backed ticket pool
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use loto_engine::LotoEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = LotoEngine::new("loto.db").await?;
//!
//!     engine.register_ticket("Alice", "3,17,22,40,41", "2,9").await?;
//!     engine.generate_players(20).await?;
//!
//!     let resolution = engine.run_draw().await?;
//!     for ticket in resolution.winners() {
//!         println!("{} won {:.2}", ticket.name, ticket.gains);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod gains;
pub mod ranking;
pub mod resolution;
pub mod store;

// Re-export primary types
pub use crate::core::{Draw, OutcomeRecord, StoredDraw, Ticket};
pub use engine::{EngineOptions, LotoEngine};
pub use error::{LotoError, Result};
pub use gains::{distribute, PercentageTable};
pub use ranking::{compare, rank, RankGroup, Ranking, RankingMode};
pub use resolution::{resolve, Resolution};
pub use store::{SqliteStore, TicketStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
