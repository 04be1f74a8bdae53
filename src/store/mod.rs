pub mod sqlite;

use async_trait::async_trait;
use crate::core::{StoredDraw, Ticket};
use crate::error::Result;
use crate::resolution::Resolution;

pub use sqlite::SqliteStore;

/// Trait for ticket pool storage
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// All tickets of the pool, in insertion order
    async fn load_all_tickets(&self) -> Result<Vec<Ticket>>;

    /// Look up a ticket by player name
    async fn find_ticket(&self, name: &str) -> Result<Option<Ticket>>;

    /// Add a ticket to the pool
    async fn insert_ticket(&self, ticket: &Ticket) -> Result<()>;

    /// Add a batch of tickets as long as the pool stays within `max_players`.
    ///
    /// The capacity check, the name check and the inserts happen atomically:
    /// either every ticket lands or none does.
    async fn insert_tickets_capped(&self, tickets: &[Ticket], max_players: usize) -> Result<()>;

    /// Number of tickets in the pool
    async fn count_tickets(&self) -> Result<usize>;

    /// Empty the pool, returning how many tickets were removed
    async fn delete_all_tickets(&self) -> Result<u64>;

    /// Stored prize amount, if one was ever set
    async fn load_prize_amount(&self) -> Result<Option<f64>>;

    async fn save_prize_amount(&self, amount: f64) -> Result<()>;

    /// Persist the draw and every ticket outcome of a resolution, all or nothing
    async fn persist_resolution(&self, resolution: &Resolution) -> Result<()>;

    /// Last persisted draw
    async fn latest_draw(&self) -> Result<Option<StoredDraw>>;

    /// Best tickets: gains desc, then number proximity, then star proximity
    async fn leaderboard(&self, limit: usize) -> Result<Vec<Ticket>>;
}
