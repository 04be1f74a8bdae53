use crate::core::{validate_name, Draw, StoredDraw, Ticket};
use crate::store::{SqliteStore, TicketStore};
use crate::gains::PercentageTable;
use crate::resolution::{resolve, Resolution};
use crate::error::{Result, LotoError};
use std::sync::Arc;
use std::time::Instant;

/// Main lottery orchestrator: ticket intake, draw cycle, leaderboard
pub struct LotoEngine {
    store: Arc<dyn TicketStore>,
    options: EngineOptions,
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Pool capacity
    pub max_players: usize,
    /// Prize used when none was ever stored
    pub default_prize: f64,
    /// How many tickets the leaderboard shows
    pub leaderboard_size: usize,
    pub percentages: PercentageTable,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_players: 100,
            default_prize: 3_000_000.0,
            leaderboard_size: 10,
            percentages: PercentageTable::standard(),
        }
    }
}

impl LotoEngine {
    /// Create new engine backed by a SQLite file
    pub async fn new(db_path: impl AsRef<str>) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(db_path.as_ref()).await?);
        Ok(Self::with_store(store, EngineOptions::default()))
    }

    pub fn with_store(store: Arc<dyn TicketStore>, options: EngineOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Validate and add a player's ticket to the pool
    pub async fn register_ticket(&self, name: &str, numbers: &str, stars: &str) -> Result<Ticket> {
        validate_name(name)?;
        let ticket = Ticket::parse(name, numbers, stars)?;

        self.store
            .insert_tickets_capped(std::slice::from_ref(&ticket), self.options.max_players)
            .await?;
        tracing::info!("🎟️ Ticket registered for '{}'", ticket.name);

        Ok(ticket)
    }

    /// Fill the pool with `count` quick-pick tickets named `Player_<n>`.
    ///
    /// The batch is inserted atomically. A concurrent intake that takes one
    /// of the generated names surfaces as `DuplicatePlayer` and nothing is
    /// added.
    pub async fn generate_players(&self, count: usize) -> Result<Vec<Ticket>> {
        let existing = self.store.count_tickets().await?;

        let tickets: Vec<Ticket> = {
            let mut rng = rand::thread_rng();
            (1..=count)
                .map(|i| Ticket::random(format!("Player_{}", existing + i), &mut rng))
                .collect()
        };

        self.store
            .insert_tickets_capped(&tickets, self.options.max_players)
            .await?;

        tracing::info!("🎲 Generated {} players", tickets.len());
        Ok(tickets)
    }

    /// Places left before the pool is full
    pub async fn remaining_slots(&self) -> Result<usize> {
        let count = self.store.count_tickets().await?;
        Ok(self.options.max_players.saturating_sub(count))
    }

    /// Every ticket of the pool, in registration order
    pub async fn players(&self) -> Result<Vec<Ticket>> {
        self.store.load_all_tickets().await
    }

    /// Empty the pool
    pub async fn delete_players(&self) -> Result<u64> {
        let deleted = self.store.delete_all_tickets().await?;
        tracing::info!("🧹 Deleted {} players", deleted);
        Ok(deleted)
    }

    /// Current prize pool
    pub async fn prize(&self) -> Result<f64> {
        Ok(self
            .store
            .load_prize_amount()
            .await?
            .unwrap_or(self.options.default_prize))
    }

    /// Set the prize pool from user input; only plain digits are accepted
    pub async fn update_prize(&self, raw: &str) -> Result<f64> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(LotoError::InvalidPrize(raw.to_string()));
        }

        let amount: f64 = raw
            .parse()
            .map_err(|_| LotoError::InvalidPrize(raw.to_string()))?;
        if !amount.is_finite() {
            return Err(LotoError::InvalidPrize(raw.to_string()));
        }

        self.store.save_prize_amount(amount).await?;
        tracing::info!("💰 Prize updated to {:.2}", amount);

        Ok(amount)
    }

    /// Draw random winning numbers and resolve the pool against them
    pub async fn run_draw(&self) -> Result<Resolution> {
        let draw = Draw::random(&mut rand::thread_rng());
        self.run_draw_with(draw).await
    }

    /// Resolve the pool against a given draw and persist the outcome
    pub async fn run_draw_with(&self, draw: Draw) -> Result<Resolution> {
        let start = Instant::now();

        let tickets = self.store.load_all_tickets().await?;
        let total_prize = self.prize().await?;

        let resolution = resolve(&draw, tickets, total_prize, &self.options.percentages);
        self.store.persist_resolution(&resolution).await?;

        tracing::info!(
            "✅ Draw {} resolved: {} tickets, {} winners, {:.2} paid ({:?}, {:.2}ms)",
            resolution.draw,
            resolution.tickets.len(),
            resolution.winners().count(),
            resolution.total_paid(),
            resolution.mode,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(resolution)
    }

    /// Last persisted draw
    pub async fn latest_draw(&self) -> Result<Option<StoredDraw>> {
        self.store.latest_draw().await
    }

    /// Top tickets of the last draw
    pub async fn leaderboard(&self) -> Result<Vec<Ticket>> {
        self.store.leaderboard(self.options.leaderboard_size).await
    }
}
