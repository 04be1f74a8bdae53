use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::{join_values, parse_values, Draw, StoredDraw, Ticket};
use crate::error::{LotoError, Result};
use crate::resolution::Resolution;
use crate::store::TicketStore;

const TICKET_COLUMNS: &str = "name, chosen_numbers, chosen_stars, gains,
    IFNULL(matching_numbers, ''), IFNULL(matching_stars, ''),
    IFNULL(proximity_numbers, 0), IFNULL(proximity_stars, 0)";

/// SQLite-backed ticket pool
///
/// Schema:
/// ```sql
/// CREATE TABLE players (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL UNIQUE,
///     chosen_numbers TEXT NOT NULL,     -- "3,17,22,40,41"
///     chosen_stars TEXT NOT NULL,       -- "2,9"
///     gains REAL DEFAULT 0.0,
///     matching_numbers TEXT,
///     matching_stars TEXT,
///     proximity_numbers INTEGER DEFAULT 0,
///     proximity_stars INTEGER DEFAULT 0
/// );
/// CREATE TABLE prize (id INTEGER PRIMARY KEY, amount REAL NOT NULL);
/// CREATE TABLE jackpot (
///     id INTEGER PRIMARY KEY,
///     winning_numbers TEXT NOT NULL,
///     winning_stars TEXT NOT NULL,
///     drawn_at TEXT NOT NULL
/// );
/// ```
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the store at `db_path`; `":memory:"` for a throwaway store
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                chosen_numbers TEXT NOT NULL,
                chosen_stars TEXT NOT NULL,
                gains REAL DEFAULT 0.0,
                matching_numbers TEXT,
                matching_stars TEXT,
                proximity_numbers INTEGER DEFAULT 0,
                proximity_stars INTEGER DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS prize (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL
            );
            CREATE TABLE IF NOT EXISTS jackpot (
                id INTEGER PRIMARY KEY,
                winning_numbers TEXT NOT NULL,
                winning_stars TEXT NOT NULL,
                drawn_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_players_gains ON players(gains);",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| LotoError::Store(format!("connection lock poisoned: {}", e)))
    }

    fn csv_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<u8>> {
        let raw: String = row.get(idx)?;
        parse_values(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn insert_row(conn: &Connection, ticket: &Ticket) -> Result<()> {
        conn.execute(
            "INSERT INTO players (name, chosen_numbers, chosen_stars, gains)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                ticket.name,
                join_values(&ticket.chosen_numbers),
                join_values(&ticket.chosen_stars),
                ticket.gains,
            ],
        )?;
        Ok(())
    }

    fn count_rows(conn: &Connection) -> Result<usize> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    fn row_to_ticket(row: &Row<'_>) -> rusqlite::Result<Ticket> {
        Ok(Ticket {
            name: row.get(0)?,
            chosen_numbers: Self::csv_column(row, 1)?,
            chosen_stars: Self::csv_column(row, 2)?,
            gains: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
            matching_numbers: Self::csv_column(row, 4)?,
            matching_stars: Self::csv_column(row, 5)?,
            proximity_numbers: row.get(6)?,
            proximity_stars: row.get(7)?,
        })
    }

    fn query_tickets(conn: &Connection, sql: &str, limit: Option<usize>) -> Result<Vec<Ticket>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = match limit {
            Some(limit) => stmt
                .query_map(params![limit as i64], Self::row_to_ticket)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt
                .query_map([], Self::row_to_ticket)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
    }

    /// Draw timestamps are RFC 3339 text; anything else falls back to now
    fn parse_timestamp(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }
}

#[async_trait]
impl TicketStore for SqliteStore {
    async fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM players ORDER BY id ASC", TICKET_COLUMNS);
        Self::query_tickets(&conn, &sql, None)
    }

    async fn find_ticket(&self, name: &str) -> Result<Option<Ticket>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM players WHERE name = ?", TICKET_COLUMNS);

        let ticket = conn
            .query_row(&sql, params![name], Self::row_to_ticket)
            .optional()?;

        Ok(ticket)
    }

    async fn insert_ticket(&self, ticket: &Ticket) -> Result<()> {
        let conn = self.conn()?;
        Self::insert_row(&conn, ticket)
    }

    async fn insert_tickets_capped(&self, tickets: &[Ticket], max_players: usize) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        for ticket in tickets {
            let taken = tx
                .query_row(
                    "SELECT 1 FROM players WHERE name = ?",
                    params![ticket.name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if taken {
                return Err(LotoError::DuplicatePlayer(ticket.name.clone()));
            }
        }

        let remaining = max_players.saturating_sub(Self::count_rows(&tx)?);
        if remaining == 0 || tickets.len() > remaining {
            return Err(LotoError::PoolFull {
                requested: tickets.len(),
                remaining,
            });
        }

        for ticket in tickets {
            Self::insert_row(&tx, ticket)?;
        }

        tx.commit()?;
        Ok(())
    }

    async fn count_tickets(&self) -> Result<usize> {
        let conn = self.conn()?;
        Self::count_rows(&conn)
    }

    async fn delete_all_tickets(&self) -> Result<u64> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM players", [])?;
        Ok(deleted as u64)
    }

    async fn load_prize_amount(&self) -> Result<Option<f64>> {
        let conn = self.conn()?;

        let amount = conn
            .query_row("SELECT amount FROM prize LIMIT 1", [], |row| row.get(0))
            .optional()?;

        Ok(amount)
    }

    async fn save_prize_amount(&self, amount: f64) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT OR REPLACE INTO prize (id, amount) VALUES (1, ?1)",
            params![amount],
        )?;

        Ok(())
    }

    async fn persist_resolution(&self, resolution: &Resolution) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO jackpot (id, winning_numbers, winning_stars, drawn_at)
             VALUES (1, ?1, ?2, ?3)",
            params![
                join_values(&resolution.draw.winning_numbers),
                join_values(&resolution.draw.winning_stars),
                Utc::now().to_rfc3339(),
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                "UPDATE players
                 SET gains = ?1, matching_numbers = ?2, matching_stars = ?3,
                     proximity_numbers = ?4, proximity_stars = ?5
                 WHERE name = ?6",
            )?;

            for ticket in &resolution.tickets {
                stmt.execute(params![
                    ticket.gains,
                    join_values(&ticket.matching_numbers),
                    join_values(&ticket.matching_stars),
                    ticket.proximity_numbers,
                    ticket.proximity_stars,
                    ticket.name,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    async fn latest_draw(&self) -> Result<Option<StoredDraw>> {
        let conn = self.conn()?;

        let row = conn
            .query_row(
                "SELECT winning_numbers, winning_stars, drawn_at FROM jackpot WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((numbers, stars, drawn_at)) => Ok(Some(StoredDraw {
                draw: Draw::parse(&numbers, &stars)?,
                drawn_at: Self::parse_timestamp(&drawn_at),
            })),
            None => Ok(None),
        }
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<Ticket>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM players
             ORDER BY gains DESC, proximity_numbers ASC, proximity_stars ASC, id ASC
             LIMIT ?",
            TICKET_COLUMNS
        );
        Self::query_tickets(&conn, &sql, Some(limit))
    }
}
