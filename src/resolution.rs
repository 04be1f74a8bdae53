use serde::{Deserialize, Serialize};

use crate::core::{Draw, Ticket};
use crate::gains::{distribute, PercentageTable};
use crate::ranking::{compare, rank, RankingMode};

/// Outcome of one draw cycle, ready to be persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub draw: Draw,
    pub mode: RankingMode,
    pub total_prize: f64,
    /// Every ticket of the pool with its outcome written back, in rank order
    pub tickets: Vec<Ticket>,
}

impl Resolution {
    pub fn winners(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.gains > 0.0)
    }

    pub fn total_paid(&self) -> f64 {
        self.tickets.iter().map(|t| t.gains).sum()
    }
}

/// Resolve a draw against the whole pool: compare, rank, distribute, write back.
///
/// Pure: nothing is persisted here.
pub fn resolve(
    draw: &Draw,
    mut tickets: Vec<Ticket>,
    total_prize: f64,
    table: &PercentageTable,
) -> Resolution {
    let records = tickets
        .iter()
        .enumerate()
        .map(|(idx, ticket)| compare(idx, ticket, draw))
        .collect();

    let mut ranking = rank(records);
    distribute(&mut ranking, total_prize, table);

    for record in &ranking.records {
        tickets[record.ticket_index].apply_outcome(record);
    }

    let order: Vec<usize> = ranking.records.iter().map(|r| r.ticket_index).collect();
    let mut slots: Vec<Option<Ticket>> = tickets.into_iter().map(Some).collect();
    let ranked = order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect();

    Resolution {
        draw: draw.clone(),
        mode: ranking.mode,
        total_prize,
        tickets: ranked,
    }
}
