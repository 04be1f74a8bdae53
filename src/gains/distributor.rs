use crate::gains::table::PercentageTable;
use crate::ranking::Ranking;

/// Round to cents
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Assign gains to every record of the ranking, in place.
///
/// Each tie group consumes as many rank slots as it has members and splits
/// the sum of those slots evenly. Slots past the end of the table are worth
/// nothing, and any record ranked past the table is forced to zero even when
/// its group started inside the table.
pub fn distribute(ranking: &mut Ranking, total_prize: f64, table: &PercentageTable) {
    for record in &mut ranking.records {
        record.gains = 0.0;
    }

    if ranking.is_empty() {
        return;
    }

    let working = table.redistributed(ranking.len());
    let paid_ranks = table.width();

    let mut rank = 1;
    for group in &ranking.groups {
        if rank > paid_ranks {
            break;
        }

        let percentage = working.slot_sum(rank, group.len);
        let shared_gain = round2(total_prize * percentage / (100.0 * group.len as f64));

        for record in &mut ranking.records[group.range()] {
            record.gains = shared_gain;
        }

        tracing::debug!(
            "Rank {}: {} ticket(s) share {:.4}% -> {:.2} each",
            rank,
            group.len,
            percentage,
            shared_gain
        );

        rank += group.len;
    }

    for record in ranking.records.iter_mut().skip(paid_ranks) {
        record.gains = 0.0;
    }
}
