use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::OutcomeRecord;

/// Pool-wide ordering policy, decided once per resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// At least one ticket matched a number or a star
    AnyMatch,
    /// Nobody matched anything; fall back to the number-sum distance
    NoMatch,
}

impl RankingMode {
    pub fn detect(records: &[OutcomeRecord]) -> Self {
        if records.iter().any(OutcomeRecord::has_match) {
            RankingMode::AnyMatch
        } else {
            RankingMode::NoMatch
        }
    }

    fn compare(self, a: &OutcomeRecord, b: &OutcomeRecord) -> Ordering {
        match self {
            RankingMode::AnyMatch => b
                .matching_numbers
                .len()
                .cmp(&a.matching_numbers.len())
                .then_with(|| b.matching_stars.len().cmp(&a.matching_stars.len()))
                .then_with(|| a.proximity_numbers.cmp(&b.proximity_numbers))
                .then_with(|| a.proximity_stars.cmp(&b.proximity_stars)),
            RankingMode::NoMatch => a.sum_proximity.cmp(&b.sum_proximity),
        }
    }

    /// Whether two adjacent records share a payout
    fn ties(self, a: &OutcomeRecord, b: &OutcomeRecord) -> bool {
        match self {
            RankingMode::AnyMatch => a.tie_key() == b.tie_key(),
            RankingMode::NoMatch => false,
        }
    }
}

/// A run of tied records: `records[start..start + len]` of a [`Ranking`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankGroup {
    pub start: usize,
    pub len: usize,
}

impl RankGroup {
    /// 1-based rank of the first member
    pub fn first_rank(&self) -> usize {
        self.start + 1
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// Records in rank order plus their tie groups
#[derive(Debug, Clone)]
pub struct Ranking {
    pub mode: RankingMode,
    pub records: Vec<OutcomeRecord>,
    pub groups: Vec<RankGroup>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn group_members(&self, group: &RankGroup) -> &[OutcomeRecord] {
        &self.records[group.range()]
    }
}

/// Order every record of the pool and split the order into tie groups.
///
/// The sort is stable: records that compare equal keep pool order.
pub fn rank(mut records: Vec<OutcomeRecord>) -> Ranking {
    let mode = RankingMode::detect(&records);
    records.sort_by(|a, b| mode.compare(a, b));

    let mut groups = Vec::new();
    let mut start = 0;
    while start < records.len() {
        let mut end = start + 1;
        while end < records.len() && mode.ties(&records[start], &records[end]) {
            end += 1;
        }
        groups.push(RankGroup {
            start,
            len: end - start,
        });
        start = end;
    }

    tracing::debug!(
        "Ranked {} records into {} groups ({:?})",
        records.len(),
        groups.len(),
        mode
    );

    Ranking {
        mode,
        records,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        index: usize,
        numbers: usize,
        stars: usize,
        prox_n: u32,
        prox_s: u32,
        sum: u32,
    ) -> OutcomeRecord {
        OutcomeRecord {
            ticket_index: index,
            matching_numbers: (1..=numbers as u8).collect(),
            matching_stars: (1..=stars as u8).collect(),
            proximity_numbers: prox_n,
            proximity_stars: prox_s,
            sum_proximity: sum,
            gains: 0.0,
        }
    }

    fn order(ranking: &Ranking) -> Vec<usize> {
        ranking.records.iter().map(|r| r.ticket_index).collect()
    }

    #[test]
    fn test_detect_mode() {
        assert_eq!(RankingMode::detect(&[]), RankingMode::NoMatch);
        assert_eq!(
            RankingMode::detect(&[record(0, 0, 0, 5, 1, 3), record(1, 0, 1, 5, 0, 3)]),
            RankingMode::AnyMatch
        );
        assert_eq!(
            RankingMode::detect(&[record(0, 0, 0, 5, 1, 3), record(1, 0, 0, 5, 2, 3)]),
            RankingMode::NoMatch
        );
    }

    #[test]
    fn test_any_match_ordering() {
        let ranking = rank(vec![
            record(0, 1, 0, 10, 2, 0),
            record(1, 2, 0, 30, 4, 0),
            record(2, 2, 1, 40, 0, 0),
            record(3, 2, 0, 20, 4, 0),
            record(4, 2, 0, 20, 3, 0),
        ]);

        assert_eq!(ranking.mode, RankingMode::AnyMatch);
        assert_eq!(order(&ranking), vec![2, 4, 3, 1, 0]);
        assert_eq!(ranking.groups.len(), 5);
    }

    #[test]
    fn test_no_match_orders_by_sum_proximity() {
        let ranking = rank(vec![
            record(0, 0, 0, 10, 2, 50),
            record(1, 0, 0, 99, 9, 4),
            record(2, 0, 0, 1, 1, 17),
        ]);

        assert_eq!(ranking.mode, RankingMode::NoMatch);
        assert_eq!(order(&ranking), vec![1, 2, 0]);
    }

    #[test]
    fn test_tie_groups_in_any_match_mode() {
        let ranking = rank(vec![
            record(0, 1, 1, 10, 2, 0),
            record(1, 3, 0, 5, 5, 0),
            record(2, 1, 1, 10, 2, 0),
            record(3, 1, 1, 10, 2, 0),
            record(4, 0, 0, 1, 1, 0),
        ]);

        assert_eq!(order(&ranking), vec![1, 0, 2, 3, 4]);
        assert_eq!(
            ranking.groups,
            vec![
                RankGroup { start: 0, len: 1 },
                RankGroup { start: 1, len: 3 },
                RankGroup { start: 4, len: 1 },
            ]
        );
        assert_eq!(ranking.groups[1].first_rank(), 2);
        assert_eq!(ranking.group_members(&ranking.groups[1]).len(), 3);
    }

    #[test]
    fn test_no_match_mode_never_groups() {
        let ranking = rank(vec![
            record(0, 0, 0, 10, 2, 8),
            record(1, 0, 0, 10, 2, 8),
        ]);

        // Stable: equal keys keep pool order
        assert_eq!(order(&ranking), vec![0, 1]);
        assert_eq!(ranking.groups.len(), 2);
    }

    #[test]
    fn test_rank_empty_pool() {
        let ranking = rank(Vec::new());
        assert!(ranking.is_empty());
        assert!(ranking.groups.is_empty());
    }
}
