use crate::core::{Draw, OutcomeRecord, PickKind, Ticket};

/// Compare one ticket against the draw.
///
/// `ticket_index` is carried through so the orchestrator can write the
/// outcome back once the records have been reordered.
pub fn compare(ticket_index: usize, ticket: &Ticket, draw: &Draw) -> OutcomeRecord {
    debug_assert!(
        ticket.is_well_formed(),
        "malformed ticket reached the comparator: {:?}",
        ticket
    );
    debug_assert!(
        draw.is_well_formed(),
        "malformed draw reached the comparator: {:?}",
        draw
    );

    let matching_numbers = intersect(&ticket.chosen_numbers, &draw.winning_numbers);
    let matching_stars = intersect(&ticket.chosen_stars, &draw.winning_stars);

    let proximity_numbers = greedy_proximity(
        &draw.winning_numbers,
        &ticket.chosen_numbers,
        &matching_numbers,
        PickKind::Numbers,
    );
    let proximity_stars = greedy_proximity(
        &draw.winning_stars,
        &ticket.chosen_stars,
        &matching_stars,
        PickKind::Stars,
    );

    let winning_sum: i64 = draw.winning_numbers.iter().map(|&v| i64::from(v)).sum();
    let chosen_sum: i64 = ticket.chosen_numbers.iter().map(|&v| i64::from(v)).sum();
    let sum_proximity = (winning_sum - chosen_sum).unsigned_abs() as u32;

    OutcomeRecord {
        ticket_index,
        matching_numbers,
        matching_stars,
        proximity_numbers,
        proximity_stars,
        sum_proximity,
        gains: 0.0,
    }
}

/// Chosen values present in the winning set, in the player's order
fn intersect(chosen: &[u8], winning: &[u8]) -> Vec<u8> {
    chosen.iter().copied().filter(|v| winning.contains(v)).collect()
}

/// Pair every unmatched winning value (draw order) with the nearest player
/// value still available, first one wins on equal distance. A paired player
/// value is consumed. Winning values left without a partner cost the maximum
/// distance for their kind.
fn greedy_proximity(winning: &[u8], chosen: &[u8], matched: &[u8], kind: PickKind) -> u32 {
    let mut available: Vec<u8> = chosen.iter().copied().filter(|v| !matched.contains(v)).collect();

    winning
        .iter()
        .copied()
        .filter(|v| !matched.contains(v))
        .map(|target| {
            let nearest = available
                .iter()
                .enumerate()
                .min_by_key(|&(_, &candidate)| candidate.abs_diff(target))
                .map(|(idx, &candidate)| (idx, candidate));

            match nearest {
                Some((idx, candidate)) => {
                    available.remove(idx);
                    u32::from(candidate.abs_diff(target))
                }
                None => u32::from(kind.max()),
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(numbers: [u8; 5], stars: [u8; 2]) -> Ticket {
        Ticket::new("T", numbers.to_vec(), stars.to_vec()).unwrap()
    }

    fn draw(numbers: [u8; 5], stars: [u8; 2]) -> Draw {
        Draw::new(numbers.to_vec(), stars.to_vec()).unwrap()
    }

    #[test]
    fn test_full_match() {
        let d = draw([10, 20, 30, 40, 49], [1, 2]);
        let record = compare(0, &ticket([10, 20, 30, 40, 49], [1, 2]), &d);

        assert_eq!(record.matching_numbers, vec![10, 20, 30, 40, 49]);
        assert_eq!(record.matching_stars, vec![1, 2]);
        assert_eq!(record.proximity_numbers, 0);
        assert_eq!(record.proximity_stars, 0);
        assert_eq!(record.sum_proximity, 0);
        assert_eq!(record.gains, 0.0);
    }

    #[test]
    fn test_matches_follow_ticket_order() {
        let d = draw([1, 2, 3, 4, 5], [1, 2]);
        let record = compare(3, &ticket([5, 44, 1, 45, 3], [2, 9]), &d);

        assert_eq!(record.ticket_index, 3);
        assert_eq!(record.matching_numbers, vec![5, 1, 3]);
        assert_eq!(record.matching_stars, vec![2]);
    }

    #[test]
    fn test_partial_match_proximity() {
        // Remaining winning: 2, 4 (draw order); remaining player: 44, 45.
        // 2 -> 44 (42), 4 -> 45 (41)
        let d = draw([1, 2, 3, 4, 5], [1, 2]);
        let record = compare(0, &ticket([5, 44, 1, 45, 3], [2, 9]), &d);

        assert_eq!(record.proximity_numbers, 83);
        // Remaining winning star 1 vs player 9
        assert_eq!(record.proximity_stars, 8);
        assert_eq!(record.sum_proximity, (5 + 44 + 1 + 45 + 3) - 15);
    }

    #[test]
    fn test_greedy_is_draw_order_sensitive() {
        // Winning 10 comes first and takes 11; 12 is left with 20
        let chosen = ticket([11, 20, 30, 31, 32], [1, 2]);
        let first = compare(0, &chosen, &draw([10, 12, 40, 41, 42], [1, 2]));
        // 10->11 (1), 12->20 (8), 40->32 (8), 41->31 (10), 42->30 (12)
        assert_eq!(first.proximity_numbers, 39);

        // Same values, draw order reversed
        let second = compare(0, &chosen, &draw([42, 41, 40, 12, 10], [1, 2]));
        // 42->32 (10), 41->31 (10), 40->30 (10), 12->11 (1), 10->20 (10)
        assert_eq!(second.proximity_numbers, 41);
    }

    #[test]
    fn test_equal_distance_takes_first_player_value() {
        // Winning 20 is 2 away from both 18 and 22; player order puts 22 first
        let d = draw([20, 40, 41, 42, 43], [7, 8]);
        let record = compare(0, &ticket([22, 18, 1, 2, 3], [5, 6]), &d);
        // 20->22 (2), 40->18 (22), 41->3 (38), 42->2 (40), 43->1 (42)
        assert_eq!(record.proximity_numbers, 144);
        // 7->6 (1), 8->5 (3)
        assert_eq!(record.proximity_stars, 4);

        let swapped = compare(0, &ticket([18, 22, 1, 2, 3], [5, 6]), &d);
        // 20->18 (2), 40->22 (18), 41->3, 42->2, 43->1
        assert_eq!(swapped.proximity_numbers, 140);
    }

    #[test]
    fn test_missing_partner_costs_max_distance() {
        assert_eq!(greedy_proximity(&[1, 2, 3], &[1, 2], &[1, 2], PickKind::Numbers), 49);
        assert_eq!(greedy_proximity(&[4, 5], &[], &[], PickKind::Stars), 18);
    }

    #[test]
    fn test_per_pair_distance_bounds() {
        let d = draw([1, 2, 3, 4, 5], [1, 2]);
        let record = compare(0, &ticket([45, 46, 47, 48, 49], [8, 9]), &d);

        assert!(record.matching_numbers.is_empty());
        assert!(record.proximity_numbers <= 5 * 48);
        assert!(record.proximity_stars <= 2 * 8);
        assert_eq!(record.proximity_stars, 14);
    }
}
