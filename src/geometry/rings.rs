use crate::domain::{Coordinate, Ring};
use log::debug;
use std::collections::VecDeque;

/// Join unordered, possibly reversed boundary segments into closed rings.
///
/// # Algorithm
/// 1. Pop the next unused segment as the seed of a ring
/// 2. While the ring is open, find the first unused segment whose start or
///    end matches the ring's tail and append it (reversed if the match is
///    at its end), skipping the shared point
/// 3. If extension stalls on an open ring of 4+ points, close it by
///    repeating the head; shorter fragments are discarded
///
/// Rings come out in assembly order. Containment between rings is not
/// analysed; each one is treated as an outer boundary.
pub fn assemble_rings(segments: Vec<Vec<Coordinate>>) -> Vec<Ring> {
    let mut pool: VecDeque<Vec<Coordinate>> =
        segments.into_iter().filter(|s| s.len() >= 2).collect();
    let mut rings = Vec::new();
    let mut discarded = 0usize;

    while let Some(mut current) = pool.pop_front() {
        let mut closed = is_closed(&current);

        while !closed {
            let tail = current[current.len() - 1];
            let Some(idx) = pool
                .iter()
                .position(|s| tail.approx_eq(&s[0]) || tail.approx_eq(&s[s.len() - 1]))
            else {
                break;
            };
            let Some(segment) = pool.remove(idx) else {
                break;
            };

            if tail.approx_eq(&segment[0]) {
                current.extend_from_slice(&segment[1..]);
            } else {
                current.extend(segment.iter().rev().skip(1).copied());
            }
            closed = is_closed(&current);
        }

        if !closed && current.len() >= 4 {
            // Tolerate small gaps in the source data
            let head = current[0];
            current.push(head);
            closed = true;
        }

        if !closed {
            discarded += 1;
            continue;
        }

        match Ring::new(current) {
            Ok(ring) => rings.push(ring),
            Err(_) => discarded += 1,
        }
    }

    debug!(
        "Assembled {} rings ({} fragments discarded)",
        rings.len(),
        discarded
    );
    rings
}

fn is_closed(points: &[Coordinate]) -> bool {
    points.len() >= 4 && points[0].approx_eq(&points[points.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::COORD_EPSILON;

    fn seg(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points
            .iter()
            .map(|&(lat, lng)| Coordinate::new(lat, lng))
            .collect()
    }

    fn assert_closed(ring: &Ring) {
        let (first, last) = (ring.first(), ring.last());
        assert!((first.lat - last.lat).abs() < COORD_EPSILON);
        assert!((first.lng - last.lng).abs() < COORD_EPSILON);
        assert!(ring.len() >= 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble_rings(Vec::new()).is_empty());
    }

    #[test]
    fn test_joins_forward_and_reversed_segments() {
        // Square split into three pieces, the middle one stored backwards
        let segments = vec![
            seg(&[(0.0, 0.0), (0.0, 1.0)]),
            seg(&[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            seg(&[(1.0, 0.0), (0.0, 0.0)]),
        ];
        let rings = assemble_rings(segments);
        assert_eq!(rings.len(), 1);

        let ring = &rings[0];
        assert_closed(ring);
        let points: Vec<Coordinate> = ring.coords().collect();
        assert_eq!(
            points,
            seg(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_matches_within_epsilon() {
        let segments = vec![
            seg(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
            seg(&[(1.00000001, 1.0), (1.0, 0.0), (0.00000002, 0.0)]),
        ];
        let rings = assemble_rings(segments);
        assert_eq!(rings.len(), 1);
        assert_closed(&rings[0]);
        assert_eq!(rings[0].len(), 5);
    }

    #[test]
    fn test_disconnected_groups_give_separate_rings() {
        let segments = vec![
            seg(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
            seg(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (5.0, 5.0)]),
            seg(&[(1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]),
        ];
        let rings = assemble_rings(segments);
        assert_eq!(rings.len(), 2);
        for ring in &rings {
            assert_closed(ring);
        }
        // Every segment is used: 3 + 2 points for the square, 4 for the triangle
        let total: usize = rings.iter().map(Ring::len).sum();
        assert_eq!(total, 5 + 4);
    }

    #[test]
    fn test_closed_seed_does_not_absorb_neighbours() {
        let segments = vec![
            seg(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]),
            seg(&[(0.0, 0.0), (-1.0, 0.0), (-1.0, -1.0), (0.0, 0.0)]),
        ];
        let rings = assemble_rings(segments);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[1].len(), 4);
    }

    #[test]
    fn test_force_closes_small_gap() {
        let segments = vec![
            seg(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
            seg(&[(1.0, 1.0), (1.0, 0.0), (0.01, 0.0)]),
        ];
        let rings = assemble_rings(segments);
        assert_eq!(rings.len(), 1);
        assert_closed(&rings[0]);
        assert_eq!(rings[0].len(), 6);
    }

    #[test]
    fn test_short_fragments_discarded() {
        let segments = vec![seg(&[(0.0, 0.0), (0.0, 1.0)]), seg(&[(3.0, 3.0)])];
        assert!(assemble_rings(segments).is_empty());
    }
}
