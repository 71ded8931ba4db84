//! Path and layer execution order.
//!
//! Determines the order to run paths, minimizing non-cutting travel between
//! the end of one path and the start of the next.
//!
//! # Algorithm
//!
//! Greedy nearest neighbour over path endpoints, seeded from the home
//! position, followed by a reversal pass over open paths. This is an open
//! TSP approximation: O(n²) in the path count, which is fine for the tens to
//! low hundreds of paths in a typical job but is the scaling limit for very
//! large ones. The result is never worse than the input order: if the
//! heuristic loses, the input order is kept.
//!
//! Grouping trades some travel for fewer laser-parameter changes, each of
//! which costs settling time on the machine.

use std::collections::HashMap;

use laserpath_core::{LaserPath, LayerId, Operation, Point2D, ToolpathLayer};

/// Slack when comparing travel totals.
const TRAVEL_EPSILON: f64 = 1e-9;

/// Orders paths with nearest neighbour seeded from the origin.
pub fn reorder(paths: Vec<LaserPath>) -> Vec<LaserPath> {
    reorder_from(paths, Point2D::ORIGIN)
}

/// Orders paths with nearest neighbour seeded from `home`.
///
/// 1. Seed with the path whose first point is closest to `home`.
/// 2. Repeatedly append the remaining path whose first point is closest to
///    the current path's last point.
/// 3. Reverse an open path when approaching it from its far end is shorter.
///
/// Ties go to the path found first, so the output is deterministic for a
/// given input order. Paths without points are appended at the end in
/// input order.
pub fn reorder_from(paths: Vec<LaserPath>, home: Point2D) -> Vec<LaserPath> {
    if paths.len() < 2 {
        return paths;
    }

    let order = nearest_neighbor(&paths, home);
    let reversed = reversal_flags(&paths, &order);

    let baseline = travel_distance(&paths, home);
    let candidate = route_travel(&paths, &order, &reversed, home);
    if candidate > baseline + TRAVEL_EPSILON {
        log::debug!(
            "nearest-neighbour travel {:.3} exceeds input order {:.3}; keeping input order",
            candidate,
            baseline
        );
        return paths;
    }

    let mut slots: Vec<Option<LaserPath>> = paths.into_iter().map(Some).collect();
    order
        .iter()
        .zip(reversed)
        .filter_map(|(&idx, reverse)| {
            let mut path = slots[idx].take()?;
            if reverse {
                path.reverse();
            }
            Some(path)
        })
        .collect()
}

/// Buckets paths by `(operation, power, speed)` and orders each bucket.
///
/// Buckets run in the order their first path appears in the input. Each
/// bucket is reordered on its own, seeded from where the previous bucket
/// left the head (`home` for the first). With `optimize_travel` off the
/// buckets keep their input order.
pub fn group_similar(paths: Vec<LaserPath>, home: Point2D, optimize_travel: bool) -> Vec<LaserPath> {
    let buckets = bucket_by_settings(paths);

    let mut result = Vec::new();
    let mut head = home;
    for bucket in buckets {
        let ordered = if optimize_travel {
            reorder_from(bucket, head)
        } else {
            bucket
        };
        if let Some(end) = ordered.iter().rev().find_map(LaserPath::last_point) {
            head = end;
        }
        result.extend(ordered);
    }
    result
}

/// Splits paths into exact-match settings buckets, in first-seen order.
pub fn bucket_by_settings(paths: Vec<LaserPath>) -> Vec<Vec<LaserPath>> {
    let mut index: HashMap<(Operation, u64, u64), usize> = HashMap::new();
    let mut buckets: Vec<Vec<LaserPath>> = Vec::new();

    for path in paths {
        let key = path.settings.group_key(path.operation);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(path);
    }
    buckets
}

/// Non-cutting travel for running `paths` in the given order, starting
/// at `home`. Paths without points contribute nothing.
pub fn travel_distance(paths: &[LaserPath], home: Point2D) -> f64 {
    let mut head = home;
    let mut total = 0.0;
    for path in paths {
        if let (Some(first), Some(last)) = (path.first_point(), path.last_point()) {
            total += head.distance(first);
            head = last;
        }
    }
    total
}

/// Stable-sorts layers by operation priority: engrave, score, cut.
pub fn order_layers(mut layers: Vec<ToolpathLayer>) -> Vec<ToolpathLayer> {
    layers.sort_by_key(|layer| layer.operation.priority());
    layers
}

/// Layer ids in recommended execution order.
pub fn get_recommended_layer_order(layers: &[ToolpathLayer]) -> Vec<LayerId> {
    let mut refs: Vec<&ToolpathLayer> = layers.iter().collect();
    refs.sort_by_key(|layer| layer.operation.priority());
    refs.into_iter().map(|layer| layer.id.clone()).collect()
}

/// Greedy construction. Returns a permutation of `0..paths.len()`.
fn nearest_neighbor(paths: &[LaserPath], home: Point2D) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..paths.len())
        .filter(|&i| !paths[i].points.is_empty())
        .collect();
    let inert: Vec<usize> = (0..paths.len())
        .filter(|&i| paths[i].points.is_empty())
        .collect();

    let mut order = Vec::with_capacity(paths.len());
    let mut head = home;

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_dist = f64::MAX;
        for (pos, &idx) in remaining.iter().enumerate() {
            let dist = paths[idx]
                .first_point()
                .map(|p| head.distance_sq(p))
                .unwrap_or(f64::MAX);
            if dist < best_dist {
                best_dist = dist;
                best_pos = pos;
            }
        }

        // `remove` keeps the remaining candidates in input order for tie-breaks.
        let idx = remaining.remove(best_pos);
        if let Some(last) = paths[idx].last_point() {
            head = last;
        }
        order.push(idx);
    }

    order.extend(inert);
    order
}

/// Decides, pair by pair, whether the next open path runs backwards.
fn reversal_flags(paths: &[LaserPath], order: &[usize]) -> Vec<bool> {
    let mut flags = vec![false; order.len()];
    let mut prev_end: Option<Point2D> = None;

    for (pos, &idx) in order.iter().enumerate() {
        let path = &paths[idx];
        let (Some(first), Some(last)) = (path.first_point(), path.last_point()) else {
            continue;
        };
        if let Some(end) = prev_end {
            if !path.closed && end.distance(last) < end.distance(first) {
                flags[pos] = true;
            }
        }
        prev_end = Some(if flags[pos] { first } else { last });
    }
    flags
}

/// Travel for a candidate order with reversal flags applied.
fn route_travel(paths: &[LaserPath], order: &[usize], reversed: &[bool], home: Point2D) -> f64 {
    let mut head = home;
    let mut total = 0.0;
    for (&idx, &reverse) in order.iter().zip(reversed) {
        let path = &paths[idx];
        if let (Some(first), Some(last)) = (path.first_point(), path.last_point()) {
            let (start, end) = if reverse { (last, first) } else { (first, last) };
            total += head.distance(start);
            head = end;
        }
    }
    total
}
