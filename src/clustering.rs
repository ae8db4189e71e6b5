//! Proximity clustering engine.
//!
//! Partitions the current item set into maximal connected components under
//! the proximity relation: two items are adjacent iff the Euclidean distance
//! between their centers is at most the threshold, and adjacency extends
//! transitively, so a chain of near items groups together even when the
//! endpoints are far apart.

use crate::constants::GROUP_PADDING;
use crate::types::{Group, GroupId, Item, ItemSnapshot};
use std::collections::VecDeque;

/// Computes the grouping of `items` under the given proximity `threshold`.
///
/// Connected components are found by breadth-first traversal from each
/// unvisited item; naive O(n²) distance checks are fine for the tens of
/// items this canvas holds, and the recompute runs on every drag frame.
///
/// Each component becomes one [`Group`] whose bounding box is the union of
/// the members' square footprints (`center ± size`) expanded by
/// [`GROUP_PADDING`]. Items with malformed geometry are skipped. Zero items
/// yield an empty list; an isolated item becomes a singleton group.
///
/// Group ids derive from sorted membership, so clustering an unchanged item
/// list twice yields identical ids and memberships.
pub fn cluster(items: &[Item], threshold: f32) -> Vec<Group> {
    let valid: Vec<&Item> = items.iter().filter(|i| i.is_well_formed()).collect();
    if valid.len() < items.len() {
        log::warn!(
            "skipping {} malformed item(s) during clustering",
            items.len() - valid.len()
        );
    }

    let mut visited = vec![false; valid.len()];
    let mut groups = Vec::new();

    for start in 0..valid.len() {
        if visited[start] {
            continue;
        }

        let mut queue = VecDeque::from([start]);
        let mut members: Vec<u32> = Vec::new();
        let mut snapshots: Vec<ItemSnapshot> = Vec::new();

        while let Some(current) = queue.pop_front() {
            if visited[current] {
                continue;
            }
            visited[current] = true;

            let item = valid[current];
            members.push(item.id);
            snapshots.push(ItemSnapshot {
                x: item.x,
                y: item.y,
                size: item.size,
            });

            for (other_idx, other) in valid.iter().enumerate() {
                if visited[other_idx] || other_idx == current {
                    continue;
                }
                let dx = item.x - other.x;
                let dy = item.y - other.y;
                if (dx * dx + dy * dy).sqrt() <= threshold {
                    queue.push_back(other_idx);
                }
            }
        }

        let is_single = members.len() == 1;
        members.sort_unstable();

        groups.push(Group {
            id: GroupId::from_members(&members),
            bounds: component_bounds(&snapshots),
            members,
            snapshots,
            is_single,
        });
    }

    groups
}

/// Union of member square footprints, expanded by the silhouette padding.
fn component_bounds(snapshots: &[ItemSnapshot]) -> egui::Rect {
    let mut bounds = egui::Rect::NOTHING;
    for snap in snapshots {
        let footprint = egui::Rect::from_min_max(
            egui::pos2(snap.x - snap.size, snap.y - snap.size),
            egui::pos2(snap.x + snap.size, snap.y + snap.size),
        );
        bounds = bounds.union(footprint);
    }
    bounds.expand(GROUP_PADDING)
}
