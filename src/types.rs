//! Core data types for the keepsake canvas.
//!
//! This module defines the items placed on the canvas, the derived groups
//! produced by proximity clustering, and the ephemeral merge animations
//! played when groups coalesce.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Unique identifier for an item token.
pub type ItemId = u32;

/// One archived memento token with a position and visual size.
///
/// Items are owned by the canvas and mutated only by dragging, delete mode,
/// or a layout reset. Positions are unclamped canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this item
    pub id: ItemId,
    /// Catalog kind key, e.g. `"fournee"` (see [`crate::catalog`])
    pub kind: String,
    /// Horizontal center position in canvas units
    pub x: f32,
    /// Vertical center position in canvas units
    pub y: f32,
    /// Visual diameter in canvas units
    pub size: f32,
}

impl Item {
    /// Creates a new item at the given position with the default size.
    pub fn new(id: ItemId, kind: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: kind.into(),
            x,
            y,
            size: crate::constants::ITEM_SIZE,
        }
    }

    /// Center position as an egui point.
    pub fn center(&self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    /// Whether the item carries usable geometry. Items with non-finite
    /// coordinates or a non-positive size are skipped by clustering and
    /// rendering instead of poisoning the frame loop.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.size.is_finite() && self.size > 0.0
    }
}

/// Position and size snapshot of a group member, in the order members were
/// discovered by the clustering traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSnapshot {
    /// Horizontal center position
    pub x: f32,
    /// Vertical center position
    pub y: f32,
    /// Visual diameter
    pub size: f32,
}

impl ItemSnapshot {
    /// Center position as an egui point.
    pub fn center(&self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

/// Stable identity of a group, derived from its full membership.
///
/// The id is an FNV-1a hash over the sorted member ids, so it is identical
/// across recomputations as long as membership is unchanged, and two groups
/// with different membership cannot collide. Hover and merge-animation
/// tracking rely on this stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    /// Derives the id from a sorted slice of member item ids.
    pub fn from_members(sorted_members: &[ItemId]) -> Self {
        debug_assert!(sorted_members.windows(2).all(|w| w[0] < w[1]));
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for id in sorted_members {
            for byte in id.to_le_bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
            }
        }
        GroupId(hash)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A maximal set of items mutually connected through the proximity relation.
///
/// Groups are derived state: recomputed from scratch every time item
/// positions change, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Stable identity derived from membership
    pub id: GroupId,
    /// Bounding box of member footprints plus silhouette padding
    pub bounds: egui::Rect,
    /// Member item ids, sorted ascending
    pub members: Vec<ItemId>,
    /// Member position snapshots in traversal order
    pub snapshots: Vec<ItemSnapshot>,
    /// True iff the group has exactly one member
    pub is_single: bool,
}

impl Group {
    /// Whether the given item belongs to this group.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.members.binary_search(&item_id).is_ok()
    }

    /// Centroid of the member positions.
    pub fn centroid(&self) -> egui::Pos2 {
        if self.snapshots.is_empty() {
            return self.bounds.center();
        }
        let mut sum = egui::Vec2::ZERO;
        for snap in &self.snapshots {
            sum += snap.center().to_vec2();
        }
        (sum / self.snapshots.len() as f32).to_pos2()
    }
}

/// Time-bounded visual transition played when two or more prior groups
/// become one. Keyed by the new group's id and pruned automatically once
/// `duration` plus a settle buffer has elapsed.
#[derive(Debug, Clone)]
pub struct MergeAnimation {
    /// The group the merge produced
    pub target: Group,
    /// The previous groups absorbed into the target
    pub sources: Vec<Group>,
    /// When the drag release that caused the merge happened
    pub started: Instant,
    /// How long the grow animation runs
    pub duration: Duration,
}

impl MergeAnimation {
    /// Animation progress in `[0, 1]` at the given instant.
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Whether the animation (including its settle buffer) has run out.
    pub fn is_expired(&self, now: Instant, settle: Duration) -> bool {
        now.saturating_duration_since(self.started) >= self.duration + settle
    }
}
