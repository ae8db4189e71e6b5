//! Application state management structures.
//!
//! This module contains the state structures that track the archive page's
//! current UI state: the canvas viewport and animation clock, user
//! interactions with memento tokens, and the top-level application struct.

use crate::constants::PROXIMITY_THRESHOLD;
use crate::merge::MergeTracker;
use crate::naming::{namer_from_env, GroupNamer, LabelWorker};
use crate::store::{seed_items, PositionStore};
use crate::types::{Group, GroupId, Item, ItemId};
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// State related to the canvas viewport and its animation clock.
#[derive(Default)]
pub struct CanvasState {
    /// Screen rect the canvas occupied last frame, set during rendering
    pub rect: Option<egui::Rect>,
    /// Accumulated time input for the blob wobble noise
    pub noise_time: f32,
    /// When the noise clock last advanced
    pub last_tick: Option<Instant>,
}

/// In-flight drag of a single memento token.
pub struct DragState {
    /// The token being dragged
    pub item_id: ItemId,
    /// Offset from the pointer to the token's center, captured at press so
    /// the token doesn't jump under the cursor
    pub offset: egui::Vec2,
    /// Grouping as it stood when the drag began, for merge detection on release
    pub pre_drag_groups: Vec<Group>,
}

/// State related to user interactions with tokens and groups.
#[derive(Default)]
pub struct InteractionState {
    /// Current drag, if any
    pub drag: Option<DragState>,
    /// Group under the pointer, if any
    pub hovered_group: Option<GroupId>,
    /// Whether clicking a token removes it instead of dragging it
    pub delete_mode: bool,
}

/// The main application structure containing UI state and the archive data.
///
/// This struct implements the `eframe::App` trait and handles all user
/// interface rendering and interaction logic. Groups are derived state:
/// [`ShoeboxApp::recluster`] recomputes them after every item mutation.
pub struct ShoeboxApp {
    /// The memento tokens on the canvas
    pub items: Vec<Item>,
    /// Current grouping, derived from item positions
    pub groups: Vec<Group>,
    /// Merge animations in flight
    pub merges: MergeTracker,
    /// Background label generation and cache
    pub labels: LabelWorker,
    /// Canvas viewport and animation state
    pub canvas: CanvasState,
    /// User interaction state
    pub interaction: InteractionState,
    /// Randomness source for the scatter action
    pub rng: StdRng,
}

impl ShoeboxApp {
    /// Creates the app, restoring the persisted layout when one exists.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let items = cc
            .storage
            .and_then(PositionStore::load)
            .unwrap_or_else(seed_items);
        Self::with_items(items, namer_from_env())
    }

    /// Creates the app from explicit items and a naming strategy.
    pub fn with_items(items: Vec<Item>, namer: Arc<dyn GroupNamer>) -> Self {
        let mut app = Self {
            items,
            groups: Vec::new(),
            merges: MergeTracker::new(),
            labels: LabelWorker::new(namer),
            canvas: CanvasState::default(),
            interaction: InteractionState::default(),
            rng: StdRng::from_entropy(),
        };
        app.recluster();
        app
    }

    /// Recomputes the grouping from current item positions and kicks off
    /// label requests for any groups seen for the first time.
    pub fn recluster(&mut self) {
        self.groups = crate::clustering::cluster(&self.items, PROXIMITY_THRESHOLD);

        let live: HashSet<GroupId> = self.groups.iter().map(|g| g.id).collect();
        self.labels.retain_groups(&live);
        if let Some(hovered) = self.interaction.hovered_group {
            if !live.contains(&hovered) {
                self.interaction.hovered_group = None;
            }
        }

        for group in &self.groups {
            if group.is_single {
                continue;
            }
            let members: Vec<_> = group
                .members
                .iter()
                .filter_map(|id| self.item(*id))
                .filter_map(|item| crate::catalog::lookup(&item.kind))
                .collect();
            let group = group.clone();
            self.labels.request(&group, members);
        }
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Looks up an item mutably by id.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Removes an item and reclusters.
    pub fn remove_item(&mut self, id: ItemId) {
        self.items.retain(|i| i.id != id);
        self.recluster();
    }

    /// Restores the default layout, dropping merge animations in flight.
    pub fn reset_layout(&mut self) {
        self.items = seed_items();
        self.merges = MergeTracker::new();
        self.interaction = InteractionState::default();
        self.recluster();
    }

    /// Scatters every token to a random spot, treating the rearrangement
    /// like a drag release so merges animate.
    pub fn scatter(&mut self, now: Instant) {
        let Some(rect) = self.canvas.rect else { return };
        let previous = self.groups.clone();
        crate::store::scatter_items(&mut self.items, rect, &mut self.rng);
        self.recluster();
        let current = self.groups.clone();
        self.merges.record_release(&previous, &current, now);
    }
}
