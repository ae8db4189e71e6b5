//! Canvas interaction functionality.
//!
//! This module handles token dragging, hit testing, hover tracking, and the
//! coordinate transformation between screen and canvas space. The canvas has
//! no pan or zoom; canvas coordinates are screen coordinates relative to the
//! canvas rect's top-left corner.

use super::state::{DragState, ShoeboxApp};
use crate::types::{GroupId, Item, ItemId};
use eframe::egui;
use std::time::Instant;

impl ShoeboxApp {
    /// Converts a screen position to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> egui::Pos2 {
        (screen_pos - rect.min).to_pos2()
    }

    /// Converts a canvas position to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_pos: egui::Pos2, rect: egui::Rect) -> egui::Pos2 {
        rect.min + canvas_pos.to_vec2()
    }

    /// Finds the token under the given canvas position, if any.
    ///
    /// Tokens are circular, so hits are tested against each token's radius.
    /// Later items render on top, so the scan runs back to front.
    pub fn find_item_at_position(&self, pos: egui::Pos2) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| (item.center() - pos).length() <= item.size / 2.0)
            .map(|item| item.id)
    }

    /// Finds the group whose bounds contain the given canvas position.
    pub fn find_group_at_position(&self, pos: egui::Pos2) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| g.bounds.contains(pos))
            .map(|g| g.id)
    }

    /// Starts dragging the given token.
    ///
    /// Captures the pointer-to-center offset so the token doesn't snap to the
    /// cursor, and snapshots the current grouping for merge detection when
    /// the drag is released.
    pub fn begin_drag(&mut self, item_id: ItemId, pointer: egui::Pos2) {
        let Some(item) = self.item(item_id) else { return };
        let offset = item.center() - pointer;
        let pre_drag_groups = self.groups.clone();
        self.interaction.drag = Some(DragState {
            item_id,
            offset,
            pre_drag_groups,
        });
        // Dragged token renders on top from now on.
        if let Some(idx) = self.items.iter().position(|i| i.id == item_id) {
            let item = self.items.remove(idx);
            self.items.push(item);
        }
    }

    /// Moves the dragged token to follow the pointer. Groups and blobs
    /// update live while the drag is in progress.
    pub fn drag_to(&mut self, pointer: egui::Pos2) {
        let Some(drag) = &self.interaction.drag else { return };
        let (id, offset) = (drag.item_id, drag.offset);
        if let Some(item) = self.item_mut(id) {
            item.x = pointer.x + offset.x;
            item.y = pointer.y + offset.y;
        }
        self.recluster();
    }

    /// Releases the current drag and records any merges it caused.
    pub fn end_drag(&mut self, now: Instant) {
        let Some(drag) = self.interaction.drag.take() else { return };
        self.recluster();
        let current = self.groups.clone();
        self.merges
            .record_release(&drag.pre_drag_groups, &current, now);
    }

    /// Handles pointer input over the canvas: dragging and delete mode on
    /// press/release, group hover otherwise.
    pub fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, now: Instant) {
        let rect = response.rect;

        if ui.input(|i| i.pointer.primary_down()) {
            if let Some(screen_pos) = response.interact_pointer_pos() {
                let pos = self.screen_to_canvas(screen_pos, rect);
                if self.interaction.drag.is_some() {
                    self.drag_to(pos);
                } else if let Some(item_id) = self.find_item_at_position(pos) {
                    if self.interaction.delete_mode {
                        if ui.input(|i| i.pointer.primary_pressed()) {
                            self.remove_item(item_id);
                        }
                    } else {
                        self.begin_drag(item_id, pos);
                    }
                }
            }
        } else {
            self.end_drag(now);
        }

        self.interaction.hovered_group = response
            .hover_pos()
            .map(|p| self.screen_to_canvas(p, rect))
            .and_then(|p| self.find_group_at_position(p));
    }

    /// Adds a new token of the given kind at the canvas center.
    pub fn add_item(&mut self, kind: &str) {
        let next_id = self.items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let center = self
            .canvas
            .rect
            .map(|r| egui::pos2(r.width() / 2.0, r.height() / 2.0))
            .unwrap_or_else(|| egui::pos2(300.0, 300.0));
        self.items.push(Item::new(next_id, kind, center.x, center.y));
        self.recluster();
    }
}
