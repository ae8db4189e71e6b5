//! User interface components and rendering logic for the archive page.
//!
//! This module contains all the UI-related code including the main
//! application struct, canvas rendering, and user interaction handling.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main ShoeboxApp
//! - `canvas` - Token dragging, hit testing, and coordinate mapping
//! - `rendering` - Drawing blobs, tokens, and labels

mod canvas;
mod rendering;
mod state;

pub use state::ShoeboxApp;

use crate::constants::{FRAME_INTERVAL_MS, NOISE_TIME_STEP};
use crate::store::PositionStore;
use eframe::egui;
use std::time::{Duration, Instant};

impl eframe::App for ShoeboxApp {
    /// Persist the item layout between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        PositionStore::save(storage, &self.items);
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::light());

        let now = Instant::now();

        // Apply finished label requests and drop expired merge animations
        // before anything draws this frame.
        self.labels.drain();
        self.merges.prune(now);
        self.advance_noise_clock(now);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, now);
        });

        egui::SidePanel::right("catalog_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.draw_catalog_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui, now);
        });

        // Blobs wobble continuously, so keep animating.
        ctx.request_repaint();
    }
}

impl ShoeboxApp {
    /// Advances the wobble-noise clock, throttled to the frame interval so
    /// bursts of repaints don't speed the animation up.
    fn advance_noise_clock(&mut self, now: Instant) {
        let interval = Duration::from_millis(FRAME_INTERVAL_MS);
        match self.canvas.last_tick {
            Some(last) if now.duration_since(last) < interval => {}
            _ => {
                self.canvas.noise_time += NOISE_TIME_STEP;
                self.canvas.last_tick = Some(now);
            }
        }
    }

    /// Renders the top toolbar: delete mode toggle, layout actions, and an
    /// add-memento menu fed from the catalog.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            ui.heading("Shoebox");
            ui.separator();

            ui.menu_button("Add memento", |ui| {
                for info in crate::catalog::all() {
                    if ui.button(info.name).clicked() {
                        self.add_item(info.kind);
                        ui.close();
                    }
                }
            });

            if ui.button("Scatter").clicked() {
                self.scatter(now);
            }
            if ui.button("Reset layout").clicked() {
                self.reset_layout();
            }

            ui.separator();
            ui.toggle_value(&mut self.interaction.delete_mode, "Delete mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let groups = self.groups.iter().filter(|g| !g.is_single).count();
                ui.label(format!("{} items, {} groups", self.items.len(), groups));
            });
        });
    }

    /// Renders the right-hand panel: details for the hovered group, or the
    /// full catalog when nothing is hovered.
    fn draw_catalog_panel(&mut self, ui: &mut egui::Ui) {
        let hovered = self
            .interaction
            .hovered_group
            .and_then(|id| self.groups.iter().find(|g| g.id == id))
            .cloned();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(group) = hovered {
                ui.heading(self.labels.label_for(group.id));
                ui.separator();
                for member in &group.members {
                    let Some(item) = self.item(*member) else { continue };
                    let Some(info) = crate::catalog::lookup(&item.kind) else {
                        ui.label(item.kind.as_str());
                        continue;
                    };
                    ui.label(egui::RichText::new(info.name).strong());
                    ui.label(format!("{} · {}", info.city, info.year));
                    ui.label(info.item_type);
                    ui.add_space(8.0);
                }
            } else {
                ui.heading("Catalog");
                ui.separator();
                for info in crate::catalog::all() {
                    ui.label(egui::RichText::new(info.name).strong());
                    ui.label(format!("{} · {}", info.city, info.year));
                    ui.add_space(8.0);
                }
            }
        });
    }

    /// Renders the main canvas area and handles pointer interactions.
    fn draw_canvas(&mut self, ui: &mut egui::Ui, now: Instant) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        self.canvas.rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            response.rect.size(),
        ));

        self.handle_pointer(ui, &response, now);
        self.render_archive(&painter, response.rect, now);
    }
}

#[cfg(test)]
mod tests;
