//! Canvas rendering for blobs, tokens, and labels.
//!
//! This module handles all drawing operations: the organic blob silhouette
//! behind each group, the memento tokens themselves, and the hover label.
//! Blob outlines are rebuilt from scratch every frame from item positions,
//! the noise clock, and any merge animation in flight.

use super::state::ShoeboxApp;
use crate::constants::*;
use crate::geometry::{convex_hull, wobble_noise};
use crate::types::{Group, Item};
use eframe::egui;
use std::time::Instant;

impl ShoeboxApp {
    /// Renders the archive canvas: blobs behind, tokens on top, then the
    /// hover label. When a group is hovered, every other group fades.
    pub fn render_archive(&self, painter: &egui::Painter, rect: egui::Rect, now: Instant) {
        painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);

        let hovered = self.interaction.hovered_group;
        for group in &self.groups {
            let faded = hovered.is_some() && hovered != Some(group.id);
            self.draw_blob(painter, rect, group, now, faded);
        }

        for item in &self.items {
            if !item.is_well_formed() {
                continue;
            }
            let faded = match hovered {
                Some(id) => !self
                    .groups
                    .iter()
                    .any(|g| g.id == id && g.contains(item.id)),
                None => false,
            };
            self.draw_token(painter, rect, item, faded);
        }

        if let Some(id) = hovered {
            if let Some(group) = self.groups.iter().find(|g| g.id == id) {
                self.draw_group_label(painter, rect, group);
            }
        }
    }

    /// Draws the organic silhouette behind a group.
    fn draw_blob(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        group: &Group,
        now: Instant,
        faded: bool,
    ) {
        let outline = if group.is_single {
            self.single_outline(group)
        } else {
            self.cluster_outline(group, now)
        };
        if outline.len() < 3 {
            return;
        }

        let mut color = group_color(group);
        if faded {
            color = color.gamma_multiply(FADED_OPACITY);
        }

        // Soft drop shadow, nudged down so the blob reads as sitting on the page.
        let shadow: Vec<egui::Pos2> = outline
            .iter()
            .map(|p| self.canvas_to_screen(*p, rect) + egui::vec2(0.0, 2.0))
            .collect();
        let shadow_alpha = if faded { 10 } else { 18 };
        painter.add(egui::Shape::convex_polygon(
            shadow,
            egui::Color32::from_black_alpha(shadow_alpha),
            egui::Stroke::NONE,
        ));

        let screen: Vec<egui::Pos2> = outline
            .iter()
            .map(|p| self.canvas_to_screen(*p, rect))
            .collect();
        painter.add(blob_mesh(
            &screen,
            self.canvas_to_screen(group.centroid(), rect),
            color,
        ));
    }

    /// Outline for a single-member group: a wobbly circle around the token.
    fn single_outline(&self, group: &Group) -> Vec<egui::Pos2> {
        let snap = match group.snapshots.first() {
            Some(s) => *s,
            None => return Vec::new(),
        };
        let center = snap.center();
        let base_radius = snap.size * SINGLE_RADIUS_FACTOR;
        let t = self.canvas.noise_time;

        let mut points = Vec::new();
        let mut angle = 0.0_f32;
        while angle < std::f32::consts::TAU {
            // Slow breathing pulse layered under the noise wobble.
            let pulse = 1.0 + 0.03 * (t * 2.0 + angle * 3.0).sin();
            let wobble = wobble_noise(angle.cos() + t, angle.sin() + t) * SINGLE_WOBBLE;
            let radius = base_radius * pulse + wobble;
            points.push(egui::pos2(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
            angle += SINGLE_ANGLE_STEP;
        }
        points
    }

    /// Outline for a multi-member group: rings around every member, convex
    /// hull of the union, merge expansion, noise wobble, then bezier
    /// smoothing so the silhouette reads as one organic shape.
    fn cluster_outline(&self, group: &Group, now: Instant) -> Vec<egui::Pos2> {
        let t = self.canvas.noise_time;

        let mut ring_points = Vec::new();
        for snap in &group.snapshots {
            let center = snap.center();
            let radius = snap.size * RING_RADIUS_FACTOR;
            let mut angle = 0.0_f32;
            while angle < std::f32::consts::TAU {
                ring_points.push(egui::pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
                angle += RING_ANGLE_STEP;
            }
        }

        let mut hull = convex_hull(&ring_points);
        if hull.len() < 3 {
            return hull;
        }

        // A freshly merged blob grows out from the centroid as the
        // animation progresses.
        if let Some(progress) = self.merges.progress(group.id, now) {
            let eased = ease_out_cubic(progress);
            let scale = 0.85 + 0.15 * eased;
            let centroid = group.centroid();
            for p in &mut hull {
                *p = centroid + (*p - centroid) * scale;
            }
        }

        let centroid = group.centroid();
        for p in &mut hull {
            let wobble = wobble_noise(p.x * 0.01 + t, p.y * 0.01 + t) * HULL_WOBBLE;
            let dir = *p - centroid;
            let len = dir.length();
            if len > f32::EPSILON {
                *p += dir * (wobble / len);
            }
        }

        smooth_outline(&hull, t)
    }

    /// Draws one memento token: a filled disc with the catalog name.
    fn draw_token(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        item: &Item,
        faded: bool,
    ) {
        let center = self.canvas_to_screen(item.center(), rect);
        let radius = item.size / 2.0;
        let info = crate::catalog::lookup(&item.kind);

        let mut fill = token_color(item);
        let mut stroke_color = egui::Color32::from_gray(70);
        let mut text_color = egui::Color32::from_gray(40);
        if faded {
            fill = fill.gamma_multiply(FADED_OPACITY);
            stroke_color = stroke_color.gamma_multiply(FADED_OPACITY);
            text_color = text_color.gamma_multiply(FADED_OPACITY);
        }

        painter.circle(center, radius, fill, egui::Stroke::new(1.5, stroke_color));

        let name = info.map(|i| i.name).unwrap_or(item.kind.as_str());
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            name,
            egui::FontId::proportional(11.0),
            text_color,
        );

        if self.interaction.delete_mode {
            painter.text(
                center + egui::vec2(radius * 0.6, -radius * 0.6),
                egui::Align2::CENTER_CENTER,
                "×",
                egui::FontId::proportional(16.0),
                egui::Color32::from_rgb(0xC0, 0x39, 0x2B),
            );
        }
    }

    /// Draws the hovered group's label above its blob.
    fn draw_group_label(&self, painter: &egui::Painter, rect: egui::Rect, group: &Group) {
        let label = self.labels.label_for(group.id);
        let anchor = self.canvas_to_screen(
            egui::pos2(group.bounds.center().x, group.bounds.min.y - 8.0),
            rect,
        );

        let galley = painter.layout_no_wrap(
            label.to_string(),
            egui::FontId::proportional(14.0),
            egui::Color32::from_gray(30),
        );
        let text_rect = egui::Align2::CENTER_BOTTOM
            .anchor_size(anchor, galley.size())
            .expand(6.0);
        painter.rect_filled(text_rect, 6.0, egui::Color32::from_white_alpha(220));
        painter.galley(
            text_rect.center() - galley.size() / 2.0,
            galley,
            egui::Color32::from_gray(30),
        );
    }
}

/// Stable blob color for a group, keyed to its lowest member id so a group
/// keeps its color while tokens shuffle within it.
fn group_color(group: &Group) -> egui::Color32 {
    let idx = group.members.first().copied().unwrap_or(0) as usize;
    GROUP_COLORS[idx % GROUP_COLORS.len()]
}

/// Muted fill color for a token, derived from its kind.
fn token_color(item: &Item) -> egui::Color32 {
    let mut hash: u32 = 2166136261;
    for byte in item.kind.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(16777619);
    }
    let base = GROUP_COLORS[hash as usize % GROUP_COLORS.len()];
    // Lighten toward white so tokens sit visibly on top of their blob.
    egui::Color32::from_rgb(
        base.r() / 2 + 128,
        base.g() / 2 + 128,
        base.b() / 2 + 128,
    )
}

/// Eases the merge expansion so it launches quickly and settles gently.
fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Smooths a closed outline by replacing each edge with a cubic bezier whose
/// control points sit at 30% and 70% along the edge, pushed perpendicular by
/// a noise-driven amount. Each bezier is flattened to a fixed number of
/// samples since the painter wants a polygon.
fn smooth_outline(hull: &[egui::Pos2], t: f32) -> Vec<egui::Pos2> {
    let n = hull.len();
    let mut out = Vec::with_capacity(n * BEZIER_SAMPLES);

    for i in 0..n {
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let edge = b - a;
        let normal = egui::vec2(-edge.y, edge.x).normalized();

        let bulge1 =
            (wobble_noise(a.x * 0.02 + t, a.y * 0.02 - t) * CONTROL_POINT_MAX).clamp(-CONTROL_POINT_MAX, CONTROL_POINT_MAX);
        let bulge2 =
            (wobble_noise(b.x * 0.02 - t, b.y * 0.02 + t) * CONTROL_POINT_MAX).clamp(-CONTROL_POINT_MAX, CONTROL_POINT_MAX);

        let c1 = a + edge * 0.3 + normal * bulge1;
        let c2 = a + edge * 0.7 + normal * bulge2;

        for s in 0..BEZIER_SAMPLES {
            let u = s as f32 / BEZIER_SAMPLES as f32;
            out.push(cubic_point(a, c1, c2, b, u));
        }
    }
    out
}

/// Evaluates a cubic bezier at parameter `u`.
fn cubic_point(
    a: egui::Pos2,
    c1: egui::Pos2,
    c2: egui::Pos2,
    b: egui::Pos2,
    u: f32,
) -> egui::Pos2 {
    let v = 1.0 - u;
    let p = a.to_vec2() * (v * v * v)
        + c1.to_vec2() * (3.0 * v * v * u)
        + c2.to_vec2() * (3.0 * v * u * u)
        + b.to_vec2() * (u * u * u);
    p.to_pos2()
}

/// Builds a triangle-fan mesh for the blob with a subtle radial gradient:
/// lighter than the group color at the centroid, slightly darker at the rim.
/// The smoothed outline is star-shaped around the centroid, so the fan
/// triangulation is valid even where bezier smoothing makes the polygon
/// slightly non-convex.
fn blob_mesh(outline: &[egui::Pos2], centroid: egui::Pos2, color: egui::Color32) -> egui::Mesh {
    let lighter = egui::Color32::from_rgba_unmultiplied(
        color.r().saturating_add(25),
        color.g().saturating_add(25),
        color.b().saturating_add(25),
        color.a(),
    );
    let darker = egui::Color32::from_rgba_unmultiplied(
        color.r().saturating_sub(15),
        color.g().saturating_sub(15),
        color.b().saturating_sub(15),
        color.a(),
    );

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(centroid, lighter);
    for p in outline {
        mesh.colored_vertex(*p, darker);
    }
    let n = outline.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}
