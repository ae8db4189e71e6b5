use super::*;
use crate::naming::HeuristicNamer;
use eframe::egui;
use crate::types::Item;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn app_with(items: Vec<Item>) -> ShoeboxApp {
    ShoeboxApp::with_items(items, Arc::new(HeuristicNamer))
}

fn three_items() -> Vec<Item> {
    vec![
        Item::new(1, "carbone", 0.0, 0.0),
        Item::new(2, "bigsur", 50.0, 0.0),
        Item::new(3, "calpig", 500.0, 500.0),
    ]
}

#[test]
fn nearby_items_cluster_on_construction() {
    let app = app_with(three_items());

    // 1 and 2 are within the proximity threshold, 3 is far away.
    assert_eq!(app.groups.len(), 2);
    let pair = app.groups.iter().find(|g| !g.is_single).unwrap();
    assert_eq!(pair.members, vec![1, 2]);
}

#[test]
fn drag_release_onto_group_records_merge() {
    let mut app = app_with(three_items());
    let t0 = Instant::now();

    app.begin_drag(3, egui::pos2(500.0, 500.0));
    app.drag_to(egui::pos2(40.0, 0.0));
    app.end_drag(t0);

    // All three items are one group now, and the merge animates.
    assert_eq!(app.groups.len(), 1);
    let merged = app.groups[0].clone();
    assert_eq!(merged.members, vec![1, 2, 3]);
    assert!(app.merges.progress(merged.id, t0).is_some());

    // The animation plus settle buffer has fully elapsed after a second.
    app.merges.prune(t0 + Duration::from_millis(1000));
    assert!(app.merges.is_empty());
}

#[test]
fn drag_within_group_does_not_record_merge() {
    let mut app = app_with(three_items());
    let t0 = Instant::now();

    app.begin_drag(2, egui::pos2(50.0, 0.0));
    app.drag_to(egui::pos2(60.0, 10.0));
    app.end_drag(t0);

    assert!(app.merges.is_empty());
}

#[test]
fn drag_keeps_pointer_offset() {
    let mut app = app_with(three_items());

    // Grab item 1 slightly off-center.
    app.begin_drag(1, egui::pos2(10.0, 5.0));
    app.drag_to(egui::pos2(210.0, 105.0));

    let item = app.item(1).unwrap();
    assert_eq!((item.x, item.y), (200.0, 100.0));
}

#[test]
fn grouping_follows_drag_live() {
    let mut app = app_with(three_items());

    app.begin_drag(3, egui::pos2(500.0, 500.0));
    app.drag_to(egui::pos2(40.0, 0.0));
    assert_eq!(app.groups.len(), 1);

    app.drag_to(egui::pos2(500.0, 500.0));
    assert_eq!(app.groups.len(), 2);
}

#[test]
fn delete_removes_item_and_reclusters() {
    let mut app = app_with(three_items());
    app.remove_item(2);

    // 1 and 3 are far apart, so everything is a singleton now.
    assert_eq!(app.items.len(), 2);
    assert_eq!(app.groups.len(), 2);
    assert!(app.groups.iter().all(|g| g.is_single));
}

#[test]
fn add_item_lands_on_canvas_center() {
    let mut app = app_with(three_items());
    app.canvas.rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(800.0, 600.0),
    ));

    app.add_item("cat");
    let added = app.items.last().unwrap();
    assert_eq!(added.kind, "cat");
    assert_eq!((added.x, added.y), (400.0, 300.0));
    assert_eq!(added.id, 4);
}

#[test]
fn hit_test_prefers_topmost_item() {
    let mut app = app_with(vec![
        Item::new(1, "carbone", 100.0, 100.0),
        Item::new(2, "bigsur", 110.0, 100.0),
    ]);

    // Both tokens overlap the query point; the later item wins.
    assert_eq!(app.find_item_at_position(egui::pos2(105.0, 100.0)), Some(2));

    // Dragging item 1 raises it to the top.
    app.begin_drag(1, egui::pos2(100.0, 100.0));
    app.end_drag(Instant::now());
    assert_eq!(app.find_item_at_position(egui::pos2(105.0, 100.0)), Some(1));
}

#[test]
fn canvas_frame_renders_headless() {
    let mut app = app_with(three_items());

    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));

    let ctx = egui::Context::default();
    let _ = ctx.run(raw, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui, Instant::now());
        });
    });

    assert!(app.canvas.rect.is_some());
}

#[test]
fn hovering_a_group_fades_everything_else() {
    let mut app = app_with(three_items());
    let pair_id = app.groups.iter().find(|g| !g.is_single).unwrap().id;

    // Hover resolution is pure geometry over group bounds.
    assert_eq!(app.find_group_at_position(egui::pos2(25.0, 0.0)), Some(pair_id));
    assert_eq!(app.find_group_at_position(egui::pos2(1000.0, 1000.0)), None);

    app.interaction.hovered_group = Some(pair_id);
    app.remove_item(1);
    app.remove_item(2);
    // The hovered group vanished with its members.
    assert_eq!(app.interaction.hovered_group, None);
}
