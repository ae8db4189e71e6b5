//! Shared application-wide constants.
//! Centralizes tweakable values used across clustering, rendering and interactions.

use egui::Color32;

// Items
/// Default diameter of an item token in canvas units.
pub const ITEM_SIZE: f32 = 100.0;
/// Center-to-center distance under which two items belong to the same group.
pub const PROXIMITY_THRESHOLD: f32 = 80.0;

// Grouping
/// Extra padding (in canvas units) added around the union of member footprints
/// so the organic silhouette has room to wobble without clipping.
pub const GROUP_PADDING: f32 = 40.0;

// Blob rendering
/// Radius factor applied to a lone item's size when drawing its breathing circle.
pub const SINGLE_RADIUS_FACTOR: f32 = 0.7;
/// Radius factor for the ring of hull candidate points sampled around each member.
pub const RING_RADIUS_FACTOR: f32 = 0.8;
/// Wobble amplitude (canvas units) for singleton blobs.
pub const SINGLE_WOBBLE: f32 = 1.5;
/// Wobble amplitude (canvas units) applied to hull points of multi-item blobs.
pub const HULL_WOBBLE: f32 = 2.0;
/// Angular step between samples on a singleton blob outline.
pub const SINGLE_ANGLE_STEP: f32 = std::f32::consts::PI / 64.0;
/// Angular step between ring samples around each group member.
pub const RING_ANGLE_STEP: f32 = std::f32::consts::PI / 48.0;
/// Number of flattening samples per bezier segment of a blob outline.
pub const BEZIER_SAMPLES: usize = 8;
/// Upper bound on how far bezier control points sit from their segment.
pub const CONTROL_POINT_MAX: f32 = 30.0;

// Animation
/// How much noise time advances per throttled animation tick.
pub const NOISE_TIME_STEP: f32 = 0.002;
/// Minimum milliseconds between noise-time advances (ties wobble to ~60 fps).
pub const FRAME_INTERVAL_MS: u64 = 16;
/// Duration in milliseconds of the grow animation played when groups merge.
pub const MERGE_DURATION_MS: u64 = 800;
/// Extra settle time in milliseconds before a finished merge animation is pruned.
pub const SETTLE_BUFFER_MS: u64 = 100;

// Colors
/// Fixed palette cycled by group index for blob fills.
pub const GROUP_COLORS: [Color32; 6] = [
    Color32::from_rgb(0xEE, 0x7C, 0x87), // pinkish red
    Color32::from_rgb(0xFF, 0xFA, 0x9F), // light yellow
    Color32::from_rgb(0xDB, 0xE7, 0xAB), // light green
    Color32::from_rgb(0x93, 0xD4, 0xFF), // light blue
    Color32::from_rgb(0xD3, 0xC3, 0xEB), // light purple
    Color32::from_rgb(0xFE, 0xCE, 0xDA), // light pink
];
/// Canvas background fill.
pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(0xE9, 0xE9, 0xE9);
/// Opacity applied to groups and items unrelated to the hovered group.
pub const FADED_OPACITY: f32 = 0.5;
