//! # Shoebox
//!
//! A visual archive page for a shoebox of travel mementos. Each memento is a
//! draggable circular token on a canvas; tokens that sit near each other
//! cluster automatically into groups rendered as soft organic blobs:
//! - **Singletons** get a gently wobbling circle of their own
//! - **Clusters** share one smoothed silhouette around all their members
//! - **Merges** play a short grow animation when a drag joins groups
//!
//! ## Features
//! - Drag tokens to rearrange; grouping follows live
//! - Hover a group to see its generated label and member details
//! - Labels come from an optional external naming service, degrading to a
//!   local heuristic when none is configured
//! - The layout persists between restarts

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod catalog;
mod clustering;
mod constants;
mod geometry;
mod merge;
mod naming;
mod store;
mod types;
mod ui;

// Re-export public types and functions
pub use catalog::{lookup, MementoInfo};
pub use clustering::cluster;
pub use naming::{GroupNamer, HeuristicNamer, HttpNamer, FALLBACK_LABEL};
pub use types::*;
use ui::ShoeboxApp;

/// Runs the archive application with default settings.
///
/// This function initializes the egui application window and starts the main
/// event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an
/// `eframe::Error` if initialization fails.
///
/// # Example
///
/// ```no_run
/// use shoebox::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Shoebox",
        options,
        Box::new(|cc| Ok(Box::new(ShoeboxApp::new(cc)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_layout_matches_catalog() {
        for item in crate::store::seed_items() {
            assert!(lookup(&item.kind).is_some());
        }
    }

    #[test]
    fn group_ids_are_stable_across_reclustering() {
        let items = crate::store::seed_items();
        let a = cluster(&items, 80.0);
        let b = cluster(&items, 80.0);
        assert_eq!(a, b);
    }
}
