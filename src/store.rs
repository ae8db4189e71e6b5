//! Layout persistence.
//!
//! Item positions survive restarts through the [`PositionStore`] trait,
//! which any eframe key-value storage satisfies; tests use the in-memory
//! [`MemoryStore`]. Payloads are JSON so a hand-edited or corrupt value
//! degrades to the seed layout instead of aborting startup.

use crate::types::Item;
use rand::Rng;

/// Storage key under which the item layout is persisted.
pub const STORAGE_KEY: &str = "shoebox_items";

/// Typed view of the persisted item layout.
pub trait PositionStore {
    /// Returns the persisted layout, if a usable one exists.
    fn load(&self) -> Option<Vec<Item>>;
    /// Persists the layout.
    fn save(&mut self, items: &[Item]);
}

impl<S: eframe::Storage + ?Sized> PositionStore for S {
    fn load(&self) -> Option<Vec<Item>> {
        self.get_string(STORAGE_KEY)
            .and_then(|payload| deserialize_items(&payload))
    }

    fn save(&mut self, items: &[Item]) {
        match serialize_items(items) {
            Ok(payload) => self.set_string(STORAGE_KEY, payload),
            Err(err) => log::error!("failed to serialize layout: {err}"),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: Option<String>,
}

impl eframe::Storage for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        (key == STORAGE_KEY).then(|| self.payload.clone()).flatten()
    }

    fn set_string(&mut self, key: &str, value: String) {
        if key == STORAGE_KEY {
            self.payload = Some(value);
        }
    }

    fn flush(&mut self) {}
}

/// Serializes items for persistence.
pub fn serialize_items(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Restores items from a persisted payload. Malformed payloads and items
/// with non-finite coordinates are rejected wholesale so the caller falls
/// back to the seed layout. An empty list is a valid snapshot: deleting
/// every token is a state worth keeping across restarts.
pub fn deserialize_items(payload: &str) -> Option<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(payload)
        .map_err(|err| log::warn!("discarding persisted layout: {err}"))
        .ok()?;
    if !items.iter().all(Item::is_well_formed) {
        log::warn!("discarding persisted layout: malformed items");
        return None;
    }
    Some(items)
}

/// The default arrangement shown on first launch.
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new(1, "carbone", 100.0, 150.0),
        Item::new(2, "bigsur", 500.0, 200.0),
        Item::new(3, "calpig", 350.0, 300.0),
        Item::new(4, "daytrip", 420.0, 280.0),
        Item::new(5, "dishoom", 390.0, 350.0),
        Item::new(6, "gudetama", 150.0, 180.0),
        Item::new(7, "fournee", 600.0, 400.0),
        Item::new(8, "berkeley", 550.0, 230.0),
        Item::new(9, "centralpark", 200.0, 350.0),
        Item::new(10, "cat", 150.0, 400.0),
    ]
}

/// Rethrows every item to a uniformly random spot inside `bounds`,
/// keeping each token's footprint fully on the canvas.
pub fn scatter_items(items: &mut [Item], bounds: egui::Rect, rng: &mut impl Rng) {
    for item in items.iter_mut() {
        let half = item.size / 2.0;
        let max_x = (bounds.width() - half).max(half);
        let max_y = (bounds.height() - half).max(half);
        item.x = if max_x > half { rng.gen_range(half..max_x) } else { half };
        item.y = if max_y > half { rng.gen_range(half..max_y) } else { half };
    }
}
