//! Static catalog of archived mementos.
//!
//! Maps an item's `kind` key to the metadata shown in the side panel and fed
//! to the group-label generator. Items whose kind is missing from the
//! catalog still render; they just fall back to generic labels.

/// Metadata for one memento kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MementoInfo {
    /// Catalog key, matches [`crate::types::Item::kind`]
    pub kind: &'static str,
    /// Human-friendly display name
    pub name: &'static str,
    /// Where the memento was picked up
    pub city: &'static str,
    /// Year it was collected
    pub year: &'static str,
    /// What sort of object it is
    pub item_type: &'static str,
}

const CATALOG: &[MementoInfo] = &[
    MementoInfo {
        kind: "carbone",
        name: "Carbone",
        city: "New York, NY",
        year: "2023",
        item_type: "Restaurant card",
    },
    MementoInfo {
        kind: "bigsur",
        name: "Big Sur Coastline",
        city: "Big Sur, CA",
        year: "2022",
        item_type: "Polaroid",
    },
    MementoInfo {
        kind: "calpig",
        name: "Cal Plush Pig",
        city: "Berkeley, CA",
        year: "2023",
        item_type: "Plushie",
    },
    MementoInfo {
        kind: "daytrip",
        name: "Daytrip",
        city: "Oakland, CA",
        year: "2022",
        item_type: "Restaurant card",
    },
    MementoInfo {
        kind: "dishoom",
        name: "Dishoom",
        city: "London, UK",
        year: "2024",
        item_type: "Restaurant card",
    },
    MementoInfo {
        kind: "gudetama",
        name: "Gudetama EasyCard",
        city: "Taipei, Taiwan",
        year: "2023",
        item_type: "Transportation ticket",
    },
    MementoInfo {
        kind: "fournee",
        name: "Fournee Bakery",
        city: "Berkeley, CA",
        year: "2023",
        item_type: "Paper memento",
    },
    MementoInfo {
        kind: "berkeley",
        name: "Berkeley Campus",
        city: "Berkeley, CA",
        year: "2021",
        item_type: "Postcard",
    },
    MementoInfo {
        kind: "centralpark",
        name: "Terrace in Central Park",
        city: "New York, NY",
        year: "2021",
        item_type: "Postcard",
    },
    MementoInfo {
        kind: "cat",
        name: "Ceramic Lucky Cat",
        city: "Kyoto, Japan",
        year: "2022",
        item_type: "Trinket",
    },
];

/// Looks up the metadata for a memento kind.
pub fn lookup(kind: &str) -> Option<&'static MementoInfo> {
    CATALOG.iter().find(|info| info.kind == kind)
}

/// All cataloged mementos, in seed order.
pub fn all() -> &'static [MementoInfo] {
    CATALOG
}
