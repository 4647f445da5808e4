//! Fixture catalog: the static library of film-set archetypes a picker offers.
//!
//! The catalog is defined once, never mutated, and shared by reference. The
//! controller only ever receives `&'static FixtureArchetype` values; decoding
//! picker or drag payloads into archetypes happens at the host boundary via
//! [`get`].

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::Serialize;

/// Category name that matches every archetype in [`filter`].
pub const ALL_CATEGORIES: &str = "All";

/// Grouping tag for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    People,
    Equipment,
    Lighting,
    Set,
}

impl Category {
    /// Display name, also the value accepted by [`filter`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Equipment => "Equipment",
            Self::Lighting => "Lighting",
            Self::Set => "Set",
        }
    }
}

/// An immutable fixture template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureArchetype {
    /// Unique key; also the kind a placed fixture draws with.
    pub id: &'static str,
    /// Display label.
    pub name: &'static str,
    pub category: Category,
    pub default_width: f64,
    pub default_height: f64,
    /// Fill color token (`#rrggbb`).
    pub default_color: &'static str,
    pub description: &'static str,
}

static CATALOG: [FixtureArchetype; 12] = [
    // People
    FixtureArchetype {
        id: "actor",
        name: "Actor",
        category: Category::People,
        default_width: 50.0,
        default_height: 80.0,
        default_color: "#000000",
        description: "Main performer in the scene",
    },
    FixtureArchetype {
        id: "extra",
        name: "Background Actor",
        category: Category::People,
        default_width: 45.0,
        default_height: 75.0,
        default_color: "#666666",
        description: "Background performer",
    },
    // Equipment
    FixtureArchetype {
        id: "camera",
        name: "Camera",
        category: Category::Equipment,
        default_width: 60.0,
        default_height: 40.0,
        default_color: "#000000",
        description: "Primary filming camera",
    },
    FixtureArchetype {
        id: "camera-b",
        name: "B-Camera",
        category: Category::Equipment,
        default_width: 55.0,
        default_height: 35.0,
        default_color: "#666666",
        description: "Secondary camera angle",
    },
    FixtureArchetype {
        id: "microphone",
        name: "Microphone",
        category: Category::Equipment,
        default_width: 25.0,
        default_height: 60.0,
        default_color: "#000000",
        description: "Audio recording device",
    },
    // Lighting
    FixtureArchetype {
        id: "key-light",
        name: "Key Light",
        category: Category::Lighting,
        default_width: 30.0,
        default_height: 40.0,
        default_color: "#2196f3",
        description: "Primary lighting source",
    },
    FixtureArchetype {
        id: "fill-light",
        name: "Fill Light",
        category: Category::Lighting,
        default_width: 25.0,
        default_height: 35.0,
        default_color: "#2196f3",
        description: "Secondary lighting to reduce shadows",
    },
    FixtureArchetype {
        id: "fresnel",
        name: "Fresnel Light",
        category: Category::Lighting,
        default_width: 40.0,
        default_height: 50.0,
        default_color: "#2196f3",
        description: "Focused spotlight with adjustable beam",
    },
    // Set
    FixtureArchetype {
        id: "room",
        name: "Room/Building",
        category: Category::Set,
        default_width: 100.0,
        default_height: 80.0,
        default_color: "#000000",
        description: "Interior or exterior structure",
    },
    FixtureArchetype {
        id: "chair",
        name: "Chair",
        category: Category::Set,
        default_width: 35.0,
        default_height: 40.0,
        default_color: "#8b4513",
        description: "Seating furniture",
    },
    FixtureArchetype {
        id: "table",
        name: "Table",
        category: Category::Set,
        default_width: 60.0,
        default_height: 40.0,
        default_color: "#d2691e",
        description: "Table furniture",
    },
    FixtureArchetype {
        id: "vehicle",
        name: "Vehicle",
        category: Category::Set,
        default_width: 80.0,
        default_height: 50.0,
        default_color: "#26de81",
        description: "Car, truck, or other vehicle",
    },
];

/// Every archetype, in fixed definition order.
#[must_use]
pub fn list_all() -> &'static [FixtureArchetype] {
    &CATALOG
}

/// Category chips in display order, starting with [`ALL_CATEGORIES`].
#[must_use]
pub fn categories() -> [&'static str; 5] {
    [
        ALL_CATEGORIES,
        Category::People.as_str(),
        Category::Equipment.as_str(),
        Category::Lighting.as_str(),
        Category::Set.as_str(),
    ]
}

/// Look an archetype up by id.
#[must_use]
pub fn get(id: &str) -> Option<&'static FixtureArchetype> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Archetypes in `category` whose name or description contains `search_text`,
/// ignoring case. Category names, `"All"` included, also ignore case. An
/// empty search matches everything in the category.
#[must_use]
pub fn filter(category: &str, search_text: &str) -> Vec<&'static FixtureArchetype> {
    let needle = search_text.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|a| category.eq_ignore_ascii_case(ALL_CATEGORIES) || a.category.as_str().eq_ignore_ascii_case(category))
        .filter(|a| {
            needle.is_empty()
                || a.name.to_lowercase().contains(&needle)
                || a.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Picker search state. An empty result is a distinct outcome from not having
/// searched at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    NotSearched,
    Searched(Vec<&'static FixtureArchetype>),
}

impl SearchState {
    /// Run [`filter`] and capture the outcome.
    #[must_use]
    pub fn run(category: &str, search_text: &str) -> Self {
        Self::Searched(filter(category, search_text))
    }

    /// True only when a search ran and matched nothing.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::Searched(found) if found.is_empty())
    }

    /// Archetypes to show: the full catalog before any search, the matches after.
    #[must_use]
    pub fn visible(&self) -> Vec<&'static FixtureArchetype> {
        match self {
            Self::NotSearched => CATALOG.iter().collect(),
            Self::Searched(found) => found.clone(),
        }
    }
}
