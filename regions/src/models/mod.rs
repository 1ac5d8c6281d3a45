//! Domain models for the regions conversion pipeline.
//!
//! - [`Settlement`] - one settlement row, nine opaque string fields
//! - [`Region`] - a named region with its settlements in input order
//! - [`RegionsDocument`] - all regions, in order of first appearance
//!
//! Every settlement field is kept as the raw string read from the input.
//! Values such as `"0101"` or `"51.77"` are never parsed as numbers.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Settlement
// =============================================================================

/// A settlement record as listed under a region header.
///
/// Field order matches the column order of the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settlement {
    /// Settlement identifier (e.g. `"0101"`).
    pub identifier: String,
    /// Settlement name.
    pub name: String,
    /// Containing district (powiat).
    #[serde(rename = "powiat")]
    pub district: String,
    /// Area in hectares.
    pub area_ha: String,
    /// Area in square kilometers.
    pub area_km: String,
    /// Total population.
    pub total_population: String,
    /// Population per square kilometer.
    pub population_per_km: String,
    /// Rank by area.
    pub ranking_in_area_in_ha: String,
    /// Rank by population.
    pub ranking_in_population: String,
}

impl Settlement {
    /// Number of fields a settlement row must have.
    pub const FIELD_COUNT: usize = 9;

    /// JSON keys, in input column order.
    pub const FIELD_NAMES: [&'static str; Self::FIELD_COUNT] = [
        "identifier",
        "name",
        "powiat",
        "area_ha",
        "area_km",
        "total_population",
        "population_per_km",
        "ranking_in_area_in_ha",
        "ranking_in_population",
    ];

    /// Bind split fields positionally. Returns `None` unless there are exactly nine.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        let [identifier, name, district, area_ha, area_km, total_population, population_per_km, ranking_in_area_in_ha, ranking_in_population] =
            fields
        else {
            return None;
        };

        Some(Self {
            identifier: identifier.to_string(),
            name: name.to_string(),
            district: district.to_string(),
            area_ha: area_ha.to_string(),
            area_km: area_km.to_string(),
            total_population: total_population.to_string(),
            population_per_km: population_per_km.to_string(),
            ranking_in_area_in_ha: ranking_in_area_in_ha.to_string(),
            ranking_in_population: ranking_in_population.to_string(),
        })
    }
}

// =============================================================================
// Region
// =============================================================================

/// A region and the settlements listed under its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub settlements: Vec<Settlement>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settlements: Vec::new(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// Mapping of region name to settlements, in first-appearance order.
///
/// Serializes as a JSON object whose keys keep that order:
///
/// ```text
/// { "Mazowieckie": [ { "identifier": "0101", ... } ], "Śląskie": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionsDocument {
    regions: Vec<Region>,
}

impl RegionsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with an empty settlement list and return its index.
    ///
    /// If the region already exists its list is replaced by an empty one,
    /// its position is kept, and the second tuple element is `true`.
    pub fn register(&mut self, name: &str) -> (usize, bool) {
        match self.position(name) {
            Some(index) => {
                self.regions[index].settlements.clear();
                (index, true)
            }
            None => {
                self.regions.push(Region::new(name));
                (self.regions.len() - 1, false)
            }
        }
    }

    /// Append a settlement to the region at `index`.
    ///
    /// `index` must come from [`RegionsDocument::register`].
    pub(crate) fn push(&mut self, index: usize, settlement: Settlement) {
        self.regions[index].settlements.push(settlement);
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.name == name)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Total number of settlements across all regions.
    pub fn settlement_count(&self) -> usize {
        self.regions.iter().map(|r| r.settlements.len()).sum()
    }
}

impl Serialize for RegionsDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.regions.len()))?;
        for region in &self.regions {
            map.serialize_entry(&region.name, &region.settlements)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionsDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = RegionsDocument;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping region names to arrays of settlements")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut document = RegionsDocument::new();
        while let Some((name, settlements)) = access.next_entry::<String, Vec<Settlement>>()? {
            let (index, _) = document.register(&name);
            document.regions[index].settlements = settlements;
        }
        Ok(document)
    }
}
