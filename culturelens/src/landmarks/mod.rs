//! Landmark reference data.
//!
//! Immutable geographic records for the landmarks the demo map knows about.
//! The catalog is plain configuration data handed to the app layer; the core
//! components never reach for it globally.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a [`LandmarkCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two records share the same id.
    #[error("duplicate landmark id: {0}")]
    DuplicateId(String),

    /// Latitude outside [-90, 90].
    #[error("invalid latitude {lat} for landmark {id}")]
    InvalidLatitude { id: String, lat: f64 },

    /// Longitude outside [-180, 180].
    #[error("invalid longitude {lon} for landmark {id}")]
    InvalidLongitude { id: String, lon: f64 },
}

/// Immutable geographic record for a single landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkGeo {
    pub id: String,
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl LandmarkGeo {
    fn new(id: &str, name: &str, country: &str, lat: f64, lon: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            lat,
            lon,
        }
    }
}

/// Ordered, validated set of landmark records.
///
/// Construction enforces id uniqueness and coordinate ranges; after that the
/// catalog is read-only.
#[derive(Debug, Clone)]
pub struct LandmarkCatalog {
    entries: Vec<LandmarkGeo>,
}

impl LandmarkCatalog {
    /// Builds a catalog from records, validating each entry.
    pub fn new(entries: Vec<LandmarkGeo>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
            if !(-90.0..=90.0).contains(&entry.lat) {
                return Err(CatalogError::InvalidLatitude {
                    id: entry.id.clone(),
                    lat: entry.lat,
                });
            }
            if !(-180.0..=180.0).contains(&entry.lon) {
                return Err(CatalogError::InvalidLongitude {
                    id: entry.id.clone(),
                    lon: entry.lon,
                });
            }
        }
        Ok(Self { entries })
    }

    /// The built-in demo catalog of 13 world heritage sites.
    pub fn world_heritage() -> Self {
        let entries = vec![
            LandmarkGeo::new("taj_mahal", "Taj Mahal", "India", 27.1751, 78.0421),
            LandmarkGeo::new("eiffel_tower", "Eiffel Tower", "France", 48.8584, 2.2945),
            LandmarkGeo::new("statue_liberty", "Statue of Liberty", "USA", 40.6892, -74.0445),
            LandmarkGeo::new("colosseum", "Colosseum", "Italy", 41.8902, 12.4922),
            LandmarkGeo::new("great_wall", "Great Wall", "China", 40.4319, 116.5704),
            LandmarkGeo::new("pyramids_giza", "Pyramids of Giza", "Egypt", 29.9792, 31.1342),
            LandmarkGeo::new("machu_picchu", "Machu Picchu", "Peru", -13.1631, -72.5450),
            LandmarkGeo::new(
                "christ_redeemer",
                "Christ the Redeemer",
                "Brazil",
                -22.9519,
                -43.2105,
            ),
            LandmarkGeo::new("big_ben", "Big Ben", "UK", 51.5007, -0.1246),
            LandmarkGeo::new("stonehenge", "Stonehenge", "UK", 51.1789, -1.8262),
            LandmarkGeo::new("acropolis", "Acropolis", "Greece", 37.9715, 23.7267),
            LandmarkGeo::new("petra", "Petra", "Jordan", 30.3285, 35.4444),
            LandmarkGeo::new("angkor_wat", "Angkor Wat", "Cambodia", 13.4125, 103.8670),
        ];

        Self::new(entries).expect("built-in catalog is valid")
    }

    /// Looks up a landmark by id.
    pub fn get(&self, id: &str) -> Option<&LandmarkGeo> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Iterates over records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &LandmarkGeo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
