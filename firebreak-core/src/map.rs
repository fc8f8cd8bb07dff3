//! Map catalog - per-map ignition and step-timing defaults
//!
//! The catalog is an explicit immutable value passed into the harness and
//! ignition source, so concurrent evaluation runs (e.g. in tests) never
//! share mutable lookup state.

use rustc_hash::FxHashMap;

use crate::error::EvalError;
use crate::ignition::{IgnitionPoint, IgnitionPoints};

/// Per-map defaults: the registered fixed ignition site (if any) and the
/// step-timing parameters handed to the simulator.
#[derive(Clone, Debug)]
pub struct MapProfile {
    /// Fixed ignition used when the plan is `Fixed`; not every map has one
    pub fixed_ignition: Option<IgnitionPoints>,
    /// Simulator steps to run before the first action
    pub steps_before_sim: u32,
    /// Simulator steps advanced per harness action
    pub steps_per_action: u32,
}

/// Immutable name-to-profile table for the known fire maps.
#[derive(Clone, Debug, Default)]
pub struct MapCatalog {
    maps: FxHashMap<String, MapProfile>,
}

impl MapCatalog {
    /// Empty catalog; profiles are added with [`MapCatalog::with_map`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog of shipped fire maps.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "Sub20x20",
            MapProfile {
                fixed_ignition: Some(IgnitionPoints::single(IgnitionPoint::new(372, 1, 11, 18))),
                steps_before_sim: 20,
                steps_per_action: 8,
            },
        );
        catalog.insert(
            "Sub40x40",
            MapProfile {
                fixed_ignition: Some(IgnitionPoints::single(IgnitionPoint::new(909, 1, 28, 22))),
                steps_before_sim: 25,
                steps_per_action: 5,
            },
        );
        for map in ["mit_m", "mit_i", "mit_t", "dogrib_c1", "dogrib_c2", "dogrib_c3", "dogrib"] {
            catalog.insert(
                map,
                MapProfile {
                    fixed_ignition: None,
                    steps_before_sim: 25,
                    steps_per_action: 5,
                },
            );
        }
        catalog
    }

    /// Builder-style insertion for custom catalogs.
    pub fn with_map(mut self, name: &str, profile: MapProfile) -> Self {
        self.insert(name, profile);
        self
    }

    fn insert(&mut self, name: &str, profile: MapProfile) {
        self.maps.insert(name.to_string(), profile);
    }

    pub fn profile(&self, name: &str) -> Option<&MapProfile> {
        self.maps.get(name)
    }

    /// Fixed ignition points for a map, failing when none are registered.
    pub fn fixed_ignition(&self, name: &str) -> Result<&IgnitionPoints, EvalError> {
        self.maps
            .get(name)
            .and_then(|p| p.fixed_ignition.as_ref())
            .ok_or_else(|| EvalError::NoFixedIgnition(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_fixed_points() {
        let catalog = MapCatalog::standard();
        let points = catalog.fixed_ignition("Sub20x20").unwrap();
        assert_eq!(points.points()[0], IgnitionPoint::new(372, 1, 11, 18));
        let points = catalog.fixed_ignition("Sub40x40").unwrap();
        assert_eq!(points.points()[0], IgnitionPoint::new(909, 1, 28, 22));
    }

    #[test]
    fn test_standard_catalog_step_timing() {
        let catalog = MapCatalog::standard();
        let profile = catalog.profile("Sub20x20").unwrap();
        assert_eq!(profile.steps_before_sim, 20);
        assert_eq!(profile.steps_per_action, 8);
        let profile = catalog.profile("dogrib").unwrap();
        assert_eq!(profile.steps_before_sim, 25);
        assert_eq!(profile.steps_per_action, 5);
    }

    #[test]
    fn test_map_without_fixed_ignition() {
        let catalog = MapCatalog::standard();
        let err = catalog.fixed_ignition("mit_m").unwrap_err();
        assert!(matches!(err, EvalError::NoFixedIgnition(_)));
    }

    #[test]
    fn test_unknown_map() {
        let catalog = MapCatalog::standard();
        assert!(!catalog.contains("Sub80x80"));
        assert!(catalog.fixed_ignition("Sub80x80").is_err());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = MapCatalog::new().with_map(
            "toy",
            MapProfile {
                fixed_ignition: Some(IgnitionPoints::single(IgnitionPoint::new(0, 1, 0, 0))),
                steps_before_sim: 1,
                steps_per_action: 1,
            },
        );
        assert!(catalog.contains("toy"));
        assert!(catalog.fixed_ignition("toy").is_ok());
    }
}
