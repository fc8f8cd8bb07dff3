//! Ignition points - where and when a fire is seeded

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// A single ignition site: grid cell plus simulation year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnitionPoint {
    /// Flat cell index into the fire map
    pub idx: u32,
    /// Simulation year in which the cell ignites
    pub year: u32,
    /// Cell column
    pub x: u32,
    /// Cell row
    pub y: u32,
}

impl IgnitionPoint {
    pub fn new(idx: u32, year: u32, x: u32, y: u32) -> Self {
        Self { idx, year, x, y }
    }
}

/// All simultaneous ignition sites for one episode. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnitionPoints {
    points: Vec<IgnitionPoint>,
}

impl IgnitionPoints {
    /// Build from a point list, rejecting an empty one.
    pub fn new(points: Vec<IgnitionPoint>) -> Result<Self, EvalError> {
        if points.is_empty() {
            return Err(EvalError::EmptyIgnition);
        }
        Ok(Self { points })
    }

    /// Single-site ignition, the common case.
    pub fn single(point: IgnitionPoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn points(&self) -> &[IgnitionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        // Constructors reject empty lists, so this only exists for
        // completeness alongside len().
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnitionPoint> {
        self.points.iter()
    }
}

/// Load a replay file: an ordered list of per-episode ignition points.
///
/// The file name must carry the map name as its prefix; running a replay
/// recorded on one terrain against another would silently compare
/// incomparable episodes, so the mismatch is a configuration error.
pub fn load_replay_file(path: &Path, map: &str) -> Result<Vec<IgnitionPoints>, EvalError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !file_name.starts_with(map) {
        return Err(EvalError::IgnitionMapMismatch {
            file: file_name,
            map: map.to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let entries: Vec<Vec<IgnitionPoint>> =
        serde_json::from_str(&content).map_err(|source| EvalError::MalformedIgnitionFile {
            path: path.to_path_buf(),
            source,
        })?;

    entries.into_iter().map(IgnitionPoints::new).collect()
}

/// Write a replay file in the format `load_replay_file` consumes.
pub fn write_replay_file(path: &Path, entries: &[IgnitionPoints]) -> Result<(), EvalError> {
    let raw: Vec<&[IgnitionPoint]> = entries.iter().map(|e| e.points()).collect();
    let content = serde_json::to_string_pretty(&raw).map_err(std::io::Error::other)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_empty_points_rejected() {
        let err = IgnitionPoints::new(vec![]).unwrap_err();
        assert!(matches!(err, EvalError::EmptyIgnition));
    }

    #[test]
    fn test_single_point() {
        let points = IgnitionPoints::single(IgnitionPoint::new(372, 1, 11, 18));
        assert_eq!(points.len(), 1);
        assert_eq!(points.points()[0].idx, 372);
    }

    #[test]
    fn test_replay_roundtrip() {
        let path = unique_temp("Sub20x20_replay.json");
        let entries = vec![
            IgnitionPoints::single(IgnitionPoint::new(372, 1, 11, 18)),
            IgnitionPoints::single(IgnitionPoint::new(101, 1, 5, 5)),
        ];
        write_replay_file(&path, &entries).unwrap();

        let loaded = load_replay_file(&path, "Sub20x20").unwrap();
        assert_eq!(loaded, entries);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_replay_map_prefix_mismatch() {
        let path = unique_temp("Sub20x20_replay.json");
        let entries = vec![IgnitionPoints::single(IgnitionPoint::new(372, 1, 11, 18))];
        write_replay_file(&path, &entries).unwrap();

        let err = load_replay_file(&path, "Sub40x40").unwrap_err();
        assert!(matches!(err, EvalError::IgnitionMapMismatch { .. }));
        assert!(err.is_configuration());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_replay_malformed_file() {
        let path = unique_temp("Sub20x20_bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_replay_file(&path, "Sub20x20").unwrap_err();
        assert!(matches!(err, EvalError::MalformedIgnitionFile { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_point_serde() {
        let point = IgnitionPoint::new(909, 1, 28, 22);
        let json = serde_json::to_string(&point).unwrap();
        let back: IgnitionPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(point, back);
    }
}
