//! Serialization for track design files.
//!
//! A design file captures everything needed to regenerate a map: the
//! waypoint sequence and the grid configuration, stored as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::GridConfig;
use crate::error::DesignFileError;
use crate::track::WaypointSequence;

/// Design file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete track design file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDesign {
    pub version: String,
    pub metadata: DesignMetadata,
    pub waypoints: WaypointSequence,
    pub grid: GridConfig,
}

/// Design metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl TrackDesign {
    /// Create an empty design with the given name and default configuration.
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
                description: String::new(),
            },
            waypoints: WaypointSequence::new(),
            grid: GridConfig::default(),
        }
    }

    /// Save the design as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), DesignFileError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a design from a JSON file, checking the format version and the
    /// waypoint-sequence invariant.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DesignFileError> {
        let contents = std::fs::read_to_string(path)?;
        let design: TrackDesign = serde_json::from_str(&contents)?;
        if design.version != FILE_FORMAT_VERSION {
            return Err(DesignFileError::UnsupportedVersion(design.version));
        }
        if !design.waypoints.is_well_formed() {
            return Err(DesignFileError::Malformed(
                "closed waypoint sequence lacks its closing duplicate".to_string(),
            ));
        }
        Ok(design)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn sample_design() -> TrackDesign {
        let mut design = TrackDesign::new("oval");
        for p in [
            Point::new(10.0, 10.0),
            Point::new(60.0, 10.0),
            Point::new(60.0, 40.0),
            Point::new(10.0, 40.0),
        ] {
            design.waypoints.push_snapped(p);
        }
        design.waypoints.push_snapped(Point::new(10.0, 10.0));
        design
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oval.json");

        let design = sample_design();
        design.save_to_file(&path).unwrap();
        let loaded = TrackDesign::load_from_file(&path).unwrap();

        assert_eq!(loaded.version, design.version);
        assert_eq!(loaded.waypoints, design.waypoints);
        assert_eq!(loaded.grid, design.grid);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TrackDesign::load_from_file("/nonexistent/design.json").unwrap_err();
        assert!(matches!(err, DesignFileError::Io(_)));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");

        let mut design = sample_design();
        design.version = "99.0".to_string();
        design.save_to_file(&path).unwrap();

        let err = TrackDesign::load_from_file(&path).unwrap_err();
        assert!(matches!(err, DesignFileError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_load_rejects_malformed_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");

        let mut design = sample_design();
        // Strip the closing duplicate but keep the closed flag.
        let pts = design.waypoints.points().to_vec();
        design.waypoints =
            WaypointSequence::from_parts(pts[..pts.len() - 1].to_vec(), true);
        design.save_to_file(&path).unwrap();

        let err = TrackDesign::load_from_file(&path).unwrap_err();
        assert!(matches!(err, DesignFileError::Malformed(_)));
    }
}
