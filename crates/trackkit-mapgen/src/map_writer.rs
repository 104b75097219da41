//! Map artifact export: grayscale image plus metadata descriptor.
//!
//! Encodes the occupancy grid one pixel per cell (free white, wall black)
//! and writes the sidecar key/value document a navigation-stack map loader
//! expects. Both files share a base name generated once per save, so the
//! image filename referenced by the metadata always matches the file that
//! was actually written.

use chrono::Utc;
use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};
use tracing::info;
use trackkit_core::{Cell, OccupancyGrid};

use crate::error::MapWriteError;

/// Pixel value for free cells.
pub const FREE_PIXEL: u8 = 255;
/// Pixel value for wall cells.
pub const WALL_PIXEL: u8 = 0;

/// Occupancy threshold written to the metadata descriptor.
const OCCUPIED_THRESH: f64 = 0.45;
/// Free-space threshold written to the metadata descriptor.
const FREE_THRESH: f64 = 0.196;

/// Paths of the two artifacts written by a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMap {
    pub image_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Writes an occupancy grid as a navigation map: PNG plus metadata file.
#[derive(Debug, Clone, Copy)]
pub struct MapSerializer {
    resolution: f64,
}

impl MapSerializer {
    /// `resolution` is the meters-per-cell value the grid was built with;
    /// it is recorded in the metadata so a loader can scale the image back
    /// to world coordinates.
    pub fn new(resolution: f64) -> Self {
        Self { resolution }
    }

    /// Save under a timestamp-derived base name in `dir`.
    pub fn save(&self, grid: &OccupancyGrid, dir: impl AsRef<Path>) -> Result<SavedMap, MapWriteError> {
        let base = format!("track_map_{}", Utc::now().format("%Y%m%d_%H%M%S"));
        self.save_with_base_name(grid, dir, &base)
    }

    /// Save as `<base>.png` and `<base>.yaml` in `dir`.
    pub fn save_with_base_name(
        &self,
        grid: &OccupancyGrid,
        dir: impl AsRef<Path>,
        base: &str,
    ) -> Result<SavedMap, MapWriteError> {
        if grid.is_empty() {
            return Err(MapWriteError::EmptyGrid);
        }
        let dir = dir.as_ref();

        let image_name = format!("{base}.png");
        let image_path = dir.join(&image_name);
        grid_to_image(grid).save(&image_path)?;

        let metadata_path = dir.join(format!("{base}.yaml"));
        std::fs::write(&metadata_path, self.metadata_document(&image_name))?;

        info!(
            "Saved map to {} / {}",
            image_path.display(),
            metadata_path.display()
        );
        Ok(SavedMap {
            image_path,
            metadata_path,
        })
    }

    /// The metadata descriptor contents referencing `image_name`.
    pub fn metadata_document(&self, image_name: &str) -> String {
        format!(
            "image: \"{image_name}\"\n\
             resolution: {resolution:?}\n\
             origin: [0.0, 0.0, 0.0]\n\
             negate: 0\n\
             occupied_thresh: {OCCUPIED_THRESH:?}\n\
             free_thresh: {FREE_THRESH:?}\n",
            resolution = self.resolution,
        )
    }
}

/// One grayscale pixel per grid cell, no resampling.
pub fn grid_to_image(grid: &OccupancyGrid) -> GrayImage {
    GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        match grid.get(x as usize, y as usize) {
            Some(Cell::Wall) => Luma([WALL_PIXEL]),
            _ => Luma([FREE_PIXEL]),
        }
    })
}
