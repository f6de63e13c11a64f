//! Coordinate projection module
//!
//! Provides the deterministic geographic-to-planar projection used to place
//! landmarks on the abstract map canvas. The projection is a linear
//! (non-conformal) approximation of a Mercator-style projection restricted to
//! ±85° latitude so that plotted points stay inside a fixed 100×60 canvas.

use crate::landmarks::{LandmarkCatalog, LandmarkGeo};

/// Width of the abstract plotting canvas.
pub const CANVAS_WIDTH: f64 = 100.0;

/// Height of the abstract plotting canvas.
pub const CANVAS_HEIGHT: f64 = 60.0;

/// Latitude cutoff, matching the standard Mercator limit.
///
/// Latitudes beyond ±85° are clamped rather than rejected, pinning the poles
/// to the canvas edge.
pub const LAT_CUTOFF: f64 = 85.0;

/// A derived 2-D plotting coordinate on the abstract map canvas.
///
/// For inputs inside the documented domain, `x` lies in `[0, 100]` and `y`
/// in `[0, 60]`. Never persisted; recomputed from [`LandmarkGeo`] on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotCoordinate {
    pub x: f64,
    pub y: f64,
}

/// Projects geographic coordinates onto the plotting canvas.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees; values outside ±85° are clamped
/// * `lon` - Longitude in degrees, assumed pre-normalized to `[-180, 180]`
///
/// Longitude outside `[-180, 180]` is a caller contract violation: the
/// projection stays total and simply places the point off-canvas.
#[inline]
pub fn project(lat: f64, lon: f64) -> PlotCoordinate {
    let x = (lon + 180.0) / 360.0 * CANVAS_WIDTH;

    // Canvas y grows downward, so north maps toward zero.
    let clamped = lat.clamp(-LAT_CUTOFF, LAT_CUTOFF);
    let y = (LAT_CUTOFF - clamped) / (2.0 * LAT_CUTOFF) * CANVAS_HEIGHT;

    PlotCoordinate { x, y }
}

/// Projects an entire catalog, pairing each landmark with its canvas position.
///
/// Convenience for map views that render every known landmark at once.
pub fn project_catalog(catalog: &LandmarkCatalog) -> Vec<(&LandmarkGeo, PlotCoordinate)> {
    catalog
        .iter()
        .map(|landmark| (landmark, project(landmark.lat, landmark.lon)))
        .collect()
}
