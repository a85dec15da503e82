//! Web-Mercator projection for slippy-map tiles.
//!
//! World space at zoom `z` is a square of `256 * 2^z` pixels; tile (x, y)
//! covers the 256px square starting at `(x * 256, y * 256)`. Latitude is
//! clamped to the Mercator singularity limit.

use std::f64::consts::PI;

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Highest latitude representable in Web Mercator.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Side length of the world in pixels at the given zoom level.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * (1u64 << zoom) as f64
}

/// Clamp a latitude into the projectable range.
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}

/// Project (lat, lon) degrees to world pixel coordinates at `zoom`.
pub fn project(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let world = world_size(zoom);
    let lat_rad = clamp_latitude(lat).to_radians();
    let x = (lon + 180.0) / 360.0 * world;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * world;
    (x, y)
}

/// Inverse of [`project`]: world pixel coordinates back to (lat, lon).
pub fn unproject(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let world = world_size(zoom);
    let lon = x / world * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / world)).sinh().atan().to_degrees();
    (lat, lon)
}

/// Tile index containing the given world pixel coordinate.
pub fn tile_index(world_px: f64, zoom: u8) -> i64 {
    let max = (1i64 << zoom) - 1;
    ((world_px / TILE_SIZE).floor() as i64).clamp(0, max)
}
