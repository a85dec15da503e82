//! Screen space <-> geographic space for the map viewport.
//!
//! Pure conversions live here so they are unit testable without `web_sys`;
//! the thin DOM wrapper at the bottom reads the live container rect.

use spotfinder_shared::geo;

/// Convert a screen offset inside the container to (lat, lon), given the
/// current view center and zoom.
pub fn screen_to_latlon(
    screen_x: f64,
    screen_y: f64,
    center: (f64, f64),
    zoom: u8,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let (cx, cy) = geo::project(center.0, center.1, zoom);
    let world_x = cx + (screen_x - width / 2.0);
    let world_y = cy + (screen_y - height / 2.0);
    geo::unproject(world_x, world_y, zoom)
}

/// Convert (lat, lon) to a screen offset inside the container.
pub fn latlon_to_screen(
    lat: f64,
    lon: f64,
    center: (f64, f64),
    zoom: u8,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let (cx, cy) = geo::project(center.0, center.1, zoom);
    let (px, py) = geo::project(lat, lon, zoom);
    (px - cx + width / 2.0, py - cy + height / 2.0)
}

/// New view center after dragging the map content by (dx, dy) screen pixels.
/// Dragging content right moves the center west.
pub fn pan_center(center: (f64, f64), zoom: u8, dx: f64, dy: f64) -> (f64, f64) {
    let (cx, cy) = geo::project(center.0, center.1, zoom);
    geo::unproject(cx - dx, cy - dy, zoom)
}

/// New view center such that the geographic point under the cursor stays
/// under the cursor across a zoom change.
pub fn zoom_about(
    center: (f64, f64),
    old_zoom: u8,
    new_zoom: u8,
    cursor_x: f64,
    cursor_y: f64,
    width: f64,
    height: f64,
) -> (f64, f64) {
    let (lat, lon) = screen_to_latlon(cursor_x, cursor_y, center, old_zoom, width, height);
    let (px, py) = geo::project(lat, lon, new_zoom);
    let world_x = px - (cursor_x - width / 2.0);
    let world_y = py - (cursor_y - height / 2.0);
    geo::unproject(world_x, world_y, new_zoom)
}

/// One tile to draw, positioned relative to the container's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    pub x: i64,
    pub y: i64,
    pub left: f64,
    pub top: f64,
}

/// Enumerate the tiles covering the viewport, top-left to bottom-right.
pub fn visible_tiles(center: (f64, f64), zoom: u8, width: f64, height: f64) -> Vec<TilePlacement> {
    let (cx, cy) = geo::project(center.0, center.1, zoom);
    let world_left = cx - width / 2.0;
    let world_top = cy - height / 2.0;

    let x0 = geo::tile_index(world_left, zoom);
    let x1 = geo::tile_index(world_left + width, zoom);
    let y0 = geo::tile_index(world_top, zoom);
    let y1 = geo::tile_index(world_top + height, zoom);

    let mut tiles = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
    for y in y0..=y1 {
        for x in x0..=x1 {
            tiles.push(TilePlacement {
                x,
                y,
                left: x as f64 * geo::TILE_SIZE - world_left,
                top: y as f64 * geo::TILE_SIZE - world_top,
            });
        }
    }
    tiles
}

/// Expand a tile URL template, rotating `{s}` across the a/b/c subdomains
/// so neighbouring tiles spread over the tile servers.
pub fn tile_url(template: &str, x: i64, y: i64, zoom: u8) -> String {
    const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
    let s = SUBDOMAINS[((x + y).rem_euclid(3)) as usize];
    template
        .replace("{s}", s)
        .replace("{z}", &zoom.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

/// Bounding rect of the map container, if it is mounted.
pub fn container_rect(container_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    Some(element.get_bounding_client_rect())
}

/// Live size of the map container, if it is mounted.
pub fn container_size(container_id: &str) -> Option<(f64, f64)> {
    container_rect(container_id).map(|rect| (rect.width(), rect.height()))
}
