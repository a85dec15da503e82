use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use spotfinder_shared::cluster;
use spotfinder_shared::geo;
use spotfinder_shared::models::Place;

use crate::config::MapConfig;
use crate::layer::MarkerLayer;
use crate::viewport;

const MAP_CONTAINER_ID: &str = "spotfinder-map-container";

/// Drag threshold in pixels — movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Cluster radius in world pixels at the current zoom.
const CLUSTER_RADIUS: f64 = 64.0;

/// Fallback container size before the first layout.
const FALLBACK_SIZE: (f64, f64) = (960.0, 600.0);

/// Apply one wheel step to the zoom level, clamped to the config range.
fn step_zoom(current: u8, delta_y: f64, min_zoom: u8, max_zoom: u8) -> u8 {
    if delta_y < 0.0 {
        (current + 1).min(max_zoom)
    } else {
        current.saturating_sub(1).max(min_zoom)
    }
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// A cluster laid out for the current viewport.
#[derive(Debug, Clone, PartialEq)]
struct PlacedCluster {
    screen_x: f64,
    screen_y: f64,
    members: Vec<usize>,
}

/// Project the layer's markers and group them for the current view.
fn place_clusters(
    layer: &MarkerLayer,
    center: (f64, f64),
    zoom: u8,
    width: f64,
    height: f64,
) -> Vec<PlacedCluster> {
    let world: Vec<(f64, f64)> = layer
        .markers
        .iter()
        .map(|m| geo::project(m.position[0], m.position[1], zoom))
        .collect();
    let (cx, cy) = geo::project(center.0, center.1, zoom);

    cluster::cluster_points(&world, CLUSTER_RADIUS)
        .into_iter()
        .map(|c| PlacedCluster {
            screen_x: c.x - cx + width / 2.0,
            screen_y: c.y - cy + height / 2.0,
            members: c.members,
        })
        .collect()
}

/// Keep only clusters that are on screen (with a margin for marker art).
fn on_screen(clusters: Vec<PlacedCluster>, width: f64, height: f64) -> Vec<PlacedCluster> {
    const MARGIN: f64 = 48.0;
    clusters
        .into_iter()
        .filter(|c| {
            c.screen_x >= -MARGIN
                && c.screen_x <= width + MARGIN
                && c.screen_y >= -MARGIN
                && c.screen_y <= height + MARGIN
        })
        .collect()
}

#[component]
pub fn MapView(
    config: MapConfig,
    layer: MarkerLayer,
    center: Signal<(f64, f64)>,
    zoom: Signal<u8>,
    open_popup: Signal<Option<String>>,
    on_report: EventHandler<Place>,
) -> Element {
    // Mutable bindings for the event handlers (Signal is Copy)
    let mut center = center;
    let mut zoom = zoom;
    let mut open_popup = open_popup;

    // Drag state
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_center = use_signal(|| (0.0_f64, 0.0_f64));

    let (width, height) = viewport::container_size(MAP_CONTAINER_ID).unwrap_or(FALLBACK_SIZE);
    let cur_center = *center.read();
    let cur_zoom = *zoom.read();

    // (url, left, top) for every tile covering the viewport
    let tiles: Vec<(String, f64, f64)> =
        viewport::visible_tiles(cur_center, cur_zoom, width, height)
            .into_iter()
            .map(|t| {
                (
                    viewport::tile_url(&config.tile_url, t.x, t.y, cur_zoom),
                    t.left,
                    t.top,
                )
            })
            .collect();

    let clusters = on_screen(
        place_clusters(&layer, cur_center, cur_zoom, width, height),
        width,
        height,
    );

    // Resolve the open popup against the current layer; a place that
    // disappeared with the last refresh simply has no popup to show.
    let popup = open_popup
        .read()
        .as_ref()
        .and_then(|id| layer.marker_by_place_id(id))
        .map(|m| {
            let (sx, sy) = viewport::latlon_to_screen(
                m.position[0],
                m.position[1],
                cur_center,
                cur_zoom,
                width,
                height,
            );
            (sx, sy, m.popup_html.clone(), m.place.clone())
        });

    let min_zoom = config.min_zoom;
    let max_zoom = config.max_zoom;
    let home_center = (config.center[0], config.center[1]);
    let home_zoom = config.zoom;

    let container_class = if *is_dragging.read() {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                let old_z = *zoom.read();
                let new_z = step_zoom(old_z, delta_y, min_zoom, max_zoom);
                if new_z == old_z {
                    return;
                }
                // Keep the point under the cursor fixed across the zoom
                if let Some(rect) = viewport::container_rect(MAP_CONTAINER_ID) {
                    let client = evt.data().client_coordinates();
                    let cursor_x = client.x - rect.left();
                    let cursor_y = client.y - rect.top();
                    let new_center = viewport::zoom_about(
                        *center.read(), old_z, new_z,
                        cursor_x, cursor_y, rect.width(), rect.height(),
                    );
                    center.set(new_center);
                }
                zoom.set(new_z);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_start_center.set(*center.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let start = *drag_start.read();
                let dx = client.x - start.0;
                let dy = client.y - start.1;
                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let new_center =
                        viewport::pan_center(*drag_start_center.read(), *zoom.read(), dx, dy);
                    center.set(new_center);
                }
            },

            onmouseup: move |_| {
                let was_click = *is_dragging.read() && !*did_drag.read();
                is_dragging.set(false);
                // A plain click on the map dismisses the open popup
                if was_click {
                    open_popup.set(None);
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                center.set(home_center);
                zoom.set(home_zoom);
            },

            // Tile imagery
            for (url, left, top) in tiles {
                img {
                    class: "map-tile",
                    src: "{url}",
                    style: "left: {left}px; top: {top}px;",
                    draggable: "false",
                    alt: "",
                }
            }

            // Markers and clusters
            for placed in clusters {
                if placed.members.len() == 1 {
                    {
                        let marker = &layer.markers[placed.members[0]];
                        let title = marker.place.title.clone();
                        let place_id = marker.place.id.clone();
                        rsx! {
                            button {
                                class: "map-marker",
                                style: "left: {placed.screen_x}px; top: {placed.screen_y}px;",
                                title: "{title}",
                                onclick: move |evt: Event<MouseData>| {
                                    evt.stop_propagation();
                                    open_popup.set(Some(place_id.clone()));
                                },
                            }
                        }
                    }
                } else {
                    {
                        let count = placed.members.len();
                        let (sx, sy) = (placed.screen_x, placed.screen_y);
                        rsx! {
                            button {
                                class: "map-cluster",
                                style: "left: {sx}px; top: {sy}px;",
                                onclick: move |evt: Event<MouseData>| {
                                    evt.stop_propagation();
                                    // Zoom one step into the cluster
                                    let cur = *zoom.read();
                                    if cur < max_zoom {
                                        let (lat, lon) = viewport::screen_to_latlon(
                                            sx, sy, *center.read(), cur, width, height,
                                        );
                                        center.set((lat, lon));
                                        zoom.set(cur + 1);
                                    }
                                },
                                "{count}"
                            }
                        }
                    }
                }
            }

            // Popup for the selected marker
            if let Some((sx, sy, html, place)) = popup {
                div {
                    class: "map-popup",
                    style: "left: {sx}px; top: {sy}px;",
                    onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                    div { dangerous_inner_html: "{html}" }
                    div { class: "map-popup-actions",
                        button {
                            class: "secondary",
                            onclick: move |_| on_report.call(place.clone()),
                            "Report a problem"
                        }
                        button {
                            class: "secondary",
                            onclick: move |_| open_popup.set(None),
                            "Close"
                        }
                    }
                }
            }

            // Tile attribution stays fixed in the corner
            div {
                class: "map-attribution",
                dangerous_inner_html: "{config.attribution}",
            }
        }
    }
}
