//! Marker layer ownership and the refresh state machine.
//!
//! Exactly one layer is current at a time; a refresh builds a brand-new
//! layer from the response and replaces the old one in a single assignment,
//! so there is never an intermediate state with two layers attached.
//! Responses racing each other are resolved by generation token:
//! last-request-wins, stale arrivals are discarded.

use spotfinder_shared::models::Place;
use spotfinder_shared::popup;

/// One renderable marker. Popup markup is captured at layer-build time from
/// the place data of that response; opening the popup never re-fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// `[latitude, longitude]`.
    pub position: [f64; 2],
    pub popup_html: String,
    pub place: Place,
}

/// The set of markers built from one fetch response.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    /// Token of the request that produced this layer.
    pub generation: u64,
    pub markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn empty() -> Self {
        MarkerLayer {
            generation: 0,
            markers: Vec::new(),
        }
    }

    /// Build a layer from a response, skipping places that cannot be
    /// rendered (no position) instead of failing the batch.
    pub fn build(generation: u64, places: Vec<Place>) -> Self {
        let markers = places
            .into_iter()
            .filter_map(|place| {
                let position = place.position?;
                Some(Marker {
                    position,
                    popup_html: popup::format_popup(&place),
                    place,
                })
            })
            .collect();
        MarkerLayer {
            generation,
            markers,
        }
    }

    /// Find a marker by the id of its place.
    pub fn marker_by_place_id(&self, place_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.place.id == place_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// Current layer attached, nothing in flight.
    Idle,
    /// A fetch is in flight; the old layer stays attached and interactive.
    Refreshing { generation: u64 },
}

/// Owns the current marker layer and arbitrates concurrent refreshes.
#[derive(Debug)]
pub struct LayerManager {
    last_issued: u64,
    state: RefreshState,
    layer: MarkerLayer,
}

impl LayerManager {
    pub fn new() -> Self {
        LayerManager {
            last_issued: 0,
            state: RefreshState::Idle,
            layer: MarkerLayer::empty(),
        }
    }

    /// Start a refresh, superseding any request still in flight, and return
    /// the generation token the caller must present on completion.
    pub fn begin_refresh(&mut self) -> u64 {
        self.last_issued += 1;
        self.state = RefreshState::Refreshing {
            generation: self.last_issued,
        };
        self.last_issued
    }

    /// Apply a completed fetch. Returns `false` (and changes nothing) when
    /// the token has been superseded by a newer request.
    pub fn complete_refresh(&mut self, token: u64, places: Vec<Place>) -> bool {
        if token != self.last_issued {
            return false;
        }
        self.layer = MarkerLayer::build(token, places);
        self.state = RefreshState::Idle;
        true
    }

    /// A failed fetch keeps the last-good layer. Only the newest request
    /// returns the manager to Idle; a superseded failure is meaningless.
    pub fn fail_refresh(&mut self, token: u64) {
        if token == self.last_issued {
            self.state = RefreshState::Idle;
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn layer(&self) -> &MarkerLayer {
        &self.layer
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, lat: f64, lon: f64) -> Place {
        Place {
            id: id.to_string(),
            position: Some([lat, lon]),
            title: format!("place {}", id),
            subtitle: "spot".to_string(),
            data: Default::default(),
        }
    }

    fn unplaceable(id: &str) -> Place {
        Place {
            id: id.to_string(),
            position: None,
            title: String::new(),
            subtitle: String::new(),
            data: Default::default(),
        }
    }

    #[test]
    fn test_begin_refresh_issues_increasing_tokens() {
        let mut mgr = LayerManager::new();
        let a = mgr.begin_refresh();
        let b = mgr.begin_refresh();
        assert!(b > a);
        assert_eq!(mgr.state(), RefreshState::Refreshing { generation: b });
    }

    #[test]
    fn test_complete_refresh_attaches_new_layer() {
        let mut mgr = LayerManager::new();
        let token = mgr.begin_refresh();
        assert!(mgr.complete_refresh(token, vec![place("a", 51.1, 17.05)]));
        assert_eq!(mgr.state(), RefreshState::Idle);
        assert_eq!(mgr.layer().generation, token);
        assert_eq!(mgr.layer().markers.len(), 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        // Change A, then change B before A resolves. B's (faster) response
        // lands first; A's late arrival must not clobber it.
        let mut mgr = LayerManager::new();
        let a = mgr.begin_refresh();
        let b = mgr.begin_refresh();

        assert!(mgr.complete_refresh(b, vec![place("from-b", 1.0, 2.0)]));
        assert!(!mgr.complete_refresh(a, vec![place("from-a", 3.0, 4.0)]));

        assert_eq!(mgr.layer().generation, b);
        assert_eq!(mgr.layer().markers[0].place.id, "from-b");
        assert_eq!(mgr.state(), RefreshState::Idle);
    }

    #[test]
    fn test_exactly_one_layer_after_refresh() {
        let mut mgr = LayerManager::new();
        for round in 0..3 {
            let token = mgr.begin_refresh();
            mgr.complete_refresh(token, vec![place(&format!("p{}", round), 0.0, 0.0)]);
            // The previous layer is gone with the assignment; whatever is
            // attached carries the winning generation.
            assert_eq!(mgr.layer().generation, token);
            assert_eq!(mgr.layer().markers.len(), 1);
        }
    }

    #[test]
    fn test_failure_keeps_last_good_layer() {
        let mut mgr = LayerManager::new();
        let first = mgr.begin_refresh();
        mgr.complete_refresh(first, vec![place("keep", 5.0, 6.0)]);

        let second = mgr.begin_refresh();
        mgr.fail_refresh(second);

        assert_eq!(mgr.state(), RefreshState::Idle);
        assert_eq!(mgr.layer().markers[0].place.id, "keep");
    }

    #[test]
    fn test_superseded_failure_does_not_leave_refreshing() {
        let mut mgr = LayerManager::new();
        let a = mgr.begin_refresh();
        let b = mgr.begin_refresh();
        // A's failure arrives while B is still in flight
        mgr.fail_refresh(a);
        assert_eq!(mgr.state(), RefreshState::Refreshing { generation: b });
    }

    #[test]
    fn test_build_skips_unrenderable_places() {
        let layer = MarkerLayer::build(
            7,
            vec![place("ok", 1.0, 2.0), unplaceable("bad"), place("ok2", 3.0, 4.0)],
        );
        assert_eq!(layer.markers.len(), 2);
        assert!(layer.marker_by_place_id("bad").is_none());
        assert!(layer.marker_by_place_id("ok2").is_some());
    }

    #[test]
    fn test_popup_markup_captured_at_build_time() {
        let mut p = place("a", 1.0, 2.0);
        p.data
            .insert("types".to_string(), vec!["clothes".to_string()]);
        let layer = MarkerLayer::build(1, vec![p]);
        assert!(layer.markers[0].popup_html.contains("<b>types</b>: clothes"));
    }
}
