//! The map widget capability.

use acaclick_core::Location;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Leaflet stylesheet.
pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
/// Leaflet script.
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
/// OpenStreetMap raster tiles.
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Errors reported by a map provider or the session driving it.
#[derive(Debug, Error)]
pub enum MapError {
    /// The widget rejected an operation.
    #[error("map provider error: {0}")]
    Provider(String),

    /// The widget or its container never became ready.
    #[error("map not ready after {attempts} attempts")]
    NotReady { attempts: u32 },
}

/// A page asset the widget needs before it can initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapAsset {
    Stylesheet(&'static str),
    Script(&'static str),
}

impl MapAsset {
    /// Assets for the Leaflet widget, stylesheet first.
    pub const LEAFLET: [Self; 2] = [Self::Stylesheet(LEAFLET_CSS), Self::Script(LEAFLET_JS)];

    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Stylesheet(url) | Self::Script(url) => url,
        }
    }
}

/// Something the operator did on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Click on the map surface.
    Click(Location),
    /// The marker was dragged and dropped.
    MarkerDragEnd(Location),
}

impl MapEvent {
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::Click(at) | Self::MarkerDragEnd(at) => *at,
        }
    }
}

/// Marker shown at a fixed spot when the map first appears.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialMarker {
    pub at: Location,
    pub popup: Option<String>,
}

/// How a map instance is set up.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: Location,
    pub zoom: u8,
    /// Whether the operator can drag the marker.
    pub draggable_marker: bool,
    /// Whether clicks and drags should be reported.
    pub pick_locations: bool,
    pub initial_marker: Option<InitialMarker>,
    pub tile_url: &'static str,
    pub attribution: &'static str,
}

/// Mexico City, where every map opens.
pub const DEFAULT_CENTER: Location = Location::from_const(19.4326, -99.1332);

impl MapOptions {
    /// Registration form: click to place, drag to adjust.
    #[must_use]
    pub fn registration() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: 12,
            draggable_marker: true,
            pick_locations: true,
            initial_marker: None,
            tile_url: OSM_TILE_URL,
            attribution: OSM_ATTRIBUTION,
        }
    }

    /// Storefront preview: a fixed marker with a popup.
    #[must_use]
    pub fn customization() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: 13,
            draggable_marker: false,
            pick_locations: false,
            initial_marker: Some(InitialMarker {
                at: DEFAULT_CENTER,
                popup: Some("Tu tienda está ubicada aquí".to_owned()),
            }),
            tile_url: OSM_TILE_URL,
            attribution: OSM_ATTRIBUTION,
        }
    }
}

/// A third-party map widget living on a page.
///
/// Implementations wrap the real widget; tests substitute a double.
/// `Handle` identifies one initialized map instance.
pub trait MapProvider {
    type Handle;

    /// Whether the widget library has finished loading.
    fn is_available(&self) -> bool;

    /// Whether the page already carries `asset`.
    fn has_asset(&self, asset: MapAsset) -> bool;

    /// Add `asset` to the page. Only called when [`Self::has_asset`] is false.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Provider`] if the asset cannot be added.
    fn inject_asset(&mut self, asset: MapAsset) -> Result<(), MapError>;

    /// Laid-out size of `container` in pixels; `None` if it does not exist.
    fn container_size(&self, container: &str) -> Option<(u32, u32)>;

    /// Create a map inside `container`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Provider`] if the widget fails to initialize.
    fn init(&mut self, container: &str, options: &MapOptions) -> Result<Self::Handle, MapError>;

    /// Deliver clicks and marker drags on `handle` to `events`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Provider`] if the listener cannot be attached.
    fn on_location_picked(
        &mut self,
        handle: &Self::Handle,
        events: UnboundedSender<MapEvent>,
    ) -> Result<(), MapError>;

    /// Place the single marker, or move it if it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Provider`] on widget failure.
    fn set_marker(
        &mut self,
        handle: &Self::Handle,
        at: Location,
        draggable: bool,
        popup: Option<&str>,
    ) -> Result<(), MapError>;

    /// Remove the marker if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Provider`] on widget failure.
    fn remove_marker(&mut self, handle: &Self::Handle) -> Result<(), MapError>;

    /// Destroy the map instance.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Provider`] on widget failure.
    fn dispose(&mut self, handle: Self::Handle) -> Result<(), MapError>;
}
