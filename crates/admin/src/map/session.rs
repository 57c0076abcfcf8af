//! Lifecycle of one map widget on one page.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use acaclick_core::Location;
use tokio::sync::mpsc::UnboundedSender;
use tracing::instrument;

use super::provider::{MapAsset, MapError, MapEvent, MapOptions, MapProvider};

/// Shared "page is still mounted" flag.
///
/// Every deferred initialization step checks it first; teardown revokes it.
/// Clones share the flag, so whoever owns the page can revoke it while an
/// initialization is still waiting.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// How long to wait for the widget and its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay between readiness checks.
    pub interval: Duration,
    /// Checks before giving up.
    pub max_attempts: u32,
    /// Pause after readiness so the container finishes layout.
    pub settle: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 100,
            settle: Duration::from_millis(200),
        }
    }
}

enum MapState<H> {
    Idle,
    Loading,
    Ready { handle: H, has_marker: bool },
    Disposed,
}

/// Drives a [`MapProvider`] through begin, initialize, events and teardown.
pub struct MapSession<P: MapProvider> {
    provider: P,
    options: MapOptions,
    state: MapState<P::Handle>,
    live: Liveness,
}

impl<P: MapProvider> std::fmt::Debug for MapSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            MapState::Idle => "idle",
            MapState::Loading => "loading",
            MapState::Ready { .. } => "ready",
            MapState::Disposed => "disposed",
        };
        f.debug_struct("MapSession")
            .field("state", &state)
            .field("live", &self.live.is_live())
            .finish_non_exhaustive()
    }
}

impl<P: MapProvider> MapSession<P> {
    #[must_use]
    pub fn new(provider: P, options: MapOptions) -> Self {
        Self {
            provider,
            options,
            state: MapState::Idle,
            live: Liveness::new(),
        }
    }

    #[must_use]
    pub fn liveness(&self) -> Liveness {
        self.live.clone()
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, MapState::Ready { .. })
    }

    #[must_use]
    pub const fn has_marker(&self) -> bool {
        matches!(self.state, MapState::Ready { has_marker: true, .. })
    }

    /// Inject whichever widget assets the page is missing.
    ///
    /// Returns whether the widget library is already usable.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if an asset cannot be injected.
    pub fn begin(&mut self) -> Result<bool, MapError> {
        if !self.live.is_live() || matches!(self.state, MapState::Disposed) {
            return Ok(false);
        }
        for asset in MapAsset::LEAFLET {
            if !self.provider.has_asset(asset) {
                tracing::debug!(url = asset.url(), "Injecting map asset");
                self.provider.inject_asset(asset)?;
            }
        }
        if matches!(self.state, MapState::Idle) {
            self.state = MapState::Loading;
        }
        Ok(self.provider.is_available())
    }

    /// Create the map once the widget and `container` are ready.
    ///
    /// Returns `Ok(true)` when the map is (or already was) initialized and
    /// `Ok(false)` when the page went away first. Clicks and drags are sent
    /// to `events`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotReady`] when the retry budget runs out, or the
    /// provider's error if initialization itself fails.
    #[instrument(skip(self, events, retry))]
    pub async fn initialize(
        &mut self,
        container: &str,
        events: UnboundedSender<MapEvent>,
        retry: RetryPolicy,
    ) -> Result<bool, MapError> {
        if self.is_ready() {
            return Ok(true);
        }

        let mut attempts = 0;
        loop {
            if !self.live.is_live() {
                tracing::debug!("Page torn down before map load, abandoning");
                return Ok(false);
            }
            let laid_out = self
                .provider
                .container_size(container)
                .is_some_and(|(w, h)| w > 0 && h > 0);
            if self.provider.is_available() && laid_out {
                break;
            }
            attempts += 1;
            if attempts >= retry.max_attempts {
                return Err(MapError::NotReady { attempts });
            }
            tokio::time::sleep(retry.interval).await;
        }

        tokio::time::sleep(retry.settle).await;
        if !self.live.is_live() {
            tracing::debug!("Page torn down while settling, abandoning");
            return Ok(false);
        }
        if self.is_ready() {
            return Ok(true);
        }

        let handle = self.provider.init(container, &self.options)?;
        let has_marker = match self.attach(&handle, events) {
            Ok(has_marker) => has_marker,
            Err(e) => {
                // A half-built map would block the next init on this container
                if let Err(dispose) = self.provider.dispose(handle) {
                    tracing::warn!(error = %dispose, "Map disposal failed");
                }
                return Err(e);
            }
        };

        self.state = MapState::Ready { handle, has_marker };
        tracing::info!(container, attempts, "Map initialized");
        Ok(true)
    }

    /// Place the initial marker and subscribe to picks on a fresh map.
    fn attach(
        &mut self,
        handle: &P::Handle,
        events: UnboundedSender<MapEvent>,
    ) -> Result<bool, MapError> {
        let mut has_marker = false;
        if let Some(marker) = &self.options.initial_marker {
            self.provider.set_marker(
                handle,
                marker.at,
                self.options.draggable_marker,
                marker.popup.as_deref(),
            )?;
            has_marker = true;
        }
        if self.options.pick_locations {
            self.provider.on_location_picked(handle, events)?;
        }
        Ok(has_marker)
    }

    /// Apply a widget event and return the picked coordinates.
    ///
    /// A click places the single marker or moves it there. A drag has
    /// already moved the marker, so only its new position is reported.
    /// Events arriving before initialization or after teardown are ignored.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the marker cannot be placed.
    pub fn handle_event(&mut self, event: MapEvent) -> Result<Option<Location>, MapError> {
        let MapState::Ready { handle, has_marker } = &mut self.state else {
            return Ok(None);
        };
        match event {
            MapEvent::Click(at) => {
                self.provider
                    .set_marker(handle, at, self.options.draggable_marker, None)?;
                *has_marker = true;
            }
            MapEvent::MarkerDragEnd(_) => *has_marker = true,
        }
        Ok(Some(event.location()))
    }

    /// Put the marker at `at` without a widget event (address search,
    /// current location). No-op until the map is initialized.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the marker cannot be placed.
    pub fn place_marker(&mut self, at: Location) -> Result<(), MapError> {
        if let MapState::Ready { handle, has_marker } = &mut self.state {
            self.provider
                .set_marker(handle, at, self.options.draggable_marker, None)?;
            *has_marker = true;
        }
        Ok(())
    }

    /// Remove the marker, if any.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the marker cannot be removed.
    pub fn clear_marker(&mut self) -> Result<(), MapError> {
        if let MapState::Ready { handle, has_marker } = &mut self.state {
            if *has_marker {
                self.provider.remove_marker(handle)?;
                *has_marker = false;
            }
        }
        Ok(())
    }

    /// Revoke liveness and dispose the map. Idempotent; errors are logged.
    pub fn teardown(&mut self) {
        self.live.revoke();
        match std::mem::replace(&mut self.state, MapState::Disposed) {
            MapState::Ready { handle, .. } => {
                if let Err(e) = self.provider.dispose(handle) {
                    tracing::warn!(error = %e, "Map disposal failed");
                } else {
                    tracing::debug!("Map disposed");
                }
            }
            MapState::Idle | MapState::Loading | MapState::Disposed => {}
        }
    }
}

impl<P: MapProvider> Drop for MapSession<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
