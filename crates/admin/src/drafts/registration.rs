//! Business registration controller.

use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use acaclick_core::{BusinessCategory, BusinessDraft, BusinessField, Location, TimeOfDay, ValidationError};
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::instrument;

use crate::api::{ApiClient, ApiError, Negocio};
use crate::map::{MapEvent, MapProvider, MapSession};
use crate::media::{MediaError, MediaIngestor};
use crate::ui::{NotificationSink, Severity};

pub const CREATED_MESSAGE: &str = "¡Negocio creado con éxito! ✨";
pub const CREATE_FALLBACK_MESSAGE: &str = "Error al crear el negocio";
pub const MISSING_CATEGORY_MESSAGE: &str = "Por favor selecciona un tipo de negocio";

/// Where to go after a successful registration, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub after: Duration,
}

impl Redirect {
    /// The owner's panel, after the success toast has had time to show.
    pub const PANEL: Self = Self {
        to: "/panel",
        after: Duration::from_millis(1500),
    };
}

/// A successful registration.
#[derive(Debug, Clone)]
pub struct Registered {
    pub negocio: Negocio,
    pub redirect: Redirect,
}

/// Why a submission did not go through. The operator has already been
/// notified in every case.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("draft is incomplete: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One of the canned addresses behind the "search" shortcut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownAddress {
    pub address: &'static str,
    pub location: Location,
}

/// Addresses the search shortcut picks from.
pub const KNOWN_ADDRESSES: [KnownAddress; 3] = [
    KnownAddress {
        address: "Avenida Reforma 123, Ciudad de México",
        location: Location::from_const(19.4326, -99.1332),
    },
    KnownAddress {
        address: "Calle Juárez 456, Guadalajara",
        location: Location::from_const(20.6597, -103.3496),
    },
    KnownAddress {
        address: "Boulevard Morelos 789, Monterrey",
        location: Location::from_const(25.6866, -100.3161),
    },
];

/// Text shown for a draft that fails local validation.
#[must_use]
pub fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::MissingCategory => MISSING_CATEGORY_MESSAGE.to_owned(),
        ValidationError::MissingField(field) => {
            format!("Por favor completa el campo: {}", field.label())
        }
        ValidationError::InvalidEmail(_) => {
            "Por favor ingresa un correo electrónico válido".to_owned()
        }
    }
}

/// Owns a [`BusinessDraft`] for the lifetime of the registration form.
pub struct RegistrationController {
    draft: BusinessDraft,
    api: ApiClient,
    notifier: Arc<dyn NotificationSink>,
    media: MediaIngestor,
}

impl std::fmt::Debug for RegistrationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationController")
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl RegistrationController {
    #[must_use]
    pub fn new(api: ApiClient, notifier: Arc<dyn NotificationSink>, media: MediaIngestor) -> Self {
        Self::with_draft(BusinessDraft::default(), api, notifier, media)
    }

    /// Start from a pre-filled draft (the CLI loads one from YAML).
    #[must_use]
    pub fn with_draft(
        draft: BusinessDraft,
        api: ApiClient,
        notifier: Arc<dyn NotificationSink>,
        media: MediaIngestor,
    ) -> Self {
        Self {
            draft,
            api,
            notifier,
            media,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &BusinessDraft {
        &self.draft
    }

    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        self.draft.completion_percent()
    }

    pub fn set_text(&mut self, field: BusinessField, value: impl Into<String>) {
        self.draft.set_text(field, value);
    }

    pub fn select_category(&mut self, category: BusinessCategory) {
        self.draft.category = Some(category);
    }

    pub fn set_open_time(&mut self, time: Option<TimeOfDay>) {
        self.draft.open_time = time;
    }

    pub fn set_close_time(&mut self, time: Option<TimeOfDay>) {
        self.draft.close_time = time;
    }

    /// Read and attach a logo. On failure the draft keeps its previous logo.
    #[instrument(skip(self))]
    pub async fn attach_logo(&mut self, path: &Path) -> Result<(), MediaError> {
        match self.media.ingest(path).await {
            Ok(image) => {
                self.draft.logo = Some(image);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Logo rejected");
                self.notifier.notify(&e.user_message(), Severity::Error);
                Err(e)
            }
        }
    }

    pub fn remove_logo(&mut self) {
        self.draft.logo = None;
    }

    /// Apply a map click or marker drag; the most recent one wins.
    pub fn on_map_event<P: MapProvider>(&mut self, map: &mut MapSession<P>, event: MapEvent) {
        match map.handle_event(event) {
            Ok(Some(location)) => self.draft.location = Some(location),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Map event could not be applied"),
        }
    }

    /// Fill the address with one of the known addresses and jump there.
    pub fn search_address<P: MapProvider, R: Rng + ?Sized>(
        &mut self,
        map: &mut MapSession<P>,
        rng: &mut R,
    ) -> Option<KnownAddress> {
        let picked = *KNOWN_ADDRESSES.choose(rng)?;
        self.draft.set_text(BusinessField::Address, picked.address);
        self.place(map, picked.location);
        self.notifier.notify("Dirección encontrada", Severity::Success);
        Some(picked)
    }

    /// Apply the outcome of a geolocation lookup.
    pub fn apply_current_location<P: MapProvider, E: Display>(
        &mut self,
        map: &mut MapSession<P>,
        outcome: Result<Location, E>,
    ) {
        match outcome {
            Ok(location) => {
                self.draft.set_text(BusinessField::Address, "Ubicación actual");
                self.place(map, location);
                self.notifier
                    .notify("Ubicación actual detectada", Severity::Success);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Geolocation failed");
                self.notifier
                    .notify("No se pudo obtener tu ubicación", Severity::Error);
            }
        }
    }

    pub fn confirm_location(&self) {
        if self.draft.location.is_some() {
            self.notifier.notify("Ubicación confirmada", Severity::Success);
        } else {
            self.notifier
                .notify("Selecciona una ubicación en el mapa", Severity::Error);
        }
    }

    pub fn clear_location<P: MapProvider>(&mut self, map: &mut MapSession<P>) {
        if let Err(e) = map.clear_marker() {
            tracing::warn!(error = %e, "Marker could not be removed");
        }
        self.draft.location = None;
        self.draft.set_text(BusinessField::Address, "");
        self.notifier.notify("Ubicación eliminada", Severity::Info);
    }

    fn place<P: MapProvider>(&mut self, map: &mut MapSession<P>, location: Location) {
        self.draft.location = Some(location);
        if let Err(e) = map.place_marker(location) {
            tracing::warn!(error = %e, "Marker could not be placed");
        }
    }

    /// Validate locally, then send the draft to the negocios service once.
    ///
    /// The draft is left untouched whatever happens, so the form stays
    /// editable after a failure.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] without any network call when the
    /// draft is incomplete, or [`SubmitError::Api`] when the request fails.
    #[instrument(skip(self), fields(completion = self.draft.completion_percent()))]
    pub async fn submit(&mut self) -> Result<Registered, SubmitError> {
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Submission blocked by validation");
                self.notifier.notify(&validation_message(&e), Severity::Error);
                return Err(e.into());
            }
        };

        match self.api.create_negocio(&payload).await {
            Ok(negocio) => {
                tracing::info!(id_negocio = %negocio.id_negocio, "Negocio created");
                self.notifier.notify(CREATED_MESSAGE, Severity::Success);
                Ok(Registered {
                    negocio,
                    redirect: Redirect::PANEL,
                })
            }
            Err(e) => {
                self.notifier
                    .notify(&e.user_message(CREATE_FALLBACK_MESSAGE), Severity::Error);
                Err(e.into())
            }
        }
    }
}
