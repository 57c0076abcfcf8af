//! Storefront personalization controller.

use std::path::Path;
use std::sync::Arc;

use acaclick_core::{
    CustomizationDraft, CustomizationField, FontFamily, HexColor, ImageSlot, NegocioId,
    OverlayReport, TextSize,
};
use serde_json::{Map, Value};
use tracing::instrument;

use super::preview::StorefrontPreview;
use crate::api::{ApiClient, ApiError, Negocio};
use crate::media::{MediaError, MediaIngestor};
use crate::ui::{ConfirmPrompt, NotificationSink, Severity};

pub const SAVED_MESSAGE: &str = "¡Cambios guardados exitosamente!";
pub const SAVED_DEMO_MESSAGE: &str = "¡Cambios guardados exitosamente! (demo)";
pub const SAVE_FAILED_MESSAGE: &str = "Error al guardar los cambios";
pub const LOAD_FAILED_MESSAGE: &str = "Error al cargar los datos del negocio";
pub const DISCARD_PROMPT: &str = "¿Estás seguro de que deseas restablecer todos los cambios?";
pub const PUBLISHED_MESSAGE: &str = "¡Tu tienda ha sido publicada! 🎉";

/// Editor sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorTab {
    #[default]
    Branding,
    Colors,
    Typography,
    Content,
    Media,
}

impl EditorTab {
    pub const ALL: [Self; 5] = [
        Self::Branding,
        Self::Colors,
        Self::Typography,
        Self::Content,
        Self::Media,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Branding => "Marca",
            Self::Colors => "Colores",
            Self::Typography => "Tipografía",
            Self::Content => "Contenido",
            Self::Media => "Multimedia",
        }
    }
}

/// Seed a draft from a stored record.
///
/// Persisted personalization wins; `nombre`, `logo_url` and `direccion` only
/// fill the fields it did not supply; defaults cover the rest.
#[must_use]
pub fn draft_from_record(negocio: &Negocio) -> (CustomizationDraft, OverlayReport) {
    let mut draft = CustomizationDraft::default();
    let report = negocio
        .personalization()
        .map(|persisted| draft.overlay(persisted))
        .unwrap_or_default();

    if !report.supplied(CustomizationField::StoreName.key()) && !negocio.nombre.trim().is_empty() {
        draft.store_name.clone_from(&negocio.nombre);
    }
    if !report.supplied(ImageSlot::StoreLogo.key()) {
        if let Some(logo) = negocio.logo() {
            draft.store_logo = Some(logo);
        }
    }
    if !report.supplied(CustomizationField::MapAddress.key()) {
        if let Some(address) = negocio.direccion.as_deref().filter(|a| !a.trim().is_empty()) {
            draft.map_address = address.to_owned();
        }
    }
    (draft, report)
}

/// Owns a [`CustomizationDraft`] for the lifetime of the editor.
pub struct CustomizationController {
    negocio_id: Option<NegocioId>,
    draft: CustomizationDraft,
    tab: EditorTab,
    load_failed: bool,
    api: ApiClient,
    notifier: Arc<dyn NotificationSink>,
    media: MediaIngestor,
}

impl std::fmt::Debug for CustomizationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomizationController")
            .field("negocio_id", &self.negocio_id)
            .field("tab", &self.tab)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl CustomizationController {
    /// Build the editor, loading the record when an id is given.
    ///
    /// A failed load is reported through `notifier` and leaves the defaults
    /// in place; the editor is usable either way.
    pub async fn open(
        api: ApiClient,
        notifier: Arc<dyn NotificationSink>,
        media: MediaIngestor,
        negocio_id: Option<NegocioId>,
    ) -> Self {
        let mut controller = Self {
            negocio_id,
            draft: CustomizationDraft::default(),
            tab: EditorTab::default(),
            load_failed: false,
            api,
            notifier,
            media,
        };
        controller.load().await;
        controller
    }

    #[instrument(skip(self), fields(negocio_id = ?self.negocio_id))]
    async fn load(&mut self) {
        self.load_failed = false;
        let Some(id) = self.negocio_id else {
            self.draft = CustomizationDraft::default();
            return;
        };

        match self.api.get_negocio(id).await {
            Ok(negocio) => {
                let (draft, report) = draft_from_record(&negocio);
                if !report.rejected.is_empty() {
                    tracing::warn!(keys = ?report.rejected, "Skipped malformed personalization keys");
                }
                if !report.unknown.is_empty() {
                    tracing::debug!(keys = ?report.unknown, "Ignored unknown personalization keys");
                }
                self.draft = draft;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load negocio");
                self.draft = CustomizationDraft::default();
                self.load_failed = true;
                self.notifier
                    .notify(&e.user_message(LOAD_FAILED_MESSAGE), Severity::Error);
            }
        }
    }

    #[must_use]
    pub const fn negocio_id(&self) -> Option<NegocioId> {
        self.negocio_id
    }

    /// Whether the last load fell back to defaults because the fetch failed.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    #[must_use]
    pub const fn draft(&self) -> &CustomizationDraft {
        &self.draft
    }

    #[must_use]
    pub const fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    pub fn set_text(&mut self, field: CustomizationField, value: impl Into<String>) {
        self.draft.set_text(field, value);
    }

    /// Apply a batch of edits given as wire keys, the way a stored
    /// personalization is merged. Values that do not fit are skipped.
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) -> OverlayReport {
        let report = self.draft.overlay(patch);
        if !report.rejected.is_empty() || !report.unknown.is_empty() {
            tracing::warn!(
                rejected = ?report.rejected,
                unknown = ?report.unknown,
                "Some edits were not applied"
            );
        }
        report
    }

    pub fn set_primary_color(&mut self, color: HexColor) {
        self.draft.primary_color = color;
    }

    pub fn set_background_color(&mut self, color: HexColor) {
        self.draft.background_color = color;
    }

    /// Free-form picker value. Independent of the palette swatches.
    pub fn set_custom_color(&mut self, color: HexColor) {
        self.draft.custom_color = color;
    }

    pub fn select_font(&mut self, font: FontFamily) {
        self.draft.font_family = font;
    }

    pub fn set_text_size(&mut self, size: TextSize) {
        self.draft.text_size = size;
    }

    /// Read an image into `slot`. On failure the slot keeps its old value.
    #[instrument(skip(self))]
    pub async fn ingest_image(&mut self, slot: ImageSlot, path: &Path) -> Result<(), MediaError> {
        match self.media.ingest(path).await {
            Ok(image) => {
                self.draft.set_image(slot, Some(image));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(slot = slot.key(), error = %e, "Image rejected");
                self.notifier.notify(&e.user_message(), Severity::Error);
                Err(e)
            }
        }
    }

    pub fn clear_image(&mut self, slot: ImageSlot) {
        self.draft.set_image(slot, None);
    }

    /// Upload the whole draft to the personalize endpoint.
    ///
    /// Without a bound record this only reports a demo success.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] after notifying the operator.
    #[instrument(skip(self), fields(negocio_id = ?self.negocio_id))]
    pub async fn persist(&self) -> Result<(), ApiError> {
        let Some(id) = self.negocio_id else {
            tracing::info!("No negocio bound, skipping upload");
            self.notifier.notify(SAVED_DEMO_MESSAGE, Severity::Success);
            return Ok(());
        };

        match self.api.personalize_negocio(id, &self.draft).await {
            Ok(ack) => {
                tracing::info!(message = %ack.message, "Personalization saved");
                self.notifier.notify(SAVED_MESSAGE, Severity::Success);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save personalization");
                self.notifier.notify(SAVE_FAILED_MESSAGE, Severity::Error);
                Err(e)
            }
        }
    }

    /// Throw away local edits and reload, after confirmation.
    ///
    /// Returns whether the operator confirmed.
    pub async fn discard_and_reload(&mut self, prompt: &dyn ConfirmPrompt) -> bool {
        if !prompt.confirm(DISCARD_PROMPT) {
            return false;
        }
        self.load().await;
        true
    }

    pub fn publish(&self) {
        self.notifier.notify(PUBLISHED_MESSAGE, Severity::Success);
    }

    pub fn update_map_location(&self) {
        if self.draft.map_address.trim().is_empty() {
            self.notifier
                .notify("Por favor ingresa una dirección", Severity::Error);
        } else {
            self.notifier
                .notify("Ubicación actualizada en el mapa", Severity::Success);
        }
    }

    #[must_use]
    pub fn preview(&self) -> StorefrontPreview {
        StorefrontPreview::from_draft(&self.draft)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::ui::{FixedAnswer, MemoryNotifier};
    use serde_json::json;

    fn negocio(value: serde_json::Value) -> Negocio {
        serde_json::from_value(value).unwrap()
    }

    async fn offline() -> (CustomizationController, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        let api = ApiClient::new(&ApiConfig::local().unwrap()).unwrap();
        let controller = CustomizationController::open(
            api,
            Arc::new(notifier.clone()),
            MediaIngestor::default(),
            None,
        )
        .await;
        (controller, notifier)
    }

    #[test]
    fn test_persisted_personalization_wins_over_record() {
        let record = negocio(json!({
            "id_negocio": 4,
            "nombre": "Panadería Sol",
            "direccion": "Calle 5",
            "personalizacion": {"storeName": "Acme", "primaryColor": "#3b82f6"}
        }));
        let (draft, report) = draft_from_record(&record);

        assert_eq!(draft.store_name, "Acme");
        assert_eq!(draft.primary_color.to_string(), "#3b82f6");
        assert_eq!(draft.map_address, "Calle 5");
        assert_eq!(draft.hero_title, CustomizationDraft::default().hero_title);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_record_fills_fields_missing_from_personalization() {
        let record = negocio(json!({
            "id_negocio": 4,
            "nombre": "Panadería Sol",
            "personalizacion": {"storeName": "", "primaryColor": "naranja"}
        }));
        let (draft, report) = draft_from_record(&record);

        assert_eq!(draft.store_name, "Panadería Sol");
        assert_eq!(draft.primary_color, CustomizationDraft::default().primary_color);
        assert_eq!(report.rejected, vec!["primaryColor".to_string()]);
    }

    #[test]
    fn test_record_without_personalization() {
        let record = negocio(json!({"id_negocio": 1, "nombre": "Tienda", "personalizacion": null}));
        let (draft, report) = draft_from_record(&record);
        assert_eq!(draft.store_name, "Tienda");
        assert_eq!(report, OverlayReport::default());
    }

    #[tokio::test]
    async fn test_open_without_id_uses_defaults() {
        let (controller, notifier) = offline().await;
        assert_eq!(controller.draft(), &CustomizationDraft::default());
        assert!(notifier.entries().is_empty());
        assert_eq!(controller.tab(), EditorTab::Branding);
    }

    #[tokio::test]
    async fn test_persist_without_id_is_demo() {
        let (controller, notifier) = offline().await;
        controller.persist().await.unwrap();
        assert_eq!(
            notifier.last(),
            Some((SAVED_DEMO_MESSAGE.to_string(), Severity::Success))
        );
    }

    #[tokio::test]
    async fn test_discard_declined_keeps_edits() {
        let (mut controller, _) = offline().await;
        controller.set_text(CustomizationField::HeroTitle, "Ofertas");

        assert!(!controller.discard_and_reload(&FixedAnswer(false)).await);
        assert_eq!(controller.draft().hero_title, "Ofertas");

        assert!(controller.discard_and_reload(&FixedAnswer(true)).await);
        assert_eq!(controller.draft().hero_title, "Bienvenido a Nuestra Tienda");
    }

    #[tokio::test]
    async fn test_custom_color_leaves_primary_alone() {
        let (mut controller, _) = offline().await;
        let teal = HexColor::parse("#14b8a6").unwrap();
        controller.set_custom_color(teal);
        assert_eq!(controller.draft().custom_color, teal);
        assert_eq!(
            controller.draft().primary_color,
            CustomizationDraft::default().primary_color
        );
    }

    #[tokio::test]
    async fn test_update_map_location_requires_address() {
        let (mut controller, notifier) = offline().await;
        controller.update_map_location();
        assert_eq!(notifier.last().unwrap().1, Severity::Error);

        controller.set_text(CustomizationField::MapAddress, "Calle 5");
        controller.update_map_location();
        assert_eq!(
            notifier.last(),
            Some(("Ubicación actualizada en el mapa".to_string(), Severity::Success))
        );
    }

    #[tokio::test]
    async fn test_publish_is_notification_only() {
        let (controller, notifier) = offline().await;
        controller.publish();
        assert_eq!(notifier.entries().len(), 1);
        assert_eq!(notifier.last().unwrap().0, PUBLISHED_MESSAGE);
    }

    #[tokio::test]
    async fn test_apply_patch_keeps_valid_edits() {
        let (mut controller, _) = offline().await;
        let patch = json!({"heroTitle": "Rebajas", "textSize": "huge", "extra": 1});
        let report = controller.apply_patch(patch.as_object().unwrap());

        assert_eq!(controller.draft().hero_title, "Rebajas");
        assert_eq!(controller.draft().text_size, TextSize::Medium);
        assert_eq!(report.rejected, vec!["textSize".to_string()]);
        assert_eq!(report.unknown, vec!["extra".to_string()]);
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = EditorTab::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            ["Marca", "Colores", "Tipografía", "Contenido", "Multimedia"]
        );
    }
}
