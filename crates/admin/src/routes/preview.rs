//! Storefront preview pages.

use acaclick_core::{CustomizationDraft, Location, NegocioId};
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::drafts::{StorefrontPreview, draft_from_record};
use crate::error::Result;
use crate::map::{MapAsset, MapOptions};
use crate::state::AppState;

/// Map settings handed to the page script through `data-` attributes.
#[derive(Debug, Clone)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
    pub tile_url: &'static str,
    pub attribution: &'static str,
    pub popup: String,
    pub stylesheet: &'static str,
    pub script: &'static str,
}

impl MapView {
    fn new(options: &MapOptions, location: Option<Location>) -> Self {
        let marker = options.initial_marker.as_ref();
        let at = location
            .or_else(|| marker.map(|m| m.at))
            .unwrap_or(options.center);
        let [stylesheet, script] = MapAsset::LEAFLET.map(MapAsset::url);
        Self {
            lat: at.lat(),
            lng: at.lng(),
            zoom: options.zoom,
            tile_url: options.tile_url,
            attribution: options.attribution,
            popup: marker
                .and_then(|m| m.popup.clone())
                .unwrap_or_default(),
            stylesheet,
            script,
        }
    }
}

/// Storefront preview template.
#[derive(Template, WebTemplate)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub preview: StorefrontPreview,
    pub map: MapView,
    pub negocio_id: Option<NegocioId>,
}

impl PreviewTemplate {
    /// Page for `draft`, with the map centered on `location` when known.
    #[must_use]
    pub fn new(
        draft: &CustomizationDraft,
        location: Option<Location>,
        negocio_id: Option<NegocioId>,
    ) -> Self {
        Self {
            preview: StorefrontPreview::from_draft(draft),
            map: MapView::new(&MapOptions::customization(), location),
            negocio_id,
        }
    }
}

/// Preview of an untouched draft.
#[instrument]
pub async fn defaults() -> PreviewTemplate {
    PreviewTemplate::new(&CustomizationDraft::default(), None, None)
}

/// Preview of a stored negocio's personalization.
///
/// # Errors
///
/// Returns 404 if the negocios service does not know the id, 502 for any
/// other backend failure.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<NegocioId>,
) -> Result<PreviewTemplate> {
    let negocio = state.api().get_negocio(id).await?;
    let (draft, report) = draft_from_record(&negocio);
    if !report.rejected.is_empty() {
        tracing::warn!(keys = ?report.rejected, "Skipped malformed personalization keys");
    }

    Ok(PreviewTemplate::new(&draft, negocio.location(), Some(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_view_prefers_record_location() {
        let at = Location::from_const(20.6597, -103.3496);
        let view = MapView::new(&MapOptions::customization(), Some(at));
        assert!((view.lat - 20.6597).abs() < f64::EPSILON);
        assert_eq!(view.zoom, 13);
        assert_eq!(view.popup, "Tu tienda está ubicada aquí");
    }

    #[tokio::test]
    async fn test_defaults_render() {
        let html = defaults().await.render().unwrap_or_default();
        assert!(html.contains("Mi Tienda Online"));
        assert!(html.contains("Calle Principal 123"));
        assert!(html.contains("Zapatillas Deportivas"));
        assert!(html.contains("leaflet@1.9.4"));
    }
}
