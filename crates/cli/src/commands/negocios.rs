//! Negocio commands.
//!
//! # Usage
//!
//! ```bash
//! acaclick negocios list [--usuario 7]
//! acaclick negocios show 12
//! acaclick negocios create --file negocio.yaml
//! acaclick negocios personalize 12 --file tienda.yaml --featured destacado.jpg
//! acaclick negocios preview [12] [--out preview.html]
//! ```
//!
//! # Draft file
//!
//! ```yaml
//! business_name: Panadería Sol
//! category: restaurante
//! email: hola@panaderiasol.mx
//! phone: "+52 55 1234 5678"
//! address: Calle 5 de Mayo 10, CDMX
//! open_time: "07:00"
//! location: { lat: 19.4326, lng: -99.1332 }
//! logo: logo.png
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use acaclick_admin::api::{ApiClient, ApiError};
use acaclick_admin::drafts::{CustomizationController, RegistrationController, SubmitError};
use acaclick_admin::media::{MediaError, MediaIngestor};
use acaclick_admin::routes::preview::PreviewTemplate;
use acaclick_admin::ui::TracingNotifier;
use acaclick_core::{
    BusinessCategory, BusinessDraft, BusinessField, ImageSlot, Location, NegocioId, TimeOfDay,
    UsuarioId,
};
use askama::Template;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during negocio commands.
#[derive(Debug, Error)]
pub enum NegociosError {
    /// Input file could not be read.
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid YAML for this command.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Personalization patch is not a mapping.
    #[error("Expected a mapping of personalization keys in {0}")]
    NotAMapping(String),

    /// The negocio could not be loaded, so nothing was saved.
    #[error("Negocio {0} could not be loaded")]
    LoadFailed(NegocioId),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Media(#[from] MediaError),

    /// Preview template failed to render.
    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    /// Preview could not be written.
    #[error("Could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Image files to ingest into a storefront.
#[derive(Debug, Default, clap::Args)]
pub struct ImageArgs {
    /// Store logo
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Featured product image
    #[arg(long)]
    pub featured: Option<PathBuf>,

    /// First product card image
    #[arg(long)]
    pub product1: Option<PathBuf>,

    /// Second product card image
    #[arg(long)]
    pub product2: Option<PathBuf>,
}

impl ImageArgs {
    fn slots(&self) -> impl Iterator<Item = (ImageSlot, &Path)> {
        [
            (ImageSlot::StoreLogo, &self.logo),
            (ImageSlot::FeaturedImage, &self.featured),
            (ImageSlot::ProductImage1, &self.product1),
            (ImageSlot::ProductImage2, &self.product2),
        ]
        .into_iter()
        .filter_map(|(slot, path)| path.as_deref().map(|p| (slot, p)))
    }
}

/// Registration draft as written in a YAML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DraftFile {
    pub business_name: String,
    pub category: Option<BusinessCategory>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub open_time: Option<TimeOfDay>,
    pub close_time: Option<TimeOfDay>,
    pub website: String,
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub description: String,
    pub location: Option<Location>,
    /// Logo path, relative to the draft file.
    pub logo: Option<PathBuf>,
}

impl DraftFile {
    /// The draft the registration form would hold after typing these values.
    ///
    /// Schedule fields left out keep the form's defaults.
    #[must_use]
    pub fn to_draft(&self) -> BusinessDraft {
        let mut draft = BusinessDraft::default();
        let texts = [
            (BusinessField::BusinessName, &self.business_name),
            (BusinessField::Email, &self.email),
            (BusinessField::Phone, &self.phone),
            (BusinessField::Address, &self.address),
            (BusinessField::Website, &self.website),
            (BusinessField::Facebook, &self.facebook),
            (BusinessField::Instagram, &self.instagram),
            (BusinessField::Twitter, &self.twitter),
            (BusinessField::Description, &self.description),
        ];
        for (field, value) in texts {
            draft.set_text(field, value.as_str());
        }
        draft.category = self.category;
        if self.open_time.is_some() {
            draft.open_time = self.open_time;
        }
        if self.close_time.is_some() {
            draft.close_time = self.close_time;
        }
        draft.location = self.location;
        draft
    }
}

async fn read_file(path: &Path) -> Result<String, NegociosError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| NegociosError::Read {
            path: path.display().to_string(),
            source,
        })
}

fn parse_yaml<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T, NegociosError> {
    serde_yaml::from_str(raw).map_err(|source| NegociosError::Yaml {
        path: path.display().to_string(),
        source,
    })
}

/// List active negocios.
///
/// # Errors
///
/// Returns `ApiError` if the negocios service fails.
pub async fn list(api: &ApiClient, usuario: Option<i64>) -> Result<(), ApiError> {
    let negocios = match usuario {
        Some(id) => api.list_negocios_for_user(UsuarioId::new(id)).await?,
        None => api.list_negocios().await?,
    };

    tracing::info!("{} negocio(s)", negocios.len());
    for negocio in &negocios {
        tracing::info!(
            "  #{} {} [{}]",
            negocio.id_negocio,
            negocio.nombre,
            negocio.tipo.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Show one negocio.
///
/// # Errors
///
/// Returns `ApiError` if the negocio does not exist or the service fails.
pub async fn show(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    let negocio = api.get_negocio(NegocioId::new(id)).await?;
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_owned();

    tracing::info!("Negocio #{}: {}", negocio.id_negocio, negocio.nombre);
    tracing::info!(
        "  Category: {}",
        negocio
            .category()
            .map_or_else(|| or_dash(negocio.tipo.as_deref()), |c| c.label().to_owned())
    );
    tracing::info!("  Email: {}", or_dash(negocio.correo.as_deref()));
    tracing::info!("  Phone: {}", or_dash(negocio.telefono.as_deref()));
    tracing::info!("  Address: {}", or_dash(negocio.direccion.as_deref()));
    if let (Some(open), Some(close)) = (negocio.horario_apertura, negocio.horario_cierre) {
        tracing::info!("  Hours: {} - {}", open, close);
    }
    if let Some(location) = negocio.location() {
        tracing::info!("  Location: {}", location);
    }
    tracing::info!("  Active: {}", negocio.activo);
    tracing::info!(
        "  Personalized: {}",
        negocio.personalization().is_some_and(|p| !p.is_empty())
    );
    Ok(())
}

/// Register a negocio from a YAML draft.
///
/// # Errors
///
/// Returns `NegociosError` if the file is invalid, the draft is incomplete or
/// the negocios service rejects it.
pub async fn create(
    api: &ApiClient,
    media: MediaIngestor,
    file: &Path,
) -> Result<(), NegociosError> {
    let raw = read_file(file).await?;
    let draft_file: DraftFile = parse_yaml(file, &raw)?;

    let mut controller = RegistrationController::with_draft(
        draft_file.to_draft(),
        api.clone(),
        Arc::new(TracingNotifier),
        media,
    );
    if let Some(logo) = &draft_file.logo {
        let logo = file.parent().map_or_else(|| logo.clone(), |dir| dir.join(logo));
        controller.attach_logo(&logo).await?;
    }
    tracing::info!("Draft {}% complete", controller.completion_percent());

    let registered = controller.submit().await?;
    tracing::info!(
        "Created negocio #{} ({}); continue at {}",
        registered.negocio.id_negocio,
        registered.negocio.nombre,
        registered.redirect.to
    );
    Ok(())
}

/// Apply a personalization patch and images to a negocio, then save it.
///
/// # Errors
///
/// Returns `NegociosError` if the negocio cannot be loaded, an input is
/// invalid, or saving fails.
pub async fn personalize(
    api: &ApiClient,
    media: MediaIngestor,
    id: i64,
    file: Option<&Path>,
    images: &ImageArgs,
) -> Result<(), NegociosError> {
    let id = NegocioId::new(id);
    let mut controller = CustomizationController::open(
        api.clone(),
        Arc::new(TracingNotifier),
        media,
        Some(id),
    )
    .await;
    if controller.load_failed() {
        return Err(NegociosError::LoadFailed(id));
    }

    if let Some(file) = file {
        let raw = read_file(file).await?;
        let yaml: serde_yaml::Value = parse_yaml(file, &raw)?;
        let patch = serde_json::to_value(yaml)
            .ok()
            .and_then(|value| value.as_object().cloned())
            .ok_or_else(|| NegociosError::NotAMapping(file.display().to_string()))?;
        let report = controller.apply_patch(&patch);
        tracing::info!("Applied {} field(s)", report.applied.len());
    }

    for (slot, path) in images.slots() {
        controller.ingest_image(slot, path).await?;
    }

    controller.persist().await?;
    Ok(())
}

/// Render the storefront preview of a negocio (or of the defaults).
///
/// # Errors
///
/// Returns `NegociosError` if rendering or writing fails.
pub async fn preview(api: &ApiClient, id: Option<i64>, out: &Path) -> Result<(), NegociosError> {
    let id = id.map(NegocioId::new);
    let controller = CustomizationController::open(
        api.clone(),
        Arc::new(TracingNotifier),
        MediaIngestor::default(),
        id,
    )
    .await;

    let html = PreviewTemplate::new(controller.draft(), None, id).render()?;
    tokio::fs::write(out, html)
        .await
        .map_err(|source| NegociosError::Write {
            path: out.display().to_string(),
            source,
        })?;

    tracing::info!("Preview written to {}", out.display());
    Ok(())
}
