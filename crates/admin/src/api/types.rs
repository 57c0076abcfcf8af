//! Request and response bodies of the auth and negocios services.

use acaclick_core::{
    BusinessCategory, EncodedImage, Location, NegocioId, RolId, TimeOfDay, UsuarioId,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

// =============================================================================
// Auth
// =============================================================================

/// Login credentials for `POST /auth/token/`.
#[derive(Clone)]
pub struct Credentials {
    pub correo: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(correo: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            correo: correo.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("correo", &self.correo)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            correo: &'a str,
            password: &'a str,
        }
        Wire {
            correo: &self.correo,
            password: self.password.expose_secret(),
        }
        .serialize(serializer)
    }
}

/// JWT pair issued by the auth service.
#[derive(Clone, Deserialize)]
#[serde(from = "RawTokenPair")]
pub struct TokenPair {
    pub access: SecretString,
    pub refresh: SecretString,
}

#[derive(Deserialize)]
struct RawTokenPair {
    access: String,
    refresh: String,
}

impl From<RawTokenPair> for TokenPair {
    fn from(raw: RawTokenPair) -> Self {
        Self {
            access: SecretString::from(raw.access),
            refresh: SecretString::from(raw.refresh),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Role attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rol {
    pub id_rol: RolId,
    pub nombre_rol: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// Profile returned by `GET /auth/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id_usuario: UsuarioId,
    pub correo: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido_paterno: Option<String>,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[serde(default)]
    pub rol: Option<Rol>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
}

impl CurrentUser {
    /// Full name for display, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [
            self.nombre.as_deref(),
            self.apellido_paterno.as_deref(),
            self.apellido_materno.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

        if parts.is_empty() {
            self.correo.clone()
        } else {
            parts.join(" ")
        }
    }
}

// =============================================================================
// Negocios
// =============================================================================

/// A business record as stored by the negocios service.
///
/// Optional fields tolerate both absence and `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Negocio {
    pub id_negocio: NegocioId,
    pub nombre: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub latitud: Option<Decimal>,
    #[serde(default)]
    pub longitud: Option<Decimal>,
    #[serde(default)]
    pub horario_apertura: Option<TimeOfDay>,
    #[serde(default)]
    pub horario_cierre: Option<TimeOfDay>,
    #[serde(default)]
    pub sitio_web: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub personalizacion: Option<Value>,
    #[serde(default)]
    pub id_usuario: Option<UsuarioId>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub creado_en: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub actualizado_en: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

/// Accept RFC 3339 timestamps, or naive ones (read as UTC). Anything else
/// becomes `None` rather than failing the whole record.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }))
}

impl Negocio {
    /// The stored `personalizacion` object, if it is one.
    #[must_use]
    pub fn personalization(&self) -> Option<&Map<String, Value>> {
        self.personalizacion.as_ref().and_then(Value::as_object)
    }

    /// Business category, when `tipo` is one of the known values.
    #[must_use]
    pub fn category(&self) -> Option<BusinessCategory> {
        self.tipo.as_deref().and_then(|t| t.parse().ok())
    }

    /// Map location, when both coordinates are present and in range.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        let lat = self.latitud?.to_f64()?;
        let lng = self.longitud?.to_f64()?;
        Location::new(lat, lng).ok()
    }

    /// The stored logo, when `logo_url` is a usable image reference.
    #[must_use]
    pub fn logo(&self) -> Option<EncodedImage> {
        self.logo_url
            .as_deref()
            .and_then(|url| EncodedImage::parse(url).ok())
    }
}

/// Acknowledgement of `POST /negocios/{id}/personalizar/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonalizeAck {
    pub message: String,
    #[serde(default)]
    pub negocio: Option<Negocio>,
}
