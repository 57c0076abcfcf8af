//! Business category.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the known categories.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid business category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of business types a negocio can be registered under.
///
/// Serialized with the negocios service's wire values (`restaurante`,
/// `minorista`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    Restaurante,
    Minorista,
    Servicio,
    Hosteleria,
    Creativo,
    Otro,
}

impl BusinessCategory {
    /// Every category, in the order the registration form offers them.
    pub const ALL: [Self; 6] = [
        Self::Restaurante,
        Self::Minorista,
        Self::Servicio,
        Self::Hosteleria,
        Self::Creativo,
        Self::Otro,
    ];

    /// Wire value sent to the negocios service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurante => "restaurante",
            Self::Minorista => "minorista",
            Self::Servicio => "servicio",
            Self::Hosteleria => "hosteleria",
            Self::Creativo => "creativo",
            Self::Otro => "otro",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Restaurante => "Restaurante",
            Self::Minorista => "Minorista",
            Self::Servicio => "Servicio",
            Self::Hosteleria => "Hostelería",
            Self::Creativo => "Creativo",
            Self::Otro => "Otro",
        }
    }
}

impl std::fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BusinessCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
