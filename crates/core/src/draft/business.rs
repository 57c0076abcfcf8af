//! Business registration draft.
//!
//! The draft is what the registration form edits field by field. It only
//! becomes a [`CreateNegocioPayload`] once it passes validation, so the
//! negocios service never sees a request with a missing category.

use serde::Serialize;

use crate::types::{BusinessCategory, Email, EmailError, EncodedImage, Location, TimeOfDay};

/// Free-text fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessField {
    BusinessName,
    Email,
    Phone,
    Address,
    Website,
    Facebook,
    Instagram,
    Twitter,
    Description,
}

impl BusinessField {
    /// Fields that must be non-blank before submission.
    pub const REQUIRED: [Self; 4] = [Self::BusinessName, Self::Email, Self::Phone, Self::Address];

    /// Field label as shown on the form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BusinessName => "Nombre del Negocio",
            Self::Email => "Correo Electrónico",
            Self::Phone => "Número de Teléfono",
            Self::Address => "Dirección Física",
            Self::Website => "Sitio Web",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Description => "Descripción del Negocio",
        }
    }
}

/// Reasons a draft cannot be submitted yet.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("business category is not selected")]
    MissingCategory,
    #[error("required field is blank: {}", .0.label())]
    MissingField(BusinessField),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// In-memory state of the registration form.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessDraft {
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
    pub logo: Option<EncodedImage>,
}

impl Default for BusinessDraft {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            category: None,
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            open_time: TimeOfDay::from_hm(9, 0).ok(),
            close_time: TimeOfDay::from_hm(17, 0).ok(),
            website: String::new(),
            facebook: String::new(),
            instagram: String::new(),
            twitter: String::new(),
            description: String::new(),
            location: None,
            logo: None,
        }
    }
}

impl BusinessDraft {
    /// Maximum description length, in characters.
    pub const DESCRIPTION_MAX_CHARS: usize = 500;

    /// Number of fields that count towards the completion percentage.
    pub const TRACKED_FIELDS: usize = 6;

    #[must_use]
    pub fn text(&self, field: BusinessField) -> &str {
        match field {
            BusinessField::BusinessName => &self.business_name,
            BusinessField::Email => &self.email,
            BusinessField::Phone => &self.phone,
            BusinessField::Address => &self.address,
            BusinessField::Website => &self.website,
            BusinessField::Facebook => &self.facebook,
            BusinessField::Instagram => &self.instagram,
            BusinessField::Twitter => &self.twitter,
            BusinessField::Description => &self.description,
        }
    }

    /// Replace one text field, leaving every other field untouched.
    ///
    /// Descriptions longer than [`Self::DESCRIPTION_MAX_CHARS`] are cut at
    /// that many characters.
    pub fn set_text(&mut self, field: BusinessField, value: impl Into<String>) {
        let mut value = value.into();
        if field == BusinessField::Description {
            if let Some((cut, _)) = value.char_indices().nth(Self::DESCRIPTION_MAX_CHARS) {
                value.truncate(cut);
            }
        }
        let slot = match field {
            BusinessField::BusinessName => &mut self.business_name,
            BusinessField::Email => &mut self.email,
            BusinessField::Phone => &mut self.phone,
            BusinessField::Address => &mut self.address,
            BusinessField::Website => &mut self.website,
            BusinessField::Facebook => &mut self.facebook,
            BusinessField::Instagram => &mut self.instagram,
            BusinessField::Twitter => &mut self.twitter,
            BusinessField::Description => &mut self.description,
        };
        *slot = value;
    }

    /// How many of the six tracked fields are filled:
    /// name, category, email, phone, address and location.
    #[must_use]
    pub fn filled_tracked_fields(&self) -> usize {
        let texts = [
            &self.business_name,
            &self.email,
            &self.phone,
            &self.address,
        ];
        texts.iter().filter(|t| !t.trim().is_empty()).count()
            + usize::from(self.category.is_some())
            + usize::from(self.location.is_some())
    }

    /// `round(100 * filled / 6)`, so always one of 0, 17, 33, 50, 67, 83, 100.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        let filled = self.filled_tracked_fields().min(Self::TRACKED_FIELDS);
        let rounded = (filled * 100 + Self::TRACKED_FIELDS / 2) / Self::TRACKED_FIELDS;
        u8::try_from(rounded).unwrap_or(100)
    }

    /// First required text field that is still blank.
    #[must_use]
    pub fn first_missing_required(&self) -> Option<BusinessField> {
        BusinessField::REQUIRED
            .into_iter()
            .find(|f| self.text(*f).trim().is_empty())
    }

    /// Validate the draft and build the create request.
    ///
    /// The category is checked first, then required fields in form order,
    /// then the email format.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn to_payload(&self) -> Result<CreateNegocioPayload, ValidationError> {
        let category = self.category.ok_or(ValidationError::MissingCategory)?;
        if let Some(field) = self.first_missing_required() {
            return Err(ValidationError::MissingField(field));
        }
        let email = Email::parse(&self.email)?;

        Ok(CreateNegocioPayload {
            business_name: self.business_name.trim().to_owned(),
            business_type: category,
            email,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            open_time: self.open_time,
            close_time: self.close_time,
            website: non_blank(&self.website),
            facebook: non_blank(&self.facebook),
            instagram: non_blank(&self.instagram),
            twitter: non_blank(&self.twitter),
            description: non_blank(&self.description),
            location: self.location,
            logo: self.logo.clone(),
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Body of `POST /negocios/crear/`.
///
/// Empty optional fields serialize as explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNegocioPayload {
    pub business_name: String,
    pub business_type: BusinessCategory,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub open_time: Option<TimeOfDay>,
    pub close_time: Option<TimeOfDay>,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub logo: Option<EncodedImage>,
}
