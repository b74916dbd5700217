use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{GuestError, GuestResult};

/// Identity document presented at check-in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
pub enum DocumentType {
    #[serde(rename = "ine")]
    #[strum(serialize = "ine")]
    Ine,
    #[serde(rename = "pasaporte")]
    #[strum(serialize = "pasaporte")]
    Passport,
    #[serde(rename = "licencia")]
    #[strum(serialize = "licencia")]
    License,
    #[default]
    #[serde(rename = "otro")]
    #[strum(serialize = "otro")]
    Other,
}

/// Guest entity - represents a guest stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique, stored lowercased
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub document_type: DocumentType,
    #[serde(default)]
    pub document_number: String,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "database::mongodb::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(input: NewGuest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            document_type: input.document_type,
            document_number: input.document_number,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn apply_update(&mut self, update: UpdateGuest) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(document_type) = update.document_type {
            self.document_type = document_type;
        }
        if let Some(document_number) = update.document_number {
            self.document_number = document_number;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Request body for registering a guest, as received
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub notes: Option<String>,
}

impl CreateGuest {
    /// Trim every field, lowercase the email and require the contact fields
    pub fn normalize(self) -> GuestResult<NewGuest> {
        let required = |value: Option<String>| trimmed(value).filter(|v| !v.is_empty());

        match (
            required(self.first_name),
            required(self.last_name),
            required(self.email),
            required(self.phone),
        ) {
            (Some(first_name), Some(last_name), Some(email), Some(phone)) => Ok(NewGuest {
                first_name,
                last_name,
                email: email.to_lowercase(),
                phone,
                document_type: self.document_type.unwrap_or_default(),
                document_number: trimmed(self.document_number).unwrap_or_default(),
                notes: trimmed(self.notes).unwrap_or_default(),
            }),
            _ => Err(GuestError::Validation(
                "firstName, lastName, email and phone are required".to_string(),
            )),
        }
    }
}

/// Normalized guest ready to be stored
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewGuest {
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub notes: String,
}

/// Partial guest update
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuest {
    #[validate(length(min = 1, message = "firstName cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "lastName cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "phone cannot be empty"))]
    pub phone: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub notes: Option<String>,
}

impl UpdateGuest {
    pub fn normalize(self) -> Self {
        Self {
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            email: trimmed(self.email).map(|e| e.to_lowercase()),
            phone: trimmed(self.phone),
            document_type: self.document_type,
            document_number: trimmed(self.document_number),
            notes: trimmed(self.notes),
        }
    }
}

/// Query parameters for listing guests
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GuestFilter {
    /// Case-insensitive text matched against names, email and phone
    pub search: Option<String>,
    /// `ine`, `pasaporte`, `licencia` or `otro`
    pub document_type: Option<String>,
    /// Page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
    /// `createdAt` (default), `firstName`, `lastName` or `email`
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default)
    pub order: Option<String>,
}

impl GuestFilter {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const SORT_FIELDS: [&'static str; 4] = ["createdAt", "firstName", "lastName", "email"];

    pub fn sort_field(&self) -> &str {
        self.sort_by
            .as_deref()
            .filter(|field| Self::SORT_FIELDS.contains(field))
            .unwrap_or("createdAt")
    }

    /// Trimmed search text, `None` when blank
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestPage {
    pub count: usize,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
    pub results: Vec<Guest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestMessage {
    pub message: String,
    pub guest: Guest,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuestDeleted {
    pub message: String,
}
