use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{RoomError, RoomResult};

/// Room category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum RoomType {
    #[serde(rename = "individual")]
    #[strum(serialize = "individual")]
    Single,
    #[serde(rename = "doble")]
    #[strum(serialize = "doble")]
    Double,
    #[serde(rename = "suite")]
    #[strum(serialize = "suite")]
    Suite,
}

fn default_available() -> bool {
    true
}

/// Room entity - represents a room stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Door number, unique across the hotel
    pub number: i32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Maximum number of guests
    pub capacity: i32,
    pub price_per_night: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Front desk availability flag
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(with = "database::mongodb::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(input: CreateRoom) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            number: input.number,
            room_type: input.room_type,
            capacity: input.capacity,
            price_per_night: input.price_per_night,
            description: input.description,
            amenities: input.amenities,
            is_available: input.is_available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, leaving absent fields untouched
    pub fn apply_update(&mut self, update: UpdateRoom) {
        if let Some(number) = update.number {
            self.number = number;
        }
        if let Some(room_type) = update.room_type {
            self.room_type = room_type;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if let Some(price) = update.price_per_night {
            self.price_per_night = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(amenities) = update.amenities {
            self.amenities = amenities;
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new room
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoom {
    #[validate(range(min = 1))]
    pub number: i32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// DTO for updating a room; every field is optional
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoom {
    #[validate(range(min = 1))]
    pub number: Option<i32>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price_per_night: Option<f64>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// Body of `PATCH /{id}/availability`.
///
/// Kept as raw JSON so that a non-boolean value gets a specific message
/// instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    #[serde(default)]
    #[schema(value_type = bool)]
    pub is_available: serde_json::Value,
}

/// Query parameters for room search
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RoomSearch {
    /// Room type (`individual`, `doble`, `suite`)
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    /// `true` selects available rooms, any other value unavailable ones
    pub is_available: Option<String>,
    pub min_capacity: Option<String>,
    pub max_capacity: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Comma separated list; rooms must have all of them
    pub amenities: Option<String>,
    /// `pricePerNight` (default), `capacity`, `number` or `type`
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub order: Option<String>,
}

impl RoomSearch {
    pub const SORT_FIELDS: [&'static str; 4] = ["pricePerNight", "capacity", "number", "type"];
    pub const DEFAULT_SORT: &'static str = "pricePerNight";

    /// Typed criteria. Blank bounds count as absent, non-numeric ones are rejected.
    pub fn criteria(&self) -> RoomResult<RoomCriteria> {
        let bound = |value: &Option<String>, name: &str| -> RoomResult<Option<f64>> {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                None => Ok(None),
                Some(raw) => raw
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Some)
                    .ok_or_else(|| RoomError::Validation(format!("Invalid {name}"))),
            }
        };

        Ok(RoomCriteria {
            room_type: self
                .room_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            is_available: self.is_available.as_deref().map(|v| v == "true"),
            min_capacity: bound(&self.min_capacity, "minCapacity")?,
            max_capacity: bound(&self.max_capacity, "maxCapacity")?,
            min_price: bound(&self.min_price, "minPrice")?,
            max_price: bound(&self.max_price, "maxPrice")?,
            amenities: self.amenity_list(),
            sort_field: self.sort_field().to_string(),
            sort_direction: self.sort_direction(),
        })
    }

    /// Sort field after applying the allowlist
    pub fn sort_field(&self) -> &str {
        self.sort_by
            .as_deref()
            .filter(|field| Self::SORT_FIELDS.contains(field))
            .unwrap_or(Self::DEFAULT_SORT)
    }

    pub fn sort_direction(&self) -> i32 {
        if self.order.as_deref() == Some("desc") {
            -1
        } else {
            1
        }
    }

    /// Trimmed, non-empty amenity names
    pub fn amenity_list(&self) -> Vec<String> {
        self.amenities
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Parsed room search handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCriteria {
    pub room_type: Option<String>,
    pub is_available: Option<bool>,
    pub min_capacity: Option<f64>,
    pub max_capacity: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub amenities: Vec<String>,
    pub sort_field: String,
    pub sort_direction: i32,
}

impl Default for RoomCriteria {
    fn default() -> Self {
        Self {
            room_type: None,
            is_available: None,
            min_capacity: None,
            max_capacity: None,
            min_price: None,
            max_price: None,
            amenities: Vec::new(),
            sort_field: RoomSearch::DEFAULT_SORT.to_string(),
            sort_direction: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomSearchResult {
    pub count: usize,
    pub results: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomDeleted {
    pub message: String,
    pub room: Room,
}
