use chrono::{DateTime, Utc};
use domain_guests::{DocumentType, Guest};
use domain_reservations::{Reservation, ReservationStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{PaymentError, PaymentResult};

/// Accepted payment methods
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum PaymentMethod {
    #[serde(rename = "efectivo")]
    #[strum(serialize = "efectivo")]
    Cash,
    #[serde(rename = "tdd")]
    #[strum(serialize = "tdd")]
    DebitCard,
    #[serde(rename = "tdc")]
    #[strum(serialize = "tdc")]
    CreditCard,
}

impl PaymentMethod {
    /// Case-insensitive parse of a method name
    pub fn parse_loose(raw: &str) -> Option<Self> {
        raw.trim().to_lowercase().parse().ok()
    }
}

const METHOD_HINT: &str = "efectivo, tdd, tdc";

/// Payment entity - money received against a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub reservation_id: Uuid,
    /// Guest of the reservation at the time of payment
    #[serde(default)]
    pub guest_id: Option<Uuid>,
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub notes: String,
    /// Staff member who took the payment
    #[serde(default)]
    pub recorded_by: String,
    #[serde(with = "database::mongodb::timestamp")]
    pub paid_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(input: NewPayment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            reservation_id: input.reservation_id,
            guest_id: input.guest_id,
            amount: input.amount,
            method: input.method,
            reference: input.reference,
            notes: input.notes,
            recorded_by: input.recorded_by,
            paid_at: input.paid_at.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated payment ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub reservation_id: Uuid,
    pub guest_id: Option<Uuid>,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: String,
    pub notes: String,
    pub recorded_by: String,
    /// Defaults to the time of registration
    pub paid_at: Option<DateTime<Utc>>,
}

/// Request body for registering a payment.
///
/// Fields are loosely typed so that every malformed value gets the same
/// 400 response instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayment {
    #[schema(value_type = Option<Uuid>)]
    pub reservation_id: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Value>,
    /// `efectivo`, `tdd` or `tdc`, any case
    pub method: Option<String>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub recorded_by: Option<String>,
    /// Defaults to now
    pub paid_at: Option<String>,
}

/// The checks of a payment request that do not need the reservation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentRequest {
    pub reservation_id: Uuid,
    pub amount: f64,
    pub method: PaymentMethod,
}

impl RegisterPayment {
    pub fn request(&self) -> PaymentResult<PaymentRequest> {
        let reservation_id = match &self.reservation_id {
            None | Some(Value::Null) => {
                return Err(PaymentError::Validation(
                    "reservationId is required".to_string(),
                ));
            }
            Some(Value::String(raw)) if raw.trim().is_empty() => {
                return Err(PaymentError::Validation(
                    "reservationId is required".to_string(),
                ));
            }
            Some(value) => value
                .as_str()
                .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
                .ok_or_else(|| PaymentError::Validation("Invalid reservationId".to_string()))?,
        };

        let amount = self
            .amount
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| {
                PaymentError::Validation("Payment amount must be a number greater than zero".to_string())
            })?;

        let method = self
            .method
            .as_deref()
            .and_then(PaymentMethod::parse_loose)
            .ok_or_else(|| {
                PaymentError::Validation(format!("Payment method must be one of: {METHOD_HINT}"))
            })?;

        Ok(PaymentRequest {
            reservation_id,
            amount,
            method,
        })
    }

    /// Explicit payment date, if one was given
    pub fn paid_at(&self) -> PaymentResult<Option<DateTime<Utc>>> {
        match self.paid_at.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => database::mongodb::timestamp::parse(raw)
                .map(Some)
                .ok_or_else(|| PaymentError::Validation("Invalid payment date".to_string())),
        }
    }
}

/// Reservation fields embedded in a payment response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub room_number: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub total_price: f64,
    pub total_paid: f64,
    pub balance_due: f64,
    pub status: ReservationStatus,
    #[serde(with = "database::mongodb::timestamp")]
    pub check_in: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub check_out: DateTime<Utc>,
}

impl From<&Reservation> for ReservationSummary {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id,
            room_number: r.room_number,
            guest_name: r.guest_name.clone(),
            guest_email: r.guest_email.clone(),
            guest_phone: r.guest_phone.clone(),
            total_price: r.total_price,
            total_paid: r.total_paid,
            balance_due: r.balance_due,
            status: r.status,
            check_in: r.check_in,
            check_out: r.check_out,
        }
    }
}

/// Guest fields embedded in a payment response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub document_type: DocumentType,
    pub document_number: String,
}

impl From<&Guest> for GuestSummary {
    fn from(g: &Guest) -> Self {
        Self {
            id: g.id,
            first_name: g.first_name.clone(),
            last_name: g.last_name.clone(),
            email: g.email.clone(),
            phone: g.phone.clone(),
            document_type: g.document_type,
            document_number: g.document_number.clone(),
        }
    }
}

/// A payment with its reservation and guest resolved.
///
/// Either summary is `null` when the referenced document no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentDetails {
    #[serde(flatten)]
    pub payment: Payment,
    pub reservation: Option<ReservationSummary>,
    pub guest: Option<GuestSummary>,
}

/// Query parameters for listing payments
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaymentFilter {
    pub reservation_id: Option<String>,
    pub guest_id: Option<String>,
    /// `efectivo`, `tdd` or `tdc`
    pub method: Option<String>,
    /// Inclusive lower bound on `paidAt`
    pub start_date: Option<String>,
    /// Inclusive upper bound on `paidAt`
    pub end_date: Option<String>,
    /// Page number (default 1)
    pub page: Option<String>,
    /// Page size (default 20)
    pub limit: Option<String>,
    /// `asc` or `desc` (default) on `paidAt`
    pub order: Option<String>,
}

impl PaymentFilter {
    pub const DEFAULT_LIMIT: u64 = 20;

    pub fn criteria(&self) -> PaymentResult<PaymentCriteria> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let uuid = |value: &Option<String>, name: &str| {
            present(value)
                .map(|raw| Uuid::parse_str(&raw))
                .transpose()
                .map_err(|_| PaymentError::Validation(format!("Invalid {name}")))
        };
        let date = |value: &Option<String>, name: &str| {
            present(value)
                .map(|raw| {
                    database::mongodb::timestamp::parse(&raw)
                        .ok_or_else(|| PaymentError::Validation(format!("Invalid {name}")))
                })
                .transpose()
        };

        let method = present(&self.method)
            .map(|raw| {
                PaymentMethod::parse_loose(&raw).ok_or_else(|| {
                    PaymentError::Validation(format!("Invalid payment method. Use: {METHOD_HINT}"))
                })
            })
            .transpose()?;

        Ok(PaymentCriteria {
            reservation_id: uuid(&self.reservation_id, "reservationId")?,
            guest_id: uuid(&self.guest_id, "guestId")?,
            method,
            start: date(&self.start_date, "startDate")?,
            end: date(&self.end_date, "endDate")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentCriteria {
    pub reservation_id: Option<Uuid>,
    pub guest_id: Option<Uuid>,
    pub method: Option<PaymentMethod>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRegistered {
    pub message: String,
    pub payment: PaymentDetails,
    pub reservation: Reservation,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPage {
    pub count: usize,
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    /// Sum over every payment matching the filter
    pub total_amount: f64,
    pub results: Vec<PaymentDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayments {
    pub count: usize,
    pub total_amount: f64,
    pub results: Vec<PaymentDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> RegisterPayment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_method_wire_names() {
        assert_eq!(PaymentMethod::Cash.to_string(), "efectivo");
        assert_eq!(serde_json::to_value(PaymentMethod::CreditCard).unwrap(), "tdc");
        assert_eq!(PaymentMethod::parse_loose(" TDD "), Some(PaymentMethod::DebitCard));
        assert_eq!(PaymentMethod::parse_loose("cheque"), None);
    }

    #[test]
    fn test_request_checks_in_order() {
        let id = Uuid::now_v7();

        let missing = body(json!({ "amount": -1, "method": "x" }));
        assert!(
            matches!(missing.request(), Err(PaymentError::Validation(m)) if m == "reservationId is required")
        );

        let malformed = body(json!({ "reservationId": "abc", "amount": 10 }));
        assert!(
            matches!(malformed.request(), Err(PaymentError::Validation(m)) if m == "Invalid reservationId")
        );

        let not_number = body(json!({ "reservationId": id.to_string(), "amount": "100" }));
        assert!(
            matches!(not_number.request(), Err(PaymentError::Validation(m)) if m.starts_with("Payment amount"))
        );

        let zero = body(json!({ "reservationId": id.to_string(), "amount": 0 }));
        assert!(zero.request().is_err());

        let bad_method = body(json!({
            "reservationId": id.to_string(),
            "amount": 50,
            "method": "cheque"
        }));
        assert!(
            matches!(bad_method.request(), Err(PaymentError::Validation(m)) if m.starts_with("Payment method"))
        );

        let ok = body(json!({
            "reservationId": id.to_string(),
            "amount": 50.5,
            "method": "EFECTIVO"
        }));
        assert_eq!(
            ok.request().unwrap(),
            PaymentRequest {
                reservation_id: id,
                amount: 50.5,
                method: PaymentMethod::Cash
            }
        );
    }

    #[test]
    fn test_paid_at() {
        assert_eq!(body(json!({})).paid_at().unwrap(), None);
        assert!(body(json!({ "paidAt": "2024-05-01" }))
            .paid_at()
            .unwrap()
            .is_some());
        assert!(body(json!({ "paidAt": "ayer" })).paid_at().is_err());
    }

    #[test]
    fn test_filter_criteria() {
        let filter = PaymentFilter {
            method: Some("TDC".to_string()),
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let criteria = filter.criteria().unwrap();
        assert_eq!(criteria.method, Some(PaymentMethod::CreditCard));
        assert!(criteria.start.is_some());
        assert!(criteria.end.is_none());

        let bad = PaymentFilter {
            end_date: Some("never".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.criteria(), Err(PaymentError::Validation(m)) if m == "Invalid endDate"));

        let bad = PaymentFilter {
            method: Some("bitcoin".to_string()),
            ..Default::default()
        };
        assert!(bad.criteria().is_err());

        let bad = PaymentFilter {
            guest_id: Some("42".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.criteria(), Err(PaymentError::Validation(m)) if m == "Invalid guestId"));
    }

    #[test]
    fn test_details_flatten_payment() {
        let payment = Payment::new(NewPayment {
            reservation_id: Uuid::now_v7(),
            guest_id: None,
            amount: 200.0,
            method: PaymentMethod::Cash,
            reference: String::new(),
            notes: String::new(),
            recorded_by: "recepcion".to_string(),
            paid_at: None,
        });
        let details = PaymentDetails {
            payment,
            reservation: None,
            guest: None,
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["amount"], 200.0);
        assert_eq!(value["method"], "efectivo");
        assert_eq!(value["recordedBy"], "recepcion");
        assert!(value["reservation"].is_null());
    }
}
