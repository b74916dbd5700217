//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel API",
        version = "0.1.0",
        description = "Hotel back-office: rooms, guests, reservations, payments and reports"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::ApiDoc),
        (path = "/api/rooms", api = domain_rooms::ApiDoc),
        (path = "/api/guests", api = domain_guests::ApiDoc),
        (path = "/api/reservations", api = domain_reservations::ApiDoc),
        (path = "/api/payments", api = domain_payments::ApiDoc),
        (path = "/api/reports", api = domain_reports::ApiDoc)
    )
)]
pub struct ApiDoc;
