//! HTTP handlers for Reports API

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    QueryParams,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use chrono::Utc;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ReportResult;
use crate::models::{
    Cancellations, Income, MonthlyReport, Occupancy, ReportPeriod, ReportQuery, RoomIncome,
};
use crate::repository::ReportRepository;
use crate::service::ReportService;

#[derive(OpenApi)]
#[openapi(
    paths(monthly_report),
    components(
        schemas(MonthlyReport, ReportPeriod, Occupancy, Income, RoomIncome, Cancellations),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Reports", description = "Management reports")
    )
)]
pub struct ApiDoc;

pub fn router<R: ReportRepository + 'static>(service: ReportService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/monthly", get(monthly_report))
        .with_state(shared_service)
}

/// Occupancy, income and cancellations for a calendar month
#[utoipa::path(
    get,
    path = "/monthly",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Monthly report", body = MonthlyReport),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn monthly_report<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ReportResult<Json<MonthlyReport>> {
    let report = service.monthly_report(query, Utc::now()).await?;
    Ok(Json(report))
}
