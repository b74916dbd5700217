//! Reports API routes

use axum::Router;
use domain_reports::{MongoReportRepository, ReportService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(ReportService::new(MongoReportRepository::new(&state.db)))
}
