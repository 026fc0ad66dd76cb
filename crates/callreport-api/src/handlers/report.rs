//! Report API handlers
//!
//! Handlers for the Call Detail report (filtered, paginated record list) and
//! the Summary report (grouped statistics).

use crate::dto::{ApiResponse, CallDetailParams, SummaryParams, SummaryReport};
use actix_web::{
    web::{self, Data, Json, Path, Query},
    Result,
};
use callreport_core::{
    config::DataConfig, error::AppError, models::CallDetailRecord, traits::PaginatedResponse,
};
use callreport_services::ReportService;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// List call-detail records matching the query filters
///
/// Filtering runs over the full record set; pagination is applied to the
/// filtered result and the message reports the filtered total.
///
/// # Errors
///
/// Returns 400 if validation fails, or the store's error if loading fails.
///
/// # Examples
///
/// ```text
/// GET /api/v1/reports/call-detail?date_from=2024-07-10&language=English&page=1&per_page=50
/// ```
#[instrument(skip(service, query))]
pub async fn list_call_detail(
    query: Query<CallDetailParams>,
    service: Data<ReportService>,
) -> Result<Json<PaginatedResponse<CallDetailRecord>>> {
    query.validate().map_err(|e| {
        warn!("Invalid query parameters: {}", e);
        AppError::from(e)
    })?;

    let criteria = query.criteria();
    debug!("Filtering call detail records with {:?}", criteria);

    let records = service.call_detail(&criteria).await?;
    let found = records.len();

    let mut page = query.pagination.paginate(records);
    page.message = Some(format!("Found {found} records."));

    info!(
        "Returning {} of {} matching records (page {})",
        page.data.len(),
        found,
        query.pagination.page
    );

    Ok(Json(page))
}

/// Initial unfiltered view shown before any criteria are submitted
///
/// # Errors
///
/// Returns the store's error if loading fails.
///
/// # Examples
///
/// ```text
/// GET /api/v1/reports/call-detail/initial
/// ```
#[instrument(skip(service, data_config))]
pub async fn initial_call_detail(
    service: Data<ReportService>,
    data_config: Data<DataConfig>,
) -> Result<Json<ApiResponse<Vec<CallDetailRecord>>>> {
    let records = service.initial_view(data_config.initial_view_size).await?;
    let total = service.record_count().await?;
    debug!("Initial view with {} of {} records", records.len(), total);

    let message = format!("Showing {} of {} records.", records.len(), total);
    Ok(Json(ApiResponse::with_message(records, message)))
}

/// Get a single call-detail record by ID
///
/// # Errors
///
/// Returns 404 if the record does not exist.
///
/// # Examples
///
/// ```text
/// GET /api/v1/reports/call-detail/12
/// ```
#[instrument(skip(service))]
pub async fn get_call_detail(
    path: Path<String>,
    service: Data<ReportService>,
) -> Result<Json<ApiResponse<CallDetailRecord>>> {
    let id = path.into_inner();
    let record = service.record(&id).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// Summary report grouped by the enabled dimensions
///
/// # Errors
///
/// Returns 500 `malformed_duration` if a stored record's duration cannot be
/// parsed.
///
/// # Examples
///
/// ```text
/// GET /api/v1/reports/summary?by_date=true&by_language=true
/// GET /api/v1/reports/summary?by_date=false
/// ```
#[instrument(skip(service))]
pub async fn get_summary(
    query: Query<SummaryParams>,
    service: Data<ReportService>,
) -> Result<Json<ApiResponse<SummaryReport>>> {
    let dimensions = query.dimensions();
    let groups = service.summary(&dimensions).await?;

    let message = format!("Displaying {} summary groups.", groups.len());
    let report = SummaryReport {
        dimensions: dimensions.into_iter().collect(),
        groups,
    };

    Ok(Json(ApiResponse::with_message(report, message)))
}

/// Distinct language labels present in the record store
///
/// # Errors
///
/// Returns the store's error if loading fails.
pub async fn list_languages(service: Data<ReportService>) -> Result<Json<ApiResponse<Vec<String>>>> {
    let languages = service.languages().await?;
    Ok(Json(ApiResponse::success(languages)))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/call-detail", web::get().to(list_call_detail))
            .route("/call-detail/initial", web::get().to(initial_call_detail))
            .route("/call-detail/{id}", web::get().to(get_call_detail))
            .route("/summary", web::get().to(get_summary))
            .route("/languages", web::get().to(list_languages)),
    );
}
