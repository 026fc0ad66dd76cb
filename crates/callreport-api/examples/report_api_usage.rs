//! Example of how to mount the report handlers in an Actix-web application
//!
//! Seeds an in-memory store with sample records and serves the reports on
//! 127.0.0.1:8080. Try:
//!
//! ```text
//! curl 'http://127.0.0.1:8080/api/v1/reports/call-detail?language=English&per_page=5'
//! curl 'http://127.0.0.1:8080/api/v1/reports/summary?by_date=true&by_language=true'
//! ```

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use callreport_api::configure_reports;
use callreport_core::config::DataConfig;
use callreport_db::{sample_records, InMemoryRecordRepository};
use callreport_services::ReportService;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let today = chrono::Local::now().date_naive();
    let repo = InMemoryRecordRepository::with_records(sample_records(100, today))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let service = ReportService::new(Arc::new(repo));

    info!("Starting server on 127.0.0.1:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(DataConfig::default()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(web::scope("/api/v1").configure(configure_reports))
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
