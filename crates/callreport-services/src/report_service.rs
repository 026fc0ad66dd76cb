//! Report service
//!
//! Loads records from the configured repository and runs the record filter
//! or the summary aggregator over them. Every call recomputes from a fresh
//! load; nothing is cached between reports.

use crate::filter::{filter_records, FilterCriteria};
use crate::summary::summarize;
use callreport_core::{
    models::{CallDetailRecord, GroupDimension, SummaryGroup},
    traits::CallRecordRepository,
    AppError, AppResult,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Report service over a call-record repository
#[derive(Clone)]
pub struct ReportService {
    records: Arc<dyn CallRecordRepository>,
}

impl ReportService {
    /// Create a new report service
    pub fn new(records: Arc<dyn CallRecordRepository>) -> Self {
        Self { records }
    }

    /// Call Detail report: records matching `criteria`, in stored order
    #[instrument(skip(self))]
    pub async fn call_detail(&self, criteria: &FilterCriteria) -> AppResult<Vec<CallDetailRecord>> {
        let records = self.records.find_all().await?;
        let total = records.len();

        let filtered = filter_records(&records, criteria);

        info!("Call detail report matched {} of {} records", filtered.len(), total);
        Ok(filtered)
    }

    /// The unfiltered first page shown before any criteria are submitted
    #[instrument(skip(self))]
    pub async fn initial_view(&self, limit: usize) -> AppResult<Vec<CallDetailRecord>> {
        self.records.find_first(limit).await
    }

    /// Number of records in the store
    pub async fn record_count(&self) -> AppResult<usize> {
        self.records.count().await
    }

    /// Single record lookup
    #[instrument(skip(self))]
    pub async fn record(&self, id: &str) -> AppResult<CallDetailRecord> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound(format!("Record with id {} not found", id)))
    }

    /// Summary report grouped by `dimensions`
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        dimensions: &BTreeSet<GroupDimension>,
    ) -> AppResult<Vec<SummaryGroup>> {
        let records = self.records.find_all().await?;
        debug!("Summarizing {} records", records.len());

        let groups = summarize(&records, dimensions).map_err(|e| {
            warn!("Summary aborted: {}", e);
            e
        })?;

        info!("Summary report produced {} groups", groups.len());
        Ok(groups)
    }

    /// Distinct language labels for the language selector
    pub async fn languages(&self) -> AppResult<Vec<String>> {
        self.records.languages().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callreport_db::{sample_records, InMemoryRecordRepository};
    use chrono::NaiveDate;

    fn service(records: Vec<CallDetailRecord>) -> ReportService {
        let repo = InMemoryRecordRepository::with_records(records).unwrap();
        ReportService::new(Arc::new(repo))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 16).unwrap()
    }

    #[tokio::test]
    async fn test_call_detail_filters_store() {
        let svc = service(sample_records(25, today()));

        let english = svc
            .call_detail(&FilterCriteria::new().language("English"))
            .await
            .unwrap();

        // ids 1, 4, 7, ... 25
        assert_eq!(english.len(), 9);
        assert!(english.iter().all(|r| r.language == "English"));
    }

    #[tokio::test]
    async fn test_initial_view_limit() {
        let svc = service(sample_records(25, today()));
        let view = svc.initial_view(10).await.unwrap();

        assert_eq!(view.len(), 10);
        assert_eq!(view[0].id, "1");
        assert_eq!(view[9].id, "10");
        assert_eq!(svc.record_count().await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_record_not_found() {
        let svc = service(sample_records(3, today()));

        assert_eq!(svc.record("2").await.unwrap().id, "2");
        assert!(matches!(
            svc.record("99").await.unwrap_err(),
            AppError::RecordNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_summary_by_date_over_sample() {
        let svc = service(sample_records(25, today()));
        let dims: BTreeSet<_> = [GroupDimension::ByDate].into_iter().collect();

        let groups = svc.summary(&dims).await.unwrap();

        // three calls per day over 25 records -> 9 days, last day has one
        assert_eq!(groups.len(), 9);
        assert_eq!(groups[0].group, "2024-07-16");
        assert_eq!(groups[8].total_calls, 1);
        assert_eq!(groups.iter().map(|g| g.total_calls).sum::<u64>(), 25);
    }

    #[tokio::test]
    async fn test_languages() {
        let svc = service(sample_records(25, today()));
        assert_eq!(
            svc.languages().await.unwrap(),
            vec!["English", "Swahili", "French"]
        );
    }
}
