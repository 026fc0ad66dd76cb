//! Summary aggregator
//!
//! Groups call-detail records per enabled dimension and computes call
//! counts and average duration for each group. Enabled dimensions are
//! grouped independently over the full input and their groups are
//! concatenated (date groups, then language, then VDN, then exit menu);
//! dimensions are never nested into a combined key.

use callreport_core::{
    models::{CallDetailRecord, CallDuration, GroupDimension, SummaryGroup, OVERALL_GROUP},
    AppError, AppResult,
};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Running totals for one group
#[derive(Debug, Default, Clone, Copy)]
struct GroupTotals {
    calls: u64,
    duration_secs: u128,
    answered: u64,
    missed: u64,
}

impl GroupTotals {
    fn add(&mut self, record: &CallDetailRecord, duration: CallDuration) {
        self.calls += 1;
        self.duration_secs += u128::from(duration.as_secs());
        if record.is_answered() {
            self.answered += 1;
        }
        if record.is_missed() {
            self.missed += 1;
        }
    }

    fn into_group(self, group: String) -> SummaryGroup {
        SummaryGroup {
            group,
            total_calls: self.calls,
            average_duration: CallDuration::mean(self.duration_secs, self.calls),
            answered_calls: self.answered,
            missed_calls: self.missed,
        }
    }
}

/// Summarize `records` along each dimension in `dimensions`
///
/// With no dimension the result is a single [`OVERALL_GROUP`] covering the
/// whole input, emitted even when the input is empty. Within a dimension,
/// groups follow the first appearance of their key in `records`; records
/// without the dimension's key are left out of that dimension.
///
/// # Errors
///
/// Returns `AppError::MalformedDuration` naming the first record whose
/// duration text does not parse. Every record is checked, including those
/// no enabled dimension would group.
pub fn summarize(
    records: &[CallDetailRecord],
    dimensions: &BTreeSet<GroupDimension>,
) -> AppResult<Vec<SummaryGroup>> {
    let durations = parse_durations(records)?;

    if dimensions.is_empty() {
        let mut totals = GroupTotals::default();
        for (record, duration) in records.iter().zip(&durations) {
            totals.add(record, *duration);
        }
        return Ok(vec![totals.into_group(OVERALL_GROUP.to_string())]);
    }

    let mut groups = Vec::new();
    for dimension in dimensions {
        groups.extend(group_by(records, &durations, *dimension));
    }
    Ok(groups)
}

fn parse_durations(records: &[CallDetailRecord]) -> AppResult<Vec<CallDuration>> {
    records
        .iter()
        .map(|record| {
            record
                .call_duration()
                .map_err(|_| AppError::MalformedDuration {
                    record_id: record.id.clone(),
                    value: record.duration.clone(),
                })
        })
        .collect()
}

fn group_by(
    records: &[CallDetailRecord],
    durations: &[CallDuration],
    dimension: GroupDimension,
) -> Vec<SummaryGroup> {
    let mut buckets: IndexMap<String, GroupTotals> = IndexMap::new();

    for (record, duration) in records.iter().zip(durations) {
        if let Some(key) = dimension.key(record) {
            buckets
                .entry(key.into_owned())
                .or_default()
                .add(record, *duration);
        }
    }

    buckets
        .into_iter()
        .map(|(key, totals)| totals.into_group(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use callreport_core::models::CallStatus;
    use chrono::NaiveDate;

    fn record(id: &str, day: u32, duration: &str, status: CallStatus) -> CallDetailRecord {
        CallDetailRecord {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            language: "English".to_string(),
            duration: duration.to_string(),
            status,
            ..Default::default()
        }
    }

    fn dims(list: &[GroupDimension]) -> BTreeSet<GroupDimension> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_overall_when_no_dimensions() {
        let records = vec![
            record("1", 15, "2m 00s", CallStatus::Answered),
            record("2", 15, "3m 00s", CallStatus::Missed),
            record("3", 16, "4m 00s", CallStatus::Voicemail),
        ];

        let groups = summarize(&records, &BTreeSet::new()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group, "Overall");
        assert_eq!(groups[0].total_calls, 3);
        assert_eq!(groups[0].answered_calls, 1);
        assert_eq!(groups[0].missed_calls, 1);
        assert_eq!(groups[0].average_duration.to_string(), "3m 00s");
    }

    #[test]
    fn test_overall_emitted_for_empty_input() {
        let groups = summarize(&[], &BTreeSet::new()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group, "Overall");
        assert_eq!(groups[0].total_calls, 0);
        assert_eq!(groups[0].average_duration.to_string(), "0m 00s");
    }

    #[test]
    fn test_empty_input_with_dimensions() {
        let groups = summarize(&[], &dims(&GroupDimension::ALL)).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_by_date_first_seen_order() {
        let records = vec![
            record("1", 16, "1m 00s", CallStatus::Answered),
            record("2", 15, "1m 00s", CallStatus::Answered),
            record("3", 16, "1m 00s", CallStatus::Missed),
        ];

        let groups = summarize(&records, &dims(&[GroupDimension::ByDate])).unwrap();

        let keys: Vec<&str> = groups.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(keys, vec!["2024-07-16", "2024-07-15"]);
        assert_eq!(groups[0].total_calls, 2);
        assert_eq!(groups[0].answered_calls, 1);
        assert_eq!(groups[0].missed_calls, 1);
        assert_eq!(groups[1].total_calls, 1);
    }

    #[test]
    fn test_average_rounding() {
        let records = vec![
            record("1", 15, "2m 00s", CallStatus::Answered),
            record("2", 15, "3m 00s", CallStatus::Answered),
            record("3", 16, "1m 00s", CallStatus::Answered),
            record("4", 16, "1m 01s", CallStatus::Answered),
        ];

        let groups = summarize(&records, &dims(&[GroupDimension::ByDate])).unwrap();

        assert_eq!(groups[0].average_duration.to_string(), "2m 30s");
        assert_eq!(groups[1].average_duration.to_string(), "1m 01s");
    }

    #[test]
    fn test_malformed_duration_names_record() {
        let records = vec![
            record("1", 15, "2m 00s", CallStatus::Answered),
            record("2", 15, "2 minutes", CallStatus::Answered),
        ];

        let err = summarize(&records, &dims(&[GroupDimension::ByLanguage])).unwrap_err();
        match err {
            AppError::MalformedDuration { record_id, value } => {
                assert_eq!(record_id, "2");
                assert_eq!(value, "2 minutes");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_average_of_oversized_durations() {
        let records = vec![
            record("1", 15, "200000000000000000m 0s", CallStatus::Answered),
            record("2", 15, "200000000000000000m 0s", CallStatus::Missed),
        ];

        let groups = summarize(&records, &BTreeSet::new()).unwrap();

        assert_eq!(groups[0].total_calls, 2);
        assert_eq!(
            groups[0].average_duration.to_string(),
            "200000000000000000m 00s"
        );
    }

    #[test]
    fn test_malformed_duration_outside_grouped_records() {
        // Record 2 has no VDN, so ByTransferVdn would not group it, but its
        // duration is still checked.
        let mut with_vdn = record("1", 15, "2m 00s", CallStatus::Answered);
        with_vdn.transfer_vdn = Some("VDN200".to_string());
        let records = vec![with_vdn, record("2", 15, "bogus", CallStatus::Answered)];

        assert!(summarize(&records, &dims(&[GroupDimension::ByTransferVdn])).is_err());
    }
}
