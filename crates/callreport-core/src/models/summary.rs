//! Summary report models

use super::duration::CallDuration;
use super::record::CallDetailRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Key of the single group emitted when no dimension is selected
pub const OVERALL_GROUP: &str = "Overall";

/// Dimension a summary can be grouped by
///
/// The declaration order is the order in which groupings are concatenated
/// when several dimensions are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupDimension {
    ByDate,
    ByLanguage,
    ByTransferVdn,
    ByExitMenu,
}

impl GroupDimension {
    /// All dimensions in concatenation order
    pub const ALL: [GroupDimension; 4] = [
        Self::ByDate,
        Self::ByLanguage,
        Self::ByTransferVdn,
        Self::ByExitMenu,
    ];

    /// Grouping key of `record` under this dimension.
    ///
    /// `None` when the record lacks the optional field the dimension reads;
    /// such records belong to no group of this dimension.
    pub fn key<'a>(&self, record: &'a CallDetailRecord) -> Option<Cow<'a, str>> {
        match self {
            Self::ByDate => Some(Cow::Owned(record.date.format("%Y-%m-%d").to_string())),
            Self::ByLanguage => Some(Cow::Borrowed(record.language.as_str())),
            Self::ByTransferVdn => record.transfer_vdn.as_deref().map(Cow::Borrowed),
            Self::ByExitMenu => record.exit_menu.as_deref().map(Cow::Borrowed),
        }
    }
}

/// Statistics for one grouping bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryGroup {
    /// Grouping key (a date, language, VDN or menu option)
    pub group: String,

    pub total_calls: u64,

    /// Mean duration, rounded half-up to the second
    pub average_duration: CallDuration,

    pub answered_calls: u64,

    pub missed_calls: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_dimension_keys() {
        let record = CallDetailRecord {
            date: NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
            language: "French".to_string(),
            transfer_vdn: Some("VDN206".to_string()),
            ..Default::default()
        };

        assert_eq!(GroupDimension::ByDate.key(&record).as_deref(), Some("2024-07-05"));
        assert_eq!(GroupDimension::ByLanguage.key(&record).as_deref(), Some("French"));
        assert_eq!(GroupDimension::ByTransferVdn.key(&record).as_deref(), Some("VDN206"));
        assert_eq!(GroupDimension::ByExitMenu.key(&record), None);
    }

    #[test]
    fn test_dimension_order() {
        let mut dims = vec![
            GroupDimension::ByExitMenu,
            GroupDimension::ByDate,
            GroupDimension::ByTransferVdn,
            GroupDimension::ByLanguage,
        ];
        dims.sort();
        assert_eq!(dims, GroupDimension::ALL.to_vec());
    }

    #[test]
    fn test_summary_group_json() {
        let group = SummaryGroup {
            group: "2024-07-15".to_string(),
            total_calls: 150,
            average_duration: CallDuration::from_secs(225),
            answered_calls: 120,
            missed_calls: 30,
        };

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["totalCalls"], 150);
        assert_eq!(json["averageDuration"], "3m 45s");
        assert_eq!(json["missedCalls"], 30);
    }
}
