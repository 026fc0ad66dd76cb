//! Report DTOs

use super::common::PaginationParams;
use callreport_core::models::{GroupDimension, SummaryGroup};
use callreport_services::FilterCriteria;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Call Detail report query parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CallDetailParams {
    /// Pagination parameters
    #[serde(flatten)]
    #[validate(nested)]
    pub pagination: PaginationParams,

    /// Earliest call date, inclusive (YYYY-MM-DD)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_from: Option<NaiveDate>,

    /// Latest call date, inclusive (YYYY-MM-DD)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_to: Option<NaiveDate>,

    /// Exact language, or `all`
    #[validate(length(max = 64))]
    pub language: Option<String>,

    /// CLID substring
    #[validate(length(max = 64))]
    pub clid: Option<String>,

    /// NSSF number substring
    #[validate(length(max = 64))]
    pub nssf_number: Option<String>,

    /// NSSF mobile substring
    #[validate(length(max = 64))]
    pub nssf_mobile: Option<String>,
}

impl CallDetailParams {
    /// Filter criteria carried by this query
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            date_from: self.date_from,
            date_to: self.date_to,
            language: self.language.clone(),
            clid: self.clid.clone(),
            nssf_number: self.nssf_number.clone(),
            nssf_mobile: self.nssf_mobile.clone(),
        }
    }
}

/// Summary report query parameters
///
/// Each flag enables one grouping dimension. Date grouping is on unless
/// explicitly turned off; with every flag off the report is a single
/// `Overall` group.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryParams {
    /// Group by call date
    #[serde(default = "default_true")]
    pub by_date: bool,

    /// Group by language
    #[serde(default)]
    pub by_language: bool,

    /// Group by transfer VDN
    #[serde(default)]
    pub by_transfer_vdn: bool,

    /// Group by IVR exit menu
    #[serde(default)]
    pub by_exit_menu: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            by_date: true,
            by_language: false,
            by_transfer_vdn: false,
            by_exit_menu: false,
        }
    }
}

impl SummaryParams {
    /// Enabled grouping dimensions
    pub fn dimensions(&self) -> BTreeSet<GroupDimension> {
        [
            (self.by_date, GroupDimension::ByDate),
            (self.by_language, GroupDimension::ByLanguage),
            (self.by_transfer_vdn, GroupDimension::ByTransferVdn),
            (self.by_exit_menu, GroupDimension::ByExitMenu),
        ]
        .into_iter()
        .filter_map(|(enabled, dimension)| enabled.then_some(dimension))
        .collect()
    }
}

/// Summary report response
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Dimensions the groups were computed for, in output order
    pub dimensions: Vec<GroupDimension>,

    /// Groups of every dimension, concatenated
    pub groups: Vec<SummaryGroup>,
}

// Custom deserializer for optional calendar dates
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) => {
            if s.is_empty() {
                return Ok(None);
            }

            if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                return Ok(Some(date));
            }

            // Accept a full timestamp and keep its calendar date
            if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                return Ok(Some(dt.date_naive()));
            }

            Err(Error::custom(format!(
                "Invalid date format: {s}. Expected YYYY-MM-DD or ISO 8601"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_params_default_to_date() {
        let params: SummaryParams = serde_json::from_str("{}").unwrap();
        assert_eq!(
            params.dimensions().into_iter().collect::<Vec<_>>(),
            vec![GroupDimension::ByDate]
        );
    }

    #[test]
    fn test_summary_params_all_off_is_empty() {
        let params = SummaryParams {
            by_date: false,
            ..Default::default()
        };
        assert!(params.dimensions().is_empty());
    }

    #[test]
    fn test_summary_params_order_is_canonical() {
        let params = SummaryParams {
            by_date: true,
            by_language: true,
            by_transfer_vdn: false,
            by_exit_menu: true,
        };
        assert_eq!(
            params.dimensions().into_iter().collect::<Vec<_>>(),
            vec![
                GroupDimension::ByDate,
                GroupDimension::ByLanguage,
                GroupDimension::ByExitMenu
            ]
        );
    }

    #[test]
    fn test_call_detail_params_dates() {
        let params: CallDetailParams = serde_json::from_str(
            r#"{"date_from": "2024-07-15", "date_to": "2024-07-16T23:59:59Z", "language": "English"}"#,
        )
        .unwrap();

        assert_eq!(params.date_from, NaiveDate::from_ymd_opt(2024, 7, 15));
        assert_eq!(params.date_to, NaiveDate::from_ymd_opt(2024, 7, 16));

        let criteria = params.criteria();
        assert_eq!(criteria.language.as_deref(), Some("English"));
        assert!(criteria.clid.is_none());
    }

    #[test]
    fn test_call_detail_params_empty_date() {
        let params: CallDetailParams = serde_json::from_str(r#"{"date_from": ""}"#).unwrap();
        assert!(params.date_from.is_none());
        assert!(params.criteria().is_empty());
    }

    #[test]
    fn test_call_detail_params_rejects_bad_date() {
        let result = serde_json::from_str::<CallDetailParams>(r#"{"date_from": "15/07/2024"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_call_detail_params_validation() {
        let params = CallDetailParams {
            pagination: PaginationParams::default(),
            date_from: None,
            date_to: None,
            language: None,
            clid: Some("C".repeat(65)),
            nssf_number: None,
            nssf_mobile: None,
        };
        assert!(params.validate().is_err());

        let params = CallDetailParams {
            clid: Some("CLID10".to_string()),
            ..params
        };
        assert!(params.validate().is_ok());
    }
}
