//! Record filter
//!
//! Selects the call-detail records matching a set of optional predicates.
//! Every supplied predicate must hold (logical AND) and the output keeps the
//! input order, so the filter is stable and idempotent.

use callreport_core::models::CallDetailRecord;
use chrono::NaiveDate;

/// Language value meaning "no language constraint"
pub const ANY_LANGUAGE: &str = "all";

/// Filter predicates for the Call Detail report
///
/// Every field is optional; `None` and the empty string both mean "no
/// constraint". Dates are inclusive bounds and are taken as given: a
/// `date_from` later than `date_to` is legal and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Exact, case-sensitive match; [`ANY_LANGUAGE`] disables it
    pub language: Option<String>,
    /// Case-sensitive substring of `clid`
    pub clid: Option<String>,
    /// Case-sensitive substring of `nssf_number`
    pub nssf_number: Option<String>,
    /// Case-sensitive substring of `nssf_mobile`
    pub nssf_mobile: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn clid(mut self, clid: impl Into<String>) -> Self {
        self.clid = Some(clid.into());
        self
    }

    pub fn nssf_number(mut self, nssf_number: impl Into<String>) -> Self {
        self.nssf_number = Some(nssf_number.into());
        self
    }

    pub fn nssf_mobile(mut self, nssf_mobile: impl Into<String>) -> Self {
        self.nssf_mobile = Some(nssf_mobile.into());
        self
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.language_constraint().is_none()
            && active(&self.clid).is_none()
            && active(&self.nssf_number).is_none()
            && active(&self.nssf_mobile).is_none()
    }

    /// Whether `record` satisfies every active predicate
    pub fn matches(&self, record: &CallDetailRecord) -> bool {
        if self.date_from.is_some_and(|from| record.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| record.date > to) {
            return false;
        }
        if self
            .language_constraint()
            .is_some_and(|language| record.language != language)
        {
            return false;
        }

        contains(&record.clid, &self.clid)
            && contains(&record.nssf_number, &self.nssf_number)
            && contains(&record.nssf_mobile, &self.nssf_mobile)
    }

    fn language_constraint(&self) -> Option<&str> {
        active(&self.language).filter(|language| *language != ANY_LANGUAGE)
    }
}

/// Treat an empty string like an absent one
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains(field: &str, needle: &Option<String>) -> bool {
    active(needle).map_or(true, |needle| field.contains(needle))
}

/// Return the records matching `criteria`, in their original order
pub fn filter_records(
    records: &[CallDetailRecord],
    criteria: &FilterCriteria,
) -> Vec<CallDetailRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
