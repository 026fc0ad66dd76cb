//! Call-detail record model
//!
//! One logged call-center call, as shown in the Call Detail report.

use super::duration::{CallDuration, DurationParseError};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Call direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallType {
    #[default]
    Inbound,
    Outbound,
    Internal,
}

/// Call outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallStatus {
    #[default]
    Answered,
    Missed,
    Voicemail,
}

/// Call-detail record
///
/// Records are never mutated once built; filtering and aggregation only
/// read them. `duration` keeps the `"<m>m <s>s"` text as stored upstream and
/// is parsed on demand by [`CallDetailRecord::call_duration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDetailRecord {
    /// Unique identifier within a collection
    pub id: String,

    /// Calendar date of the call
    pub date: NaiveDate,

    /// Time of day, second precision
    pub time: NaiveTime,

    /// Language label (English, Swahili, French, ...)
    pub language: String,

    /// Calling line identification
    pub clid: String,

    /// NSSF account number of the caller
    pub nssf_number: String,

    /// NSSF mobile number of the caller
    pub nssf_mobile: String,

    /// Elapsed time, e.g. `"3m 45s"`
    pub duration: String,

    pub call_type: CallType,

    pub status: CallStatus,

    /// Agent that took the call, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,

    /// Vector directory number the call was transferred to
    #[serde(rename = "transferVDN", default, skip_serializing_if = "Option::is_none")]
    pub transfer_vdn: Option<String>,

    /// IVR menu option selected before leaving the menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_menu: Option<String>,
}

impl CallDetailRecord {
    /// Parse the stored duration text
    pub fn call_duration(&self) -> Result<CallDuration, DurationParseError> {
        self.duration.parse()
    }

    #[inline]
    pub fn is_answered(&self) -> bool {
        self.status == CallStatus::Answered
    }

    #[inline]
    pub fn is_missed(&self) -> bool {
        self.status == CallStatus::Missed
    }
}
