//! Deterministic sample dataset
//!
//! Seeds the in-memory store with records shaped like the dashboard's demo
//! data: three calls per day going back from `today`, languages cycling
//! English/Swahili/French, and the optional agent, VDN and exit-menu fields
//! populated on a fixed stride.

use callreport_core::models::{CallDetailRecord, CallStatus, CallType};
use chrono::{Days, NaiveDate, NaiveTime};

const LANGUAGES: [&str; 3] = ["English", "Swahili", "French"];

/// Build `count` sample records, newest date first
pub fn sample_records(count: usize, today: NaiveDate) -> Vec<CallDetailRecord> {
    (0..count).map(|i| sample_record(i, today)).collect()
}

fn sample_record(i: usize, today: NaiveDate) -> CallDetailRecord {
    let n = i as u64;

    let date = today
        .checked_sub_days(Days::new(n / 3))
        .unwrap_or(today);
    let hour = 10 + (n / 2) % 12;
    let minute = (n * 15) % 60;
    let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, 0).unwrap_or_default();

    let status = match i % 4 {
        0 => CallStatus::Answered,
        1 => CallStatus::Missed,
        _ => CallStatus::Voicemail,
    };

    CallDetailRecord {
        id: (i + 1).to_string(),
        date,
        time,
        language: LANGUAGES[i % 3].to_string(),
        clid: format!("CLID{}", 1000 + i),
        nssf_number: format!("NSSF{}", 500 + i),
        nssf_mobile: format!("07{:08}", (n * 7_919_153 + 12_345_678) % 100_000_000),
        duration: format!("{}m {}s", (n * 7) % 10 + 1, (n * 37) % 60),
        call_type: if i % 2 == 0 {
            CallType::Inbound
        } else {
            CallType::Outbound
        },
        status,
        agent_name: (i % 5 == 0).then(|| format!("Agent {}", char::from(b'A' + (i % 10) as u8))),
        transfer_vdn: (i % 6 == 0).then(|| format!("VDN{}", 200 + i)),
        exit_menu: (i % 7 == 0).then(|| format!("Option {}", i % 3 + 1)),
    }
}
