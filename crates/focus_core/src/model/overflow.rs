//! Overflow ledger entries.
//!
//! An overflow entry is the archived form of a task that was still unchecked
//! when its day ended. The original task is discarded from this record's
//! point of view; only its text and provenance survive.

use crate::model::task::TaskId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Missed task archived by the midnight audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowTask {
    pub id: TaskId,
    pub text: String,
    /// Display label of the source list, e.g. `College` or `General`.
    pub origin_pillar_title: String,
    /// Calendar day the task was due, serialized as `YYYY-MM-DD`.
    pub date_missed: NaiveDate,
    /// Unix epoch milliseconds of archival.
    pub created_at: i64,
}
