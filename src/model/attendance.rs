use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use utoipa::ToSchema;

/// One attendance entry per employee per calendar day. `status` holds the
/// canonical string form of [`AttendanceStatus`].
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP001",
        "date": "2026-01-05",
        "status": "Present",
        "created_at": "2026-01-05T09:00:00Z"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i64,

    /// Soft reference: rows survive deletion of the employee they point at.
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: String,

    #[schema(
        example = "2026-01-05T09:00:00Z",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: DateTime<Utc>,
}

/// Serde rejects anything outside these two variants, so a request body
/// carrying e.g. "Late" never reaches a handler.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}
