use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{ApiError, is_unique_violation},
    model::attendance::{AttendanceRecord, AttendanceStatus},
    utils::validate::required_field,
};

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceFilter {
    /// Exact match on employee id
    pub employee_id: Option<String>,
    /// Exact match on calendar date
    #[serde(default, deserialize_with = "blank_date_as_none")]
    #[param(example = "2026-01-05", value_type = String, format = "date")]
    pub date: Option<NaiveDate>,
}

/// Browsers submit untouched filter inputs as `?date=`; blank means
/// absent, anything else must parse as a date.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = 18)]
    pub present_count: i64,
    #[schema(example = 2)]
    pub absent_count: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    Str(&'a str),
    Date(NaiveDate),
}

/// NotFound guard shared by the write and summary paths. The reference
/// stays soft: rows created here outlive a later employee delete.
async fn ensure_employee_exists(pool: &SqlitePool, employee_id: &str) -> Result<(), ApiError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ?)",
    )
    .bind(employee_id)
    .fetch_one(pool)
    .await?;

    if !exists {
        return Err(ApiError::NotFound(format!(
            "Employee {employee_id} not found"
        )));
    }
    Ok(())
}

// -------------------- Handlers --------------------

/// List Attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Matching attendance records, newest date first", body = [AttendanceRecord]),
        (status = 400, description = "Malformed filter value")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceFilter>,
) -> Result<HttpResponse, ApiError> {
    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<FilterValue> = Vec::new();

    let employee_filter = query
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    if let Some(employee_id) = employee_filter {
        conditions.push("employee_id = ?");
        bindings.push(FilterValue::Str(employee_id));
    }

    if let Some(date) = query.date {
        conditions.push("date = ?");
        bindings.push(FilterValue::Date(date));
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let data_sql = format!(
        "SELECT * FROM attendance {} ORDER BY date DESC, id DESC",
        where_clause
    );
    debug!(sql = %data_sql, "Fetching attendance");

    let mut data_query = sqlx::query_as::<_, AttendanceRecord>(&data_sql);
    for b in bindings {
        data_query = match b {
            FilterValue::Str(s) => data_query.bind(s),
            FilterValue::Date(d) => data_query.bind(d),
        };
    }

    let records = data_query.fetch_all(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Record Attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Unknown employee", body = Object, example = json!({
            "error": "Employee EMP999 not found"
        })),
        (status = 409, description = "Already recorded for this employee and date", body = Object, example = json!({
            "error": "Attendance for EMP001 on 2026-01-05 already exists"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = required_field("employee_id", &payload.employee_id)?;

    ensure_employee_exists(pool.get_ref(), &employee_id).await?;

    let result = sqlx::query(
        "INSERT INTO attendance (employee_id, date, status, created_at) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(&employee_id)
    .bind(payload.date)
    .bind(payload.status.as_ref())
    .bind(chrono::Utc::now())
    .execute(pool.get_ref())
    .await;

    let inserted = match result {
        Ok(res) => res,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict(format!(
                "Attendance for {employee_id} on {} already exists",
                payload.date
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let record = sqlx::query_as::<_, AttendanceRecord>("SELECT * FROM attendance WHERE id = ?")
        .bind(inserted.last_insert_rowid())
        .fetch_one(pool.get_ref())
        .await?;

    info!(%employee_id, date = %payload.date, status = payload.status.as_ref(), "attendance recorded");
    Ok(HttpResponse::Created().json(record))
}

/// Attendance Summary
///
/// Present/absent totals for one employee across all recorded days.
#[utoipa::path(
    get,
    path = "/api/attendance/summary/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Externally assigned employee id")
    ),
    responses(
        (status = 200, description = "Aggregated counts", body = AttendanceSummary),
        (status = 404, description = "Unknown employee", body = Object, example = json!({
            "error": "Employee EMP999 not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    ensure_employee_exists(pool.get_ref(), &employee_id).await?;

    let present_count =
        count_with_status(pool.get_ref(), &employee_id, AttendanceStatus::Present).await?;
    let absent_count =
        count_with_status(pool.get_ref(), &employee_id, AttendanceStatus::Absent).await?;

    Ok(HttpResponse::Ok().json(AttendanceSummary {
        employee_id,
        present_count,
        absent_count,
    }))
}

async fn count_with_status(
    pool: &SqlitePool,
    employee_id: &str,
    status: AttendanceStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND status = ?",
    )
    .bind(employee_id)
    .bind(status.as_ref())
    .fetch_one(pool)
    .await
}
