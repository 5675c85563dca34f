use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use futures::try_join;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::{error::ApiError, model::attendance::AttendanceStatus};

#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    /// Server-local date the today counts were computed for.
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 12)]
    pub total_employees: i64,
    #[schema(example = 340)]
    pub total_attendance_records: i64,
    #[schema(example = 10)]
    pub present_today: i64,
    #[schema(example = 2)]
    pub absent_today: i64,
}

/// Dashboard Stats
///
/// Counts are computed per request; nothing is cached or stored.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Counts for the dashboard cards", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let today = Local::now().date_naive();
    let pool = pool.get_ref();

    let (total_employees, total_attendance_records, present_today, absent_today) = try_join!(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees").fetch_one(pool),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance").fetch_one(pool),
        count_on_date(pool, today, AttendanceStatus::Present),
        count_on_date(pool, today, AttendanceStatus::Absent),
    )?;

    Ok(HttpResponse::Ok().json(DashboardStats {
        date: today,
        total_employees,
        total_attendance_records,
        present_today,
        absent_today,
    }))
}

async fn count_on_date(
    pool: &SqlitePool,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?")
        .bind(date)
        .bind(status.as_ref())
        .fetch_one(pool)
        .await
}
