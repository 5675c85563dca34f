use anyhow::Result;
use chrono::{Duration, Local, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::model::attendance::AttendanceStatus;

const SAMPLE_EMPLOYEES: &[(&str, &str, &str, &str)] = &[
    ("EMP001", "John Doe", "john.doe@company.com", "Engineering"),
    ("EMP002", "Jane Smith", "jane.smith@company.com", "HR"),
    ("EMP003", "Mike Johnson", "mike.johnson@company.com", "Marketing"),
];

const SAMPLE_DAYS: i64 = 5;

/// Inserts a handful of employees plus their last five days of attendance
/// so a fresh install has something to show. Runs only against an empty
/// employees table.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(existing, "demo seed skipped, employees already present");
        return Ok(());
    }

    for (employee_id, full_name, email, department) in SAMPLE_EMPLOYEES {
        sqlx::query(
            "INSERT INTO employees (employee_id, full_name, email, department, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(employee_id)
        .bind(full_name)
        .bind(email)
        .bind(department)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    }

    let today = Local::now().date_naive();
    for day in 0..SAMPLE_DAYS {
        let date = today - Duration::days(day);
        for (idx, (employee_id, ..)) in SAMPLE_EMPLOYEES.iter().enumerate() {
            // Roughly one absence per employee across the window.
            let status = if (day + idx as i64) % SAMPLE_DAYS == SAMPLE_DAYS - 1 {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            };

            sqlx::query(
                "INSERT INTO attendance (employee_id, date, status, created_at) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(employee_id)
            .bind(date)
            .bind(status.as_ref())
            .bind(Utc::now())
            .execute(pool)
            .await?;
        }
    }

    info!(
        employees = SAMPLE_EMPLOYEES.len(),
        days = SAMPLE_DAYS,
        "demo data seeded"
    );
    Ok(())
}
