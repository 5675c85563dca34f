use crate::api::attendance::{AttendanceSummary, CreateAttendance};
use crate::api::dashboard::DashboardStats;
use crate::api::employee::CreateEmployee;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management backend covering employee records,
daily attendance, and per-request dashboard aggregation.

### 🔹 Key Features
- **Employee Management**
  - Create, list, view, and delete employee records
- **Attendance Management**
  - One Present/Absent entry per employee per day
  - Equality filters on employee and date
  - Per-employee present/absent summaries
- **Dashboard**
  - Employee and attendance totals plus today's counts

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry `{"error": "<message>"}` with status 400, 404, 409, or 500

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::attendance_summary,

        crate::api::dashboard::dashboard_stats
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            AttendanceRecord,
            AttendanceStatus,
            CreateAttendance,
            AttendanceSummary,
            DashboardStats
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance tracking APIs"),
        (name = "Dashboard", description = "Aggregated statistics APIs"),
    )
)]
pub struct ApiDoc;
