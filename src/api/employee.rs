use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, is_unique_violation},
    model::employee::Employee,
    utils::validate::{required_field, validate_email},
};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

// -------------------- Handlers --------------------

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id DESC")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing or malformed field", body = Object, example = json!({
            "error": "not-an-email is not a valid email address"
        })),
        (status = 409, description = "Duplicate employee_id", body = Object, example = json!({
            "error": "Employee EMP001 already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = required_field("employee_id", &payload.employee_id)?;
    let full_name = required_field("full_name", &payload.full_name)?;
    let email = validate_email(&payload.email)?;
    let department = required_field("department", &payload.department)?;

    let result = sqlx::query(
        "INSERT INTO employees (employee_id, full_name, email, department, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&employee_id)
    .bind(&full_name)
    .bind(&email)
    .bind(&department)
    .bind(chrono::Utc::now())
    .execute(pool.get_ref())
    .await;

    let inserted = match result {
        Ok(res) => res,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict(format!(
                "Employee {employee_id} already exists"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(inserted.last_insert_rowid())
        .fetch_one(pool.get_ref())
        .await?;

    info!(%employee_id, "employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// Get Employee by employee_id
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Externally assigned employee id")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = ?")
        .bind(&employee_id)
        .fetch_optional(pool.get_ref())
        .await?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::NotFound("Employee not found".to_string())),
    }
}

/// Delete Employee
///
/// Attendance rows referencing the employee are left in place.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Externally assigned employee id")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(&employee_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    info!(%employee_id, "employee deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::api::testing::api_app;
    use crate::db::test_pool;

    fn john(employee_id: &str) -> Value {
        json!({
            "employee_id": employee_id,
            "full_name": "John Doe",
            "email": "john.doe@company.com",
            "department": "Engineering"
        })
    }

    #[actix_web::test]
    async fn create_returns_the_stored_employee() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(john("EMP001"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["employee_id"], "EMP001");
        assert_eq!(body["full_name"], "John Doe");
        assert_eq!(body["email"], "john.doe@company.com");
        assert_eq!(body["department"], "Engineering");
        assert!(body["id"].is_i64());
        assert!(body["created_at"].is_string());
    }

    #[actix_web::test]
    async fn duplicate_employee_id_conflicts_and_keeps_the_original() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(john("EMP001"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(json!({
                    "employee_id": "EMP001",
                    "full_name": "Jane Smith",
                    "email": "jane.smith@company.com",
                    "department": "HR"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("EMP001"));

        // The stored row is untouched by the rejected write.
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/employees/EMP001")
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["full_name"], "John Doe");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[actix_web::test]
    async fn invalid_email_is_rejected() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(json!({
                    "employee_id": "EMP001",
                    "full_name": "John Doe",
                    "email": "not-an-email",
                    "department": "Engineering"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not-an-email is not a valid email address");
    }

    #[actix_web::test]
    async fn blank_required_field_is_rejected() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(json!({
                    "employee_id": "EMP001",
                    "full_name": "   ",
                    "email": "john.doe@company.com",
                    "department": "Engineering"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "full_name is required");
    }

    #[actix_web::test]
    async fn malformed_json_gets_a_json_error_body() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn get_finds_by_employee_id_or_reports_not_found() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(john("EMP001"))
                .to_request(),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/employees/EMP001")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["employee_id"], "EMP001");

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/employees/EMP999")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Employee not found");
    }

    #[actix_web::test]
    async fn list_returns_every_employee_and_tolerates_trailing_slash() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        for (id, email) in [("EMP001", "a@company.com"), ("EMP002", "b@company.com")] {
            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/employees")
                    .set_json(json!({
                        "employee_id": id,
                        "full_name": "Someone",
                        "email": email,
                        "department": "Engineering"
                    }))
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/employees/").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let list = body.as_array().expect("array body");
        assert_eq!(list.len(), 2);
        // Newest first.
        assert_eq!(list[0]["employee_id"], "EMP002");
        assert_eq!(list[1]["employee_id"], "EMP001");
    }

    #[actix_web::test]
    async fn delete_removes_the_employee_but_not_their_attendance() {
        let pool = test_pool().await;
        let app = test::init_service(api_app(pool.clone())).await;

        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/employees")
                .set_json(john("EMP001"))
                .to_request(),
        )
        .await;

        sqlx::query(
            "INSERT INTO attendance (employee_id, date, status, created_at) \
             VALUES ('EMP001', '2026-01-05', 'Present', ?)",
        )
        .bind(chrono::Utc::now())
        .execute(&pool)
        .await
        .unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/employees/EMP001")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/employees/EMP001")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // No cascade: the attendance row outlives its employee.
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphans, 1);

        // Deleting again reports the absence.
        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/employees/EMP001")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
