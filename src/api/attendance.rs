use crate::model::attendance::AttendanceRecord;
use crate::store::{RecordStore, StoreError};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "Alice")]
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 1)]
    pub total: usize,
    /// `true` when the attendance file has not been created yet
    #[schema(example = false)]
    pub store_absent: bool,
}

/// List attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance records, oldest first", body = AttendanceListResponse),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(store: web::Data<RecordStore>) -> HttpResponse {
    let (data, store_absent) = match web::block(move || store.read_all()).await {
        Ok(Ok(records)) => (records, false),
        Ok(Err(StoreError::Absent { path })) => {
            warn!(path = %path.display(), "Attendance file not found when trying to read");
            (Vec::new(), true)
        }
        Ok(Err(e)) => {
            error!(error = %e, "Failed to list attendance");
            return internal_error();
        }
        Err(e) => {
            error!(error = %e, "Attendance read task failed");
            return internal_error();
        }
    };

    HttpResponse::Ok().json(AttendanceListResponse {
        total: data.len(),
        data,
        store_absent,
    })
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Empty name", body = Object, example = json!({
            "error": "Name cannot be empty!"
        })),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    store: web::Data<RecordStore>,
    payload: web::Json<CreateAttendance>,
) -> HttpResponse {
    let name = payload.into_inner().name;

    match web::block(move || store.append(&name)).await {
        Ok(Ok(record)) => HttpResponse::Created().json(record),
        Ok(Err(StoreError::EmptyName)) => HttpResponse::BadRequest().json(json!({
            "error": StoreError::EmptyName.to_string()
        })),
        Ok(Err(e)) => {
            error!(error = %e, "Failed to mark attendance");
            internal_error()
        }
        Err(e) => {
            error!(error = %e, "Attendance write task failed");
            internal_error()
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "message": "Something went wrong, Contact with system admin"
    }))
}

#[cfg(test)]
mod tests {
    use super::AttendanceListResponse;
    use crate::config::Config;
    use crate::model::attendance::AttendanceRecord;
    use crate::routes;
    use crate::store::RecordStore;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web::Data};
    use serde_json::json;
    use std::fs;
    use std::net::SocketAddr;
    use tempfile::tempdir;

    fn peer() -> SocketAddr {
        "127.0.0.1:40001".parse().unwrap()
    }

    #[actix_web::test]
    async fn test_create_then_list() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("attendance.csv"));
        let app = test::init_service(
            App::new()
                .app_data(Data::new(store.clone()))
                .configure(|cfg| routes::configure(cfg, Config::default())),
        )
        .await;

        for name in ["Alice", "Bob, Jr."] {
            let req = test::TestRequest::post()
                .uri("/api/attendance")
                .peer_addr(peer())
                .set_json(json!({ "name": name }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let record: AttendanceRecord = test::read_body_json(resp).await;
            assert_eq!(record.name, name);
        }

        let req = test::TestRequest::get()
            .uri("/api/attendance")
            .peer_addr(peer())
            .to_request();
        let list: AttendanceListResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(list.total, 2);
        assert!(!list.store_absent);
        assert_eq!(list.data[0].name, "Alice");
        assert_eq!(list.data[1].name, "Bob, Jr.");
    }

    #[actix_web::test]
    async fn test_create_empty_name_is_bad_request() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("attendance.csv"));
        let app = test::init_service(
            App::new()
                .app_data(Data::new(store.clone()))
                .configure(|cfg| routes::configure(cfg, Config::default())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .peer_addr(peer())
            .set_json(json!({ "name": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(fs::metadata(store.path()).is_err());
    }

    #[actix_web::test]
    async fn test_list_without_file_reports_absent() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("attendance.csv"));
        let app = test::init_service(
            App::new()
                .app_data(Data::new(store))
                .configure(|cfg| routes::configure(cfg, Config::default())),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/attendance")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let list: AttendanceListResponse = test::read_body_json(resp).await;
        assert_eq!(list.total, 0);
        assert!(list.store_absent);
    }

    #[actix_web::test]
    async fn test_io_failure_is_internal_error() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        let app = test::init_service(
            App::new()
                .app_data(Data::new(store))
                .configure(|cfg| routes::configure(cfg, Config::default())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .peer_addr(peer())
            .set_json(json!({ "name": "Alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = test::TestRequest::get()
            .uri("/api/attendance")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
