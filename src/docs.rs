use crate::api::attendance::{AttendanceListResponse, CreateAttendance};
use crate::model::attendance::AttendanceRecord;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Attendance Tracker

Records a name with the server's local date and time into an append-only CSV
file and lists everything recorded so far.

- `POST /api/attendance` marks attendance for a name
- `GET /api/attendance` returns every record, oldest first

The HTML form at `/` and the dashboard at `/dashboard` use the same store.
"#,
    ),
    paths(
        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance
    ),
    components(
        schemas(
            AttendanceRecord,
            CreateAttendance,
            AttendanceListResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance APIs"),
    )
)]
pub struct ApiDoc;
