use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance event, stored as a `Name,Date,Time` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "name": "Alice",
        "date": "2024-01-01",
        "time": "09:00:00"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = "Alice")]
    pub name: String,

    /// `YYYY-MM-DD`, local time of the write
    #[schema(example = "2024-01-01", format = "date")]
    pub date: String,

    /// `HH:MM:SS`, local time of the write
    #[schema(example = "09:00:00")]
    pub time: String,
}
