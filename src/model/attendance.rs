use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentinel stored when no client address can be derived.
pub const UNKNOWN_IP: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    #[schema(example = "0b9d7c1e-5f3a-4e2b-9c8d-7a6b5c4d3e2f")]
    pub id: String,

    /// Company name, matched by value.
    #[schema(example = "Acme")]
    pub company: String,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "jane@x.com", format = "email")]
    pub email: String,

    #[schema(example = "R1")]
    pub roll_number: String,

    #[schema(example = "CS")]
    pub branch: String,

    /// Camera capture as a data URI.
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQ")]
    pub photo: String,

    #[serde(rename = "ip_address")]
    #[schema(example = "1.2.3.4")]
    pub ip_address: String,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /attendance`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendance {
    #[schema(example = "Acme")]
    pub company: Option<String>,
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "JANE@X.COM", format = "email")]
    pub email: Option<String>,
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQ")]
    pub photo: Option<String>,
    #[schema(example = "R1")]
    pub roll_number: Option<String>,
    #[schema(example = "CS")]
    pub branch: Option<String>,
}
