use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "_id": "8f14e45f-ceea-467f-a9f0-6e2c1b7d4a10",
        "name": "Acme",
        "processType": "Interview- HR",
        "processDate": "2024-01-01",
        "createdAt": "2024-01-01T09:30:00Z",
        "updatedAt": "2024-01-01T09:30:00Z"
    })
)]
pub struct Company {
    #[serde(rename = "_id")]
    #[schema(example = "8f14e45f-ceea-467f-a9f0-6e2c1b7d4a10")]
    pub id: String,

    #[schema(example = "Acme")]
    pub name: String,

    #[schema(example = "Aptitude Assessment")]
    pub process_type: String,

    /// Kept as the text the organizer entered.
    #[schema(example = "2024-01-01", format = "date")]
    pub process_date: String,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /companies`. Fields are optional here so a missing one is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompany {
    #[schema(example = "Acme")]
    pub name: Option<String>,
    #[schema(example = "Interview- HR")]
    pub process_type: Option<String>,
    #[schema(example = "2024-01-01", format = "date")]
    pub process_date: Option<String>,
}
