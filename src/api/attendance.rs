use crate::error::ApiError;
use crate::model::attendance::CreateAttendance;
use crate::service::AttendanceService;
use crate::utils::client_ip::ClientIp;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Exact company name.
    pub company: Option<String>,
}

/// Submit attendance
///
/// The submitter's address is taken from `X-Forwarded-For` (first hop),
/// then `X-Real-IP`, else stored as `unknown`.
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = crate::model::attendance::AttendanceRecord),
        (status = 400, description = "Missing required fields", body = Object, example = json!({
            "error": "Missing fields: photo"
        })),
        (status = 429, description = "Too many submissions from this address"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    service: web::Data<AttendanceService>,
    client_ip: ClientIp,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let record = service
        .create_attendance(payload.into_inner(), client_ip)
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// List a company's attendance, newest first
#[utoipa::path(
    get,
    path = "/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Roster for the company", body = [crate::model::attendance::AttendanceRecord]),
        (status = 400, description = "Missing company", body = Object, example = json!({
            "error": "Missing company"
        })),
        (status = 500, description = "Storage failure")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = service
        .list_attendance(query.into_inner().company)
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Download a company's roster
#[utoipa::path(
    get,
    path = "/attendance/export",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Roster as CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Missing company"),
        (status = 500, description = "Storage or export failure")
    ),
    tag = "Attendance"
)]
pub async fn export_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let export = service
        .export_attendance(query.into_inner().company)
        .await?;

    tracing::debug!(file = %export.file_name, rows = export.rows, "Roster exported");

    Ok(HttpResponse::Ok()
        .content_type(export.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export.file_name)],
        })
        .body(export.body))
}
