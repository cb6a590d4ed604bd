use crate::error::ApiError;
use crate::model::company::CreateCompany;
use crate::service::CompanyService;
use actix_web::{HttpResponse, web};

/// List companies, newest first
#[utoipa::path(
    get,
    path = "/companies",
    responses(
        (status = 200, description = "All companies, newest first", body = [crate::model::company::Company]),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "error": "Server error"
        }))
    ),
    tag = "Company"
)]
pub async fn list_companies(
    service: web::Data<CompanyService>,
) -> Result<HttpResponse, ApiError> {
    let companies = service.list_companies().await?;
    Ok(HttpResponse::Ok().json(companies))
}

/// Create company
#[utoipa::path(
    post,
    path = "/companies",
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = crate::model::company::Company),
        (status = 400, description = "Missing required field", body = Object, example = json!({
            "error": "Missing company name"
        })),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "error": "Server error"
        }))
    ),
    tag = "Company"
)]
pub async fn create_company(
    service: web::Data<CompanyService>,
    payload: web::Json<CreateCompany>,
) -> Result<HttpResponse, ApiError> {
    let company = service.create_company(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(company))
}
