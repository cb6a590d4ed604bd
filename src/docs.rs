use crate::model::attendance::{AttendanceRecord, CreateAttendance};
use crate::model::company::{Company, CreateCompany};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Hub API",
        version = "0.1.0",
        description = r#"
## Recruitment Attendance Collection

Organizers create a **company** for each recruitment-process event and share its
page. Attendees submit their details and a camera photo against that company.

### Key Features
- **Companies**: create and list recruitment events, newest first
- **Attendance**: submit proof of presence, list a company's roster
- **Export**: download a company's roster as CSV

### Response Format
- JSON bodies; errors are `{"error": "<message>"}`
- Submissions are rate limited per client address
"#,
    ),
    paths(
        crate::api::company::list_companies,
        crate::api::company::create_company,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::export_attendance,

        crate::api::health::health
    ),
    components(
        schemas(
            Company,
            CreateCompany,
            AttendanceRecord,
            CreateAttendance
        )
    ),
    tags(
        (name = "Company", description = "Recruitment event APIs"),
        (name = "Attendance", description = "Attendance submission and roster APIs"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the document with resource paths mounted under `api_prefix`.
/// `/health` is served outside the prefix and is left as is.
pub fn openapi(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let prefix = api_prefix.trim_end_matches('/');
    let mut doc = ApiDoc::openapi();
    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| {
            if path == "/health" {
                (path, item)
            } else {
                (format!("{prefix}{path}"), item)
            }
        })
        .collect();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_keys(doc: &utoipa::openapi::OpenApi) -> Vec<String> {
        doc.paths.paths.keys().cloned().collect()
    }

    #[test]
    fn openapi_lists_every_endpoint() {
        let paths = path_keys(&openapi("/api"));
        for expected in [
            "/api/companies",
            "/api/attendance",
            "/api/attendance/export",
            "/health",
        ] {
            assert!(
                paths.iter().any(|p| p == expected),
                "missing {expected} in {paths:?}"
            );
        }
    }

    #[test]
    fn openapi_follows_configured_prefix() {
        let paths = path_keys(&openapi("/v2/"));
        assert!(paths.contains(&"/v2/companies".to_string()), "{paths:?}");
        assert!(paths.contains(&"/v2/attendance/export".to_string()), "{paths:?}");
        assert!(paths.contains(&"/health".to_string()), "{paths:?}");
        assert!(!paths.iter().any(|p| p.starts_with("/api")), "{paths:?}");
    }

    #[test]
    fn openapi_with_empty_prefix_serves_from_root() {
        let paths = path_keys(&openapi(""));
        assert!(paths.contains(&"/companies".to_string()), "{paths:?}");
        assert!(paths.contains(&"/attendance".to_string()), "{paths:?}");
    }
}
