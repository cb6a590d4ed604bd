use super::present;
use crate::db::DocumentStore;
use crate::error::ApiError;
use crate::model::attendance::{AttendanceRecord, CreateAttendance};
use crate::utils::client_ip::ClientIp;
use crate::utils::export::{CsvExporter, RosterExporter, export_file_name};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn DocumentStore>,
    exporter: Arc<dyn RosterExporter>,
    require_known_company: bool,
}

/// A rendered roster ready to be served as a download.
#[derive(Debug)]
pub struct RosterExport {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
    pub rows: usize,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn DocumentStore>, require_known_company: bool) -> Self {
        Self {
            store,
            exporter: Arc::new(CsvExporter),
            require_known_company,
        }
    }

    #[cfg(test)]
    pub fn with_exporter(mut self, exporter: Arc<dyn RosterExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    /// Stores one submission. The same person may submit any number of times.
    pub async fn create_attendance(
        &self,
        input: CreateAttendance,
        client_ip: ClientIp,
    ) -> Result<AttendanceRecord, ApiError> {
        let company = present(input.company);
        let name = present(input.name);
        let email = present(input.email);
        let photo = present(input.photo);
        let roll_number = present(input.roll_number);
        let branch = present(input.branch);

        let missing: Vec<&str> = [
            ("company", company.is_none()),
            ("name", name.is_none()),
            ("email", email.is_none()),
            ("photo", photo.is_none()),
            ("rollNumber", roll_number.is_none()),
            ("branch", branch.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (
            Some(company),
            Some(name),
            Some(email),
            Some(photo),
            Some(roll_number),
            Some(branch),
        ) = (company, name, email, photo, roll_number, branch)
        else {
            return Err(ApiError::validation(format!(
                "Missing fields: {}",
                missing.join(", ")
            )));
        };

        if self.require_known_company && !self.store.company_exists(&company).await? {
            warn!(company = %company, "Submission for unknown company rejected");
            return Err(ApiError::validation(format!("Unknown company: {company}")));
        }

        let now = Utc::now();
        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            company,
            name,
            email: email.to_lowercase(),
            roll_number,
            branch,
            photo,
            ip_address: client_ip.into_inner(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert_attendance(&record).await?;
        info!(
            record_id = %record.id,
            company = %record.company,
            ip = %record.ip_address,
            "Attendance recorded"
        );

        Ok(record)
    }

    pub async fn list_attendance(
        &self,
        company: Option<String>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let company = present(company).ok_or_else(|| ApiError::validation("Missing company"))?;
        let records = self.store.list_attendance(&company).await?;
        debug!(company = %company, count = records.len(), "Listed attendance");
        Ok(records)
    }

    pub async fn export_attendance(&self, company: Option<String>) -> Result<RosterExport, ApiError> {
        let company = present(company).ok_or_else(|| ApiError::validation("Missing company"))?;
        let records = self.store.list_attendance(&company).await?;
        let body = self.exporter.render(&records)?;

        Ok(RosterExport {
            body,
            content_type: self.exporter.content_type(),
            file_name: export_file_name(&company, self.exporter.file_extension()),
            rows: records.len(),
        })
    }
}
