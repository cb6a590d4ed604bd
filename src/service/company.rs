use super::present;
use crate::db::DocumentStore;
use crate::error::ApiError;
use crate::model::company::{Company, CreateCompany};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn DocumentStore>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new company. Duplicate names are accepted.
    pub async fn create_company(&self, input: CreateCompany) -> Result<Company, ApiError> {
        let name = present(input.name).ok_or_else(|| ApiError::validation("Missing company name"))?;
        let process_type =
            present(input.process_type).ok_or_else(|| ApiError::validation("Missing process type"))?;
        let process_date =
            present(input.process_date).ok_or_else(|| ApiError::validation("Missing process date"))?;

        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4().to_string(),
            name,
            process_type,
            process_date,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_company(&company).await?;
        info!(company_id = %company.id, name = %company.name, "Company created");

        Ok(company)
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        let companies = self.store.list_companies().await?;
        debug!(count = companies.len(), "Listed companies");
        Ok(companies)
    }
}
