use super::{DocumentStore, StoreError};
use crate::model::{attendance::AttendanceRecord, company::Company};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, OnceCell};
use tracing::info;

/// In-process store selected by a `memory:` connection string.
/// Data lives as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    companies: Mutex<Vec<Company>>,
    attendance: Mutex<Vec<AttendanceRecord>>,
    connected: OnceCell<()>,
    pub connect_calls: AtomicUsize,
    pub connections_opened: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Makes every operation fail as if the database went away.
    #[cfg(test)]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    async fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked unavailable".into()));
        }
        self.connected
            .get_or_init(|| async {
                self.connections_opened.fetch_add(1, Ordering::SeqCst);
                info!("Memory store ready");
            })
            .await;
        Ok(())
    }
}

/// Newest first; later inserts win ties since the sort is stable.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn connect(&self) -> Result<(), StoreError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_connected().await
    }

    async fn insert_company(&self, company: &Company) -> Result<(), StoreError> {
        self.ensure_connected().await?;
        self.companies.lock().await.push(company.clone());
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        self.ensure_connected().await?;
        let companies = self.companies.lock().await;
        Ok(newest_first(&companies, |c| c.created_at))
    }

    async fn company_exists(&self, name: &str) -> Result<bool, StoreError> {
        self.ensure_connected().await?;
        Ok(self.companies.lock().await.iter().any(|c| c.name == name))
    }

    async fn insert_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        self.ensure_connected().await?;
        self.attendance.lock().await.push(record.clone());
        Ok(())
    }

    async fn list_attendance(&self, company: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.ensure_connected().await?;
        let attendance = self.attendance.lock().await;
        let matching: Vec<AttendanceRecord> = attendance
            .iter()
            .filter(|r| r.company == company)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |r| r.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn company(name: &str, offset_secs: i64) -> Company {
        let at = Utc::now() + Duration::seconds(offset_secs);
        Company {
            id: format!("id-{name}"),
            name: name.to_string(),
            process_type: "Interview- HR".to_string(),
            process_date: "2024-01-01".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[actix_web::test]
    async fn connect_twice_opens_one_connection() {
        let store = MemoryStore::default();
        store.connect().await.unwrap();
        store.connect().await.unwrap();
        assert_eq!(store.connect_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.connections_opened.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn operations_connect_lazily() {
        let store = MemoryStore::default();
        assert_eq!(store.connections_opened.load(Ordering::SeqCst), 0);
        assert!(store.list_companies().await.unwrap().is_empty());
        assert_eq!(store.connections_opened.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn companies_come_back_newest_first() {
        let store = MemoryStore::default();
        store.insert_company(&company("Old", -60)).await.unwrap();
        store.insert_company(&company("New", 0)).await.unwrap();
        store.insert_company(&company("Middle", -30)).await.unwrap();

        let names: Vec<String> = store
            .list_companies()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["New", "Middle", "Old"]);
    }

    #[actix_web::test]
    async fn equal_timestamps_keep_latest_insert_first() {
        let store = MemoryStore::default();
        let first = company("First", 0);
        let mut second = company("Second", 0);
        second.created_at = first.created_at;
        store.insert_company(&first).await.unwrap();
        store.insert_company(&second).await.unwrap();

        let listed = store.list_companies().await.unwrap();
        assert_eq!(listed[0].name, "Second");
        assert_eq!(listed[1].name, "First");
    }

    #[actix_web::test]
    async fn company_exists_matches_exact_name() {
        let store = MemoryStore::default();
        store.insert_company(&company("Acme", 0)).await.unwrap();
        assert!(store.company_exists("Acme").await.unwrap());
        assert!(!store.company_exists("acme").await.unwrap());
    }

    #[actix_web::test]
    async fn unavailable_store_fails_every_operation() {
        let store = MemoryStore::default();
        store.set_unavailable(true);
        assert!(matches!(
            store.connect().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.list_attendance("Acme").await.is_err());

        store.set_unavailable(false);
        assert!(store.list_attendance("Acme").await.unwrap().is_empty());
    }
}
