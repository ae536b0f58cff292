//! In-process certificate store
//!
//! Data model:
//! - certificates: id -> Certificate, id assigned from an incrementing
//!   counter starting at 1
//! - certificate_id is unique across the map; inserts that would duplicate
//!   one are refused
//!
//! The store is an explicit value constructed once per process and handed
//! to the handlers inside `AppState`; it does not survive restarts. The
//! external spreadsheet log is the only durable record.

use std::collections::HashMap;

use certforge_common::{Certificate, NewCertificate};
use tracing::debug;

/// In-memory storage for certificate records.
#[derive(Debug, Default)]
pub struct MemStorage {
    certificates: HashMap<u64, Certificate>,
    next_id: u64,
}

impl MemStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            certificates: HashMap::new(),
            next_id: 1,
        }
    }

    /// Store a new certificate record.
    ///
    /// Returns `None` when the certificate ID is already taken; nothing is
    /// stored in that case.
    pub fn create_certificate(
        &mut self,
        details: NewCertificate,
        certificate_id: String,
    ) -> Option<Certificate> {
        if self.get_by_certificate_id(&certificate_id).is_some() {
            debug!("certificate id already taken: {certificate_id}");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;

        let certificate = Certificate::new(id, details, certificate_id);
        self.certificates.insert(id, certificate.clone());
        Some(certificate)
    }

    /// Remove a record by its numeric id, returning it if present.
    ///
    /// Used to take back an insert whose external log append failed, so
    /// the map never holds a record the durable log does not.
    pub fn remove(&mut self, id: u64) -> Option<Certificate> {
        self.certificates.remove(&id)
    }

    /// Look up a record by its numeric id.
    pub fn get_by_id(&self, id: u64) -> Option<&Certificate> {
        self.certificates.get(&id)
    }

    /// Look up a record by its certificate ID.
    pub fn get_by_certificate_id(&self, certificate_id: &str) -> Option<&Certificate> {
        self.certificates
            .values()
            .find(|c| c.certificate_id == certificate_id)
    }

    /// All stored certificates ordered by numeric id.
    pub fn all(&self) -> Vec<Certificate> {
        let mut certificates: Vec<Certificate> = self.certificates.values().cloned().collect();
        certificates.sort_by_key(|c| c.id);
        certificates
    }

    /// Number of stored certificates.
    pub fn count(&self) -> usize {
        self.certificates.len()
    }

    /// Drop every record and restart the id counter.
    pub fn reset(&mut self) {
        self.certificates.clear();
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> NewCertificate {
        NewCertificate {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            github_repo: "https://github.com/ann/proj".to_string(),
            vercel_deployment: "https://proj.vercel.app".to_string(),
            project_explanation: "This project is a full-stack web application with tests."
                .to_string(),
        }
    }

    #[test]
    fn create_and_lookup_by_both_keys() {
        let mut storage = MemStorage::new();

        let created = storage
            .create_certificate(sample_details(), "CERT-2026-AAAAAAAAA".to_string())
            .expect("first insert succeeds");

        assert_eq!(created.id, 1);

        let by_id = storage.get_by_id(1).expect("found by numeric id");
        assert_eq!(by_id.certificate_id, "CERT-2026-AAAAAAAAA");

        let by_certificate_id = storage
            .get_by_certificate_id("CERT-2026-AAAAAAAAA")
            .expect("found by certificate id");
        assert_eq!(by_certificate_id.id, 1);
        assert_eq!(by_certificate_id.name, "Ann Lee");
    }

    #[test]
    fn ids_increment_per_insert() {
        let mut storage = MemStorage::new();

        let first = storage
            .create_certificate(sample_details(), "CERT-2026-AAAAAAAAA".to_string())
            .unwrap();
        let second = storage
            .create_certificate(sample_details(), "CERT-2026-BBBBBBBBB".to_string())
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(storage.count(), 2);
    }

    #[test]
    fn duplicate_certificate_id_is_refused() {
        let mut storage = MemStorage::new();

        storage
            .create_certificate(sample_details(), "CERT-2026-AAAAAAAAA".to_string())
            .unwrap();
        let duplicate =
            storage.create_certificate(sample_details(), "CERT-2026-AAAAAAAAA".to_string());

        assert!(duplicate.is_none());
        assert_eq!(storage.count(), 1);
    }

    #[test]
    fn remove_takes_back_an_insert() {
        let mut storage = MemStorage::new();

        let created = storage
            .create_certificate(sample_details(), "CERT-2026-AAAAAAAAA".to_string())
            .unwrap();
        let removed = storage.remove(created.id).expect("record removed");

        assert_eq!(removed.certificate_id, "CERT-2026-AAAAAAAAA");
        assert!(storage.get_by_certificate_id("CERT-2026-AAAAAAAAA").is_none());
        assert_eq!(storage.count(), 0);
    }

    #[test]
    fn all_returns_records_in_insert_order() {
        let mut storage = MemStorage::new();
        for suffix in ["AAAAAAAAA", "BBBBBBBBB", "CCCCCCCCC"] {
            storage
                .create_certificate(sample_details(), format!("CERT-2026-{suffix}"))
                .unwrap();
        }

        let ids: Vec<u64> = storage.all().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn reset_clears_records_and_counter() {
        let mut storage = MemStorage::new();
        storage
            .create_certificate(sample_details(), "CERT-2026-AAAAAAAAA".to_string())
            .unwrap();

        storage.reset();

        assert_eq!(storage.count(), 0);
        let created = storage
            .create_certificate(sample_details(), "CERT-2026-BBBBBBBBB".to_string())
            .unwrap();
        assert_eq!(created.id, 1);
    }
}
