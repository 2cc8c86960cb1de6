//! In-memory remote registry built during an interactive session
//!
//! This module provides:
//! - [`RemoteRegistry`]: the ordered, uniqueness-checked list of remotes
//! - The single-remote capture flow ([`capture_remote`])
//! - The add/edit/remove/view menu loop ([`manage_remotes`])

pub mod capture;
pub mod menu;

use crate::model::{ConfigError, RemoteRecord};
use thiserror::Error;

pub use capture::{capture_remote, RemoteDefaults};
pub use menu::{manage_remotes, MenuAction};

/// Rejected registry mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("A remote named \"{0}\" already exists")]
    Duplicate(String),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Ordered collection of remotes with case-insensitively unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRegistry {
    remotes: Vec<RemoteRecord>,
}

impl RemoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from existing records, enforcing every invariant
    pub fn from_records(records: Vec<RemoteRecord>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for record in records {
            registry.add(record)?;
        }
        Ok(registry)
    }

    pub fn remotes(&self) -> &[RemoteRecord] {
        &self.remotes
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RemoteRecord> {
        self.remotes.get(index)
    }

    /// Lowercased names of every record except the one at `excluding`
    pub fn used_names(&self, excluding: Option<usize>) -> Vec<String> {
        self.remotes
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != excluding)
            .map(|(_, r)| r.name.to_lowercase())
            .collect()
    }

    /// Whether `name` collides with a record other than `excluding`
    pub fn is_taken(&self, name: &str, excluding: Option<usize>) -> bool {
        let lowered = name.to_lowercase();
        self.used_names(excluding).contains(&lowered)
    }

    fn check(&self, record: &RemoteRecord, excluding: Option<usize>) -> Result<(), RegistryError> {
        record.validate()?;
        if self.is_taken(&record.name, excluding) {
            return Err(RegistryError::Duplicate(record.name.clone()));
        }
        Ok(())
    }

    /// Append a new record
    pub fn add(&mut self, record: RemoteRecord) -> Result<(), RegistryError> {
        self.check(&record, None)?;
        self.remotes.push(record);
        Ok(())
    }

    /// Replace the record at `index` in place; its own name does not count as taken
    pub fn replace(&mut self, index: usize, record: RemoteRecord) -> Result<(), RegistryError> {
        self.check(&record, Some(index))?;
        self.remotes[index] = record;
        Ok(())
    }

    /// Remove and return the record at `index`
    pub fn remove(&mut self, index: usize) -> RemoteRecord {
        self.remotes.remove(index)
    }

    /// Finalized snapshot of the list
    pub fn into_records(self) -> Vec<RemoteRecord> {
        self.remotes
    }

    /// One line per remote: `[1] name → url/remoteEntry.js (port N)`
    pub fn describe(&self) -> Vec<String> {
        self.remotes
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "[{}] {} → {} (port {})",
                    i + 1,
                    r.name,
                    r.remote_entry_url(),
                    r.port
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(name: &str) -> RemoteRecord {
        RemoteRecord::new(name, 3001, "App")
    }

    #[test]
    fn test_add_rejects_case_insensitive_duplicate() {
        let mut registry = RemoteRegistry::new();
        registry.add(remote("checkout")).unwrap();

        assert_eq!(
            registry.add(remote("CheckOut")),
            Err(RegistryError::Duplicate("CheckOut".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_record() {
        let mut registry = RemoteRegistry::new();
        assert!(matches!(
            registry.add(remote("9lives")),
            Err(RegistryError::Invalid(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_host_name_is_rejected_on_add_and_replace() {
        let mut registry = RemoteRegistry::from_records(vec![remote("cart")]).unwrap();
        assert!(matches!(
            registry.add(remote("Host")),
            Err(RegistryError::Invalid(_))
        ));
        assert!(matches!(
            registry.replace(0, remote("host")),
            Err(RegistryError::Invalid(_))
        ));
        assert_eq!(registry.get(0).unwrap().name, "cart");
    }

    #[test]
    fn test_replace_keeps_own_name() {
        let mut registry = RemoteRegistry::from_records(vec![remote("cart"), remote("admin")]).unwrap();

        let mut edited = remote("Cart");
        edited.port = 4000;
        registry.replace(0, edited).unwrap();
        assert_eq!(registry.get(0).unwrap().name, "Cart");

        assert_eq!(
            registry.replace(0, remote("ADMIN")),
            Err(RegistryError::Duplicate("ADMIN".to_string()))
        );
    }

    #[test]
    fn test_random_operation_sequences_keep_names_unique() {
        // Deterministic pseudo-random walk over add/replace/remove
        let names = ["a", "A", "b", "B", "c", "a_1", "A_1"];
        let mut registry = RemoteRegistry::new();
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let name = names[(seed >> 16) as usize % names.len()];
            match (seed >> 8) % 3 {
                0 => {
                    let _ = registry.add(remote(name));
                }
                1 if !registry.is_empty() => {
                    let index = (seed as usize) % registry.len();
                    let _ = registry.replace(index, remote(name));
                }
                _ if !registry.is_empty() => {
                    let index = (seed as usize) % registry.len();
                    registry.remove(index);
                }
                _ => {}
            }

            let mut lowered = registry.used_names(None);
            lowered.sort();
            lowered.dedup();
            assert_eq!(lowered.len(), registry.len());
        }
    }

    #[test]
    fn test_describe_uses_one_based_indices() {
        let registry = RemoteRegistry::from_records(vec![remote("cart")]).unwrap();
        assert_eq!(
            registry.describe(),
            vec!["[1] cart → http://localhost:3001/remoteEntry.js (port 3001)".to_string()]
        );
    }
}
