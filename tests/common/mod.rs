#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::Mutex;

use store_sweeper::modules::purger::{crud::KeyStore, model::Ttl};
use store_sweeper::modules::wiper::crud::DocumentStore;
use store_sweeper::services::confirm::Confirm;
use store_sweeper::{CleanupError, CleanupResult};

/// Database -> collection -> document count.
#[derive(Default)]
pub struct MemoryDocumentStore {
    data: Mutex<BTreeMap<String, BTreeMap<String, u64>>>,
    failing: HashSet<(String, String)>,
    unlistable: HashSet<String>,
    deletes: Mutex<Vec<(String, String)>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, database: &str, collection: &str, documents: u64) -> Self {
        self.data
            .lock()
            .unwrap()
            .entry(database.to_string())
            .or_default()
            .insert(collection.to_string(), documents);
        self
    }

    pub fn failing_on(mut self, database: &str, collection: &str) -> Self {
        self.failing
            .insert((database.to_string(), collection.to_string()));
        self
    }

    pub fn unlistable(mut self, database: &str) -> Self {
        self.unlistable.insert(database.to_string());
        self
    }

    pub fn documents(&self, database: &str, collection: &str) -> Option<u64> {
        self.data
            .lock()
            .unwrap()
            .get(database)
            .and_then(|db| db.get(collection).copied())
    }

    pub fn total_documents(&self) -> u64 {
        self.data
            .lock()
            .unwrap()
            .values()
            .flat_map(|db| db.values())
            .sum()
    }

    pub fn delete_calls(&self) -> Vec<(String, String)> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_collections(&self, database: &str) -> CleanupResult<Vec<String>> {
        if self.unlistable.contains(database) {
            return Err(CleanupError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("not authorized on {} to execute command listCollections", database),
            )));
        }

        Ok(self
            .data
            .lock()
            .unwrap()
            .get(database)
            .map(|db| db.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn count_documents(&self, database: &str, collection: &str) -> CleanupResult<u64> {
        Ok(self.documents(database, collection).unwrap_or(0))
    }

    async fn delete_all(&self, database: &str, collection: &str) -> CleanupResult<u64> {
        self.deletes
            .lock()
            .unwrap()
            .push((database.to_string(), collection.to_string()));

        if self
            .failing
            .contains(&(database.to_string(), collection.to_string()))
        {
            return Err(CleanupError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("not authorized on {} to execute command delete", database),
            )));
        }

        let mut data = self.data.lock().unwrap();
        let count = data
            .get_mut(database)
            .and_then(|db| db.get_mut(collection))
            .map(std::mem::take)
            .unwrap_or(0);
        Ok(count)
    }
}

/// Key -> raw TTL as the server would report it.
#[derive(Default)]
pub struct MemoryKeyStore {
    keys: Mutex<BTreeMap<Vec<u8>, i64>>,
    deletes: Mutex<usize>,
    ttl_lookups: Mutex<usize>,
    fail_after: Option<usize>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(self, key: &str, ttl: i64) -> Self {
        self.with_raw_key(key.as_bytes(), ttl)
    }

    pub fn with_raw_key(self, key: &[u8], ttl: i64) -> Self {
        self.keys.lock().unwrap().insert(key.to_vec(), ttl);
        self
    }

    pub fn with_keys(self, prefix: &str, count: usize, ttl: i64) -> Self {
        {
            let mut keys = self.keys.lock().unwrap();
            for i in 0..count {
                keys.insert(format!("{}{:04}", prefix, i).into_bytes(), ttl);
            }
        }
        self
    }

    /// Deletes succeed `count` times, then the connection is lost.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn len(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.keys.lock().unwrap().contains_key(key)
    }

    pub fn delete_calls(&self) -> usize {
        *self.deletes.lock().unwrap()
    }

    pub fn ttl_lookups(&self) -> usize {
        *self.ttl_lookups.lock().unwrap()
    }
}

// Supports the trailing-star globs the purger is configured with.
fn glob_match(pattern: &str, key: &[u8]) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix.as_bytes()),
        None => key == pattern.as_bytes(),
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn keys(&self, pattern: &str) -> CleanupResult<Vec<Vec<u8>>> {
        Ok(self
            .keys
            .lock()
            .unwrap()
            .keys()
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect())
    }

    async fn ttl(&self, key: &[u8]) -> CleanupResult<Ttl> {
        *self.ttl_lookups.lock().unwrap() += 1;
        Ok(Ttl::from(
            self.keys.lock().unwrap().get(key).copied().unwrap_or(-2),
        ))
    }

    async fn delete(&self, key: &[u8]) -> CleanupResult<bool> {
        let mut deletes = self.deletes.lock().unwrap();
        if self.fail_after.is_some_and(|limit| *deletes >= limit) {
            return Err(redis::RedisError::from(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))
            .into());
        }
        *deletes += 1;
        Ok(self.keys.lock().unwrap().remove(key).is_some())
    }
}

/// Answers every confirmation with a fixed reply and records the summaries.
pub struct ScriptedConfirm {
    pub answer: bool,
    pub asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, summary: &str) -> CleanupResult<bool> {
        self.asked.push(summary.to_string());
        Ok(self.answer)
    }
}

pub fn output_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out).lines().map(String::from).collect()
}
