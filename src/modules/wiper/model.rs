use serde::Serialize;

/// Collections under this prefix belong to the server and are never wiped.
pub const SYSTEM_PREFIX: &str = "system.";

pub fn is_system_collection(name: &str) -> bool {
    name.starts_with(SYSTEM_PREFIX)
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CollectionOutcome {
    Deleted { collection: String, documents: u64 },
    Failed { collection: String, error: String },
}

impl CollectionOutcome {
    pub fn collection(&self) -> &str {
        match self {
            CollectionOutcome::Deleted { collection, .. } => collection,
            CollectionOutcome::Failed { collection, .. } => collection,
        }
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct DatabaseReport {
    pub database: String,
    pub collections: Vec<CollectionOutcome>,
    pub skipped: Vec<String>,
}

impl DatabaseReport {
    pub fn new(database: &str) -> Self {
        Self {
            database: database.to_string(),
            ..Default::default()
        }
    }

    pub fn documents_deleted(&self) -> u64 {
        self.collections
            .iter()
            .map(|c| match c {
                CollectionOutcome::Deleted { documents, .. } => *documents,
                CollectionOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct WipeReport {
    pub databases: Vec<DatabaseReport>,
}

impl WipeReport {
    pub fn collections_cleaned(&self) -> usize {
        self.outcomes()
            .filter(|c| matches!(c, CollectionOutcome::Deleted { .. }))
            .count()
    }

    pub fn documents_deleted(&self) -> u64 {
        self.databases.iter().map(DatabaseReport::documents_deleted).sum()
    }

    pub fn failures(&self) -> Vec<&CollectionOutcome> {
        self.outcomes()
            .filter(|c| matches!(c, CollectionOutcome::Failed { .. }))
            .collect()
    }

    fn outcomes(&self) -> impl Iterator<Item = &CollectionOutcome> {
        self.databases.iter().flat_map(|db| db.collections.iter())
    }
}
