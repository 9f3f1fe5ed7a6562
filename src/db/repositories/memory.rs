use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::db::models::{AccessMode, Label, NewLabel};

use super::access::effective_mode;
use super::{LabelStore, RepositoryAccess, StoreError};

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[derive(Default)]
struct LabelTable {
    last_id: i64,
    rows: BTreeMap<i64, Label>,
}

/// Label store kept in process memory. Ids are assigned sequentially and
/// listings come back in id order.
#[derive(Default)]
pub struct MemoryLabelStore {
    table: RwLock<LabelTable>,
}

impl MemoryLabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LabelStore for MemoryLabelStore {
    async fn find_by_id(&self, id: i64) -> Result<Label, StoreError> {
        let table = self.table.read().map_err(poisoned)?;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn find_all_by_repository(&self, repository_id: i64) -> Result<Vec<Label>, StoreError> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table
            .rows
            .values()
            .filter(|l| l.repository_id == repository_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, label: NewLabel) -> Result<i64, StoreError> {
        let mut table = self.table.write().map_err(poisoned)?;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            Label {
                id,
                repository_id: label.repository_id(),
                name: label.name().to_string(),
                color: label.color().to_string(),
            },
        );
        Ok(id)
    }

    async fn update(&self, label: &Label) -> Result<(), StoreError> {
        let mut table = self.table.write().map_err(poisoned)?;
        match table.rows.get_mut(&label.id) {
            Some(row) if row.repository_id == label.repository_id => {
                row.name = label.name.clone();
                row.color = label.color.clone();
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }

    async fn delete_by_repository_and_id(
        &self,
        repository_id: i64,
        id: i64,
    ) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(poisoned)?;
        let owned = table
            .rows
            .get(&id)
            .is_some_and(|l| l.repository_id == repository_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }
}

struct RepositoryEntry {
    owner_id: i64,
    is_private: bool,
    grants: HashMap<i64, AccessMode>,
}

/// Repository permissions kept in process memory, following the same rules
/// as the database-backed oracle.
#[derive(Default)]
pub struct MemoryAccess {
    repositories: RwLock<HashMap<i64, RepositoryEntry>>,
}

impl MemoryAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&self, repository_id: i64, owner_id: i64, is_private: bool) -> &Self {
        if let Ok(mut repos) = self.repositories.write() {
            repos.insert(
                repository_id,
                RepositoryEntry {
                    owner_id,
                    is_private,
                    grants: HashMap::new(),
                },
            );
        }
        self
    }

    /// Grants `mode` to `user_id`. Ignored for unknown repositories.
    pub fn grant(&self, repository_id: i64, user_id: i64, mode: AccessMode) -> &Self {
        if let Ok(mut repos) = self.repositories.write() {
            if let Some(entry) = repos.get_mut(&repository_id) {
                entry.grants.insert(user_id, mode);
            }
        }
        self
    }
}

#[async_trait]
impl RepositoryAccess for MemoryAccess {
    async fn access_mode(
        &self,
        user_id: i64,
        repository_id: i64,
    ) -> Result<Option<AccessMode>, StoreError> {
        let repos = self.repositories.read().map_err(poisoned)?;
        Ok(repos.get(&repository_id).map(|entry| {
            effective_mode(
                entry.owner_id,
                entry.is_private,
                user_id,
                entry.grants.get(&user_id).copied(),
            )
        }))
    }
}
