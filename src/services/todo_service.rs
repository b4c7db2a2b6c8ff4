use std::sync::Arc;
use tokio::sync::Mutex;
use crate::config::StorageConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Task, User};
use super::id_allocator::IdAllocator;
use super::store::JsonTable;

struct Tables {
    accounts: JsonTable<String>,
    tasks: JsonTable<Vec<Task>>,
}

/// Accounts and task lists, loaded once and written through on every change.
///
/// Cloning shares the same underlying state. All mutations hold the lock across
/// the read-modify-persist sequence, so concurrent requests cannot lose updates.
#[derive(Clone)]
pub struct TodoService {
    tables: Arc<Mutex<Tables>>,
    ids: Arc<IdAllocator>,
}

impl TodoService {
    pub fn open(storage: &StorageConfig) -> Self {
        let accounts: JsonTable<String> = JsonTable::open(&storage.users_file);
        let tasks: JsonTable<Vec<Task>> = JsonTable::open(&storage.tasks_file);
        let ids = IdAllocator::seeded_from(tasks.values().flatten().map(|task| task.id));

        tracing::info!(
            "Loaded {} users from {} and {} task lists from {}, last task id {}",
            accounts.len(),
            accounts.path().display(),
            tasks.len(),
            tasks.path().display(),
            ids.last_issued()
        );

        Self {
            tables: Arc::new(Mutex::new(Tables { accounts, tasks })),
            ids: Arc::new(ids),
        }
    }

    pub async fn register(&self, user: User) -> AppResult<()> {
        let mut tables = self.tables.lock().await;

        if tables.accounts.contains_key(&user.username) {
            tracing::info!("Registration rejected, username taken: {}", user.username);
            return Err(AppError::UsernameTaken(user.username));
        }

        tables.accounts.put(user.username.clone(), user.password).await?;

        if let Err(e) = tables.tasks.put(user.username.clone(), Vec::new()).await {
            tracing::error!("Failed to create task list for {}: {}", user.username, e);
            if let Err(rollback) = tables.accounts.delete(&user.username).await {
                tracing::error!("Failed to roll back account {}: {}", user.username, rollback);
            }
            return Err(e.into());
        }

        tracing::info!("Registered user: {}", user.username);
        Ok(())
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> bool {
        let tables = self.tables.lock().await;
        tables
            .accounts
            .get(username)
            .is_some_and(|stored| stored == password)
    }

    pub async fn tasks_for(&self, username: &str) -> Vec<Task> {
        let tables = self.tables.lock().await;
        tables.tasks.get(username).cloned().unwrap_or_default()
    }

    /// Appends a task for `username`. Returns `None` without touching storage when
    /// either field is empty or the user has no task list.
    pub async fn add_task(&self, username: &str, name: &str, date: &str) -> AppResult<Option<Task>> {
        if name.is_empty() || date.is_empty() {
            tracing::debug!("Ignoring add-task for {} with empty fields", username);
            return Ok(None);
        }

        let mut tables = self.tables.lock().await;
        let mut list = match tables.tasks.get(username) {
            Some(list) => list.clone(),
            None => {
                tracing::debug!("Ignoring add-task for unknown user: {}", username);
                return Ok(None);
            }
        };

        let Some(id) = self.ids.next_id() else {
            tracing::error!("Task id space exhausted, cannot add task for {}", username);
            return Err(AppError::IdsExhausted);
        };
        let task = Task {
            id,
            name: name.to_string(),
            date: date.to_string(),
        };
        list.push(task.clone());
        tables.tasks.put(username, list).await?;

        tracing::info!("Added task {} for user {}", task.id, username);
        Ok(Some(task))
    }

    /// Removes task `id` from `username`'s list. The list is rewritten whenever the
    /// user exists; the return value says whether anything was removed.
    pub async fn delete_task(&self, username: &str, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        let mut list = match tables.tasks.get(username) {
            Some(list) => list.clone(),
            None => {
                tracing::debug!("Ignoring delete-task for unknown user: {}", username);
                return Ok(false);
            }
        };

        let before = list.len();
        list.retain(|task| task.id != id);
        let removed = list.len() != before;
        tables.tasks.put(username, list).await?;

        if removed {
            tracing::info!("Deleted task {} for user {}", id, username);
        } else {
            tracing::debug!("Task {} not found for user {}", id, username);
        }
        Ok(removed)
    }
}
