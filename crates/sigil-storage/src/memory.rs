//! In-memory account store.

use async_trait::async_trait;
use parking_lot::RwLock;
use sigil_auth::{AccountStore, App, StoreError, User};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Thread-safe in-memory store for user and app records.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    /// Next user id to assign.
    next_user_id: AtomicI64,

    /// Users by id.
    users: RwLock<HashMap<i64, User>>,

    /// Email to user id mapping. Emails are compared byte-exact.
    email_index: RwLock<HashMap<String, i64>>,

    /// Apps by id.
    apps: RwLock<HashMap<i64, App>>,
}

impl MemoryAccountStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an app record.
    ///
    /// Apps are pre-provisioned at bootstrap; the engine only reads them.
    pub fn provision_app(&self, app: App) {
        tracing::debug!(app_id = app.id, app_name = %app.name, "provisioning app");
        self.apps.write().insert(app.id, app);
    }

    /// Returns the number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Returns the number of provisioned apps.
    pub fn app_count(&self) -> usize {
        self.apps.read().len()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
        // The index guard is held across both inserts so a conflicting
        // registration can never observe partial state.
        let mut email_index = self.email_index.write();

        if email_index.contains_key(email) {
            return Err(StoreError::UserExists);
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
        };

        self.users.write().insert(id, user);
        email_index.insert(email.to_owned(), id);

        Ok(id)
    }

    async fn user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let id = *self
            .email_index
            .read()
            .get(email)
            .ok_or(StoreError::UserNotFound)?;

        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    async fn app_by_id(&self, id: i64) -> Result<App, StoreError> {
        self.apps
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::AppNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_user_assigns_sequential_ids() {
        let store = MemoryAccountStore::new();
        assert_eq!(store.save_user("a@x.com", "hash-a").await.unwrap(), 1);
        assert_eq!(store.save_user("b@x.com", "hash-b").await.unwrap(), 2);
        assert_eq!(store.user_count(), 2);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_without_partial_state() {
        let store = MemoryAccountStore::new();
        store.save_user("a@x.com", "hash-a").await.unwrap();

        let err = store.save_user("a@x.com", "hash-b").await.unwrap_err();
        assert!(matches!(err, StoreError::UserExists));
        assert_eq!(store.user_count(), 1);

        // The original record is untouched.
        let user = store.user_by_email("a@x.com").await.unwrap();
        assert_eq!(user.password_hash, "hash-a");
    }

    #[tokio::test]
    async fn emails_are_compared_byte_exact() {
        let store = MemoryAccountStore::new();
        store.save_user("a@x.com", "hash-a").await.unwrap();

        let err = store.user_by_email("A@X.COM").await.unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound));
    }

    #[tokio::test]
    async fn unknown_lookups_report_not_found() {
        let store = MemoryAccountStore::new();

        let err = store.user_by_email("nobody@x.com").await.unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound));

        let err = store.app_by_id(99).await.unwrap_err();
        assert!(matches!(err, StoreError::AppNotFound));
    }

    #[tokio::test]
    async fn provisioning_replaces_an_existing_app() {
        let store = MemoryAccountStore::new();
        store.provision_app(App {
            id: 1,
            name: "web".into(),
            secret: "old".into(),
        });
        store.provision_app(App {
            id: 1,
            name: "web".into(),
            secret: "new".into(),
        });

        let app = store.app_by_id(1).await.unwrap();
        assert_eq!(app.secret, "new");
        assert_eq!(store.app_count(), 1);
    }
}
