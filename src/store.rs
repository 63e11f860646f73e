//! Document store behind the `/api/v0/db` routes.
//!
//! Documents are JSON objects addressed by `(uid, collectionId, documentId)`
//! and owned by a user account. The HTTP layer only talks to the
//! [`DocumentStore`] trait; [`InMemoryStore`] is the implementation the
//! binary and the tests run against.

use std::collections::HashMap;
use std::future::Future;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::api_error::{ApiError, DomainError};

/// Path-derived address of one document.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPath {
    pub uid: String,
    pub collection_id: String,
    pub document_id: String,
}

impl DocumentPath {
    pub fn new(
        uid: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            collection_id: collection_id.into(),
            document_id: document_id.into(),
        }
    }
}

/// Summary of one account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AccountSummary {
    pub uid: String,
    pub documents: usize,
}

/// Outcome of an upsert.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Written {
    Created,
    Replaced,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StoreError {
    #[error("account `{uid}` already exists")]
    AccountExists { uid: String },

    #[error("account `{uid}` does not exist")]
    AccountNotFound { uid: String },

    #[error("document `{}/{}` already exists", .0.collection_id, .0.document_id)]
    DocumentExists(DocumentPath),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let domain = match err {
            StoreError::AccountExists { uid } => {
                DomainError::duplicate_account_with(format!("An account with id `{uid}` already exists."))
            }
            StoreError::AccountNotFound { uid } => DomainError::AccountNotFound { uid },
            StoreError::DocumentExists(path) => DomainError::DuplicateDocument {
                collection_id: path.collection_id,
                document_id: path.document_id,
            },
        };
        domain.into()
    }
}

/// Storage for user accounts and their documents.
///
/// Every document operation fails with [`StoreError::AccountNotFound`] when
/// the owning account does not exist.
pub trait DocumentStore: Send + Sync + 'static {
    fn create_account(&self, uid: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn account(&self, uid: &str) -> impl Future<Output = Result<Option<AccountSummary>, StoreError>> + Send;

    fn get(&self, path: &DocumentPath) -> impl Future<Output = Result<Option<Map<String, Value>>, StoreError>> + Send;

    /// Stores a new document; fails with [`StoreError::DocumentExists`] if the
    /// path is taken.
    fn insert(
        &self,
        path: &DocumentPath,
        data: Map<String, Value>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn upsert(
        &self,
        path: &DocumentPath,
        data: Map<String, Value>,
    ) -> impl Future<Output = Result<Written, StoreError>> + Send;

    /// Returns whether a document was removed.
    fn delete(&self, path: &DocumentPath) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

type Documents = HashMap<(String, String), Map<String, Value>>;

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<String, Documents>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn document_key(path: &DocumentPath) -> (String, String) {
    (path.collection_id.clone(), path.document_id.clone())
}

fn account_not_found(uid: &str) -> StoreError {
    StoreError::AccountNotFound { uid: uid.to_owned() }
}

impl DocumentStore for InMemoryStore {
    async fn create_account(&self, uid: &str) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(uid) {
            return Err(StoreError::AccountExists { uid: uid.to_owned() });
        }
        accounts.insert(uid.to_owned(), Documents::new());
        Ok(())
    }

    async fn account(&self, uid: &str) -> Result<Option<AccountSummary>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(uid).map(|documents| AccountSummary {
            uid: uid.to_owned(),
            documents: documents.len(),
        }))
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Map<String, Value>>, StoreError> {
        let accounts = self.accounts.read().await;
        let documents = accounts.get(&path.uid).ok_or_else(|| account_not_found(&path.uid))?;
        Ok(documents.get(&document_key(path)).cloned())
    }

    async fn insert(&self, path: &DocumentPath, data: Map<String, Value>) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let documents = accounts.get_mut(&path.uid).ok_or_else(|| account_not_found(&path.uid))?;
        let key = document_key(path);
        if documents.contains_key(&key) {
            return Err(StoreError::DocumentExists(path.clone()));
        }
        documents.insert(key, data);
        Ok(())
    }

    async fn upsert(&self, path: &DocumentPath, data: Map<String, Value>) -> Result<Written, StoreError> {
        let mut accounts = self.accounts.write().await;
        let documents = accounts.get_mut(&path.uid).ok_or_else(|| account_not_found(&path.uid))?;
        Ok(match documents.insert(document_key(path), data) {
            Some(_) => Written::Replaced,
            None => Written::Created,
        })
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().await;
        let documents = accounts.get_mut(&path.uid).ok_or_else(|| account_not_found(&path.uid))?;
        Ok(documents.remove(&document_key(path)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[tokio::test]
    async fn accounts_are_unique() {
        let store = InMemoryStore::new();
        store.create_account("alice").await.unwrap();
        assert_eq!(
            store.create_account("alice").await,
            Err(StoreError::AccountExists { uid: "alice".to_owned() })
        );
    }

    #[tokio::test]
    async fn documents_require_an_account() {
        let store = InMemoryStore::new();
        let path = DocumentPath::new("bob", "budgets", "2024");
        assert_eq!(
            store.get(&path).await,
            Err(StoreError::AccountNotFound { uid: "bob".to_owned() })
        );
    }

    #[tokio::test]
    async fn upsert_reports_create_then_replace() {
        let store = InMemoryStore::new();
        store.create_account("alice").await.unwrap();
        let path = DocumentPath::new("alice", "budgets", "2024");

        let first = store.upsert(&path, object(json!({ "limit": 100 }))).await.unwrap();
        let second = store.upsert(&path, object(json!({ "limit": 200 }))).await.unwrap();

        assert_eq!(first, Written::Created);
        assert_eq!(second, Written::Replaced);
        assert_eq!(store.get(&path).await.unwrap(), Some(object(json!({ "limit": 200 }))));
        assert_eq!(store.account("alice").await.unwrap().unwrap().documents, 1);
    }

    #[tokio::test]
    async fn insert_refuses_existing_document() {
        let store = InMemoryStore::new();
        store.create_account("alice").await.unwrap();
        let path = DocumentPath::new("alice", "budgets", "2024");

        store.insert(&path, Map::new()).await.unwrap();
        assert_eq!(
            store.insert(&path, Map::new()).await,
            Err(StoreError::DocumentExists(path.clone()))
        );
    }

    #[test]
    fn store_errors_map_to_domain_codes() {
        let exists: ApiError = StoreError::AccountExists { uid: "alice".to_owned() }.into();
        assert_eq!(exists.code(), "account-conflict");

        let missing: ApiError = StoreError::AccountNotFound { uid: "bob".to_owned() }.into();
        assert_eq!(missing.code(), "account-not-found");

        let taken: ApiError =
            StoreError::DocumentExists(DocumentPath::new("alice", "budgets", "2024")).into();
        assert_eq!(taken.code(), "document-conflict");
    }
}
