//! Labels of a user
//!
//! One set per user, kept as a single document. The set is only ever written as a whole.

use crate::errors::Error;
use crate::errors::Result;
use crate::errors::ValidationError;
use crate::storage::Storage;
use crate::users::UserId;

/// Ordered set of unique, case-sensitive label names
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    /// The set with one more label at the end
    ///
    /// The name is trimmed first; empty names and names already in the set are rejected.
    pub fn with_label(&self, name: &str) -> core::result::Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }

        if self.contains(name) {
            return Err(ValidationError::DuplicateLabel);
        }

        let mut labels = self.0.clone();
        labels.push(name.to_string());

        Ok(Self(labels))
    }
}

/// Reads and writes label sets
#[derive(Clone)]
pub struct LabelStore<S: Storage> {
    storage: S,
}

impl<S: Storage> LabelStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Labels of a user, empty when the user never added one
    pub async fn fetch(&self, user_id: &UserId) -> Result<LabelSet> {
        let labels = self.storage.find_label_set(user_id).await.map_err(|err| {
            tracing::error!("Could not fetch labels of {user_id}: {err}");
            Error::StoreRead(err)
        })?;

        Ok(labels.map(LabelSet::new).unwrap_or_default())
    }

    /// Add a label to the set of a user
    ///
    /// Returns the full new set
    pub async fn add_label(&self, user_id: &UserId, name: &str) -> Result<LabelSet> {
        let labels = self.fetch(user_id).await?.with_label(name)?;

        self.storage
            .save_label_set(user_id, labels.as_slice())
            .await
            .map_err(|err| {
                tracing::error!("Could not save labels of {user_id}: {err}");
                Error::StoreWrite(err)
            })?;

        tracing::debug!("Added label \"{}\" for {user_id}", name.trim());

        Ok(labels)
    }
}
