//! Profile and decision-scope persistence over the key-value store.

use serde::{Deserialize, Serialize};

use crate::decision_scope::DecisionScope;
use crate::error::StorefrontResult;
use crate::store::KeyValueStore;

/// Key holding the JSON profile blob.
pub const PROFILE_KEY: &str = "userProfile";

/// Key holding the last used decision scope.
pub const DECISION_SCOPE_KEY: &str = "decisionScope";

/// Signed-in shopper. Empty fields mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub email: String,
}

impl Profile {
    pub fn new(first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            email: email.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.email.is_empty()
    }
}

#[derive(Debug)]
pub struct ProfileStorage<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored profile, or the empty profile when nothing usable is stored.
    pub fn load_profile(&self) -> Profile {
        let raw = match self.store.get(PROFILE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Profile::default(),
            Err(error) => {
                tracing::error!(%error, "failed to load profile from storage");
                return Profile::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|error| {
            tracing::error!(%error, "stored profile is not valid json");
            Profile::default()
        })
    }

    pub fn save_profile(&self, profile: &Profile) -> StorefrontResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.store.set(PROFILE_KEY, &raw).map_err(|error| {
            tracing::error!(%error, "failed to save profile to storage");
            error.into()
        })
    }

    pub fn load_decision_scope(&self) -> Option<DecisionScope> {
        match self.store.get(DECISION_SCOPE_KEY) {
            Ok(raw) => raw.and_then(|s| DecisionScope::new(s).ok()),
            Err(error) => {
                tracing::error!(%error, "failed to load decision scope from storage");
                None
            }
        }
    }

    pub fn save_decision_scope(&self, scope: &DecisionScope) -> StorefrontResult<()> {
        self.store.set(DECISION_SCOPE_KEY, scope.as_str()).map_err(|error| {
            tracing::error!(%error, "failed to save decision scope to storage");
            error.into()
        })
    }
}
