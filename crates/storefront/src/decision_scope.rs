//! Decision scope: opaque token naming a personalization request context.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionScope(String);

/// Shape of the base64 token copied out of the personalization console.
#[derive(Debug, Deserialize)]
struct EncodedScope {
    #[serde(rename = "xdm:activityId")]
    activity_id: String,
    #[serde(rename = "xdm:placementId")]
    placement_id: String,
}

impl DecisionScope {
    /// Wrap a raw scope name. Blank names are rejected.
    pub fn new(name: impl Into<String>) -> StorefrontResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(StorefrontError::InvalidDecisionScope(
                "decision scope must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Decode a console token: base64 JSON carrying `xdm:activityId` and
    /// `xdm:placementId`. Ids are rewritten from `dps:` to `xcore:` and joined
    /// as `activity::placement`.
    pub fn from_encoded(token: &str) -> StorefrontResult<Self> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|e| StorefrontError::InvalidDecisionScope(format!("not base64: {e}")))?;

        let encoded: EncodedScope = serde_json::from_slice(&bytes)
            .map_err(|e| StorefrontError::InvalidDecisionScope(format!("unexpected payload: {e}")))?;

        let activity = encoded.activity_id.replacen("dps:", "xcore:", 1);
        let placement = encoded.placement_id.replacen("dps:", "xcore:", 1);

        Self::new(format!("{activity}::{placement}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DecisionScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
