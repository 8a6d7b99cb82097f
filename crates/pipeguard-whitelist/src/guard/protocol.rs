//! JSON-lines decision protocol.
//!
//! One request object per line:
//! `{"kind":"method","type":"org.acme.Utils","member":"setBranch","params":["java.lang.String"]}`
//!
//! `type` names the declaring type as resolved by the sandbox. A sandbox that
//! only knows the receiver's class sends `runtime_type` instead, and the
//! configured type model resolves the declaring type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pipeguard_core::{AccessKind, CONSTRUCTOR_NAME};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionRequest {
    pub kind: AccessKind,
    #[serde(rename = "type", default)]
    pub declaring_type: Option<String>,
    #[serde(default)]
    pub runtime_type: Option<String>,
    /// Omitted for constructors.
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub overridden_in: Vec<String>,
}

impl DecisionRequest {
    /// Member name to check. Only constructors may leave it out.
    pub fn member_name(&self) -> Result<&str, RequestError> {
        match (self.kind, self.member.as_deref()) {
            (AccessKind::Constructor, None) => Ok(CONSTRUCTOR_NAME),
            (_, Some(name)) if !name.trim().is_empty() => Ok(name),
            _ => Err(RequestError::MissingMember(self.kind)),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DecisionResponse {
    pub permitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecisionResponse {
    pub fn decided(permitted: bool) -> Self {
        Self {
            permitted,
            error: None,
        }
    }

    /// Unusable request: always a denial.
    pub fn rejected(err: &RequestError) -> Self {
        Self {
            permitted: false,
            error: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("request must name exactly one of `type` or `runtime_type`")]
    AmbiguousTarget,
    #[error("`member` is required for {0} requests")]
    MissingMember(AccessKind),
    #[error("`overridden_in` is only meaningful with `type`")]
    ChainWithoutType,
}
