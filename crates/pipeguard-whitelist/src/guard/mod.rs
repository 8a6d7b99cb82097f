//! Decision service: the sandbox-facing side of the whitelist.
//!
//! Turns protocol requests into `Member` descriptors, asks the compiled
//! whitelist, and records the outcome. Anything that cannot be decided
//! cleanly is denied.

pub mod protocol;

use pipeguard_core::Member;

use crate::app_state::AppState;
use crate::policy::Whitelist;

pub use protocol::{DecisionRequest, DecisionResponse, RequestError};

/// Decide one request. Unresolvable runtime types are a denial, not an error.
pub fn decide(state: &AppState, req: &DecisionRequest) -> Result<bool, RequestError> {
    let name = req.member_name()?;
    let member = match (&req.declaring_type, &req.runtime_type) {
        (Some(declaring), None) => Member::new(declaring.clone(), name)
            .with_params(req.params.iter().cloned())
            .with_overridden_in(req.overridden_in.iter().cloned()),
        (None, Some(runtime)) => {
            if !req.overridden_in.is_empty() {
                return Err(RequestError::ChainWithoutType);
            }
            match state
                .types()
                .resolve(runtime, req.kind, name, &req.params)
            {
                Some(m) => m,
                None => {
                    state.metrics().unresolved.inc(&[("kind", req.kind.as_str())]);
                    tracing::debug!(
                        kind = %req.kind,
                        runtime_type = %runtime,
                        member = %name,
                        "member not found in type model"
                    );
                    return Ok(false);
                }
            }
        }
        _ => return Err(RequestError::AmbiguousTarget),
    };

    Ok(state.whitelist().permits(req.kind, &member))
}

/// Handle one protocol line end to end.
pub fn handle_line(state: &AppState, line: &str) -> DecisionResponse {
    let req: DecisionRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            let err = RequestError::from(e);
            state
                .metrics()
                .decisions
                .inc(&[("kind", "unknown"), ("outcome", "error")]);
            tracing::debug!(error = %err, "rejecting request");
            return DecisionResponse::rejected(&err);
        }
    };

    match decide(state, &req) {
        Ok(permitted) => {
            let outcome = if permitted { "permitted" } else { "denied" };
            state
                .metrics()
                .decisions
                .inc(&[("kind", req.kind.as_str()), ("outcome", outcome)]);
            if !permitted {
                tracing::debug!(
                    kind = %req.kind,
                    declaring_type = ?req.declaring_type,
                    runtime_type = ?req.runtime_type,
                    member = ?req.member,
                    "access denied"
                );
            }
            DecisionResponse::decided(permitted)
        }
        Err(err) => {
            state
                .metrics()
                .decisions
                .inc(&[("kind", req.kind.as_str()), ("outcome", "error")]);
            tracing::debug!(kind = %req.kind, error = %err, "rejecting request");
            DecisionResponse::rejected(&err)
        }
    }
}
