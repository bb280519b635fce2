//! Interpretation of claim script results.

use polydock_common::CommandOutcome;
use url::Url;

use crate::domain::error::ClaimError;

/// The app URL printed by a claim script.
///
/// The command must have exited 0 and printed an absolute URL with a host;
/// surrounding whitespace is ignored.
pub fn claim_url(outcome: &CommandOutcome) -> Result<String, ClaimError> {
    if !outcome.succeeded() {
        return Err(ClaimError::CommandFailed(outcome.summary()));
    }
    let Some(output) = outcome.output.as_deref() else {
        return Err(ClaimError::NoOutput(outcome.summary()));
    };
    let trimmed = output.trim();
    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => Ok(trimmed.to_string()),
        _ => Err(ClaimError::NotAUrl(output.to_string())),
    }
}
