//! Implementation of `edaflow configure`.

use anyhow::{Context, Result};

use crate::backend::ConfigureResult;
use crate::ops::session::Session;

/// Write every artifact the session's backend needs.
pub fn configure(session: &Session) -> Result<ConfigureResult> {
    let backend = session.backend();
    tracing::debug!("configuring `{}` with {}", session.project().name(), backend.id());

    let result = backend
        .configure(session.args())
        .with_context(|| format!("failed to configure `{}`", session.project().name()))?;

    tracing::debug!("configuration fingerprint {}", result.fingerprint());
    Ok(result)
}
