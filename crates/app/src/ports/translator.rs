//! Translator port — the external natural-language-to-command service.
//!
//! Treated as a black box: free text plus a snapshot of current device
//! identities goes in, a structured [`Translation`] comes out. The call is
//! the one genuinely long-latency operation in the system and must never
//! run under a hub lock.

use std::future::Future;
use std::sync::Arc;

use homehub_domain::command::{DeviceSummary, Translation};
use homehub_domain::error::HubError;

/// Converts free-text user intent into a structured list of device actions.
pub trait CommandTranslator {
    /// Translate `input` using `context` for grounding.
    ///
    /// Fails with [`HubError::Translation`] when the service is unreachable
    /// or returns an unparseable structure; no actions are dispatched then.
    fn translate(
        &self,
        input: &str,
        context: &[DeviceSummary],
    ) -> impl Future<Output = Result<Translation, HubError>> + Send;
}

impl<T: CommandTranslator + Send + Sync> CommandTranslator for Arc<T> {
    fn translate(
        &self,
        input: &str,
        context: &[DeviceSummary],
    ) -> impl Future<Output = Result<Translation, HubError>> + Send {
        (**self).translate(input, context)
    }
}
