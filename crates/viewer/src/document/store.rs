//! The document store: raw text, the order-preserving parsed value, and
//! the typed document, kept synchronized under a single rule — text is
//! authoritative; both derived projections are rebuilt from it.

use cadview_model::{Document, DocumentError, DocumentStats};
use serde_json::Value;
use tracing::debug;

/// Token identifying one load request. A completing load whose token is
/// stale (a newer load was begun since) is dropped without touching state.
pub type LoadToken = u64;

/// The single shared mutable document state.
#[derive(Default)]
pub struct DocumentStore {
    text: String,
    value: Option<Value>,
    document: Option<Document>,
    generation: LoadToken,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// The authoritative document text, exactly as last installed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The order-preserving parsed projection.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// A clone of the parsed projection, for mutation-then-rewrite.
    pub fn value_cloned(&self) -> Option<Value> {
        self.value.clone()
    }

    /// The typed projection.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn stats(&self) -> Option<DocumentStats> {
        self.document.as_ref().map(|d| d.stats())
    }

    /// Install new document text, rebuilding both derived projections.
    /// On error nothing is mutated — the previous state stays intact.
    pub fn set_text(&mut self, text: &str) -> Result<DocumentStats, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        let document = Document::from_value(&value)?;
        let stats = document.stats();
        self.text = text.to_string();
        self.value = Some(value);
        self.document = Some(document);
        Ok(stats)
    }

    /// Begin a load; the returned token must accompany the completion.
    /// Each call supersedes every earlier in-flight load.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.generation
    }

    /// Complete a load begun with [`Self::begin_load`]. Returns `Ok(None)`
    /// when the token is stale; state is untouched in that case.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        text: &str,
    ) -> Result<Option<DocumentStats>, DocumentError> {
        if token != self.generation {
            debug!(token, current = self.generation, "stale load dropped");
            return Ok(None);
        }
        self.set_text(text).map(Some)
    }

    /// Install a mutated parsed value (the patch path). The value is
    /// re-serialized with 2-space indentation and becomes the new
    /// authoritative text, which is returned for the editor buffer.
    pub fn rewrite_from_value(&mut self, value: Value) -> Result<String, DocumentError> {
        let document = Document::from_value(&value)?;
        let text = serde_json::to_string_pretty(&value)?;
        self.text = text.clone();
        self.value = Some(value);
        self.document = Some(document);
        Ok(text)
    }
}
