//! The viewer coordinator.
//!
//! Wires the document store, the reconstruction adapter, the scene
//! registry, the orbit camera, the drag controller, and the patch bridge
//! into one pointer-event-driven flow. The embedding shell feeds pixels
//! and clock readings in; meshes, camera matrices, and editor text come
//! out.

use std::path::Path;
use std::time::Instant;

use glam::DVec2;
use thiserror::Error;
use tracing::info;

use cadview_model::shapes::{insert_component, shape_component, ShapeKind};
use cadview_model::{Assembly, Document, DocumentError, DocumentStats, StandardAssembly};

use crate::build::build_document;
use crate::document::{DocumentStore, EditorBuffer, LoadToken, PatchBridge, PatchRequest};
use crate::scene::{GridConfig, Range, SceneRegistry};
use crate::viewport::camera::{OrbitCamera, ViewportSize};
use crate::viewport::controller::{DragCommit, HandleController};

/// Errors surfaced to the embedding shell as blocking messages.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no model loaded")]
    NoDocument,
    #[error("shape templates require a standard-format document")]
    ShapeIntoBRep,
}

/// The top-level engine object.
pub struct Viewer {
    pub store: DocumentStore,
    pub editor: EditorBuffer,
    pub registry: SceneRegistry,
    pub camera: OrbitCamera,
    pub controller: HandleController,
    pub viewport: ViewportSize,
    patcher: PatchBridge,
    /// Per-unit reconstruction failures from the last render.
    last_errors: Vec<(String, String)>,
    shape_counter: u64,
}

impl Viewer {
    pub fn new() -> Self {
        Self::with_viewport(ViewportSize::new(1280.0, 720.0))
    }

    pub fn with_viewport(viewport: ViewportSize) -> Self {
        Self {
            store: DocumentStore::new(),
            editor: EditorBuffer::new(),
            registry: SceneRegistry::new(),
            camera: OrbitCamera::new(),
            controller: HandleController::new(),
            viewport,
            patcher: PatchBridge::new(),
            last_errors: Vec::new(),
            shape_counter: 0,
        }
    }

    // ── Loading ───────────────────────────────────────────────

    /// Load document text synchronously, superseding any in-flight load.
    /// On error the previous document and render state stay intact.
    pub fn load_text(&mut self, text: &str) -> Result<DocumentStats, DocumentError> {
        self.store.begin_load();
        let stats = self.store.set_text(text)?;
        self.editor.set_text(text);
        self.render();
        Ok(stats)
    }

    /// Load a document from a file through the normal load path.
    pub fn load_file(&mut self, path: &Path) -> Result<DocumentStats, ViewerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(self.load_text(&text)?)
    }

    /// Begin an asynchronous load; pass the token to [`Self::complete_load`].
    pub fn begin_load(&mut self) -> LoadToken {
        self.store.begin_load()
    }

    /// Complete a load begun with [`Self::begin_load`]. Returns `Ok(None)`
    /// when a newer load superseded this one — state is untouched then.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        text: &str,
    ) -> Result<Option<DocumentStats>, DocumentError> {
        match self.store.complete_load(token, text)? {
            Some(stats) => {
                self.editor.set_text(text);
                self.render();
                Ok(Some(stats))
            }
            None => Ok(None),
        }
    }

    /// Apply the editor buffer's (possibly hand-edited) text as the new
    /// document. Invalid text leaves the current render state untouched.
    pub fn apply_editor_changes(&mut self) -> Result<DocumentStats, DocumentError> {
        let text = self.editor.text().to_string();
        self.store.begin_load();
        let stats = self.store.set_text(&text)?;
        self.render();
        Ok(stats)
    }

    // ── Rendering ─────────────────────────────────────────────

    /// Rebuild the scene from the store's document. Any in-flight drag is
    /// cancelled and the selection cleared before the registry is
    /// replaced, so a reload can never commit against stale objects.
    pub fn render(&mut self) {
        let Some(document) = self.store.document() else {
            self.controller.reset(&mut self.registry, &mut self.camera);
            self.registry.clear();
            self.last_errors.clear();
            return;
        };
        let mut result = build_document(document);

        self.controller.reset(&mut self.registry, &mut self.camera);
        self.registry.clear();
        self.last_errors = std::mem::take(&mut result.errors);
        self.registry.add_batch(result);
        info!(
            objects = self.registry.len(),
            failures = self.last_errors.len(),
            "scene rebuilt"
        );
    }

    /// Per-unit reconstruction failures from the last render.
    pub fn build_errors(&self) -> &[(String, String)] {
        &self.last_errors
    }

    pub fn stats(&self) -> Option<DocumentStats> {
        self.store.stats()
    }

    // ── Pointer protocol ──────────────────────────────────────

    /// Pointer-down: a press on a handle arm starts an axis drag and
    /// returns true; anything else picks or clears the selection.
    pub fn pointer_down(&mut self, pixel: DVec2) -> bool {
        if self
            .controller
            .try_begin_drag(&self.registry, &mut self.camera, self.viewport, pixel)
        {
            return true;
        }
        self.controller
            .select_at(&mut self.registry, &self.camera, self.viewport, pixel);
        false
    }

    /// Pointer-move: advances an active drag and submits a throttled
    /// translation patch for the dragged unit.
    pub fn pointer_move(&mut self, pixel: DVec2, now: Instant) {
        if !self.controller.is_dragging() {
            return;
        }
        self.controller
            .update_drag(&mut self.registry, &self.camera, self.viewport, pixel);
        if let Some(request) = self.current_drag_patch() {
            self.patcher
                .submit(&mut self.store, &mut self.editor, request, now);
        }
    }

    /// Pointer-up: commits an active drag, forces the final patch
    /// through, and reports the commit.
    pub fn pointer_up(&mut self, now: Instant) -> Option<DragCommit> {
        let commit = self.controller.end_drag(&self.registry, &mut self.camera)?;
        self.patcher.submit(
            &mut self.store,
            &mut self.editor,
            PatchRequest::from(&commit),
            now,
        );
        self.patcher.flush(&mut self.store, &mut self.editor, now);
        Some(commit)
    }

    /// Per-frame upkeep: writes due patches and expires the editor
    /// highlight.
    pub fn tick(&mut self, now: Instant) {
        self.patcher.tick(&mut self.store, &mut self.editor, now);
        self.editor.active_highlight(now);
    }

    fn current_drag_patch(&self) -> Option<PatchRequest> {
        let axis = self.controller.drag_axis()?;
        let object = self.registry.get(self.controller.selected()?)?;
        Some(PatchRequest {
            unit_id: object.unit_id.clone(),
            axis,
            position: object.position,
            local_delta: object.position - object.load_position,
            init_translation: object.init_translation,
        })
    }

    // ── Configuration ─────────────────────────────────────────

    /// Replace the ground grid; the horizontal drag range follows it.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.registry.set_grid(grid);
    }

    /// Replace the vertical drag range.
    pub fn set_vertical_limits(&mut self, min: f64, max: f64) {
        self.registry.limits.vertical = Range { min, max };
    }

    // ── Export and templates ──────────────────────────────────

    /// Serialize the current document state. The editor text wins when it
    /// is present and still valid JSON; otherwise the structural model is
    /// serialized.
    pub fn export_json(&self) -> Option<String> {
        let text = self.editor.text();
        if !text.trim().is_empty() && serde_json::from_str::<serde_json::Value>(text).is_ok() {
            return Some(text.to_string());
        }
        self.store.document().and_then(|d| d.to_json().ok())
    }

    /// Write the exported document to a file.
    pub fn export_file(&self, path: &Path) -> Result<(), ViewerError> {
        let text = self.export_json().ok_or(ViewerError::NoDocument)?;
        std::fs::write(path, text).map_err(|source| ViewerError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Merge a template shape into the current document under a fresh
    /// component id and re-render. With nothing loaded, a new standard
    /// assembly is created around the shape.
    pub fn add_shape(&mut self, kind: ShapeKind) -> Result<String, ViewerError> {
        let mut assembly = match self.store.document() {
            Some(Document::Standard(doc)) => doc.clone(),
            Some(Document::BRep(_)) => return Err(ViewerError::ShapeIntoBRep),
            None => StandardAssembly {
                assembly: Assembly::default(),
            },
        };

        self.shape_counter += 1;
        let id = format!("{}_{}", kind.name(), self.shape_counter);
        insert_component(&mut assembly, &id, shape_component(kind));

        let text = Document::Standard(assembly)
            .to_json()
            .map_err(DocumentError::from)?;
        self.load_text(&text)?;
        Ok(id)
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}
