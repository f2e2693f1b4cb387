//! Throttled translation write-back into the document.
//!
//! Drag updates rewrite the manipulated unit's translation in the live
//! parsed value and re-serialize the whole document into the editor
//! buffer, preserving the scroll position and briefly highlighting the
//! patched unit. Bursts inside the throttle window coalesce into one
//! write; a failed patch is logged and abandoned, never corrupting the
//! editor's (possibly hand-edited) text.

use std::time::{Duration, Instant};

use glam::DVec3;
use serde_json::{json, Value};
use tracing::warn;

use super::editor::EditorBuffer;
use super::store::DocumentStore;
use crate::viewport::controller::DragCommit;
use crate::viewport::gizmo::Axis;

/// Coalescing window for patch writes.
pub const PATCH_THROTTLE: Duration = Duration::from_millis(50);

/// One translation write-back request.
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub unit_id: String,
    pub axis: Axis,
    /// The object's local position after the drag step.
    pub position: DVec3,
    /// Local-position delta accumulated since load.
    pub local_delta: DVec3,
    /// The unit's translation as stored in the document at load time
    /// (B-rep storage order).
    pub init_translation: [f64; 3],
}

impl From<&DragCommit> for PatchRequest {
    fn from(commit: &DragCommit) -> Self {
        Self {
            unit_id: commit.unit_id.clone(),
            axis: commit.axis,
            position: commit.position,
            local_delta: commit.local_delta,
            init_translation: commit.init_translation,
        }
    }
}

/// The document patch bridge.
#[derive(Default)]
pub struct PatchBridge {
    pending: Option<PatchRequest>,
    last_write: Option<Instant>,
}

impl PatchBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit a patch. It is written immediately when outside the
    /// throttle window; otherwise it replaces any pending request and is
    /// written on the next due tick or flush.
    pub fn submit(
        &mut self,
        store: &mut DocumentStore,
        editor: &mut EditorBuffer,
        request: PatchRequest,
        now: Instant,
    ) {
        let throttled = self
            .last_write
            .is_some_and(|t| now.duration_since(t) < PATCH_THROTTLE);
        if throttled {
            self.pending = Some(request);
        } else {
            self.write(store, editor, &request, now);
        }
    }

    /// Write the pending patch once its throttle window has elapsed.
    pub fn tick(&mut self, store: &mut DocumentStore, editor: &mut EditorBuffer, now: Instant) {
        let due = self
            .last_write
            .is_none_or(|t| now.duration_since(t) >= PATCH_THROTTLE);
        if due {
            if let Some(request) = self.pending.take() {
                self.write(store, editor, &request, now);
            }
        }
    }

    /// Force out any pending patch regardless of the window (drag-end).
    pub fn flush(&mut self, store: &mut DocumentStore, editor: &mut EditorBuffer, now: Instant) {
        if let Some(request) = self.pending.take() {
            self.write(store, editor, &request, now);
        }
    }

    fn write(
        &mut self,
        store: &mut DocumentStore,
        editor: &mut EditorBuffer,
        request: &PatchRequest,
        now: Instant,
    ) {
        self.last_write = Some(now);
        if let Err(message) = apply_patch(store, editor, request, now) {
            warn!(unit = %request.unit_id, %message, "patch abandoned");
        }
    }
}

/// Apply one translation patch to the store and mirror it into the
/// editor buffer.
///
/// The editor text is authoritative: if it was hand-edited since the
/// last sync it is re-parsed first, and a buffer that no longer parses
/// abandons the patch without touching the user's text.
fn apply_patch(
    store: &mut DocumentStore,
    editor: &mut EditorBuffer,
    request: &PatchRequest,
    now: Instant,
) -> Result<(), String> {
    if editor.text() != store.text() && !editor.text().trim().is_empty() {
        store
            .set_text(editor.text())
            .map_err(|e| format!("editor text no longer parses: {e}"))?;
    }

    let Some(mut value) = store.value_cloned() else {
        return Err("no document loaded".to_string());
    };

    patch_value(&mut value, request)?;

    let text = store
        .rewrite_from_value(value)
        .map_err(|e| e.to_string())?;
    editor.set_text_preserving_scroll(text);

    if let Some((start, end)) = find_unit_lines(editor.text(), &request.unit_id) {
        editor.highlight_lines(start, end, now);
    }
    Ok(())
}

/// Write the request's translation into the parsed document value.
///
/// Standard components get their `transform.translation` replaced
/// wholesale. B-rep parts get the single dragged-axis entry of the
/// `Translation Vector` rewritten as the initial stored component plus
/// the local delta on that axis, in the `[x, z, y]` storage order.
fn patch_value(value: &mut Value, request: &PatchRequest) -> Result<(), String> {
    if value
        .get("assembly")
        .and_then(|a| a.get("components"))
        .is_some()
    {
        let component = value["assembly"]["components"]
            .get_mut(&request.unit_id)
            .ok_or_else(|| format!("component `{}` not in document", request.unit_id))?;
        if !component.is_object() {
            return Err(format!("component `{}` is not an object", request.unit_id));
        }
        match component.get("transform") {
            None | Some(Value::Null) | Some(Value::Object(_)) => {}
            Some(_) => return Err("component transform is not an object".to_string()),
        }
        let p = request.position;
        component["transform"]["translation"] = json!([p.x, p.y, p.z]);
        Ok(())
    } else if let Some(parts) = value.get_mut("parts") {
        let part = parts
            .get_mut(&request.unit_id)
            .ok_or_else(|| format!("part `{}` not in document", request.unit_id))?;
        let vector = part
            .get_mut("coordinate_system")
            .and_then(|cs| cs.get_mut("Translation Vector"))
            .and_then(|tv| tv.as_array_mut())
            .ok_or_else(|| format!("part `{}` has no Translation Vector", request.unit_id))?;
        if vector.len() != 3 {
            return Err(format!(
                "part `{}` Translation Vector has {} entries",
                request.unit_id,
                vector.len()
            ));
        }
        let storage = request.axis.storage_index();
        let moved = request.init_translation[storage] + request.local_delta[request.axis.index()];
        vector[storage] = json!(moved);
        Ok(())
    } else {
        Err("document has neither components nor parts".to_string())
    }
}

/// Line range (0-based, inclusive) of a unit's object in pretty-printed
/// text, located by its quoted key and closed by brace matching.
fn find_unit_lines(text: &str, unit_id: &str) -> Option<(usize, usize)> {
    let needle = format!("\"{unit_id}\"");
    let mut start: Option<usize> = None;
    let mut depth = 0i32;

    for (line_no, line) in text.lines().enumerate() {
        match start {
            None => {
                if line.contains(&needle) {
                    if brace_delta(line) <= 0 {
                        return Some((line_no, line_no));
                    }
                    start = Some(line_no);
                    depth = brace_delta(line);
                }
            }
            Some(first) => {
                depth += brace_delta(line);
                if depth <= 0 {
                    return Some((first, line_no));
                }
            }
        }
    }
    start.map(|first| (first, text.lines().count().saturating_sub(1)))
}

fn brace_delta(line: &str) -> i32 {
    line.chars()
        .map(|c| match c {
            '{' => 1,
            '}' => -1,
            _ => 0,
        })
        .sum()
}
