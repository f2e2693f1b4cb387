//! Selection and drag control.
//!
//! The controller owns the selection lifecycle (idle → selected →
//! dragging) and the screen-space single-axis drag algorithm. The handle's
//! world position is cached per selection and kept decoupled from the
//! object's local-frame position: the object may carry a rotation, so
//! world-axis drags are converted into its local frame through the inverse
//! of its rotation-only matrix.

use glam::{DMat3, DVec2, DVec3};
use tracing::debug;

use super::camera::{OrbitCamera, ViewportSize};
use super::gizmo::{gizmo_hit_test, Axis, DistanceLabel, GIZMO_LENGTH};
use super::picking::pick_nearest;
use crate::scene::{ObjectId, SceneRegistry};

/// Pointer-to-world drag sensitivity.
pub const DRAG_SCALE: f64 = 0.01;

/// Rotation-matrix elements smaller than this are snapped to exactly zero
/// before inversion, keeping floating-point noise out of the local-frame
/// conversion.
pub const MATRIX_SNAP_EPS: f64 = 1e-10;

/// The current selection: one object and the handle's cached world
/// position.
#[derive(Debug, Clone, Copy)]
struct Selection {
    object: ObjectId,
    handle: DVec3,
}

/// In-flight drag state, all captured at drag start.
#[derive(Debug, Clone, Copy)]
struct DragState {
    axis: Axis,
    object: ObjectId,
    start_handle: DVec3,
    start_local: DVec3,
    start_pointer: DVec2,
}

/// Result of a committed drag, handed to the document patch bridge.
#[derive(Debug, Clone)]
pub struct DragCommit {
    pub object: ObjectId,
    pub unit_id: String,
    pub contour_index: Option<usize>,
    pub axis: Axis,
    /// Total distance traveled along the axis.
    pub distance: f64,
    /// The object's new local position.
    pub position: DVec3,
    /// Local-position delta accumulated since load.
    pub local_delta: DVec3,
    /// The unit's translation as stored in the JSON document at load.
    pub init_translation: [f64; 3],
}

/// Selection and manipulation-handle controller.
#[derive(Default)]
pub struct HandleController {
    selection: Option<Selection>,
    drag: Option<DragState>,
    pub label: DistanceLabel,
}

impl HandleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected object, if any.
    pub fn selected(&self) -> Option<ObjectId> {
        self.selection.map(|s| s.object)
    }

    /// World position of the handle while visible.
    pub fn handle_position(&self) -> Option<DVec3> {
        self.selection.map(|s| s.handle)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Axis of the drag in progress.
    pub fn drag_axis(&self) -> Option<Axis> {
        self.drag.map(|d| d.axis)
    }

    /// Select an object. Re-selecting the current object is a no-op;
    /// selecting a different one clears the previous selection first.
    pub fn select(&mut self, registry: &mut SceneRegistry, id: ObjectId) {
        if self.selection.is_some_and(|s| s.object == id) {
            return;
        }
        self.clear_selection(registry);

        let Some(object) = registry.get(id) else {
            return;
        };
        let handle = object.world_position();
        registry.set_highlight(id, true);
        self.selection = Some(Selection { object: id, handle });
        debug!(object = id, "selected");
    }

    /// Clear the selection, restoring the object's base color.
    pub fn clear_selection(&mut self, registry: &mut SceneRegistry) {
        if let Some(selection) = self.selection.take() {
            registry.set_highlight(selection.object, false);
        }
        self.drag = None;
        self.label.hide();
    }

    /// Cancel everything (document reload path): any in-flight drag is
    /// dropped without committing and the orbit gate reopens.
    pub fn reset(&mut self, registry: &mut SceneRegistry, camera: &mut OrbitCamera) {
        self.clear_selection(registry);
        camera.orbit_enabled = true;
    }

    /// Handle a click: picks the nearest object under the pointer, clears
    /// the selection on empty space. Clicks on the visible handle do not
    /// pick through it.
    pub fn select_at(
        &mut self,
        registry: &mut SceneRegistry,
        camera: &OrbitCamera,
        viewport: ViewportSize,
        pixel: DVec2,
    ) {
        if self.is_dragging() {
            return;
        }
        let ray = camera.screen_ray(pixel, viewport);

        if let Some(selection) = self.selection {
            if gizmo_hit_test(&ray, selection.handle, GIZMO_LENGTH).is_some() {
                return;
            }
        }

        match pick_nearest(&ray, registry) {
            Some(id) => self.select(registry, id),
            None => self.clear_selection(registry),
        }
    }

    /// Try to start an axis drag from a pointer-down. Returns true when a
    /// handle arm was hit; camera-orbit input is disabled for the duration.
    pub fn try_begin_drag(
        &mut self,
        registry: &SceneRegistry,
        camera: &mut OrbitCamera,
        viewport: ViewportSize,
        pixel: DVec2,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(selection) = self.selection else {
            return false;
        };
        let Some(object) = registry.get(selection.object) else {
            return false;
        };

        let ray = camera.screen_ray(pixel, viewport);
        let Some(axis) = gizmo_hit_test(&ray, selection.handle, GIZMO_LENGTH) else {
            return false;
        };

        self.drag = Some(DragState {
            axis,
            object: selection.object,
            start_handle: selection.handle,
            start_local: object.position,
            start_pointer: pixel,
        });
        camera.orbit_enabled = false;
        self.label.show(axis, 0.0);
        debug!(object = selection.object, axis = axis.label(), "drag started");
        true
    }

    /// Advance the drag for a pointer-move. Returns the signed distance
    /// traveled along the active axis since drag start.
    ///
    /// The computation is idempotent per pointer position: everything
    /// derives from the drag-start snapshot, so replaying the same pointer
    /// position reproduces the same clamped result.
    pub fn update_drag(
        &mut self,
        registry: &mut SceneRegistry,
        camera: &OrbitCamera,
        viewport: ViewportSize,
        pixel: DVec2,
    ) -> f64 {
        let Some(drag) = self.drag else {
            return 0.0;
        };
        let Some(selection) = self.selection.as_mut() else {
            return 0.0;
        };

        let axis_dir = drag.axis.unit();
        let aspect = viewport.aspect();

        // Screen-space direction of the world axis under the current view:
        // project the handle and handle+axis, take the difference.
        let handle = selection.handle;
        let (Some(p0), Some(p1)) = (
            camera.project_ndc(handle, aspect),
            camera.project_ndc(handle + axis_dir, aspect),
        ) else {
            return self.label.value;
        };
        let screen_axis = p1 - p0;
        let len = screen_axis.length();
        if len < 1e-9 {
            // Axis is end-on to the camera; no usable direction.
            return self.label.value;
        }
        let screen_axis = screen_axis / len;

        // Pointer displacement since drag start; screen Y points down.
        let pointer_move = DVec2::new(
            pixel.x - drag.start_pointer.x,
            -(pixel.y - drag.start_pointer.y),
        );
        let travel = pointer_move.dot(screen_axis) * DRAG_SCALE;

        // Candidate handle position, clamped into the limit box; the
        // applied delta is re-derived from the clamped result so clamping
        // never lets handle and mesh diverge.
        let candidate = drag.start_handle + axis_dir * travel;
        let clamped = registry.limits.clamp_point(candidate);
        let world_delta = clamped - drag.start_handle;

        // Convert the world-axis delta into the object's local frame.
        let Some(object) = registry.get_mut(drag.object) else {
            return 0.0;
        };
        let inverse = snapped_rotation_matrix(object.rotation_deg).inverse();
        let local_delta = inverse * world_delta;

        let new_local = registry
            .limits
            .clamp_point(drag.start_local + local_delta);
        let Some(object) = registry.get_mut(drag.object) else {
            return 0.0;
        };
        object.position = new_local;
        selection.handle = clamped;

        let distance = world_delta.dot(axis_dir);
        self.label.show(drag.axis, distance);
        distance
    }

    /// Commit the drag on pointer-up: re-enables orbit input, hides the
    /// distance label, and reports the final pose for the patch bridge.
    pub fn end_drag(
        &mut self,
        registry: &SceneRegistry,
        camera: &mut OrbitCamera,
    ) -> Option<DragCommit> {
        let drag = self.drag.take()?;
        camera.orbit_enabled = true;
        self.label.hide();

        let selection = self.selection?;
        let object = registry.get(drag.object)?;

        let distance =
            (selection.handle[drag.axis.index()] - drag.start_handle[drag.axis.index()]).abs();
        debug!(object = drag.object, axis = drag.axis.label(), distance, "drag committed");

        Some(DragCommit {
            object: drag.object,
            unit_id: object.unit_id.clone(),
            contour_index: object.contour_index,
            axis: drag.axis,
            distance,
            position: object.position,
            local_delta: object.position - object.load_position,
            init_translation: object.init_translation,
        })
    }
}

/// Rotation-only matrix of a pose (Euler degrees, order X,Y,Z), with tiny
/// elements snapped to exactly zero.
pub fn snapped_rotation_matrix(rotation_deg: DVec3) -> DMat3 {
    let m = DMat3::from_rotation_z(rotation_deg.z.to_radians())
        * DMat3::from_rotation_y(rotation_deg.y.to_radians())
        * DMat3::from_rotation_x(rotation_deg.x.to_radians());
    let mut elements = m.to_cols_array();
    for v in &mut elements {
        if v.abs() < MATRIX_SNAP_EPS {
            *v = 0.0;
        }
    }
    DMat3::from_cols_array(&elements)
}
