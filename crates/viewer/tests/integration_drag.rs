//! Integration tests for the pointer-driven selection and drag flow,
//! including the JSON write-back after a committed drag.

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use glam::{DVec2, DVec3};
use serde_json::json;

use cadview::fixtures;
use cadview::viewport::camera::{OrbitCamera, ViewportSize};
use cadview::viewport::controller::DRAG_SCALE;
use cadview::viewport::gizmo::{Axis, GIZMO_LENGTH};
use cadview::Viewer;

/// Pixel position whose drag displacement corresponds to a desired world
/// travel along `axis`, derived from the projected axis direction the
/// same way the controller derives it.
fn pointer_for_travel(
    camera: &OrbitCamera,
    viewport: ViewportSize,
    handle: DVec3,
    axis: Axis,
    start: DVec2,
    travel: f64,
) -> DVec2 {
    let aspect = viewport.aspect();
    let p0 = camera.project_ndc(handle, aspect).unwrap();
    let p1 = camera.project_ndc(handle + axis.unit(), aspect).unwrap();
    let screen_axis = (p1 - p0).normalize();
    let magnitude = travel / DRAG_SCALE;
    DVec2::new(
        start.x + screen_axis.x * magnitude,
        start.y - screen_axis.y * magnitude,
    )
}

/// Click the object at `world`, then press the pointer on the middle of
/// the chosen handle arm. Returns the arm press pixel.
fn select_and_grab(viewer: &mut Viewer, world: DVec3, axis: Axis) -> DVec2 {
    let object_px = viewer.camera.project_px(world, viewer.viewport).unwrap();
    assert!(!viewer.pointer_down(object_px), "click should select, not drag");
    assert!(viewer.controller.selected().is_some(), "nothing selected");

    let handle = viewer.controller.handle_position().unwrap();
    let arm_px = viewer
        .camera
        .project_px(handle + axis.unit() * (GIZMO_LENGTH * 0.5), viewer.viewport)
        .unwrap();
    assert!(viewer.pointer_down(arm_px), "arm press should start a drag");
    arm_px
}

#[test]
fn click_selects_and_empty_space_clears() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(&fixtures::standard_slab_json("slab", [0.0, 0.0, 0.0]))
        .unwrap();

    let object_px = viewer
        .camera
        .project_px(DVec3::ZERO, viewer.viewport)
        .unwrap();
    viewer.pointer_down(object_px);
    assert_eq!(viewer.controller.selected(), Some(0));
    assert!(viewer.registry.get(0).unwrap().highlighted);

    viewer.pointer_down(DVec2::new(4.0, 4.0));
    assert_eq!(viewer.controller.selected(), None);
    assert!(!viewer.registry.get(0).unwrap().highlighted);
}

#[test]
fn clamped_y_drag_commits_limit_value_and_patches_json() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(&fixtures::standard_slab_json("slab", [0.0, 0.0, 0.0]))
        .unwrap();

    let start_px = select_and_grab(&mut viewer, DVec3::ZERO, Axis::Y);
    assert!(!viewer.camera.orbit_enabled);
    let handle = viewer.controller.handle_position().unwrap();

    // A displacement that would compute world Y = 15 against max = 10.
    let t0 = Instant::now();
    let target = pointer_for_travel(&viewer.camera, viewer.viewport, handle, Axis::Y, start_px, 15.0);
    viewer.pointer_move(target, t0);

    assert!(viewer.controller.label.visible);
    assert_relative_eq!(viewer.controller.label.value, 10.0, epsilon = 1e-9);

    let commit = viewer.pointer_up(t0 + Duration::from_millis(60)).unwrap();
    assert_relative_eq!(commit.distance, 10.0, epsilon = 1e-9);
    assert_eq!(commit.position.y, 10.0);
    assert!(viewer.camera.orbit_enabled);
    assert!(!viewer.controller.label.visible);

    // Whole-vector write-back, clamped value and untouched axes exact.
    let value = viewer.store.value().unwrap();
    assert_eq!(
        value["assembly"]["components"]["slab"]["transform"]["translation"],
        json!([0.0, 10.0, 0.0])
    );
    // Editor mirrors the patched document.
    assert_eq!(viewer.editor.text(), viewer.store.text());
    assert!(viewer
        .editor
        .active_highlight(t0 + Duration::from_millis(61))
        .is_some());
}

#[test]
fn brep_drag_rewrites_single_storage_slot() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(&fixtures::brep_part_at_json("p", [1.0, 2.0, 3.0]))
        .unwrap();

    // Stored [x, z, y] = [1, 2, 3]: the part sits at render (1, 3, 2).
    let start_px = select_and_grab(&mut viewer, DVec3::new(1.0, 3.0, 2.0), Axis::Y);
    let handle = viewer.controller.handle_position().unwrap();

    let t0 = Instant::now();
    let target = pointer_for_travel(&viewer.camera, viewer.viewport, handle, Axis::Y, start_px, 1.5);
    viewer.pointer_move(target, t0);
    viewer.pointer_up(t0 + Duration::from_millis(60)).unwrap();

    let vector = &viewer.store.value().unwrap()["parts"]["p"]["coordinate_system"]
        ["Translation Vector"];
    assert_relative_eq!(vector[0].as_f64().unwrap(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(vector[1].as_f64().unwrap(), 2.0, epsilon = 1e-9);
    // Dragged render-Y lands in storage slot 2: initial 3 plus travel 1.5.
    assert_relative_eq!(vector[2].as_f64().unwrap(), 4.5, epsilon = 1e-6);
}

#[test]
fn rotated_component_patch_carries_local_frame_position() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(
            r#"{
  "assembly": {
    "components": {
      "turned": {
        "type": "extruded_sketch",
        "sketch": { "contours": [ { "type": "rectangle", "center": [0, 0], "width": 4, "height": 2 } ] },
        "extrusion": { "distance": 1 },
        "transform": { "translation": [0, 1, 0], "rotation": [0, 90, 0] }
      }
    }
  }
}"#,
        )
        .unwrap();

    let start_px = select_and_grab(&mut viewer, DVec3::new(0.0, 1.0, 0.0), Axis::X);
    let handle = viewer.controller.handle_position().unwrap();

    let t0 = Instant::now();
    let target = pointer_for_travel(&viewer.camera, viewer.viewport, handle, Axis::X, start_px, 1.5);
    viewer.pointer_move(target, t0);
    viewer.pointer_up(t0 + Duration::from_millis(60)).unwrap();

    // A world-X drag on a part turned 90 degrees about Y moves its local
    // Z; the standard write-back stores the local position wholesale.
    let translation = &viewer.store.value().unwrap()["assembly"]["components"]["turned"]
        ["transform"]["translation"];
    assert_relative_eq!(translation[0].as_f64().unwrap(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(translation[1].as_f64().unwrap(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(translation[2].as_f64().unwrap(), 1.5, epsilon = 1e-6);

    // The handle itself moved along true world X.
    assert_relative_eq!(
        viewer.registry.get(0).unwrap().position.z,
        1.5,
        epsilon = 1e-6
    );
}

#[test]
fn reload_mid_drag_cancels_without_commit() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(&fixtures::standard_slab_json("slab", [0.0, 0.0, 0.0]))
        .unwrap();
    select_and_grab(&mut viewer, DVec3::ZERO, Axis::Y);
    assert!(viewer.controller.is_dragging());

    viewer.load_text(fixtures::standard_box_json()).unwrap();

    assert!(!viewer.controller.is_dragging());
    assert_eq!(viewer.controller.selected(), None);
    assert!(viewer.camera.orbit_enabled);
    assert!(viewer.pointer_up(Instant::now()).is_none());
    // The new document is untouched by the abandoned drag.
    let value = viewer.store.value().unwrap();
    assert_eq!(
        value["assembly"]["components"]["base"]["transform"]["translation"],
        json!([0.0, 2.5, 0.0])
    );
}

#[test]
fn selecting_second_object_restores_first() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(fixtures::standard_two_components_json())
        .unwrap();

    // Boss sits at (0, 2, 0), plate at (0, 0.5, 0) — pick each directly.
    viewer.controller.select(&mut viewer.registry, 0);
    viewer.controller.select(&mut viewer.registry, 1);
    assert!(!viewer.registry.get(0).unwrap().highlighted);
    assert!(viewer.registry.get(1).unwrap().highlighted);
    assert_eq!(viewer.controller.selected(), Some(1));
}
