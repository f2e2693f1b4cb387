//! Integration tests for the document side: round-trip export, editor
//! apply, file I/O, and shape-template merging.

use std::time::{Duration, Instant};

use cadview::document::HIGHLIGHT_DURATION;
use cadview::fixtures;
use cadview::Viewer;

use cadview_model::shapes::ShapeKind;
use glam::{DVec2, DVec3};

#[test]
fn load_then_export_roundtrips_byte_for_byte() {
    let mut viewer = Viewer::new();
    viewer.load_text(fixtures::standard_box_json()).unwrap();
    // Zero drags: the export must reproduce the input exactly.
    assert_eq!(viewer.export_json().unwrap(), fixtures::standard_box_json());
}

#[test]
fn export_survives_file_roundtrip() {
    let dir = std::env::temp_dir();
    let model_path = dir.join("cadview_it_model.json");
    let export_path = dir.join("cadview_it_export.json");
    std::fs::write(&model_path, fixtures::standard_box_json()).unwrap();

    let mut viewer = Viewer::new();
    let stats = viewer.load_file(&model_path).unwrap();
    assert_eq!(stats.unit_count, 1);

    viewer.export_file(&export_path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&export_path).unwrap(),
        fixtures::standard_box_json()
    );
}

#[test]
fn missing_file_reports_io_error_and_keeps_state() {
    let mut viewer = Viewer::new();
    viewer.load_text(fixtures::standard_box_json()).unwrap();
    let missing = std::env::temp_dir().join("cadview_it_does_not_exist.json");
    assert!(viewer.load_file(&missing).is_err());
    assert_eq!(viewer.registry.len(), 1);
}

#[test]
fn apply_editor_changes_rebuilds_scene() {
    let mut viewer = Viewer::new();
    viewer.load_text(fixtures::standard_box_json()).unwrap();
    assert_eq!(viewer.registry.len(), 1);

    viewer
        .editor
        .set_text(fixtures::standard_two_components_json());
    let stats = viewer.apply_editor_changes().unwrap();
    assert_eq!(stats.unit_count, 2);
    assert_eq!(viewer.registry.len(), 2);
}

#[test]
fn invalid_editor_text_keeps_render_state() {
    let mut viewer = Viewer::new();
    viewer.load_text(fixtures::standard_box_json()).unwrap();
    viewer.editor.set_text("{ not: json");
    assert!(viewer.apply_editor_changes().is_err());
    assert_eq!(viewer.registry.len(), 1);
    assert_eq!(viewer.store.text(), fixtures::standard_box_json());
}

#[test]
fn drag_patch_highlight_expires_on_tick() {
    let mut viewer = Viewer::new();
    viewer
        .load_text(&fixtures::standard_slab_json("slab", [0.0, 0.0, 0.0]))
        .unwrap();

    // Drive a drag through the pointer protocol.
    let object_px = viewer
        .camera
        .project_px(DVec3::ZERO, viewer.viewport)
        .unwrap();
    viewer.pointer_down(object_px);
    let handle = viewer.controller.handle_position().unwrap();
    let arm_px = viewer
        .camera
        .project_px(
            handle + DVec3::Y * (cadview::viewport::gizmo::GIZMO_LENGTH * 0.5),
            viewer.viewport,
        )
        .unwrap();
    assert!(viewer.pointer_down(arm_px));

    let t0 = Instant::now();
    viewer.pointer_move(arm_px + DVec2::new(0.0, -80.0), t0);
    viewer.pointer_up(t0 + Duration::from_millis(60)).unwrap();

    let t1 = t0 + Duration::from_millis(100);
    viewer.tick(t1);
    assert!(viewer.editor.active_highlight(t1).is_some());

    let t2 = t1 + HIGHLIGHT_DURATION + Duration::from_millis(1);
    viewer.tick(t2);
    assert!(viewer.editor.active_highlight(t2).is_none());
}

#[test]
fn added_shapes_land_in_document_and_scene() {
    let mut viewer = Viewer::new();
    viewer.load_text(fixtures::standard_box_json()).unwrap();

    let id = viewer.add_shape(ShapeKind::Cylinder).unwrap();
    assert_eq!(viewer.registry.len(), 2);

    // The merged component is part of the document text now.
    let value = viewer.store.value().unwrap();
    let component = &value["assembly"]["components"][&id];
    assert_eq!(component["type"], "extruded_sketch");
    assert_eq!(component["extrusion"]["distance"], 6.0);

    // And survives an export/reload cycle.
    let exported = viewer.export_json().unwrap();
    let mut restored = Viewer::new();
    restored.load_text(&exported).unwrap();
    assert_eq!(restored.registry.len(), 2);
}

#[test]
fn editor_change_flag_tracks_updates() {
    let mut viewer = Viewer::new();
    viewer.editor.take_changed();
    viewer.load_text(fixtures::standard_box_json()).unwrap();
    assert!(viewer.editor.take_changed());
    assert!(!viewer.editor.take_changed());
}
