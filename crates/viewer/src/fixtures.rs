//! Factory functions for document test data.
//!
//! Ready-made JSON documents for both schemas, used by the unit and
//! integration suites. Documents enter the engine as text, so most
//! factories hand out raw JSON.

/// Standard assembly with one 5x5x5 box component ("base") at [0, 2.5, 0].
pub fn standard_box_json() -> &'static str {
    r#"{
  "assembly": {
    "components": {
      "base": {
        "type": "extruded_sketch",
        "sketch": {
          "planes": ["XY"],
          "contours": [
            { "type": "rectangle", "center": [0, 0], "width": 5, "height": 5 }
          ]
        },
        "extrusion": { "distance": 5, "direction": [0, 0, 1] },
        "transform": { "translation": [0, 2.5, 0], "rotation": [0, 0, 0] }
      }
    }
  }
}"#
}

/// Standard assembly with one rectangle slab at the given translation.
pub fn standard_slab_json(id: &str, translation: [f64; 3]) -> String {
    format!(
        r#"{{
  "assembly": {{
    "components": {{
      "{id}": {{
        "type": "extruded_sketch",
        "sketch": {{
          "contours": [
            {{ "type": "rectangle", "center": [0, 0], "width": 4, "height": 4 }}
          ]
        }},
        "extrusion": {{ "distance": 1 }},
        "transform": {{ "translation": [{}, {}, {}], "rotation": [0, 0, 0] }}
      }}
    }}
  }}
}}"#,
        translation[0], translation[1], translation[2]
    )
}

/// Standard assembly with two components: a plate and a cylindrical boss.
pub fn standard_two_components_json() -> &'static str {
    r#"{
  "assembly": {
    "components": {
      "plate": {
        "type": "extruded_sketch",
        "sketch": {
          "contours": [
            { "type": "rectangle", "center": [0, 0], "width": 6, "height": 4 }
          ]
        },
        "extrusion": { "distance": 1 },
        "transform": { "translation": [0, 0.5, 0], "rotation": [0, 0, 0] }
      },
      "boss": {
        "type": "extruded_sketch",
        "sketch": {
          "contours": [
            { "type": "circle", "center": [0, 0], "radius": 1 }
          ]
        },
        "extrusion": { "distance": 2 },
        "transform": { "translation": [0, 2, 0], "rotation": [0, 0, 0] }
      }
    }
  }
}"#
}

/// B-rep part whose single loop is a full circle (Center [1, 1], Radius 2).
pub fn brep_circle_json() -> &'static str {
    r#"{
  "final_name": "disc",
  "parts": {
    "part_1": {
      "coordinate_system": {
        "Euler Angles": [0, 0, 0],
        "Translation Vector": [0, 0, 0]
      },
      "sketch": {
        "face_1": {
          "loop_1": {
            "circle_0": { "Center": [1, 1], "Radius": 2 }
          }
        }
      },
      "extrusion": { "extrude_depth_towards_normal": 1, "sketch_scale": 1 }
    }
  }
}"#
}

/// B-rep part at the given stored translation (storage order [x, z, y]).
pub fn brep_part_at_json(id: &str, translation: [f64; 3]) -> String {
    format!(
        r#"{{
  "parts": {{
    "{id}": {{
      "coordinate_system": {{
        "Euler Angles": [0, 0, 0],
        "Translation Vector": [{}, {}, {}]
      }},
      "sketch": {{
        "face_1": {{
          "loop_1": {{
            "circle_0": {{ "Center": [0, 0], "Radius": 1 }}
          }}
        }}
      }},
      "extrusion": {{ "extrude_depth_towards_normal": 1, "sketch_scale": 1 }}
    }}
  }}
}}"#,
        translation[0], translation[1], translation[2]
    )
}

/// B-rep part whose face carries an outer rectangle loop and an inner
/// circular hole loop.
pub fn brep_plate_with_hole_json() -> &'static str {
    r#"{
  "final_name": "plate_with_hole",
  "parts": {
    "plate": {
      "coordinate_system": {
        "Euler Angles": [0, 0, 0],
        "Translation Vector": [0, 0, 2]
      },
      "sketch": {
        "face_1": {
          "loop_1": {
            "line_1": { "Start Point": [-2, -2], "End Point": [2, -2] },
            "line_2": { "Start Point": [2, -2], "End Point": [2, 2] },
            "line_3": { "Start Point": [2, 2], "End Point": [-2, 2] },
            "line_4": { "Start Point": [-2, 2], "End Point": [-2, -2] }
          },
          "loop_2": {
            "circle_0": { "Center": [0, 0], "Radius": 1 }
          }
        }
      },
      "extrusion": { "extrude_depth_towards_normal": 1, "sketch_scale": 1 }
    }
  }
}"#
}

/// B-rep part with a rounded-slot outline: two lines joined by two arcs,
/// listed out of order and with one arc reversed.
pub fn brep_slot_json() -> &'static str {
    r#"{
  "parts": {
    "slot": {
      "coordinate_system": {
        "Euler Angles": [0, 0, 0],
        "Translation Vector": [0, 0, 1]
      },
      "sketch": {
        "face_1": {
          "loop_1": {
            "line_top": { "Start Point": [4, 2], "End Point": [0, 2] },
            "arc_right": { "Start Point": [4, 2], "Mid Point": [5, 1], "End Point": [4, 0] },
            "line_bottom": { "Start Point": [0, 0], "End Point": [4, 0] },
            "arc_left": { "Start Point": [0, 2], "Mid Point": [-1, 1], "End Point": [0, 0] }
          }
        }
      },
      "extrusion": { "extrude_depth_towards_normal": 0.5, "sketch_scale": 1 }
    }
  }
}"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadview_model::{Document, DocumentFormat};

    #[test]
    fn fixtures_parse_as_their_format() {
        for (text, format) in [
            (standard_box_json().to_string(), DocumentFormat::Standard),
            (
                standard_slab_json("slab", [1.0, 2.0, 3.0]),
                DocumentFormat::Standard,
            ),
            (
                standard_two_components_json().to_string(),
                DocumentFormat::Standard,
            ),
            (brep_circle_json().to_string(), DocumentFormat::BRep),
            (
                brep_part_at_json("p", [1.0, 2.0, 3.0]),
                DocumentFormat::BRep,
            ),
            (brep_plate_with_hole_json().to_string(), DocumentFormat::BRep),
            (brep_slot_json().to_string(), DocumentFormat::BRep),
        ] {
            let document = Document::from_json(&text).unwrap();
            assert_eq!(document.format(), format);
        }
    }

    #[test]
    fn slab_translation_lands_in_transform() {
        let text = standard_slab_json("s", [0.5, 1.5, -2.0]);
        let Document::Standard(doc) = Document::from_json(&text).unwrap() else {
            panic!("expected standard");
        };
        assert_eq!(
            doc.assembly.components["s"].transform.translation,
            [0.5, 1.5, -2.0]
        );
    }

    #[test]
    fn slot_loop_has_two_arcs_and_two_lines() {
        let Document::BRep(doc) = Document::from_json(brep_slot_json()).unwrap() else {
            panic!("expected B-rep");
        };
        let face = &doc.parts["slot"].sketch["face_1"];
        let looped = &face["loop_1"];
        assert_eq!(looped.len(), 4);
        assert!(looped.keys().filter(|k| k.starts_with("arc_")).count() == 2);
    }
}
