//! Scene registry: the live collection of reconstructed objects, plus the
//! drag-limit box and ground-grid configuration.

use glam::{DMat3, DVec3};

use crate::build::{BuildResult, BuiltUnit};
use crate::geometry::mesh::{Aabb, MeshData};

/// Stable handle of an object in the registry (its table index for the
/// current render batch).
pub type ObjectId = usize;

/// Highlight tint applied to the selected object.
const HIGHLIGHT_COLOR: [f32; 3] = [0.3, 0.7, 0.9];

/// Ground-plane grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub size: f64,
    pub divisions: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            divisions: 20,
        }
    }
}

/// One axis range of the drag-limit box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

/// The drag-limit box: every object position and the manipulation handle
/// stay inside it. Horizontal applies to X and Z, vertical to Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLimits {
    pub horizontal: Range,
    pub vertical: Range,
}

impl DragLimits {
    /// Limits derived from the grid: horizontal ±size/2, vertical 0..10.
    pub fn from_grid(grid: &GridConfig) -> Self {
        Self {
            horizontal: Range {
                min: -grid.size / 2.0,
                max: grid.size / 2.0,
            },
            vertical: Range { min: 0.0, max: 10.0 },
        }
    }

    /// Clamp a point into the box, per coordinate.
    pub fn clamp_point(&self, p: DVec3) -> DVec3 {
        DVec3::new(
            self.horizontal.clamp(p.x),
            self.vertical.clamp(p.y),
            self.horizontal.clamp(p.z),
        )
    }
}

impl Default for DragLimits {
    fn default() -> Self {
        Self::from_grid(&GridConfig::default())
    }
}

/// A reconstructed object registered in the scene.
pub struct SceneObject {
    /// Originating component/part id.
    pub unit_id: String,
    /// Contour index within the component (standard format).
    pub contour_index: Option<usize>,
    pub mesh: MeshData,
    /// Local-space bounding box of the mesh.
    pub local_aabb: Aabb,
    /// World translation (the object's local position).
    pub position: DVec3,
    /// Euler rotation, degrees, order X,Y,Z.
    pub rotation_deg: DVec3,
    pub scale: DVec3,
    /// Position assigned at load time, before any drag.
    pub load_position: DVec3,
    /// Translation exactly as stored in the JSON document.
    pub init_translation: [f64; 3],
    /// Assigned fill color.
    pub base_color: [f32; 3],
    pub highlighted: bool,
    pub placeholder: bool,
}

impl SceneObject {
    /// Rotation-only matrix of the object's pose.
    pub fn rotation_matrix(&self) -> DMat3 {
        let r = self.rotation_deg;
        DMat3::from_rotation_z(r.z.to_radians())
            * DMat3::from_rotation_y(r.y.to_radians())
            * DMat3::from_rotation_x(r.x.to_radians())
    }

    /// World position of the object (its translation).
    pub fn world_position(&self) -> DVec3 {
        self.position
    }

    /// Bounding box in world space under the current pose.
    pub fn world_aabb(&self) -> Aabb {
        let scaled = Aabb {
            min: self.local_aabb.min * self.scale,
            max: self.local_aabb.max * self.scale,
        };
        scaled.transformed(&self.rotation_matrix(), self.position)
    }

    /// Current render color.
    pub fn color(&self) -> [f32; 3] {
        if self.highlighted {
            HIGHLIGHT_COLOR
        } else {
            self.base_color
        }
    }
}

/// The registry: an indexed arena of scene objects rebuilt wholesale on
/// every render.
#[derive(Default)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
    pub grid: GridConfig,
    pub limits: DragLimits,
}

impl SceneRegistry {
    pub fn new() -> Self {
        let grid = GridConfig::default();
        let limits = DragLimits::from_grid(&grid);
        Self {
            objects: Vec::new(),
            grid,
            limits,
        }
    }

    /// Replace the grid and rederive the horizontal drag range from it.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.limits.horizontal = Range {
            min: -grid.size / 2.0,
            max: grid.size / 2.0,
        };
        self.grid = grid;
    }

    /// Drop every object. Buffers are released with them.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Register one built unit; its position is clamped into the limits.
    pub fn add(&mut self, unit: BuiltUnit) -> ObjectId {
        let color = unit
            .mesh
            .vertices
            .get(6..9)
            .map(|c| [c[0], c[1], c[2]])
            .unwrap_or([0.5, 0.5, 0.5]);
        let position = self.limits.clamp_point(unit.translation);
        let local_aabb = Aabb::from_mesh(&unit.mesh);

        let object = SceneObject {
            unit_id: unit.unit_id,
            contour_index: unit.contour_index,
            mesh: unit.mesh,
            local_aabb,
            position,
            rotation_deg: unit.rotation_deg,
            scale: unit.scale,
            load_position: position,
            init_translation: unit.init_translation,
            base_color: color,
            highlighted: false,
            placeholder: unit.placeholder,
        };

        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Register a whole build batch, returning the new object ids.
    pub fn add_batch(&mut self, result: BuildResult) -> Vec<ObjectId> {
        result.units.into_iter().map(|u| self.add(u)).collect()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate objects with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate()
    }

    /// Ids of every object belonging to a document unit.
    pub fn find_by_unit(&self, unit_id: &str) -> Vec<ObjectId> {
        self.iter()
            .filter(|(_, o)| o.unit_id == unit_id)
            .map(|(id, _)| id)
            .collect()
    }

    /// Toggle the selection highlight of one object.
    pub fn set_highlight(&mut self, id: ObjectId, on: bool) {
        if let Some(object) = self.objects.get_mut(id) {
            if object.highlighted != on {
                object.highlighted = on;
                let color = if on {
                    HIGHLIGHT_COLOR
                } else {
                    object.base_color
                };
                object.mesh.set_color(color);
            }
        }
    }
}
