use glam::{DMat3, DVec3, Vec3};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Vertex stride in floats.
pub const STRIDE: usize = 9;

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Append another mesh's buffers, rebasing its indices.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Overwrite the color channel of every vertex.
    pub fn set_color(&mut self, color: [f32; 3]) {
        for i in 0..self.vertex_count() {
            let base = i * STRIDE + 6;
            self.vertices[base] = color[0];
            self.vertices[base + 1] = color[1];
            self.vertices[base + 2] = color[2];
        }
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> Vec3 {
        let base = i * STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }
}

/// Push one interleaved vertex.
pub fn push_vertex(vertices: &mut Vec<f32>, pos: [f32; 3], normal: [f32; 3], color: [f32; 3]) {
    vertices.extend_from_slice(&[
        pos[0], pos[1], pos[2], normal[0], normal[1], normal[2], color[0], color[1], color[2],
    ]);
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

/// Axis-aligned bounding box in f64 world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Compute the AABB of a mesh's vertex positions.
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);

        for i in 0..data.vertex_count() {
            let p = data.position(i).as_dvec3();
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// AABB of this box rotated and translated into world space.
    pub fn transformed(&self, rotation: &DMat3, translation: DVec3) -> Aabb {
        let corners = [
            DVec3::new(self.min.x, self.min.y, self.min.z),
            DVec3::new(self.max.x, self.min.y, self.min.z),
            DVec3::new(self.min.x, self.max.y, self.min.z),
            DVec3::new(self.max.x, self.max.y, self.min.z),
            DVec3::new(self.min.x, self.min.y, self.max.z),
            DVec3::new(self.max.x, self.min.y, self.max.z),
            DVec3::new(self.min.x, self.max.y, self.max.z),
            DVec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        for corner in corners {
            let p = *rotation * corner + translation;
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }
}

/// Wireframe-box placeholder mesh for units whose reconstruction failed.
///
/// Rendered as a distinct red unit cube scaled to the unit's extrusion
/// parameters; kept as triangle data so it flows through the same pipeline.
pub fn placeholder_box(scale: DVec3) -> MeshData {
    let color = [1.0_f32, 0.0, 0.0];
    let hx = (scale.x * 0.5) as f32;
    let hy = (scale.y * 0.5) as f32;
    let hz = (scale.z * 0.5) as f32;

    let faces: [([Vec3; 4], Vec3); 6] = [
        (
            [
                Vec3::new(-hx, -hy, hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(-hx, hy, hz),
            ],
            Vec3::Z,
        ),
        (
            [
                Vec3::new(hx, -hy, -hz),
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(-hx, hy, -hz),
                Vec3::new(hx, hy, -hz),
            ],
            Vec3::NEG_Z,
        ),
        (
            [
                Vec3::new(hx, -hy, hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(hx, hy, hz),
            ],
            Vec3::X,
        ),
        (
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(-hx, -hy, hz),
                Vec3::new(-hx, hy, hz),
                Vec3::new(-hx, hy, -hz),
            ],
            Vec3::NEG_X,
        ),
        (
            [
                Vec3::new(-hx, hy, hz),
                Vec3::new(hx, hy, hz),
                Vec3::new(hx, hy, -hz),
                Vec3::new(-hx, hy, -hz),
            ],
            Vec3::Y,
        ),
        (
            [
                Vec3::new(-hx, -hy, -hz),
                Vec3::new(hx, -hy, -hz),
                Vec3::new(hx, -hy, hz),
                Vec3::new(-hx, -hy, hz),
            ],
            Vec3::NEG_Y,
        ),
    ];

    let mut vertices = Vec::with_capacity(24 * STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / STRIDE) as u32;
        for v in quad {
            push_vertex(
                &mut vertices,
                [v.x, v.y, v.z],
                [normal.x, normal.y, normal.z],
                color,
            );
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}
