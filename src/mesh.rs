use glam::{Vec2, Vec3};

/// CPU-side vertex: position, normal and texture coordinates
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// CPU-side mesh data ready to be handed to a renderer
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Axis-aligned box centered at the origin
    pub fn create_box(size: Vec3) -> Self {
        let half = size * 0.5;

        // One entry per face: (normal, tangent u, tangent v)
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, tangent_u, tangent_v) in faces {
            let base = vertices.len() as u32;
            let origin = normal * half;

            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                vertices.push(Vertex {
                    position: origin + tangent_u * half * u + tangent_v * half * v,
                    normal,
                    uv: Vec2::new((u + 1.0) * 0.5, (v + 1.0) * 0.5),
                });
            }

            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self { vertices, indices }
    }

    /// Flat plane in the XZ plane, facing up
    pub fn create_plane(width: f32, depth: f32) -> Self {
        let hw = width * 0.5;
        let hd = depth * 0.5;

        let vertices = vec![
            Vertex {
                position: Vec3::new(-hw, 0.0, -hd),
                normal: Vec3::Y,
                uv: Vec2::new(0.0, 0.0),
            },
            Vertex {
                position: Vec3::new(hw, 0.0, -hd),
                normal: Vec3::Y,
                uv: Vec2::new(1.0, 0.0),
            },
            Vertex {
                position: Vec3::new(hw, 0.0, hd),
                normal: Vec3::Y,
                uv: Vec2::new(1.0, 1.0),
            },
            Vertex {
                position: Vec3::new(-hw, 0.0, hd),
                normal: Vec3::Y,
                uv: Vec2::new(0.0, 1.0),
            },
        ];
        let indices = vec![0, 2, 1, 0, 3, 2];

        Self { vertices, indices }
    }

    /// UV sphere centered at the origin
    pub fn create_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            for segment in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;

                let x = sin_phi * theta.cos();
                let y = cos_phi;
                let z = sin_phi * theta.sin();

                vertices.push(Vertex {
                    position: Vec3::new(x, y, z) * radius,
                    normal: Vec3::new(x, y, z),
                    uv: Vec2::new(
                        segment as f32 / segments as f32,
                        ring as f32 / rings as f32,
                    ),
                });
            }
        }

        for ring in 0..rings {
            for segment in 0..segments {
                let current = ring * (segments + 1) + segment;
                let next = current + segments + 1;

                indices.push(current);
                indices.push(next);
                indices.push(current + 1);

                indices.push(current + 1);
                indices.push(next);
                indices.push(next + 1);
            }
        }

        Self { vertices, indices }
    }

    /// Load mesh data from a Wavefront OBJ file, merging all models
    pub fn from_obj(path: &str) -> anyhow::Result<Self> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let base_index = vertices.len() as u32;

            for i in 0..mesh.positions.len() / 3 {
                let position = Vec3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                );

                let normal = if !mesh.normals.is_empty() {
                    Vec3::new(
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    )
                } else {
                    Vec3::Y
                };

                let uv = if !mesh.texcoords.is_empty() {
                    Vec2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
                } else {
                    Vec2::ZERO
                };

                vertices.push(Vertex {
                    position,
                    normal,
                    uv,
                });
            }

            for &index in &mesh.indices {
                indices.push(base_index + index);
            }
        }

        Ok(Self { vertices, indices })
    }
}
