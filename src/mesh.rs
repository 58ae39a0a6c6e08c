//! Static geometry containers: vertices, indices, topology.

use std::fmt;
use std::path::Path;

use crate::colors::ColorRGB;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A model-space vertex as loaded from a mesh file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub color: ColorRGB,
}

impl Vertex {
    pub fn new(position: Vec3, uv: Vec2, normal: Vec3, tangent: Vec3) -> Self {
        Self {
            position,
            uv,
            normal,
            tangent,
            color: ColorRGB::WHITE,
        }
    }
}

/// A post-transform vertex, created fresh each frame and consumed by the
/// rasterizer within the same frame.
///
/// `position` holds the perspective-divided x, y, z but **retains the
/// original clip-space w**; the rasterizer needs it for perspective-correct
/// attribute interpolation.
#[derive(Clone, Copy, Debug)]
pub struct VertexOut {
    pub position: Vec4,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    /// Direction from the camera to the vertex, in world space.
    pub view_direction: Vec3,
    pub color: ColorRGB,
}

/// How a mesh's index sequence encodes triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Indices in consecutive non-overlapping groups of 3.
    #[default]
    TriangleList,
    /// Overlapping windows of 3; every odd window swaps vertices 1 and 2 to
    /// keep a consistent front-face winding.
    TriangleStrip,
}

/// A mesh: vertex sequence, index sequence, topology and world transform.
///
/// Index values must be valid offsets into the vertex sequence; invalid
/// indices are a programmer error and panic during traversal.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    pub world_matrix: Mat4,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world_matrix: Mat4::identity(),
        }
    }

    /// Loads the first model of an OBJ file as a triangle list.
    ///
    /// Positions, UVs and normals come from the file; tangents are derived
    /// from the triangle UV deltas (needed for normal mapping).
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path.as_ref(), &options)?;
        let model = models.first().ok_or(LoadError::NoGeometry)?;
        let mesh = &model.mesh;

        let vertex_count = mesh.positions.len() / 3;
        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..vertex_count {
            let position = Vec3::new(
                mesh.positions[3 * i],
                mesh.positions[3 * i + 1],
                mesh.positions[3 * i + 2],
            );
            let uv = if mesh.texcoords.len() >= 2 * (i + 1) {
                Vec2::new(mesh.texcoords[2 * i], 1.0 - mesh.texcoords[2 * i + 1])
            } else {
                Vec2::ZERO
            };
            let normal = if mesh.normals.len() >= 3 * (i + 1) {
                Vec3::new(
                    mesh.normals[3 * i],
                    mesh.normals[3 * i + 1],
                    mesh.normals[3 * i + 2],
                )
            } else {
                Vec3::UP
            };
            vertices.push(Vertex::new(position, uv, normal, Vec3::RIGHT));
        }

        compute_tangents(&mut vertices, &mesh.indices);

        Ok(Self::new(
            vertices,
            mesh.indices.clone(),
            PrimitiveTopology::TriangleList,
        ))
    }

    /// Iterates the logical triangles encoded by the index sequence.
    pub fn triangle_indices(&self) -> TriangleIndices<'_> {
        TriangleIndices {
            indices: &self.indices,
            topology: self.topology,
            cursor: 0,
        }
    }
}

/// Iterator over `[i0, i1, i2]` triples according to the mesh topology.
pub struct TriangleIndices<'a> {
    indices: &'a [u32],
    topology: PrimitiveTopology,
    cursor: usize,
}

impl Iterator for TriangleIndices<'_> {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        match self.topology {
            PrimitiveTopology::TriangleList => {
                let base = self.cursor * 3;
                if base + 3 > self.indices.len() {
                    return None;
                }
                self.cursor += 1;
                Some([
                    self.indices[base],
                    self.indices[base + 1],
                    self.indices[base + 2],
                ])
            }
            PrimitiveTopology::TriangleStrip => {
                let i = self.cursor;
                if self.indices.len() < 3 || i + 3 > self.indices.len() {
                    return None;
                }
                self.cursor += 1;
                // Odd windows are wound backwards by construction; swap the
                // last two vertices to restore front-face orientation.
                if i % 2 == 0 {
                    Some([self.indices[i], self.indices[i + 1], self.indices[i + 2]])
                } else {
                    Some([self.indices[i], self.indices[i + 2], self.indices[i + 1]])
                }
            }
        }
    }
}

/// Accumulates per-vertex tangents from triangle UV deltas and
/// orthogonalizes them against the vertex normals.
fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        let duv1 = v1.uv - v0.uv;
        let duv2 = v2.uv - v0.uv;

        let denom = duv1.cross(duv2);
        if denom.abs() < f32::EPSILON {
            continue; // Degenerate UV mapping
        }
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / denom;

        accumulated[i0] = accumulated[i0] + tangent;
        accumulated[i1] = accumulated[i1] + tangent;
        accumulated[i2] = accumulated[i2] + tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        // Gram-Schmidt: remove the normal component, keep the rest
        let orthogonal = tangent - vertex.normal * vertex.normal.dot(tangent);
        if orthogonal.magnitude() > f32::EPSILON {
            vertex.tangent = orthogonal.normalize();
        }
    }
}

/// Errors when loading mesh data from a file.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    Parse(tobj::LoadError),
    /// The file parsed but contained no models.
    NoGeometry,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(e) => write!(f, "failed to parse mesh file: {e}"),
            LoadError::NoGeometry => write!(f, "mesh file contains no geometry"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        [
            (Vec3::new(0.0, 0.0, 0.0), Vec2::new(0.0, 0.0)),
            (Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 0.0)),
            (Vec3::new(0.0, 1.0, 0.0), Vec2::new(0.0, 1.0)),
            (Vec3::new(1.0, 1.0, 0.0), Vec2::new(1.0, 1.0)),
        ]
        .into_iter()
        .map(|(p, uv)| Vertex::new(p, uv, -Vec3::FORWARD, Vec3::RIGHT))
        .collect()
    }

    #[test]
    fn triangle_list_consumes_groups_of_three() {
        let mesh = Mesh::new(
            quad_vertices(),
            vec![0, 1, 2, 2, 1, 3],
            PrimitiveTopology::TriangleList,
        );
        let tris: Vec<_> = mesh.triangle_indices().collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 3]]);
    }

    #[test]
    fn triangle_strip_alternates_winding() {
        let mesh = Mesh::new(
            quad_vertices(),
            vec![0, 1, 2, 3],
            PrimitiveTopology::TriangleStrip,
        );
        let tris: Vec<_> = mesh.triangle_indices().collect();
        // Window 1 is odd: vertices 1 and 2 swap to keep the winding consistent
        assert_eq!(tris, vec![[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn short_strip_yields_no_triangles() {
        let mesh = Mesh::new(quad_vertices(), vec![0, 1], PrimitiveTopology::TriangleStrip);
        assert_eq!(mesh.triangle_indices().count(), 0);
    }

    #[test]
    fn tangents_follow_the_u_axis() {
        let mut vertices = quad_vertices();
        compute_tangents(&mut vertices, &[0, 1, 2, 2, 1, 3]);
        for v in &vertices {
            // UVs increase with +X, so tangents should point along +X
            assert!(v.tangent.x > 0.99, "tangent was {:?}", v.tangent);
        }
    }
}
