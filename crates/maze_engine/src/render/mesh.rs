//! Mesh representation for procedurally generated geometry
//!
//! A [`Mesh`] is a flat vertex array plus a triangle index list. It is a pure
//! data container: the vertex layout is `#[repr(C)]` and `Pod` so that a
//! rendering backend can upload [`Mesh::vertex_bytes`] and
//! [`Mesh::index_bytes`] as-is, but nothing in here knows about any GPU API.

// The Pod and Zeroable derives expand to `unsafe impl`
#![allow(unsafe_code)]

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec3;

/// Vertex with position and normal
///
/// Normals are stored per vertex, so shapes that need flat faces (boxes)
/// duplicate their corner positions per face.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in object space
    pub position: [f32; 3],

    /// Unit normal in object space
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Position as a vector
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// True when the vertex was collapsed onto the object-space origin
    pub fn is_at_origin(&self) -> bool {
        self.position == [0.0; 3]
    }
}

/// Triangle mesh: vertices plus a flat list of index triples
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    ///
    /// # Panics
    ///
    /// When the index list is not made of whole triangles or references a
    /// vertex that does not exist. Both are bugs in the generator, not
    /// runtime conditions.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        assert!(
            indices.len() % 3 == 0,
            "index count {} is not a multiple of 3",
            indices.len()
        );
        if let Some(&bad) = indices.iter().find(|&&index| index as usize >= vertices.len()) {
            panic!("index {bad} out of range for {} vertices", vertices.len());
        }

        Self { vertices, indices }
    }

    /// Vertex data
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle index data
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate vertex positions
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|vertex| vertex.position)
    }

    /// Iterate vertex normals, parallel to [`Mesh::positions`]
    pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|vertex| vertex.normal)
    }

    /// Number of vertices sitting on the object-space origin
    pub fn collapsed_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|vertex| vertex.is_at_origin()).count()
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
