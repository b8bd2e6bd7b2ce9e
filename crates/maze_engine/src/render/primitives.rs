//! Procedural mesh generation
//!
//! Two primitive families are supported: the unit box and the UV sphere. The
//! sphere can additionally have a wedge collapsed out of its front half, which
//! is how the avatar's mouth is animated (the topology never changes, only
//! vertex positions do).

use super::mesh::{Mesh, Vertex};
use crate::foundation::math::constants::{PI, TAU};

/// Fraction of the latitude range where the wedge cut ends (measured from the
/// north pole)
const MOUTH_LOWER_EDGE: f32 = 0.6;

/// Fraction of the longitude range covered by the wedge cut
const MOUTH_WIDTH: f32 = 0.5;

/// Strategy that produces a mesh on demand
///
/// Renderables keep their generator around so they can rebuild their geometry
/// whenever a parameter changes.
pub trait MeshGenerator {
    /// Build a fresh mesh
    fn generate(&self) -> Mesh;
}

/// Unit box generator (half-extent 1 on every axis)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxMesh;

impl MeshGenerator for BoxMesh {
    fn generate(&self) -> Mesh {
        make_box()
    }
}

/// UV sphere generator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphereMesh(pub SphereParams);

impl MeshGenerator for SphereMesh {
    fn generate(&self) -> Mesh {
        make_sphere(&self.0)
    }
}

/// Parameters of a UV sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    /// Horizontal stripes, pole to pole
    pub latitude_bands: u32,
    /// Vertical stripes around the Y axis
    pub longitude_bands: u32,
    /// Sphere radius
    pub radius: f32,
    /// How far the mouth wedge is open, 0 for a closed sphere
    pub mouth_open: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            latitude_bands: 35,
            longitude_bands: 35,
            radius: 1.0,
            mouth_open: 0.0,
        }
    }
}

impl SphereParams {
    /// Most bands either way that still keep every vertex index within `u32`
    pub const MAX_BANDS: u32 = 4096;

    /// Closed sphere with the default band counts and the given radius
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Same sphere with a different mouth opening
    #[must_use]
    pub const fn with_mouth(self, mouth_open: f32) -> Self {
        Self { mouth_open, ..self }
    }

    /// Number of vertices the sphere will have
    pub const fn vertex_count(&self) -> usize {
        (self.latitude_bands as usize + 1) * (self.longitude_bands as usize + 1)
    }

    /// Number of triangle indices the sphere will have
    pub const fn index_count(&self) -> usize {
        self.latitude_bands as usize * self.longitude_bands as usize * 6
    }

    /// Whether the grid vertex at (`latitude`, `longitude`) falls inside the
    /// mouth wedge
    pub fn is_in_mouth(&self, latitude: u32, longitude: u32) -> bool {
        if self.mouth_open <= 0.0 {
            return false;
        }
        let latitude = latitude as f32;
        let bands = self.latitude_bands as f32;
        latitude > bands * (MOUTH_LOWER_EDGE - self.mouth_open)
            && latitude < bands * MOUTH_LOWER_EDGE
            && (longitude as f32) < self.longitude_bands as f32 * MOUTH_WIDTH
    }
}

/// Box faces as (outward normal, four corners in winding order)
const BOX_FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // front
    (
        [0.0, 0.0, 1.0],
        [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    ),
    // back
    (
        [0.0, 0.0, -1.0],
        [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
    ),
    // top
    (
        [0.0, 1.0, 0.0],
        [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
    ),
    // bottom
    (
        [0.0, -1.0, 0.0],
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
    ),
    // right
    (
        [1.0, 0.0, 0.0],
        [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
    ),
    // left
    (
        [-1.0, 0.0, 0.0],
        [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    ),
];

/// Generate the unit box
///
/// Corners are duplicated per face (24 vertices) so every face carries its own
/// flat normal; each face is two triangles, 36 indices in total.
pub fn make_box() -> Mesh {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    let mut base = 0_u32;
    for (normal, corners) in &BOX_FACES {
        vertices.extend(corners.iter().map(|&corner| Vertex::new(corner, *normal)));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        base += 4;
    }

    Mesh::new(vertices, indices)
}

/// Generate a UV sphere, optionally with the mouth wedge cut out
///
/// Vertices are laid out latitude-major: the vertex at latitude `i` and
/// longitude `j` has index `j + i * (longitude_bands + 1)`. Wedge vertices are
/// collapsed to the origin but keep their spherical normal, and the index list
/// is identical for every mouth opening.
///
/// # Panics
///
/// When either band count is zero or above [`SphereParams::MAX_BANDS`], or the
/// radius is not a positive number.
pub fn make_sphere(params: &SphereParams) -> Mesh {
    let SphereParams {
        latitude_bands,
        longitude_bands,
        radius,
        ..
    } = *params;
    assert!(
        (1..=SphereParams::MAX_BANDS).contains(&latitude_bands)
            && (1..=SphereParams::MAX_BANDS).contains(&longitude_bands),
        "sphere needs between 1 and {} bands each way, got {latitude_bands}x{longitude_bands}",
        SphereParams::MAX_BANDS
    );
    assert!(radius.is_finite() && radius > 0.0, "sphere radius must be positive, got {radius}");

    let mut vertices = Vec::with_capacity(params.vertex_count());
    for latitude in 0..=latitude_bands {
        let theta = latitude as f32 * PI / latitude_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for longitude in 0..=longitude_bands {
            let phi = longitude as f32 * TAU / longitude_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            let position = if params.is_in_mouth(latitude, longitude) {
                [0.0; 3]
            } else {
                normal.map(|component| component * radius)
            };
            vertices.push(Vertex::new(position, normal));
        }
    }

    let stride = longitude_bands + 1;
    let mut indices = Vec::with_capacity(params.index_count());
    for latitude in 0..latitude_bands {
        for longitude in 0..longitude_bands {
            let lower = longitude + latitude * stride;
            let upper = lower + stride;
            indices.extend_from_slice(&[lower, upper, lower + 1, upper, upper + 1, lower + 1]);
        }
    }

    Mesh::new(vertices, indices)
}
