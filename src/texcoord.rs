use glam::{Vec2, Vec3};
use log::warn;

use crate::mesh::MeshAsset;

/// Source channel a texture-coordinate request draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexCoordSemantic {
    Uv,
    Normal,
    Orco,
    Global,
    Reflection,
    Speed,
    LightVector,
}

/// How a 3-component source is combined into 2D output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Flat,
    Cube,
}

/// Axis-aligned bounding volume: minimum corner plus half-extent per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub extent: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, extent: Vec3) -> Self {
        Self { min, extent }
    }

    pub fn size(&self) -> Vec3 {
        self.extent * 2.0
    }
}

/// Generate 2D texture coordinates for the requested semantic.
///
/// Unsupported semantics and absent source streams yield an empty vector,
/// never an error. Object-space (ORCO) positions are normalized against
/// the bounding volume as `(p - min) / size` per component before the
/// projection combine; a degenerate volume of zero extent therefore
/// produces non-finite coordinates.
pub fn generate_uv_2d(
    mesh: &MeshAsset,
    semantic: TexCoordSemantic,
    projection: Projection,
    bound: &BoundingBox,
) -> Vec<Vec2> {
    match semantic {
        TexCoordSemantic::Uv => chunk_vec2(&mesh.tex_coords),
        TexCoordSemantic::Normal => chunk_vec3(&mesh.normals)
            .map(|normal| combine(normal, projection))
            .collect(),
        TexCoordSemantic::Orco => {
            let size = bound.size();
            chunk_vec3(&mesh.positions)
                .map(|position| combine((position - bound.min) / size, projection))
                .collect()
        }
        other => {
            warn!("Unsupported 2D texture coordinates semantic: {:?}", other);
            Vec::new()
        }
    }
}

/// Generate 3D texture coordinates for the requested semantic.
///
/// Each source vertex is translated by the bounding volume's minimum
/// corner, then emitted through `swizzle`: every output component indexes
/// a four-slot array `[0, x, y, z]`, so `[1, 2, 0]` yields `(x, y, 0)`.
/// Out-of-range slots read 0.
pub fn generate_uv_3d(
    mesh: &MeshAsset,
    semantic: TexCoordSemantic,
    swizzle: [usize; 3],
    bound: &BoundingBox,
) -> Vec<Vec3> {
    let source = match semantic {
        TexCoordSemantic::Orco => &mesh.positions,
        TexCoordSemantic::Normal => &mesh.normals,
        // No 3-component UV stream exists on these meshes.
        TexCoordSemantic::Uv => return Vec::new(),
        other => {
            warn!("Unsupported 3D texture coordinates semantic: {:?}", other);
            return Vec::new();
        }
    };
    chunk_vec3(source)
        .map(|vertex| swizzle_slots(vertex - bound.min, swizzle))
        .collect()
}

fn combine(value: Vec3, projection: Projection) -> Vec2 {
    match projection {
        Projection::Flat => Vec2::new(value.x, value.y),
        Projection::Cube => Vec2::new(value.x, value.z),
    }
}

fn swizzle_slots(value: Vec3, swizzle: [usize; 3]) -> Vec3 {
    let slots = [0.0, value.x, value.y, value.z];
    let pick = |index: usize| slots.get(index).copied().unwrap_or(0.0);
    Vec3::new(pick(swizzle[0]), pick(swizzle[1]), pick(swizzle[2]))
}

fn chunk_vec2(data: &[f32]) -> Vec<Vec2> {
    data.chunks_exact(2)
        .map(|uv| Vec2::new(uv[0], uv[1]))
        .collect()
}

fn chunk_vec3(data: &[f32]) -> impl Iterator<Item = Vec3> + '_ {
    data.chunks_exact(3)
        .map(|vertex| Vec3::new(vertex[0], vertex[1], vertex[2]))
}
