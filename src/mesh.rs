/// Flat vertex streams of one mesh. Positions and normals are xyz
/// triplets, texture coordinates are uv pairs. An empty buffer means the
/// stream is not present on the mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAsset {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
}

impl MeshAsset {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.normals.is_empty() && self.tex_coords.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}
