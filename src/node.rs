use crate::{material::MaterialAsset, mesh::MeshAsset};

/// One node of the resolved scene graph. Owns its children; the tree is
/// acyclic by construction and not mutated after the loader returns it.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub children: Vec<SceneNode>,
    pub material: Option<MaterialAsset>,
    pub mesh: Option<MeshAsset>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            material: None,
            mesh: None,
        }
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.name == name)
    }
}
