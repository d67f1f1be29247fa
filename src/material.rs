/// Value of one named material parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum MatParamValue {
    Boolean(bool),
    Int(i32),
    Float(f32),
    Color([f32; 4]),
    Vector([f32; 4]),
    Texture(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatParam {
    pub name: String,
    pub value: MatParamValue,
}

impl MatParam {
    pub fn new(name: impl Into<String>, value: MatParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Externally-loaded material definition template. Parameters are exposed
/// by name; an unknown name is `None`, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    pub params: Vec<MatParam>,
}

impl MaterialDef {
    pub fn parameter(&self, name: &str) -> Option<&MatParam> {
        self.params.iter().find(|param| param.name == name)
    }
}

/// Material bound to a scene node: an immutable copy of the definition
/// template's parameters, stamped with the source material object's
/// display name.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAsset {
    pub name: Option<String>,
    pub definition: String,
    pub params: Vec<MatParam>,
}

impl MaterialAsset {
    /// Copy every declared parameter out of the template.
    pub fn bind(def: &MaterialDef, name: Option<String>) -> Self {
        Self {
            name,
            definition: def.name.clone(),
            params: def.params.clone(),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&MatParam> {
        self.params.iter().find(|param| param.name == name)
    }
}
