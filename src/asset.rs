use std::{
    error::Error,
    io::{self, Read},
};

use crate::{element::FbxElement, material::MaterialDef};

/// Key of the scene asset being imported: a logical name plus the file
/// extension it was requested under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneKey {
    pub name: String,
    pub extension: String,
}

impl SceneKey {
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }

    /// Logical name with a trailing `.extension` stripped when present.
    /// Names that do not carry the extension are returned unchanged.
    pub fn base_name(&self) -> &str {
        if self.extension.is_empty() {
            return &self.name;
        }
        self.name
            .strip_suffix(&self.extension)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Handle to one asset to import: its key and the byte stream behind it.
///
/// A `None` key means the caller violated the loading contract; the loader
/// fails immediately with [`LoadError::InvalidKey`] without touching the
/// stream.
///
/// [`LoadError::InvalidKey`]: crate::loader::fbx::LoadError::InvalidKey
pub trait AssetInfo {
    type Error: Error;
    type Stream: Read;

    fn key(&self) -> Option<&SceneKey>;
    fn open_stream(&mut self) -> Result<Self::Stream, Self::Error>;
}

/// External byte-level parser producing the root element list of one
/// interchange file.
pub trait ElementReader {
    fn read(&mut self, stream: &mut dyn Read) -> io::Result<Vec<FbxElement>>;
}

impl<R: ElementReader + ?Sized> ElementReader for &mut R {
    fn read(&mut self, stream: &mut dyn Read) -> io::Result<Vec<FbxElement>> {
        (**self).read(stream)
    }
}

/// External source of material definition templates.
///
/// Lookup is a plain service call: an unknown name is `None`, not an error.
/// The loader turns `None` into a load failure because a referenced
/// definition is required to bind materials.
pub trait MaterialLibrary {
    fn material_def(&mut self, name: &str) -> Option<MaterialDef>;
}

impl<M: MaterialLibrary + ?Sized> MaterialLibrary for &mut M {
    fn material_def(&mut self, name: &str) -> Option<MaterialDef> {
        (**self).material_def(name)
    }
}
