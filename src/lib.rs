//! Import-time scene resolution for FBX-style interchange files.
//!
//! This library turns a flat, id-indexed element tree (produced by an
//! external byte-level reader) into a scene graph with bound materials.
//! Asset streams, element reading and material-definition lookup are
//! collaborator traits, keeping file-system and format concerns out of
//! the resolution engine.

/// Collaborator seams: scene keys, asset streams, readers and material
/// definition lookup.
pub mod asset;
pub mod element;
/// Scene loaders for supported interchange layouts.
pub mod loader;
pub mod material;
pub mod mesh;
pub mod node;
/// Texture-coordinate generation for imported geometry.
pub mod texcoord;
