/// FBX-style scene loader driven by an external element reader.
pub mod fbx;
