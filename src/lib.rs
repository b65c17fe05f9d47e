//! # Max3ds - A crate for reading .3ds files
//!
//! ## Example
//!
//! ```no_run
//! use max3ds::Scene;
//!
//! /// Prints every mesh and the material its faces use
//! fn main() {
//!     let scene = Scene::from_path("house.3ds").expect("error loading 3ds file");
//!
//!     for object in scene.objects() {
//!         let material = object
//!             .material_group
//!             .as_ref()
//!             .and_then(|group| group.resolve(&scene))
//!             .map(|material| material.name.as_str());
//!
//!         println!("\"{}\" ({} vertices) uses {:?}", object.name, object.vertices.len(), material);
//!     }
//! }
//! ```
//!
//! ## The .3ds file
//!
//! A .3ds file is a tree of chunks. Every chunk starts with a 6 byte header, a little endian `u16`
//! identifier followed by a `u32` length, and the length always counts the header itself. What
//! follows the header depends on the identifier: some chunks hold plain data, some hold only
//! other chunks and some hold a bit of data followed by more chunks. A simplified tree of the
//! parts this crate understands:
//!
//! ```text
//! 0x4D4D main
//! ├── 0x0002 version (u32)
//! └── 0x3D3D editor
//!     ├── 0xAFFF material
//!     │   ├── 0xA000 name (raw bytes)
//!     │   ├── 0xA010 / 0xA020 / 0xA030 ambient / diffuse / specular
//!     │   │   └── 0x0010 float RGB | 0x0011 byte RGB
//!     │   ├── 0xA040 / 0xA050 shininess / transparency
//!     │   │   └── 0x0030 u16 percentage | 0x0031 f32 percentage
//!     │   └── 0xA200 texture map
//!     │       └── 0xA300 file name (raw bytes)
//!     └── 0x4000 object, starts with a zero terminated name (20 bytes max)
//!         └── 0x4100 triangular mesh
//!             ├── 0x4110 vertices (u16 count, 3 x f32 each)
//!             ├── 0x4120 faces (u16 count, 3 x u16 + u16 flags each)
//!             │   ├── 0x4130 face material (name, u16 count, u16 face numbers)
//!             │   └── 0x4150 smoothing groups
//!             └── 0x4140 texture coordinates (u16 count, 2 x f32 each)
//! ```
//!
//! Anything else is skipped using its length, which is what makes the format easy to extend
//! and easy to read partially.
//!
//! ## This crate
//!
//! Reading is eager: the whole file is loaded into memory and turned into a [`Scene`], which
//! owns every mesh and material. Meshes keep the order they had in the file, materials are
//! looked up by name. A material group only stores the name of the material it uses, the lookup
//! happens when you call [`MaterialGroup::resolve`], so files listing objects before their
//! materials work just like the opposite.
//!
//! Textures are loaded through a [`TextureService`]. [`Scene::from_path`] loads none,
//! [`ImageTextures`] decodes them with the `image` crate, and renderers will usually implement
//! the trait themselves to upload straight to the GPU. A texture that fails to load is never an
//! error, its material simply has no handle.
//!
//! ### Warnings
//!
//! Chunk lengths and element counts are checked against the data that is actually there, so a
//! corrupt or truncated file returns an error instead of panicking or reading garbage. Files
//! are otherwise read as leniently as possible: a file that doesn't start with the main chunk
//! is still read unless [`ReadOptions::strict_container`] says otherwise, and a material
//! defined twice silently replaces the first one (a warning is logged).
//!
//! ### Limitations
//!
//! Only the chunks above are decoded. Writing .3ds files, keyframer data, cameras, lights,
//! smoothing groups and mesh matrices are not supported. An object holds at most one material
//! group, the last one in the file.

pub mod options;
pub mod parsers;
pub mod scene;
pub mod texture;

pub use options::ReadOptions;
pub use parsers::{model::ModelReader, Max3dsParseError};
pub use scene::{Color, MaterialBlock, MaterialGroup, MaterialTexMap, ObjectBlock, Scene};
pub use texture::{Image, ImageTextures, NoTextures, TextureHandle, TextureService};
