//! The texture collaborator a material calls when it names a texture file.
//!
//! Parsing only ever talks to a [`TextureService`]; whoever owns the GPU decides what an upload
//! means. [`ImageTextures`] is a CPU-side implementation that decodes with the `image` crate.

use std::{num::NonZeroU32, path::Path};

/// Opaque reference to an uploaded texture. A failed upload is `None`, never zero.
pub type TextureHandle = NonZeroU32;

/// Decoded RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Image {}x{} ({} bytes)", self.width, self.height, self.pixels.len())
    }
}

pub trait TextureService {
    /// Decodes the image at `path`, `None` if it can't be read.
    fn load(&mut self, path: &Path) -> Option<Image>;
    /// Makes `image` available to the renderer.
    fn upload_2d(&mut self, image: &Image) -> Option<TextureHandle>;
}

/// Loads nothing. Texture names are still recorded but no handle is ever produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextures;

impl TextureService for NoTextures {
    fn load(&mut self, _path: &Path) -> Option<Image> {
        None
    }

    fn upload_2d(&mut self, _image: &Image) -> Option<TextureHandle> {
        None
    }
}

/// Decodes textures from disk and keeps every uploaded image in memory. Handles are 1-based
/// positions in that store.
#[derive(Debug, Default)]
pub struct ImageTextures {
    uploaded: Vec<Option<Image>>,
}

impl ImageTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Image> {
        self.uploaded
            .get(handle.get() as usize - 1)
            .and_then(Option::as_ref)
    }

    /// Drops the pixels behind `handle`. The handle is never reused.
    pub fn release(&mut self, handle: TextureHandle) -> Option<Image> {
        self.uploaded
            .get_mut(handle.get() as usize - 1)
            .and_then(Option::take)
    }

    /// Number of images currently held.
    pub fn len(&self) -> usize {
        self.uploaded.iter().filter(|i| i.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TextureService for ImageTextures {
    fn load(&mut self, path: &Path) -> Option<Image> {
        match image::open(path) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                let (width, height) = rgba.dimensions();
                Some(Image {
                    width,
                    height,
                    pixels: rgba.into_raw(),
                })
            }
            Err(e) => {
                log::debug!("could not decode {}: {}", path.display(), e);
                None
            }
        }
    }

    fn upload_2d(&mut self, image: &Image) -> Option<TextureHandle> {
        if image.width == 0 || image.height == 0 {
            return None;
        }

        self.uploaded.push(Some(image.clone()));
        NonZeroU32::new(self.uploaded.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Image {
        Image {
            width: 1,
            height: 1,
            pixels: vec![255, 0, 0, 255],
        }
    }

    #[test]
    fn handles_start_at_one() {
        let mut textures = ImageTextures::new();

        let first = textures.upload_2d(&pixel()).unwrap();
        let second = textures.upload_2d(&pixel()).unwrap();

        assert_eq!((first.get(), second.get()), (1, 2));
        assert_eq!(textures.get(first), Some(&pixel()));
        assert_eq!(textures.len(), 2);
    }

    #[test]
    fn released_handles_stay_dead() {
        let mut textures = ImageTextures::new();
        let handle = textures.upload_2d(&pixel()).unwrap();

        assert!(textures.release(handle).is_some());
        assert!(textures.get(handle).is_none());
        assert!(textures.is_empty());

        let next = textures.upload_2d(&pixel()).unwrap();
        assert_ne!(handle, next);
    }

    #[test]
    fn empty_images_are_not_uploaded() {
        let empty = Image {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        assert_eq!(ImageTextures::new().upload_2d(&empty), None);
    }

    #[test]
    fn missing_files_load_nothing() {
        let mut textures = ImageTextures::new();
        assert!(textures.load(Path::new("does/not/exist.png")).is_none());
    }
}
