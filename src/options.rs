use std::path::PathBuf;

/// Knobs for [`ModelReader`](crate::ModelReader).
///
/// ```
/// use max3ds::ReadOptions;
///
/// let options = ReadOptions::default().strict_container(true).load_textures(false);
/// assert!(options.is_strict_container());
/// ```
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub(crate) strict_container: bool,
    pub(crate) load_textures: bool,
    pub(crate) base_dir: Option<PathBuf>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            strict_container: false,
            load_textures: true,
            base_dir: None,
        }
    }
}

impl ReadOptions {
    /// Fail when the file doesn't start with the top-level 3ds container instead of reading on.
    pub fn strict_container(mut self, strict: bool) -> Self {
        self.strict_container = strict;
        self
    }

    /// When off, texture names are recorded but the texture service is never called.
    pub fn load_textures(mut self, load: bool) -> Self {
        self.load_textures = load;
        self
    }

    /// Directory texture names are resolved against. Defaults to the model's own directory, or
    /// the working directory for in-memory data.
    pub fn base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn is_strict_container(&self) -> bool {
        self.strict_container
    }

    pub fn is_loading_textures(&self) -> bool {
        self.load_textures
    }
}
