use crate::{
    options::ReadOptions,
    parsers::{
        chunk::{chunk_header, for_each_chunk, ignore, Chunk},
        failure, ids,
        object::object_block,
        Max3dsParseError, Result,
    },
    scene::Scene,
    texture::TextureService,
};
use nom::{number::complete::le_u32, Err};
use std::{
    env,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

/// Reads .3ds files into a [`Scene`].
///
/// ```no_run
/// use max3ds::{ImageTextures, ModelReader, ReadOptions};
///
/// let mut textures = ImageTextures::new();
/// let scene = ModelReader::new(ReadOptions::default())
///     .read_path("models/house.3ds", &mut textures)
///     .expect("could not read house.3ds");
///
/// for object in scene.objects() {
///     println!("{}: {} triangles", object.name, object.triangle_count());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelReader {
    options: ReadOptions,
}

impl ModelReader {
    pub fn new(options: ReadOptions) -> Self {
        ModelReader { options }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads the file at `path`. Texture names are resolved against the file's directory.
    pub fn read_path<P: AsRef<Path>>(
        &self,
        path: P,
        textures: &mut dyn TextureService,
    ) -> StdResult<Scene, Max3dsParseError> {
        let path = path.as_ref();
        let base_dir = match &self.options.base_dir {
            Some(dir) => dir.clone(),
            None => base_directory(path),
        };

        let file = File::open(path).map_err(Max3dsParseError::IoError)?;
        log::debug!("reading {}", path.display());

        self.read(file, base_dir, textures)
    }

    /// Reads a whole stream. Texture names are resolved against the working directory unless
    /// the options say otherwise.
    pub fn read_data<T: Read>(
        &self,
        data: T,
        textures: &mut dyn TextureService,
    ) -> StdResult<Scene, Max3dsParseError> {
        let base_dir = match &self.options.base_dir {
            Some(dir) => dir.clone(),
            None => working_directory(),
        };

        self.read(data, base_dir, textures)
    }

    fn read<T: Read>(
        &self,
        mut data: T,
        base_dir: PathBuf,
        textures: &mut dyn TextureService,
    ) -> StdResult<Scene, Max3dsParseError> {
        let mut buffer = Vec::new();
        data.read_to_end(&mut buffer)
            .map_err(Max3dsParseError::IoError)?;

        let mut ctx = ParseContext {
            base_dir,
            load_textures: self.options.load_textures,
            textures,
            scene: Scene::default(),
        };

        match ctx.model(&buffer, self.options.strict_container) {
            Ok(_) => Ok(ctx.scene),
            Err(Err::Failure(e)) | Err(Err::Error(e)) => Err(e),
            Err(Err::Incomplete(..)) => Err(Max3dsParseError::NotEnoughData),
        }
    }
}

/// The directory holding `path`, or the working directory when `path` is a bare file name.
fn base_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => working_directory(),
    }
}

fn working_directory() -> PathBuf {
    env::current_dir().unwrap_or_else(|e| {
        log::warn!("no working directory ({}), textures resolve relative to it", e);
        PathBuf::new()
    })
}

/// State shared by every nesting level while one file is parsed.
pub(crate) struct ParseContext<'t> {
    pub(crate) base_dir: PathBuf,
    pub(crate) load_textures: bool,
    pub(crate) textures: &'t mut dyn TextureService,
    pub(crate) scene: Scene,
}

impl ParseContext<'_> {
    /// The whole file: one top-level container header, then chunks until the data runs out.
    pub(crate) fn model<'a>(&mut self, input: &'a [u8], strict: bool) -> Result<'a, ()> {
        let (input, header) = chunk_header(input)?;

        if header.id != ids::MAIN {
            if strict {
                return failure(Max3dsParseError::UnexpectedContainer { found: header.id });
            }
            log::warn!(
                "expected a {:#06x} container, found {:#06x}, reading on",
                ids::MAIN,
                header.id
            );
        }

        let (input, ()) = for_each_chunk(input, |chunk| self.top_level(chunk))?;

        log::info!(
            "read {} objects and {} materials",
            self.scene.objects.len(),
            self.scene.materials.len()
        );

        Ok((input, ()))
    }

    fn top_level<'a>(&mut self, chunk: Chunk<'a>) -> Result<'a, ()> {
        match chunk.id {
            ids::EDITOR => {
                log::debug!("editor block ({} bytes)", chunk.length);
                self.editor(chunk.body)
            }
            ids::VERSION => {
                let (input, version) = le_u32(chunk.body)?;
                self.scene.version = Some(version);
                Ok((input, ()))
            }
            _ => ignore(chunk),
        }
    }

    fn editor<'a>(&mut self, input: &'a [u8]) -> Result<'a, ()> {
        for_each_chunk(input, |chunk| match chunk.id {
            ids::OBJECT => {
                let (input, object) = object_block(chunk.body)?;
                log::debug!(
                    "object \"{}\": {} vertices, {} triangles",
                    object.name,
                    object.vertices.len(),
                    object.triangle_count()
                );
                self.scene.push_object(object);
                Ok((input, ()))
            }
            ids::MATERIAL => self.material_block(chunk.body),
            _ => ignore(chunk),
        })
    }
}
