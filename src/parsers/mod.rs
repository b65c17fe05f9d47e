pub mod chunk;
pub mod material;
pub mod model;
pub mod object;
pub mod primitive;

use nom::{
    error::{ErrorKind, ParseError},
    IResult,
};
use std::io;
use thiserror::Error;

pub type Result<'a, T> = IResult<&'a [u8], T, Max3dsParseError>;

/// Chunk identifiers understood by the reader. Everything else is skipped.
pub mod ids {
    /// Top-level container of the whole file.
    pub const MAIN: u16 = 0x4D4D;
    pub const VERSION: u16 = 0x0002;
    /// The "3D editor" container holding objects and materials.
    pub const EDITOR: u16 = 0x3D3D;

    pub const OBJECT: u16 = 0x4000;
    pub const TRIANGLE_MESH: u16 = 0x4100;
    pub const VERTICES: u16 = 0x4110;
    pub const FACES: u16 = 0x4120;
    pub const FACE_MATERIAL: u16 = 0x4130;
    pub const UV_COORDINATES: u16 = 0x4140;
    pub const SMOOTHING_GROUP: u16 = 0x4150;

    pub const MATERIAL: u16 = 0xAFFF;
    pub const MATERIAL_NAME: u16 = 0xA000;
    pub const AMBIENT: u16 = 0xA010;
    pub const DIFFUSE: u16 = 0xA020;
    pub const SPECULAR: u16 = 0xA030;
    pub const SHININESS: u16 = 0xA040;
    pub const TRANSPARENCY: u16 = 0xA050;
    pub const TEXTURE_MAP: u16 = 0xA200;
    pub const TEXTURE_MAP_NAME: u16 = 0xA300;

    pub const COLOR_F32: u16 = 0x0010;
    pub const COLOR_U8: u16 = 0x0011;
    pub const PERCENTAGE_U16: u16 = 0x0030;
    pub const PERCENTAGE_F32: u16 = 0x0031;
}

/// Errors that can happen while reading a .3ds file.
/// Most byte-level failures are simply `NomError`, the rest describe chunk trees whose declared
/// lengths and counts do not agree with the bytes actually present.
#[derive(Debug, Error)]
pub enum Max3dsParseError {
    #[error("parser error: {kind:?}")]
    NomError {
        kind: ErrorKind,
        other: Option<Box<Max3dsParseError>>,
    },
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
    /// Returned when the file ends in the middle of a chunk header or body.
    #[error("not enough data")]
    NotEnoughData,
    /// Every chunk length includes its own 6 byte header, so anything smaller is corrupt.
    #[error("chunk {id:#06x} declares a length of {length} bytes, smaller than its header")]
    InvalidChunkLength { id: u16, length: u32 },
    /// A chunk claims more bytes than its parent (or the file) has left.
    #[error("chunk {id:#06x} declares {length} bytes but only {available} are available")]
    ChunkOverrun { id: u16, length: u32, available: usize },
    /// An element count read from a chunk does not fit inside that chunk.
    #[error("chunk {id:#06x} holds {count} elements but only {available} bytes")]
    CountOverrun { id: u16, count: usize, available: usize },
    /// A zero terminated name ran to the end of its chunk without a terminator.
    #[error("chunk {id:#06x} contains an unterminated name")]
    UnterminatedName { id: u16 },
    /// Only returned when `ReadOptions::strict_container` is set.
    #[error("expected a {:#06x} container, found {found:#06x}", ids::MAIN)]
    UnexpectedContainer { found: u16 },
}

impl ParseError<&[u8]> for Max3dsParseError {
    fn from_error_kind(_input: &[u8], kind: ErrorKind) -> Self {
        Max3dsParseError::NomError { kind, other: None }
    }

    fn append(_input: &[u8], kind: ErrorKind, other: Self) -> Self {
        Max3dsParseError::NomError {
            kind,
            other: Some(Box::new(other)),
        }
    }
}

/// Wraps one of our own errors so it aborts the whole parse instead of being backtracked over.
pub(crate) fn failure<'a, T>(error: Max3dsParseError) -> Result<'a, T> {
    Err(nom::Err::Failure(error))
}
