use crate::parsers::{failure, Max3dsParseError, Result};
use nom::{
    bytes::complete::take,
    number::complete::{le_u16, le_u32},
    sequence::tuple,
};

/// Size of the identifier + length pair that starts every chunk.
pub const HEADER_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: u16,
    /// Total length of the chunk, this header included.
    pub length: u32,
}

impl ChunkHeader {
    /// Bytes of body following the header, `None` if the declared length can't even hold the header.
    pub fn body_len(&self) -> Option<usize> {
        (self.length as usize).checked_sub(HEADER_LEN)
    }
}

/// One chunk with its body sliced out of the parent. Only lives while its parent is being parsed.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    pub id: u16,
    pub length: u32,
    pub body: &'a [u8],
}

/// Reads the 6 byte header of the next chunk.
pub fn chunk_header(input: &[u8]) -> Result<ChunkHeader> {
    let (input, (id, length)) = tuple((le_u16, le_u32))(input)?;
    Ok((input, ChunkHeader { id, length }))
}

/// Advances past the body of a chunk whose header was already read.
pub fn skip(input: &[u8], header: ChunkHeader) -> Result<()> {
    let (input, _) = body(input, header)?;
    Ok((input, ()))
}

fn body(input: &[u8], header: ChunkHeader) -> Result<&[u8]> {
    let body_len = match header.body_len() {
        Some(len) => len,
        None => {
            return failure(Max3dsParseError::InvalidChunkLength {
                id: header.id,
                length: header.length,
            })
        }
    };

    if body_len > input.len() {
        return failure(Max3dsParseError::ChunkOverrun {
            id: header.id,
            length: header.length,
            available: input.len() + HEADER_LEN,
        });
    }

    take(body_len)(input)
}

/// Reads a whole chunk: its header and exactly `length - 6` bytes of body.
pub fn chunk(input: &[u8]) -> Result<Chunk> {
    let (input, header) = chunk_header(input)?;
    let (input, body) = body(input, header)?;

    Ok((
        input,
        Chunk {
            id: header.id,
            length: header.length,
            body,
        },
    ))
}

/// Walks every sibling chunk in `input` until it is exhausted, handing each one to `handler`.
///
/// The next sibling always starts right after the declared end of the previous one, whatever
/// the handler consumed. A handler that leaves part of its body unread is only logged.
pub fn for_each_chunk<'a, F>(mut input: &'a [u8], mut handler: F) -> Result<'a, ()>
where
    F: FnMut(Chunk<'a>) -> Result<'a, ()>,
{
    while !input.is_empty() {
        let (rest, next) = chunk(input)?;
        let (unread, _) = handler(next)?;

        if !unread.is_empty() {
            log::debug!(
                "chunk {:#06x} left {} of {} body bytes unread",
                next.id,
                unread.len(),
                next.body.len()
            );
        }

        input = rest;
    }

    Ok((input, ()))
}

/// Handler for chunks nobody cares about.
pub fn ignore(chunk: Chunk) -> Result<()> {
    log::trace!("skipping chunk {:#06x} ({} bytes)", chunk.id, chunk.length);
    Ok((&chunk.body[chunk.body.len()..], ()))
}
