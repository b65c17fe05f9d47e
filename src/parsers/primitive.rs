use crate::{
    parsers::{
        chunk::chunk,
        failure, ids, Max3dsParseError, Result,
    },
    scene::Color,
};
use nom::{
    bytes::complete::take,
    multi::count,
    number::complete::{le_f32, le_u16, le_u8},
    sequence::tuple,
};

/// A fixed-size record stored back to back after a `u16` count.
pub(crate) trait Element: Sized {
    /// Size of one record on disk.
    const SIZE: usize;
    fn parse(input: &[u8]) -> Result<Self>;
}

impl Element for u16 {
    const SIZE: usize = 2;
    fn parse(input: &[u8]) -> Result<Self> {
        le_u16(input)
    }
}

impl Element for [f32; 3] {
    const SIZE: usize = 12;
    fn parse(input: &[u8]) -> Result<Self> {
        let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
        Ok((input, [x, y, z]))
    }
}

impl Element for [f32; 2] {
    const SIZE: usize = 8;
    fn parse(input: &[u8]) -> Result<Self> {
        let (input, (u, v)) = tuple((le_f32, le_f32))(input)?;
        Ok((input, [u, v]))
    }
}

/// A triangle of the face list. The trailing 2 byte flag word is never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Face(pub [u16; 3]);

impl Element for Face {
    const SIZE: usize = 8;
    fn parse(input: &[u8]) -> Result<Self> {
        let (input, (a, b, c)) = tuple((le_u16, le_u16, le_u16))(input)?;
        let (input, _flags) = take(2_usize)(input)?;
        Ok((input, Face([a, b, c])))
    }
}

/// Reads a `u16` count followed by that many `T`s. `id` is only used for error reporting.
pub(crate) fn counted<T: Element>(id: u16, input: &[u8]) -> Result<Vec<T>> {
    let (input, n) = le_u16(input)?;
    let n = usize::from(n);

    if n * T::SIZE > input.len() {
        return failure(Max3dsParseError::CountOverrun {
            id,
            count: n,
            available: input.len(),
        });
    }

    count(T::parse, n)(input)
}

/// Reads a zero terminated name of at most `max` bytes, terminator included. If no terminator
/// shows up in the first `max` bytes, those bytes are the name.
pub fn bounded_name(input: &[u8], max: usize) -> Result<String> {
    let window = &input[..max.min(input.len())];

    let (name, consumed) = match window.iter().position(|&b| b == 0) {
        Some(end) => (&window[..end], end + 1),
        None if window.len() == max => (window, max),
        None => return Err(nom::Err::Error(Max3dsParseError::NotEnoughData)),
    };

    Ok((&input[consumed..], String::from_utf8_lossy(name).into_owned()))
}

/// Reads a zero terminated name of any length.
pub fn terminated_name(id: u16, input: &[u8]) -> Result<String> {
    match input.iter().position(|&b| b == 0) {
        Some(end) => Ok((
            &input[end + 1..],
            String::from_utf8_lossy(&input[..end]).into_owned(),
        )),
        None => failure(Max3dsParseError::UnterminatedName { id }),
    }
}

/// A name whose length is given by its chunk. A terminator, if any, ends it early.
pub fn raw_name(body: &[u8], max: usize) -> String {
    let body = &body[..max.min(body.len())];
    let end = body.iter().position(|&b| b == 0).unwrap_or(body.len());
    String::from_utf8_lossy(&body[..end]).into_owned()
}

/// Decodes the first child of a color chunk. Unknown encodings decode to `None`.
pub fn color(input: &[u8]) -> Result<Option<Color>> {
    let (input, child) = chunk(input)?;

    let color = match child.id {
        ids::COLOR_F32 => {
            let (_, (r, g, b)) = tuple((le_f32, le_f32, le_f32))(child.body)?;
            Some(Color {
                r: (r * 255.0) as u8,
                g: (g * 255.0) as u8,
                b: (b * 255.0) as u8,
            })
        }
        ids::COLOR_U8 => {
            let (_, (r, g, b)) = tuple((le_u8, le_u8, le_u8))(child.body)?;
            Some(Color { r, g, b })
        }
        other => {
            log::debug!("unsupported color encoding {:#06x}", other);
            None
        }
    };

    Ok((input, color))
}

/// Decodes the child of a percentage chunk into `0.0..=1.0`.
pub fn percentage(input: &[u8]) -> Result<f32> {
    let (input, child) = chunk(input)?;

    let value = match child.id {
        ids::PERCENTAGE_F32 => le_f32(child.body)?.1,
        _ => f32::from(le_u16(child.body)?.1),
    };

    Ok((input, value / 100.0))
}
