#![allow(dead_code)]

use max3ds::parsers::ids;

/// Writes a little endian chunk tree. The length field is filled in by `build`.
#[derive(Debug, Clone)]
pub struct ChunkBuilder {
    id: u16,
    body: Vec<u8>,
}

impl ChunkBuilder {
    pub fn new(id: u16) -> Self {
        ChunkBuilder {
            id,
            body: Vec::new(),
        }
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn u16(self, value: u16) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn u32(self, value: u32) -> Self {
        self.bytes(&value.to_le_bytes())
    }

    pub fn f32s(mut self, values: &[f32]) -> Self {
        for v in values {
            self.body.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    /// A zero terminated string.
    pub fn name(mut self, name: &str) -> Self {
        self.body.extend_from_slice(name.as_bytes());
        self.body.push(0);
        self
    }

    pub fn child(self, child: ChunkBuilder) -> Self {
        let child = child.build();
        self.bytes(&child)
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = self.id.to_le_bytes().to_vec();
        out.extend_from_slice(&(self.body.len() as u32 + 6).to_le_bytes());
        out.extend(self.body);
        out
    }
}

pub fn file(editor_children: Vec<ChunkBuilder>) -> Vec<u8> {
    let editor = editor_children
        .into_iter()
        .fold(ChunkBuilder::new(ids::EDITOR), ChunkBuilder::child);

    ChunkBuilder::new(ids::MAIN)
        .child(ChunkBuilder::new(ids::VERSION).u32(3))
        .child(editor)
        .build()
}

pub fn vertices(points: &[[f32; 3]]) -> ChunkBuilder {
    points
        .iter()
        .fold(ChunkBuilder::new(ids::VERTICES).u16(points.len() as u16), |c, p| c.f32s(p))
}

/// A face list whose flag words are all `flags`.
pub fn faces(triangles: &[[u16; 3]], flags: u16) -> ChunkBuilder {
    triangles.iter().fold(
        ChunkBuilder::new(ids::FACES).u16(triangles.len() as u16),
        |c, t| c.u16(t[0]).u16(t[1]).u16(t[2]).u16(flags),
    )
}

pub fn face_material(material: &str, faces: &[u16]) -> ChunkBuilder {
    faces.iter().fold(
        ChunkBuilder::new(ids::FACE_MATERIAL)
            .name(material)
            .u16(faces.len() as u16),
        |c, &f| c.u16(f),
    )
}

pub fn object(name: &str, mesh: Vec<ChunkBuilder>) -> ChunkBuilder {
    let mesh = mesh
        .into_iter()
        .fold(ChunkBuilder::new(ids::TRIANGLE_MESH), ChunkBuilder::child);

    ChunkBuilder::new(ids::OBJECT).name(name).child(mesh)
}

pub fn byte_color(id: u16, rgb: [u8; 3]) -> ChunkBuilder {
    ChunkBuilder::new(id).child(ChunkBuilder::new(ids::COLOR_U8).bytes(&rgb))
}

pub fn percentage(id: u16, value: u16) -> ChunkBuilder {
    ChunkBuilder::new(id).child(ChunkBuilder::new(ids::PERCENTAGE_U16).u16(value))
}

pub fn material(name: &str, properties: Vec<ChunkBuilder>) -> ChunkBuilder {
    properties.into_iter().fold(
        ChunkBuilder::new(ids::MATERIAL).child(ChunkBuilder::new(ids::MATERIAL_NAME).name(name)),
        ChunkBuilder::child,
    )
}
