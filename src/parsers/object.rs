use crate::{
    parsers::{
        chunk::{for_each_chunk, ignore, Chunk},
        ids,
        primitive::{bounded_name, counted, terminated_name, Face},
        Result,
    },
    scene::{MaterialGroup, ObjectBlock},
};

/// Object names are stored in a fixed 20 byte field, terminator included.
pub const NAME_LEN: usize = 20;

/// Parses the body of an object chunk: a zero terminated name followed by mesh chunks.
pub fn object_block(input: &[u8]) -> Result<ObjectBlock> {
    let (input, name) = bounded_name(input, NAME_LEN)?;

    let mut object = ObjectBlock {
        name,
        ..Default::default()
    };
    let (input, ()) = for_each_chunk(input, |chunk| mesh_chunk(&mut object, chunk))?;

    Ok((input, object))
}

fn mesh_chunk<'a>(object: &mut ObjectBlock, chunk: Chunk<'a>) -> Result<'a, ()> {
    match chunk.id {
        // Vertex, face and UV lists usually sit inside a mesh container.
        ids::TRIANGLE_MESH => for_each_chunk(chunk.body, |child| mesh_chunk(object, child)),
        ids::VERTICES => {
            let (input, vertices) = counted::<[f32; 3]>(chunk.id, chunk.body)?;
            object.vertices = vertices;
            Ok((input, ()))
        }
        ids::FACES => {
            let (input, faces) = counted::<Face>(chunk.id, chunk.body)?;
            object.indices = faces
                .iter()
                .flat_map(|face| face.0.iter().map(|&i| u32::from(i)))
                .collect();

            for_each_chunk(input, |child| face_attribute(object, child))
        }
        ids::UV_COORDINATES => {
            let (input, uvs) = counted::<[f32; 2]>(chunk.id, chunk.body)?;
            object.uvs = uvs;

            for_each_chunk(input, smoothing_group)
        }
        _ => ignore(chunk),
    }
}

/// Chunks nested at the end of a face list.
fn face_attribute<'a>(object: &mut ObjectBlock, chunk: Chunk<'a>) -> Result<'a, ()> {
    match chunk.id {
        ids::FACE_MATERIAL => {
            let (input, group) = material_group(chunk.body)?;
            if let Some(previous) = object.material_group.replace(group) {
                log::warn!(
                    "object \"{}\" already uses material \"{}\", keeping the later one",
                    object.name,
                    previous.material
                );
            }
            Ok((input, ()))
        }
        ids::SMOOTHING_GROUP => smoothing_group(chunk),
        _ => ignore(chunk),
    }
}

fn material_group(input: &[u8]) -> Result<MaterialGroup> {
    let (input, material) = terminated_name(ids::FACE_MATERIAL, input)?;
    let (input, faces) = counted::<u16>(ids::FACE_MATERIAL, input)?;
    Ok((input, MaterialGroup { material, faces }))
}

/// Smoothing groups are not decoded.
fn smoothing_group(chunk: Chunk) -> Result<()> {
    ignore(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: u16, body: &[u8]) -> Vec<u8> {
        let mut out = id.to_le_bytes().to_vec();
        out.extend_from_slice(&(body.len() as u32 + 6).to_le_bytes());
        out.extend_from_slice(body);
        out
    }

    fn floats(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
    }

    fn face_list(faces: &[[u16; 3]], tail: &[u8]) -> Vec<u8> {
        let mut body = (faces.len() as u16).to_le_bytes().to_vec();
        for face in faces {
            for i in face {
                body.extend_from_slice(&i.to_le_bytes());
            }
            body.extend_from_slice(&[0x07, 0x00]);
        }
        body.extend_from_slice(tail);
        chunk(ids::FACES, &body)
    }

    #[test]
    fn vertices_and_faces_inside_a_mesh_container() {
        let mut vertices = vec![3, 0];
        vertices.extend(floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.5]));

        let mut mesh = chunk(ids::VERTICES, &vertices);
        mesh.extend(face_list(&[[0, 1, 2], [2, 1, 0]], &[]));

        let mut body = b"Tri01\0".to_vec();
        body.extend(chunk(ids::TRIANGLE_MESH, &mesh));

        let (rest, object) = object_block(&body).unwrap();

        assert!(rest.is_empty());
        assert_eq!(object.name, "Tri01");
        assert_eq!(
            object.vertices,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.5]]
        );
        assert_eq!(object.indices, vec![0, 1, 2, 2, 1, 0]);
        assert!(object.uvs.is_empty());
        assert!(object.material_group.is_none());
    }

    #[test]
    fn face_material_after_the_face_list() {
        let mut group = b"Wood\0".to_vec();
        group.extend_from_slice(&[2, 0, 0, 0, 1, 0]);

        let mut tail = chunk(ids::FACE_MATERIAL, &group);
        tail.extend(chunk(ids::SMOOTHING_GROUP, &[1, 0, 0, 0, 1, 0, 0, 0]));

        let mut body = b"Box\0".to_vec();
        body.extend(face_list(&[[0, 1, 2], [0, 2, 3]], &tail));

        let (_, object) = object_block(&body).unwrap();

        assert_eq!(object.indices.len(), 6);
        assert_eq!(
            object.material_group,
            Some(MaterialGroup {
                material: "Wood".to_string(),
                faces: vec![0, 1],
            })
        );
    }

    #[test]
    fn uv_list_with_trailing_chunks() {
        let mut uvs = vec![2, 0];
        uvs.extend(floats(&[0.0, 1.0, 0.25, 0.75]));
        uvs.extend(chunk(ids::SMOOTHING_GROUP, &[0, 0, 0, 0]));

        let mut body = b"Quad\0".to_vec();
        body.extend(chunk(ids::UV_COORDINATES, &uvs));

        let (_, object) = object_block(&body).unwrap();
        assert_eq!(object.uvs, vec![[0.0, 1.0], [0.25, 0.75]]);
    }

    #[test]
    fn unknown_chunks_are_skipped() {
        let mut vertices = vec![1, 0];
        vertices.extend(floats(&[4.0, 5.0, 6.0]));

        let mut body = b"Light\0".to_vec();
        body.extend(chunk(0x4600, &[1, 2, 3, 4, 5]));
        body.extend(chunk(ids::VERTICES, &vertices));

        let (_, object) = object_block(&body).unwrap();
        assert_eq!(object.vertices, vec![[4.0, 5.0, 6.0]]);
    }

    #[test]
    fn name_stops_at_twenty_bytes() {
        let mut body = vec![b'x'; NAME_LEN];
        body.extend(chunk(0x4600, &[]));

        let (_, object) = object_block(&body).unwrap();
        assert_eq!(object.name.len(), NAME_LEN);
    }

    #[test]
    fn unterminated_material_name_is_an_error() {
        let tail = chunk(ids::FACE_MATERIAL, b"Wood");

        let mut body = b"Box\0".to_vec();
        body.extend(face_list(&[[0, 1, 2]], &tail));

        assert!(object_block(&body).is_err());
    }
}
