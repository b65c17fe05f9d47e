use crate::{
    parsers::{
        chunk::{for_each_chunk, ignore, Chunk},
        ids,
        model::ParseContext,
        primitive::{color, percentage, raw_name},
        Result,
    },
    scene::{MaterialBlock, MaterialTexMap},
    texture::TextureHandle,
};

/// Texture file names are stored in a fixed 64 byte field.
pub const TEXTURE_NAME_LEN: usize = 64;

impl ParseContext<'_> {
    /// Parses the body of a material chunk and stores the result under its name.
    pub(crate) fn material_block<'a>(&mut self, input: &'a [u8]) -> Result<'a, ()> {
        let mut material = MaterialBlock::default();
        let mut named = false;

        let (input, ()) = for_each_chunk(input, |chunk| {
            if chunk.id == ids::MATERIAL_NAME {
                named = true;
            }
            self.material_chunk(&mut material, chunk)
        })?;

        if !named {
            log::warn!("dropping a material without a name");
        } else if let Some(previous) = self.scene.insert_material(material) {
            log::warn!("material \"{}\" is defined more than once", previous.name);
        }

        Ok((input, ()))
    }

    fn material_chunk<'a>(
        &mut self,
        material: &mut MaterialBlock,
        chunk: Chunk<'a>,
    ) -> Result<'a, ()> {
        match chunk.id {
            ids::MATERIAL_NAME => {
                material.name = raw_name(chunk.body, chunk.body.len());
                log::debug!("material \"{}\"", material.name);
                Ok((&chunk.body[chunk.body.len()..], ()))
            }
            ids::AMBIENT | ids::DIFFUSE | ids::SPECULAR => {
                let (input, decoded) = color(chunk.body)?;
                if let Some(decoded) = decoded {
                    match chunk.id {
                        ids::AMBIENT => material.ambient = decoded,
                        ids::DIFFUSE => material.diffuse = decoded,
                        _ => material.specular = decoded,
                    }
                }
                Ok((input, ()))
            }
            ids::SHININESS => {
                let (input, value) = percentage(chunk.body)?;
                material.shininess = value;
                Ok((input, ()))
            }
            ids::TRANSPARENCY => {
                let (input, value) = percentage(chunk.body)?;
                material.transparency = value;
                Ok((input, ()))
            }
            ids::TEXTURE_MAP => {
                for_each_chunk(chunk.body, |child| self.texture_map_chunk(material, child))
            }
            _ => ignore(chunk),
        }
    }

    fn texture_map_chunk<'a>(
        &mut self,
        material: &mut MaterialBlock,
        chunk: Chunk<'a>,
    ) -> Result<'a, ()> {
        match chunk.id {
            ids::TEXTURE_MAP_NAME => {
                let file_name = raw_name(chunk.body, TEXTURE_NAME_LEN);
                let handle = self.load_texture(&file_name);
                material.texture_map = Some(MaterialTexMap { file_name, handle });
                Ok((&chunk.body[chunk.body.len()..], ()))
            }
            _ => ignore(chunk),
        }
    }

    fn load_texture(&mut self, file_name: &str) -> Option<TextureHandle> {
        if !self.load_textures {
            return None;
        }

        let path = self.base_dir.join(file_name);
        let image = match self.textures.load(&path) {
            Some(image) if image.width > 0 && image.height > 0 => image,
            _ => {
                log::warn!("texture {} could not be loaded", path.display());
                return None;
            }
        };

        let handle = self.textures.upload_2d(&image);
        if handle.is_none() {
            log::warn!("texture {} could not be uploaded", path.display());
        }
        handle
    }
}
