use crate::{
    options::ReadOptions,
    parsers::{model::ModelReader, Max3dsParseError},
    texture::{NoTextures, TextureHandle},
};
use linked_hash_map::LinkedHashMap;
use std::{fmt, io::Read, path::Path};

/// An 8 bit per channel RGB color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Names the material used by a subset of an object's faces.
///
/// The material is referenced by name only. Objects and materials may come in any order in the
/// file, so the name is resolved against the `Scene` when it is needed and may never resolve at
/// all, in which case the group simply has no effect.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaterialGroup {
    pub material: String,
    /// Face numbers (triangle positions, not vertex indices) using the material.
    pub faces: Vec<u16>,
}

impl MaterialGroup {
    pub fn resolve<'s>(&self, scene: &'s Scene) -> Option<&'s MaterialBlock> {
        scene.material(&self.material)
    }
}

/// One named mesh.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjectBlock {
    pub name: String,
    pub vertices: Vec<[f32; 3]>,
    /// Three vertex indices per triangle.
    pub indices: Vec<u32>,
    /// Texture coordinates, empty when the file has none.
    pub uvs: Vec<[f32; 2]>,
    pub material_group: Option<MaterialGroup>,
}

impl ObjectBlock {
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaterialTexMap {
    /// File name as stored in the model, relative to the model's directory.
    pub file_name: String,
    /// `None` when the texture couldn't be loaded or uploaded.
    pub handle: Option<TextureHandle>,
}

/// One named shading definition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaterialBlock {
    pub name: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// `0.0..=1.0`
    pub shininess: f32,
    /// `0.0..=1.0`
    pub transparency: f32,
    pub texture_map: Option<MaterialTexMap>,
}

/// Everything read from a .3ds file: the meshes in file order and the materials by name.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub(crate) version: Option<u32>,
    pub(crate) objects: Vec<ObjectBlock>,
    pub(crate) materials: LinkedHashMap<String, MaterialBlock>,
}

impl Scene {
    /// Reads the file at `path` without loading any texture.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Scene, Max3dsParseError> {
        ModelReader::new(ReadOptions::default()).read_path(path, &mut NoTextures)
    }

    /// Reads a whole .3ds stream without loading any texture.
    pub fn from_data<T: Read>(data: T) -> Result<Scene, Max3dsParseError> {
        ModelReader::new(ReadOptions::default()).read_data(data, &mut NoTextures)
    }

    /// File format version, if the file states one.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn objects(&self) -> &[ObjectBlock] {
        &self.objects
    }

    /// The first object called `name`.
    pub fn object(&self, name: &str) -> Option<&ObjectBlock> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Materials in the order they were stored, a redefinition counts as a new store.
    pub fn materials(&self) -> impl Iterator<Item = &MaterialBlock> {
        self.materials.values()
    }

    pub fn material(&self, name: &str) -> Option<&MaterialBlock> {
        self.materials.get(name)
    }

    /// Every texture handle the scene holds. These have to be released by whoever produced them
    /// before the scene is dropped.
    pub fn texture_handles(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.materials
            .values()
            .filter_map(|m| m.texture_map.as_ref())
            .filter_map(|t| t.handle)
    }

    pub(crate) fn push_object(&mut self, object: ObjectBlock) {
        self.objects.push(object);
    }

    /// Stores `material` under its name. A material already stored under that name is replaced
    /// and returned.
    pub(crate) fn insert_material(&mut self, material: MaterialBlock) -> Option<MaterialBlock> {
        self.materials.insert(material.name.clone(), material)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => writeln!(f, "Scene (version {}) {{", version)?,
            None => writeln!(f, "Scene {{")?,
        }

        for object in &self.objects {
            writeln!(f, "    object \"{}\" {{", object.name)?;
            writeln!(f, "        vertices: {}", object.vertices.len())?;
            writeln!(f, "        triangles: {}", object.triangle_count())?;
            if !object.uvs.is_empty() {
                writeln!(f, "        uvs: {}", object.uvs.len())?;
            }
            if let Some(group) = &object.material_group {
                let resolved = if group.resolve(self).is_some() {
                    ""
                } else {
                    " (unresolved)"
                };
                writeln!(
                    f,
                    "        material: \"{}\"{} on {} faces",
                    group.material,
                    resolved,
                    group.faces.len()
                )?;
            }
            writeln!(f, "    }}")?;
        }

        for material in self.materials.values() {
            writeln!(f, "    material \"{}\" {{", material.name)?;
            writeln!(f, "        ambient: {}", material.ambient)?;
            writeln!(f, "        diffuse: {}", material.diffuse)?;
            writeln!(f, "        specular: {}", material.specular)?;
            writeln!(f, "        shininess: {}", material.shininess)?;
            writeln!(f, "        transparency: {}", material.transparency)?;
            if let Some(texture) = &material.texture_map {
                match texture.handle {
                    Some(handle) => writeln!(
                        f,
                        "        texture: \"{}\" (@{})",
                        texture.file_name, handle
                    )?,
                    None => writeln!(f, "        texture: \"{}\" (not loaded)", texture.file_name)?,
                }
            }
            writeln!(f, "    }}")?;
        }

        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(name: &str, shininess: f32) -> MaterialBlock {
        MaterialBlock {
            name: name.to_string(),
            shininess,
            ..Default::default()
        }
    }

    #[test]
    fn groups_resolve_lazily() {
        let mut scene = Scene::default();
        scene.push_object(ObjectBlock {
            name: "Box01".to_string(),
            material_group: Some(MaterialGroup {
                material: "Wood".to_string(),
                faces: vec![0, 1],
            }),
            ..Default::default()
        });

        let group = scene.objects()[0].material_group.clone().unwrap();
        assert!(group.resolve(&scene).is_none());

        scene.insert_material(material("Wood", 0.5));
        assert_eq!(group.resolve(&scene).map(|m| m.shininess), Some(0.5));
    }

    #[test]
    fn last_material_with_a_name_wins() {
        let mut scene = Scene::default();

        assert!(scene.insert_material(material("Wood", 0.1)).is_none());
        let replaced = scene.insert_material(material("Wood", 0.9));

        assert_eq!(replaced.map(|m| m.shininess), Some(0.1));
        assert_eq!(scene.materials().count(), 1);
        assert_eq!(scene.material("Wood").unwrap().shininess, 0.9);
    }

    #[test]
    fn triangles_come_in_threes() {
        let object = ObjectBlock {
            indices: vec![0, 1, 2, 2, 3, 0],
            ..Default::default()
        };

        assert_eq!(object.triangle_count(), 2);
        assert_eq!(object.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [2, 3, 0]]);
    }

    #[test]
    fn texture_handles_skip_failed_loads() {
        let mut scene = Scene::default();
        let mut loaded = material("Brick", 0.0);
        loaded.texture_map = Some(MaterialTexMap {
            file_name: "brick.png".to_string(),
            handle: TextureHandle::new(3),
        });
        let mut failed = material("Glass", 0.0);
        failed.texture_map = Some(MaterialTexMap {
            file_name: "glass.png".to_string(),
            handle: None,
        });
        scene.insert_material(loaded);
        scene.insert_material(failed);

        let handles: Vec<_> = scene.texture_handles().map(|h| h.get()).collect();
        assert_eq!(handles, vec![3]);
    }
}
