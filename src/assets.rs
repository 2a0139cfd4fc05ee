//! Asset loading: extension-based model dispatch and texture decoding.
//!
//! Mirrors the renderer-facing loader surface: a model path is dispatched on
//! its extension (`.obj`, `.fbx`, `.glb`, `.gltf`), anything else is rejected
//! with a descriptive error. Textures are decoded to RGBA on the CPU.

use anyhow::{bail, Context, Result};
use glam::{Vec2, Vec3};
use gltf::mesh::util::ReadIndices;
use std::path::{Path, PathBuf};

use crate::mesh::{MeshData, Vertex};

/// Model file formats recognized by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    Obj,
    Fbx,
    Gltf,
}

impl AssetFormat {
    /// Dispatch on the file extension, case-insensitive.
    ///
    /// Unrecognized extensions are an error, never a crash.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "obj" => Ok(Self::Obj),
            "fbx" => Ok(Self::Fbx),
            "glb" | "gltf" => Ok(Self::Gltf),
            _ => bail!(
                "unsupported model extension in '{}' (expected .obj, .fbx, .glb or .gltf)",
                path.display()
            ),
        }
    }
}

/// A decoded 2D texture
#[derive(Debug)]
pub struct Texture {
    pub image: image::RgbaImage,
    pub path: PathBuf,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Load a model from disk, dispatching on its extension
pub fn load_model(path: &Path) -> Result<MeshData> {
    let format = AssetFormat::from_path(path)?;

    let mesh = match format {
        AssetFormat::Obj => MeshData::from_obj(
            path.to_str()
                .with_context(|| format!("non-UTF-8 model path {:?}", path))?,
        )
        .with_context(|| format!("failed to load OBJ model {}", path.display()))?,
        AssetFormat::Gltf => load_gltf_mesh(path)?,
        AssetFormat::Fbx => bail!(
            "FBX decoding is not supported for '{}'; convert the model to OBJ or glTF",
            path.display()
        ),
    };

    if mesh.is_empty() {
        bail!("no geometry found in {}", path.display());
    }

    log::debug!(
        "loaded model {} ({} vertices, {} indices)",
        path.display(),
        mesh.vertices.len(),
        mesh.indices.len()
    );
    Ok(mesh)
}

/// Load a `.gltf`/`.glb` file and merge all primitives into a single mesh
fn load_gltf_mesh(path: &Path) -> Result<MeshData> {
    let (doc, buffers, _images) = gltf::import(path)
        .with_context(|| format!("failed to import glTF: {}", path.display()))?;

    let mut mesh = MeshData::default();

    for gltf_mesh in doc.meshes() {
        for prim in gltf_mesh.primitives() {
            let reader = prim.reader(|buf| buffers.get(buf.index()).map(|b| b.0.as_slice()));

            // Positions are required; skip primitives without them.
            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(it) => it.collect(),
                None => continue,
            };
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(it) => it.collect(),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };
            let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
                Some(it) => it.into_f32().collect(),
                None => vec![[0.0, 0.0]; positions.len()],
            };

            let base = mesh.vertices.len() as u32;
            for i in 0..positions.len() {
                mesh.vertices.push(Vertex {
                    position: Vec3::from_array(positions[i]),
                    normal: Vec3::from_array(normals[i]),
                    uv: Vec2::from_array(uvs[i]),
                });
            }

            // Triangles can be implicit in glTF; fall back to sequential indices.
            let indices: Vec<u32> = match reader.read_indices() {
                Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U32(it)) => it.collect(),
                None => (0..positions.len() as u32).collect(),
            };
            mesh.indices.extend(indices.into_iter().map(|i| base + i));
        }
    }

    Ok(mesh)
}

/// Load and decode a texture image from disk
pub fn load_texture(path: &Path) -> Result<Texture> {
    let image = image::open(path)
        .with_context(|| format!("couldn't load texture {}", path.display()))?
        .to_rgba8();

    log::debug!(
        "loaded texture {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(Texture {
        image,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions_dispatch() {
        assert_eq!(
            AssetFormat::from_path(Path::new("models/crate.obj")).unwrap(),
            AssetFormat::Obj
        );
        assert_eq!(
            AssetFormat::from_path(Path::new("models/crate.FBX")).unwrap(),
            AssetFormat::Fbx
        );
        assert_eq!(
            AssetFormat::from_path(Path::new("models/crate.glb")).unwrap(),
            AssetFormat::Gltf
        );
        assert_eq!(
            AssetFormat::from_path(Path::new("models/crate.gltf")).unwrap(),
            AssetFormat::Gltf
        );
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = AssetFormat::from_path(Path::new("foo.xyz")).unwrap_err();
        assert!(err.to_string().contains("unsupported model extension"));
    }

    #[test]
    fn test_missing_extension_rejected() {
        assert!(AssetFormat::from_path(Path::new("foo")).is_err());
    }

    #[test]
    fn test_texture_roundtrip_from_disk() {
        let dir = std::env::temp_dir().join("scene_motion_texture_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.png");
        image::RgbaImage::new(4, 2).save(&path).unwrap();

        let texture = load_texture(&path).unwrap();
        assert_eq!(texture.width(), 4);
        assert_eq!(texture.height(), 2);
        assert_eq!(texture.path, path);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_texture_reports_path() {
        let err = load_texture(Path::new("does/not/exist.png")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.png"));
    }

    #[test]
    fn test_obj_roundtrip_from_disk() {
        // Two triangles, enough to exercise the tobj path end to end.
        let obj = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3
f 1 3 4
";
        let dir = std::env::temp_dir().join("scene_motion_obj_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quad.obj");
        std::fs::write(&path, obj).unwrap();

        let mesh = load_model(&path).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_fbx_recognized_but_not_decoded() {
        let dir = std::env::temp_dir().join("scene_motion_fbx_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("model.fbx");
        std::fs::write(&path, b"not a real fbx").unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(err.to_string().contains("FBX"));

        std::fs::remove_file(&path).ok();
    }
}
