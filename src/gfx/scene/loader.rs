//! OBJ model loading
//!
//! Reads the single model file the viewer displays and turns it into a
//! [`SceneGraph`]: one root named after the file, with one child node per OBJ
//! object or group. OBJ vertices are already in model space, so every child
//! keeps an identity transform.

use std::path::Path;

use crate::error::{Result, ViewerError};
use crate::gfx::{
    geometry::GeometryData,
    resources::material::Material,
};

use super::{graph::SceneGraph, mesh::Mesh, transform::Transform};

/// Name tobj gives to geometry that appears before any `o`/`g` statement
const TOBJ_UNNAMED: &str = "unnamed_object";

/// Loads OBJ/MTL files into scene graphs
pub struct ObjLoader {
    options: tobj::LoadOptions,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self {
            options: tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        }
    }

    /// Loads a model file and its material library
    ///
    /// A missing or broken MTL file is not fatal: meshes fall back to the
    /// default material.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SceneGraph> {
        let path = path.as_ref();
        log::info!("Loading model {}", path.display());

        let (models, materials) =
            tobj::load_obj(path, &self.options).map_err(|source| ViewerError::ModelLoad {
                path: path.to_path_buf(),
                source,
            })?;

        let materials = materials.unwrap_or_else(|e| {
            log::warn!("No usable MTL for {} ({}), using default materials", path.display(), e);
            Vec::new()
        });
        let materials: Vec<Material> = materials.iter().enumerate().map(convert_material).collect();

        let root_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut graph = SceneGraph::new();
        let root = graph.add_root(&root_name, Transform::identity());

        for model in &models {
            let name = if model.name == TOBJ_UNNAMED {
                ""
            } else {
                model.name.as_str()
            };

            let mesh = &model.mesh;
            let geometry = GeometryData::from_flat(
                &mesh.positions,
                &mesh.normals,
                &mesh.texcoords,
                mesh.indices.clone(),
            );

            let material = mesh
                .material_id
                .and_then(|id| materials.get(id))
                .cloned()
                .unwrap_or_default();

            let node = graph.add_child(root, name, Transform::identity());
            graph.set_mesh(node, Mesh::new(geometry, material));
        }

        log::info!(
            "Loaded {}: {} nodes, {} meshes, {} materials",
            path.display(),
            graph.len(),
            graph.mesh_count(),
            materials.len()
        );

        Ok(graph)
    }
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// MTL → [`Material`]
///
/// `illum 0` (constant color) maps to an unlit material without an emissive
/// channel. `Ke` lands in tobj's unknown parameters and is parsed from there.
fn convert_material((index, mtl): (usize, &tobj::Material)) -> Material {
    let name = if mtl.name.is_empty() {
        format!("material_{}", index)
    } else {
        mtl.name.clone()
    };

    let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);

    let mut material = if mtl.illumination_model == Some(0) {
        Material::unlit(&name, diffuse)
    } else {
        // MTL has no metallic term; shininess maps onto roughness
        let roughness = 1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0);
        Material::new(&name, diffuse, 0.0, roughness)
    };

    if let Some(alpha) = mtl.dissolve {
        material = material.with_alpha(alpha);
    }

    if material.supports_emissive() {
        if let Some([r, g, b]) = mtl.unknown_param.get("Ke").and_then(|v| parse_rgb(v)) {
            material = material.with_emission(r, g, b);
        }
    }

    material
}

fn parse_rgb(value: &str) -> Option<[f32; 3]> {
    let mut parts = value.split_whitespace().map(|p| p.parse::<f32>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::material::Emissive;
    use std::fs;

    const ROOM_OBJ: &str = "\
mtllib room.mtl
o Bed
v 0 0 0
v 2 0 0
v 2 1 0
v 0 1 0
usemtl Fabric
f 1 2 3 4
o Desk
v 3 0 0
v 4 0 0
v 4 1 0
usemtl Lamp
f 5 6 7
";

    const ROOM_MTL: &str = "\
newmtl Fabric
Kd 0.7 0.2 0.2
d 0.5
illum 2

newmtl Lamp
Kd 1.0 1.0 0.8
Ke 0.3 0.3 0.1
illum 0
";

    fn write_fixture(dir: &Path, obj: &str, mtl: Option<&str>) -> std::path::PathBuf {
        let obj_path = dir.join("room.obj");
        fs::write(&obj_path, obj).unwrap();
        if let Some(mtl) = mtl {
            fs::write(dir.join("room.mtl"), mtl).unwrap();
        }
        obj_path
    }

    #[test]
    fn test_load_builds_one_child_per_object() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_fixture(dir.path(), ROOM_OBJ, Some(ROOM_MTL));

        let graph = ObjLoader::new().load(&path)?;
        assert_eq!(graph.roots().len(), 1);

        let root = graph.node(graph.roots()[0]).unwrap();
        assert_eq!(root.name, "room");
        assert!(!root.has_mesh());
        assert_eq!(graph.mesh_count(), 2);

        let bed = graph.node(graph.find_by_name("Bed").unwrap()).unwrap();
        let bed_mesh = bed.mesh.as_ref().unwrap();
        // Quad is triangulated
        assert_eq!(bed_mesh.geometry.triangle_count(), 2);
        assert_eq!(bed_mesh.materials[0].name, "Fabric");
        assert_eq!(bed_mesh.materials[0].opacity, Some(0.5));
        assert!(bed_mesh.materials[0].transparent);
        Ok(())
    }

    #[test]
    fn test_constant_color_material_has_no_emissive_channel() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_fixture(dir.path(), ROOM_OBJ, Some(ROOM_MTL));

        let graph = ObjLoader::new().load(&path)?;
        let desk = graph.node(graph.find_by_name("Desk").unwrap()).unwrap();
        let lamp = &desk.mesh.as_ref().unwrap().materials[0];

        assert_eq!(lamp.name, "Lamp");
        assert!(!lamp.supports_emissive());
        assert!(lamp.supports_opacity());
        Ok(())
    }

    #[test]
    fn test_lit_material_reads_emission() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mtl = ROOM_MTL.replace("d 0.5\n", "d 0.5\nKe 0.1 0.2 0.3\n");
        let path = write_fixture(dir.path(), ROOM_OBJ, Some(&mtl));

        let graph = ObjLoader::new().load(&path)?;
        let bed = graph.node(graph.find_by_name("Bed").unwrap()).unwrap();
        let fabric = &bed.mesh.as_ref().unwrap().materials[0];

        assert_eq!(fabric.emissive, Some(Emissive::new([0.1, 0.2, 0.3], 1.0)));
        Ok(())
    }

    #[test]
    fn test_missing_mtl_falls_back_to_default_material() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_fixture(dir.path(), ROOM_OBJ, None);

        let graph = ObjLoader::new().load(&path)?;
        let bed = graph.node(graph.find_by_name("Bed").unwrap()).unwrap();
        assert_eq!(bed.mesh.as_ref().unwrap().materials[0], Material::default());
        Ok(())
    }

    #[test]
    fn test_unnamed_geometry_gets_blank_name() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_fixture(dir.path(), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", None);

        let graph = ObjLoader::new().load(&path)?;
        let ids = graph.mesh_nodes();
        assert_eq!(ids.len(), 1);
        assert_eq!(graph.node(ids[0]).unwrap().name, "");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_model_load_error() {
        let result = ObjLoader::new().load("does/not/exist.obj");
        assert!(matches!(result, Err(ViewerError::ModelLoad { .. })));
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("0.1 0.2 0.3"), Some([0.1, 0.2, 0.3]));
        assert_eq!(parse_rgb("0.1 oops 0.3"), None);
        assert_eq!(parse_rgb("0.1"), None);
    }
}
