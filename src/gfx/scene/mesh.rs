use crate::gfx::{geometry::GeometryData, resources::material::Material};

/// Renderable payload of a scene node: geometry plus one or more materials
///
/// The material list may be empty while textures or materials are still
/// streaming in; styling code treats that as "nothing to style yet".
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: GeometryData,
    pub materials: Vec<Material>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Whether the renderer may skip this mesh when its bounds leave the view frustum
    pub frustum_culled: bool,
}

impl Mesh {
    /// Create a mesh with a single material
    pub fn new(geometry: GeometryData, material: Material) -> Self {
        Self::with_materials(geometry, vec![material])
    }

    /// Create a mesh with a material per geometry group
    pub fn with_materials(geometry: GeometryData, materials: Vec<Material>) -> Self {
        Self {
            geometry,
            materials,
            cast_shadow: false,
            receive_shadow: false,
            frustum_culled: true,
        }
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.materials.iter_mut()
    }
}
