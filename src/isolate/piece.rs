use std::fmt;

use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::{
    geometry::Aabb,
    picking::{Pickable, Ray},
    resources::material::Material,
    scene::{Mesh, NodeId, Transform},
};
use crate::hover::{HoverCommand, PointerEvent};

/// Identifier of a hoverable piece, unique within one decomposition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(String);

impl PieceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PieceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PieceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PieceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Node of a piece's owned subtree
#[derive(Debug, Clone, PartialEq)]
pub struct PieceNode {
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub children: Vec<PieceNode>,
}

impl PieceNode {
    pub fn group(transform: Transform, children: Vec<PieceNode>) -> Self {
        Self {
            transform,
            mesh: None,
            children,
        }
    }

    pub fn leaf(mesh: Mesh) -> Self {
        Self {
            transform: Transform::identity(),
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    fn visit<'a>(&'a self, parent: Matrix4<f32>, f: &mut dyn FnMut(&'a Mesh, Matrix4<f32>)) {
        let world = parent * self.transform.to_matrix();
        if let Some(mesh) = &self.mesh {
            f(mesh, world);
        }
        for child in &self.children {
            child.visit(world, f);
        }
    }

    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Mesh)) {
        if let Some(mesh) = &mut self.mesh {
            f(mesh);
        }
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }
}

/// An independently styled, hoverable copy of one mesh from the source model
///
/// The piece owns its geometry and materials outright, so restyling it can
/// never leak into another piece or back into the source graph. Its root is a
/// container carrying the source node's baked world transform; the copied
/// mesh hangs below it with an identity transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    source: NodeId,
    root: PieceNode,
}

impl Piece {
    pub fn new(id: PieceId, source: NodeId, world: Transform, mesh: Mesh) -> Self {
        Self {
            id,
            source,
            root: PieceNode::group(world, vec![PieceNode::leaf(mesh)]),
        }
    }

    pub fn id(&self) -> &PieceId {
        &self.id
    }

    /// Node of the source graph this piece was copied from
    pub fn source_node(&self) -> NodeId {
        self.source
    }

    /// World transform baked into the container
    pub fn world_transform(&self) -> &Transform {
        &self.root.transform
    }

    pub fn root(&self) -> &PieceNode {
        &self.root
    }

    /// Visits every mesh in the subtree together with its world matrix
    pub fn for_each_mesh<'a>(&'a self, mut f: impl FnMut(&'a Mesh, Matrix4<f32>)) {
        self.root.visit(Matrix4::identity(), &mut f);
    }

    /// Visits every mesh in the subtree mutably
    pub fn for_each_mesh_mut(&mut self, mut f: impl FnMut(&mut Mesh)) {
        self.root.visit_mut(&mut f);
    }

    /// All materials in the subtree, in traversal order
    pub fn materials(&self) -> Vec<&Material> {
        let mut materials = Vec::new();
        self.for_each_mesh(|mesh, _| materials.extend(mesh.materials.iter()));
        materials
    }

    /// Pointer entered this piece: claim the hover slot and stop the event
    /// from reaching pieces behind it.
    pub fn on_pointer_over(&self, event: &mut PointerEvent) -> HoverCommand {
        event.stop_propagation();
        HoverCommand::Set(self.id.clone())
    }

    /// Pointer left this piece: release the hover slot
    pub fn on_pointer_out(&self, event: &mut PointerEvent) -> HoverCommand {
        event.stop_propagation();
        HoverCommand::Clear
    }
}

impl Pickable for Piece {
    fn world_bounds(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.for_each_mesh(|mesh, world| {
            if let Some(local) = mesh.geometry.bounds() {
                let aabb = local.transform(&world);
                bounds = Some(match bounds {
                    Some(acc) => acc.union(&aabb),
                    None => aabb,
                });
            }
        });
        bounds
    }

    /// Nearest world-space triangle along the ray
    fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        let mut nearest: Option<f32> = None;
        self.for_each_mesh(|mesh, world| {
            let positions: Vec<Vector3<f32>> = mesh
                .geometry
                .positions
                .iter()
                .map(|p| (world * Vector4::new(p[0], p[1], p[2], 1.0)).truncate())
                .collect();

            for triangle in mesh.geometry.indices.chunks_exact(3) {
                let (Some(&v0), Some(&v1), Some(&v2)) = (
                    positions.get(triangle[0] as usize),
                    positions.get(triangle[1] as usize),
                    positions.get(triangle[2] as usize),
                ) else {
                    continue;
                };
                if let Some(t) = ray.intersect_triangle(v0, v1, v2) {
                    nearest = Some(nearest.map_or(t, |n| n.min(t)));
                }
            }
        });
        nearest
    }
}
