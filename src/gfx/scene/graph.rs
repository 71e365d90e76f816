use cgmath::{Matrix4, SquareMatrix};

use super::{mesh::Mesh, transform::Transform};

/// Index of a node inside its [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named node with a local transform and an optional mesh
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Authored name, possibly empty
    pub name: String,
    /// Transform relative to the parent node
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Loaded model hierarchy
///
/// Nodes live in a flat arena and reference each other by [`NodeId`]. A graph
/// may have several roots (an OBJ file with no grouping, for example).
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level node
    pub fn add_root(&mut self, name: &str, transform: Transform) -> NodeId {
        let id = self.push_node(name, transform, None);
        self.roots.push(id);
        id
    }

    /// Adds a node under `parent`
    ///
    /// # Panics
    /// If `parent` does not belong to this graph.
    pub fn add_child(&mut self, parent: NodeId, name: &str, transform: Transform) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent node {:?} not in graph", parent);
        let id = self.push_node(name, transform, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Attaches a mesh to a node, replacing any existing one
    pub fn set_mesh(&mut self, node: NodeId, mesh: Mesh) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.mesh = Some(mesh);
        }
    }

    fn push_node(&mut self, name: &str, transform: Transform, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            transform,
            mesh: None,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in traversal order with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .find(|id| self.nodes[id.0].name == name)
    }

    /// Depth-first pre-order traversal over every root
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }

        order
    }

    /// Nodes carrying a mesh, in traversal order
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        self.traverse()
            .into_iter()
            .filter(|id| self.nodes[id.0].has_mesh())
            .collect()
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.has_mesh()).count()
    }

    /// Product of the local matrices from the root down to `id`
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let mut matrix = Matrix4::identity();
        let mut current = self.nodes.get(id.0);

        while let Some(node) = current {
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent.and_then(|p| self.nodes.get(p.0));
        }

        matrix
    }

    /// World-space transform of a node, decomposed into TRS
    pub fn world_transform(&self, id: NodeId) -> Transform {
        Transform::from_matrix(&self.world_matrix(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::GeometryData, resources::material::Material};
    use cgmath::{InnerSpace, Vector3};

    fn mesh() -> Mesh {
        Mesh::new(GeometryData::new(), Material::default())
    }

    #[test]
    fn test_traverse_is_depth_first_preorder() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("root", Transform::identity());
        let a = graph.add_child(root, "a", Transform::identity());
        let a1 = graph.add_child(a, "a1", Transform::identity());
        let b = graph.add_child(root, "b", Transform::identity());
        let other = graph.add_root("other", Transform::identity());

        assert_eq!(graph.traverse(), vec![root, a, a1, b, other]);
        assert_eq!(graph.node(a1).unwrap().parent(), Some(a));
        assert_eq!(graph.node(root).unwrap().children(), &[a, b]);
    }

    #[test]
    fn test_mesh_nodes_skip_empty_groups() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("room", Transform::identity());
        let bed = graph.add_child(root, "Bed", Transform::identity());
        let _group = graph.add_child(root, "Empty", Transform::identity());
        let desk = graph.add_child(root, "Desk", Transform::identity());
        graph.set_mesh(bed, mesh());
        graph.set_mesh(desk, mesh());

        assert_eq!(graph.mesh_nodes(), vec![bed, desk]);
        assert_eq!(graph.mesh_count(), 2);
        assert_eq!(graph.find_by_name("Desk"), Some(desk));
        assert_eq!(graph.find_by_name("Lamp"), None);
    }

    #[test]
    fn test_world_transform_composes_ancestors() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("root", Transform::from_translation(Vector3::new(0.0, 1.0, 0.0)));
        let scaled = graph.add_child(root, "scaled", Transform::identity().with_scale(3.0));
        let leaf = graph.add_child(scaled, "leaf", Transform::from_translation(Vector3::new(1.0, 0.0, 0.0)));

        let world = graph.world_transform(leaf);
        assert!((world.translation - Vector3::new(3.0, 1.0, 0.0)).magnitude() < 1e-5);
        assert!((world.scale - Vector3::new(3.0, 3.0, 3.0)).magnitude() < 1e-5);
    }
}
