//! Splits a loaded scene graph into independently styled pieces

use std::collections::HashSet;

use crate::gfx::{
    resources::material::Side,
    scene::{NodeId, SceneGraph},
};

use super::piece::{Piece, PieceId};

/// Result of one decomposition pass
#[derive(Debug, Clone, Default)]
pub struct Decomposition {
    /// Pieces in traversal order
    pub pieces: Vec<Piece>,
    /// The allow-list matched nothing and every mesh was taken instead
    pub used_fallback: bool,
    /// Renderable nodes found in the source graph
    pub source_mesh_count: usize,
}

impl Decomposition {
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn ids(&self) -> Vec<&PieceId> {
        self.pieces.iter().map(Piece::id).collect()
    }
}

/// Extracts one [`Piece`] per renderable node of a scene graph
///
/// Every mesh is deep-copied together with its materials and wrapped in a
/// container carrying the node's world transform, so pieces render where
/// the source nodes did while sharing nothing with the source or each other.
#[derive(Debug, Clone, Default)]
pub struct PieceDecomposer {
    allow_list: HashSet<String>,
}

impl PieceDecomposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only isolate nodes with these names
    ///
    /// An empty list disables filtering. A list that matches nothing also
    /// falls back to every mesh, so a model with geometry never renders empty.
    pub fn with_allow_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_list(&self) -> &HashSet<String> {
        &self.allow_list
    }

    /// Runs one decomposition pass
    ///
    /// Prepares every source mesh for detached rendering first (double-sided
    /// materials, no frustum culling, shadows on, fresh bounding volumes),
    /// then copies the selected ones. A graph without meshes yields an empty
    /// result.
    pub fn decompose(&self, graph: &mut SceneGraph) -> Decomposition {
        let mesh_nodes = graph.mesh_nodes();
        Self::prepare_sources(graph, &mesh_nodes);

        let (selected, used_fallback) = self.select(graph, &mesh_nodes);

        let mut pieces: Vec<Piece> = Vec::with_capacity(selected.len());
        for (index, &node_id) in selected.iter().enumerate() {
            let Some(node) = graph.node(node_id) else {
                continue;
            };
            let Some(source_mesh) = &node.mesh else {
                continue;
            };

            let mut mesh = source_mesh.clone();
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
            mesh.frustum_culled = false;

            let desired = assign_identifier(&node.name, index);
            let id = ensure_unique_id(&pieces, &desired);
            if id.as_str() != desired {
                log::debug!("Piece id '{}' already taken, using '{}'", desired, id);
            }

            let world = graph.world_transform(node_id);
            pieces.push(Piece::new(id, node_id, world, mesh));
        }

        log::info!(
            "Decomposed {} of {} meshes into pieces",
            pieces.len(),
            mesh_nodes.len()
        );

        Decomposition {
            pieces,
            used_fallback,
            source_mesh_count: mesh_nodes.len(),
        }
    }

    fn prepare_sources(graph: &mut SceneGraph, mesh_nodes: &[NodeId]) {
        for &node_id in mesh_nodes {
            let Some(mesh) = graph.node_mut(node_id).and_then(|n| n.mesh.as_mut()) else {
                continue;
            };

            mesh.frustum_culled = false;
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;

            for material in mesh.materials_mut() {
                if material.side != Side::Double {
                    material.side = Side::Double;
                    material.mark_needs_update();
                }
            }

            mesh.geometry.compute_bounding_sphere();
            mesh.geometry.compute_bounding_box();
        }
    }

    fn select(&self, graph: &SceneGraph, mesh_nodes: &[NodeId]) -> (Vec<NodeId>, bool) {
        if self.allow_list.is_empty() {
            return (mesh_nodes.to_vec(), false);
        }

        let filtered: Vec<NodeId> = mesh_nodes
            .iter()
            .copied()
            .filter(|&id| {
                graph
                    .node(id)
                    .is_some_and(|n| !n.name.is_empty() && self.allow_list.contains(&n.name))
            })
            .collect();

        if filtered.is_empty() && !mesh_nodes.is_empty() {
            log::warn!(
                "Piece allow-list {:?} matched none of {} meshes, isolating all of them",
                self.allow_list,
                mesh_nodes.len()
            );
            return (mesh_nodes.to_vec(), true);
        }

        (filtered, false)
    }
}

/// Authored name when it has visible characters, `piece-{index}` otherwise
///
/// `index` is the position in the selected node list.
pub fn assign_identifier(name: &str, index: usize) -> String {
    if name.trim().is_empty() {
        format!("piece-{}", index)
    } else {
        name.to_string()
    }
}

fn ensure_unique_id(pieces: &[Piece], desired: &str) -> PieceId {
    let mut counter = 0;
    let mut candidate = desired.to_string();

    while pieces.iter().any(|p| p.id().as_str() == candidate) {
        counter += 1;
        candidate = format!("{} ({})", desired, counter);
    }

    PieceId::new(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::GeometryData,
        resources::material::{Emissive, Material},
        scene::{Mesh, Transform},
    };
    use cgmath::{Deg, Quaternion, Rotation3, Vector3};

    fn triangle() -> Mesh {
        let geometry = GeometryData::from_flat(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[],
            &[],
            vec![0, 1, 2],
        );
        Mesh::new(geometry, Material::default())
    }

    /// Root group with `Bed`, `Desk` and an unnamed mesh
    fn room() -> SceneGraph {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("room", Transform::identity());
        for name in ["Bed", "Desk", ""] {
            let node = graph.add_child(root, name, Transform::identity());
            graph.set_mesh(node, triangle());
        }
        graph
    }

    fn ids(decomposition: &Decomposition) -> Vec<&str> {
        decomposition.pieces.iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn test_named_and_unnamed_nodes() {
        let mut graph = room();
        let result = PieceDecomposer::new().decompose(&mut graph);

        assert_eq!(ids(&result), vec!["Bed", "Desk", "piece-2"]);
        assert_eq!(result.source_mesh_count, 3);
        assert!(!result.used_fallback);
    }

    #[test]
    fn test_blank_names_use_positional_fallback() {
        assert_eq!(assign_identifier("   ", 4), "piece-4");
        assert_eq!(assign_identifier("", 0), "piece-0");
        assert_eq!(assign_identifier(" Lamp ", 1), " Lamp ");
    }

    #[test]
    fn test_one_piece_per_mesh_with_unique_ids() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("room", Transform::identity());
        let names = ["Chair", "Chair", "", "piece-3", "", "Shelf", "Chair"];
        for name in names {
            let node = graph.add_child(root, name, Transform::identity());
            graph.set_mesh(node, triangle());
        }
        // A group without geometry is not a piece
        graph.add_child(root, "Empty", Transform::identity());

        let result = PieceDecomposer::new().decompose(&mut graph);
        assert_eq!(result.len(), names.len());

        let unique: HashSet<&str> = ids(&result).into_iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(
            ids(&result),
            vec!["Chair", "Chair (1)", "piece-2", "piece-3", "piece-4", "Shelf", "Chair (2)"]
        );
    }

    #[test]
    fn test_positional_collision_gets_suffix() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("room", Transform::identity());
        for name in ["piece-1", ""] {
            let node = graph.add_child(root, name, Transform::identity());
            graph.set_mesh(node, triangle());
        }

        let result = PieceDecomposer::new().decompose(&mut graph);
        assert_eq!(ids(&result), vec!["piece-1", "piece-1 (1)"]);
    }

    #[test]
    fn test_empty_graph_yields_no_pieces() {
        let mut graph = SceneGraph::new();
        graph.add_root("room", Transform::identity());

        let result = PieceDecomposer::new().with_allow_list(["Bed"]).decompose(&mut graph);
        assert!(result.is_empty());
        assert!(!result.used_fallback);
        assert_eq!(result.source_mesh_count, 0);
    }

    #[test]
    fn test_allow_list_filters_by_name() {
        let mut graph = room();
        let result = PieceDecomposer::new().with_allow_list(["Desk"]).decompose(&mut graph);

        assert_eq!(ids(&result), vec!["Desk"]);
        assert!(!result.used_fallback);
    }

    #[test]
    fn test_allow_list_without_matches_falls_back_to_all() {
        let mut graph = room();
        let result = PieceDecomposer::new()
            .with_allow_list(["Wardrobe", "Lamp"])
            .decompose(&mut graph);

        assert_eq!(ids(&result), vec!["Bed", "Desk", "piece-2"]);
        assert!(result.used_fallback);
    }

    #[test]
    fn test_pieces_are_isolated_from_source_and_each_other() {
        let mut graph = room();
        let mut result = PieceDecomposer::new().decompose(&mut graph);

        result.pieces[0].for_each_mesh_mut(|mesh| {
            for material in mesh.materials_mut() {
                material.opacity = Some(0.4);
                material.emissive = Some(Emissive::new([0.3, 0.3, 0.3], 0.6));
            }
        });

        for piece in &result.pieces[1..] {
            for material in piece.materials() {
                assert_eq!(material.opacity, Some(1.0));
                assert_eq!(material.emissive, Some(Emissive::NONE));
            }
        }
        for node_id in graph.mesh_nodes() {
            let mesh = graph.node(node_id).unwrap().mesh.as_ref().unwrap();
            assert_eq!(mesh.materials[0].opacity, Some(1.0));
            assert_eq!(mesh.materials[0].emissive, Some(Emissive::NONE));
        }
    }

    #[test]
    fn test_sources_and_copies_are_prepared_for_detached_rendering() {
        let mut graph = room();
        let result = PieceDecomposer::new().decompose(&mut graph);

        for node_id in graph.mesh_nodes() {
            let mesh = graph.node(node_id).unwrap().mesh.as_ref().unwrap();
            assert!(!mesh.frustum_culled);
            assert!(mesh.geometry.bounding_box.is_some());
            assert!(mesh.geometry.bounding_sphere.is_some());
            assert_eq!(mesh.materials[0].side, Side::Double);
        }

        for piece in &result.pieces {
            piece.for_each_mesh(|mesh, _| {
                assert!(mesh.cast_shadow && mesh.receive_shadow);
                assert!(!mesh.frustum_culled);
                assert!(mesh.materials.iter().all(|m| m.side == Side::Double));
            });
        }
    }

    #[test]
    fn test_world_transform_is_baked_into_container() {
        let mut graph = SceneGraph::new();
        let parent = Transform::from_translation(Vector3::new(10.0, 0.0, 0.0))
            .with_rotation(Quaternion::from_angle_y(Deg(90.0)))
            .with_scale(2.0);
        let root = graph.add_root("room", parent);
        let child_local = Transform::from_translation(Vector3::new(1.0, 0.0, 0.0));
        let node = graph.add_child(root, "Lamp", child_local);
        graph.set_mesh(node, triangle());

        let result = PieceDecomposer::new().decompose(&mut graph);
        let piece = &result.pieces[0];

        let expected = parent.then(&child_local);
        assert!(piece.world_transform().approx_eq(&expected, 1e-4));
        assert_eq!(piece.source_node(), node);

        // The copied mesh sits at identity under the container
        piece.for_each_mesh(|_, world| {
            let original = graph.world_matrix(node);
            for c in 0..4 {
                for r in 0..4 {
                    assert!((world[c][r] - original[c][r]).abs() < 1e-4);
                }
            }
        });
    }
}
