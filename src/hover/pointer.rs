//! Pointer enter/leave dispatch
//!
//! Converts raw pointer positions into `Over`/`Out` events on pieces. Hits
//! are visited nearest first; a handler that stops propagation hides every
//! piece behind it. Handlers only return [`HoverCommand`]s, and the
//! dispatcher applies all `Out` commands before any `Over` command so moving
//! straight from one piece onto another ends with the new piece hovered.
//!
//! Enter/leave requests that name a piece directly go through the same
//! tracking, so a later ray that misses still releases a piece entered that
//! way.

use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::picking::{ObjectPicker, Ray};
use crate::isolate::{Piece, PieceId};

use super::store::{HoverCommand, HoverStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Over,
    Out,
}

/// Event handed to a piece's pointer handler
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub target: PieceId,
    /// Distance from the pointer ray origin to the hit
    pub distance: f32,
    stopped: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, target: PieceId, distance: f32) -> Self {
        Self {
            kind,
            target,
            distance,
            stopped: false,
        }
    }

    /// Prevents delivery to pieces behind the current target
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

#[derive(Debug, Clone, Copy)]
struct Entered {
    index: usize,
    distance: f32,
    stopped: bool,
}

/// Tracks which pieces are under the pointer
pub struct PointerDispatcher {
    picker: ObjectPicker,
    entered: Vec<Entered>,
    viewport: (f32, f32),
    view_proj: Matrix4<f32>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self {
            picker: ObjectPicker::new(),
            entered: Vec::new(),
            viewport: (0.0, 0.0),
            view_proj: Matrix4::identity(),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_view_projection(&mut self, view_proj: Matrix4<f32>) {
        self.view_proj = view_proj;
    }

    /// Forget tracked pieces and cached bounds (model replaced)
    pub fn reset(&mut self) {
        self.entered.clear();
        self.picker.invalidate_cache();
    }

    /// Indices of pieces currently receiving the pointer, nearest first
    pub fn entered(&self) -> Vec<usize> {
        self.entered.iter().map(|e| e.index).collect()
    }

    /// Pointer moved to `screen_pos` (physical pixels)
    pub fn pointer_moved(&mut self, screen_pos: (f32, f32), pieces: &[Piece], store: &mut HoverStore) {
        match ObjectPicker::screen_to_ray(screen_pos, self.viewport, &self.view_proj) {
            Some(ray) => self.pointer_ray(&ray, pieces, store),
            None => self.update(&[], pieces, store),
        }
    }

    /// Pointer moved along a world-space ray
    pub fn pointer_ray(&mut self, ray: &Ray, pieces: &[Piece], store: &mut HoverStore) {
        let hits: Vec<(usize, f32)> = self
            .picker
            .pick_all(ray, pieces)
            .iter()
            .map(|hit| (hit.index, hit.distance))
            .collect();
        self.update(&hits, pieces, store);
    }

    /// Pointer left the canvas
    pub fn pointer_left(&mut self, pieces: &[Piece], store: &mut HoverStore) {
        self.update(&[], pieces, store);
    }

    /// Dispatches for a nearest-first hit list of `(piece index, distance)`
    pub fn update(&mut self, hits: &[(usize, f32)], pieces: &[Piece], store: &mut HoverStore) {
        let mut now: Vec<Entered> = Vec::new();
        let mut overs: Vec<HoverCommand> = Vec::new();

        for &(index, distance) in hits {
            let Some(piece) = pieces.get(index) else {
                continue;
            };

            let entry = match self.entered.iter().find(|e| e.index == index) {
                Some(previous) => Entered { distance, ..*previous },
                None => {
                    let mut event = PointerEvent::new(PointerEventKind::Over, piece.id().clone(), distance);
                    overs.push(piece.on_pointer_over(&mut event));
                    Entered {
                        index,
                        distance,
                        stopped: event.is_propagation_stopped(),
                    }
                }
            };

            now.push(entry);
            if entry.stopped {
                break;
            }
        }

        let outs = self.outs_except(&now, pieces);
        for command in outs.into_iter().chain(overs) {
            store.apply(command);
        }

        self.entered = now;
    }

    /// Pointer entered the piece at `index` without a ray
    ///
    /// Every other tracked piece gets `Out` first. Returns `false` for an
    /// unknown index.
    pub fn enter(&mut self, index: usize, pieces: &[Piece], store: &mut HoverStore) -> bool {
        let Some(piece) = pieces.get(index) else {
            return false;
        };

        let mut event = PointerEvent::new(PointerEventKind::Over, piece.id().clone(), 0.0);
        let over = piece.on_pointer_over(&mut event);
        let now = vec![Entered {
            index,
            distance: 0.0,
            stopped: event.is_propagation_stopped(),
        }];

        for command in self.outs_except(&now, pieces) {
            store.apply(command);
        }
        store.apply(over);

        self.entered = now;
        true
    }

    /// Pointer left the piece at `index` without a ray
    ///
    /// `Out` is delivered even when the piece was not tracked. Returns
    /// `false` for an unknown index.
    pub fn leave(&mut self, index: usize, pieces: &[Piece], store: &mut HoverStore) -> bool {
        let Some(piece) = pieces.get(index) else {
            return false;
        };

        let distance = match self.entered.iter().position(|e| e.index == index) {
            Some(position) => self.entered.remove(position).distance,
            None => 0.0,
        };
        let mut event = PointerEvent::new(PointerEventKind::Out, piece.id().clone(), distance);
        store.apply(piece.on_pointer_out(&mut event));
        true
    }

    /// `Out` commands for tracked pieces missing from `now`
    fn outs_except(&self, now: &[Entered], pieces: &[Piece]) -> Vec<HoverCommand> {
        let mut outs = Vec::new();
        for previous in &self.entered {
            if now.iter().any(|e| e.index == previous.index) {
                continue;
            }
            if let Some(piece) = pieces.get(previous.index) {
                let mut event = PointerEvent::new(PointerEventKind::Out, piece.id().clone(), previous.distance);
                outs.push(piece.on_pointer_out(&mut event));
            }
        }
        outs
    }
}

impl Default for PointerDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::GeometryData,
        resources::material::Material,
        scene::{Mesh, SceneGraph, Transform},
    };
    use cgmath::Vector3;

    /// Unit quads facing +Z, stacked along Z
    fn pieces() -> Vec<Piece> {
        let mut graph = SceneGraph::new();
        let node = graph.add_root("root", Transform::identity());
        ["Front", "Back"]
            .iter()
            .zip([0.0_f32, -2.0])
            .map(|(name, z)| {
                let geometry = GeometryData::from_flat(
                    &[-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 0.0, -1.0, 1.0, 0.0],
                    &[],
                    &[],
                    vec![0, 1, 2, 0, 2, 3],
                );
                Piece::new(
                    PieceId::from(*name),
                    node,
                    Transform::from_translation(Vector3::new(0.0, 0.0, z)),
                    Mesh::new(geometry, Material::default()),
                )
            })
            .collect()
    }

    fn ray_at(x: f32) -> Ray {
        Ray::new(Vector3::new(x, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_nearest_piece_stops_propagation() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);

        assert_eq!(store.hovered(), Some(&PieceId::from("Front")));
        assert_eq!(dispatcher.entered(), vec![0]);
    }

    #[test]
    fn test_leaving_clears_hover() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);
        dispatcher.pointer_ray(&ray_at(50.0), &pieces, &mut store);
        assert!(store.hovered().is_none());

        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);
        dispatcher.pointer_left(&pieces, &mut store);
        assert!(store.hovered().is_none());
        assert!(dispatcher.entered().is_empty());
    }

    #[test]
    fn test_staying_on_a_piece_does_not_rewrite_state() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);
        let writes = store.writes();
        dispatcher.pointer_ray(&ray_at(0.1), &pieces, &mut store);
        assert_eq!(store.writes(), writes);
    }

    #[test]
    fn test_direct_move_between_pieces_ends_on_new_piece() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.update(&[(0, 5.0)], &pieces, &mut store);
        dispatcher.update(&[(1, 7.0)], &pieces, &mut store);

        assert_eq!(store.hovered(), Some(&PieceId::from("Back")));
        assert_eq!(dispatcher.entered(), vec![1]);
    }

    #[test]
    fn test_screen_position_uses_camera() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        // No viewport yet: nothing can be hit
        dispatcher.pointer_moved((400.0, 300.0), &pieces, &mut store);
        assert!(store.hovered().is_none());

        // Orthographic-like camera: identity view-projection scaled down so
        // the quads sit inside clip space
        dispatcher.set_viewport(800.0, 600.0);
        dispatcher.set_view_projection(Matrix4::from_scale(0.1));
        dispatcher.pointer_moved((400.0, 300.0), &pieces, &mut store);
        assert!(store.hovered().is_some());
    }

    #[test]
    fn test_ray_miss_releases_directly_entered_piece() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        assert!(dispatcher.enter(0, &pieces, &mut store));
        assert_eq!(store.hovered(), Some(&PieceId::from("Front")));
        assert_eq!(dispatcher.entered(), vec![0]);

        dispatcher.pointer_ray(&ray_at(50.0), &pieces, &mut store);
        assert!(store.hovered().is_none());
        assert!(dispatcher.entered().is_empty());
    }

    #[test]
    fn test_direct_leave_lets_ray_enter_again() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);
        assert!(dispatcher.leave(0, &pieces, &mut store));
        assert!(store.hovered().is_none());
        assert!(dispatcher.entered().is_empty());

        // Same ray again counts as a fresh entry
        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);
        assert_eq!(store.hovered(), Some(&PieceId::from("Front")));
    }

    #[test]
    fn test_direct_enter_replaces_ray_hover() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.pointer_ray(&ray_at(0.0), &pieces, &mut store);
        assert!(dispatcher.enter(1, &pieces, &mut store));
        assert_eq!(store.hovered(), Some(&PieceId::from("Back")));
        assert_eq!(dispatcher.entered(), vec![1]);

        assert!(!dispatcher.enter(9, &pieces, &mut store));
        assert!(!dispatcher.leave(9, &pieces, &mut store));
        assert_eq!(store.hovered(), Some(&PieceId::from("Back")));
    }

    #[test]
    fn test_enclosing_shell_does_not_hide_inner_piece() {
        let mut graph = SceneGraph::new();
        let node = graph.add_root("root", Transform::identity());

        // Floor at y = 0 and back wall at z = 0, both spanning 0..10
        let room = GeometryData::from_flat(
            &[
                0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 0.0, 10.0, 0.0, 0.0, 10.0, //
                0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 10.0, 0.0,
            ],
            &[],
            &[],
            vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7],
        );
        let bed = GeometryData::from_flat(
            &[4.0, 0.0, 5.0, 6.0, 0.0, 5.0, 6.0, 2.0, 5.0, 4.0, 2.0, 5.0],
            &[],
            &[],
            vec![0, 1, 2, 0, 2, 3],
        );
        let pieces = vec![
            Piece::new(PieceId::from("Room"), node, Transform::identity(), Mesh::new(room, Material::default())),
            Piece::new(PieceId::from("Bed"), node, Transform::identity(), Mesh::new(bed, Material::default())),
        ];

        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();
        let ray = Ray::new(Vector3::new(5.0, 0.5, 20.0), Vector3::new(0.0, 0.0, -1.0));
        dispatcher.pointer_ray(&ray, &pieces, &mut store);
        assert_eq!(store.hovered(), Some(&PieceId::from("Bed")));

        // Above the bed the wall is the first surface
        let ray = Ray::new(Vector3::new(5.0, 5.0, 20.0), Vector3::new(0.0, 0.0, -1.0));
        dispatcher.pointer_ray(&ray, &pieces, &mut store);
        assert_eq!(store.hovered(), Some(&PieceId::from("Room")));
    }

    #[test]
    fn test_unknown_indices_are_ignored() {
        let pieces = pieces();
        let mut store = HoverStore::new();
        let mut dispatcher = PointerDispatcher::new();

        dispatcher.update(&[(9, 1.0), (1, 2.0)], &pieces, &mut store);
        assert_eq!(store.hovered(), Some(&PieceId::from("Back")));
    }
}
