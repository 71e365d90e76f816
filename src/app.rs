//! Hover viewer session
//!
//! [`HoverViewer`] ties the pieces together for a host application: it owns
//! the hover session, the decomposed pieces, pointer dispatch and the frame
//! scheduler. The host feeds it window events and a camera matrix, calls
//! [`HoverViewer::frame`] once per rendered frame and draws the returned
//! appearances plus the overlay.

use cgmath::Matrix4;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    window::Window,
};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::frame::{FrameContext, FrameOutput, FrameScheduler};
use crate::gfx::{
    picking::Ray,
    scene::{ObjLoader, SceneGraph},
};
use crate::hover::{CursorState, CursorTask, HoverSession, PointerDispatcher, PointerEventKind};
use crate::info::InfoRegistry;
use crate::isolate::{HoverStyleTask, Piece, PieceDecomposer, PieceId};
use crate::ui::{overlay_content, InfoPanel, OverlayContent};

/// Where the viewer is in the model lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelState {
    /// No model yet; the view is empty
    Loading,
    /// Model decomposed into pieces
    Ready,
    /// Loading failed; the view stays empty
    Failed(String),
}

pub struct HoverViewer {
    config: ViewerConfig,
    registry: InfoRegistry,
    session: HoverSession,
    decomposer: PieceDecomposer,
    pieces: Vec<Piece>,
    model_state: ModelState,
    dispatcher: PointerDispatcher,
    scheduler: FrameScheduler,
    cursor: CursorState,
    panel: InfoPanel,
    output: FrameOutput,
}

impl HoverViewer {
    /// Creates a viewer and begins its hover session. No model is loaded yet.
    pub fn new(config: ViewerConfig, registry: InfoRegistry) -> Self {
        let decomposer = PieceDecomposer::new().with_allow_list(config.allow_list.iter().cloned());

        let mut scheduler = FrameScheduler::new();
        scheduler.add_task(Box::new(HoverStyleTask::new(config.style)));
        scheduler.add_task(Box::new(CursorTask));

        let panel = InfoPanel::new(config.panel);

        Self {
            config,
            registry,
            session: HoverSession::active(),
            decomposer,
            pieces: Vec::new(),
            model_state: ModelState::Loading,
            dispatcher: PointerDispatcher::new(),
            scheduler,
            cursor: CursorState::new(),
            panel,
            output: FrameOutput::default(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn registry(&self) -> &InfoRegistry {
        &self.registry
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: &PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Currently hovered piece
    pub fn hovered(&self) -> Result<Option<&PieceId>> {
        Ok(self.session.hover()?.hovered())
    }

    /// Loads and decomposes the configured model file
    ///
    /// On failure the viewer moves to [`ModelState::Failed`] with no pieces
    /// and the load error is returned.
    pub fn load_from_config(&mut self) -> Result<usize> {
        let path = self.config.model_path.clone();
        match ObjLoader::new().load(&path) {
            Ok(graph) => self.set_model(graph),
            Err(e) => {
                self.model_failed(&e);
                Err(e)
            }
        }
    }

    /// Decomposes a loaded model and makes its pieces interactive
    ///
    /// Replaces any previous model: old pieces are dropped, hover is cleared
    /// and pointer tracking starts over. Returns the number of pieces.
    pub fn set_model(&mut self, mut graph: SceneGraph) -> Result<usize> {
        let store = self.session.hover_mut()?;
        if store.hovered().is_some() {
            store.clear();
        }
        self.dispatcher.reset();

        let result = self.decomposer.decompose(&mut graph);
        if result.is_empty() {
            log::info!("Model has no renderable nodes, nothing to hover");
        }

        self.pieces = result.pieces;
        self.model_state = ModelState::Ready;
        log::info!("Model ready with {} pieces", self.pieces.len());
        Ok(self.pieces.len())
    }

    /// Records a failed load. Any previous pieces are dropped.
    pub fn model_failed(&mut self, error: &ViewerError) {
        log::warn!("Model unavailable: {}", error);
        self.pieces.clear();
        self.dispatcher.reset();
        if let Ok(store) = self.session.hover_mut() {
            if store.hovered().is_some() {
                store.clear();
            }
        }
        self.model_state = ModelState::Failed(error.to_string());
    }

    /// Camera view-projection used to turn pointer positions into rays
    pub fn set_view_projection(&mut self, view_proj: Matrix4<f32>) {
        self.dispatcher.set_view_projection(view_proj);
    }

    /// Canvas size in physical pixels
    pub fn resize(&mut self, width: f32, height: f32) {
        self.dispatcher.set_viewport(width, height);
    }

    /// Pointer moved to a canvas position in physical pixels
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Result<()> {
        let store = self.session.hover_mut()?;
        self.dispatcher.pointer_moved((x, y), &self.pieces, store);
        Ok(())
    }

    /// Pointer moved along a world-space ray
    pub fn pointer_ray(&mut self, ray: &Ray) -> Result<()> {
        let store = self.session.hover_mut()?;
        self.dispatcher.pointer_ray(ray, &self.pieces, store);
        Ok(())
    }

    /// Pointer left the canvas
    pub fn pointer_left(&mut self) -> Result<()> {
        let store = self.session.hover_mut()?;
        self.dispatcher.pointer_left(&self.pieces, store);
        Ok(())
    }

    /// Delivers a pointer-enter event straight to one piece
    ///
    /// Returns `false` when no live piece has this id, and
    /// [`ViewerError::ModelNotReady`] before a model has been decomposed.
    pub fn pointer_enter(&mut self, id: &PieceId) -> Result<bool> {
        self.deliver(PointerEventKind::Over, id)
    }

    /// Delivers a pointer-leave event straight to one piece
    pub fn pointer_leave(&mut self, id: &PieceId) -> Result<bool> {
        self.deliver(PointerEventKind::Out, id)
    }

    fn deliver(&mut self, kind: PointerEventKind, id: &PieceId) -> Result<bool> {
        let store = self.session.hover_mut()?;
        if self.model_state != ModelState::Ready {
            return Err(ViewerError::ModelNotReady);
        }
        let Some(index) = self.pieces.iter().position(|p| p.id() == id) else {
            log::debug!("Pointer event for unknown piece '{}'", id);
            return Ok(false);
        };

        Ok(match kind {
            PointerEventKind::Over => self.dispatcher.enter(index, &self.pieces, store),
            PointerEventKind::Out => self.dispatcher.leave(index, &self.pieces, store),
        })
    }

    /// Feeds a winit window event. Returns whether the viewer used it.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Result<bool> {
        match event {
            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                self.pointer_moved(*x as f32, *y as f32)?;
                Ok(true)
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer_left()?;
                Ok(true)
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.resize(*width as f32, *height as f32);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Runs every per-frame task and returns what to draw
    pub fn frame(&mut self) -> Result<FrameOutput> {
        self.session.hover()?;

        let cursor_before = self.cursor.icon();
        let mut ctx = FrameContext {
            session: &self.session,
            pieces: &mut self.pieces,
            cursor: &mut self.cursor,
            output: &mut self.output,
        };
        self.scheduler.run_frame(&mut ctx)?;

        self.output.cursor = self.cursor.icon();
        self.output.cursor_changed = self.output.cursor != cursor_before;
        Ok(self.output.clone())
    }

    /// Overlay content for the current hover state
    pub fn overlay(&self) -> Result<OverlayContent> {
        Ok(overlay_content(self.session.hover()?.hovered(), &self.registry))
    }

    /// Draws the overlay into the current ImGui frame
    pub fn draw_overlay(&self, ui: &imgui::Ui) -> Result<()> {
        let content = self.overlay()?;
        self.panel.draw(ui, &content);
        Ok(())
    }

    /// Pushes a pending cursor change to the window
    pub fn apply_cursor(&mut self, window: &Window) {
        self.cursor.apply_to(window);
    }

    /// Cursor state, including any change not yet pushed to a window
    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Ends the viewer session
    ///
    /// Resets the cursor to default, stops frame tasks, drops all pieces and
    /// ends the hover session. Hover access afterwards fails with
    /// [`ViewerError::NoActiveSession`]. Calling it twice is harmless.
    pub fn teardown(&mut self) {
        if !self.session.is_active() {
            return;
        }

        let mut ctx = FrameContext {
            session: &self.session,
            pieces: &mut self.pieces,
            cursor: &mut self.cursor,
            output: &mut self.output,
        };
        self.scheduler.teardown(&mut ctx);

        self.pieces.clear();
        self.dispatcher.reset();
        self.output.pieces.clear();
        self.session.end();
        log::info!("Viewer torn down");
    }
}
