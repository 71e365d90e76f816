use crate::isolate::PieceId;

/// State change requested by a piece's pointer handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverCommand {
    Set(PieceId),
    Clear,
}

/// The single hovered-piece slot shared by every piece and the overlay
///
/// Last write wins: rapid enter/leave sequences are not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct HoverStore {
    hovered: Option<PieceId>,
    writes: u64,
}

impl HoverStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered piece, if any
    pub fn hovered(&self) -> Option<&PieceId> {
        self.hovered.as_ref()
    }

    pub fn is_hovered(&self, id: &PieceId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    pub fn set_hovered(&mut self, id: PieceId) {
        log::debug!("hover -> {}", id);
        self.hovered = Some(id);
        self.writes += 1;
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.hovered.take() {
            log::debug!("hover cleared (was {})", previous);
        }
        self.writes += 1;
    }

    pub fn apply(&mut self, command: HoverCommand) {
        match command {
            HoverCommand::Set(id) => self.set_hovered(id),
            HoverCommand::Clear => self.clear(),
        }
    }

    /// Number of mutations since creation
    pub fn writes(&self) -> u64 {
        self.writes
    }
}
