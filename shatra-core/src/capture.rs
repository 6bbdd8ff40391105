//! Capture chain state: turn phases and the open capture session

use serde::{Deserialize, Serialize};

use crate::board::CellId;

/// Turn phase as seen by callers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Normal,
    ActiveCaptureChain,
    BiyRightsActive,
    BiyForcedMove,
}

/// An open multi-jump sequence
///
/// Stores cell ids only. Jumped-over figures stay on the board until the
/// chain ends, so they keep blocking rays but may not be jumped again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSession {
    origin: CellId,
    anchor: CellId,
    captured: Vec<CellId>,
    biy_rights: bool,
}

impl CaptureSession {
    /// Open a session for a piece about to jump from `origin`
    pub fn open(origin: CellId) -> Self {
        Self {
            origin,
            anchor: origin,
            captured: Vec::new(),
            biy_rights: false,
        }
    }

    /// Cell the chain started from
    pub fn origin(&self) -> CellId {
        self.origin
    }

    /// Cell of the jumping piece
    pub fn anchor(&self) -> CellId {
        self.anchor
    }

    /// Jumped-over cells in jump order
    pub fn captured(&self) -> &[CellId] {
        &self.captured
    }

    pub fn is_captured(&self, id: CellId) -> bool {
        self.captured.contains(&id)
    }

    pub fn has_biy_rights(&self) -> bool {
        self.biy_rights
    }

    pub(crate) fn record_jump(&mut self, over: CellId, landing: CellId) {
        debug_assert!(!self.is_captured(over), "cell {} jumped twice", over);
        self.captured.push(over);
        self.anchor = landing;
    }

    pub(crate) fn set_biy_rights(&mut self, active: bool) {
        self.biy_rights = active;
    }
}

/// What the player to move is in the middle of
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Turn {
    #[default]
    Free,
    Chain(CaptureSession),
    /// Piece on the enemy leader position that must capture this turn
    Forced(CellId),
}

impl Turn {
    pub(crate) fn phase(&self) -> Phase {
        match self {
            Turn::Free => Phase::Normal,
            Turn::Chain(session) if session.has_biy_rights() => Phase::BiyRightsActive,
            Turn::Chain(_) => Phase::ActiveCaptureChain,
            Turn::Forced(_) => Phase::BiyForcedMove,
        }
    }

    pub(crate) fn session(&self) -> Option<&CaptureSession> {
        match self {
            Turn::Chain(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_tracks_jumps() {
        let mut session = CaptureSession::open(25);
        assert_eq!(session.anchor(), 25);
        assert!(session.captured().is_empty());

        session.record_jump(26, 27);
        session.record_jump(28, 29);
        assert_eq!(session.origin(), 25);
        assert_eq!(session.anchor(), 29);
        assert_eq!(session.captured(), &[26, 28]);
        assert!(session.is_captured(26));
        assert!(!session.is_captured(27));
    }

    #[test]
    fn test_phase_follows_turn() {
        assert_eq!(Turn::Free.phase(), Phase::Normal);
        assert_eq!(Turn::Forced(8).phase(), Phase::BiyForcedMove);

        let mut session = CaptureSession::open(14);
        assert_eq!(Turn::Chain(session.clone()).phase(), Phase::ActiveCaptureChain);
        session.set_biy_rights(true);
        let turn = Turn::Chain(session);
        assert_eq!(turn.phase(), Phase::BiyRightsActive);
        assert!(turn.session().is_some());
        assert!(Turn::Free.session().is_none());
    }
}
