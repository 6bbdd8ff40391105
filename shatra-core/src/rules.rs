//! Rule tables
//!
//! Legality is driven by two lookups instead of nested branching:
//! - `move_families`: which kinds of move a piece may consider, keyed by
//!   (phase, figure kind, zone)
//! - `CapturePriority::restriction`: how the mandatory-capture precedence
//!   narrows those families for each figure kind

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::capture::Phase;
use crate::pieces::{Color, FigureKind};

/// Where a piece stands relative to the two citadels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Own fortress, gate included
    Home,
    Field,
    /// Opponent's fortress, gate included
    EnemyFortress,
}

impl Zone {
    pub fn classify(coord: Coord, color: Color) -> Self {
        match coord.fortress_owner() {
            Some(owner) if owner == color => Zone::Home,
            Some(_) => Zone::EnemyFortress,
            None => Zone::Field,
        }
    }
}

/// A family of moves with its own generator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveFamily {
    /// Ordinary move along the figure's pattern
    Step,
    /// Garrison piece leaving home for the middle zone
    Evacuation,
    /// Shatra stepping back out of the enemy fortress
    FortressExit,
    Capture,
    /// End the chain in place under leader rights
    Stay,
    /// End the chain by retreating to the middle zone under leader rights
    Withdraw,
}

impl MoveFamily {
    pub fn is_capture(self) -> bool {
        self == MoveFamily::Capture
    }
}

const CAPTURE_ONLY: &[MoveFamily] = &[MoveFamily::Capture];
const GARRISON: &[MoveFamily] = &[MoveFamily::Evacuation, MoveFamily::Capture];
const ORDINARY: &[MoveFamily] = &[MoveFamily::Step, MoveFamily::Capture];
const RAIDER: &[MoveFamily] = &[MoveFamily::Step, MoveFamily::FortressExit, MoveFamily::Capture];
const RIGHTS: &[MoveFamily] = &[MoveFamily::Capture, MoveFamily::Stay, MoveFamily::Withdraw];

/// Move families open to a piece
pub fn move_families(phase: Phase, kind: FigureKind, zone: Zone) -> &'static [MoveFamily] {
    match (phase, kind, zone) {
        (Phase::Normal, FigureKind::Shatra, Zone::Home) => GARRISON,
        (Phase::Normal, FigureKind::Shatra, Zone::EnemyFortress) => RAIDER,
        (Phase::Normal, _, _) => ORDINARY,
        (Phase::ActiveCaptureChain, _, _) => CAPTURE_ONLY,
        (Phase::BiyForcedMove, _, _) => CAPTURE_ONLY,
        (Phase::BiyRightsActive, _, _) => RIGHTS,
    }
}

/// How the capture precedence treats one figure kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Restriction {
    Free,
    CaptureOnly,
    Frozen,
}

impl Restriction {
    pub fn admits(self, family: MoveFamily) -> bool {
        match self {
            Restriction::Free => true,
            Restriction::CaptureOnly => family.is_capture(),
            Restriction::Frozen => false,
        }
    }
}

/// Mandatory-capture precedence for the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapturePriority {
    /// Nobody can capture
    Open,
    /// A Shatra can capture: only Shatras move, and they must capture
    ShatraFirst,
    /// Biy and Baatyr can both capture: either may move, capturing
    BiyAndBaatyr,
    /// Only a Baatyr can capture: everything else is frozen
    BaatyrOnly,
    /// Only the Biy can capture: it must, the others move freely
    BiyOnly,
}

impl CapturePriority {
    pub fn from_flags(shatra: bool, biy: bool, baatyr: bool) -> Self {
        match (shatra, biy, baatyr) {
            (true, _, _) => CapturePriority::ShatraFirst,
            (false, true, true) => CapturePriority::BiyAndBaatyr,
            (false, false, true) => CapturePriority::BaatyrOnly,
            (false, true, false) => CapturePriority::BiyOnly,
            (false, false, false) => CapturePriority::Open,
        }
    }

    pub fn restriction(self, kind: FigureKind) -> Restriction {
        use FigureKind::{Baatyr, Biy, Shatra};
        match (self, kind) {
            (CapturePriority::Open, _) => Restriction::Free,
            (CapturePriority::ShatraFirst, Shatra) => Restriction::CaptureOnly,
            (CapturePriority::ShatraFirst, _) => Restriction::Frozen,
            (CapturePriority::BiyAndBaatyr, Biy | Baatyr) => Restriction::CaptureOnly,
            (CapturePriority::BiyAndBaatyr, Shatra) => Restriction::Frozen,
            (CapturePriority::BaatyrOnly, Baatyr) => Restriction::CaptureOnly,
            (CapturePriority::BaatyrOnly, _) => Restriction::Frozen,
            (CapturePriority::BiyOnly, Biy) => Restriction::CaptureOnly,
            (CapturePriority::BiyOnly, _) => Restriction::Free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_classification() {
        assert_eq!(Zone::classify(Coord::new(3, 3), Color::Black), Zone::Home);
        assert_eq!(Zone::classify(Coord::new(3, 3), Color::White), Zone::EnemyFortress);
        assert_eq!(Zone::classify(Coord::new(2, 12), Color::White), Zone::Home);
        assert_eq!(Zone::classify(Coord::new(5, 6), Color::White), Zone::Field);
    }

    #[test]
    fn test_table_normal_phase() {
        let fam = move_families(Phase::Normal, FigureKind::Shatra, Zone::Home);
        assert_eq!(fam, &[MoveFamily::Evacuation, MoveFamily::Capture]);
        assert!(!fam.contains(&MoveFamily::Step));

        let fam = move_families(Phase::Normal, FigureKind::Shatra, Zone::EnemyFortress);
        assert!(fam.contains(&MoveFamily::FortressExit));

        let fam = move_families(Phase::Normal, FigureKind::Baatyr, Zone::EnemyFortress);
        assert!(!fam.contains(&MoveFamily::FortressExit));
        assert!(fam.contains(&MoveFamily::Step));
    }

    #[test]
    fn test_table_chain_phases() {
        for kind in [FigureKind::Shatra, FigureKind::Biy, FigureKind::Baatyr] {
            for zone in [Zone::Home, Zone::Field, Zone::EnemyFortress] {
                assert_eq!(move_families(Phase::ActiveCaptureChain, kind, zone), CAPTURE_ONLY);
                assert_eq!(move_families(Phase::BiyForcedMove, kind, zone), CAPTURE_ONLY);
                let rights = move_families(Phase::BiyRightsActive, kind, zone);
                assert!(rights.contains(&MoveFamily::Stay));
                assert!(rights.contains(&MoveFamily::Withdraw));
            }
        }
    }

    #[test]
    fn test_priority_precedence() {
        assert_eq!(CapturePriority::from_flags(true, true, true), CapturePriority::ShatraFirst);
        assert_eq!(CapturePriority::from_flags(false, true, true), CapturePriority::BiyAndBaatyr);
        assert_eq!(CapturePriority::from_flags(false, false, true), CapturePriority::BaatyrOnly);
        assert_eq!(CapturePriority::from_flags(false, true, false), CapturePriority::BiyOnly);
        assert_eq!(CapturePriority::from_flags(false, false, false), CapturePriority::Open);
    }

    #[test]
    fn test_priority_restrictions() {
        use FigureKind::*;
        let p = CapturePriority::ShatraFirst;
        assert_eq!(p.restriction(Shatra), Restriction::CaptureOnly);
        assert_eq!(p.restriction(Baatyr), Restriction::Frozen);

        let p = CapturePriority::BiyOnly;
        assert_eq!(p.restriction(Biy), Restriction::CaptureOnly);
        assert_eq!(p.restriction(Shatra), Restriction::Free);

        let p = CapturePriority::BaatyrOnly;
        assert_eq!(p.restriction(Biy), Restriction::Frozen);

        assert!(Restriction::CaptureOnly.admits(MoveFamily::Capture));
        assert!(!Restriction::CaptureOnly.admits(MoveFamily::Step));
        assert!(!Restriction::Frozen.admits(MoveFamily::Capture));
    }
}
