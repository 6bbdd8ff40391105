//! Integration tests for the Shatra rule engine
//!
//! Drives the public API through seeded random playouts and checks the
//! properties every position must keep.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shatra_core::{Board, CellId, Color, Move, MoveOutcome, Phase};

const PLAYOUTS: u64 = 20;
const MAX_PLIES: usize = 300;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Every legal move of the side to move
fn all_moves(board: &Board) -> Vec<Move> {
    board
        .pieces(board.current_player())
        .into_iter()
        .flat_map(|cell| board.legal_moves(cell))
        .collect()
}

fn piece_count(board: &Board) -> usize {
    board.pieces(Color::White).len() + board.pieces(Color::Black).len()
}

/// Play random legal moves, calling `check` before each one
fn random_playout(seed: u64, mut check: impl FnMut(&Board, &Move)) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::standard();

    for _ in 0..MAX_PLIES {
        let moves = all_moves(&board);
        let Some(mv) = moves.choose(&mut rng).copied() else {
            break;
        };
        check(&board, &mv);
        assert!(board.make_move(mv.from(), mv.to()), "legal move {:?} refused", mv);
    }
    board
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

#[test]
fn test_queries_are_idempotent() {
    for seed in 0..PLAYOUTS {
        random_playout(seed, |board, _| {
            for cell in board.pieces(board.current_player()) {
                assert_eq!(board.available_moves(cell), board.available_moves(cell));
            }
        });
    }
}

#[test]
fn test_available_moves_sorted_and_unique() {
    for seed in 0..PLAYOUTS {
        random_playout(seed, |board, mv| {
            let targets = board.available_moves(mv.from());
            assert!(targets.windows(2).all(|w| w[0] < w[1]));
            assert!(targets.contains(&mv.to()));
            assert!(board.is_valid_move(mv.from(), mv.to()));
        });
    }
}

#[test]
fn test_clone_isolation() {
    for seed in 0..PLAYOUTS {
        random_playout(seed, |board, mv| {
            let cells = board.cells().to_vec();
            let player = board.current_player();
            let phase = board.phase();

            let mut copy = board.clone();
            assert!(copy.make_move(mv.from(), mv.to()));

            assert_eq!(board.cells(), &cells[..]);
            assert_eq!(board.current_player(), player);
            assert_eq!(board.phase(), phase);
        });
    }
}

#[test]
fn test_reserve_never_grows() {
    for seed in 0..PLAYOUTS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::standard();

        for _ in 0..MAX_PLIES {
            let Some(mv) = all_moves(&board).choose(&mut rng).copied() else {
                break;
            };
            let before = [
                board.reserve(Color::White).clone(),
                board.reserve(Color::Black).clone(),
            ];
            assert!(board.make_move(mv.from(), mv.to()));

            for (i, color) in [Color::White, Color::Black].into_iter().enumerate() {
                let after = board.reserve(color);
                assert!(after.count <= before[i].count);
                // The violation flag only drops once the garrison is empty
                if before[i].order_violated && after.count > 0 {
                    assert!(after.order_violated);
                }
                if let Some(next) = after.next_position {
                    let figure = board.figure_at(next).expect("next garrison piece is on the board");
                    assert_eq!(figure.color, color);
                }
            }
        }
    }
}

#[test]
fn test_turn_alternation() {
    for seed in 0..PLAYOUTS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::standard();

        for _ in 0..MAX_PLIES {
            let Some(mv) = all_moves(&board).choose(&mut rng).copied() else {
                break;
            };
            let player = board.current_player();
            let pieces_before = piece_count(&board);

            match board.try_move(mv.from(), mv.to()).expect("legal move applies") {
                MoveOutcome::ChainContinues { at, .. } => {
                    assert_eq!(board.current_player(), player);
                    assert!(matches!(
                        board.phase(),
                        Phase::ActiveCaptureChain | Phase::BiyRightsActive
                    ));
                    assert_eq!(board.active_capture_cell(), Some(at));
                    assert_eq!(piece_count(&board), pieces_before);
                }
                MoveOutcome::TurnEnded { captured, .. } => {
                    assert_eq!(board.current_player(), player.opponent());
                    assert!(matches!(board.phase(), Phase::Normal | Phase::BiyForcedMove));
                    assert_eq!(piece_count(&board), pieces_before - captured.len());
                    for cell in captured {
                        assert!(board.figure_at(cell).is_none());
                    }
                }
            }
        }
    }
}

#[test]
fn test_mandatory_capture() {
    for seed in 0..PLAYOUTS {
        random_playout(seed, |board, _| {
            let forced = board.figures_with_forced_capture();
            assert_eq!(board.has_forced_capture(), !forced.is_empty());

            for cell in &forced {
                let moves = board.legal_moves(*cell);
                assert!(!moves.is_empty());
                if board.phase() != Phase::BiyRightsActive {
                    assert!(moves.iter().all(Move::is_capture), "cell {} may avoid capturing", cell);
                }
            }
        });
    }
}

#[test]
fn test_chain_moves_only_the_anchor() {
    for seed in 0..PLAYOUTS {
        random_playout(seed, |board, mv| {
            let Some(session) = board.capture_session() else {
                return;
            };
            let anchor = session.anchor();
            assert_eq!(mv.from(), anchor);

            let others: Vec<CellId> = board
                .pieces(board.current_player())
                .into_iter()
                .filter(|&cell| cell != anchor)
                .collect();
            for cell in others {
                assert!(board.available_moves(cell).is_empty());
            }
            for captured in session.captured() {
                assert!(board.figure_at(*captured).is_some());
            }
        });
    }
}

#[test]
fn test_pieces_never_enter_own_fortress() {
    use shatra_core::FigureKind;

    for seed in 0..PLAYOUTS {
        random_playout(seed, |board, mv| {
            let Some(figure) = board.figure_at(mv.from()) else {
                panic!("move from an empty cell");
            };
            if figure.kind == FigureKind::Biy || mv.from() == mv.to() {
                return;
            }
            let target = board.cell(mv.to()).expect("target cell exists");
            assert!(!target.coord.is_own_fortress(figure.color), "{:?}", mv);
        });
    }
}

// ============================================================================
// SCRIPTED GAMES
// ============================================================================

#[test]
fn test_scripted_opening() {
    let mut board = Board::standard();
    let script: [(CellId, CellId); 4] = [(42, 35), (21, 28), (35, 21), (15, 27)];

    for (from, to) in script {
        assert!(board.make_move(from, to), "{}-{} refused", from, to);
    }

    // White jumps 28, Black recaptures diagonally from 15
    assert!(board.figure_at(28).is_none());
    assert!(board.figure_at(21).is_none());
    assert_eq!(board.pieces(Color::White).len(), 23);
    assert_eq!(board.pieces(Color::Black).len(), 23);
    assert_eq!(board.current_player(), Color::White);
}

#[test]
fn test_render_after_moves() {
    let mut board = Board::standard();
    assert!(board.make_move(53, 32));
    let text = board.view(Color::White).to_string();
    assert!(text.contains(" 7 [S][.][.][.][.][.][.]"));
    assert!(text.contains("10 [ ][ ][ ][.][ ][ ][ ]"));
}
