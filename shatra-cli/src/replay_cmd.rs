//! Replay commands - rebuild a position from a move list and inspect it
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_show(), run_moves(), run_play() - orchestration
//! - Level 2: replay(), report functions
//! - Level 3: apply_spec(), Summary::of()
//! - Level 4: formatting utilities

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use shatra_core::{Board, CellId, Color, Move, MoveOutcome, Phase, ReserveState};

use crate::notation::{parse_moves, MoveSpec};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Moves to replay from the opening position, e.g. "42-35 21-28"
    #[arg(long, default_value = "")]
    pub moves: String,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub replay: ReplayArgs,

    /// Side drawn at the bottom
    #[arg(long, value_enum, default_value = "white")]
    pub perspective: Side,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Cell whose legal moves are listed
    #[arg(long)]
    pub cell: CellId,

    #[command(flatten)]
    pub replay: ReplayArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub replay: ReplayArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// One replayed move
#[derive(Clone, Debug, Serialize)]
struct Step {
    number: usize,
    notation: String,
    player: Color,
    outcome: MoveOutcome,
}

/// Turn state after the replay
#[derive(Clone, Debug, Serialize)]
struct Summary {
    current_player: Color,
    phase: Phase,
    active_capture_cell: Option<CellId>,
    forced_capture: Vec<CellId>,
    white_reserve: ReserveState,
    black_reserve: ReserveState,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Print the board and turn state
pub fn run_show(args: ShowArgs) -> Result<()> {
    let (board, _) = replay(&args.replay)?;
    print!("{}", board.view(args.perspective.into()));
    println!();
    print_summary_text(&Summary::of(&board));
    Ok(())
}

/// List the legal moves of one cell
pub fn run_moves(args: MovesArgs) -> Result<()> {
    let (board, _) = replay(&args.replay)?;
    if board.cell(args.cell).is_none() {
        bail!("No cell with id {}", args.cell);
    }

    let moves = board.legal_moves(args.cell);
    tracing::info!(cell = args.cell, count = moves.len(), "legal moves listed");

    if args.json {
        print_json(&moves)
    } else {
        if moves.is_empty() {
            println!("No legal moves from cell {}", args.cell);
        }
        for mv in &moves {
            println!("{}", describe_move(mv));
        }
        Ok(())
    }
}

/// Replay moves, reporting each outcome and the final turn state
pub fn run_play(args: PlayArgs) -> Result<()> {
    let (board, steps) = replay(&args.replay)?;
    let summary = Summary::of(&board);

    if args.json {
        #[derive(Serialize)]
        struct PlayReport {
            steps: Vec<Step>,
            summary: Summary,
        }
        print_json(&PlayReport { steps, summary })
    } else {
        for step in &steps {
            println!(
                "{:>3}. {:?} {}: {}",
                step.number,
                step.player,
                step.notation,
                describe_outcome(&step.outcome)
            );
        }
        println!();
        print_summary_text(&summary);
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply the move list to the opening position
fn replay(args: &ReplayArgs) -> Result<(Board, Vec<Step>)> {
    let specs = parse_moves(&args.moves).context("Failed to parse --moves")?;
    let mut board = Board::standard();
    let mut steps = Vec::with_capacity(specs.len());

    for (i, spec) in specs.into_iter().enumerate() {
        let player = board.current_player();
        let outcome = apply_spec(&mut board, spec)
            .with_context(|| format!("Move #{} ({}) rejected", i + 1, spec))?;
        tracing::debug!(number = i + 1, %spec, ?outcome, "move replayed");
        steps.push(Step {
            number: i + 1,
            notation: spec.to_string(),
            player,
            outcome,
        });
    }

    tracing::info!(moves = steps.len(), "replay finished");
    Ok((board, steps))
}

fn print_summary_text(summary: &Summary) {
    println!("To move:        {:?}", summary.current_player);
    println!("Phase:          {:?}", summary.phase);
    if let Some(cell) = summary.active_capture_cell {
        println!("Active capture: {}", cell);
    }
    if !summary.forced_capture.is_empty() {
        println!("Must capture:   {}", join_cells(&summary.forced_capture));
    }
    for (color, reserve) in [
        (Color::White, &summary.white_reserve),
        (Color::Black, &summary.black_reserve),
    ] {
        println!(
            "{:?} reserve:  {} left, next {}{}",
            color,
            reserve.count,
            reserve.next_position.map_or("-".to_string(), |c| c.to_string()),
            if reserve.order_violated { ", order violated" } else { "" }
        );
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn apply_spec(board: &mut Board, spec: MoveSpec) -> Result<MoveOutcome> {
    let outcome = if spec.prefer_ordinary {
        board.try_normal_move(spec.from, spec.to)?
    } else {
        board.try_move(spec.from, spec.to)?
    };
    Ok(outcome)
}

impl Summary {
    fn of(board: &Board) -> Self {
        Summary {
            current_player: board.current_player(),
            phase: board.phase(),
            active_capture_cell: board.active_capture_cell(),
            forced_capture: board.figures_with_forced_capture(),
            white_reserve: board.reserve(Color::White).clone(),
            black_reserve: board.reserve(Color::Black).clone(),
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn join_cells(cells: &[CellId]) -> String {
    cells.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}

fn describe_move(mv: &Move) -> String {
    match *mv {
        Move::Step { from, to } => format!("{} -> {}", from, to),
        Move::Evacuate { from, to } => format!("{} -> {} (evacuation)", from, to),
        Move::Exit { from, to } => format!("{} -> {} (fortress exit)", from, to),
        Move::Capture { from, over, to } => format!("{} x {} -> {}", from, over, to),
        Move::Stay { at } => format!("{} stays (ends chain)", at),
        Move::Withdraw { from, to } => format!("{} -> {} (withdraw, ends chain)", from, to),
    }
}

fn describe_outcome(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::ChainContinues { at, biy_rights: true } => {
            format!("chain continues at {} with leader rights", at)
        }
        MoveOutcome::ChainContinues { at, biy_rights: false } => format!("chain continues at {}", at),
        MoveOutcome::TurnEnded { captured, promoted } => {
            let mut text = String::from("turn ended");
            if !captured.is_empty() {
                text.push_str(&format!(", captured {}", join_cells(captured)));
            }
            if *promoted {
                text.push_str(", promoted");
            }
            text
        }
    }
}
