use std::path::PathBuf;

use anyhow::Context as _;
use rand::Rng as _;
use rankdrop_engine::{GameField, PieceKind, PieceSeed};
use rankdrop_evaluator::{SessionOutcome, play_session};
use serde::Serialize;

use crate::{
    command::BrainKind,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Board width in columns
    #[clap(long, default_value_t = 10)]
    width: usize,
    /// Number of visible rows; the game ends when the stack rises above them
    #[clap(long, default_value_t = 20)]
    height: usize,
    /// Stack height the brain tries to stay below [default: board height]
    #[clap(long)]
    height_limit: Option<usize>,
    /// Stop after this many pieces
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Piece sequence seed as 32 hex digits [default: random]
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Weights file (JSON) for the ranking brain
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Strategy used to choose moves
    #[clap(long, value_enum, default_value_t)]
    brain: BrainKind,
    /// Include the final board in the report
    #[clap(long)]
    show_board: bool,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Number of upcoming pieces listed in the report.
const PREVIEW_LEN: usize = 5;

#[derive(Debug, Serialize)]
struct AutoPlayReport {
    seed: PieceSeed,
    width: usize,
    height: usize,
    height_limit: usize,
    #[serde(flatten)]
    outcome: SessionOutcome,
    next_pieces: Vec<PieceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<Vec<String>>,
}

impl AutoPlayReport {
    fn new(
        seed: PieceSeed,
        height_limit: usize,
        outcome: SessionOutcome,
        field: &GameField,
        show_board: bool,
    ) -> Self {
        let board = field.board();
        Self {
            seed,
            width: board.width(),
            height: board.height(),
            height_limit,
            outcome,
            next_pieces: field.next_pieces().take(PREVIEW_LEN).collect(),
            board: show_board.then(|| board.to_string().lines().map(str::to_owned).collect()),
        }
    }
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        width,
        height,
        height_limit,
        max_pieces,
        seed,
        weights,
        brain,
        show_board,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let height_limit = height_limit.unwrap_or(*height);
    let weights = util::read_weights_file(weights.as_deref())?;
    let brain = brain.build(weights);
    let mut field = GameField::with_seed(*width, *height, seed)
        .with_context(|| format!("Invalid board size {width}x{height}"))?;

    log::info!("playing {width}x{height} with {brain:?}, seed {seed}");
    let outcome = play_session(brain.as_ref(), &mut field, height_limit, *max_pieces);
    log::info!(
        "{} after {} pieces: {} rows cleared, score {}",
        outcome.end,
        outcome.stats.completed_pieces(),
        outcome.stats.total_cleared_rows(),
        outcome.stats.score(),
    );

    let report = AutoPlayReport::new(seed, height_limit, outcome, &field, *show_board);
    util::write_json(&report, output.as_deref())
}
