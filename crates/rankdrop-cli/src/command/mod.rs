use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use flexi_logger::Logger;
use rankdrop_engine::{Board, Piece, PieceKind};
use rankdrop_evaluator::{Brain, CenterBrain, RankingBrain, Weights};

use crate::util;

use self::{
    auto_play::AutoPlayArg, best_move::BestMoveArg, default_weights::DefaultWeightsArg,
    explain::ExplainArg,
};

mod auto_play;
mod best_move;
mod default_weights;
mod explain;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Choose a move for one piece on a board read from a file
    BestMove(#[clap(flatten)] BestMoveArg),
    /// Show the metrics, ranks and score of every placement
    Explain(#[clap(flatten)] ExplainArg),
    /// Let a brain play a headless game
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the default weights
    DefaultWeights(#[clap(flatten)] DefaultWeightsArg),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum BrainKind {
    /// Weighted ranks of holes, caves, height and cleared rows
    #[default]
    Ranking,
    /// Unrotated piece in the middle column
    Center,
}

impl BrainKind {
    pub(crate) fn build(self, weights: Weights) -> Box<dyn Brain<Board>> {
        match self {
            BrainKind::Ranking => Box::new(RankingBrain::new(weights)),
            BrainKind::Center => Box::new(CenterBrain),
        }
    }
}

/// Board and piece of a single decision.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DecisionArg {
    /// Board file: one line per row, top row first, `#` filled and `.` empty
    #[clap(long)]
    board: PathBuf,
    /// Number of visible rows; must cover every row in the board file
    #[clap(long, default_value_t = 20)]
    board_height: usize,
    /// Piece kind (I, O, S, Z, J, L or T)
    #[clap(long)]
    piece: PieceKind,
    /// Counter-clockwise turns applied to the spawn orientation
    #[clap(long, default_value_t = 0)]
    rotation: usize,
    /// Stack height to stay below [default: board height]
    #[clap(long)]
    height_limit: Option<usize>,
    /// Weights file (JSON); missing fields keep their defaults
    #[clap(long)]
    weights: Option<PathBuf>,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

impl DecisionArg {
    pub(crate) fn load(&self) -> anyhow::Result<Decision> {
        let board = util::read_board_file(&self.board, self.board_height)?;
        let weights = util::read_weights_file(self.weights.as_deref())?;
        let height_limit = self.height_limit.unwrap_or(self.board_height);
        Ok(Decision {
            board,
            piece: Piece::with_rotation(self.piece, self.rotation),
            height_limit,
            weights,
        })
    }
}

pub(crate) struct Decision {
    pub board: Board,
    pub piece: Piece,
    pub height_limit: usize,
    pub weights: Weights,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    match args.mode {
        Mode::BestMove(arg) => best_move::run(&arg)?,
        Mode::Explain(arg) => explain::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::DefaultWeights(arg) => default_weights::run(&arg)?,
    }
    Ok(())
}
