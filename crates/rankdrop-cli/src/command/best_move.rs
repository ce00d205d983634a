use anyhow::Context as _;
use rankdrop_evaluator::Brain as _;

use crate::{
    command::{BrainKind, Decision, DecisionArg},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    #[clap(flatten)]
    pub(super) decision: DecisionArg,
    /// Strategy used to choose the move
    #[clap(long, value_enum, default_value_t)]
    pub(super) brain: BrainKind,
}

pub(crate) fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let BestMoveArg { decision, brain } = arg;
    let Decision {
        mut board,
        piece,
        height_limit,
        weights,
    } = decision.load()?;

    let brain = brain.build(weights);
    let mv = brain
        .best_move(&mut board, &piece, height_limit)
        .with_context(|| format!("Failed to choose a move for {}", piece.kind()))?;
    log::info!(
        "{brain:?} drops {} (rotation {}) at column {}, row {}",
        piece.kind(),
        mv.piece().rotation(),
        mv.column(),
        mv.row(),
    );

    util::write_json(&mv, decision.output.as_deref())
}
