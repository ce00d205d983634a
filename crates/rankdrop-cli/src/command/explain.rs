use anyhow::Context as _;
use rankdrop_evaluator::evaluate;

use crate::{
    command::{Decision, DecisionArg},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExplainArg {
    #[clap(flatten)]
    decision: DecisionArg,
}

pub(crate) fn run(arg: &ExplainArg) -> anyhow::Result<()> {
    let ExplainArg { decision } = arg;
    let Decision {
        mut board,
        piece,
        height_limit,
        weights,
    } = decision.load()?;

    let evaluation = evaluate(&mut board, &piece, height_limit, &weights)
        .with_context(|| format!("Failed to evaluate placements of {}", piece.kind()))?;
    let best = &evaluation.placements()[evaluation.best_index()];
    log::info!(
        "{} placements, best is #{} (rotation {}, column {}) with score {:.3}",
        evaluation.placements().len(),
        evaluation.best_index(),
        best.placement.rotation,
        best.placement.column,
        best.score,
    );

    util::write_json(&evaluation, decision.output.as_deref())
}
