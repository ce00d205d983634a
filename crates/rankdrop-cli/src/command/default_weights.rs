use std::path::PathBuf;

use rankdrop_evaluator::Weights;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DefaultWeightsArg {
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DefaultWeightsArg) -> anyhow::Result<()> {
    util::write_json(&Weights::DEFAULT, arg.output.as_deref())
}
