use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::{NormalizeArgs, NormalizeMode, PipelineArgs, RenumberArgs, SplitArgs};

/// Runs the whole chapter pipeline in sequence. Stages share nothing but the
/// files they leave behind; a failure leaves earlier stages' output in place.
pub fn run(args: PipelineArgs) -> anyhow::Result<()> {
    let source_path = PathBuf::from(&args.source);
    let fixed_path = match &args.out {
        Some(out) => PathBuf::from(out),
        None => crate::renumber::fixed_output_path(&source_path),
    };

    tracing::info!(source = %source_path.display(), "pipeline: renumber");
    crate::renumber::run(RenumberArgs {
        source: args.source.clone(),
        out: Some(fixed_path.to_string_lossy().to_string()),
    })
    .context("renumber")?;

    tracing::info!(dir = %args.dir, "pipeline: split");
    crate::split::run(SplitArgs {
        source: fixed_path.to_string_lossy().to_string(),
        dir: args.dir.clone(),
    })
    .context("split")?;

    tracing::info!(dir = %args.dir, "pipeline: normalize");
    crate::normalize::run(NormalizeArgs {
        dir: args.dir.clone(),
        mode: NormalizeMode::All,
        max_chapter: args.max_chapter,
    })
    .context("normalize")?;

    Ok(())
}
