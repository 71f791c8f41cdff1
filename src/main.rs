use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    chapterize::logging::init().context("init logging")?;

    let cli = chapterize::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        chapterize::cli::Command::Renumber(args) => {
            chapterize::renumber::run(args).context("renumber")?;
        }
        chapterize::cli::Command::Split(args) => {
            chapterize::split::run(args).context("split")?;
        }
        chapterize::cli::Command::Normalize(args) => {
            chapterize::normalize::run(args).context("normalize")?;
        }
        chapterize::cli::Command::Sidebar(args) => {
            chapterize::sidebar::run(args).context("sidebar")?;
        }
        chapterize::cli::Command::Pipeline(args) => {
            chapterize::pipeline::run(args).context("pipeline")?;
        }
    }

    Ok(())
}
