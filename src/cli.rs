use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Renumber chapter headings in the source manuscript.
    Renumber(RenumberArgs),
    /// Split the corrected manuscript into per-chapter files.
    Split(SplitArgs),
    /// Rewrite sub-heading numbers to match each chapter file.
    Normalize(NormalizeArgs),
    /// Recover chapter titles and print the sidebar configuration.
    Sidebar(SidebarArgs),
    /// Run renumber, split and normalize in sequence.
    Pipeline(PipelineArgs),
}

#[derive(Debug, Args)]
pub struct RenumberArgs {
    /// Path to the source manuscript.
    #[arg(long)]
    pub source: String,

    /// Output path for the corrected manuscript (default: source path with
    /// `_fixed` appended to the stem).
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Path to the corrected manuscript (created by `renumber`).
    #[arg(long)]
    pub source: String,

    /// Output directory for chapter files.
    #[arg(long)]
    pub dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalizeMode {
    /// Rewrite level-3 section headings only.
    Sections,
    /// Rewrite levels 3 through 5 and report per-level counts.
    All,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Chapter directory (created by `split`).
    #[arg(long)]
    pub dir: String,

    /// Which heading levels to rewrite.
    #[arg(long, value_enum, default_value_t = NormalizeMode::All)]
    pub mode: NormalizeMode,

    /// Highest chapter index to visit.
    #[arg(long, default_value_t = 46)]
    pub max_chapter: u32,
}

#[derive(Debug, Args)]
pub struct SidebarArgs {
    /// Chapter directory (created by `split`).
    #[arg(long)]
    pub dir: String,

    /// Highest chapter index to visit.
    #[arg(long, default_value_t = 46)]
    pub max_chapter: u32,
}

#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Path to the source manuscript.
    #[arg(long)]
    pub source: String,

    /// Output directory for chapter files.
    #[arg(long)]
    pub dir: String,

    /// Output path for the corrected manuscript (default: source path with
    /// `_fixed` appended to the stem).
    #[arg(long)]
    pub out: Option<String>,

    /// Highest chapter index to visit during normalization.
    #[arg(long, default_value_t = 46)]
    pub max_chapter: u32,
}
