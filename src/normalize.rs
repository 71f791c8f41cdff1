use std::path::{Path, PathBuf};

use anyhow::Context as _;
use regex::Captures;

use crate::cli::{NormalizeArgs, NormalizeMode};
use crate::headings::{LEVEL3_SECTION, LEVEL4_SECTION, LEVEL5_SECTION, chapter_file_name};

/// Replacement counts for one chapter file, reported per heading level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixCounts {
    pub level3: usize,
    pub level4: usize,
    pub level5: usize,
}

impl FixCounts {
    pub fn total(&self) -> usize {
        self.level3 + self.level4 + self.level5
    }
}

pub fn run(args: NormalizeArgs) -> anyhow::Result<()> {
    let dir = PathBuf::from(&args.dir);

    let mut changed_files = 0usize;
    for chapter in 0..=args.max_chapter {
        if normalize_file(&dir, chapter, args.mode)? {
            changed_files += 1;
        }
    }

    tracing::info!(changed_files, "normalization complete");
    Ok(())
}

/// Rewrites one chapter file in place; returns whether it changed. A missing
/// file is reported and skipped.
fn normalize_file(dir: &Path, chapter: u32, mode: NormalizeMode) -> anyhow::Result<bool> {
    let file_name = chapter_file_name(chapter);
    let path = dir.join(&file_name);
    if !path.exists() {
        tracing::warn!(file = %file_name, "chapter file missing; skipped");
        return Ok(false);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("read chapter file: {}", path.display()))?;

    let (normalized, counts) = normalize_content(&content, chapter, mode);

    if normalized == content {
        tracing::info!(file = %file_name, "no changes needed");
        return Ok(false);
    }

    std::fs::write(&path, normalized)
        .with_context(|| format!("write chapter file: {}", path.display()))?;
    match mode {
        NormalizeMode::Sections => {
            tracing::info!(file = %file_name, fixed = counts.level3, "fixed section numbers");
        }
        NormalizeMode::All => {
            tracing::info!(
                file = %file_name,
                fixed = counts.total(),
                level3 = counts.level3,
                level4 = counts.level4,
                level5 = counts.level5,
                "fixed section numbers"
            );
        }
    }
    Ok(true)
}

/// Rewrites every sub-heading's leading numeric component to `chapter`,
/// keeping the remaining components and title text. The rewrite is
/// idempotent: once the leading component matches the chapter number the
/// substitution reproduces the line unchanged.
pub fn normalize_content(content: &str, chapter: u32, mode: NormalizeMode) -> (String, FixCounts) {
    let mut counts = FixCounts::default();

    let mut level3 = 0usize;
    let pass = LEVEL3_SECTION.replace_all(content, |caps: &Captures| {
        level3 += 1;
        format!("### {chapter}.{} ", &caps[2])
    });
    counts.level3 = level3;

    if mode == NormalizeMode::Sections {
        return (pass.into_owned(), counts);
    }

    let mut level4 = 0usize;
    let pass = LEVEL4_SECTION.replace_all(&pass, |caps: &Captures| {
        level4 += 1;
        format!("#### {chapter}.{}.{} ", &caps[2], &caps[3])
    });
    counts.level4 = level4;

    let mut level5 = 0usize;
    let pass = LEVEL5_SECTION.replace_all(&pass, |caps: &Captures| {
        level5 += 1;
        format!("##### {chapter}.{}.{}.{} ", &caps[2], &caps[3], &caps[4])
    });
    counts.level5 = level5;

    (pass.into_owned(), counts)
}
