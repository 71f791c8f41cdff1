use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::RenumberArgs;
use crate::headings::parse_chapter_heading;

/// One chapter heading found in the source manuscript.
///
/// `new_number` is the 0-based position of the heading among all matched
/// headings, in document order. It is gap-free even when `original_number`
/// carries duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRecord {
    /// 1-based line number in the source document.
    pub line_number: usize,
    pub original_number: u32,
    pub title: String,
    pub new_number: u32,
}

pub fn run(args: RenumberArgs) -> anyhow::Result<()> {
    let source_path = PathBuf::from(&args.source);
    let out_path = match &args.out {
        Some(out) => PathBuf::from(out),
        None => fixed_output_path(&source_path),
    };

    // The whole document is read eagerly; an unreadable source is the one
    // fatal error of this stage, and it happens before any write.
    let content = std::fs::read_to_string(&source_path)
        .with_context(|| format!("read manuscript: {}", source_path.display()))?;

    let chapters = extract_chapters(&content);
    tracing::info!(chapters = chapters.len(), "found chapter headings");

    let duplicates = duplicate_groups(&chapters);
    for (original_number, group) in &duplicates {
        tracing::warn!(
            original_number,
            occurrences = group.len(),
            "duplicate chapter number"
        );
        for record in group {
            tracing::warn!(
                new_number = record.new_number,
                title = %record.title,
                "  reassigned"
            );
        }
    }

    let (fixed, replaced) = apply_renumbering(&content, &chapters);
    std::fs::write(&out_path, fixed)
        .with_context(|| format!("write corrected manuscript: {}", out_path.display()))?;

    tracing::info!(
        chapters = chapters.len(),
        replaced,
        source = %source_path.display(),
        out = %out_path.display(),
        "renumbering complete"
    );
    for record in &chapters {
        tracing::info!(number = record.new_number, title = %record.title, "chapter");
    }

    Ok(())
}

/// Sibling path with `_fixed` appended to the file stem.
pub fn fixed_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => source.with_file_name(format!("{stem}_fixed.{ext}")),
        None => source.with_file_name(format!("{stem}_fixed")),
    }
}

/// Scans the document for chapter headings, assigning gap-free new numbers
/// in document order.
pub fn extract_chapters(content: &str) -> Vec<ChapterRecord> {
    let mut chapters = Vec::new();
    for (index, line) in content.split('\n').enumerate() {
        let Some(heading) = parse_chapter_heading(line) else {
            continue;
        };
        let new_number = chapters.len() as u32;
        chapters.push(ChapterRecord {
            line_number: index + 1,
            original_number: heading.number,
            title: heading.title,
            new_number,
        });
    }
    chapters
}

/// Groups records by original number; only groups with more than one member
/// are returned, in ascending original-number order.
pub fn duplicate_groups(chapters: &[ChapterRecord]) -> Vec<(u32, Vec<&ChapterRecord>)> {
    let mut groups: BTreeMap<u32, Vec<&ChapterRecord>> = BTreeMap::new();
    for record in chapters {
        groups.entry(record.original_number).or_default().push(record);
    }
    groups
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .collect()
}

/// Rewrites each recorded heading line to carry its new number; every other
/// line is passed through untouched. Returns the corrected document and the
/// count of lines that actually changed.
pub fn apply_renumbering(content: &str, chapters: &[ChapterRecord]) -> (String, usize) {
    let mut lines: Vec<String> = content.split('\n').map(str::to_owned).collect();
    let mut replaced = 0;
    for record in chapters {
        let new_line = format!("## 第{}章 {}", record.new_number, record.title);
        let slot = &mut lines[record.line_number - 1];
        if *slot != new_line {
            *slot = new_line;
            replaced += 1;
        }
    }
    (lines.join("\n"), replaced)
}
