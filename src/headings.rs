//! Heading grammar shared by every pipeline stage.
//!
//! All patterns are line-anchored and fixed: a heading either matches one of
//! these exactly or is treated as ordinary text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `## 第N章 标题` — a chapter heading inside the source manuscript.
pub static CHAPTER_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+第(\d+)章\s+(.+)$").unwrap());

/// `## 附录：标题` (an optional ASCII letter may follow `附录`, as in
/// `## 附录B：标题`) — an appendix heading inside the source manuscript.
pub static APPENDIX_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+附录([A-Za-z]?)[：:]\s*(.+)$").unwrap());

/// `# 第N章：标题` — the synthesized title line at the top of a split-out
/// chapter file.
pub static CHAPTER_FILE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s+第(\d+)章[：:]\s*(.+)$").unwrap());

/// `### n.m …` — a level-3 section heading inside a chapter file.
pub static LEVEL3_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^###[ \t]+(\d+)\.(\d+)[ \t]*").unwrap());

/// `#### n.m.k …` — a level-4 section heading inside a chapter file.
pub static LEVEL4_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^####[ \t]+(\d+)\.(\d+)\.(\d+)[ \t]*").unwrap());

/// `##### n.m.k.j …` — a level-5 section heading inside a chapter file.
pub static LEVEL5_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#####[ \t]+(\d+)\.(\d+)\.(\d+)\.(\d+)[ \t]*").unwrap());

/// A chapter heading parsed out of the source manuscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeading {
    pub number: u32,
    pub title: String,
}

/// Parses `## 第N章 标题`; returns `None` for anything else.
pub fn parse_chapter_heading(line: &str) -> Option<ChapterHeading> {
    let caps = CHAPTER_HEADING.captures(line)?;
    let number = caps[1].parse().ok()?;
    Some(ChapterHeading {
        number,
        title: caps[2].trim().to_owned(),
    })
}

/// An appendix heading parsed out of the source manuscript.
///
/// `key` is the heading text normalized to a full-width colon
/// (`附录：实战项目`, `附录B：VSCode配置推荐`), which is what the slug table
/// is keyed on. `title` is the text after the colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendixHeading {
    pub key: String,
    pub title: String,
}

/// Parses `## 附录：标题` / `## 附录X：标题`; returns `None` for anything else.
pub fn parse_appendix_heading(line: &str) -> Option<AppendixHeading> {
    let caps = APPENDIX_HEADING.captures(line)?;
    let letter = &caps[1];
    let title = caps[2].trim().to_owned();
    Some(AppendixHeading {
        key: format!("附录{letter}：{title}"),
        title,
    })
}

/// Renders the chapter-file name for a chapter index: `chapter-07.md`.
pub fn chapter_file_name(number: u32) -> String {
    format!("chapter-{number:02}.md")
}
