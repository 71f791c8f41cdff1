use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use crate::cli::SidebarArgs;
use crate::headings::{CHAPTER_FILE_TITLE, chapter_file_name};

/// Fixed grouping of chapter indices into sidebar sections.
const GROUPS: &[(&str, u32, u32)] = &[
    ("准备篇", 0, 0),
    ("基础入门", 1, 8),
    ("组件开发", 9, 15),
    ("企业级开发", 16, 24),
    ("进阶部分", 25, 39),
    ("高级拓展", 40, 46),
];

/// Title recovered from a chapter file's synthesized `# ` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterTitle {
    pub number: u32,
    pub title: String,
}

#[derive(Debug, Serialize)]
struct SidebarGroup {
    text: String,
    collapsible: bool,
    collapsed: bool,
    items: Vec<SidebarItem>,
}

#[derive(Debug, Serialize)]
struct SidebarItem {
    text: String,
    link: String,
}

pub fn run(args: SidebarArgs) -> anyhow::Result<()> {
    let dir = PathBuf::from(&args.dir);
    let titles = extract_titles(&dir, args.max_chapter)?;

    println!("提取到的章节标题：\n");
    for chapter in &titles {
        println!("第{}章: {}", chapter.number, chapter.title);
    }

    let groups = build_groups(&titles);
    let json = serde_json::to_string_pretty(&groups).context("serialize sidebar groups")?;
    println!("\n=== 侧边栏配置 ===\n");
    println!("{json}");

    Ok(())
}

/// Scans `chapter-NN.md` for indices `0..=max_chapter` and recovers each
/// file's title line. Absent files and files with no matching title line are
/// skipped.
pub fn extract_titles(dir: &Path, max_chapter: u32) -> anyhow::Result<Vec<ChapterTitle>> {
    let mut titles = Vec::new();
    for number in 0..=max_chapter {
        let path = dir.join(chapter_file_name(number));
        if !path.exists() {
            continue;
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read chapter file: {}", path.display()))?;

        let Some(title) = first_title_line(&content) else {
            tracing::warn!(file = %path.display(), "no title line found; skipped");
            continue;
        };
        titles.push(ChapterTitle { number, title });
    }
    Ok(titles)
}

/// First line matching `# 第N章：标题`, title part only.
fn first_title_line(content: &str) -> Option<String> {
    content
        .split('\n')
        .find_map(|line| CHAPTER_FILE_TITLE.captures(line))
        .map(|caps| caps[2].trim().to_owned())
}

fn build_groups(titles: &[ChapterTitle]) -> Vec<SidebarGroup> {
    GROUPS
        .iter()
        .map(|&(name, start, end)| SidebarGroup {
            text: name.to_owned(),
            collapsible: true,
            collapsed: false,
            items: titles
                .iter()
                .filter(|ch| ch.number >= start && ch.number <= end)
                .map(|ch| SidebarItem {
                    text: format!("第{}章：{}", ch.number, ch.title),
                    link: format!("/guide/chapter-{:02}", ch.number),
                })
                .collect(),
        })
        .collect()
}
