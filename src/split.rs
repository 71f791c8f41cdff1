use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::SplitArgs;
use crate::headings::{chapter_file_name, parse_appendix_heading, parse_chapter_heading};

/// Appendix heading text to output slug. Headings not in this table fall
/// back to `appendix.md`, so two unrecognized appendices overwrite each
/// other; the fallback is logged for that reason.
const APPENDIX_SLUGS: &[(&str, &str)] = &[
    ("附录：实战项目", "appendix-projects"),
    ("附录：学习资源推荐", "appendix-resources"),
    ("附录B：VSCode配置推荐", "appendix-vscode"),
    ("附录C：代码模板与脚手架", "appendix-templates"),
    ("附录D：快速开始检查清单", "appendix-checklist"),
];

const APPENDIX_FALLBACK: &str = "appendix.md";

/// One section of the manuscript, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFile {
    pub filename: String,
    /// Rendered into the synthesized `# ` title line.
    pub title: String,
    /// Verbatim body, starting with the original `##` heading line.
    pub body: String,
}

pub fn run(args: SplitArgs) -> anyhow::Result<()> {
    let source_path = PathBuf::from(&args.source);
    let out_dir = PathBuf::from(&args.dir);

    let content = std::fs::read_to_string(&source_path)
        .with_context(|| format!("read corrected manuscript: {}", source_path.display()))?;

    clear_chapter_files(&args.dir)?;
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create chapter dir: {}", out_dir.display()))?;

    let sections = split_document(&content);
    for (index, section) in sections.iter().enumerate() {
        let path = out_dir.join(&section.filename);
        let full = format!("# {}\n\n{}", section.title, section.body);
        std::fs::write(&path, full)
            .with_context(|| format!("write chapter file: {}", path.display()))?;
        tracing::info!(
            n = index + 1,
            total = sections.len(),
            file = %section.filename,
            "wrote section"
        );
    }

    tracing::info!(
        files = sections.len(),
        dir = %out_dir.display(),
        "split complete"
    );

    Ok(())
}

/// Deletes every `chapter-*.md` in the destination so repeated runs converge
/// to the same file set. A missing destination is fine; it gets created
/// before writing.
fn clear_chapter_files(dir: &str) -> anyhow::Result<()> {
    let dir = PathBuf::from(dir);
    if !dir.exists() {
        return Ok(());
    }
    for entry in std::fs::read_dir(&dir)
        .with_context(|| format!("read chapter dir: {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with("chapter-") && name.ends_with(".md") {
            std::fs::remove_file(entry.path())
                .with_context(|| format!("remove stale chapter file: {name}"))?;
            tracing::info!(file = name, "removed stale chapter file");
        }
    }
    Ok(())
}

/// Partitions the document into per-chapter/appendix sections. Lines before
/// the first recognized heading have no open section and are dropped.
pub fn split_document(content: &str) -> Vec<SectionFile> {
    let mut sections = Vec::new();
    let mut current: Option<(String, String, Vec<&str>)> = None;
    let mut dropped_preamble = 0usize;

    for line in content.split('\n') {
        if let Some(heading) = parse_chapter_heading(line) {
            flush(&mut sections, current.take());
            current = Some((
                chapter_file_name(heading.number),
                format!("第{}章：{}", heading.number, heading.title),
                vec![line],
            ));
        } else if let Some(appendix) = parse_appendix_heading(line) {
            flush(&mut sections, current.take());
            let filename = appendix_file_name(&appendix.key);
            if filename == APPENDIX_FALLBACK {
                tracing::warn!(
                    heading = %appendix.key,
                    "unrecognized appendix heading; using fallback filename"
                );
            }
            current = Some((filename, appendix.title, vec![line]));
        } else if let Some((_, _, body)) = &mut current {
            body.push(line);
        } else {
            dropped_preamble += 1;
        }
    }
    flush(&mut sections, current.take());

    if dropped_preamble > 0 {
        tracing::debug!(lines = dropped_preamble, "dropped preamble before first heading");
    }

    sections
}

fn flush(sections: &mut Vec<SectionFile>, current: Option<(String, String, Vec<&str>)>) {
    if let Some((filename, title, body)) = current {
        sections.push(SectionFile {
            filename,
            title,
            body: body.join("\n"),
        });
    }
}

fn appendix_file_name(key: &str) -> String {
    APPENDIX_SLUGS
        .iter()
        .find(|(heading, _)| *heading == key)
        .map(|(_, slug)| format!("{slug}.md"))
        .unwrap_or_else(|| APPENDIX_FALLBACK.to_owned())
}
