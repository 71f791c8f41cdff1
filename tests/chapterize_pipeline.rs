use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use predicates::prelude::*;

const MANUSCRIPT: &str = "\
这是前言，不属于任何章节。

## 第2章 标题A

章节A正文。

### 1.1 小节甲

#### 1.1.1 子节

##### 1.1.1.1 孙节

## 第2章 标题B

章节B正文。

### 9.1 小节乙

## 第5章 标题C

章节C正文。

## 附录：实战项目

附录正文。
";

fn read_chapter_files(dir: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(".md") {
            files.insert(name, fs::read_to_string(entry.path())?);
        }
    }
    Ok(files)
}

#[test]
fn pipeline_renumbers_splits_and_normalizes() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let source_path = temp.path().join("manuscript.md");
    let fixed_path = temp.path().join("manuscript_fixed.md");
    let guide_dir = temp.path().join("guide");
    fs::write(&source_path, MANUSCRIPT)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chapterize");
    cmd.args([
        "pipeline",
        "--source",
        source_path.to_str().unwrap(),
        "--dir",
        guide_dir.to_str().unwrap(),
        "--max-chapter",
        "5",
    ])
    .assert()
    .success();

    // The corrected manuscript is a sibling with a gap-free numbering; the
    // source itself is untouched.
    assert_eq!(fs::read_to_string(&source_path)?, MANUSCRIPT);
    let fixed = fs::read_to_string(&fixed_path)?;
    assert!(fixed.contains("## 第0章 标题A"));
    assert!(fixed.contains("## 第1章 标题B"));
    assert!(fixed.contains("## 第2章 标题C"));
    assert!(!fixed.contains("## 第5章"));
    assert!(fixed.contains("这是前言"));

    let files = read_chapter_files(&guide_dir)?;
    assert_eq!(
        files.keys().collect::<Vec<_>>(),
        vec![
            "appendix-projects.md",
            "chapter-00.md",
            "chapter-01.md",
            "chapter-02.md",
        ]
    );

    let ch00 = &files["chapter-00.md"];
    assert!(ch00.starts_with("# 第0章：标题A\n\n## 第0章 标题A"));
    assert!(ch00.contains("### 0.1 小节甲"));
    assert!(ch00.contains("#### 0.1.1 子节"));
    assert!(ch00.contains("##### 0.1.1.1 孙节"));
    assert!(!ch00.contains("### 1.1"));

    let ch01 = &files["chapter-01.md"];
    assert!(ch01.starts_with("# 第1章：标题B"));
    assert!(ch01.contains("### 1.1 小节乙"));
    assert!(!ch01.contains("### 9.1"));

    let ch02 = &files["chapter-02.md"];
    assert!(ch02.starts_with("# 第2章：标题C"));

    let appendix = &files["appendix-projects.md"];
    assert!(appendix.starts_with("# 实战项目\n\n## 附录：实战项目"));
    assert!(appendix.contains("附录正文"));

    // No chapter body should carry the preamble.
    for content in files.values() {
        assert!(!content.contains("这是前言"));
    }

    Ok(())
}

#[test]
fn split_is_idempotent_and_clears_stale_files() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let source_path = temp.path().join("manuscript.md");
    let guide_dir = temp.path().join("guide");
    fs::write(&source_path, "## 第0章 起步\n正文\n")?;

    let split = |dir: &Path| {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chapterize");
        cmd.args([
            "split",
            "--source",
            source_path.to_str().unwrap(),
            "--dir",
            dir.to_str().unwrap(),
        ])
        .assert()
        .success();
    };

    split(&guide_dir);
    let first = read_chapter_files(&guide_dir)?;

    // A leftover chapter file from an earlier run must not survive.
    fs::write(guide_dir.join("chapter-99.md"), "stale")?;
    split(&guide_dir);
    let second = read_chapter_files(&guide_dir)?;

    assert_eq!(first, second);
    assert!(!guide_dir.join("chapter-99.md").exists());

    Ok(())
}

#[test]
fn normalize_is_idempotent_and_skips_missing_files() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let guide_dir = temp.path().join("guide");
    fs::create_dir_all(&guide_dir)?;
    fs::write(
        guide_dir.join("chapter-07.md"),
        "# 第7章：标题\n\n### 1.2 节标题\n#### 3.2.1 子节\n",
    )?;

    let normalize = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chapterize");
        cmd.args([
            "normalize",
            "--dir",
            guide_dir.to_str().unwrap(),
            "--max-chapter",
            "7",
        ])
        .assert()
        .success();
    };

    normalize();
    let once = fs::read_to_string(guide_dir.join("chapter-07.md"))?;
    assert!(once.contains("### 7.2 节标题"));
    assert!(once.contains("#### 7.2.1 子节"));

    normalize();
    let twice = fs::read_to_string(guide_dir.join("chapter-07.md"))?;
    assert_eq!(once, twice);

    Ok(())
}

#[test]
fn sections_mode_leaves_level4_headings_alone() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let guide_dir = temp.path().join("guide");
    fs::create_dir_all(&guide_dir)?;
    fs::write(
        guide_dir.join("chapter-03.md"),
        "# 第3章：标题\n\n### 1.2 节标题\n#### 1.2.1 子节\n",
    )?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chapterize");
    cmd.args([
        "normalize",
        "--dir",
        guide_dir.to_str().unwrap(),
        "--mode",
        "sections",
        "--max-chapter",
        "3",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(guide_dir.join("chapter-03.md"))?;
    assert!(content.contains("### 3.2 节标题"));
    assert!(content.contains("#### 1.2.1 子节"));

    Ok(())
}

#[test]
fn sidebar_prints_titles_and_grouped_config() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let guide_dir = temp.path().join("guide");
    fs::create_dir_all(&guide_dir)?;
    fs::write(guide_dir.join("chapter-00.md"), "# 第0章：学习路线图\n\n正文\n")?;
    fs::write(guide_dir.join("chapter-01.md"), "# 第1章：起步\n\n正文\n")?;
    // chapter-02.md is absent on purpose; chapter-03.md has no title line.
    fs::write(guide_dir.join("chapter-03.md"), "没有标题行\n")?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chapterize");
    cmd.args([
        "sidebar",
        "--dir",
        guide_dir.to_str().unwrap(),
        "--max-chapter",
        "3",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("第0章: 学习路线图"))
    .stdout(predicate::str::contains("第1章: 起步"))
    .stdout(predicate::str::contains("\"text\": \"准备篇\""))
    .stdout(predicate::str::contains("\"text\": \"第1章：起步\""))
    .stdout(predicate::str::contains("\"link\": \"/guide/chapter-01\""))
    .stdout(predicate::str::contains("第3章").not());

    Ok(())
}

#[test]
fn renumber_fails_on_missing_source() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let missing = temp.path().join("no-such-manuscript.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chapterize");
    cmd.args(["renumber", "--source", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read manuscript"));

    Ok(())
}
