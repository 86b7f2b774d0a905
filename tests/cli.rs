//! Tests that run the `hncomments` binary against a local feed file.
//!
//! `--input` keeps the runs off the network and an explicit `--config`
//! keeps the user's own config file out of the picture.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const SOURCE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Hacker News</title>
<link>https://news.ycombinator.com/</link>
<description>Links for the intellectually curious, ranked by readers.</description>
<item>
    <title>Linked story</title>
    <link>https://example.com/linked</link>
    <pubDate>Mon, 19 Oct 2026 12:00:00 +0000</pubDate>
    <description><![CDATA[<a href="https://news.ycombinator.com/item?id=7">Comments</a>]]></description>
</item>
<item>
    <title>Unlinked story</title>
    <link>https://example.com/unlinked</link>
    <pubDate>Mon, 19 Oct 2026 13:00:00 +0000</pubDate>
    <description>Comments</description>
</item>
</channel></rss>"#;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes the source feed and a config file into `dir`.
fn setup(dir: &Path, config: &str) -> (PathBuf, PathBuf) {
    let input = dir.join("source.rss");
    let config_path = dir.join("config.toml");
    std::fs::write(&input, SOURCE_RSS).unwrap();
    std::fs::write(&config_path, config).unwrap();
    (input, config_path)
}

fn run_binary(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hncomments"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_unknown_config_key_is_warned() {
    let dir = temp_dir("hncomments_cli_unknown_key");
    let (input, config) = setup(&dir, "timout_secs = 5\n");
    let output = dir.join("comments.rss");

    let result = run_binary(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Unknown key in config file"), "stderr: {}", stderr);
    assert!(stderr.contains("timout_secs"), "stderr: {}", stderr);
    assert!(output.exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_quiet_by_default() {
    let dir = temp_dir("hncomments_cli_quiet");
    let (input, config) = setup(&dir, "");
    let output = dir.join("comments.rss");

    let result = run_binary(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(result.status.success());
    assert!(result.stderr.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_debug_from_config_file_reports_skipped_item() {
    let dir = temp_dir("hncomments_cli_config_debug");
    let (input, config) = setup(&dir, "debug = true\n");
    let output = dir.join("comments.rss");

    let result = run_binary(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Skipping feed item"), "stderr: {}", stderr);
    assert!(stderr.contains("Unlinked story"), "stderr: {}", stderr);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_dash_output_writes_to_stdout() {
    let dir = temp_dir("hncomments_cli_stdout");
    let (input, config) = setup(&dir, "");

    let result = run_binary(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--output",
            "-",
        ],
    );

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("<link>https://news.ycombinator.com/item?id=7</link>"));
    assert!(!stdout.contains("Unlinked story"));

    // Nothing lands on disk under either name
    assert!(!dir.join("-").exists());
    assert!(!dir.join("comments.rss").exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_input_file_fails() {
    let dir = temp_dir("hncomments_cli_missing_input");
    let (_, config) = setup(&dir, "");
    let output = dir.join("comments.rss");

    let result = run_binary(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--input",
            dir.join("absent.rss").to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(!result.status.success());
    assert!(!output.exists());

    std::fs::remove_dir_all(&dir).ok();
}
