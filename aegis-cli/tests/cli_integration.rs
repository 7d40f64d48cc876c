//! CLI integration tests for aegis-cli.
//!
//! These tests run the actual binary against files in a temporary directory
//! and check outputs and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{DynamicImage, GrayImage, ImageFormat};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get a Command for the aegis binary.
fn aegis() -> Command {
    Command::cargo_bin("aegis").unwrap()
}

fn write_gray_png(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageLuma8(GrayImage::new(width, height))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

fn analyze_json(args: &[&str]) -> Value {
    let output = aegis().arg("analyze").args(args).arg("--json").output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    aegis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shallow content analysis"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("fingerprint"));
}

#[test]
fn test_help_shows_exit_codes() {
    aegis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("66"));
}

#[test]
fn test_version_displays_version() {
    aegis()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("aegis"));
}

#[test]
fn test_analyze_help_shows_options() {
    aegis()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--mime"))
        .stdout(predicate::str::contains("--json"));
}

// ============================================================================
// Exit Code Tests
// ============================================================================

#[test]
fn test_missing_file_returns_input_error() {
    // Exit code 66 = EX_NOINPUT
    aegis()
        .args(["analyze", "nonexistent_file.png"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_fingerprint_requires_a_file() {
    aegis().arg("fingerprint").assert().failure();
}

// ============================================================================
// Analyze Tests
// ============================================================================

#[test]
fn test_analyze_text_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, "Hello world. This is a test. Extra sentence.").unwrap();

    let json = analyze_json(&[file.to_str().unwrap()]);

    assert_eq!(json["filename"], "notes.txt");
    assert_eq!(json["file_type"], "text/plain");
    assert_eq!(json["ai_analysis"]["kind"], "text");
    assert_eq!(json["ai_analysis"]["summary"], "Hello world. This is a test...");
}

#[test]
fn test_analyze_text_human_output() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("invoice.txt");
    fs::write(&file, "Invoice 42. Payment due.").unwrap();

    aegis()
        .args(["analyze", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice 42. Payment due."))
        .stdout(predicate::str::contains("Financial document"));
}

#[test]
fn test_analyze_grayscale_thumbnail() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("icon.png");
    write_gray_png(&file, 40, 40);

    let json = analyze_json(&[file.to_str().unwrap()]);
    let analysis = &json["ai_analysis"];

    assert_eq!(analysis["kind"], "image");
    assert_eq!(analysis["tags"][0], "grayscale_image");
    assert_eq!(analysis["tags"][1], "thumbnail_size");
    assert_eq!(analysis["is_duplicate"], false);
}

#[test]
fn test_mime_override_wins_over_extension() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("data.bin");
    fs::write(&file, "One. Two. Three.").unwrap();

    let guessed = analyze_json(&[file.to_str().unwrap()]);
    assert_eq!(guessed["ai_analysis"]["kind"], "unsupported");

    let declared = analyze_json(&[file.to_str().unwrap(), "--mime", "text/plain"]);
    assert_eq!(declared["ai_analysis"]["kind"], "text");
    assert_eq!(declared["ai_analysis"]["summary"], "One. Two...");
}

#[test]
fn test_analyze_corrupt_image() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("broken.jpg");
    fs::write(&file, b"not really a jpeg").unwrap();

    aegis()
        .args(["analyze", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("analysis_failed"));
}

// ============================================================================
// Fingerprint Tests
// ============================================================================

#[test]
fn test_fingerprint_of_empty_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("empty.txt");
    fs::write(&file, b"").unwrap();

    aegis()
        .args(["fingerprint", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
        ));
}

#[test]
fn test_fingerprint_flags_repeated_content() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.png");
    let second = temp.path().join("b.png");
    let third = temp.path().join("c.png");
    write_gray_png(&first, 16, 16);
    fs::copy(&first, &second).unwrap();
    write_gray_png(&third, 17, 16);

    let output = aegis()
        .args([
            "fingerprint",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
            third.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(!lines[0].contains("(duplicate)"));
    assert!(lines[1].contains("(duplicate)"));
    assert!(!lines[2].contains("(duplicate)"));
    assert_eq!(lines[0][..64], lines[1][..64]);
}
