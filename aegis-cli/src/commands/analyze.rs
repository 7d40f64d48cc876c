//! Analyze command implementation.

use std::path::PathBuf;

use aegis_core::classify::normalize_declared;
use aegis_core::{
    classify, AnalysisStatus, Classification, FingerprintRegistry, ImageReport, TextReport, Upload,
};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::utils::{guess_mime, read_input};

/// Execute the analyze command.
pub fn execute(file: PathBuf, mime: Option<String>, as_json: bool) -> Result<()> {
    let content = read_input(&file)?;

    let declared = match mime {
        Some(mime) => normalize_declared(&mime),
        None => guess_mime(&file).to_string(),
    };
    debug!(declared = %declared, "Declared media type");

    let filename = file.file_name().and_then(|n| n.to_str());
    let registry = FingerprintRegistry::new();
    let analysis = classify(
        Upload::new(&content, &declared).with_filename(filename),
        &registry,
    );

    if as_json {
        let output = json!({
            "filename": filename,
            "file_type": declared,
            "ai_analysis": analysis,
        });
        let rendered =
            serde_json::to_string_pretty(&output).context("Failed to serialize result to JSON")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!();
    println!("   {} {}", "File:".dimmed(), file.display());
    println!("   {} {}", "Type:".dimmed(), declared);

    match &analysis {
        Classification::Image(report) => print_image(report),
        Classification::Text(report) => print_text(report),
        Classification::Unsupported(report) => {
            println!("   {} {}", "Result:".dimmed(), report.message.yellow());
        }
        other => println!("   {} {}", "Result:".dimmed(), other.kind()),
    }

    Ok(())
}

fn status_label(status: AnalysisStatus) -> colored::ColoredString {
    match status {
        AnalysisStatus::Complete => "complete".green(),
        AnalysisStatus::Degraded => "degraded".yellow(),
        AnalysisStatus::Failed => "failed".red(),
    }
}

fn print_image(report: &ImageReport) {
    println!("   {} image ({})", "Analysis:".dimmed(), status_label(report.status));

    if let (Some(width), Some(height)) = (report.width, report.height) {
        println!("   {} {}x{}", "Dimensions:".dimmed(), width, height);
    }

    let tags: Vec<&str> = report.tags.iter().map(|t| t.as_str()).collect();
    println!("   {} {}", "Tags:".dimmed(), tags.join(", "));
    println!("   {} {}", "Fingerprint:".dimmed(), report.fingerprint);

    if let Some(detail) = &report.detail {
        println!("   {} {}", "Detail:".dimmed(), detail.red());
    }
}

fn print_text(report: &TextReport) {
    println!("   {} text ({})", "Analysis:".dimmed(), status_label(report.status));
    println!("   {} {}", "Summary:".dimmed(), report.summary);
    println!("   {} {}", "Keywords:".dimmed(), report.keywords.join(", "));

    if report.truncated {
        println!("   {} {}", "Note:".dimmed(), "analyzed the first 1000 characters".yellow());
    }

    let insights = &report.insights;
    for finding in [insights.security_alert, insights.category, insights.length]
        .into_iter()
        .flatten()
    {
        println!("   {} {}", "Insight:".dimmed(), finding.yellow());
    }
}
