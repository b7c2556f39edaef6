//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is information-centric, not file-centric. Each entity (series,
//! tutorial, learning path) leads with its positional index and title; the
//! source file and other details follow as indented context lines. The
//! result reads like a content inventory while still letting authors trace
//! an entry back to its file.
//!
//! # Output Format
//!
//! ## Listing (`check`, `list`)
//!
//! ```text
//! Series
//! 001 Rust Basics (3 parts, intermediate)
//!     000 Rust Basics
//!         Source: tutorials/rust-basics/index.md
//!     001 Ownership
//!         Source: tutorials/rust-basics/01-ownership.mdx
//!
//! Tutorials
//! 001 Docker Basics (beginner, 2025-01-15)
//!     Source: tutorials/docker-basics.md
//!
//! Learning Paths
//! 001 Backend Fundamentals (3 steps)
//!     Missing: kubernetes-intro
//!
//! Categories: devops, rust, tooling
//! Tags: containers, docker, git, rust
//! ```
//!
//! Series members are numbered by their `seriesOrder`, everything else by
//! position.
//!
//! ## Generate
//!
//! ```text
//! Generated 6 tutorial pages, 1 series page, 1 learning path page
//! Site written to dist
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::generate::GenerateReport;
use crate::organize::OrganizedResult;
use crate::paths::ResolvedPath;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format an index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: index + title, with optional detail in parens.
///
/// ```text
/// 001 Rust Basics (3 parts, intermediate)
/// 002 Ownership
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Format the organized content inventory.
pub fn format_listing(organized: &OrganizedResult, paths: &[ResolvedPath]) -> Vec<String> {
    let mut lines = Vec::new();

    if !organized.series.is_empty() {
        lines.push("Series".to_string());
        for (i, series) in organized.series.iter().enumerate() {
            let detail = format!(
                "{}, {}",
                plural(series.tutorials.len(), "part"),
                series.difficulty
            );
            lines.push(entity_header(i + 1, series.title, Some(&detail)));
            for tutorial in &series.tutorials {
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    entity_header(tutorial.series_order() as usize, &tutorial.title, None)
                ));
                lines.push(format!("{}Source: {}", indent(2), tutorial.source_path));
            }
        }
        lines.push(String::new());
    }

    if !organized.standalone.is_empty() {
        lines.push("Tutorials".to_string());
        for (i, tutorial) in organized.standalone.iter().enumerate() {
            let detail = format!("{}, {}", tutorial.difficulty, tutorial.effective_date());
            lines.push(entity_header(i + 1, &tutorial.title, Some(&detail)));
            lines.push(format!("{}Source: {}", indent(1), tutorial.source_path));
        }
        lines.push(String::new());
    }

    if !paths.is_empty() {
        lines.push("Learning Paths".to_string());
        for (i, resolved) in paths.iter().enumerate() {
            let detail = plural(resolved.steps.len(), "step");
            lines.push(entity_header(i + 1, &resolved.path.title, Some(&detail)));
            if !resolved.missing.is_empty() {
                lines.push(format!(
                    "{}Missing: {}",
                    indent(1),
                    resolved.missing.join(", ")
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push(format!("Categories: {}", organized.categories.join(", ")));
    lines.push(format!("Tags: {}", organized.tags.join(", ")));
    lines
}

pub fn print_listing(organized: &OrganizedResult, paths: &[ResolvedPath]) {
    for line in format_listing(organized, paths) {
        println!("{}", line);
    }
}

// ============================================================================
// Check summary
// ============================================================================

/// Totals printed after a successful check.
pub fn format_check_summary(
    organized: &OrganizedResult,
    paths: &[ResolvedPath],
    skipped_drafts: usize,
) -> Vec<String> {
    let series_members: usize = organized.series.iter().map(|s| s.tutorials.len()).sum();
    let total = organized.standalone.len() + series_members;
    let missing: usize = paths.iter().map(|p| p.missing.len()).sum();

    let mut lines = vec![format!(
        "{} ({} standalone, {} in {} series)",
        plural(total, "tutorial"),
        organized.standalone.len(),
        series_members,
        organized.series.len(),
    )];
    if skipped_drafts > 0 {
        lines.push(format!("{} skipped", plural(skipped_drafts, "draft")));
    }
    if missing > 0 {
        lines.push(format!(
            "{} in learning paths",
            plural(missing, "unresolved reference")
        ));
    }
    lines
}

pub fn print_check_summary(
    organized: &OrganizedResult,
    paths: &[ResolvedPath],
    skipped_drafts: usize,
) {
    for line in format_check_summary(organized, paths, skipped_drafts) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    vec![
        format!(
            "Generated {}, {}, {}",
            plural(report.tutorial_pages, "tutorial page"),
            plural(report.series_pages, "series page"),
            plural(report.path_pages, "learning path page"),
        ),
        format!("Site written to {}", output_dir.display()),
    ]
}

pub fn print_generate_output(report: &GenerateReport, output_dir: &Path) {
    for line in format_generate_output(report, output_dir) {
        println!("{}", line);
    }
}
