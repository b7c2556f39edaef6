//! HTML site generation.
//!
//! Stage 2 of the build. Takes loaded [`Content`] together with its
//! organized listing and resolved learning paths, and writes the final static
//! site. Every output path is checked to stay below the output directory.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): series cards, standalone tutorials (newest
//!   first), and category/tag filter chips
//! - **Tutorial pages** (`/tutorials/{slug}/index.html`): rendered Markdown with
//!   a "Part N of M" bar and prev/next links for series members
//! - **Series pages** (`/series/{slug}/index.html`): ordered part list
//! - **Learning path pages** (`/paths/{slug}/index.html`): ordered step list
//! - **Search index** (`/search-index.json`): title, description, category and
//!   tags for every tutorial
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── search-index.json
//! ├── tutorials/
//! │   ├── docker-basics/index.html
//! │   └── rust-basics/01-ownership/index.html
//! ├── series/
//! │   └── rust-basics/index.html
//! └── paths/
//!     └── backend-fundamentals/index.html
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/filter.js`: Category/tag/search filtering on the index page
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::content::Content;
use crate::naming::{display_title, is_safe_slug};
use crate::navigate::{self, NavigationError, SeriesNavigation};
use crate::organize::{OrganizedResult, Series};
use crate::paths::ResolvedPath;
use crate::types::{Difficulty, Tutorial};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
    #[error("refusing to write outside the output directory: {0}")]
    UnsafePath(String),
}

/// What [`generate`] wrote, for CLI output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerateReport {
    /// Site-relative paths of every written file, in write order.
    pub files: Vec<String>,
    pub tutorial_pages: usize,
    pub series_pages: usize,
    pub path_pages: usize,
}

#[derive(Debug, Serialize)]
struct SearchEntry<'a> {
    slug: &'a str,
    title: &'a str,
    description: &'a str,
    category: &'a str,
    tags: &'a [String],
    url: String,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/filter.js");

/// Write the site for already organized content.
///
/// `organized` and `paths` must come from `content.tutorials`; the caller
/// computes them once so the same result is both checked and rendered.
pub fn generate(
    content: &Content,
    organized: &OrganizedResult,
    paths: &[ResolvedPath],
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let site = &content.config;

    let color_css = config::generate_color_css(&site.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();
    let mut write = |rel: &str, body: String| -> Result<(), GenerateError> {
        if !is_safe_slug(rel) {
            return Err(GenerateError::UnsafePath(rel.to_string()));
        }
        let path = output_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, body)?;
        debug!(file = rel, "wrote");
        report.files.push(rel.to_string());
        Ok(())
    };

    write(
        "index.html",
        render_index(organized, paths, site, &css).into_string(),
    )?;

    for tutorial in &content.tutorials {
        let nav = navigate::series_navigation(tutorial, &content.tutorials)?;
        let page = render_tutorial_page(tutorial, nav.as_ref(), site, &css);
        write(&format!("tutorials/{}/index.html", tutorial.slug), page.into_string())?;
    }

    for series in &organized.series {
        let page = render_series_page(series, site, &css);
        write(&format!("series/{}/index.html", series.slug), page.into_string())?;
    }

    for resolved in paths {
        let page = render_path_page(resolved, site, &css);
        write(&format!("paths/{}/index.html", resolved.path.slug), page.into_string())?;
    }

    let search: Vec<SearchEntry> = content
        .tutorials
        .iter()
        .map(|t| SearchEntry {
            slug: &t.slug,
            title: &t.title,
            description: &t.description,
            category: &t.category,
            tags: &t.tags,
            url: tutorial_url(site, &t.slug),
        })
        .collect();
    write("search-index.json", serde_json::to_string(&search)?)?;

    report.tutorial_pages = content.tutorials.len();
    report.series_pages = organized.series.len();
    report.path_pages = paths.len();
    Ok(report)
}

// ============================================================================
// URLs
// ============================================================================

fn tutorial_url(site: &SiteConfig, slug: &str) -> String {
    site.url(&format!("tutorials/{slug}/"))
}

fn series_url(site: &SiteConfig, slug: &str) -> String {
    site.url(&format!("series/{slug}/"))
}

fn path_url(site: &SiteConfig, slug: &str) -> String {
    site.url(&format!("paths/{slug}/"))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb
fn site_header(site: &SiteConfig, breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            a.site-title href=(site.url("")) { (site.title) }
            nav.breadcrumb {
                (breadcrumb)
            }
        }
    }
}

fn difficulty_badge(difficulty: Difficulty) -> Markup {
    html! {
        span class={ "badge difficulty-" (difficulty.as_str()) } { (difficulty.as_str()) }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags {
                    li.tag { (tag) }
                }
            }
        }
    }
}

fn tutorial_meta(tutorial: &Tutorial) -> Markup {
    html! {
        div.meta {
            (difficulty_badge(tutorial.difficulty))
            @let date = tutorial.effective_date();
            time datetime=(date.to_string()) { (date.format("%b %-d, %Y").to_string()) }
            @if let Some(time) = &tutorial.estimated_time {
                span.estimated-time { (time) }
            }
        }
    }
}

/// JSON array for list-valued `data-*` attributes; tags may contain spaces.
fn data_list(items: &[&str]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Sorted, deduplicated union of one string list per member.
fn member_union<'a>(
    series: &Series<'a>,
    field: impl Fn(&'a Tutorial) -> Vec<&'a str>,
) -> Vec<&'a str> {
    let mut values: Vec<&'a str> = series.tutorials.iter().copied().flat_map(field).collect();
    values.sort_unstable();
    values.dedup();
    values
}

/// Card for a standalone tutorial on the index page.
///
/// `data-*` attributes drive `filter.js`.
fn tutorial_card(tutorial: &Tutorial, site: &SiteConfig) -> Markup {
    let tags: Vec<&str> = tutorial.tags.iter().map(String::as_str).collect();
    html! {
        article.card.tutorial-card
            data-categories=(data_list(&[tutorial.category.as_str()]))
            data-tags=(data_list(&tags))
            data-search={ (tutorial.title.to_lowercase()) " " (tutorial.description.to_lowercase()) } {
            h3 { a href=(tutorial_url(site, &tutorial.slug)) { (tutorial.title) } }
            p.description { (tutorial.description) }
            (tutorial_meta(tutorial))
            (tag_list(&tutorial.tags))
        }
    }
}

/// Card for a series on the index page; carries the union of member
/// categories and tags so a chip used only by later parts still finds it.
fn series_card(series: &Series, site: &SiteConfig) -> Markup {
    let categories = member_union(series, |t| vec![t.category.as_str()]);
    let tags = member_union(series, |t| t.tags.iter().map(String::as_str).collect());

    html! {
        article.card.series-card
            data-categories=(data_list(&categories))
            data-tags=(data_list(&tags))
            data-search={ (series.title.to_lowercase()) " " (series.description.to_lowercase()) } {
            h3 { a href=(series_url(site, series.slug)) { (series.title) } }
            p.description { (series.description) }
            div.meta {
                (difficulty_badge(series.difficulty))
                span.part-count { (series.tutorials.len()) " parts" }
            }
        }
    }
}

fn filter_bar(organized: &OrganizedResult) -> Markup {
    html! {
        div.filters {
            input.search type="search" placeholder="Search tutorials" aria-label="Search tutorials";
            div.chips.category-chips {
                button.chip.active type="button" data-filter-category="" { "All" }
                @for category in &organized.categories {
                    button.chip type="button" data-filter-category=(category) { (display_title(category)) }
                }
            }
            @if !organized.tags.is_empty() {
                div.chips.tag-chips {
                    @for tag in &organized.tags {
                        button.chip type="button" data-filter-tag=(tag) { "#" (tag) }
                    }
                }
            }
        }
    }
}

/// Series position bar shown above and below a series member's body.
fn series_nav_bar(nav: &SeriesNavigation, site: &SiteConfig) -> Markup {
    let series_slug = nav.series[nav.current].series_slug().unwrap_or_default();
    html! {
        nav.series-nav {
            a.series-link href=(series_url(site, series_slug)) {
                "Part " (nav.position()) " of " (nav.len())
            }
            div.series-pager {
                @if let Some(prev) = nav.prev {
                    a.prev href=(tutorial_url(site, &prev.slug)) rel="prev" { "← " (prev.title) }
                }
                @if let Some(next) = nav.next {
                    a.next href=(tutorial_url(site, &next.slug)) rel="next" { (next.title) " →" }
                }
            }
        }
    }
}

/// Convert a Markdown body to HTML.
pub fn render_markdown(body: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;
    let parser = Parser::new_ext(body, options);
    let mut out = String::with_capacity(body.len() * 3 / 2);
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(
    organized: &OrganizedResult,
    learning_paths: &[ResolvedPath],
    site: &SiteConfig,
    css: &str,
) -> Markup {
    let content = html! {
        (site_header(site, html! { a href=(site.url("")) { "Home" } }))
        main.index-page {
            header.page-header {
                h1 { (site.title) }
                @if !site.description.is_empty() {
                    p.tagline { (site.description) }
                }
            }
            @if !learning_paths.is_empty() {
                section.path-list {
                    h2 { "Learning Paths" }
                    div.card-grid {
                        @for resolved in learning_paths {
                            article.card.path-card {
                                h3 { a href=(path_url(site, &resolved.path.slug)) { (resolved.path.title) } }
                                p.description { (resolved.path.description) }
                                div.meta {
                                    @if let Some(difficulty) = resolved.difficulty() {
                                        (difficulty_badge(difficulty))
                                    }
                                    span.step-count { (resolved.steps.len()) " steps" }
                                }
                            }
                        }
                    }
                }
            }
            (filter_bar(organized))
            @if !organized.series.is_empty() {
                section.series-list {
                    h2 { "Series" }
                    div.card-grid {
                        @for series in &organized.series {
                            (series_card(series, site))
                        }
                    }
                }
            }
            @if !organized.standalone.is_empty() {
                section.tutorial-list {
                    h2 { "Tutorials" }
                    div.card-grid {
                        @for tutorial in &organized.standalone {
                            (tutorial_card(tutorial, site))
                        }
                    }
                }
            }
            p.no-results hidden { "No tutorials match these filters." }
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&site.title, css, content)
}

fn render_tutorial_page(
    tutorial: &Tutorial,
    nav: Option<&SeriesNavigation>,
    site: &SiteConfig,
    css: &str,
) -> Markup {
    let breadcrumb = html! {
        a href=(site.url("")) { "Home" }
        @if let Some(series) = tutorial.series_slug() {
            " › "
            a href=(series_url(site, series)) {
                @if let Some(nav) = nav {
                    (nav.series_title().unwrap_or(series))
                } @else {
                    (display_title(series))
                }
            }
        }
        " › "
        (tutorial.title)
    };

    let content = html! {
        (site_header(site, breadcrumb))
        main.tutorial-page {
            header.page-header {
                h1 { (tutorial.title) }
                p.description { (tutorial.description) }
                (tutorial_meta(tutorial))
                (tag_list(&tutorial.tags))
            }
            @if let Some(nav) = nav {
                (series_nav_bar(nav, site))
            }
            article.tutorial-body {
                (PreEscaped(render_markdown(&tutorial.body)))
            }
            @if let Some(nav) = nav {
                (series_nav_bar(nav, site))
            }
        }
    };

    base_document(&format!("{} | {}", tutorial.title, site.title), css, content)
}

fn render_series_page(series: &Series, site: &SiteConfig, css: &str) -> Markup {
    let breadcrumb = html! {
        a href=(site.url("")) { "Home" }
        " › "
        (series.title)
    };

    let content = html! {
        (site_header(site, breadcrumb))
        main.series-page {
            header.page-header {
                h1 { (series.title) }
                p.description { (series.description) }
                div.meta {
                    (difficulty_badge(series.difficulty))
                    span.category { (display_title(series.category)) }
                }
            }
            ol.part-list {
                @for tutorial in &series.tutorials {
                    li {
                        a href=(tutorial_url(site, &tutorial.slug)) { (tutorial.title) }
                        p.description { (tutorial.description) }
                        (tutorial_meta(tutorial))
                    }
                }
            }
        }
    };

    base_document(&format!("{} | {}", series.title, site.title), css, content)
}

fn render_path_page(resolved: &ResolvedPath, site: &SiteConfig, css: &str) -> Markup {
    let path = resolved.path;
    let breadcrumb = html! {
        a href=(site.url("")) { "Home" }
        " › "
        (path.title)
    };

    let content = html! {
        (site_header(site, breadcrumb))
        main.path-page {
            header.page-header {
                h1 { (path.title) }
                p.description { (path.description) }
                div.meta {
                    @if let Some(difficulty) = resolved.difficulty() {
                        (difficulty_badge(difficulty))
                    }
                    @if let Some(time) = &path.estimated_time {
                        span.estimated-time { (time) }
                    }
                    span.step-count { (resolved.steps.len()) " steps" }
                }
            }
            @if !path.body.trim().is_empty() {
                div.path-intro {
                    (PreEscaped(render_markdown(&path.body)))
                }
            }
            ol.step-list {
                @for tutorial in &resolved.steps {
                    li {
                        a href=(tutorial_url(site, &tutorial.slug)) { (tutorial.title) }
                        p.description { (tutorial.description) }
                        (tutorial_meta(tutorial))
                    }
                }
            }
        }
    };

    base_document(&format!("{} | {}", path.title, site.title), css, content)
}

// ============================================================================
// Tests
// ============================================================================
