use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tutorial_hub::content::{self, Content};
use tutorial_hub::organize::{OrganizedResult, organize};
use tutorial_hub::paths::{ResolvedPath, resolve_path};
use tutorial_hub::{config, generate, navigate, output};

#[derive(Parser)]
#[command(name = "tutorial-hub")]
#[command(about = "Static site generator for tutorials, series, and learning paths")]
#[command(long_about = "\
Static site generator for tutorials, series, and learning paths

Tutorials are Markdown or MDX files with YAML frontmatter. A `series` key
groups tutorials into an ordered series; `seriesOrder` sets each part's
position (0 is the series index page).

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── tutorials/
  │   ├── docker-basics.md         # Standalone tutorial
  │   └── rust-basics/
  │       ├── index.md             # series: rust-basics, seriesOrder: 0
  │       ├── 01-ownership.mdx     # seriesOrder: 1
  │       └── 02-traits.md         # seriesOrder: 2
  └── paths/
      └── backend.md               # Learning path (list of tutorial slugs)

Tutorials with `status: draft` are skipped unless --drafts is given.

Run 'tutorial-hub gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Include tutorials with `status: draft`
    #[arg(long, global = true)]
    drafts: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate content: frontmatter, series, navigation, learning paths
    Check,
    /// Print the organized content inventory
    List {
        /// Emit the organized result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate, then produce the final HTML site
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check => {
            let content = content::load(&cli.source, cli.drafts.into())?;
            let (organized, paths) = check(&content)?;
            output::print_listing(&organized, &paths);
            output::print_check_summary(&organized, &paths, content.skipped_drafts);
            println!("==> Content is valid");
        }
        Command::List { json } => {
            let content = content::load(&cli.source, cli.drafts.into())?;
            let organized = organize(&content.tutorials)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&organized)?);
            } else {
                let paths = resolve_paths(&content);
                output::print_listing(&organized, &paths);
            }
        }
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let content = content::load(&cli.source, cli.drafts.into())?;
            let (organized, paths) = check(&content)?;
            output::print_check_summary(&organized, &paths, content.skipped_drafts);

            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&content, &organized, &paths, &cli.output)?;
            output::print_generate_output(&report, &cli.output);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Organize, then compute navigation for every tutorial so a broken series
/// fails here rather than halfway through generation.
fn check(
    content: &Content,
) -> Result<(OrganizedResult<'_>, Vec<ResolvedPath<'_>>), Box<dyn std::error::Error>> {
    let organized = organize(&content.tutorials)?;
    for tutorial in &content.tutorials {
        navigate::series_navigation(tutorial, &content.tutorials)?;
    }
    Ok((organized, resolve_paths(content)))
}

fn resolve_paths(content: &Content) -> Vec<ResolvedPath<'_>> {
    content
        .paths
        .iter()
        .map(|path| resolve_path(path, &content.tutorials))
        .collect()
}
