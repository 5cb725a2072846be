//! Isle CLI
//!
//! Runs the selection engine over a JSON element-tree snapshot and prints
//! the islands it finds, for testing and debugging.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use isle_common::Diagnostic;
use isle_css::StaticMetrics;
use isle_dom::{DocumentSnapshot, ElementTree, NodeId};
use isle_select::{ClusterStrategy, HtmlSelection, SelectionBuilder, SelectionConfig, SelectorId};
use owo_colors::OwoColorize;

/// Isle: find and color the reading blocks of an element tree
#[derive(Parser, Debug)]
#[command(name = "isle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Select with the default labels
    isle page.json

    # Only paragraphs and headings, smaller islands allowed
    isle --labels "p, h1, h2" --min-area 100 page.json

    # Use a selector list instead of labels
    isle --selector "article.post, .content" page.json

    # Refine the first build down to selectors 0 and 2
    isle --refine 0 --refine 2 page.json

    # Machine-readable output
    isle --json page.json
"#)]
struct Cli {
    /// Path to a JSON element-tree snapshot
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// JSON file with a selection configuration; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comma-separated recognized labels
    #[arg(long, value_name = "LIST", conflicts_with = "selector")]
    labels: Option<String>,

    /// Selector list used instead of labels (tag, .class, tag.class, *)
    #[arg(long, value_name = "SELECTORS")]
    selector: Option<String>,

    /// Minimum island area in px²
    #[arg(long, value_name = "PX2")]
    min_area: Option<f64>,

    /// Starting palette index
    #[arg(long, value_name = "N")]
    palette_offset: Option<usize>,

    /// Palette base color as hex
    #[arg(long, value_name = "HEX")]
    base_color: Option<String>,

    /// Merge islands by full closure instead of a single pass
    #[arg(long)]
    transitive: bool,

    /// Root font size declaration
    #[arg(long, default_value = "16px")]
    root_font_size: String,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    viewport_width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    viewport_height: f64,

    /// Keep only these selector ids and rebuild within them (repeatable)
    #[arg(long, value_name = "ID")]
    refine: Vec<usize>,

    /// Print the selection as JSON
    #[arg(long)]
    json: bool,

    /// Do not echo warnings while computing
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let snapshot = DocumentSnapshot::load(&cli.snapshot)
        .with_context(|| format!("loading {}", cli.snapshot.display()))?;
    let tree = snapshot.to_tree();

    let config = load_config(&cli)?;
    let metrics = StaticMetrics {
        root_font_size: cli.root_font_size.clone(),
        viewport_width: cli.viewport_width,
        viewport_height: cli.viewport_height,
    };
    let builder = SelectionBuilder::new(&tree, &metrics, config);

    let mut selection = builder.build(None);
    if !cli.refine.is_empty() {
        let ids: Vec<SelectorId> = cli.refine.iter().copied().map(SelectorId).collect();
        for id in &ids {
            if selection.selector(*id).is_none() {
                bail!(
                    "no selector #{} to refine (the build found {})",
                    id.0,
                    selection.len()
                );
            }
        }
        selection = builder.refine(&selection.only(&ids));
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&selection).context("serializing selection")?;
        println!("{json}");
    } else {
        print_selection(&tree, &selection);
        print_diagnostics(selection.diagnostics());
    }

    Ok(())
}

/// The configuration file (or the defaults) with flags applied on top.
fn load_config(cli: &Cli) -> Result<SelectionConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => SelectionConfig::default(),
    };

    if let Some(labels) = &cli.labels {
        config = config.with_labels(&[labels]);
    }
    if let Some(selector) = &cli.selector {
        config = config.with_selector(selector);
    }
    if let Some(area) = cli.min_area {
        config = config.with_min_island_area(area);
    }
    if let Some(offset) = cli.palette_offset {
        config = config.with_palette_offset(offset);
    }
    if let Some(hex) = &cli.base_color {
        config = config.with_base_color(hex);
    }
    if cli.transitive {
        config = config.with_strategy(ClusterStrategy::Transitive);
    }

    Ok(config.with_echo_warnings(!cli.quiet && !cli.json))
}

fn read_config(path: &Path) -> Result<SelectionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Print one line per selector with a color swatch, then its members.
fn print_selection(tree: &ElementTree, selection: &HtmlSelection) {
    println!("=== Selection ({} selectors) ===", selection.len());

    for (selector, color) in selection.iter() {
        let rgb = color.color.to_rgb();
        let bounds = selector.bounds();
        println!(
            "\n{} #{} {}  [{}]  {}x{} at ({}, {})",
            "██".truecolor(rgb.r, rgb.g, rgb.b),
            selector.id().0,
            color.color.to_hex_string(),
            selector.labels().join(", "),
            bounds.width,
            bounds.height,
            bounds.left,
            bounds.top,
        );
        for &node in selector.elements() {
            println!("    {}", describe(tree, node));
        }
    }
}

/// `<tag.class1.class2>` (node id)
fn describe(tree: &ElementTree, node: NodeId) -> String {
    tree.as_element(node).map_or_else(
        || format!("? ({})", node.0),
        |element| format!("<{}> ({})", element.compound_label(), node.0),
    )
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!("\n=== Diagnostics ===");
    for diagnostic in diagnostics {
        println!("  - {diagnostic}");
    }
}
