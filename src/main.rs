use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hueprint::assets::{AssetCategory, AssetLoader};
use hueprint::models::{AppConfig, MetricKind, OutputFormat, SortOrder};
use hueprint::rendering;
use hueprint::services::{AnalysisPipeline, PaletteLoader, PaletteStore};
use palette_match::Rgb;

#[derive(Parser)]
#[command(name = "hueprint")]
#[command(about = "Dominant colors, Tailwind tokens and WCAG contrast for images")]
#[command(version)]
struct Cli {
    /// Config file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Palette selection shared by commands that match colors
#[derive(clap::Args)]
struct PaletteArgs {
    /// Local palette file (YAML or JSON) instead of downloading Tailwind
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Never download; use the bundled palette unless --palette is given
    #[arg(long)]
    offline: bool,

    /// Distance used for matching
    #[arg(long, value_enum)]
    metric: Option<MetricKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract dominant colors from an image and match them to the palette
    Analyze {
        /// Image file (PNG, JPEG, WebP, ...)
        image: PathBuf,

        /// Number of colors
        #[arg(short, long)]
        k: Option<usize>,

        #[arg(short, long, value_enum)]
        sort: Option<SortOrder>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// Match hex colors to the palette and report their contrast
    Match {
        /// Colors such as "#1e293b" or "f87171"
        #[arg(required = true)]
        colors: Vec<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// Print the resolved palette
    Palette {
        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config_file: bool,

        /// Extract the bundled palettes
        #[arg(long)]
        palettes: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Directory for extracted palettes
        #[arg(long, default_value = "palettes")]
        palettes_dir: PathBuf,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hueprint=warn,palette_match=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_file = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let loader = AssetLoader::new(config_file);

    match cli.command {
        Some(Commands::Analyze {
            image,
            k,
            sort,
            format,
            palette,
        }) => {
            let config = AppConfig::load_from_assets(&loader);
            run_analyze_command(&config, image, k, sort, format, &palette)
        }
        Some(Commands::Match {
            colors,
            format,
            palette,
        }) => {
            let config = AppConfig::load_from_assets(&loader);
            run_match_command(&config, &colors, format, &palette)
        }
        Some(Commands::Palette { palette }) => {
            let config = AppConfig::load_from_assets(&loader);
            run_palette_command(&config, &palette)
        }
        Some(Commands::Init {
            config_file,
            palettes,
            all,
            palettes_dir,
            force,
            list,
        }) => run_init_command(&loader, config_file, palettes, all, &palettes_dir, force, list),
        None => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

fn load_palette(config: &AppConfig, args: &PaletteArgs) -> anyhow::Result<PaletteStore> {
    let mut palette_config = config.palette.clone();
    if let Some(metric) = args.metric {
        palette_config.metric = metric;
    }

    let mut loader = PaletteLoader::from_config(&palette_config).offline(args.offline);
    if let Some(ref path) = args.palette {
        loader = loader.file(path);
    }

    PaletteStore::load(loader).context("Failed to load palette")
}

fn run_analyze_command(
    config: &AppConfig,
    image: PathBuf,
    k: Option<usize>,
    sort: Option<SortOrder>,
    format: Option<OutputFormat>,
    palette_args: &PaletteArgs,
) -> anyhow::Result<()> {
    let store = load_palette(config, palette_args)?;

    let mut pipeline = AnalysisPipeline::new(config, store.current())
        .sort(sort.unwrap_or(config.output.sort));
    if let Some(k) = k {
        pipeline = pipeline.k(k);
    }

    let report = pipeline
        .run_path(&image)
        .with_context(|| format!("Failed to analyze {}", image.display()))?;

    if report.approximate {
        eprintln!(
            "note: clustering stopped after {} iterations without converging; colors are approximate",
            report.iterations
        );
    }

    let output = rendering::render(&report.results, format.unwrap_or(config.output.format))?;
    println!("{output}");
    Ok(())
}

fn run_match_command(
    config: &AppConfig,
    colors: &[String],
    format: Option<OutputFormat>,
    palette_args: &PaletteArgs,
) -> anyhow::Result<()> {
    let colors = colors
        .iter()
        .map(|s| Rgb::from_str(s).with_context(|| format!("Invalid color '{s}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let store = load_palette(config, palette_args)?;
    let results = AnalysisPipeline::new(config, store.current()).match_colors(&colors);

    let output = rendering::render(&results, format.unwrap_or(config.output.format))?;
    println!("{output}");
    Ok(())
}

fn run_palette_command(config: &AppConfig, palette_args: &PaletteArgs) -> anyhow::Result<()> {
    let store = load_palette(config, palette_args)?;
    let palette = store.current();
    println!("# {} entries from {}", palette.len(), store.source());
    for entry in palette.entries() {
        println!("{:<16} {}", entry.token, entry.rgb);
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    loader: &AssetLoader,
    config: bool,
    palettes: bool,
    all: bool,
    palettes_dir: &std::path::Path,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Config:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        println!("\nPalettes:");
        for f in AssetLoader::list_embedded(AssetCategory::Palettes) {
            println!("  {f}");
        }
        return Ok(());
    }

    // Determine which categories to extract
    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || palettes {
        categories.push(AssetCategory::Palettes);
    }

    if categories.is_empty() {
        anyhow::bail!(
            "No categories specified. Use --all, --config-file or --palettes \
             (run 'hueprint init --list' to see embedded assets)"
        );
    }

    let report = loader
        .init(&categories, palettes_dir, force)
        .context("Failed to extract assets")?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }

    if !report.skipped.is_empty() {
        println!("Skipped {} existing files (use --force to overwrite):", report.skipped.len());
        for f in &report.skipped {
            println!("  = {f}");
        }
    }

    Ok(())
}

/// Show version and where configuration comes from
fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Hueprint v{VERSION}");
    println!("Dominant colors, Tailwind tokens and WCAG contrast for images\n");

    println!("Configuration:");
    match loader.config_file() {
        Some(path) if path.exists() => println!("  {} (file)", path.display()),
        Some(path) => println!("  {} (missing, using embedded)", path.display()),
        None => println!("  embedded config.yaml (set CONFIG_FILE or --config to override)"),
    }

    let config = AppConfig::load_from_assets(loader);
    println!("\nPalette:");
    match config.palette.file {
        Some(ref file) => println!("  file: {}", file.display()),
        None => {
            for url in &config.palette.urls {
                println!("  {url}");
            }
            println!("  fallback: bundled {}", hueprint::assets::BUNDLED_PALETTE);
        }
    }

    println!("\nRun 'hueprint --help' for commands.");
}
