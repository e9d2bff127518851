use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use compass::{CompassRegistry, PrimaryRing, RingKind};
use luopan::config::{self, Config};
use luopan::events::AppEvent;
use luopan::{Session, ThemeColors};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "luopan", version, about, long_about = None)]
struct Cli {
    /// Read settings from this file instead of the user config
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Compute ring geometry for a plate and print it as JSON
    Render(RenderArgs),
    /// List the rings the compass can draw
    Rings,
    /// Check the 28-lodging tables for inconsistencies
    Audit,
    /// Write the default config file and print its path
    Init,
    /// Print a ring summary every time the config file changes
    Watch,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// Plate centre in image pixels, e.g. 640,360
    #[arg(long, value_parser = parse_pair::<i32>)]
    center: Option<(i32, i32)>,

    /// Radius available around the centre
    #[arg(long, conflicts_with = "image")]
    max_radius: Option<f64>,

    /// Image size, e.g. 1280x720. The radius runs to the nearest edge.
    #[arg(long, value_parser = parse_pair::<u32>)]
    image: Option<(u32, u32)>,

    /// Rotation in degrees applied to every ring
    #[arg(short, long, allow_negative_numbers = true)]
    rotation: Option<f64>,

    /// Primary ring: 12 or 24
    #[arg(short, long)]
    primary: Option<PrimaryRing>,

    /// Hide the primary ring
    #[arg(long, conflicts_with = "primary")]
    no_primary: bool,

    /// Show the 28-lodging ring
    #[arg(long)]
    lodging: bool,

    /// Hide the 28-lodging ring
    #[arg(long, conflicts_with = "lodging")]
    no_lodging: bool,

    /// Show the 64-hexagram ring
    #[arg(long)]
    hexagram: bool,

    /// Hide the 64-hexagram ring
    #[arg(long, conflicts_with = "hexagram")]
    no_hexagram: bool,

    #[arg(long)]
    unit_size: Option<f64>,

    #[arg(long)]
    overlay_scale: Option<f64>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Print a per-ring summary instead of JSON
    #[arg(long)]
    summary: bool,
}

impl RenderArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(center) = self.center {
            config.plate.center = Some(center);
        }
        if let Some(radius) = self.max_radius {
            config.plate.max_radius = Some(radius);
        }
        if let Some(size) = self.image {
            config.plate.image_size = Some(size);
            config.plate.max_radius = None;
        }
        if let Some(rotation) = self.rotation {
            config.compass.rotation = rotation;
        }
        if let Some(primary) = self.primary {
            config.compass.primary = Some(primary);
        }
        if self.no_primary {
            config.compass.primary = None;
        }
        if self.lodging || self.no_lodging {
            config.compass.lodging = self.lodging;
        }
        if self.hexagram || self.no_hexagram {
            config.compass.hexagram = self.hexagram;
        }
        if let Some(unit) = self.unit_size {
            config.compass.unit_size = unit;
        }
        if let Some(scale) = self.overlay_scale {
            config.overlay.scale = scale;
        }
    }
}

fn parse_pair<T: FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s
        .split_once([',', 'x', 'X'])
        .ok_or_else(|| format!("expected two numbers like 640,360, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<T>()
            .map_err(|_| format!("{v:?} is not a valid number"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Render(args) => render(config_path, &args),
        Commands::Rings => rings(),
        Commands::Audit => audit(),
        Commands::Init => {
            let path = config::write_default_config().context("writing default config")?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Watch => watch(config_path),
    }
}

fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(p) => config::load_from(p).with_context(|| format!("loading {}", p.display()))?,
        None => config::load_or_default(None),
    })
}

/// Like `load`, but a broken file is logged and replaced by the defaults.
fn load_or_warn(path: Option<&Path>) -> Config {
    load(path).unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {:#}", e);
        Config::default()
    })
}

fn render(path: Option<&Path>, args: &RenderArgs) -> anyhow::Result<()> {
    let mut config = load(path)?;
    args.apply(&mut config);
    config.validate()?;

    let session = Session::from_config(&config)?;
    let document = session.document(&ThemeColors::default());
    if args.summary {
        println!("{}", document.summary());
    } else {
        println!("{}", document.to_json(args.pretty)?);
    }
    Ok(())
}

fn rings() -> anyhow::Result<()> {
    let registry = CompassRegistry::standard()?;
    for kind in RingKind::iter() {
        let definition = registry.catalog().definition(kind);
        println!(
            "{:<22} {:>3} sectors  {} ...",
            kind.to_string(),
            definition.sector_count(),
            definition.label_preview(4).join(" ")
        );
    }
    Ok(())
}

fn audit() -> anyhow::Result<()> {
    let registry = CompassRegistry::standard()?;
    let discrepancies = registry.catalog().lodging.audit();
    if discrepancies.is_empty() {
        println!("28-lodging tables are consistent");
    }
    for d in discrepancies {
        println!("{d}");
    }
    Ok(())
}

fn watch(path: Option<&Path>) -> anyhow::Result<()> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => config::get_config_path()?,
    };
    let (tx, rx) = std::sync::mpsc::channel();
    let _watcher = config::watch_config(&config_path, tx)?;
    let theme = ThemeColors::default();

    let print = |config: &Config| -> anyhow::Result<()> {
        let session = Session::from_config(config)?;
        println!("{}", session.document(&theme).summary());
        Ok(())
    };

    print(&load_or_warn(path))?;
    for event in rx {
        match event {
            AppEvent::ConfigReload => match config::load_from(&config_path) {
                Ok(config) => print(&config)?,
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppEvent::WatchFailed(e) => log::warn!("Config watcher: {}", e),
        }
    }
    Ok(())
}
