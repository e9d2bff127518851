use crate::events::AppEvent;
use compass::geom::max_radius;
use compass::{Point, PrimaryRing};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

pub const MIN_OVERLAY_SCALE: f64 = 0.01;
pub const MAX_OVERLAY_SCALE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompassConfig {
    pub primary: Option<PrimaryRing>,
    pub lodging: bool,
    pub hexagram: bool,
    /// Degrees added to every ring angle.
    pub rotation: f64,
    pub unit_size: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            primary: None,
            lodging: false,
            hexagram: false,
            rotation: 0.0,
            unit_size: compass::radius::DEFAULT_UNIT_SIZE,
        }
    }
}

/// What the plate detector reported for the current image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlateConfig {
    pub center: Option<(i32, i32)>,
    pub image_size: Option<(u32, u32)>,
    pub max_radius: Option<f64>,
}

impl PlateConfig {
    pub fn center(&self) -> Option<Point> {
        self.center.map(Point::from)
    }

    /// An explicit radius wins. Otherwise the distance from the centre to the nearest
    /// image edge.
    pub fn resolve_max_radius(&self) -> Option<f64> {
        if self.max_radius.is_some() {
            return self.max_radius;
        }
        let center = self.center()?;
        let (w, h) = self.image_size?;
        Some(max_radius(center, w as f64, h as f64))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub scale: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub compass: CompassConfig,
    #[serde(default)]
    pub plate: PlateConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let c = config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()?;
        let config: Config = c.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = self.compass.unit_size;
        if !(unit.is_finite() && unit > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "compass.unit_size must be positive, got {unit}"
            )));
        }
        if !self.compass.rotation.is_finite() {
            return Err(ConfigError::Invalid(
                "compass.rotation must be a finite number".to_string(),
            ));
        }
        let scale = self.overlay.scale;
        if !(MIN_OVERLAY_SCALE..=MAX_OVERLAY_SCALE).contains(&scale) {
            return Err(ConfigError::Invalid(format!(
                "overlay.scale must lie in [{MIN_OVERLAY_SCALE}, {MAX_OVERLAY_SCALE}], got {scale}"
            )));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "luopan", "luopan").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path` (if it exists) and overlays `LUOPAN_*` environment variables,
/// e.g. `LUOPAN_COMPASS__ROTATION=15`.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("LUOPAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&get_config_path()?)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    let result = match path {
        Some(p) => load_from(p),
        None => load_config(),
    };
    match result {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Watches the directory holding `config_path` and sends `ConfigReload` whenever the
/// file itself changes. Events stop once the returned watcher is dropped.
pub fn watch_config(
    config_path: &Path,
    tx: Sender<AppEvent>,
) -> Result<RecommendedWatcher, ConfigError> {
    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or(ConfigError::ConfigDirNotFound)?;

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
    }

    let target = config_path.to_path_buf();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| match res {
            Ok(event) => {
                if is_reload(&event, &target) {
                    let _ = tx.send(AppEvent::ConfigReload);
                }
            }
            Err(e) => {
                log::error!("Watch error: {}", e);
                let _ = tx.send(AppEvent::WatchFailed(e.to_string()));
            }
        },
        notify::Config::default(),
    )?;

    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::info!("Watching {}", config_path.display());
    Ok(watcher)
}

fn is_reload(event: &notify::Event, config_path: &Path) -> bool {
    let meaningful_event = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    meaningful_event && event.paths.iter().any(|p| p == config_path)
}
