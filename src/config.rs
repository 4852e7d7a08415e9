use crate::math::base::NumberBase;
use log::{debug, warn};
use platform_dirs::AppDirs;
use ron::de::from_reader;
use ron::ser::{to_string_pretty, PrettyConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::base")]
    pub base: NumberBase,
    #[serde(default = "defaults::max_fractional_places")]
    pub max_fractional_places: u32,
    #[serde(default = "defaults::positional")]
    pub positional: bool,
    #[serde(default = "defaults::vars_path")]
    pub vars_path: String,
}

macro_rules! default_ {
    ($name:ident, $type:ident) => {
        pub fn $name() -> $type {
            Config::default().$name
        }
    };
}

mod defaults {
    use super::Config;
    use super::NumberBase;
    default_!(base, NumberBase);
    default_!(max_fractional_places, u32);
    default_!(positional, bool);
    default_!(vars_path, String);
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: NumberBase::Decimal,
            max_fractional_places: 32,
            positional: false,
            vars_path: "ratcalc-vars".to_owned(),
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        let dirs = AppDirs::new(Some("ratcalc"), false)?;
        Some(dirs.config_dir.join("ratcalc.cfg"))
    }

    /// Loads the user's config, falling back to defaults when there is none.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("no config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Reads `path`, creating it with defaults if it does not exist. A file
    /// that parses is written back so fields it lacked show their defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(_) => {
                debug!("creating default config at {}", path.display());
                let conf = Self::default();
                conf.store(path);
                return conf;
            }
        };
        match from_reader::<fs::File, Self>(file) {
            Ok(conf) => {
                conf.store(path);
                conf
            }
            Err(e) => {
                warn!("ignoring unreadable config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn store(&self, path: &Path) {
        let written = to_string_pretty(self, PrettyConfig::default())
            .map_err(|e| e.to_string())
            .and_then(|s| fs::write(path, s).map_err(|e| e.to_string()));
        if let Err(e) = written {
            warn!("could not write config {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
fn temp_config(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("ratcalc-config-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn missing_config_is_created_test() {
    let path = temp_config("missing.cfg");
    let _ = fs::remove_file(&path);
    assert_eq!(Config::load_from(&path), Config::default());
    assert!(path.exists());
    assert_eq!(Config::load_from(&path), Config::default());
    fs::remove_file(&path).unwrap();
}

#[test]
fn partial_config_is_completed_test() {
    let path = temp_config("partial.cfg");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "(base: Hexadecimal, positional: true)").unwrap();

    let conf = Config::load_from(&path);
    assert_eq!(conf.base, NumberBase::Hexadecimal);
    assert!(conf.positional);
    assert_eq!(conf.max_fractional_places, 32);
    assert!(fs::read_to_string(&path).unwrap().contains("vars_path"));
    fs::remove_file(&path).unwrap();
}

#[test]
fn broken_config_falls_back_test() {
    let path = temp_config("broken.cfg");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "(base: 12").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
    fs::remove_file(&path).unwrap();
}
