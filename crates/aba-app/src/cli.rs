//! CLI argument definitions for the ABA Travel terminal host.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use aba_core::config::AbaConfig;
use aba_core::error::AbaError;
use aba_core::types::{Coordinates, Language};

/// ABA Travel: a conversational travel guide for Georgia.
#[derive(Parser, Debug, Default)]
#[command(name = "aba-travel", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Interface language code (en, ka, ru, de, fr, es, zh, ja).
    #[arg(long = "lang")]
    pub lang: Option<String>,

    /// Latitude reported as the current position.
    #[arg(long = "lat", requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude reported as the current position.
    #[arg(long = "lng", requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Deny location access for this run.
    #[arg(long = "no-location")]
    pub no_location: bool,

    /// Disable spoken answers.
    #[arg(long = "no-voice")]
    pub no_voice: bool,

    /// Directory transcripts are written to.
    #[arg(short = 'o', long = "export-dir")]
    pub export_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > ABA_TRAVEL_CONFIG env var > ~/.aba-travel/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("ABA_TRAVEL_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level. Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    pub fn resolve_language(&self, config_language: Language) -> Result<Language, AbaError> {
        match self.lang {
            Some(ref code) => code.parse(),
            None => Ok(config_language),
        }
    }

    /// Position to report, if any. `--no-location` wins over everything.
    pub fn resolve_position(&self, config: &AbaConfig) -> Option<Coordinates> {
        if self.no_location || !config.location.enabled {
            return None;
        }
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => config.location.fixed_position(),
        }
    }

    pub fn resolve_export_dir(&self, config_dir: &str) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_dir))
    }

    pub fn resolve_voice_enabled(&self, config_enabled: bool) -> bool {
        config_enabled && !self.no_voice
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".aba-travel").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".aba-travel").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("aba-travel").chain(args.iter().copied()))
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let args = parse(&["--config", "/tmp/aba.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/aba.toml"));
    }

    #[test]
    fn test_log_level_override() {
        assert_eq!(parse(&[]).resolve_log_level("info"), "info");
        assert_eq!(parse(&["-l", "debug"]).resolve_log_level("info"), "debug");
    }

    #[test]
    fn test_language_override() {
        let args = parse(&["--lang", "ka"]);
        assert_eq!(
            args.resolve_language(Language::English).unwrap(),
            Language::Georgian
        );
        assert_eq!(
            parse(&[]).resolve_language(Language::Russian).unwrap(),
            Language::Russian
        );
        assert!(parse(&["--lang", "xx"])
            .resolve_language(Language::English)
            .is_err());
    }

    #[test]
    fn test_position_from_flags() {
        let args = parse(&["--lat", "41.7151", "--lng", "44.8271"]);
        assert_eq!(
            args.resolve_position(&AbaConfig::default()),
            Some(Coordinates::new(41.7151, 44.8271))
        );
    }

    #[test]
    fn test_position_negative_values() {
        let args = parse(&["--lat", "-33.5", "--lng", "-70.25"]);
        assert_eq!(
            args.resolve_position(&AbaConfig::default()),
            Some(Coordinates::new(-33.5, -70.25))
        );
    }

    #[test]
    fn test_position_falls_back_to_config() {
        let mut config = AbaConfig::default();
        assert_eq!(parse(&[]).resolve_position(&config), None);

        config.location.latitude = Some(42.0);
        config.location.longitude = Some(43.0);
        assert_eq!(
            parse(&[]).resolve_position(&config),
            Some(Coordinates::new(42.0, 43.0))
        );
        assert_eq!(parse(&["--no-location"]).resolve_position(&config), None);

        config.location.enabled = false;
        assert_eq!(parse(&[]).resolve_position(&config), None);
    }

    #[test]
    fn test_lat_requires_lng() {
        let result = CliArgs::try_parse_from(["aba-travel", "--lat", "41.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_dir_and_voice() {
        let args = parse(&["-o", "/tmp/exports", "--no-voice"]);
        assert_eq!(args.resolve_export_dir("."), PathBuf::from("/tmp/exports"));
        assert!(!args.resolve_voice_enabled(true));
        assert!(parse(&[]).resolve_voice_enabled(true));
        assert!(!parse(&[]).resolve_voice_enabled(false));
    }
}
