use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::export::ExportFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "OutputConfig::default_formats")]
    pub formats: Vec<ExportFormat>,
}

impl OutputConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("fig_out_final")
    }
    fn default_formats() -> Vec<ExportFormat> {
        ExportFormat::ALL.to_vec()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            formats: Self::default_formats(),
        }
    }
}

/// Figure raster size in pixels. Defaults match the print target of
/// 5.8 x 4.8 inches at 300 dpi.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "FigureConfig::default_width_px")]
    pub width_px: u32,
    #[serde(default = "FigureConfig::default_height_px")]
    pub height_px: u32,
}

impl FigureConfig {
    fn default_width_px() -> u32 {
        1740
    }
    fn default_height_px() -> u32 {
        1440
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_px: Self::default_width_px(),
            height_px: Self::default_height_px(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub figure: FigureConfig,
}

impl AppConfig {
    /// Read the TOML config at `path`, falling back to defaults on a parse
    /// or read failure. When the file does not exist, write the defaults
    /// there so the operator has something to edit.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => {
                eprintln!("Failed to serialize default config: {err}");
            }
        }
        default_cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "audiogram_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_when_missing() {
        let path = unique_path("defaults.toml");
        let path_str = path.to_string_lossy().to_string();
        let _ = fs::remove_file(&path);

        let cfg = AppConfig::load_or_default(&path_str);
        assert!(path.exists(), "config file should be created");
        assert_eq!(cfg.output.dir, PathBuf::from("fig_out_final"));
        assert_eq!(cfg.output.formats, ExportFormat::ALL.to_vec());
        assert_eq!(cfg.figure.width_px, 1740);
        assert_eq!(cfg.figure.height_px, 1440);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        let path_str = path.to_string_lossy().to_string();
        let custom = AppConfig {
            output: OutputConfig {
                dir: PathBuf::from("charts"),
                formats: vec![ExportFormat::Png, ExportFormat::Svg],
            },
            figure: FigureConfig {
                width_px: 900,
                height_px: 750,
            },
        };
        fs::write(&path, toml::to_string_pretty(&custom).unwrap()).unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.output.dir, PathBuf::from("charts"));
        assert_eq!(
            cfg.output.formats,
            vec![ExportFormat::Png, ExportFormat::Svg]
        );
        assert_eq!(cfg.figure.width_px, 900);
        assert_eq!(cfg.figure.height_px, 750);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_config_fills_remaining_defaults() {
        let path = unique_path("partial.toml");
        let path_str = path.to_string_lossy().to_string();
        fs::write(&path, "[output]\ndir = \"elsewhere\"\n").unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.output.dir, PathBuf::from("elsewhere"));
        assert_eq!(cfg.output.formats, ExportFormat::ALL.to_vec());
        assert_eq!(cfg.figure.width_px, 1740);

        let _ = fs::remove_file(&path);
    }
}
