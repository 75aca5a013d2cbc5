use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::errors::AppError;
use crate::layout::font_metrics::{a4_page_config, PageConfig};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparsable numbers fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub page_margin_pt: f32,
    pub font_size_pt: f32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            output_dir: PathBuf::from(env_or("CV_OUTPUT_DIR", ".")),
            page_margin_pt: parse_points("CV_PAGE_MARGIN_PT", "50")
                .context("Invalid page margin")?,
            font_size_pt: parse_points("CV_FONT_SIZE_PT", "11").context("Invalid font size")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn page_config(&self) -> PageConfig {
        a4_page_config(self.page_margin_pt, self.font_size_pt)
    }

    /// `explicit` when given, otherwise `default_name` inside the output dir.
    pub fn output_path(&self, explicit: Option<PathBuf>, default_name: &str) -> PathBuf {
        explicit.unwrap_or_else(|| self.output_dir.join(default_name))
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_points(key: &str, default: &str) -> Result<f32, AppError> {
    let raw = env_or(key, default);
    let value = raw
        .trim()
        .parse::<f32>()
        .map_err(|_| AppError::Config(format!("{key} must be a number of points, got '{raw}'")))?;
    if value <= 0.0 {
        return Err(AppError::Config(format!("{key} must be positive, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points_reads_env() {
        std::env::set_var("CV_TEST_POINTS_OK", " 36 ");
        assert_eq!(parse_points("CV_TEST_POINTS_OK", "50").unwrap(), 36.0);
        std::env::remove_var("CV_TEST_POINTS_OK");
    }

    #[test]
    fn test_parse_points_default() {
        assert_eq!(parse_points("CV_TEST_POINTS_UNSET", "11").unwrap(), 11.0);
    }

    #[test]
    fn test_parse_points_rejects_garbage() {
        std::env::set_var("CV_TEST_POINTS_BAD", "wide");
        let err = parse_points("CV_TEST_POINTS_BAD", "50").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("CV_TEST_POINTS_BAD"));
        std::env::set_var("CV_TEST_POINTS_BAD", "-3");
        assert!(matches!(
            parse_points("CV_TEST_POINTS_BAD", "50"),
            Err(AppError::Config(msg)) if msg.contains("positive")
        ));
        std::env::remove_var("CV_TEST_POINTS_BAD");
    }

    #[test]
    fn test_output_path() {
        let config = Config {
            output_dir: PathBuf::from("out"),
            page_margin_pt: 50.0,
            font_size_pt: 11.0,
            rust_log: "info".to_string(),
        };
        assert_eq!(config.output_path(None, "cv.pdf"), PathBuf::from("out/cv.pdf"));
        assert_eq!(
            config.output_path(Some(PathBuf::from("x.pdf")), "cv.pdf"),
            PathBuf::from("x.pdf")
        );
        assert_eq!(config.page_config().margin_pt, 50.0);
    }
}
