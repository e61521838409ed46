use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::AnalysisReport;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use url::Url;

pub struct StorageService {
    output_root: PathBuf,
}

impl StorageService {
    pub fn new(config: &Config) -> Self {
        Self {
            output_root: config.output_dir.clone(),
        }
    }

    /// `<OUTPUT_DIR>/<YYYY-MM-DD>/<host-slug>-media-queries.json`
    pub fn default_output_path(&self, url: &Url) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.output_root
            .join(date)
            .join(format!("{}-media-queries.json", host_slug(url)))
    }

    pub async fn write_report(&self, path: &Path, report: &AnalysisReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| AppError::OutputError(format!("Failed to serialize report: {}", e)))?;
        self.write_file(path, &json).await
    }

    pub async fn write_markdown(&self, path: &Path, markdown: &str) -> Result<()> {
        self.write_file(path, markdown).await
    }

    async fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::OutputError(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(path, contents)
            .await
            .map_err(|e| AppError::OutputError(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Filesystem-safe rendition of the URL host: non-alphanumerics become dashes.
pub fn host_slug(url: &Url) -> String {
    url.host_str()
        .unwrap_or("unknown")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn host_slug_replaces_separators() {
        let url = Url::parse("https://www.example.co.uk/pricing?plan=a").unwrap();
        assert_eq!(host_slug(&url), "www-example-co-uk");
    }

    #[test]
    fn default_output_path_is_dated_and_host_scoped() {
        let config = Config {
            output_dir: PathBuf::from("analysis/media-queries"),
            ..Config::default()
        };
        let storage = StorageService::new(&config);
        let url = Url::parse("https://example.com").unwrap();

        let path = storage.default_output_path(&url);
        let rendered = path.to_string_lossy();

        assert!(rendered.starts_with("analysis/media-queries/"));
        assert!(rendered.ends_with("example-com-media-queries.json"));
        assert_eq!(
            path.parent().unwrap().file_name().unwrap().to_string_lossy(),
            Utc::now().format("%Y-%m-%d").to_string()
        );
    }
}
