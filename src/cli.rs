use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "media-query-analyzer",
    about = "Extract @media rules from a rendered page and score its responsive complexity",
    version
)]
pub struct Cli {
    /// The page to analyze (absolute http/https URL)
    #[arg(value_parser = parse_target_url)]
    pub url: Url,

    /// Keep only rules with a property name loosely matching this substring
    #[arg(long)]
    pub property: Option<String>,

    /// Keep only rules whose selector text contains this substring
    #[arg(long)]
    pub selector: Option<String>,

    /// JSON output path (default: <OUTPUT_DIR>/<YYYY-MM-DD>/<host>-media-queries.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Bypass the cache read; the result is still cached on success
    #[arg(long)]
    pub force: bool,

    /// Navigation timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

fn parse_target_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {}", e))?;

    if !["http", "https"].contains(&url.scheme()) {
        return Err(format!(
            "invalid scheme '{}': only http and https are supported",
            url.scheme()
        ));
    }

    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_absolute_http_urls() {
        let url = parse_target_url("https://example.com/pricing").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(parse_target_url("example.com/pricing").is_err());
        assert!(parse_target_url("ftp://example.com").is_err());
        assert!(parse_target_url("data:text/html,hi").is_err());
    }
}
