use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::StylesheetSource;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Serializes `document.styleSheets` into the stylesheet model. Sheets whose
/// rule list throws (cross-origin) come back as inaccessible entries rather
/// than aborting the snapshot.
const STYLESHEET_SNAPSHOT_JS: &str = r#"
(() => {
    const sheets = [];
    for (const sheet of Array.from(document.styleSheets)) {
        const source = { href: sheet.href || null };
        let rules;
        try {
            rules = Array.from(sheet.cssRules);
        } catch (e) {
            source.access = { status: 'inaccessible' };
            sheets.push(source);
            continue;
        }
        const top = [];
        for (const rule of rules) {
            if (rule instanceof CSSMediaRule) {
                const nested = [];
                for (const inner of Array.from(rule.cssRules)) {
                    if (inner instanceof CSSStyleRule) {
                        const properties = {};
                        for (const name of Array.from(inner.style)) {
                            properties[name] = inner.style.getPropertyValue(name);
                        }
                        nested.push({ selector: inner.selectorText, properties });
                    }
                }
                top.push({
                    kind: 'media',
                    condition: rule.conditionText || rule.media.mediaText,
                    rules: nested
                });
            } else if (rule instanceof CSSStyleRule) {
                const properties = {};
                for (const name of Array.from(rule.style)) {
                    properties[name] = rule.style.getPropertyValue(name);
                }
                top.push({ kind: 'style', selector: rule.selectorText, properties });
            } else {
                top.push({ kind: 'other' });
            }
        }
        source.access = { status: 'accessible', rules: top };
        sheets.push(source);
    }
    return sheets;
})()
"#;

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    config: Config,
}

impl BrowserSession {
    pub async fn launch(config: Config) -> Result<Self> {
        let browser_config = BrowserConfig::builder()
            .chrome_executable(&config.chrome_path)
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--hide-scrollbars")
            .arg("--metrics-recording-only")
            .arg("--mute-audio")
            .arg("--no-first-run")
            .arg("--ignore-certificate-errors")
            .window_size(1920, 1080)
            .build()
            .map_err(|e| AppError::BrowserError(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| AppError::BrowserError(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        info!("Browser launched");
        Ok(Self {
            browser,
            handler,
            config,
        })
    }

    pub async fn navigate(&self, url: &str, timeout_secs: Option<u64>) -> Result<Page> {
        let timeout = Duration::from_secs(
            timeout_secs
                .unwrap_or(self.config.request_timeout)
                .min(self.config.max_timeout),
        );

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::BrowserError(e.to_string()))?;

        page.set_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        ).await.map_err(|e| AppError::BrowserError(e.to_string()))?;

        tokio::time::timeout(timeout, async {
            page.goto(url)
                .await
                .map_err(|e| AppError::BrowserError(format!("Navigation failed: {}", e)))?;

            page.evaluate("document.readyState")
                .await
                .map_err(|e| AppError::BrowserError(format!("Ready state check failed: {}", e)))?;

            Ok::<(), AppError>(())
        })
        .await
        .map_err(|_| AppError::Timeout(timeout.as_secs()))??;

        // Late-injected styles (webfont loaders, CSS-in-JS) need a beat to land.
        tokio::time::sleep(Duration::from_millis(1000)).await;

        Ok(page)
    }

    pub async fn snapshot_stylesheets(&self, page: &Page) -> Result<Vec<StylesheetSource>> {
        let evaluation = page
            .evaluate(STYLESHEET_SNAPSHOT_JS)
            .await
            .map_err(|e| AppError::ExtractionError(format!("Stylesheet snapshot failed: {}", e)))?;

        evaluation
            .into_value()
            .map_err(|e| AppError::ExtractionError(format!("Malformed stylesheet snapshot: {}", e)))
    }

    /// Tears the browser down. Callers must reach this on every exit path so
    /// no Chromium process outlives the run.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            debug!("Browser close failed: {}", err);
        }
        self.handler.abort();
    }
}
