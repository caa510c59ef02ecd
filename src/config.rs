//! Site configuration loaded from YAML.
//!
//! The file describes one news page and the CSS selectors used to scrape
//! it. Article selectors are evaluated against the whole page, one per
//! [`Mode`]; the time/text/href selectors are relative to each article.
//!
//! ```yaml
//! site: https://www.example.com
//! page: /news/
//! article:
//!   all: div.article_news_list
//!   main: div.article_news_bold
//! time: div.article_time
//! text: div.article_header a
//! href: div.article_header a
//! cache_ttl_secs: 300
//! ```
//!
//! Every tuning knob is optional. With no file at all, [`AppConfig::default`]
//! describes the same example site.

use crate::models::{Mode, SiteConfig};
use crate::outputs::chunks::{HARD_LIMIT, SOFT_LIMIT};
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

fn default_ttl_secs() -> u64 {
    300
}

fn default_soft_limit() -> usize {
    SOFT_LIMIT
}

fn default_hard_limit() -> usize {
    HARD_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_link_label() -> String {
    "[ Read article ]".to_string()
}

/// Article container selectors, one per mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleSelectors {
    pub all: String,
    pub main: String,
}

/// Application configuration as read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Site root, e.g. `https://www.example.com`.
    pub site: String,
    /// Path of the listing page, e.g. `/news/`.
    pub page: String,
    pub article: ArticleSelectors,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub href: String,
    /// How long a scrape result is served from cache.
    #[serde(default = "default_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_soft_limit")]
    pub soft_limit: usize,
    #[serde(default = "default_hard_limit")]
    pub hard_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Anchor text shown for every article link.
    #[serde(default = "default_link_label")]
    pub link_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: "https://www.example.com".to_string(),
            page: "/news/".to_string(),
            article: ArticleSelectors {
                all: "div.article_news_list".to_string(),
                main: "div.article_news_bold".to_string(),
            },
            time: "div.article_time".to_string(),
            text: "div.article_header a".to_string(),
            href: "div.article_header a".to_string(),
            cache_ttl_secs: default_ttl_secs(),
            soft_limit: default_soft_limit(),
            hard_limit: default_hard_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            link_label: default_link_label(),
        }
    }
}

impl AppConfig {
    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or the built-in defaults if `None`.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(path).await.map_err(|e| {
                    format!("failed to read config file {}: {}", path, e)
                })?;
                let config = Self::from_yaml(&yaml)?;
                info!(path, site = %config.site, "Loaded configuration");
                Ok(config)
            }
            None => {
                info!("No config file given; using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let site = Url::parse(&self.site).map_err(|e| format!("invalid site URL {:?}: {}", self.site, e))?;
        if !matches!(site.scheme(), "http" | "https") {
            return Err(format!("site URL must be http or https, got {:?}", self.site).into());
        }
        if self.article.all.trim().is_empty() || self.article.main.trim().is_empty() {
            return Err("article selectors for both modes must be non-empty".into());
        }
        if self.soft_limit == 0 || self.soft_limit > self.hard_limit {
            return Err(format!(
                "soft_limit ({}) must be positive and not exceed hard_limit ({})",
                self.soft_limit, self.hard_limit
            )
            .into());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be positive".into());
        }
        Ok(())
    }

    /// Build the site description used by the extractor for `mode`.
    pub fn site_config(&self, mode: Mode) -> SiteConfig {
        let article_selector = match mode {
            Mode::All => &self.article.all,
            Mode::Main => &self.article.main,
        };
        SiteConfig {
            base_url: self.site.clone(),
            page_path: self.page.clone(),
            article_selector: article_selector.clone(),
            time_selector: self.time.clone(),
            text_selector: self.text.clone(),
            href_selector: self.href.clone(),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
site: https://news.example.org
page: /latest/
article:
  all: li.story
  main: li.story.top
time: time
text: h2 a
href: h2 a
"#;

    #[test]
    fn test_from_yaml_applies_defaults() {
        let config = AppConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.site, "https://news.example.org");
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.soft_limit, 3900);
        assert_eq!(config.hard_limit, 4000);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.link_label, "[ Read article ]");
    }

    #[test]
    fn test_site_config_per_mode() {
        let config = AppConfig::from_yaml(YAML).unwrap();
        let all = config.site_config(Mode::All);
        let main = config.site_config(Mode::Main);

        assert_eq!(all.article_selector, "li.story");
        assert_eq!(main.article_selector, "li.story.top");
        assert_eq!(all.page_url(), "https://news.example.org/latest/");
        assert_eq!(main.text_selector, "h2 a");
    }

    #[test]
    fn test_slash_terminated_site_is_kept_verbatim() {
        let yaml = "site: https://www.example.com/\npage: news/\narticle:\n  all: div\n  main: div.top\n";
        let site = AppConfig::from_yaml(yaml).unwrap().site_config(Mode::All);

        assert_eq!(site.base_url, "https://www.example.com/");
        assert_eq!(site.page_url(), "https://www.example.com/news/");
        assert_eq!(
            crate::scrapers::selectors::absolutize_href(&site.base_url, "news/1"),
            "https://www.example.com/news/1"
        );
    }

    #[test]
    fn test_optional_field_selectors_default_empty() {
        let yaml = "site: https://a.com\npage: /\narticle:\n  all: div\n  main: div.top\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.time, "");
        assert_eq!(config.site_config(Mode::Main).href_selector, "");
    }

    #[test]
    fn test_rejects_invalid_site() {
        let yaml = YAML.replace("https://news.example.org", "not a url");
        assert!(AppConfig::from_yaml(&yaml).is_err());
        let yaml = YAML.replace("https://news.example.org", "ftp://news.example.org");
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_rejects_inconsistent_limits() {
        let yaml = format!("{}soft_limit: 5000\nhard_limit: 4000\n", YAML);
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_rejects_empty_article_selector() {
        let yaml = YAML.replace("main: li.story.top", "main: \"\"");
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let yaml = format!("{}colour: blue\n", YAML);
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = AppConfig::load(None).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_load_missing_file_errors() {
        assert!(AppConfig::load(Some("/nonexistent/news_digest.yaml")).await.is_err());
    }
}
