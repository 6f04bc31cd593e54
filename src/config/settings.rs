use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub tournaments_endpoint: &'static str,
    pub referer: &'static str,
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub items_per_page: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://apiv2.fftt.com/api".to_string(),
            tournaments_endpoint: "/tournament_requests",
            referer: "https://monclub.fftt.com/",
            rate_limit_ms: 500, // 2 req/sec
            user_agent: "TournoisTT/1.0",
            timeout_secs: 30,
            items_per_page: 500,
        }
    }
}

/// Public site identity used by the feed, RSS and sitemap
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: String,
    pub site_name: &'static str,
    pub twitter_handle: &'static str,
    pub contact_email: &'static str,
    pub thumbnail_path: &'static str,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://tournois-tt.fr".to_string(),
            site_name: "Carte des Tournois FFTT",
            twitter_handle: "@tournoistt",
            contact_email: "noreply@tournois-tt.fr",
            thumbnail_path: "/thumbnail.png",
        }
    }
}

impl SiteSettings {
    /// Absolute URL for a site path; `path` starts with `/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn tournament_url(&self, id: i64) -> String {
        self.url(&format!("/feed/{}", id))
    }

    pub fn thumbnail_url(&self) -> String {
        self.url(self.thumbnail_path)
    }
}

#[derive(Debug, Clone)]
pub struct PathSettings {
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            output_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub site: SiteSettings,
    pub paths: PathSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            site: SiteSettings::default(),
            paths: PathSettings::default(),
        }
    }

    /// Defaults overridden by `TOURNOIS_API_BASE_URL`, `SITE_URL`,
    /// `OUTPUT_DIR` and `CACHE_DIR` when set and non-empty
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::new();

        if let Some(url) = get("TOURNOIS_API_BASE_URL") {
            config.api.base_url = url;
        }
        if let Some(url) = get("SITE_URL") {
            config.site.base_url = url;
        }
        if let Some(dir) = get("OUTPUT_DIR") {
            config.paths.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("CACHE_DIR") {
            config.paths.cache_dir = PathBuf::from(dir);
        }

        config
    }
}
