//! Static feed: one HTML page per tournament, an index page, an RSS
//! channel and the site map.

pub mod format;
pub mod html;
pub mod rss;
pub mod sitemap;
pub mod templates;
pub mod view;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

use crate::config::settings::SiteSettings;
use crate::domain::Tournament;

pub use view::TournamentView;

/// Site values exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub base_url: String,
    pub name: String,
    pub twitter: String,
    pub email: String,
    pub thumbnail_url: String,
    pub feed_url: String,
    pub rss_url: String,
}

impl SiteView {
    pub fn new(site: &SiteSettings) -> Self {
        Self {
            base_url: site.base_url.trim_end_matches('/').to_string(),
            name: site.site_name.to_string(),
            twitter: site.twitter_handle.to_string(),
            email: site.contact_email.to_string(),
            thumbnail_url: site.thumbnail_url(),
            feed_url: site.url("/feed"),
            rss_url: site.url("/rss.xml"),
        }
    }
}

/// Counts of generated artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedReport {
    pub pages: usize,
    pub rss_items: usize,
    pub sitemap_urls: usize,
}

pub struct FeedGenerator {
    tera: Tera,
    site: SiteSettings,
    output_dir: PathBuf,
}

impl FeedGenerator {
    pub fn new(site: SiteSettings, output_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            tera: templates::load_templates()?,
            site,
            output_dir: output_dir.into(),
        })
    }

    /// Write every feed artifact for `tournaments`, kept in the given order
    pub fn generate(&self, tournaments: &[Tournament], now: NaiveDateTime) -> Result<FeedReport> {
        let site = SiteView::new(&self.site);
        let views: Vec<TournamentView> = tournaments
            .iter()
            .map(|t| TournamentView::new(t, &self.site, now))
            .collect();

        let feed_dir = self.output_dir.join("feed");
        fs::create_dir_all(&feed_dir)
            .with_context(|| format!("Failed to create feed directory {:?}", feed_dir))?;

        let index = html::render_index(&self.tera, &site, &views)?;
        write_file(&feed_dir.join("index.html"), &index)?;
        info!("  → Index generated: /feed/index.html");

        for view in &views {
            let page = html::render_tournament_page(&self.tera, &site, view)?;
            let page_dir = feed_dir.join(view.id.to_string());
            fs::create_dir_all(&page_dir)
                .with_context(|| format!("Failed to create page directory {:?}", page_dir))?;
            write_file(&page_dir.join("index.html"), &page)?;
        }
        info!("  → {} tournament pages generated", views.len());

        let rss = rss::render_rss(&self.tera, &site, &views, now)?;
        write_file(&self.output_dir.join("rss.xml"), &rss)?;
        info!("  → RSS generated with {} items", views.len());

        let entries = sitemap::sitemap_entries(tournaments, &self.site, now);
        let xml = sitemap::render_sitemap(&self.tera, &entries)?;
        write_file(&self.output_dir.join("sitemap.xml"), &xml)?;
        info!("  → Sitemap generated with {} URLs", entries.len());

        Ok(FeedReport {
            pages: views.len(),
            rss_items: views.len(),
            sitemap_urls: entries.len(),
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}
