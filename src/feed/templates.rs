use anyhow::{Context, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

pub const TOURNAMENT_PAGE: &str = "tournament.html";
pub const INDEX_PAGE: &str = "index.html";
pub const RSS_FEED: &str = "rss.xml";
pub const SITEMAP: &str = "sitemap.xml";

/// Templates compiled into the binary
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (TOURNAMENT_PAGE, include_str!("../../templates/tournament.html")),
        (INDEX_PAGE, include_str!("../../templates/index.html")),
        (RSS_FEED, include_str!("../../templates/rss.xml")),
        (SITEMAP, include_str!("../../templates/sitemap.xml")),
    ])
    .context("Failed to compile feed templates")?;

    // XML templates escape explicitly; CDATA sections must stay raw
    tera.autoescape_on(vec![".html"]);
    tera.register_filter("cdata", cdata);
    Ok(tera)
}

/// Makes a string safe inside `<![CDATA[ ]]>`
fn cdata(val: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match val {
        Value::String(s) => Ok(Value::String(s.replace("]]>", "]]]]><![CDATA[>"))),
        Value::Null => Ok(Value::String(String::new())),
        other => Ok(Value::String(other.to_string())),
    }
}
