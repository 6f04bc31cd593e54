use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use urlencoding::encode;

use crate::domain::{format_date, parse_date, Tournament};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters and paging for the tournament collection endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentQuery {
    pub page: Option<usize>,
    pub items_per_page: Option<u32>,
    pub order: Option<SortOrder>,
    pub start_after: Option<NaiveDateTime>,
    pub start_before: Option<NaiveDateTime>,
    pub end_after: Option<NaiveDateTime>,
    pub end_before: Option<NaiveDateTime>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
}

impl TournamentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn items_per_page(mut self, count: u32) -> Self {
        self.items_per_page = Some(count);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn start_after(mut self, date: NaiveDateTime) -> Self {
        self.start_after = Some(date);
        self
    }

    pub fn start_before(mut self, date: NaiveDateTime) -> Self {
        self.start_before = Some(date);
        self
    }

    pub fn end_after(mut self, date: NaiveDateTime) -> Self {
        self.end_after = Some(date);
        self
    }

    pub fn end_before(mut self, date: NaiveDateTime) -> Self {
        self.end_before = Some(date);
        self
    }

    pub fn postal_code(mut self, postal_code: &str) -> Self {
        self.postal_code = Some(postal_code.to_string());
        self
    }

    pub fn locality(mut self, locality: &str) -> Self {
        self.locality = Some(locality.to_string());
        self
    }

    /// Query parameters in their wire spelling
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(count) = self.items_per_page {
            pairs.push(("itemsPerPage", count.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order[startDate]", order.as_str().to_string()));
        }

        let dates = [
            ("startDate[after]", &self.start_after),
            ("startDate[before]", &self.start_before),
            ("endDate[after]", &self.end_after),
            ("endDate[before]", &self.end_before),
        ];
        for (key, date) in dates {
            if let Some(date) = date {
                pairs.push((key, format_date(date)));
            }
        }

        if let Some(postal_code) = &self.postal_code {
            pairs.push(("address.postalCode", postal_code.clone()));
        }
        if let Some(locality) = &self.locality {
            pairs.push(("address.addressLocality", locality.clone()));
        }

        pairs
    }

    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn url(&self, endpoint: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query)
        }
    }

    /// Parse already-decoded query parameters. Unknown keys are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut query = Self::new();

        for (key, value) in pairs {
            match key {
                "page" => query.page = Some(parse_number(key, value)?),
                "itemsPerPage" => query.items_per_page = Some(parse_number(key, value)?),
                "order[startDate]" => {
                    query.order = Some(match value.to_ascii_lowercase().as_str() {
                        "asc" => SortOrder::Asc,
                        "desc" => SortOrder::Desc,
                        other => bail!("Invalid sort order: {}", other),
                    })
                }
                "startDate[after]" => query.start_after = Some(parse_date(value)?),
                "startDate[before]" => query.start_before = Some(parse_date(value)?),
                "endDate[after]" => query.end_after = Some(parse_date(value)?),
                "endDate[before]" => query.end_before = Some(parse_date(value)?),
                "address.postalCode" => query.postal_code = Some(value.to_string()),
                "address.addressLocality" => query.locality = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(query)
    }

    /// Whether `tournament` satisfies every filter (paging excluded).
    /// Date bounds are inclusive.
    pub fn matches(&self, tournament: &Tournament) -> bool {
        let start = tournament.start_date;
        let end = tournament.end_date;

        self.start_after.is_none_or(|d| start >= d)
            && self.start_before.is_none_or(|d| start <= d)
            && self.end_after.is_none_or(|d| end >= d)
            && self.end_before.is_none_or(|d| end <= d)
            && self
                .postal_code
                .as_deref()
                .is_none_or(|code| tournament.address.postal_code == code)
            && self.locality.as_deref().is_none_or(|locality| {
                tournament
                    .address
                    .address_locality
                    .eq_ignore_ascii_case(locality)
            })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    match value.trim().parse() {
        Ok(number) => Ok(number),
        Err(_) => bail!("Invalid value for {}: {}", key, value),
    }
}
