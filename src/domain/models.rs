use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::serde_date;

/// Tournament record as published by the federation API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub tournament_type: TournamentType,
    pub club: Club,
    #[serde(with = "serde_date")]
    pub start_date: NaiveDateTime,
    #[serde(with = "serde_date")]
    pub end_date: NaiveDateTime,
    pub address: Address,
    #[serde(default)]
    pub endowment: Option<i64>, // in cents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Rules>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl Tournament {
    /// Coordinates when both are present and non-zero
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.address.latitude.filter(|v| v.is_finite() && *v != 0.0)?;
        let lon = self.address.longitude.filter(|v| v.is_finite() && *v != 0.0)?;
        Some((lat, lon))
    }

    /// Total prize money in whole euros, floored.
    ///
    /// The direct endowment wins when positive, otherwise the per-table
    /// endowments are summed. `None` and `0` both mean "no endowment".
    pub fn endowment_euros(&self) -> i64 {
        self.endowment_cents().div_euclid(100)
    }

    /// Same as [`Tournament::endowment_euros`] but rounded up
    pub fn endowment_euros_ceil(&self) -> i64 {
        let cents = self.endowment_cents();
        cents.div_euclid(100) + i64::from(cents.rem_euclid(100) > 0)
    }

    pub fn endowment_cents(&self) -> i64 {
        match self.endowment {
            Some(cents) if cents > 0 => cents,
            _ => self
                .tables
                .iter()
                .map(|table| table.endowment.unwrap_or(0))
                .sum::<i64>()
                .max(0),
        }
    }

    /// Rules document URL, ignoring empty strings
    pub fn rules_url(&self) -> Option<&str> {
        self.rules
            .as_ref()
            .and_then(|rules| rules.url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn is_single_day(&self) -> bool {
        self.start_date.date() == self.end_date.date()
    }

    pub fn type_label(&self) -> &str {
        self.tournament_type.label()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub name: String,
    /// Federation identifier, e.g. "08940975"
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub street_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_locality: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disambiguating_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub url: Option<String>,
}

/// Per-table sub-event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fee: Option<i64>, // in cents
    #[serde(default)]
    pub endowment: Option<i64>, // in cents
}

/// Federation tournament category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TournamentType {
    International,
    NationalA,
    NationalB,
    Regional,
    Departmental,
    Promotional,
    Other(String),
}

impl TournamentType {
    pub fn code(&self) -> &str {
        match self {
            TournamentType::International => "I",
            TournamentType::NationalA => "A",
            TournamentType::NationalB => "B",
            TournamentType::Regional => "R",
            TournamentType::Departmental => "D",
            TournamentType::Promotional => "P",
            TournamentType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TournamentType::International => "International",
            TournamentType::NationalA => "National A",
            TournamentType::NationalB => "National B",
            TournamentType::Regional => "Régional",
            TournamentType::Departmental => "Départemental",
            TournamentType::Promotional => "Promotionnel",
            TournamentType::Other(raw) => raw,
        }
    }
}

impl From<String> for TournamentType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "I" | "International" => TournamentType::International,
            "A" | "National A" => TournamentType::NationalA,
            "B" | "National B" => TournamentType::NationalB,
            "R" | "Régional" => TournamentType::Regional,
            "D" | "Départemental" => TournamentType::Departmental,
            "P" | "Promotionnel" => TournamentType::Promotional,
            _ => TournamentType::Other(raw),
        }
    }
}

impl From<TournamentType> for String {
    fn from(value: TournamentType) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
