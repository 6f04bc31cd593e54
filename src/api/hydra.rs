use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::domain::Tournament;
use crate::errors::ApiError;

const MEMBER: &str = "hydra:member";
const TOTAL_ITEMS: &str = "hydra:totalItems";

/// Collection envelope served by the local API
#[derive(Debug, Clone, Serialize)]
pub struct HydraCollection<T> {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "hydra:totalItems")]
    pub total_items: usize,
    #[serde(rename = "hydra:member")]
    pub member: Vec<T>,
}

impl<T> HydraCollection<T> {
    pub fn new(member: Vec<T>, total_items: usize) -> Self {
        Self {
            kind: "hydra:Collection",
            total_items,
            member,
        }
    }
}

/// One page of upstream tournaments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentPage {
    pub tournaments: Vec<Tournament>,
    /// Collection size when the response carries it
    pub total: Option<u64>,
}

impl TournamentPage {
    /// Accepts a bare array or a Hydra collection. Hydra error objects
    /// become [`ApiError::Hydra`].
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(|_| ApiError::invalid_payload(trimmed))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Array(items) => Ok(Self {
                tournaments: decode_members(items),
                total: None,
            }),
            Value::Object(mut object) => {
                if let Some(members) = object.remove(MEMBER) {
                    let items = match members {
                        Value::Array(items) => items,
                        other => return Err(ApiError::invalid_payload(&other.to_string())),
                    };
                    return Ok(Self {
                        tournaments: decode_members(items),
                        total: object.get(TOTAL_ITEMS).and_then(Value::as_u64),
                    });
                }

                let message = ["hydra:description", "hydra:title"]
                    .iter()
                    .find_map(|key| object.get(*key).and_then(Value::as_str));
                match message {
                    Some(message) => Err(ApiError::Hydra(message.to_string())),
                    None => Err(ApiError::invalid_payload(&Value::Object(object).to_string())),
                }
            }
            other => Err(ApiError::invalid_payload(&other.to_string())),
        }
    }
}

/// Decode members one by one so that a single bad record does not sink the page
fn decode_members(items: Vec<Value>) -> Vec<Tournament> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = item.get("id").cloned();
            match serde_json::from_value::<Tournament>(item) {
                Ok(tournament) => Some(tournament),
                Err(e) => {
                    warn!("Skipping undecodable tournament {:?}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tournament_json(id: i64) -> Value {
        json!({
            "id": id,
            "name": format!("Tournoi {}", id),
            "type": "D",
            "club": {"name": "Club", "identifier": "08751260"},
            "startDate": "2025-11-08T00:00:00",
            "endDate": "2025-11-09T00:00:00",
            "address": {"postalCode": "75015", "addressLocality": "Paris"}
        })
    }

    #[test]
    fn test_bare_array() {
        let body = json!([tournament_json(1), tournament_json(2)]).to_string();

        let page = TournamentPage::from_body(&body).unwrap();

        assert_eq!(page.tournaments.len(), 2);
        assert_eq!(page.total, None);
    }

    #[test]
    fn test_hydra_collection() {
        let body = json!({
            "@type": "hydra:Collection",
            "hydra:member": [tournament_json(1), {"id": 2, "name": 42}],
            "hydra:totalItems": 812
        })
        .to_string();

        let page = TournamentPage::from_body(&body).unwrap();

        assert_eq!(page.tournaments.len(), 1);
        assert_eq!(page.total, Some(812));
    }

    #[test]
    fn test_hydra_errors() {
        let described = json!({"hydra:title": "An error occurred", "hydra:description": "Invalid date"});
        let titled = json!({"hydra:title": "An error occurred"});

        assert!(matches!(
            TournamentPage::from_value(described),
            Err(ApiError::Hydra(m)) if m == "Invalid date"
        ));
        assert!(matches!(
            TournamentPage::from_value(titled),
            Err(ApiError::Hydra(m)) if m == "An error occurred"
        ));
    }

    #[test]
    fn test_unexpected_bodies() {
        assert_eq!(TournamentPage::from_body("  ").unwrap(), TournamentPage::default());
        assert!(matches!(
            TournamentPage::from_body("<html>502</html>"),
            Err(ApiError::InvalidPayload(_))
        ));
        assert!(matches!(
            TournamentPage::from_body(r#"{"foo": 1}"#),
            Err(ApiError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_collection_serialization() {
        let json = serde_json::to_value(HydraCollection::new(vec![1, 2], 10)).unwrap();

        assert_eq!(json["@type"], "hydra:Collection");
        assert_eq!(json["hydra:totalItems"], 10);
        assert_eq!(json["hydra:member"], json!([1, 2]));
    }
}
