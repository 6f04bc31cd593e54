use serde::Serialize;
use std::collections::BTreeMap;

use super::datasets::{
    build_datasets, Dataset, ADDRESS_FIELD, CLUB_FIELD, CURRENT_DATASET, DATES_FIELD,
    ENDOWMENT_FIELD, NAME_FIELD, PAST_CURRENT_DATASET, PAST_DATASET, RULES_FIELD, TYPE_FIELD,
};
use super::filters::{map_filters, Filter};
use super::layers::{map_layers, Layer};
use super::rows::FALLBACK_COORDINATES;
use crate::pipeline::SeasonBuckets;
use crate::season::SeasonWindows;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipField {
    pub name: String,
    pub format: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl TooltipField {
    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            format: None,
            field_type: None,
        }
    }

    fn link(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            format: Some(text.to_string()),
            field_type: Some("link".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub enabled: bool,
    pub fields_to_show: BTreeMap<String, Vec<TooltipField>>,
    pub compare_mode: bool,
    pub compare_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionConfig {
    pub tooltip: Tooltip,
    pub brush: Toggle,
    pub coordinate: Toggle,
    pub geocoder: Toggle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisState {
    pub filters: Vec<Filter>,
    pub layers: Vec<Layer>,
    pub interaction_config: InteractionConfig,
    pub layer_blending: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
    pub latitude: f64,
    pub longitude: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub zoom: f64,
    pub drag_rotate: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            latitude: FALLBACK_COORDINATES.0,
            longitude: FALLBACK_COORDINATES.1,
            bearing: 0.0,
            pitch: 0.0,
            zoom: 5.6,
            drag_rotate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub vis_state: VisState,
    pub map_state: MapState,
}

impl MapConfig {
    pub fn new(buckets: &SeasonBuckets, windows: &SeasonWindows) -> Self {
        Self {
            vis_state: VisState {
                filters: map_filters(&buckets.upcoming, windows),
                layers: map_layers(windows),
                interaction_config: InteractionConfig {
                    tooltip: Tooltip {
                        enabled: true,
                        fields_to_show: [CURRENT_DATASET, PAST_CURRENT_DATASET, PAST_DATASET]
                            .into_iter()
                            .map(|id| (id.to_string(), tooltip_fields()))
                            .collect(),
                        compare_mode: false,
                        compare_type: "absolute".to_string(),
                    },
                    brush: Toggle { enabled: false },
                    coordinate: Toggle { enabled: false },
                    geocoder: Toggle { enabled: false },
                },
                layer_blending: "normal".to_string(),
            },
            map_state: MapState::default(),
        }
    }
}

fn tooltip_fields() -> Vec<TooltipField> {
    vec![
        TooltipField::plain(NAME_FIELD),
        TooltipField::plain(TYPE_FIELD),
        TooltipField::plain(CLUB_FIELD),
        TooltipField::plain(ENDOWMENT_FIELD),
        TooltipField::plain(DATES_FIELD),
        TooltipField::link(ADDRESS_FIELD, "Voir sur Google Maps"),
        TooltipField::link(RULES_FIELD, "Voir le règlement"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center_map: bool,
    pub read_only: bool,
}

/// Everything the map view needs in one dispatch: datasets plus config
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPayload {
    pub datasets: Vec<Dataset>,
    pub options: MapOptions,
    pub config: MapConfig,
}

impl MapPayload {
    pub fn build(buckets: &SeasonBuckets, windows: &SeasonWindows) -> Self {
        Self {
            datasets: build_datasets(buckets, windows),
            options: MapOptions {
                center_map: false,
                read_only: false,
            },
            config: MapConfig::new(buckets, windows),
        }
    }

    pub fn dataset(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id() == id)
    }

    pub fn row_count(&self) -> usize {
        self.datasets.iter().map(|d| d.data.rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;
    use chrono::NaiveDate;

    fn windows() -> SeasonWindows {
        SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_payload_shape() {
        let buckets = SeasonBuckets {
            upcoming: vec![TournamentBuilder::new(1).on(2025, 11, 2).build()],
            ..SeasonBuckets::default()
        };

        let payload = MapPayload::build(&buckets, &windows());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["datasets"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["options"]["centerMap"], false);
        assert_eq!(json["config"]["mapState"]["zoom"], 5.6);
        assert_eq!(json["config"]["visState"]["layers"].as_array().map(Vec::len), Some(3));
        assert_eq!(
            json["config"]["visState"]["interactionConfig"]["tooltip"]["fieldsToShow"]
                ["current_tournaments"][5]["format"],
            "Voir sur Google Maps"
        );
        assert_eq!(payload.row_count(), 1);
        assert!(payload.dataset(PAST_DATASET).is_some());
    }
}
