use serde::Serialize;

use super::datasets::{COUNT_FIELD, CURRENT_DATASET, PAST_CURRENT_DATASET, PAST_DATASET};
use crate::season::SeasonWindows;

const TEXT_LABEL_SIZE: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Columns {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisConfig {
    pub radius: u32,
    pub fixed_radius: bool,
    pub opacity: f64,
    pub outline: bool,
    pub filled: bool,
    pub radius_range: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    pub field: LabelField,
    pub size: u32,
    pub color: [u8; 3],
    pub offset: [i32; 2],
    pub anchor: String,
    pub alignment: String,
    pub background: bool,
    pub background_color: [f64; 4],
    pub outline_width: u32,
    pub outline_color: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    pub data_id: String,
    pub label: String,
    pub color: [u8; 3],
    pub columns: Columns,
    pub is_visible: bool,
    pub vis_config: VisConfig,
    pub text_label: TextLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualChannels {
    pub color_field: Option<String>,
    pub color_scale: String,
    pub size_scale: String,
    pub stroke_color_field: Option<String>,
    pub stroke_color_scale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub config: LayerConfig,
    pub visual_channels: VisualChannels,
}

impl Layer {
    /// Point layer over one dataset, labelled with the group size
    pub fn point(dataset: &str, color: [u8; 3], label: String, radius: u32) -> Self {
        Self {
            id: dataset.to_string(),
            layer_type: "point".to_string(),
            config: LayerConfig {
                data_id: dataset.to_string(),
                label,
                color,
                columns: Columns {
                    lat: "latitude".to_string(),
                    lng: "longitude".to_string(),
                },
                is_visible: true,
                vis_config: VisConfig {
                    radius,
                    fixed_radius: false,
                    opacity: 0.8,
                    outline: false,
                    filled: true,
                    radius_range: [20, 30],
                },
                text_label: TextLabel {
                    field: LabelField {
                        name: COUNT_FIELD.to_string(),
                        field_type: "string".to_string(),
                    },
                    size: TEXT_LABEL_SIZE,
                    color: [255, 255, 255],
                    offset: [0, 0],
                    anchor: "middle".to_string(),
                    alignment: "center".to_string(),
                    background: true,
                    background_color: [0.0, 0.0, 0.0, 0.5],
                    outline_width: 0,
                    outline_color: [0.0, 0.0, 0.0, 0.5],
                },
            },
            visual_channels: VisualChannels {
                color_field: None,
                color_scale: "quantile".to_string(),
                size_scale: "linear".to_string(),
                stroke_color_field: None,
                stroke_color_scale: "quantile".to_string(),
            },
        }
    }
}

pub fn map_layers(windows: &SeasonWindows) -> Vec<Layer> {
    let current = windows.current_label();

    vec![
        Layer::point(
            CURRENT_DATASET,
            [31, 186, 214],
            format!("Saison en cours - tournoi à venir ({})", current),
            24,
        ),
        Layer::point(
            PAST_CURRENT_DATASET,
            [0, 0, 139],
            format!("Saison en cours - tournoi terminé ({})", current),
            22,
        ),
        Layer::point(
            PAST_DATASET,
            [155, 89, 182],
            format!("Saison précédente ({})", windows.previous_label()),
            26,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_layer_labels_follow_season() {
        let windows = SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );

        let layers = map_layers(&windows);

        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].config.label, "Saison en cours - tournoi à venir (2024-2025)");
        assert_eq!(layers[2].config.label, "Saison précédente (2023-2024)");
        assert_eq!(layers[1].config.vis_config.radius, 22);
    }

    #[test]
    fn test_layer_serialization() {
        let windows = SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        let json = serde_json::to_value(&map_layers(&windows)[0]).unwrap();

        assert_eq!(json["type"], "point");
        assert_eq!(json["config"]["dataId"], "current_tournaments");
        assert_eq!(json["config"]["textLabel"]["field"]["name"], "count");
        assert_eq!(json["visualChannels"]["colorField"], serde_json::Value::Null);
    }
}
