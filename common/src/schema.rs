//! レスポンススキーマ
//!
//! 推論サービスに渡す宣言的スキーマ（OpenAPIサブセット: OBJECT/ARRAY/STRING/NUMBER/BOOLEAN）。
//! 数値範囲やカテゴリは description で示すだけで、サービス側では強制されない。

use serde_json::{json, Value};

fn scaled(description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "value": { "type": "NUMBER", "description": "score on a 0-10 scale" },
            "description": { "type": "STRING", "description": description }
        },
        "required": ["value", "description"],
        "propertyOrdering": ["value", "description"]
    })
}

fn flagged(flag: &str, description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            flag: { "type": "BOOLEAN" },
            "description": { "type": "STRING", "description": description }
        },
        "required": [flag, "description"],
        "propertyOrdering": [flag, "description"]
    })
}

fn short_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description
    })
}

/// MaterialAnalysis と同じ形のスキーマを構築
pub fn material_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "material_type": {
                "type": "STRING",
                "description": "predicted material (e.g. cotton, wool, synthetic)"
            },
            "confidence": { "type": "STRING", "description": "high, medium or low" },
            "texture_properties": {
                "type": "OBJECT",
                "properties": {
                    "smoothness": scaled("short text description"),
                    "roughness": scaled("short text description"),
                    "stretchiness": scaled("short text description"),
                    "thickness": {
                        "type": "OBJECT",
                        "properties": {
                            "value": { "type": "STRING", "description": "thin, medium or thick" },
                            "description": { "type": "STRING" }
                        },
                        "required": ["value", "description"],
                        "propertyOrdering": ["value", "description"]
                    }
                },
                "required": ["smoothness", "roughness", "stretchiness", "thickness"],
                "propertyOrdering": ["smoothness", "roughness", "stretchiness", "thickness"]
            },
            "wearable_properties": {
                "type": "OBJECT",
                "properties": {
                    "skin_contact": flagged("recommended", "should it be worn against skin"),
                    "breathability": scaled("short text description"),
                    "moisture_wicking": scaled("short text description"),
                    "insulation": scaled("short text description")
                },
                "required": ["skin_contact", "breathability", "moisture_wicking", "insulation"],
                "propertyOrdering": ["skin_contact", "breathability", "moisture_wicking", "insulation"]
            },
            "weather_recommendations": {
                "type": "OBJECT",
                "properties": {
                    "cool_weather": flagged("suitable", "short text"),
                    "warm_weather": flagged("suitable", "short text"),
                    "indoor": flagged("suitable", "short text")
                },
                "required": ["cool_weather", "warm_weather", "indoor"],
                "propertyOrdering": ["cool_weather", "warm_weather", "indoor"]
            },
            "key_characteristics": short_list("short bullet points, most relevant first"),
            "ideal_usage_scenarios": short_list("short scenarios, most relevant first"),
            "color_analysis": {
                "type": "OBJECT",
                "properties": {
                    "true_color": { "type": "STRING" },
                    "color_consistency": { "type": "STRING" }
                },
                "required": ["true_color", "color_consistency"],
                "propertyOrdering": ["true_color", "color_consistency"]
            },
            "tactile_data": {
                "type": "OBJECT",
                "properties": {
                    "roughness": { "type": "NUMBER", "description": "normalized to 0-1" },
                    "stiffness": { "type": "NUMBER", "description": "normalized to 0-1" }
                },
                "required": ["roughness", "stiffness"]
            }
        },
        "required": [
            "material_type",
            "confidence",
            "texture_properties",
            "wearable_properties",
            "weather_recommendations",
            "key_characteristics",
            "ideal_usage_scenarios",
            "color_analysis"
        ],
        "propertyOrdering": [
            "material_type",
            "confidence",
            "texture_properties",
            "wearable_properties",
            "weather_recommendations",
            "key_characteristics",
            "ideal_usage_scenarios",
            "color_analysis",
            "tactile_data"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::WOOL_TWILL_JSON;

    /// スキーマの required と実データのキーが一致すること
    fn assert_covers(schema: &Value, data: &Value, path: &str) {
        if let Some(required) = schema["required"].as_array() {
            for key in required {
                let key = key.as_str().unwrap();
                assert!(data.get(key).is_some(), "{}.{} missing in fixture", path, key);
            }
        }
        if let (Some(props), Some(obj)) = (schema["properties"].as_object(), data.as_object()) {
            for (key, value) in obj {
                let child = props
                    .get(key)
                    .unwrap_or_else(|| panic!("{}.{} not declared in schema", path, key));
                assert_covers(child, value, &format!("{}.{}", path, key));
            }
        }
    }

    #[test]
    fn test_schema_matches_record_shape() {
        let schema = material_analysis_schema();
        let data: Value = serde_json::from_str(WOOL_TWILL_JSON).unwrap();
        assert_covers(&schema, &data, "$");
    }

    #[test]
    fn test_schema_node_types() {
        let schema = material_analysis_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["key_characteristics"]["type"], "ARRAY");
        assert_eq!(
            schema["properties"]["texture_properties"]["properties"]["thickness"]["properties"]["value"]["type"],
            "STRING"
        );
        assert_eq!(
            schema["properties"]["wearable_properties"]["properties"]["skin_contact"]["properties"]["recommended"]["type"],
            "BOOLEAN"
        );
        assert_eq!(
            schema["properties"]["wearable_properties"]["properties"]["insulation"]["properties"]["value"]["type"],
            "NUMBER"
        );
    }

    #[test]
    fn test_tactile_data_not_required() {
        let schema = material_analysis_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(!required.contains(&"tactile_data"));
        assert!(required.contains(&"material_type"));
    }
}
