//! 組み込みサンプルエントリ
//!
//! 起動直後のカタログを空にしないための固定データ。画像はリモートURL参照。

use texture_scan_common::{
    CategoryProperty, ColorAnalysis, ImageRef, MaterialAnalysis, Product, ScaledProperty,
    SkinContact, TactileData, TextureProperties, WearableProperties, WeatherRecommendations,
    WeatherSuitability,
};

fn scaled(value: f64, description: &str) -> ScaledProperty {
    ScaledProperty { value, description: description.into() }
}

fn weather(suitable: bool, description: &str) -> WeatherSuitability {
    WeatherSuitability { suitable, description: description.into() }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn cotton_jersey() -> Product {
    Product {
        id: "seed-cotton-jersey".into(),
        scan_id: "20250114-101502-3f9a1c2e".into(),
        label: "cotton-jersey".into(),
        image: ImageRef::Url("https://images.unsplash.com/photo-1521572163474-6864f9cf17ab".into()),
        material_analysis: MaterialAnalysis {
            material_type: "Cotton Jersey".into(),
            confidence: "high".into(),
            texture_properties: TextureProperties {
                smoothness: scaled(7.0, "Soft knit face with a fine, even loop structure"),
                roughness: scaled(2.0, "Barely perceptible surface texture"),
                stretchiness: scaled(6.0, "Moderate crosswise stretch typical of single knit"),
                thickness: CategoryProperty { value: "thin".into(), description: "Lightweight t-shirt weight".into() },
            },
            wearable_properties: WearableProperties {
                skin_contact: SkinContact { recommended: true, description: "Comfortable directly against skin".into() },
                breathability: scaled(8.0, "Open knit allows good airflow"),
                moisture_wicking: scaled(4.0, "Absorbs moisture but dries slowly"),
                insulation: scaled(3.0, "Minimal warmth on its own"),
            },
            weather_recommendations: WeatherRecommendations {
                cool_weather: weather(false, "Needs layering when cool"),
                warm_weather: weather(true, "Light and breathable"),
                indoor: weather(true, "Everyday indoor wear"),
            },
            key_characteristics: strings(&["Soft hand feel", "Natural fiber", "Casual drape"]),
            ideal_usage_scenarios: strings(&["T-shirts", "Loungewear", "Base layers in mild weather"]),
            color_analysis: ColorAnalysis {
                true_color: "Heather grey".into(),
                color_consistency: "Consistent across lighting conditions".into(),
            },
            tactile_data: Some(TactileData { roughness: 0.2, stiffness: 0.1 }),
        },
    }
}

fn merino_knit() -> Product {
    Product {
        id: "seed-merino-wool-knit".into(),
        scan_id: "20250114-103318-b72d04f1".into(),
        label: "merino-wool-knit".into(),
        image: ImageRef::Url("https://images.unsplash.com/photo-1576566588028-4147f3842f27".into()),
        material_analysis: MaterialAnalysis {
            material_type: "Merino Wool Knit".into(),
            confidence: "medium".into(),
            texture_properties: TextureProperties {
                smoothness: scaled(6.0, "Fine fibers give a relatively smooth face"),
                roughness: scaled(3.0, "Slight fuzz from the wool fibers"),
                stretchiness: scaled(5.0, "Knit construction gives natural recovery"),
                thickness: CategoryProperty { value: "medium".into(), description: "Mid-weight sweater knit".into() },
            },
            wearable_properties: WearableProperties {
                skin_contact: SkinContact { recommended: true, description: "Fine merino rarely itches".into() },
                breathability: scaled(7.0, "Breathes well for a wool"),
                moisture_wicking: scaled(8.0, "Moves vapour away from skin"),
                insulation: scaled(8.0, "Warm even when damp"),
            },
            weather_recommendations: WeatherRecommendations {
                cool_weather: weather(true, "Excellent warmth for its weight"),
                warm_weather: weather(false, "Too warm for hot days"),
                indoor: weather(true, "Comfortable in heated rooms"),
            },
            key_characteristics: strings(&["Temperature regulating", "Odour resistant", "Fine gauge knit"]),
            ideal_usage_scenarios: strings(&["Sweaters", "Hiking base layers", "Travel wear"]),
            color_analysis: ColorAnalysis {
                true_color: "Navy".into(),
                color_consistency: "Appears darker under warm light".into(),
            },
            tactile_data: None,
        },
    }
}

fn polyester_fleece() -> Product {
    Product {
        id: "seed-polyester-fleece".into(),
        scan_id: "20250114-110745-0c5e8d93".into(),
        label: "polyester-fleece".into(),
        image: ImageRef::Url("https://images.unsplash.com/photo-1591047139829-d91aecb6caea".into()),
        material_analysis: MaterialAnalysis {
            material_type: "Polyester Fleece".into(),
            confidence: "high".into(),
            texture_properties: TextureProperties {
                smoothness: scaled(5.0, "Brushed pile feels soft but uneven"),
                roughness: scaled(4.0, "Pilling visible on the face"),
                stretchiness: scaled(3.0, "Limited stretch"),
                thickness: CategoryProperty { value: "thick".into(), description: "Lofty pile adds bulk".into() },
            },
            wearable_properties: WearableProperties {
                skin_contact: SkinContact { recommended: false, description: "Can feel clammy against bare skin".into() },
                breathability: scaled(5.0, "Air passes through the pile"),
                moisture_wicking: scaled(6.0, "Synthetic fibers shed moisture"),
                insulation: scaled(9.0, "Traps a lot of warm air"),
            },
            weather_recommendations: WeatherRecommendations {
                cool_weather: weather(true, "Great mid layer"),
                warm_weather: weather(false, "Overheats quickly"),
                indoor: weather(true, "Cosy for cold rooms"),
            },
            key_characteristics: strings(&["High loft", "Quick drying", "Synthetic"]),
            ideal_usage_scenarios: strings(&["Mid layers", "Blankets", "Outdoor jackets"]),
            color_analysis: ColorAnalysis {
                true_color: "Forest green".into(),
                color_consistency: "Shifts slightly toward olive in candlelight".into(),
            },
            tactile_data: Some(TactileData { roughness: 0.4, stiffness: 0.25 }),
        },
    }
}

/// 初期カタログ（この順で並ぶ）
pub fn seed_products() -> Vec<Product> {
    vec![cotton_jersey(), merino_knit(), polyester_fleece()]
}
