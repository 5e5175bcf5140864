//! 解析結果の型定義
//!
//! CLIとライブラリで共有される型:
//! - MaterialAnalysis: 推論サービス1回分の構造化出力
//! - Product: カタログの1エントリ（識別子・ラベル・画像参照 + 解析結果）
//!
//! フィールド名はサービスのJSON（snake_case）とそのまま一致させる。
//! 必須フィールドには `#[serde(default)]` を付けない: 欠けていればデシリアライズ失敗。

use serde::{Deserialize, Serialize};

/// 0-10スケールの数値評価
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledProperty {
    pub value: f64,
    pub description: String,
}

/// カテゴリ値（thin/medium/thick など）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProperty {
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinContact {
    pub recommended: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSuitability {
    pub suitable: bool,
    pub description: String,
}

/// 質感
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureProperties {
    pub smoothness: ScaledProperty,
    pub roughness: ScaledProperty,
    pub stretchiness: ScaledProperty,
    pub thickness: CategoryProperty,
}

/// 着用特性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableProperties {
    pub skin_contact: SkinContact,
    pub breathability: ScaledProperty,
    pub moisture_wicking: ScaledProperty,
    pub insulation: ScaledProperty,
}

/// 気候別の適性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecommendations {
    pub cool_weather: WeatherSuitability,
    pub warm_weather: WeatherSuitability,
    pub indoor: WeatherSuitability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysis {
    pub true_color: String,
    pub color_consistency: String,
}

/// 触覚データ（0-1正規化、任意）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TactileData {
    pub roughness: f64,
    pub stiffness: f64,
}

/// 素材解析結果
///
/// 受信した値はそのまま保持する（クランプ・補正なし）。
/// 範囲外の値は [`MaterialAnalysis::out_of_range_scores`] で検出できる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAnalysis {
    pub material_type: String,
    pub confidence: String,
    pub texture_properties: TextureProperties,
    pub wearable_properties: WearableProperties,
    pub weather_recommendations: WeatherRecommendations,
    pub key_characteristics: Vec<String>,
    pub ideal_usage_scenarios: Vec<String>,
    pub color_analysis: ColorAnalysis,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactile_data: Option<TactileData>,
}

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

impl MaterialAnalysis {
    /// 0-10スケールの評価値を (フィールドパス, 値) で列挙
    pub fn scores(&self) -> [(&'static str, f64); 6] {
        let t = &self.texture_properties;
        let w = &self.wearable_properties;
        [
            ("texture_properties.smoothness", t.smoothness.value),
            ("texture_properties.roughness", t.roughness.value),
            ("texture_properties.stretchiness", t.stretchiness.value),
            ("wearable_properties.breathability", w.breathability.value),
            ("wearable_properties.moisture_wicking", w.moisture_wicking.value),
            ("wearable_properties.insulation", w.insulation.value),
        ]
    }

    /// 想定範囲外の数値を列挙（0-10評価、触覚データは0-1）
    pub fn out_of_range_scores(&self) -> Vec<(&'static str, f64)> {
        let mut out: Vec<(&'static str, f64)> = self
            .scores()
            .into_iter()
            .filter(|(_, v)| !(SCORE_MIN..=SCORE_MAX).contains(v))
            .collect();

        if let Some(tactile) = &self.tactile_data {
            for (path, v) in [
                ("tactile_data.roughness", tactile.roughness),
                ("tactile_data.stiffness", tactile.stiffness),
            ] {
                if !(0.0..=1.0).contains(&v) {
                    out.push((path, v));
                }
            }
        }

        out
    }
}

/// 画像参照: リモートURLまたはインラインData URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageRef {
    Url(String),
    DataUrl(String),
}

impl ImageRef {
    /// Base64済みデータからData URLを組み立てる
    pub fn inline(mime_type: &str, base64_data: &str) -> Self {
        ImageRef::DataUrl(format!("data:{};base64,{}", mime_type, base64_data))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::Url(s) | ImageRef::DataUrl(s) => s,
        }
    }

    /// Data URLのMIMEタイプ（URLの場合はNone）
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            ImageRef::Url(_) => None,
            ImageRef::DataUrl(s) => s
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .filter(|m| !m.is_empty()),
        }
    }
}

/// カタログエントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// セッション内で一意の不透明ID
    pub id: String,
    /// 人が読めるスキャンID（時刻 + 乱数）
    pub scan_id: String,
    /// material_type から生成したスラッグ
    pub label: String,
    pub image: ImageRef,
    pub material_analysis: MaterialAnalysis,
}
