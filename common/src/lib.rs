//! Texture Scan Common Library
//!
//! 推論サービスとの契約（型・スキーマ・指示文・パーサー）をI/Oなしでまとめる

pub mod types;
pub mod schema;
pub mod prompts;
pub mod parser;
pub mod slug;
pub mod error;

pub use types::{
    CategoryProperty, ColorAnalysis, ImageRef, MaterialAnalysis, Product, ScaledProperty,
    SkinContact, TactileData, TextureProperties, WearableProperties, WeatherRecommendations,
    WeatherSuitability,
};
pub use schema::material_analysis_schema;
pub use prompts::{build_analysis_prompt, ANALYSIS_INSTRUCTION};
pub use parser::{extract_json_object, parse_material_analysis};
pub use slug::slugify;
pub use error::{Error, Result};
