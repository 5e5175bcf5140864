//! プロンプト生成モジュール
//!
//! - ANALYSIS_INSTRUCTION: 素材解析の固定指示文
//! - build_analysis_prompt: オペレータのラベル（任意）を織り込んだ指示文

/// 素材解析の固定指示文
///
/// 出力形式はレスポンススキーマ側で拘束するため、ここでは項目の意味だけを伝える。
pub const ANALYSIS_INSTRUCTION: &str = r#"Analyze the material shown in this photograph and produce a technical material analysis.

Report:
- material_type: the predicted material (e.g. cotton jersey, wool twill, polyester fleece)
- confidence: high, medium or low
- texture_properties: smoothness, roughness and stretchiness on a 0-10 scale, thickness as thin/medium/thick, each with a short description
- wearable_properties: whether skin contact is recommended, plus breathability, moisture_wicking and insulation on a 0-10 scale
- weather_recommendations: suitability for cool_weather, warm_weather and indoor use
- key_characteristics: short bullet points, most relevant first
- ideal_usage_scenarios: short scenarios, most relevant first
- color_analysis: the true color and how consistent it appears
- tactile_data (optional): roughness and stiffness normalized to 0-1

Provide ONLY valid JSON, no markdown formatting or additional text."#;

/// 解析プロンプト生成
///
/// # Arguments
/// * `hint` - オペレータが付けた品目ラベル（例: "winter scarf"）。空白のみは無視
pub fn build_analysis_prompt(hint: Option<&str>) -> String {
    match hint.map(str::trim).filter(|h| !h.is_empty()) {
        Some(label) => format!(
            "Given this image of a \"{}\", predict its material properties.\n\n{}",
            label.replace('"', "'"),
            ANALYSIS_INSTRUCTION
        ),
        None => ANALYSIS_INSTRUCTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_analysis_prompt_without_hint() {
        assert_eq!(build_analysis_prompt(None), ANALYSIS_INSTRUCTION);
        assert_eq!(build_analysis_prompt(Some("   ")), ANALYSIS_INSTRUCTION);
    }

    #[test]
    fn test_build_analysis_prompt_with_hint() {
        let prompt = build_analysis_prompt(Some(" winter scarf "));
        assert!(prompt.starts_with("Given this image of a \"winter scarf\""));
        assert!(prompt.ends_with(ANALYSIS_INSTRUCTION));
    }

    #[test]
    fn test_build_analysis_prompt_escapes_quotes() {
        let prompt = build_analysis_prompt(Some(r#"the "good" coat"#));
        assert!(prompt.contains("\"the 'good' coat\""));
    }

    #[test]
    fn test_instruction_mentions_every_section() {
        for key in [
            "material_type",
            "texture_properties",
            "wearable_properties",
            "weather_recommendations",
            "key_characteristics",
            "ideal_usage_scenarios",
            "color_analysis",
        ] {
            assert!(ANALYSIS_INSTRUCTION.contains(key), "{} missing", key);
        }
    }
}
