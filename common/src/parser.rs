//! APIレスポンスパーサー
//!
//! 推論サービスのテキスト応答からJSONオブジェクトを取り出し、
//! MaterialAnalysis に厳密にデシリアライズする

use crate::error::{Error, Result};
use crate::types::MaterialAnalysis;
use serde::de::IgnoredAny;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. 全体（前後の空白を除く）がそのままJSONとして読める
/// 2. 全体が ``` フェンスで囲まれている場合はその中身
/// 3. 最初の `{` から最後の `}` まで
/// 4. エラー
///
/// 値には一切手を加えない（前後の文字列を落とすだけ）。
///
/// # Examples
/// ```
/// use texture_scan_common::extract_json_object;
///
/// let response = "Result: {\"material_type\": \"Linen\"}";
/// let json = extract_json_object(response).unwrap();
/// assert_eq!(json, "{\"material_type\": \"Linen\"}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    let text = strip_fence(response.trim());
    if is_json(text) {
        return Ok(text);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            return Ok(&text[start..=end]);
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// 全体を囲む ```json ... ``` / ``` ... ``` を外す
fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn is_json(text: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(text).is_ok()
}

/// 素材解析レスポンスをパース
///
/// # Returns
/// * `Ok(MaterialAnalysis)` - 全必須フィールドが揃っている
/// * `Err(Error::Parse)` - JSONが見つからない
/// * `Err(Error::Json)` - 構文エラー、型・必須フィールド不一致
pub fn parse_material_analysis(response: &str) -> Result<MaterialAnalysis> {
    let json_str = extract_json_object(response)?;
    Ok(serde_json::from_str(json_str)?)
}
