//! Gemini API連携
//!
//! generateContent に画像（inline_data）+ 固定指示文 + responseSchema を送り、
//! 応答テキストを MaterialAnalysis にパースする。

use super::{AnalysisError, MaterialAnalyzer};
use crate::config::Config;
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use texture_scan_common::{
    build_analysis_prompt, material_analysis_schema, parse_material_analysis, MaterialAnalysis,
};
use tracing::{debug, info, warn};

/// エラーメッセージに含める応答本文の最大文字数
const BODY_PREVIEW_CHARS: usize = 300;

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    /// 空のAPIキーは MissingApiKey（呼び出し前に失敗させる）
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::TransportFailure(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            temperature,
        })
    }

    /// 設定ファイル（+ 環境変数）から生成
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let api_key = config.get_api_key()?;
        let client = Self::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            config.temperature,
            Duration::from_secs(config.timeout_seconds),
        )?;
        Ok(client)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(&self, image: &[u8], mime_type: &str, hint: Option<&str>) -> GeminiRequest {
        let data = base64::engine::general_purpose::STANDARD.encode(image);

        GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data,
                        },
                    },
                    Part::Text { text: build_analysis_prompt(hint) },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: material_analysis_schema(),
            },
        }
    }

    /// generateContent 呼び出し（応答本文をそのまま返す）
    async fn call_api(&self, request: &GeminiRequest) -> Result<String, AnalysisError> {
        let url = format!("{}?key={}", self.endpoint(), self.api_key);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() { "timeout" } else { "request failed" };
                AnalysisError::TransportFailure(format!("{}: {}", kind, e.without_url()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::TransportFailure(format!("応答本文の読み込み失敗: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(AnalysisError::TransportFailure(format!(
                "API error {}: {}",
                status,
                preview(&body)
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl MaterialAnalyzer for GeminiClient {
    async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        hint: Option<&str>,
    ) -> Result<MaterialAnalysis, AnalysisError> {
        let request = self.build_request(image, mime_type, hint);

        debug!(model = %self.model, bytes = image.len(), mime_type, "Gemini API 呼び出し");
        let started = Instant::now();

        let body = self.call_api(&request).await?;
        let text = parse_generate_response(&body)?;

        let analysis = parse_material_analysis(&text).map_err(|e| {
            warn!(response = %preview(&text), "応答テキストのパース失敗");
            AnalysisError::MalformedResponse(e.to_string())
        })?;

        info!(
            elapsed_secs = started.elapsed().as_secs_f64(),
            material = %analysis.material_type,
            confidence = %analysis.confidence,
            "Gemini API 呼び出し完了"
        );

        Ok(analysis)
    }
}

/// generateContent の応答本文から生成テキストを取り出す
///
/// 先頭候補の text パートを連結して返す。候補が無い・テキストが無い場合は MalformedResponse。
pub fn parse_generate_response(body: &str) -> Result<String, AnalysisError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("応答がJSONではありません: {}", e)))?;

    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "candidates empty".to_string());
        return Err(AnalysisError::MalformedResponse(format!("候補がありません ({})", reason)));
    };

    let text: String = candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(AnalysisError::MalformedResponse(format!(
            "テキストがありません (finishReason: {})",
            reason
        )));
    }

    Ok(text)
}

fn preview(text: &str) -> String {
    text.chars().take(BODY_PREVIEW_CHARS).collect()
}
