//! 推論サービス連携
//!
//! 画像バイト列 + MIMEタイプ → MaterialAnalysis の契約を `MaterialAnalyzer` として定義する。
//! 呼び出しは1回ごとに独立しており、失敗時の自動リトライは行わない。

mod gemini;

pub use gemini::{parse_generate_response, GeminiClient};

use async_trait::async_trait;
use texture_scan_common::MaterialAnalysis;
use thiserror::Error;

/// 解析1回分の失敗理由
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// 通信失敗・サービス停止・非成功ステータス
    #[error("推論サービス呼び出しエラー: {0}")]
    TransportFailure(String),

    /// 応答がJSONでない、または期待する形に合わない
    #[error("推論サービスの応答が不正: {0}")]
    MalformedResponse(String),

    /// ローカル入力をバイト列に変換できない
    #[error("画像を読み込めません: {0}")]
    InputUnreadable(String),

    #[error("APIキーが設定されていません")]
    MissingApiKey,
}

/// スキーマ拘束付きの素材解析サービス
#[async_trait]
pub trait MaterialAnalyzer: Send + Sync {
    /// 画像1枚を解析
    ///
    /// # Arguments
    /// * `image` - 生の画像バイト列
    /// * `mime_type` - 例: "image/png"
    /// * `hint` - オペレータが付けた品目ラベル（任意）
    async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        hint: Option<&str>,
    ) -> Result<MaterialAnalysis, AnalysisError>;
}
