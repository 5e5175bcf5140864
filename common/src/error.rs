//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 応答テキストにJSONが見当たらない
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSONの構文エラー、または MaterialAnalysis の形に合わない
    #[error("Invalid material analysis JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
