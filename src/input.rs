//! 入力画像の読み込み
//!
//! ファイル選択側から渡される入力を、推論に送る生バイト列 + MIMEタイプに変換する。
//! サイズやMIMEの妥当性はここでは検証しない（サービス側の判断に任せる）。

use crate::inference::AnalysisError;
use base64::Engine as _;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use texture_scan_common::ImageRef;

/// 判定できなかった場合のMIMEタイプ
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 解析対象の入力
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// ローカルファイル
    File(PathBuf),
    /// 取得済みのバイト列（MIME未指定なら内容から判定）
    Bytes {
        bytes: Vec<u8>,
        mime_type: Option<String>,
    },
}

impl ImageInput {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ImageInput::File(path.into())
    }

    pub fn bytes(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        ImageInput::Bytes {
            bytes,
            mime_type: Some(mime_type.into()),
        }
    }

    /// ログ表示用の説明
    pub fn describe(&self) -> String {
        match self {
            ImageInput::File(path) => path.display().to_string(),
            ImageInput::Bytes { bytes, .. } => format!("<{} bytes>", bytes.len()),
        }
    }

    /// 生バイト列に変換
    pub async fn load(self) -> Result<LoadedImage, AnalysisError> {
        match self {
            ImageInput::File(path) => {
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    AnalysisError::InputUnreadable(format!("{}: {}", path.display(), e))
                })?;
                if bytes.is_empty() {
                    return Err(AnalysisError::InputUnreadable(format!(
                        "{}: 空のファイルです",
                        path.display()
                    )));
                }
                let mime_type = mime_type_for_path(&path)
                    .or_else(|| sniff_mime_type(&bytes))
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                Ok(LoadedImage { bytes, mime_type })
            }
            ImageInput::Bytes { bytes, mime_type } => {
                if bytes.is_empty() {
                    return Err(AnalysisError::InputUnreadable("画像データが空です".into()));
                }
                let mime_type = match mime_type.filter(|m| !m.trim().is_empty()) {
                    Some(m) => m,
                    None => sniff_mime_type(&bytes).unwrap_or(DEFAULT_MIME_TYPE).to_string(),
                };
                Ok(LoadedImage { bytes, mime_type })
            }
        }
    }
}

/// 読み込み済み画像
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl LoadedImage {
    /// カタログに載せるインライン画像参照（Data URL）
    pub fn image_ref(&self) -> ImageRef {
        let data = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        ImageRef::inline(&self.mime_type, &data)
    }
}

/// 拡張子からMIMEタイプを判定
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path).ok().map(|f| f.to_mime_type())
}

/// 先頭バイトからMIMEタイプを判定
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}
