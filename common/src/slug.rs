//! ラベル用スラッグ生成
//!
//! material_type から URL/ファイル名に安全なラベルを作る:
//! 小文字化 → 英数字以外の連続を `-` 1つに → 前後の `-` を除去

use regex::Regex;

/// 英数字が1文字も残らない場合のラベル
pub const FALLBACK_LABEL: &str = "material";

pub fn slugify(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref NON_SLUG_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let lower = text.to_lowercase();
    let slug = NON_SLUG_RE.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        slug.to_string()
    }
}
