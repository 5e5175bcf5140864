//! 識別子生成
//!
//! 一意性だけが不変条件なので、生成方式は `IdGenerator` として差し替え可能にする。

use chrono::Local;
use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
    /// セッション内で一意な不透明ID
    fn product_id(&self) -> String;

    /// 人が読めるスキャンID
    fn scan_id(&self) -> String;
}

/// 時刻 + 乱数による既定の生成器
///
/// - product_id: UUID v4
/// - scan_id: `YYYYMMDD-HHMMSS-xxxxxxxx`（ローカル時刻 + 16進8桁）
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockIdGenerator;

impl IdGenerator for ClockIdGenerator {
    fn product_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn scan_id(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", Local::now().format("%Y%m%d-%H%M%S"), &suffix[..8])
    }
}
