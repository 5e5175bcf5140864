//! texture-scan
//!
//! 写真1枚 → 推論サービスで素材解析 → カタログへ取り込み、までの取り込みパイプライン。
//!
//! - `inference`: 推論サービス呼び出しの契約と Gemini 実装
//! - `catalog`: 解析済みアイテムの順序付き集合と現在の選択
//! - `coordinator`: 単一実行を保証する投入ステートマシン

pub mod catalog;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod ident;
pub mod inference;
pub mod input;
pub mod report;
pub mod scanner;

pub use catalog::{CatalogError, CatalogStore};
pub use coordinator::{
    AnalysisCoordinator, CoordinatorStatus, Outcome, Phase, SubmitError, Submission,
};
pub use ident::{ClockIdGenerator, IdGenerator};
pub use inference::{AnalysisError, GeminiClient, MaterialAnalyzer};
pub use input::{ImageInput, LoadedImage};
pub use texture_scan_common::{MaterialAnalysis, Product};
