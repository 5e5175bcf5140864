//! 解析コーディネータ
//!
//! 1回の投入を 入力読み込み → 推論 → Product構築 → カタログ確定 → 選択更新 まで駆動する。
//!
//! 状態遷移: `Idle → Submitting → (Committed | Failed) → Idle`
//!
//! - `Submitting` 中の新しい投入は即座に `SubmitError::Busy` で拒否する（キューしない）
//! - Idle→Submitting は watch 値への compare-and-set（`send_if_modified`）で行い、
//!   これが単一実行の唯一の判定箇所
//! - 失敗時はカタログも選択も変更しない。利用者への通知は理由を区別しない1種類のみ

use crate::catalog::{CatalogError, CatalogStore};
use crate::ident::{ClockIdGenerator, IdGenerator};
use crate::inference::{AnalysisError, MaterialAnalyzer};
use crate::input::ImageInput;
use std::sync::Arc;
use texture_scan_common::{slugify, Product};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// 失敗時に利用者へ見せる共通メッセージ
pub const FAILURE_MESSAGE: &str = "素材解析に失敗しました。もう一度お試しください";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// 直前の投入の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed { id: String, scan_id: String },
    Failed { message: String },
}

/// 表示層が読める状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorStatus {
    pub phase: Phase,
    pub last_outcome: Option<Outcome>,
}

impl CoordinatorStatus {
    pub fn is_analyzing(&self) -> bool {
        self.phase == Phase::Submitting
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    /// 別の投入が進行中
    #[error("解析中のため新しい投入は受け付けられません")]
    Busy,

    /// 入力・通信・応答のいずれかの失敗（利用者には区別しない）
    #[error("{}", FAILURE_MESSAGE)]
    Failed {
        #[source]
        source: AnalysisError,
    },

    /// カタログ契約違反（不具合）
    #[error("カタログ整合性エラー: {0}")]
    Catalog(CatalogError),
}

/// 1回の投入内容
#[derive(Debug, Clone)]
pub struct Submission {
    pub input: ImageInput,
    /// オペレータが付けた品目ラベル（指示文に織り込む）
    pub hint: Option<String>,
}

impl Submission {
    pub fn new(input: ImageInput) -> Self {
        Self { input, hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ImageInput> for Submission {
    fn from(input: ImageInput) -> Self {
        Self::new(input)
    }
}

/// 実行中の投入。drop 時に必ず Idle へ戻す
struct InFlight<'a> {
    status: &'a watch::Sender<CoordinatorStatus>,
    outcome: Option<Outcome>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or_else(|| Outcome::Failed {
            message: "解析が中断されました".to_string(),
        });
        self.status.send_modify(|s| {
            s.phase = Phase::Idle;
            s.last_outcome = Some(outcome);
        });
    }
}

pub struct AnalysisCoordinator {
    analyzer: Arc<dyn MaterialAnalyzer>,
    store: Arc<CatalogStore>,
    ids: Arc<dyn IdGenerator>,
    status: watch::Sender<CoordinatorStatus>,
}

impl AnalysisCoordinator {
    pub fn new(analyzer: Arc<dyn MaterialAnalyzer>, store: Arc<CatalogStore>) -> Self {
        let (status, _) = watch::channel(CoordinatorStatus::default());
        Self {
            analyzer,
            store,
            ids: Arc::new(ClockIdGenerator),
            status,
        }
    }

    /// 識別子生成方式を差し替える
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn is_analyzing(&self) -> bool {
        self.status.borrow().is_analyzing()
    }

    pub fn status(&self) -> CoordinatorStatus {
        self.status.borrow().clone()
    }

    /// 状態変化の購読
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorStatus> {
        self.status.subscribe()
    }

    /// 画像1枚を解析してカタログへ取り込む
    ///
    /// # Returns
    /// * `Ok(product)` - 先頭に追加され、選択された新エントリ
    /// * `Err(SubmitError::Busy)` - 他の投入が進行中（何も変更しない）
    /// * `Err(SubmitError::Failed)` - 解析失敗（カタログ・選択は変更しない）
    pub async fn submit(
        &self,
        submission: impl Into<Submission>,
    ) -> Result<Arc<Product>, SubmitError> {
        let submission = submission.into();
        let mut flight = self.begin()?;
        debug!(input = %submission.input.describe(), "解析開始");

        match self.run(submission).await {
            Ok(product) => {
                info!(id = %product.id, scan_id = %product.scan_id, label = %product.label, "解析結果を登録");
                flight.outcome = Some(Outcome::Committed {
                    id: product.id.clone(),
                    scan_id: product.scan_id.clone(),
                });
                Ok(product)
            }
            Err(SubmitError::Catalog(e)) => {
                error!(error = %e, "カタログ整合性エラー（識別子生成の不具合）");
                flight.outcome = Some(Outcome::Failed { message: e.to_string() });
                Err(SubmitError::Catalog(e))
            }
            Err(e) => {
                if let SubmitError::Failed { source } = &e {
                    warn!(error = %source, "素材解析に失敗");
                }
                flight.outcome = Some(Outcome::Failed { message: FAILURE_MESSAGE.to_string() });
                Err(e)
            }
        }
    }

    /// Idle → Submitting（CAS）。既に Submitting なら Busy
    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        let entered = self.status.send_if_modified(|s| {
            if s.phase == Phase::Idle {
                s.phase = Phase::Submitting;
                true
            } else {
                false
            }
        });

        if !entered {
            debug!("解析中のため投入を拒否");
            return Err(SubmitError::Busy);
        }

        Ok(InFlight { status: &self.status, outcome: None })
    }

    async fn run(&self, submission: Submission) -> Result<Arc<Product>, SubmitError> {
        let Submission { input, hint } = submission;

        let image = input.load().await.map_err(|source| SubmitError::Failed { source })?;

        let analysis = self
            .analyzer
            .analyze(&image.bytes, &image.mime_type, hint.as_deref())
            .await
            .map_err(|source| SubmitError::Failed { source })?;

        // 範囲外の値は補正せず記録だけ残す
        for (field, value) in analysis.out_of_range_scores() {
            warn!(field, value, "想定範囲外の評価値");
        }

        let product = Product {
            id: self.ids.product_id(),
            scan_id: self.ids.scan_id(),
            label: slugify(&analysis.material_type),
            image: image.image_ref(),
            material_analysis: analysis,
        };

        self.store.commit(product).map_err(SubmitError::Catalog)
    }
}
