//! 解析済みアイテムのカタログ
//!
//! 新しいエントリは先頭に追加（新しい順）、シードエントリは元の相対順を保つ。
//! 書き込みは初期化処理とコーディネータからのみ（`add`/`commit` は crate 内公開）。
//! 読み取りはいつでも可能で、常に完全に構築済みの `Product` だけが見える。

mod seed;

pub use seed::seed_products;

use parking_lot::RwLock;
use std::sync::Arc;
use texture_scan_common::Product;
use thiserror::Error;
use tracing::debug;

/// カタログ契約違反（正しい使い方では発生しない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("識別子が重複しています: {0}")]
    DuplicateIdentifier(String),

    #[error("エントリが見つかりません: {0}")]
    NotFound(String),
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Arc<Product>>,
    selected: Option<String>,
}

impl CatalogState {
    fn find(&self, id: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id == id)
    }

    fn check_unique(&self, product: &Product) -> Result<(), CatalogError> {
        for existing in &self.products {
            if existing.id == product.id {
                return Err(CatalogError::DuplicateIdentifier(product.id.clone()));
            }
            if existing.scan_id == product.scan_id {
                return Err(CatalogError::DuplicateIdentifier(product.scan_id.clone()));
            }
        }
        Ok(())
    }

    fn prepend(&mut self, product: Product) -> Result<Arc<Product>, CatalogError> {
        self.check_unique(&product)?;
        let product = Arc::new(product);
        self.products.insert(0, Arc::clone(&product));
        if self.selected.is_none() {
            self.selected = Some(product.id.clone());
        }
        Ok(product)
    }

    fn select(&mut self, id: &str) -> Result<Arc<Product>, CatalogError> {
        let product = self
            .find(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        self.selected = Some(product.id.clone());
        Ok(product)
    }
}

/// カタログ（エントリの順序付き集合 + 現在の選択）
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    /// 初期エントリからカタログを構築
    ///
    /// `seed` の並び順がそのままカタログの並び順になり、先頭が選択される。
    pub fn new(seed: Vec<Product>) -> Result<Self, CatalogError> {
        let store = Self::default();
        for product in seed.into_iter().rev() {
            store.add(product)?;
        }
        if let Some(first) = store.all().first() {
            store.select(&first.id)?;
        }
        Ok(store)
    }

    /// 組み込みのサンプルエントリで初期化
    pub fn with_seed() -> Result<Self, CatalogError> {
        Self::new(seed_products())
    }

    /// 先頭に追加。`id` か `scan_id` が既存なら DuplicateIdentifier（カタログは変化しない）
    pub(crate) fn add(&self, product: Product) -> Result<Arc<Product>, CatalogError> {
        let product = self.state.write().prepend(product)?;
        debug!(id = %product.id, scan_id = %product.scan_id, "カタログに追加");
        Ok(product)
    }

    /// 追加と選択を1回のロック内で行う（読み手に中間状態を見せない）
    pub(crate) fn commit(&self, product: Product) -> Result<Arc<Product>, CatalogError> {
        let mut state = self.state.write();
        let product = state.prepend(product)?;
        state.select(&product.id)?;
        drop(state);

        debug!(id = %product.id, scan_id = %product.scan_id, label = %product.label, "カタログに確定");
        Ok(product)
    }

    /// 選択を切り替える
    pub fn select(&self, id: &str) -> Result<Arc<Product>, CatalogError> {
        self.state.write().select(id)
    }

    /// 現在の選択（カタログが空の場合のみNone）
    pub fn current_selection(&self) -> Option<Arc<Product>> {
        let state = self.state.read();
        state
            .selected
            .as_deref()
            .and_then(|id| state.find(id))
            .cloned()
    }

    /// 全エントリのスナップショット（新しい順）
    pub fn all(&self) -> Vec<Arc<Product>> {
        self.state.read().products.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texture_scan_common::ImageRef;

    fn product(id: &str, scan_id: &str) -> Product {
        let template = &seed_products()[0];
        Product {
            id: id.to_string(),
            scan_id: scan_id.to_string(),
            label: template.label.clone(),
            image: ImageRef::Url(format!("https://example.com/{}.jpg", id)),
            material_analysis: template.material_analysis.clone(),
        }
    }

    fn ids(store: &CatalogStore) -> Vec<String> {
        store.all().iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_seed_keeps_order_and_selects_first() {
        let store = CatalogStore::with_seed().unwrap();
        let seed_ids: Vec<String> = seed_products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids(&store), seed_ids);
        assert_eq!(store.current_selection().unwrap().id, seed_ids[0]);
    }

    #[test]
    fn test_empty_store_has_no_selection() {
        let store = CatalogStore::new(Vec::new()).unwrap();
        assert!(store.is_empty());
        assert!(store.current_selection().is_none());
    }

    #[test]
    fn test_add_prepends() {
        let store = CatalogStore::new(vec![product("a", "s-a"), product("b", "s-b")]).unwrap();
        store.add(product("c", "s-c")).unwrap();
        assert_eq!(ids(&store), vec!["c", "a", "b"]);
        // 選択は変わらない
        assert_eq!(store.current_selection().unwrap().id, "a");
    }

    #[test]
    fn test_add_to_empty_store_selects_it() {
        let store = CatalogStore::new(Vec::new()).unwrap();
        store.add(product("a", "s-a")).unwrap();
        assert_eq!(store.current_selection().unwrap().id, "a");
    }

    #[test]
    fn test_add_duplicate_id_rejected() {
        let store = CatalogStore::new(vec![product("a", "s-a")]).unwrap();
        let result = store.add(product("a", "s-other"));
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateIdentifier("a".into()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_duplicate_scan_id_rejected() {
        let store = CatalogStore::new(vec![product("a", "s-a")]).unwrap();
        let result = store.add(product("b", "s-a"));
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateIdentifier("s-a".into()));
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_duplicate_seed_rejected() {
        let result = CatalogStore::new(vec![product("a", "s-a"), product("a", "s-b")]);
        assert!(matches!(result, Err(CatalogError::DuplicateIdentifier(_))));
    }

    #[test]
    fn test_select() {
        let store = CatalogStore::new(vec![product("a", "s-a"), product("b", "s-b")]).unwrap();
        let selected = store.select("b").unwrap();
        assert_eq!(selected.id, "b");
        assert_eq!(store.current_selection().unwrap().id, "b");
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let store = CatalogStore::new(vec![product("a", "s-a")]).unwrap();
        let result = store.select("missing");
        assert_eq!(result.unwrap_err(), CatalogError::NotFound("missing".into()));
        assert_eq!(store.current_selection().unwrap().id, "a");
    }

    #[test]
    fn test_commit_adds_and_selects() {
        let store = CatalogStore::new(vec![product("a", "s-a")]).unwrap();
        let committed = store.commit(product("n", "s-n")).unwrap();
        assert_eq!(committed.id, "n");
        assert_eq!(ids(&store), vec!["n", "a"]);
        assert_eq!(store.current_selection().unwrap().id, "n");
    }

    #[test]
    fn test_commit_duplicate_changes_nothing() {
        let store = CatalogStore::new(vec![product("a", "s-a"), product("b", "s-b")]).unwrap();
        store.select("b").unwrap();
        assert!(store.commit(product("x", "s-a")).is_err());
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.current_selection().unwrap().id, "b");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = CatalogStore::new(vec![product("a", "s-a")]).unwrap();
        let snapshot = store.all();
        store.add(product("b", "s-b")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
