/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - bindings: cors_origins などのホスト設定 (リクエスト毎に読み直す)
 *   - kv / db: 任意の外部リソース。未設定なら BindingMissing を返す
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::bindings::{Binding, Bindings};
use crate::error::AppError;
use crate::services::kv::KvStore;

#[derive(Clone, Debug)]
pub struct AppState {
    bindings: Arc<dyn Bindings>,
    kv: Option<Arc<dyn KvStore>>,
    db: Option<PgPool>,
}

impl AppState {
    pub fn new(
        bindings: Arc<dyn Bindings>,
        kv: Option<Arc<dyn KvStore>>,
        db: Option<PgPool>,
    ) -> Self {
        Self { bindings, kv, db }
    }

    pub fn bindings(&self) -> Arc<dyn Bindings> {
        Arc::clone(&self.bindings)
    }

    /// The KV binding, or `BindingMissing(Kv)` when it is not configured.
    pub fn kv(&self) -> Result<&dyn KvStore, AppError> {
        self.kv
            .as_deref()
            .ok_or(AppError::BindingMissing(Binding::Kv))
    }

    /// The relational binding, or `BindingMissing(Database)` when it is not configured.
    pub fn db(&self) -> Result<&PgPool, AppError> {
        self.db
            .as_ref()
            .ok_or(AppError::BindingMissing(Binding::Database))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::StaticBindings;
    use crate::services::kv::MemoryKv;

    #[test]
    fn unbound_resources_report_which_binding_is_missing() {
        let state = AppState::new(Arc::new(StaticBindings::new()), None, None);

        assert!(matches!(
            state.kv(),
            Err(AppError::BindingMissing(Binding::Kv))
        ));
        assert!(matches!(
            state.db(),
            Err(AppError::BindingMissing(Binding::Database))
        ));
    }

    #[test]
    fn bound_kv_is_returned() {
        let state = AppState::new(
            Arc::new(StaticBindings::new()),
            Some(Arc::new(MemoryKv::default())),
            None,
        );
        assert_eq!(state.kv().unwrap().backend_name(), "memory");
    }
}
