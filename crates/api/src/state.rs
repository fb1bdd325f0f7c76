use std::sync::Arc;

use grimoire_core::store::{CharacterStore, NoteStore, UserStore};
use grimoire_db::{DbPool, MemoryStore, PgStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Handlers only see the store traits; which backend sits behind them is
/// decided once at startup.
#[derive(Clone)]
pub struct AppState {
    pub characters: Arc<dyn CharacterStore>,
    pub notes: Arc<dyn NoteStore>,
    pub users: Arc<dyn UserStore>,
    /// Present only with the Postgres backend; used by the health check.
    pub pool: Option<DbPool>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::from_store(Arc::new(MemoryStore::new()), None, config)
    }

    /// State backed by Postgres through the given pool.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self::from_store(store, Some(pool), config)
    }

    fn from_store<S>(store: Arc<S>, pool: Option<DbPool>, config: ServerConfig) -> Self
    where
        S: CharacterStore + NoteStore + UserStore + 'static,
    {
        Self {
            characters: store.clone(),
            notes: store.clone(),
            users: store,
            pool,
            config: Arc::new(config),
        }
    }
}
