//! Generational invalidation token.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::settings::CacheSettings;
use crate::store::{CacheStore, CacheValue};

/// Momento de la ultima escritura relevante, en segundos Unix.
///
/// Se mezcla en cada cache key en su forma decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidationToken(u64);

impl InvalidationToken {
    /// Crea un token a partir de un timestamp Unix.
    pub const fn new(unix_seconds: u64) -> Self {
        Self(unix_seconds)
    }

    /// Retorna el timestamp Unix.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InvalidationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Acceso al token compartido guardado en el cache store.
///
/// No hay estado global: el token vive en el store, bajo una key conocida,
/// y este valor solo sabe donde buscarlo.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    key: String,
    group: String,
    ttl: Duration,
}

impl TokenStore {
    /// Crea un token store sobre el store y reloj dados.
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>, settings: &CacheSettings) -> Self {
        Self {
            store,
            clock,
            key: settings.last_changed_key.clone(),
            group: settings.group.clone(),
            ttl: settings.token_ttl(),
        }
    }

    /// Retorna el token actual.
    ///
    /// Si no existe en el store, o `force_update` es true, genera uno nuevo
    /// con la hora actual y lo guarda con el TTL del token.
    pub async fn get(&self, force_update: bool) -> InvalidationToken {
        if !force_update {
            let stored = self.store.get(&self.key, &self.group).await;
            if let Some(token) = stored.as_ref().and_then(CacheValue::as_token) {
                return InvalidationToken(token);
            }
            debug!(key = %self.key, group = %self.group, "Invalidation token missing, creating");
        }

        let token = InvalidationToken(self.clock.now_unix());
        self.store
            .set(&self.key, CacheValue::Token(token.0), &self.group, self.ttl)
            .await;
        token
    }

    /// Avanza el token a la hora actual.
    pub async fn advance(&self) -> InvalidationToken {
        let token = self.get(true).await;
        info!(token = %token, group = %self.group, "Invalidation token advanced");
        token
    }
}
