//! Settings for the query cache adapter.

use std::path::Path;
use std::time::Duration;

use attache_core::{AttacheError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Prefijo de variables de entorno (ej. `ATTACHE__ENTRY_TTL_SECONDS=60`).
pub const ENV_PREFIX: &str = "ATTACHE";

/// Doce horas, el TTL por defecto de entries y del token.
const TWELVE_HOURS: u64 = 12 * 60 * 60;

/// Configuracion del adaptador de cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Grupo (namespace) de todas las keys en el store.
    pub group: String,
    /// Key bajo la que se guarda el token de invalidacion.
    pub last_changed_key: String,
    /// Prefijo de las keys de resultados.
    pub key_prefix: String,
    /// Tipo de entidad cuyas escrituras invalidan el cache.
    pub tracked_entity_type: String,
    /// TTL de los resultados cacheados en segundos (default: 43200 = 12 horas)
    pub entry_ttl_seconds: u64,
    /// TTL del token de invalidacion en segundos (default: 43200 = 12 horas)
    pub token_ttl_seconds: u64,
    /// Maximo numero de entries del store en memoria (default: 10000)
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            group: "wp_ajax_query_attachments".to_string(),
            last_changed_key: "attachments_last_changed".to_string(),
            key_prefix: "cached_query_".to_string(),
            tracked_entity_type: "attachment".to_string(),
            entry_ttl_seconds: TWELVE_HOURS,
            token_ttl_seconds: TWELVE_HOURS,
            max_capacity: 10_000,
        }
    }
}

impl CacheSettings {
    /// Carga la configuracion: defaults, luego el archivo opcional, luego
    /// variables de entorno `ATTACHE__*`.
    ///
    /// El formato del archivo se deduce de su extension (toml, yaml, json...).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attache_cache::CacheSettings;
    /// use std::path::Path;
    ///
    /// let settings = CacheSettings::load(Some(Path::new("attache.toml"))).unwrap();
    /// println!("caching into group {}", settings.group);
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings: CacheSettings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                AttacheError::configuration_with_cause("settings", "failed to load settings", e)
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Verifica que la configuracion sea utilizable.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("group", &self.group),
            ("last_changed_key", &self.last_changed_key),
            ("key_prefix", &self.key_prefix),
            ("tracked_entity_type", &self.tracked_entity_type),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(AttacheError::configuration(field, "cannot be empty"));
            }
        }

        if self.entry_ttl_seconds == 0 {
            return Err(AttacheError::configuration(
                "entry_ttl_seconds",
                "must be positive",
            ));
        }
        if self.token_ttl_seconds == 0 {
            return Err(AttacheError::configuration(
                "token_ttl_seconds",
                "must be positive",
            ));
        }
        if self.max_capacity == 0 {
            return Err(AttacheError::configuration(
                "max_capacity",
                "must be positive",
            ));
        }

        Ok(())
    }

    /// TTL de los resultados cacheados.
    pub fn entry_ttl(&self) -> Duration {
        Duration::from_secs(self.entry_ttl_seconds)
    }

    /// TTL del token de invalidacion.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }
}
