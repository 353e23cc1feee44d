//! Cache key generation.

use std::fmt;

use attache_core::{QueryRequest, Result};
use sha2::{Digest, Sha256};

use crate::token::InvalidationToken;

/// Key de un resultado cacheado.
///
/// Es `prefix + hex(sha256(canonical_json(params) + token))`. Como el token
/// forma parte del hash, avanzar el token cambia todas las keys futuras y
/// deja huerfanas las anteriores sin borrarlas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    key: String,
    prefix_len: usize,
}

impl CacheKey {
    /// Calcula la key para un request y un token.
    ///
    /// Falla si los parametros no tienen una forma JSON canonica (floats
    /// NaN o infinitos).
    ///
    /// # Examples
    ///
    /// ```
    /// use attache_cache::{CacheKey, InvalidationToken};
    /// use attache_core::QueryRequest;
    ///
    /// let request = QueryRequest::new()
    ///     .with_param("post_status", "any")
    ///     .with_param("post_type", "attachment");
    ///
    /// let k0 = CacheKey::compute("cached_query_", &request, InvalidationToken::new(1_700_000_000)).unwrap();
    /// let k1 = CacheKey::compute("cached_query_", &request, InvalidationToken::new(1_700_000_060)).unwrap();
    ///
    /// assert!(k0.as_str().starts_with("cached_query_"));
    /// assert_ne!(k0, k1);
    /// ```
    pub fn compute(prefix: &str, request: &QueryRequest, token: InvalidationToken) -> Result<Self> {
        let params = request.canonical_json()?;

        let mut hasher = Sha256::new();
        hasher.update(params.as_bytes());
        hasher.update(token.to_string().as_bytes());
        let digest = hex::encode(hasher.finalize());

        Ok(Self {
            key: format!("{}{}", prefix, digest),
            prefix_len: prefix.len(),
        })
    }

    /// Retorna la key completa.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Retorna solo el hash hexadecimal, sin prefijo.
    pub fn digest(&self) -> &str {
        &self.key[self.prefix_len..]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
