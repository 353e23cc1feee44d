//! Entities returned by queries and reported by write events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::query::QueryValue;

/// Numeric identifier of an entity in the host data set.
pub type EntityId = u64;

/// A record of the host data set.
///
/// The same type is used for hydrated query results and for the entity
/// passed to the post-write hook, which only looks at `entity_type`.
///
/// # Example
///
/// ```
/// use attache_core::Entity;
///
/// let entity = Entity::new(42, "attachment").with_field("post_mime_type", "image/png");
/// assert!(entity.is_type("attachment"));
/// assert_eq!(entity.field("post_mime_type").and_then(|v| v.as_str()), Some("image/png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier of the record.
    pub id: EntityId,
    /// Type tag, e.g. "attachment" or "post".
    pub entity_type: String,
    /// Remaining columns of the record.
    #[serde(default)]
    pub fields: BTreeMap<String, QueryValue>,
}

impl Entity {
    /// Creates an entity with no extra fields.
    pub fn new(id: EntityId, entity_type: impl Into<String>) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Returns the entity with the given field set.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns a field value.
    pub fn field(&self, key: &str) -> Option<&QueryValue> {
        self.fields.get(key)
    }

    /// Returns true if the entity has the given type tag.
    pub fn is_type(&self, entity_type: &str) -> bool {
        self.entity_type == entity_type
    }
}

/// Result of running a query.
///
/// Executors return bare identifiers when the request asks for
/// `fields = "ids"`, and full records otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutput {
    /// Identifiers only, in result order.
    Ids(Vec<EntityId>),
    /// Hydrated records, in result order.
    Records(Vec<Entity>),
}

impl QueryOutput {
    /// Consumes the output, returning the identifiers in result order.
    pub fn into_ids(self) -> Vec<EntityId> {
        match self {
            QueryOutput::Ids(ids) => ids,
            QueryOutput::Records(records) => records.into_iter().map(|r| r.id).collect(),
        }
    }

    /// Returns the number of results.
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Ids(ids) => ids.len(),
            QueryOutput::Records(records) => records.len(),
        }
    }

    /// Returns true if the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<EntityId>> for QueryOutput {
    fn from(ids: Vec<EntityId>) -> Self {
        QueryOutput::Ids(ids)
    }
}
