//! Entity storage capability.
//!
//! The plain request/response endpoints are stateless collaborators; they are
//! modeled against this trait so any storage backend can satisfy them. The
//! shipped [`StaticStore`] returns fixed-shape records.

use serde::{Deserialize, Serialize};

/// A stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
}

/// Abstract entity storage.
pub trait EntityStore: Send + Sync {
    /// Fetch an entity by identifier.
    fn get(&self, id: &str) -> Entity;

    /// Create an entity from a request payload.
    fn create(&self, payload: serde_json::Value) -> Entity;
}

/// Fixed-data backend: echoes the requested ID with a canned name.
pub struct StaticStore;

impl EntityStore for StaticStore {
    fn get(&self, id: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: "John Doe".to_string(),
        }
    }

    fn create(&self, payload: serde_json::Value) -> Entity {
        let name = payload
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("John Doe");
        Entity {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}
