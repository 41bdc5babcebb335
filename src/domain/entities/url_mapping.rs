//! URL mapping entity: the only persisted record.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored alias → URL mapping, as read back by the admin listing.
///
/// Mappings are created once and never updated or deleted. `id` is assigned
/// by the store and increases monotonically.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UrlMapping {
    pub id: i64,
    pub alias: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}
