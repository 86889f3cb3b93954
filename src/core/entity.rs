//! Entity trait shared by every stored record

/// Base trait for all stored records.
///
/// Implementations are generated with [`impl_entity!`](crate::impl_entity),
/// which also adds a `touch()` helper for the `updated_at` column.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The singular resource name used in messages (e.g., "category")
    fn resource_name_singular() -> &'static str;
}
