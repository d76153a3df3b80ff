//! Core traits shared by the domain models

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a server-assigned primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Base trait for all persisted records
pub trait Entity: Identifiable + Send + Sync {
    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}
