pub mod json;

use crate::app::Result;

pub use json::JsonStore;

/// The set of already-published article identifiers.
///
/// Callers canonicalize links before every membership check and insertion;
/// raw links never enter the store.
pub trait PostedStore {
    fn contains(&self, id: &str) -> bool;

    /// Record an identifier. Returns false (and appends nothing) when it was
    /// already present.
    fn record(&mut self, id: String) -> bool;

    /// Write the full current set back to disk.
    fn save(&self) -> Result<()>;

    /// Recorded identifiers in insertion order.
    fn identifiers(&self) -> Vec<String>;
}
