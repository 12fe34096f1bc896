//! Store directory collaborator.
//!
//! The monitor does not own the directory of stores it watches; it only
//! needs to list store ids and resolve display names. [`StoreDirectory`]
//! is that boundary, [`DirectoryError`] its failure surface, and
//! [`StaticDirectory`] the bundled in-memory implementation the daemon
//! and tests run against.

use vitrine_core::StoreId;

/// Directory lookups can fail; the monitor absorbs these (a failing
/// directory degrades a refresh to zero sales, it never propagates).
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Unknown store: {0}")]
    UnknownStore(StoreId),

    #[error("Store directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of the store roster.
///
/// Implementations are shared across the monitor's fetch tasks, so they
/// must be `Send + Sync`. Lookups are synchronous: the backing data is a
/// table, not a remote call.
pub trait StoreDirectory: Send + Sync {
    /// Ids of every store the monitor should watch.
    fn list_store_ids(&self) -> Result<Vec<StoreId>, DirectoryError>;

    /// Display name for one store.
    fn resolve_store_name(&self, store_id: &str) -> Result<String, DirectoryError>;

    /// Number of known stores; 0 when the directory is unavailable.
    fn store_count(&self) -> usize {
        self.list_store_ids().map(|ids| ids.len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// StaticDirectory
// ---------------------------------------------------------------------------

/// The curated boutique roster bundled with the daemon.
const BUILTIN_STORES: &[(&str, &str)] = &[
    ("maison-verre", "Maison Verre"),
    ("atelier-noir", "Atelier Noir"),
    ("salon-doree", "Salon Doree"),
    ("galerie-blanche", "Galerie Blanche"),
    ("comptoir-celeste", "Comptoir Celeste"),
    ("boutique-lumiere", "Boutique Lumiere"),
    ("maison-dor", "Maison d'Or"),
    ("atelier-du-temps", "Atelier du Temps"),
    ("la-vitrine", "La Vitrine"),
    ("palais-royal-mode", "Palais Royal Mode"),
    ("rue-cambon", "Rue Cambon"),
    ("villa-serena", "Villa Serena"),
];

/// In-memory [`StoreDirectory`] over a fixed roster. Never fails.
pub struct StaticDirectory {
    stores: Vec<(StoreId, String)>,
}

impl StaticDirectory {
    /// Directory over an arbitrary roster of `(id, display name)` pairs.
    pub fn new(stores: Vec<(StoreId, String)>) -> Self {
        Self { stores }
    }

    /// Directory over the bundled boutique roster.
    pub fn with_builtin_stores() -> Self {
        Self::new(
            BUILTIN_STORES
                .iter()
                .map(|(id, name)| ((*id).to_string(), (*name).to_string()))
                .collect(),
        )
    }
}

impl StoreDirectory for StaticDirectory {
    fn list_store_ids(&self) -> Result<Vec<StoreId>, DirectoryError> {
        Ok(self.stores.iter().map(|(id, _)| id.clone()).collect())
    }

    fn resolve_store_name(&self, store_id: &str) -> Result<String, DirectoryError> {
        self.stores
            .iter()
            .find(|(id, _)| id == store_id)
            .map(|(_, name)| name.clone())
            .ok_or_else(|| DirectoryError::UnknownStore(store_id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn builtin_roster_has_unique_ids() {
        let directory = StaticDirectory::with_builtin_stores();
        let mut ids = directory.list_store_ids().expect("static listing succeeds");
        let before = ids.len();
        ids.sort();
        ids.dedup();

        assert!(before > 0);
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn store_count_matches_the_listing() {
        let directory = StaticDirectory::with_builtin_stores();
        let ids = directory.list_store_ids().expect("static listing succeeds");
        assert_eq!(directory.store_count(), ids.len());
    }

    #[test]
    fn known_store_resolves_to_its_display_name() {
        let directory = StaticDirectory::with_builtin_stores();
        let name = directory
            .resolve_store_name("maison-verre")
            .expect("builtin store resolves");
        assert_eq!(name, "Maison Verre");
    }

    #[test]
    fn unknown_store_is_a_typed_error() {
        let directory = StaticDirectory::with_builtin_stores();
        let err = directory.resolve_store_name("nonexistent").unwrap_err();
        assert_matches!(err, DirectoryError::UnknownStore(id) if id == "nonexistent");
    }

    #[test]
    fn custom_rosters_are_supported() {
        let directory = StaticDirectory::new(vec![("solo".to_string(), "Solo Store".to_string())]);
        assert_eq!(directory.store_count(), 1);
        assert_eq!(
            directory.resolve_store_name("solo").expect("resolves"),
            "Solo Store"
        );
    }

    #[test]
    fn empty_roster_is_valid() {
        let directory = StaticDirectory::new(Vec::new());
        assert_eq!(directory.store_count(), 0);
        assert!(directory
            .list_store_ids()
            .expect("empty listing succeeds")
            .is_empty());
    }
}
