use crate::store::SharedStore;

/// A named handle onto one collection of a shared store.
///
/// Cheap to clone; every clone talks to the same store.
#[derive(Clone)]
pub struct Collection {
    name: String,
    pub(crate) store: SharedStore,
}

impl Collection {
    pub fn new(name: impl Into<String>, store: SharedStore) -> Self {
        Self { name: name.into(), store }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection").field("name", &self.name).finish_non_exhaustive()
    }
}
