//! Per-workspace mutual exclusion for the code-action pipeline.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use camino::Utf8Path;

use crate::dispatch::errors::DispatchError;

use super::guard::normalize_root;

/// Hands out one mutex per workspace root.
///
/// Staging a buffer, polling and shaping mutate the shared active editor, so
/// two pipelines for the same root must not interleave. Roots are keyed after
/// trailing-separator normalisation.
#[derive(Debug, Default)]
pub(crate) struct WorkspaceLocks {
    roots: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl WorkspaceLocks {
    /// Returns the mutex guarding `root`, creating it on first use.
    pub(crate) fn lock_for(&self, root: &Utf8Path) -> Result<Arc<Mutex<()>>, DispatchError> {
        let mut roots = self
            .roots
            .lock()
            .map_err(|_| DispatchError::internal("workspace lock table poisoned"))?;
        let key = normalize_root(root.as_str()).to_owned();
        Ok(Arc::clone(roots.entry(key).or_default()))
    }
}
