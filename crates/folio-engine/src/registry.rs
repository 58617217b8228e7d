//! Versioned classification snapshots.
//!
//! Readers take an `Arc` to the current snapshot once per request and keep
//! it for the whole request. A reload builds a complete new snapshot off to
//! the side and swaps it in, so a request never sees a half-loaded map.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use folio_portfolio::{Classification, ClassificationSnapshot};
use folio_traits::reference_data::{ClassificationRecord, ClassificationSource};

use crate::error::EngineResult;

/// Holds the current classification snapshot and its source.
pub struct ClassificationRegistry {
    source: Arc<dyn ClassificationSource>,
    current: RwLock<Arc<ClassificationSnapshot>>,
}

impl ClassificationRegistry {
    /// Create a registry with an empty version-0 snapshot.
    pub fn new(source: Arc<dyn ClassificationSource>) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(ClassificationSnapshot::empty(0))),
        }
    }

    /// The snapshot in effect now.
    pub fn snapshot(&self) -> Arc<ClassificationSnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Re-read the source and publish the result as the next version.
    ///
    /// On failure the current snapshot stays in effect.
    pub async fn reload(&self) -> EngineResult<Arc<ClassificationSnapshot>> {
        let records = self.source.load_classifications().await?;
        let entries: Vec<(String, Classification)> =
            records.into_iter().map(into_entry).collect();

        let snapshot = {
            let mut current = self.current.write();
            let next = Arc::new(ClassificationSnapshot::new(current.version() + 1, entries));
            *current = Arc::clone(&next);
            next
        };

        info!(
            source = %self.source.describe(),
            loaded = snapshot.len(),
            version = snapshot.version(),
            "published classification snapshot"
        );
        Ok(snapshot)
    }
}

fn into_entry(record: ClassificationRecord) -> (String, Classification) {
    let ticker = record.ticker.trim().to_string();
    (ticker, Classification::new(record.sector, record.asset_class))
}
