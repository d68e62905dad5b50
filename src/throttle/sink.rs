//! Shared record accumulator

use std::sync::Arc;
use tokio::sync::Mutex;

/// Records gathered from every page of a run
///
/// Cloning shares the same underlying collection. Every write takes the
/// lock for the whole append, so one page's records are never interleaved
/// with another's.
#[derive(Debug)]
pub struct SharedSink<R> {
    records: Arc<Mutex<Vec<R>>>,
}

impl<R> Clone for SharedSink<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> Default for SharedSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SharedSink<R> {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a page's records
    pub async fn extend(&self, records: Vec<R>) {
        let mut guard = self.records.lock().await;
        guard.extend(records);
    }

    /// Number of records held
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Check if the sink is empty
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Move every record out, leaving the sink empty
    pub async fn take(&self) -> Vec<R> {
        std::mem::take(&mut *self.records.lock().await)
    }
}

impl<R: Clone> SharedSink<R> {
    /// Copy of the current records
    pub async fn snapshot(&self) -> Vec<R> {
        self.records.lock().await.clone()
    }
}
