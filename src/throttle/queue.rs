//! Bounded queue of pages awaiting a fetch attempt
//!
//! Backed by a bounded tokio mpsc channel. Tasks requeue through cloned
//! `QueueHandle`s; the scheduler owns the receiving end and dequeues
//! without blocking.

use crate::error::{Error, Result};
use crate::pagination::PageNumber;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Pages not yet incorporated, or failed and awaiting a retry
#[derive(Debug)]
pub struct PendingQueue {
    sender: mpsc::Sender<PageNumber>,
    receiver: mpsc::Receiver<PageNumber>,
}

impl PendingQueue {
    /// Create a queue able to hold `capacity` pages at once
    ///
    /// The capacity is raised to 1 if zero.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self { sender, receiver }
    }

    /// Handle for requeueing from tasks
    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            sender: self.sender.clone(),
        }
    }

    /// Add a page without waiting
    ///
    /// Fails if the queue is full, which means a page was queued twice.
    pub fn enqueue(&self, page: PageNumber) -> Result<()> {
        self.sender.try_send(page).map_err(|e| match e {
            TrySendError::Full(page) => Error::Other(format!(
                "pending queue full ({} pages) while adding page {page}",
                self.capacity()
            )),
            TrySendError::Closed(page) => Error::QueueClosed { page },
        })
    }

    /// Take the next page, if any is waiting
    pub fn try_dequeue(&mut self) -> Option<PageNumber> {
        match self.receiver.try_recv() {
            Ok(page) => Some(page),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Pages currently waiting
    pub fn len(&self) -> usize {
        queued(&self.sender)
    }

    /// Check if no page is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pages the queue can hold
    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}

/// Cloneable requeue end of a `PendingQueue`
#[derive(Debug, Clone)]
pub struct QueueHandle {
    sender: mpsc::Sender<PageNumber>,
}

impl QueueHandle {
    /// Put a page back for another attempt
    pub async fn requeue(&self, page: PageNumber) -> Result<()> {
        self.sender
            .send(page)
            .await
            .map_err(|e| Error::QueueClosed { page: e.0 })
    }

    /// Pages currently waiting
    pub fn len(&self) -> usize {
        queued(&self.sender)
    }

    /// Check if no page is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn queued(sender: &mpsc::Sender<PageNumber>) -> usize {
    sender.max_capacity() - sender.capacity()
}
