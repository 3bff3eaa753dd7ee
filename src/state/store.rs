use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};

use crate::errors::StoreError;
use crate::state::timestamp::Timestamp;

/// Default bound on each request queue.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

struct ReadOp {
    resp: oneshot::Sender<Timestamp>,
}

struct WriteOp {
    value: Timestamp,
    resp: oneshot::Sender<()>,
}

/// Handle to the single-slot timestamp store.
///
/// The slot itself lives inside the processing loop (`SlotActor`) and is
/// only ever touched by that loop. Handles talk to it by sending a request
/// together with a single-use reply channel, then awaiting the reply.
///
/// Handles are cheap to clone. Once every handle is dropped both request
/// queues close and the loop exits, taking the slot with it.
#[derive(Clone)]
pub struct TimestampStore {
    reads: mpsc::Sender<ReadOp>,
    writes: mpsc::Sender<WriteOp>,
    lifecycle: Arc<Lifecycle>,
}

struct Lifecycle {
    // Holds the loop between construction and `start`.
    parked: Mutex<Option<SlotActor>>,
    running: AtomicBool,
}

impl TimestampStore {
    /// Build a store in the constructed state. Nothing is serviced until
    /// [`start`](Self::start) has completed.
    pub fn new(mailbox_capacity: usize) -> Self {
        Self::with_value(Timestamp::default(), mailbox_capacity)
    }

    pub fn with_value(initial: Timestamp, mailbox_capacity: usize) -> Self {
        let capacity = mailbox_capacity.max(1);
        let (reads_tx, reads_rx) = mpsc::channel(capacity);
        let (writes_tx, writes_rx) = mpsc::channel(capacity);

        let actor = SlotActor {
            slot: initial,
            reads: reads_rx,
            writes: writes_rx,
        };

        Self {
            reads: reads_tx,
            writes: writes_tx,
            lifecycle: Arc::new(Lifecycle {
                parked: Mutex::new(Some(actor)),
                running: AtomicBool::new(false),
            }),
        }
    }

    /// Construct and start in one step. The returned store is already
    /// servicing requests.
    pub async fn spawn(mailbox_capacity: usize) -> Result<Self, StoreError> {
        let store = Self::new(mailbox_capacity);
        store.start().await?;
        Ok(store)
    }

    /// Move the processing loop onto its own task and wait until it reports
    /// that it is running. Calling this on a running store does nothing.
    pub async fn start(&self) -> Result<(), StoreError> {
        // The guard is held until `running` is published so a concurrent
        // caller never returns before the loop is live.
        let mut parked = self.lifecycle.parked.lock().await;
        let Some(actor) = parked.take() else {
            tracing::debug!("timestamp store already started");
            return Ok(());
        };

        let (ready_tx, ready_rx) = oneshot::channel();
        tokio::spawn(actor.run(ready_tx));
        ready_rx.await.map_err(|_| StoreError::NotInitialized)?;

        self.lifecycle.running.store(true, Ordering::Release);
        tracing::info!("timestamp store started");
        Ok(())
    }

    /// True while a live slot exists: from construction until the loop has
    /// been dropped. Does not imply that the loop has been started.
    pub fn is_initialized(&self) -> bool {
        !self.reads.is_closed() && !self.writes.is_closed()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.running.load(Ordering::Acquire) && self.is_initialized()
    }

    /// Replace the stored value. Returns once the loop has applied the write,
    /// so every `get` issued afterwards observes it (or a later write).
    pub async fn set(&self, value: impl Into<Option<Timestamp>>) -> Result<(), StoreError> {
        let value = value.into().ok_or(StoreError::InvalidInput)?;
        self.ensure_running()?;

        let (resp, reply) = oneshot::channel();
        self.writes
            .send(WriteOp { value, resp })
            .await
            .map_err(|_| StoreError::NotInitialized)?;
        reply.await.map_err(|_| StoreError::NotInitialized)
    }

    pub async fn get(&self) -> Result<Timestamp, StoreError> {
        self.ensure_running()?;

        let (resp, reply) = oneshot::channel();
        self.reads
            .send(ReadOp { resp })
            .await
            .map_err(|_| StoreError::NotInitialized)?;
        reply.await.map_err(|_| StoreError::NotInitialized)
    }

    fn ensure_running(&self) -> Result<(), StoreError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }
}

/// Sole owner of the slot.
struct SlotActor {
    slot: Timestamp,
    reads: mpsc::Receiver<ReadOp>,
    writes: mpsc::Receiver<WriteOp>,
}

impl SlotActor {
    async fn run(mut self, ready: oneshot::Sender<()>) {
        let _ = ready.send(());

        // One message per iteration. When both queues have work the pick is
        // random; callers must not rely on cross-queue ordering.
        loop {
            tokio::select! {
                Some(read) = self.reads.recv() => {
                    // A caller that went away simply misses its reply.
                    let _ = read.resp.send(self.slot);
                }
                Some(write) = self.writes.recv() => {
                    self.slot = write.value;
                    let _ = write.resp.send(());
                }
                else => break,
            }
        }

        tracing::debug!(last_value = %self.slot, "timestamp store loop stopped");
    }
}
