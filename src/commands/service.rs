//! Storage Service Task
//!
//! All cache and log state lives inside one task. Connection handlers send
//! commands into it over a bounded mpsc channel and receive each reply on a
//! dedicated oneshot channel. Because a single task applies mutations AND
//! appends their records, log order always matches application order; no
//! lock is needed anywhere on the data path.
//!
//! Command execution is synchronous inside the task, including the log
//! append. A slow append therefore delays every queued command; that is the
//! accepted cost of write-through durability in this design.

use crate::commands::{Command, CommandHandler};
use crate::protocol::Reply;
use crate::storage::StorageEngine;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How many commands may queue up in front of the storage service before
/// senders are backpressured.
pub const COMMAND_QUEUE_DEPTH: usize = 1024;

/// One in-flight request: a command plus the channel its reply goes back on.
struct StorageRequest {
    command: Command,
    reply: oneshot::Sender<Reply>,
}

/// A cheap, cloneable handle for sending commands to the storage service.
///
/// Every connection task holds a clone; the service stops once all handles
/// are dropped and the queue drains.
#[derive(Clone)]
pub struct StorageHandle {
    tx: mpsc::Sender<StorageRequest>,
}

impl StorageHandle {
    /// Executes one command on the storage service and waits for its reply.
    ///
    /// If the service is gone (shutdown), an error reply is returned rather
    /// than panicking; the connection will surface it to the client.
    pub async fn execute(&self, command: Command) -> Reply {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = StorageRequest {
            command,
            reply: reply_tx,
        };

        if self.tx.send(request).await.is_err() {
            return Reply::error("ERR storage service unavailable");
        }

        match reply_rx.await {
            Ok(reply) => reply,
            Err(_) => Reply::error("ERR storage service dropped the request"),
        }
    }
}

/// Spawns the storage service around a recovered engine.
///
/// Returns the handle connections use to submit commands, and the join
/// handle of the service task itself.
pub fn start_storage_service(engine: StorageEngine) -> (StorageHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<StorageRequest>(COMMAND_QUEUE_DEPTH);

    let service = tokio::spawn(async move {
        let mut handler = CommandHandler::new(engine);
        info!(
            capacity = handler.engine().capacity(),
            resident = handler.engine().resident_len(),
            "storage service started"
        );

        while let Some(StorageRequest { command, reply }) = rx.recv().await {
            let result = handler.execute(command);
            // The requester may have hung up; that only cancels its reply.
            let _ = reply.send(result);
        }

        debug!("storage service stopped");
    });

    (StorageHandle { tx }, service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aof::MemoryAof;
    use bytes::Bytes;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    fn start() -> (StorageHandle, JoinHandle<()>) {
        let engine = StorageEngine::new(4, Box::new(MemoryAof::new()));
        start_storage_service(engine)
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let (storage, _service) = start();

        let reply = storage
            .execute(Command::Set { key: b("k"), value: b("v") })
            .await;
        assert_eq!(reply, Reply::Ok);

        let reply = storage.execute(Command::Get { key: b("k") }).await;
        assert_eq!(reply, Reply::Bulk(b("v")));
    }

    #[tokio::test]
    async fn test_requests_are_applied_in_submission_order() {
        let (storage, _service) = start();

        for i in 0..100 {
            let reply = storage
                .execute(Command::Set {
                    key: b("counter"),
                    value: b(&i.to_string()),
                })
                .await;
            assert_eq!(reply, Reply::Ok);
        }

        let reply = storage.execute(Command::Get { key: b("counter") }).await;
        assert_eq!(reply, Reply::Bulk(b("99")));
    }

    #[tokio::test]
    async fn test_clones_share_one_engine() {
        let (storage, _service) = start();
        let other = storage.clone();

        storage
            .execute(Command::Set { key: b("k"), value: b("v") })
            .await;
        let reply = other.execute(Command::Get { key: b("k") }).await;
        assert_eq!(reply, Reply::Bulk(b("v")));
    }

    #[tokio::test]
    async fn test_execute_after_service_stopped() {
        let (storage, service) = start();
        service.abort();
        let _ = service.await;

        let reply = storage.execute(Command::Get { key: b("k") }).await;
        assert!(reply.is_error());
    }
}
