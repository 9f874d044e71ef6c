use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use cine_logging::{cine_debug, cine_info};
use tokio_util::sync::CancellationToken;

use crate::{CatalogClient, CatalogRequest, EngineEvent, RequestId};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: CatalogRequest,
    },
    ClearCache,
}

/// Runs catalog requests on a background tokio runtime.
///
/// Completions come back as [`EngineEvent`]s in submission-independent order;
/// the receiver decides which ones are still relevant.
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(client: CatalogClient) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("cine-engine-rt")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(client);
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        let worker = thread::Builder::new()
            .name("cine-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    let token = token.clone();
                    runtime.spawn(async move {
                        tokio::select! {
                            _ = token.cancelled() => {}
                            _ = handle_command(client.as_ref(), command, event_tx) => {}
                        }
                    });
                }
                cine_debug!("engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            shutdown,
            worker: Some(worker),
        })
    }

    pub fn submit(&self, request_id: RequestId, request: CatalogRequest) {
        self.send(EngineCommand::Submit {
            request_id,
            request,
        });
    }

    pub fn clear_cache(&self) {
        self.send(EngineCommand::ClearCache);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Cancels outstanding requests and stops the worker. Idempotent.
    pub fn shutdown(&mut self) {
        self.shutdown.cancel();
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            cine_info!("engine stopped");
        }
    }

    fn send(&self, command: EngineCommand) {
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(command);
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn handle_command(
    client: &CatalogClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            let result = client.respond(&request).await;
            let _ = event_tx.send(EngineEvent::Completed {
                request_id,
                request,
                result,
            });
        }
        EngineCommand::ClearCache => client.clear_cache(),
    }
}
