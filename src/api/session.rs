use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::Client;
use tokio::runtime::Handle;

use super::models::SessionConfig;
use super::request::{OgRequest, WireRequest};
use super::task::{Task, TransferHandle};
use crate::domain::{Error, Result, TransportError};

/// In-flight tasks keyed by id.
#[derive(Debug, Default)]
struct TaskRegistry {
    tasks: Mutex<HashMap<String, Task>>,
}

impl TaskRegistry {
    fn register(&self, task: &Task) -> bool {
        match self.tasks.lock().entry(task.id().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(task.clone());
                true
            }
        }
    }

    /// Removes the entry and returns whether the task was expired at that
    /// moment. The read happens under the registry lock so only one
    /// completion path can observe it.
    ///
    /// A missing entry is reported as expired: the result has no owner
    /// left to consider it current.
    fn complete(&self, id: &str) -> bool {
        let mut tasks = self.tasks.lock();
        match tasks.remove(id) {
            Some(task) => task.is_expired(),
            None => {
                tracing::warn!(task_id = id, "completed task missing from registry");
                true
            }
        }
    }

    fn len(&self) -> usize {
        self.tasks.lock().len()
    }
}

/// Owns the HTTP client and tracks every transfer it starts.
///
/// Transfers run on the Tokio runtime that was current when the session
/// was created, so `send` itself can be called from any thread.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    registry: Arc<TaskRegistry>,
    runtime: Handle,
}

impl Session {
    /// Fails with [`Error::NoRuntime`] outside a Tokio runtime.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .read_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            registry: Arc::new(TaskRegistry::default()),
            runtime,
        })
    }

    /// Number of tasks whose transfer has not completed yet.
    pub fn in_flight(&self) -> usize {
        self.registry.len()
    }

    /// Start the transfer for `request` and return `task` immediately.
    ///
    /// `completion` runs exactly once, on the session's runtime, after the task
    /// has left the registry. The `bool` passed along is the task's
    /// expiration state at that point. Cancelled transfers complete with
    /// [`TransportError::Cancelled`].
    ///
    /// A task that was already sent is rejected synchronously with
    /// [`Error::DuplicateTask`].
    pub fn send<R, C>(&self, request: R, task: Task, completion: C) -> Task
    where
        R: OgRequest,
        C: FnOnce(Result<R::Response>, bool) + Send + 'static,
    {
        let transfer = TransferHandle::new();
        if !task.attach(transfer.clone()) || !self.registry.register(&task) {
            completion(Err(Error::DuplicateTask(task.id().to_string())), task.is_expired());
            return task;
        }

        let wire = request.wire_request();
        let task_id = task.id().to_string();
        tracing::debug!(task_id = %task_id, url = %wire.url, "sending request");

        let client = self.client.clone();
        let registry = Arc::clone(&self.registry);
        self.runtime.spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = transfer.cancelled() => Err(TransportError::Cancelled),
                result = execute(&client, wire) => result,
            };

            let is_expired = registry.complete(&task_id);
            tracing::debug!(
                task_id = %task_id,
                is_expired,
                ok = outcome.is_ok(),
                "transfer completed"
            );

            let result = match outcome {
                Err(e) => Err(e.into()),
                Ok(data) if data.is_empty() => Err(Error::NoData),
                Ok(data) => request.decode(&data).map_err(Error::from),
            };
            completion(result, is_expired);
        });

        task
    }
}

/// Error statuses still carry a body worth decoding, so only network-level
/// failures are reported here.
async fn execute(client: &Client, wire: WireRequest) -> std::result::Result<Bytes, TransportError> {
    let response = client
        .request(wire.method, wire.url)
        .headers(wire.headers)
        .send()
        .await?;

    Ok(response.bytes().await?)
}
