//! Background fetches tied to screen activations.
//!
//! Requests run as tasks on the tokio runtime and report back over a channel
//! that the UI loop drains every tick. Each request belongs to the activation
//! that issued it; cancelling an activation aborts its tasks and drops any
//! result that was already on its way.

use crate::api::{FetchError, ListClient};
use crate::model::{HomeResponse, ListInstanceParams, ListSummary, User, ViewKey};
use crate::navigation::ActivationId;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// What a screen asks the fetcher to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// `GET /` for the home screen.
    Home,
    /// `GET /list/{template_id}/{uid}` for `user`'s view of `list`.
    ListInstance { list: ListSummary, user: User },
}

impl FetchRequest {
    pub fn describe(&self) -> String {
        match self {
            FetchRequest::Home => "home".to_string(),
            FetchRequest::ListInstance { list, user } => {
                format!("list {}", ViewKey::new(list, user))
            }
        }
    }
}

/// Successful fetch result, shaped for the screen that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Home(HomeResponse),
    ListInstance(Box<ListInstanceParams>),
}

pub type FetchResult = Result<FetchResponse, FetchError>;

/// A finished request, addressed to the activation that issued it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub activation: ActivationId,
    pub request_id: u64,
    pub result: FetchResult,
}

struct InFlight {
    activation: ActivationId,
    abort: AbortHandle,
}

/// Runs list-service requests off the UI thread.
pub struct Fetcher {
    client: Arc<ListClient>,
    handle: Handle,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    in_flight: HashMap<u64, InFlight>,
    next_request_id: u64,
}

impl Fetcher {
    pub fn new(client: ListClient, handle: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client: Arc::new(client),
            handle,
            tx,
            rx,
            in_flight: HashMap::new(),
            next_request_id: 0,
        }
    }

    /// Start `request` on behalf of `activation`. Returns the request id.
    pub fn submit(&mut self, activation: ActivationId, request: FetchRequest) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        info!(
            "Fetching {} for activation {} (request {})",
            request.describe(),
            activation,
            request_id
        );

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let task = self.handle.spawn(async move {
            let result = execute(&client, request).await;
            // The receiver only goes away with the fetcher itself.
            let _ = tx.send(FetchOutcome {
                activation,
                request_id,
                result,
            });
        });

        self.in_flight.insert(
            request_id,
            InFlight {
                activation,
                abort: task.abort_handle(),
            },
        );
        request_id
    }

    /// Drain finished requests. Results of cancelled requests are dropped.
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => {
                    if self.in_flight.remove(&outcome.request_id).is_some() {
                        outcomes.push(outcome);
                    } else {
                        debug!(
                            "Dropping result of cancelled request {} (activation {})",
                            outcome.request_id, outcome.activation
                        );
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Fetch channel disconnected");
                    break;
                }
            }
        }
        outcomes
    }

    /// Abort every request issued by `activation`.
    pub fn cancel(&mut self, activation: ActivationId) {
        self.in_flight.retain(|request_id, in_flight| {
            if in_flight.activation == activation {
                info!(
                    "Cancelling request {} of torn-down activation {}",
                    request_id, activation
                );
                in_flight.abort.abort();
                false
            } else {
                true
            }
        });
    }

    /// Whether `activation` has a request that has not been delivered yet.
    pub fn is_pending(&self, activation: ActivationId) -> bool {
        self.in_flight.values().any(|f| f.activation == activation)
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }
}

async fn execute(client: &ListClient, request: FetchRequest) -> FetchResult {
    match request {
        FetchRequest::Home => client.fetch_home().await.map(FetchResponse::Home),
        FetchRequest::ListInstance { list, user } => {
            let response = client.fetch_list(&list.template_id, &user.uid).await?;
            Ok(FetchResponse::ListInstance(Box::new(
                ListInstanceParams::from_response(list, user, response),
            )))
        }
    }
}
