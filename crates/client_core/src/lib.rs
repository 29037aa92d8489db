use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{error::RequestFailed, protocol::AdditionRequest};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

pub mod service;

pub use service::{AdditionService, HttpAdditionService};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    InputPage,
    ResultPage,
}

/// Live state of one addition screen.
///
/// `result` is `None` when the service answered successfully but without a
/// usable `result` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub current_view: ViewState,
    pub is_pending: bool,
    pub first_operand: String,
    pub second_operand: String,
    pub result: Option<f64>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_view: ViewState::InputPage,
            is_pending: false,
            first_operand: String::new(),
            second_operand: String::new(),
            result: Some(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Every submit sends a request, even while another one is in flight.
    #[default]
    AllowOverlapping,
    /// Submits are refused while `is_pending` is set. A session left pending
    /// by a failed request refuses all further submits.
    RejectWhilePending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed { result: Option<f64> },
    Failed(RequestFailed),
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    SessionChanged(Session),
    RequestFailed(String),
}

pub struct AdditionController {
    service: Arc<dyn AdditionService>,
    policy: SubmitPolicy,
    session: Mutex<Session>,
    events: broadcast::Sender<ControllerEvent>,
}

impl AdditionController {
    pub fn new(service: Arc<dyn AdditionService>) -> Arc<Self> {
        Self::with_policy(service, SubmitPolicy::default())
    }

    pub fn with_policy(service: Arc<dyn AdditionService>, policy: SubmitPolicy) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            service,
            policy,
            session: Mutex::new(Session::default()),
            events,
        })
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn set_first_operand(&self, text: impl Into<String>) {
        let mut guard = self.session.lock().await;
        guard.first_operand = text.into();
        self.publish(&guard);
    }

    pub async fn set_second_operand(&self, text: impl Into<String>) {
        let mut guard = self.session.lock().await;
        guard.second_operand = text.into();
        self.publish(&guard);
    }

    /// Sends the current operands to the addition service and applies the reply.
    ///
    /// Only `is_pending` changes before the request is dispatched. On failure
    /// the session is left as it was at dispatch, `is_pending` included.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut guard = self.session.lock().await;
            if guard.is_pending && self.policy == SubmitPolicy::RejectWhilePending {
                debug!("submit refused while an addition request is pending");
                return SubmitOutcome::Rejected;
            }
            guard.is_pending = true;
            self.publish(&guard);
            AdditionRequest::new(guard.first_operand.clone(), guard.second_operand.clone())
        };

        match self.service.perform_addition(&request).await {
            Ok(reply) => {
                let result = reply.result_value();
                let mut guard = self.session.lock().await;
                guard.result = result;
                guard.is_pending = false;
                guard.first_operand.clear();
                guard.second_operand.clear();
                guard.current_view = ViewState::ResultPage;
                self.publish(&guard);
                info!(?result, "addition completed");
                SubmitOutcome::Completed { result }
            }
            Err(err) => {
                error!(error = %err, "error when requesting addition result");
                let _ = self
                    .events
                    .send(ControllerEvent::RequestFailed(err.to_string()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub async fn return_to_input(&self) {
        let mut guard = self.session.lock().await;
        guard.current_view = ViewState::InputPage;
        self.publish(&guard);
    }

    fn publish(&self, session: &Session) {
        let _ = self
            .events
            .send(ControllerEvent::SessionChanged(session.clone()));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
