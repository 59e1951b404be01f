use std::sync::{mpsc, Arc};
use std::thread;

use hub_logging::{hub_debug, hub_warn};

use crate::api::{ReqwestSummaryApi, SummaryApi};
use crate::{ClientSettings, EngineError, EngineEvent, RequestId};

enum EngineCommand {
    SubmitSelection {
        request_id: RequestId,
        subreddits: Vec<String>,
    },
    FetchSummaries {
        request_id: RequestId,
    },
    CheckSession {
        request_id: RequestId,
    },
    Logout,
}

/// Handle to the engine thread. Commands are fire-and-forget; each one yields
/// exactly one `EngineEvent` on the channel given at construction.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: ClientSettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let api = ReqwestSummaryApi::new(settings)?;
        Self::with_api(Arc::new(api), event_tx)
    }

    pub fn with_api(
        api: Arc<dyn SummaryApi>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("hub-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
                hub_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit_selection(&self, request_id: RequestId, subreddits: Vec<String>) {
        self.send(EngineCommand::SubmitSelection {
            request_id,
            subreddits,
        });
    }

    pub fn fetch_summaries(&self, request_id: RequestId) {
        self.send(EngineCommand::FetchSummaries { request_id });
    }

    pub fn check_session(&self, request_id: RequestId) {
        self.send(EngineCommand::CheckSession { request_id });
    }

    pub fn logout(&self) {
        self.send(EngineCommand::Logout);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            hub_warn!("Engine thread has stopped; command dropped");
        }
    }
}

async fn handle_command(
    api: &dyn SummaryApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::SubmitSelection {
            request_id,
            subreddits,
        } => EngineEvent::SelectionSubmitted {
            request_id,
            result: api.submit_selection(&subreddits).await,
        },
        EngineCommand::FetchSummaries { request_id } => EngineEvent::SummariesFetched {
            request_id,
            result: api.fetch_summaries().await,
        },
        EngineCommand::CheckSession { request_id } => EngineEvent::SessionChecked {
            request_id,
            result: api.check_session().await,
        },
        EngineCommand::Logout => EngineEvent::LoggedOut {
            result: api.logout().await,
        },
    };
    if event_tx.send(event).is_err() {
        hub_debug!("Event receiver dropped; completion discarded");
    }
}
