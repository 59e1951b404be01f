use std::sync::{mpsc, Arc};
use std::thread;

use hub_core::{
    Effect, Msg, NoticeKind, NoticeMessage, Notifier, Post, RequestFailure, SessionInfo,
    SubredditGroup,
};
use hub_engine::{
    ApiError, ClientSettings, EngineError, EngineEvent, EngineHandle, FailureKind,
    SubredditSummary,
};
use hub_logging::{hub_debug, hub_info, hub_warn};

use crate::browser::Browser;

/// Executes the effects emitted by `update` against the engine, the
/// notifier and the browser.
pub struct EffectRunner {
    engine: EngineHandle,
    login_url: String,
    notifier: Arc<dyn Notifier>,
    browser: Arc<dyn Browser>,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        msg_tx: mpsc::Sender<Msg>,
        notifier: Arc<dyn Notifier>,
        browser: Arc<dyn Browser>,
    ) -> Result<Self, EngineError> {
        let login_url = settings.login_url()?.to_string();
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(settings, event_tx)?;
        spawn_event_forwarder(event_rx, msg_tx);
        Ok(Self::with_engine(engine, login_url, notifier, browser))
    }

    pub fn with_engine(
        engine: EngineHandle,
        login_url: String,
        notifier: Arc<dyn Notifier>,
        browser: Arc<dyn Browser>,
    ) -> Self {
        Self {
            engine,
            login_url,
            notifier,
            browser,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CheckSession { activation } => {
                    hub_info!("CheckSession activation={}", activation);
                    self.engine.check_session(activation);
                }
                Effect::BeginLogin => {
                    hub_info!("BeginLogin url={}", self.login_url);
                    if let Err(err) = self.browser.open(&self.login_url) {
                        hub_warn!("Could not open browser for login: {}", err);
                        self.notifier.notify(
                            NoticeKind::Failure,
                            &NoticeMessage::new(
                                "Could not open your browser",
                                format!("Open {} to log in with Reddit.", self.login_url),
                            ),
                        );
                    }
                }
                Effect::SubmitSelection {
                    activation,
                    subreddits,
                } => {
                    hub_info!(
                        "SubmitSelection activation={} subreddits={:?}",
                        activation,
                        subreddits
                    );
                    self.engine.submit_selection(activation, subreddits);
                }
                Effect::LoadSummaries { activation } => {
                    hub_info!("LoadSummaries activation={}", activation);
                    self.engine.fetch_summaries(activation);
                }
                Effect::Logout => {
                    hub_info!("Logout");
                    self.engine.logout();
                }
                Effect::OpenUrl { url } => {
                    hub_info!("OpenUrl url={}", url);
                    if let Err(err) = self.browser.open(&url) {
                        hub_warn!("Could not open {}: {}", url, err);
                        self.notifier.notify(
                            NoticeKind::Failure,
                            &NoticeMessage::new("Could not open post", url),
                        );
                    }
                }
                Effect::Notify { kind, message } => {
                    self.notifier.notify(kind, &message);
                }
            }
        }
    }
}

/// Forwards engine completions into the UI message queue until either side hangs up.
pub fn spawn_event_forwarder(
    event_rx: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
        hub_debug!("Engine event forwarder stopped");
    })
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SelectionSubmitted { request_id, result } => Msg::SubmitCompleted {
            activation: request_id,
            result: result.map_err(map_failure),
        },
        EngineEvent::SummariesFetched { request_id, result } => Msg::SummariesLoaded {
            activation: request_id,
            result: result
                .map(|groups| groups.into_iter().map(map_group).collect())
                .map_err(map_failure),
        },
        EngineEvent::SessionChecked { request_id, result } => Msg::SessionChecked {
            activation: request_id,
            result: result
                .map(|status| SessionInfo {
                    authenticated: status.authenticated,
                    name: status.name,
                })
                .map_err(map_failure),
        },
        EngineEvent::LoggedOut { result } => Msg::LogoutCompleted {
            result: result.map_err(map_failure),
        },
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    hub_warn!("Request failed: {}", err);
    match err.kind {
        FailureKind::HttpStatus(code) => RequestFailure::Status(code),
        FailureKind::Decode => RequestFailure::Malformed(err.message),
        FailureKind::InvalidUrl | FailureKind::Timeout | FailureKind::Network => {
            RequestFailure::Transport(err.to_string())
        }
    }
}

fn map_group(group: SubredditSummary) -> SubredditGroup {
    SubredditGroup {
        subreddit: group.subreddit,
        posts: group
            .posts
            .into_iter()
            .map(|post| Post {
                id: post.id,
                title: post.title,
                summary: post.summary,
                score: post.score,
                comments: post.comments,
                url: post.url,
                author: post.author,
                subreddit: post.subreddit,
            })
            .collect(),
        error: group.error,
    }
}
