//! Summarize hub engine: backend HTTP client and effect execution.
mod api;
mod engine;
mod settings;
mod types;

pub use api::{ReqwestSummaryApi, SummaryApi};
pub use engine::EngineHandle;
pub use settings::{ClientSettings, DEFAULT_BACKEND_URL, MAX_POST_LIMIT};
pub use types::{
    ApiError, EngineError, EngineEvent, FailureKind, PostRecord, RequestId, SelectionRequest,
    SessionStatus, SubredditSummary,
};
