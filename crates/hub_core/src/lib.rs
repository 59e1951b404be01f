//! Summarize hub core: pure screen state machine and view-model helpers.
mod effect;
mod error;
mod msg;
mod notice;
mod selection;
mod state;
mod summary;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{RequestFailure, ValidationError};
pub use msg::{Msg, SessionInfo, Step};
pub use notice::{NoticeKind, NoticeMessage, Notifier};
pub use selection::{normalize_resource_name, ResourceSelection, SCHEME_PREFIX};
pub use state::{ActivationId, AppState, RequestState, Route};
pub use summary::{Post, SubredditGroup, SummarySet};
pub use update::update;
pub use view_model::{
    format_count, AppViewModel, DashboardBody, DashboardView, GroupSection, LoginView, PostCard,
    ScreenView, SelectionView, SlotView,
};
