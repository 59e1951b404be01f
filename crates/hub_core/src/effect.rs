use crate::{ActivationId, NoticeKind, NoticeMessage};

/// Side effects requested by `update`. Request effects carry the activation
/// of the screen that issued them; the matching completion must echo it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe `/api/me/` for an existing backend session.
    CheckSession { activation: ActivationId },
    /// Hand control to the identity provider via `/api/login/`.
    BeginLogin,
    /// `POST /api/summaries/` with the validated names.
    SubmitSelection {
        activation: ActivationId,
        subreddits: Vec<String>,
    },
    /// `GET /api/summaries/`.
    LoadSummaries { activation: ActivationId },
    /// `POST /api/logout/`.
    Logout,
    /// Open a link in a new browsing context.
    OpenUrl { url: String },
    Notify {
        kind: NoticeKind,
        message: NoticeMessage,
    },
}
