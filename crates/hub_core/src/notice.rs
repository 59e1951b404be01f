#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeMessage {
    pub title: String,
    pub description: String,
}

impl NoticeMessage {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// User-visible feedback channel (toasts). Injected by the host so tests can
/// substitute a recording double.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &NoticeMessage);
}

pub(crate) fn no_subreddits_selected() -> NoticeMessage {
    NoticeMessage::new(
        "No subreddits selected",
        "Please enter at least one subreddit name.",
    )
}

pub(crate) fn summaries_fetched() -> NoticeMessage {
    NoticeMessage::new("Summaries fetched!", "Redirecting to dashboard...")
}

pub(crate) fn submit_failed() -> NoticeMessage {
    NoticeMessage::new("Error fetching summaries", "Please try again later.")
}

pub(crate) fn load_failed() -> NoticeMessage {
    NoticeMessage::new(
        "Error loading summaries",
        "Unable to load your summaries. Please try again.",
    )
}

pub(crate) fn signed_in(name: Option<&str>) -> NoticeMessage {
    match name {
        Some(name) => NoticeMessage::new("Signed in", format!("Signed in as u/{name}")),
        None => NoticeMessage::new("Signed in", "Your session is active."),
    }
}

pub(crate) fn not_signed_in() -> NoticeMessage {
    NoticeMessage::new(
        "Not signed in",
        "Finish logging in with Reddit in your browser, then continue.",
    )
}

pub(crate) fn session_check_failed(failure: &crate::RequestFailure) -> NoticeMessage {
    NoticeMessage::new("Could not check your session", failure.to_string())
}

pub(crate) fn signed_out() -> NoticeMessage {
    NoticeMessage::new("Signed out", "Your session has ended.")
}

pub(crate) fn sign_out_failed() -> NoticeMessage {
    NoticeMessage::new(
        "Error signing out",
        "The server did not confirm the logout. Please try again later.",
    )
}

pub(crate) fn invalid_post_link(url: &str) -> NoticeMessage {
    NoticeMessage::new("Cannot open post", format!("Invalid link: {url}"))
}
