use crate::{ActivationId, RequestFailure, Route, SummarySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// Answer of the backend session probe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host finished start-up.
    Started,
    /// User asked to log in with Reddit.
    LoginClicked,
    /// User finished the browser login and wants to continue.
    ContinueClicked,
    /// Engine answered a session probe.
    SessionChecked {
        activation: ActivationId,
        result: Result<SessionInfo, RequestFailure>,
    },
    /// User asked for another subreddit input.
    AddSlotClicked,
    /// User removed the input at `index`.
    RemoveSlotClicked { index: usize },
    /// User edited the input at `index`; `value` is the raw text.
    SlotEdited { index: usize, value: String },
    /// Move input focus on the selection screen.
    FocusMoved(Step),
    /// User clicked "Fetch Summaries".
    SubmitClicked,
    /// Engine completion for the selection POST.
    SubmitCompleted {
        activation: ActivationId,
        result: Result<(), RequestFailure>,
    },
    /// Engine completion for the dashboard GET.
    SummariesLoaded {
        activation: ActivationId,
        result: Result<SummarySet, RequestFailure>,
    },
    /// Move the post cursor on the dashboard.
    CursorMoved(Step),
    /// User asked to open the post under the cursor.
    OpenPostClicked,
    /// Programmatic or manual navigation. Carries no payload.
    Navigate(Route),
    LogoutClicked,
    /// Engine completion for the logout POST.
    LogoutCompleted { result: Result<(), RequestFailure> },
}
