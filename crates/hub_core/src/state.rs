use crate::view_model::{self, AppViewModel};
use crate::{Effect, ResourceSelection, Step, SummarySet};

/// Identity of one screen activation. Strictly increasing per `AppState`.
pub type ActivationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Selection,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn is_loading(self) -> bool {
        self == RequestState::Loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoginScreen {
    pub(crate) activation: ActivationId,
    pub(crate) probe: RequestState,
    /// Probe was requested by the user rather than by start-up.
    pub(crate) probe_is_manual: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectionScreen {
    pub(crate) activation: ActivationId,
    pub(crate) selection: ResourceSelection,
    pub(crate) focus: usize,
    pub(crate) submit: RequestState,
}

impl SelectionScreen {
    pub(crate) fn move_focus(&mut self, step: Step) -> bool {
        let next = step_index(self.focus, step, self.selection.slot_count());
        let moved = next != self.focus;
        self.focus = next;
        moved
    }

    pub(crate) fn clamp_focus(&mut self) {
        let last = self.selection.slot_count().saturating_sub(1);
        self.focus = self.focus.min(last);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DashboardScreen {
    pub(crate) activation: ActivationId,
    pub(crate) summaries: SummarySet,
    pub(crate) load: RequestState,
    /// Index into the flattened post list.
    pub(crate) cursor: usize,
}

impl DashboardScreen {
    pub(crate) fn post_count(&self) -> usize {
        self.summaries.iter().map(|group| group.posts.len()).sum()
    }

    pub(crate) fn post_at_cursor(&self) -> Option<&crate::Post> {
        self.summaries
            .iter()
            .flat_map(|group| group.posts.iter())
            .nth(self.cursor)
    }

    pub(crate) fn move_cursor(&mut self, step: Step) -> bool {
        let next = step_index(self.cursor, step, self.post_count());
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Screen {
    Login(LoginScreen),
    Selection(SelectionScreen),
    Dashboard(DashboardScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    screen: Screen,
    last_activation: ActivationId,
    signed_in_as: Option<String>,
    logout_pending: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Login(LoginScreen {
                activation: 1,
                probe: RequestState::Idle,
                probe_is_manual: false,
            }),
            last_activation: 1,
            signed_in_as: None,
            logout_pending: false,
            dirty: true,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        match self.screen {
            Screen::Login(_) => Route::Login,
            Screen::Selection(_) => Route::Selection,
            Screen::Dashboard(_) => Route::Dashboard,
        }
    }

    /// Activation id of the screen currently shown.
    pub fn activation(&self) -> ActivationId {
        match &self.screen {
            Screen::Login(screen) => screen.activation,
            Screen::Selection(screen) => screen.activation,
            Screen::Dashboard(screen) => screen.activation,
        }
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn screen(&self) -> &Screen {
        &self.screen
    }

    pub(crate) fn signed_in_as(&self) -> Option<&str> {
        self.signed_in_as.as_deref()
    }

    pub(crate) fn set_signed_in_as(&mut self, name: Option<String>) {
        self.signed_in_as = name;
    }

    pub(crate) fn logout_pending(&self) -> bool {
        self.logout_pending
    }

    pub(crate) fn set_logout_pending(&mut self, pending: bool) {
        self.logout_pending = pending;
        self.mark_dirty();
    }

    pub(crate) fn login_mut(&mut self) -> Option<&mut LoginScreen> {
        match &mut self.screen {
            Screen::Login(screen) => Some(screen),
            _ => None,
        }
    }

    pub(crate) fn selection_mut(&mut self) -> Option<&mut SelectionScreen> {
        match &mut self.screen {
            Screen::Selection(screen) => Some(screen),
            _ => None,
        }
    }

    pub(crate) fn dashboard_mut(&mut self) -> Option<&mut DashboardScreen> {
        match &mut self.screen {
            Screen::Dashboard(screen) => Some(screen),
            _ => None,
        }
    }

    fn next_activation(&mut self) -> ActivationId {
        self.last_activation += 1;
        self.last_activation
    }

    pub(crate) fn enter_login(&mut self) {
        let activation = self.next_activation();
        self.screen = Screen::Login(LoginScreen {
            activation,
            probe: RequestState::Idle,
            probe_is_manual: false,
        });
        self.mark_dirty();
    }

    pub(crate) fn enter_selection(&mut self) {
        let activation = self.next_activation();
        self.screen = Screen::Selection(SelectionScreen {
            activation,
            selection: ResourceSelection::new(),
            focus: 0,
            submit: RequestState::Idle,
        });
        self.mark_dirty();
    }

    /// Activates the dashboard in Loading and returns its fetch effect.
    pub(crate) fn enter_dashboard(&mut self) -> Effect {
        let activation = self.next_activation();
        self.screen = Screen::Dashboard(DashboardScreen {
            activation,
            summaries: SummarySet::new(),
            load: RequestState::Loading,
            cursor: 0,
        });
        self.mark_dirty();
        Effect::LoadSummaries { activation }
    }
}

fn step_index(current: usize, step: Step, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match step {
        Step::Previous => current.saturating_sub(1),
        Step::Next => (current + 1).min(len - 1),
    }
}
