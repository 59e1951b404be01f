use hub_logging::{hub_debug, hub_info};

use crate::notice;
use crate::{
    ActivationId, AppState, Effect, Msg, NoticeKind, NoticeMessage, RequestFailure,
    RequestState, Route, SessionInfo, SummarySet,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => probe_session(&mut state, false),
        Msg::ContinueClicked => probe_session(&mut state, true),
        Msg::SessionChecked { activation, result } => {
            session_checked(&mut state, activation, result)
        }
        Msg::LoginClicked => {
            if state.route() == Route::Login {
                vec![Effect::BeginLogin]
            } else {
                Vec::new()
            }
        }
        Msg::AddSlotClicked => {
            if let Some(screen) = state.selection_mut() {
                screen.focus = screen.selection.add_slot();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RemoveSlotClicked { index } => {
            if let Some(screen) = state.selection_mut() {
                if screen.selection.remove_slot(index) {
                    if screen.focus > index {
                        screen.focus -= 1;
                    }
                    screen.clamp_focus();
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::SlotEdited { index, value } => {
            if let Some(screen) = state.selection_mut() {
                if screen.selection.edit_slot(index, &value) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::FocusMoved(step) => {
            if let Some(screen) = state.selection_mut() {
                if screen.move_focus(step) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmitCompleted { activation, result } => {
            submit_completed(&mut state, activation, result)
        }
        Msg::SummariesLoaded { activation, result } => {
            summaries_loaded(&mut state, activation, result)
        }
        Msg::CursorMoved(step) => {
            if let Some(screen) = state.dashboard_mut() {
                if screen.move_cursor(step) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::OpenPostClicked => open_post(&mut state),
        Msg::Navigate(route) => navigate(&mut state, route),
        Msg::LogoutClicked => {
            if state.logout_pending() || state.route() == Route::Login {
                Vec::new()
            } else {
                state.set_logout_pending(true);
                vec![Effect::Logout]
            }
        }
        Msg::LogoutCompleted { result } => logout_completed(&mut state, result),
    };

    (state, effects)
}

fn probe_session(state: &mut AppState, manual: bool) -> Vec<Effect> {
    let Some(screen) = state.login_mut() else {
        return Vec::new();
    };
    if screen.probe.is_loading() {
        if manual && !screen.probe_is_manual {
            screen.probe_is_manual = true;
            state.mark_dirty();
        }
        return Vec::new();
    }
    screen.probe = RequestState::Loading;
    screen.probe_is_manual = manual;
    let activation = screen.activation;
    state.mark_dirty();
    vec![Effect::CheckSession { activation }]
}

fn session_checked(
    state: &mut AppState,
    activation: ActivationId,
    result: Result<SessionInfo, RequestFailure>,
) -> Vec<Effect> {
    let Some(screen) = state
        .login_mut()
        .filter(|screen| screen.activation == activation && screen.probe.is_loading())
    else {
        return discard("session probe", activation);
    };
    let manual = screen.probe_is_manual;

    match result {
        Ok(info) if info.authenticated => {
            let message = notice::signed_in(info.name.as_deref());
            hub_info!("Session active for {:?}", info.name);
            state.set_signed_in_as(info.name);
            state.enter_selection();
            vec![notify(NoticeKind::Success, message)]
        }
        Ok(_) => {
            screen.probe = RequestState::Failed;
            state.mark_dirty();
            if manual {
                vec![notify(NoticeKind::Failure, notice::not_signed_in())]
            } else {
                Vec::new()
            }
        }
        Err(failure) => {
            screen.probe = RequestState::Failed;
            state.mark_dirty();
            if manual {
                vec![notify(
                    NoticeKind::Failure,
                    notice::session_check_failed(&failure),
                )]
            } else {
                hub_debug!("Start-up session probe failed: {}", failure);
                Vec::new()
            }
        }
    }
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    let Some(screen) = state.selection_mut() else {
        return Vec::new();
    };
    if screen.submit.is_loading() {
        hub_debug!("Submit ignored: a submission is already in flight");
        return Vec::new();
    }
    match screen.selection.submittable() {
        Err(err) => {
            hub_debug!("Submit rejected: {}", err);
            vec![notify(NoticeKind::Failure, notice::no_subreddits_selected())]
        }
        Ok(subreddits) => {
            screen.submit = RequestState::Loading;
            let activation = screen.activation;
            state.mark_dirty();
            vec![Effect::SubmitSelection {
                activation,
                subreddits,
            }]
        }
    }
}

fn submit_completed(
    state: &mut AppState,
    activation: ActivationId,
    result: Result<(), RequestFailure>,
) -> Vec<Effect> {
    let Some(screen) = state
        .selection_mut()
        .filter(|screen| screen.activation == activation && screen.submit.is_loading())
    else {
        return discard("submission", activation);
    };

    match result {
        Ok(()) => {
            screen.submit = RequestState::Succeeded;
            let load = state.enter_dashboard();
            vec![notify(NoticeKind::Success, notice::summaries_fetched()), load]
        }
        Err(failure) => {
            hub_info!("Submission failed: {}", failure);
            screen.submit = RequestState::Failed;
            state.mark_dirty();
            vec![notify(NoticeKind::Failure, notice::submit_failed())]
        }
    }
}

fn summaries_loaded(
    state: &mut AppState,
    activation: ActivationId,
    result: Result<SummarySet, RequestFailure>,
) -> Vec<Effect> {
    let Some(screen) = state
        .dashboard_mut()
        .filter(|screen| screen.activation == activation && screen.load.is_loading())
    else {
        return discard("summary load", activation);
    };

    let effects = match result {
        Ok(summaries) => {
            screen.summaries = summaries;
            screen.load = RequestState::Succeeded;
            Vec::new()
        }
        Err(failure) => {
            hub_info!("Loading summaries failed: {}", failure);
            screen.summaries = SummarySet::new();
            screen.load = RequestState::Failed;
            vec![notify(NoticeKind::Failure, notice::load_failed())]
        }
    };
    screen.cursor = 0;
    state.mark_dirty();
    effects
}

fn open_post(state: &mut AppState) -> Vec<Effect> {
    let Some(screen) = state.dashboard_mut() else {
        return Vec::new();
    };
    let Some(post) = screen.post_at_cursor() else {
        return Vec::new();
    };
    match url::Url::parse(&post.url) {
        Ok(_) => vec![Effect::OpenUrl {
            url: post.url.clone(),
        }],
        Err(_) => vec![notify(
            NoticeKind::Failure,
            notice::invalid_post_link(&post.url),
        )],
    }
}

fn navigate(state: &mut AppState, route: Route) -> Vec<Effect> {
    if state.route() == route {
        return Vec::new();
    }
    hub_debug!("Navigating {:?} -> {:?}", state.route(), route);
    match route {
        Route::Login => {
            state.enter_login();
            Vec::new()
        }
        Route::Selection => {
            state.enter_selection();
            Vec::new()
        }
        Route::Dashboard => vec![state.enter_dashboard()],
    }
}

fn logout_completed(state: &mut AppState, result: Result<(), RequestFailure>) -> Vec<Effect> {
    if !state.logout_pending() {
        hub_debug!("Discarding unexpected logout completion");
        return Vec::new();
    }
    state.set_logout_pending(false);
    state.set_signed_in_as(None);
    if state.route() != Route::Login {
        state.enter_login();
    }
    match result {
        Ok(()) => vec![notify(NoticeKind::Success, notice::signed_out())],
        Err(failure) => {
            hub_info!("Logout failed: {}", failure);
            vec![notify(NoticeKind::Failure, notice::sign_out_failed())]
        }
    }
}

fn discard(what: &str, activation: ActivationId) -> Vec<Effect> {
    hub_debug!(
        "Discarding {} completion for activation {}: screen no longer active",
        what,
        activation
    );
    Vec::new()
}

fn notify(kind: NoticeKind, message: NoticeMessage) -> Effect {
    Effect::Notify { kind, message }
}
