use hub_core::{
    update, AppState, Effect, LoginView, Msg, NoticeKind, RequestFailure, Route, ScreenView,
    SessionInfo,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    hub_logging::initialize_for_tests();
}

fn login_view(state: &AppState) -> LoginView {
    match state.view().screen {
        ScreenView::Login(view) => view,
        other => panic!("expected login, got {other:?}"),
    }
}

fn probe_activation(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::CheckSession { activation } => Some(*activation),
            _ => None,
        })
        .expect("check session effect")
}

#[test]
fn app_starts_on_login() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.route(), Route::Login);
    assert_eq!(login_view(&state), LoginView { checking: false });
}

#[test]
fn login_click_hands_off_to_identity_provider() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoginClicked);
    assert_eq!(effects, vec![Effect::BeginLogin]);
    assert_eq!(state.route(), Route::Login);
}

#[test]
fn login_click_is_ignored_off_the_login_screen() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Selection));
    let (_state, effects) = update(state, Msg::LoginClicked);
    assert!(effects.is_empty());
}

#[test]
fn startup_probe_with_active_session_goes_to_selection() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    assert!(login_view(&state).checking);
    let activation = probe_activation(&effects);

    let (state, effects) = update(
        state,
        Msg::SessionChecked {
            activation,
            result: Ok(SessionInfo {
                authenticated: true,
                name: Some("spez".to_string()),
            }),
        },
    );

    assert_eq!(state.route(), Route::Selection);
    assert_eq!(state.view().signed_in_as.as_deref(), Some("spez"));
    assert!(matches!(
        &effects[..],
        [Effect::Notify { kind: NoticeKind::Success, message }] if message.description == "Signed in as u/spez"
    ));
}

#[test]
fn startup_probe_without_session_stays_silently_on_login() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let activation = probe_activation(&effects);

    let (state, effects) = update(
        state,
        Msg::SessionChecked {
            activation,
            result: Ok(SessionInfo::default()),
        },
    );
    assert_eq!(state.route(), Route::Login);
    assert!(!login_view(&state).checking);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::Started);
    let activation = probe_activation(&effects);
    let (_state, effects) = update(
        state,
        Msg::SessionChecked {
            activation,
            result: Err(RequestFailure::Transport("refused".to_string())),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn manual_continue_reports_missing_session() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ContinueClicked);
    let activation = probe_activation(&effects);

    let (state, effects) = update(
        state,
        Msg::SessionChecked {
            activation,
            result: Ok(SessionInfo::default()),
        },
    );
    assert_eq!(state.route(), Route::Login);
    assert!(matches!(
        &effects[..],
        [Effect::Notify { kind: NoticeKind::Failure, message }] if message.title == "Not signed in"
    ));
}

#[test]
fn only_one_probe_in_flight() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::Started);
    assert_eq!(first.len(), 1);
    let (_state, second) = update(state, Msg::ContinueClicked);
    assert!(second.is_empty());
}

#[test]
fn continue_during_startup_probe_reports_missing_session() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let activation = probe_activation(&effects);

    let (state, effects) = update(state, Msg::ContinueClicked);
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::SessionChecked {
            activation,
            result: Ok(SessionInfo::default()),
        },
    );
    assert_eq!(state.route(), Route::Login);
    assert!(matches!(
        &effects[..],
        [Effect::Notify { kind: NoticeKind::Failure, message }] if message.title == "Not signed in"
    ));
}

#[test]
fn late_submit_completion_after_leaving_is_discarded() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Selection));
    let (state, _) = update(
        state,
        Msg::SlotEdited {
            index: 0,
            value: "rust".to_string(),
        },
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let stale = state.activation();

    // User leaves and comes back before the POST settles.
    let (state, _) = update(state, Msg::Navigate(Route::Dashboard));
    let (state, _) = update(state, Msg::Navigate(Route::Selection));
    let before = state.view();

    let (next, effects) = update(
        state,
        Msg::SubmitCompleted {
            activation: stale,
            result: Ok(()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.route(), Route::Selection);
    assert_eq!(next.view(), before);
}

#[test]
fn late_summary_load_for_previous_activation_is_discarded() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Dashboard));
    let stale = state.activation();
    let (state, _) = update(state, Msg::Navigate(Route::Selection));
    let (state, effects) = update(state, Msg::Navigate(Route::Dashboard));
    let current = state.activation();
    assert_eq!(effects, vec![Effect::LoadSummaries { activation: current }]);

    let (state, effects) = update(
        state,
        Msg::SummariesLoaded {
            activation: stale,
            result: Err(RequestFailure::Status(500)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().screen,
        update(AppState::new(), Msg::Navigate(Route::Dashboard))
            .0
            .view()
            .screen
    );

    let (_state, effects) = update(
        state,
        Msg::SummariesLoaded {
            activation: current,
            result: Ok(Vec::new()),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn duplicate_completion_for_settled_request_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Dashboard));
    let activation = state.activation();
    let (state, _) = update(
        state,
        Msg::SummariesLoaded {
            activation,
            result: Ok(Vec::new()),
        },
    );
    let before = state.view();
    let (state, effects) = update(
        state,
        Msg::SummariesLoaded {
            activation,
            result: Err(RequestFailure::Status(502)),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn logout_returns_to_login() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Selection));
    let (state, effects) = update(state, Msg::LogoutClicked);
    assert_eq!(effects, vec![Effect::Logout]);
    assert!(state.view().logout_pending);

    let (state, again) = update(state, Msg::LogoutClicked);
    assert!(again.is_empty());

    let (state, effects) = update(state, Msg::LogoutCompleted { result: Ok(()) });
    assert_eq!(state.route(), Route::Login);
    assert!(!state.view().logout_pending);
    assert_eq!(state.view().signed_in_as, None);
    assert!(matches!(
        &effects[..],
        [Effect::Notify { kind: NoticeKind::Success, .. }]
    ));
}

#[test]
fn failed_logout_still_returns_to_login_with_notice() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Dashboard));
    let (state, _) = update(state, Msg::LogoutClicked);
    let (state, effects) = update(
        state,
        Msg::LogoutCompleted {
            result: Err(RequestFailure::Status(500)),
        },
    );
    assert_eq!(state.route(), Route::Login);
    assert!(matches!(
        &effects[..],
        [Effect::Notify { kind: NoticeKind::Failure, .. }]
    ));
}

#[test]
fn dirty_flag_tracks_changes() {
    init_logging();
    let mut state = AppState::new();
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());

    let (mut state, _) = update(state, Msg::RemoveSlotClicked { index: 0 });
    assert!(!state.consume_dirty());

    let (mut state, _) = update(state, Msg::Navigate(Route::Selection));
    assert!(state.consume_dirty());
}
