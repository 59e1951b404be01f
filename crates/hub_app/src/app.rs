use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use hub_core::{update, AppState, AppViewModel, Msg};
use hub_logging::{hub_debug, hub_info};
use ratatui::DefaultTerminal;

use crate::browser::SystemBrowser;
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::notify::ToastBoard;
use crate::ui::keys::{map_key, KeyAction};
use crate::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    hub_info!("Starting summarize_hub against {}", config.client.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let toasts = Arc::new(ToastBoard::default());
    let runner = EffectRunner::new(
        config.client,
        msg_tx,
        toasts.clone(),
        Arc::new(SystemBrowser),
    )
    .context("failed to start request engine")?;

    let mut terminal = ratatui::try_init().context("failed to initialise terminal")?;
    let result = event_loop(&mut terminal, Controller::new(runner), &msg_rx, &toasts);
    ratatui::restore();
    hub_info!("summarize_hub exiting");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    mut controller: Controller,
    msg_rx: &mpsc::Receiver<Msg>,
    toasts: &ToastBoard,
) -> anyhow::Result<()> {
    controller.dispatch(Msg::Started);

    loop {
        let visible = toasts.visible(Instant::now());
        terminal
            .draw(|frame| render::draw(frame, controller.view(), &visible))
            .context("failed to draw frame")?;

        if event::poll(POLL_INTERVAL).context("failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                if key.kind == KeyEventKind::Press {
                    match map_key(controller.view(), key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Dispatch(msg) => controller.dispatch(msg),
                        KeyAction::Ignore => {}
                    }
                }
            }
        }

        while let Ok(msg) = msg_rx.try_recv() {
            controller.dispatch(msg);
        }
    }
}

/// Owns the state and the last rendered view; runs effects after each update.
struct Controller {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
}

impl Controller {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            runner,
        }
    }

    fn view(&self) -> &AppViewModel {
        &self.view
    }

    fn dispatch(&mut self, msg: Msg) {
        hub_debug!("Dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.runner.run(effects);
    }
}
