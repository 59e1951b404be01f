use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hub_core::{AppViewModel, DashboardView, Msg, Route, ScreenView, SelectionView, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Dispatch(Msg),
    Ignore,
}

/// Translates a key press into a message for the current screen.
pub fn map_key(view: &AppViewModel, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match &view.screen {
        ScreenView::Login(_) => login_key(key),
        ScreenView::Selection(selection) => selection_key(selection, key, ctrl),
        ScreenView::Dashboard(dashboard) => dashboard_key(dashboard, key),
    }
}

fn login_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('l') => KeyAction::Dispatch(Msg::LoginClicked),
        KeyCode::Char('c') => KeyAction::Dispatch(Msg::ContinueClicked),
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

fn selection_key(view: &SelectionView, key: KeyEvent, ctrl: bool) -> KeyAction {
    let focused = view.slots.get(view.focus);
    if ctrl {
        return match key.code {
            KeyCode::Char('n') => KeyAction::Dispatch(Msg::AddSlotClicked),
            KeyCode::Char('d') => match focused {
                Some(slot) if slot.removable => {
                    KeyAction::Dispatch(Msg::RemoveSlotClicked { index: slot.index })
                }
                _ => KeyAction::Ignore,
            },
            KeyCode::Char('o') => KeyAction::Dispatch(Msg::Navigate(Route::Dashboard)),
            KeyCode::Char('l') => KeyAction::Dispatch(Msg::LogoutClicked),
            _ => KeyAction::Ignore,
        };
    }
    match key.code {
        KeyCode::Char(ch) => match focused {
            Some(slot) => {
                let mut value = slot.value.clone();
                value.push(ch);
                KeyAction::Dispatch(Msg::SlotEdited {
                    index: slot.index,
                    value,
                })
            }
            None => KeyAction::Ignore,
        },
        KeyCode::Backspace => match focused {
            Some(slot) if !slot.value.is_empty() => {
                let mut value = slot.value.clone();
                value.pop();
                KeyAction::Dispatch(Msg::SlotEdited {
                    index: slot.index,
                    value,
                })
            }
            _ => KeyAction::Ignore,
        },
        KeyCode::Up | KeyCode::BackTab => KeyAction::Dispatch(Msg::FocusMoved(Step::Previous)),
        KeyCode::Down | KeyCode::Tab => KeyAction::Dispatch(Msg::FocusMoved(Step::Next)),
        KeyCode::Enter if view.can_submit => KeyAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

fn dashboard_key(view: &DashboardView, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Dispatch(Msg::CursorMoved(Step::Previous)),
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Dispatch(Msg::CursorMoved(Step::Next)),
        KeyCode::Enter | KeyCode::Char('o') => KeyAction::Dispatch(Msg::OpenPostClicked),
        KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc if view.can_go_back => {
            KeyAction::Dispatch(Msg::Navigate(Route::Selection))
        }
        KeyCode::Char('L') => KeyAction::Dispatch(Msg::LogoutClicked),
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}
