//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, PopupState, Screen};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Both prompts were accepted; start polling.
    StartPolling,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl_c(&key) {
        return KeyAction::Quit;
    }
    if state.popup == PopupState::QuitConfirm {
        return handle_quit_confirm(state, key);
    }
    match state.screen {
        Screen::ConfiguringAddress | Screen::ConfiguringInterval => handle_prompt(state, key),
        Screen::Listing => handle_listing(state, key),
        Screen::Detail => handle_detail(state, key),
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('y') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys while one of the configuration prompts is shown.
fn handle_prompt(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Enter => match state.screen {
            Screen::ConfiguringAddress => {
                state.submit_address();
                KeyAction::None
            }
            _ => {
                if state.submit_interval() {
                    KeyAction::StartPolling
                } else {
                    KeyAction::None
                }
            }
        },
        KeyCode::Backspace => {
            if let Some(input) = state.prompt_input_mut() {
                input.pop();
            }
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if let Some(input) = state.prompt_input_mut() {
                input.push(c);
            }
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_listing(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            state.popup = PopupState::QuitConfirm;
        }
        KeyCode::Up | KeyCode::Left | KeyCode::BackTab | KeyCode::Char('k') => {
            state.select_prev();
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Tab | KeyCode::Char('j') => {
            state.select_next();
        }
        KeyCode::Enter => state.open_detail(),
        _ => {}
    }
    KeyAction::None
}

fn handle_detail(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => state.close_detail(),
        KeyCode::Char('m') => state.plot_mode = state.plot_mode.toggle(),
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
        }
        _ => {}
    }
    KeyAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Namespace;
    use crate::view::detail::PlotMode;
    use crate::view::sources::SourceRef;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn listing(selectable: usize) -> AppState {
        let mut state = AppState::new("", "");
        state.screen = Screen::Listing;
        state.selectable = selectable;
        state
    }

    #[test]
    fn typing_edits_the_active_prompt() {
        let mut state = AppState::new("http://x", "5");
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Char('y')));
        assert_eq!(state.address_input, "http://y");
        assert_eq!(state.interval_input, "5");
    }

    #[test]
    fn accepted_prompts_start_polling() {
        let mut state = AppState::new("http://localhost:2020", "3");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::None);
        assert_eq!(state.screen, Screen::ConfiguringInterval);

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            KeyAction::StartPolling
        );
        assert_eq!(state.screen, Screen::Listing);
    }

    #[test]
    fn rejected_interval_keeps_prompt() {
        let mut state = AppState::new("http://localhost:2020", "-1");
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::None);
        assert_eq!(state.screen, Screen::ConfiguringInterval);
        assert!(state.input_error.is_some());
    }

    #[test]
    fn navigation_keys_move_selection() {
        let mut state = listing(3);
        for code in [KeyCode::Down, KeyCode::Tab, KeyCode::Char('j'), KeyCode::Right] {
            handle_key(&mut state, key(code));
        }
        assert_eq!(state.selected, 2);

        handle_key(&mut state, key(KeyCode::Char('k')));
        handle_key(&mut state, key(KeyCode::BackTab));
        assert_eq!(state.selected, 0);
        handle_key(&mut state, key(KeyCode::Left));
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn enter_and_esc_switch_detail() {
        let mut state = listing(1);
        state.selected_source = Some(SourceRef {
            namespace: Namespace::Output,
            name: "stdout.0".to_string(),
        });

        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.screen, Screen::Detail);

        handle_key(&mut state, key(KeyCode::Char('m')));
        assert_eq!(state.plot_mode, PlotMode::Magnitude);

        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.screen, Screen::Listing);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = listing(0);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert_eq!(state.popup, PopupState::QuitConfirm);

        // Cancel
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::None);
        assert_eq!(state.popup, PopupState::None);

        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Quit);
    }

    #[test]
    fn esc_at_prompt_asks_for_confirmation() {
        let mut state = AppState::new("", "");
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.popup, PopupState::QuitConfirm);
        // Typing goes nowhere while the popup is open.
        handle_key(&mut state, key(KeyCode::Char('x')));
        assert_eq!(state.address_input, "");
    }

    #[test]
    fn ctrl_c_quits_immediately() {
        let mut state = AppState::new("", "");
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);

        let mut state = listing(0);
        state.screen = Screen::Detail;
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);
    }
}
