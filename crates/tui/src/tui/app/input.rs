use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::TaskFilter;
use crate::tui::constants::STATUS_COMMAND_PALETTE;

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterCommand,
    ShowHelp,
    Toggle,
    Delete,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    NextFilter,
    PrevFilter,
    ShowFilter(TaskFilter),
}

impl NormalAction {
    pub(crate) fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('/') => Some(Self::EnterCommand),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char(' ') | KeyCode::Char('t') | KeyCode::Enter => Some(Self::Toggle),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Self::NextFilter),
            KeyCode::Left | KeyCode::BackTab => Some(Self::PrevFilter),
            KeyCode::Char('1') => Some(Self::ShowFilter(TaskFilter::All)),
            KeyCode::Char('2') => Some(Self::ShowFilter(TaskFilter::Pending)),
            KeyCode::Char('3') => Some(Self::ShowFilter(TaskFilter::Completed)),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Command => self.handle_command_mode(key),
            InputMode::Help => self.handle_help_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::EnterAdd => self.begin_add(),
            NormalAction::EnterCommand => {
                self.input_mode = InputMode::Command;
                self.input.set("/");
                self.update_command_suggestions();
                self.set_status_info(STATUS_COMMAND_PALETTE);
            }
            NormalAction::ShowHelp => self.show_help_overlay(),
            NormalAction::Toggle => self.toggle_selected(),
            NormalAction::Delete => self.prompt_delete(),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
            NormalAction::NextFilter => self.next_filter(),
            NormalAction::PrevFilter => self.prev_filter(),
            NormalAction::ShowFilter(filter) => self.set_filter(filter),
        }
    }

    /// Shared line-editing keys; returns `false` when the key was not consumed.
    fn edit_input(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c)
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        true
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_add(),
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            KeyCode::Right => self.input.move_right(),
            _ => {
                self.edit_input(&key);
            }
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') | KeyCode::Char('q')
        ) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status_info("Deletion cancelled");
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Tab => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') => {
                self.input_mode = InputMode::Normal;
                self.perform_delete();
            }
            KeyCode::Char('n') => {
                self.input_mode = InputMode::Normal;
                self.set_status_info("Deletion cancelled");
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete();
                } else {
                    self.set_status_info("Deletion cancelled");
                }
            }
            _ => {}
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(s) = self.suggestions.get(self.suggestion_index).cloned() {
                    self.input.set(s.fill.clone());
                    if s.fill.ends_with(' ') {
                        self.update_command_suggestions();
                        return;
                    }
                }
                self.run_command();
            }
            KeyCode::Esc => {
                self.finish_command();
                self.status = None;
            }
            KeyCode::Tab | KeyCode::Right => self.accept_suggestion(),
            KeyCode::Up => {
                if !self.suggestions.is_empty() {
                    if self.suggestion_index == 0 {
                        self.suggestion_index = self.suggestions.len() - 1;
                    } else {
                        self.suggestion_index -= 1;
                    }
                }
            }
            KeyCode::Down => {
                if !self.suggestions.is_empty() {
                    self.suggestion_index = (self.suggestion_index + 1) % self.suggestions.len();
                }
            }
            _ => {
                if self.edit_input(&key) {
                    self.update_command_suggestions();
                }
            }
        }
    }
}
