use std::time::Instant;

use ratatui::widgets::ListState;
use tracing::debug;

use helpme_core::content::{
    BOTTLE_MESSAGES, INTERESTS, LIBRARY_PEOPLE, MAX_INTERESTS, MAX_QUESTION_CHARS, TOPIC_TAGS,
    WAITING_QUESTIONS,
};
use helpme_core::{Outcome, ProfileTab, Router, Screen, TagSelection, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which half of the ask-help form has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskFocus {
    #[default]
    Question,
    Tags,
}

/// Rows of the settings screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Notifications,
    DarkMode,
    Language,
    PolygonId,
}

impl SettingsRow {
    pub fn all() -> [SettingsRow; 4] {
        [
            SettingsRow::Notifications,
            SettingsRow::DarkMode,
            SettingsRow::Language,
            SettingsRow::PolygonId,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsRow::Notifications => "Bildirimler",
            SettingsRow::DarkMode => "Karanlık Mod",
            SettingsRow::Language => "Çeviri Dili",
            SettingsRow::PolygonId => "Polygon ID",
        }
    }
}

/// Single-line text input with a char-indexed cursor
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    cursor: usize,
    max_chars: Option<usize>,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl TextField {
    pub fn limited(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        if self.max_chars.is_some_and(|max| self.char_count() >= max) {
            return;
        }
        let at = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = char_to_byte_index(&self.value, self.cursor);
        self.value.remove(at);
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub router: Router,
    pub input_mode: InputMode,

    // Profile setup
    pub interests: TagSelection,
    pub interest_state: ListState,

    // Ask help form
    pub question: TextField,
    pub topic_tags: TagSelection,
    pub tag_cursor: usize,
    pub ask_focus: AskFocus,

    // Chat input
    pub message: TextField,

    // List cursors
    pub give_state: ListState,
    pub library_state: ListState,
    pub settings_state: ListState,
    pub profile_tab: ProfileTab,

    // Home: the bottle washed ashore, and whether it is opened
    pub shore_bottle: usize,
    pub bottle_open: bool,

    /// Last refused request, shown in the status line
    pub status: Option<String>,

    // Animation state
    pub animation_frame: u8,
}

impl App {
    pub fn new(router: Router) -> Self {
        Self {
            should_quit: false,
            router,
            input_mode: InputMode::Normal,

            interests: TagSelection::capped(MAX_INTERESTS),
            interest_state: selected_first(),

            question: TextField::limited(MAX_QUESTION_CHARS),
            topic_tags: TagSelection::unbounded(),
            tag_cursor: 0,
            ask_focus: AskFocus::default(),

            message: TextField::default(),

            give_state: selected_first(),
            library_state: selected_first(),
            settings_state: selected_first(),
            profile_tab: ProfileTab::default(),

            shore_bottle: 0,
            bottle_open: false,

            status: None,
            animation_frame: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.screen()
    }

    /// Send a transition to the router and keep the view in step with it
    pub fn dispatch(&mut self, transition: Transition) -> Outcome {
        let outcome = self.router.dispatch(transition);
        self.apply_outcome(&outcome);
        outcome
    }

    pub fn tick(&mut self, now: Instant) {
        self.animation_frame = (self.animation_frame + 1) % 4;
        for outcome in self.router.tick(now) {
            self.apply_outcome(&outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Moved { to, .. } => {
                self.status = None;
                self.entered(*to);
            }
            Outcome::Updated => self.status = None,
            Outcome::Rejected(reason) => {
                debug!(%reason, "request refused");
                self.status = Some(reason.to_string());
            }
        }
    }

    /// Reset the view-local state of the screen just entered
    fn entered(&mut self, screen: Screen) {
        self.bottle_open = false;
        self.input_mode = InputMode::Normal;
        match screen {
            Screen::AskHelp => {
                self.question.clear();
                self.topic_tags.clear();
                self.tag_cursor = 0;
                self.ask_focus = AskFocus::Question;
                self.input_mode = InputMode::Editing;
            }
            Screen::Chat => {
                self.message.clear();
                self.input_mode = InputMode::Editing;
            }
            Screen::Home => {
                self.shore_bottle = (self.shore_bottle + 1) % BOTTLE_MESSAGES.len();
            }
            Screen::UserProfile => self.profile_tab = ProfileTab::default(),
            _ => {}
        }
    }

    // Profile setup

    pub fn interest_cursor(&self) -> usize {
        self.interest_state.selected().unwrap_or(0)
    }

    pub fn toggle_interest(&mut self) {
        let interest = INTERESTS[self.interest_cursor()];
        if !self.interests.toggle(interest) {
            self.status = Some(format!("En fazla {} ilgi alanı seçebilirsin", MAX_INTERESTS));
        } else {
            self.status = None;
        }
    }

    pub fn complete_profile(&mut self) {
        self.dispatch(Transition::CompleteProfile {
            interests: self.interests.to_vec(),
        });
    }

    // Ask help

    /// The send button is only live for a non-empty question with a topic
    pub fn can_send_question(&self) -> bool {
        !self.question.value().trim().is_empty() && !self.topic_tags.is_empty()
    }

    pub fn toggle_topic(&mut self) {
        self.topic_tags.toggle(TOPIC_TAGS[self.tag_cursor]);
    }

    pub fn tag_left(&mut self) {
        self.tag_cursor = self.tag_cursor.saturating_sub(1);
    }

    pub fn tag_right(&mut self) {
        self.tag_cursor = (self.tag_cursor + 1).min(TOPIC_TAGS.len() - 1);
    }

    pub fn send_question(&mut self) {
        if !self.can_send_question() {
            return;
        }
        self.dispatch(Transition::SendQuestion {
            question: self.question.value().trim().to_string(),
            tags: self.topic_tags.to_vec(),
        });
    }

    // Give help: waiting questions first, then bottles

    pub fn give_help_len(&self) -> usize {
        WAITING_QUESTIONS.len() + BOTTLE_MESSAGES.len()
    }

    pub fn give_help_select(&mut self) {
        let i = self.give_state.selected().unwrap_or(0);
        let transition = match WAITING_QUESTIONS.get(i) {
            Some(question) => Transition::SelectQuestion { id: question.id },
            None => Transition::RespondToBottle {
                id: BOTTLE_MESSAGES[i - WAITING_QUESTIONS.len()].id,
            },
        };
        self.dispatch(transition);
    }

    // Home bottle

    pub fn open_bottle(&mut self) {
        self.bottle_open = true;
    }

    pub fn close_bottle(&mut self) {
        self.bottle_open = false;
    }

    pub fn respond_to_shore_bottle(&mut self) {
        let id = BOTTLE_MESSAGES[self.shore_bottle].id;
        self.dispatch(Transition::RespondToBottle { id });
    }

    // Library

    pub fn library_select(&mut self) {
        let i = self.library_state.selected().unwrap_or(0);
        let id = LIBRARY_PEOPLE[i].id;
        self.dispatch(Transition::SelectPerson { id });
    }

    // Chat

    pub fn send_message(&mut self) {
        let text = self.message.value().trim().to_string();
        if text.is_empty() {
            return;
        }
        if !self.dispatch(Transition::SendMessage { text }).is_rejected() {
            self.message.clear();
        }
    }

    // Settings

    pub fn settings_row(&self) -> SettingsRow {
        SettingsRow::all()[self.settings_state.selected().unwrap_or(0)]
    }

    pub fn activate_setting(&mut self) {
        match self.settings_row() {
            SettingsRow::Notifications => {
                self.dispatch(Transition::ToggleNotifications);
            }
            SettingsRow::DarkMode => {
                self.dispatch(Transition::ToggleDarkMode);
            }
            SettingsRow::Language | SettingsRow::PolygonId => {}
        }
    }

    /// The list cursor of the current screen, if it has one
    pub fn list_cursor(&mut self) -> Option<(&mut ListState, usize)> {
        match self.screen() {
            Screen::ProfileSetup => Some((&mut self.interest_state, INTERESTS.len())),
            Screen::GiveHelp => {
                let len = self.give_help_len();
                Some((&mut self.give_state, len))
            }
            Screen::HumanLibrary => Some((&mut self.library_state, LIBRARY_PEOPLE.len())),
            Screen::Settings => Some((&mut self.settings_state, SettingsRow::all().len())),
            _ => None,
        }
    }

    pub fn list_down(&mut self) {
        if let Some((state, len)) = self.list_cursor() {
            let i = state.selected().unwrap_or(0);
            state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn list_up(&mut self) {
        if let Some((state, _)) = self.list_cursor() {
            let i = state.selected().unwrap_or(0);
            state.select(Some(i.saturating_sub(1)));
        }
    }
}

fn selected_first() -> ListState {
    let mut state = ListState::default();
    state.select(Some(0));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpme_core::Timings;

    fn app() -> App {
        App::new(Router::with_timings(Timings::default(), 1))
    }

    #[test]
    fn test_text_field_is_utf8_safe() {
        let mut field = TextField::default();
        for c in "Yardım".chars() {
            field.insert(c);
        }
        field.left();
        field.backspace();
        assert_eq!(field.value(), "Yardm");
        field.right();
        field.insert('!');
        assert_eq!(field.value(), "Yardm!");
        assert_eq!(field.cursor(), 6);
    }

    #[test]
    fn test_text_field_limit() {
        let mut field = TextField::limited(3);
        for c in "abcd".chars() {
            field.insert(c);
        }
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn test_interest_cap_sets_status() {
        let mut app = app();
        for i in 0..=MAX_INTERESTS {
            app.interest_state.select(Some(i));
            app.toggle_interest();
        }
        assert_eq!(app.interests.len(), MAX_INTERESTS);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_rejection_shows_in_status() {
        let mut app = app();
        let outcome = app.dispatch(Transition::OpenProfile);
        assert!(outcome.is_rejected());
        assert!(app.status.as_deref().is_some_and(|s| s.contains("open-profile")));

        app.dispatch(Transition::Advance);
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_entering_ask_help_starts_editing() {
        let mut app = app();
        for _ in 0..4 {
            app.dispatch(Transition::Advance);
        }
        app.toggle_interest();
        app.complete_profile();
        assert_eq!(app.screen(), Screen::Home);

        app.dispatch(Transition::AskHelp);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(!app.can_send_question());

        for c in "Yardım lazım".chars() {
            app.question.insert(c);
        }
        assert!(!app.can_send_question());
        app.tag_right();
        app.toggle_topic();
        assert!(app.can_send_question());
        app.send_question();
        assert_eq!(app.screen(), Screen::Waiting);
    }

    #[test]
    fn test_give_help_list_covers_bottles() {
        let mut app = app();
        for _ in 0..4 {
            app.dispatch(Transition::Advance);
        }
        app.toggle_interest();
        app.complete_profile();
        app.dispatch(Transition::GiveHelp);

        app.give_state.select(Some(app.give_help_len() - 1));
        app.give_help_select();
        assert_eq!(app.screen(), Screen::Chat);
        assert_eq!(
            app.router.state().chat().map(|c| c.origin().clone()),
            Some(helpme_core::ChatOrigin::Bottle(3))
        );
    }
}
