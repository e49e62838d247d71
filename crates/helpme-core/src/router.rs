//! Screen router
//!
//! The single owner of [`SessionState`]. Front ends never write state
//! directly: they send a [`Transition`] through [`Router::dispatch`] and poll
//! [`Router::tick`] so that owned deadlines can fire. Every accepted request
//! goes through one named transition function; everything else is refused
//! with a [`Rejection`] and leaves the state untouched.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use crate::chat::{ChatEvent, ChatOrigin, ChatSession};
use crate::config::Config;
use crate::content::{
    self, INTERESTS, MAX_INTERESTS, MAX_QUESTION_CHARS, PHILOSOPHY_PAGES, TOPIC_TAGS,
};
use crate::state::{HelpRequest, QuestionDeck, ScreenState, SessionState, Settings};
use crate::timer::{Deadline, Timings};

/// The primary screens. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    Welcome,
    Philosophy,
    ProfileSetup,
    Home,
    AskHelp,
    GiveHelp,
    Waiting,
    Chat,
    UserProfile,
    HumanLibrary,
    Settings,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Philosophy => "philosophy",
            Screen::ProfileSetup => "profile-setup",
            Screen::Home => "home",
            Screen::AskHelp => "ask-help",
            Screen::GiveHelp => "give-help",
            Screen::Waiting => "waiting",
            Screen::Chat => "chat",
            Screen::UserProfile => "user-profile",
            Screen::HumanLibrary => "human-library",
            Screen::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Help Me",
            Screen::Philosophy => "Felsefe",
            Screen::ProfileSetup => "İlgi Alanların",
            Screen::Home => "Sahil",
            Screen::AskHelp => "Yardım İste",
            Screen::GiveHelp => "Yardım Et",
            Screen::Waiting => "Eşleşiyor",
            Screen::Chat => "Sohbet",
            Screen::UserProfile => "Profil",
            Screen::HumanLibrary => "İnsan Kütüphanesi",
            Screen::Settings => "Ayarlar",
        }
    }

    #[cfg(test)]
    fn all() -> Vec<Screen> {
        vec![
            Screen::Welcome,
            Screen::Philosophy,
            Screen::ProfileSetup,
            Screen::Home,
            Screen::AskHelp,
            Screen::GiveHelp,
            Screen::Waiting,
            Screen::Chat,
            Screen::UserProfile,
            Screen::HumanLibrary,
            Screen::Settings,
        ]
    }

    /// Requests this screen offers. Overlay actions are not included.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Screen::Welcome => &[Action::Advance],
            Screen::Philosophy => &[Action::Advance, Action::Back],
            Screen::ProfileSetup => &[Action::CompleteProfile],
            Screen::Home => &[
                Action::AskHelp,
                Action::GiveHelp,
                Action::OpenProfile,
                Action::RespondToBottle,
                Action::OpenLibrary,
                Action::OpenQuestions,
            ],
            Screen::AskHelp => &[Action::Back, Action::SendQuestion],
            Screen::GiveHelp => &[Action::Back, Action::SelectQuestion, Action::RespondToBottle],
            Screen::Waiting => &[],
            Screen::Chat => &[Action::Back, Action::SendMessage],
            Screen::UserProfile => &[Action::Back, Action::OpenSettings],
            Screen::HumanLibrary => &[Action::Back, Action::SelectPerson],
            Screen::Settings => &[
                Action::Back,
                Action::ToggleNotifications,
                Action::ToggleDarkMode,
            ],
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScreenState {
    pub fn screen(&self) -> Screen {
        match self {
            ScreenState::Welcome => Screen::Welcome,
            ScreenState::Philosophy { .. } => Screen::Philosophy,
            ScreenState::ProfileSetup => Screen::ProfileSetup,
            ScreenState::Home => Screen::Home,
            ScreenState::AskHelp => Screen::AskHelp,
            ScreenState::GiveHelp => Screen::GiveHelp,
            ScreenState::Waiting { .. } => Screen::Waiting,
            ScreenState::Chat(_) => Screen::Chat,
            ScreenState::UserProfile => Screen::UserProfile,
            ScreenState::HumanLibrary => Screen::HumanLibrary,
            ScreenState::Settings => Screen::Settings,
        }
    }
}

/// The kind of a [`Transition`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Advance,
    Back,
    CompleteProfile,
    AskHelp,
    GiveHelp,
    OpenProfile,
    OpenSettings,
    OpenLibrary,
    OpenQuestions,
    SendQuestion,
    SelectQuestion,
    RespondToBottle,
    SelectPerson,
    SendMessage,
    NextCard,
    PreviousCard,
    CloseQuestions,
    DismissLevelUp,
    ToggleNotifications,
    ToggleDarkMode,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Advance => "advance",
            Action::Back => "back",
            Action::CompleteProfile => "complete-profile",
            Action::AskHelp => "ask-help",
            Action::GiveHelp => "give-help",
            Action::OpenProfile => "open-profile",
            Action::OpenSettings => "open-settings",
            Action::OpenLibrary => "open-library",
            Action::OpenQuestions => "open-questions",
            Action::SendQuestion => "send-question",
            Action::SelectQuestion => "select-question",
            Action::RespondToBottle => "respond-to-bottle",
            Action::SelectPerson => "select-person",
            Action::SendMessage => "send-message",
            Action::NextCard => "next-card",
            Action::PreviousCard => "previous-card",
            Action::CloseQuestions => "close-questions",
            Action::DismissLevelUp => "dismiss-level-up",
            Action::ToggleNotifications => "toggle-notifications",
            Action::ToggleDarkMode => "toggle-dark-mode",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advance,
    Back,
    CompleteProfile { interests: Vec<String> },
    AskHelp,
    GiveHelp,
    OpenProfile,
    OpenSettings,
    OpenLibrary,
    OpenQuestions,
    SendQuestion { question: String, tags: Vec<String> },
    SelectQuestion { id: u32 },
    RespondToBottle { id: u32 },
    SelectPerson { id: u32 },
    SendMessage { text: String },
    NextCard,
    PreviousCard,
    CloseQuestions,
    DismissLevelUp,
    ToggleNotifications,
    ToggleDarkMode,
}

impl Transition {
    pub fn action(&self) -> Action {
        match self {
            Transition::Advance => Action::Advance,
            Transition::Back => Action::Back,
            Transition::CompleteProfile { .. } => Action::CompleteProfile,
            Transition::AskHelp => Action::AskHelp,
            Transition::GiveHelp => Action::GiveHelp,
            Transition::OpenProfile => Action::OpenProfile,
            Transition::OpenSettings => Action::OpenSettings,
            Transition::OpenLibrary => Action::OpenLibrary,
            Transition::OpenQuestions => Action::OpenQuestions,
            Transition::SendQuestion { .. } => Action::SendQuestion,
            Transition::SelectQuestion { .. } => Action::SelectQuestion,
            Transition::RespondToBottle { .. } => Action::RespondToBottle,
            Transition::SelectPerson { .. } => Action::SelectPerson,
            Transition::SendMessage { .. } => Action::SendMessage,
            Transition::NextCard => Action::NextCard,
            Transition::PreviousCard => Action::PreviousCard,
            Transition::CloseQuestions => Action::CloseQuestions,
            Transition::DismissLevelUp => Action::DismissLevelUp,
            Transition::ToggleNotifications => Action::ToggleNotifications,
            Transition::ToggleDarkMode => Action::ToggleDarkMode,
        }
    }
}

/// Why a transition was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{action} is not available on {screen}")]
    NotAvailable { screen: Screen, action: Action },
    #[error("{0} needs an open overlay")]
    NoOverlay(Action),
    #[error("already on the first page")]
    FirstPage,
    #[error("select at least one interest")]
    NoInterests,
    #[error("select at most {max} interests")]
    TooManyInterests { max: usize },
    #[error("{0:?} is not an interest")]
    UnknownInterest(String),
    #[error("{0:?} is selected more than once")]
    Duplicate(String),
    #[error("write a question first")]
    EmptyQuestion,
    #[error("questions are limited to {max} characters")]
    QuestionTooLong { max: usize },
    #[error("select at least one topic")]
    NoTags,
    #[error("{0:?} is not a topic")]
    UnknownTag(String),
    #[error("message is empty")]
    EmptyMessage,
    #[error("no waiting question #{0}")]
    UnknownQuestion(u32),
    #[error("no bottle #{0}")]
    UnknownBottle(u32),
    #[error("no library member #{0}")]
    UnknownPerson(u32),
    #[error("library member #{0} is busy")]
    PersonUnavailable(u32),
    #[error("no more cards in that direction")]
    DeckEnd,
    #[error("trust is already complete")]
    TrustComplete,
}

/// Result of a dispatch or a fired deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The primary screen changed
    Moved { from: Screen, to: Screen },
    /// State changed without leaving the screen
    Updated,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn moved_to(&self) -> Option<Screen> {
        match self {
            Outcome::Moved { to, .. } => Some(*to),
            _ => None,
        }
    }
}

pub struct Router {
    state: SessionState,
    timings: Timings,
    rng: StdRng,
}

impl Router {
    pub fn new(config: &Config) -> Self {
        Self {
            state: SessionState::new(Settings::from_config(config)),
            timings: Timings::from(config),
            rng: StdRng::from_entropy(),
        }
    }

    /// A router with fixed delays and reproducible partner replies
    pub fn with_timings(timings: Timings, seed: u64) -> Self {
        Self {
            state: SessionState::default(),
            timings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen.screen()
    }

    /// Screen actions plus whatever the open overlays accept
    pub fn available_actions(&self) -> Vec<Action> {
        let mut actions = self.screen().actions().to_vec();
        if self.state.overlays.questions_visible() {
            actions.extend([Action::NextCard, Action::PreviousCard, Action::CloseQuestions]);
        }
        if self.state.overlays.level_up_visible() {
            actions.push(Action::DismissLevelUp);
        }
        actions
    }

    /// Countdown shown while waiting for a match
    pub fn estimated_wait(&self, now: Instant) -> Option<Duration> {
        match &self.state.screen {
            ScreenState::Waiting { estimate, .. } => Some(estimate.remaining(now)),
            _ => None,
        }
    }

    pub fn dispatch(&mut self, transition: Transition) -> Outcome {
        self.dispatch_at(transition, Instant::now())
    }

    pub fn dispatch_at(&mut self, transition: Transition, now: Instant) -> Outcome {
        let action = transition.action();
        let result = self.check(action).and_then(|()| self.apply(transition, now));
        match result {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!(screen = %self.screen(), action = %action, reason = %reason, "transition rejected");
                Outcome::Rejected(reason)
            }
        }
    }

    /// Fire the active screen's deadlines that have passed by `now`
    pub fn tick(&mut self, now: Instant) -> Vec<Outcome> {
        let matched = match &self.state.screen {
            ScreenState::Waiting { connect, request, .. } if connect.is_due(now) => {
                Some(request.clone())
            }
            _ => None,
        };
        if let Some(request) = matched {
            return vec![self.connected(request)];
        }

        let trust = self.state.trust_level;
        let events = match &mut self.state.screen {
            ScreenState::Chat(chat) => chat.poll(now, trust, &self.timings, &mut self.rng),
            _ => Vec::new(),
        };

        events
            .into_iter()
            .map(|event| match event {
                ChatEvent::PartnerReplied => {
                    info!("partner replied");
                    Outcome::Updated
                }
                ChatEvent::LevelUpDue => self.raise_trust(),
            })
            .collect()
    }

    fn check(&self, action: Action) -> Result<(), Rejection> {
        match action {
            Action::NextCard | Action::PreviousCard | Action::CloseQuestions
                if !self.state.overlays.questions_visible() =>
            {
                Err(Rejection::NoOverlay(action))
            }
            Action::NextCard | Action::PreviousCard | Action::CloseQuestions => Ok(()),
            Action::DismissLevelUp if !self.state.overlays.level_up_visible() => {
                Err(Rejection::NoOverlay(action))
            }
            Action::DismissLevelUp => Ok(()),
            _ if self.screen().actions().contains(&action) => Ok(()),
            _ => Err(Rejection::NotAvailable {
                screen: self.screen(),
                action,
            }),
        }
    }

    fn apply(&mut self, transition: Transition, now: Instant) -> Result<Outcome, Rejection> {
        match transition {
            Transition::Advance => Ok(self.advance()),
            Transition::Back => self.back(),
            Transition::CompleteProfile { interests } => self.complete_profile(interests),
            Transition::AskHelp => Ok(self.enter(ScreenState::AskHelp)),
            Transition::GiveHelp => Ok(self.enter(ScreenState::GiveHelp)),
            Transition::OpenProfile => Ok(self.enter(ScreenState::UserProfile)),
            Transition::OpenSettings => Ok(self.enter(ScreenState::Settings)),
            Transition::OpenLibrary => Ok(self.enter(ScreenState::HumanLibrary)),
            Transition::OpenQuestions => {
                // Reopening keeps the current card
                self.state.overlays.questions.get_or_insert_with(QuestionDeck::default);
                Ok(Outcome::Updated)
            }
            Transition::SendQuestion { question, tags } => self.send_question(question, tags, now),
            Transition::SelectQuestion { id } => self.select_question(id),
            Transition::RespondToBottle { id } => self.respond_to_bottle(id),
            Transition::SelectPerson { id } => self.select_person(id),
            Transition::SendMessage { text } => self.send_message(text, now),
            Transition::NextCard => self.turn_card(QuestionDeck::next),
            Transition::PreviousCard => self.turn_card(QuestionDeck::previous),
            Transition::CloseQuestions => {
                self.state.overlays.questions = None;
                Ok(Outcome::Updated)
            }
            Transition::DismissLevelUp => {
                self.state.overlays.level_up = None;
                Ok(Outcome::Updated)
            }
            Transition::ToggleNotifications => {
                self.state.settings.notifications = !self.state.settings.notifications;
                Ok(Outcome::Updated)
            }
            Transition::ToggleDarkMode => {
                self.state.settings.dark_mode = !self.state.settings.dark_mode;
                Ok(Outcome::Updated)
            }
        }
    }

    /// Swap in the next screen. The old screen state, and any deadline it
    /// owned, is dropped here.
    fn enter(&mut self, next: ScreenState) -> Outcome {
        let from = self.screen();
        self.state.screen = next;
        let to = self.screen();
        info!(from = %from, to = %to, "screen transition");
        Outcome::Moved { from, to }
    }

    fn advance(&mut self) -> Outcome {
        match self.state.screen {
            ScreenState::Philosophy { ref mut page } if *page + 1 < PHILOSOPHY_PAGES.len() => {
                *page += 1;
                Outcome::Updated
            }
            ScreenState::Philosophy { .. } => self.enter(ScreenState::ProfileSetup),
            _ => self.enter(ScreenState::Philosophy { page: 0 }),
        }
    }

    fn back(&mut self) -> Result<Outcome, Rejection> {
        match self.state.screen {
            ScreenState::Philosophy { ref mut page } if *page > 0 => {
                *page -= 1;
                Ok(Outcome::Updated)
            }
            ScreenState::Philosophy { .. } => Err(Rejection::FirstPage),
            ScreenState::Settings => Ok(self.enter(ScreenState::UserProfile)),
            _ => Ok(self.enter(ScreenState::Home)),
        }
    }

    fn complete_profile(&mut self, interests: Vec<String>) -> Result<Outcome, Rejection> {
        if interests.is_empty() {
            return Err(Rejection::NoInterests);
        }
        if interests.len() > MAX_INTERESTS {
            return Err(Rejection::TooManyInterests { max: MAX_INTERESTS });
        }
        validate_tags(&interests, &INTERESTS, Rejection::UnknownInterest)?;

        info!(count = interests.len(), "profile completed");
        self.state.interests = interests;
        Ok(self.enter(ScreenState::Home))
    }

    fn send_question(
        &mut self,
        question: String,
        tags: Vec<String>,
        now: Instant,
    ) -> Result<Outcome, Rejection> {
        if question.trim().is_empty() {
            return Err(Rejection::EmptyQuestion);
        }
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(Rejection::QuestionTooLong {
                max: MAX_QUESTION_CHARS,
            });
        }
        if tags.is_empty() {
            return Err(Rejection::NoTags);
        }
        validate_tags(&tags, &TOPIC_TAGS, Rejection::UnknownTag)?;

        info!(tags = ?tags, "help request sent");
        let request = HelpRequest { question, tags };
        self.state.last_request = Some(request.clone());
        Ok(self.enter(ScreenState::Waiting {
            estimate: Deadline::after(now, self.timings.estimated_wait),
            connect: Deadline::after(now, self.timings.connect_delay),
            request,
        }))
    }

    /// Waiting's connect deadline fired
    fn connected(&mut self, request: HelpRequest) -> Outcome {
        info!("match found");
        self.open_chat(ChatOrigin::Matched(request))
    }

    fn select_question(&mut self, id: u32) -> Result<Outcome, Rejection> {
        content::waiting_question(id).ok_or(Rejection::UnknownQuestion(id))?;
        Ok(self.open_chat(ChatOrigin::Question(id)))
    }

    fn respond_to_bottle(&mut self, id: u32) -> Result<Outcome, Rejection> {
        content::bottle(id).ok_or(Rejection::UnknownBottle(id))?;
        Ok(self.open_chat(ChatOrigin::Bottle(id)))
    }

    fn select_person(&mut self, id: u32) -> Result<Outcome, Rejection> {
        let person = content::library_person(id).ok_or(Rejection::UnknownPerson(id))?;
        if !person.available {
            return Err(Rejection::PersonUnavailable(id));
        }
        Ok(self.open_chat(ChatOrigin::LibraryPerson(id)))
    }

    fn open_chat(&mut self, origin: ChatOrigin) -> Outcome {
        self.enter(ScreenState::Chat(Box::new(ChatSession::new(origin))))
    }

    fn send_message(&mut self, text: String, now: Instant) -> Result<Outcome, Rejection> {
        if text.trim().is_empty() {
            return Err(Rejection::EmptyMessage);
        }
        if let ScreenState::Chat(chat) = &mut self.state.screen {
            chat.send(text, now, &self.timings);
        }
        Ok(Outcome::Updated)
    }

    fn turn_card(&mut self, turn: fn(&mut QuestionDeck) -> bool) -> Result<Outcome, Rejection> {
        let Some(deck) = self.state.overlays.questions.as_mut() else {
            return Err(Rejection::NoOverlay(Action::NextCard));
        };
        if turn(deck) {
            Ok(Outcome::Updated)
        } else {
            Err(Rejection::DeckEnd)
        }
    }

    /// One step up, never past the maximum. Opens the level-up overlay.
    fn raise_trust(&mut self) -> Outcome {
        match self.state.trust_level.raised() {
            Some(next) => {
                info!(level = next.value(), "trust level raised");
                self.state.trust_level = next;
                self.state.overlays.level_up = Some(next);
                Outcome::Updated
            }
            None => Outcome::Rejected(Rejection::TrustComplete),
        }
    }
}

/// Every entry must be known and appear once
fn validate_tags(
    picked: &[String],
    known: &[&str],
    unknown: fn(String) -> Rejection,
) -> Result<(), Rejection> {
    let mut seen = HashSet::new();
    for tag in picked {
        if !known.contains(&tag.as_str()) {
            return Err(unknown(tag.clone()));
        }
        if !seen.insert(tag.as_str()) {
            return Err(Rejection::Duplicate(tag.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn router() -> Router {
        Router::with_timings(Timings::default(), 11)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Walk onboarding and land on home
    fn at_home(router: &mut Router) {
        for _ in 0..4 {
            router.dispatch(Transition::Advance);
        }
        router.dispatch(Transition::CompleteProfile {
            interests: strings(&["Sanat"]),
        });
        assert_eq!(router.screen(), Screen::Home);
    }

    fn in_chat(router: &mut Router, now: Instant) {
        at_home(router);
        router.dispatch_at(Transition::GiveHelp, now);
        router.dispatch_at(Transition::SelectQuestion { id: 2 }, now);
        assert_eq!(router.screen(), Screen::Chat);
    }

    #[test]
    fn test_starts_at_welcome() {
        let router = router();
        assert_eq!(router.screen(), Screen::Welcome);
        assert_eq!(router.available_actions(), vec![Action::Advance]);
    }

    #[test]
    fn test_philosophy_pages() {
        let mut router = router();
        router.dispatch(Transition::Advance);
        assert_eq!(
            router.dispatch(Transition::Back),
            Outcome::Rejected(Rejection::FirstPage)
        );
        assert_eq!(router.dispatch(Transition::Advance), Outcome::Updated);
        assert_eq!(router.dispatch(Transition::Back), Outcome::Updated);
        assert!(matches!(router.state().screen, ScreenState::Philosophy { page: 0 }));
    }

    #[test]
    fn test_profile_setup_rejects_bad_interests() {
        let mut router = router();
        for _ in 0..4 {
            router.dispatch(Transition::Advance);
        }
        assert_eq!(router.screen(), Screen::ProfileSetup);

        let cases = [
            (vec![], Rejection::NoInterests),
            (
                strings(&["Sanat", "Bilim", "Tarih", "Spor", "Film", "Yoga"]),
                Rejection::TooManyInterests { max: 5 },
            ),
            (strings(&["Kariyer"]), Rejection::UnknownInterest("Kariyer".into())),
            (strings(&["Sanat", "Sanat"]), Rejection::Duplicate("Sanat".into())),
        ];
        for (interests, reason) in cases {
            assert_eq!(
                router.dispatch(Transition::CompleteProfile { interests }),
                Outcome::Rejected(reason)
            );
            assert_eq!(router.screen(), Screen::ProfileSetup);
            assert!(router.state().interests.is_empty());
        }
    }

    #[test]
    fn test_profile_setup_stores_interests() {
        let mut router = router();
        for _ in 0..4 {
            router.dispatch(Transition::Advance);
        }
        let picked = strings(&["Sanat", "Bilim", "Tarih", "Spor", "Film"]);
        let outcome = router.dispatch(Transition::CompleteProfile {
            interests: picked.clone(),
        });
        assert_eq!(outcome.moved_to(), Some(Screen::Home));
        assert_eq!(router.state().interests, picked);
    }

    #[test]
    fn test_home_navigation() {
        let mut router = router();
        at_home(&mut router);

        router.dispatch(Transition::OpenProfile);
        assert_eq!(router.screen(), Screen::UserProfile);
        router.dispatch(Transition::OpenSettings);
        assert_eq!(router.screen(), Screen::Settings);
        router.dispatch(Transition::Back);
        assert_eq!(router.screen(), Screen::UserProfile);
        router.dispatch(Transition::Back);
        assert_eq!(router.screen(), Screen::Home);

        router.dispatch(Transition::OpenLibrary);
        assert_eq!(router.screen(), Screen::HumanLibrary);
        router.dispatch(Transition::Back);
        assert_eq!(router.screen(), Screen::Home);

        router.dispatch(Transition::GiveHelp);
        router.dispatch(Transition::Back);
        router.dispatch(Transition::AskHelp);
        router.dispatch(Transition::Back);
        assert_eq!(router.screen(), Screen::Home);
    }

    #[test]
    fn test_actions_outside_their_screen_are_rejected() {
        let mut router = router();
        assert_eq!(
            router.dispatch(Transition::OpenLibrary),
            Outcome::Rejected(Rejection::NotAvailable {
                screen: Screen::Welcome,
                action: Action::OpenLibrary,
            })
        );
        at_home(&mut router);
        router.dispatch(Transition::AskHelp);
        assert!(router.dispatch(Transition::OpenQuestions).is_rejected());
        assert!(router.dispatch(Transition::OpenSettings).is_rejected());
        assert!(router.dispatch(Transition::Back).moved_to() == Some(Screen::Home));
        assert!(router.dispatch(Transition::Back).is_rejected());
    }

    #[test]
    fn test_ask_help_gating() {
        let mut router = router();
        at_home(&mut router);
        router.dispatch(Transition::AskHelp);

        let refused = [
            (String::new(), vec![], Rejection::EmptyQuestion),
            ("   ".to_string(), strings(&["Kariyer"]), Rejection::EmptyQuestion),
            ("Yardım lazım".to_string(), vec![], Rejection::NoTags),
            ("Yardım lazım".to_string(), strings(&["Sanat"]), Rejection::UnknownTag("Sanat".into())),
            (
                "x".repeat(MAX_QUESTION_CHARS + 1),
                strings(&["Kariyer"]),
                Rejection::QuestionTooLong { max: MAX_QUESTION_CHARS },
            ),
        ];
        for (question, tags, reason) in refused {
            assert_eq!(
                router.dispatch(Transition::SendQuestion { question, tags }),
                Outcome::Rejected(reason)
            );
            assert_eq!(router.screen(), Screen::AskHelp);
        }

        let outcome = router.dispatch(Transition::SendQuestion {
            question: "Yardım lazım".to_string(),
            tags: strings(&["Kariyer"]),
        });
        assert_eq!(outcome.moved_to(), Some(Screen::Waiting));
        assert_eq!(
            router.state().last_request.as_ref().map(|r| r.tags.clone()),
            Some(strings(&["Kariyer"]))
        );
    }

    #[test]
    fn test_waiting_connects_after_delay() {
        let mut router = router();
        let start = Instant::now();
        at_home(&mut router);
        router.dispatch_at(Transition::AskHelp, start);
        router.dispatch_at(
            Transition::SendQuestion {
                question: "Yardım lazım".to_string(),
                tags: strings(&["Kariyer"]),
            },
            start,
        );

        assert!(router.tick(start + Duration::from_millis(4_900)).is_empty());
        assert_eq!(router.screen(), Screen::Waiting);
        assert_eq!(
            router.estimated_wait(start + Duration::from_secs(10)),
            Some(Duration::from_secs(170))
        );
        assert_eq!(
            router.estimated_wait(start + Duration::from_secs(200)),
            Some(Duration::ZERO)
        );

        let fired = router.tick(start + Duration::from_secs(5));
        assert_eq!(
            fired,
            vec![Outcome::Moved {
                from: Screen::Waiting,
                to: Screen::Chat
            }]
        );
        let chat = router.state().chat().unwrap();
        assert_eq!(chat.origin().subtitle(), "Kariyer");
        assert_eq!(router.estimated_wait(start), None);
    }

    #[test]
    fn test_give_help_opens_chat() {
        let mut router = router();
        at_home(&mut router);
        router.dispatch(Transition::GiveHelp);
        assert_eq!(
            router.dispatch(Transition::SelectQuestion { id: 42 }),
            Outcome::Rejected(Rejection::UnknownQuestion(42))
        );
        router.dispatch(Transition::RespondToBottle { id: 3 });
        assert_eq!(router.screen(), Screen::Chat);
        assert_eq!(router.state().chat().unwrap().origin(), &ChatOrigin::Bottle(3));
    }

    #[test]
    fn test_bottle_from_home() {
        let mut router = router();
        at_home(&mut router);
        assert_eq!(
            router.dispatch(Transition::RespondToBottle { id: 9 }),
            Outcome::Rejected(Rejection::UnknownBottle(9))
        );
        router.dispatch(Transition::RespondToBottle { id: 1 });
        assert_eq!(router.screen(), Screen::Chat);
    }

    #[test]
    fn test_library_skips_busy_people() {
        let mut router = router();
        at_home(&mut router);
        router.dispatch(Transition::OpenLibrary);
        assert_eq!(
            router.dispatch(Transition::SelectPerson { id: 3 }),
            Outcome::Rejected(Rejection::PersonUnavailable(3))
        );
        assert_eq!(router.screen(), Screen::HumanLibrary);
        router.dispatch(Transition::SelectPerson { id: 2 });
        assert_eq!(router.screen(), Screen::Chat);
    }

    #[test]
    fn test_chat_level_up_opens_overlay() {
        let timings = Timings {
            level_up_message_threshold: 0,
            ..Timings::default()
        };
        let mut router = Router::with_timings(timings, 5);
        let start = Instant::now();
        in_chat(&mut router, start);

        assert_eq!(
            router.dispatch_at(Transition::SendMessage { text: "  ".into() }, start),
            Outcome::Rejected(Rejection::EmptyMessage)
        );
        router.dispatch_at(Transition::SendMessage { text: "selam".into() }, start);
        assert_eq!(router.tick(start + timings.reply_delay), vec![Outcome::Updated]);
        assert!(router.state().trust_level.is_anonymous());

        router.tick(start + timings.reply_delay + timings.level_up_delay);
        assert_eq!(router.state().trust_level.value(), 1);
        assert_eq!(router.state().overlays.level_up.map(|l| l.value()), Some(1));
        assert!(router.available_actions().contains(&Action::DismissLevelUp));

        router.dispatch(Transition::DismissLevelUp);
        assert!(!router.state().overlays.level_up_visible());
        assert_eq!(
            router.dispatch(Transition::DismissLevelUp),
            Outcome::Rejected(Rejection::NoOverlay(Action::DismissLevelUp))
        );
    }

    #[test]
    fn test_leaving_chat_cancels_pending_timers() {
        let timings = Timings {
            level_up_message_threshold: 0,
            ..Timings::default()
        };
        let mut router = Router::with_timings(timings, 5);
        let start = Instant::now();
        in_chat(&mut router, start);

        router.dispatch_at(Transition::SendMessage { text: "selam".into() }, start);
        router.tick(start + timings.reply_delay);
        assert!(router.state().chat().unwrap().level_up_pending());

        router.dispatch(Transition::Back);
        let fired = router.tick(start + Duration::from_secs(60));
        assert!(fired.is_empty());
        assert!(router.state().trust_level.is_anonymous());
        assert!(!router.state().overlays.level_up_visible());
    }

    #[test]
    fn test_trust_rises_by_one_and_caps() {
        let mut router = router();
        for expected in 1..=4 {
            assert_eq!(router.raise_trust(), Outcome::Updated);
            assert_eq!(router.state().trust_level.value(), expected);
        }
        assert_eq!(router.raise_trust(), Outcome::Rejected(Rejection::TrustComplete));
        assert_eq!(router.state().trust_level.value(), 4);
    }

    #[test]
    fn test_questions_overlay() {
        let mut router = router();
        at_home(&mut router);
        assert!(router.dispatch(Transition::NextCard).is_rejected());

        router.dispatch(Transition::OpenQuestions);
        assert_eq!(router.screen(), Screen::Home);
        assert_eq!(
            router.dispatch(Transition::PreviousCard),
            Outcome::Rejected(Rejection::DeckEnd)
        );
        assert_eq!(router.dispatch(Transition::NextCard), Outcome::Updated);
        assert_eq!(router.state().overlays.questions.map(|d| d.index()), Some(1));

        // The overlay stays up across primary navigation
        router.dispatch(Transition::AskHelp);
        assert!(router.state().overlays.questions_visible());
        router.dispatch(Transition::CloseQuestions);
        assert!(!router.state().overlays.questions_visible());
    }

    #[test]
    fn test_reopening_questions_keeps_card() {
        let mut router = router();
        at_home(&mut router);
        router.dispatch(Transition::OpenQuestions);
        router.dispatch(Transition::NextCard);
        router.dispatch(Transition::NextCard);

        assert_eq!(router.dispatch(Transition::OpenQuestions), Outcome::Updated);
        assert_eq!(router.state().overlays.questions.map(|d| d.index()), Some(2));

        router.dispatch(Transition::CloseQuestions);
        router.dispatch(Transition::OpenQuestions);
        assert_eq!(router.state().overlays.questions.map(|d| d.index()), Some(0));
    }

    #[test]
    fn test_turning_cards_stops_at_last() {
        let mut router = router();
        at_home(&mut router);
        router.dispatch(Transition::OpenQuestions);
        let mut turned = 0;
        while router.dispatch(Transition::NextCard) == Outcome::Updated {
            turned += 1;
        }
        assert_eq!(turned, crate::content::CONNECTION_CARDS.len() - 1);
        assert!(router.state().overlays.questions.is_some_and(|d| d.is_last()));
        assert_eq!(
            router.dispatch(Transition::NextCard),
            Outcome::Rejected(Rejection::DeckEnd)
        );
    }

    #[test]
    fn test_settings_toggles() {
        let mut router = router();
        at_home(&mut router);
        assert!(router.dispatch(Transition::ToggleDarkMode).is_rejected());
        router.dispatch(Transition::OpenProfile);
        router.dispatch(Transition::OpenSettings);
        router.dispatch(Transition::ToggleDarkMode);
        router.dispatch(Transition::ToggleNotifications);
        assert!(router.state().settings.dark_mode);
        assert!(!router.state().settings.notifications);
    }

    #[test]
    fn test_every_screen_lists_back_consistently() {
        for screen in Screen::all() {
            let has_back = screen.actions().contains(&Action::Back);
            let expected = !matches!(
                screen,
                Screen::Welcome | Screen::ProfileSetup | Screen::Home | Screen::Waiting
            );
            assert_eq!(has_back, expected, "{}", screen);
        }
    }
}
