//! UI-agnostic session state types
//!
//! This module contains data structures that are shared between the router
//! and whatever front end renders it, and don't depend on any UI framework.

use serde::{Deserialize, Serialize};

use crate::avatar::{derive_avatar, Avatar};
use crate::chat::ChatSession;
use crate::config::Config;
use crate::content::CONNECTION_CARDS;
use crate::profile::UserProfile;
use crate::timer::Deadline;
use crate::trust::TrustLevel;

/// The fixed identity of the person using this prototype
pub const USER_ID: i64 = 7392;
/// The fixed identity every chat is matched with
pub const PARTNER_ID: i64 = 4821;

/// An anonymous identity, drawn from its seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    pub seed: i64,
}

impl Identity {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    pub fn avatar(&self, trust: TrustLevel) -> Avatar {
        derive_avatar(self.seed, trust.value())
    }
}

/// A help request posted from the ask-help screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpRequest {
    pub question: String,
    pub tags: Vec<String>,
}

/// Screen-local state. Replacing it drops any deadline it owns.
#[derive(Debug, Clone)]
pub enum ScreenState {
    Welcome,
    Philosophy { page: usize },
    ProfileSetup,
    Home,
    AskHelp,
    GiveHelp,
    Waiting {
        /// End of the displayed wait estimate
        estimate: Deadline,
        connect: Deadline,
        request: HelpRequest,
    },
    Chat(Box<ChatSession>),
    UserProfile,
    HumanLibrary,
    Settings,
}

/// The "36 questions" deck, open over any screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestionDeck {
    index: usize,
}

impl QuestionDeck {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn card(&self) -> &'static crate::content::ConnectionCard {
        &CONNECTION_CARDS[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == CONNECTION_CARDS.len()
    }

    /// Returns false at the last card
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Returns false at the first card
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Fraction of the deck seen so far, including the current card
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / CONNECTION_CARDS.len() as f64
    }
}

/// Overlays are independent of the primary screen and of each other
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
    /// The level just reached, while its celebration is shown
    pub level_up: Option<TrustLevel>,
    pub questions: Option<QuestionDeck>,
}

impl Overlays {
    pub fn level_up_visible(&self) -> bool {
        self.level_up.is_some()
    }

    pub fn questions_visible(&self) -> bool {
        self.questions.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub notifications: bool,
    pub dark_mode: bool,
    pub translation_language: &'static str,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            notifications: true,
            dark_mode: config.dark_mode,
            translation_language: "Türkçe",
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything that survives screen changes, for the life of the process
#[derive(Debug, Clone)]
pub struct SessionState {
    pub screen: ScreenState,
    pub interests: Vec<String>,
    pub trust_level: TrustLevel,
    pub overlays: Overlays,
    pub user: Identity,
    pub partner: Identity,
    pub profile: UserProfile,
    pub settings: Settings,
    /// Most recent request sent from ask-help
    pub last_request: Option<HelpRequest>,
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        let user = Identity::new(USER_ID);
        Self {
            screen: ScreenState::Welcome,
            interests: Vec::new(),
            trust_level: TrustLevel::ANONYMOUS,
            overlays: Overlays::default(),
            user,
            partner: Identity::new(PARTNER_ID),
            profile: UserProfile::new(user),
            settings,
            last_request: None,
        }
    }

    pub fn chat(&self) -> Option<&ChatSession> {
        match &self.screen {
            ScreenState::Chat(chat) => Some(chat),
            _ => None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
