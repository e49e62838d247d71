pub mod avatar;
pub mod chat;
pub mod config;
pub mod content;
pub mod profile;
pub mod router;
pub mod selection;
pub mod state;
pub mod timer;
pub mod trust;

// Re-export main types for convenience
pub use avatar::{derive_avatar, Avatar, AvatarColor, AvatarSize, Glyph, Shape};
pub use chat::{ChatMessage, ChatOrigin, ChatSession, Sender};
pub use config::Config;
pub use profile::{ProfileTab, UserProfile};
pub use router::{Action, Outcome, Rejection, Router, Screen, Transition};
pub use selection::TagSelection;
pub use state::{HelpRequest, Identity, Overlays, QuestionDeck, ScreenState, SessionState, Settings};
pub use timer::{Deadline, Timings};
pub use trust::TrustLevel;
