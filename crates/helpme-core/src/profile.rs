use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::state::Identity;

/// The current user's public profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub identity: Identity,
    pub helped_count: u32,
    pub received_count: u32,
    /// Fixed when the profile is created so it doesn't change between frames
    pub help_rank: u8,
}

impl UserProfile {
    pub fn new(identity: Identity) -> Self {
        let mut rng = StdRng::seed_from_u64(identity.seed as u64);
        Self {
            identity,
            helped_count: 23,
            received_count: 8,
            help_rank: rng.gen_range(0..100),
        }
    }

    pub fn display_name(&self) -> String {
        format!("Anonim #{}", self.identity.seed)
    }

    /// Ten bar heights in percent for the HelpRank sparkline
    pub fn help_rank_bars(&self) -> [u8; 10] {
        let mut bars = [0u8; 10];
        for (i, bar) in bars.iter_mut().enumerate() {
            let height = (self.help_rank as f64 / 100.0) * (i + 1) as f64 * 15.0;
            *bar = height.min(100.0) as u8;
        }
        bars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    ActiveChats,
    Solved,
    Interests,
}

impl ProfileTab {
    pub fn all() -> Vec<ProfileTab> {
        vec![ProfileTab::ActiveChats, ProfileTab::Solved, ProfileTab::Interests]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileTab::ActiveChats => "Aktif Sohbetler",
            ProfileTab::Solved => "Çözülenler",
            ProfileTab::Interests => "İlgi Alanları",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ProfileTab::ActiveChats => ProfileTab::Solved,
            ProfileTab::Solved => ProfileTab::Interests,
            ProfileTab::Interests => ProfileTab::ActiveChats,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ProfileTab::ActiveChats => ProfileTab::Interests,
            ProfileTab::Solved => ProfileTab::ActiveChats,
            ProfileTab::Interests => ProfileTab::Solved,
        }
    }
}
