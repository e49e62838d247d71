//! Progressive identity reveal between two matched users

use serde::Serialize;

use crate::content::{LevelMilestone, LEVEL_MILESTONES};

/// How much of a partner's identity is visible. Only ever goes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct TrustLevel(u8);

impl TrustLevel {
    pub const MAX: u8 = 4;
    pub const ANONYMOUS: TrustLevel = TrustLevel(0);

    /// Clamps to the valid range
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == 0
    }

    pub fn is_max(&self) -> bool {
        self.0 == Self::MAX
    }

    /// The next level up, or `None` when trust is already complete
    pub fn raised(&self) -> Option<TrustLevel> {
        (self.0 < Self::MAX).then(|| TrustLevel(self.0 + 1))
    }

    /// Copy shown when this level is reached
    pub fn milestone(&self) -> Option<&'static LevelMilestone> {
        LEVEL_MILESTONES.iter().find(|m| m.level == self.0)
    }

    /// Name the partner is shown under at this level
    pub fn partner_name(&self, partner_id: i64) -> String {
        match self.0 {
            0 => "Anonim".to_string(),
            1 => format!("Anonim #{}", partner_id),
            2 => format!("Kullanıcı #{}", partner_id),
            _ => format!("Arkadaş #{}", partner_id),
        }
    }

    /// Five indicator slots, filled up to the current level
    pub fn dots(&self) -> [bool; 5] {
        let mut dots = [false; 5];
        for (i, dot) in dots.iter_mut().enumerate() {
            *dot = (i as u8) < self.0;
        }
        dots
    }
}
