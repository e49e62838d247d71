/// An ordered pick list of tags, optionally capped.
///
/// Selection order is kept for display. Toggling an unselected tag while the
/// list is full is refused, mirroring a disabled chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    picked: Vec<String>,
    cap: Option<usize>,
}

impl TagSelection {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn capped(cap: usize) -> Self {
        Self {
            picked: Vec::new(),
            cap: Some(cap),
        }
    }

    /// Select or deselect `tag`. Returns false if the toggle was refused.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.picked.iter().position(|t| t == tag) {
            self.picked.remove(pos);
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.picked.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.picked.iter().any(|t| t == tag)
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.picked.len() >= cap)
    }

    /// Whether `tag` can currently be toggled
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.contains(tag) || !self.is_full()
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn cap(&self) -> Option<usize> {
        self.cap
    }

    pub fn as_slice(&self) -> &[String] {
        &self.picked
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.picked.clone()
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }
}
