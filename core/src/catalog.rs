use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::*;

/// Read-only lookup of card overlays by card id, handed to whoever builds cards.
pub trait OverlayCatalog {
    fn overlay(&self, card_id: &str) -> Option<&OpacityBuffer>;
}

/// Overlays kept in memory, with optional aliases such as a shop preview id
/// pointing at the full-size card it stands for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryCatalog {
    overlays: BTreeMap<String, OpacityBuffer>,
    aliases: BTreeMap<String, String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, card_id: impl Into<String>, overlay: OpacityBuffer) {
        self.overlays.insert(card_id.into(), overlay);
    }

    pub fn alias(&mut self, alias: impl Into<String>, card_id: impl Into<String>) {
        self.aliases.insert(alias.into(), card_id.into());
    }

    /// Follows one level of aliasing.
    pub fn resolve<'a>(&'a self, card_id: &'a str) -> &'a str {
        self.aliases
            .get(card_id)
            .map(String::as_str)
            .unwrap_or(card_id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl OverlayCatalog for MemoryCatalog {
    fn overlay(&self, card_id: &str) -> Option<&OpacityBuffer> {
        self.overlays.get(self.resolve(card_id))
    }
}
