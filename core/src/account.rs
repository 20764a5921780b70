use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// The player economy a card pays into. Cards only ever add to it.
pub trait PlayerAccount {
    fn credit(&mut self, amount: Money);

    fn grant_relic(&mut self, relic: &RelicId);
}

/// Minimal in-memory account: a balance and the relics collected so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    balance: Money,
    relics: Vec<RelicId>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: Money) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn relics(&self) -> &[RelicId] {
        &self.relics
    }
}

impl PlayerAccount for Player {
    fn credit(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount);
    }

    fn grant_relic(&mut self, relic: &RelicId) {
        self.relics.push(relic.clone());
    }
}

impl<A: PlayerAccount + ?Sized> PlayerAccount for &mut A {
    fn credit(&mut self, amount: Money) {
        (**self).credit(amount)
    }

    fn grant_relic(&mut self, relic: &RelicId) {
        (**self).grant_relic(relic)
    }
}
