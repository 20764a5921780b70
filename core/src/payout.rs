use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Base reward per number of revealed jackpot symbols.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoutTable(Vec<Money>);

impl PayoutTable {
    pub fn new(rewards: impl Into<Vec<Money>>) -> Self {
        Self(rewards.into())
    }

    /// Counts past the end of the table pay the top tier.
    pub fn base_reward(&self, matches: u32) -> Money {
        let Some(&top) = self.0.last() else {
            return 0;
        };
        match self.0.get(matches as usize) {
            Some(&reward) => reward,
            None => {
                log::warn!("{matches} jackpot matches exceed payout table, paying top tier");
                top
            }
        }
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self(vec![0, 0, 10, 20, 50, 100])
    }
}

/// How revealed money prizes turn into a payout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutModel {
    /// Every money zone adds its amount; the sum is scaled by the multiplier.
    #[default]
    Additive,
    /// Money zones count as jackpot symbols; the count picks a tier from the table.
    Tiered(PayoutTable),
}

/// Running totals of one card, before they reach the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTotals {
    pub money: Money,
    pub multiplier: f32,
    pub jackpot_matches: u32,
    pub winnings_applied: bool,
    /// What the last winnings transfer actually credited.
    pub paid_out: Money,
}

impl CardTotals {
    /// Value of the card under `model` if it were cashed in now.
    pub fn payout(&self, model: &PayoutModel) -> Money {
        let base = match model {
            PayoutModel::Additive => self.money,
            PayoutModel::Tiered(table) => table.base_reward(self.jackpot_matches),
        };
        (f64::from(base) * f64::from(self.multiplier)) as Money
    }
}

impl Default for CardTotals {
    fn default() -> Self {
        Self {
            money: 0,
            multiplier: 1.0,
            jackpot_matches: 0,
            winnings_applied: false,
            paid_out: 0,
        }
    }
}
