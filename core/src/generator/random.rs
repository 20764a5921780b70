use alloc::vec;
use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::*;

/// Relative odds of each prize kind. Only the ratios matter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizeWeights {
    pub none: u32,
    pub money: u32,
    pub multiplier: u32,
    pub relic: u32,
}

impl PrizeWeights {
    pub const fn total(&self) -> u32 {
        self.none
            .saturating_add(self.money)
            .saturating_add(self.multiplier)
            .saturating_add(self.relic)
    }

    /// Maps a roll in `0..total()` onto a prize kind.
    fn kind_for_roll(&self, mut roll: u32) -> PrizeKind {
        for (kind, weight) in [
            (PrizeKind::Money, self.money),
            (PrizeKind::None, self.none),
            (PrizeKind::Multiplier, self.multiplier),
            (PrizeKind::Relic, self.relic),
        ] {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        PrizeKind::None
    }
}

impl Default for PrizeWeights {
    fn default() -> Self {
        Self {
            none: 35,
            money: 50,
            multiplier: 10,
            relic: 5,
        }
    }
}

/// Inclusive bounds for a sampled prize value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> ValueRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Balance parameters for [`RandomPrizeGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizeTable {
    pub weights: PrizeWeights,
    pub money: ValueRange<Money>,
    pub multiplier: ValueRange<f32>,
    pub relics: Vec<RelicId>,
}

impl PrizeTable {
    pub fn validate(&self) -> Result<()> {
        let relics_drawable = self.weights.relic == 0 || !self.relics.is_empty();
        if self.weights.total() == 0
            || !self.money.is_valid()
            || !self.multiplier.is_valid()
            || self.multiplier.min < 0.0
            || !relics_drawable
        {
            return Err(CardError::InvalidPrizeTable);
        }
        Ok(())
    }
}

impl Default for PrizeTable {
    fn default() -> Self {
        Self {
            weights: PrizeWeights::default(),
            money: ValueRange::new(5, 25),
            multiplier: ValueRange::new(1.5, 2.5),
            relics: vec![
                RelicId::new("Lucky Coin"),
                RelicId::new("Four-Leaf Clover"),
                RelicId::new("Golden Scraper"),
                RelicId::new("Horseshoe"),
            ],
        }
    }
}

/// Draws every zone's prize independently from a weighted table.
#[derive(Clone, Debug)]
pub struct RandomPrizeGenerator {
    seed: u64,
    table: PrizeTable,
    rng: SmallRng,
}

impl RandomPrizeGenerator {
    pub fn new(seed: u64, table: PrizeTable) -> Result<Self> {
        table.validate()?;
        Ok(Self {
            seed,
            table,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }

    fn draw(&mut self) -> Prize {
        let table = &self.table;
        let roll = self.rng.random_range(0..table.weights.total());

        match table.weights.kind_for_roll(roll) {
            PrizeKind::None => Prize::None,
            PrizeKind::Money => {
                Prize::Money(self.rng.random_range(table.money.min..=table.money.max))
            }
            PrizeKind::Multiplier => Prize::Multiplier(
                self.rng
                    .random_range(table.multiplier.min..=table.multiplier.max),
            ),
            PrizeKind::Relic => {
                let index = self.rng.random_range(0..table.relics.len());
                Prize::Relic(table.relics[index].clone())
            }
        }
    }
}

impl PrizeGenerator for RandomPrizeGenerator {
    fn assign(&mut self, zone_count: usize) -> Vec<Prize> {
        let prizes: Vec<_> = (0..zone_count).map(|_| self.draw()).collect();
        log::debug!("Assigned prizes with seed {}: {:?}", self.seed, prizes);
        prizes
    }
}
