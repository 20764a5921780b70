use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Source of the prizes hidden under a card's zones.
pub trait PrizeGenerator {
    /// Draws one prize per zone, in zone order.
    fn assign(&mut self, zone_count: usize) -> Vec<Prize>;
}

/// Hands out a fixed list of prizes, repeating it when a card has more zones.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPrizeGenerator {
    prizes: Vec<Prize>,
}

impl FixedPrizeGenerator {
    pub fn new(prizes: impl Into<Vec<Prize>>) -> Self {
        Self {
            prizes: prizes.into(),
        }
    }
}

impl PrizeGenerator for FixedPrizeGenerator {
    fn assign(&mut self, zone_count: usize) -> Vec<Prize> {
        if self.prizes.is_empty() {
            return core::iter::repeat_n(Prize::None, zone_count).collect();
        }
        self.prizes.iter().cycle().take(zone_count).cloned().collect()
    }
}

impl<G: PrizeGenerator + ?Sized> PrizeGenerator for &mut G {
    fn assign(&mut self, zone_count: usize) -> Vec<Prize> {
        (**self).assign(zone_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_generator_cycles_its_list() {
        let mut generator = FixedPrizeGenerator::new([Prize::Money(10), Prize::None]);

        let prizes = generator.assign(3);

        assert_eq!(prizes, [Prize::Money(10), Prize::None, Prize::Money(10)]);
    }

    #[test]
    fn empty_fixed_generator_gives_nothing() {
        let mut generator = FixedPrizeGenerator::new(Vec::new());

        assert_eq!(generator.assign(2), [Prize::None, Prize::None]);
    }
}
