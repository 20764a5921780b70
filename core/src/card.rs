use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Untouched,
    Scratching,
    FullyRevealed,
}

impl CardState {
    pub const fn is_untouched(self) -> bool {
        matches!(self, Self::Untouched)
    }

    pub const fn is_fully_revealed(self) -> bool {
        matches!(self, Self::FullyRevealed)
    }
}

/// One scratch card: its foil, its zones and what they have paid so far.
///
/// All mutation goes through `&mut self`, one call at a time. Prizes that
/// touch the player directly (relics) are granted at reveal time; money and
/// multipliers wait in [`CardTotals`] until [`ScratchCard::apply_winnings`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScratchCard {
    config: CardConfig,
    mask: ScratchMask,
    zones: Vec<Zone>,
    totals: CardTotals,
    state: CardState,
    auto_scratch: AutoScratch,
}

impl ScratchCard {
    pub fn new(overlay: OpacityBuffer, config: CardConfig, prizes: impl PrizeGenerator) -> Self {
        let zones = detect_zones(&overlay)
            .into_iter()
            .map(|shape| Zone::new(shape, Prize::None))
            .collect();

        let mut card = Self {
            auto_scratch: AutoScratch::new(config.auto_scratch),
            config,
            mask: ScratchMask::new(overlay),
            zones,
            totals: CardTotals::default(),
            state: CardState::default(),
        };
        card.assign_prizes(prizes);
        card.check_completion();
        card
    }

    pub fn from_catalog(
        catalog: &impl OverlayCatalog,
        card_id: &str,
        config: CardConfig,
        prizes: impl PrizeGenerator,
    ) -> Result<Self> {
        let overlay = catalog.overlay(card_id).ok_or(CardError::UnknownCard)?;
        Ok(Self::new(overlay.clone(), config, prizes))
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.mask.size()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Current foil, for compositing over the card art.
    pub fn opacity(&self) -> &OpacityBuffer {
        self.mask.live()
    }

    pub fn totals(&self) -> &CardTotals {
        &self.totals
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.state.is_fully_revealed()
    }

    pub fn accumulated_money(&self) -> Money {
        self.totals.money
    }

    pub fn accumulated_multiplier(&self) -> f32 {
        self.totals.multiplier
    }

    pub fn jackpot_matches(&self) -> u32 {
        self.totals.jackpot_matches
    }

    pub fn winnings_applied(&self) -> bool {
        self.totals.winnings_applied
    }

    pub fn completion_percent(&self) -> f32 {
        self.mask.completion_percent()
    }

    pub fn auto_scratch(&self) -> &AutoScratch {
        &self.auto_scratch
    }

    /// Labels for every multiplier zone that is already open.
    pub fn prize_labels(&self) -> Vec<PrizeLabel> {
        self.zones
            .iter()
            .filter(|zone| zone.is_revealed() && matches!(zone.prize(), Prize::Multiplier(_)))
            .filter_map(|zone| {
                Some(PrizeLabel {
                    text: zone.prize().label()?,
                    position: zone.rect().center(),
                })
            })
            .collect()
    }

    /// Scratches at `(x, y)` in unscaled card space with the configured tool.
    pub fn scratch_at(
        &mut self,
        (x, y): (f32, f32),
        player: &mut impl PlayerAccount,
    ) -> ScratchOutcome {
        let radius = self.config.scratch_radius();
        let Some(stroke) = stroke_bounds((x, y), radius, self.size()) else {
            return ScratchOutcome::NoChange;
        };

        if !self.mask.erase_at((x, y), radius).has_update() {
            return ScratchOutcome::NoChange;
        }
        self.mark_started();

        let mut outcome = ScratchOutcome::Scratched;
        for index in 0..self.zones.len() {
            let zone = &mut self.zones[index];
            if zone.is_revealed() || !zone.rect().intersects(&stroke) {
                continue;
            }

            self.mask.recount(zone);
            if zone.meets_threshold(self.config.reveal_threshold) {
                outcome = outcome | self.reveal_index(index, player);
            }
        }

        outcome | self.check_completion()
    }

    /// Opens a single zone as if it had been scratched clear.
    pub fn reveal_zone(
        &mut self,
        index: usize,
        player: &mut impl PlayerAccount,
    ) -> Result<ScratchOutcome> {
        if index >= self.zones.len() {
            return Err(CardError::InvalidZone);
        }
        self.mark_started();
        Ok(self.reveal_index(index, player) | self.check_completion())
    }

    /// Clears the whole card at once. No prizes are applied.
    pub fn reveal_all(&mut self) -> ScratchOutcome {
        self.auto_scratch.stop();
        let mut outcome = if self.mask.clear_all().has_update() {
            ScratchOutcome::Scratched
        } else {
            ScratchOutcome::NoChange
        };

        for zone in &mut self.zones {
            if zone.mark_revealed() {
                outcome = outcome | ScratchOutcome::ZoneRevealed;
            }
        }

        outcome | self.mark_fully_revealed()
    }

    /// Pays the card's totals into `player` once. Returns what was credited.
    pub fn apply_winnings(&mut self, player: &mut impl PlayerAccount) -> Money {
        if self.totals.winnings_applied {
            return 0;
        }

        let amount = self.totals.payout(&self.config.payout);
        if amount > 0 {
            player.credit(amount);
        }
        self.totals.winnings_applied = true;
        self.totals.paid_out = amount;

        log::info!(
            "Winnings applied: £{} (money {}, jackpot matches {}, x{})",
            amount,
            self.totals.money,
            self.totals.jackpot_matches,
            self.totals.multiplier
        );
        amount
    }

    /// Restores the foil and clears all progress, keeping zones and prizes.
    pub fn reset_scratch(&mut self) {
        self.mask.reset();
        for zone in &mut self.zones {
            zone.reset();
        }
        self.totals = CardTotals::default();
        self.state = CardState::default();
        self.auto_scratch = AutoScratch::new(self.config.auto_scratch);
        self.check_completion();
    }

    /// Like [`ScratchCard::reset_scratch`], but draws fresh prizes as well.
    pub fn reset_with_prizes(&mut self, prizes: impl PrizeGenerator) {
        self.reset_scratch();
        self.assign_prizes(prizes);
    }

    pub fn start_auto_scratch(&mut self) -> bool {
        self.auto_scratch.start()
    }

    pub fn stop_auto_scratch(&mut self) {
        self.auto_scratch.stop();
    }

    /// Advances a running auto-scratch by `dt`, opening the next zone when due.
    pub fn update_auto_scratch(
        &mut self,
        dt: Duration,
        player: &mut impl PlayerAccount,
    ) -> ScratchOutcome {
        match self.auto_scratch.step(dt, self.zones.len()) {
            AutoStep::Idle | AutoStep::Waiting => ScratchOutcome::NoChange,
            AutoStep::Reveal(index) => {
                self.mark_started();
                self.reveal_index(index, player) | self.check_completion()
            }
            AutoStep::Finished(index) => {
                let outcome = match index {
                    Some(index) => self.reveal_index(index, player),
                    None => ScratchOutcome::NoChange,
                };
                log::debug!("Auto scratch complete");
                outcome | self.mark_fully_revealed()
            }
        }
    }

    fn assign_prizes(&mut self, mut prizes: impl PrizeGenerator) {
        let mut drawn = prizes.assign(self.zones.len()).into_iter();
        for zone in &mut self.zones {
            zone.set_prize(drawn.next().unwrap_or_default());
        }
    }

    /// Reveals a zone and every zone its force-clear pushes over the threshold.
    ///
    /// Bounding boxes may overlap, so clearing one zone's box can finish off
    /// the foil of another. Those zones have nothing left to scratch and would
    /// otherwise never be recounted.
    fn reveal_index(&mut self, index: usize, player: &mut impl PlayerAccount) -> ScratchOutcome {
        let mut outcome = ScratchOutcome::NoChange;
        let mut pending = VecDeque::from([index]);

        while let Some(index) = pending.pop_front() {
            let Some(cleared) = self.open_zone(index, player) else {
                continue;
            };
            outcome = outcome | ScratchOutcome::ZoneRevealed;

            for (other, zone) in self.zones.iter_mut().enumerate() {
                if zone.is_revealed() || !zone.rect().intersects(&cleared) {
                    continue;
                }
                self.mask.recount(zone);
                if zone.meets_threshold(self.config.reveal_threshold) && !pending.contains(&other) {
                    log::debug!("Zone {other} uncovered by clearing zone {index}");
                    pending.push_back(other);
                }
            }
        }

        outcome
    }

    /// Marks one zone revealed, force-clears its box and applies its prize.
    /// Returns the cleared box, or `None` if the zone was already open.
    fn open_zone(&mut self, index: usize, player: &mut impl PlayerAccount) -> Option<ZoneRect> {
        let zone = &mut self.zones[index];
        if !zone.mark_revealed() {
            return None;
        }
        let rect = zone.rect();
        self.mask.force_clear(&rect);

        let Some(prize) = zone.take_prize() else {
            return Some(rect);
        };
        log::debug!("Zone {index} revealed: {prize:?}");

        match prize {
            Prize::None => {}
            Prize::Money(amount) => match self.config.payout {
                PayoutModel::Additive => {
                    self.totals.money = self.totals.money.saturating_add(*amount);
                }
                PayoutModel::Tiered(_) => {
                    self.totals.jackpot_matches += 1;
                }
            },
            Prize::Multiplier(factor) => {
                // the multiplier only ever grows
                if *factor > 0.0 {
                    self.totals.multiplier += *factor;
                }
            }
            Prize::Relic(relic) => player.grant_relic(relic),
        }

        Some(rect)
    }

    fn check_completion(&mut self) -> ScratchOutcome {
        if self.zones.iter().all(Zone::is_revealed) {
            self.mark_fully_revealed()
        } else {
            ScratchOutcome::NoChange
        }
    }

    fn mark_fully_revealed(&mut self) -> ScratchOutcome {
        if self.state.is_fully_revealed() {
            return ScratchOutcome::NoChange;
        }
        self.state = CardState::FullyRevealed;
        if self.zones.is_empty() {
            log::warn!("Card has no zones, treating it as fully revealed");
        } else {
            log::info!("Card fully revealed ({} zones)", self.zones.len());
        }
        ScratchOutcome::Completed
    }

    fn mark_started(&mut self) {
        if self.state.is_untouched() {
            self.state = CardState::Scratching;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn overlay(size: Coord2, rects: &[ZoneRect]) -> OpacityBuffer {
        let mut mask = Array2::from_elem(size.to_nd_index(), false);
        for rect in rects {
            for coords in rect.iter_coords() {
                mask[coords.to_nd_index()] = true;
            }
        }
        OpacityBuffer::from_mask(&mask).unwrap()
    }

    fn card(rects: &[ZoneRect], prizes: &[Prize]) -> ScratchCard {
        ScratchCard::new(
            overlay((32, 16), rects),
            CardConfig::default(),
            FixedPrizeGenerator::new(prizes.to_vec()),
        )
    }

    const TWO_ZONES: [ZoneRect; 2] = [ZoneRect::new(0, 0, 4, 10), ZoneRect::new(10, 0, 6, 10)];

    #[test]
    fn fresh_card_has_untouched_zones() {
        let card = card(&TWO_ZONES, &[Prize::Money(10), Prize::None]);

        assert_eq!(card.state(), CardState::Untouched);
        assert_eq!(card.zones().len(), 2);
        assert!(card.zones().iter().all(|zone| !zone.is_revealed()));
        assert_eq!(card.completion_percent(), 0.0);
        assert_eq!(card.zone(0).unwrap().prize(), &Prize::Money(10));
    }

    #[test]
    fn scratch_outside_foil_is_a_no_op() {
        let mut card = card(&TWO_ZONES, &[]);
        let mut player = Player::new();

        assert_eq!(card.scratch_at((28.0, 14.0), &mut player), ScratchOutcome::NoChange);
        assert_eq!(card.scratch_at((-50.0, 3.0), &mut player), ScratchOutcome::NoChange);
        assert_eq!(card.state(), CardState::Untouched);
    }

    #[test]
    fn partial_scratch_does_not_reveal() {
        let mut card = card(&TWO_ZONES, &[]);
        let mut player = Player::new();

        let outcome = card.scratch_at((12.0, 0.0), &mut player);

        assert_eq!(outcome, ScratchOutcome::Scratched);
        assert_eq!(card.state(), CardState::Scratching);
        let zone = card.zone(1).unwrap();
        assert!(zone.cleared_pixels() > 0);
        assert!(!zone.is_revealed());
        assert_eq!(card.zone(0).unwrap().cleared_pixels(), 0);
    }

    #[test]
    fn relic_is_granted_on_reveal() {
        let mut card = card(&TWO_ZONES, &[Prize::Relic("Horseshoe".into()), Prize::None]);
        let mut player = Player::new();

        let outcome = card.reveal_zone(0, &mut player).unwrap();

        assert_eq!(outcome, ScratchOutcome::ZoneRevealed);
        assert_eq!(player.relics(), [RelicId::new("Horseshoe")]);
        assert!(card.zone(0).unwrap().is_applied());
        assert_eq!(card.reveal_zone(0, &mut player).unwrap(), ScratchOutcome::NoChange);
        assert_eq!(player.relics().len(), 1);
        assert_eq!(card.reveal_zone(2, &mut player), Err(CardError::InvalidZone));
    }

    #[test]
    fn multiplier_adds_to_the_card_and_shows_a_label() {
        let mut card = card(&TWO_ZONES, &[Prize::Multiplier(1.5), Prize::Money(10)]);
        let mut player = Player::new();

        assert!(card.prize_labels().is_empty());
        card.reveal_zone(0, &mut player).unwrap();

        assert_eq!(card.accumulated_multiplier(), 2.5);
        assert_eq!(
            card.prize_labels(),
            [PrizeLabel {
                text: "x1.5".into(),
                position: (2.0, 5.0),
            }]
        );
    }

    #[test]
    fn last_reveal_completes_the_card() {
        let mut card = card(&TWO_ZONES, &[Prize::Money(10), Prize::Money(5)]);
        let mut player = Player::new();

        card.reveal_zone(0, &mut player).unwrap();
        let outcome = card.reveal_zone(1, &mut player).unwrap();

        assert_eq!(outcome, ScratchOutcome::Completed);
        assert!(card.is_fully_revealed());
        assert_eq!(card.completion_percent(), 100.0);
        assert_eq!(card.accumulated_money(), 15);
    }

    #[test]
    fn clearing_a_box_opens_zones_nested_inside_it() {
        // L shape with a lone pixel inside its bounding box
        let rects = [
            ZoneRect::new(0, 0, 12, 1),
            ZoneRect::new(0, 0, 1, 12),
            ZoneRect::new(9, 9, 1, 1),
        ];
        let mut card = card(&rects, &[Prize::Money(10), Prize::Relic("Horseshoe".into())]);
        let mut player = Player::new();
        assert_eq!(card.zones().len(), 2);
        assert_eq!(card.zone(1).unwrap().rect(), ZoneRect::new(9, 9, 1, 1));

        let outcome = card.reveal_zone(0, &mut player).unwrap();

        assert_eq!(outcome, ScratchOutcome::Completed);
        let inner = card.zone(1).unwrap();
        assert!(inner.is_revealed());
        assert!(inner.is_applied());
        assert_eq!(inner.cleared_pixels(), 1);
        assert_eq!(player.relics(), [RelicId::new("Horseshoe")]);
        assert!(card.is_fully_revealed());
    }

    #[test]
    fn tiered_payout_counts_jackpot_symbols() {
        let config = CardConfig {
            payout: PayoutModel::Tiered(PayoutTable::default()),
            ..Default::default()
        };
        let mut card = ScratchCard::new(
            overlay((32, 16), &TWO_ZONES),
            config,
            FixedPrizeGenerator::new([Prize::Money(1)]),
        );
        let mut player = Player::new();

        card.reveal_zone(0, &mut player).unwrap();
        card.reveal_zone(1, &mut player).unwrap();

        assert_eq!(card.jackpot_matches(), 2);
        assert_eq!(card.accumulated_money(), 0);
        assert_eq!(card.apply_winnings(&mut player), 10);
        assert_eq!(player.balance(), 10);
    }

    #[test]
    fn card_without_foil_is_already_revealed() {
        let mut card = card(&[], &[]);
        let mut player = Player::new();

        assert!(card.is_fully_revealed());
        assert_eq!(card.apply_winnings(&mut player), 0);

        card.reset_scratch();
        assert!(card.is_fully_revealed());
    }

    #[test]
    fn reset_restores_foil_and_rerolls_prizes() {
        let mut card = card(&TWO_ZONES, &[Prize::Money(10)]);
        let mut player = Player::new();
        card.reveal_all();
        card.apply_winnings(&mut player);

        card.reset_with_prizes(FixedPrizeGenerator::new([Prize::None]));

        assert_eq!(card.state(), CardState::Untouched);
        assert!(!card.winnings_applied());
        assert_eq!(card.accumulated_multiplier(), 1.0);
        assert_eq!(card.opacity().opaque_count(), 100);
        assert!(card.zones().iter().all(|zone| {
            !zone.is_revealed() && !zone.is_applied() && zone.cleared_pixels() == 0
        }));
        assert!(card.zones().iter().all(|zone| zone.prize() == &Prize::None));
        assert_eq!(card.zone(0).unwrap().rect(), TWO_ZONES[0]);
    }

    #[test]
    fn catalog_lookup_builds_the_aliased_card() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("lucky_7", overlay((32, 16), &TWO_ZONES));
        catalog.alias("lucky_7_shop", "lucky_7");

        let card = ScratchCard::from_catalog(
            &catalog,
            "lucky_7_shop",
            CardConfig::default(),
            FixedPrizeGenerator::new([Prize::None]),
        )
        .unwrap();

        assert_eq!(card.zones().len(), 2);
        assert_eq!(
            ScratchCard::from_catalog(
                &catalog,
                "royal",
                CardConfig::default(),
                FixedPrizeGenerator::new([Prize::None]),
            )
            .err(),
            Some(CardError::UnknownCard)
        );
    }
}
