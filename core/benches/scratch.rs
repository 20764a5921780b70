use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use scratchoff_core::*;

/// Card-sized overlay with a 4x3 grid of symbol windows.
fn card_overlay() -> OpacityBuffer {
    let (width, height) = (320, 180);
    let mut mask = Array2::from_elem([width, height], false);
    for col in 0..4 {
        for row in 0..3 {
            let (left, top) = (16 + col * 76, 12 + row * 56);
            for x in left..left + 60 {
                for y in top..top + 44 {
                    mask[[x, y]] = true;
                }
            }
        }
    }
    OpacityBuffer::from_mask(&mask).expect("overlay fits")
}

fn bench_detect(c: &mut Criterion) {
    let overlay = card_overlay();
    c.bench_function("detect_zones/320x180", |b| {
        b.iter(|| detect_zones(black_box(&overlay)))
    });
}

fn bench_scratch(c: &mut Criterion) {
    let overlay = card_overlay();
    let card = ScratchCard::new(
        overlay,
        CardConfig::default(),
        FixedPrizeGenerator::new([Prize::Money(10)]),
    );

    c.bench_function("scratch_at/sweep", |b| {
        b.iter_batched(
            || (card.clone(), Player::new()),
            |(mut card, mut player)| {
                for step in 0..160u16 {
                    let x = f32::from(step * 2);
                    let y = f32::from(20 + (step * 13) % 140);
                    black_box(card.scratch_at((x, y), &mut player));
                }
                card
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_detect, bench_scratch);
criterion_main!(benches);
