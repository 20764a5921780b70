use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use clap::Parser;
use scratchoff_core::*;

mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Overlay image; its alpha channel is the scratchable foil
    overlay: PathBuf,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a prize seed instead of a random one
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with `[card]` and `[prizes]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scratch stroke at `x,y` in card space, applied in order
    #[arg(long = "stroke", value_parser = parse_point)]
    strokes: Vec<(f32, f32)>,

    /// Auto-scratch the remaining zones after the strokes
    #[arg(long)]
    auto: bool,

    /// Simulated frame time for auto-scratch, in milliseconds
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    dt_ms: u64,

    /// Id the overlay is registered under; `<id>_shop` resolves to it as well
    #[arg(long, default_value = "card")]
    card_id: String,
}

fn parse_point(text: &str) -> Result<(f32, f32)> {
    let Some((x, y)) = text.split_once(',') else {
        bail!("expected x,y but got {text:?}");
    };
    let x = x.trim().parse().context("bad x coordinate")?;
    let y = y.trim().parse().context("bad y coordinate")?;
    Ok((x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = config::load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Prize seed: {seed}");

    let mut catalog = MemoryCatalog::new();
    catalog.insert(args.card_id.clone(), config::load_overlay(&args.overlay)?);
    catalog.alias(format!("{}_shop", args.card_id), args.card_id.clone());

    let prizes = RandomPrizeGenerator::new(seed, settings.prizes)?;
    let mut card = ScratchCard::from_catalog(&catalog, &args.card_id, settings.card, prizes)?;
    let mut player = Player::new();
    log::info!("Detected {} zones", card.zones().len());

    for &point in &args.strokes {
        let outcome = card.scratch_at(point, &mut player);
        log::debug!("Stroke at {point:?}: {outcome:?}");
    }

    if args.auto && !card.is_fully_revealed() {
        auto_scratch(&mut card, &mut player, Duration::from_millis(args.dt_ms));
    }

    if card.is_fully_revealed() {
        card.apply_winnings(&mut player);
    }

    print_report(&card, &player);
    Ok(())
}

/// Feeds fixed frames into the card until auto-scratch stops on its own.
fn auto_scratch(card: &mut ScratchCard, player: &mut Player, frame: Duration) {
    if !card.start_auto_scratch() {
        return;
    }

    let mut elapsed = Duration::ZERO;
    while card.auto_scratch().is_running() {
        elapsed += frame;
        let outcome = card.update_auto_scratch(frame, player);
        if outcome.has_update() {
            log::debug!(
                "{:>6}ms: {outcome:?}, next in {:?}",
                elapsed.as_millis(),
                card.auto_scratch().current_interval()
            );
        }
    }
}

fn print_report(card: &ScratchCard, player: &Player) {
    let (width, height) = card.size();
    println!("card {width}x{height}, {:.1}% scratched", card.completion_percent());

    for (index, zone) in card.zones().iter().enumerate() {
        let rect = zone.rect();
        let prize = if zone.is_revealed() {
            zone.prize().label().unwrap_or_else(|| format!("{:?}", zone.prize().kind()))
        } else {
            "?".to_owned()
        };
        println!(
            "zone {index:>2} @ ({:>4},{:>4}) {:>4}x{:<4} {:>6}/{:<6} {prize}",
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            zone.cleared_pixels(),
            zone.total_pixels(),
        );
    }

    for label in card.prize_labels() {
        println!("label {} at {:?}", label.text, label.position);
    }

    let totals = card.totals();
    println!(
        "money {} multiplier x{:.1} jackpot matches {}",
        totals.money, totals.multiplier, totals.jackpot_matches
    );
    match card.state() {
        CardState::FullyRevealed => println!("paid out {}", totals.paid_out),
        state => println!("not cashed in ({state:?})"),
    }

    println!("balance {}", player.balance());
    if !player.relics().is_empty() {
        let relics: Vec<_> = player.relics().iter().map(RelicId::as_str).collect();
        println!("relics {}", relics.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn points_parse_with_spaces() {
        assert_eq!(parse_point("12, 3.5").unwrap(), (12.0, 3.5));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn strokes_repeat() {
        let args = Args::try_parse_from([
            "scratchoff-sim",
            "card.png",
            "--stroke",
            "1,2",
            "--stroke",
            "3,4",
            "--auto",
        ])
        .unwrap();

        assert_eq!(args.strokes, vec![(1.0, 2.0), (3.0, 4.0)]);
        assert!(args.auto);
        assert_eq!(args.dt_ms, 16);
        assert_eq!(args.card_id, "card");
    }

    #[test]
    fn zero_frame_time_is_refused() {
        assert!(Args::try_parse_from(["scratchoff-sim", "card.png", "--dt-ms", "0"]).is_err());
    }
}
