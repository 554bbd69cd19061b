//! Balance simulator CLI.
//!
//! Runs Monte Carlo fights and tournaments to analyze combat balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 1000 fights per enemy, 200 tournaments
//!   cargo run --bin simulate -- -f 100 -t 20    # Quick pass
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use std::env;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gauntlet::constants::BRACKET_SIZE;
use gauntlet::{
    enemies, resolve_combat_with_rng, Archetype, Combatant, DamageFormula, Player, Tournament,
};

struct SimConfig {
    fights_per_enemy: u32,
    tournaments: u32,
    seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fights_per_enemy: 1000,
            tournaments: 200,
            seed: None,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              GAUNTLET BALANCE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Fights per enemy:  {}", config.fights_per_enemy);
    println!("  Tournaments:       {}", config.tournaments);
    if let Some(seed) = config.seed {
        println!("  Seed:              {}", seed);
    }
    println!();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    run_enemy_gauntlet(&config, &mut rng);
    run_tournaments(&config, &mut rng);
}

/// A fresh level-1 player against every roster enemy, flat-defense path.
fn run_enemy_gauntlet(config: &SimConfig, rng: &mut impl Rng) {
    println!("── Enemy gauntlet (level-1 player, flat defense) ──");
    println!(
        "{:<20} {:>6} {:>9} {:>11}",
        "Enemy", "Lvl", "Win rate", "Avg rounds"
    );

    let player = Player::new("Sim", Archetype::Knight);
    let snapshot = Combatant::from_player(&player);

    for enemy in enemies::roster() {
        let foe = Combatant::from_enemy(&enemy);
        let mut wins = 0u32;
        let mut total_rounds = 0u64;

        for _ in 0..config.fights_per_enemy {
            let outcome = resolve_combat_with_rng(&snapshot, &foe, DamageFormula::FlatDefense, rng)
                .expect("both sides are fight-ready");
            if outcome.player_won() {
                wins += 1;
            }
            total_rounds += outcome.rounds as u64;
        }

        println!(
            "{:<20} {:>6} {:>8.1}% {:>11.1}",
            enemy.name,
            enemy.level,
            wins as f64 / config.fights_per_enemy as f64 * 100.0,
            total_rounds as f64 / config.fights_per_enemy as f64,
        );
    }
    println!();
}

/// Full 32-bot brackets, percent-defense path; reports champion spread.
fn run_tournaments(config: &SimConfig, rng: &mut impl Rng) {
    println!("── Tournament brackets ({} bots) ──", BRACKET_SIZE);

    let mut titles = vec![0u32; BRACKET_SIZE];
    for _ in 0..config.tournaments {
        let field: Vec<Combatant> = (0..BRACKET_SIZE).map(|i| random_bot(i, rng)).collect();
        let mut tournament = Tournament::seed(field).expect("even bracket");

        while !tournament.is_complete() {
            tournament
                .simulate_round_with_rng(rng)
                .expect("bot nodes always resolve");
            if !tournament.is_complete() {
                tournament.advance_round().expect("round is decided");
            }
        }

        let champion = tournament.champion().expect("complete bracket");
        let seat: usize = champion
            .name
            .trim_start_matches("Bot")
            .parse()
            .expect("bot names carry their seat");
        titles[seat] += 1;
    }

    println!("Top seats by championships:");
    let mut ranked: Vec<(usize, u32)> = titles.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    for (seat, wins) in ranked.iter().take(5) {
        println!(
            "  seat {:>2}: {:>4} titles ({:.1}%)",
            seat,
            wins,
            *wins as f64 / config.tournaments as f64 * 100.0
        );
    }
    println!();
}

/// A bracket bot with stats jittered around a common baseline.
fn random_bot(seat: usize, rng: &mut impl Rng) -> Combatant {
    let hp = rng.gen_range(250..=400);
    Combatant {
        name: format!("Bot{seat}"),
        level: rng.gen_range(5..=15),
        hp,
        max_hp: hp,
        attack: rng.gen_range(25..=45),
        defense: rng.gen_range(10..=40),
        crit_chance: rng.gen_range(5.0..=30.0),
        attack_speed: rng.gen_range(0.8..=1.6),
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--fights" => {
                if i + 1 < args.len() {
                    config.fights_per_enemy = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-t" | "--tournaments" => {
                if i + 1 < args.len() {
                    config.tournaments = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Gauntlet Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -f, --fights <N>       Fights per roster enemy (default: 1000)");
    println!("    -t, --tournaments <N>  Tournament brackets to run (default: 200)");
    println!("    -s, --seed <S>         Random seed for reproducibility");
    println!("    -h, --help             Show this help");
}
