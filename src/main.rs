// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use songloop::song::SongDefinition;
use songloop::transport::{Transport, WallClockTransport};
use songloop::voice::{VoicePool, VoiceRole};
use songloop::Player;

fn print_usage() {
    println!("SONGLOOP - Declarative song playback engine");
    println!();
    println!("Usage: songloop [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --validate <FILE>       Check a YAML song file and report warnings");
    println!("  --demo [SECONDS]        Play the built-in demo song through the");
    println!("                          logging backend (default 10 seconds)");
    println!("  --write-demo <FILE>     Write the built-in demo song as YAML");
    println!("  --list-voices           List the voice roles in the pool");
    println!("  --help                  Show this help message");
}

fn validate_song(path: &str) -> Result<()> {
    let song = SongDefinition::load(path)?;
    println!("Loaded {:?}: {} sections, structure of {} entries, {} BPM",
        song.name,
        song.sections.len(),
        song.structure.len(),
        song.tempo_or_default());

    let warnings = song.validate();
    if warnings.is_empty() {
        println!("No problems found");
    } else {
        for warning in &warnings {
            println!("warning: {}", warning);
        }
        println!("{} warning(s); playback would continue around them", warnings.len());
    }
    Ok(())
}

async fn play_demo(seconds: u64) -> Result<()> {
    let transport: Arc<dyn Transport> = Arc::new(WallClockTransport::new());
    let mut player = Player::new(VoicePool::logging(), transport);

    let song = SongDefinition::demo()?;
    println!("Playing {:?} for {}s (instructions logged at debug level)...", song.name, seconds);
    player.play(&song);

    tokio::time::sleep(Duration::from_secs(seconds)).await;

    player.stop();
    println!("Stopped after {} cycle(s)", player.cycles());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("SONGLOOP - Declarative song playback engine");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--validate" => {
            if args.len() < 3 {
                eprintln!("Error: --validate requires a file path");
                std::process::exit(1);
            }
            validate_song(&args[2])?;
        }
        "--demo" => {
            let seconds: u64 = if args.len() >= 3 {
                args[2].parse().unwrap_or(10)
            } else {
                10
            };
            play_demo(seconds).await?;
        }
        "--write-demo" => {
            if args.len() < 3 {
                eprintln!("Error: --write-demo requires a file path");
                std::process::exit(1);
            }
            SongDefinition::demo()?.save(&args[2])?;
            println!("Wrote demo song to {}", args[2]);
        }
        "--list-voices" => {
            println!("Voice roles:");
            for role in VoiceRole::ALL {
                println!("  {}", role.name());
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
