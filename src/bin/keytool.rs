//! shardkey inspection tool
//!
//! Decodes serialized keys without knowing their component types and converts
//! between the raw and external string forms.

use clap::{Parser, Subcommand};
use shardkey::ghost::{reconstruct_with, GhostKey};
use shardkey::transport::{serialize_from_external_string, serialize_to_external_string};
use shardkey::{legacy, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// shardkey key inspector
#[derive(Parser, Debug)]
#[command(name = "shardkey")]
#[command(about = "Inspect and convert serialized shard keys")]
#[command(version)]
struct Args {
    /// Accept legacy origin-prefixed keys from this origin letter
    #[arg(long, global = true)]
    legacy_origin: Option<char>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconstruct a key from hex, an external string, or UTF8 text
    Inspect {
        input: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert raw hex bytes to the external string form
    ToExternal { hex: String },

    /// Convert an external string to raw hex bytes
    FromExternal { string: String },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,shardkey=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = match build_config(args.legacy_origin) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let outcome = match args.command {
        Commands::Inspect { input, json } => inspect(&input, json, &config),
        Commands::ToExternal { hex } => {
            parse_hex(&hex).map(|bytes| println!("{}", serialize_to_external_string(&bytes)))
        }
        Commands::FromExternal { string } => serialize_from_external_string(&string)
            .map(|bytes| println!("{}", to_hex(&bytes)))
            .map_err(|e| e.to_string()),
    };

    if let Err(e) = outcome {
        fail(&e);
    }
}

fn fail(message: &str) -> ! {
    tracing::error!("{}", message);
    eprintln!("error: {}", message);
    std::process::exit(1);
}

fn build_config(legacy_origin: Option<char>) -> Result<Config, String> {
    let mut builder = Config::builder();
    if let Some(origin) = legacy_origin {
        if !origin.is_ascii() || !legacy::is_valid_origin(origin as u8) {
            return Err(format!("legacy origin must be an ASCII letter, got '{}'", origin));
        }
        builder = builder.legacy_origin(origin as u8);
    }
    Ok(builder.build())
}

// =============================================================================
// Inspect
// =============================================================================

fn inspect(input: &str, json: bool, config: &Config) -> Result<(), String> {
    let candidates = decode_candidates(input);

    for (source, bytes) in &candidates {
        if let Some(ghost) = reconstruct_with(bytes, config) {
            tracing::info!(source, len = bytes.len(), "decoded key");
            return print_ghost(&ghost, json);
        }
    }

    for (source, bytes) in &candidates {
        let mut buf = bytes.as_slice();
        if let Ok(Some((origin, shard_id))) = legacy::read_header(&mut buf, config) {
            tracing::info!(source, "legacy key has no metadata; components left undecoded");
            println!(
                "legacy key (origin '{}'): shard {}, {} component bytes",
                origin as char,
                shard_id,
                buf.len()
            );
            return Ok(());
        }
    }

    Err(format!("'{}' is not a recognizable key", input))
}

/// Every reading of the input, most specific first
fn decode_candidates(input: &str) -> Vec<(&'static str, Vec<u8>)> {
    let mut candidates = Vec::new();
    if let Ok(bytes) = parse_hex(input) {
        candidates.push(("hex", bytes));
    }
    if let Ok(bytes) = serialize_from_external_string(input) {
        candidates.push(("external", bytes));
    }
    candidates.push(("utf8", input.as_bytes().to_vec()));
    candidates
}

fn print_ghost(ghost: &GhostKey, json: bool) -> Result<(), String> {
    if json {
        let text = serde_json::to_string_pretty(ghost).map_err(|e| e.to_string())?;
        println!("{}", text);
    } else {
        println!("{}", ghost);
        for (i, component) in ghost.components.iter().enumerate() {
            println!("  [{}] {:<10} {}", i + 1, component.data_type, component.value);
        }
    }
    Ok(())
}

// =============================================================================
// Hex
// =============================================================================

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: String = text
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.is_ascii() || digits.len() % 2 != 0 {
        return Err(format!("hex input must have an even number of digits: '{}'", text));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex digits '{}'", &digits[i..i + 2]))
        })
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
