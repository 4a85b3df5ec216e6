//! SDKWork-TTS Text CLI - inspect the text frontend
//!
//! Normalize, tokenize, segment and decode text the same way the synthesis
//! pipeline does.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use sdkwork_tts_text::{FrontendConfig, NormalizerConfig, TextFrontend, TextNormalizer, VERSION};

/// SDKWork-TTS Text - text frontend for subword-level TTS
#[derive(Parser, Debug)]
#[command(name = "sdkwork-tts-text")]
#[command(author, version, about, long_about = None)]
#[command(long_about = "
Runs the TTS text frontend on the command line.

Examples:
  # Normalize only (no vocabulary needed)
  sdkwork-tts-text normalize --text \"“我爱你”的英语是“I love you”\"

  # Tokenize with the vocabulary from a frontend config
  sdkwork-tts-text tokenize --config checkpoints/frontend.yaml --text \"晕XUAN4是一种GAN3觉\"

  # Split into sentences of at most 100 tokens
  sdkwork-tts-text split --config checkpoints/frontend.yaml --max-tokens 100 --text \"...\"
")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize text
    Normalize {
        /// Text to normalize
        #[arg(short, long)]
        text: String,

        /// Spell out English numbers and abbreviations
        #[arg(long)]
        expand_english: bool,
    },

    /// Tokenize text into pieces and ids
    Tokenize {
        /// Text to tokenize
        #[arg(short, long)]
        text: String,

        /// Path to frontend config file
        #[arg(short, long, default_value = "checkpoints/frontend.yaml")]
        config: PathBuf,
    },

    /// Split text into bounded sentences
    Split {
        /// Text to split
        #[arg(short, long)]
        text: String,

        /// Path to frontend config file
        #[arg(short, long, default_value = "checkpoints/frontend.yaml")]
        config: PathBuf,

        /// Maximum text tokens per sentence (overrides the config)
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode comma-separated token ids
    Decode {
        /// Token ids, e.g. "12,7,99"
        #[arg(short, long)]
        ids: String,

        /// Path to frontend config file
        #[arg(short, long, default_value = "checkpoints/frontend.yaml")]
        config: PathBuf,

        /// Lower-case Latin words in the output
        #[arg(long)]
        lower: bool,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn load_frontend(config_path: &PathBuf, max_tokens: Option<usize>) -> Result<TextFrontend> {
    let mut config = FrontendConfig::load(config_path)
        .with_context(|| format!("Failed to load frontend config {:?}", config_path))?;
    if let Some(max_tokens) = max_tokens {
        config.max_tokens_per_sentence = max_tokens;
    }
    let frontend = TextFrontend::from_config(&config)
        .with_context(|| format!("Failed to build text frontend from {:?}", config_path))?;
    Ok(frontend)
}

fn parse_ids(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            p.trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid token id: '{}'", p))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    info!("SDKWork-TTS Text v{}", VERSION);

    match &cli.command {
        Commands::Normalize {
            text,
            expand_english,
        } => {
            let normalizer = TextNormalizer::with_config(NormalizerConfig {
                expand_english: *expand_english,
            });
            info!("Locale: {:?}", normalizer.detect_locale(text));
            println!("{}", normalizer.normalize(text)?);
        }
        Commands::Tokenize { text, config } => {
            let frontend = load_frontend(config, None)?;
            let tokenizer = frontend.tokenizer();
            let pieces = tokenizer.tokenize(text)?;
            let ids = tokenizer.encode(text)?;
            if tokenizer.contains_unknown(&ids) {
                warn!(
                    "{} token(s) map to the unknown piece",
                    tokenizer.unknown_count(&ids)
                );
            }
            println!("pieces: {:?}", pieces);
            println!("ids:    {:?}", ids);
        }
        Commands::Split {
            text,
            config,
            max_tokens,
            json,
        } => {
            let frontend = load_frontend(config, *max_tokens)?;
            let prepared = frontend.prepare(text)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&prepared)?);
            } else {
                println!("normalized: {}", prepared.normalized);
                for (i, sentence) in prepared.sentences.iter().enumerate() {
                    println!("{:>3} [{:>3} tokens] {}", i, sentence.len(), sentence.join(""));
                }
            }
            for overflow in &prepared.overflows {
                warn!(
                    "Sentence of {} tokens was hard-cut into {} chunks (limit {})",
                    overflow.run_len, overflow.chunks, overflow.max_tokens
                );
            }
        }
        Commands::Decode { ids, config, lower } => {
            let frontend = load_frontend(config, None)?;
            let ids = parse_ids(ids)?;
            println!("{}", frontend.tokenizer().decode(&ids, *lower)?);
        }
    }

    Ok(())
}
