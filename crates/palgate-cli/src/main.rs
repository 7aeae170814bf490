//! Command-line interface for PalGate temporal tokens.

#![forbid(unsafe_code)]

mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use palgate_cipher::{transform_slices, Direction};
use palgate_token::{Token, TokenGenerator, TokenType};
use tracing_subscriber::EnvFilter;

use crate::config::Overrides;

/// PalGate token CLI.
#[derive(Parser)]
#[command(
    name = "palgate",
    version,
    about = "Derive and inspect PalGate temporal tokens"
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a temporal token from stored or supplied credentials.
    Token {
        #[command(flatten)]
        creds: CredentialArgs,
        /// Seconds since the Unix epoch (defaults to now).
        #[arg(long)]
        timestamp: Option<u32>,
        /// Print `{"token": ...}` instead of the bare token.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Decode a token into its fields.
    Inspect {
        /// Token as 46 hex characters.
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Run one raw block transform.
    Cipher {
        /// Which block procedure to run.
        #[arg(long, value_enum)]
        direction: DirectionArg,
        /// Key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key: String,
        /// Block as 32 hex characters.
        #[arg(value_name = "BLOCK_HEX")]
        block: String,
    },
}

#[derive(Args)]
struct CredentialArgs {
    /// Session secret as 32 hex characters.
    #[arg(long, env = "PALGATE_SECRET", value_name = "HEX", hide_env_values = true)]
    secret: Option<String>,
    /// Phone number the session belongs to.
    #[arg(long, env = "PALGATE_PHONE")]
    phone: Option<u64>,
    /// Token type: sms, primary, secondary (or 0, 1, 2).
    #[arg(long, env = "PALGATE_TOKEN_TYPE")]
    token_type: Option<TokenType>,
    /// Credentials file (defaults to ~/.palgate-cli.json).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Reverse,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Forward => Direction::Forward,
            DirectionArg::Reverse => Direction::Reverse,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let stdout = io::stdout();
    run(cli.command, &mut stdout.lock())
}

fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Token {
            creds,
            timestamp,
            json,
        } => cmd_token(creds, timestamp, json, out),
        Commands::Inspect { token } => cmd_inspect(&token, out),
        Commands::Cipher {
            direction,
            key,
            block,
        } => cmd_cipher(direction.into(), &key, &block, out),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "palgate=debug" } else { "palgate=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with_writer(io::stderr)
        .init();
}

fn cmd_token(
    args: CredentialArgs,
    timestamp: Option<u32>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let file = match &args.config {
        Some(path) => config::load_file(path, true)?,
        None => match config::default_path() {
            Some(path) => config::load_file(&path, false)?,
            None => config::CredentialsFile::default(),
        },
    };
    let overrides = Overrides {
        secret_hex: args.secret,
        phone_number: args.phone,
        token_type: args.token_type,
    };
    let creds = config::resolve(overrides, file)?;
    let generator = TokenGenerator::new();
    let token = match timestamp {
        Some(ts) => generator.derive(&creds.secret, creds.phone_number, creds.token_type, ts),
        None => generator.derive_now(&creds.secret, creds.phone_number, creds.token_type),
    };
    tracing::debug!(
        token_type = %creds.token_type,
        ?timestamp,
        token = %token,
        "generated temporal token"
    );

    if json {
        let body = serde_json::json!({ "token": token.to_hex() });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    } else {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

fn cmd_inspect(token_hex: &str, out: &mut impl Write) -> Result<()> {
    let token = Token::from_hex(token_hex).context("decode token")?;
    let token_type = token.token_type();
    writeln!(out, "type: {} (marker 0x{:02x})", token_type, token_type.marker())?;
    writeln!(out, "phone: {}", token.phone_number())?;
    writeln!(out, "cipher: {}", hex::encode_upper(token.cipher_output()))?;
    Ok(())
}

fn cmd_cipher(
    direction: Direction,
    key_hex: &str,
    block_hex: &str,
    out: &mut impl Write,
) -> Result<()> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    let block = hex::decode(block_hex.trim()).context("decode block hex")?;
    let block = transform_slices(&block, &key, direction)?;
    tracing::debug!(?direction, "block transformed");
    writeln!(out, "{}", hex::encode(block))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FIXTURE: &str = "110000075BCD1503AB5A42CBD8FC3CA5B6BC037F6FC105";
    const ZERO_SECRET: &str = "00000000000000000000000000000000";
    const NIST_KEY: &str = "000102030405060708090a0b0c0d0e0f";

    fn run_line(line: &str) -> Result<String> {
        let args = std::iter::once("palgate").chain(line.split_whitespace());
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn empty_config(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("creds.json");
        fs::write(&path, "{}").unwrap();
        path.display().to_string()
    }

    #[test]
    fn token_from_flags() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_line(&format!(
            "token --secret {ZERO_SECRET} --phone 123456789 --token-type primary \
             --timestamp 1700000000 --config {}",
            empty_config(&dir)
        ))
        .unwrap();
        assert_eq!(out.trim(), FIXTURE);
    }

    #[test]
    fn token_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_line(&format!(
            "token --secret {ZERO_SECRET} --phone 123456789 --token-type 1 \
             --timestamp 1700000000 --json --config {}",
            empty_config(&dir)
        ))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["token"], FIXTURE);
    }

    #[test]
    fn token_from_environment_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, r#"{"phoneNumber": "123456789", "tokenType": 2}"#).unwrap();
        std::env::set_var("PALGATE_SECRET", ZERO_SECRET);
        std::env::set_var("PALGATE_TOKEN_TYPE", "primary");
        let result = run_line(&format!(
            "token --timestamp 1700000000 --config {}",
            path.display()
        ));
        std::env::remove_var("PALGATE_SECRET");
        std::env::remove_var("PALGATE_TOKEN_TYPE");
        assert_eq!(result.unwrap().trim(), FIXTURE);
    }

    #[test]
    fn token_without_timestamp_uses_clock() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_line(&format!(
            "token --secret {ZERO_SECRET} --phone 123456789 --token-type sms --config {}",
            empty_config(&dir)
        ))
        .unwrap();
        let token = Token::from_hex(out.trim()).unwrap();
        assert_eq!(token.token_type(), TokenType::Sms);
        assert_eq!(token.phone_number(), 123_456_789);
    }

    #[test]
    fn unknown_token_type_flag_is_rejected() {
        assert!(run_line("token --token-type tertiary").is_err());
    }

    #[test]
    fn inspect_decodes_fields() {
        let out = run_line(&format!("inspect {FIXTURE}")).unwrap();
        assert_eq!(
            out,
            "type: primary (marker 0x11)\n\
             phone: 123456789\n\
             cipher: 03AB5A42CBD8FC3CA5B6BC037F6FC105\n"
        );
    }

    #[test]
    fn cipher_runs_both_directions() {
        let out = run_line(&format!(
            "cipher --direction reverse --key {NIST_KEY} 00112233445566778899aabbccddeeff"
        ))
        .unwrap();
        assert_eq!(out.trim(), "69c4e0d86a7b0430d8cdb78070b4c55a");
        let out = run_line(&format!(
            "cipher --direction forward --key {NIST_KEY} 69c4e0d86a7b0430d8cdb78070b4c55a"
        ))
        .unwrap();
        assert_eq!(out.trim(), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn cipher_rejects_short_block() {
        let err =
            run_line(&format!("cipher --direction forward --key {NIST_KEY} 0011")).unwrap_err();
        assert!(err.to_string().contains("block must be 16 bytes, got 2"));
    }
}
