//! # CLI Definitions
//!
//! Command-line interface for the launchpad operator tool, using `clap`
//! derive. Every flag that names an input can also be set through a
//! `LAUNCHPAD_*` environment variable.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Operator tooling for NOVA launchpad collections.
#[derive(Parser, Debug)]
#[command(
    name = "launchpad",
    about = "NOVA launchpad: collection parameter checks, whitelist proofs, payout previews",
    version,
    propagate_version = true
)]
pub struct LaunchpadCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogFormat::Pretty,
        env = "LAUNCHPAD_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Default log level when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn", env = "LAUNCHPAD_LOG_LEVEL")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a collection parameter file and print a summary.
    Check(CheckArgs),

    /// Build or verify whitelist Merkle proofs.
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommands,
    },

    /// Preview how a withdraw would split a contract balance.
    Split(SplitArgs),

    /// Print version information.
    Version,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Collection parameters (JSON, amounts in smallest units).
    #[arg(long, env = "LAUNCHPAD_PARAMS")]
    pub params: PathBuf,

    /// Deployer address. When given, the collection is deployed in memory
    /// and its derived address is printed as well.
    #[arg(long, env = "LAUNCHPAD_DEPLOYER")]
    pub deployer: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum WhitelistCommands {
    /// Build the tree for an address list and emit the root and every proof.
    Build(WhitelistBuildArgs),

    /// Check a proof for one address against a published root.
    Verify(WhitelistVerifyArgs),
}

#[derive(Args, Debug)]
pub struct WhitelistBuildArgs {
    /// Address list: one per line (`#` comments allowed) or a JSON array.
    #[arg(long, env = "LAUNCHPAD_WHITELIST")]
    pub addresses: PathBuf,

    /// Write the manifest here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct WhitelistVerifyArgs {
    /// Published Merkle root (32-byte hex).
    #[arg(long, env = "LAUNCHPAD_WHITELIST_ROOT")]
    pub root: String,

    /// Address to check.
    #[arg(long)]
    pub address: String,

    /// Sibling hashes, leaf to root, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub proof: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Collection parameters (JSON, amounts in smallest units).
    #[arg(long, env = "LAUNCHPAD_PARAMS")]
    pub params: PathBuf,

    /// Contract balance in CRO, e.g. `1250.5`.
    #[arg(long)]
    pub balance: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        LaunchpadCli::command().debug_assert();
    }

    #[test]
    fn parses_whitelist_verify_with_proof_list() {
        let cli = LaunchpadCli::try_parse_from([
            "launchpad",
            "whitelist",
            "verify",
            "--root",
            "0xab",
            "--address",
            "0x01",
            "--proof",
            "0xaa,0xbb",
        ])
        .unwrap();

        match cli.command {
            Commands::Whitelist {
                command: WhitelistCommands::Verify(args),
            } => {
                assert_eq!(args.proof, vec!["0xaa", "0xbb"]);
                assert_eq!(args.root, "0xab");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verify_without_proof_is_an_empty_list() {
        let cli = LaunchpadCli::try_parse_from([
            "launchpad",
            "whitelist",
            "verify",
            "--root",
            "0xab",
            "--address",
            "0x01",
        ])
        .unwrap();
        match cli.command {
            Commands::Whitelist {
                command: WhitelistCommands::Verify(args),
            } => assert!(args.proof.is_empty()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn log_format_is_global() {
        let cli = LaunchpadCli::try_parse_from([
            "launchpad",
            "split",
            "--params",
            "p.json",
            "--balance",
            "50",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Split(_)));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result =
            LaunchpadCli::try_parse_from(["launchpad", "--log-format", "xml", "version"]);
        assert!(result.is_err());
    }
}
