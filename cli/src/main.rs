// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NOVA Launchpad CLI
//!
//! Operator tooling around a launchpad collection: validate deployment
//! parameters before going on-chain, build the whitelist Merkle root and the
//! per-address proofs the mint frontend needs, check a single proof, and
//! preview how a withdraw splits the contract balance.
//!
//! ```text
//! launchpad check --params collection.json
//! launchpad whitelist build --addresses presale.txt --out proofs.json
//! launchpad whitelist verify --root 0x.. --address 0x.. --proof 0x..,0x..
//! launchpad split --params collection.json --balance 1250.5
//! ```

mod cli;
mod commands;
mod logging;
mod manifest;

use anyhow::{bail, Context, Result};
use clap::Parser;
use launchpad_protocol::Address;

use cli::{Commands, LaunchpadCli, WhitelistCommands};

fn main() -> Result<()> {
    let cli = LaunchpadCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Check(args) => {
            let params = manifest::load_params(&args.params)?;
            let deployer = args
                .deployer
                .as_deref()
                .map(str::parse::<Address>)
                .transpose()
                .context("invalid deployer address")?;
            print!("{}", commands::check(params, deployer)?);
        }
        Commands::Whitelist { command } => match command {
            WhitelistCommands::Build(args) => {
                let addresses = manifest::load_addresses(&args.addresses)?;
                let manifest = commands::whitelist_build(&addresses)?;
                manifest::write_output(args.out.as_deref(), &manifest.to_json()?)?;
            }
            WhitelistCommands::Verify(args) => {
                if commands::whitelist_verify(&args.root, &args.address, &args.proof)? {
                    println!("valid: {} is whitelisted under {}", args.address, args.root);
                } else {
                    bail!("Invalid merkle proof for {} under {}", args.address, args.root);
                }
            }
        },
        Commands::Split(args) => {
            let params = manifest::load_params(&args.params)?;
            print!("{}", commands::split(params, &args.balance)?);
        }
        Commands::Version => println!("{}", commands::version()),
    }

    Ok(())
}
