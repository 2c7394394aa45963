// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vmc-srm - SRM node provisioning CLI

mod commands;
mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{CreateArgs, DeleteArgs, ImportArgs, ReadArgs};
use output::OutputFormat;
use std::path::PathBuf;
use std::sync::Arc;
use vmc_adapters::{HttpDraasClient, TracedDraasClient};
use vmc_core::KeyedMutex;
use vmc_engine::SrmNodeResource;

#[derive(Parser)]
#[command(
    name = "vmc-srm",
    version,
    about = "Manage Site Recovery Manager nodes on VMware Cloud SDDCs"
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/vmc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Organization ID (overrides config and VMC_ORG_ID)
    #[arg(long, global = true)]
    org_id: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision an SRM node on an SDDC
    Create(CreateArgs),
    /// Show the state of an SRM node
    Read(ReadArgs),
    /// Delete an SRM node
    Delete(DeleteArgs),
    /// Adopt an existing SRM node from `<node-id>,<sddc-id>`
    Import(ImportArgs),
}

impl Commands {
    /// Checks that need neither configuration nor network
    fn validate(&self) -> Result<()> {
        match self {
            Commands::Create(args) => args.validate(),
            Commands::Import(args) => args.validate(),
            Commands::Read(_) | Commands::Delete(_) => Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cli.command.validate()?;

    let config = config::load(cli.config.as_deref(), cli.org_id)?;
    let _log_guard = logging::setup(config.log_file.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    let org_id = config.org_id()?.to_string();
    let client = TracedDraasClient::new(
        HttpDraasClient::from_config(&config).context("cannot build DRaaS client")?,
    );
    let resource = SrmNodeResource::new(
        client,
        Arc::new(KeyedMutex::new()),
        org_id,
        config.timeouts.clone(),
    );

    // Dropping the operation on Ctrl-C releases any lock it holds
    tokio::select! {
        result = commands::run(&resource, cli.command, cli.output) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted");
            anyhow::bail!("interrupted; the remote task may still be running")
        }
    }
}
