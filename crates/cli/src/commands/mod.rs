// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SRM node commands

use crate::output::{self, NodeStatus, NodeView, OutputFormat, StatusView};
use crate::Commands;
use anyhow::Result;
use clap::Args;
use vmc_adapters::DraasClient;
use vmc_core::{ExtensionKeySuffix, ImportId};
use vmc_engine::SrmNodeResource;

#[derive(Args)]
pub struct CreateArgs {
    /// SDDC identifier
    #[arg(long)]
    pub sddc_id: String,
    /// Extension key suffix, appended to com.vmware.vcDr- (1-13 of [A-Za-z0-9.-])
    #[arg(long)]
    pub suffix: String,
}

impl CreateArgs {
    pub fn validate(&self) -> Result<()> {
        ExtensionKeySuffix::parse(&self.suffix)?;
        Ok(())
    }
}

#[derive(Args)]
pub struct ReadArgs {
    /// SDDC identifier
    #[arg(long)]
    pub sddc_id: String,
    /// SRM node identifier
    #[arg(long)]
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// SDDC identifier
    #[arg(long)]
    pub sddc_id: String,
    /// SRM node identifier
    #[arg(long)]
    pub id: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// `<node-id>,<sddc-id>`
    pub id: String,
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        ImportId::parse(&self.id)?;
        Ok(())
    }
}

pub async fn run<C: DraasClient>(
    resource: &SrmNodeResource<C>,
    command: Commands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Create(args) => {
            let state = resource.create(&args.sddc_id, &args.suffix).await?;
            output::print(&NodeView::from(state), format)?;
        }
        Commands::Read(args) => match resource.read(&args.sddc_id, &args.id).await? {
            Some(state) => output::print(&NodeView::from(state), format)?,
            None => output::print(
                &StatusView::new(&args.id, &args.sddc_id, NodeStatus::NotFound),
                format,
            )?,
        },
        Commands::Delete(args) => {
            resource.delete(&args.sddc_id, &args.id).await?;
            output::print(
                &StatusView::new(&args.id, &args.sddc_id, NodeStatus::Deleted),
                format,
            )?;
        }
        Commands::Import(args) => {
            let state = resource.import(&args.id).await?;
            output::print(&NodeView::from(state), format)?;
        }
    }
    Ok(())
}
