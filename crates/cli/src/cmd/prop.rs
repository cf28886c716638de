// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property command handlers

use anyhow::Result;
use clap::{Args, Subcommand};
use zfsh::Zfs;

use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct PropArgs {
    #[command(subcommand)]
    pub command: PropCommand,
}

#[derive(Subcommand)]
pub enum PropCommand {
    /// Print the parsable value of a property
    Get {
        /// Dataset name
        name: String,
        /// Property name, e.g. `compressratio`
        key: String,
    },
    /// Set one or more properties
    Set {
        /// Dataset name
        name: String,
        /// Assignments (can be repeated: key=value)
        #[arg(required = true, value_parser = parse_key_value)]
        assignments: Vec<(String, String)>,
    },
}

/// Split `key=value` at the first `=`.
pub(crate) fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid input format '{}': must be key=value", s))?;
    if key.is_empty() {
        return Err(format!("invalid input format '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn handle(zfs: &Zfs, command: PropCommand, format: OutputFormat) -> Result<()> {
    match command {
        PropCommand::Get { name, key } => {
            let dataset = zfs.get_dataset(&name).await.map_err(ExitError::from)?;
            let value = zfs
                .get_property(&dataset, &key)
                .await
                .map_err(ExitError::from)?;
            let obj = serde_json::json!({
                "name": dataset.name,
                "property": key,
                "value": value,
            });
            format_or_json(format, &obj, || println!("{value}"))
        }
        PropCommand::Set { name, assignments } => {
            let dataset = zfs.get_dataset(&name).await.map_err(ExitError::from)?;
            for (key, value) in &assignments {
                zfs.set_property(&dataset, key, value)
                    .await
                    .map_err(ExitError::from)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "prop_tests.rs"]
mod tests;
