//! ACD command line client
//!
//! Thin wrapper over [`acd_client::AcdClient`]. Connection settings come from
//! `ACD_*` environment variables or the file named by `ACD_CONFIG_FILE`;
//! `--url` and `--api-version` override both.

use std::{env, path::PathBuf};

use acd_client::{
    AcdClient, AcdConfig,
    client::{AnalyzeWithFlowOptions, DeployCartridgeOptions, DeployOutcome},
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_FLOW_ID: &str = "wh_acd.ibm_clinical_insights_v1.0_standard_flow";

#[derive(Parser, Debug)]
#[command(name = "acd", about = "Annotator for Clinical Data command line client", version)]
struct Cli {
    /// Service base URL, without the `/v1` prefix
    #[arg(long, global = true, env = "ACD_URL", value_name = "URL")]
    url: Option<String>,

    /// API version date sent with every request
    #[arg(long, global = true, env = "ACD_VERSION", value_name = "DATE")]
    api_version: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Check service health
    Health,
    /// List annotators
    Annotators,
    /// List profiles
    Profiles,
    /// List flows
    Flows,
    /// List cartridges
    Cartridges,
    /// Analyze text with a stored flow
    Analyze {
        text: String,
        #[arg(default_value = DEFAULT_FLOW_ID)]
        flow_id: String,
    },
    /// Deploy a cartridge archive
    Deploy {
        archive: PathBuf,
        /// Replace an already deployed cartridge
        #[arg(long)]
        update: bool,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut AcdConfig) {
        if let Some(url) = &self.url {
            config.service_url = url.clone();
        }
        if let Some(version) = &self.api_version {
            config.version = version.clone();
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(&log_level)),
        )
        .init();

    let mut config = AcdConfig::load().await?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    tracing::info!("ACD service: {} (version {})", config.service_url, config.version);
    let client = AcdClient::from_config(&config)?;

    match cli.command {
        Command::Health => {
            let status = client.health_check(&Default::default()).await?.into_result()?;
            print_json(&status)?;
            if !status.is_ok() {
                anyhow::bail!("service state is {}", status.service_state);
            }
        }
        Command::Annotators => {
            print_json(&client.list_annotators(&Default::default()).await?.result)?
        }
        Command::Profiles => print_json(&client.list_profiles(&Default::default()).await?.result)?,
        Command::Flows => print_json(&client.list_flows(&Default::default()).await?.result)?,
        Command::Cartridges => {
            print_json(&client.list_cartridges(&Default::default()).await?.result)?
        }
        Command::Analyze { text, flow_id } => {
            let response = client
                .analyze_with_flow(&AnalyzeWithFlowOptions::new(flow_id, text))
                .await?;
            print_json(&response.result)?;
        }
        Command::Deploy { archive, update } => {
            let options = DeployCartridgeOptions::new(archive).with_update(update);
            match client.deploy_cartridge_or_existing(&options).await? {
                DeployOutcome::Accepted(response) => {
                    tracing::info!("Cartridge upload accepted with status {}", response.status);
                    print_json(&response.result)?;
                }
                DeployOutcome::AlreadyExists { message } => {
                    tracing::warn!("Cartridge already deployed, rerun with --update to replace it");
                    println!("{}", message);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults_to_standard_flow() {
        let cli = Cli::try_parse_from(["acd", "analyze", "Patient has diabetes"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Analyze {
                text: "Patient has diabetes".to_string(),
                flow_id: DEFAULT_FLOW_ID.to_string(),
            }
        );

        let cli = Cli::try_parse_from(["acd", "analyze", "text", "my_flow"]).unwrap();
        assert!(matches!(cli.command, Command::Analyze { flow_id, .. } if flow_id == "my_flow"));
    }

    #[test]
    fn test_deploy_update_flag() {
        let cli = Cli::try_parse_from(["acd", "deploy", "cartridge.zip", "--update"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Deploy { archive: PathBuf::from("cartridge.zip"), update: true }
        );

        let cli = Cli::try_parse_from(["acd", "deploy", "cartridge.zip"]).unwrap();
        assert!(matches!(cli.command, Command::Deploy { update: false, .. }));
    }

    #[test]
    fn test_missing_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["acd"]).is_err());
        assert!(Cli::try_parse_from(["acd", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["acd", "deploy"]).is_err());
        assert!(Cli::try_parse_from(["acd", "unknown"]).is_err());
    }

    #[test]
    fn test_global_overrides_apply_to_config() {
        let cli = Cli::try_parse_from([
            "acd",
            "flows",
            "--url",
            "http://localhost:9080/api",
            "--api-version",
            "2022-03-01",
        ])
        .unwrap();
        let mut config = AcdConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.service_url, "http://localhost:9080/api");
        assert_eq!(config.version, "2022-03-01");
        assert!(config.validate().is_ok());
    }
}
