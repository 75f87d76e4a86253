//! Main entry point for the biggy CLI

// Internal modules
mod cli;
mod commands;
mod logging;

// Internal imports (std, crate)
use crate::cli::Args;
use biggy_clients::{Clients, IoContext};
use biggy_config::{ApplicationConfig, ConfigurationLoader, EnvironmentSource, TomlFileSource};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    biggy_common::initialize_environment();

    let args = Args::parse();
    let config = load_config(&args)?;

    // Keep the guards alive until the command output has been written
    let _log_guards = logging::init(&config.telemetry, args.log_dir.as_deref())?;

    let context = IoContext::from_config(&config)
        .context("An account is required: pass --account or set BIGGY_ACCOUNT")?;
    tracing::debug!(
        account = context.account(),
        workspace = context.workspace(),
        operation_id = %context.operation_id(),
        "Context created"
    );

    let clients = Clients::new(context);
    let output = commands::run(args.command, &clients).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Environment, then the config file when given, then command line flags
fn load_config(args: &Args) -> anyhow::Result<ApplicationConfig> {
    let mut loader = ConfigurationLoader::new().add_source(Box::new(EnvironmentSource));
    if let Some(config_path) = &args.config_file {
        loader = loader
            .add_source(Box::new(TomlFileSource::new(config_path)))
            .strict();
    }

    let mut config = loader
        .load()
        .with_context(|| match &args.config_file {
            Some(path) => format!("Failed to load configuration from '{path}'"),
            None => "Invalid configuration".to_string(),
        })?;

    if let Some(account) = &args.account {
        config.store.account.clone_from(account);
    }
    if let Some(workspace) = &args.workspace {
        config.store.workspace.clone_from(workspace);
    }
    if let Some(token) = &args.auth_token {
        config.store.auth_token = Some(token.clone());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[store]
account = "fromfile"
workspace = "beta"
"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let args = Args::try_parse_from([
            "biggy",
            "--config-file",
            path.as_str(),
            "--account",
            "fromflag",
            "top-searches",
        ])
        .unwrap();

        let config = load_config(&args).unwrap();
        assert_eq!(config.store.account, "fromflag");
        assert_eq!(config.store.workspace, "beta");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::try_parse_from([
            "biggy",
            "--config-file",
            "/nonexistent/biggy.toml",
            "top-searches",
        ])
        .unwrap();

        assert!(load_config(&args).is_err());
    }
}
