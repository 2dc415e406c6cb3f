//! SupSer - Supplementary Services dialer
//!
//! Command-line entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use supser::app::App;
use supser::commands::{
    open_preferences, ComposeCommand, DevicesCommand, DeviceTarget, DialCommand, NumberSource,
    ServicesCommand,
};
use supser::core::{AppConfig, APP_NAME, VERSION};
use supser::dialer::{PromptChoice, SettingsPrompt};
use supser::mmi::{Operation, SupplementaryService};
use supser::shell;
use supser::terminal::{FixedPrompt, TerminalPrompt};

#[derive(Parser, Debug)]
#[command(name = "supser", version, about = "Compose and dial GSM supplementary-service codes")]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Branding variant to run as
    #[arg(long, global = true)]
    variant: Option<String>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct NumberArgs {
    /// Forwarding number
    #[arg(long, short = 'n', conflicts_with = "preset")]
    number: Option<String>,

    /// Preset label from the configuration, e.g. "Landline 1"
    #[arg(long, short = 'p')]
    preset: Option<String>,
}

impl From<NumberArgs> for NumberSource {
    fn from(args: NumberArgs) -> Self {
        Self {
            number: args.number,
            preset: args.preset,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct TargetArgs {
    /// Device serial (default: configured or first online device)
    #[arg(long, short = 's')]
    serial: Option<String>,

    /// Log intents instead of talking to a device
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run: behave as if the call permission were missing
    #[arg(long, requires = "dry_run")]
    deny: bool,

    /// Answer the settings prompt without asking
    #[arg(long, value_parser = ["settings", "cancel"])]
    answer: Option<String>,
}

impl TargetArgs {
    fn prompt(&self) -> Arc<dyn SettingsPrompt> {
        match self.answer.as_deref() {
            Some("settings") => Arc::new(FixedPrompt(PromptChoice::Settings)),
            Some(_) => Arc::new(FixedPrompt(PromptChoice::Cancel)),
            None => Arc::new(TerminalPrompt),
        }
    }

    fn target(&self) -> DeviceTarget {
        DeviceTarget {
            serial: self.serial.clone(),
            dry_run: self.dry_run,
            deny: self.deny,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List services and operation templates
    Services,
    /// Print the code for a service/operation without dialing
    Compose {
        service: SupplementaryService,
        operation: Operation,
        #[command(flatten)]
        number: NumberArgs,
    },
    /// Compose and dial a code on the device
    Dial {
        service: SupplementaryService,
        operation: Operation,
        #[command(flatten)]
        number: NumberArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// List adb devices
    Devices {
        /// adb executable to use
        #[arg(long)]
        adb: Option<PathBuf>,
    },
    /// Interactive screen
    Shell {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    debug!("{} v{} starting...", APP_NAME, VERSION);

    let mut config = load_config(cli.config.as_deref()).await?;
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    config.validate()?;
    info!("Running as {}", config.branding()?.package_name);

    match cli.command {
        Command::Services => ServicesCommand.execute()?,
        Command::Compose {
            service,
            operation,
            number,
        } => {
            ComposeCommand {
                service,
                operation,
                number: number.into(),
            }
            .execute(&config)?;
        }
        Command::Dial {
            service,
            operation,
            number,
            target,
        } => {
            DialCommand {
                service,
                operation,
                number: number.into(),
                target: target.target(),
            }
            .execute(&config, target.prompt())
            .await?;
        }
        Command::Devices { adb } => DevicesCommand { adb_path: adb }.execute(&config).await?,
        Command::Shell { target } => {
            let dialer = target.target().connect(&config, target.prompt()).await?;
            let app = App::new(&config, dialer)?;
            let mut prefs = open_preferences(&config).await?;
            shell::run(app, prefs.as_mut()).await?;
        }
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load configuration from `path` or the default location
async fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path).await,
        None => AppConfig::load().await,
    };
    config.map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_error_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supser.toml");
        tokio::fs::write(&path, "variant = [").await.unwrap();

        let err = load_config(Some(&path)).await.unwrap_err();
        assert!(err.chain().count() > 1);
        assert!(err.downcast_ref::<supser_core::SupserError>().is_some());
    }
}
