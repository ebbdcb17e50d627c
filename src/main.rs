use b2bua_console::app::{UPDATE_ROUTE_PATH, UPDATE_SYSCONFIG_PATH};
use b2bua_console::presenter::TerminalPresenter;
use b2bua_console::{Console, load_form, resolve_config};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "b2bua_console", about = "Headless client for the B2BUA administration console")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show connected/total call counters, refreshing until interrupted.
    Status {
        #[arg(long)]
        once: bool,
    },
    /// Disconnect an active call.
    Disconnect { callid: String },
    /// Start recording an active call.
    Record { callid: String },
    /// Print the change set produced by applying edits to a captured form.
    Diff {
        #[arg(long)]
        form: PathBuf,
        /// NAME=VALUE edits; checkboxes take true/false.
        edits: Vec<String>,
    },
    /// Apply edits to a captured form and save the changed fields.
    Save {
        #[arg(long)]
        form: PathBuf,
        #[arg(long, default_value = UPDATE_SYSCONFIG_PATH)]
        endpoint: String,
        /// Save to the routing endpoint instead.
        #[arg(long, conflicts_with = "endpoint")]
        routing: bool,
        edits: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config()?;
    let console = Console::new(config, Arc::new(TerminalPresenter))?;

    let success = match cli.command {
        Command::Status { once: true } => console.refresh_status().await.is_some(),
        Command::Status { once: false } => {
            info!(base_url = %console.config().base_url, "polling call status");
            let poller = console.start_status_poller();
            tokio::signal::ctrl_c().await?;
            poller.dispose();
            true
        }
        Command::Disconnect { callid } => console.disconnect(&callid).await.is_success(),
        Command::Record { callid } => console.start_recording(&callid).await.is_success(),
        Command::Diff { form, edits } => {
            let mut form = load_form(&form).await?;
            for edit in &edits {
                form.apply_edit(edit)?;
            }
            println!("{}", serde_json::to_string_pretty(&form.changes())?);
            true
        }
        Command::Save {
            form,
            endpoint,
            routing,
            edits,
        } => {
            let endpoint = if routing { UPDATE_ROUTE_PATH } else { endpoint.as_str() };
            let mut session = console.edit_session(load_form(&form).await?, endpoint);
            for edit in &edits {
                session.apply_edit(edit)?;
            }
            session.submit().await.is_success()
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
