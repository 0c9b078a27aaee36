use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use waypoints::{EditorConfig, EditorState, RightClickPolicy};

mod driver;
mod error;
mod script;

use driver::{JsonLinesSink, replay_realtime, replay_virtual};
use error::ReplayError;
use script::{ScriptError, parse_script};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replays scripted map events through the waypoint editor and prints a JSON snapshot per change"
)]
struct Args {
    /// JSON-lines event script. Reads stdin when omitted.
    script: Option<PathBuf>,

    /// Jump between timestamps instead of sleeping in real time.
    #[arg(long)]
    instant: bool,

    /// Notification lifetime in milliseconds (overrides WAYPOINT_NOTIFICATION_MS).
    #[arg(long)]
    notification_ms: Option<u64>,

    /// `toggle` or `force-open` (overrides WAYPOINT_RIGHT_CLICK).
    #[arg(long)]
    right_click: Option<RightClickPolicy>,

    /// `true` to only offer the delete affordance in dragging mode
    /// (overrides WAYPOINT_DELETE_REQUIRES_DRAGGING).
    #[arg(long, action = ArgAction::Set)]
    delete_requires_dragging: Option<bool>,
}

impl Args {
    fn config(&self) -> Result<EditorConfig, ReplayError> {
        Ok(self.apply(EditorConfig::from_env()?))
    }

    /// Layers the command-line overrides on top of `config`.
    fn apply(&self, mut config: EditorConfig) -> EditorConfig {
        if let Some(ms) = self.notification_ms {
            config.notification_ttl = Duration::from_millis(ms);
        }
        if let Some(policy) = self.right_click {
            config.right_click = policy;
        }
        if let Some(required) = self.delete_requires_dragging {
            config.delete_requires_dragging = required;
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Snapshots go to stdout; keep logs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ReplayError> {
    let config = args.config()?;
    info!(
        ttl_ms = config.notification_ttl.as_millis() as u64,
        right_click = %config.right_click,
        delete_requires_dragging = config.delete_requires_dragging,
        "editor configured"
    );

    let steps = match &args.script {
        Some(path) => {
            let file = File::open(path).map_err(ScriptError::Io)?;
            parse_script(BufReader::new(file))?
        }
        None => parse_script(io::stdin().lock())?,
    };
    info!(steps = steps.len(), instant = args.instant, "script loaded");

    let mut state = EditorState::new(config);
    let mut sink = JsonLinesSink::new(io::stdout().lock());
    if args.instant {
        replay_virtual(&mut state, &steps, &mut sink)?;
    } else {
        replay_realtime(&mut state, &steps, &mut sink).await?;
    }
    Ok(())
}
