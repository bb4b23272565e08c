//! Prize Site Core - Session Replay Driver
//!
//! Feeds a recorded interaction script (JSONL of navigate/scroll/click/
//! unload actions) through the full analytics pipeline and writes the
//! resulting events to a local JSONL log. Lets the tracking stack be
//! exercised end to end without a browser in front of it.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use fischer_prize_core::constants;
use fischer_prize_core::logic::analytics::{
    ClickTarget, Emitter, JsonlSink, NavigationMethod, ReportingSink, ScrollPosition,
};
use fischer_prize_core::logic::config::{AnalyticsConfig, DeviceContext};
use fischer_prize_core::logic::content::ViewState;
use fischer_prize_core::logic::shell::AppShell;

/// One recorded user action
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ReplayAction {
    Navigate {
        view: ViewState,
        method: NavigationMethod,
    },
    Scroll {
        #[serde(flatten)]
        position: ScrollPosition,
    },
    Click {
        #[serde(flatten)]
        target: ClickTarget,
    },
    Unload,
}

fn build_emitter() -> Emitter {
    let config = AnalyticsConfig::from_env();
    let user_agent = constants::get_optional(constants::ENV_USER_AGENT)
        .unwrap_or_else(|| format!("{}/{}", constants::APP_NAME, constants::APP_VERSION));
    let device = DeviceContext::new(user_agent, false);

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fischer-prize")
        .join("analytics_logs");

    let sink: Option<Arc<dyn ReportingSink>> = match JsonlSink::new(log_dir) {
        Ok(sink) => Some(Arc::new(sink)),
        Err(e) => {
            log::warn!("Analytics log unavailable: {} - events will be dropped", e);
            None
        }
    };

    Emitter::new(config, device, sink)
}

fn replay(shell: &mut AppShell, script_path: &str) -> std::io::Result<usize> {
    let content = std::fs::read_to_string(script_path)?;
    let mut applied = 0;

    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let action: ReplayAction = match serde_json::from_str(line) {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Skipping line {}: {}", lineno + 1, e);
                continue;
            }
        };

        match action {
            ReplayAction::Navigate { view, method } => shell.navigate(view, method),
            ReplayAction::Scroll { position } => shell.on_scroll(position),
            ReplayAction::Click { target } => shell.on_click(&target, Utc::now()),
            ReplayAction::Unload => {
                shell.on_unload(Utc::now());
                applied += 1;
                break;
            }
        }
        applied += 1;
    }

    Ok(applied)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} core v{}", constants::APP_NAME, constants::APP_VERSION);

    let mut shell = AppShell::new(build_emitter());
    shell.start();

    match std::env::args().nth(1) {
        Some(script_path) => match replay(&mut shell, &script_path) {
            Ok(applied) => log::info!("Replayed {} actions from {}", applied, script_path),
            Err(e) => log::error!("Failed to read script {}: {}", script_path, e),
        },
        None => log::info!("No interaction script given - started and shutting down"),
    }

    shell.teardown();
}
