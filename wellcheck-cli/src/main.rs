use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use wellcheck_appcore::service::CheckinService;
use wellcheck_core::config::AppConfig;
use wellcheck_core::context::UserSession;
use wellcheck_core::mood::Mood;
use wellcheck_core::sentiment::AnalysisResult;
use wellcheck_core::templates::{recommends_breathing, tips_for};
use wellcheck_core::types::{CheckinMode, format_duration};
use wellcheck_engine::controller::{CheckinController, SaveOutcome, StopOutcome};
use wellcheck_platform::console::{LogEvents, SimulatedMicrophone};
use wellcheck_runtime::credentials::RuntimeCredentials;

const USAGE: &str = "usage: wellcheck-cli <command> [--breathe <cycles>]

commands:
  text <message>     classify a written check-in
  mood <mood>        check in with a mood (happy, calm, tired, anxious, stressed, sad)
  voice [seconds]    simulated voice check-in (default 3 s)
  set-key <key>      store the Gemini API key in the OS keyring
  clear-key          remove the stored key

env: GEMINI_API_KEY, WELLCHECK_CONFIG, WELLCHECK_BASE_URL, WELLCHECK_MODEL, WELLCHECK_USER";

enum Command {
    Text(String),
    Mood(Mood),
    Voice(u64),
    SetKey(String),
    ClearKey,
}

struct Args {
    command: Command,
    breathe_cycles: u32,
}

fn parse_args(raw: Vec<String>) -> anyhow::Result<Args> {
    let mut breathe_cycles = 0;
    let mut positional = vec![];
    let mut it = raw.into_iter();
    while let Some(arg) = it.next() {
        if arg == "--breathe" {
            let v = it.next().context("--breathe needs a cycle count")?;
            breathe_cycles = v.parse().with_context(|| format!("bad cycle count: {v}"))?;
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("text") => {
            let rest: Vec<String> = positional.collect();
            if rest.is_empty() {
                bail!("text needs a message\n\n{USAGE}");
            }
            Command::Text(rest.join(" "))
        }
        Some("mood") => {
            let name = positional.next().context("mood needs a name")?;
            Command::Mood(name.parse()?)
        }
        Some("voice") => {
            let secs = match positional.next() {
                Some(v) => v.parse().with_context(|| format!("bad duration: {v}"))?,
                None => 3,
            };
            Command::Voice(secs)
        }
        Some("set-key") => Command::SetKey(positional.next().context("set-key needs a key")?),
        Some("clear-key") => Command::ClearKey,
        _ => bail!("{USAGE}"),
    };

    Ok(Args {
        command,
        breathe_cycles,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1).collect())?;

    let config_path = std::env::var("WELLCHECK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("wellcheck.json"));
    let svc = CheckinService::new(
        config_path,
        Arc::new(RuntimeCredentials::default()),
        Arc::new(SimulatedMicrophone),
        Arc::new(LogEvents),
    );

    let mut cfg = svc.load_config()?;
    if let Ok(url) = std::env::var("WELLCHECK_BASE_URL") {
        log::info!("sentiment endpoint overridden: {url}");
        cfg.sentiment.base_url = url;
    }
    if let Ok(model) = std::env::var("WELLCHECK_MODEL") {
        log::info!("sentiment model overridden: {model}");
        cfg.sentiment.model = model;
    }

    let user = match std::env::var("WELLCHECK_USER") {
        Ok(id) => UserSession::new(id),
        Err(_) => UserSession::anonymous(),
    };

    match args.command {
        Command::SetKey(key) => {
            svc.set_api_key(&key)?;
            println!("API key stored.");
            Ok(())
        }
        Command::ClearKey => {
            svc.clear_api_key()?;
            println!("API key removed.");
            Ok(())
        }
        command => {
            let checkin = svc.open_checkin_with_config(&cfg, user);
            let res = run_checkin(&checkin, &cfg, command, args.breathe_cycles).await;
            checkin.close().await;
            res
        }
    }
}

async fn run_checkin(
    checkin: &CheckinController,
    cfg: &AppConfig,
    command: Command,
    breathe_cycles: u32,
) -> anyhow::Result<()> {
    let result = match command {
        Command::Text(message) => {
            checkin.change_mode(CheckinMode::Text).await?;
            checkin.set_free_text(&message).await?;
            save(checkin).await?
        }
        Command::Mood(mood) => {
            println!("{}: {}", mood.label(), mood.context_phrase());
            checkin.change_mode(CheckinMode::Text).await?;
            checkin.select_mood(mood).await?;
            save(checkin).await?
        }
        Command::Voice(secs) => {
            checkin.start_recording().await?;
            tokio::time::sleep(Duration::from_secs(secs)).await;
            println!(
                "recorded {}",
                format_duration(checkin.snapshot().await.recording_duration_ms)
            );
            match checkin.stop_recording(true).await? {
                StopOutcome::Completed(r) => r,
                other => bail!("voice check-in did not complete: {other:?}"),
            }
        }
        Command::SetKey(_) | Command::ClearKey => bail!("not a check-in command"),
    };

    log::info!("check-in finished: {:?} ({:?})", result.category, result.kind);
    print_result(&result);

    if breathe_cycles > 0 {
        breathe(checkin, cfg, breathe_cycles).await?;
    }
    Ok(())
}

async fn save(checkin: &CheckinController) -> anyhow::Result<AnalysisResult> {
    match checkin.save().await? {
        SaveOutcome::Completed(r) => Ok(r),
        SaveOutcome::EmptyInput => bail!("nothing to submit"),
        SaveOutcome::Cancelled => bail!("check-in was closed"),
    }
}

fn print_result(result: &AnalysisResult) {
    println!();
    println!("{}", result.title);
    println!("{}", result.body);
    for tip in tips_for(result.category) {
        println!("  - {}: {}", tip.title, tip.detail);
    }
    if recommends_breathing(result.category) {
        println!();
        println!("Try the breathing exercise: --breathe <cycles>");
    }
}

async fn breathe(
    checkin: &CheckinController,
    cfg: &AppConfig,
    cycles: u32,
) -> anyhow::Result<()> {
    checkin.start_exercise().await?;
    let mut frames = checkin.breathing_frames().await;
    checkin.start_breathing().await?;

    let total = cfg.breathing.cycle_duration() * cycles;
    let printer = async {
        loop {
            let frame = *frames.borrow_and_update();
            println!("{}", frame.label);
            if frames.changed().await.is_err() {
                break;
            }
        }
    };
    // The printer never finishes on its own while the timer runs.
    let _ = tokio::time::timeout(total, printer).await;

    checkin.stop_breathing().await?;
    log::info!("breathing exercise finished after {cycles} cycle(s)");
    println!("{}", checkin.breathing_phase().await.label());
    Ok(())
}
