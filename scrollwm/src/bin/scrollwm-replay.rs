use anyhow::{Context, Result};
use clap::{arg, command};
use scrollwm::replay::{self, ReplayHandle};
use scrollwm::utils::{file_handler, log};
use scrollwm_core::ManagerState;
use std::{fs, path::PathBuf};

fn main() -> Result<()> {
    let matches = command!("scrollwm Replay")
        .about("Plays a script of host events against the layout model")
        .help_template(scrollwm::utils::get_help_template())
        .args(&[
            arg!(-c --config <CONFIG> "Sets the configuration file to use.").required(false),
            arg!(-a --actions "Prints every action the model requested, one JSON object per line."),
            arg!(<SCRIPT> "Script with one JSON encoded event per line."),
        ])
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => file_handler::load_config_file(Some(PathBuf::from(path)))?,
        None => scrollwm::load(),
    };
    log::setup_logging(&config.log_level)?;

    let Some(script_path) = matches.get_one::<String>("SCRIPT") else {
        anyhow::bail!("No script given");
    };
    let script = fs::read_to_string(script_path)
        .with_context(|| format!("Unable to read {script_path}"))?;
    let events = replay::load_script::<ReplayHandle>(&script)?;
    tracing::info!("Replaying {} events from {}", events.len(), script_path);

    let manager = replay::run(config, events);
    if matches.get_flag("actions") {
        for action in &manager.display_server.executed {
            println!("{}", serde_json::to_string(action)?);
        }
    }
    println!("{}", ManagerState::from(&manager.state).to_json()?);
    Ok(())
}
