use anyhow::{bail, Result};
use clap::{arg, command};
use scrollwm::utils::file_handler::{get_default_path, load_config_file};
use std::path::PathBuf;

fn main() -> Result<()> {
    let matches = command!("scrollwm Check")
        .about("Checks the configuration file")
        .help_template(scrollwm::utils::get_help_template())
        .args(&[
            arg!(-v --verbose "Outputs the loaded configuration."),
            arg!([INPUT] "Sets the input file to use. Uses the default location otherwise."),
        ])
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let path = matches.get_one::<String>("INPUT").map(PathBuf::from);

    println!(
        "\x1b[0;94m::\x1b[0m scrollwm version: {}",
        env!("CARGO_PKG_VERSION")
    );
    let shown = match &path {
        Some(path) => path.clone(),
        None => get_default_path()?,
    };
    println!(
        "\x1b[0;94m::\x1b[0m Loading configuration from {} . . .",
        shown.display()
    );
    let config = match load_config_file(path) {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            config
        }
        Err(err) => {
            println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m {err} \x1b[0m");
            bail!("Configuration failed");
        }
    };
    if verbose {
        dbg!(&config);
    }

    println!("\x1b[0;94m::\x1b[0m Checking values . . .");
    if !config.check_all(verbose) {
        bail!("Configuration has problems, see above");
    }
    println!("\x1b[0;92m    -> Everything looks fine \x1b[0m");
    Ok(())
}
