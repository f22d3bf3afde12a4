//! `route-planner config init`

use crate::cli::ConfigInitArgs;
use crate::config::{lookup_credential, PlannerConfig};
use std::fs;
use std::io::{self, Write};

const EXAMPLE_CONFIG: &str = include_str!("../../route-planner.example.toml");

/// Write the example config to `args.output`, then report which API key
/// variables it expects and whether they are set in this environment.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    let config: PlannerConfig = toml::from_str(EXAMPLE_CONFIG)?;
    fs::write(&args.output, EXAMPLE_CONFIG)?;

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "✓ Configuration file created: {}",
        args.output.display()
    )?;
    write_credential_report(&config, &mut stdout)?;

    Ok(())
}

/// One line per external service naming its key variable and whether it is
/// set. Returns how many are missing.
pub fn write_credential_report(config: &PlannerConfig, out: &mut dyn Write) -> io::Result<usize> {
    let mut missing = 0;
    for (service, env_var) in config.credential_env_vars() {
        let status = if lookup_credential(env_var).is_some() {
            "set"
        } else {
            missing += 1;
            "not set"
        };
        writeln!(out, "  {} API key: ${} ({})", service, env_var, status)?;
    }

    if missing > 0 {
        writeln!(
            out,
            "  `route-planner serve` refuses to start until every key above is set."
        )?;
    }
    Ok(missing)
}
