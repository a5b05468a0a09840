use clap::Parser;
use funcall::cli::{CliConfig, Command};
use funcall::fixture;
use funcall::probe::{self, Scenario};
use funcall::{ProbeError, logger};
use std::process;

fn main() {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            tracing::error!("probe failed: {}", e);
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

/// Returns whether every call produced the expected value.
fn run(config: &CliConfig) -> Result<bool, ProbeError> {
    let target = config.target()?;

    match &config.command {
        Command::Check => {
            let outcomes = probe::check(target.as_ref(), &probe::standard_scenarios())?;
            let failed = outcomes.iter().filter(|o| !o.passed()).count();
            for o in &outcomes {
                let status = if o.passed() { "ok" } else { "FAIL" };
                println!(
                    "{} {}({}) = {} (expected {})",
                    status,
                    o.function,
                    fixture::arg_list(&o.args),
                    o.actual,
                    o.expected
                );
            }
            println!(
                "{} passed, {} failed ({})",
                outcomes.len() - failed,
                failed,
                target.label()
            );
            Ok(failed == 0)
        }
        Command::Call { args } => {
            let outcome = probe::run_scenario(target.as_ref(), &Scenario::new(args.clone()))?;
            println!("{}", outcome.actual);
            match outcome.into_result() {
                Ok(_) => Ok(true),
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(false)
                }
            }
        }
    }
}
