//! santa-cli: draw Secret Santa matches and mail every player their result
//!
//! The pipeline is linear: load and validate the TOML configuration, run the
//! constrained-random draw until a valid assignment map comes out (or the
//! attempt ceiling declares the setup infeasible), then send the
//! administrator's legend and one message per player over SMTP. By default
//! the run is a rehearsal: all mail is redirected to the administrator.

mod cli;
mod config;
mod mailer;
mod matching;
mod notify;

use clap::Parser;
use colored::Colorize;

fn main() {
    // .env may carry SANTA_SMTP_PASSWORD; a missing file is fine
    let _ = dotenvy::dotenv();

    let args = cli::Cli::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = cli::run(args) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
