//! Command-line surface and the draw-and-deliver handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use crate::config::{self, Config};
use crate::mailer::SmtpMailer;
use crate::matching::{DraftSettings, Matcher};
use crate::notify::{DeliveryMode, Notifier};

#[derive(Parser)]
#[command(name = "santa-cli")]
#[command(about = "Draw a Secret Santa assignment and email every player their matches")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Send real mail to every player instead of rehearsing against the admin address
    #[arg(short = 'p', long)]
    pub live: bool,

    /// Enable per-round diagnostic output
    #[arg(short = 'd', long)]
    pub verbose: bool,
}

/// Run the whole exchange: load config, draw matches, deliver results
pub fn run(args: Cli) -> Result<()> {
    let path = args
        .config
        .or_else(config::default_path)
        .context("no --config given and no user config directory found")?;
    let config = Config::load(&path)?;
    let exclusions = config.exclusions()?;

    let mode = if args.live {
        DeliveryMode::Live
    } else {
        DeliveryMode::Rehearsal
    };

    println!(
        "{}",
        format!(
            "Drawing matches for {} players in {} mode",
            config.roster.players.len(),
            mode.label()
        )
        .cyan()
    );

    let settings = DraftSettings {
        rounds: config.game.gifts_per_player,
        max_attempts: config.game.max_attempts,
        resample_limit: config.game.draft_retry_limit,
    };
    let matcher = Matcher::new(&config.roster.players, &exclusions, settings);
    let mut rng = rand::rng();
    let assignments = matcher.solve(&mut rng)?;

    // Results are only shown on the console while rehearsing; a live run
    // keeps them secret from the operator too
    if mode == DeliveryMode::Rehearsal {
        println!("{}", "Final matches:".green());
        for player in &config.roster.players {
            println!(
                "  {}",
                format!("{} gets {}", player, assignments.assignees(player).join(", ")).blue()
            );
        }
    }

    let password = smtp_password()?;
    let mailer = SmtpMailer::new(&config.smtp, &password)?;
    let notifier = Notifier::new(&mailer, mode, &config.smtp.admin, config.game.gifts_per_player);
    let report = notifier.deliver_all(&config.roster, &assignments);

    if report.failed > 0 {
        println!(
            "{}",
            format!(
                "{} of {} messages failed to send",
                report.failed,
                report.sent + report.failed
            )
            .red()
        );
    } else {
        println!(
            "{}",
            format!("All {} messages sent", report.sent).bright_green()
        );
    }

    Ok(())
}

/// SMTP app password: environment first, interactive prompt as fallback
fn smtp_password() -> Result<String> {
    if let Ok(password) = std::env::var("SANTA_SMTP_PASSWORD") {
        if !password.is_empty() {
            return Ok(password);
        }
    }
    rpassword::prompt_password("SMTP app password: ").context("Failed to read SMTP password")
}
