//! Result delivery and routing
//!
//! The notifier turns a finished assignment map into outbound mail: the
//! administrator's legend first, then one message per player in roster
//! order. In rehearsal mode every message is redirected to the
//! administrator for inspection; the console still names the intended
//! recipient. A failed send is logged and skipped, never aborting the rest
//! of the run.

use colored::Colorize;

use crate::config::RosterConfig;
use crate::mailer::{self, Mailer, OutboundEmail};
use crate::matching::Assignments;

/// Where outbound mail actually goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Redirect everything to the administrator address
    Rehearsal,
    /// Send to the players' real addresses
    Live,
}

impl DeliveryMode {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMode::Rehearsal => "rehearsal",
            DeliveryMode::Live => "live",
        }
    }
}

/// Totals for one delivery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct Notifier<'a, M: Mailer> {
    mailer: &'a M,
    mode: DeliveryMode,
    admin: &'a str,
    gifts_per_player: usize,
}

impl<'a, M: Mailer> Notifier<'a, M> {
    pub fn new(mailer: &'a M, mode: DeliveryMode, admin: &'a str, gifts_per_player: usize) -> Self {
        Notifier {
            mailer,
            mode,
            admin,
            gifts_per_player,
        }
    }

    /// Send the legend to the administrator, then each player their result
    pub fn deliver_all(&self, roster: &RosterConfig, assignments: &Assignments) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        let legend = mailer::admin_summary(&roster.players, assignments, self.admin);
        self.dispatch(legend, &mut report);

        for player in &roster.players {
            // Addresses were validated against the roster at config load
            let Some(address) = roster.email_of(player) else {
                continue;
            };
            let email = mailer::player_message(
                player,
                &roster.players,
                assignments,
                self.gifts_per_player,
                address,
            );
            self.dispatch(email, &mut report);
        }

        report
    }

    fn dispatch(&self, email: OutboundEmail, report: &mut DeliveryReport) {
        let email = self.route(email);
        match self.mailer.send(&email) {
            Ok(()) => report.sent += 1,
            Err(e) => {
                log::error!("failed to send '{}' to {}: {}", email.subject, email.to, e);
                println!("{}", format!("Failed to send email to {}", email.to).red());
                report.failed += 1;
            }
        }
    }

    /// Apply the delivery mode to one message, noting the intended recipient
    fn route(&self, mut email: OutboundEmail) -> OutboundEmail {
        match self.mode {
            DeliveryMode::Live => {
                println!("{}", format!("Sending email to {}", email.to).blue());
            }
            DeliveryMode::Rehearsal => {
                println!(
                    "{}",
                    format!(
                        "Would have sent email to {}, sending it to {} instead",
                        email.to, self.admin
                    )
                    .blue()
                );
                email.to = self.admin.to_string();
            }
        }
        email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::MailError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Records every accepted message; refuses those addressed to `fail_to`
    struct RecordingMailer {
        sent: RefCell<Vec<OutboundEmail>>,
        fail_to: Option<String>,
    }

    impl RecordingMailer {
        fn new() -> Self {
            RecordingMailer {
                sent: RefCell::new(Vec::new()),
                fail_to: None,
            }
        }

        fn failing_for(address: &str) -> Self {
            RecordingMailer {
                sent: RefCell::new(Vec::new()),
                fail_to: Some(address.to_string()),
            }
        }
    }

    impl Mailer for RecordingMailer {
        fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
            if self.fail_to.as_deref() == Some(email.to.as_str()) {
                return Err(MailError::Transport("connection refused".to_string()));
            }
            self.sent.borrow_mut().push(email.clone());
            Ok(())
        }
    }

    fn roster() -> RosterConfig {
        let players: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let emails: HashMap<String, String> = players
            .iter()
            .map(|p| (p.clone(), format!("{}@example.com", p.to_lowercase())))
            .collect();
        RosterConfig {
            players,
            couples: Vec::new(),
            emails,
        }
    }

    fn assignments(roster: &RosterConfig) -> Assignments {
        let mut assignments = Assignments::new(&roster.players);
        assignments.assign("A", "B".to_string());
        assignments.assign("B", "C".to_string());
        assignments.assign("C", "A".to_string());
        assignments
    }

    #[test]
    fn test_rehearsal_routes_everything_to_admin() {
        let roster = roster();
        let mailer = RecordingMailer::new();
        let notifier = Notifier::new(&mailer, DeliveryMode::Rehearsal, "admin@example.com", 1);

        let report = notifier.deliver_all(&roster, &assignments(&roster));

        assert_eq!(report, DeliveryReport { sent: 4, failed: 0 });
        let sent = mailer.sent.borrow();
        assert_eq!(sent.len(), 4);
        assert!(sent.iter().all(|email| email.to == "admin@example.com"));
        // The bodies are still the players' own messages
        assert!(sent[1].body.contains("Dear A,"));
        assert!(sent[2].body.contains("Dear B,"));
        assert!(sent[3].body.contains("Dear C,"));
    }

    #[test]
    fn test_live_sends_to_real_addresses() {
        let roster = roster();
        let mailer = RecordingMailer::new();
        let notifier = Notifier::new(&mailer, DeliveryMode::Live, "admin@example.com", 1);

        let report = notifier.deliver_all(&roster, &assignments(&roster));

        assert_eq!(report, DeliveryReport { sent: 4, failed: 0 });
        let sent = mailer.sent.borrow();
        // Legend first, then players in roster order
        assert_eq!(sent[0].to, "admin@example.com");
        assert_eq!(sent[0].subject, "Secret Santa legend");
        assert_eq!(sent[1].to, "a@example.com");
        assert_eq!(sent[2].to, "b@example.com");
        assert_eq!(sent[3].to, "c@example.com");
    }

    #[test]
    fn test_one_failed_send_does_not_stop_the_rest() {
        let roster = roster();
        let mailer = RecordingMailer::failing_for("b@example.com");
        let notifier = Notifier::new(&mailer, DeliveryMode::Live, "admin@example.com", 1);

        let report = notifier.deliver_all(&roster, &assignments(&roster));

        assert_eq!(report, DeliveryReport { sent: 3, failed: 1 });
        let sent = mailer.sent.borrow();
        assert!(sent.iter().all(|email| email.to != "b@example.com"));
        assert_eq!(sent.last().unwrap().to, "c@example.com");
    }
}
