//! Message rendering
//!
//! Two message shapes: the "legend" summary kept by the administrator, and
//! the per-player message that names only that player's own assignees.

use crate::matching::Assignments;

/// One rendered message, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Render the administrator's record of the full draw
pub fn admin_summary(
    players: &[String],
    assignments: &Assignments,
    admin: &str,
) -> OutboundEmail {
    let mut body = String::from("Player matches for Secret Santa:\n");
    for player in players {
        body.push_str(&format!(
            "  {} matched with {}\n",
            player,
            assignments.assignees(player).join(", ")
        ));
    }

    OutboundEmail {
        to: admin.to_string(),
        subject: "Secret Santa legend".to_string(),
        body,
    }
}

/// Render one player's message, revealing nobody else's assignees
pub fn player_message(
    player: &str,
    players: &[String],
    assignments: &Assignments,
    gifts_per_player: usize,
    to: &str,
) -> OutboundEmail {
    let player_list = players.join(", ");
    let matches = assignments.assignees(player).join(" and ");

    let body = format!(
        "Dear {player},\n\n\
         We are doing a Secret Santa this year! Each player ({player_list}) has been \
         secretly assigned {gifts_per_player} other player(s) to get a gift for. Your \
         assignment should never be your significant other, so if it is, please alert \
         the organizer immediately.\n\n\
         Your Secret Santa match is: {matches}!\n\n\
         Please do not share your results with anybody else, even your partner, until \
         the gift exchange!\n\n\
         Merry Christmas!\n\n\
         (This is an automated email, replies will not be received)"
    );

    OutboundEmail {
        to: to.to_string(),
        subject: "Secret Santa".to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        ["Will", "Lauren", "Alex", "Sam"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn assignments() -> Assignments {
        let players = roster();
        let mut assignments = Assignments::new(&players);
        assignments.assign("Will", "Alex".to_string());
        assignments.assign("Lauren", "Sam".to_string());
        assignments.assign("Alex", "Will".to_string());
        assignments.assign("Sam", "Lauren".to_string());
        assignments
    }

    #[test]
    fn test_admin_summary_lists_every_player() {
        let players = roster();
        let email = admin_summary(&players, &assignments(), "admin@example.com");

        assert_eq!(email.to, "admin@example.com");
        assert_eq!(email.subject, "Secret Santa legend");
        assert!(email.body.contains("Will matched with Alex"));
        assert!(email.body.contains("Lauren matched with Sam"));
        assert!(email.body.contains("Alex matched with Will"));
        assert!(email.body.contains("Sam matched with Lauren"));
    }

    #[test]
    fn test_player_message_reveals_only_own_matches() {
        let players = roster();
        let email = player_message("Will", &players, &assignments(), 1, "will@example.com");

        assert_eq!(email.to, "will@example.com");
        assert_eq!(email.subject, "Secret Santa");
        assert!(email.body.contains("Dear Will,"));
        assert!(email.body.contains("Your Secret Santa match is: Alex!"));
        assert!(email.body.contains("do not share your results"));
        // Other players' draws stay secret
        assert!(!email.body.contains("Lauren matched"));
        assert!(!email.body.contains("Sam!"));
    }

    #[test]
    fn test_player_message_joins_multiple_matches() {
        let players = roster();
        let mut multi = Assignments::new(&players);
        multi.assign("Will", "Alex".to_string());
        multi.assign("Will", "Sam".to_string());

        let email = player_message("Will", &players, &multi, 2, "will@example.com");

        assert!(email.body.contains("Your Secret Santa match is: Alex and Sam!"));
        assert!(email.body.contains("assigned 2 other player(s)"));
    }
}
