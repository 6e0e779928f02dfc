use std::collections::HashMap;

/// Symmetric partner-exclusion relation
///
/// Couples are stored in both directions at construction time, so lookups
/// never depend on which partner a pair was declared under.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    partners: HashMap<String, String>,
}

impl Exclusions {
    /// Build the relation from declared couples (each couple listed once).
    ///
    /// Rejects a player paired with themselves and a player appearing in
    /// more than one couple (listing the same couple twice counts).
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, PairingError> {
        let mut partners = HashMap::new();

        for (first, second) in pairs {
            if first == second {
                return Err(PairingError::SelfPaired(first.clone()));
            }
            for name in [first, second] {
                if partners.contains_key(name) {
                    return Err(PairingError::AlreadyPaired(name.clone()));
                }
            }
            partners.insert(first.clone(), second.clone());
            partners.insert(second.clone(), first.clone());
        }

        Ok(Self { partners })
    }

    /// Get a player's excluded partner, if they have one
    pub fn partner_of(&self, player: &str) -> Option<&str> {
        self.partners.get(player).map(String::as_str)
    }

    /// Check whether two players must not be assigned to each other
    pub fn excluded(&self, giver: &str, candidate: &str) -> bool {
        self.partner_of(giver) == Some(candidate)
    }

    /// Iterate over the couples, yielding each pair exactly once
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.partners
            .iter()
            .filter(|(first, second)| first.as_str() < second.as_str())
            .map(|(first, second)| (first.as_str(), second.as_str()))
    }
}

/// Error raised when the declared couples do not form a valid relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    SelfPaired(String),
    AlreadyPaired(String),
}

impl std::fmt::Display for PairingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingError::SelfPaired(name) => {
                write!(f, "player '{}' is listed as their own partner", name)
            }
            PairingError::AlreadyPaired(name) => {
                write!(f, "player '{}' appears in more than one couple", name)
            }
        }
    }
}

impl std::error::Error for PairingError {}

/// Final giver-to-assignees mapping produced by a successful attempt
///
/// Rebuilt from scratch on every attempt; discarded whenever an attempt is
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    matches: HashMap<String, Vec<String>>,
}

impl Assignments {
    /// Create an empty assignment map covering every player
    pub fn new(players: &[String]) -> Self {
        let matches = players
            .iter()
            .map(|player| (player.clone(), Vec::new()))
            .collect();
        Self { matches }
    }

    /// Record that `giver` gets a gift for `assignee`
    pub fn assign(&mut self, giver: &str, assignee: String) {
        self.matches.entry(giver.to_string()).or_default().push(assignee);
    }

    /// A giver's assignees, in draft order
    pub fn assignees(&self, giver: &str) -> &[String] {
        self.matches.get(giver).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether `giver` already drew `candidate` in a prior round
    pub fn has_assignee(&self, giver: &str, candidate: &str) -> bool {
        self.assignees(giver).iter().any(|a| a == candidate)
    }

    /// A giver's assignees sorted by name, for order-independent comparison
    pub fn sorted_assignees(&self, giver: &str) -> Vec<&str> {
        let mut assignees: Vec<&str> = self.assignees(giver).iter().map(String::as_str).collect();
        assignees.sort_unstable();
        assignees
    }

    /// Count how many gifts each player receives across the whole map
    pub fn gift_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for assignees in self.matches.values() {
            for assignee in assignees {
                *counts.entry(assignee.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Why a whole attempt was rejected
///
/// Rejections are expected and retried by the driver; they are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A player ran out of resamples before finding a legal candidate
    DraftStalled { player: String, round: usize },
    /// A couple ended up with identical assignee sets
    MatchingCoupleSets { first: String, second: String },
    /// A player would receive the wrong number of gifts
    Unbalanced {
        player: String,
        received: usize,
        expected: usize,
    },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::DraftStalled { player, round } => {
                write!(f, "no legal candidate left for '{}' in round {}", player, round)
            }
            RejectReason::MatchingCoupleSets { first, second } => {
                write!(f, "couple '{}' and '{}' drew identical assignee sets", first, second)
            }
            RejectReason::Unbalanced {
                player,
                received,
                expected,
            } => {
                write!(
                    f,
                    "'{}' would receive {} gifts instead of the expected {}",
                    player, received, expected
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_exclusions_are_symmetric() {
        let exclusions = Exclusions::from_pairs(&[pair("Will", "Lauren")]).unwrap();

        assert_eq!(exclusions.partner_of("Will"), Some("Lauren"));
        assert_eq!(exclusions.partner_of("Lauren"), Some("Will"));
        assert!(exclusions.excluded("Will", "Lauren"));
        assert!(exclusions.excluded("Lauren", "Will"));
        assert!(!exclusions.excluded("Will", "Alex"));
        assert_eq!(exclusions.partner_of("Alex"), None);
    }

    #[test]
    fn test_self_pairing_rejected() {
        let result = Exclusions::from_pairs(&[pair("Will", "Will")]);
        assert_eq!(result.unwrap_err(), PairingError::SelfPaired("Will".to_string()));
    }

    #[test]
    fn test_player_in_two_couples_rejected() {
        let result = Exclusions::from_pairs(&[pair("Will", "Lauren"), pair("Will", "Alex")]);
        assert_eq!(result.unwrap_err(), PairingError::AlreadyPaired("Will".to_string()));
    }

    #[test]
    fn test_duplicate_couple_rejected() {
        let result = Exclusions::from_pairs(&[pair("Will", "Lauren"), pair("Lauren", "Will")]);
        assert!(matches!(result, Err(PairingError::AlreadyPaired(_))));
    }

    #[test]
    fn test_pairs_yields_each_couple_once() {
        let exclusions =
            Exclusions::from_pairs(&[pair("Will", "Lauren"), pair("Alex", "Sam")]).unwrap();

        let mut pairs: Vec<(&str, &str)> = exclusions.pairs().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![("Alex", "Sam"), ("Lauren", "Will")]);
    }

    #[test]
    fn test_assignments_track_gift_counts() {
        let players: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut assignments = Assignments::new(&players);
        assignments.assign("A", "B".to_string());
        assignments.assign("B", "C".to_string());
        assignments.assign("C", "B".to_string());

        let counts = assignments.gift_counts();
        assert_eq!(counts.get("B"), Some(&2));
        assert_eq!(counts.get("C"), Some(&1));
        assert_eq!(counts.get("A"), None);
    }

    #[test]
    fn test_sorted_assignees_ignores_draft_order() {
        let players: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut assignments = Assignments::new(&players);
        assignments.assign("A", "C".to_string());
        assignments.assign("A", "B".to_string());

        assert_eq!(assignments.assignees("A"), ["C", "B"]);
        assert_eq!(assignments.sorted_assignees("A"), ["B", "C"]);
    }
}
