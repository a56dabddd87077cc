//! End-of-sprint report.

use crate::domain::foundation::ParticipantId;

/// One participant's line in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantTally {
    pub participant_id: ParticipantId,
    pub word_count: u64,
}

/// Final word counts captured when a sprint ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintSummary {
    /// Whole minutes between start and end, rounded down.
    pub elapsed_minutes: u64,
    pub tallies: Vec<ParticipantTally>,
}

impl SprintSummary {
    /// Sum of every participant's latest report, saturating at `u64::MAX`.
    pub fn total_words(&self) -> u64 {
        self.tallies
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.word_count))
    }

    pub fn word_count_for(&self, participant_id: &ParticipantId) -> Option<u64> {
        self.tallies
            .iter()
            .find(|t| &t.participant_id == participant_id)
            .map(|t| t.word_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(id: &str, words: u64) -> ParticipantTally {
        ParticipantTally {
            participant_id: ParticipantId::new(id).unwrap(),
            word_count: words,
        }
    }

    #[test]
    fn total_sums_all_tallies() {
        let summary = SprintSummary {
            elapsed_minutes: 12,
            tallies: vec![tally("a", 200), tally("b", 150)],
        };
        assert_eq!(summary.total_words(), 350);
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let summary = SprintSummary {
            elapsed_minutes: 3,
            tallies: vec![tally("a", u64::MAX), tally("b", 1)],
        };
        assert_eq!(summary.total_words(), u64::MAX);
    }

    #[test]
    fn empty_summary_totals_zero() {
        let summary = SprintSummary {
            elapsed_minutes: 0,
            tallies: vec![],
        };
        assert_eq!(summary.total_words(), 0);
    }

    #[test]
    fn word_count_for_finds_participant() {
        let summary = SprintSummary {
            elapsed_minutes: 1,
            tallies: vec![tally("a", 7)],
        };
        assert_eq!(summary.word_count_for(&ParticipantId::new("a").unwrap()), Some(7));
        assert_eq!(summary.word_count_for(&ParticipantId::new("z").unwrap()), None);
    }
}
