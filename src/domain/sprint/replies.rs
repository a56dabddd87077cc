//! Chat replies for successful sprint transitions.
//!
//! Failure replies live on `SprintError`'s `Display`.

use std::fmt::Write;

use crate::domain::foundation::ParticipantId;

use super::{SprintSession, SprintSummary};

pub fn sprint_started(session: &SprintSession) -> String {
    format!(
        "🚀 Sprint session started!\n\
         ⏱️ Duration: {}\n\
         👤 Started by: {}\n\
         Join using /join command\n\n\
         Sprint ends at: {}",
        session.duration(),
        session.starter_id().mention(),
        session.end_time().time_of_day(),
    )
}

pub fn joined(participant_id: &ParticipantId) -> String {
    format!("✅ {} joined the sprint session!", participant_id.mention())
}

pub fn words_updated(participant_id: &ParticipantId, word_count: u64) -> String {
    format!(
        "✅ Word count updated for {}: {} words",
        participant_id.mention(),
        word_count
    )
}

pub fn left(participant_id: &ParticipantId) -> String {
    format!("👋 {} left the sprint session.", participant_id.mention())
}

pub fn summary(summary: &SprintSummary) -> String {
    let mut text = format!("📊 Sprint Summary ({} minutes):\n\n", summary.elapsed_minutes);
    for tally in &summary.tallies {
        // Writing into a String cannot fail.
        let _ = writeln!(
            text,
            "{}: {} words",
            tally.participant_id.mention(),
            tally.word_count
        );
    }
    let _ = write!(text, "\nTotal words written: {}", summary.total_words());
    text
}

pub fn unknown_command() -> String {
    "Unknown command. Available commands: /sprint, /join, /words, /end, /leave".to_string()
}
