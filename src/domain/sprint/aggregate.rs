//! Sprint session aggregate.
//!
//! One record per group, persisted as JSON under the group's store key.
//! The wire form uses camelCase keys and epoch-millisecond timestamps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{Actor, GroupId, ParticipantId, Timestamp};

use super::{ParticipantTally, SprintDuration, SprintError, SprintSummary};

/// Per-participant progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantProgress {
    /// Latest self-reported total. Replaced on every report, never summed.
    pub word_count: u64,
}

/// What happened when a participant left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// An ordinary participant left; the sprint carries on.
    Left,
    /// The starter left; the sprint must now be ended.
    StarterLeft,
}

/// Sprint session aggregate.
///
/// # Invariants
///
/// - `end_time == start_time + duration`
/// - the starter is a participant at creation
/// - each participant appears at most once
/// - `is_active == false` is terminal; callers delete the record right away
///   or, failing that, store it inactive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintSession {
    group_id: GroupId,
    starter_id: ParticipantId,
    #[serde(alias = "duration")]
    duration_minutes: SprintDuration,
    start_time: Timestamp,
    end_time: Timestamp,
    is_active: bool,
    participants: BTreeMap<ParticipantId, ParticipantProgress>,
}

impl SprintSession {
    /// Start a sprint now, with the starter auto-joined.
    pub fn start(group_id: GroupId, starter_id: ParticipantId, duration: SprintDuration) -> Self {
        Self::start_at(group_id, starter_id, duration, Timestamp::now())
    }

    /// Start a sprint at an explicit instant.
    pub fn start_at(
        group_id: GroupId,
        starter_id: ParticipantId,
        duration: SprintDuration,
        start_time: Timestamp,
    ) -> Self {
        let mut participants = BTreeMap::new();
        participants.insert(starter_id.clone(), ParticipantProgress::default());

        Self {
            group_id,
            starter_id,
            duration_minutes: duration,
            start_time,
            end_time: start_time.plus_minutes(duration.minutes()),
            is_active: true,
            participants,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn starter_id(&self) -> &ParticipantId {
        &self.starter_id
    }

    pub fn duration(&self) -> SprintDuration {
        self.duration_minutes
    }

    pub fn start_time(&self) -> &Timestamp {
        &self.start_time
    }

    pub fn end_time(&self) -> &Timestamp {
        &self.end_time
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn participants(&self) -> &BTreeMap<ParticipantId, ParticipantProgress> {
        &self.participants
    }

    pub fn is_participant(&self, participant_id: &ParticipantId) -> bool {
        self.participants.contains_key(participant_id)
    }

    /// Latest reported count for a participant.
    pub fn word_count(&self, participant_id: &ParticipantId) -> Option<u64> {
        self.participants.get(participant_id).map(|p| p.word_count)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Only the starter, or the system actor on expiry, may end a sprint.
    pub fn can_end(&self, actor: &Actor) -> bool {
        match actor {
            Actor::System => true,
            Actor::Participant(id) => id == &self.starter_id,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a participant with a zero count.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if the session has already finished
    /// - `AlreadyJoined` if the participant is present
    pub fn join(&mut self, participant_id: ParticipantId) -> Result<(), SprintError> {
        self.ensure_active()?;
        if self.is_participant(&participant_id) {
            return Err(SprintError::AlreadyJoined);
        }
        self.participants
            .insert(participant_id, ParticipantProgress::default());
        Ok(())
    }

    /// Fails with `NotParticipant` unless the id has joined.
    pub fn ensure_participant(&self, participant_id: &ParticipantId) -> Result<(), SprintError> {
        if self.is_participant(participant_id) {
            Ok(())
        } else {
            Err(SprintError::NotParticipant)
        }
    }

    /// Replace a participant's word count with their latest report.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if the session has already finished
    /// - `NotParticipant` if the id never joined
    pub fn record_words(
        &mut self,
        participant_id: &ParticipantId,
        word_count: u64,
    ) -> Result<(), SprintError> {
        self.ensure_active()?;
        let progress = self
            .participants
            .get_mut(participant_id)
            .ok_or(SprintError::NotParticipant)?;
        progress.word_count = word_count;
        Ok(())
    }

    /// Remove a participant.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if the session has already finished
    /// - `NotParticipant` if the id never joined
    pub fn leave(&mut self, participant_id: &ParticipantId) -> Result<LeaveOutcome, SprintError> {
        self.ensure_active()?;
        if self.participants.remove(participant_id).is_none() {
            return Err(SprintError::NotParticipant);
        }
        if participant_id == &self.starter_id {
            Ok(LeaveOutcome::StarterLeft)
        } else {
            Ok(LeaveOutcome::Left)
        }
    }

    /// Mark the sprint finished and capture the final tallies.
    ///
    /// The summary reflects whoever is a participant at this moment.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if already finished
    /// - `NotStarter` if the actor may not end this sprint
    pub fn finish(&mut self, actor: &Actor, now: Timestamp) -> Result<SprintSummary, SprintError> {
        self.ensure_active()?;
        if !self.can_end(actor) {
            return Err(SprintError::NotStarter);
        }

        self.is_active = false;
        let tallies = self
            .participants
            .iter()
            .map(|(id, progress)| ParticipantTally {
                participant_id: id.clone(),
                word_count: progress.word_count,
            })
            .collect();

        Ok(SprintSummary {
            elapsed_minutes: now.whole_minutes_since(&self.start_time),
            tallies,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_active(&self) -> Result<(), SprintError> {
        if self.is_active {
            Ok(())
        } else {
            Err(SprintError::NoActiveSession)
        }
    }
}
