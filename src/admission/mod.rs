//! Admission and upsert rules for the three (event, user) keyed resources.
//!
//! These are pure decision functions: handlers fetch the aggregate state
//! inside a transaction that holds a `FOR UPDATE` lock on the event row,
//! then ask this module whether the write is allowed and what form it
//! takes. Serializing per event id plus the unique (event_id, user_id)
//! indexes is what makes the check-then-act sequence race-free.

use serde::Serialize;

/// Outcome of a registration attempt for a given (event, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationDecision {
    Admitted,
    Rejected(RegistrationRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRejection {
    AlreadyRegistered,
    EventFull,
}

impl RegistrationRejection {
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationRejection::AlreadyRegistered => "Already registered for this event",
            RegistrationRejection::EventFull => "Event is full",
        }
    }
}

/// Decides whether a registration is admitted.
///
/// The duplicate check takes precedence over the capacity check, so a
/// user already holding a seat at a full event is told they are
/// registered, not that the event is full. Capacity `N` holds at most
/// `N` registrations; a zero or negative capacity makes the event
/// immediately full (capacity itself is never validated).
pub fn admit_registration(
    already_registered: bool,
    capacity: i32,
    registered: i64,
) -> RegistrationDecision {
    if already_registered {
        return RegistrationDecision::Rejected(RegistrationRejection::AlreadyRegistered);
    }
    if registered >= i64::from(capacity) {
        return RegistrationDecision::Rejected(RegistrationRejection::EventFull);
    }
    RegistrationDecision::Admitted
}

/// What a "mark attendance" call should do, given the existing row (if any)
/// for the (event, user) pair. A second mark updates in place rather than
/// duplicating; no prior registration is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceAction {
    Create,
    Update(i64),
}

pub fn attendance_action(existing: Option<i64>) -> AttendanceAction {
    match existing {
        Some(id) => AttendanceAction::Update(id),
        None => AttendanceAction::Create,
    }
}

/// Outcome of a feedback submission. Duplicates are rejected outright and
/// the stored row is never modified by a rejected call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackDecision {
    Admitted,
    AlreadySubmitted,
}

impl FeedbackDecision {
    pub fn rejection_message() -> &'static str {
        "Feedback already submitted for this event"
    }
}

pub fn admit_feedback(already_submitted: bool) -> FeedbackDecision {
    if already_submitted {
        FeedbackDecision::AlreadySubmitted
    } else {
        FeedbackDecision::Admitted
    }
}

/// Derived, non-persisted view of an event's remaining capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub current_participants: i64,
    pub available_spots: i64,
}

/// Counts registrations against capacity. `available_spots` goes negative
/// when capacity was lowered below the admitted count; no reconciliation
/// happens here or anywhere else.
pub fn project_availability(capacity: i32, registered: i64) -> Availability {
    Availability {
        current_participants: registered,
        available_spots: i64::from(capacity) - registered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_when_seats_remain() {
        assert_eq!(admit_registration(false, 10, 0), RegistrationDecision::Admitted);
        assert_eq!(admit_registration(false, 10, 9), RegistrationDecision::Admitted);
    }

    #[test]
    fn rejects_at_exact_capacity() {
        // capacity N holds at most N registrations
        assert_eq!(
            admit_registration(false, 10, 10),
            RegistrationDecision::Rejected(RegistrationRejection::EventFull)
        );
        assert_eq!(
            admit_registration(false, 10, 11),
            RegistrationDecision::Rejected(RegistrationRejection::EventFull)
        );
    }

    #[test]
    fn zero_capacity_event_is_immediately_full() {
        assert_eq!(
            admit_registration(false, 0, 0),
            RegistrationDecision::Rejected(RegistrationRejection::EventFull)
        );
    }

    #[test]
    fn negative_capacity_event_is_immediately_full() {
        assert_eq!(
            admit_registration(false, -3, 0),
            RegistrationDecision::Rejected(RegistrationRejection::EventFull)
        );
    }

    #[test]
    fn duplicate_registration_rejected_before_capacity() {
        // a registered user at a full event sees "already registered"
        assert_eq!(
            admit_registration(true, 1, 1),
            RegistrationDecision::Rejected(RegistrationRejection::AlreadyRegistered)
        );
        assert_eq!(
            admit_registration(true, 100, 3),
            RegistrationDecision::Rejected(RegistrationRejection::AlreadyRegistered)
        );
    }

    #[test]
    fn rejection_messages_match_api_contract() {
        assert_eq!(
            RegistrationRejection::AlreadyRegistered.message(),
            "Already registered for this event"
        );
        assert_eq!(RegistrationRejection::EventFull.message(), "Event is full");
        assert_eq!(
            FeedbackDecision::rejection_message(),
            "Feedback already submitted for this event"
        );
    }

    #[test]
    fn attendance_creates_when_absent_updates_when_present() {
        assert_eq!(attendance_action(None), AttendanceAction::Create);
        assert_eq!(attendance_action(Some(42)), AttendanceAction::Update(42));
    }

    #[test]
    fn feedback_rejects_duplicates_only() {
        assert_eq!(admit_feedback(false), FeedbackDecision::Admitted);
        assert_eq!(admit_feedback(true), FeedbackDecision::AlreadySubmitted);
    }

    #[test]
    fn availability_counts_down_from_capacity() {
        let a = project_availability(50, 12);
        assert_eq!(a.current_participants, 12);
        assert_eq!(a.available_spots, 38);
    }

    #[test]
    fn availability_goes_negative_when_capacity_was_lowered() {
        let a = project_availability(5, 8);
        assert_eq!(a.available_spots, -3);
    }
}
