use crate::workflows::applications::status::{
    ApplicationStatus, InvalidTransition, StatusWorkflow,
};

use ApplicationStatus::{Accepted, Interview, Pending, Rejected, Reviewed};

const ALLOWED: [(ApplicationStatus, ApplicationStatus); 4] = [
    (Pending, Reviewed),
    (Reviewed, Accepted),
    (Reviewed, Rejected),
    (Accepted, Interview),
];

#[test]
fn allowed_pairs_succeed_and_everything_else_fails() {
    for current in ApplicationStatus::ordered() {
        for requested in ApplicationStatus::ordered() {
            let result = StatusWorkflow::validate_transition(current, requested);
            if ALLOWED.contains(&(current, requested)) {
                assert_eq!(result, Ok(()), "{current} -> {requested} should be allowed");
            } else {
                assert_eq!(
                    result,
                    Err(InvalidTransition {
                        from: current,
                        to: requested,
                    }),
                    "{current} -> {requested} should be rejected"
                );
            }
        }
    }
}

#[test]
fn self_transitions_are_rejected() {
    for status in ApplicationStatus::ordered() {
        assert!(!status.can_transition_to(status));
        assert!(StatusWorkflow::validate_transition(status, status).is_err());
    }
}

#[test]
fn rejected_and_interview_are_terminal() {
    for terminal in [Rejected, Interview] {
        assert!(terminal.is_terminal());
        assert!(terminal.allowed_next().is_empty());
        for requested in ApplicationStatus::ordered() {
            assert!(StatusWorkflow::validate_transition(terminal, requested).is_err());
        }
    }
    assert!(!Pending.is_terminal());
    assert!(!Accepted.is_terminal());
}

#[test]
fn pending_cannot_skip_review() {
    assert_eq!(
        StatusWorkflow::validate_transition(Pending, Accepted),
        Err(InvalidTransition {
            from: Pending,
            to: Accepted,
        })
    );
    assert!(StatusWorkflow::validate_transition(Pending, Rejected).is_err());
    assert!(StatusWorkflow::validate_transition(Accepted, Rejected).is_err());
}

#[test]
fn apply_only_writes_on_success() {
    let mut status = Pending;
    StatusWorkflow::apply(&mut status, Reviewed).expect("pending -> reviewed");
    assert_eq!(status, Reviewed);

    let err = StatusWorkflow::apply(&mut status, Interview).expect_err("reviewed -> interview");
    assert_eq!(status, Reviewed);
    assert_eq!(
        err.to_string(),
        "Invalid status transition from 'reviewed' to 'interview'"
    );
}

#[test]
fn labels_match_wire_format() {
    for status in ApplicationStatus::ordered() {
        let encoded = serde_json::to_value(status).expect("status serializes");
        assert_eq!(encoded, serde_json::Value::String(status.label().to_string()));
    }
    let decoded: ApplicationStatus =
        serde_json::from_str("\"interview\"").expect("status deserializes");
    assert_eq!(decoded, Interview);
}
