use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
    Interview,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Pending,
            Self::Reviewed,
            Self::Accepted,
            Self::Rejected,
            Self::Interview,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Interview => "interview",
        }
    }

    /// Statuses reachable in one step. Staying in place is never allowed.
    pub const fn allowed_next(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Reviewed],
            Self::Reviewed => &[Self::Accepted, Self::Rejected],
            Self::Accepted => &[Self::Interview],
            Self::Rejected | Self::Interview => &[],
        }
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next().contains(&next)
    }

    pub const fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected status change, carrying both ends for the client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status transition from '{from}' to '{to}'")]
pub struct InvalidTransition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// Sole authority on which application status changes are permitted.
pub struct StatusWorkflow;

impl StatusWorkflow {
    pub fn validate_transition(
        current: ApplicationStatus,
        requested: ApplicationStatus,
    ) -> Result<(), InvalidTransition> {
        if current.can_transition_to(requested) {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: current,
                to: requested,
            })
        }
    }

    /// Validate and write the new status; `status` is untouched on failure.
    pub fn apply(
        status: &mut ApplicationStatus,
        requested: ApplicationStatus,
    ) -> Result<(), InvalidTransition> {
        Self::validate_transition(*status, requested)?;
        *status = requested;
        Ok(())
    }
}
