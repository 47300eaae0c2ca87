//! Minimum command spacing checks.
//!
//! Every datasheet spacing parameter (tRCD, tRP, tRC, tRFC, tMRD) has the same shape: an event
//! arms it, every clock ages it, and a later command must not arrive before it has aged by the
//! required number of cycles.

use crate::common::ProtocolViolation;

/// One armed-or-idle spacing constraint.
#[derive(Clone, Debug)]
pub struct SpacingTimer {
    parameter: &'static str,
    required: u32,
    elapsed: Option<u32>,
}

impl SpacingTimer {
    /// Creates an idle timer.
    ///
    /// # Arguments
    ///
    /// * `parameter` - Datasheet name used in violation reports.
    /// * `required` - Minimum spacing in cycles.
    pub const fn new(parameter: &'static str, required: u32) -> Self {
        Self {
            parameter,
            required,
            elapsed: None,
        }
    }

    /// Ages the timer by one cycle; disarms itself once satisfied.
    pub fn clk(&mut self) {
        if let Some(elapsed) = self.elapsed.as_mut() {
            *elapsed += 1;
            if *elapsed >= self.required {
                self.elapsed = None;
            }
        }
    }

    /// Arms the timer on the current edge.
    pub const fn start(&mut self) {
        self.elapsed = Some(0);
    }

    /// `true` while the constraint is still pending.
    pub const fn is_armed(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Fails if a command arriving now would violate the constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolViolation::Timing`] with the observed spacing.
    pub const fn check(&self) -> Result<(), ProtocolViolation> {
        match self.elapsed {
            Some(actual) => Err(ProtocolViolation::Timing {
                parameter: self.parameter,
                required: self.required,
                actual,
            }),
            None => Ok(()),
        }
    }
}
