//! Job summary

use serde::Serialize;

use crate::engine::{DeviceOutcome, DeviceState};

/// Per-device outcomes of one batch, in device order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobSummary {
    pub outcomes: Vec<DeviceOutcome>,
}

impl JobSummary {
    pub fn new(outcomes: Vec<DeviceOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &DeviceOutcome> {
        self.outcomes.iter().filter(|o| o.state == DeviceState::Done)
    }

    pub fn failed(&self) -> impl Iterator<Item = &DeviceOutcome> {
        self.outcomes.iter().filter(|o| o.state == DeviceState::Failed)
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}
