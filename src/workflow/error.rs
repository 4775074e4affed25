use reqwest::StatusCode;
use std::fmt;

use super::step::Step;
use crate::http::ResponseBody;

/// Failures that end a run early.
#[derive(Debug)]
pub enum WorkflowError {
    /// A gating step answered with a status outside its accepted set.
    GateRejected {
        step: Step,
        status: StatusCode,
        body: ResponseBody,
    },
    /// A gating step was accepted but its body lacks a required identifier.
    MissingField {
        step: Step,
        field: &'static str,
        body: ResponseBody,
    },
}

impl WorkflowError {
    pub fn step(&self) -> Step {
        match self {
            WorkflowError::GateRejected { step, .. } => *step,
            WorkflowError::MissingField { step, .. } => *step,
        }
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::GateRejected { step, status, body } => {
                write!(
                    f,
                    "{} failed with status {}: {}",
                    step.name(),
                    status.as_u16(),
                    body
                )
            }
            WorkflowError::MissingField { step, field, body } => {
                write!(
                    f,
                    "{} failed: response has no `{}` field: {}",
                    step.name(),
                    field,
                    body
                )
            }
        }
    }
}

impl std::error::Error for WorkflowError {}
