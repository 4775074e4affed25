//! Values threaded through a run.
//!
//! Each gating step consumes the previous state and yields the next one, so
//! later steps can only be reached with the identifiers they depend on.

use crate::clock::Clock;
use crate::http::ApiResponse;

use super::error::WorkflowError;
use super::step::{GATE_ACCEPTED, Step};

/// Throwaway account details for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn generate<C: Clock + ?Sized>(clock: &C, password: &str) -> Self {
        Self {
            email: email_for(clock.now_millis()),
            password: password.to_string(),
        }
    }
}

pub fn email_for(stamp: u128) -> String {
    format!("test.user.{}@example.com", stamp)
}

/// Identity returned by registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityRef(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRef(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityCreated {
    pub session: Session,
    pub opportunity: OpportunityRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCreated {
    pub session: Session,
    pub opportunity: OpportunityRef,
    pub application: ApplicationRef,
}

/// Rejects a gating response whose status is not accepted.
pub fn gate(step: Step, response: ApiResponse) -> Result<ApiResponse, WorkflowError> {
    if response.is_accepted(GATE_ACCEPTED) {
        Ok(response)
    } else {
        Err(WorkflowError::GateRejected {
            step,
            status: response.status,
            body: response.body,
        })
    }
}

fn extract(
    step: Step,
    response: &ApiResponse,
    pointer: &str,
    field: &'static str,
) -> Result<String, WorkflowError> {
    response
        .body
        .id_at(pointer)
        .ok_or_else(|| WorkflowError::MissingField {
            step,
            field,
            body: response.body.clone(),
        })
}

pub fn registered(response: ApiResponse) -> Result<Registered, WorkflowError> {
    let response = gate(Step::Register, response)?;
    let user_id = extract(Step::Register, &response, "/user/id", "user.id")?;
    let token = extract(Step::Register, &response, "/token", "token")?;
    Ok(Registered {
        session: Session { user_id, token },
    })
}

pub fn opportunity_created(
    state: Registered,
    response: ApiResponse,
) -> Result<OpportunityCreated, WorkflowError> {
    let response = gate(Step::CreateOpportunity, response)?;
    let id = extract(Step::CreateOpportunity, &response, "/id", "id")?;
    Ok(OpportunityCreated {
        session: state.session,
        opportunity: OpportunityRef(id),
    })
}

pub fn application_created(
    state: OpportunityCreated,
    response: ApiResponse,
) -> Result<ApplicationCreated, WorkflowError> {
    let response = gate(Step::CreateApplication, response)?;
    let id = extract(Step::CreateApplication, &response, "/id", "id")?;
    Ok(ApplicationCreated {
        session: state.session,
        opportunity: state.opportunity,
        application: ApplicationRef(id),
    })
}
