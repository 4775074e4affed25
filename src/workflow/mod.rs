//! The smoke-test call chain.
//!
//! Steps run strictly in order. Registration, opportunity creation and
//! application creation are gates: a rejected status ends the run with a
//! [`WorkflowError`]. The connectivity probe, submit, review and the two
//! list queries only report their status.

mod error;
mod payload;
mod state;
mod step;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::{
    clock::Clock,
    config::Config,
    http::{ApiClient, ApiResponse},
};

pub use error::WorkflowError;
pub use payload::{
    CreateApplicationRequest, CreateOpportunityRequest, RegisterRequest, ReviewApplicationRequest,
};
pub use state::{
    ApplicationCreated, ApplicationRef, Credentials, OpportunityCreated, OpportunityRef,
    Registered, Session, email_for,
};
pub use step::{GATE_ACCEPTED, Step};

/// Observed result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StatusCode,
}

impl StepOutcome {
    pub fn passed(&self) -> bool {
        if self.step.is_gate() {
            GATE_ACCEPTED.contains(&self.status)
        } else {
            self.status.is_success()
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub credentials: Credentials,
    pub state: ApplicationCreated,
    pub outcomes: Vec<StepOutcome>,
}

impl RunReport {
    pub fn soft_failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// One line naming every step that did not succeed, if any.
    pub fn soft_failure_summary(&self) -> Option<String> {
        let failed: Vec<String> = self
            .soft_failures()
            .map(|o| format!("{} ({})", o.step.name(), o.status.as_u16()))
            .collect();
        if failed.is_empty() {
            None
        } else {
            Some(format!(
                "completed with {} failed check(s): {}",
                failed.len(),
                failed.join(", ")
            ))
        }
    }
}

pub struct Workflow<C: Clock> {
    client: ApiClient,
    config: Config,
    clock: C,
}

impl<C: Clock> Workflow<C> {
    pub fn new(client: ApiClient, config: Config, clock: C) -> Self {
        Self {
            client,
            config,
            clock,
        }
    }

    /// Runs all eight steps.
    ///
    /// Returns a [`WorkflowError`] (inside the `anyhow::Error`) when a gate
    /// rejects, and a plain error when the server cannot be reached.
    #[tracing::instrument(skip(self), fields(api_url = %self.client.base_url()))]
    pub async fn run(&self) -> Result<RunReport> {
        let mut outcomes = Vec::with_capacity(Step::ALL.len());

        let probe = self
            .call(Step::ListOpportunities, "/opportunities?take=1", None, None)
            .await?;
        outcomes.push(self.observe(Step::ListOpportunities, &probe));

        let credentials = Credentials::generate(&self.clock, &self.config.password);
        info!("Registering {}", credentials.email);

        let response = self
            .call(
                Step::Register,
                "/auth/register",
                Some(to_body(&RegisterRequest {
                    email: &credentials.email,
                    password: &credentials.password,
                    first_name: "Test",
                    last_name: "User",
                })?),
                None,
            )
            .await?;
        outcomes.push(StepOutcome {
            step: Step::Register,
            status: response.status,
        });
        let registered = state::registered(response)?;

        let response = self
            .call(
                Step::CreateOpportunity,
                "/opportunities",
                Some(to_body(&CreateOpportunityRequest::default())?),
                Some(&registered.session.token),
            )
            .await?;
        outcomes.push(StepOutcome {
            step: Step::CreateOpportunity,
            status: response.status,
        });
        let created = state::opportunity_created(registered, response)?;

        let response = self
            .call(
                Step::CreateApplication,
                "/applications",
                Some(to_body(&CreateApplicationRequest::for_opportunity(
                    &created.opportunity.0,
                ))?),
                Some(&created.session.token),
            )
            .await?;
        outcomes.push(StepOutcome {
            step: Step::CreateApplication,
            status: response.status,
        });
        let applied = state::application_created(created, response)?;

        outcomes.extend(self.verify(&applied).await?);

        println!("DONE");

        Ok(RunReport {
            credentials,
            state: applied,
            outcomes,
        })
    }

    /// Steps 5 to 8. None of them can abort the run.
    async fn verify(&self, state: &ApplicationCreated) -> Result<Vec<StepOutcome>> {
        let token = state.session.token.as_str();
        let query_token = self.config.token_on_queries.then_some(token);
        let application_id = &state.application.0;
        let mut outcomes = Vec::with_capacity(4);

        let response = self
            .call(
                Step::SubmitApplication,
                &format!("/applications/{}/submit", application_id),
                None,
                Some(token),
            )
            .await?;
        outcomes.push(self.observe(Step::SubmitApplication, &response));

        let response = self
            .call(
                Step::ReviewApplication,
                &format!("/applications/{}/review", application_id),
                Some(to_body(&ReviewApplicationRequest::default())?),
                Some(token),
            )
            .await?;
        outcomes.push(self.observe(Step::ReviewApplication, &response));

        let response = self
            .call(
                Step::ListByUser,
                &format!("/applications/user/{}", state.session.user_id),
                None,
                query_token,
            )
            .await?;
        outcomes.push(self.observe(Step::ListByUser, &response));

        let response = self
            .call(
                Step::ListByOpportunity,
                &format!("/applications/opportunity/{}", state.opportunity.0),
                None,
                query_token,
            )
            .await?;
        outcomes.push(self.observe(Step::ListByOpportunity, &response));

        Ok(outcomes)
    }

    async fn call(
        &self,
        step: Step,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        println!("{}", step);
        let response = self
            .client
            .call(step.method(), path, body.as_ref(), token)
            .await
            .with_context(|| format!("{} request failed", step.name()))?;
        println!("status {}", response.status.as_u16());
        Ok(response)
    }

    /// Records a non-gating step, warning when it did not succeed.
    fn observe(&self, step: Step, response: &ApiResponse) -> StepOutcome {
        let outcome = StepOutcome {
            step,
            status: response.status,
        };
        if outcome.passed() {
            debug!("{} succeeded", step.name());
        } else {
            warn!(
                "{} returned status {}, continuing",
                step.name(),
                response.status.as_u16()
            );
            debug!("{} response: {}", step.name(), response.body);
        }
        outcome
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload).context("Failed to encode request body")
}

/// Convenience used by the binary: build the client and run once.
pub async fn run_with<C: Clock>(config: Config, clock: C) -> Result<RunReport> {
    let client = ApiClient::new(crate::http::build_client()?, config.api_url.clone());
    Workflow::new(client, config, clock).run().await
}
