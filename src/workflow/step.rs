use reqwest::{Method, StatusCode};
use std::fmt;

/// Statuses a gating step accepts as success.
pub const GATE_ACCEPTED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// The eight calls of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ListOpportunities,
    Register,
    CreateOpportunity,
    CreateApplication,
    SubmitApplication,
    ReviewApplication,
    ListByUser,
    ListByOpportunity,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::ListOpportunities,
        Step::Register,
        Step::CreateOpportunity,
        Step::CreateApplication,
        Step::SubmitApplication,
        Step::ReviewApplication,
        Step::ListByUser,
        Step::ListByOpportunity,
    ];

    /// 1-based position in the run.
    pub fn number(self) -> usize {
        Step::ALL
            .iter()
            .position(|s| *s == self)
            .map(|i| i + 1)
            .unwrap_or_default()
    }

    pub fn method(self) -> Method {
        match self {
            Step::ListOpportunities | Step::ListByUser | Step::ListByOpportunity => Method::GET,
            Step::ReviewApplication => Method::PUT,
            _ => Method::POST,
        }
    }

    /// Route template as printed in step labels.
    pub fn route(self) -> &'static str {
        match self {
            Step::ListOpportunities | Step::CreateOpportunity => "/opportunities",
            Step::Register => "/auth/register",
            Step::CreateApplication => "/applications",
            Step::SubmitApplication => "/applications/:id/submit",
            Step::ReviewApplication => "/applications/:id/review",
            Step::ListByUser => "/applications/user/:userId",
            Step::ListByOpportunity => "/applications/opportunity/:opportunityId",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::ListOpportunities => "list opportunities",
            Step::Register => "register",
            Step::CreateOpportunity => "create opportunity",
            Step::CreateApplication => "create application",
            Step::SubmitApplication => "submit application",
            Step::ReviewApplication => "review application",
            Step::ListByUser => "list applications by user",
            Step::ListByOpportunity => "list applications by opportunity",
        }
    }

    /// Whether a failure of this step aborts the run.
    pub fn is_gate(self) -> bool {
        matches!(
            self,
            Step::Register | Step::CreateOpportunity | Step::CreateApplication
        )
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {} {}", self.number(), self.method(), self.route())
    }
}
