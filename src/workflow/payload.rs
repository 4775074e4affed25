//! Request bodies sent by the workflow.

use serde::Serialize;

pub const OPPORTUNITY_TYPE: &str = "JOB_OPPORTUNITY";
pub const OPPORTUNITY_STATUS: &str = "DRAFT";
pub const REVIEW_STAGE: &str = "OWNER_REVIEW";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateOpportunityRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub description: &'a str,
    pub status: &'a str,
}

impl Default for CreateOpportunityRequest<'_> {
    fn default() -> Self {
        Self {
            name: "Test Opportunity",
            kind: OPPORTUNITY_TYPE,
            description: "Opportunity created during smoke test",
            status: OPPORTUNITY_STATUS,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest<'a> {
    pub opportunity_id: &'a str,
    pub title: &'a str,
    pub goal_letter: &'a str,
}

impl<'a> CreateApplicationRequest<'a> {
    pub fn for_opportunity(opportunity_id: &'a str) -> Self {
        Self {
            opportunity_id,
            title: "Candidature test",
            goal_letter: "Je suis intéressé.",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest<'a> {
    pub stage: &'a str,
    pub feedback_title: &'a str,
    pub review_feedback: &'a str,
}

impl Default for ReviewApplicationRequest<'_> {
    fn default() -> Self {
        Self {
            stage: REVIEW_STAGE,
            feedback_title: "En cours",
            review_feedback: "Review initiale.",
        }
    }
}
