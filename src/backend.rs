//! Backend Acquisition Client
//!
//! HTTP boundary to the application backend and the ranking store. Nothing
//! on this path is fatal to a run: fetches degrade to empty or absent, the
//! duplicate check fails open, and pushes log per record and continue.

use crate::pipeline::ApplicationSource;
use crate::types::{Applicant, PendingApplication, RankingRecord, ScoredApplication};
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

pub struct BackendClient {
    client: reqwest::blocking::Client,
    applications_url: String,
    students_url: String,
    ranking_url: String,
}

impl BackendClient {
    pub fn new(
        applications_url: String,
        students_url: String,
        ranking_url: String,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build backend client")?;

        Ok(BackendClient {
            client,
            applications_url,
            students_url,
            ranking_url,
        })
    }

    pub fn from_env() -> Result<Self> {
        let applications_url =
            std::env::var("APPLICATIONS_URL").context("APPLICATIONS_URL is not set")?;
        let students_url = std::env::var("STUDENTS_URL").context("STUDENTS_URL is not set")?;
        let ranking_url = std::env::var("RANKING_URL").context("RANKING_URL is not set")?;

        Self::new(applications_url, students_url, ranking_url)
    }

    /// All pending applications, or an empty list when the backend is
    /// unreachable.
    pub fn fetch_pending_applications(&self) -> Vec<PendingApplication> {
        match self.try_fetch_applications() {
            Ok(applications) => applications,
            Err(e) => {
                warn!("Failed to fetch applications: {:#}", e);
                vec![]
            }
        }
    }

    fn try_fetch_applications(&self) -> Result<Vec<PendingApplication>> {
        let response = self
            .client
            .get(&self.applications_url)
            .send()
            .context("Application list request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Application list returned {}", response.status()));
        }

        response.json().context("Failed to decode application list")
    }

    /// Applicant record by user id; absent on any failure.
    pub fn fetch_applicant(&self, user_id: &str) -> Option<Applicant> {
        match self.try_fetch_applicant(user_id) {
            Ok(applicant) => Some(applicant),
            Err(e) => {
                warn!("Failed to fetch applicant {}: {:#}", user_id, e);
                None
            }
        }
    }

    fn try_fetch_applicant(&self, user_id: &str) -> Result<Applicant> {
        let url = format!("{}/{}", self.students_url, user_id);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Applicant request failed for {}", user_id))?;

        if !response.status().is_success() {
            return Err(anyhow!("Applicant endpoint returned {}", response.status()));
        }

        response.json().context("Failed to decode applicant record")
    }

    /// Duplicate gate against the ranking store. Store unavailability counts
    /// as "not ranked" so an outage never blocks the batch.
    pub fn already_ranked(&self, application_id: &str) -> bool {
        match self.try_fetch_rankings() {
            Ok(records) => records.iter().any(|record| {
                record.get("applicationId").and_then(Value::as_str) == Some(application_id)
            }),
            Err(e) => {
                warn!("Could not check existing rankings: {:#}", e);
                false
            }
        }
    }

    fn try_fetch_rankings(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(&self.ranking_url)
            .send()
            .context("Ranking list request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Ranking list returned {}", response.status()));
        }

        response.json().context("Failed to decode ranking list")
    }

    /// Push the simplified projection of each ranked application. Failures
    /// are logged per record and never abort the rest.
    pub fn push_rankings(&self, applications: &[ScoredApplication]) {
        for application in applications {
            let record = RankingRecord::from_scored(application);
            match self.try_push(&record) {
                Ok(()) => info!(
                    "Pushed {} | score {} rank {}",
                    record.application_id, record.score, record.rank
                ),
                Err(e) => warn!("Failed to push {}: {:#}", record.application_id, e),
            }
        }
    }

    fn try_push(&self, record: &RankingRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.ranking_url)
            .json(record)
            .send()
            .with_context(|| format!("Push request failed for {}", record.application_id))?;

        if !response.status().is_success() {
            return Err(anyhow!("Ranking store returned {}", response.status()));
        }

        Ok(())
    }
}

impl ApplicationSource for BackendClient {
    fn pending_applications(&self) -> Vec<PendingApplication> {
        self.fetch_pending_applications()
    }

    fn applicant(&self, user_id: &str) -> Option<Applicant> {
        self.fetch_applicant(user_id)
    }

    fn already_ranked(&self, application_id: &str) -> bool {
        self.already_ranked(application_id)
    }
}
