//! Batch Pipeline
//!
//! Sequential run over the pending applications: duplicate gate -> fetch
//! applicant -> document extraction -> hardship scoring -> composite score.
//! Ranking happens once, after the whole batch is scored; a single
//! applicant's failure never aborts the rest.

use crate::extract::{self, DocumentReader};
use crate::hardship::HardshipScorer;
use crate::rank;
use crate::score;
use crate::types::{Applicant, PendingApplication, ScoredApplication};
use tracing::{info, warn};

/// Application backend boundary used by the batch run.
pub trait ApplicationSource {
    fn pending_applications(&self) -> Vec<PendingApplication>;
    fn applicant(&self, user_id: &str) -> Option<Applicant>;
    fn already_ranked(&self, application_id: &str) -> bool;
}

/// Score and rank every pending application. Applications already recorded
/// upstream are skipped before any scoring work happens.
pub fn run_batch(
    source: &dyn ApplicationSource,
    reader: &dyn DocumentReader,
    scorer: &dyn HardshipScorer,
) -> Vec<ScoredApplication> {
    let pending = source.pending_applications();
    info!("Processing {} pending applications", pending.len());

    let mut scored = Vec::new();

    for application in &pending {
        if source.already_ranked(&application.id) {
            info!("Skipping {}: already ranked", application.id);
            continue;
        }

        let applicant = match source.applicant(&application.student_id) {
            Some(applicant) => applicant,
            None => {
                warn!(
                    "Skipping {}: applicant {} not found",
                    application.id, application.student_id
                );
                continue;
            }
        };

        let extracted = extract::extract_values(reader, &applicant);
        let hardship = scorer.score_normalized(applicant.about_me.as_deref());

        scored.push(score::score_application(
            &application.id,
            &application.scholarship_id,
            &applicant,
            extracted,
            hardship,
        ));
    }

    // ranking is a barrier: it runs only after every applicant is scored
    rank::assign_ranks(&mut scored);
    scored
}
