//! Composite Scoring Module
//!
//! Combines income, marks, and hardship signals into a single 0-100 score:
//! - income tier (0-30): lower declared income earns more points
//! - marks (0-40): average of 10th and 12th percentages, linearly scaled
//! - hardship (0-30): normalized hardship score, scaled

use crate::types::{Applicant, ExtractedValues, ScoredApplication};

/// Income bracket ladder: (upper bound, points). A value exactly on a bound
/// takes that bracket's points.
const INCOME_TIERS: &[(f64, f64)] = &[
    (100_000.0, 30.0),
    (150_000.0, 25.0),
    (200_000.0, 20.0),
    (250_000.0, 15.0),
    (300_000.0, 10.0),
];

/// Points for incomes above the highest bracket.
const INCOME_FLOOR_POINTS: f64 = 5.0;

/// Income component (0-30). Step function over the bracket ladder; income 0
/// (the extraction sentinel) lands in the lowest-income bracket.
pub fn income_score(income: f64) -> f64 {
    for (limit, points) in INCOME_TIERS {
        if income <= *limit {
            return *points;
        }
    }
    INCOME_FLOOR_POINTS
}

/// Marks component (0-40). Average of the two percentages, linearly scaled.
pub fn marks_score(tenth: f64, twelfth: f64) -> f64 {
    let average = (tenth + twelfth) / 2.0;
    (average / 100.0 * 40.0).clamp(0.0, 40.0)
}

/// Hardship component (0-30). Takes the hardship score already normalized to
/// [0, 1]: scaled onto a 10-point band, then weighted by 3.
pub fn emotion_score(hardship: f64) -> f64 {
    (hardship * 10.0 * 3.0).clamp(0.0, 30.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the scored application from its three inputs. Pure: identical
/// inputs always produce an identical total.
pub fn score_application(
    application_id: &str,
    scholarship_id: &str,
    applicant: &Applicant,
    extracted: ExtractedValues,
    hardship: f64,
) -> ScoredApplication {
    let income_score = income_score(extracted.income_amount);
    let marks_score = marks_score(extracted.tenth_marks, extracted.twelfth_marks);
    let emotion_score = emotion_score(hardship);

    ScoredApplication {
        id: application_id.to_string(),
        application_id: application_id.to_string(),
        scholarship_id: scholarship_id.to_string(),
        user_id: applicant.user_id.clone(),
        name: applicant.full_name.clone(),
        about_me: applicant.about_me.clone(),
        contact_number: applicant.contact_number.clone(),
        income_amount: extracted.income_amount,
        tenth_marks: extracted.tenth_marks,
        twelfth_marks: extracted.twelfth_marks,
        income_score,
        marks_score,
        emotion_score,
        score: round2(income_score + marks_score + emotion_score),
        rank: 0,
    }
}
