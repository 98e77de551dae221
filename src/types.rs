use serde::{Deserialize, Serialize};

/// Pending application reference returned by the backend list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PendingApplication {
    pub id: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "scholarshipId")]
    pub scholarship_id: String,
}

/// Applicant record owned by the acquisition layer. Document fields hold
/// URLs to the uploaded certificates; any of them may be absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Applicant {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "aboutMe", default)]
    pub about_me: Option<String>,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: Option<String>,
    #[serde(rename = "tenthResult", default)]
    pub tenth_result: Option<String>,
    #[serde(rename = "twelfthResult", default)]
    pub twelfth_result: Option<String>,
    #[serde(rename = "incomeCert", default)]
    pub income_cert: Option<String>,
}

/// Numeric values pulled out of the three documents. Zero means "could not
/// extract", not a measured zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtractedValues {
    #[serde(rename = "tenthMarks")]
    pub tenth_marks: f64,
    #[serde(rename = "twelfthMarks")]
    pub twelfth_marks: f64,
    #[serde(rename = "incomeAmount")]
    pub income_amount: f64,
}

/// Fully scored application. `rank` stays 0 until the ranking pass assigns
/// it and is not touched again afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoredApplication {
    pub id: String,
    #[serde(rename = "applicationId")]
    pub application_id: String,
    #[serde(rename = "scholarshipId")]
    pub scholarship_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "aboutMe", default)]
    pub about_me: Option<String>,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: Option<String>,
    #[serde(rename = "incomeAmount")]
    pub income_amount: f64,
    #[serde(rename = "tenthMarks")]
    pub tenth_marks: f64,
    #[serde(rename = "twelfthMarks")]
    pub twelfth_marks: f64,
    #[serde(rename = "incomeScore")]
    pub income_score: f64,
    #[serde(rename = "marksScore")]
    pub marks_score: f64,
    #[serde(rename = "emotionScore")]
    pub emotion_score: f64,
    pub score: f64,
    #[serde(default)]
    pub rank: u32,
}

/// Simplified projection pushed to the ranking store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingRecord {
    #[serde(rename = "applicationId")]
    pub application_id: String,
    #[serde(rename = "scholarshipId")]
    pub scholarship_id: String,
    pub score: f64,
    pub rank: u32,
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl RankingRecord {
    pub fn from_scored(application: &ScoredApplication) -> Self {
        RankingRecord {
            application_id: application.application_id.clone(),
            scholarship_id: application.scholarship_id.clone(),
            score: application.score,
            rank: application.rank,
            student_id: application.user_id.clone(),
            name: application.name.clone(),
            created_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}
