//! Hardship Keyword Lexicon
//!
//! Category -> phrase table consumed by the hardship scorer. The table is
//! configuration, not logic: deployments swap in their own
//! `config/hardship_keywords.yaml`, and the built-in table is used when the
//! file is absent.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Lexicon {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub phrases: Vec<String>,
}

impl Lexicon {
    /// Load the lexicon from config/hardship_keywords.yaml under `root`,
    /// falling back to the built-in table when the file does not exist.
    pub fn load(root: &str) -> Result<Lexicon> {
        let path = PathBuf::from(root).join("config/hardship_keywords.yaml");

        if !path.exists() {
            return Ok(Lexicon::builtin());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read lexicon from {:?}", path))?;

        let lexicon: Lexicon = serde_yaml::from_str(&content)
            .with_context(|| "Failed to parse hardship keyword YAML")?;

        Ok(lexicon)
    }

    /// Built-in multilingual default table.
    pub fn builtin() -> Lexicon {
        Lexicon {
            categories: BUILTIN
                .iter()
                .map(|(name, phrases)| Category {
                    name: (*name).to_string(),
                    phrases: phrases.iter().map(|p| (*p).to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// Condensed default table. English, Hindi, and romanized-Hindi phrasings
/// per category; the shipped YAML carries the full set.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "financial",
        &[
            "financial difficulties",
            "low income",
            "can't afford",
            "struggling",
            "poverty",
            "economic hardship",
            "underprivileged",
            "no financial support",
            "not able to pay fees",
            "jobless",
            "गरीबी",
            "आर्थिक समस्या",
            "paisa nahi hai",
        ],
    ),
    (
        "single_parent",
        &[
            "lost father",
            "lost mother",
            "no father",
            "no mother",
            "orphan",
            "single mother",
            "single father",
            "raised by guardian",
            "only one parent alive",
            "अनाथ",
            "mere maa papa nahi hai",
        ],
    ),
    (
        "disability",
        &[
            "disabled",
            "special needs",
            "physically challenged",
            "chronic illness",
            "hearing impaired",
            "visually impaired",
            "wheelchair user",
            "cancer patient",
            "विकलांग",
            "दिव्यांग",
        ],
    ),
    (
        "rural",
        &[
            "village",
            "rural area",
            "no proper school",
            "remote location",
            "tribal region",
            "lack of resources",
            "गाँव",
            "ग्रामीण",
            "sheher se door",
        ],
    ),
    (
        "first_gen",
        &[
            "first in family to study",
            "first-generation learner",
            "first to attend school",
            "no educated family members",
            "पहली पीढ़ी का छात्र",
            "ghar me koi padha likha nahi hai",
        ],
    ),
    (
        "mental_health",
        &[
            "depression",
            "anxiety",
            "mental breakdown",
            "panic attacks",
            "suicidal thoughts",
            "emotional trauma",
            "insomnia",
            "घबराहट होती है",
        ],
    ),
    (
        "social_issues",
        &[
            "discrimination",
            "casteism",
            "bullying",
            "domestic violence",
            "forced marriage",
            "child labor",
            "social boycott",
            "जातिवाद",
        ],
    ),
    (
        "educational_challenges",
        &[
            "no school nearby",
            "lack of books",
            "no internet",
            "dropout risk",
            "forced to work instead of study",
            "school fees too high",
            "पढ़ाई छोड़नी पड़ी",
        ],
    ),
    (
        "violence_and_abuse",
        &[
            "domestic abuse",
            "child abuse",
            "sexual harassment",
            "trafficking victim",
            "physical assault",
            "unsafe home",
            "abusive parents",
            "mentally tortured",
        ],
    ),
];
