use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Response body of `POST /api/upload-resume`.
/// Every section is optional; an absent section is simply not displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub core_skills: Option<Vec<String>>,
    #[serde(default)]
    pub soft_skills: Option<Vec<String>>,
    #[serde(default)]
    pub work_experience: Option<Vec<WorkExperience>>,
    #[serde(default)]
    pub education: Option<Vec<Education>>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    /// Overall quality score on a 0–10 scale.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvement_areas: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upskill_suggestions: Vec<String>,
}
