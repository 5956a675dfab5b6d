pub mod analysis;
pub mod resume;

pub use analysis::{AiAnalysis, AnalysisResult, Education, PersonalInfo, WorkExperience};
pub use resume::ResumeRecord;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
