use colored::Color;

use super::rating::{format_rating, rating_tier, MISSING};
use super::Section;
use crate::models::AnalysisResult;

/// Builds the visible sections for an analysis. A section whose field is
/// absent, empty, or blank is left out entirely.
pub fn analysis_sections(result: &AnalysisResult) -> Vec<Section> {
    let mut sections = Vec::new();

    if let Some(info) = &result.personal_info {
        let field = |label: &str, value: &Option<String>| {
            format!("{label}: {}", non_blank(value.as_deref()).unwrap_or(MISSING))
        };
        sections.push(Section::new(
            "Personal Information",
            vec![
                field("Name", &info.name),
                field("Email", &info.email),
                field("Phone", &info.phone),
                field("Location", &info.location),
            ],
        ));
    }

    if let Some(ai) = &result.ai_analysis {
        let mut section = Section::new(
            "AI Rating",
            vec![format!("Overall resume quality score: {}", format_rating(ai.rating))],
        );
        section.accent = rating_tier(ai.rating).map(|t| t.color());
        sections.push(section);
    }

    if let Some(summary) = non_blank(result.professional_summary.as_deref()) {
        sections.push(Section::new("Professional Summary", vec![summary.to_string()]));
    }

    if let Some(skills) = non_empty(&result.core_skills) {
        sections.push(Section::new("Core Skills", vec![skills.join(" · ")]).with_accent(Color::Blue));
    }

    if let Some(skills) = non_empty(&result.soft_skills) {
        sections.push(Section::new("Soft Skills", vec![skills.join(" · ")]).with_accent(Color::Green));
    }

    if let Some(jobs) = non_empty(&result.work_experience) {
        let mut lines = Vec::new();
        for job in jobs {
            lines.push(job.position.clone());
            lines.push(format!("  {}", job.company));
            lines.push(format!("  {}", job.duration));
            lines.extend(job.responsibilities.iter().map(|r| format!("  • {r}")));
        }
        sections.push(Section::new("Work Experience", lines));
    }

    if let Some(schools) = non_empty(&result.education) {
        let mut lines = Vec::new();
        for edu in schools {
            lines.push(edu.degree.clone());
            lines.push(format!("  {}", edu.institution));
            lines.push(format!("  {}", edu.year));
            if let Some(details) = non_blank(edu.details.as_deref()) {
                lines.push(format!("  {details}"));
            }
        }
        sections.push(Section::new("Education", lines));
    }

    if let Some(certs) = non_empty(&result.certifications) {
        sections.push(Section::new("Certifications", bullets(certs)));
    }

    if let Some(ai) = &result.ai_analysis {
        if !ai.improvement_areas.is_empty() {
            sections.push(
                Section::new("Improvement Areas", bullets(&ai.improvement_areas))
                    .with_accent(Color::BrightRed),
            );
        }
        if !ai.upskill_suggestions.is_empty() {
            sections.push(
                Section::new("Upskill Suggestions", bullets(&ai.upskill_suggestions))
                    .with_accent(Color::Magenta),
            );
        }
    }

    sections
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    analysis_sections(result)
        .iter()
        .map(Section::paint)
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|v| !v.is_empty())
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.trim().is_empty())
}

fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|i| format!("• {i}")).collect()
}
