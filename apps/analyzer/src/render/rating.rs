use colored::{Color, ColoredString, Colorize};

pub const MISSING: &str = "-";

/// Color band for a 0–10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// >= 8
    Excellent,
    /// >= 6
    Good,
    /// >= 4
    Fair,
    Poor,
}

impl RatingTier {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 8.0 {
            RatingTier::Excellent
        } else if rating >= 6.0 {
            RatingTier::Good
        } else if rating >= 4.0 {
            RatingTier::Fair
        } else {
            RatingTier::Poor
        }
    }

    pub fn color(self) -> Color {
        match self {
            RatingTier::Excellent => Color::Green,
            RatingTier::Good => Color::Blue,
            RatingTier::Fair => Color::Yellow,
            RatingTier::Poor => Color::Red,
        }
    }
}

/// `None` for an absent or non-finite rating.
pub fn rating_tier(rating: Option<f64>) -> Option<RatingTier> {
    rating.filter(|r| r.is_finite()).map(RatingTier::for_rating)
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating.filter(|r| r.is_finite()) {
        Some(r) => format!("{r:.1} / 10"),
        None => MISSING.to_string(),
    }
}

pub fn paint_rating(rating: Option<f64>) -> ColoredString {
    let text = format_rating(rating);
    match rating_tier(rating) {
        Some(tier) => text.color(tier.color()).bold(),
        None => text.dimmed(),
    }
}
