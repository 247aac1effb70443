use serde::{Serialize, Serializer};
use std::fmt;

/// Ideological leaning derived from a score in [-100, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leaning {
    VeryProgressive,
    Progressive,
    Moderate,
    Conservative,
    VeryConservative,
}

impl Leaning {
    /// Classify a score. Thresholds are inclusive upper bounds, checked in order.
    pub fn from_score(score: i32) -> Self {
        if score <= -70 {
            Leaning::VeryProgressive
        } else if score <= -30 {
            Leaning::Progressive
        } else if score <= 29 {
            Leaning::Moderate
        } else if score <= 69 {
            Leaning::Conservative
        } else {
            Leaning::VeryConservative
        }
    }

    pub fn korean(&self) -> &'static str {
        match self {
            Leaning::VeryProgressive => "매우 진보",
            Leaning::Progressive => "진보",
            Leaning::Moderate => "중도",
            Leaning::Conservative => "보수",
            Leaning::VeryConservative => "매우 보수",
        }
    }
}

impl fmt::Display for Leaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.korean())
    }
}

impl Serialize for Leaning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.korean())
    }
}

/// Overall label: either a leaning or the even 2/2 split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverallLabel {
    Leaning(Leaning),
    Mixed,
}

impl OverallLabel {
    pub fn korean(&self) -> &'static str {
        match self {
            OverallLabel::Leaning(l) => l.korean(),
            OverallLabel::Mixed => "혼합형",
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, OverallLabel::Mixed)
    }
}

impl fmt::Display for OverallLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.korean())
    }
}

impl Serialize for OverallLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.korean())
    }
}
