//! Fit-score results.

use serde::{Deserialize, Serialize};

use crate::types::contact::IcpStatus;

/// Upper bound of the reported score.
pub const MAX_SCORE: u32 = 100;

/// A single rule that contributed points to a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSignal {
    /// Title appears in the profile's target text.
    TargetTitle,
    /// Primary industry appears in the profile's target text.
    TargetIndustry,
    /// Title contains a profile decision-maker pattern.
    DecisionMaker,
    /// Headcount matches an ideal company size.
    IdealCompanySize,
    /// Company description mentions a pain-point keyword.
    PainPoint,
    /// Industry fields contain an ICP industry.
    IndustryMatch,
    /// Title fields contain an ICP title.
    TitleMatch,
    /// Headcount or revenue is known.
    SizeOrRevenue,
    /// Headcount is known and not in the 1-10 band.
    LargerCompany,
    HasEmail,
    HasLinkedin,
}

impl ScoreSignal {
    pub fn points(&self) -> u32 {
        match self {
            ScoreSignal::TargetTitle => 10,
            ScoreSignal::TargetIndustry => 10,
            ScoreSignal::DecisionMaker => 25,
            ScoreSignal::IdealCompanySize => 15,
            ScoreSignal::PainPoint => 10,
            ScoreSignal::IndustryMatch => 40,
            ScoreSignal::TitleMatch => 30,
            ScoreSignal::SizeOrRevenue => 10,
            ScoreSignal::LargerCompany => 10,
            ScoreSignal::HasEmail => 5,
            ScoreSignal::HasLinkedin => 5,
        }
    }
}

/// Result of scoring one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitScore {
    /// Score reported to callers, clamped to 0..=100.
    pub score: u32,

    /// Unclamped sum of all contributions.
    pub raw_score: u32,

    pub status: IcpStatus,

    /// Rules that fired, in evaluation order.
    pub signals: Vec<ScoreSignal>,
}

impl FitScore {
    /// Nothing to score against.
    pub fn unscored() -> Self {
        Self {
            score: 0,
            raw_score: 0,
            status: IcpStatus::Pending,
            signals: Vec::new(),
        }
    }

    /// Sum the signals and derive the status from the raw total.
    pub fn from_signals(signals: Vec<ScoreSignal>) -> Self {
        let raw_score: u32 = signals.iter().map(ScoreSignal::points).sum();
        Self {
            score: raw_score.min(MAX_SCORE),
            raw_score,
            status: IcpStatus::from_score(raw_score),
            signals,
        }
    }

    pub fn has_signal(&self, signal: ScoreSignal) -> bool {
        self.signals.contains(&signal)
    }
}
