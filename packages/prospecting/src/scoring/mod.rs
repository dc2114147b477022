//! ICP fit scoring.
//!
//! An additive point system over two stages:
//!
//! - **Profile stage** (optional strategy profile): text relevance against
//!   the profile's audience/value proposition, decision-maker titles, ideal
//!   company sizes and pain-point keywords.
//! - **ICP stage** (legacy targeting): industry match, title match,
//!   size/revenue presence and data completeness.
//!
//! Scoring is pure and total. Missing fields contribute nothing; there is
//! no error path. If targeting is not configured and the profile stage
//! scores nothing, the contact is left `Pending` with a score of 0.
//!
//! Rule changes that can move an existing contact's score bump
//! [`SCORING_RULES_VERSION`]. Version 2 stopped blank ICP entries and blank
//! ideal company sizes from matching every contact; in version 1 an empty
//! entry was a substring of every field.
//!
//! ```rust
//! use prospecting::{score, Contact, IcpStatus, ProviderIcp};
//!
//! let contact = Contact::new()
//!     .with_title("CTO")
//!     .with_employee_count("50-200")
//!     .with_industry("تقنية");
//! let icp = ProviderIcp::new(["تقنية"], ["CTO"]);
//!
//! let fit = score(&contact, &icp, None);
//! assert_eq!(fit.score, 90);
//! assert_eq!(fit.status, IcpStatus::Verified);
//! ```

pub mod matching;

use crate::types::{
    contact::{non_blank, Contact},
    icp::{ProviderIcp, ProviderStrategyProfile},
    score::{FitScore, ScoreSignal},
};
use matching::{any_contained, contains_folded, lowered, shares_pain_point};

/// Revision of the scoring rules. Stored scores from an older revision may
/// differ from a fresh rescan.
pub const SCORING_RULES_VERSION: u32 = 2;

/// Headcount prefix that marks a micro company (no size bonus).
const MICRO_COMPANY_PREFIX: &str = "1-10";

/// Score a contact against the ICP and an optional strategy profile.
pub fn score(
    contact: &Contact,
    icp: &ProviderIcp,
    profile: Option<&ProviderStrategyProfile>,
) -> FitScore {
    let mut signals = Vec::new();

    if let Some(profile) = profile {
        profile_signals(contact, profile, &mut signals);
    }

    if !icp.is_set && signals.is_empty() {
        return FitScore::unscored();
    }

    icp_signals(contact, icp, &mut signals);
    FitScore::from_signals(signals)
}

/// Profile stage. Every profile signal is worth more than zero points, so
/// "no signals" and "zero profile points" are the same thing.
fn profile_signals(
    contact: &Contact,
    profile: &ProviderStrategyProfile,
    signals: &mut Vec<ScoreSignal>,
) {
    let title = lowered(contact.title.as_deref());

    let target_text = profile.target_text();
    if !target_text.is_empty() {
        if title.as_deref().is_some_and(|t| target_text.contains(t)) {
            signals.push(ScoreSignal::TargetTitle);
        }
        let industry = lowered(contact.industry_ar.as_deref());
        if industry.as_deref().is_some_and(|i| target_text.contains(i)) {
            signals.push(ScoreSignal::TargetIndustry);
        }
    }

    let Some(structured) = &profile.icp_structured else {
        return;
    };

    if let Some(title) = &title {
        if structured
            .decision_makers
            .iter()
            .any(|dm| contains_folded(title, dm))
        {
            signals.push(ScoreSignal::DecisionMaker);
        }
    }

    if let Some(count) = non_blank(contact.employee_count.as_deref()) {
        let ideal = structured
            .company_size_ideal
            .iter()
            .filter(|size| !size.trim().is_empty())
            .any(|size| count == size.as_str() || count.contains(size.as_str()));
        if ideal {
            signals.push(ScoreSignal::IdealCompanySize);
        }
    }

    if let Some(description) = lowered(contact.company_description.as_deref()) {
        if shares_pain_point(&structured.pain_points, &description) {
            signals.push(ScoreSignal::PainPoint);
        }
    }
}

/// Legacy ICP stage.
fn icp_signals(contact: &Contact, icp: &ProviderIcp, signals: &mut Vec<ScoreSignal>) {
    let industry_fields = [
        lowered(contact.industry_ar.as_deref()),
        lowered(contact.industry_2.as_deref()),
        lowered(contact.company_description.as_deref()),
    ];
    if any_contained(&industry_fields, &icp.industries) {
        signals.push(ScoreSignal::IndustryMatch);
    }

    let title_fields = [
        lowered(contact.title.as_deref()),
        lowered(contact.title_description.as_deref()),
    ];
    if any_contained(&title_fields, &icp.titles) {
        signals.push(ScoreSignal::TitleMatch);
    }

    let employee_count = non_blank(contact.employee_count.as_deref());
    let annual_revenue = non_blank(contact.annual_revenue.as_deref());
    if employee_count.is_some() || annual_revenue.is_some() {
        signals.push(ScoreSignal::SizeOrRevenue);
    }
    if employee_count.is_some_and(|count| !count.starts_with(MICRO_COMPANY_PREFIX)) {
        signals.push(ScoreSignal::LargerCompany);
    }

    if contact.has_email() {
        signals.push(ScoreSignal::HasEmail);
    }
    if non_blank(contact.linkedin_url.as_deref()).is_some() {
        signals.push(ScoreSignal::HasLinkedin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::contact::IcpStatus;
    use crate::types::icp::StructuredIcp;
    use proptest::prelude::*;

    fn cto_contact() -> Contact {
        Contact::new()
            .with_title("CTO")
            .with_employee_count("50-200")
            .with_industry("تقنية")
    }

    #[test]
    fn test_reference_scenario_scores_ninety() {
        let icp = ProviderIcp::new(["تقنية"], ["CTO"]);

        let fit = score(&cto_contact(), &icp, None);

        assert_eq!(fit.score, 90);
        assert_eq!(fit.status, IcpStatus::Verified);
        assert_eq!(
            fit.signals,
            vec![
                ScoreSignal::IndustryMatch,
                ScoreSignal::TitleMatch,
                ScoreSignal::SizeOrRevenue,
                ScoreSignal::LargerCompany,
            ]
        );
    }

    #[test]
    fn test_unset_icp_without_profile_is_pending_zero() {
        let contact = cto_contact().with_email("cto@acme.io");

        let fit = score(&contact, &ProviderIcp::unset(), None);

        assert_eq!(fit, FitScore::unscored());
        assert_eq!(fit.status, IcpStatus::Pending);
    }

    #[test]
    fn test_unset_icp_with_silent_profile_is_pending_zero() {
        let profile = ProviderStrategyProfile::new()
            .with_target_audience("hospital administrators")
            .with_structured(StructuredIcp::new().with_decision_makers(["Chief Medical"]));

        let fit = score(&cto_contact(), &ProviderIcp::unset(), Some(&profile));

        assert_eq!(fit, FitScore::unscored());
    }

    #[test]
    fn test_unset_icp_still_runs_icp_stage_when_profile_scores() {
        let profile = ProviderStrategyProfile::new()
            .with_structured(StructuredIcp::new().with_decision_makers(["cto"]));
        let contact = cto_contact().with_email("cto@acme.io");

        let fit = score(&contact, &ProviderIcp::unset(), Some(&profile));

        // 25 decision maker + 10 size + 10 larger company + 5 email
        assert_eq!(fit.score, 50);
        assert_eq!(fit.status, IcpStatus::Pending);
        assert!(!fit.has_signal(ScoreSignal::IndustryMatch));
    }

    #[test]
    fn test_decision_maker_adds_twenty_five() {
        let icp = ProviderIcp::new(["fintech"], Vec::<String>::new());
        let profile = ProviderStrategyProfile::new()
            .with_structured(StructuredIcp::new().with_decision_makers(["Head of"]));

        let buyer = Contact::new().with_title("Head of Operations");
        let other = Contact::new().with_title("Operations Analyst");

        let buyer_fit = score(&buyer, &icp, Some(&profile));
        let other_fit = score(&other, &icp, Some(&profile));

        assert_eq!(buyer_fit.score, other_fit.score + 25);
        assert!(buyer_fit.has_signal(ScoreSignal::DecisionMaker));
    }

    #[test]
    fn test_target_text_bonuses() {
        let profile = ProviderStrategyProfile::new()
            .with_target_audience("Founders and CEOs of logistics companies")
            .with_industries(["Logistics"]);
        let contact = Contact::new().with_title("CEO").with_industry("Logistics");

        let fit = score(&contact, &ProviderIcp::unset(), Some(&profile));

        assert!(fit.has_signal(ScoreSignal::TargetTitle));
        assert!(fit.has_signal(ScoreSignal::TargetIndustry));
        assert_eq!(fit.score, 20);
        assert_eq!(fit.status, IcpStatus::Failed);
    }

    #[test]
    fn test_blank_title_does_not_match_target_text() {
        let profile = ProviderStrategyProfile::new().with_target_audience("anyone at all");
        let contact = Contact::new().with_title("").with_industry("   ");

        let fit = score(&contact, &ProviderIcp::unset(), Some(&profile));

        assert_eq!(fit, FitScore::unscored());
    }

    #[test]
    fn test_company_size_equal_or_contained() {
        let profile = ProviderStrategyProfile::new().with_structured(
            StructuredIcp::new().with_company_sizes(["50-200", "1000"]),
        );
        let icp = ProviderIcp::unset();

        let exact = Contact::new().with_employee_count("50-200");
        assert!(score(&exact, &icp, Some(&profile)).has_signal(ScoreSignal::IdealCompanySize));

        let containing = Contact::new().with_employee_count("1000-5000");
        assert!(score(&containing, &icp, Some(&profile))
            .has_signal(ScoreSignal::IdealCompanySize));

        let neither = Contact::new().with_employee_count("11-50");
        assert!(!score(&neither, &icp, Some(&profile))
            .has_signal(ScoreSignal::IdealCompanySize));
    }

    #[test]
    fn test_pain_point_keyword_in_description() {
        let profile = ProviderStrategyProfile::new().with_structured(
            StructuredIcp::new().with_pain_points(["Manual invoicing", "slow payouts"]),
        );
        let contact =
            Contact::new().with_company_description("Team drowning in INVOICING spreadsheets");

        let fit = score(&contact, &ProviderIcp::unset(), Some(&profile));

        assert_eq!(fit.signals, vec![ScoreSignal::PainPoint]);
        assert_eq!(fit.score, 10);
    }

    #[test]
    fn test_industry_matches_any_industry_field_once() {
        let icp = ProviderIcp::new(["logistics", "shipping"], Vec::<String>::new());
        let contact = Contact::new()
            .with_industry("نقل")
            .with_secondary_industry("Logistics")
            .with_company_description("Shipping containers worldwide");

        let fit = score(&contact, &icp, None);

        assert_eq!(fit.signals, vec![ScoreSignal::IndustryMatch]);
        assert_eq!(fit.score, 40);
        assert_eq!(fit.status, IcpStatus::Pending);
    }

    #[test]
    fn test_title_matches_title_description() {
        let icp = ProviderIcp::new(Vec::<String>::new(), ["procurement"]);
        let contact = Contact::new()
            .with_title("Manager")
            .with_title_description("Owns procurement for the region");

        let fit = score(&contact, &icp, None);

        assert!(fit.has_signal(ScoreSignal::TitleMatch));
    }

    #[test]
    fn test_micro_company_gets_no_size_bonus() {
        let icp = ProviderIcp::new(Vec::<String>::new(), Vec::<String>::new());

        let micro = Contact::new().with_employee_count("1-10");
        assert_eq!(score(&micro, &icp, None).score, 10);

        let revenue_only = Contact::new().with_annual_revenue("$2M");
        assert_eq!(score(&revenue_only, &icp, None).score, 10);

        let larger = Contact::new().with_employee_count("11-50");
        assert_eq!(score(&larger, &icp, None).score, 20);
    }

    #[test]
    fn test_completeness_points() {
        let icp = ProviderIcp::new(Vec::<String>::new(), Vec::<String>::new());
        let contact = Contact::new()
            .with_email("jane@acme.io")
            .with_linkedin_url("https://linkedin.com/in/jane");

        let fit = score(&contact, &icp, None);

        assert_eq!(fit.score, 10);
        assert_eq!(fit.status, IcpStatus::Failed);
    }

    #[test]
    fn test_set_icp_with_empty_lists_scores_only_presence() {
        let icp = ProviderIcp::new(Vec::<String>::new(), Vec::<String>::new());

        let fit = score(&cto_contact(), &icp, None);

        assert_eq!(fit.score, 20);
        assert_eq!(fit.status, IcpStatus::Failed);
    }

    #[test]
    fn test_blank_icp_entries_never_match() {
        let icp = ProviderIcp::new([""], ["  "]);

        let fit = score(&cto_contact(), &icp, None);

        assert!(!fit.has_signal(ScoreSignal::IndustryMatch));
        assert!(!fit.has_signal(ScoreSignal::TitleMatch));
    }

    #[test]
    fn test_blank_company_size_never_matches() {
        let profile = ProviderStrategyProfile::new()
            .with_structured(StructuredIcp::new().with_company_sizes(["", "   "]));
        let contact = Contact::new().with_employee_count("50-200");

        let fit = score(&contact, &ProviderIcp::unset(), Some(&profile));

        assert!(!fit.has_signal(ScoreSignal::IdealCompanySize));
    }

    #[test]
    fn test_score_is_clamped_to_one_hundred() {
        let icp = ProviderIcp::new(["logistics"], ["ceo"]);
        let profile = ProviderStrategyProfile::new()
            .with_target_audience("ceo logistics")
            .with_structured(
                StructuredIcp::new()
                    .with_decision_makers(["CEO"])
                    .with_company_sizes(["200-500"])
                    .with_pain_points(["delayed shipments"]),
            );
        let contact = Contact::new()
            .with_title("CEO")
            .with_industry("Logistics")
            .with_company_description("We keep suffering delayed trucks")
            .with_employee_count("200-500")
            .with_email("ceo@acme.io")
            .with_linkedin_url("https://linkedin.com/in/ceo");

        let fit = score(&contact, &icp, Some(&profile));

        assert_eq!(fit.raw_score, 170);
        assert_eq!(fit.score, 100);
        assert_eq!(fit.status, IcpStatus::Verified);
    }

    #[test]
    fn test_prior_fit_score_is_ignored() {
        let icp = ProviderIcp::new(["تقنية"], ["CTO"]);
        let fresh = cto_contact();
        let mut rescored = fresh.clone();
        rescored.fit_score = Some(12);
        rescored.icp_status = Some(IcpStatus::Failed);

        assert_eq!(score(&fresh, &icp, None), score(&rescored, &icp, None));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let icp = ProviderIcp::new(["تقنية"], ["CTO"]);
        let contact = cto_contact();
        let before = contact.clone();

        let _ = score(&contact, &icp, None);

        assert_eq!(contact, before);
    }

    fn optional_text() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[a-zA-Z0-9 -]{0,16}")
    }

    proptest! {
        #[test]
        fn prop_scoring_is_deterministic_and_bounded(
            title in optional_text(),
            industry in optional_text(),
            description in optional_text(),
            employees in optional_text(),
            email in optional_text(),
            icp_set in any::<bool>(),
            industries in prop::collection::vec("[a-z]{0,6}", 0..3),
            titles in prop::collection::vec("[a-z]{0,6}", 0..3),
            decision_makers in prop::collection::vec("[a-z]{0,6}", 0..3),
        ) {
            let contact = Contact {
                title,
                industry_ar: industry,
                company_description: description,
                employee_count: employees,
                email,
                ..Contact::default()
            };
            let icp = ProviderIcp { is_set: icp_set, industries, titles, ..ProviderIcp::default() };
            let profile = ProviderStrategyProfile::new()
                .with_structured(StructuredIcp::new().with_decision_makers(decision_makers));

            let first = score(&contact, &icp, Some(&profile));
            let second = score(&contact, &icp, Some(&profile));

            prop_assert_eq!(&first, &second);
            prop_assert!(first.score <= 100);
            prop_assert_eq!(first.status, if first.signals.is_empty() && !icp_set {
                IcpStatus::Pending
            } else {
                IcpStatus::from_score(first.raw_score)
            });
        }
    }
}
