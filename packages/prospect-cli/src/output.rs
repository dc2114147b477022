//! Terminal rendering of command results.

use colored::{ColoredString, Colorize};

use prospecting::{
    BulkDiscoveryReport, Contact, DiscoveryResult, FitScore, IcpStatus, IntegrationProvider,
    QualificationSummary,
};

pub fn status_label(status: IcpStatus) -> ColoredString {
    match status {
        IcpStatus::Verified => status.as_str().bright_green().bold(),
        IcpStatus::Pending => status.as_str().bright_yellow(),
        IcpStatus::Failed => status.as_str().bright_red(),
    }
}

pub fn print_fit(contact: &Contact, fit: &FitScore) {
    println!(
        "{}  {:>3}  {}",
        status_label(fit.status),
        fit.score,
        contact.display_name().bold()
    );
    for signal in &fit.signals {
        println!("      {} {:?} (+{})", "•".dimmed(), signal, signal.points());
    }
    if fit.raw_score != fit.score {
        println!("      {}", format!("raw score {}", fit.raw_score).dimmed());
    }
}

/// One line per contact from the score saved on it.
pub fn print_stored(contact: &Contact) {
    let status = contact.icp_status.unwrap_or(IcpStatus::Pending);
    println!(
        "{}  {:>3}  {}",
        status_label(status),
        contact.fit_score.unwrap_or(0),
        contact.display_name().bold()
    );
}

pub fn print_summary(summary: &QualificationSummary) {
    println!();
    println!(
        "{} contacts scored: {} verified, {} pending, {} failed",
        summary.total.to_string().bold(),
        summary.verified.to_string().bright_green(),
        summary.pending.to_string().bright_yellow(),
        summary.failed.to_string().bright_red(),
    );
}

pub fn print_discovery(report: &BulkDiscoveryReport, contacts: &[Contact]) {
    for entry in &report.results {
        let name = contacts
            .iter()
            .find(|c| c.id == entry.contact_id)
            .map(Contact::display_name)
            .unwrap_or_else(|| entry.contact_id.to_string());
        match &entry.result {
            DiscoveryResult::Found { email, source } => println!(
                "{} {}  {}  {}",
                "✓".bright_green(),
                name.bold(),
                email,
                format!("via {}", source).dimmed()
            ),
            DiscoveryResult::NotFound => {
                println!("{} {}  {}", "·".dimmed(), name, "not found".dimmed())
            }
            DiscoveryResult::Error => println!(
                "{} {}  {}",
                "✗".bright_red(),
                name,
                "no enabled integration".bright_red()
            ),
        }
    }

    println!();
    println!(
        "{} found, {} not found, {} errors, {} skipped (already had an email)",
        report.found.to_string().bright_green().bold(),
        report.not_found,
        report.errors.to_string().bright_red(),
        report.skipped,
    );
    if report.cancelled > 0 {
        println!(
            "{}",
            format!("{} contacts not started (cancelled)", report.cancelled).bright_yellow()
        );
    }
}

pub fn print_provider(position: Option<usize>, provider: &IntegrationProvider, supported: bool) {
    let slot = match position {
        Some(n) => format!("{:>2}.", n).bright_cyan().bold(),
        None => " -".dimmed(),
    };
    let state = if !provider.enabled {
        "disabled".dimmed()
    } else if provider.api_key.is_empty() {
        "missing API key".bright_yellow()
    } else if !supported {
        "no client".bright_red()
    } else {
        "ready".bright_green()
    };
    let cost = provider
        .cost_per_match
        .map(|c| format!("  ${:.2}/match", c))
        .unwrap_or_default();
    println!(
        "{} {} {}  [{}]{}",
        slot,
        provider.name.bold(),
        format!("({}, priority {})", provider.id, provider.priority).dimmed(),
        state,
        cost.dimmed()
    );
}
