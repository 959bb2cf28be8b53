use recruitflow::workflows::review::{
    Application, BulkReport, JobOffer, NotificationSummary, NotificationTarget,
};

pub(crate) fn offer(offer: &JobOffer) {
    println!(
        "Offer {} | {} @ {} | {}",
        offer.id,
        offer.title,
        offer.company,
        offer.status.label()
    );
    if let Some(url) = &offer.application_url {
        println!("  application URL: {url}");
    }
    if let Some(deadline) = offer.application_deadline {
        println!("  deadline: {}", deadline.format("%d/%m/%Y"));
    }
}

pub(crate) fn applications(rows: &[&Application]) {
    if rows.is_empty() {
        println!("No applications match the current filter.");
        return;
    }

    println!(
        "{:>6}  {:<24}  {:<12}  {:>6}  {:<8}  {}",
        "ID", "Candidate", "Status", "Score", "Viewed", "Received"
    );
    for row in rows {
        let score = row
            .ai_score
            .map(|score| format!("{score}/20"))
            .unwrap_or_else(|| "-".to_string());
        let mut status = row.status.label().to_string();
        if row.archived {
            status.push_str(" (archivée)");
        }
        println!(
            "{:>6}  {:<24}  {:<12}  {:>6}  {:<8}  {}",
            row.id.0,
            row.candidate.full_name(),
            status,
            score,
            if row.viewed_by_recruiter { "oui" } else { "non" },
            row.received_at.format("%d/%m/%Y %H:%M")
        );
    }
    println!("{} application(s)", rows.len());
}

pub(crate) fn bulk_report(report: &BulkReport) {
    if report.is_success() {
        println!("Bulk action settled: {} succeeded.", report.succeeded());
        return;
    }

    println!(
        "Bulk action settled with failures: {} succeeded, {} failed.",
        report.succeeded(),
        report.failed()
    );
    for (id, error) in report.failures() {
        println!("  application {id}: {error}");
    }
    println!("The listing below reflects the decisions that were applied.");
}

pub(crate) fn notification_summary(summary: &NotificationSummary) {
    if summary.is_empty() {
        println!("No unread notifications.");
        return;
    }

    println!("{} unread notification(s):", summary.total());
    for aggregate in &summary.aggregates {
        let target = match aggregate.resolve_link() {
            NotificationTarget::Application(id) => format!("application {id}"),
            NotificationTarget::JobOfferApplications(id) => {
                format!("applications of offer {id}")
            }
        };
        println!(
            "  {:<32} {:>3} new  -> {}",
            aggregate.job_offer_title, aggregate.count, target
        );
    }
}
