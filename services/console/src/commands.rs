use std::io::{self, BufRead, Write};
use std::sync::Arc;

use recruitflow::api::http::HttpGateway;
use recruitflow::api::{RejectionRequest, ValidationRequest};
use recruitflow::config::AppConfig;
use recruitflow::error::AppError;
use recruitflow::telemetry;
use recruitflow::workflows::review::templates::{
    bulk_rejection_body, bulk_validation_body, rejection_body, validation_body, RejectionContext,
    ValidationContext,
};
use recruitflow::workflows::review::{
    Application, ApplicationFilter, ApplicationId, ApplicationStatus, BulkAction, BulkFlow,
    JobOfferId, NotificationCenter, OfferLifecycle, ReviewSession,
};
use tracing::info;

use crate::cli::{BulkArgs, DecideArgs, ListArgs};
use crate::render;

pub(crate) enum BulkKind {
    Validate,
    Reject,
}

struct Runtime {
    config: AppConfig,
    gateway: Arc<HttpGateway>,
}

fn bootstrap() -> Result<Runtime, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        api = %config.api.base_url,
        "configuration loaded"
    );
    let gateway = Arc::new(HttpGateway::from_config(&config.api));
    Ok(Runtime { config, gateway })
}

pub(crate) async fn publish_offer(id: i64) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let lifecycle = OfferLifecycle::new(runtime.gateway);
    let offer = lifecycle.publish_by_id(JobOfferId(id)).await?;
    render::offer(&offer);
    Ok(())
}

pub(crate) async fn close_offer(id: i64) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let lifecycle = OfferLifecycle::new(runtime.gateway);
    let offer = lifecycle.close_by_id(JobOfferId(id)).await?;
    render::offer(&offer);
    Ok(())
}

async fn load_session(
    runtime: &Runtime,
    job_offer: i64,
    filter: ApplicationFilter,
) -> Result<ReviewSession<HttpGateway>, AppError> {
    let mut session = ReviewSession::new(Arc::clone(&runtime.gateway), JobOfferId(job_offer));
    session.set_filter(filter).await?;
    session.refresh().await?;
    Ok(session)
}

pub(crate) async fn list_applications(args: ListArgs) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let session = load_session(
        &runtime,
        args.job_offer,
        ApplicationFilter {
            status: args.status,
            viewed: args.viewed,
            include_archived: args.include_archived,
        },
    )
    .await?;

    render::applications(&session.visible());
    Ok(())
}

fn find_row(session: &ReviewSession<HttpGateway>, id: ApplicationId) -> Option<Application> {
    session
        .applications()
        .iter()
        .find(|row| row.id == id)
        .cloned()
}

pub(crate) async fn validate_application(args: DecideArgs) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let mut session = load_session(
        &runtime,
        args.job_offer,
        ApplicationFilter {
            include_archived: true,
            ..ApplicationFilter::default()
        },
    )
    .await?;

    let id = ApplicationId(args.id);
    let message = match (args.message, find_row(&session, id)) {
        (Some(message), _) => message,
        (None, Some(row)) => validation_body(&ValidationContext {
            recipient: &row.candidate.full_name(),
            job_title: &row.job_offer.title,
            company: &row.job_offer.company,
            interview: args.interview,
        }),
        (None, None) => String::new(),
    };

    let updated = session
        .validate_one(
            id,
            &ValidationRequest {
                message,
                interview_date: args.interview,
            },
        )
        .await?;
    println!(
        "Application {} -> {}",
        updated.id,
        updated.status.label()
    );
    Ok(())
}

pub(crate) async fn reject_application(args: DecideArgs) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let mut session = load_session(
        &runtime,
        args.job_offer,
        ApplicationFilter {
            include_archived: true,
            ..ApplicationFilter::default()
        },
    )
    .await?;

    let id = ApplicationId(args.id);
    let message = match (args.message, find_row(&session, id)) {
        (Some(message), _) => message,
        (None, Some(row)) => rejection_body(&RejectionContext {
            recipient: &row.candidate.full_name(),
            job_title: &row.job_offer.title,
            ai_score: row.ai_score,
            ai_analysis: row.ai_analysis.as_deref(),
        }),
        (None, None) => String::new(),
    };

    let updated = session
        .reject_one(id, &RejectionRequest { message })
        .await?;
    println!(
        "Application {} -> {}",
        updated.id,
        updated.status.label()
    );
    Ok(())
}

pub(crate) async fn bulk_decide(args: BulkArgs, kind: BulkKind) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let mut session = load_session(
        &runtime,
        args.job_offer,
        ApplicationFilter {
            status: Some(ApplicationStatus::Pending),
            ..ApplicationFilter::default()
        },
    )
    .await?;

    if args.ids.is_empty() {
        session.toggle_all();
    } else {
        for id in &args.ids {
            if !session.toggle(ApplicationId(*id)) {
                println!("Skipping {id}: not a pending application of this offer");
            }
        }
    }

    if session.selection().is_empty() {
        println!("Nothing to do: no pending applications selected.");
        return Ok(());
    }

    let (job_title, company) = session
        .applications()
        .first()
        .map(|row| (row.job_offer.title.clone(), row.job_offer.company.clone()))
        .unwrap_or_default();

    let (action, message) = match &kind {
        BulkKind::Validate => (
            BulkAction::Validate {
                interview: args.interview,
            },
            args.message
                .unwrap_or_else(|| bulk_validation_body(&job_title, &company, args.interview)),
        ),
        BulkKind::Reject => (
            BulkAction::Reject,
            args.message
                .unwrap_or_else(|| bulk_rejection_body(&job_title)),
        ),
    };
    let action_label = action.label();

    let mut flow = BulkFlow::default();
    flow.request(action, message);

    if !args.yes && !confirm(&format!(
        "Apply the bulk {} to {} application(s)?",
        action_label,
        session.selection().len()
    ))? {
        flow.cancel();
        println!("Cancelled.");
        return Ok(());
    }

    let (action, message) = flow
        .take_confirmed()
        .expect("confirmed batch present after request");
    let report = session.execute_bulk(&action, &message).await?;
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "bulk decision settled"
    );
    flow.settle(report);

    if let Some(report) = flow.acknowledge() {
        render::bulk_report(&report);
    }
    render::applications(&session.visible());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    print!("{prompt} [o/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "o" || answer == "oui" || answer == "y" || answer == "yes")
}

fn notification_center(runtime: &Runtime) -> Arc<NotificationCenter<HttpGateway>> {
    Arc::new(NotificationCenter::new(
        Arc::clone(&runtime.gateway),
        runtime.config.notifications.clone(),
    ))
}

pub(crate) async fn show_notifications() -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let center = notification_center(&runtime);
    let summary = center.load().await?;
    render::notification_summary(&summary);
    Ok(())
}

pub(crate) async fn watch_notifications(interval: Option<u64>) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let period = interval
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| runtime.config.notifications.poll_interval());
    let center = notification_center(&runtime);

    let handle = center.start_polling(period);
    let mut updates = handle.subscribe();
    println!("Watching notifications every {}s (Ctrl-C to stop)", period.as_secs());

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let summary = updates.borrow_and_update().clone();
                render::notification_summary(&summary);
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}

pub(crate) async fn mark_all_notifications_read() -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let center = notification_center(&runtime);
    let summary = center.mark_all_read().await?;
    println!("All notifications marked as read.");
    render::notification_summary(&summary);
    Ok(())
}

pub(crate) async fn mark_offer_notifications_read(id: i64) -> Result<(), AppError> {
    let runtime = bootstrap()?;
    let center = notification_center(&runtime);
    let summary = center.mark_job_offer_read(JobOfferId(id)).await?;
    println!("Notifications for offer {id} marked as read.");
    render::notification_summary(&summary);
    Ok(())
}
