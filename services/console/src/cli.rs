use chrono::{NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use recruitflow::error::AppError;
use recruitflow::workflows::review::ApplicationStatus;

use crate::commands;

#[derive(Parser, Debug)]
#[command(
    name = "RecruitFlow Console",
    about = "Review applications, manage job offers, and watch notifications from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish or close job offers
    Offers {
        #[command(subcommand)]
        command: OfferCommand,
    },
    /// List and decide applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommand,
    },
    /// Inspect and settle the unread notification feed
    Notifications {
        #[command(subcommand)]
        command: NotificationCommand,
    },
}

#[derive(Subcommand, Debug)]
enum OfferCommand {
    /// Publish a draft job offer
    Publish {
        /// Job offer identifier
        id: i64,
    },
    /// Close a published job offer
    Close {
        /// Job offer identifier
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum ApplicationCommand {
    /// List the applications received for a job offer
    List(ListArgs),
    /// Validate a single application
    Validate(DecideArgs),
    /// Reject a single application
    Reject(DecideArgs),
    /// Validate every listed pending application in one batch
    BulkValidate(BulkArgs),
    /// Reject every listed pending application in one batch
    BulkReject(BulkArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Job offer identifier
    pub(crate) job_offer: i64,
    /// Keep only rows with this status (PENDING, VALIDATED, AMBIGUOUS, REJECTED)
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<ApplicationStatus>,
    /// Keep only viewed (true) or unviewed (false) rows
    #[arg(long)]
    pub(crate) viewed: Option<bool>,
    /// Fetch the superset including archived rows
    #[arg(long)]
    pub(crate) include_archived: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Application identifier
    pub(crate) id: i64,
    /// Job offer the application belongs to
    #[arg(long)]
    pub(crate) job_offer: i64,
    /// Override the generated message body
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Interview slot for validations (YYYY-MM-DD HH:MM or YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) interview: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub(crate) struct BulkArgs {
    /// Job offer identifier
    pub(crate) job_offer: i64,
    /// Applications to decide; defaults to every pending row when omitted
    #[arg(long, value_delimiter = ',')]
    pub(crate) ids: Vec<i64>,
    /// Override the generated message body
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Interview slot for validations (YYYY-MM-DD HH:MM or YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = parse_datetime)]
    pub(crate) interview: Option<NaiveDateTime>,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub(crate) yes: bool,
}

#[derive(Subcommand, Debug)]
enum NotificationCommand {
    /// Print the grouped unread feed once
    Show,
    /// Poll the feed until interrupted
    Watch {
        /// Seconds between polls (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Mark every notification as read
    MarkAllRead,
    /// Mark one job offer's notifications as read
    MarkRead {
        /// Job offer identifier
        id: i64,
    },
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    let status = ApplicationStatus::from(raw.trim().to_ascii_uppercase());
    match status {
        ApplicationStatus::Unknown(value) => Err(format!("unknown status '{value}'")),
        known => Ok(known),
    }
}

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|err| format!("failed to parse '{raw}' as a date/time ({err})"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Offers {
            command: OfferCommand::Publish { id },
        } => commands::publish_offer(id).await,
        Command::Offers {
            command: OfferCommand::Close { id },
        } => commands::close_offer(id).await,
        Command::Applications { command } => match command {
            ApplicationCommand::List(args) => commands::list_applications(args).await,
            ApplicationCommand::Validate(args) => commands::validate_application(args).await,
            ApplicationCommand::Reject(args) => commands::reject_application(args).await,
            ApplicationCommand::BulkValidate(args) => {
                commands::bulk_decide(args, commands::BulkKind::Validate).await
            }
            ApplicationCommand::BulkReject(args) => {
                commands::bulk_decide(args, commands::BulkKind::Reject).await
            }
        },
        Command::Notifications { command } => match command {
            NotificationCommand::Show => commands::show_notifications().await,
            NotificationCommand::Watch { interval } => commands::watch_notifications(interval).await,
            NotificationCommand::MarkAllRead => commands::mark_all_notifications_read().await,
            NotificationCommand::MarkRead { id } => commands::mark_offer_notifications_read(id).await,
        },
    }
}
