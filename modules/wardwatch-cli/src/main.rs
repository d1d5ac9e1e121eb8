//! wardwatch CLI — a stand-in presentation layer that drives the citizen
//! and moderation desks against one local store. All business rules live in
//! the desks; this binary only parses arguments and renders results.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use wardwatch_citizen::{CitizenDesk, FlagOutcome, IssueFilter, NewIssue};
use wardwatch_common::{Config, GeoPoint, Issue, IssueCategory, IssueStatus, ReporterKind};
use wardwatch_moderation::{report_rows, ModerationDesk};
use wardwatch_store::IssueStore;

#[derive(Parser)]
#[command(name = "wardwatch")]
#[command(about = "Civic issue reporting over a local ledger")]
#[command(version)]
struct Cli {
    /// Viewer latitude, for geofenced listing and status changes
    #[arg(long, global = true)]
    lat: Option<f64>,

    /// Viewer longitude
    #[arg(long, global = true)]
    lng: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new issue report
    Report {
        /// Category label (pothole, garbage, streetlight, ...)
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,

        /// Free-text location label
        #[arg(long)]
        location: Option<String>,

        /// Map-pin latitude
        #[arg(long)]
        pin_lat: Option<f64>,

        /// Map-pin longitude
        #[arg(long)]
        pin_lng: Option<f64>,

        /// Report as a verified user instead of anonymously
        #[arg(long)]
        username: Option<String>,

        /// Attached image reference
        #[arg(long)]
        image: Option<String>,

        /// Attached video reference
        #[arg(long)]
        video: Option<String>,
    },

    /// List issues visible to this viewer
    List {
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Display radius in km (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Advance an issue's status (gated to your neighborhood zone)
    Status { id: Uuid, status: String },

    /// Flag an issue for community moderation
    Flag { id: Uuid },

    /// Show the flagged-issues review queue (admin)
    Queue,

    /// Approve a flagged issue and restore it (admin)
    Approve { id: Uuid },

    /// Hide an issue from all public views (admin)
    Delete { id: Uuid },

    /// Ban a username (admin)
    Ban { username: String },

    /// Set an issue's status with no geofence (admin)
    SetStatus { id: Uuid, status: String },

    /// Show the dashboard rollup (admin)
    Analytics,

    /// Print the full ledger as CSV
    Export,

    /// Watch for store changes from other views and re-render
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let store = IssueStore::open(&config.data_dir)?;
    let citizen = CitizenDesk::new(store.clone());
    let moderation = ModerationDesk::new(store.clone());
    let viewer = viewer_position(cli.lat, cli.lng)?;

    match cli.command {
        Commands::Report {
            category,
            description,
            location,
            pin_lat,
            pin_lng,
            username,
            image,
            video,
        } => {
            let reporter = if username.is_some() {
                ReporterKind::Verified
            } else {
                ReporterKind::Anonymous
            };
            let draft = NewIssue::builder()
                .category(IssueCategory::from_str_loose(&category))
                .description(description)
                .location(location)
                .position(viewer_position(pin_lat, pin_lng)?)
                .reporter(reporter)
                .username(username)
                .image_url(image)
                .video_url(video)
                .build();

            let issue = citizen.submit(draft)?;
            println!("Reported {} ({})", issue.id, issue.category);
        }

        Commands::List {
            status,
            category,
            radius,
        } => {
            let filter = IssueFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                category: category.as_deref().map(IssueCategory::from_str_loose),
                max_distance_km: Some(radius.unwrap_or(config.filter_radius_km)),
            };
            render_issues(&citizen.visible_issues(&filter, viewer));
        }

        Commands::Status { id, status } => {
            let issue = citizen.advance_status(id, parse_status(&status)?, viewer)?;
            println!("Status of {} is now {}", issue.id, issue.status);
        }

        Commands::Flag { id } => match citizen.flag(id)? {
            FlagOutcome::Recorded { flags } => {
                println!("Report flagged ({flags}). More flags will hide it.");
            }
            FlagOutcome::HiddenPendingReview => {
                println!("This report has been hidden pending review.");
            }
        },

        Commands::Queue => render_issues(&moderation.review_queue()),

        Commands::Approve { id } => {
            moderation.approve(id)?;
            println!("Issue approved and restored.");
        }

        Commands::Delete { id } => {
            moderation.delete(id)?;
            println!("Issue deleted.");
        }

        Commands::Ban { username } => {
            moderation.ban_user(&username)?;
            println!("User '{username}' banned.");
        }

        Commands::SetStatus { id, status } => {
            let issue = moderation.set_status(id, parse_status(&status)?)?;
            println!("Status of {} is now {}", issue.id, issue.status);
        }

        Commands::Analytics => {
            let summary = moderation.analytics();
            println!("Total issues:    {}", summary.total);
            println!("Top category:    {}", summary.top_category_label());
            println!("Verified:        {}", summary.verified);
            println!("Anonymous:       {}", summary.anonymous);
        }

        Commands::Export => {
            println!("Type,Location,Description,Status,Date,Reporter,Latitude,Longitude,Flags");
            for row in report_rows(&moderation.all_issues()) {
                println!(
                    "{},{},{},{},{},{},{},{},{}",
                    csv_field(&row.category),
                    csv_field(&row.location),
                    csv_field(&row.description),
                    csv_field(&row.status),
                    csv_field(&row.date),
                    csv_field(&row.reporter),
                    row.latitude.map(|v| v.to_string()).unwrap_or_default(),
                    row.longitude.map(|v| v.to_string()).unwrap_or_default(),
                    row.flags,
                );
            }
        }

        Commands::Watch => {
            let mut rx = store.subscribe();
            println!("Watching for changes (ctrl-c to stop)");
            loop {
                match rx.recv().await {
                    Ok(key) => {
                        info!(key = %key, "Store changed");
                        render_issues(&citizen.visible_issues(
                            &IssueFilter {
                                max_distance_km: Some(config.filter_radius_km),
                                ..Default::default()
                            },
                            viewer,
                        ));
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(())
}

fn viewer_position(lat: Option<f64>, lng: Option<f64>) -> Result<Option<GeoPoint>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(GeoPoint { lat, lng })),
        (None, None) => Ok(None),
        _ => Err(anyhow!("latitude and longitude must be given together")),
    }
}

fn parse_status(s: &str) -> Result<IssueStatus> {
    IssueStatus::from_str_loose(s)
        .ok_or_else(|| anyhow!("unknown status '{s}' (expected open, in-progress, or resolved)"))
}

fn render_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("No issues to show.");
        return;
    }
    for issue in issues {
        let location = issue.location.as_deref().unwrap_or("no location");
        println!(
            "{}  [{}] {} - {} ({}, flags: {})",
            issue.id, issue.status, issue.category, issue.description, location, issue.flags
        );
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
