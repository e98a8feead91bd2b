mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use hourglow::config::StoreConfig;
use hourglow::store::HttpStore;
use hourglow::view::{ProjectForm, Session, VisitForm};

#[derive(Parser)]
#[command(name = "dashboard", about = "Consulting projects and commercial visits")]
struct Opts {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print totals, projects and visits
    Show,
    /// Create a project
    AddProject(ProjectArgs),
    /// Replace the editable fields of a project
    EditProject {
        id: Uuid,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Add worked hours to a project
    LogHours { id: Uuid, hours: String },
    /// Mark a project as completed
    Finish { id: Uuid },
    /// Hide a project
    DeleteProject { id: Uuid },
    /// Append an observation to a project
    Observe { id: Uuid, text: String },
    /// Log a commercial visit
    AddVisit(VisitArgs),
    /// Replace the editable fields of a visit
    EditVisit {
        id: Uuid,
        #[command(flatten)]
        fields: VisitArgs,
    },
    /// Flip the finished flag of a visit
    ToggleVisit { id: Uuid },
    /// Deactivate a visit
    DeleteVisit { id: Uuid },
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    client: String,
    #[arg(long, default_value = "")]
    consultant: String,
    #[arg(long, default_value = "")]
    pm: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    opportunity_number: String,
    #[arg(long, default_value = "")]
    opportunity_value: String,
    #[arg(long)]
    planned_hours: String,
    #[arg(long)]
    rate: String,
    /// YYYY-MM-DD
    #[arg(long)]
    start: String,
    /// YYYY-MM-DD
    #[arg(long)]
    end: String,
}

#[derive(Args)]
struct VisitArgs {
    #[arg(long)]
    product: String,
    #[arg(long, default_value = "")]
    client: String,
    #[arg(long, default_value = "")]
    opportunity_number: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    consultant: String,
    #[arg(long)]
    hours: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    #[arg(long)]
    value: String,
}

impl From<ProjectArgs> for ProjectForm {
    fn from(args: ProjectArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            client_name: args.client,
            consultant: args.consultant,
            pm: args.pm,
            country: args.country,
            opportunity_number: args.opportunity_number,
            opportunity_value: args.opportunity_value,
            planned_hours: args.planned_hours,
            hourly_rate: args.rate,
            start_date: args.start,
            end_date: args.end,
        }
    }
}

impl From<VisitArgs> for VisitForm {
    fn from(args: VisitArgs) -> Self {
        Self {
            product: args.product,
            client_name: args.client,
            opportunity_number: args.opportunity_number,
            country: args.country,
            consultant: args.consultant,
            hours: args.hours,
            date: args.date,
            opportunity_value: args.value,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let config = StoreConfig::from_env();

    let store = Arc::new(HttpStore::new(config.api_url.clone()));
    let mut session = Session::load(store.clone(), store).await;

    match opts.command.unwrap_or(Command::Show) {
        Command::Show => {}
        Command::AddProject(args) => {
            let id = session
                .create_project(&args.into())
                .await
                .context("Failed to create project")?;
            println!("Created project {}", id);
        }
        Command::EditProject { id, fields } => {
            session
                .update_project(id, &fields.into())
                .await
                .context("Failed to update project")?;
        }
        Command::LogHours { id, hours } => {
            session
                .log_hours(id, &hours)
                .await
                .context("Failed to log hours")?;
        }
        Command::Finish { id } => {
            session
                .finish_project(id)
                .await
                .context("Failed to finish project")?;
        }
        Command::DeleteProject { id } => {
            session
                .delete_project(id)
                .await
                .context("Failed to delete project")?;
        }
        Command::Observe { id, text } => {
            session
                .add_observation(id, &text)
                .await
                .context("Failed to add observation")?;
        }
        Command::AddVisit(args) => {
            let id = session
                .create_visit(&args.into())
                .await
                .context("Failed to create visit")?;
            println!("Created visit {}", id);
        }
        Command::EditVisit { id, fields } => {
            session
                .update_visit(id, &fields.into())
                .await
                .context("Failed to update visit")?;
        }
        Command::ToggleVisit { id } => {
            session
                .toggle_visit_finished(id)
                .await
                .context("Failed to toggle visit")?;
        }
        Command::DeleteVisit { id } => {
            session
                .delete_visit(id)
                .await
                .context("Failed to delete visit")?;
        }
    }

    print!(
        "{}",
        render::render_dashboard(session.state(), time::OffsetDateTime::now_utc())
    );
    Ok(())
}
