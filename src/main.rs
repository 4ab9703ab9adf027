use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use project_init::config::WizardConfig;
use project_init::models::{CreateProjectInput, WizardStep};
use project_init::notify::{Notifier, TracingNotifier};
use project_init::progress::{StepProgress, PHASES};
use project_init::source::{InMemoryProjects, ProjectSource};
use project_init::suggest::suggest_features;
use project_init::wizard::{Intent, Wizard};
use project_init::workspace::{self, SimulatedWorkspace, Workspace};

#[derive(Parser)]
#[command(name = "pinit")]
#[command(about = "Initialize a project from its goals and references")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects available for initialization
    Projects {
        /// Only show projects whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the features suggested for a project
    Suggest {
        /// Project ID
        project_id: String,
    },
    /// Run a wizard session, optionally driven by a JSON list of intents
    Run {
        /// Start from this project, as if opened from inside it
        #[arg(short, long)]
        project: Option<String>,

        /// JSON file with the intents to apply in order
        #[arg(short, long)]
        intents: Option<PathBuf>,

        /// Print the final state as JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Generate Markdown documentation once the summary is reached
        #[arg(long)]
        document: bool,

        /// Save the project once the summary is reached
        #[arg(long)]
        save: bool,
    },
    /// Play the initialization progress animation
    Progress,
    /// Create a new project
    Create {
        #[arg(short, long)]
        name: String,

        /// Project goal (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,

        /// Competitor reference (repeatable)
        #[arg(short, long = "reference")]
        references: Vec<String>,
    },
}

/// Logs go to stderr so stdout only carries command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "project_init=info,pinit=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_projects(config: &WizardConfig) -> anyhow::Result<InMemoryProjects> {
    match &config.projects_file {
        Some(path) => InMemoryProjects::from_json_file(path),
        None => Ok(InMemoryProjects::sample()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = WizardConfig::load();
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

    match cli.command {
        Commands::Projects { search } => {
            let source = load_projects(&config)?;
            let projects = match search {
                Some(term) => source.search(&term),
                None => source.list(),
            };
            for project in projects {
                println!(
                    "{}\t{}\t{} goals, {} references",
                    project.id,
                    project.name,
                    project.goals.len(),
                    project.references.len()
                );
            }
        }
        Commands::Suggest { project_id } => {
            let source = load_projects(&config)?;
            let project = source
                .read(&project_id)
                .with_context(|| format!("Project not found: {}", project_id))?;
            let features = suggest_features(Some(&project));
            if features.is_empty() {
                println!("No features suggested. Features will be created in the next step.");
            }
            for feature in features {
                println!(
                    "[{}] {}: {}",
                    feature.priority.as_str(),
                    feature.name,
                    feature.description
                );
            }
        }
        Commands::Run {
            project,
            intents,
            json,
            document,
            save,
        } => {
            let source = load_projects(&config)?;
            let mut wizard = match project {
                Some(id) => {
                    let project = source
                        .read(&id)
                        .with_context(|| format!("Project not found: {}", id))?;
                    Wizard::with_current_project(project, Arc::clone(&notifier))
                }
                None => Wizard::new(Arc::clone(&notifier)),
            };

            if let Some(path) = intents {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read intents file {}", path.display()))?;
                let intents: Vec<Intent> = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse intents file {}", path.display()))?;

                for intent in intents {
                    let name = intent.name();
                    if let Err(e) = wizard.dispatch(intent, &source) {
                        eprintln!("{} rejected at step {}: {}", name, wizard.step(), e);
                    }
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(wizard.state())?);
            } else {
                println!("Step {}", wizard.step());
                if let Some(summary) = wizard.summary() {
                    print!("{}", summary.render_tree());
                }
            }

            if (document || save) && wizard.step() != WizardStep::Summary {
                anyhow::bail!("The wizard must reach the summary step before saving or documenting");
            }
            if let Some(summary) = wizard.summary().filter(|_| document || save) {
                let ws: Arc<dyn Workspace> =
                    Arc::new(SimulatedWorkspace::new(config.persistence_delay()));
                if document {
                    let doc = workspace::spawn_generate_documentation(
                        Arc::clone(&ws),
                        Arc::clone(&notifier),
                        summary.clone(),
                    )
                    .await?;
                    if let Some(doc) = doc {
                        println!("{}", doc);
                    }
                }
                if save {
                    workspace::spawn_save_project(ws, Arc::clone(&notifier), summary).await?;
                }
            }
        }
        Commands::Progress => {
            let mut progress = StepProgress::new(config.phase_delay());
            let mut rx = progress.subscribe();

            let printer = tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    let seq = rx.borrow_and_update().clone();
                    let done = seq.completed_count();
                    if done > 0 {
                        println!("[{:>3}%] {}", seq.progress(), PHASES[done - 1].title);
                    }
                    if seq.is_finished() {
                        break;
                    }
                }
            });

            progress.start().await;
            printer.await?;
        }
        Commands::Create {
            name,
            goals,
            references,
        } => {
            let ws: Arc<dyn Workspace> = Arc::new(SimulatedWorkspace::new(config.persistence_delay()));
            let input = CreateProjectInput {
                name,
                goals,
                references,
            };
            match workspace::spawn_create_project(ws, notifier, input).await? {
                Some(project) => println!("{}", serde_json::to_string_pretty(&project)?),
                None => anyhow::bail!("Project was not created"),
            }
        }
    }

    Ok(())
}
