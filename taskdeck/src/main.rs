//! `TaskDeck` CLI -- a plain-text front end over the sync controller.
//!
//! Every subcommand builds a [`SyncController`] against the configured task
//! service, loads the collection, and invokes one controller operation.
//! Mutations go through the same optimistic/pessimistic discipline the
//! library applies for any presentation binding.

use chrono::NaiveDate;
use clap::Parser;

use taskdeck::auth::AuthClient;
use taskdeck::board::Board;
use taskdeck::config::{CliArgs, Config};
use taskdeck::repository::http::HttpTaskRepository;
use taskdeck::sync::SyncController;
use taskdeck_proto::task::{Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};

#[derive(Parser, Debug)]
#[command(version, about = "TaskDeck task-board client")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List all tasks in storage order.
    List,
    /// Show the board grouped by status column.
    Board,
    /// Create a task.
    Add {
        /// Task title (required, non-empty).
        title: String,
        /// Free-form details.
        #[arg(long, default_value = "")]
        description: String,
        /// Initial status (todo, in-progress, done).
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Priority (low, medium, high).
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Edit fields of an existing task.
    Edit {
        /// Task id.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New priority.
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// New due date, YYYY-MM-DD.
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Clear the due date.
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Move a task to another column (the drag-and-drop path).
    Mv {
        /// Task id.
        id: String,
        /// Target status (todo, in-progress, done).
        status: TaskStatus,
    },
    /// Toggle a task's completion flag. Toggling an already-completed
    /// task deletes it (completed means archived).
    Done {
        /// Task id.
        id: String,
    },
    /// Delete a task.
    Rm {
        /// Task id.
        id: String,
    },
    /// Register an account with the auth service.
    Register {
        /// Display name.
        name: String,
        /// Login email.
        email: String,
        /// Password.
        #[arg(long, env = "TASKDECK_PASSWORD")]
        password: String,
    },
    /// Log in and print the session token.
    Login {
        /// Login email.
        email: String,
        /// Password.
        #[arg(long, env = "TASKDECK_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::load(&cli.args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            AuthClient::new(&config.auth_url)
                .register(&name, &email, &password)
                .await?;
            println!("registered {email}");
            return Ok(());
        }
        Command::Login { email, password } => {
            let token = AuthClient::new(&config.auth_url)
                .login(&email, &password)
                .await?;
            println!("{}", token.as_str());
            return Ok(());
        }
        command => run_task_command(command, config).await?,
    }
    Ok(())
}

async fn run_task_command(
    command: Command,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = SyncController::new(HttpTaskRepository::new(&config.api_url));
    controller.load().await?;

    match command {
        Command::List => {
            for task in controller.cache().iter() {
                print_task(task);
            }
        }
        Command::Board => {
            let board = Board::from_cache(&controller.cache());
            for column in &board.columns {
                println!("== {} ({})", column.status, column.tasks.len());
                for task in &column.tasks {
                    print_task(task);
                }
            }
        }
        Command::Add {
            title,
            description,
            status,
            priority,
            due,
        } => {
            let draft = TaskDraft {
                title,
                description,
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                due_date: due,
                completed: false,
            };
            let task = controller.create(draft).await?;
            println!("created {}", task.id);
        }
        Command::Edit {
            id,
            title,
            description,
            status,
            priority,
            due,
            clear_due,
        } => {
            let patch = TaskPatch {
                title,
                description,
                status,
                priority,
                due_date: if clear_due { Some(None) } else { due.map(Some) },
                completed: None,
            };
            if patch.is_empty() {
                println!("nothing to change");
                return Ok(());
            }
            let task = controller.edit(&TaskId::new(id), &patch).await?;
            print_task(&task);
        }
        Command::Mv { id, status } => {
            let task = controller.change_status(&TaskId::new(id), status).await?;
            println!("{} -> {}", task.id, task.status);
        }
        Command::Done { id } => match controller.toggle_complete(&TaskId::new(id)).await? {
            Some(task) => println!("{} completed", task.id),
            None => println!("completed task deleted"),
        },
        Command::Rm { id } => {
            let id = TaskId::new(id);
            controller.remove(&id).await?;
            println!("deleted {id}");
        }
        Command::Register { .. } | Command::Login { .. } => unreachable!("handled in run"),
    }
    Ok(())
}

fn print_task(task: &Task) {
    let due = task
        .due_date
        .map_or_else(String::new, |d| format!("  due {d}"));
    let done = if task.completed { "x" } else { " " };
    println!(
        "[{done}] {}  {}  [{} / {}]{due}",
        task.id, task.title, task.status, task.priority
    );
}
