use clap::{Args, Parser, Subcommand};
use client::notice::{self, Notice, DEFAULT_SSH_HOST};
use client::ApiClient;
use common::{hours_to_seconds, unix_now, CredentialsRequest, ExtendRequest, ReserveRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gpu-rent", author, version, about = "Reserve GPUs on the shared node", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "GPU_RENT_API", default_value = "http://127.0.0.1:3001", global = true)]
    api: String,

    /// Host shown in SSH login hints
    #[arg(long, env = "GPU_RENT_SSH_HOST", default_value = DEFAULT_SSH_HOST, global = true)]
    ssh_host: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Credentials {
    /// Account name on the GPU node
    #[arg(long, short)]
    user: String,

    /// Account password
    #[arg(long, env = "GPU_RENT_PASSWORD", hide_env_values = true)]
    password: String,
}

impl From<Credentials> for CredentialsRequest {
    fn from(c: Credentials) -> Self {
        CredentialsRequest {
            username: c.user,
            password: c.password,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reserve GPUs and (re)launch the container
    Reserve {
        #[command(flatten)]
        credentials: Credentials,

        /// GPU identifier, repeat for several
        #[arg(long = "gpu", required = true)]
        gpus: Vec<String>,

        /// Reservation length in hours
        #[arg(long)]
        hours: f64,

        /// Run the container privileged
        #[arg(long)]
        privileged: bool,
    },
    /// Release every GPU held and stop the container
    Release {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Push the current reservation further out
    Extend {
        #[command(flatten)]
        credentials: Credentials,

        /// New reservation length in hours, counted from now
        #[arg(long)]
        hours: f64,
    },
    /// Show the state of your container
    Check {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// List GPUs and who holds them
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api)?;

    let notices = match cli.command {
        Commands::Reserve {
            credentials,
            gpus,
            hours,
            privileged,
        } => {
            info!(user = %credentials.user, ?gpus, hours, privileged, "reserving");
            let req = ReserveRequest {
                username: credentials.user,
                password: credentials.password,
                gpus,
                reservation_time: hours_to_seconds(hours),
                privileged,
            };
            notice::reserve_notices(client.reserve(&req).await, &cli.ssh_host)
        }
        Commands::Release { credentials } => {
            info!(user = %credentials.user, "releasing");
            notice::release_notices(client.release(&credentials.into()).await)
        }
        Commands::Extend { credentials, hours } => {
            info!(user = %credentials.user, hours, "extending");
            let req = ExtendRequest {
                username: credentials.user,
                password: credentials.password,
                reservation_time: hours_to_seconds(hours),
            };
            notice::extend_notices(client.extend(&req).await)
        }
        Commands::Check { credentials } => {
            info!(user = %credentials.user, "checking");
            notice::check_notices(client.user_status(&credentials.into()).await, &cli.ssh_host)
        }
        Commands::Status => match client.status().await {
            Ok(status) => {
                for slot in status.slots(unix_now()) {
                    println!("{}", notice::slot_label(&slot));
                }
                Vec::new()
            }
            Err(err) => vec![notice::error_notice(&err)],
        },
    };

    if print_notices(&notices) {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns whether any failure was printed.
fn print_notices(notices: &[Notice]) -> bool {
    let mut failed = false;
    for n in notices {
        if n.is_failure() {
            failed = true;
            eprintln!("{}", n.text);
        } else {
            println!("{}", n.text);
        }
    }
    failed
}
