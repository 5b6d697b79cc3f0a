/// shack - command-line client for a MusicShack server
use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use shack_client::{
    ClientConfig, ContentType, EnqueueRequest, Outcome, ProfileUpdate, RecordingRedirect,
    ShackClient, Stores,
};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shack")]
#[command(about = "MusicShack command-line client", long_about = None)]
struct Cli {
    /// Configuration file path (SHACK_* environment variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the download queue
    Downloads {
        #[command(subcommand)]
        action: DownloadCommand,
    },
    /// Manage followed artists
    Follows {
        #[command(subcommand)]
        action: FollowCommand,
    },
    /// Browse and manage the library
    Library {
        #[command(subcommand)]
        action: LibraryCommand,
    },
    /// Manage provider instances
    Instances {
        #[command(subcommand)]
        action: InstanceCommand,
    },
    /// Show or change the logged-in account
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand)]
enum DownloadCommand {
    /// Show the queue
    List,
    /// Queue a song, album or artist
    Add {
        /// Provider name
        #[arg(short, long)]
        provider: String,
        #[arg(short = 't', long, value_enum)]
        kind: Kind,
        /// Provider-side content id
        id: String,
        #[arg(short, long, default_value = "LOSSLESS")]
        quality: String,
    },
    /// Retry one task
    Retry { id: u64 },
    /// Retry every failed task
    RetryAll,
    /// Clear finished tasks
    Done,
    /// Cancel a task
    Cancel { id: u64 },
    /// Remove a task
    Delete { id: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Song,
    Album,
    Artist,
}

impl From<Kind> for ContentType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Song => ContentType::Song,
            Kind::Album => ContentType::Album,
            Kind::Artist => ContentType::Artist,
        }
    }
}

#[derive(Subcommand)]
enum FollowCommand {
    List,
    /// Follow an artist
    Add {
        #[arg(short, long)]
        provider: String,
        /// Provider-side artist id
        artist_id: String,
    },
    /// Unfollow by follow id
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum LibraryCommand {
    /// Show one page of the library
    List {
        /// Search term
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// Rescan the library on the server
    Sync,
    /// Delete a song
    Delete { id: u64 },
    /// Upload an audio file
    Upload {
        file: PathBuf,
        /// Cover image to embed
        #[arg(long)]
        cover: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum InstanceCommand {
    List,
    /// Register an instance URL
    Add { url: String },
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    /// Fields left out stay unchanged
    Update {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        best_quality: bool,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Manage accounts
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    List,
    Add {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        best_quality: bool,
    },
    Remove { id: u64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shack_cli=info,shack_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::load(cli.config.as_deref())?;
    let base_url = config.base_url.clone();
    let redirect = Arc::new(RecordingRedirect::new());
    let client = ShackClient::new(config, redirect.clone())?;

    tracing::debug!(base_url = %base_url, "Loaded configuration");

    let outcome = run(&client, cli.command).await;

    if let Err(message) = outcome {
        if let Some(login_path) = redirect.last() {
            eprintln!("Not logged in: open {}{}", base_url, login_path);
        }
        bail!(message);
    }

    Ok(())
}

async fn run(client: &ShackClient, command: Commands) -> Outcome {
    let stores = client.stores();

    match command {
        Commands::Downloads { action } => {
            let ops = client.downloads();
            match action {
                DownloadCommand::List => {
                    ops.list().await?;
                    print_downloads(stores);
                }
                DownloadCommand::Add {
                    provider,
                    kind,
                    id,
                    quality,
                } => {
                    let request = EnqueueRequest {
                        provider_id: provider,
                        content_type: kind.into(),
                        content_id: id,
                        quality,
                    };
                    ops.enqueue(&request).await?;
                    println!("Queued {} {}", request.content_type, request.content_id);
                }
                DownloadCommand::Retry { id } => ops.retry(id).await?,
                DownloadCommand::RetryAll => ops.retry_all().await?,
                DownloadCommand::Done => ops.mark_done().await?,
                DownloadCommand::Cancel { id } => ops.cancel(id).await?,
                DownloadCommand::Delete { id } => ops.delete(id).await?,
            }
        }
        Commands::Follows { action } => {
            let ops = client.follows();
            match action {
                FollowCommand::List => {
                    ops.list().await?;
                    print_follows(stores);
                }
                FollowCommand::Add {
                    provider,
                    artist_id,
                } => {
                    let follow = ops.add(&provider, &artist_id).await?;
                    println!("Following {} (#{})", follow.artist_name, follow.id);
                }
                FollowCommand::Remove { id } => ops.remove(id).await?,
            }
        }
        Commands::Library { action } => {
            let ops = client.library();
            match action {
                LibraryCommand::List {
                    query,
                    limit,
                    offset,
                } => {
                    ops.load(&query, limit, offset).await?;
                    print_library(stores);
                }
                LibraryCommand::Sync => ops.sync().await?,
                LibraryCommand::Delete { id } => ops.delete_entry(id).await?,
                LibraryCommand::Upload { file, cover } => {
                    ops.upload(&file, cover.as_deref()).await?;
                }
            }
        }
        Commands::Instances { action } => {
            let ops = client.instances();
            match action {
                InstanceCommand::List => {
                    ops.list().await?;
                    print_instances(stores);
                }
                InstanceCommand::Add { url } => ops.add(&url).await?,
                InstanceCommand::Remove { id } => ops.remove(id).await?,
            }
        }
        Commands::Profile { action } => {
            let ops = client.me();
            match action {
                ProfileCommand::Show => {
                    ops.get().await?;
                    print_profile(stores);
                }
                ProfileCommand::Update {
                    username,
                    password,
                    best_quality,
                } => {
                    let update = ProfileUpdate {
                        username: username.unwrap_or_default(),
                        password: password.unwrap_or_default(),
                        best_quality,
                    };
                    ops.update(&update).await?;
                    print_profile(stores);
                }
            }
        }
        Commands::Admin {
            action: AdminCommand::Users { action },
        } => {
            let ops = client.users();
            match action {
                UserCommand::List => {
                    ops.list().await?;
                    print_users(stores);
                }
                UserCommand::Add {
                    username,
                    password,
                    best_quality,
                } => ops.create(&username, &password, best_quality).await?,
                UserCommand::Remove { id } => ops.remove(id).await?,
            }
        }
    }

    Ok(())
}

fn print_downloads(stores: &Stores) {
    stores.downloads.with(|tasks| {
        for task in tasks.into_iter().flatten() {
            println!(
                "{:>6}  {:<8} {} [{}]",
                task.id, task.status, task.song_metadata.title, task.provider_id
            );
        }
    });
}

fn print_follows(stores: &Stores) {
    stores.follows.with(|follows| {
        for follow in follows.into_iter().flatten() {
            println!(
                "{:>6}  {} [{}:{}]",
                follow.id, follow.artist_name, follow.provider_id, follow.artist_id
            );
        }
    });
}

fn print_library(stores: &Stores) {
    stores.library.with(|page| {
        let Some(page) = page else { return };
        for entry in &page.items {
            println!(
                "{:>6}  {} - {} ({})",
                entry.id,
                entry.artists.join(", "),
                entry.title,
                entry.album
            );
        }
        println!(
            "Showing {}-{} of {}",
            page.offset + u64::from(page.count > 0),
            page.offset + page.count,
            page.total
        );
    });
}

fn print_instances(stores: &Stores) {
    stores.instances.with(|instances| {
        for instance in instances.into_iter().flatten() {
            let ping = if instance.is_reachable() {
                format!("{} ms", instance.ping_latency)
            } else {
                "unreachable".to_string()
            };
            println!(
                "{:>6}  {:<10} {} ({})",
                instance.id, instance.provider_id, instance.url, ping
            );
        }
    });
}

fn print_users(stores: &Stores) {
    stores.users.with(|users| {
        for user in users.into_iter().flatten() {
            println!("{:>6}  {}", user.id, user.username);
        }
    });
}

fn print_profile(stores: &Stores) {
    stores.profile.with(|user| {
        if let Some(user) = user {
            let quality = if user.best_quality { "best" } else { "default" };
            println!("{:>6}  {} (quality: {})", user.id, user.username, quality);
        }
    });
}
