use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use swarmind::models::role::ChatMessageType;
use swarmind::ApiClient;
use tracing_subscriber::EnvFilter;

mod commands;
mod configuration;
mod error;

use commands::{demo, history, version};
use configuration::Settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Namespace to work in (can also be set via LIBSWARMIND_NAMESPACE environment variable)
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the store's heads
    Heads,

    /// List the chats in the namespace
    Chats,

    /// Print the history of a chat
    History { chat: String },

    /// Append one message per text to a chat
    Push {
        chat: String,
        #[arg(short, long, default_value = "human")]
        role: ChatMessageType,
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Replace the content of an existing message
    Edit {
        chat: String,
        id: String,
        #[arg(short, long, default_value = "human")]
        role: ChatMessageType,
        text: String,
    },

    /// Delete messages by id
    Delete {
        chat: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Drop the whole history of a chat
    Drop { chat: String },

    /// Run a push, edit, delete and drop cycle against a scratch chat
    Demo {
        #[arg(long, default_value = "testing")]
        chat: String,
    },

    /// Print the version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    if let Command::Version = cli.command {
        let config = Settings::new()
            .ok()
            .map(|settings| settings.into_api_config(cli.namespace));
        return version::execute(config.as_ref()).await;
    }

    let settings = Settings::new().context("loading configuration")?;
    let transport = reqwest::Client::builder().build()?;
    let client = ApiClient::new(settings.into_api_config(cli.namespace), transport);

    match cli.command {
        Command::Heads => history::heads(&client).await,
        Command::Chats => history::chats(&client).await,
        Command::History { chat } => history::show(&client, &chat).await,
        Command::Push { chat, role, texts } => history::push(&client, &chat, role, texts).await,
        Command::Edit {
            chat,
            id,
            role,
            text,
        } => history::edit(&client, &chat, id, role, text).await,
        Command::Delete { chat, ids } => history::delete(&client, &chat, ids).await,
        Command::Drop { chat } => history::drop_chat(&client, &chat).await,
        Command::Demo { chat } => demo::execute(&client, &chat).await,
        Command::Version => version::execute(Some(client.config())).await,
    }
}
