//! Command-line front end for the contact and conversation store.
//!
//! Usage:
//!
//! ```text
//! hangouts [--config <file>] [--data-dir <dir>] <command>
//! ```
//!
//! `ingest` stands in for the platform SMS receiver: it reads one JSON object
//! per line from stdin and files each event through the inbound dispatcher.
//! A representative line is:
//!
//! ```json
//! {"sender": "15551234", "body": "hello"}
//! ```
//!
//! Command output goes to stdout; logs go to stderr and honour `RUST_LOG`.

use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use hangouts::avatar::{AssignAvatarError, AvatarError, AvatarStore};
use hangouts::config::{ConfigError, HangoutsConfig};
use hangouts::contact::adapters::sqlite::SqliteContactStore;
use hangouts::contact::domain::{Contact, ContactDomainError, ContactForm};
use hangouts::contact::services::ContactRepository;
use hangouts::error::RepositoryError;
use hangouts::inbound::{InboundClosed, InboundDispatcher, InboundMessageMatcher, InboundSms};
use hangouts::logging;
use hangouts::message::adapters::sqlite::SqliteMessageStore;
use hangouts::message::domain::{MessageBody, MessageDomainError, NewMessage};
use hangouts::message::services::MessageRepository;
use hangouts::storage::{SqliteDatabase, StoreError};
use mockable::DefaultClock;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "hangouts", version, about = "Local contacts and SMS conversations")]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Directory holding the database and avatars; overrides the config file.
    #[arg(long)]
    data_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// File inbound SMS events read as JSON lines from stdin.
    Ingest,
    /// List contacts ordered by name.
    Contacts,
    /// Add a contact.
    AddContact {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Phone number; separators are stripped.
        #[arg(long)]
        phone: String,
        /// Email address.
        #[arg(long, default_value = "")]
        email: String,
        /// Postal address.
        #[arg(long, default_value = "")]
        address: String,
        /// Free-form notes.
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a contact and its conversation.
    Delete {
        /// Phone number of the contact.
        #[arg(long)]
        phone: String,
    },
    /// Print the conversation with a contact.
    Conversation {
        /// Phone number of the contact.
        #[arg(long)]
        phone: String,
    },
    /// Record an outbound message to a contact.
    Send {
        /// Phone number of the contact.
        #[arg(long)]
        phone: String,
        /// Message text.
        #[arg(long)]
        body: String,
    },
    /// Store an image as a contact's avatar.
    Avatar {
        /// Phone number of the contact.
        #[arg(long)]
        phone: String,
        /// Image file to copy into the avatar directory.
        #[arg(long)]
        file: Utf8PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open database: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Avatar(#[from] AvatarError),
    #[error(transparent)]
    AssignAvatar(#[from] AssignAvatarError),
    #[error("invalid contact: {0}")]
    Contact(#[from] ContactDomainError),
    #[error("invalid message: {0}")]
    Message(#[from] MessageDomainError),
    #[error(transparent)]
    Inbound(#[from] InboundClosed),
    #[error("inbound dispatcher failed: {0}")]
    Dispatcher(#[from] tokio::task::JoinError),
    #[error("no contact with phone number {0}")]
    UnknownPhone(String),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

struct App {
    config: HangoutsConfig,
    contacts: ContactRepository<SqliteContactStore>,
    messages: MessageRepository<SqliteMessageStore>,
}

impl App {
    fn open(config: HangoutsConfig) -> Result<Self, CliError> {
        let database = SqliteDatabase::open(&config)?;
        Ok(Self {
            contacts: ContactRepository::new(Arc::new(SqliteContactStore::new(database.clone()))),
            messages: MessageRepository::new(Arc::new(SqliteMessageStore::new(database))),
            config,
        })
    }

    async fn contact_for(&self, phone: &str) -> Result<Contact, CliError> {
        self.contacts
            .get_by_phone(phone)
            .await?
            .ok_or_else(|| CliError::UnknownPhone(phone.to_owned()))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_cli(logging::DEFAULT_FILTER) {
        report(&format!("failed to initialise logging: {err}"));
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&format!("hangouts: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn report(line: &str) {
    let mut stderr = std::io::stderr().lock();
    // Nothing is left to report to if stderr itself is gone.
    writeln!(stderr, "{line}").unwrap_or_default();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => HangoutsConfig::load(path)?,
        None => HangoutsConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let app = App::open(config)?;
    match cli.command {
        Command::Ingest => ingest(&app).await,
        Command::Contacts => list_contacts(&app).await,
        Command::AddContact {
            name,
            phone,
            email,
            address,
            notes,
        } => {
            let form = ContactForm {
                name,
                phone,
                email,
                address,
                notes,
                avatar_path: None,
            };
            let id = app.contacts.add(&form.into_details()?).await?;
            emit(&format!("{id}\n")).await
        }
        Command::Delete { phone } => {
            let contact = app.contact_for(&phone).await?;
            app.contacts.delete(&contact).await?;
            // Avatar cleanup after the delete only logs failures.
            if let Some(path) = contact.avatar_path() {
                match AvatarStore::open(app.config.avatar_path()) {
                    Ok(avatars) => avatars.release(Utf8Path::new(path)),
                    Err(error) => tracing::warn!(%error, %path, "avatar file left in place"),
                }
            }
            Ok(())
        }
        Command::Conversation { phone } => print_conversation(&app, &phone).await,
        Command::Send { phone, body } => {
            let contact = app.contact_for(&phone).await?;
            let message = NewMessage::outbound(contact.id(), MessageBody::new(body)?, &DefaultClock);
            app.messages.add_message(&message).await?;
            Ok(())
        }
        Command::Avatar { phone, file } => set_avatar(&app, &phone, &file).await,
    }
}

async fn ingest(app: &App) -> Result<(), CliError> {
    let matcher = InboundMessageMatcher::new(
        app.contacts.clone(),
        app.messages.clone(),
        Arc::new(DefaultClock),
    );
    let (sender, dispatcher) = InboundDispatcher::spawn(matcher, app.config.inbound_queue_capacity);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut queued = 0_usize;
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<InboundSms>(trimmed) {
            Ok(event) => {
                sender.send(event).await?;
                queued += 1;
            }
            Err(error) => tracing::warn!(%error, "skipping malformed inbound line"),
        }
    }

    drop(sender);
    dispatcher.await?;
    tracing::info!(queued, "inbound events processed");
    Ok(())
}

async fn list_contacts(app: &App) -> Result<(), CliError> {
    let mut out = String::new();
    for contact in app.contacts.list_all().await? {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            contact.id(),
            contact.name(),
            contact.phone()
        ));
    }
    emit(&out).await
}

async fn print_conversation(app: &App, phone: &str) -> Result<(), CliError> {
    let contact = app.contact_for(phone).await?;
    let mut out = String::new();
    for message in app.messages.list_messages_for_contact(contact.id()).await? {
        let when = message.timestamp().to_datetime().map_or_else(
            || message.timestamp().to_string(),
            |time| time.to_rfc3339(),
        );
        out.push_str(&format!(
            "{when}\t{}\t{}\n",
            message.direction().as_str(),
            message.body()
        ));
    }
    emit(&out).await
}

async fn set_avatar(app: &App, phone: &str, file: &Utf8Path) -> Result<(), CliError> {
    let contact = app.contact_for(phone).await?;
    let bytes = tokio::fs::read(&file)
        .await
        .map_err(|source| CliError::ReadFile {
            path: file.to_owned(),
            source,
        })?;
    let avatars = AvatarStore::open(app.config.avatar_path())?;
    avatars
        .assign(&app.contacts, &contact, &bytes, file.extension().unwrap_or("img"))
        .await?;
    Ok(())
}

async fn emit(text: &str) -> Result<(), CliError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
