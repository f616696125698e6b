use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use redis_gateway::api::{self, AppState, Fixtures};
use redis_gateway::services::{
    current_database, get_index_definition, list_indexes, open_cli, BackendGateway, CommandHost,
};
use redis_gateway::utils::{
    init_logging, resolve_base_url, FileStorage, Settings, UiStorage, APP_PORT_KEY,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "redis-gateway")]
#[command(about = "Talk to the local Redis GUI backend", long_about = None)]
struct Args {
    /// UI storage file holding the backend port and the current database
    #[arg(long)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every database known to the backend
    Databases,
    /// Show one database
    Database { id: String },
    /// Show the database last opened in a CLI view
    Current,
    /// Tell whether a database has the Redis Search module
    HasSearch { id: String },
    /// List the Search indexes of a database
    Indexes { id: String },
    /// Show the definition of a Search index
    IndexInfo { id: String, name: String },
    /// Run a Redis command through a one-shot CLI session
    Exec {
        id: String,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Select a database and ask the host to open a CLI view for it
    OpenCli { id: String },
    /// Persist the port of the backend
    SetPort { port: u16 },
    /// Serve canned data on the backend HTTP surface
    MockBackend {
        #[arg(long, default_value_t = 5001)]
        port: u16,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_logging(settings.log_level, settings.log_file.as_deref())?;

    let args = Args::parse();
    let storage_path = args
        .storage
        .clone()
        .unwrap_or_else(|| settings.storage_path.clone());
    let storage = FileStorage::new(storage_path);
    let http = BackendGateway::build_client(settings.request_timeout)?;
    let gateway = || -> Result<BackendGateway> {
        Ok(BackendGateway::from_storage(http.clone(), &storage)?)
    };

    match args.command {
        Commands::Databases => {
            let databases = gateway()?.list_databases().await?;
            if databases.is_empty() {
                println!("No databases");
            }
            for db in databases {
                let modules: Vec<&str> = db.modules.iter().map(|m| m.name.as_str()).collect();
                println!(
                    "{}  {}  {}  {}  [{}]",
                    db.id,
                    db.name,
                    db.endpoint(),
                    db.connection_type.map_or("-", |t| t.display_name()),
                    modules.join(", ")
                );
            }
        }
        Commands::Database { id } => {
            let database = gateway()?.require_database(&id).await?;
            print_json(&database)?;
        }
        Commands::Current => match current_database(&storage)? {
            Some(database) => print_json(&database)?,
            None => println!("No database selected"),
        },
        Commands::HasSearch { id } => {
            let found = gateway()?.has_search_module(&id).await?;
            println!("{}", found);
        }
        Commands::Indexes { id } => {
            let indexes = list_indexes(&gateway()?, &id).await?;
            for index in indexes {
                println!("{}", index);
            }
        }
        Commands::IndexInfo { id, name } => {
            match get_index_definition(&gateway()?, &id, &name).await? {
                Some(definition) => print_json(&definition)?,
                None => anyhow::bail!("Index '{}' not found on database '{}'", name, id),
            }
        }
        Commands::Exec { id, command } => {
            let command = command.join(" ");
            match gateway()?.run_command(&id, &command).await? {
                Some(reply) => print_json(&reply)?,
                None => anyhow::bail!(
                    "Command '{}' was not executed on database '{}'",
                    command,
                    id
                ),
            }
        }
        Commands::OpenCli { id } => {
            let host = CommandHost::new(settings.host_program.clone());
            let database = open_cli(&gateway()?, &storage, &host, &id).await?;
            println!("Opened CLI for {}", database.name);
        }
        Commands::SetPort { port } => {
            storage.set_field(APP_PORT_KEY, json!(port))?;
            println!("Backend url: {}", resolve_base_url(&storage)?);
        }
        Commands::MockBackend { port } => {
            let listener = TcpListener::bind(("127.0.0.1", port))
                .await
                .with_context(|| format!("Failed to bind port {}", port))?;
            info!("Mock backend listening on http://localhost:{}", port);
            api::serve(listener, AppState::new(Fixtures::demo())).await?;
        }
    }

    Ok(())
}
