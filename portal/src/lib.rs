//! DM Portal - Terminal session client
//!
//! Signs in against the portal API, keeps the bearer token in the local
//! store, and sends authenticated requests on the user's behalf.

pub mod commands;
pub mod state;
pub mod terminal;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use commands::CommandResult;
use dm_core::{Config, RegisterRequest};
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "dm-portal", version, about = "DM Portal session client")]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, env = "DM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Portal server origin, e.g. http://127.0.0.1:8000
    #[arg(long, env = "DM_BASE_URL")]
    pub base_url: Option<String>,

    /// Local storage database
    #[arg(long, env = "DM_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the access token
    Login {
        username: String,
        #[arg(long, env = "DM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it
    Register {
        username: String,
        #[arg(long, env = "DM_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "expert")]
        role: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Fetch and show the signed-in user's profile
    Whoami,
    /// Show the local session state without contacting the server
    Status,
    /// Change the signed-in user's password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Send an authenticated request and print the response
    Request {
        path: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Request body, sent as-is
        #[arg(short, long)]
        data: Option<String>,
    },
}

impl Cli {
    pub fn load_config(&self) -> dm_core::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(database) = &self.database {
            config.database_path = database.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse arguments, run one command and print its result.
/// Returns whether the command succeeded.
pub async fn run() -> anyhow::Result<bool> {
    dm_core::init_logging();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let state = AppState::new(config)?;

    let success = dispatch(&state, cli.command).await?;

    // A 401 leaves a delayed redirect behind; let it land before exiting
    state.client().wait_for_pending_redirect().await;

    Ok(success)
}

async fn dispatch(state: &AppState, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Login { username, password } => {
            print_result(commands::auth::login(state, &username, &password).await)
        }
        Command::Register {
            username,
            password,
            role,
            email,
        } => {
            let request = RegisterRequest {
                username,
                password,
                email,
                role,
            };
            print_result(commands::auth::register(state, request).await)
        }
        Command::Logout => print_result(commands::auth::logout(state)),
        Command::Whoami => print_result(commands::profile::whoami(state).await),
        Command::Status => print_result(commands::profile::status(state)),
        Command::Password { old, new, confirm } => print_result(
            commands::auth::change_password(state, &old, &new, &confirm).await,
        ),
        Command::Request { path, method, data } => print_result(
            commands::requests::request(state, &method, &path, data.as_deref()).await,
        ),
    }
}

fn print_result<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.success)
}
