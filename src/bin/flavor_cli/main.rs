// ABOUTME: Flavor CLI - command-line front end for the recipe and identity stores
// ABOUTME: Browses, searches, authors, favorites, and shares recipes with a persisted session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Browse and search
//! flavor-cli list --diet Vegan
//! flavor-cli search basil
//! flavor-cli show 1
//!
//! # Sign in with a demo account
//! flavor-cli login --email italian@example.com --password password123
//!
//! # Author and manage recipes
//! flavor-cli create --title "Miso Soup" --description "Quick" --image https://img/miso.jpg \
//!     --ingredient "Miso paste" --instruction "Whisk miso into dashi"
//! flavor-cli favorite 2
//! flavor-cli favorites
//!
//! # Kitchen helpers
//! flavor-cli timer 1 --watch
//! flavor-cli share 1 --target twitter
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use flavor_exchange::{
    config::{AppConfig, StorageBackend},
    context::AppContext,
    errors::AppResult,
    logging::LoggingConfig,
    models::Difficulty,
    share::ShareTarget,
};
use std::path::PathBuf;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "flavor-cli",
    about = "Flavor Exchange recipe sharing CLI",
    long_about = "Browse, search, create, favorite, and share recipes. State is kept in local storage between runs."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Storage backend override (memory, file, sqlite)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Data directory override for the file backend
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Database URL override for the sqlite backend
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List all recipes
    List {
        /// Only recipes with this dietary label
        #[arg(long)]
        diet: Option<String>,
    },

    /// Search titles and ingredients
    Search {
        /// Case-insensitive search text
        query: String,

        /// Only recipes with this dietary label
        #[arg(long)]
        diet: Option<String>,
    },

    /// Show one recipe in full
    Show {
        /// Recipe ID
        id: String,
    },

    /// Create a recipe as the signed-in user
    Create {
        /// Title
        #[arg(long)]
        title: String,

        /// Short description
        #[arg(long)]
        description: String,

        /// Image URL
        #[arg(long)]
        image: String,

        /// Cooking time in minutes
        #[arg(long, default_value = "30")]
        cooking_time: u32,

        /// Number of servings
        #[arg(long, default_value = "4")]
        servings: u32,

        /// Difficulty (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Ingredient line (repeat for each)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Instruction step (repeat for each)
        #[arg(long = "instruction")]
        instructions: Vec<String>,

        /// Tag (repeat for each)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Dietary label (repeat for each)
        #[arg(long = "diet")]
        dietary_info: Vec<String>,
    },

    /// Edit a recipe you authored
    Edit {
        /// Recipe ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New cooking time in minutes
        #[arg(long)]
        cooking_time: Option<u32>,

        /// New number of servings
        #[arg(long)]
        servings: Option<u32>,

        /// New difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },

    /// Delete a recipe you authored
    Delete {
        /// Recipe ID
        id: String,
    },

    /// Toggle a recipe in your favorites
    Favorite {
        /// Recipe ID
        id: String,
    },

    /// List your favorite recipes
    Favorites,

    /// List recipes you authored
    Mine,

    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        username: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Cooking timer for a recipe
    Timer {
        /// Recipe ID
        id: String,

        /// Count down in real time until done
        #[arg(long)]
        watch: bool,
    },

    /// Build a share link for a recipe
    Share {
        /// Recipe ID
        id: String,

        /// Target (twitter, facebook, linkedin, whatsapp, copy)
        #[arg(long, default_value = "copy")]
        target: ShareTarget,

        /// Site base URL used for the recipe link
        #[arg(long, default_value = "http://localhost:5173")]
        base_url: String,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(backend) = &cli.backend {
        config.storage.backend = StorageBackend::parse(backend)?;
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir.clone_from(dir);
    }
    if let Some(url) = &cli.database_url {
        config.storage.database_url.clone_from(url);
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env().with_stderr();
    logging.level = if cli.verbose { "debug" } else { "warn" }.into();
    logging.init()?;

    let config = load_config(&cli)?;
    debug!("{}", config.summary());

    let context = AppContext::bootstrap(&config).await?;
    // Every page starts from a populated collection.
    context.recipes().fetch_all().await?;

    let outcome = run(&context, cli.command).await;
    let shutdown = context.shutdown().await;
    outcome.and(shutdown)
}

async fn run(context: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::List { diet } => commands::recipes::list(context, diet).await,
        Command::Search { query, diet } => commands::recipes::search(context, query, diet).await,
        Command::Show { id } => commands::recipes::show(context, &id).await,
        Command::Create {
            title,
            description,
            image,
            cooking_time,
            servings,
            difficulty,
            ingredients,
            instructions,
            tags,
            dietary_info,
        } => {
            let draft = commands::recipes::CreateArgs {
                title,
                description,
                image,
                cooking_time,
                servings,
                difficulty,
                ingredients,
                instructions,
                tags,
                dietary_info,
            };
            commands::recipes::create(context, draft).await
        }
        Command::Edit {
            id,
            title,
            description,
            cooking_time,
            servings,
            difficulty,
        } => {
            let patch = flavor_exchange::models::RecipePatch {
                title,
                description,
                cooking_time,
                servings,
                difficulty,
                ..Default::default()
            };
            commands::recipes::edit(context, &id, patch).await
        }
        Command::Delete { id } => commands::recipes::delete(context, &id).await,
        Command::Favorite { id } => commands::recipes::favorite(context, &id).await,
        Command::Favorites => commands::recipes::favorites(context).await,
        Command::Mine => commands::recipes::mine(context).await,
        Command::Login { email, password } => {
            commands::session::login(context, &email, &password).await
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            commands::session::register(context, username, email, password, confirm_password)
                .await
        }
        Command::Logout => commands::session::logout(context).await,
        Command::Whoami => commands::session::whoami(context).await,
        Command::Timer { id, watch } => commands::kitchen::timer(context, &id, watch).await,
        Command::Share {
            id,
            target,
            base_url,
        } => commands::kitchen::share(context, &id, target, &base_url).await,
    }
}
