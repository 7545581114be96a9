//! CLI administration tool for rango.
//!
//! Provides commands for managing users, seeding demo data, viewing
//! statistics and performing database operations without going through
//! the web interface.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (password generated when omitted)
//! cargo run --bin admin -- user create --username leifos
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Rename a category (the slug follows the new name)
//! cargo run --bin admin -- category rename other-frameworks "Web Frameworks"
//!
//! # Seed demo categories and pages
//! cargo run --bin admin -- populate
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Remove expired sessions
//! cargo run --bin admin -- sessions purge
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use rango::application::services::{AuthService, CategoryService, PageService, StatsService};
use rango::config::{Config, mask_connection_string};
use rango::domain::repositories::{SessionRepository, UserRepository};
use rango::state::Repositories;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing rango.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Seed demo categories and pages
    Populate,

    /// Show statistics
    Stats,

    /// Manage stored sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Password (optional, auto-generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Rename a category and re-derive its slug
    Rename {
        /// Current slug of the category
        slug: String,

        /// New display name
        name: String,
    },
}

#[derive(Subcommand)]
enum SessionsAction {
    /// Delete expired sessions
    Purge,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// One demo category with its pages.
struct SeedCategory {
    name: &'static str,
    views: i32,
    likes: i32,
    pages: &'static [(&'static str, &'static str)],
}

const SEED: &[SeedCategory] = &[
    SeedCategory {
        name: "Python",
        views: 128,
        likes: 64,
        pages: &[
            ("Official Python Tutorial", "http://docs.python.org/3/tutorial/"),
            (
                "How to Think like a Computer Scientist",
                "http://www.greenteapress.com/thinkpython/",
            ),
            (
                "Learn Python in 10 Minutes",
                "http://www.korokithakis.net/tutorials/python/",
            ),
        ],
    },
    SeedCategory {
        name: "Django",
        views: 64,
        likes: 32,
        pages: &[
            (
                "Official Django Tutorial",
                "https://docs.djangoproject.com/en/stable/intro/tutorial01/",
            ),
            ("Django Rocks", "http://www.djangorocks.com/"),
            ("How to Tango with Django", "http://www.tangowithdjango.com/"),
        ],
    },
    SeedCategory {
        name: "Other Frameworks",
        views: 32,
        likes: 16,
        pages: &[
            ("Bottle", "http://bottlepy.org/docs/dev/"),
            ("Flask", "http://flask.pocoo.org"),
        ],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repos = Repositories::postgres(Arc::new(pool.clone()));

    match cli.command {
        Commands::User { action } => handle_user_action(action, &repos).await?,
        Commands::Category { action } => handle_category_action(action, &repos).await?,
        Commands::Populate => populate(&repos).await?,
        Commands::Stats => handle_stats(&repos).await?,
        Commands::Sessions { action } => handle_sessions_action(action, &repos).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, repos: &Repositories) -> Result<()> {
    match action {
        UserAction::Create {
            username,
            email,
            password,
            yes,
        } => create_user(repos, username, email, password, yes).await,
        UserAction::List => list_users(repos.users.clone()).await,
    }
}

/// Creates a user with interactive prompts.
///
/// A generated password is shown once and cannot be retrieved later; only
/// its Argon2 hash is stored.
async fn create_user(
    repos: &Repositories,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = email.unwrap_or_default();

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (generate_password(), true),
    };

    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    if !email.is_empty() {
        println!("  Email:    {}", email.cyan());
    }
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let auth = AuthService::new(repos.users.clone());
    let user = auth
        .register(&username, &email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_black()
    );
    println!();

    Ok(())
}

async fn list_users(users: Arc<dyn UserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Joined".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<30} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.date_joined
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn handle_category_action(action: CategoryAction, repos: &Repositories) -> Result<()> {
    match action {
        CategoryAction::Rename { slug, name } => {
            let service = CategoryService::new(repos.categories.clone(), repos.pages.clone());

            let confirmed = Confirm::new()
                .with_prompt(format!("Rename '{}' to '{}'?", slug, name))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            let category = service
                .rename_category(&slug, &name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to rename category: {}", e))?;

            println!(
                "{} {} → /category/{}/",
                "✅ Renamed:".green().bold(),
                category.name.cyan(),
                category.slug.bright_white()
            );
        }
    }

    Ok(())
}

/// Seeds the demo categories and pages. Safe to run repeatedly.
async fn populate(repos: &Repositories) -> Result<()> {
    println!("{}", "🌱 Populating demo data".bright_blue().bold());
    println!();

    let categories = CategoryService::new(repos.categories.clone(), repos.pages.clone());
    let pages = PageService::new(repos.categories.clone(), repos.pages.clone());

    for seed in SEED {
        let category = categories
            .ensure_category(seed.name, seed.views, seed.likes)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to add category {}: {}", seed.name, e))?;

        for (title, url) in seed.pages {
            pages
                .ensure_page(category.id, title, url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add page {}: {}", title, e))?;
            println!(
                "  - {} - {}",
                category.name.cyan(),
                title.bright_white()
            );
        }
    }

    println!();
    println!("{}", "✅ Demo data ready".green().bold());
    println!();

    Ok(())
}

/// Displays category, page, user and session counts.
async fn handle_stats(repos: &Repositories) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = StatsService::new(
        repos.categories.clone(),
        repos.pages.clone(),
        repos.users.clone(),
        repos.sessions.clone(),
    )
    .site_stats()
    .await
    .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Categories:      {}",
        stats.categories.to_string().bright_green().bold()
    );
    println!(
        "  Pages:           {}",
        stats.pages.to_string().bright_green().bold()
    );
    println!(
        "  Users:           {}",
        stats.users.to_string().bright_green().bold()
    );
    println!(
        "  Active sessions: {}",
        stats.active_sessions.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_sessions_action(action: SessionsAction, repos: &Repositories) -> Result<()> {
    match action {
        SessionsAction::Purge => purge_sessions(repos.sessions.clone()).await,
    }
}

async fn purge_sessions(sessions: Arc<dyn SessionRepository>) -> Result<()> {
    println!("{}", "🧹 Purging expired sessions...".bright_blue());

    let removed = sessions
        .purge_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

    println!(
        "{} {} removed",
        "✅".green(),
        removed.to_string().bright_white().bold()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  URL:        {}", mask_connection_string(database_url));
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password for new accounts.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
