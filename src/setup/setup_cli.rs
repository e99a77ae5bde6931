use clap::{Parser, Subcommand};
use contenthub_backend::config::Config;
use contenthub_backend::setup::db_setup;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "setup_cli", author, version, about = "A CLI for initial application setup.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand, Debug)]
enum DbAction {
    /// Creates the content database schema and seeds the planning tables.
    Setup,
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    match &cli.command {
        Commands::Db { action } => match action {
            DbAction::Setup => setup_content_database(&config),
        },
    }
}

fn setup_content_database(config: &Config) {
    let db_path = config.news_db_path();
    if db_path.exists() {
        println!(
            "ℹ️ Content database already exists at '{}'. Skipping creation.",
            db_path.display()
        );
        return;
    }
    println!(
        "\nSetting up content database at '{}'...",
        db_path.display()
    );

    if let Some(parent_dir) = db_path.parent() {
        fs::create_dir_all(parent_dir).expect("Could not create database directory.");
    }

    let mut conn = Connection::open(&db_path).expect("Could not create content database file.");
    match db_setup::setup_content_db(&mut conn) {
        Ok(_) => println!("✅ Content database setup completed successfully."),
        Err(e) => eprintln!("❌ Error setting up content database: {}", e),
    }
}
