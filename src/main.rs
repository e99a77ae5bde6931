use actix_cors::Cors;
use actix_web::{
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer,
};
use clap::Parser;
use contenthub_backend::{
    config::Config, datasource, helper::analysis_helpers::NewsAnalyzer, routes,
    state::ContentState,
};
use std::path::PathBuf;
use tera::Tera;

#[derive(Parser, Debug)]
#[command(name = "contenthub_server", author, version, about = "Starts the Content Hub web server.")]
struct Cli {
    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = Config::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    // Initialize logger using the value from config
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let tera = Tera::new("templates/**/*.html").expect("Tera initialization failed");

    let store = datasource::build_store(&config).expect(
        "FATAL: Failed to initialize the configured data backend. For sqlite, run \
         'cargo run --bin setup_cli -- --env-file <path> db setup' first.",
    );
    let state = web::Data::new(ContentState::new(store));

    // The initial load. A failure leaves the collections empty and is only
    // logged; the server still starts and the dashboard shows its placeholder.
    state.refresh().await;

    let analyzer = NewsAnalyzer::new(config.gemini_api_key.clone())
        .expect("FATAL: Failed to build the HTTP client for the news analyzer.");
    let analyzer = web::Data::new(analyzer);

    let server_address = format!("{}:{}", config.web.host, config.web.port);
    println!("🚀 Server starting at http://{}", server_address);

    HttpServer::new(move || {
        // --- DYNAMIC CORS SETUP ---
        let cors = {
            let allowed_origins_str = &config.allowed_origins;
            if allowed_origins_str.trim() == "*" {
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600)
            } else {
                let mut cors = Cors::default();
                let origins: Vec<&str> = allowed_origins_str
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .collect();
                for origin in origins {
                    cors = cors.allowed_origin(origin);
                }
                cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600)
            }
        };

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-XSS-Protection", "1; mode=block")),
            )
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(state.clone())
            .app_data(analyzer.clone())
            .configure(routes::api::config_api)
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes::views::config_views)
    })
    .bind(server_address)?
    .run()
    .await
}
