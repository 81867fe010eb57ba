use actix_web::{web, HttpServer};
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use quillpost::cli::CLIArgs;
use quillpost::configure_application;
use quillpost::establish_database_connection_pool;
use quillpost::logging::initialize_tracing;
use quillpost::state::ApplicationStateInner;
use quillpost_configuration::Configuration;
use quillpost_database::{PostgresDatabase, MIGRATOR};
use tracing::info;



#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "quillpost.log",
    )
    .into_diagnostic()
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = %configuration.configuration_file_path.display(),
        "Configuration loaded."
    );


    // Connect to the database and bring the schema up to date if asked to.
    let database_pool = establish_database_connection_pool(&configuration.database)
        .await
        .into_diagnostic()
        .wrap_err("Failed to connect to the database.")?;

    if arguments.apply_pending_migrations {
        info!("Applying pending database migrations.");

        MIGRATOR
            .run(&database_pool)
            .await
            .into_diagnostic()
            .wrap_err("Failed to apply pending database migrations.")?;
    }

    let state = web::Data::new(ApplicationStateInner::from_database(
        PostgresDatabase::new(database_pool),
    ));


    // Initialize and start the actix HTTP server.
    let json_body_limit_bytes = configuration.http.json_body_limit_bytes;

    #[rustfmt::skip]
    let server = HttpServer::new(move || {
        // FIXME Modify permissive CORS to something more safe in production.
        let cors = actix_cors::Cors::permissive().expose_headers(vec![
            "Date",
            "Content-Type",
            "Content-Length",
        ]);

        actix_web::App::new()
            .wrap(actix_web::middleware::NormalizePath::trim())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_application(state.clone(), json_body_limit_bytes))
    })
        .bind((
            configuration.http.host.as_str(),
            configuration.http.port,
        ))
        .into_diagnostic()
        .wrap_err("Failed to set up actix HTTP server.")?;

    info!(
        host = configuration.http.host.as_str(),
        port = configuration.http.port,
        "HTTP server initialized and running."
    );

    // Run HTTP server until stopped.
    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;


    drop(guard);

    Ok(())
}
