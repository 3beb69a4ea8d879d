use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use booking_mailer::{
    background_task::start_limiter_purge_task,
    graceful_shutdown::shutdown_signal,
    routes::{configure_routes, cors_headers},
    settings::AppConfig,
    telemetry::init_tracing,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(config.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Loaded configuration: {:?}", config);

    if !config.has_api_key() {
        tracing::warn!("RESEND_API_KEY is not set, booking emails will fail to send");
    }

    let app_state = match AppState::new(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            tracing::error!("Failed to build email client: {}", e);
            std::process::exit(1);
        }
    };

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting {} v{} on {} (production: {})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.is_production()
    );

    if let Some(every) = config.rate_limit_purge_interval() {
        tokio::spawn(start_limiter_purge_task(
            app_state.booking_handler.limiter.clone(),
            every,
        ));
    }

    let allowed_origin = config.cors_allowed_origin.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(cors_headers(&allowed_origin))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
