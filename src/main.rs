use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use perkpass_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    tasks,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    let card_service = CardService::new(pool.clone(), config.business.clone());
    let notification_service = NotificationService::new(pool.clone());
    let sweep_service = SweepService::new(
        pool.clone(),
        config.sweep.clone(),
        notification_service.clone(),
    );
    let recruitment_service = RecruitmentService::new(
        pool.clone(),
        config.business.clone(),
        card_service.clone(),
    );
    let payment_service = PaymentService::new(
        pool.clone(),
        config.business.clone(),
        card_service.clone(),
    );
    let customer_service = CustomerService::new(
        pool.clone(),
        config.business.clone(),
        card_service.clone(),
    );
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone(), config.business.clone());

    // Daily overdue sweep runs alongside the HTTP server.
    tasks::spawn_all(sweep_service.clone(), config.sweep.interval_secs);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(card_service.clone()))
            .app_data(web::Data::new(recruitment_service.clone()))
            .app_data(web::Data::new(payment_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(sweep_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::card_config)
                    .configure(handlers::customer_config)
                    .configure(handlers::pos_config)
                    .configure(handlers::recruitment_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
