mod config;
mod error;
mod handlers;
mod mailer;
mod models;
mod routes;

use actix_web::{App, HttpServer, web};
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().expect("Failed to load .env file");

    HttpServer::new(|| {
        App::new()
            .app_data(web::Data::new(mailer::env_config_source()))
            .app_data(web::Data::new(mailer::smtp_relay_factory()))
            .configure(routes::init)
    })
    .bind(("0.0.0.0", 80))?
    .run()
    .await
}
