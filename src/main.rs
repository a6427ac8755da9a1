use actix_cors::Cors;
use actix_web::{web::Data, App, HttpServer};
use std::env;

mod cloud_provider;
mod command;
mod launch;
mod util;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    std::env::set_var("RUST_LOG", "actix_web=debug");
    env_logger::init();

    // Credentials come from the default chain (env vars, credentials file,
    // instance role) and are threaded into the handlers explicitly.
    let credentials = cloud_provider::resolve_credentials()
        .await
        .expect("Failed to resolve AWS credentials.");

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string());

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(Data::new(credentials.clone()))
            .configure(launch::configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
