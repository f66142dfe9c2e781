mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;
use config::Config;
use db::memory::MemoryRecordStore;
use db::postgres::PgRecordStore;
use db::RecordStore;
use services::employee::EmployeeService;
use utils::image_store::ImageStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(database_url) => {
            let store = PgRecordStore::connect(database_url)
                .await
                .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("Failed to connect to the database: {}", err)))?;
            info!("Connected to PostgreSQL record store");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set; employee records are kept in memory and lost on restart");
            Arc::new(MemoryRecordStore::default())
        }
    };

    let images = ImageStore::open(&config.upload_dir, config.max_image_bytes).await?;
    let service = web::Data::new(EmployeeService::new(store, images));

    warn!("POST /login accepts any non-empty credentials; there is no authentication");
    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .app_data(handlers::json_config())
            .configure(handlers::routes)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
