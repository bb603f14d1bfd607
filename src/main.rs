#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

mod appointment_type;
mod catalog;
mod config;
mod database;
mod error;
mod models;
mod protocol;
mod schema;
mod utils;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use diesel::{r2d2::ConnectionManager, MysqlConnection};

use crate::{
    catalog::AppointmentTypeCatalog,
    config::{Cli, Command, ServeArgs},
    database::{AppointmentTypeStore, MemoryStore, MysqlStore},
};

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command() {
        Command::Migrate(args) => {
            let pool = database::build_pool(&args.database_url, args.pool_size)?;
            database::run_migrations(&pool)?;
            log::info!("migrations applied");
            Ok(())
        }
        Command::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let store: Arc<dyn AppointmentTypeStore> = if args.in_memory {
        log::warn!("serving from process memory, rows are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let conn_url = args.database_url.clone().context("DATABASE_URL not found")?;
        let pool = database::build_pool(&conn_url, args.pool_size)?;
        if args.run_migrations {
            database::run_migrations(&pool)?;
        }
        Arc::new(MysqlStore::new(pool))
    };
    let catalog = AppointmentTypeCatalog::new(store);

    log::info!("listening on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .data(catalog.clone())
            .service(web::scope("/appointment_type").configure(appointment_type::config))
    })
    .bind(&args.bind)
    .with_context(|| format!("Failed to bind {}", args.bind))?
    .run()
    .await
    .context("HTTP server")
}
