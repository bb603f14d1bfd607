pub mod memory;
pub mod mysql;
pub mod store;

use anyhow::Context;
use diesel::{r2d2::ConnectionManager, MysqlConnection};

use crate::DbPool;

pub use self::{memory::MemoryStore, mysql::MysqlStore, store::AppointmentTypeStore};

embed_migrations!("migrations");

pub fn build_pool(database_url: &str, max_size: u32) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<MysqlConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create pool")
}

pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get().context("DB connection")?;
    let mut output = Vec::new();
    embedded_migrations::run_with_output(&*conn, &mut output).context("Running migrations")?;
    for line in String::from_utf8_lossy(&output).lines() {
        log::info!("{}", line);
    }
    Ok(())
}
