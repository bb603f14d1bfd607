use diesel::{prelude::*, r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

use super::store::AppointmentTypeStore;
use crate::{
    error::CatalogError,
    models::appointment_types::{AppointmentType, NewAppointmentType, UpdateAppointmentType},
    schema::appointment_types,
    DbPool,
};

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::Bigint>,
    "MySQL's LAST_INSERT_ID()"
);

type Conn = PooledConnection<ConnectionManager<MysqlConnection>>;

pub struct MysqlStore {
    pool: DbPool,
}

impl MysqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn, CatalogError> {
        Ok(self.pool.get()?)
    }
}

fn count_code(conn: &Conn, tenant_id: &str, code: &str, except: Option<u64>) -> QueryResult<i64> {
    let mut query = appointment_types::table
        .filter(appointment_types::tenant_id.eq(tenant_id.to_string()))
        .filter(appointment_types::code.eq(code.to_string()))
        .into_boxed();
    if let Some(id) = except {
        query = query.filter(appointment_types::id.ne(id));
    }
    query.count().get_result::<i64>(conn)
}

impl AppointmentTypeStore for MysqlStore {
    fn insert(&self, data: NewAppointmentType) -> Result<AppointmentType, CatalogError> {
        let conn = self.conn()?;
        conn.transaction(|| {
            // the unique key still catches a concurrent insert between check and write
            if count_code(&conn, &data.tenant_id, &data.code, None)? > 0 {
                return Err(CatalogError::duplicate_code(&data.tenant_id, &data.code));
            }

            diesel::insert_into(appointment_types::table)
                .values(&data)
                .execute(&conn)?;
            let id = diesel::select(last_insert_id).get_result::<u64>(&conn)?;

            Ok(appointment_types::table
                .find(id)
                .get_result::<AppointmentType>(&conn)?)
        })
    }

    fn find(&self, id: u64) -> Result<Option<AppointmentType>, CatalogError> {
        let conn = self.conn()?;
        Ok(appointment_types::table
            .find(id)
            .get_result::<AppointmentType>(&conn)
            .optional()?)
    }

    fn find_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> Result<Option<AppointmentType>, CatalogError> {
        let conn = self.conn()?;
        Ok(appointment_types::table
            .filter(appointment_types::tenant_id.eq(tenant_id))
            .filter(appointment_types::code.eq(code))
            .get_result::<AppointmentType>(&conn)
            .optional()?)
    }

    fn update(
        &self,
        id: u64,
        changes: &UpdateAppointmentType,
    ) -> Result<AppointmentType, CatalogError> {
        let conn = self.conn()?;
        conn.transaction(|| {
            let current = appointment_types::table
                .find(id)
                .get_result::<AppointmentType>(&conn)
                .optional()?
                .ok_or(CatalogError::NotFound(id))?;

            if let Some(code) = &changes.code {
                if count_code(&conn, &current.tenant_id, code, Some(id))? > 0 {
                    return Err(CatalogError::duplicate_code(&current.tenant_id, code));
                }
            }

            diesel::update(appointment_types::table.find(id))
                .set(changes)
                .execute(&conn)?;

            Ok(appointment_types::table
                .find(id)
                .get_result::<AppointmentType>(&conn)?)
        })
    }

    fn list(
        &self,
        tenant_id: &str,
        active_only: bool,
    ) -> Result<Vec<AppointmentType>, CatalogError> {
        let conn = self.conn()?;
        let mut query = appointment_types::table
            .filter(appointment_types::tenant_id.eq(tenant_id.to_string()))
            .into_boxed();
        if active_only {
            query = query.filter(appointment_types::is_active.eq(true));
        }
        Ok(query
            .order((appointment_types::name.asc(), appointment_types::id.asc()))
            .get_results::<AppointmentType>(&conn)?)
    }
}
