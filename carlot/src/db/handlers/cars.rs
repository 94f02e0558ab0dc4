//! Record store for car listings.

use crate::db::{
    errors::Result,
    models::cars::{Car, CarCreateDBRequest, CarUpdateDBRequest},
};
use serde_json::Value;
use sqlx::{PgPool, Postgres, query_builder::QueryBuilder};
use tracing::instrument;

/// Read/write capability set of the car record store.
///
/// Handlers receive this through [`crate::AppState`] as a trait object so
/// tests can substitute an in-memory implementation.
#[async_trait::async_trait]
pub trait CarStore: Send + Sync {
    /// Insert a new listing; the store assigns id and both timestamps.
    async fn create(&self, request: CarCreateDBRequest) -> Result<Car>;

    /// Every listing, full shape, store order. Unbounded; acceptable only
    /// while the inventory stays small.
    async fn list(&self) -> Result<Vec<Car>>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Car>>;

    /// Apply a translated partial update and return the updated row, or
    /// `None` if the id matched nothing. `updated_at` always advances.
    async fn update_fields(&self, id: i32, request: CarUpdateDBRequest) -> Result<Option<Car>>;

    /// Returns whether a row was actually deleted.
    async fn delete(&self, id: i32) -> Result<bool>;
}

/// PostgreSQL-backed car store over a shared connection pool.
#[derive(Clone)]
pub struct Cars {
    pool: PgPool,
}

impl Cars {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CarStore for Cars {
    #[instrument(skip(self, request), fields(brand = %request.brand, name = %request.name), err)]
    async fn create(&self, request: CarCreateDBRequest) -> Result<Car> {
        let car = sqlx::query_as::<_, Car>(
            "INSERT INTO cars (thumbnail, brand, name, variant, km_driven, fuel_type, body_type, transmission_type, \
             price, location, insurance, no_of_seats, reg_number, ownership, engine_displacement, highway_mileage, \
             make_year, reg_year, specifications, features, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21) \
             RETURNING *",
        )
        .bind(request.thumbnail)
        .bind(request.brand)
        .bind(request.name)
        .bind(request.variant)
        .bind(request.km_driven)
        .bind(request.fuel_type)
        .bind(request.body_type)
        .bind(request.transmission_type)
        .bind(request.price)
        .bind(request.location)
        .bind(request.insurance)
        .bind(request.no_of_seats)
        .bind(request.reg_number)
        .bind(request.ownership)
        .bind(request.engine_displacement)
        .bind(request.highway_mileage)
        .bind(request.make_year)
        .bind(request.reg_year)
        .bind(request.specifications)
        .bind(request.features)
        .bind(request.images)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars").fetch_all(&self.pool).await?;

        Ok(cars)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: i32) -> Result<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    #[instrument(skip(self, request), fields(fields = request.sets.len()), err)]
    async fn update_fields(&self, id: i32, request: CarUpdateDBRequest) -> Result<Option<Car>> {
        let mut statement = update_statement(id, &request);
        let car = statement.build_query_as::<Car>().fetch_optional(&self.pool).await?;

        Ok(car)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1").bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Build the dynamic UPDATE statement for a partial update.
///
/// Column names come exclusively from the translated request (allowlisted
/// `&'static str`); every client value is a bound parameter, typed by its
/// JSON representation. The mutation timestamp is forced on every update,
/// and the row id is the final parameter.
fn update_statement(id: i32, request: &CarUpdateDBRequest) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new("UPDATE cars SET ");

    {
        let mut sets = builder.separated(", ");
        for (column, value) in &request.sets {
            sets.push(format!("{column} = "));
            match value {
                Value::Null => {
                    sets.push_unseparated("NULL");
                }
                Value::Bool(flag) => {
                    sets.push_bind_unseparated(*flag);
                }
                Value::Number(number) => {
                    if let Some(int) = number.as_i64() {
                        sets.push_bind_unseparated(int);
                    } else {
                        sets.push_bind_unseparated(number.as_f64().unwrap_or(f64::NAN));
                    }
                }
                Value::String(text) => {
                    sets.push_bind_unseparated(text.clone());
                }
                // Arrays and objects target the serialized-JSON text columns
                other => {
                    sets.push_bind_unseparated(other.to_string());
                }
            }
        }
        sets.push("updated_at = CURRENT_TIMESTAMP");
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");
    builder
}
