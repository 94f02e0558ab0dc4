//! Database models for car listings.

use crate::api::models::cars::CarCreate;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::collections::HashMap;

/// A car listing row.
///
/// `id`, `created_at` and `updated_at` are assigned by the database; every
/// other attribute is stored verbatim as supplied by the client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i32,
    pub thumbnail: String,
    pub brand: String,
    pub name: String,
    pub variant: String,
    pub km_driven: i32,
    pub fuel_type: String,
    pub body_type: String,
    pub transmission_type: String,
    pub price: f64,
    pub location: String,
    pub insurance: String,
    pub no_of_seats: i32,
    pub reg_number: String,
    pub ownership: i32,
    pub engine_displacement: i32,
    pub highway_mileage: f64,
    pub make_year: i32,
    pub reg_year: i32,
    // Serialized structured data maintained by the frontend
    pub features: String,
    pub specifications: String,
    pub images: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new car listing.
///
/// Deliberately has no id or timestamp fields: those are always assigned by
/// the store, regardless of what the caller sent.
#[derive(Debug, Clone)]
pub struct CarCreateDBRequest {
    pub thumbnail: String,
    pub brand: String,
    pub name: String,
    pub variant: String,
    pub km_driven: i32,
    pub fuel_type: String,
    pub body_type: String,
    pub transmission_type: String,
    pub price: f64,
    pub location: String,
    pub insurance: String,
    pub no_of_seats: i32,
    pub reg_number: String,
    pub ownership: i32,
    pub engine_displacement: i32,
    pub highway_mileage: f64,
    pub make_year: i32,
    pub reg_year: i32,
    pub features: String,
    pub specifications: String,
    pub images: String,
}

impl From<CarCreate> for CarCreateDBRequest {
    fn from(api: CarCreate) -> Self {
        Self {
            thumbnail: api.thumbnail,
            brand: api.brand,
            name: api.name,
            variant: api.variant,
            km_driven: api.km_driven,
            fuel_type: api.fuel_type,
            body_type: api.body_type,
            transmission_type: api.transmission_type,
            price: api.price,
            location: api.location,
            insurance: api.insurance,
            no_of_seats: api.no_of_seats,
            reg_number: api.reg_number,
            ownership: api.ownership,
            engine_displacement: api.engine_displacement,
            highway_mileage: api.highway_mileage,
            make_year: api.make_year,
            reg_year: api.reg_year,
            features: api.features,
            specifications: api.specifications,
            images: api.images,
        }
    }
}

/// Maps JSON keys from partial-update requests to database column names.
///
/// This table is the only path from client-supplied field names into SQL
/// text: column names are interpolated from here and nowhere else, while
/// values are always bound as parameters. `id`, `created_at` and
/// `updated_at` are intentionally absent.
static UPDATABLE_COLUMNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("thumbnail", "thumbnail"),
        ("brand", "brand"),
        ("name", "name"),
        ("variant", "variant"),
        ("km_driven", "km_driven"),
        ("fuel_type", "fuel_type"),
        ("body_type", "body_type"),
        ("transmission_type", "transmission_type"),
        ("price", "price"),
        ("location", "location"),
        ("insurance", "insurance"),
        ("no_of_seats", "no_of_seats"),
        ("reg_number", "reg_number"),
        ("ownership", "ownership"),
        ("engine_displacement", "engine_displacement"),
        ("highway_mileage", "highway_mileage"),
        ("make_year", "make_year"),
        ("reg_year", "reg_year"),
        ("specifications", "specifications"),
        ("features", "features"),
        ("images", "images"),
    ])
});

/// Translate an external field name to its column name, if updatable.
pub fn column_for_field(field: &str) -> Option<&'static str> {
    UPDATABLE_COLUMNS.get(field).copied()
}

/// Database request for a partial update: translated column/value pairs.
///
/// Column names are `&'static str` taken from [`UPDATABLE_COLUMNS`], so an
/// untrusted string cannot end up interpolated into the statement.
#[derive(Debug, Clone, Default)]
pub struct CarUpdateDBRequest {
    pub sets: Vec<(&'static str, Value)>,
}

impl CarUpdateDBRequest {
    /// Translate a decoded update payload entry by entry.
    ///
    /// Unknown field names are dropped, not errors; this matches the observed
    /// client behavior of sending whole records back on edit.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let mut sets = Vec::with_capacity(fields.len());
        for (field, value) in fields {
            match column_for_field(&field) {
                Some(column) => sets.push((column, value)),
                None => tracing::warn!(%field, "ignoring unknown field in update request"),
            }
        }
        Self { sets }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
