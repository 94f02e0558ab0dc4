//! API request/response models for car listings.

use crate::db::models::cars::Car;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Create payload: every attribute except id and timestamps.
///
/// Caller-supplied `id`, `created_at` or `updated_at` keys are simply
/// ignored during decoding; the store assigns those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarCreate {
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

/// Full car listing as returned by every read or mutation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarResponse {
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
    pub features: String,
    pub specifications: String,
    pub images: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(db: Car) -> Self {
        Self {
            id: db.id,
            thumbnail: db.thumbnail,
            brand: db.brand,
            name: db.name,
            variant: db.variant,
            km_driven: db.km_driven,
            fuel_type: db.fuel_type,
            body_type: db.body_type,
            transmission_type: db.transmission_type,
            price: db.price,
            location: db.location,
            insurance: db.insurance,
            no_of_seats: db.no_of_seats,
            reg_number: db.reg_number,
            ownership: db.ownership,
            engine_displacement: db.engine_displacement,
            highway_mileage: db.highway_mileage,
            make_year: db.make_year,
            reg_year: db.reg_year,
            features: db.features,
            specifications: db.specifications,
            images: db.images,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
