use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Map, Value};

use crate::{
    AppState,
    api::models::cars::{CarCreate, CarResponse},
    db::models::cars::CarUpdateDBRequest,
    errors::Error,
};

fn car_not_found(id: i32) -> Error {
    Error::NotFound {
        resource: "Car".to_string(),
        id: id.to_string(),
    }
}

// POST /cars - Create a new listing
pub async fn create_car(State(state): State<AppState>, Json(request): Json<CarCreate>) -> Result<(StatusCode, Json<CarResponse>), Error> {
    let car = state.cars.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(car.into())))
}

// GET /cars - List every listing
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, Error> {
    let cars = state.cars.list().await?;

    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

// GET /cars/{id} - Fetch a single listing
pub async fn get_car(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CarResponse>, Error> {
    let car = state.cars.get_by_id(id).await?.ok_or_else(|| car_not_found(id))?;

    Ok(Json(car.into()))
}

// PUT /cars/{id} - Partial update from an open-ended field map
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<CarResponse>, Error> {
    if fields.is_empty() {
        return Err(Error::BadRequest {
            message: "No fields provided for update".to_string(),
        });
    }

    // Translate through the column allowlist; unknown keys are dropped there.
    let request = CarUpdateDBRequest::from_fields(fields);
    if request.is_empty() {
        return Err(Error::BadRequest {
            message: "No valid fields provided for update".to_string(),
        });
    }

    let car = state.cars.update_fields(id, request).await?.ok_or_else(|| car_not_found(id))?;

    Ok(Json(car.into()))
}

// DELETE /cars/{id} - Remove a listing
pub async fn delete_car(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, Error> {
    let deleted = state.cars.delete(id).await?;
    if !deleted {
        return Err(car_not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}
