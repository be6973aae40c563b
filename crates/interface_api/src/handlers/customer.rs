//! Customer handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::debug;

use core_kernel::{CustomerId, DateRange};

use crate::dto::customer::*;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::{error::ApiError, AppState};

/// Lists every customer
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state.service.list_all().await?;
    Ok(Json(CustomerResponse::list(&customers)))
}

/// Gets a customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.service.get(CustomerId::new(id)).await?;
    Ok(Json(CustomerResponse::from(&customer)))
}

/// Registers a customer with its phones and addresses
///
/// Responds 201 with the stored record and a `Location` header.
pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.register(request.into()).await?;
    let location = format!("/clientes/{}", customer.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CustomerResponse::from(&customer)),
    ))
}

/// Updates a customer, replacing its phones and addresses
///
/// An unknown id is reported as a bad request.
pub async fn update_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state
        .service
        .update(CustomerId::new(id), request.into())
        .await
        .map_err(ApiError::rejected)?;
    Ok(Json(CustomerResponse::from(&customer)))
}

/// Deletes a customer and returns its last state
pub async fn delete_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let customer = state.service.delete(CustomerId::new(id)).await?;
    Ok(Json(DeleteResponse {
        message: format!("Customer {} deleted", customer.id),
        cliente: CustomerResponse::from(&customer),
    }))
}

/// Searches by name and document fragment, 404 when nothing matches
pub async fn search_customers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state
        .service
        .search(query.nombre.as_deref(), query.documento.as_deref())
        .await?;

    if customers.is_empty() {
        debug!(?query, "Search returned no customers");
        return Err(ApiError::NotFound {
            kind: "NotFound",
            message: "No customers match the given filters".to_string(),
        });
    }

    Ok(Json(CustomerResponse::list(&customers)))
}

/// Searches by document number fragment
pub async fn search_by_document(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DocumentQuery>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state
        .service
        .search_by_document_fragment(&query.numero_documento)
        .await?;
    Ok(Json(CustomerResponse::list(&customers)))
}

/// Searches by inclusive birth date range
pub async fn search_by_birth_date_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let range = DateRange::new(query.fecha_inicio, query.fecha_fin);
    let customers = state.service.search_by_birth_date_range(range).await?;
    Ok(Json(CustomerResponse::list(&customers)))
}

/// Customers with more than one phone
pub async fn multiple_phones_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<PhoneCountResponse>>, ApiError> {
    let report = state.service.customers_with_multiple_phones().await?;
    Ok(Json(report.into_iter().map(PhoneCountResponse::from).collect()))
}

/// Customers with more than one address
pub async fn multiple_addresses_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<FirstAddressResponse>>, ApiError> {
    let report = state.service.customers_with_multiple_addresses().await?;
    Ok(Json(report.into_iter().map(FirstAddressResponse::from).collect()))
}
