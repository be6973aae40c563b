//! Integration tests for the HTTP API over the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::CustomerId;
use domain_customer::{Customer, CustomerCandidate, CustomerService, CustomerStore, InMemoryCustomerStore};
use interface_api::{create_router, AppState};
use test_utils::{assert_children_owned, assert_has_children, assert_sorted_by_name, CustomerFixtures};

fn setup() -> (Router, InMemoryCustomerStore) {
    let store = InMemoryCustomerStore::new();
    let service =
        CustomerService::new(Arc::new(store.clone())).with_clock(CustomerFixtures::clock());
    (create_router(AppState::new(service)), store)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

/// A valid adult customer body as of the fixture clock
fn customer_body(nombres: &str, numero_documento: i64) -> Value {
    json!({
        "tipoDocumento": "CC",
        "numeroDocumento": numero_documento,
        "nombres": nombres,
        "apellido1": "Restrepo",
        "apellido2": "Gómez",
        "genero": "F",
        "fechaNacimiento": "1990-03-15",
        "email": "cliente@example.com",
        "telefonos": [{"numero": "3001234567", "tipo": "mobile"}],
        "direcciones": [{"descripcion": "Calle 10 # 43-12"}]
    })
}

/// The wire body of a domain candidate
fn candidate_body(candidate: &CustomerCandidate) -> Value {
    json!({
        "tipoDocumento": candidate.document_type,
        "numeroDocumento": candidate.document_number,
        "nombres": candidate.given_names,
        "apellido1": candidate.first_surname,
        "apellido2": candidate.second_surname,
        "genero": candidate.gender,
        "fechaNacimiento": candidate.birth_date,
        "email": candidate.email,
        "telefonos": candidate
            .phones
            .iter()
            .map(|p| json!({"numero": p.number, "tipo": p.phone_type}))
            .collect::<Vec<_>>(),
        "direcciones": candidate
            .addresses
            .iter()
            .map(|a| json!({"descripcion": a.description}))
            .collect::<Vec<_>>(),
    })
}

/// Loads the stored customer behind a response body
async fn stored(store: &InMemoryCustomerStore, body: &Value) -> Customer {
    let id = body["clienteId"].as_i64().unwrap() as i32;
    store.get_by_id(CustomerId::new(id)).await.unwrap().unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, _, json) = send(app, "POST", "/clientes", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = setup();
        let (status, _, json) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_store_health() {
        let (app, store) = setup();

        let (status, _, json) = send(&app, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ready");

        store.set_unavailable(true);
        let (status, _, json) = send(&app, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "ServiceUnavailable");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let (app, _) = setup();
        let (_, headers, _) = send(&app, "GET", "/clientes", None).await;

        assert!(headers.contains_key("x-request-id"));
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_created_with_location() {
        let (app, _) = setup();
        let (status, headers, json) =
            send(&app, "POST", "/clientes", Some(customer_body("Ana", 123))).await;

        assert_eq!(status, StatusCode::CREATED);
        let id = json["clienteId"].as_i64().unwrap();
        assert_eq!(
            headers.get(header::LOCATION).unwrap(),
            format!("/clientes/{}", id).as_str()
        );
        assert_eq!(json["numeroDocumento"], 123);
        assert_eq!(json["tipoDocumento"], "CC");
        assert!(json["telefonos"][0]["telefonoId"].is_i64());
        assert!(json["telefonos"][0].get("clienteId").is_none());
        assert!(json["direcciones"][0].get("clienteId").is_none());
    }

    #[tokio::test]
    async fn test_each_document_type_registers_for_its_age() {
        let (app, store) = setup();

        for candidate in [
            CustomerFixtures::adult_candidate(),
            CustomerFixtures::minor_candidate(),
            CustomerFixtures::child_candidate(),
        ] {
            let json = create(&app, candidate_body(&candidate)).await;
            assert_eq!(json["tipoDocumento"], candidate.document_type.as_str());

            let customer = stored(&store, &json).await;
            assert_has_children(&customer);
            assert_children_owned(&customer);
        }
    }

    #[tokio::test]
    async fn test_random_customers_round_trip() {
        let (app, _) = setup();

        for _ in 0..3 {
            let candidate = CustomerFixtures::random_adult_candidate();
            let created = create(&app, candidate_body(&candidate)).await;
            let uri = format!("/clientes/{}", created["clienteId"]);

            let (status, _, fetched) = send(&app, "GET", &uri, None).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(fetched["nombres"], candidate.given_names.as_str());
            assert_eq!(fetched["email"], candidate.email.as_str());
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (app, _) = setup();
        let created = create(&app, customer_body("Ana", 123)).await;
        let uri = format!("/clientes/{}", created["clienteId"]);

        let (status, _, fetched) = send(&app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_without_phones_is_bad_request() {
        let (app, store) = setup();
        let mut body = customer_body("Ana", 123);
        body["telefonos"] = json!([]);

        let (status, _, json) = send(&app, "POST", "/clientes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "MissingPhone");
        assert!(json["message"].as_str().unwrap().contains("phone"));
        assert_eq!(store.customer_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_with_null_phones_is_missing_phone() {
        let (app, store) = setup();
        let mut body = customer_body("Ana", 123);
        body["telefonos"] = Value::Null;

        let (status, _, json) = send(&app, "POST", "/clientes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "MissingPhone");
        assert_eq!(store.customer_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_without_address_list_is_missing_address() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 123);
        body.as_object_mut().unwrap().remove("direcciones");

        let (status, _, json) = send(&app, "POST", "/clientes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "MissingAddress");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request_with_reason() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 123);
        body.as_object_mut().unwrap().remove("email");

        let (status, _, json) = send(&app, "POST", "/clientes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "InvalidBody");
        assert!(json["message"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_create_with_wrong_document_type_is_bad_request() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 123);
        body["tipoDocumento"] = json!("RC");

        let (status, _, json) = send(&app, "POST", "/clientes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "InvalidDocumentTypeForAge");
    }

    #[tokio::test]
    async fn test_create_with_invalid_email_is_bad_request() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 123);
        body["email"] = json!("not-an-email");

        let (status, _, json) = send(&app, "POST", "/clientes", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "InvalidEmailFormat");
    }

    #[tokio::test]
    async fn test_duplicate_document_is_bad_request() {
        let (app, store) = setup();
        create(&app, customer_body("Ana", 123)).await;

        let (status, _, json) =
            send(&app, "POST", "/clientes", Some(customer_body("Otra", 123))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "DuplicateDocumentNumber");
        assert_eq!(store.customer_count().await, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let (app, store) = setup();
        store.set_unavailable(true);

        let (status, _, json) =
            send(&app, "POST", "/clientes", Some(customer_body("Ana", 123))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "PersistenceFailed");
    }
}

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn test_update_replaces_children() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 123);
        body["telefonos"] = json!([
            {"numero": "1", "tipo": "mobile"},
            {"numero": "2", "tipo": "home"}
        ]);
        let created = create(&app, body).await;
        let uri = format!("/clientes/{}", created["clienteId"]);

        let mut update = customer_body("Ana Lucía", 123);
        update["telefonos"] = json!([{"numero": "3", "tipo": "work"}]);
        let (status, _, json) = send(&app, "PUT", &uri, Some(update)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nombres"], "Ana Lucía");
        assert_eq!(json["telefonos"].as_array().unwrap().len(), 1);
        assert_eq!(json["telefonos"][0]["numero"], "3");
    }

    #[tokio::test]
    async fn test_update_keeping_own_document_number() {
        let (app, _) = setup();
        let created = create(&app, customer_body("Ana", 123)).await;
        let uri = format!("/clientes/{}", created["clienteId"]);

        let (status, _, _) = send(&app, "PUT", &uri, Some(customer_body("Ana", 123))).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_to_taken_document_number_is_bad_request() {
        let (app, _) = setup();
        create(&app, customer_body("Ana", 123)).await;
        let other = create(&app, customer_body("Luis", 456)).await;
        let uri = format!("/clientes/{}", other["clienteId"]);

        let (status, _, json) = send(&app, "PUT", &uri, Some(customer_body("Luis", 123))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "DuplicateDocumentNumber");
    }

    #[tokio::test]
    async fn test_update_unknown_customer_is_bad_request() {
        let (app, _) = setup();

        let (status, _, json) =
            send(&app, "PUT", "/clientes/99", Some(customer_body("Ana", 123))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "NotFound");
    }

    #[tokio::test]
    async fn test_delete_returns_last_state() {
        let (app, store) = setup();
        let created = create(&app, customer_body("Ana", 123)).await;
        let uri = format!("/clientes/{}", created["clienteId"]);

        let (status, _, json) = send(&app, "DELETE", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["message"].is_string());
        assert_eq!(json["cliente"], created);
        assert_eq!(store.phone_count().await, 0);
        assert_eq!(store.address_count().await, 0);

        let (status, _, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request_with_reason() {
        let (app, _) = setup();

        let (status, _, json) = send(&app, "GET", "/clientes/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "InvalidPath");
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_delete_unknown_customer_is_not_found() {
        let (app, _) = setup();

        let (status, _, json) = send(&app, "DELETE", "/clientes/99", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "NotFound");
        assert!(json["message"].is_string());
    }
}

mod queries {
    use super::*;

    #[tokio::test]
    async fn test_list_is_empty_not_error() {
        let (app, _) = setup();
        let (status, _, json) = send(&app, "GET", "/clientes", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_search_by_name_is_case_insensitive() {
        let (app, store) = setup();
        create(&app, customer_body("Ana", 1)).await;
        create(&app, customer_body("Mariana", 2)).await;
        create(&app, customer_body("Luis", 3)).await;

        let (status, _, json) = send(&app, "GET", "/clientes/buscar?nombre=ana", None).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["nombres"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Ana", "Mariana"]);

        let mut customers = Vec::new();
        for body in json.as_array().unwrap() {
            customers.push(stored(&store, body).await);
        }
        assert_sorted_by_name(&customers);
    }

    #[tokio::test]
    async fn test_search_without_matches_is_not_found() {
        let (app, _) = setup();
        create(&app, customer_body("Ana", 1)).await;

        let (status, _, json) = send(&app, "GET", "/clientes/buscar?nombre=zoe", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "NotFound");
    }

    #[tokio::test]
    async fn test_search_by_document_highest_first() {
        let (app, _) = setup();
        create(&app, customer_body("Ana", 1234)).await;
        create(&app, customer_body("Luis", 9123)).await;
        create(&app, customer_body("Eva", 5555)).await;

        let (status, _, json) = send(
            &app,
            "GET",
            "/clientes/buscar/documento?numeroDocumento=123",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let numbers: Vec<i64> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["numeroDocumento"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![9123, 1234]);
    }

    #[tokio::test]
    async fn test_search_by_birth_date_range_oldest_first() {
        let (app, _) = setup();
        let mut older = customer_body("Beto", 1);
        older["fechaNacimiento"] = json!("1980-01-01");
        create(&app, customer_body("Ana", 2)).await;
        create(&app, older).await;

        let (status, _, json) = send(
            &app,
            "GET",
            "/clientes/buscar/rango-fechas?fechaInicio=1970-01-01&fechaFin=1995-12-31",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["nombres"], "Beto");
        assert_eq!(json[1]["nombres"], "Ana");
    }

    #[tokio::test]
    async fn test_empty_date_range_is_empty_list() {
        let (app, _) = setup();
        create(&app, customer_body("Ana", 1)).await;

        let (status, _, json) = send(
            &app,
            "GET",
            "/clientes/buscar/rango-fechas?fechaInicio=2000-01-01&fechaFin=1990-01-01",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_invalid_date_in_range_is_bad_request() {
        let (app, _) = setup();

        let (status, _, json) = send(
            &app,
            "GET",
            "/clientes/buscar/rango-fechas?fechaInicio=ayer&fechaFin=1995-12-31",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "InvalidQuery");
    }

    #[tokio::test]
    async fn test_multiple_phones_report() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 1);
        body["apellido2"] = Value::Null;
        body["telefonos"] = json!([
            {"numero": "1", "tipo": "mobile"},
            {"numero": "2", "tipo": "home"}
        ]);
        create(&app, body).await;
        create(&app, customer_body("Luis", 2)).await;

        let (status, _, json) = send(&app, "GET", "/clientes/multiples-telefonos", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([{"nombreCompleto": "Ana Restrepo ", "cantidadTelefonos": 2}])
        );
    }

    #[tokio::test]
    async fn test_multiple_addresses_report_uses_first_address() {
        let (app, _) = setup();
        let mut body = customer_body("Ana", 1);
        body["direcciones"] = json!([
            {"descripcion": "Primera"},
            {"descripcion": "Segunda"}
        ]);
        create(&app, body).await;

        let (status, _, json) = send(&app, "GET", "/clientes/multiples-direcciones", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([{"nombreCompleto": "Ana Restrepo Gómez", "primeraDireccion": "Primera"}])
        );
    }
}
