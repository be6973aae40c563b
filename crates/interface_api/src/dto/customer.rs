//! Customer DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use domain_customer::{
    Address, AddressInput, Customer, CustomerCandidate, FirstAddressSummary, Phone, PhoneCountSummary,
    PhoneInput,
};

#[derive(Debug, Deserialize)]
pub struct PhoneRequest {
    pub numero: String,
    pub tipo: String,
}

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub descripcion: String,
}

/// Body of create and update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub tipo_documento: String,
    pub numero_documento: i64,
    pub nombres: String,
    pub apellido1: String,
    #[serde(default)]
    pub apellido2: Option<String>,
    pub genero: String,
    pub fecha_nacimiento: NaiveDate,
    pub email: String,
    /// Absent and `null` both mean no phones
    #[serde(default)]
    pub telefonos: Option<Vec<PhoneRequest>>,
    #[serde(default)]
    pub direcciones: Option<Vec<AddressRequest>>,
}

impl From<CustomerRequest> for CustomerCandidate {
    fn from(request: CustomerRequest) -> Self {
        Self {
            document_type: request.tipo_documento,
            document_number: request.numero_documento,
            given_names: request.nombres,
            first_surname: request.apellido1,
            second_surname: request.apellido2,
            gender: request.genero,
            birth_date: request.fecha_nacimiento,
            email: request.email,
            phones: request
                .telefonos
                .unwrap_or_default()
                .into_iter()
                .map(|p| PhoneInput::new(p.numero, p.tipo))
                .collect(),
            addresses: request
                .direcciones
                .unwrap_or_default()
                .into_iter()
                .map(|a| AddressInput::new(a.descripcion))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneResponse {
    pub telefono_id: i32,
    pub numero: String,
    pub tipo: String,
}

impl From<&Phone> for PhoneResponse {
    fn from(phone: &Phone) -> Self {
        Self {
            telefono_id: phone.id.value(),
            numero: phone.number.clone(),
            tipo: phone.phone_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub direccion_id: i32,
    pub descripcion: String,
}

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            direccion_id: address.id.value(),
            descripcion: address.description.clone(),
        }
    }
}

/// A stored customer as returned to callers
///
/// Phones and addresses omit their owning customer id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub cliente_id: i32,
    pub tipo_documento: String,
    pub numero_documento: i64,
    pub nombres: String,
    pub apellido1: String,
    pub apellido2: Option<String>,
    pub genero: String,
    pub fecha_nacimiento: NaiveDate,
    pub email: String,
    pub telefonos: Vec<PhoneResponse>,
    pub direcciones: Vec<AddressResponse>,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            cliente_id: customer.id.value(),
            tipo_documento: customer.document_type.code().to_string(),
            numero_documento: customer.document_number,
            nombres: customer.given_names.clone(),
            apellido1: customer.first_surname.clone(),
            apellido2: customer.second_surname.clone(),
            genero: customer.gender.clone(),
            fecha_nacimiento: customer.birth_date,
            email: customer.email.clone(),
            telefonos: customer.phones.iter().map(PhoneResponse::from).collect(),
            direcciones: customer.addresses.iter().map(AddressResponse::from).collect(),
        }
    }
}

impl CustomerResponse {
    pub fn list(customers: &[Customer]) -> Vec<Self> {
        customers.iter().map(Self::from).collect()
    }
}

/// Body of a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub cliente: CustomerResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneCountResponse {
    pub nombre_completo: String,
    pub cantidad_telefonos: usize,
}

impl From<PhoneCountSummary> for PhoneCountResponse {
    fn from(summary: PhoneCountSummary) -> Self {
        Self {
            nombre_completo: summary.full_name,
            cantidad_telefonos: summary.phone_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstAddressResponse {
    pub nombre_completo: String,
    pub primera_direccion: String,
}

impl From<FirstAddressSummary> for FirstAddressResponse {
    fn from(summary: FirstAddressSummary) -> Self {
        Self {
            nombre_completo: summary.full_name,
            primera_direccion: summary.first_address,
        }
    }
}

/// Query of `GET /clientes/buscar`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub nombre: Option<String>,
    pub documento: Option<String>,
}

/// Query of `GET /clientes/buscar/documento`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    #[serde(default)]
    pub numero_documento: String,
}

/// Query of `GET /clientes/buscar/rango-fechas`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
}
