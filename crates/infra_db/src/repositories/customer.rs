//! Customer repository implementation
//!
//! Database access for customers and their phones and addresses. Children
//! live in their own tables keyed by `customer_id` with `ON DELETE CASCADE`,
//! so deleting a customer row removes them too.
//!
//! Queries are bound at runtime, so building the crate needs no database.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::error::DatabaseError;

/// Repository for customer rows and their child rows
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns every customer row, ascending by id
    pub async fn list_customers(&self) -> Result<Vec<CustomerRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, document_type, document_number, given_names, first_surname,
                   second_surname, gender, birth_date, email
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves a customer row by id
    ///
    /// # Returns
    ///
    /// `None` if no row has this id
    pub async fn get_customer(&self, id: i32) -> Result<Option<CustomerRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, document_type, document_number, given_names, first_surname,
                   second_surname, gender, birth_date, email
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Returns the phones of the given customers, ascending by id
    pub async fn phones_for(&self, customer_ids: &[i32]) -> Result<Vec<PhoneRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PhoneRow>(
            r#"
            SELECT id, customer_id, number, phone_type
            FROM customer_phones
            WHERE customer_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(customer_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns the addresses of the given customers, ascending by id
    pub async fn addresses_for(&self, customer_ids: &[i32]) -> Result<Vec<AddressRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, description
            FROM customer_addresses
            WHERE customer_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(customer_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a customer row
    ///
    /// # Returns
    ///
    /// The generated id, or `DuplicateEntry` if the document number is taken
    pub async fn insert_customer(&self, customer: &CustomerFields) -> Result<i32, DatabaseError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO customers (
                document_type, document_number, given_names, first_surname,
                second_surname, gender, birth_date, email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&customer.document_type)
        .bind(customer.document_number)
        .bind(&customer.given_names)
        .bind(&customer.first_surname)
        .bind(&customer.second_surname)
        .bind(&customer.gender)
        .bind(customer.birth_date)
        .bind(&customer.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Overwrites the scalar columns of an existing customer
    ///
    /// # Errors
    ///
    /// `NotFound` if no row has this id
    pub async fn update_customer(&self, id: i32, customer: &CustomerFields) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET document_type = $2,
                document_number = $3,
                given_names = $4,
                first_surname = $5,
                second_surname = $6,
                gender = $7,
                birth_date = $8,
                email = $9,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&customer.document_type)
        .bind(customer.document_number)
        .bind(&customer.given_names)
        .bind(&customer.first_surname)
        .bind(&customer.second_surname)
        .bind(&customer.gender)
        .bind(customer.birth_date)
        .bind(&customer.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", id));
        }
        Ok(())
    }

    /// Deletes a customer row; phones and addresses follow by cascade
    ///
    /// # Errors
    ///
    /// `NotFound` if no row has this id
    pub async fn delete_customer(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", id));
        }
        Ok(())
    }

    /// Inserts phones in one transaction
    pub async fn insert_phones(&self, phones: &[NewPhoneRow]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        insert_phone_rows(&mut tx, phones).await?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Inserts addresses in one transaction
    pub async fn insert_addresses(&self, addresses: &[NewAddressRow]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        insert_address_rows(&mut tx, addresses).await?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Deletes every phone and address of a customer and inserts the new sets
    ///
    /// Runs in a single transaction: either both collections are replaced
    /// or neither is.
    pub async fn replace_children(
        &self,
        customer_id: i32,
        phones: &[NewPhoneRow],
        addresses: &[NewAddressRow],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM customer_phones WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM customer_addresses WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        insert_phone_rows(&mut tx, phones).await?;
        insert_address_rows(&mut tx, addresses).await?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Round-trips a trivial query to check connectivity
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

async fn insert_phone_rows(conn: &mut PgConnection, phones: &[NewPhoneRow]) -> Result<(), DatabaseError> {
    for phone in phones {
        sqlx::query(
            r#"
            INSERT INTO customer_phones (customer_id, number, phone_type)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(phone.customer_id)
        .bind(&phone.number)
        .bind(&phone.phone_type)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn insert_address_rows(conn: &mut PgConnection, addresses: &[NewAddressRow]) -> Result<(), DatabaseError> {
    for address in addresses {
        sqlx::query(
            r#"
            INSERT INTO customer_addresses (customer_id, description)
            VALUES ($1, $2)
            "#,
        )
        .bind(address.customer_id)
        .bind(&address.description)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

// ============================================================================
// Row Types
// ============================================================================

/// Row of the `customers` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: i32,
    pub document_type: String,
    pub document_number: i64,
    pub given_names: String,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
}

/// Row of the `customer_phones` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PhoneRow {
    pub id: i32,
    pub customer_id: i32,
    pub number: String,
    pub phone_type: String,
}

/// Row of the `customer_addresses` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AddressRow {
    pub id: i32,
    pub customer_id: i32,
    pub description: String,
}

/// Writable scalar columns of a customer
#[derive(Debug, Clone)]
pub struct CustomerFields {
    pub document_type: String,
    pub document_number: i64,
    pub given_names: String,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
}

/// Phone to insert
#[derive(Debug, Clone)]
pub struct NewPhoneRow {
    pub customer_id: i32,
    pub number: String,
    pub phone_type: String,
}

/// Address to insert
#[derive(Debug, Clone)]
pub struct NewAddressRow {
    pub customer_id: i32,
    pub description: String,
}
