//! PostgreSQL-backed `AllocationRepository` implementation using Diesel ORM.
//!
//! Persists allocations exactly as handed over by the services; timestamps
//! are never generated here.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::booking::{Allocation, AllocationChanges, Employee, NewAllocation};
use crate::domain::ports::{
    AllocationFilter, AllocationOrder, AllocationRepository, AllocationRepositoryError,
    SortDirection, SortField,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AllocationChangesRow, AllocationRow, NewAllocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::allocations;

/// Diesel-backed implementation of the allocation repository port.
#[derive(Clone)]
pub struct DieselAllocationRepository {
    pool: DbPool,
}

impl DieselAllocationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_repository_pool_error(error: PoolError) -> AllocationRepositoryError {
    map_pool_error(error, |message| {
        AllocationRepositoryError::connection(message)
    })
}

fn map_repository_diesel_error(error: diesel::result::Error) -> AllocationRepositoryError {
    map_diesel_error(
        error,
        AllocationRepositoryError::query,
        AllocationRepositoryError::connection,
    )
}

fn row_to_allocation(row: AllocationRow) -> Allocation {
    Allocation {
        id: row.id,
        room_id: row.room_id,
        employee: Employee::new(row.employee_name, row.employee_email),
        subject: row.subject,
        start_at: row.start_at,
        end_at: row.end_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl AllocationRepository for DieselAllocationRepository {
    async fn insert(
        &self,
        allocation: &NewAllocation,
    ) -> Result<Allocation, AllocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        let new_row = NewAllocationRow {
            room_id: allocation.room_id,
            employee_name: &allocation.employee.name,
            employee_email: &allocation.employee.email,
            subject: &allocation.subject,
            start_at: allocation.start_at,
            end_at: allocation.end_at,
            created_at: allocation.created_at,
            updated_at: allocation.updated_at,
        };

        let row: AllocationRow = diesel::insert_into(allocations::table)
            .values(&new_row)
            .returning(AllocationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_repository_diesel_error)?;

        Ok(row_to_allocation(row))
    }

    async fn find_by_id(
        &self,
        allocation_id: i64,
    ) -> Result<Option<Allocation>, AllocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        let row = allocations::table
            .filter(allocations::id.eq(allocation_id))
            .select(AllocationRow::as_select())
            .first::<AllocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_repository_diesel_error)?;

        Ok(row.map(row_to_allocation))
    }

    async fn update(
        &self,
        allocation_id: i64,
        changes: &AllocationChanges,
    ) -> Result<Option<Allocation>, AllocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        let changes_row = AllocationChangesRow {
            subject: &changes.subject,
            start_at: changes.start_at,
            end_at: changes.end_at,
            updated_at: changes.updated_at,
        };

        let row = diesel::update(allocations::table.filter(allocations::id.eq(allocation_id)))
            .set(&changes_row)
            .returning(AllocationRow::as_returning())
            .get_result::<AllocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_repository_diesel_error)?;

        Ok(row.map(row_to_allocation))
    }

    async fn delete(&self, allocation_id: i64) -> Result<bool, AllocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        let deleted = diesel::delete(allocations::table.filter(allocations::id.eq(allocation_id)))
            .execute(&mut conn)
            .await
            .map_err(map_repository_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list(
        &self,
        filter: &AllocationFilter,
    ) -> Result<Vec<Allocation>, AllocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        let mut query = allocations::table
            .select(AllocationRow::as_select())
            .into_boxed();

        if let Some(room_id) = filter.room_id {
            query = query.filter(allocations::room_id.eq(room_id));
        }
        if let Some(email) = &filter.employee_email {
            query = query.filter(allocations::employee_email.eq(email.clone()));
        }

        // The id tie breaker keeps pages stable when windows coincide.
        query = match filter.order {
            None => query.order(allocations::id.asc()),
            Some(AllocationOrder { field, direction }) => match (field, direction) {
                (SortField::StartAt, SortDirection::Ascending) => {
                    query.order((allocations::start_at.asc(), allocations::id.asc()))
                }
                (SortField::StartAt, SortDirection::Descending) => {
                    query.order((allocations::start_at.desc(), allocations::id.asc()))
                }
                (SortField::EndAt, SortDirection::Ascending) => {
                    query.order((allocations::end_at.asc(), allocations::id.asc()))
                }
                (SortField::EndAt, SortDirection::Descending) => {
                    query.order((allocations::end_at.desc(), allocations::id.asc()))
                }
            },
        };

        let rows: Vec<AllocationRow> = query
            .limit(filter.limit)
            .offset(filter.offset)
            .load(&mut conn)
            .await
            .map_err(map_repository_diesel_error)?;

        Ok(rows.into_iter().map(row_to_allocation).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_repository_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            AllocationRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let repo_err = map_repository_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, AllocationRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_assembles_the_employee() {
        let now = Utc::now();
        let row = AllocationRow {
            id: 9,
            room_id: 2,
            employee_name: "Grace Hopper".to_owned(),
            employee_email: "grace.hopper@example.com".to_owned(),
            subject: "Compiler sync".to_owned(),
            start_at: now,
            end_at: now + Duration::hours(1),
            created_at: now,
            updated_at: now,
        };

        let allocation = row_to_allocation(row);

        assert_eq!(allocation.id, 9);
        assert_eq!(allocation.employee.name, "Grace Hopper");
        assert_eq!(allocation.employee.email, "grace.hopper@example.com");
        assert_eq!(allocation.end_at - allocation.start_at, Duration::hours(1));
    }
}
