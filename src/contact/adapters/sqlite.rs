//! `SQLite` implementation of the `ContactStore` port using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::sync::watch;

use crate::contact::{
    domain::{Contact, ContactDetails, ContactId},
    ports::ContactStore,
};
use crate::storage::sqlite::{
    get_conn,
    models::{ContactRow, ContactValues},
    run_blocking,
    schema::contacts,
};
use crate::storage::{SqliteDatabase, StoreResult};

/// `SQLite` implementation of [`ContactStore`].
///
/// All database operations are offloaded to the blocking thread pool via
/// [`tokio::task::spawn_blocking`]. Change signals fire on that thread once
/// the statement succeeds, so a caller that stops awaiting a write still
/// leaves live views up to date.
#[derive(Debug, Clone)]
pub struct SqliteContactStore {
    database: SqliteDatabase,
}

impl SqliteContactStore {
    /// Creates a store over `database`.
    #[must_use]
    pub const fn new(database: SqliteDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn insert(&self, details: &ContactDetails) -> StoreResult<ContactId> {
        let pool = self.database.pool().clone();
        let changes = self.database.contact_changes().clone();
        let values = ContactValues::from(details);

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let assigned = diesel::insert_into(contacts::table)
                .values(&values)
                .returning(contacts::id)
                .get_result::<i64>(&mut conn)?;
            changes.notify();
            Ok(ContactId::from_raw(assigned))
        })
        .await
    }

    async fn update(&self, contact: &Contact) -> StoreResult<bool> {
        let pool = self.database.pool().clone();
        let id = contact.id().into_inner();
        let changes = self.database.contact_changes().clone();
        let values = ContactValues::from(contact.details());

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let rows = diesel::update(contacts::table.find(id))
                .set(&values)
                .execute(&mut conn)?;
            let updated = rows > 0;
            if updated {
                changes.notify();
            }
            Ok(updated)
        })
        .await
    }

    async fn delete(&self, id: ContactId) -> StoreResult<bool> {
        let pool = self.database.pool().clone();
        let contact_changes = self.database.contact_changes().clone();
        let message_changes = self.database.message_changes().clone();
        let raw_id = id.into_inner();

        // Messages go with the contact through `ON DELETE CASCADE`.
        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let rows = diesel::delete(contacts::table.find(raw_id)).execute(&mut conn)?;
            let deleted = rows > 0;
            if deleted {
                contact_changes.notify();
                message_changes.notify();
            }
            Ok(deleted)
        })
        .await
    }

    async fn find_all(&self) -> StoreResult<Vec<Contact>> {
        let pool = self.database.pool().clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let rows = contacts::table
                .order((contacts::name.asc(), contacts::id.asc()))
                .select(ContactRow::as_select())
                .load::<ContactRow>(&mut conn)?;
            rows.into_iter().map(ContactRow::into_domain).collect()
        })
        .await
    }

    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<Contact>> {
        let pool = self.database.pool().clone();
        let lookup = phone.to_owned();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            contacts::table
                .filter(contacts::phone.eq(lookup))
                .order(contacts::id.asc())
                .select(ContactRow::as_select())
                .first::<ContactRow>(&mut conn)
                .optional()?
                .map(ContactRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        let pool = self.database.pool().clone();
        let raw_id = id.into_inner();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            contacts::table
                .find(raw_id)
                .select(ContactRow::as_select())
                .first::<ContactRow>(&mut conn)
                .optional()?
                .map(ContactRow::into_domain)
                .transpose()
        })
        .await
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.database.contact_changes().subscribe()
    }
}
