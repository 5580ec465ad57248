//! `SQLite` implementation of the `MessageStore` port using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::sync::watch;

use crate::contact::domain::ContactId;
use crate::message::{
    domain::{Message, MessageId, NewMessage},
    ports::MessageStore,
};
use crate::storage::sqlite::{
    get_conn,
    models::{MessageRow, NewMessageRow},
    run_blocking,
    schema::messages,
};
use crate::storage::{SqliteDatabase, StoreResult};

/// `SQLite` implementation of [`MessageStore`].
///
/// The contact foreign key is enforced by the schema; inserting a message for
/// a deleted contact fails with a constraint error.
#[derive(Debug, Clone)]
pub struct SqliteMessageStore {
    database: SqliteDatabase,
}

impl SqliteMessageStore {
    /// Creates a store over `database`.
    #[must_use]
    pub const fn new(database: SqliteDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn insert(&self, message: &NewMessage) -> StoreResult<MessageId> {
        let pool = self.database.pool().clone();
        let changes = self.database.message_changes().clone();
        let row = NewMessageRow::from(message);

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let assigned = diesel::insert_into(messages::table)
                .values(&row)
                .returning(messages::id)
                .get_result::<i64>(&mut conn)?;
            changes.notify();
            Ok(MessageId::from_raw(assigned))
        })
        .await
    }

    async fn find_for_contact(&self, contact_id: ContactId) -> StoreResult<Vec<Message>> {
        let pool = self.database.pool().clone();
        let raw_id = contact_id.into_inner();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let rows = messages::table
                .filter(messages::contact_id.eq(raw_id))
                .order((messages::timestamp_ms.asc(), messages::id.asc()))
                .select(MessageRow::as_select())
                .load::<MessageRow>(&mut conn)?;
            rows.into_iter().map(MessageRow::into_domain).collect()
        })
        .await
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.database.message_changes().subscribe()
    }
}
