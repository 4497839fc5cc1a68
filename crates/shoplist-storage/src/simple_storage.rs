use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::sync::Arc;

/// Trait for document collections keyed by identifier.
///
/// Each collection lives in its own redb table and stores one serialized
/// document per key. Implementors only need to specify the table definition
/// and database reference.
pub trait SimpleStorage: Send + Sync {
    /// The table definition for this collection.
    const TABLE: TableDefinition<'static, &'static str, &'static [u8]>;

    /// Get reference to the database.
    fn db(&self) -> &Arc<Database>;

    /// Insert or replace a document by ID.
    fn put_raw(&self, id: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db().begin_write()?;
        {
            let mut table = write_txn.open_table(Self::TABLE)?;
            table.insert(id, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a document by ID.
    fn get_raw(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db().begin_read()?;
        let table = read_txn.open_table(Self::TABLE)?;

        if let Some(value) = table.get(id)? {
            Ok(Some(value.value().to_vec()))
        } else {
            Ok(None)
        }
    }

    /// List all documents as (id, data) pairs, ordered by key.
    fn list_raw(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let read_txn = self.db().begin_read()?;
        let table = read_txn.open_table(Self::TABLE)?;

        let mut items = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            items.push((key.value().to_string(), value.value().to_vec()));
        }

        Ok(items)
    }

    /// Atomically rewrite a single document.
    ///
    /// `apply` receives the current bytes and returns the replacement. The
    /// read and the write happen inside one write transaction, so concurrent
    /// updates to the same document serialize and the last one wins.
    /// Returns `None` without writing anything when the document is absent.
    fn update_raw<F>(&self, id: &str, apply: F) -> Result<Option<Vec<u8>>>
    where
        F: FnOnce(&[u8]) -> Result<Vec<u8>>,
    {
        let write_txn = self.db().begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(Self::TABLE)?;
            let current = table.get(id)?.map(|value| value.value().to_vec());
            match current {
                Some(current) => {
                    let next = apply(&current)?;
                    table.insert(id, next.as_slice())?;
                    Some(next)
                }
                None => None,
            }
        };

        if updated.is_some() {
            write_txn.commit()?;
        } else {
            write_txn.abort()?;
        }
        Ok(updated)
    }

    /// Delete by ID, returns true if existed.
    fn delete(&self, id: &str) -> Result<bool> {
        let write_txn = self.db().begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(Self::TABLE)?;
            table.remove(id)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Check if ID exists.
    fn exists(&self, id: &str) -> Result<bool> {
        let read_txn = self.db().begin_read()?;
        let table = read_txn.open_table(Self::TABLE)?;
        Ok(table.get(id)?.is_some())
    }

    /// Count all documents.
    fn count(&self) -> Result<usize> {
        let read_txn = self.db().begin_read()?;
        let table = read_txn.open_table(Self::TABLE)?;
        Ok(table.len()? as usize)
    }
}

/// Delete a parent document and every child document that belongs to it in
/// one write transaction.
///
/// `belongs` is called with the bytes of each child document. Returns the
/// number of children removed, or `None` without writing anything when the
/// parent does not exist.
pub fn delete_with_children<F>(
    db: &Database,
    parent: TableDefinition<'static, &'static str, &'static [u8]>,
    parent_id: &str,
    children: TableDefinition<'static, &'static str, &'static [u8]>,
    belongs: F,
) -> Result<Option<usize>>
where
    F: Fn(&[u8]) -> Result<bool>,
{
    let write_txn = db.begin_write()?;
    let removed = {
        let mut parent_table = write_txn.open_table(parent)?;
        if parent_table.remove(parent_id)?.is_none() {
            None
        } else {
            let mut child_table = write_txn.open_table(children)?;
            let mut owned = Vec::new();
            for entry in child_table.iter()? {
                let (key, value) = entry?;
                if belongs(value.value())? {
                    owned.push(key.value().to_string());
                }
            }
            for key in &owned {
                child_table.remove(key.as_str())?;
            }
            Some(owned.len())
        }
    };

    match removed {
        Some(_) => write_txn.commit()?,
        None => write_txn.abort()?,
    }
    Ok(removed)
}

/// Macro to generate a collection struct with the common implementations.
#[macro_export]
macro_rules! define_simple_storage {
    ( $(#[$meta:meta])* $vis:vis struct $name:ident { table: $table_name:literal } ) => {
        const TABLE: redb::TableDefinition<'static, &'static str, &'static [u8]> =
            redb::TableDefinition::new($table_name);

        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            db: std::sync::Arc<redb::Database>,
        }

        impl $name {
            pub fn new(db: std::sync::Arc<redb::Database>) -> anyhow::Result<Self> {
                let write_txn = db.begin_write()?;
                write_txn.open_table(TABLE)?;
                write_txn.commit()?;

                Ok(Self { db })
            }

            pub fn put_raw(&self, id: &str, data: &[u8]) -> anyhow::Result<()> {
                <Self as $crate::SimpleStorage>::put_raw(self, id, data)
            }

            pub fn get_raw(&self, id: &str) -> anyhow::Result<Option<Vec<u8>>> {
                <Self as $crate::SimpleStorage>::get_raw(self, id)
            }

            pub fn list_raw(&self) -> anyhow::Result<Vec<(String, Vec<u8>)>> {
                <Self as $crate::SimpleStorage>::list_raw(self)
            }

            pub fn update_raw<F>(&self, id: &str, apply: F) -> anyhow::Result<Option<Vec<u8>>>
            where
                F: FnOnce(&[u8]) -> anyhow::Result<Vec<u8>>,
            {
                <Self as $crate::SimpleStorage>::update_raw(self, id, apply)
            }

            pub fn delete(&self, id: &str) -> anyhow::Result<bool> {
                <Self as $crate::SimpleStorage>::delete(self, id)
            }

            pub fn exists(&self, id: &str) -> anyhow::Result<bool> {
                <Self as $crate::SimpleStorage>::exists(self, id)
            }

            pub fn count(&self) -> anyhow::Result<usize> {
                <Self as $crate::SimpleStorage>::count(self)
            }
        }

        impl $crate::SimpleStorage for $name {
            const TABLE: redb::TableDefinition<'static, &'static str, &'static [u8]> = TABLE;

            fn db(&self) -> &std::sync::Arc<redb::Database> {
                &self.db
            }
        }
    };
}
