#[macro_use]
extern crate diesel;

use anyhow::Result as Fallible;
use comidita_core::{repositories as repo, usecases as uc};
use diesel::{connection::SimpleConnection as _, r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
};

mod models;
mod repo_impl;
mod schema;


const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

// Pragmas that are applied to every pooled connection.
const CONNECTION_PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = 1;
PRAGMA defer_foreign_keys = 1;
PRAGMA busy_timeout = 5000;
PRAGMA encoding = 'UTF-8';
"#;

type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

/// A pooled connection together with the lock on the pool
/// that it was obtained under.
pub struct Guarded<L> {
    _lock: L,
    conn: RefCell<PooledConnection>,
}

impl<L> Guarded<L> {
    fn acquire(lock: L, pool: &ConnectionPool, access: &str) -> Fallible<Self> {
        let conn = pool.get().inspect_err(|err| {
            log::error!("No pooled database connection available for {access} access: {err}");
        })?;
        Ok(Self {
            _lock: lock,
            conn: RefCell::new(conn),
        })
    }

    fn sqlite_conn(&self) -> RefMut<'_, PooledConnection> {
        self.conn.borrow_mut()
    }
}

/// Read access that may be shared with other readers.
pub type DbReadOnly<'a> = Guarded<RwLockReadGuard<'a, ()>>;

/// Exclusive read/write access.
pub type DbReadWrite<'a> = Guarded<RwLockWriteGuard<'a, ()>>;

impl DbReadWrite<'_> {
    /// Runs `f` in a transaction that is rolled back if `f` fails.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        use diesel::Connection as _;
        // Diesel only returns its own error type from a transaction
        let mut failed = None;
        let result = self.conn.get_mut().transaction(|conn| {
            f(&DbConnection::new(conn)).map_err(|err| {
                failed = Some(err.into());
                diesel::result::Error::RollbackTransaction
            })
        });
        result.map_err(|err| match failed {
            Some(err) => err,
            None => uc::Error::Repo(repo_impl::from_diesel_err(err)),
        })
    }
}

/// A connection inside of a running transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> DbConnection<'a> {
    fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(r2d2::Error::QueryError)
    }
}

/// Pooled SQLite connections.
///
/// Writers lock the whole pool. Concurrent writers on
/// separate connections would fail with SQLITE_LOCKED.
#[derive(Clone)]
pub struct Connections {
    pool: ConnectionPool,
    lock: Arc<RwLock<()>>,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // r2d2 keeps retrying if the database file is not accessible
        {
            use diesel::Connection as _;
            SqliteConnection::establish(url)?;
        }
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer))
            .build(ConnectionManager::new(url))?;
        log::debug!("Opened database {url} with up to {pool_size} connections");
        Ok(Self {
            pool,
            lock: Default::default(),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly<'_>> {
        Guarded::acquire(self.lock.read(), &self.pool, "read-only")
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite<'_>> {
        Guarded::acquire(self.lock.write(), &self.pool, "read/write")
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    let mut sqlite_conn = conn.sqlite_conn();
    let applied = sqlite_conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to migrate database: {err}"))?;
    if applied.is_empty() {
        log::info!("Database schema is up to date");
    }
    for version in applied {
        log::info!("Migrated database to version {version}");
    }
    Ok(())
}
