//! In-memory recording executor for unit tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::builder::{StatementContext, Table};
use crate::schema::{ColumnInfo, Introspect, TableSchema};
use crate::value::SqlValue;
use crate::Executor;

#[derive(Debug, thiserror::Error)]
#[error("mock failure: {0}")]
pub(crate) struct MockError(pub(crate) String);

/// A statement as the engine received it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Recorded {
    pub(crate) sql: String,
    pub(crate) params: Vec<Vec<SqlValue>>,
}

#[derive(Debug, Default)]
struct MockState {
    tables: BTreeMap<String, Vec<ColumnInfo>>,
    statements: Vec<Recorded>,
    affected: VecDeque<u64>,
    rows: VecDeque<Vec<Vec<SqlValue>>>,
    fail_next: Option<String>,
    commits: usize,
    rollbacks: usize,
}

/// Records every call and replays scripted results.
#[derive(Debug, Default)]
pub(crate) struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_table(self, name: &str, columns: &[&str]) -> Self {
        let infos = columns
            .iter()
            .enumerate()
            .map(|(i, c)| ColumnInfo::new(i, *c, ""))
            .collect();
        self.state
            .lock()
            .unwrap()
            .tables
            .insert(name.to_string(), infos);
        self
    }

    pub(crate) fn push_affected(&self, affected: u64) {
        self.state.lock().unwrap().affected.push_back(affected);
    }

    pub(crate) fn push_rows(&self, rows: Vec<Vec<SqlValue>>) {
        self.state.lock().unwrap().rows.push_back(rows);
    }

    pub(crate) fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    pub(crate) fn statements(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().statements.clone()
    }

    pub(crate) fn commits(&self) -> usize {
        self.state.lock().unwrap().commits
    }

    pub(crate) fn rollbacks(&self) -> usize {
        self.state.lock().unwrap().rollbacks
    }

    fn record(&self, sql: &str, params: Vec<Vec<SqlValue>>) -> Result<(), MockError> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(Recorded {
            sql: sql.to_string(),
            params,
        });
        match state.fail_next.take() {
            Some(message) => Err(MockError(message)),
            None => Ok(()),
        }
    }
}

impl Executor for MockExecutor {
    type Error = MockError;

    async fn write(&self, sql: &str, rows: &[Vec<SqlValue>]) -> Result<u64, MockError> {
        let recorded = self.record(sql, rows.to_vec());
        let mut state = self.state.lock().unwrap();
        let affected = match recorded {
            Ok(()) => state.affected.pop_front().unwrap_or(0),
            Err(err) => {
                state.rollbacks += 1;
                return Err(err);
            }
        };
        if affected > 0 {
            state.commits += 1;
        } else {
            state.rollbacks += 1;
        }
        Ok(affected)
    }

    async fn fetch_all(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<Vec<SqlValue>>, MockError> {
        self.record(sql, vec![params.to_vec()])?;
        Ok(self.state.lock().unwrap().rows.pop_front().unwrap_or_default())
    }
}

impl Introspect for MockExecutor {
    type Error = MockError;

    async fn list_tables(&self) -> Result<Vec<String>, MockError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_next.take() {
            return Err(MockError(message));
        }
        Ok(state.tables.keys().cloned().collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>, MockError> {
        let state = self.state.lock().unwrap();
        Ok(state.tables.get(table).cloned().unwrap_or_default())
    }
}

/// The `tbl_fruit` table used throughout the builder tests.
pub(crate) fn fruit_table() -> (Arc<MockExecutor>, Table<MockExecutor>) {
    let mock = Arc::new(MockExecutor::new());
    let schema = TableSchema::new("tbl_fruit", ["id", "name", "price", "stock"]);
    let table = Table::new(StatementContext::new(Arc::clone(&mock), &schema));
    (mock, table)
}
