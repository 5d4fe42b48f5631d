//! End-of-session statistics report.

use crate::error::CliResult;
use crate::shell::SessionSummary;
use nestkv_core::StatsSnapshot;
use serde::Serialize;

/// Statistics printed by `--stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Lines that parsed and ran.
    pub commands: usize,
    /// Lines rejected as invalid input.
    pub rejected: usize,
    /// Store operation counters.
    pub operations: OperationStats,
    /// Transaction counters.
    pub transactions: TransactionStats,
    /// Store contents at the end of the session.
    pub store: StoreState,
}

/// Operation counters.
#[derive(Debug, Serialize)]
pub struct OperationStats {
    /// GET calls.
    pub gets: u64,
    /// SET calls.
    pub sets: u64,
    /// UNSET calls.
    pub unsets: u64,
    /// NUMEQUALTO calls.
    pub count_queries: u64,
}

/// Transaction counters.
#[derive(Debug, Serialize)]
pub struct TransactionStats {
    /// Blocks opened.
    pub begun: u64,
    /// Successful commits.
    pub committed: u64,
    /// Blocks rolled back.
    pub rolled_back: u64,
    /// COMMIT/ROLLBACK with nothing open.
    pub no_transaction: u64,
    /// Blocks still open.
    pub open: usize,
}

/// Gauges describing the effective store.
#[derive(Debug, Serialize)]
pub struct StoreState {
    /// Keys with a value.
    pub keys: usize,
    /// Distinct values.
    pub distinct_values: usize,
}

impl StatsReport {
    /// Builds a report from a session summary and a stats snapshot.
    pub fn new(summary: &SessionSummary, stats: &StatsSnapshot) -> Self {
        Self {
            commands: summary.commands,
            rejected: summary.rejected,
            operations: OperationStats {
                gets: stats.gets,
                sets: stats.sets,
                unsets: stats.unsets,
                count_queries: stats.count_queries,
            },
            transactions: TransactionStats {
                begun: stats.transactions_begun,
                committed: stats.transactions_committed,
                rolled_back: stats.transactions_rolled_back,
                no_transaction: stats.no_transaction,
                open: stats.depth,
            },
            store: StoreState {
                keys: stats.keys,
                distinct_values: stats.distinct_values,
            },
        }
    }

    /// Renders the report in the requested format (text, json).
    pub fn render(&self, format: &str) -> CliResult<String> {
        match format {
            "json" => Ok(serde_json::to_string_pretty(self)?),
            _ => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let lines = [
            "nestkv Session Statistics".to_string(),
            "=========================".to_string(),
            String::new(),
            format!("Commands:       {}", self.commands),
            format!("Invalid input:  {}", self.rejected),
            String::new(),
            "Operations:".to_string(),
            format!("  GET:          {}", self.operations.gets),
            format!("  SET:          {}", self.operations.sets),
            format!("  UNSET:        {}", self.operations.unsets),
            format!("  NUMEQUALTO:   {}", self.operations.count_queries),
            String::new(),
            "Transactions:".to_string(),
            format!("  Begun:        {}", self.transactions.begun),
            format!("  Committed:    {}", self.transactions.committed),
            format!("  Rolled back:  {}", self.transactions.rolled_back),
            format!("  No-op calls:  {}", self.transactions.no_transaction),
            format!("  Still open:   {}", self.transactions.open),
            String::new(),
            "Store:".to_string(),
            format!("  Keys:            {}", self.store.keys),
            format!("  Distinct values: {}", self.store.distinct_values),
        ];
        lines.join("\n")
    }
}
