//! Memoizing Evaluator Module
//!
//! Wraps the arithmetic parser with a fixed-capacity memo table: each
//! distinct expression is evaluated at most once while it stays resident,
//! with least-recently-used eviction on overflow. The table lives for the
//! process lifetime; entries never expire by time.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::cache::AccessOrder;
use crate::error::Result;
use crate::eval::parser;

/// Memo table capacity.
const MEMO_CAPACITY: usize = 128;

// == Memo Evaluator ==
/// Memoized arithmetic evaluation, safe to share across threads.
pub struct MemoEvaluator {
    inner: Mutex<MemoTable>,
    capacity: usize,
}

#[derive(Default)]
struct MemoTable {
    results: HashMap<String, f64>,
    order: AccessOrder,
}

impl MemoEvaluator {
    /// Creates an evaluator with the default table capacity.
    pub fn new() -> Self {
        Self::with_capacity(MEMO_CAPACITY)
    }

    /// Creates an evaluator with an explicit capacity (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(MemoTable::default()),
            capacity: capacity.max(1),
        }
    }

    // == Evaluate Cached ==
    /// Evaluates `expr`, reusing a memoized result when available.
    ///
    /// Only successful evaluations are memoized; failures are cheap to
    /// re-derive and carry no reusable value. Two concurrent callers with
    /// the same uncached expression may both compute it (last write wins),
    /// matching the cache layer's check-then-act semantics.
    pub fn evaluate_cached(&self, expr: &str) -> Result<f64> {
        {
            let mut table = self.lock();
            if let Some(&value) = table.results.get(expr) {
                table.order.promote(expr);
                debug!(expr, "memo hit");
                return Ok(value);
            }
        }

        debug!(expr, "memo miss, computing");
        let value = parser::evaluate(expr)?;

        let mut table = self.lock();
        if !table.results.contains_key(expr) && table.results.len() >= self.capacity {
            if let Some(evicted) = table.order.pop_lru() {
                table.results.remove(&evicted);
            }
        }
        table.results.insert(expr.to_string(), value);
        table.order.promote(expr);
        Ok(value)
    }

    /// Returns the number of memoized expressions.
    pub fn len(&self) -> usize {
        self.lock().results.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoTable> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MemoEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
