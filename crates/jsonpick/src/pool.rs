//! Parser pooling
//!
//! A [`ParserPool`] keeps idle [`Parser`] instances so that independent
//! single-value lookups don't pay for fresh node tables and text arenas on
//! every call. [`ParserPool::get`] hands out an RAII [`PooledParser`] guard;
//! dropping the guard returns the parser on every exit path, which is what
//! guarantees the release half of the acquire/release discipline.
//!
//! The accessors in [`crate::access`] share one process-wide pool
//! ([`default_pool`]); explicitly constructed pools are independent, which
//! keeps tests isolated.

use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::trace;

use crate::parser::Parser;

/// Default cap on idle parsers retained per pool
const DEFAULT_MAX_IDLE: usize = 32;

/// Thread-safe free-list of reusable parsers
#[derive(Debug)]
pub struct ParserPool {
    idle: Mutex<Vec<Parser>>,
    max_idle: usize,
    stats: Mutex<PoolStats>,
}

/// Usage counters for a pool
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Parsers constructed because the free-list was empty
    pub parsers_created: u64,
    /// Acquisitions served from the free-list
    pub parsers_reused: u64,
    /// Parsers accepted back on release
    pub parsers_returned: u64,
    /// Idle parsers currently held
    pub idle: usize,
}

impl PoolStats {
    /// Fraction of acquisitions served without constructing a parser
    pub fn hit_ratio(&self) -> f64 {
        let total = self.parsers_created + self.parsers_reused;
        if total == 0 {
            0.0
        } else {
            self.parsers_reused as f64 / total as f64
        }
    }
}

impl ParserPool {
    /// Create a pool with the default idle capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_IDLE)
    }

    /// Create a pool retaining at most `max_idle` idle parsers
    ///
    /// Releases beyond the cap drop the parser instead of retaining it.
    pub fn with_capacity(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            stats: Mutex::new(PoolStats::default()),
        }
    }

    /// Acquire a parser, reusing an idle one when available
    ///
    /// Never fails; an empty free-list just constructs a fresh parser. The
    /// returned guard owns the parser exclusively until it is dropped.
    pub fn get(&self) -> PooledParser<'_> {
        let reused = self.idle.lock().pop();
        let parser = match reused {
            Some(parser) => {
                self.stats.lock().parsers_reused += 1;
                trace!("reusing idle parser");
                parser
            }
            None => {
                self.stats.lock().parsers_created += 1;
                trace!("free-list empty, constructing parser");
                Parser::new()
            }
        };
        PooledParser {
            parser: Some(parser),
            pool: self,
        }
    }

    /// Snapshot of the pool's usage counters
    pub fn stats(&self) -> PoolStats {
        let mut stats = self.stats.lock().clone();
        stats.idle = self.idle.lock().len();
        stats
    }

    fn release(&self, mut parser: Parser) {
        parser.reset();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(parser);
            let idle_len = idle.len();
            drop(idle);
            let mut stats = self.stats.lock();
            stats.parsers_returned += 1;
            stats.idle = idle_len;
        }
        // At capacity the parser is simply dropped
    }
}

impl Default for ParserPool {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for a pooled parser
///
/// Dereferences to [`Parser`]. Dropping the guard resets the parser and
/// returns it to the pool, so any data borrowed from a parse result must be
/// copied out while the guard is alive; the borrow checker enforces this.
pub struct PooledParser<'p> {
    parser: Option<Parser>,
    pool: &'p ParserPool,
}

impl PooledParser<'_> {
    /// Detach the parser from the pool; it will not be returned on drop
    pub fn take(mut self) -> Parser {
        self.parser.take().unwrap_or_default()
    }
}

impl Deref for PooledParser<'_> {
    type Target = Parser;

    fn deref(&self) -> &Parser {
        self.parser.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl DerefMut for PooledParser<'_> {
    fn deref_mut(&mut self) -> &mut Parser {
        self.parser.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for PooledParser<'_> {
    fn drop(&mut self) {
        if let Some(parser) = self.parser.take() {
            self.pool.release(parser);
        }
    }
}

/// Process-wide pool backing the convenience accessors
static DEFAULT_POOL: OnceLock<ParserPool> = OnceLock::new();

/// The process-wide parser pool
pub fn default_pool() -> &'static ParserPool {
    DEFAULT_POOL.get_or_init(ParserPool::new)
}
