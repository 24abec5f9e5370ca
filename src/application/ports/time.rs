// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of audit timestamps and session expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
