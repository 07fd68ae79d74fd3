//! Cache module for persisting fetched campaigns to disk
//!
//! This module provides a single-file cache store. The whole campaign list is
//! written as one JSON envelope together with the time it was fetched, and read
//! back verbatim. Reads never check the age of the data; [`is_stale`] is only
//! for labelling it.

mod store;

pub use store::{
    fetched_time, is_stale, unix_timestamp, CacheEnvelope, CacheError, CacheStore,
    CACHE_DURATION_SECS, CACHE_FILE_NAME,
};
