pub mod config;
pub mod error;
pub mod logging;

// Remote archive
pub mod locator;
pub mod probe;
pub mod source;
pub mod transfer;

// Local cache
pub mod cache;
pub mod checksum;
pub mod fetcher;
pub mod storage;

// Fields and profiles
pub mod field;
pub mod interp;
pub mod profile;
pub mod reader;
pub mod resample;
pub mod rotation;

pub mod pipeline;

pub use error::BoundaryError;
