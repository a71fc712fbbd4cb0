//! PREMIS object inventory stage for SIP preprocessing.
//!
//! [`activity::AddPremisObjects`] walks a SIP's content tree and writes one
//! `premis:object` per file, with identifiers drawn from an injected random
//! source.
pub mod activity;
pub mod classify;
pub mod config;
pub mod error;
pub mod identifier;
pub mod manifest;
pub mod premis;
pub mod sip;
pub mod staging;
pub mod util;
pub mod walk;
