//! Workflow integration tests
//!
//! End-to-end runs of the `snappy` binary against a stand-in `zfs`.

pub mod daily_creation;
