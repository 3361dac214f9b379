//! API endpoints module

pub mod storages;
pub mod transfers;

pub use storages::{list_storages, resource_metadata, root, PATH_HEADER, STORAGE_TYPE_HEADER};
pub use transfers::{submit_transfer, transfer_state};
