//! Infrastructure layer: configuration, catalog files, mail transports.

pub mod catalog_file;
pub mod config;
pub mod mail;
