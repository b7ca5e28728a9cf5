//! CLI command modules

pub mod barcode;
pub mod forms;
pub mod info;
pub mod init;
pub mod navigation;
pub mod plugins;
pub mod settings;
pub mod urls;
pub mod validate;
