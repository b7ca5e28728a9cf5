//! Barcode plugins: decoders that recognise vendor-specific barcode payloads

use std::fmt;
use tracing::debug;

/// A plugin able to recognise a barcode payload
pub trait BarcodePlugin: Send + Sync + fmt::Debug {
    /// Plugin name
    fn name(&self) -> &str;

    /// Whether the payload belongs to this plugin
    fn validate(&self, data: &str) -> bool;
}

/// DigiKey barcode decoding
#[derive(Debug, Default, Clone, Copy)]
pub struct DigikeyBarcodePlugin;

impl DigikeyBarcodePlugin {
    pub const NAME: &'static str = "DigikeyBarcode";
}

impl BarcodePlugin for DigikeyBarcodePlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    // TODO: decode the DigiKey 2D DataMatrix layout once sample payloads are available
    fn validate(&self, _data: &str) -> bool {
        false
    }
}

/// Ordered set of barcode plugins
#[derive(Debug, Default)]
pub struct BarcodeRegistry {
    plugins: Vec<Box<dyn BarcodePlugin>>,
}

impl BarcodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in barcode plugins
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DigikeyBarcodePlugin));
        registry
    }

    pub fn register(&mut self, plugin: Box<dyn BarcodePlugin>) {
        debug!("Registering barcode plugin: {}", plugin.name());
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn BarcodePlugin> {
        self.plugins.iter().map(|p| &**p)
    }

    /// First plugin that accepts the payload
    pub fn match_barcode(&self, data: &str) -> Option<&dyn BarcodePlugin> {
        self.plugins().find(|p| p.validate(data))
    }
}
