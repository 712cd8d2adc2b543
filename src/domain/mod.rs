// Domain layer: invoice model and ports for the external OCR tooling.

pub mod model;
pub mod ports;
