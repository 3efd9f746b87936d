// Domain layer: models and ports. No dependencies beyond serde.

pub mod model;
pub mod ports;
