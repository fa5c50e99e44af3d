// Domain layer: roster value types and the ports the rest of the crate depends on.

pub mod model;
pub mod ports;
