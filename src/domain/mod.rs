// Domain layer: records and ports. No I/O here.

pub mod geo;
pub mod model;
pub mod ports;
