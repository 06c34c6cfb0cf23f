// Domain layer: content entities and the content-source port.

pub mod model;
pub mod ports;
