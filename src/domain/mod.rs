// Domain layer: records, identifiers and the ports to the map, page and dataset collaborators.

pub mod model;
pub mod ports;
