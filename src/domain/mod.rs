// Domain layer: core models and ports (interfaces). No external systems here;
// concrete collaborators live under src/adapters.

pub mod model;
pub mod ports;
