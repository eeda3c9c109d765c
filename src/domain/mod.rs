// Domain layer: gesture/action/binding models and the binding store port.

pub mod model;
pub mod ports;
