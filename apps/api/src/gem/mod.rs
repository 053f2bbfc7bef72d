// Gem instruction studio: configuration, tone calibration, assembly, and the
// two façades (guided builder and section workshop) that share one assembler.
// Rendering lives in `render`; HTTP wiring in `handlers`.

pub mod assembler;
pub mod builder;
pub mod configuration;
pub mod handlers;
pub mod prompts;
pub mod tone;
pub mod workshop;
