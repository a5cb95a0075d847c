//! Controller layer: board event queue and error modeling for the GUI.

pub mod events;
pub mod orchestration;
