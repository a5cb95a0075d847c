//! Order board state, view contract and event handlers, independent of any UI host.

pub mod config;
pub mod controller;
pub mod drag;
pub mod store;
pub mod view;

pub use controller::BoardController;
pub use drag::{resolve_drag_area, DragEvent};
pub use store::{DraggingState, OrderStore};
pub use view::{
    AddFormValues, BoardView, EditFormValues, FocusTarget, MemoryView, OrderCard, Overlay,
};
