use serde::{Deserialize, Serialize};

use crate::domain::{Column, Order, OrderId};

/// Data attributes carried by one element on an event path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementData {
    /// Column-area marker (`data-area`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Id of the order rendered by this element (`data-id`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

impl ElementData {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn area(marker: impl Into<String>) -> Self {
        Self {
            area: Some(marker.into()),
            order_id: None,
        }
    }

    pub fn card(order_id: OrderId) -> Self {
        Self {
            area: None,
            order_id: Some(order_id),
        }
    }
}

/// Clickable controls that have listeners attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", content = "order_id", rename_all = "snake_case")]
pub enum ClickTarget {
    AddButton,
    AddCancel,
    HelpButton,
    HelpCancel,
    /// A click somewhere on the board grid, optionally landing on a card.
    Grid(Option<OrderId>),
    EditCancel,
    EditDelete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum BoardEvent {
    DragStart { order_id: OrderId },
    DragOver { path: Vec<ElementData> },
    DragEnd,
    Click(ClickTarget),
    AddSubmit,
    EditSubmit,
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::DragStart { .. } => "drag_start",
            BoardEvent::DragOver { .. } => "drag_over",
            BoardEvent::DragEnd => "drag_end",
            BoardEvent::Click(_) => "click",
            BoardEvent::AddSubmit => "add_submit",
            BoardEvent::EditSubmit => "edit_submit",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub column: Column,
    pub orders: Vec<Order>,
}

/// Point-in-time rendering of the board, column by column in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<Column>,
}
