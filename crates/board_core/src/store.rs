//! In-memory order state owned by a single board.

use std::collections::HashMap;

use chrono::Utc;
use shared::domain::{Column, Order, OrderDraft, OrderId};

/// Transient drag state: which card is being dragged and which column it is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraggingState {
    pub source: Option<OrderId>,
    pub over: Option<Column>,
}

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
    dragging: DraggingState,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record with a freshly minted id. The record is not inserted.
    pub fn create_order_data(&self, draft: OrderDraft) -> Order {
        let mut id = OrderId::new_v4();
        while self.orders.contains_key(&id) {
            id = OrderId::new_v4();
        }
        Order::from_draft(id, draft, Utc::now())
    }

    pub fn insert(&mut self, order: Order) -> Option<Order> {
        self.orders.insert(order.id, order)
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id)
    }

    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        if self.dragging.source == Some(id) {
            self.dragging = DraggingState::default();
        }
        self.orders.remove(&id)
    }

    pub fn orders(&self) -> &HashMap<OrderId, Order> {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn dragging(&self) -> DraggingState {
        self.dragging
    }

    pub fn update_dragging(&mut self, dragging: DraggingState) {
        self.dragging = dragging;
    }

    pub fn update_dragging_over(&mut self, column: Column) {
        self.dragging.over = Some(column);
    }

    pub fn take_dragging(&mut self) -> DraggingState {
        std::mem::take(&mut self.dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, column: Column) -> OrderDraft {
        OrderDraft {
            title: title.to_string(),
            table: "1".to_string(),
            column,
        }
    }

    #[test]
    fn create_order_data_mints_unique_ids_without_inserting() {
        let store = OrderStore::new();
        let first = store.create_order_data(draft("Soup", Column::Ordered));
        let second = store.create_order_data(draft("Soup", Column::Ordered));
        assert_ne!(first.id, second.id);
        assert!(store.is_empty());
    }

    #[test]
    fn removing_dragged_order_clears_drag_state() {
        let mut store = OrderStore::new();
        let order = store.create_order_data(draft("Tea", Column::Preparing));
        let id = order.id;
        store.insert(order);
        store.update_dragging(DraggingState {
            source: Some(id),
            over: Some(Column::Served),
        });

        assert!(store.remove(id).is_some());
        assert_eq!(store.dragging(), DraggingState::default());
    }

    #[test]
    fn orders_lists_inserted_records_by_id() {
        let mut store = OrderStore::new();
        let soup = store.create_order_data(draft("Soup", Column::Ordered));
        let tea = store.create_order_data(draft("Tea", Column::Served));
        let (soup_id, tea_id) = (soup.id, tea.id);
        store.insert(soup);
        store.insert(tea);
        store.remove(soup_id);

        let orders = store.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[&tea_id].title, "Tea");
        assert!(!orders.contains_key(&soup_id));
    }
}
