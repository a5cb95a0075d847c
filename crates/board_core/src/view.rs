//! View contract between board handlers and whatever host renders the board.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Local;
use shared::{
    domain::{Column, Order, OrderId},
    protocol::{BoardSnapshot, ColumnSnapshot},
};

use crate::store::OrderStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Overlay {
    Help,
    Add,
    Edit,
}

impl Overlay {
    /// Control that takes focus back when this overlay closes.
    pub fn focus_target(self) -> FocusTarget {
        match self {
            Overlay::Help | Overlay::Add => FocusTarget::AddButton,
            Overlay::Edit => FocusTarget::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    AddButton,
    Grid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFormValues {
    pub title: String,
    pub table: String,
}

/// Edit form values as entered. `column` is the raw select value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFormValues {
    pub title: String,
    pub table: String,
    pub column: String,
}

/// Renderable card for one order. Carries the record id so the host can
/// route clicks and drags back to the right record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCard {
    pub order_id: OrderId,
    pub title: String,
    pub table: String,
    pub created_label: String,
}

impl OrderCard {
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id,
            title: order.title.clone(),
            table: order.table.clone(),
            created_label: order
                .created_at
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string(),
        }
    }
}

pub trait BoardView {
    fn overlay_open(&self, overlay: Overlay) -> bool;
    fn show_overlay(&mut self, overlay: Overlay);
    fn close_overlay(&mut self, overlay: Overlay);
    fn focus(&mut self, target: FocusTarget);

    fn add_form(&self) -> AddFormValues;
    fn reset_add_form(&mut self);
    fn edit_form(&self) -> EditFormValues;
    fn fill_edit_form(&mut self, order: &Order);

    fn append_card(&mut self, column: Column, card: OrderCard);
    /// Removes the card rendered for `id`, returning whether one existed.
    fn remove_card(&mut self, id: OrderId) -> bool;
    fn set_drag_highlight(&mut self, column: Option<Column>);
}

/// Retained, host-agnostic view state. Hosts write form fields into it and
/// render its columns; handlers mutate it through [`BoardView`].
#[derive(Debug, Clone)]
pub struct MemoryView {
    open: BTreeSet<Overlay>,
    focused: Option<FocusTarget>,
    pub add: AddFormValues,
    pub edit: EditFormValues,
    columns: BTreeMap<Column, Vec<OrderCard>>,
    highlighted: Option<Column>,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self {
            open: BTreeSet::new(),
            focused: None,
            add: AddFormValues::default(),
            edit: EditFormValues {
                column: Column::Ordered.as_str().to_string(),
                ..EditFormValues::default()
            },
            columns: Column::ALL.iter().map(|column| (*column, Vec::new())).collect(),
            highlighted: None,
        }
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self, column: Column) -> &[OrderCard] {
        self.columns.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn column_of(&self, id: OrderId) -> Option<Column> {
        self.columns
            .iter()
            .find(|(_, cards)| cards.iter().any(|card| card.order_id == id))
            .map(|(column, _)| *column)
    }

    pub fn card_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn highlighted(&self) -> Option<Column> {
        self.highlighted
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    /// Hands a pending focus request to the host exactly once.
    pub fn take_focus(&mut self) -> Option<FocusTarget> {
        self.focused.take()
    }

    /// Cards in display order, resolved against `store`. Cards whose record
    /// is missing are skipped.
    pub fn snapshot(&self, store: &OrderStore) -> BoardSnapshot {
        let columns = Column::ALL
            .iter()
            .map(|column| ColumnSnapshot {
                column: *column,
                orders: self
                    .cards(*column)
                    .iter()
                    .filter_map(|card| store.get(card.order_id).cloned())
                    .collect(),
            })
            .collect();
        BoardSnapshot {
            columns,
            highlighted: self.highlighted,
        }
    }
}

impl BoardView for MemoryView {
    fn overlay_open(&self, overlay: Overlay) -> bool {
        self.open.contains(&overlay)
    }

    fn show_overlay(&mut self, overlay: Overlay) {
        self.open.insert(overlay);
    }

    fn close_overlay(&mut self, overlay: Overlay) {
        self.open.remove(&overlay);
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
    }

    fn add_form(&self) -> AddFormValues {
        self.add.clone()
    }

    fn reset_add_form(&mut self) {
        self.add = AddFormValues::default();
    }

    fn edit_form(&self) -> EditFormValues {
        self.edit.clone()
    }

    fn fill_edit_form(&mut self, order: &Order) {
        self.edit = EditFormValues {
            title: order.title.clone(),
            table: order.table.clone(),
            column: order.column.as_str().to_string(),
        };
    }

    fn append_card(&mut self, column: Column, card: OrderCard) {
        self.columns.entry(column).or_default().push(card);
    }

    fn remove_card(&mut self, id: OrderId) -> bool {
        for cards in self.columns.values_mut() {
            if let Some(index) = cards.iter().position(|card| card.order_id == id) {
                cards.remove(index);
                return true;
            }
        }
        false
    }

    fn set_drag_highlight(&mut self, column: Option<Column>) {
        self.highlighted = column;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shared::domain::OrderDraft;

    use super::*;

    fn order(title: &str) -> Order {
        Order::from_draft(
            OrderId::new_v4(),
            OrderDraft {
                title: title.to_string(),
                table: "7".to_string(),
                column: Column::Preparing,
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).single().expect("time"),
        )
    }

    #[test]
    fn card_carries_record_id_and_fields() {
        let order = order("Pasta");
        let card = OrderCard::from_order(&order);
        assert_eq!(card.order_id, order.id);
        assert_eq!(card.title, "Pasta");
        assert_eq!(card.table, "7");
        let local = order.created_at.with_timezone(&Local).format("%H:%M").to_string();
        assert_eq!(card.created_label, local);
    }

    #[test]
    fn remove_card_only_touches_matching_id() {
        let mut view = MemoryView::new();
        let first = order("a");
        let second = order("b");
        view.append_card(Column::Ordered, OrderCard::from_order(&first));
        view.append_card(Column::Ordered, OrderCard::from_order(&second));

        assert!(view.remove_card(second.id));
        assert!(!view.remove_card(second.id));
        assert_eq!(view.cards(Column::Ordered).len(), 1);
        assert_eq!(view.cards(Column::Ordered)[0].order_id, first.id);
    }

    #[test]
    fn fill_edit_form_uses_column_marker() {
        let mut view = MemoryView::new();
        view.fill_edit_form(&order("Salad"));
        assert_eq!(view.edit.title, "Salad");
        assert_eq!(view.edit.column, "preparing");
    }

    #[test]
    fn take_focus_is_one_shot() {
        let mut view = MemoryView::new();
        view.focus(FocusTarget::Grid);
        assert_eq!(view.take_focus(), Some(FocusTarget::Grid));
        assert_eq!(view.take_focus(), None);
    }
}
