//! Event handlers: translate board events into store mutations and view updates.

use shared::{
    domain::{Column, Order, OrderDraft, OrderId},
    error::BoardError,
    protocol::{BoardEvent, ClickTarget},
};
use tracing::{debug, info, warn};

use crate::{
    drag::{resolve_drag_area, DragEvent},
    store::{DraggingState, OrderStore},
    view::{BoardView, OrderCard, Overlay},
};

pub struct BoardController<V: BoardView> {
    store: OrderStore,
    view: V,
    editing: Option<OrderId>,
}

impl<V: BoardView> BoardController<V> {
    pub fn new(store: OrderStore, view: V) -> Self {
        Self {
            store,
            view,
            editing: None,
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Order the edit overlay is currently bound to.
    pub fn editing(&self) -> Option<OrderId> {
        self.editing
    }

    /// Routes an event to the handler registered for it.
    pub fn dispatch(&mut self, event: BoardEvent) -> Result<(), BoardError> {
        debug!(event = event.name(), "handling board event");
        match event {
            BoardEvent::DragStart { order_id } => self.handle_drag_start(order_id),
            BoardEvent::DragOver { path } => {
                let mut event = DragEvent::composed(path);
                self.handle_drag_over(&mut event);
                Ok(())
            }
            BoardEvent::DragEnd => {
                self.handle_drag_end();
                Ok(())
            }
            BoardEvent::Click(target) => match target {
                ClickTarget::AddButton | ClickTarget::AddCancel => {
                    self.handle_add_toggle();
                    Ok(())
                }
                ClickTarget::HelpButton | ClickTarget::HelpCancel => {
                    self.handle_help_toggle();
                    Ok(())
                }
                ClickTarget::Grid(order_id) => self.handle_edit_toggle(order_id),
                ClickTarget::EditCancel => self.handle_edit_toggle(None),
                ClickTarget::EditDelete => {
                    self.handle_delete(target);
                    Ok(())
                }
            },
            BoardEvent::AddSubmit => {
                self.handle_add_submit();
                Ok(())
            }
            BoardEvent::EditSubmit => self.handle_edit_submit().map(|_| ()),
        }
    }

    /// Resolves the column under the pointer and highlights it. The event's
    /// default is always prevented so the host keeps treating the area as a
    /// drop target.
    pub fn handle_drag_over(&mut self, event: &mut DragEvent) -> Option<Column> {
        event.prevent_default();

        let marker = resolve_drag_area(event)?;
        let column = match marker.parse::<Column>() {
            Ok(column) => column,
            Err(err) => {
                warn!(marker, error = %err, "ignoring drag over unknown area");
                return None;
            }
        };

        self.store.update_dragging_over(column);
        self.view.set_drag_highlight(Some(column));
        Some(column)
    }

    pub fn handle_drag_start(&mut self, order_id: OrderId) -> Result<(), BoardError> {
        let order = self
            .store
            .get(order_id)
            .ok_or(BoardError::OrderNotFound(order_id))?;
        let over = order.column;
        self.store.update_dragging(DraggingState {
            source: Some(order_id),
            over: Some(over),
        });
        debug!(order_id = %order_id, column = %over, "drag started");
        Ok(())
    }

    /// Drops the dragged order into the last column it was dragged over.
    /// Returns the id of the order if it changed column.
    pub fn handle_drag_end(&mut self) -> Option<OrderId> {
        let dragging = self.store.take_dragging();
        self.view.set_drag_highlight(None);

        let (Some(source), Some(over)) = (dragging.source, dragging.over) else {
            return None;
        };
        let Some(order) = self.store.get_mut(source) else {
            warn!(order_id = %source, "dragged order no longer exists");
            return None;
        };
        if order.column == over {
            return None;
        }

        let from = order.column;
        order.column = over;
        let card = OrderCard::from_order(order);
        self.view.remove_card(source);
        self.view.append_card(over, card);
        info!(order_id = %source, from = %from, to = %over, "order moved by drag");
        Some(source)
    }

    pub fn handle_help_toggle(&mut self) {
        if self.view.overlay_open(Overlay::Help) {
            self.close(Overlay::Help);
        } else {
            self.view.show_overlay(Overlay::Help);
        }
    }

    /// Opening the add overlay always starts from a blank form.
    pub fn handle_add_toggle(&mut self) {
        if self.view.overlay_open(Overlay::Add) {
            self.close(Overlay::Add);
        } else {
            self.view.show_overlay(Overlay::Add);
            self.view.reset_add_form();
        }
    }

    pub fn handle_add_submit(&mut self) -> OrderId {
        let values = self.view.add_form();
        let order = self.store.create_order_data(OrderDraft {
            title: values.title,
            table: values.table,
            column: Column::Ordered,
        });
        let order_id = order.id;

        self.view
            .append_card(Column::Ordered, OrderCard::from_order(&order));
        info!(order_id = %order_id, table = %order.table, "order added");
        self.store.insert(order);
        self.close(Overlay::Add);
        order_id
    }

    /// Opens the edit overlay for `order_id`, or closes it if already open.
    /// A grid click that did not land on a card leaves a closed overlay closed.
    pub fn handle_edit_toggle(&mut self, order_id: Option<OrderId>) -> Result<(), BoardError> {
        if self.view.overlay_open(Overlay::Edit) {
            self.close(Overlay::Edit);
            return Ok(());
        }

        let Some(order_id) = order_id else {
            debug!("grid click outside any card");
            return Ok(());
        };
        let order = self
            .store
            .get(order_id)
            .ok_or(BoardError::OrderNotFound(order_id))?;
        self.view.fill_edit_form(order);
        self.editing = Some(order_id);
        self.view.show_overlay(Overlay::Edit);
        Ok(())
    }

    /// Applies the edit form to the selected order, keeping its id, and moves
    /// its card to the chosen column. Nothing changes on error.
    pub fn handle_edit_submit(&mut self) -> Result<OrderId, BoardError> {
        let order_id = self.editing.ok_or(BoardError::NoOrderSelected)?;
        let values = self.view.edit_form();
        let column = values.column.parse::<Column>()?;
        let order = self
            .store
            .get_mut(order_id)
            .ok_or(BoardError::OrderNotFound(order_id))?;

        order.title = values.title;
        order.table = values.table;
        order.column = column;
        let card = OrderCard::from_order(order);

        self.view.remove_card(order_id);
        self.view.append_card(column, card);
        info!(order_id = %order_id, column = %column, "order edited");
        self.close(Overlay::Edit);
        Ok(order_id)
    }

    /// Deletes the selected order when `target` is the delete control. The
    /// edit overlay closes whichever control was clicked.
    pub fn handle_delete(&mut self, target: ClickTarget) -> Option<Order> {
        let mut removed = None;
        if target == ClickTarget::EditDelete {
            if let Some(order_id) = self.editing {
                self.view.remove_card(order_id);
                removed = self.store.remove(order_id);
                info!(order_id = %order_id, "order deleted");
            }
        }
        self.close(Overlay::Edit);
        removed
    }

    fn close(&mut self, overlay: Overlay) {
        self.view.close_overlay(overlay);
        self.view.focus(overlay.focus_target());
        if overlay == Overlay::Edit {
            self.editing = None;
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
