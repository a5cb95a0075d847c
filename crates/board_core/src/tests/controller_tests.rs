use super::*;

use shared::protocol::ElementData;

use crate::view::{FocusTarget, MemoryView};

fn board() -> BoardController<MemoryView> {
    BoardController::new(OrderStore::new(), MemoryView::new())
}

fn add_order(board: &mut BoardController<MemoryView>, title: &str, table: &str) -> OrderId {
    board.handle_add_toggle();
    board.view_mut().add.title = title.to_string();
    board.view_mut().add.table = table.to_string();
    board.handle_add_submit()
}

#[test]
fn add_submit_creates_ordered_record_and_card() {
    let mut board = board();
    let id = add_order(&mut board, "T", "5");

    assert_eq!(board.store().len(), 1);
    let order = board.store().get(id).expect("stored order");
    assert_eq!(order.title, "T");
    assert_eq!(order.table, "5");
    assert_eq!(order.column, Column::Ordered);

    let cards = board.view().cards(Column::Ordered);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].order_id, id);
    assert!(!board.view().overlay_open(Overlay::Add));
}

#[test]
fn add_submit_accepts_empty_fields() {
    let mut board = board();
    let id = add_order(&mut board, "", "");
    let order = board.store().get(id).expect("stored order");
    assert!(order.title.is_empty());
    assert!(order.table.is_empty());
}

#[test]
fn repeated_adds_mint_distinct_ids() {
    let mut board = board();
    let first = add_order(&mut board, "Soup", "1");
    let second = add_order(&mut board, "Soup", "1");
    assert_ne!(first, second);
    assert_eq!(board.view().cards(Column::Ordered).len(), 2);
}

#[test]
fn opening_add_overlay_resets_form() {
    let mut board = board();
    board.view_mut().add.title = "stale".to_string();
    board.handle_add_toggle();
    assert!(board.view().overlay_open(Overlay::Add));
    assert!(board.view().add.title.is_empty());
}

#[test]
fn drag_over_marked_path_highlights_column() {
    let mut board = board();
    let mut event = DragEvent::with_path(vec![
        ElementData::plain(),
        ElementData::area("preparing"),
        ElementData::area("served"),
    ]);

    assert_eq!(board.handle_drag_over(&mut event), Some(Column::Preparing));
    assert!(event.default_prevented());
    assert_eq!(board.store().dragging().over, Some(Column::Preparing));
    assert_eq!(board.view().highlighted(), Some(Column::Preparing));
}

#[test]
fn drag_over_unmarked_path_is_a_no_op_but_prevents_default() {
    let mut board = board();
    let mut first = DragEvent::with_path(vec![ElementData::area("ordered")]);
    board.handle_drag_over(&mut first);

    let mut event = DragEvent::composed(vec![ElementData::plain()]);
    assert_eq!(board.handle_drag_over(&mut event), None);
    assert!(event.default_prevented());
    assert_eq!(board.store().dragging().over, Some(Column::Ordered));
    assert_eq!(board.view().highlighted(), Some(Column::Ordered));
}

#[test]
fn drag_over_unknown_marker_changes_nothing() {
    let mut board = board();
    let mut event = DragEvent::with_path(vec![ElementData::area("kitchen")]);
    assert_eq!(board.handle_drag_over(&mut event), None);
    assert!(event.default_prevented());
    assert_eq!(board.store().dragging(), DraggingState::default());
    assert_eq!(board.view().highlighted(), None);
}

#[test]
fn drag_start_over_end_moves_card_between_columns() {
    let mut board = board();
    let id = add_order(&mut board, "Burger", "3");

    board.handle_drag_start(id).expect("drag start");
    let mut event = DragEvent::with_path(vec![ElementData::area("served")]);
    board.handle_drag_over(&mut event);

    assert_eq!(board.handle_drag_end(), Some(id));
    assert_eq!(board.store().get(id).expect("order").column, Column::Served);
    assert!(board.view().cards(Column::Ordered).is_empty());
    assert_eq!(board.view().cards(Column::Served)[0].order_id, id);
    assert_eq!(board.view().highlighted(), None);
    assert_eq!(board.store().dragging(), DraggingState::default());
}

#[test]
fn drag_end_in_same_column_keeps_card() {
    let mut board = board();
    let id = add_order(&mut board, "Fries", "2");
    board.handle_drag_start(id).expect("drag start");
    assert_eq!(board.handle_drag_end(), None);
    assert_eq!(board.view().column_of(id), Some(Column::Ordered));
}

#[test]
fn drag_end_without_drag_start_is_harmless() {
    let mut board = board();
    let mut event = DragEvent::with_path(vec![ElementData::area("served")]);
    board.handle_drag_over(&mut event);
    assert_eq!(board.handle_drag_end(), None);
    assert_eq!(board.view().highlighted(), None);
}

#[test]
fn drag_start_of_unknown_order_fails() {
    let mut board = board();
    let missing = OrderId::new_v4();
    assert_eq!(
        board.handle_drag_start(missing),
        Err(BoardError::OrderNotFound(missing))
    );
}

#[test]
fn edit_submit_moves_card_and_keeps_id() {
    let mut board = board();
    let id = add_order(&mut board, "Pizza", "4");
    let _other = add_order(&mut board, "Wine", "9");

    board.handle_edit_toggle(Some(id)).expect("open edit");
    assert_eq!(board.view().edit.title, "Pizza");
    board.view_mut().edit.table = "6".to_string();
    board.view_mut().edit.column = "preparing".to_string();

    assert_eq!(board.handle_edit_submit(), Ok(id));
    let order = board.store().get(id).expect("order kept");
    assert_eq!(order.column, Column::Preparing);
    assert_eq!(order.table, "6");
    assert_eq!(board.store().len(), 2);
    assert_eq!(board.view().column_of(id), Some(Column::Preparing));
    assert_eq!(board.view().cards(Column::Ordered).len(), 1);
    assert!(!board.view().overlay_open(Overlay::Edit));
    assert_eq!(board.editing(), None);
}

#[test]
fn edit_submit_with_unknown_column_changes_nothing() {
    let mut board = board();
    let id = add_order(&mut board, "Pizza", "4");
    board.handle_edit_toggle(Some(id)).expect("open edit");
    board.view_mut().edit.column = "fridge".to_string();

    assert_eq!(
        board.handle_edit_submit(),
        Err(BoardError::UnknownColumn("fridge".to_string()))
    );
    assert_eq!(board.view().column_of(id), Some(Column::Ordered));
    assert!(board.view().overlay_open(Overlay::Edit));
}

#[test]
fn edit_submit_without_selection_is_rejected() {
    let mut board = board();
    assert_eq!(board.handle_edit_submit(), Err(BoardError::NoOrderSelected));
}

#[test]
fn grid_click_outside_cards_keeps_edit_closed() {
    let mut board = board();
    board.handle_edit_toggle(None).expect("toggle");
    assert!(!board.view().overlay_open(Overlay::Edit));
}

#[test]
fn delete_removes_card_and_store_entry() {
    let mut board = board();
    let id = add_order(&mut board, "Cake", "8");
    let keep = add_order(&mut board, "Coffee", "8");
    board.handle_edit_toggle(Some(id)).expect("open edit");

    let removed = board.handle_delete(ClickTarget::EditDelete).expect("removed");
    assert_eq!(removed.id, id);
    assert!(board.store().get(id).is_none());
    assert_eq!(board.view().column_of(id), None);
    assert_eq!(board.view().column_of(keep), Some(Column::Ordered));
    assert!(!board.view().overlay_open(Overlay::Edit));
}

#[test]
fn delete_from_other_control_only_closes_overlay() {
    let mut board = board();
    let id = add_order(&mut board, "Cake", "8");
    board.handle_edit_toggle(Some(id)).expect("open edit");

    assert!(board.handle_delete(ClickTarget::EditCancel).is_none());
    assert!(board.store().get(id).is_some());
    assert!(!board.view().overlay_open(Overlay::Edit));
}

#[test]
fn toggling_twice_restores_visibility_and_focus() {
    let mut board = board();

    board.handle_help_toggle();
    assert!(board.view().overlay_open(Overlay::Help));
    board.handle_help_toggle();
    assert!(!board.view().overlay_open(Overlay::Help));
    assert_eq!(board.view().focused(), Some(FocusTarget::AddButton));

    board.handle_add_toggle();
    board.handle_add_toggle();
    assert!(!board.view().overlay_open(Overlay::Add));
    assert_eq!(board.view().focused(), Some(FocusTarget::AddButton));
}

#[test]
fn closing_edit_focuses_grid() {
    let mut board = board();
    let id = add_order(&mut board, "Tea", "1");
    board.handle_edit_toggle(Some(id)).expect("open");
    board.handle_edit_toggle(None).expect("close");
    assert!(!board.view().overlay_open(Overlay::Edit));
    assert_eq!(board.view().focused(), Some(FocusTarget::Grid));
}

#[test]
fn dispatch_routes_clicks_like_listeners() {
    let mut board = board();
    board
        .dispatch(BoardEvent::Click(ClickTarget::HelpButton))
        .expect("help");
    assert!(board.view().overlay_open(Overlay::Help));
    board
        .dispatch(BoardEvent::Click(ClickTarget::HelpCancel))
        .expect("help cancel");
    assert!(!board.view().overlay_open(Overlay::Help));

    board
        .dispatch(BoardEvent::Click(ClickTarget::AddButton))
        .expect("add");
    board.view_mut().add.title = "Ramen".to_string();
    board.dispatch(BoardEvent::AddSubmit).expect("submit");
    assert_eq!(board.view().cards(Column::Ordered).len(), 1);

    let id = board.view().cards(Column::Ordered)[0].order_id;
    board
        .dispatch(BoardEvent::Click(ClickTarget::Grid(Some(id))))
        .expect("grid");
    assert_eq!(board.editing(), Some(id));
    board
        .dispatch(BoardEvent::Click(ClickTarget::EditDelete))
        .expect("delete");
    assert!(board.store().is_empty());
}

#[test]
fn dispatch_drag_sequence_uses_composed_path() {
    let mut board = board();
    let id = add_order(&mut board, "Nachos", "12");
    board
        .dispatch(BoardEvent::DragStart { order_id: id })
        .expect("start");
    board
        .dispatch(BoardEvent::DragOver {
            path: vec![ElementData::card(id), ElementData::area("preparing")],
        })
        .expect("over");
    board.dispatch(BoardEvent::DragEnd).expect("end");
    assert_eq!(board.view().column_of(id), Some(Column::Preparing));
}
