//! Desktop order board: three columns of draggable cards plus help, add and
//! edit overlays. Widgets enqueue board events; handlers run at the start of
//! the next frame.

use board_core::{
    BoardController, BoardView, FocusTarget, MemoryView, OrderCard, OrderStore, Overlay,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Column, OrderId},
    protocol::{BoardEvent, ClickTarget, ElementData},
};

use crate::controller::{
    events::UiError,
    orchestration::{drain_events, queue_event},
};
use crate::ui::theme::{
    apply_settings, text_scale_range, BoardUiSettings, ThemePreset, SETTINGS_STORAGE_KEY,
};

const HELP_LINES: &[&str] = &[
    "Add order: opens a blank form; new orders start in \"Ordered\".",
    "Click a card to edit its title, table or column, or to delete it.",
    "Drag a card onto another column to move it along.",
    "Esc closes whichever overlay is open.",
];

/// What the drag tracker has to report after comparing the current drag
/// payload with the drag it last announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTransition {
    Idle,
    Started(OrderId),
    Ended,
    Replaced(OrderId),
}

impl DragTransition {
    /// Whether the frame queued drag events that still need to be applied.
    pub fn needs_repaint(self) -> bool {
        self != DragTransition::Idle
    }
}

pub fn drag_transition(payload: Option<OrderId>, active: Option<OrderId>) -> DragTransition {
    match (payload, active) {
        (Some(id), None) => DragTransition::Started(id),
        (Some(id), Some(prev)) if id != prev => DragTransition::Replaced(id),
        (None, Some(_)) => DragTransition::Ended,
        _ => DragTransition::Idle,
    }
}

/// Grid clicks for one frame. A background click only counts when no card
/// was hit.
pub fn grid_click_targets(cards: Vec<OrderId>, background: bool) -> Vec<ClickTarget> {
    if cards.is_empty() && background {
        return vec![ClickTarget::Grid(None)];
    }
    cards
        .into_iter()
        .map(|order_id| ClickTarget::Grid(Some(order_id)))
        .collect()
}

/// Event path for a pointer over `column`, innermost first.
pub fn drag_over_path(column: Column, card: Option<OrderId>) -> Vec<ElementData> {
    let mut path = Vec::with_capacity(3);
    if let Some(order_id) = card {
        path.push(ElementData::card(order_id));
    }
    path.push(ElementData::plain());
    path.push(ElementData::area(column.as_str()));
    path
}

pub struct OrderBoardApp {
    board: BoardController<MemoryView>,
    event_tx: Sender<BoardEvent>,
    event_rx: Receiver<BoardEvent>,

    settings: BoardUiSettings,
    applied_settings: Option<BoardUiSettings>,
    settings_open: bool,

    status_banner: Option<UiError>,
    pending_focus: Option<FocusTarget>,

    active_drag: Option<OrderId>,
    last_drag_over: Option<Column>,
}

impl OrderBoardApp {
    pub fn new(
        event_tx: Sender<BoardEvent>,
        event_rx: Receiver<BoardEvent>,
        persisted_settings: Option<BoardUiSettings>,
        show_help_on_start: bool,
    ) -> Self {
        let mut board = BoardController::new(OrderStore::new(), MemoryView::new());
        if show_help_on_start {
            board.handle_help_toggle();
        }
        Self {
            board,
            event_tx,
            event_rx,
            settings: persisted_settings.unwrap_or_default(),
            applied_settings: None,
            settings_open: false,
            status_banner: None,
            pending_focus: None,
            active_drag: None,
            last_drag_over: None,
        }
    }

    fn emit(&mut self, event: BoardEvent) {
        if let Err(err) = queue_event(&self.event_tx, event) {
            self.status_banner = Some(err);
        }
    }

    fn process_board_events(&mut self) {
        let errors = drain_events(&self.event_rx, &mut self.board);
        if let Some(err) = errors.into_iter().last() {
            tracing::debug!(event = err.event(), "showing board error banner");
            self.status_banner = Some(err);
        }
        if let Some(target) = self.board.view_mut().take_focus() {
            self.pending_focus = Some(target);
        }
    }

    fn apply_settings_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_settings == Some(self.settings) {
            return;
        }
        apply_settings(ctx, &self.settings);
        self.applied_settings = Some(self.settings);
    }

    fn track_drag(&mut self, ctx: &egui::Context) {
        let payload = egui::DragAndDrop::payload::<OrderId>(ctx).map(|id| *id);
        let transition = drag_transition(payload, self.active_drag);
        if transition.needs_repaint() {
            ctx.request_repaint();
        }
        match transition {
            DragTransition::Idle => {}
            DragTransition::Started(order_id) => {
                self.active_drag = Some(order_id);
                self.last_drag_over = None;
                self.emit(BoardEvent::DragStart { order_id });
            }
            DragTransition::Replaced(order_id) => {
                self.emit(BoardEvent::DragEnd);
                self.active_drag = Some(order_id);
                self.last_drag_over = None;
                self.emit(BoardEvent::DragStart { order_id });
            }
            DragTransition::Ended => {
                self.active_drag = None;
                self.last_drag_over = None;
                self.emit(BoardEvent::DragEnd);
            }
        }
    }

    fn handle_escape(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            return;
        }
        let view = self.board.view();
        let target = if view.overlay_open(Overlay::Edit) {
            Some(ClickTarget::EditCancel)
        } else if view.overlay_open(Overlay::Add) {
            Some(ClickTarget::AddCancel)
        } else if view.overlay_open(Overlay::Help) {
            Some(ClickTarget::HelpCancel)
        } else {
            None
        };
        if let Some(target) = target {
            self.emit(BoardEvent::Click(target));
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(banner.banner_text()).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("board_top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Orders");
                ui.separator();

                let add = ui.button("➕ Add order");
                if self.pending_focus == Some(FocusTarget::AddButton) {
                    add.request_focus();
                    self.pending_focus = None;
                }
                if add.clicked() {
                    self.emit(BoardEvent::Click(ClickTarget::AddButton));
                }
                if ui.button("❓ Help").clicked() {
                    self.emit(BoardEvent::Click(ClickTarget::HelpButton));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.settings_open = !self.settings_open;
                    }
                    ui.weak(format!("{} open orders", self.board.store().len()));
                });
            });
            ui.add_space(4.0);
            self.show_status_banner(ui);
        });
    }

    fn show_board(&mut self, ctx: &egui::Context) {
        let pointer = ctx.pointer_hover_pos();
        let dragging = self.active_drag;
        let mut hovered_area: Option<(Column, Option<OrderId>)> = None;
        let mut clicked: Vec<OrderId> = Vec::new();
        let mut grid_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            // Registered before the cards so they win the hit test.
            grid_clicked = ui
                .interact(
                    ui.max_rect(),
                    egui::Id::new("board_grid"),
                    egui::Sense::click(),
                )
                .clicked();
            ui.columns(Column::ALL.len(), |uis| {
                for (ui, column) in uis.iter_mut().zip(Column::ALL) {
                    let (rect, hovered_card) =
                        self.show_column(ui, column, dragging, pointer, &mut clicked);
                    if dragging.is_some() && pointer.is_some_and(|pos| rect.contains(pos)) {
                        hovered_area = Some((column, hovered_card));
                    }
                }
            });
        });

        // An empty board has no card to take grid focus.
        if self.pending_focus == Some(FocusTarget::Grid) {
            self.pending_focus = None;
        }

        if let Some((column, card)) = hovered_area {
            if self.last_drag_over != Some(column) {
                self.last_drag_over = Some(column);
                self.emit(BoardEvent::DragOver {
                    path: drag_over_path(column, card),
                });
            }
        }
        for target in grid_click_targets(clicked, grid_clicked) {
            self.emit(BoardEvent::Click(target));
        }
    }

    /// Renders one column; returns its rect and the card under the pointer.
    fn show_column(
        &mut self,
        ui: &mut egui::Ui,
        column: Column,
        dragging: Option<OrderId>,
        pointer: Option<egui::Pos2>,
        clicked: &mut Vec<OrderId>,
    ) -> (egui::Rect, Option<OrderId>) {
        let highlighted = self.board.view().highlighted() == Some(column);
        let accent = self.settings.accent();
        let (fill, stroke) = if highlighted {
            (accent.gamma_multiply(0.25), egui::Stroke::new(2.0, accent))
        } else {
            (
                ui.visuals().faint_bg_color,
                egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
            )
        };
        let cards: Vec<OrderCard> = self.board.view().cards(column).to_vec();
        let mut hovered_card = None;

        let frame = egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_min_height(ui.available_height());
                ui.horizontal(|ui| {
                    ui.strong(column.label());
                    ui.weak(cards.len().to_string());
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt(("column_scroll", column))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        if cards.is_empty() {
                            ui.weak("No orders");
                        }
                        for card in &cards {
                            let response =
                                self.show_card(ui, card, dragging == Some(card.order_id));
                            if pointer.is_some_and(|pos| response.rect.contains(pos)) {
                                hovered_card = Some(card.order_id);
                            }
                            if response.drag_started() {
                                egui::DragAndDrop::set_payload(ui.ctx(), card.order_id);
                            }
                            if response.clicked() {
                                clicked.push(card.order_id);
                            }
                        }
                    });
            });

        (frame.response.rect, hovered_card)
    }

    fn show_card(
        &mut self,
        ui: &mut egui::Ui,
        card: &OrderCard,
        being_dragged: bool,
    ) -> egui::Response {
        let compact = self.settings.compact_cards;
        let show_time = self.settings.show_created_time;

        let rect = ui
            .scope(|ui| {
                if being_dragged {
                    ui.multiply_opacity(0.4);
                }
                egui::Frame::new()
                    .fill(ui.visuals().extreme_bg_color)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.inactive.bg_stroke.color,
                    ))
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::same(if compact { 6 } else { 10 }))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        let title = if card.title.is_empty() {
                            "(untitled)"
                        } else {
                            card.title.as_str()
                        };
                        ui.label(egui::RichText::new(title).strong());
                        ui.horizontal(|ui| {
                            ui.small(format!("Table {}", card.table));
                            if show_time {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.small(card.created_label.as_str());
                                    },
                                );
                            }
                        });
                    })
                    .response
                    .rect
            })
            .inner;
        ui.add_space(if compact { 2.0 } else { 4.0 });

        let response = ui
            .interact(
                rect,
                egui::Id::new(("order_card", card.order_id)),
                egui::Sense::click_and_drag(),
            )
            .on_hover_cursor(egui::CursorIcon::Grab);
        if self.pending_focus == Some(FocusTarget::Grid) {
            response.request_focus();
            self.pending_focus = None;
        }
        response
    }

    fn show_drag_ghost(&self, ctx: &egui::Context) {
        let Some(order_id) = egui::DragAndDrop::payload::<OrderId>(ctx) else {
            return;
        };
        let Some(pos) = ctx.pointer_interact_pos() else {
            return;
        };
        let Some(order) = self.board.store().get(*order_id) else {
            return;
        };
        egui::Area::new(egui::Id::new("order_drag_ghost"))
            .order(egui::Order::Tooltip)
            .fixed_pos(pos + egui::vec2(12.0, 12.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(format!("{} · table {}", order.title, order.table));
                });
            });
    }

    fn show_help_overlay(&mut self, ctx: &egui::Context) {
        if !self.board.view().overlay_open(Overlay::Help) {
            return;
        }
        let mut close = false;
        egui::Window::new("How the board works")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
            .show(ctx, |ui| {
                for line in HELP_LINES {
                    ui.label(*line);
                }
                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        if close {
            self.emit(BoardEvent::Click(ClickTarget::HelpCancel));
        }
    }

    fn show_add_overlay(&mut self, ctx: &egui::Context) {
        if !self.board.view().overlay_open(Overlay::Add) {
            return;
        }
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new("Add order")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
            .show(ctx, |ui| {
                let form = &mut self.board.view_mut().add;
                ui.label("Title");
                let title = ui.add(
                    egui::TextEdit::singleline(&mut form.title)
                        .hint_text("e.g. Margherita")
                        .desired_width(f32::INFINITY),
                );
                ui.label("Table");
                let table = ui.add(
                    egui::TextEdit::singleline(&mut form.table)
                        .hint_text("e.g. 12")
                        .desired_width(f32::INFINITY),
                );
                if ui.memory(|m| m.focused().is_none()) {
                    title.request_focus();
                }
                let enter = (title.lost_focus() || table.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() || enter {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if submit {
            self.emit(BoardEvent::AddSubmit);
        } else if cancel {
            self.emit(BoardEvent::Click(ClickTarget::AddCancel));
        }
    }

    fn show_edit_overlay(&mut self, ctx: &egui::Context) {
        if !self.board.view().overlay_open(Overlay::Edit) {
            return;
        }
        let mut action = None;
        egui::Window::new("Edit order")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
            .show(ctx, |ui| {
                let form = &mut self.board.view_mut().edit;
                ui.label("Title");
                ui.add(egui::TextEdit::singleline(&mut form.title).desired_width(f32::INFINITY));
                ui.label("Table");
                ui.add(egui::TextEdit::singleline(&mut form.table).desired_width(f32::INFINITY));
                ui.label("Column");
                let selected = form
                    .column
                    .parse::<Column>()
                    .map(Column::label)
                    .unwrap_or("Choose a column");
                egui::ComboBox::from_id_salt("edit_order_column")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for column in Column::ALL {
                            ui.selectable_value(
                                &mut form.column,
                                column.as_str().to_string(),
                                column.label(),
                            );
                        }
                    });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = Some(BoardEvent::EditSubmit);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(BoardEvent::Click(ClickTarget::EditCancel));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(
                            egui::RichText::new("Delete").color(egui::Color32::WHITE),
                        )
                        .fill(egui::Color32::from_rgb(160, 60, 60));
                        if ui.add(delete).clicked() {
                            action = Some(BoardEvent::Click(ClickTarget::EditDelete));
                        }
                    });
                });
            });
        if let Some(event) = action {
            self.emit(event);
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        egui::Window::new("Settings")
            .open(&mut self.settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Theme");
                egui::ComboBox::from_id_salt("theme_preset")
                    .selected_text(self.settings.preset.label())
                    .show_ui(ui, |ui| {
                        for preset in [ThemePreset::Dark, ThemePreset::Light] {
                            ui.selectable_value(&mut self.settings.preset, preset, preset.label());
                        }
                    });

                ui.label("Accent color");
                let mut accent = self.settings.accent();
                if ui.color_edit_button_srgba(&mut accent).changed() {
                    self.settings.set_accent(accent);
                }

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.settings.text_scale, text_scale_range())
                        .text("Text scale")
                        .step_by(0.05),
                );
                ui.checkbox(&mut self.settings.compact_cards, "Compact cards");
                ui.checkbox(&mut self.settings.show_created_time, "Show order time on cards");

                if ui.button("Reset to defaults").clicked() {
                    self.settings = BoardUiSettings::default();
                }
            });
    }

    /// One full frame of board UI, without the eframe frame handle.
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.process_board_events();
        self.apply_settings_if_needed(ctx);
        self.track_drag(ctx);
        self.handle_escape(ctx);

        self.show_top_bar(ctx);
        self.show_board(ctx);
        self.show_help_overlay(ctx);
        self.show_add_overlay(ctx);
        self.show_edit_overlay(ctx);
        self.show_settings_window(ctx);
        self.show_drag_ghost(ctx);

        if !self.event_rx.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for OrderBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
