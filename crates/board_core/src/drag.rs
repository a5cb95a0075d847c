//! Drag-over event model and column-area resolution.

use shared::protocol::ElementData;

/// A drag-over event as seen by the board.
///
/// Some hosts expose the bubbling path directly, others only through
/// `composed_path()`. Both list elements innermost-first.
#[derive(Debug, Clone)]
pub struct DragEvent {
    path: Option<Vec<ElementData>>,
    composed: Vec<ElementData>,
    default_prevented: bool,
}

impl DragEvent {
    /// Event whose host exposes the path property.
    pub fn with_path(path: Vec<ElementData>) -> Self {
        Self {
            composed: path.clone(),
            path: Some(path),
            default_prevented: false,
        }
    }

    /// Event that only supports the composed-path query.
    pub fn composed(path: Vec<ElementData>) -> Self {
        Self {
            path: None,
            composed: path,
            default_prevented: false,
        }
    }

    pub fn path(&self) -> Option<&[ElementData]> {
        self.path.as_deref()
    }

    pub fn composed_path(&self) -> &[ElementData] {
        &self.composed
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Returns the area marker of the element nearest the event target, if any
/// element on the path carries one.
pub fn resolve_drag_area(event: &DragEvent) -> Option<&str> {
    let path = event.path().unwrap_or_else(|| event.composed_path());
    path.iter()
        .find_map(|element| element.area.as_deref().filter(|area| !area.is_empty()))
}

#[cfg(test)]
mod tests {
    use shared::domain::OrderId;

    use super::*;

    #[test]
    fn innermost_marker_wins() {
        let event = DragEvent::with_path(vec![
            ElementData::card(OrderId::new_v4()),
            ElementData::area("preparing"),
            ElementData::plain(),
            ElementData::area("ordered"),
        ]);
        assert_eq!(resolve_drag_area(&event), Some("preparing"));
    }

    #[test]
    fn falls_back_to_composed_path() {
        let event = DragEvent::composed(vec![ElementData::plain(), ElementData::area("served")]);
        assert!(event.path().is_none());
        assert_eq!(resolve_drag_area(&event), Some("served"));
    }

    #[test]
    fn path_without_marker_resolves_nothing() {
        let event = DragEvent::with_path(vec![ElementData::plain(), ElementData::plain()]);
        assert_eq!(resolve_drag_area(&event), None);
        assert_eq!(resolve_drag_area(&DragEvent::composed(Vec::new())), None);
    }

    #[test]
    fn empty_marker_counts_as_absent() {
        let event = DragEvent::with_path(vec![ElementData::area(""), ElementData::area("ordered")]);
        assert_eq!(resolve_drag_area(&event), Some("ordered"));
    }
}
