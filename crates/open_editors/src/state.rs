use gpui::{Pixels, Point};

use crate::geometry::{RowLayout, hit_test, is_over_action_button};
use crate::item::ListItem;

/// Transient pointer state of one open editors view.
#[derive(Clone, Debug)]
pub struct InteractionState {
    pub(crate) hovered_ix: Option<usize>,
    pub(crate) action_button_hovered: bool,
    pub(crate) drop_target: Option<usize>,
    pub(crate) dragging: bool,
    pub(crate) suppress_next_click: bool,
    pub(crate) show_file_path: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hovered_ix: None,
            action_button_hovered: false,
            drop_target: None,
            dragging: false,
            suppress_next_click: false,
            show_file_path: true,
        }
    }
}

impl InteractionState {
    pub fn new(show_file_path: bool) -> Self {
        Self {
            show_file_path,
            ..Default::default()
        }
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_ix
    }

    pub fn is_action_button_hovered(&self) -> bool {
        self.action_button_hovered
    }

    /// Insertion gap (before-semantics) the dragged row would land in.
    pub fn drop_target(&self) -> Option<usize> {
        self.drop_target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn suppresses_next_click(&self) -> bool {
        self.suppress_next_click
    }

    pub fn show_file_path(&self) -> bool {
        self.show_file_path
    }

    pub fn set_show_file_path(&mut self, show: bool) {
        self.show_file_path = show;
    }

    /// Track the row under the pointer. Returns `true` when a repaint is needed.
    ///
    /// Group headers and the empty area below the rows never count as hovered.
    pub fn update_hover(
        &mut self,
        position: Point<Pixels>,
        items: &[ListItem],
        layout: &RowLayout,
    ) -> bool {
        let (hovered_ix, over_action) = match hit_test(position, layout) {
            Some(hit) if items.get(hit.ix).is_some_and(|item| !item.is_header()) => {
                (Some(hit.ix), is_over_action_button(position, hit.bounds))
            }
            _ => (None, false),
        };

        if hovered_ix == self.hovered_ix && over_action == self.action_button_hovered {
            return false;
        }

        self.hovered_ix = hovered_ix;
        self.action_button_hovered = over_action;
        true
    }

    /// Forget the hovered row after the pointer left the list.
    pub fn clear_hover(&mut self) -> bool {
        if self.hovered_ix.is_none() && !self.action_button_hovered {
            return false;
        }

        self.hovered_ix = None;
        self.action_button_hovered = false;
        true
    }
}
