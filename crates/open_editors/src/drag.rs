use gpui::{MouseButton, Pixels, Point, px};

use crate::geometry::{RowLayout, drop_gap_at, hit_test, is_over_action_button};
use crate::host::{EditorHost, settle};
use crate::item::{FileHandle, GroupKey, ListItem};
use crate::state::InteractionState;

/// Pointer travel that turns a press into a drag.
pub const DRAG_THRESHOLD: Pixels = px(5.);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Pressed on a row, not moved far enough to count as a drag yet.
    Pending,
    Dragging,
}

/// What the view has to do after a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragResponse {
    pub repaint: bool,
    pub refresh: bool,
    pub clear_selection: bool,
}

/// The run of file rows a dragged row may move within.
///
/// `start..end` is the origin's group without its header, and
/// `start..pinned_end` its pinned entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupBounds {
    pub start: usize,
    pub end: usize,
    pub pinned_end: usize,
}

impl GroupBounds {
    /// Bounds of the group containing the file row at `ix`.
    pub fn around(items: &[ListItem], ix: usize) -> Option<Self> {
        items.get(ix)?.as_file_entry()?;

        let start = items[..ix]
            .iter()
            .rposition(ListItem::is_header)
            .map_or(0, |header_ix| header_ix + 1);
        let end = items[ix + 1..]
            .iter()
            .position(ListItem::is_header)
            .map_or(items.len(), |offset| ix + 1 + offset);
        let pinned_end = items[start..end]
            .iter()
            .position(|item| item.as_file_entry().is_some_and(|entry| !entry.pinned))
            .map_or(end, |offset| start + offset);

        Some(Self {
            start,
            end,
            pinned_end,
        })
    }

    /// Keep a drop gap inside the origin's pin partition.
    pub fn clamp(&self, origin: usize, gap: usize) -> usize {
        if origin < self.pinned_end {
            gap.clamp(self.start, self.pinned_end)
        } else {
            gap.clamp(self.pinned_end, self.end)
        }
    }
}

/// A reorder to hand over to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReorderPlan {
    pub group: GroupKey,
    /// Every file of the group, in the new order.
    pub order: Vec<FileHandle>,
    /// The dragged file.
    pub file: FileHandle,
}

/// Work out the group's new tab order for dropping row `origin` into gap `target`.
///
/// Returns `None` when the drop would leave the row where it is.
pub fn plan_reorder(items: &[ListItem], origin: usize, target: usize) -> Option<ReorderPlan> {
    if target == origin || target == origin + 1 {
        return None;
    }

    let dragged = items.get(origin)?.as_file_entry()?;
    let bounds = GroupBounds::around(items, origin)?;
    let mut order: Vec<FileHandle> = items[bounds.start..bounds.end]
        .iter()
        .filter_map(ListItem::as_file_entry)
        .map(|entry| entry.file.clone())
        .collect();

    let rel_from = origin - bounds.start;
    let rel_to = target.checked_sub(bounds.start)?;
    if rel_from >= order.len() {
        return None;
    }

    let file = order.remove(rel_from);
    let insert_at = if rel_to > rel_from { rel_to - 1 } else { rel_to };
    order.insert(insert_at.min(order.len()), file.clone());

    Some(ReorderPlan {
        group: dragged.group,
        order,
        file,
    })
}

/// Press/move/release state machine for reordering rows with the pointer.
#[derive(Debug)]
pub struct DragController {
    threshold: Pixels,
    origin: Option<usize>,
    press_position: Option<Point<Pixels>>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}

impl DragController {
    pub fn new(threshold: Pixels) -> Self {
        Self {
            threshold,
            origin: None,
            press_position: None,
        }
    }

    pub fn origin(&self) -> Option<usize> {
        self.origin
    }

    pub fn phase(&self, state: &InteractionState) -> DragPhase {
        match self.origin {
            None => DragPhase::Idle,
            Some(_) if state.dragging => DragPhase::Dragging,
            Some(_) => DragPhase::Pending,
        }
    }

    pub fn press(
        &mut self,
        button: MouseButton,
        position: Point<Pixels>,
        items: &[ListItem],
        layout: &RowLayout,
    ) -> DragResponse {
        if button != MouseButton::Left {
            return DragResponse::default();
        }

        let Some(hit) = hit_test(position, layout) else {
            return DragResponse::default();
        };
        if is_over_action_button(position, hit.bounds) {
            return DragResponse::default();
        }
        if items.get(hit.ix).and_then(ListItem::as_file_entry).is_none() {
            return DragResponse::default();
        }

        self.origin = Some(hit.ix);
        self.press_position = Some(position);
        DragResponse {
            clear_selection: true,
            ..Default::default()
        }
    }

    pub fn drag_to(
        &mut self,
        position: Point<Pixels>,
        items: &[ListItem],
        layout: &RowLayout,
        state: &mut InteractionState,
    ) -> DragResponse {
        let (Some(origin), Some(press_position)) = (self.origin, self.press_position) else {
            return DragResponse::default();
        };
        if distance(press_position, position) < f32::from(self.threshold) {
            return DragResponse::default();
        }

        let started = !state.dragging;
        state.dragging = true;

        let target = drop_gap_at(position, layout).map(|gap| {
            GroupBounds::around(items, origin).map_or(gap, |bounds| bounds.clamp(origin, gap))
        });

        let retargeted = target.is_some() && target != state.drop_target;
        if retargeted {
            state.drop_target = target;
        }

        // The dragged row fades as soon as the drag starts, target or not.
        DragResponse {
            repaint: started || retargeted,
            ..Default::default()
        }
    }

    pub fn release(
        &mut self,
        items: &[ListItem],
        state: &mut InteractionState,
        host: &dyn EditorHost,
    ) -> DragResponse {
        let mut response = DragResponse {
            repaint: true,
            ..Default::default()
        };

        let plan = match (self.origin, state.drop_target) {
            (Some(origin), Some(target)) => plan_reorder(items, origin, target),
            _ => None,
        };
        if let Some(plan) = plan {
            log::debug!("moving {} within group {:?}", plan.file, plan.group);
            settle("reorder", host.reorder(plan.group, &plan.order));
            settle("activate", host.activate(&plan.file, plan.group));
            response.refresh = true;
        }

        state.suppress_next_click = state.dragging;
        self.origin = None;
        self.press_position = None;
        state.drop_target = None;
        state.dragging = false;
        response.clear_selection = state.suppress_next_click;

        response
    }
}

fn distance(a: Point<Pixels>, b: Point<Pixels>) -> f32 {
    let dx = f32::from(b.x - a.x);
    let dy = f32::from(b.y - a.y);
    (dx * dx + dy * dy).sqrt()
}
