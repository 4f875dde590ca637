use gpui::{EntityId, Modifiers, MouseButton, Pixels, Point};

use crate::geometry::{RowLayout, hit_test, is_over_action_button};
use crate::host::{ContextMenuRequest, EditorHost, settle};
use crate::item::{FileEntry, ListItem};
use crate::state::InteractionState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshRequest {
    #[default]
    None,
    Refresh,
    /// Re-patch every row even if the content looks unchanged.
    Force,
}

/// Handle a completed click on the list.
pub fn dispatch_click(
    button: MouseButton,
    position: Point<Pixels>,
    items: &[ListItem],
    layout: &RowLayout,
    state: &mut InteractionState,
    host: &dyn EditorHost,
) -> RefreshRequest {
    // The release that ended a drag also produces a click.
    if state.suppress_next_click {
        state.suppress_next_click = false;
        return RefreshRequest::None;
    }

    if button != MouseButton::Left {
        return RefreshRequest::None;
    }

    let Some(hit) = hit_test(position, layout) else {
        return RefreshRequest::None;
    };
    let Some(entry) = items.get(hit.ix).and_then(ListItem::as_file_entry) else {
        return RefreshRequest::None;
    };

    if is_over_action_button(position, hit.bounds) {
        action_button(entry, host)
    } else {
        settle("activate", host.activate(&entry.file, entry.group));
        RefreshRequest::None
    }
}

fn action_button(entry: &FileEntry, host: &dyn EditorHost) -> RefreshRequest {
    if entry.pinned {
        settle("unpin", host.unpin(&entry.file, entry.group));
        settle("activate", host.activate(&entry.file, entry.group));
        RefreshRequest::Force
    } else {
        settle("close", host.close(&entry.file, entry.group));
        RefreshRequest::None
    }
}

/// Whether a press should open the context menu on this platform.
pub fn is_popup_trigger(button: MouseButton, modifiers: &Modifiers) -> bool {
    match button {
        MouseButton::Right => true,
        MouseButton::Left => cfg!(target_os = "macos") && modifiers.control,
        _ => false,
    }
}

/// Open the host's document menu for the row under `position`.
///
/// Returns the row the view should select. The row's file becomes the
/// selected tab of its window before the menu is requested.
pub fn dispatch_context_menu(
    position: Point<Pixels>,
    items: &[ListItem],
    layout: &RowLayout,
    anchor: EntityId,
    host: &dyn EditorHost,
) -> Option<usize> {
    let hit = hit_test(position, layout)?;
    let entry = items.get(hit.ix)?.as_file_entry()?;

    settle("select tab", host.select_tab(&entry.file, entry.group));
    log::debug!("context menu for {} at {position:?}", entry.file);
    settle(
        "context menu",
        host.show_context_menu(ContextMenuRequest {
            anchor,
            position,
            file: entry.file.clone(),
            group: entry.group,
        }),
    );

    Some(hit.ix)
}
