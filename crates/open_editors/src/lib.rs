mod click;
mod drag;
mod geometry;
mod host;
mod item;
mod reconcile;
mod refresh;
mod settings;
mod state;
mod view;

pub use click::{RefreshRequest, dispatch_click, dispatch_context_menu, is_popup_trigger};
pub use drag::{DRAG_THRESHOLD, DragController, DragPhase, DragResponse, GroupBounds, ReorderPlan, plan_reorder};
pub use geometry::{ACTION_BUTTON_WIDTH, Hit, RowLayout, drop_gap_at, hit_test, is_over_action_button};
pub use host::{ContextMenuRequest, EditorHost, HostError, HostResult, sort_by_desired_order};
pub use item::{
    EditorGroup, FileEntry, FileHandle, GroupHeader, GroupKey, GroupPlacement, ListItem,
    build_list_items, group_title,
};
pub use reconcile::{Patch, Reconciler, RefreshOutcome};
pub use refresh::EditorEvent;
pub use settings::OpenEditorsSettings;
pub use state::InteractionState;
pub use view::OpenEditorsView;
