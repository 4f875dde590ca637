use std::collections::HashMap;

use gpui::{EntityId, Pixels, Point};
use thiserror::Error;

use crate::item::{EditorGroup, FileHandle, GroupKey};

#[derive(Debug, Error)]
pub enum HostError {
    /// The file was closed or moved before the request reached the host.
    #[error("{file} is no longer open in group {group:?}")]
    StaleFile { file: FileHandle, group: GroupKey },
    #[error("editor group {0:?} no longer exists")]
    StaleGroup(GroupKey),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HostError {
    pub fn is_stale(&self) -> bool {
        matches!(self, HostError::StaleFile { .. } | HostError::StaleGroup(_))
    }
}

pub type HostResult = Result<(), HostError>;

/// What the host needs to present its per-document context menu.
#[derive(Clone, Debug)]
pub struct ContextMenuRequest {
    /// The view the menu belongs to.
    pub anchor: EntityId,
    pub position: Point<Pixels>,
    pub file: FileHandle,
    pub group: GroupKey,
}

/// The editor subsystem owning the real windows and tabs.
///
/// Every mutating call may race with the host's own changes; a call naming a
/// file that is gone should report [`HostError::StaleFile`] rather than fail
/// hard.
pub trait EditorHost {
    /// Current windows and their open files, in display order.
    fn groups(&self) -> Vec<EditorGroup>;

    fn activate(&self, file: &FileHandle, group: GroupKey) -> HostResult;

    fn close(&self, file: &FileHandle, group: GroupKey) -> HostResult;

    fn unpin(&self, file: &FileHandle, group: GroupKey) -> HostResult;

    fn reorder(&self, group: GroupKey, order: &[FileHandle]) -> HostResult;

    /// Make `file` the selected tab of `group` without focusing it.
    ///
    /// Context menu actions read the window's selected tab, so this runs before
    /// [`EditorHost::show_context_menu`].
    fn select_tab(&self, file: &FileHandle, group: GroupKey) -> HostResult;

    fn show_context_menu(&self, request: ContextMenuRequest) -> HostResult;

    fn show_file_path(&self) -> bool;

    fn set_show_file_path(&self, show: bool);
}

/// Swallow the outcome of a host call. The next refresh reconciles the list.
pub(crate) fn settle(op: &str, result: HostResult) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_stale() => log::debug!("ignoring stale {op}: {err}"),
        Err(err) => log::warn!("{op} failed: {err:#}"),
    }
}

/// Sort `tabs` by their position in `desired`.
///
/// Tabs missing from `desired` keep their relative order and go last.
pub fn sort_by_desired_order(tabs: &mut [FileHandle], desired: &[FileHandle]) {
    let positions: HashMap<&FileHandle, usize> = desired
        .iter()
        .enumerate()
        .map(|(ix, file)| (file, ix))
        .collect();
    let mut keyed: Vec<(usize, FileHandle)> = tabs
        .iter()
        .map(|tab| (positions.get(tab).copied().unwrap_or(usize::MAX), tab.clone()))
        .collect();
    keyed.sort_by_key(|(position, _)| *position);

    for (slot, (_, tab)) in tabs.iter_mut().zip(keyed) {
        *slot = tab;
    }
}
