use std::cell::{Cell, RefCell};

use gpui_open_editors::{
    ContextMenuRequest, EditorGroup, EditorHost, FileHandle, GroupKey, GroupPlacement, HostError,
    HostResult, group_title, sort_by_desired_order,
};

struct Tab {
    file: FileHandle,
    pinned: bool,
}

struct DemoWindow {
    key: GroupKey,
    placement: GroupPlacement,
    tabs: Vec<Tab>,
    selected: Option<usize>,
}

impl DemoWindow {
    fn new(key: u64, placement: GroupPlacement, tabs: &[(&'static str, bool)]) -> Self {
        Self {
            key: GroupKey::new(key),
            placement,
            tabs: tabs
                .iter()
                .map(|(path, pinned)| Tab {
                    file: FileHandle::new(*path),
                    pinned: *pinned,
                })
                .collect(),
            selected: (!tabs.is_empty()).then_some(0),
        }
    }

    fn position(&self, file: &FileHandle) -> Option<usize> {
        self.tabs.iter().position(|tab| &tab.file == file)
    }
}

/// A fake editor subsystem with a split main frame and one detached window.
pub struct DemoHost {
    windows: RefCell<Vec<DemoWindow>>,
    focused: Cell<GroupKey>,
    show_file_path: Cell<bool>,
    opened: Cell<usize>,
    last_request: RefCell<Option<String>>,
    /// The row the next context menu is for, until the menu is built.
    menu_request: RefCell<Option<ContextMenuRequest>>,
}

const MORE_FILES: &[&str] = &[
    "crates/story/src/main.rs",
    "crates/open_editors/src/lib.rs",
    "docs/architecture.md",
    "scripts/release.sh",
    "Cargo.lock",
];

impl DemoHost {
    pub fn new() -> Self {
        let windows = vec![
            DemoWindow::new(
                1,
                GroupPlacement::MainFrame(0),
                &[
                    ("Cargo.toml", true),
                    ("crates/open_editors/src/view.rs", false),
                    ("crates/open_editors/src/drag.rs", false),
                    ("README.md", false),
                ],
            ),
            DemoWindow::new(
                2,
                GroupPlacement::MainFrame(1),
                &[
                    ("crates/open_editors/src/reconcile.rs", true),
                    ("crates/open_editors/src/item.rs", true),
                    ("crates/open_editors/tests/drag_reorder.rs", false),
                ],
            ),
            DemoWindow::new(
                3,
                GroupPlacement::Floating(0),
                &[("notes/todo.md", false), (".github/workflows/ci.yml", false)],
            ),
        ];

        Self {
            windows: RefCell::new(windows),
            focused: Cell::new(GroupKey::new(1)),
            show_file_path: Cell::new(true),
            opened: Cell::new(0),
            last_request: RefCell::new(None),
            menu_request: RefCell::new(None),
        }
    }

    /// Open the next canned file in the focused window and select it.
    pub fn open_next(&self) -> Option<FileHandle> {
        let ix = self.opened.get();
        let path = MORE_FILES.get(ix)?;
        self.opened.set(ix + 1);

        let file = FileHandle::new(*path);
        let focused = self.focused.get();
        let mut windows = self.windows.borrow_mut();
        let window = windows.iter_mut().find(|window| window.key == focused)?;
        window.tabs.push(Tab {
            file: file.clone(),
            pinned: false,
        });
        window.selected = Some(window.tabs.len() - 1);
        Some(file)
    }

    /// Flip the pin state of the focused window's selected tab.
    pub fn toggle_pin_selected(&self) -> Option<FileHandle> {
        let focused = self.focused.get();
        let mut windows = self.windows.borrow_mut();
        let window = windows.iter_mut().find(|window| window.key == focused)?;
        let tab = window.tabs.get_mut(window.selected?)?;
        tab.pinned = !tab.pinned;
        Some(tab.file.clone())
    }

    /// Hand the pending context menu request to the menu builder, once.
    pub fn take_menu_request(&self) -> Option<ContextMenuRequest> {
        self.menu_request.borrow_mut().take()
    }

    pub fn is_pinned(&self, file: &FileHandle, group: GroupKey) -> bool {
        self.with_window(group, |window| {
            let ix = Self::tab_index(window, file)?;
            Ok(window.tabs[ix].pinned)
        })
        .unwrap_or(false)
    }

    pub fn toggle_pin(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.with_window(group, |window| {
            let ix = Self::tab_index(window, file)?;
            window.tabs[ix].pinned = !window.tabs[ix].pinned;
            Ok(())
        })
    }

    pub fn last_request(&self) -> Option<String> {
        self.last_request.borrow().clone()
    }

    /// One line per window listing its tabs in tab order.
    pub fn describe(&self) -> Vec<String> {
        let windows = self.windows.borrow();
        let total = windows.len();
        windows
            .iter()
            .map(|window| {
                let tabs = window
                    .tabs
                    .iter()
                    .map(|tab| {
                        let pin = if tab.pinned { "[pinned] " } else { "" };
                        format!("{pin}{}", tab.file.file_name())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {tabs}", group_title(window.placement, total))
            })
            .collect()
    }

    fn note(&self, request: String) {
        log::info!("{request}");
        *self.last_request.borrow_mut() = Some(request);
    }

    fn with_window<R>(
        &self,
        group: GroupKey,
        f: impl FnOnce(&mut DemoWindow) -> Result<R, HostError>,
    ) -> Result<R, HostError> {
        let mut windows = self.windows.borrow_mut();
        let window = windows
            .iter_mut()
            .find(|window| window.key == group)
            .ok_or(HostError::StaleGroup(group))?;
        f(window)
    }

    fn tab_index(window: &DemoWindow, file: &FileHandle) -> Result<usize, HostError> {
        window.position(file).ok_or_else(|| HostError::StaleFile {
            file: file.clone(),
            group: window.key,
        })
    }
}

impl EditorHost for DemoHost {
    fn groups(&self) -> Vec<EditorGroup> {
        let windows = self.windows.borrow();
        let total = windows.len();
        let focused = self.focused.get();

        windows
            .iter()
            .map(|window| {
                let active_ix = window.selected.filter(|_| window.key == focused);
                let mut group = EditorGroup::new(group_title(window.placement, total), window.key);
                for pinned in [true, false] {
                    for (ix, tab) in window.tabs.iter().enumerate() {
                        if tab.pinned == pinned {
                            group = group.file(tab.file.clone(), tab.pinned, active_ix == Some(ix));
                        }
                    }
                }
                group
            })
            .collect()
    }

    fn activate(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.with_window(group, |window| {
            window.selected = Some(Self::tab_index(window, file)?);
            Ok(())
        })?;
        self.focused.set(group);
        Ok(())
    }

    fn close(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.with_window(group, |window| {
            let ix = Self::tab_index(window, file)?;
            window.tabs.remove(ix);
            window.selected = match window.selected {
                _ if window.tabs.is_empty() => None,
                Some(selected) if selected > ix => Some(selected - 1),
                Some(selected) => Some(selected.min(window.tabs.len() - 1)),
                None => None,
            };
            Ok(())
        })
    }

    fn unpin(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.with_window(group, |window| {
            let ix = Self::tab_index(window, file)?;
            window.tabs[ix].pinned = false;
            Ok(())
        })
    }

    fn reorder(&self, group: GroupKey, order: &[FileHandle]) -> HostResult {
        self.with_window(group, |window| {
            let selected = window.selected.map(|ix| window.tabs[ix].file.clone());
            let mut files: Vec<FileHandle> =
                window.tabs.iter().map(|tab| tab.file.clone()).collect();
            sort_by_desired_order(&mut files, order);

            let mut tabs = std::mem::take(&mut window.tabs);
            for file in files {
                if let Some(ix) = tabs.iter().position(|tab| tab.file == file) {
                    window.tabs.push(tabs.remove(ix));
                }
            }
            window.selected = selected.and_then(|file| window.position(&file));
            Ok(())
        })
    }

    fn select_tab(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.with_window(group, |window| {
            window.selected = Some(Self::tab_index(window, file)?);
            Ok(())
        })
    }

    fn show_context_menu(&self, request: ContextMenuRequest) -> HostResult {
        self.note(format!(
            "context menu for {} at ({:.0}, {:.0})",
            request.file,
            f32::from(request.position.x),
            f32::from(request.position.y)
        ));
        *self.menu_request.borrow_mut() = Some(request);
        Ok(())
    }

    fn show_file_path(&self) -> bool {
        self.show_file_path.get()
    }

    fn set_show_file_path(&self, show: bool) {
        self.show_file_path.set(show);
    }
}

#[cfg(test)]
mod tests {
    use gpui::{EntityId, point, px};

    use super::*;

    fn request(path: &'static str, group: u64) -> ContextMenuRequest {
        ContextMenuRequest {
            anchor: EntityId::from(1u64),
            position: point(px(40.), px(60.)),
            file: FileHandle::new(path),
            group: GroupKey::new(group),
        }
    }

    #[test]
    fn menu_request_is_taken_once() {
        let host = DemoHost::new();
        assert!(host.take_menu_request().is_none());

        host.show_context_menu(request("README.md", 1)).unwrap();
        let taken = host.take_menu_request().unwrap();
        assert_eq!(taken.file, FileHandle::new("README.md"));
        assert_eq!(taken.position, point(px(40.), px(60.)));
        assert!(host.take_menu_request().is_none());
        assert!(host.last_request().unwrap().contains("README.md"));
    }

    #[test]
    fn menu_actions_pin_and_close_the_requested_tab() {
        let host = DemoHost::new();
        let readme = FileHandle::new("README.md");
        let group = GroupKey::new(1);

        assert!(!host.is_pinned(&readme, group));
        host.toggle_pin(&readme, group).unwrap();
        assert!(host.is_pinned(&readme, group));
        assert!(host.describe()[0].contains("[pinned] README.md"));

        host.close(&readme, group).unwrap();
        assert!(!host.is_pinned(&readme, group));
        assert!(matches!(
            host.toggle_pin(&readme, group),
            Err(HostError::StaleFile { .. })
        ));
    }
}
