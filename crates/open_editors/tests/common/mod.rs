#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use gpui::{EntityId, Pixels, Point, point, px};
use gpui_open_editors::{
    ContextMenuRequest, EditorGroup, EditorHost, FileHandle, GroupKey, HostError, HostResult,
    ListItem, RowLayout, sort_by_desired_order,
};

pub const ROW_HEIGHT: f32 = 20.;
pub const ROW_WIDTH: f32 = 200.;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Activate(String),
    Close(String),
    Unpin(String),
    Reorder(u64, Vec<String>),
    SelectTab(String),
    ContextMenu(String),
}

struct Tab {
    file: FileHandle,
    pinned: bool,
}

struct Window {
    key: GroupKey,
    title: &'static str,
    tabs: Vec<Tab>,
    selected: Option<FileHandle>,
}

/// Editor host backed by plain vectors that records every request.
#[derive(Default)]
pub struct FakeHost {
    windows: RefCell<Vec<Window>>,
    focused: Cell<Option<GroupKey>>,
    calls: RefCell<Vec<Call>>,
    show_file_path: Cell<bool>,
    /// Answer every mutation with a stale-reference error.
    stale: Cell<bool>,
    group_reads: Cell<usize>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window; `tabs` are `(path, pinned)` in tab order.
    pub fn window(self, key: u64, title: &'static str, tabs: &[(&'static str, bool)]) -> Self {
        self.windows.borrow_mut().push(Window {
            key: GroupKey::new(key),
            title,
            tabs: tabs
                .iter()
                .map(|(path, pinned)| Tab {
                    file: FileHandle::new(*path),
                    pinned: *pinned,
                })
                .collect(),
            selected: None,
        });
        self
    }

    /// Append an unpinned tab, as if the user opened a file in that window.
    pub fn open(&self, key: u64, path: &'static str) {
        let mut windows = self.windows.borrow_mut();
        if let Some(window) = windows.iter_mut().find(|window| window.key == GroupKey::new(key)) {
            window.tabs.push(Tab {
                file: FileHandle::new(path),
                pinned: false,
            });
        }
    }

    /// How many times the list has been read.
    pub fn group_reads(&self) -> usize {
        self.group_reads.get()
    }

    pub fn go_stale(&self) {
        self.stale.set(true);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn tab_order(&self, key: u64) -> Vec<String> {
        self.windows
            .borrow()
            .iter()
            .find(|window| window.key == GroupKey::new(key))
            .map(|window| window.tabs.iter().map(|tab| tab.file.to_string()).collect())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn with_tab(
        &self,
        file: &FileHandle,
        group: GroupKey,
        f: impl FnOnce(&mut Window, usize),
    ) -> HostResult {
        if self.stale.get() {
            return Err(HostError::StaleFile {
                file: file.clone(),
                group,
            });
        }

        let mut windows = self.windows.borrow_mut();
        let window = windows
            .iter_mut()
            .find(|window| window.key == group)
            .ok_or(HostError::StaleGroup(group))?;
        let ix = window
            .tabs
            .iter()
            .position(|tab| &tab.file == file)
            .ok_or_else(|| HostError::StaleFile {
                file: file.clone(),
                group,
            })?;
        f(window, ix);
        Ok(())
    }
}

impl EditorHost for FakeHost {
    fn groups(&self) -> Vec<EditorGroup> {
        self.group_reads.set(self.group_reads.get() + 1);
        let focused = self.focused.get();
        self.windows
            .borrow()
            .iter()
            .map(|window| {
                let selected = window.selected.as_ref().filter(|_| focused == Some(window.key));
                let mut pinned: Vec<&Tab> = window.tabs.iter().filter(|tab| tab.pinned).collect();
                pinned.extend(window.tabs.iter().filter(|tab| !tab.pinned));
                pinned.into_iter().fold(
                    EditorGroup::new(window.title, window.key),
                    |group, tab| {
                        let active = selected == Some(&tab.file);
                        group.file(tab.file.clone(), tab.pinned, active)
                    },
                )
            })
            .collect()
    }

    fn activate(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.record(Call::Activate(file.to_string()));
        self.with_tab(file, group, |window, _| window.selected = Some(file.clone()))?;
        self.focused.set(Some(group));
        Ok(())
    }

    fn close(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.record(Call::Close(file.to_string()));
        self.with_tab(file, group, |window, ix| {
            window.tabs.remove(ix);
            if window.selected.as_ref() == Some(file) {
                window.selected = None;
            }
        })
    }

    fn unpin(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.record(Call::Unpin(file.to_string()));
        self.with_tab(file, group, |window, ix| window.tabs[ix].pinned = false)
    }

    fn reorder(&self, group: GroupKey, order: &[FileHandle]) -> HostResult {
        self.record(Call::Reorder(
            group.as_u64(),
            order.iter().map(|file| file.to_string()).collect(),
        ));
        if self.stale.get() {
            return Err(HostError::StaleGroup(group));
        }

        let mut windows = self.windows.borrow_mut();
        let window = windows
            .iter_mut()
            .find(|window| window.key == group)
            .ok_or(HostError::StaleGroup(group))?;
        let mut files: Vec<FileHandle> = window.tabs.iter().map(|tab| tab.file.clone()).collect();
        sort_by_desired_order(&mut files, order);
        window.tabs.sort_by_key(|tab| {
            files
                .iter()
                .position(|file| file == &tab.file)
                .unwrap_or(usize::MAX)
        });
        Ok(())
    }

    fn select_tab(&self, file: &FileHandle, group: GroupKey) -> HostResult {
        self.record(Call::SelectTab(file.to_string()));
        self.with_tab(file, group, |window, _| window.selected = Some(file.clone()))
    }

    fn show_context_menu(&self, request: ContextMenuRequest) -> HostResult {
        self.record(Call::ContextMenu(request.file.to_string()));
        Ok(())
    }

    fn show_file_path(&self) -> bool {
        self.show_file_path.get()
    }

    fn set_show_file_path(&self, show: bool) {
        self.show_file_path.set(show);
    }
}

/// Uniform rows of [`ROW_HEIGHT`] starting at the window origin.
pub fn layout_for(items: &[ListItem]) -> RowLayout {
    RowLayout::stacked(
        point(px(0.), px(0.)),
        px(ROW_WIDTH),
        &vec![px(ROW_HEIGHT); items.len()],
    )
}

/// A point inside row `ix`, `dy` below its top edge.
pub fn in_row(ix: usize, dy: f32) -> Point<Pixels> {
    point(px(10.), px(ix as f32 * ROW_HEIGHT + dy))
}

/// A point over the action button of row `ix`.
pub fn on_action_button(ix: usize) -> Point<Pixels> {
    point(px(ROW_WIDTH - 5.), px(ix as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.))
}

pub fn anchor() -> EntityId {
    EntityId::from(1u64)
}

pub fn names(items: &[ListItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            ListItem::GroupHeader(header) => format!("# {}", header.title),
            ListItem::FileEntry(entry) => {
                let mut name = entry.file.to_string();
                if entry.pinned {
                    name.push_str(" [p]");
                }
                if entry.active {
                    name.push_str(" *");
                }
                name
            }
        })
        .collect()
}
