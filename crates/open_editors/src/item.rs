use std::fmt;

use gpui::SharedString;

/// Identity of an open document as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileHandle {
    path: SharedString,
}

impl FileHandle {
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &SharedString {
        &self.path
    }

    /// Last path component, used as the primary row label.
    pub fn file_name(&self) -> &str {
        let path: &str = &self.path;
        path.rsplit(['/', '\\']).next().unwrap_or_default()
    }

    /// Everything before the last path component, used for the secondary line.
    pub fn parent_dir(&self) -> Option<&str> {
        let path: &str = &self.path;
        let parent = &path[..path.len() - self.file_name().len()];
        let parent = parent.trim_end_matches(['/', '\\']);
        (!parent.is_empty()).then_some(parent)
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Opaque handle of an editor window or pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(u64);

impl GroupKey {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct GroupHeader {
    pub title: SharedString,
    pub group: GroupKey,
}

impl GroupHeader {
    pub fn structurally_eq(&self, other: &GroupHeader) -> bool {
        self.title == other.title && self.group == other.group
    }
}

#[derive(Clone, Debug)]
pub struct FileEntry {
    pub file: FileHandle,
    pub pinned: bool,
    pub active: bool,
    pub group: GroupKey,
}

impl FileEntry {
    pub fn new(file: FileHandle, group: GroupKey) -> Self {
        Self {
            file,
            pinned: false,
            active: false,
            group,
        }
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn structurally_eq(&self, other: &FileEntry) -> bool {
        self.file == other.file
            && self.pinned == other.pinned
            && self.active == other.active
            && self.group == other.group
    }
}

/// A row of the open editors list.
#[derive(Clone, Debug)]
pub enum ListItem {
    GroupHeader(GroupHeader),
    FileEntry(FileEntry),
}

impl ListItem {
    pub fn header(title: impl Into<SharedString>, group: GroupKey) -> Self {
        ListItem::GroupHeader(GroupHeader {
            title: title.into(),
            group,
        })
    }

    /// Compares semantic fields only. Rows of different kinds are never equal.
    pub fn structurally_eq(&self, other: &ListItem) -> bool {
        match (self, other) {
            (ListItem::GroupHeader(a), ListItem::GroupHeader(b)) => a.structurally_eq(b),
            (ListItem::FileEntry(a), ListItem::FileEntry(b)) => a.structurally_eq(b),
            _ => false,
        }
    }

    pub fn group(&self) -> GroupKey {
        match self {
            ListItem::GroupHeader(header) => header.group,
            ListItem::FileEntry(entry) => entry.group,
        }
    }

    pub fn as_file_entry(&self) -> Option<&FileEntry> {
        match self {
            ListItem::FileEntry(entry) => Some(entry),
            ListItem::GroupHeader(_) => None,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, ListItem::GroupHeader(_))
    }
}

impl From<FileEntry> for ListItem {
    fn from(entry: FileEntry) -> Self {
        ListItem::FileEntry(entry)
    }
}

/// The open documents of one editor window, already split by pin state.
#[derive(Clone, Debug)]
pub struct EditorGroup {
    pub title: SharedString,
    pub group: GroupKey,
    pub pinned: Vec<FileEntry>,
    pub unpinned: Vec<FileEntry>,
}

impl EditorGroup {
    pub fn new(title: impl Into<SharedString>, group: GroupKey) -> Self {
        Self {
            title: title.into(),
            group,
            pinned: Vec::new(),
            unpinned: Vec::new(),
        }
    }

    /// Append a file, routing it to the pinned or unpinned partition.
    pub fn file(mut self, file: FileHandle, pinned: bool, active: bool) -> Self {
        let entry = FileEntry::new(file, self.group)
            .pinned(pinned)
            .active(active);
        if pinned {
            self.pinned.push(entry);
        } else {
            self.unpinned.push(entry);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.pinned.len() + self.unpinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.unpinned.is_empty()
    }
}

/// Flatten groups into display rows.
///
/// Each group contributes a header (only when there is more than one group),
/// then its pinned entries, then its unpinned entries.
pub fn build_list_items(groups: &[EditorGroup]) -> Vec<ListItem> {
    let show_headers = groups.len() > 1;
    let mut items = Vec::with_capacity(groups.iter().map(|g| g.len() + 1).sum());

    for group in groups {
        if show_headers {
            items.push(ListItem::header(group.title.clone(), group.group));
        }
        items.extend(group.pinned.iter().cloned().map(ListItem::FileEntry));
        items.extend(group.unpinned.iter().cloned().map(ListItem::FileEntry));
    }

    items
}

/// Where an editor window lives relative to the main application frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupPlacement {
    /// A split inside the main frame, by position.
    MainFrame(usize),
    /// A detached editor window, by position.
    Floating(usize),
}

/// Title shown in a group header.
///
/// Titles are empty when `total_groups <= 1` since no header is rendered then.
pub fn group_title(placement: GroupPlacement, total_groups: usize) -> SharedString {
    if total_groups <= 1 {
        return SharedString::default();
    }

    match placement {
        GroupPlacement::MainFrame(0) => "Main Editor".into(),
        GroupPlacement::MainFrame(1) => "Split View".into(),
        GroupPlacement::MainFrame(ix) => format!("Split View {ix}").into(),
        GroupPlacement::Floating(ix) => format!("Window {}", ix + 1).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: GroupKey = GroupKey::new(1);
    const SPLIT: GroupKey = GroupKey::new(2);

    fn dump(items: &[ListItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                ListItem::GroupHeader(h) => format!("# {}", h.title),
                ListItem::FileEntry(e) if e.pinned => format!("{}*", e.file.file_name()),
                ListItem::FileEntry(e) => e.file.file_name().to_string(),
            })
            .collect()
    }

    #[test]
    fn file_handle_splits_name_and_parent() {
        let file = FileHandle::new("src/app/main.rs");
        assert_eq!(file.file_name(), "main.rs");
        assert_eq!(file.parent_dir(), Some("src/app"));

        let bare = FileHandle::new("Cargo.toml");
        assert_eq!(bare.file_name(), "Cargo.toml");
        assert_eq!(bare.parent_dir(), None);
    }

    #[test]
    fn structural_equality_ignores_nothing_semantic() {
        let a = ListItem::from(FileEntry::new(FileHandle::new("a.rs"), MAIN));
        let same = ListItem::from(FileEntry::new(FileHandle::new("a.rs"), MAIN));
        let pinned = ListItem::from(FileEntry::new(FileHandle::new("a.rs"), MAIN).pinned(true));
        let active = ListItem::from(FileEntry::new(FileHandle::new("a.rs"), MAIN).active(true));
        let other_group = ListItem::from(FileEntry::new(FileHandle::new("a.rs"), SPLIT));

        assert!(a.structurally_eq(&same));
        assert!(!a.structurally_eq(&pinned));
        assert!(!a.structurally_eq(&active));
        assert!(!a.structurally_eq(&other_group));
        assert!(!a.structurally_eq(&ListItem::header("a.rs", MAIN)));
        assert!(ListItem::header("Main", MAIN).structurally_eq(&ListItem::header("Main", MAIN)));
        assert!(!ListItem::header("Main", MAIN).structurally_eq(&ListItem::header("Main", SPLIT)));
    }

    #[test]
    fn single_group_has_no_header() {
        let groups = vec![
            EditorGroup::new("", MAIN)
                .file(FileHandle::new("c.rs"), false, false)
                .file(FileHandle::new("a.rs"), true, false)
                .file(FileHandle::new("b.rs"), true, true),
        ];

        assert_eq!(dump(&build_list_items(&groups)), vec!["a.rs*", "b.rs*", "c.rs"]);
    }

    #[test]
    fn each_group_gets_one_header_before_its_members() {
        let groups = vec![
            EditorGroup::new("Main Editor", MAIN)
                .file(FileHandle::new("a.rs"), false, false)
                .file(FileHandle::new("b.rs"), true, false),
            EditorGroup::new("Split View", SPLIT).file(FileHandle::new("c.rs"), false, true),
        ];

        assert_eq!(
            dump(&build_list_items(&groups)),
            vec!["# Main Editor", "b.rs*", "a.rs", "# Split View", "c.rs"]
        );
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert!(build_list_items(&[]).is_empty());
    }

    #[test]
    fn group_titles_follow_placement() {
        assert_eq!(group_title(GroupPlacement::MainFrame(0), 1).to_string(), "");
        assert_eq!(group_title(GroupPlacement::MainFrame(0), 3).to_string(), "Main Editor");
        assert_eq!(group_title(GroupPlacement::MainFrame(1), 3).to_string(), "Split View");
        assert_eq!(group_title(GroupPlacement::MainFrame(2), 3).to_string(), "Split View 2");
        assert_eq!(group_title(GroupPlacement::Floating(0), 3).to_string(), "Window 1");
    }
}
