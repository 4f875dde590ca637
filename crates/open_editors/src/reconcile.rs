use crate::item::{EditorGroup, ListItem, build_list_items};

/// Row operations performed by one refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Patch {
    pub replaced: usize,
    pub appended: usize,
    pub truncated: usize,
}

impl Patch {
    pub fn op_count(&self) -> usize {
        self.replaced + self.appended + self.truncated
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// `None` when the displayed rows already matched.
    pub patch: Option<Patch>,
    /// First active entry, to be scrolled into view once layout settles.
    pub scroll_to: Option<usize>,
}

impl RefreshOutcome {
    pub fn changed(&self) -> bool {
        self.patch.is_some()
    }
}

/// Owner of the displayed rows.
#[derive(Debug, Default)]
pub struct Reconciler {
    displayed: Vec<ListItem>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.displayed
    }

    /// Bring the displayed rows in line with `groups`, leaving them untouched
    /// when nothing changed.
    pub fn refresh(&mut self, groups: &[EditorGroup]) -> RefreshOutcome {
        let target = build_list_items(groups);
        if self.matches(&target) {
            return RefreshOutcome::default();
        }
        self.patch_to(target)
    }

    /// Patch even when the rows already match.
    pub fn force_refresh(&mut self, groups: &[EditorGroup]) -> RefreshOutcome {
        let target = build_list_items(groups);
        self.patch_to(target)
    }

    fn matches(&self, target: &[ListItem]) -> bool {
        self.displayed.len() == target.len()
            && self
                .displayed
                .iter()
                .zip(target)
                .all(|(shown, wanted)| shown.structurally_eq(wanted))
    }

    fn patch_to(&mut self, target: Vec<ListItem>) -> RefreshOutcome {
        let scroll_to = target.iter().position(|item| {
            item.as_file_entry().is_some_and(|entry| entry.active)
        });

        let mut patch = Patch::default();
        let common = self.displayed.len().min(target.len());
        let mut target = target.into_iter();

        for (slot, wanted) in self.displayed.iter_mut().zip(target.by_ref()) {
            if !slot.structurally_eq(&wanted) {
                patch.replaced += 1;
            }
            *slot = wanted;
        }

        if self.displayed.len() > common {
            patch.truncated = self.displayed.len() - common;
            self.displayed.truncate(common);
        } else {
            let before = self.displayed.len();
            self.displayed.extend(target);
            patch.appended = self.displayed.len() - before;
        }

        log::debug!(
            "open editors patched: {} replaced, {} appended, {} truncated",
            patch.replaced,
            patch.appended,
            patch.truncated
        );

        RefreshOutcome {
            patch: Some(patch),
            scroll_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{FileHandle, GroupKey};

    const MAIN: GroupKey = GroupKey::new(1);
    const SPLIT: GroupKey = GroupKey::new(2);

    fn main_group(files: &[(&'static str, bool, bool)]) -> EditorGroup {
        files
            .iter()
            .fold(EditorGroup::new("Main Editor", MAIN), |group, (name, pinned, active)| {
                group.file(FileHandle::new(*name), *pinned, *active)
            })
    }

    fn names(items: &[ListItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                ListItem::GroupHeader(h) => format!("# {}", h.title),
                ListItem::FileEntry(e) => e.file.to_string(),
            })
            .collect()
    }

    #[test]
    fn second_refresh_without_changes_is_a_noop() {
        let groups = vec![main_group(&[("a", true, false), ("b", false, true)])];
        let mut reconciler = Reconciler::new();

        let first = reconciler.refresh(&groups);
        assert_eq!(first.patch.map(|p| p.appended), Some(2));
        assert_eq!(first.scroll_to, Some(1));

        let second = reconciler.refresh(&groups);
        assert_eq!(second, RefreshOutcome::default());
        assert!(!second.changed());
    }

    #[test]
    fn changed_flags_are_patched_in_place() {
        let mut reconciler = Reconciler::new();
        reconciler.refresh(&[main_group(&[("a", false, true), ("b", false, false)])]);

        let outcome = reconciler.refresh(&[main_group(&[("a", false, false), ("b", false, true)])]);
        assert_eq!(
            outcome.patch,
            Some(Patch {
                replaced: 2,
                appended: 0,
                truncated: 0
            })
        );
        assert_eq!(outcome.scroll_to, Some(1));
    }

    #[test]
    fn tail_grows_and_shrinks() {
        let mut reconciler = Reconciler::new();
        reconciler.refresh(&[main_group(&[("a", false, false)])]);

        let grown = reconciler.refresh(&[
            main_group(&[("a", false, false)]),
            EditorGroup::new("Split View", SPLIT).file(FileHandle::new("c"), false, false),
        ]);
        assert_eq!(names(reconciler.items()), vec!["# Main Editor", "a", "# Split View", "c"]);
        assert_eq!(
            grown.patch,
            Some(Patch {
                replaced: 1,
                appended: 3,
                truncated: 0
            })
        );
        assert_eq!(grown.scroll_to, None);

        let shrunk = reconciler.refresh(&[main_group(&[("b", false, false)])]);
        assert_eq!(names(reconciler.items()), vec!["b"]);
        assert_eq!(shrunk.patch.map(|p| p.truncated), Some(3));
    }

    #[test]
    fn force_refresh_always_patches() {
        let groups = vec![main_group(&[("a", false, true)])];
        let mut reconciler = Reconciler::new();
        reconciler.refresh(&groups);

        let forced = reconciler.force_refresh(&groups);
        assert_eq!(forced.patch.map(|p| p.op_count()), Some(0));
        assert!(forced.changed());
        assert_eq!(forced.scroll_to, Some(0));
    }

    #[test]
    fn scrolls_to_first_active_entry_only() {
        let mut reconciler = Reconciler::new();
        let outcome = reconciler.refresh(&[
            main_group(&[("a", false, false), ("b", false, true)]),
            EditorGroup::new("Split View", SPLIT).file(FileHandle::new("c"), false, true),
        ]);
        assert_eq!(outcome.scroll_to, Some(2));
    }
}
