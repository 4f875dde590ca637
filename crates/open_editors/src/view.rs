use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme as _, Icon, IconName, Sizable as _, h_flex, v_flex};

use crate::click::{RefreshRequest, dispatch_click, dispatch_context_menu, is_popup_trigger};
use crate::drag::{DragController, DragResponse};
use crate::geometry::{ACTION_BUTTON_WIDTH, RowLayout};
use crate::host::EditorHost;
use crate::item::{FileEntry, GroupHeader, ListItem};
use crate::reconcile::{Reconciler, RefreshOutcome};
use crate::refresh::{Debounced, EditorEvent, poll_every};
use crate::settings::OpenEditorsSettings;
use crate::state::InteractionState;

/// The open editors list: one row per open file, grouped by editor window.
pub struct OpenEditorsView {
    focus_handle: FocusHandle,
    host: Rc<dyn EditorHost>,
    settings: OpenEditorsSettings,
    state: InteractionState,
    reconciler: Reconciler,
    drag: DragController,
    scroll_handle: ScrollHandle,
    selected_ix: Option<usize>,
    /// A release only completes a click when the press happened inside the list.
    click_armed: bool,
    pending_refresh: Debounced,
    _poll_task: Task<()>,
}

impl OpenEditorsView {
    pub fn view(
        host: Rc<dyn EditorHost>,
        settings: OpenEditorsSettings,
        cx: &mut App,
    ) -> Entity<Self> {
        cx.new(|cx| Self::new(host, settings, cx))
    }

    pub fn new(
        host: Rc<dyn EditorHost>,
        settings: OpenEditorsSettings,
        cx: &mut Context<Self>,
    ) -> Self {
        let poll_task = poll_every(settings.poll_interval(), cx, |this, cx| this.refresh(cx));

        let mut this = Self {
            focus_handle: cx.focus_handle(),
            state: InteractionState::new(host.show_file_path()),
            drag: DragController::new(settings.drag_threshold()),
            pending_refresh: Debounced::new(settings.debounce()),
            host,
            settings,
            reconciler: Reconciler::new(),
            scroll_handle: ScrollHandle::new(),
            selected_ix: None,
            click_armed: false,
            _poll_task: poll_task,
        };
        this.refresh(cx);
        this
    }

    pub fn items(&self) -> &[ListItem] {
        self.reconciler.items()
    }

    pub fn interaction_state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_ix
    }

    /// Row bounds as laid out by the last frame, in window coordinates.
    ///
    /// The scroll container records each row unscrolled, so the current
    /// scroll offset is applied here.
    pub fn row_layout(&self) -> RowLayout {
        let rows = (0..self.reconciler.items().len())
            .map_while(|ix| self.scroll_handle.bounds_for_item(ix));
        RowLayout::scrolled(rows, self.scroll_handle.offset())
    }

    pub fn show_file_path(&self) -> bool {
        self.state.show_file_path()
    }

    /// Re-read the host and patch the rows that changed.
    pub fn refresh(&mut self, cx: &mut Context<Self>) {
        // Row indices are pinned for the duration of a press.
        if self.drag.origin().is_some() {
            self.schedule_refresh(cx);
            return;
        }

        let groups = self.host.groups();
        let outcome = self.reconciler.refresh(&groups);
        self.apply_outcome(outcome, cx);
    }

    pub fn force_refresh(&mut self, cx: &mut Context<Self>) {
        self.pending_refresh.cancel();
        let groups = self.host.groups();
        let outcome = self.reconciler.force_refresh(&groups);
        self.apply_outcome(outcome, cx);
    }

    /// Refresh once the host has been quiet for the configured delay.
    pub fn schedule_refresh(&mut self, cx: &mut Context<Self>) {
        self.pending_refresh
            .schedule(cx, |this, cx| this.refresh(cx));
    }

    pub fn handle_editor_event(&mut self, event: &EditorEvent, cx: &mut Context<Self>) {
        match event {
            EditorEvent::FileOpened(_)
            | EditorEvent::FileClosed(_)
            | EditorEvent::SelectionChanged => self.schedule_refresh(cx),
            EditorEvent::ActionPerformed(id) => {
                if self.settings.refreshes_on(id) {
                    log::trace!("refresh after action {id}");
                    self.schedule_refresh(cx);
                }
            }
        }
    }

    pub fn toggle_file_path(&mut self, cx: &mut Context<Self>) {
        let show = !self.state.show_file_path();
        self.state.set_show_file_path(show);
        self.host.set_show_file_path(show);
        self.force_refresh(cx);
    }

    fn apply_outcome(&mut self, outcome: RefreshOutcome, cx: &mut Context<Self>) {
        if !outcome.changed() {
            return;
        }

        self.selected_ix = None;
        if let Some(ix) = outcome.scroll_to {
            // Applied during the next layout, once row bounds exist.
            self.scroll_handle.scroll_to_item(ix);
        }
        cx.notify();
    }

    fn apply_drag_response(&mut self, response: DragResponse, cx: &mut Context<Self>) {
        if response.clear_selection {
            self.selected_ix = None;
        }
        if response.refresh {
            self.refresh(cx);
        }
        if response.repaint || response.clear_selection {
            cx.notify();
        }
    }

    fn on_left_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
        if is_popup_trigger(event.button, &event.modifiers) {
            self.open_context_menu(event.position, cx);
            return;
        }

        self.click_armed = true;
        let response = {
            let layout = self.row_layout();
            self.drag
                .press(event.button, event.position, self.reconciler.items(), &layout)
        };
        self.apply_drag_response(response, cx);
    }

    fn on_right_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
        self.open_context_menu(event.position, cx);
    }

    fn open_context_menu(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        let anchor = cx.entity_id();
        let selected = {
            let layout = self.row_layout();
            dispatch_context_menu(
                position,
                self.reconciler.items(),
                &layout,
                anchor,
                self.host.as_ref(),
            )
        };
        if let Some(ix) = selected {
            self.selected_ix = Some(ix);
            cx.notify();
        }
    }

    fn on_mouse_move(&mut self, event: &MouseMoveEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let repaint = {
            let layout = self.row_layout();
            let items = self.reconciler.items();
            if event.pressed_button == Some(MouseButton::Left) {
                self.drag
                    .drag_to(event.position, items, &layout, &mut self.state)
                    .repaint
            } else {
                self.state.update_hover(event.position, items, &layout)
            }
        };
        if repaint {
            cx.notify();
        }
    }

    fn on_left_mouse_up(&mut self, event: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let response = self
            .drag
            .release(self.reconciler.items(), &mut self.state, self.host.as_ref());
        self.apply_drag_response(response, cx);

        if !std::mem::take(&mut self.click_armed) {
            return;
        }

        let request = {
            let layout = self.row_layout();
            dispatch_click(
                event.button,
                event.position,
                self.reconciler.items(),
                &layout,
                &mut self.state,
                self.host.as_ref(),
            )
        };
        match request {
            // The host echoes activate and close as editor events; refresh in
            // case it doesn't.
            RefreshRequest::None => self.schedule_refresh(cx),
            RefreshRequest::Refresh => self.refresh(cx),
            RefreshRequest::Force => self.force_refresh(cx),
        }
    }

    /// A drag that ends outside the list never counts as a click.
    fn on_left_mouse_up_out(
        &mut self,
        _event: &MouseUpEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.click_armed = false;
        let response = self
            .drag
            .release(self.reconciler.items(), &mut self.state, self.host.as_ref());
        self.state.suppress_next_click = false;
        self.apply_drag_response(response, cx);
    }

    fn on_hover(&mut self, hovered: &bool, _window: &mut Window, cx: &mut Context<Self>) {
        if !*hovered && self.state.clear_hover() {
            cx.notify();
        }
    }

    fn row_visual(&self, ix: usize) -> RowVisual {
        let items = self.reconciler.items();
        let drop_target = self.state.drop_target();
        let ends_group = items.get(ix + 1).is_none_or(ListItem::is_header);

        RowVisual {
            hovered: drop_target.is_none() && self.state.hovered_index() == Some(ix),
            action_hovered: self.state.is_action_button_hovered(),
            selected: self.selected_ix == Some(ix),
            dragged: self.state.is_dragging() && self.drag.origin() == Some(ix),
            drop_before: drop_target == Some(ix),
            drop_after: ends_group && drop_target == Some(ix + 1),
            show_file_path: self.state.show_file_path(),
        }
    }
}

impl Focusable for OpenEditorsView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for OpenEditorsView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = RowColors::from_theme(cx);
        let rows = self
            .reconciler
            .items()
            .iter()
            .enumerate()
            .map(|(ix, item)| match item {
                ListItem::GroupHeader(header) => render_header(header, &colors),
                ListItem::FileEntry(entry) => render_entry(ix, entry, self.row_visual(ix), &colors),
            })
            .collect::<Vec<_>>();

        div()
            .id("open-editors")
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .flex_col()
            .py(px(2.))
            .overflow_y_scroll()
            .track_scroll(&self.scroll_handle)
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_left_mouse_down))
            .on_mouse_down(MouseButton::Right, cx.listener(Self::on_right_mouse_down))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_left_mouse_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::on_left_mouse_up_out))
            .on_hover(cx.listener(Self::on_hover))
            .children(rows)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct RowVisual {
    hovered: bool,
    action_hovered: bool,
    selected: bool,
    dragged: bool,
    drop_before: bool,
    drop_after: bool,
    show_file_path: bool,
}

struct RowColors {
    foreground: Hsla,
    muted_foreground: Hsla,
    hover: Hsla,
    active: Hsla,
    selected: Hsla,
    action_hover: Hsla,
    drag_border: Hsla,
}

impl RowColors {
    fn from_theme(cx: &App) -> Self {
        let theme = cx.theme();
        Self {
            foreground: theme.foreground,
            muted_foreground: theme.muted_foreground,
            hover: theme.list_hover,
            active: theme.list_active,
            selected: theme.selection,
            action_hover: theme.secondary_hover,
            drag_border: theme.drag_border,
        }
    }
}

fn render_header(header: &GroupHeader, colors: &RowColors) -> AnyElement {
    div()
        .px(px(8.))
        .pt(px(6.))
        .pb(px(2.))
        .text_xs()
        .font_weight(FontWeight::BOLD)
        .text_color(colors.muted_foreground)
        .child(header.title.clone())
        .into_any_element()
}

fn render_entry(ix: usize, entry: &FileEntry, visual: RowVisual, colors: &RowColors) -> AnyElement {
    let name = SharedString::from(entry.file.file_name().to_string());
    let parent = entry
        .file
        .parent_dir()
        .filter(|_| visual.show_file_path)
        .map(|dir| SharedString::from(dir.to_string()));
    let action_icon = if entry.pinned {
        IconName::Star
    } else {
        IconName::Close
    };

    h_flex()
        .id(("open-editor", ix))
        .w_full()
        .items_center()
        .gap_x_2()
        .pl(px(8.))
        .py(px(3.))
        .rounded(px(6.))
        .border_color(colors.drag_border)
        .when(visual.hovered, |this| this.bg(colors.hover))
        .when(visual.selected, |this| this.bg(colors.selected))
        .when(entry.active, |this| this.bg(colors.active))
        .when(visual.drop_before, |this| this.border_t_2())
        .when(visual.drop_after, |this| this.border_b_2())
        .when(visual.dragged, |this| this.opacity(0.4))
        .child(
            Icon::from(IconName::File)
                .small()
                .text_color(colors.muted_foreground),
        )
        .child(
            v_flex()
                .flex_1()
                .min_w(px(0.))
                .child(
                    div()
                        .text_sm()
                        .text_color(colors.foreground)
                        .truncate()
                        .child(name),
                )
                .when_some(parent, |this, dir| {
                    this.child(
                        div()
                            .text_xs()
                            .text_color(colors.muted_foreground)
                            .truncate()
                            .child(dir),
                    )
                }),
        )
        .child(
            div()
                .flex_none()
                .w(ACTION_BUTTON_WIDTH)
                .h(ACTION_BUTTON_WIDTH)
                .flex()
                .items_center()
                .justify_center()
                .rounded_full()
                .when(visual.hovered && visual.action_hovered, |this| {
                    this.bg(colors.action_hover)
                })
                .child(
                    Icon::from(action_icon)
                        .xsmall()
                        .text_color(colors.muted_foreground),
                ),
        )
        .into_any_element()
}
