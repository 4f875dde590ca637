use std::rc::Rc;

use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::menu::{ContextMenuExt as _, PopupMenu, PopupMenuItem};
use gpui_component::{Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_open_editors::{EditorEvent, EditorHost, OpenEditorsSettings, OpenEditorsView};

use crate::demo_host::DemoHost;

pub struct OpenEditorsStory {
    host: Rc<DemoHost>,
    list: Entity<OpenEditorsView>,
}

impl OpenEditorsStory {
    pub fn view(settings: OpenEditorsSettings, _window: &mut Window, cx: &mut App) -> Entity<Self> {
        let host = Rc::new(DemoHost::new());
        let list = OpenEditorsView::view(host.clone(), settings, cx);
        cx.new(|cx| {
            cx.observe(&list, |_, _, cx| cx.notify()).detach();
            Self { host, list }
        })
    }

    fn notify_list(&mut self, event: EditorEvent, cx: &mut Context<Self>) {
        self.list
            .update(cx, |list, cx| list.handle_editor_event(&event, cx));
        cx.notify();
    }

    fn open_file(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if let Some(file) = self.host.open_next() {
            self.notify_list(EditorEvent::FileOpened(file), cx);
        }
    }

    fn toggle_pin(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if self.host.toggle_pin_selected().is_some() {
            self.notify_list(EditorEvent::ActionPerformed("PinActiveTabToggle".into()), cx);
        }
    }

    fn toggle_file_path(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        self.list.update(cx, |list, cx| list.toggle_file_path(cx));
        cx.notify();
    }
}

/// Close and Pin/Unpin for the row the list last asked a menu for.
fn build_tab_menu(menu: PopupMenu, host: &Rc<DemoHost>, list: &Entity<OpenEditorsView>) -> PopupMenu {
    let Some(request) = host.take_menu_request() else {
        return menu;
    };
    let pinned = host.is_pinned(&request.file, request.group);

    let close = {
        let (host, list, request) = (host.clone(), list.clone(), request.clone());
        move |_: &ClickEvent, _: &mut Window, cx: &mut App| {
            if let Err(err) = host.close(&request.file, request.group) {
                log::warn!("close from menu failed: {err}");
            }
            let event = EditorEvent::FileClosed(request.file.clone());
            list.update(cx, |list, cx| list.handle_editor_event(&event, cx));
        }
    };
    let toggle_pin = {
        let (host, list) = (host.clone(), list.clone());
        move |_: &ClickEvent, _: &mut Window, cx: &mut App| {
            if let Err(err) = host.toggle_pin(&request.file, request.group) {
                log::warn!("pin toggle from menu failed: {err}");
            }
            let event = EditorEvent::ActionPerformed("PinActiveTabToggle".into());
            list.update(cx, |list, cx| list.handle_editor_event(&event, cx));
        }
    };

    menu.item(
        PopupMenuItem::new(if pinned { "Unpin" } else { "Pin" })
            .icon(Icon::new(IconName::Star).xsmall())
            .on_click(toggle_pin),
    )
    .item(
        PopupMenuItem::new("Close")
            .icon(Icon::new(IconName::Close).xsmall())
            .on_click(close),
    )
}

impl Render for OpenEditorsStory {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let muted_foreground = cx.theme().muted_foreground;
        let border = cx.theme().border;
        let background = cx.theme().background;
        let show_file_path = self.host.show_file_path();
        let status = self
            .host
            .last_request()
            .unwrap_or_else(|| "Right-click a row to request its context menu.".to_string());
        let windows = self
            .host
            .describe()
            .into_iter()
            .map(|line| div().text_sm().child(line));

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Open Editors"),
                    )
                    .child(div().text_sm().text_color(muted_foreground).child(
                        "Drag rows to reorder tabs within a window. Pinned tabs stay ahead of unpinned ones.",
                    ))
                    .child(
                        div()
                            .text_sm()
                            .text_color(muted_foreground)
                            .child(status),
                    ),
            )
            .child(
                h_flex()
                    .gap_x_2()
                    .child(
                        Button::new("open-file")
                            .label("Open File")
                            .small()
                            .on_click(cx.listener(Self::open_file)),
                    )
                    .child(
                        Button::new("toggle-pin")
                            .label("Pin/Unpin Selected")
                            .small()
                            .ghost()
                            .on_click(cx.listener(Self::toggle_pin)),
                    )
                    .child(
                        Button::new("toggle-file-path")
                            .label(if show_file_path {
                                "Hide File Path"
                            } else {
                                "Show File Path"
                            })
                            .small()
                            .ghost()
                            .on_click(cx.listener(Self::toggle_file_path)),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        div()
                            .w(px(320.))
                            .h_full()
                            .min_w(px(0.))
                            .rounded(px(12.))
                            .border_1()
                            .border_color(border)
                            .bg(background)
                            .child(self.list.clone())
                            .context_menu({
                                let (host, list) = (self.host.clone(), self.list.clone());
                                move |menu, _window, _cx| build_tab_menu(menu, &host, &list)
                            }),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .rounded(px(12.))
                            .border_1()
                            .border_color(border)
                            .bg(background)
                            .p(px(12.))
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Host tab order"),
                            )
                            .children(windows),
                    ),
            )
    }
}
