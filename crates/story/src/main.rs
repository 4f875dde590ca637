use std::path::Path;

use anyhow::Context as _;
use gpui::*;
use gpui_component::Root;
use gpui_open_editors::OpenEditorsSettings;

mod demo_host;
mod open_editors;

use open_editors::OpenEditorsStory;

/// Settings come from the JSON file named by `OPEN_EDITORS_SETTINGS`, if any.
fn load_settings() -> anyhow::Result<OpenEditorsSettings> {
    let Some(path) = std::env::var_os("OPEN_EDITORS_SETTINGS") else {
        return Ok(OpenEditorsSettings::default());
    };
    read_settings(Path::new(&path))
}

fn read_settings(path: &Path) -> anyhow::Result<OpenEditorsSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    OpenEditorsSettings::from_json(&json)
}

fn main() {
    env_logger::init();

    let settings = load_settings().unwrap_or_else(|err| {
        log::warn!("falling back to default settings: {err:#}");
        OpenEditorsSettings::default()
    });
    log::debug!("settings: {}", serde_json::to_string(&settings).unwrap_or_default());

    let app = Application::new();

    app.run(move |cx| {
        gpui_component::init(cx);
        cx.activate(true);

        cx.spawn(async move |cx| {
            cx.open_window(
                WindowOptions {
                    titlebar: Some(TitlebarOptions {
                        title: Some("Open Editors".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |window, cx| {
                    let view = OpenEditorsStory::view(settings, window, cx);
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });
}
