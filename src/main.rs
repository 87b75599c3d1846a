mod app;
mod cursor_glow;
mod dom;
mod media;
mod shared;
mod site_header;
mod storage;
mod theme_toggle;
mod ticker;

use app::App;

const MOUNT_ID: &str = "portfolio-chrome";

fn main() {
    console_error_panic_hook::set_once();
    let root = dom::document().and_then(|document| document.get_element_by_id(MOUNT_ID));
    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root(root).render();
        }
        None => {
            gloo::console::warn!("mount point missing, rendering into <body>:", MOUNT_ID);
            yew::Renderer::<App>::new().render();
        }
    }
}
