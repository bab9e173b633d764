//! Inline SVG icons, single-path strokes.

use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_mail() -> Html {
    icon_base("M3 5h18v14H3zM3 6l9 7 9-7")
}
pub fn icon_file_text() -> Html {
    icon_base("M6 2h8l4 4v16H6zM14 2v4h4M9 13h6M9 17h6")
}
pub fn icon_folder() -> Html {
    icon_base("M3 6h6l2 2h10v12H3z")
}
pub fn icon_upload() -> Html {
    icon_base("M12 16V4M6 10l6-6 6 6M4 20h16")
}
pub fn icon_settings() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}
pub fn icon_user() -> Html {
    icon_base("M12 12a4 4 0 100-8 4 4 0 000 8zM4 21a8 8 0 0116 0")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_refresh() -> Html {
    icon_base("M21 12a9 9 0 11-3-6.7M21 3v6h-6")
}
pub fn icon_eye() -> Html {
    icon_base("M1 12s4-7 11-7 11 7 11 7-4 7-11 7-11-7-11-7zM12 12m-3 0a3 3 0 106 0 3 3 0 10-6 0")
}
pub fn icon_download() -> Html {
    icon_base("M12 4v12M6 10l6 6 6-6M4 20h16")
}
pub fn icon_link() -> Html {
    icon_base("M10 14a5 5 0 007 0l3-3a5 5 0 00-7-7l-1 1M14 10a5 5 0 00-7 0l-3 3a5 5 0 007 7l1-1")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M6 6l1 14h10l1-14M10 11v6M14 11v6")
}
pub fn icon_alert() -> Html {
    icon_base("M12 2L1 21h22zM12 9v5M12 17v1")
}
pub fn icon_zap() -> Html {
    icon_base("M13 2L3 14h7l-1 8 10-12h-7z")
}
