//! Light/dark theme handling. The choice is the one UI preference that
//! survives restarts, persisted next to the credential.

use dioxus::prelude::*;
use store::PrefStore;

use crate::icons::{FaMoon, FaSun};
use crate::prefs::make_prefs;
use crate::Icon;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub type ThemeSignal = Signal<Theme>;

/// Read the persisted theme, defaulting to light.
pub fn load_theme() -> Theme {
    match make_prefs().load().theme.as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Reflect the theme onto the document root so the stylesheet can switch.
pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = theme;
    }
}

/// Provides the theme signal and keeps the document attribute in sync.
#[component]
pub fn ThemeProvider(children: Element) -> Element {
    let theme = use_context_provider(|| Signal::new(load_theme()));

    use_effect(move || {
        apply_theme(theme());
    });

    rsx! {
        {children}
    }
}

#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_context::<ThemeSignal>();

    let onclick = move |_| {
        let next = theme().toggled();
        theme.set(next);
        make_prefs().update(|p| p.theme = Some(next.as_str().to_string()));
    };

    rsx! {
        button {
            class: "theme-toggle",
            title: "Switch theme",
            onclick: onclick,
            if theme() == Theme::Dark {
                Icon { icon: FaSun, width: 14, height: 14 }
            } else {
                Icon { icon: FaMoon, width: 14, height: 14 }
            }
        }
    }
}
