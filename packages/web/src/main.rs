use dioxus::prelude::*;

use ui::{AuthProvider, ThemeProvider};
use views::{Board, Dashboard, Login, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/board")]
    Board {},
    #[route("/dashboard")]
    Dashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ThemeProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Redirect `/` to the board.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Board {});
    rsx! {}
}
