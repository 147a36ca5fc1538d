//! Team membership editor. Only reachable for the project owner; the
//! caller gates the entry point and the action layer gates the save.

use dioxus::prelude::*;
use store::{Identity, Project};

use crate::icons::FaUsers;
use crate::Icon;

#[component]
pub fn TeamDialog(
    project: Project,
    users: Vec<Identity>,
    on_save: EventHandler<Vec<String>>,
    on_cancel: EventHandler<()>,
) -> Element {
    let owner_id = project.owner_id.clone();
    let mut selected = use_signal(move || project.member_ids.clone());

    // Copy-able: captures only the signal.
    let toggle = move |id: String| {
        let mut current = selected();
        match current.iter().position(|m| *m == id) {
            Some(index) => {
                current.remove(index);
            }
            None => current.push(id),
        }
        selected.set(current);
    };

    let candidates: Vec<Identity> = users.into_iter().filter(|u| u.id != owner_id).collect();

    rsx! {
        div {
            class: "modal-body",
            h2 {
                class: "modal-title",
                Icon { icon: FaUsers, width: 14, height: 14 }
                " Team"
            }

            div {
                class: "team-list",
                for user in candidates {
                    MemberRow {
                        key: "{user.id}",
                        user: user.clone(),
                        checked: selected().contains(&user.id),
                        on_toggle: toggle,
                    }
                }
            }

            div {
                class: "modal-actions",
                button {
                    class: "btn btn--primary",
                    onclick: move |_| on_save.call(selected()),
                    "Save"
                }
                button {
                    class: "btn btn--outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn MemberRow(user: Identity, checked: bool, on_toggle: EventHandler<String>) -> Element {
    let id = user.id.clone();

    rsx! {
        label {
            class: "team-member",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |_| on_toggle.call(id.clone()),
            }
            span { class: "team-member-name", "{user.name}" }
            span { class: "team-member-role", "{user.role}" }
        }
    }
}
