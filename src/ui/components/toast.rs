//! Transient notification toast

use crate::workflow::notification::{run_toast, Notification, NotificationKind, ToastPhase};
use dioxus::prelude::*;
use tokio::sync::mpsc;

#[component]
pub fn Toast(notification: Notification, on_dismiss: EventHandler<()>) -> Element {
    let mut phase = use_signal(|| ToastPhase::Visible);

    // The lifecycle task lives as long as this toast; clicks only nudge it
    let close_tx = use_hook(move || {
        let (close_tx, close_rx) = mpsc::unbounded_channel::<()>();
        spawn(async move {
            run_toast(close_rx, move |p| phase.set(p), move || on_dismiss.call(())).await;
        });
        close_tx
    });

    let (accent, label) = match notification.kind {
        NotificationKind::Success => ("#34d399", "Success"),
        NotificationKind::Error => ("#f87171", "Error"),
        NotificationKind::Info => ("#38bdf8", "Info"),
    };
    let motion = match phase() {
        ToastPhase::Visible => "opacity-100 translate-y-0",
        ToastPhase::Leaving | ToastPhase::Dismissed => "opacity-0 translate-y-2",
    };

    rsx! {
        div {
            class: "fixed bottom-6 right-6 z-50 max-w-sm w-full transition-all duration-300 {motion}",
            role: "status",

            div {
                class: "glass-strong rounded-xl p-4 flex items-start gap-3 toast-{notification.kind}",
                style: "border-left: 3px solid {accent};",

                div {
                    class: "flex-1 min-w-0",
                    div {
                        class: "text-[10px] uppercase tracking-widest font-semibold mb-1",
                        style: "color: {accent};",
                        "{label}"
                    }
                    p { class: "text-sm text-[var(--text-primary)] break-words", "{notification.message}" }
                }

                button {
                    class: "p-1 rounded-md hover:bg-white/[0.08] text-[var(--text-tertiary)]",
                    title: "Close",
                    onclick: move |_| {
                        let _ = close_tx.send(());
                    },
                    svg {
                        width: "12",
                        height: "12",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        line { x1: "18", y1: "6", x2: "6", y2: "18" }
                        line { x1: "6", y1: "6", x2: "18", y2: "18" }
                    }
                }
            }
        }
    }
}
