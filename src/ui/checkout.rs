//! Package selection and mock escrow checkout

use crate::app::AppState;
use crate::types::marketplace::format_price;
use crate::workflow::checkout::{Checkout, CheckoutStep};
use crate::workflow::notification::Notification;
use dioxus::prelude::*;

#[component]
pub fn CheckoutView() -> Element {
    let app_state = use_context::<AppState>();
    let mut notification = app_state.notification;
    let mut checkout = use_signal(Checkout::new);

    let current = checkout.read().clone();
    let summary = current.summary();
    let selected_index = current.selected_index();
    let confirming = current.step() == CheckoutStep::ConfirmingEscrow;

    rsx! {
        div {
            class: "max-w-3xl mx-auto space-y-6 animate-fade-in-up pb-8",

            h1 { class: "text-2xl font-semibold", "Choose your package" }

            div {
                class: "grid grid-cols-2 gap-4",
                for (index, pkg) in current.packages().iter().cloned().enumerate() {
                    button {
                        key: "{index}",
                        class: if index == selected_index {
                            "p-5 rounded-2xl text-left border border-[var(--accent-primary)] bg-[var(--accent-primary-10)] space-y-2"
                        } else {
                            "p-5 rounded-2xl text-left border border-[var(--border-subtle)] bg-white/[0.02] hover:bg-white/[0.04] space-y-2"
                        },
                        onclick: move |_| checkout.write().choose(index),
                        div { class: "font-semibold", "{pkg.name}" }
                        div { class: "text-xl text-[var(--accent-primary)]", "{format_price(pkg.price)}" }
                        p { class: "text-xs text-[var(--text-tertiary)]", "{pkg.features}" }
                    }
                }
            }

            // Booking summary
            div {
                class: "p-5 rounded-2xl glass-md space-y-2",
                h3 { class: "text-base font-semibold mb-2", "Booking summary" }
                SummaryRow { label: "Package", value: summary.package_name.clone() }
                SummaryRow { label: "Base price", value: format_price(summary.base_price) }
                SummaryRow { label: "Platform fee", value: format_price(summary.platform_fee) }
                div { class: "border-t border-[var(--border-subtle)] my-2" }
                SummaryRow { label: "Total", value: format_price(summary.total) }

                button {
                    class: "btn-primary w-full mt-3",
                    onclick: move |_| checkout.write().open_escrow(),
                    "Proceed to escrow"
                }
            }

            if confirming {
                div {
                    class: "fixed inset-0 bg-black/60 backdrop-blur-2xl z-40 flex items-center justify-center p-4",
                    div {
                        class: "w-full max-w-md glass-strong rounded-2xl p-6 space-y-4 animate-scale-in",
                        h2 { class: "text-lg font-semibold", "Confirm escrow payment" }
                        p {
                            class: "text-sm text-[var(--text-secondary)]",
                            "{format_price(summary.total)} for {summary.package_name} will be held in escrow until the event is delivered."
                        }
                        div {
                            class: "flex gap-3",
                            button {
                                class: "btn-ghost flex-1",
                                onclick: move |_| checkout.write().cancel_escrow(),
                                "Cancel"
                            }
                            button {
                                class: "btn-primary flex-1",
                                onclick: move |_| {
                                    let receipt = checkout.write().confirm_escrow();
                                    if let Some(receipt) = receipt {
                                        notification.set(Some(Notification::success(format!(
                                            "{} secured in escrow for {}",
                                            format_price(receipt.amount),
                                            receipt.package_name
                                        ))));
                                    }
                                },
                                "Confirm"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SummaryRow(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-between text-sm",
            span { class: "text-[var(--text-secondary)]", "{label}" }
            span { class: "font-medium", "{value}" }
        }
    }
}
