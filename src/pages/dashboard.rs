use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::icons;
use crate::models::DashboardStats;
use crate::pages::{error_alert, page_shell, use_api};
use crate::stats::{donut_segments, percent_label};

const DONUT_RADIUS: f64 = 80.0;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let api = use_api();
    let stats = use_state(|| None::<DashboardStats>);
    let loading = use_state(|| true);
    let error_msg = use_state(|| None::<String>);

    {
        let stats = stats.clone();
        let loading = loading.clone();
        let error_msg = error_msg.clone();
        let api = api.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.get("/dashboard/stats").await {
                        Ok(resp) if resp.ok() => {
                            match resp.json::<DashboardStats>().await {
                                Ok(data) => stats.set(Some(data)),
                                Err(e) => {
                                    error!(format!("dashboard stats decode: {}", e));
                                    stats.set(None);
                                }
                            }
                        }
                        Ok(_) => stats.set(None),
                        Err(e) => {
                            error!(format!("dashboard stats: {}", e));
                            error_msg.set(Some(e.user_message()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    if *loading {
        return page_shell(
            "Dashboard",
            html! {},
            html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> },
        );
    }

    let body = match &*stats {
        None => html! {
            <>
                { if let Some(msg) = &*error_msg { error_alert(msg) } else { html!{} } }
                <div class="bg-card rounded-[10px] p-10 border border-border text-center text-muted-foreground">
                    {"No data yet. Processed emails and generated invoices will show up here."}
                </div>
            </>
        },
        Some(stats) => {
            let segments = donut_segments(&stats.charts.distribution, DONUT_RADIUS);
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        { kpi_card("Emails processed", stats.kpis.total_emails, icons::icon_mail()) }
                        { kpi_card("High urgency", stats.kpis.high_urgency, icons::icon_alert()) }
                        { kpi_card("Invoices generated", stats.kpis.invoices, icons::icon_file_text()) }
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-4">{"Request distribution"}</h3>
                            <div class="flex items-center gap-8">
                                <svg class="w-56 h-56 -rotate-90 shrink-0" viewBox="0 0 200 200">
                                    { for segments.iter().map(|seg| html! {
                                        <circle
                                            cx="100" cy="100" r={DONUT_RADIUS.to_string()}
                                            fill="transparent"
                                            stroke={seg.color}
                                            stroke-width="28"
                                            stroke-dasharray={format!("{:.2} {:.2}", seg.dash, seg.gap)}
                                            stroke-dashoffset={format!("{:.2}", seg.offset)}
                                        />
                                    }) }
                                </svg>
                                <div class="space-y-2">
                                    { for segments.iter().map(|seg| html! {
                                        <div class="flex items-center gap-2 text-sm">
                                            <span class="w-3 h-3 rounded-full" style={format!("background: {}", seg.color)}></span>
                                            <span class="text-foreground">{ seg.name.clone() }</span>
                                            <span class="text-muted-foreground">{ percent_label(seg.percent) }</span>
                                        </div>
                                    }) }
                                </div>
                            </div>
                        </div>

                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-4">{"Recent activity"}</h3>
                            { if stats.recents.is_empty() {
                                html! { <p class="text-sm text-muted-foreground">{"No recent activity."}</p> }
                            } else {
                                html! {
                                    <div class="space-y-3">
                                        { for stats.recents.iter().map(|item| {
                                            let urgent = item.urgency.as_deref() == Some("haute")
                                                || item.urgency.as_deref() == Some("high");
                                            let border = if urgent { "border-l-4 border-red-500" } else { "border-l-4 border-primary" };
                                            html! {
                                                <div key={item.id} class={format!("p-3 rounded-lg bg-muted/30 {}", border)}>
                                                    <p class="font-semibold text-sm text-foreground">
                                                        { item.subject.clone().unwrap_or_else(|| "(no subject)".to_string()) }
                                                    </p>
                                                    <p class="text-xs text-muted-foreground">
                                                        { format!("{} • {}",
                                                            item.category.clone().unwrap_or_default(),
                                                            item.date.clone().unwrap_or_default()) }
                                                    </p>
                                                </div>
                                            }
                                        }) }
                                    </div>
                                }
                            }}
                        </div>
                    </div>
                </>
            }
        }
    };

    page_shell("Dashboard", html! {}, body)
}

fn kpi_card(title: &'static str, value: i64, icon: Html) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ title }</p>
                <h3 class="text-3xl font-bold text-foreground">{ value }</h3>
            </div>
            <div class="p-3 bg-muted rounded-[10px] text-foreground">{ icon }</div>
        </div>
    }
}
