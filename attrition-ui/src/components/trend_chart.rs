//! Trend Chart Component
//!
//! Monthly attrition rate as a line chart on an HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use attrition::views::TrendSeries;
use attrition::TrendRender;

use crate::components::ErrorBanner;
use crate::state::DashboardState;

const LINE_COLOR: &str = "#8884d8";

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Trend panel: placeholder, chart or error depending on the query state
#[component]
pub fn TrendChart() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let view_model = state.view;
    let trend = create_memo(move |_| view_model.get().trend);

    view! {
        <div class="relative">
            {move || match trend.get() {
                TrendRender::Placeholder { height_px } => view! {
                    <div
                        class="bg-gray-700 rounded-lg animate-pulse"
                        style=format!("height: {}px", height_px)
                    />
                }
                .into_view(),
                TrendRender::Chart(series) => view! { <TrendCanvas series=series /> }.into_view(),
                TrendRender::Error(message) => {
                    let state = state.clone();
                    view! {
                        <ErrorBanner message=message on_retry=move |_| state.retry_trends() />
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn TrendCanvas(series: TrendSeries) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &series);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="300"
            class="w-full h-[300px] rounded-lg"
        />
    }
}

/// Canvas coordinates of each point, left to right in series order
fn plot_points(series: &TrendSeries, width: f64, height: f64) -> Vec<(f64, f64)> {
    let Some((min, max)) = series.value_range() else {
        return Vec::new();
    };

    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let steps = series.points.len().saturating_sub(1).max(1) as f64;

    series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = MARGIN_LEFT + (i as f64 / steps) * chart_width;
            // Canvas y grows downward
            let y = MARGIN_TOP + ((max - point.value) / (max - min)) * chart_height;
            (x, y)
        })
        .collect()
}

fn draw_chart(canvas: &HtmlCanvasElement, series: &TrendSeries) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let Some((min, max)) = series.value_range() else {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No trend data", width / 2.0 - 50.0, height / 2.0);
        return;
    };

    // Horizontal grid with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 5.0) * (max - min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.1}%", value), 5.0, y + 4.0);
    }

    let points = plot_points(series, width, height);

    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(*x, *y);
        } else {
            ctx.line_to(*x, *y);
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&LINE_COLOR.into());
    for (x, y) in &points {
        ctx.begin_path();
        let _ = ctx.arc(*x, *y, 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // Month labels under each point
    ctx.set_fill_style(&"#9ca3af".into());
    for (point, (x, _)) in series.points.iter().zip(&points) {
        let _ = ctx.fill_text(&point.label, x - 12.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrition::TrendPoint;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_plot_points_span_chart() {
        let series = TrendSeries::from_points(&[
            TrendPoint { month: "Jan".into(), rate: 10.0 },
            TrendPoint { month: "Feb".into(), rate: 20.0 },
            TrendPoint { month: "Mar".into(), rate: 15.0 },
        ]);

        let points = plot_points(&series, 800.0, 300.0);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0, MARGIN_LEFT);
        assert_eq!(points[2].0, 800.0 - MARGIN_RIGHT);
        // Higher rate sits higher on the canvas
        assert!(points[1].1 < points[0].1);
    }

    #[wasm_bindgen_test]
    fn test_plot_points_empty() {
        assert!(plot_points(&TrendSeries::default(), 800.0, 300.0).is_empty());
    }
}
