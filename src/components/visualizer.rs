use dioxus::prelude::*;

use crate::components::use_visualizer_frames;

/// Bars drawn from the visualizer frame. The 128-bin frame is folded down
/// to a fixed number of bars by averaging neighbouring bins.
const BAR_COUNT: usize = 32;

#[component]
pub fn Visualizer() -> Element {
    let frames = use_visualizer_frames();
    let frame = frames.read();

    let chunk = (frame.len() / BAR_COUNT).max(1);
    let bars: Vec<f64> = frame
        .chunks(chunk)
        .take(BAR_COUNT)
        .map(|bins| {
            let sum: u32 = bins.iter().map(|&v| v as u32).sum();
            let avg = sum as f64 / bins.len() as f64;
            // Keep a sliver visible even at silence.
            (avg / 255.0 * 100.0).max(2.0)
        })
        .collect();

    rsx! {
        div { class: "visualizer", aria_hidden: "true",
            for (i, height) in bars.iter().enumerate() {
                div {
                    key: "{i}",
                    class: "viz-bar",
                    style: "height: {height}%; --bar-hue: {i * 360 / BAR_COUNT};",
                }
            }
        }
    }
}
