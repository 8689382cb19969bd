//! HTML fragments for the response area and the GPU list.

use askama::Template;
use client::notice::{slot_label, Notice, Tone};
use common::GpuSlot;

struct Line<'a> {
    color: &'static str,
    text: &'a str,
}

#[derive(Template)]
#[template(path = "notices.html")]
struct NoticesTemplate<'a> {
    lines: Vec<Line<'a>>,
}

struct GpuRow {
    id: String,
    label: String,
    disabled: bool,
}

#[derive(Template)]
#[template(path = "gpu_list.html")]
struct GpuListTemplate {
    rows: Vec<GpuRow>,
}

fn color(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "green",
        Tone::Failure | Tone::Pending => "red",
    }
}

/// One `<p>` per notice, colored by tone.
pub fn notices(notices: &[Notice]) -> askama::Result<String> {
    NoticesTemplate {
        lines: notices
            .iter()
            .map(|n| Line {
                color: color(n.tone),
                text: &n.text,
            })
            .collect(),
    }
    .render()
}

/// The response area after an action: the waiting banner followed by the outcome.
pub fn response_area(outcome: &[Notice]) -> askama::Result<String> {
    let mut all = Vec::with_capacity(outcome.len() + 1);
    all.push(Notice::pending());
    all.extend_from_slice(outcome);
    notices(&all)
}

/// One checkbox per GPU; reserved GPUs are disabled and say who holds them.
pub fn gpu_list(slots: &[GpuSlot]) -> askama::Result<String> {
    GpuListTemplate {
        rows: slots
            .iter()
            .map(|slot| GpuRow {
                id: slot.id.clone(),
                label: slot_label(slot),
                disabled: !slot.is_available(),
            })
            .collect(),
    }
    .render()
}
