use std::path::Path;

use anyhow::{Context, Result};

use fullpage_core::trace::{replay, Trace, TraceInput, TraceStep};
use fullpage_core::AppConfig;

pub fn run(config: &AppConfig, trace_path: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(trace_path)
        .with_context(|| format!("Failed to read trace {}", trace_path.display()))?;
    let trace = Trace::from_json(&content)?;
    let report = replay(&trace, &config.timing)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Replaying {} records (animation {}ms, quiet {}ms), starting at section {}\n",
        trace.records.len(),
        config.timing.animation_duration_ms,
        config.timing.quiet_period_ms,
        report.initial_section
    );
    for step in &report.steps {
        println!(
            "  {:>7}ms  {:<32} {}",
            step.at_ms,
            describe(&step.input),
            outcome(step)
        );
    }

    println!(
        "\nFinal section: {} ({} commits, fragment {})",
        report.final_section,
        report.commits().count(),
        report
            .fragment
            .as_deref()
            .map(|f| format!("#{}", f))
            .unwrap_or_else(|| "none".to_string())
    );
    Ok(())
}

fn describe(input: &TraceInput) -> String {
    match input {
        TraceInput::Advance => "advance".to_string(),
        TraceInput::Retreat => "retreat".to_string(),
        TraceInput::GoTo { section } => format!("go to {}", section),
        TraceInput::Click { section } => format!("click marker {}", section),
        TraceInput::Resize { width_px } => format!("resize {}px", width_px),
        TraceInput::Wheel { delta_y } => format!("wheel {:+}", delta_y),
        TraceInput::TouchStart { x, y } => format!("touch start ({}, {})", x, y),
        TraceInput::TouchMove { x, y } => format!("touch move ({}, {})", x, y),
        TraceInput::TouchEnd => "touch end".to_string(),
        TraceInput::Key { key, focus } => {
            if focus.is_text_entry() {
                format!("key {:?} in {:?}", key, focus)
            } else {
                format!("key {:?}", key)
            }
        }
    }
}

fn outcome(step: &TraceStep) -> String {
    let mode = if step.mobile { " [mobile]" } else { "" };
    match (step.committed, step.ignored) {
        (Some((from, to)), _) => format!("{} -> {}{}", from, to, mode),
        (None, Some(reason)) => format!("ignored ({:?}), at {}{}", reason, step.section, mode),
        (None, None) => format!("at {}{}", step.section, mode),
    }
}
