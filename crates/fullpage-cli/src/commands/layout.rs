use anyhow::{bail, Result};

use fullpage_core::placement::Positioning;
use fullpage_core::section::SECTION_COUNT;
use fullpage_core::{AppConfig, Layout};

pub fn run(config: &AppConfig, section: Option<usize>, json: bool) -> Result<()> {
    let sections: Vec<usize> = match section {
        Some(s) if (1..=SECTION_COUNT).contains(&s) => vec![s],
        Some(s) => bail!("Section {} is outside 1..={}", s, SECTION_COUNT),
        None => (1..=SECTION_COUNT).collect(),
    };
    let layouts: Vec<Layout> = sections.into_iter().map(Layout::for_section).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&layouts)?);
        return Ok(());
    }

    let transition = config.timing.animation_duration();
    for layout in &layouts {
        println!(
            "Current section {} (wrapper translateY({}%), top: {})",
            layout.current_section,
            layout.wrapper_offset_percent,
            layout
                .top_section()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        println!(
            "  {:<3} {:<24} {:<9} {:>5} {:>6} {:>4} {:<8} {:>8} {:>10}",
            "#", "role", "position", "top", "left", "z", "visible", "counter", "on-screen"
        );
        for p in &layout.placements {
            let position = match p.positioning {
                Positioning::Absolute => "absolute",
                Positioning::Fixed => "fixed",
            };
            println!(
                "  {:<3} {:<24} {:<9} {:>4}% {:>4}vw {:>4} {:<8} {:>7}% {:>10}",
                p.section,
                p.role.as_str(),
                position,
                p.top_percent,
                p.left_vw,
                p.z_index,
                if p.is_visible() { "yes" } else { "no" },
                p.counter_translate_percent,
                p.effective_top_percent(layout.wrapper_offset_percent),
            );
        }
        println!("  wrapper: {}", layout.wrapper_css(transition));
        for p in &layout.placements {
            println!("  section {}: {}", p.section, p.css(transition));
        }
        println!();
    }

    Ok(())
}
