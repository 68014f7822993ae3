// src/render.rs
//
// Text rendering of an observation snapshot.
//
// Rendering is a consumer of the core's public state: it reads an owned
// Observation plus the variant's field names and produces a side-channel
// string. It never touches episode state.

use std::fmt::Write;

use crate::config::EpisodeConfig;
use crate::env::Observation;

/// Format the observation as a human-readable block, one line per field.
pub fn render_text(config: &EpisodeConfig, observation: &Observation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Time: {}/{}", observation.step, config.max_steps);
    for (spec, value) in config.fields.iter().zip(&observation.values) {
        let _ = writeln!(out, "{}: {:.2}", spec.name, value);
    }
    let _ = writeln!(out, "{}", "-".repeat(30));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EpisodeConfig;

    #[test]
    fn renders_every_field_with_step_header() {
        let config = EpisodeConfig::hypertension();
        let observation = Observation {
            values: config.initial.to_vec(),
            step: 12,
        };
        let text = render_text(&config, &observation);
        assert!(text.starts_with("Time: 12/100\n"));
        for spec in config.fields {
            assert!(text.contains(spec.name), "missing field {}", spec.name);
        }
        assert!(text.contains("sbp: 120.00"));
    }
}
