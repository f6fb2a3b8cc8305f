//! Subcommand implementations. Output goes to any `Write` so tests can
//! capture it.

use std::io::Write;

use eyre::WrapErr;
use humpf_core::{Spring, SpringSequence};
use serde_json::json;

use crate::graph::{GraphCfg, ascii_graph, y_range};

fn check_interval(from: f64, to: f64) -> eyre::Result<()> {
    if !(from.is_finite() && to.is_finite()) {
        eyre::bail!("--from and --to must be finite");
    }
    if to < from {
        eyre::bail!("--to ({to}) must not be before --from ({from})");
    }
    Ok(())
}

/// Sample times `from, from + step, ...` up to and including `to`.
fn sample_times(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((to - from) / step + 1e-9).floor() as u64;
    (0..=n).map(move |i| from + i as f64 * step)
}

pub fn run_sample(
    seq: &SpringSequence,
    from: f64,
    to: f64,
    step: f64,
    json_mode: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    check_interval(from, to)?;
    if !(step > 0.0 && step.is_finite()) {
        eyre::bail!("--step must be finite and > 0, got {step}");
    }
    if !json_mode {
        writeln!(out, "{:>10} {:>12} {:>12}  stable", "time", "position", "velocity")?;
    }
    let mut count = 0usize;
    for t in sample_times(from, to, step) {
        let state = seq.evaluate(t);
        let stable = seq.stable(t);
        if json_mode {
            let line = json!({
                "t": t,
                "position": state.position,
                "velocity": state.velocity,
                "stable": stable,
            });
            writeln!(out, "{line}")?;
        } else {
            writeln!(
                out,
                "{t:>10.1} {:>12.4} {:>12.4}  {stable}",
                state.position, state.velocity
            )?;
        }
        count += 1;
    }
    tracing::debug!(samples = count, from, to, step, "sampled timeline");
    Ok(())
}

pub fn run_plot(
    seq: &SpringSequence,
    from: f64,
    to: f64,
    graph: (usize, usize),
    velocity: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    check_interval(from, to)?;
    let (width, height) = graph;
    if width == 0 || height == 0 {
        eyre::bail!("--width and --height must be > 0");
    }
    let value = |t: f64| {
        let s = seq.evaluate(t);
        if velocity { s.velocity } else { s.position }
    };
    let x_axis = if to > from { (from, to) } else { (from, from + 1.0) };
    let y_axis = y_range((0..width).map(|c| {
        value(crate::graph::map_range(
            0.0,
            width as f64,
            x_axis.0,
            x_axis.1,
            c as f64,
        ))
    }));
    let cfg = GraphCfg {
        width,
        height,
        x_axis,
        y_axis,
    };
    writeln!(out, "{}", ascii_graph(value, &cfg))?;
    writeln!(
        out,
        "{} in [{:.4}, {:.4}] over t in [{from}, {to}]",
        if velocity { "velocity" } else { "position" },
        y_axis.0,
        y_axis.1
    )?;
    Ok(())
}

fn spring_json(spring: &Spring) -> serde_json::Value {
    let c = spring.config();
    json!({
        "regime": spring.regime().name(),
        "position": c.position,
        "velocity": c.velocity,
        "equilibrium": c.equilibrium,
        "angular_frequency": c.angular_frequency,
        "damping_ratio": c.damping_ratio,
        "time_start": c.time_start,
    })
}

fn spring_line(spring: &Spring) -> String {
    let c = spring.config();
    format!(
        "{:<17} ω={} ζ={} equilibrium={} position={:.4} velocity={:.4}",
        spring.regime().name(),
        c.angular_frequency,
        c.damping_ratio,
        c.equilibrium,
        c.position,
        c.velocity
    )
}

pub fn run_inspect(
    seq: &SpringSequence,
    json_mode: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    if json_mode {
        let steps: Vec<_> = seq
            .steps()
            .iter()
            .map(|s| {
                let mut v = spring_json(s.spring());
                v["time"] = json!(s.time());
                v
            })
            .collect();
        let doc = json!({
            "time_scale": seq.time_scale(),
            "initial": spring_json(seq.initial_spring()),
            "steps": steps,
        });
        writeln!(out, "{doc}").wrap_err("write inspect output")?;
        return Ok(());
    }
    writeln!(out, "time_scale: {}", seq.time_scale())?;
    writeln!(out, "initial:     {}", spring_line(seq.initial_spring()))?;
    for (idx, step) in seq.steps().iter().enumerate() {
        writeln!(
            out,
            "step {idx} @ {}: {}",
            step.time(),
            spring_line(step.spring())
        )?;
    }
    Ok(())
}
