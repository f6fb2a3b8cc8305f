//! ASCII rendering of a function over an interval.

const MARK: char = '█';
const EMPTY: char = '_';

#[derive(Debug, Clone, Copy)]
pub struct GraphCfg {
    pub width: usize,
    pub height: usize,
    pub x_axis: (f64, f64),
    pub y_axis: (f64, f64),
}

/// Linear map of `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn map_range(in_min: f64, in_max: f64, out_min: f64, out_max: f64, x: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Smallest y range covering `values`, widened when flat so the curve sits
/// mid-height.
pub fn y_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (-1.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

/// One column per x sample, top row is `y_axis.1`. Values outside the y
/// range are left blank.
pub fn ascii_graph(f: impl Fn(f64) -> f64, cfg: &GraphCfg) -> String {
    let GraphCfg {
        width,
        height,
        x_axis,
        y_axis,
    } = *cfg;
    let mut rows = vec![vec![EMPTY; width]; height];
    let top = height.saturating_sub(1) as f64;
    for (col, x) in (0..width).map(|c| (c, c as f64)) {
        let fx = map_range(0.0, width as f64, x_axis.0, x_axis.1, x);
        let y = map_range(y_axis.0, y_axis.1, 0.0, top, f(fx)).round();
        if y >= 0.0 && y <= top {
            rows[height - 1 - y as usize][col] = MARK;
        }
    }
    rows.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
