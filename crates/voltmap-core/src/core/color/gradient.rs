use super::rgb::Rgb;

/// Builds an ordered gradient of `steps + 1` colors from `start` to `end`.
///
/// Each color `x` in `0..=steps` is the component-wise linear interpolation
/// `(1 - x/steps) * start + (x/steps) * end`, quantized to the 8-bit
/// resolution of the hex anchor notation. Both endpoints are included; the
/// degenerate case `start == end` yields `steps + 1` copies of the anchor.
/// `steps = 0` yields the single start color.
pub fn gradient(start: Rgb, end: Rgb, steps: usize) -> Vec<Rgb> {
    if steps == 0 {
        return vec![start.quantized()];
    }
    (0..=steps)
        .map(|x| start.fade(&end, x as f64 / steps as f64).quantized())
        .collect()
}
