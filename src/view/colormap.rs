use std::sync::Arc;

/// Viridis sampled at ten evenly spaced stops.
const VIRIDIS: [[u8; 3]; 10] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

/// Colour for values that are missing from the colour column.
pub const MISSING_RGB: [u8; 3] = [0x88, 0x88, 0x88];

/// Map `t` in `0..=1` onto viridis. Values outside the range are clamped.
pub fn viridis(t: f64) -> [u8; 3] {
    if !t.is_finite() {
        return MISSING_RGB;
    }
    let scaled = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lower as f64;
    let mut rgb = [0u8; 3];
    for (channel, out) in rgb.iter_mut().enumerate() {
        let a = VIRIDIS[lower][channel] as f64;
        let b = VIRIDIS[upper][channel] as f64;
        *out = (a + (b - a) * frac).round().clamp(0.0, 255.0) as u8;
    }
    rgb
}

/// Per-point colouring shared by every series of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    pub title: String,
    pub values: Arc<[f64]>,
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning the finite range of `values`.
    pub fn over(title: impl Into<String>, values: Arc<[f64]>) -> Self {
        let (min, max) = values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            });
        let (min, max) = if min <= max { (min, max) } else { (0.0, 0.0) };
        Self {
            title: title.into(),
            values,
            min,
            max,
        }
    }

    /// Position of `value` within the scale; a flat scale maps to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return f64::NAN;
        }
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn rgb_for_value(&self, value: f64) -> [u8; 3] {
        viridis(self.normalize(value))
    }

    /// Colour of the point at `row`.
    pub fn rgb_for_row(&self, row: usize) -> [u8; 3] {
        self.values
            .get(row)
            .map(|value| self.rgb_for_value(*value))
            .unwrap_or(MISSING_RGB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), VIRIDIS[0]);
        assert_eq!(viridis(1.0), VIRIDIS[9]);
        assert_eq!(viridis(-3.0), VIRIDIS[0]);
        assert_eq!(viridis(7.0), VIRIDIS[9]);
        assert_eq!(viridis(f64::NAN), MISSING_RGB);
    }

    #[test]
    fn viridis_interpolates_between_stops() {
        assert_eq!(viridis(0.5), [0x23, 0x90, 0x8c]);
    }

    #[test]
    fn scale_ignores_non_finite_values_for_its_range() {
        let scale = ColorScale::over("Cluster", vec![2.0, f64::NAN, 6.0, 4.0].into());
        assert_eq!((scale.min, scale.max), (2.0, 6.0));
        assert_eq!(scale.normalize(4.0), 0.5);
        assert_eq!(scale.rgb_for_row(0), VIRIDIS[0]);
        assert_eq!(scale.rgb_for_row(2), VIRIDIS[9]);
        assert_eq!(scale.rgb_for_row(1), MISSING_RGB);
        assert_eq!(scale.rgb_for_row(99), MISSING_RGB);
    }

    #[test]
    fn flat_scale_maps_to_midpoint() {
        let scale = ColorScale::over("Cluster", vec![3.0, 3.0].into());
        assert_eq!(scale.normalize(3.0), 0.5);
        let empty = ColorScale::over("Cluster", vec![f64::NAN].into());
        assert_eq!((empty.min, empty.max), (0.0, 0.0));
    }
}
