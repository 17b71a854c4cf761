use eframe::egui;

/// Data extent shown by a plot before zoom and pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DataBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl DataBounds {
    /// Pad `(min_x, max_x, min_y, max_y)` by a fraction of its span; a
    /// degenerate axis gets a unit span around its value.
    pub(crate) fn padded(raw: (f64, f64, f64, f64), fraction: f64) -> Self {
        let (min_x, max_x) = pad_axis(raw.0, raw.1, fraction);
        let (min_y, max_y) = pad_axis(raw.2, raw.3, fraction);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub(crate) fn unit() -> Self {
        Self {
            min_x: 0.0,
            max_x: 1.0,
            min_y: 0.0,
            max_y: 1.0,
        }
    }
}

fn pad_axis(min: f64, max: f64, fraction: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min - span * fraction, max + span * fraction)
}

/// Maps data coordinates into a screen rect, y pointing up.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlotTransform {
    pub rect: egui::Rect,
    pub bounds: DataBounds,
    pub zoom: f32,
    pub pan: egui::Vec2,
}

impl PlotTransform {
    pub(crate) fn to_screen(&self, x: f64, y: f64) -> egui::Pos2 {
        let fx = ((x - self.bounds.min_x) / (self.bounds.max_x - self.bounds.min_x)) as f32;
        let fy = ((y - self.bounds.min_y) / (self.bounds.max_y - self.bounds.min_y)) as f32;
        let base = egui::pos2(
            self.rect.min.x + fx * self.rect.width(),
            self.rect.max.y - fy * self.rect.height(),
        );
        let center = self.rect.center();
        center + (base - center) * self.zoom + self.pan
    }

    pub(crate) fn to_data(&self, pos: egui::Pos2) -> (f64, f64) {
        let center = self.rect.center();
        let base = center + (pos - center - self.pan) / self.zoom;
        let fx = ((base.x - self.rect.min.x) / self.rect.width().max(1.0)) as f64;
        let fy = ((self.rect.max.y - base.y) / self.rect.height().max(1.0)) as f64;
        (
            self.bounds.min_x + fx * (self.bounds.max_x - self.bounds.min_x),
            self.bounds.min_y + fy * (self.bounds.max_y - self.bounds.min_y),
        )
    }

    /// Data range currently visible as `(min_x, max_x, min_y, max_y)`.
    pub(crate) fn visible(&self) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.to_data(self.rect.left_bottom());
        let (x1, y1) = self.to_data(self.rect.right_top());
        (x0.min(x1), x0.max(x1), y0.min(y1), y0.max(y1))
    }
}

/// Round tick positions covering `min..=max`, about `target` of them.
pub(crate) fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min || target == 0 {
        return Vec::new();
    }
    let raw_step = (max - min) / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|step| *step >= raw_step)
        .unwrap_or(10.0 * magnitude);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Short label for a tick value.
pub(crate) fn tick_label(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-3..1e5).contains(&abs) {
        return format!("{value:.1e}");
    }
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".into() } else { text.into() }
}
