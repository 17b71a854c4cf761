//! Which plot drives the image tooltip.
//!
//! Both plots report hover independently, and both can report a point in the
//! same update; the comparison plot wins in that case.

/// Screen-space box around a hovered point, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Square box of half-size `radius` around a point.
    pub fn around(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x0: x - radius,
            x1: x + radius,
            y0: y - radius,
            y1: y + radius,
        }
    }
}

/// A hover report from one plot: the row under the pointer and where it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverEvent {
    pub point_index: usize,
    pub bbox: BoundingBox,
}

/// The two plots that report hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverSource {
    Pca,
    Comparison,
}

/// Latest hover report from each plot; `None` when the pointer is elsewhere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverInputs {
    pub comparison: Option<HoverEvent>,
    pub pca: Option<HoverEvent>,
}

impl HoverInputs {
    pub fn with(self, source: HoverSource, event: Option<HoverEvent>) -> Self {
        match source {
            HoverSource::Pca => Self { pca: event, ..self },
            HoverSource::Comparison => Self {
                comparison: event,
                ..self
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Hidden,
    ShowingFromPca { row: usize, bbox: BoundingBox },
    ShowingFromComparison { row: usize, bbox: BoundingBox },
}

impl HoverState {
    /// Resolve both reports into one state.
    ///
    /// Reports whose index is not a row of the table are dropped as if the
    /// plot reported nothing.
    pub fn resolve(inputs: &HoverInputs, row_count: usize) -> Self {
        let valid = |event: Option<HoverEvent>, source: HoverSource| {
            let event = event?;
            if event.point_index < row_count {
                Some(event)
            } else {
                tracing::debug!(
                    ?source,
                    index = event.point_index,
                    row_count,
                    "Ignoring hover on unknown row"
                );
                None
            }
        };
        if let Some(event) = valid(inputs.comparison, HoverSource::Comparison) {
            return HoverState::ShowingFromComparison {
                row: event.point_index,
                bbox: event.bbox,
            };
        }
        if let Some(event) = valid(inputs.pca, HoverSource::Pca) {
            return HoverState::ShowingFromPca {
                row: event.point_index,
                bbox: event.bbox,
            };
        }
        HoverState::Hidden
    }

    pub fn source(&self) -> Option<HoverSource> {
        match self {
            HoverState::Hidden => None,
            HoverState::ShowingFromPca { .. } => Some(HoverSource::Pca),
            HoverState::ShowingFromComparison { .. } => Some(HoverSource::Comparison),
        }
    }

    pub fn row(&self) -> Option<usize> {
        match self {
            HoverState::Hidden => None,
            HoverState::ShowingFromPca { row, .. }
            | HoverState::ShowingFromComparison { row, .. } => Some(*row),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            HoverState::Hidden => None,
            HoverState::ShowingFromPca { bbox, .. }
            | HoverState::ShowingFromComparison { bbox, .. } => Some(*bbox),
        }
    }
}

/// What the tooltip shows for a hovered row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipContent {
    pub row: usize,
    /// `None` when the row has no image reference.
    pub image_ref: Option<String>,
}

/// Tooltip output: hidden, or shown at a box with content.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TooltipSpec {
    #[default]
    Hidden,
    Shown {
        bbox: BoundingBox,
        content: TooltipContent,
    },
}

impl TooltipSpec {
    /// Build the tooltip for `state`, looking the image up by row.
    pub fn for_state<'a>(state: &HoverState, image_ref: impl Fn(usize) -> Option<&'a str>) -> Self {
        match (state.row(), state.bbox()) {
            (Some(row), Some(bbox)) => TooltipSpec::Shown {
                bbox,
                content: TooltipContent {
                    row,
                    image_ref: image_ref(row).map(str::to_string),
                },
            },
            _ => TooltipSpec::Hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipSpec::Shown { .. })
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            TooltipSpec::Hidden => None,
            TooltipSpec::Shown { bbox, .. } => Some(*bbox),
        }
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        match self {
            TooltipSpec::Hidden => None,
            TooltipSpec::Shown { content, .. } => Some(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(index: usize, x: f32) -> HoverEvent {
        HoverEvent {
            point_index: index,
            bbox: BoundingBox::around(x, 10.0, 3.0),
        }
    }

    #[test]
    fn nothing_hovered_is_hidden() {
        assert_eq!(HoverState::resolve(&HoverInputs::default(), 10), HoverState::Hidden);
    }

    #[test]
    fn each_source_alone_shows_its_point() {
        let comparison = HoverInputs::default().with(HoverSource::Comparison, Some(event(2, 1.0)));
        assert_eq!(
            HoverState::resolve(&comparison, 10),
            HoverState::ShowingFromComparison {
                row: 2,
                bbox: BoundingBox::around(1.0, 10.0, 3.0)
            }
        );
        let pca = HoverInputs::default().with(HoverSource::Pca, Some(event(4, 5.0)));
        let state = HoverState::resolve(&pca, 10);
        assert_eq!(state.source(), Some(HoverSource::Pca));
        assert_eq!(state.row(), Some(4));
    }

    #[test]
    fn comparison_wins_when_both_plots_report() {
        let inputs = HoverInputs {
            comparison: Some(event(1, 1.0)),
            pca: Some(event(7, 9.0)),
        };
        let state = HoverState::resolve(&inputs, 10);
        assert_eq!(state.source(), Some(HoverSource::Comparison));
        assert_eq!(state.row(), Some(1));
        assert_eq!(state.bbox(), Some(BoundingBox::around(1.0, 10.0, 3.0)));
    }

    #[test]
    fn out_of_range_index_is_dropped() {
        let only_bad = HoverInputs::default().with(HoverSource::Comparison, Some(event(10, 1.0)));
        assert_eq!(HoverState::resolve(&only_bad, 10), HoverState::Hidden);

        let bad_and_good = HoverInputs {
            comparison: Some(event(usize::MAX, 1.0)),
            pca: Some(event(3, 2.0)),
        };
        let state = HoverState::resolve(&bad_and_good, 10);
        assert_eq!(state.source(), Some(HoverSource::Pca));
        assert_eq!(state.row(), Some(3));
    }

    #[test]
    fn tooltip_is_visible_exactly_when_a_row_is_hovered() {
        let images = ["a.png", "b.png"];
        let lookup = |row: usize| images.get(row).copied();

        let hidden = TooltipSpec::for_state(&HoverState::Hidden, lookup);
        assert!(!hidden.is_visible());
        assert_eq!(hidden.bbox(), None);
        assert_eq!(hidden.content(), None);

        let bbox = BoundingBox::around(0.0, 0.0, 1.0);
        let shown = TooltipSpec::for_state(&HoverState::ShowingFromPca { row: 1, bbox }, lookup);
        assert!(shown.is_visible());
        assert_eq!(shown.bbox(), Some(bbox));
        assert_eq!(
            shown.content(),
            Some(&TooltipContent {
                row: 1,
                image_ref: Some("b.png".into())
            })
        );
    }
}
