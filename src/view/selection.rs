use crate::dataset::{AxisName, ModelName, Roster, TargetName};

/// Click counters for the model buttons, aligned with the roster's model list.
///
/// A model is on when its count is odd. Counts wrap on overflow, which keeps
/// the parity of every further click intact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelToggles {
    clicks: Vec<u64>,
}

impl ModelToggles {
    pub fn new(model_count: usize) -> Self {
        Self {
            clicks: vec![0; model_count],
        }
    }

    pub fn from_clicks(clicks: Vec<u64>) -> Self {
        Self { clicks }
    }

    /// Return the toggles after one click on `index`; out-of-range clicks change nothing.
    pub fn clicked(&self, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(count) = next.clicks.get_mut(index) {
            *count = count.wrapping_add(1);
        }
        next
    }

    pub fn clicks(&self, index: usize) -> u64 {
        self.clicks.get(index).copied().unwrap_or(0)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.clicks(index) % 2 == 1
    }

    pub fn len(&self) -> usize {
        self.clicks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
    }
}

/// One change coming from the dashboard controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    SetXAxis(AxisName),
    SetTarget(TargetName),
    ClickModel(usize),
}

/// The x axis, target and model toggles currently chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub x_axis: AxisName,
    pub target: TargetName,
    pub toggles: ModelToggles,
}

impl Selection {
    /// First x axis, first target, every model off.
    ///
    /// Returns `None` for a roster without axes or targets.
    pub fn initial(roster: &Roster) -> Option<Self> {
        Some(Self {
            x_axis: roster.x_axes.first()?.clone(),
            target: roster.targets.first()?.clone(),
            toggles: ModelToggles::new(roster.models.len()),
        })
    }

    pub fn apply(&self, event: &SelectionEvent) -> Self {
        match event {
            SelectionEvent::SetXAxis(axis) => Self {
                x_axis: axis.clone(),
                ..self.clone()
            },
            SelectionEvent::SetTarget(target) => Self {
                target: target.clone(),
                ..self.clone()
            },
            SelectionEvent::ClickModel(index) => Self {
                toggles: self.toggles.clicked(*index),
                ..self.clone()
            },
        }
    }
}

/// Models whose toggle is on, in roster order rather than click order.
pub fn selected_models<'a>(roster: &'a Roster, toggles: &ModelToggles) -> Vec<&'a ModelName> {
    roster
        .models
        .iter()
        .enumerate()
        .filter(|(index, _)| toggles.is_selected(*index))
        .map(|(_, model)| model)
        .collect()
}
