mod support;

use std::sync::Arc;

use fragview::dataset::{self, ColumnLayout, Dataset, Roster};
use fragview::egui_app::controller::DashboardController;
use fragview::egui_app::image_cache;
use fragview::view::{
    BoundingBox, DashboardInputs, HoverEvent, HoverInputs, HoverSource, HoverState, ReactiveView,
    SelectionEvent, TooltipSpec,
};
use support::fixtures::{self, ROWS};
use tempfile::TempDir;

struct Harness {
    _temp: TempDir,
    view: ReactiveView,
}

impl Harness {
    fn new() -> Self {
        Self::with_roster(fixtures::roster_with_missing_model())
    }

    fn with_roster(roster: Roster) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let path = fixtures::write_results_csv(temp.path());
        let loaded = dataset::load(&path, ColumnLayout::default(), roster).expect("load fixture");
        Self {
            _temp: temp,
            view: ReactiveView::new(Arc::new(loaded)),
        }
    }

    fn inputs(&self) -> DashboardInputs {
        self.view.initial_inputs().expect("roster has axes and targets")
    }

    fn dataset(&self) -> &Dataset {
        self.view.dataset()
    }
}

fn hover_at(row: usize, x: f32) -> Option<HoverEvent> {
    Some(HoverEvent {
        point_index: row,
        bbox: BoundingBox::around(x, 50.0, 5.0),
    })
}

fn model_index(harness: &Harness, name: &str) -> usize {
    harness
        .dataset()
        .roster()
        .model_index(&name.into())
        .expect("model in roster")
}

#[test]
fn fixture_loads_with_missing_model_reported() {
    let harness = Harness::new();
    assert_eq!(harness.dataset().row_count(), ROWS);
    let missing = harness.dataset().error_columns().missing();
    assert_eq!(missing.len(), fixtures::TARGETS.len());
    assert!(missing.iter().all(|(model, _, _)| model.as_str() == "Nonexistent"));
}

#[test]
fn no_models_selected_gives_empty_chart() {
    let harness = Harness::new();
    let frame = harness.view.update(&harness.inputs()).unwrap();
    assert!(frame.comparison.spec.series.is_empty());
    assert!(frame.comparison.unavailable.is_empty());
    assert_eq!(frame.comparison.spec.y_title, "MAE_IP");
}

#[test]
fn model_toggles_follow_click_parity() {
    let harness = Harness::new();
    let schnet = model_index(&harness, "SchNet");
    let mut inputs = harness.inputs();
    let mut counts = Vec::new();
    for _ in 0..4 {
        inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(schnet));
        let frame = harness.view.update(&inputs).unwrap();
        counts.push(frame.comparison.spec.series.len());
    }
    assert_eq!(counts, vec![1, 0, 1, 0]);
}

#[test]
fn selected_series_come_back_in_roster_order() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    for name in ["PaiNN", "average"] {
        let index = model_index(&harness, name);
        inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(index));
    }
    let frame = harness.view.update(&inputs).unwrap();
    let labels: Vec<&str> = frame
        .comparison
        .spec
        .series
        .iter()
        .map(|series| series.label.as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["mean_diff_average_IP_weighted", "mean_diff_PaiNN_IP_weighted"]
    );
}

#[test]
fn nonexistent_model_only_drops_its_own_series() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    for name in ["average", "Nonexistent", "PaiNN"] {
        let index = model_index(&harness, name);
        inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(index));
    }
    let frame = harness.view.update(&inputs).unwrap();
    assert_eq!(frame.comparison.spec.series.len(), 2);
    assert_eq!(frame.comparison.unavailable.len(), 1);
    let missing = &frame.comparison.unavailable[0];
    assert_eq!(missing.model.as_str(), "Nonexistent");
    assert_eq!(missing.target.as_str(), "IP");
    assert_eq!(missing.column, "mean_diff_Nonexistent_IP_weighted");
}

#[test]
fn changing_x_axis_keeps_series_membership() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(0));
    inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(1));
    let before = harness.view.update(&inputs).unwrap();
    inputs.selection = inputs.selection.apply(&SelectionEvent::SetXAxis("MW".into()));
    let after = harness.view.update(&inputs).unwrap();

    let labels = |frame: &fragview::view::DashboardFrame| -> Vec<String> {
        frame
            .comparison
            .spec
            .series
            .iter()
            .map(|series| series.label.clone())
            .collect()
    };
    assert_eq!(labels(&before), labels(&after));
    assert_eq!(after.comparison.spec.x_title, "MW");
    let series = &after.comparison.spec.series[0];
    for row in 0..ROWS {
        assert_eq!(series.x[row], fixtures::mw_value(row));
        assert_eq!(series.y[row], fixtures::error_value(0, 0, row));
    }
    assert_eq!(before.comparison.spec.series[0].x[2], fixtures::ct_value(2));
}

#[test]
fn changing_target_switches_error_columns() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(1));
    inputs.selection = inputs.selection.apply(&SelectionEvent::SetTarget("fosc1".into()));
    let frame = harness.view.update(&inputs).unwrap();
    assert_eq!(frame.comparison.spec.y_title, "MAE_fosc1");
    let series = &frame.comparison.spec.series[0];
    assert_eq!(series.label, "mean_diff_SchNet_fosc1_weighted");
    assert_eq!(series.y[4], fixtures::error_value(1, 2, 4));
}

#[test]
fn comparison_hover_on_row_five_shows_its_image() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.hover = HoverInputs::default().with(HoverSource::Comparison, hover_at(5, 40.0));
    let frame = harness.view.update(&inputs).unwrap();
    assert!(matches!(
        frame.hover,
        HoverState::ShowingFromComparison { row: 5, .. }
    ));
    let content = frame.tooltip.content().expect("tooltip visible");
    assert_eq!(content.image_ref.as_deref(), Some("img5.png"));
    assert_eq!(frame.tooltip.bbox(), Some(BoundingBox::around(40.0, 50.0, 5.0)));
}

#[test]
fn simultaneous_hovers_resolve_to_comparison() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.hover = HoverInputs {
        comparison: hover_at(2, 10.0),
        pca: hover_at(6, 90.0),
    };
    let first = harness.view.update(&inputs).unwrap();
    let second = harness.view.update(&inputs).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.hover.source(), Some(HoverSource::Comparison));
    assert_eq!(first.hover.row(), Some(2));
}

#[test]
fn pca_hover_is_used_when_comparison_is_idle_or_out_of_range() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.hover = HoverInputs {
        comparison: hover_at(ROWS + 10, 10.0),
        pca: hover_at(6, 90.0),
    };
    let frame = harness.view.update(&inputs).unwrap();
    assert_eq!(frame.hover.source(), Some(HoverSource::Pca));
    assert_eq!(
        frame.tooltip.content().and_then(|c| c.image_ref.as_deref()),
        Some("img6.png")
    );
}

#[test]
fn no_hover_or_only_bad_indices_hide_the_tooltip() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    assert_eq!(harness.view.update(&inputs).unwrap().tooltip, TooltipSpec::Hidden);
    inputs.hover = HoverInputs {
        comparison: hover_at(ROWS, 10.0),
        pca: hover_at(usize::MAX, 10.0),
    };
    let frame = harness.view.update(&inputs).unwrap();
    assert_eq!(frame.hover, HoverState::Hidden);
    assert!(!frame.tooltip.is_visible());
}

#[test]
fn blank_image_cell_shows_tooltip_without_image() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.hover = HoverInputs::default().with(HoverSource::Pca, hover_at(3, 10.0));
    let frame = harness.view.update(&inputs).unwrap();
    let content = frame.tooltip.content().expect("tooltip visible");
    assert_eq!(content.row, 3);
    assert_eq!(content.image_ref, None);
}

#[test]
fn pca_chart_covers_every_row_coloured_by_cluster() {
    let harness = Harness::new();
    let pca = harness.view.pca_chart();
    assert_eq!(pca.series.len(), 1);
    assert_eq!(pca.series[0].finite_points().count(), ROWS);
    assert_eq!(pca.color.title, "Cluster");
    assert_eq!((pca.color.min, pca.color.max), (0.0, 2.0));
}

#[test]
fn comparison_points_share_the_pca_cluster_scale() {
    let harness = Harness::new();
    let mut inputs = harness.inputs();
    inputs.selection = inputs.selection.apply(&SelectionEvent::ClickModel(0));
    inputs.hover = HoverInputs::default().with(HoverSource::Pca, hover_at(1, 10.0));
    let frame = harness.view.update(&inputs).unwrap();
    let pca = harness.view.pca_chart();
    assert_eq!(frame.comparison.spec.color, pca.color);
    assert!(Arc::ptr_eq(&frame.comparison.spec.color.values, &pca.color.values));
}

#[test]
fn controller_reports_missing_series_and_keeps_tooltip_in_sync() {
    let harness = Harness::new();
    let dataset = harness.view.dataset().clone();
    let nonexistent = model_index(&harness, "Nonexistent");
    let mut controller = DashboardController::new(dataset, 200.0).expect("controller");
    controller.apply_selection(SelectionEvent::ClickModel(nonexistent));
    assert_eq!(controller.ui.status.badge_label, "Warning");
    controller.set_hover(HoverSource::Comparison, hover_at(5, 12.0));
    assert_eq!(
        controller
            .frame()
            .tooltip
            .content()
            .and_then(|c| c.image_ref.as_deref()),
        Some("img5.png")
    );
    controller.set_hover(HoverSource::Comparison, None);
    assert!(!controller.frame().tooltip.is_visible());
}

#[test]
fn tooltip_image_resolves_next_to_the_record_table() {
    let temp = tempfile::tempdir().expect("create tempdir");
    fixtures::write_png(temp.path(), "img5.png");
    let image = image_cache::load_image("img5.png", temp.path()).expect("decode png");
    assert_eq!(image.size, [4, 4]);
}
