use serde::{Deserialize, Serialize};

use super::names::{AxisName, ModelName, TargetName};

const MODEL_PLACEHOLDER: &str = "{model}";
const TARGET_PLACEHOLDER: &str = "{target}";

/// Models, targets and x-axis attributes offered by the dashboard controls.
///
/// Order matters: the model order is the order series are drawn in, and the
/// first target and axis are the initial selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default = "default_models")]
    pub models: Vec<ModelName>,
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetName>,
    #[serde(default = "default_x_axes")]
    pub x_axes: Vec<AxisName>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            models: default_models(),
            targets: default_targets(),
            x_axes: default_x_axes(),
        }
    }
}

impl Roster {
    pub fn model_index(&self, model: &ModelName) -> Option<usize> {
        self.models.iter().position(|candidate| candidate == model)
    }
}

fn default_models() -> Vec<ModelName> {
    [
        "average",
        "SchNet",
        "DimeNet",
        "DimeNetPlusPlus",
        "PaiNN",
        "Equiformer",
        "SphereNet",
    ]
    .into_iter()
    .map(ModelName::from)
    .collect()
}

fn default_targets() -> Vec<TargetName> {
    ["IP", "ES1", "fosc1"].into_iter().map(TargetName::from).collect()
}

fn default_x_axes() -> Vec<AxisName> {
    ["CT", "MW", "Similarity_Score", "Cluster"]
        .into_iter()
        .map(AxisName::from)
        .collect()
}

/// Names of the fixed columns the dashboard reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    #[serde(default = "default_pca_x")]
    pub pca_x: String,
    #[serde(default = "default_pca_y")]
    pub pca_y: String,
    #[serde(default = "default_cluster")]
    pub cluster: String,
    #[serde(default = "default_image")]
    pub image: String,
    /// Pattern for error columns; `{model}` and `{target}` are substituted.
    #[serde(default = "default_error_template")]
    pub error_template: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            pca_x: default_pca_x(),
            pca_y: default_pca_y(),
            cluster: default_cluster(),
            image: default_image(),
            error_template: default_error_template(),
        }
    }
}

impl ColumnLayout {
    /// Column holding the error of `model` on `target`.
    pub fn error_column(&self, model: &ModelName, target: &TargetName) -> String {
        self.error_template
            .replace(MODEL_PLACEHOLDER, model.as_str())
            .replace(TARGET_PLACEHOLDER, target.as_str())
    }

    pub fn template_is_valid(&self) -> bool {
        self.error_template.contains(MODEL_PLACEHOLDER)
            && self.error_template.contains(TARGET_PLACEHOLDER)
    }
}

fn default_pca_x() -> String {
    "pca1".into()
}

fn default_pca_y() -> String {
    "pca2".into()
}

fn default_cluster() -> String {
    "Cluster".into()
}

fn default_image() -> String {
    "images_url".into()
}

fn default_error_template() -> String {
    "mean_diff_{model}_{target}_weighted".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_column_substitutes_model_and_target() {
        let layout = ColumnLayout::default();
        assert_eq!(
            layout.error_column(&ModelName::from("SchNet"), &TargetName::from("IP")),
            "mean_diff_SchNet_IP_weighted"
        );
    }

    #[test]
    fn template_without_target_placeholder_is_invalid() {
        let layout = ColumnLayout {
            error_template: "err_{model}".into(),
            ..ColumnLayout::default()
        };
        assert!(!layout.template_is_valid());
        assert!(ColumnLayout::default().template_is_valid());
    }

    #[test]
    fn default_roster_matches_dashboard_controls() {
        let roster = Roster::default();
        assert_eq!(roster.models.len(), 7);
        assert_eq!(roster.models[0].as_str(), "average");
        assert_eq!(roster.targets[0].as_str(), "IP");
        assert_eq!(roster.x_axes[0].as_str(), "CT");
        assert_eq!(roster.model_index(&ModelName::from("PaiNN")), Some(4));
        assert_eq!(roster.model_index(&ModelName::from("Nonexistent")), None);
    }
}
