use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use fragview::dataset::Roster;

pub const ROWS: usize = 8;
/// Models with error columns in the fixture table.
pub const MODELS: [&str; 3] = ["average", "SchNet", "PaiNN"];
pub const TARGETS: [&str; 3] = ["IP", "ES1", "fosc1"];

/// Mean error of `model` for `target` at `row` in the fixture table.
pub fn error_value(model_index: usize, target_index: usize, row: usize) -> f64 {
    (model_index * 100 + target_index * 10 + row) as f64 / 10.0
}

pub fn ct_value(row: usize) -> f64 {
    row as f64 * 0.5
}

pub fn mw_value(row: usize) -> f64 {
    120.0 + row as f64 * 7.0
}

/// Write an `interactive_results.csv`-shaped table with `ROWS` rows.
///
/// Row `i` references `img{i}.png`; row 3 has a blank image cell.
pub fn write_results_csv(dir: &Path) -> PathBuf {
    let mut header = vec![
        "pca1".to_string(),
        "pca2".to_string(),
        "Cluster".to_string(),
        "images_url".to_string(),
        "CT".to_string(),
        "MW".to_string(),
        "Similarity_Score".to_string(),
    ];
    for model in MODELS {
        for target in TARGETS {
            header.push(format!("mean_diff_{model}_{target}_weighted"));
        }
    }
    let mut text = header.join(",");
    text.push('\n');
    for row in 0..ROWS {
        let image = if row == 3 {
            String::new()
        } else {
            format!("img{row}.png")
        };
        write!(
            text,
            "{},{},{},{},{},{},{}",
            row as f64 * 0.25,
            -(row as f64) * 0.5,
            row % 3,
            image,
            ct_value(row),
            mw_value(row),
            1.0 - row as f64 / 10.0
        )
        .unwrap();
        for model_index in 0..MODELS.len() {
            for target_index in 0..TARGETS.len() {
                write!(text, ",{}", error_value(model_index, target_index, row)).unwrap();
            }
        }
        text.push('\n');
    }
    let path = dir.join("interactive_results.csv");
    std::fs::write(&path, text).unwrap();
    path
}

/// Roster over the fixture columns plus one model without columns.
pub fn roster_with_missing_model() -> Roster {
    Roster {
        models: vec![
            "average".into(),
            "SchNet".into(),
            "Nonexistent".into(),
            "PaiNN".into(),
        ],
        targets: TARGETS.iter().map(|t| (*t).into()).collect(),
        x_axes: vec!["CT".into(), "MW".into(), "Similarity_Score".into(), "Cluster".into()],
    }
}

/// Write a 4x4 PNG named `name` into `dir`.
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 40, 40, 255]));
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}
