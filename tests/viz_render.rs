use fancy_barchart::assemble::{DrawCommand, LabelAnchor, RecordingBackend};
use fancy_barchart::shade::Style;
use fancy_barchart::viz::legend::legend_items;
use fancy_barchart::viz::{self, RenderOptions};
use fancy_barchart::{ChartOptions, Dataset, draw, instructions};
use std::fs;
use tempfile::tempdir;

fn sample() -> Dataset {
    Dataset::new()
        .with_values("group 1", "bar 1", "cat 1", [2.0, 3.0, 1.0])
        .with_values("group 1", "bar 1", "cat 2", [1.0, 2.0])
        .with_values("group 1", "bar 2", "cat 1", [4.0, 1.0, 2.0])
        .with_values("group 2", "bar 2", "cat 2", [3.0])
}

#[test]
fn svg_and_png_are_written() {
    let dir = tempdir().unwrap();
    let data = sample();

    let svg = dir.path().join("chart.svg");
    let plan = viz::render_chart(&data, &svg, 800, 400, &ChartOptions::default()).unwrap();
    let text = fs::read_to_string(&svg).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("<rect"));
    assert_eq!(plan.layout.segment_count(), 9);

    let png = dir.path().join("chart.png");
    viz::render_chart(&data, &png, 400, 300, &ChartOptions::default()).unwrap();
    assert!(fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn render_without_extras() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.svg");
    let opts = ChartOptions {
        legend: false,
        ..ChartOptions::default()
    };
    let render = RenderOptions {
        hatch_overlay: false,
        axis: false,
    };
    viz::render_chart_with(&sample(), &path, 600, 300, &opts, render).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn empty_dataset_renders_an_empty_canvas() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.svg");
    let plan = viz::render_chart(&Dataset::new(), &path, 300, 200, &ChartOptions::default()).unwrap();
    assert_eq!(plan.layout.segment_count(), 0);
    assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
}

#[test]
fn invalid_data_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.svg");
    let data = Dataset::new().with_values("g", "b", "c", [-1.0]);
    assert!(viz::render_chart(&data, &path, 300, 200, &ChartOptions::default()).is_err());
    assert!(!path.exists());
}

#[test]
fn instructions_come_group_by_group() {
    let cmds = instructions(&sample(), &ChartOptions::default()).unwrap();
    let labels: Vec<&str> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            DrawCommand::Rect { .. } => None,
        })
        .collect();
    // group 2 has no "bar 1" but still labels its slot.
    assert_eq!(
        labels,
        vec!["bar 1", "bar 2", "group 1", "bar 2", "bar 1", "group 2"]
    );
    let first_rect = cmds.iter().position(|c| matches!(c, DrawCommand::Rect { .. }));
    assert_eq!(first_rect, Some(0));
}

#[test]
fn recording_backend_sees_the_same_sequence() {
    let mut rec = RecordingBackend::new();
    draw(&sample(), &ChartOptions::default(), &mut rec).unwrap();
    let again = instructions(&sample(), &ChartOptions::default()).unwrap();
    assert_eq!(rec.commands, again);

    let (x, _, text, anchor) = rec.labels().next().unwrap();
    assert_eq!((x, text, anchor), (9.0, "bar 1", LabelAnchor::BarEnd));
}

#[test]
fn instructions_serialize_with_kind_tags() {
    let cmds = instructions(&sample(), &ChartOptions::default()).unwrap();
    let v = serde_json::to_value(&cmds).unwrap();
    assert_eq!(v[0]["kind"], "rect");
    assert_eq!(v[0]["fill"], "#1F77B4");
    assert_eq!(v[0]["hatch"], "forward");
}

#[test]
fn legend_lists_drawn_categories_and_styles_only() {
    let opts: ChartOptions = serde_json::from_value(serde_json::json!({
        "styles": ["hatch"],
        "style_overrides": [{"name": "ghost bar", "style": "gradient"}],
        "color_overrides": [
            {"name": "cat 9", "primary": "black", "secondary": "white"},
            {"name": "ghost", "primary": "red", "secondary": "white"}
        ]
    }))
    .unwrap();
    let data = Dataset::new()
        .with_values("g", "b", "cat 1", [1.0])
        .with_values("g", "b", "cat 9", [2.0]);
    let plan = fancy_barchart::plan(&data, &opts).unwrap();

    let labels: Vec<String> = legend_items(&data, &plan.colors)
        .into_iter()
        .map(|i| i.label)
        .collect();
    assert_eq!(labels, vec!["cat 1", "cat 9"]);
    assert_eq!(plan.layout.styles_drawn(), vec![Style::Hatch]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("legend.svg");
    viz::render_chart(&data, &path, 500, 300, &opts).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
