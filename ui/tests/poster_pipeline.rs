//! Report poster from payload to exported PNG, the way the share modal drives
//! the pipeline.

use std::f64::consts::TAU;

use ui::poster::draw::{DrawCommand, Paint, TextAlign};
use ui::poster::export::derive_artifact;
use ui::poster::layout::{BAR_FILL, BAR_TRACK_WIDTH, RING_CENTER, RING_START_ANGLE};
use ui::poster::{Dimension, PosterContent, PosterPayload, RenderSurface, ReportPoster};

fn training_report() -> PosterPayload {
    serde_json::from_value(serde_json::json!({
        "type": "report",
        "title": "陌拜开场训练",
        "userNickname": "小林",
        "score": 82,
        "dimensions": [
            { "name": "开场", "score": 90 },
            { "name": "需求挖掘", "score": 75 }
        ],
        "description": "完成一次训练对话"
    }))
    .expect("payload json")
}

#[test]
fn payload_json_selects_report_variant() {
    let payload = training_report();
    let PosterContent::Report(report) = &payload.content else {
        panic!("expected report variant, got {:?}", payload.kind());
    };
    assert_eq!(report.score, 82);
    assert_eq!(
        report.dimensions,
        vec![
            Dimension { name: "开场".into(), score: 90 },
            Dimension { name: "需求挖掘".into(), score: 75 },
        ]
    );
}

#[test]
fn report_scenario_draw_calls() {
    let surface = RenderSurface::rendered(&training_report());
    let commands = surface.draw_list().commands();

    let arcs: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokeArc { arc, .. } => Some(*arc),
            _ => None,
        })
        .collect();
    assert_eq!(arcs.len(), 1);
    assert!((arcs[0].span() - 0.82 * TAU).abs() < 1e-9);
    assert_eq!(arcs[0].start_angle, RING_START_ANGLE);

    let fills: Vec<f64> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRoundRect { rect, paint, .. } if *paint == Paint::Solid(BAR_FILL) => {
                Some(rect.width)
            }
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 2);
    assert!((fills[0] - 0.90 * BAR_TRACK_WIDTH).abs() < 1e-9);
    assert!((fills[1] - 0.75 * BAR_TRACK_WIDTH).abs() < 1e-9);

    let (_, at, style) = surface
        .draw_list()
        .texts()
        .find(|(text, _, _)| *text == "82")
        .expect("score numeral drawn");
    assert_eq!(style.align, TextAlign::Center);
    assert_eq!(at.x, RING_CENTER.x);
}

#[test]
fn exported_report_is_png_data_url() {
    let surface = RenderSurface::rendered(&training_report());
    let artifact = derive_artifact(&surface).expect("artifact");

    assert_eq!(artifact.size(), surface.pixel_size());
    let url = artifact.data_url();
    assert!(url.starts_with("data:image/png"));
    assert!(url.len() > "data:image/png;base64,".len());
}

#[test]
fn scores_above_range_are_clamped_before_drawing() {
    let payload = PosterPayload::new(
        "复盘",
        "小林",
        PosterContent::Report(ReportPoster {
            score: 140,
            dimensions: vec![Dimension { name: "成交".into(), score: 300 }],
            description: String::new(),
        }),
    )
    .normalized();

    let surface = RenderSurface::rendered(&payload);
    let span = surface
        .draw_list()
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::StrokeArc { arc, .. } => Some(arc.span()),
            _ => None,
        })
        .expect("ring arc");
    assert!((span - TAU).abs() < 1e-9);
}
