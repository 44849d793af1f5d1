//! Poster layout: a fixed sequence of draw calls per payload variant.
//!
//! Everything here is pure. Positions are in logical points on a
//! [`POSTER_WIDTH`] × [`POSTER_HEIGHT`] surface; the backends apply the device
//! pixel ratio.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::draw::{stop, Arc, Canvas, Color, ColorStop, FontWeight, Paint, Point, Rect, Stroke, TextStyle};
use super::fonts;
use super::payload::{
    AchievementPoster, InvitePoster, PosterContent, PosterPayload, ReportPoster, MAX_SCORE,
};

pub const POSTER_WIDTH: f64 = 375.0;
pub const POSTER_HEIGHT: f64 = 667.0;
const CENTER_X: f64 = POSTER_WIDTH / 2.0;
const CONTENT_LEFT: f64 = 40.0;
const CONTENT_WIDTH: f64 = POSTER_WIDTH - CONTENT_LEFT * 2.0;

pub const BRAND_NAME: &str = "Pitchcraft";

const BACKGROUND_STOPS: [ColorStop; 3] = [
    stop(0.0, Color::hex(0x6366f1)),
    stop(0.55, Color::hex(0x8b5cf6)),
    stop(1.0, Color::hex(0xec4899)),
];

/// Ring gauge geometry (report).
pub const RING_CENTER: Point = Point::new(CENTER_X, 205.0);
pub const RING_RADIUS: f64 = 68.0;
const RING_WIDTH: f64 = 12.0;
/// 12 o'clock.
pub const RING_START_ANGLE: f64 = -FRAC_PI_2;
const RING_STOPS: [ColorStop; 2] = [stop(0.0, Color::hex(0xfde68a)), stop(1.0, Color::hex(0xf59e0b))];

/// Dimension rows (report).
pub const MAX_DIMENSIONS: usize = 4;
const DIM_TOP: f64 = 318.0;
const DIM_ROW_HEIGHT: f64 = 46.0;
pub const BAR_TRACK_WIDTH: f64 = CONTENT_WIDTH;
pub const BAR_HEIGHT: f64 = 8.0;
const BAR_RADIUS: f64 = 4.0;
const BAR_OFFSET: f64 = 10.0;
pub const BAR_FILL: Color = Color::WHITE.with_alpha(0.92);
const BAR_TRACK: Color = Color::WHITE.with_alpha(0.2);

/// Achievement badge.
pub const BADGE_CENTER: Point = Point::new(CENTER_X, 225.0);
const BADGE_RADIUS: f64 = 78.0;

/// Invite code box.
pub const CODE_BOX: Rect = Rect::new(CENTER_X - 100.0, 466.0, 200.0, 58.0);
const CODE_BOX_RADIUS: f64 = 14.0;

/// Icons of the fixed invite feature rows, paired with `PosterLabels::invite_features`.
pub const INVITE_FEATURE_ICONS: [&str; 4] = ["🎯", "🤖", "📊", "🏆"];

/// Square standing in for a QR code in the footer.
pub const QR_PLACEHOLDER: Rect = Rect::new(POSTER_WIDTH - CONTENT_LEFT - 64.0, 572.0, 64.0, 64.0);
/// Body text keeps this much air above the footer.
const FOOTER_GAP: f64 = 8.0;
const PARAGRAPH_MAX_LINES: usize = 3;

/// Fixed copy printed on posters, resolved from the active locale.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterLabels {
    pub overall_score: String,
    pub achievement_unlocked: String,
    pub invite_headline: String,
    pub invite_tagline: String,
    pub invite_features: [String; 4],
    pub invite_code: String,
    pub footer_cta: String,
    pub qr_caption: String,
}

impl PosterLabels {
    pub fn localized() -> Self {
        Self {
            overall_score: crate::t!("poster-overall-score"),
            achievement_unlocked: crate::t!("poster-achievement-unlocked"),
            invite_headline: crate::t!("poster-invite-headline"),
            invite_tagline: crate::t!("poster-invite-tagline"),
            invite_features: [
                crate::t!("poster-feature-scenarios"),
                crate::t!("poster-feature-coach"),
                crate::t!("poster-feature-assessment"),
                crate::t!("poster-feature-badges"),
            ],
            invite_code: crate::t!("poster-invite-code"),
            footer_cta: crate::t!("poster-footer-cta"),
            qr_caption: crate::t!("poster-qr-caption"),
        }
    }
}

/// Paint `payload` onto `canvas`. The payload is expected to be validated
/// (see [`PosterPayload::normalized`]).
pub fn render<C: Canvas + ?Sized>(payload: &PosterPayload, canvas: &mut C) {
    render_with(payload, &PosterLabels::localized(), canvas);
}

/// [`render`] with explicit copy.
pub fn render_with<C: Canvas + ?Sized>(
    payload: &PosterPayload,
    labels: &PosterLabels,
    canvas: &mut C,
) {
    draw_background(canvas);
    draw_decorations(canvas);
    draw_header(canvas, &payload.title);

    match &payload.content {
        PosterContent::Report(report) => layout_report(canvas, labels, report),
        PosterContent::Achievement(achievement) => layout_achievement(canvas, labels, achievement),
        PosterContent::Invite(invite) => layout_invite(canvas, labels, invite),
    }

    draw_footer(canvas, labels, &payload.user_nickname);
}

/// Angular span of the ring gauge for `score`.
pub fn ring_span(score: u32) -> f64 {
    fraction(score) * TAU
}

/// Filled width of a dimension bar for `score`.
pub fn bar_fill_width(score: u32) -> f64 {
    fraction(score) * BAR_TRACK_WIDTH
}

fn fraction(score: u32) -> f64 {
    f64::from(score.min(MAX_SCORE)) / f64::from(MAX_SCORE)
}

fn white(alpha: f64) -> Color {
    Color::WHITE.with_alpha(alpha)
}

fn draw_background<C: Canvas + ?Sized>(canvas: &mut C) {
    let paint = Paint::linear(
        Point::new(0.0, 0.0),
        Point::new(0.0, POSTER_HEIGHT),
        &BACKGROUND_STOPS,
    );
    canvas.fill_rect(Rect::new(0.0, 0.0, POSTER_WIDTH, POSTER_HEIGHT), &paint);
}

fn draw_decorations<C: Canvas + ?Sized>(canvas: &mut C) {
    canvas.fill_circle(
        Point::new(POSTER_WIDTH - 40.0, 90.0),
        130.0,
        &white(0.08).into(),
    );
    canvas.fill_circle(
        Point::new(30.0, POSTER_HEIGHT - 110.0),
        160.0,
        &white(0.06).into(),
    );
}

fn draw_header<C: Canvas + ?Sized>(canvas: &mut C, title: &str) {
    canvas.fill_text(
        BRAND_NAME,
        Point::new(CENTER_X, 58.0),
        &TextStyle::new(22.0, Color::WHITE).bold().centered(),
    );
    canvas.fill_text(
        title,
        Point::new(CENTER_X, 84.0),
        &TextStyle::new(15.0, white(0.85)).centered(),
    );
}

fn layout_report<C: Canvas + ?Sized>(canvas: &mut C, labels: &PosterLabels, report: &ReportPoster) {
    canvas.stroke_circle(RING_CENTER, RING_RADIUS, &Stroke::new(white(0.18), RING_WIDTH));

    let ring_paint = Paint::linear(
        Point::new(RING_CENTER.x - RING_RADIUS, RING_CENTER.y),
        Point::new(RING_CENTER.x + RING_RADIUS, RING_CENTER.y),
        &RING_STOPS,
    );
    canvas.stroke_arc(
        Arc {
            center: RING_CENTER,
            radius: RING_RADIUS,
            start_angle: RING_START_ANGLE,
            end_angle: RING_START_ANGLE + ring_span(report.score),
        },
        &Stroke::new(ring_paint, RING_WIDTH).round(),
    );

    canvas.fill_text(
        &report.score.to_string(),
        Point::new(RING_CENTER.x, RING_CENTER.y + 15.0),
        &TextStyle::new(44.0, Color::WHITE).bold().centered(),
    );
    canvas.fill_text(
        &labels.overall_score,
        Point::new(RING_CENTER.x, RING_CENTER.y + 38.0),
        &TextStyle::new(13.0, white(0.8)).centered(),
    );

    let rows = report.dimensions.iter().take(MAX_DIMENSIONS);
    let mut y = DIM_TOP;
    for dimension in rows {
        canvas.fill_text(
            &dimension.name,
            Point::new(CONTENT_LEFT, y),
            &TextStyle::new(14.0, Color::WHITE).semibold(),
        );
        canvas.fill_text(
            &dimension.score.to_string(),
            Point::new(CONTENT_LEFT + BAR_TRACK_WIDTH, y),
            &TextStyle::new(14.0, Color::WHITE).semibold().right(),
        );

        let bar_y = y + BAR_OFFSET;
        canvas.fill_round_rect(
            Rect::new(CONTENT_LEFT, bar_y, BAR_TRACK_WIDTH, BAR_HEIGHT),
            BAR_RADIUS,
            &BAR_TRACK.into(),
        );
        canvas.fill_round_rect(
            Rect::new(CONTENT_LEFT, bar_y, bar_fill_width(dimension.score), BAR_HEIGHT),
            BAR_RADIUS,
            &BAR_FILL.into(),
        );
        y += DIM_ROW_HEIGHT;
    }

    draw_paragraph(canvas, &report.description, y + 24.0, 14.0);
}

fn layout_achievement<C: Canvas + ?Sized>(
    canvas: &mut C,
    labels: &PosterLabels,
    achievement: &AchievementPoster,
) {
    let glow = Paint::radial(
        BADGE_CENTER,
        0.0,
        BADGE_RADIUS,
        &[stop(0.0, white(0.45)), stop(1.0, white(0.05))],
    );
    canvas.fill_circle(BADGE_CENTER, BADGE_RADIUS, &glow);
    canvas.stroke_circle(BADGE_CENTER, BADGE_RADIUS, &Stroke::new(white(0.35), 2.0));

    canvas.fill_text(
        &achievement.achievement_icon,
        Point::new(BADGE_CENTER.x, BADGE_CENTER.y + 22.0),
        &TextStyle::new(64.0, Color::WHITE).centered(),
    );
    canvas.fill_text(
        &labels.achievement_unlocked,
        Point::new(CENTER_X, 330.0),
        &TextStyle::new(14.0, white(0.8)).centered(),
    );
    canvas.fill_text(
        &achievement.achievement_name,
        Point::new(CENTER_X, 364.0),
        &TextStyle::new(26.0, Color::WHITE).bold().centered(),
    );

    draw_paragraph(canvas, &achievement.description, 400.0, 15.0);
}

fn layout_invite<C: Canvas + ?Sized>(canvas: &mut C, labels: &PosterLabels, invite: &InvitePoster) {
    canvas.fill_text(
        &labels.invite_headline,
        Point::new(CENTER_X, 170.0),
        &TextStyle::new(26.0, Color::WHITE).bold().centered(),
    );
    canvas.fill_text(
        &labels.invite_tagline,
        Point::new(CENTER_X, 204.0),
        &TextStyle::new(15.0, white(0.85)).centered(),
    );

    let mut y = 258.0;
    for (icon, label) in INVITE_FEATURE_ICONS.iter().zip(&labels.invite_features) {
        canvas.fill_text(icon, Point::new(80.0, y), &TextStyle::new(20.0, Color::WHITE));
        canvas.fill_text(label, Point::new(116.0, y), &TextStyle::new(16.0, Color::WHITE));
        y += 46.0;
    }

    if invite.invite_code.is_empty() {
        return;
    }

    canvas.fill_text(
        &labels.invite_code,
        Point::new(CENTER_X, CODE_BOX.y - 14.0),
        &TextStyle::new(13.0, white(0.8)).centered(),
    );
    canvas.stroke_round_rect(CODE_BOX, CODE_BOX_RADIUS, &Stroke::new(white(0.85), 2.0));
    canvas.fill_text(
        &invite.invite_code,
        Point::new(CENTER_X, CODE_BOX.y + 39.0),
        &TextStyle::new(28.0, Color::WHITE).bold().centered(),
    );
}

fn draw_footer<C: Canvas + ?Sized>(canvas: &mut C, labels: &PosterLabels, nickname: &str) {
    let nickname = nickname.trim();
    let who = if nickname.is_empty() { BRAND_NAME } else { nickname };
    canvas.fill_text(
        &attribution(who),
        Point::new(CONTENT_LEFT, 600.0),
        &TextStyle::new(13.0, white(0.9)).semibold(),
    );
    canvas.fill_text(
        &labels.footer_cta,
        Point::new(CONTENT_LEFT, 622.0),
        &TextStyle::new(11.0, white(0.7)),
    );

    canvas.stroke_rect(QR_PLACEHOLDER, &Stroke::new(white(0.7), 1.5));
    canvas.fill_text(
        &labels.qr_caption,
        Point::new(
            QR_PLACEHOLDER.x + QR_PLACEHOLDER.width / 2.0,
            QR_PLACEHOLDER.y + QR_PLACEHOLDER.height + 16.0,
        ),
        &TextStyle::new(10.0, white(0.7)).centered(),
    );
}

/// Footer attribution line.
pub fn attribution(nickname: &str) -> String {
    crate::t!("poster-attribution", name = nickname)
}

/// Wrapped, centered body text. Lines that would reach the footer are dropped
/// and the last kept line is ellipsized.
fn draw_paragraph<C: Canvas + ?Sized>(canvas: &mut C, text: &str, top: f64, size: f64) {
    let metrics = fonts::fonts().metrics(FontWeight::Regular, size);
    let bottom = QR_PLACEHOLDER.y - FOOTER_GAP - metrics.desc;
    let first_baseline = top + metrics.asc;
    if text.trim().is_empty() || first_baseline > bottom {
        return;
    }
    let fitting = 1 + ((bottom - first_baseline) / metrics.line_h).floor() as usize;
    let max_lines = fitting.min(PARAGRAPH_MAX_LINES);

    let style = TextStyle::new(size, white(0.85)).centered();
    let lines = fonts::wrap_text(text, CONTENT_WIDTH, FontWeight::Regular, size, max_lines);
    for (index, line) in lines.iter().enumerate() {
        let baseline = top + metrics.asc + metrics.line_h * index as f64;
        canvas.fill_text(line, Point::new(CENTER_X, baseline), &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::draw::{DrawCommand, DrawList};
    use crate::poster::payload::Dimension;

    fn report(score: u32, dimensions: &[(&str, u32)]) -> PosterPayload {
        PosterPayload::new(
            "训练报告",
            "小林",
            PosterContent::Report(ReportPoster {
                score,
                dimensions: dimensions
                    .iter()
                    .map(|(name, score)| Dimension {
                        name: name.to_string(),
                        score: *score,
                    })
                    .collect(),
                description: "完成一次训练对话".into(),
            }),
        )
    }

    fn invite(code: &str) -> PosterPayload {
        PosterPayload::new(
            "邀请好友",
            "小林",
            PosterContent::Invite(InvitePoster {
                invite_code: code.into(),
            }),
        )
    }

    fn draw(payload: &PosterPayload) -> DrawList {
        let mut list = DrawList::new();
        render(payload, &mut list);
        list
    }

    fn arcs(list: &DrawList) -> Vec<Arc> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeArc { arc, .. } => Some(*arc),
                _ => None,
            })
            .collect()
    }

    fn bar_fills(list: &DrawList) -> Vec<Rect> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRoundRect { rect, paint, .. }
                    if *paint == Paint::Solid(BAR_FILL) =>
                {
                    Some(*rect)
                }
                _ => None,
            })
            .collect()
    }

    fn code_box_calls(list: &DrawList) -> usize {
        list.commands()
            .iter()
            .filter(|c| match c {
                DrawCommand::StrokeRoundRect { rect, .. } => *rect == CODE_BOX,
                DrawCommand::FillText { at, .. } => CODE_BOX.contains(*at),
                _ => false,
            })
            .count()
    }

    #[test]
    fn ring_span_tracks_score() {
        for score in 0..=MAX_SCORE {
            let list = draw(&report(score, &[]));
            let arcs = arcs(&list);
            assert_eq!(arcs.len(), 1);
            let arc = arcs[0];
            assert_eq!(arc.start_angle, RING_START_ANGLE);
            let expected = f64::from(score) / 100.0 * TAU;
            assert!((arc.span() - expected).abs() < 1e-12, "score {score}");
        }
    }

    #[test]
    fn ring_extremes_need_no_special_case() {
        assert_eq!(arcs(&draw(&report(0, &[])))[0].span(), 0.0);
        assert!((arcs(&draw(&report(100, &[])))[0].span() - TAU).abs() < 1e-12);
    }

    #[test]
    fn at_most_four_dimension_rows() {
        let six = [
            ("开场", 90),
            ("需求挖掘", 75),
            ("产品介绍", 60),
            ("异议处理", 55),
            ("促成", 40),
            ("跟进", 30),
        ];
        let list = draw(&report(70, &six));
        assert_eq!(bar_fills(&list).len(), MAX_DIMENSIONS);
        assert!(list.texts().all(|(text, _, _)| text != "促成" && text != "跟进"));
    }

    #[test]
    fn empty_dimensions_still_draw_ring() {
        let list = draw(&report(50, &[]));
        assert_eq!(arcs(&list).len(), 1);
        assert!(bar_fills(&list).is_empty());
    }

    #[test]
    fn empty_invite_code_draws_no_box() {
        let list = draw(&invite(""));
        assert_eq!(code_box_calls(&list), 0);
        let labels = PosterLabels::localized();
        assert!(list.texts().all(|(text, _, _)| text != labels.invite_code));
    }

    #[test]
    fn invite_code_drawn_once_inside_box() {
        let list = draw(&invite("AB12CD"));
        let code_texts: Vec<_> = list.texts().filter(|(text, _, _)| *text == "AB12CD").collect();
        assert_eq!(code_texts.len(), 1);
        assert!(CODE_BOX.contains(code_texts[0].1));

        let outlines = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRoundRect { rect, .. } if *rect == CODE_BOX))
            .count();
        assert_eq!(outlines, 1);
    }

    #[test]
    fn invite_features_are_fixed() {
        let labels = PosterLabels::localized();
        let list = draw(&invite(""));
        for (icon, label) in INVITE_FEATURE_ICONS.iter().zip(&labels.invite_features) {
            assert!(list.texts().any(|(text, _, _)| text == *icon));
            assert!(list.texts().any(|(text, _, _)| text == label.as_str()));
        }
    }

    #[test]
    fn copy_comes_from_labels() {
        let labels = PosterLabels {
            overall_score: "Overall".into(),
            ..PosterLabels::localized()
        };
        let mut list = DrawList::new();
        render_with(&report(60, &[]), &labels, &mut list);
        assert!(list.texts().any(|(t, _, _)| t == "Overall"));
    }

    #[test]
    fn long_description_stays_clear_of_footer() {
        let four = [
            ("开场", 90),
            ("需求挖掘", 75),
            ("产品介绍", 60),
            ("异议处理", 55),
        ];
        let mut payload = report(70, &four);
        if let PosterContent::Report(body) = &mut payload.content {
            body.description = "完成一次训练对话".repeat(10);
        }
        let list = draw(&payload);
        let paragraph: Vec<_> = list
            .texts()
            .filter(|(_, at, _)| at.x == CENTER_X && at.y > DIM_TOP)
            .collect();
        assert!(!paragraph.is_empty());
        assert!(paragraph.len() < PARAGRAPH_MAX_LINES);
        assert!(paragraph.iter().all(|(_, at, _)| at.y < QR_PLACEHOLDER.y));
    }

    #[test]
    fn short_report_keeps_three_description_lines() {
        let mut payload = report(70, &[("开场", 90)]);
        if let PosterContent::Report(body) = &mut payload.content {
            body.description = "完成一次训练对话".repeat(10);
        }
        let list = draw(&payload);
        let lines = list
            .texts()
            .filter(|(_, at, _)| at.x == CENTER_X && at.y > DIM_TOP)
            .count();
        assert_eq!(lines, PARAGRAPH_MAX_LINES);
    }

    #[test]
    fn achievement_draws_badge_icon_and_name() {
        let payload = PosterPayload::new(
            "成就",
            "小林",
            PosterContent::Achievement(AchievementPoster {
                achievement_name: "破冰达人".into(),
                achievement_icon: "🧊".into(),
                description: "连续 7 天完成开场练习".into(),
            }),
        );
        let list = draw(&payload);

        let badge = list.commands().iter().any(|c| {
            matches!(c, DrawCommand::FillCircle { center, paint: Paint::Radial(_), .. } if *center == BADGE_CENTER)
        });
        assert!(badge);

        let (_, icon_at, icon_style) = list.texts().find(|(t, _, _)| *t == "🧊").unwrap();
        assert_eq!(icon_at.x, BADGE_CENTER.x);
        assert_eq!(icon_style.align, crate::poster::draw::TextAlign::Center);
        assert!(list.texts().any(|(t, _, _)| t == "破冰达人"));
        assert!(arcs(&list).is_empty());
    }

    #[test]
    fn rendering_is_deterministic() {
        let payload = report(82, &[("开场", 90), ("需求挖掘", 75)]);
        assert_eq!(draw(&payload), draw(&payload));
    }

    #[test]
    fn footer_attribution_and_qr_placeholder() {
        let list = draw(&invite(""));
        assert!(list.texts().any(|(t, _, _)| t == attribution("小林")));
        assert!(list
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeRect { rect, .. } if *rect == QR_PLACEHOLDER)));

        let anonymous = PosterPayload::new("t", "  ", PosterContent::Invite(InvitePoster { invite_code: String::new() }));
        assert!(draw(&anonymous).texts().any(|(t, _, _)| t == attribution(BRAND_NAME)));
    }

    #[test]
    fn background_is_three_stop_vertical_gradient() {
        let list = draw(&invite(""));
        match &list.commands()[0] {
            DrawCommand::FillRect { rect, paint: Paint::Linear(gradient) } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, POSTER_WIDTH, POSTER_HEIGHT));
                assert_eq!(gradient.stops.len(), 3);
                assert_eq!(gradient.start.x, gradient.end.x);
            }
            other => panic!("unexpected first command {other:?}"),
        }
    }
}
