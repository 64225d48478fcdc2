use std::ops::Range;

use eframe::{emath::RectTransform, epaint};
use egui::{
    pos2, Align2, Color32, FontFamily, FontId, Frame, Pos2, Rect, Response, Sense, Stroke, Ui,
};
use wavedesc::Waveform;

const TIMELINE_HEIGHT: f32 = 30.0;
const VOLTAGE_AXIS_WIDTH: f32 = 60.0;

pub fn show_trace_plot(ui: &mut Ui, wave: &Waveform, threshold: f64) -> Response {
    let wave_colour = if ui.visuals().dark_mode {
        Color32::from_additive_luminance(196)
    } else {
        Color32::from_black_alpha(240)
    };
    let threshold_colour = Color32::from_rgb(220, 80, 60);

    Frame::canvas(ui.style())
        .show(ui, |ui| {
            let desired_size = ui.available_size();
            let (id, rect) = ui.allocate_space(desired_size);

            let response = ui.interact(rect, id, Sense::hover());

            ui.set_clip_rect(rect);

            let Some((start, end)) = wave.time_span() else {
                return response;
            };
            let timespan = widen(start..end);
            let voltages = widen(voltage_range(wave, threshold));

            let mut plot_rect = rect;
            plot_rect.set_top(rect.top() + TIMELINE_HEIGHT);
            plot_rect.set_left(rect.left() + VOLTAGE_AXIS_WIDTH);

            draw_timeline(ui, timespan.clone(), plot_rect.left()..plot_rect.right(), rect);
            draw_voltage_axis(ui, voltages.clone(), rect, plot_rect);

            // Times are drawn relative to the start so that f32 keeps enough
            // precision for nanosecond sample intervals behind a large offset.
            let to_screen = RectTransform::from_to(
                Rect::from_x_y_ranges(
                    0.0..=(timespan.end - timespan.start) as f32,
                    voltages.end as f32..=voltages.start as f32,
                ),
                plot_rect,
            );
            let point = |t: f64, v: f64| to_screen * pos2((t - timespan.start) as f32, v as f32);

            let mut shapes = vec![];

            shapes.push(epaint::Shape::line_segment(
                [
                    point(timespan.start, threshold),
                    point(timespan.end, threshold),
                ],
                Stroke::new(1.0, threshold_colour),
            ));
            if let Some(crossing) = wave.first_crossing_below(threshold) {
                shapes.push(epaint::Shape::line_segment(
                    [
                        point(crossing, voltages.start),
                        point(crossing, voltages.end),
                    ],
                    Stroke::new(1.0, threshold_colour),
                ));
            }

            let points: Vec<Pos2> = decimate(wave, plot_rect.width().max(1.0) as usize)
                .into_iter()
                .map(|(t, v)| point(t, v))
                .collect();
            shapes.push(epaint::Shape::line(points, Stroke::new(1.0, wave_colour)));

            ui.painter().extend(shapes);

            response
        })
        .inner
}

/// Voltage range covering the trace and the threshold line.
fn voltage_range(wave: &Waveform, threshold: f64) -> Range<f64> {
    let lo = wave.min_voltage().unwrap_or(threshold).min(threshold);
    let hi = wave.max_voltage().unwrap_or(threshold).max(threshold);
    lo..hi
}

/// Add a 5% margin, or a unit either side for an empty range.
fn widen(range: Range<f64>) -> Range<f64> {
    let span = range.end - range.start;
    if span > 0.0 {
        range.start - span * 0.05..range.end + span * 0.05
    } else {
        range.start - 1.0..range.end + 1.0
    }
}

/// Reduce a long trace to the minimum and maximum of each of `columns`
/// chunks (kept in sample order) so the drawn line has at most two points
/// per pixel. Short traces are returned unchanged.
pub fn decimate(wave: &Waveform, columns: usize) -> Vec<(f64, f64)> {
    let len = wave.len();
    if columns == 0 || len <= columns * 2 {
        return wave.iter().collect();
    }

    let time = &wave.time.raw;
    let voltage = &wave.voltage.raw;

    let mut points = Vec::with_capacity(columns * 2);
    for column in 0..columns {
        let chunk = column * len / columns..(column + 1) * len / columns;
        let (mut lo, mut hi) = (chunk.start, chunk.start);
        for i in chunk {
            if voltage[i] < voltage[lo] {
                lo = i;
            }
            if voltage[i] > voltage[hi] {
                hi = i;
            }
        }
        let (first, second) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        points.push((time[first], voltage[first]));
        if second != first {
            points.push((time[second], voltage[second]));
        }
    }
    points
}

/// Grid spacing of 1, 2 or 5 times a power of ten, close to `pixels_per_step`
/// apart when `span` covers `pixels`.
pub fn grid_step(span: f64, pixels: f32, pixels_per_step: f64) -> f64 {
    let target = span * pixels_per_step / pixels as f64;
    if !(target > 0.0 && target.is_finite()) {
        return 1.0;
    }
    let log_step = target.log10();
    let log_step_floor = log_step.floor();
    let fact = match 10.0f64.powf(log_step - log_step_floor) {
        x if x < 2.0 => 1.0,
        x if x < 5.0 => 2.0,
        _ => 5.0,
    };
    10.0f64.powf(log_step_floor) * fact
}

/// `value` with an SI prefix, e.g. `-150 mV` or `20 ns`.
pub fn format_si(value: f64, unit: &str) -> String {
    const PREFIXES: [(f64, &str); 8] = [
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "k"),
        (1.0, ""),
        (1e-3, "m"),
        (1e-6, "µ"),
        (1e-9, "n"),
        (1e-12, "p"),
    ];

    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return format!("{value} {unit}");
    }
    let (scale, prefix) = PREFIXES
        .iter()
        .find(|(scale, _)| magnitude >= scale * (1.0 - 1e-6))
        .unwrap_or(&PREFIXES[PREFIXES.len() - 1]);

    let number = format!("{:.3}", value / scale);
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{number} {prefix}{unit}")
}

/// Most grid lines an axis will draw.
const MAX_TICKS: usize = 1000;

/// Multiples of `step` inside `range`. Empty when the step is too small to
/// move between neighbouring floats at this magnitude, or would need more
/// than `MAX_TICKS` lines.
pub fn ticks(range: Range<f64>, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && range.start.is_finite() && range.end.is_finite()) {
        return vec![];
    }
    let ulp = |x: f64| {
        let x = x.abs();
        f64::from_bits(x.to_bits() + 1) - x
    };
    if step < ulp(range.start).max(ulp(range.end)) {
        return vec![];
    }

    let first = (range.start / step).ceil();
    let last = (range.end / step).floor();
    if !(last >= first) || last - first >= MAX_TICKS as f64 {
        return vec![];
    }
    let count = (last - first) as usize;
    (0..=count).map(|k| (first + k as f64) * step).collect()
}

fn axis_colours(ui: &Ui) -> (Color32, Color32) {
    if ui.visuals().dark_mode {
        (
            Color32::from_additive_luminance(196),
            Color32::from_additive_luminance(64),
        )
    } else {
        (Color32::from_black_alpha(240), Color32::from_black_alpha(64))
    }
}

const AXIS_FONT: FontId = FontId {
    size: 10.0,
    family: FontFamily::Proportional,
};

/// Time labels along the top of `space` with a vertical grid line under each
/// one. `x_range` is the screen span the time range maps to.
fn draw_timeline(ui: &mut Ui, time_range: Range<f64>, x_range: Range<f32>, space: Rect) {
    let (text, line) = axis_colours(ui);

    let time_span = time_range.end - time_range.start;
    let width = x_range.end - x_range.start;
    let step = grid_step(time_span, width, 100.0);

    for t in ticks(time_range.clone(), step) {
        let fraction = (t - time_range.start) / time_span;
        let x = x_range.start + width * fraction as f32;
        ui.painter().text(
            Pos2 {
                x,
                y: space.top() + 20.0,
            },
            Align2::CENTER_BOTTOM,
            format_si(t, "s"),
            AXIS_FONT,
            text,
        );

        ui.painter().line_segment(
            [
                Pos2 {
                    x,
                    y: space.top() + TIMELINE_HEIGHT,
                },
                Pos2 {
                    x,
                    y: space.bottom(),
                },
            ],
            Stroke::new(1.0, line),
        );
    }
}

/// Voltage labels down the left of `space` with a horizontal grid line across
/// `plot` for each.
fn draw_voltage_axis(ui: &mut Ui, voltage_range: Range<f64>, space: Rect, plot: Rect) {
    let (text, line) = axis_colours(ui);

    let span = voltage_range.end - voltage_range.start;
    let step = grid_step(span, plot.height(), 50.0);

    for v in ticks(voltage_range.clone(), step) {
        let fraction = (voltage_range.end - v) / span;
        let y = plot.top() + plot.height() * fraction as f32;
        ui.painter().text(
            Pos2 {
                x: space.left() + VOLTAGE_AXIS_WIDTH - 4.0,
                y,
            },
            Align2::RIGHT_CENTER,
            format_si(v, "V"),
            AXIS_FONT,
            text,
        );

        ui.painter().line_segment(
            [Pos2 { x: plot.left(), y }, Pos2 { x: plot.right(), y }],
            Stroke::new(1.0, line),
        );
    }
}
