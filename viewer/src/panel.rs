use egui::{Context, DragValue, Grid, ScrollArea, SidePanel};
use wavedesc::{ProbeAttenuation, Trace, TraceDescriptor};

use crate::plot::format_si;

/// Label and value for each descriptor field shown in the side panel.
pub fn descriptor_rows(desc: &TraceDescriptor) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Instrument", desc.instrument_name.clone()),
        ("Source", desc.wave_source.to_string()),
        ("Label", desc.trace_label.clone()),
        ("Trigger time", desc.trigger_time.to_string()),
        ("Template", desc.template_name.clone()),
        (
            "Encoding",
            format!("{} byte samples", desc.sample_encoding.width()),
        ),
        (
            "Byte order",
            match desc.byte_order() {
                Some(order) if desc.byte_order_untested() => format!("{order:?} (untested)"),
                Some(order) => format!("{order:?}"),
                None => format!("unknown ({})", desc.comm_order),
            },
        ),
        ("Samples", desc.declared_sample_count.to_string()),
        ("Timebase", desc.time_base.label.to_string()),
        (
            "Sample interval",
            format_si(f64::from(desc.horizontal_interval), "s"),
        ),
        ("Horizontal offset", format_si(desc.horizontal_offset, "s")),
        ("Vertical gain", format!("{} V/count", desc.vertical_gain)),
        (
            "Vertical offset",
            format_si(f64::from(desc.vertical_offset), "V"),
        ),
        ("Coupling", desc.vertical_coupling.label().to_string()),
        (
            "Probe",
            match desc.probe_attenuation {
                ProbeAttenuation::Tabulated(x) => format!("{x}x"),
                ProbeAttenuation::Overridden(x) => format!("{x}x (custom)"),
            },
        ),
        (
            "Bandwidth limit",
            if desc.bandwidth_limit { "on" } else { "off" }.to_string(),
        ),
    ];
    if let Some(label) = desc.fixed_vertical_gain_label() {
        rows.push(("Fixed gain", label.to_string()));
    }
    if let Some(record_type) = desc.record_type() {
        rows.push(("Record type", format!("{record_type:?}")));
    }
    rows.push((
        "Processing",
        match desc.processing_done() {
            Some(processing) => format!("{processing:?}"),
            None => format!("unknown ({})", desc.processing_done),
        },
    ));
    rows.retain(|(_, value)| !value.is_empty());
    rows
}

pub fn show_descriptor_panel(ctx: &Context, trace: &Trace, threshold: &mut f64) {
    SidePanel::left("descriptor_panel")
        .resizable(true)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Descriptor");
            });

            ui.separator();

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    Grid::new("descriptor_grid")
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui| {
                            for (label, value) in descriptor_rows(&trace.descriptor) {
                                ui.label(label);
                                ui.label(value);
                                ui.end_row();
                            }
                        });

                    ui.separator();
                    ui.heading("Pulse");

                    let wave = &trace.waveform;
                    Grid::new("pulse_grid").num_columns(2).show(ui, |ui| {
                        ui.label("Threshold");
                        ui.add(DragValue::new(threshold).speed(0.005).suffix(" V"));
                        ui.end_row();

                        if let Some(min) = wave.min_voltage() {
                            ui.label("Minimum");
                            ui.label(format_si(min, "V"));
                            ui.end_row();
                        }
                        ui.label("First crossing");
                        ui.label(match wave.first_crossing_below(*threshold) {
                            Some(t) => format_si(t, "s"),
                            None => "none".to_string(),
                        });
                        ui.end_row();
                    });
                });
        });
}

#[cfg(test)]
mod test {
    use super::*;
    use wavedesc::{
        descriptor::offset,
        parse_descriptor,
        synth::Preamble,
    };

    fn rows(preamble: Preamble) -> Vec<(&'static str, String)> {
        let desc = parse_descriptor(&preamble.build(), Preamble::PREFIX.len()).unwrap();
        descriptor_rows(&desc)
    }

    fn value<'a>(rows: &'a [(&'static str, String)], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_descriptor_rows() {
        let rows = rows(Preamble::new());
        assert_eq!(value(&rows, "Instrument"), Some("LECROYWR"));
        assert_eq!(value(&rows, "Source"), Some("CHANNEL 1"));
        assert_eq!(value(&rows, "Timebase"), Some("10 ns/div"));
        assert_eq!(value(&rows, "Sample interval"), Some("1 ns"));
        assert_eq!(value(&rows, "Probe"), Some("1x"));
        assert_eq!(value(&rows, "Byte order"), Some("LoFirst"));
        // Blank trace label is left out.
        assert_eq!(value(&rows, "Label"), None);
    }

    #[test]
    fn test_unusual_fields_are_flagged() {
        let rows = rows(
            Preamble::new()
                .u16_at(offset::COMM_ORDER, 0)
                .f32_at(offset::PROBE_ATT, 123.5),
        );
        assert_eq!(value(&rows, "Byte order"), Some("HiFirst (untested)"));
        assert_eq!(value(&rows, "Probe"), Some("123.5x (custom)"));
    }

    #[test]
    fn test_processing_rows() {
        let peak = rows(
            Preamble::new()
                .u16_at(offset::RECORD_TYPE, 9)
                .u16_at(offset::PROCESSING_DONE, 4),
        );
        assert_eq!(value(&peak, "Record type"), Some("PeakDetect"));
        assert_eq!(value(&peak, "Processing"), Some("Autoscaled"));

        let odd = rows(Preamble::new().u16_at(offset::PROCESSING_DONE, 42));
        assert_eq!(value(&odd, "Processing"), Some("unknown (42)"));
    }
}
