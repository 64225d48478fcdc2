use eframe::egui;

use egui::{menu, CentralPanel, ProgressBar, TopBottomPanel};
use wavedesc::{waveform::DEFAULT_THRESHOLD, Trace};

use loader::{pair_from_args, TraceLoader, TracePair};
use panel::show_descriptor_panel;
use plot::show_trace_plot;

mod loader;
mod panel;
mod plot;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Trace viewer",
        native_options,
        Box::new(|cc| Box::new(MainApp::new(cc))),
    );
}

#[derive(Default)]
enum TraceState {
    #[default]
    None,
    Loaded(Trace),
    Error(anyhow::Error),
    Loading(TraceLoader),
}

struct MainApp {
    // The trace (or in-progress loading of it).
    trace: TraceState,
    // Set when a pair was passed on the command line; loaded on the first
    // frame because loading needs the egui context.
    pending_load: Option<TracePair>,
    // Level for the first crossing marker, in volts.
    threshold: f64,
}

impl MainApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self {
            trace: TraceState::None,
            pending_load: pair_from_args(&args),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    fn load(&mut self, pair: TracePair, ctx: &egui::Context, frame: &mut eframe::Frame) {
        frame.set_window_title(&format!("Trace viewer - {pair}"));

        let ctx2 = ctx.clone();
        let update = Box::new(move || {
            ctx2.request_repaint();
        });
        self.trace = TraceState::Loading(TraceLoader::new(pair, update));
    }
}

/// Ask for the preamble and then the data file.
fn pick_pair() -> Option<TracePair> {
    let preamble = rfd::FileDialog::new()
        .set_title("Open preamble")
        .pick_file()?;
    let mut data_dialog = rfd::FileDialog::new().set_title("Open waveform data");
    if let Some(dir) = preamble.parent() {
        data_dialog = data_dialog.set_directory(dir);
    }
    let data = data_dialog.pick_file()?;
    Some(TracePair { preamble, data })
}

impl eframe::App for MainApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if let Some(pair) = self.pending_load.take() {
            self.load(pair, ctx, frame);
        }

        // Check if loading has completed.
        if let TraceState::Loading(loader) = &mut self.trace {
            if loader.progress() >= 100 {
                self.trace = match loader.take() {
                    Some(Ok(trace)) => TraceState::Loaded(trace),
                    Some(Err(e)) => TraceState::Error(e),
                    None => TraceState::None,
                };
            }
        }

        TopBottomPanel::top("menu").show(ctx, |ui| {
            menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        ui.close_menu();
                        if let Some(pair) = pick_pair() {
                            self.load(pair, ctx, frame);
                        }
                    }
                });
            });
        });

        match &self.trace {
            TraceState::None => {
                CentralPanel::default().show(ctx, |ui| {
                    ui.heading("No trace loaded");
                    ui.label("Use File > Open to pick a preamble and its waveform data.");
                });
            }
            TraceState::Loaded(trace) => {
                show_descriptor_panel(ctx, trace, &mut self.threshold);
                CentralPanel::default().show(ctx, |ui| {
                    show_trace_plot(ui, &trace.waveform, self.threshold);
                });
            }
            TraceState::Error(e) => {
                CentralPanel::default().show(ctx, |ui| {
                    ui.label(format!("Error loading trace: {e:?}"));
                });
            }
            TraceState::Loading(loader) => {
                let progress = loader.progress() as f32 / 100.0;
                CentralPanel::default().show(ctx, |ui| {
                    ui.label("Loading...");
                    ui.add(ProgressBar::new(progress).show_percentage());
                });
            }
        }
    }
}
