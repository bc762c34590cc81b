// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex, mpsc},
    time::Duration,
};

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::{
    collect::{CancelFlag, RunOutcome},
    config::{
        options::ExportFormat,
        state::AppState,
    },
    record::PostRecord,
    store::{DiskStore, Store},
};

use super::actions;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Post Vault",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // vault contents shown in the table
    pub records: Vec<PostRecord>,

    // status/progress (the worker writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub cancel: CancelFlag,
    pub outcome_rx: Option<mpsc::Receiver<RunOutcome>>,
}

impl App {
    pub fn new(mut state: AppState) -> Self {
        state.gui.snapshot_dir_text =
            state.options.collect.snapshot_dir.to_string_lossy().into_owned();
        let out_path_text = state.options.export.out_path().to_string_lossy().into_owned();

        let mut status = s!("Idle");
        let records = match DiskStore::default().load() {
            Ok(c) => {
                if !c.is_empty() {
                    status = format!("Loaded vault ({} posts)", c.len());
                    logf!("Init: vault has {} posts", c.len());
                }
                c.posts
            }
            Err(e) => {
                loge!("Init: vault load failed: {e}");
                status = format!("Vault load failed: {e}");
                Vec::new()
            }
        };

        Self {
            state,
            out_path_text,
            out_path_dirty: false,
            records,
            status: Arc::new(Mutex::new(status)),
            running: false,
            cancel: CancelFlag::new(),
            outcome_rx: None,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap() = msg.into();
    }

    pub fn reload_vault(&mut self) {
        match DiskStore::default().load() {
            Ok(c) => self.records = c.posts,
            Err(e) => {
                loge!("Vault reload failed: {e}");
                self.status(format!("Vault reload failed: {e}"));
            }
        }
    }

    fn poll_worker(&mut self) {
        let Some(rx) = &self.outcome_rx else { return };
        if let Ok(outcome) = rx.try_recv() {
            logf!(
                "Run finished: {} ({} rounds, {} posts)",
                outcome.status, outcome.rounds, outcome.total_persisted
            );
            self.running = false;
            self.outcome_rx = None;
            self.reload_vault();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Snapshots:");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.state.gui.snapshot_dir_text)
                    .desired_width(280.0),
            );
            if resp.changed() {
                self.state.options.collect.snapshot_dir =
                    self.state.gui.snapshot_dir_text.trim().into();
            }

            if self.running {
                if ui.button("Stop").clicked() {
                    actions::stop(self);
                }
                ui.spinner();
            } else if ui.button("Collect").clicked() {
                actions::start(self);
            }
        });
    }

    fn export_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Export:");

            let fmt = &mut self.state.options.export.format;
            egui::ComboBox::from_id_salt("export_format")
                .selected_text(match fmt {
                    ExportFormat::Json => "JSON",
                    ExportFormat::Csv => "CSV",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(fmt, ExportFormat::Json, "JSON");
                    ui.selectable_value(fmt, ExportFormat::Csv, "CSV");
                });

            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.out_path_text).desired_width(240.0),
            );
            if resp.changed() {
                self.out_path_dirty = true;
            }

            let has_data = !self.records.is_empty();
            if ui.add_enabled(has_data, egui::Button::new("Export")).clicked() {
                actions::export(self);
            }
            let ctx = ui.ctx().clone();
            if ui.add_enabled(has_data, egui::Button::new("Copy")).clicked() {
                actions::copy(self, &ctx);
            }
            if ui
                .add_enabled(has_data && !self.running, egui::Button::new("Clear vault"))
                .clicked()
            {
                actions::clear(self);
            }
        });
    }

    fn results_table(&mut self, ui: &mut egui::Ui) {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::initial(160.0)) // author
            .column(Column::initial(100.0)) // posted
            .column(Column::remainder())    // text
            .column(Column::initial(70.0))  // reactions
            .column(Column::initial(90.0))  // comments
            .header(20.0, |mut header| {
                for title in ["Author", "Posted", "Text", "Reactions", "Comments"] {
                    header.col(|ui| { ui.strong(title); });
                }
            })
            .body(|body| {
                body.rows(18.0, self.records.len(), |mut row| {
                    let rec = &self.records[row.index()];
                    let author = rec.author_name.as_deref().unwrap_or("—");
                    let author = if rec.is_company_post {
                        format!("{author} (company)")
                    } else {
                        s!(author)
                    };
                    row.col(|ui| { ui.label(author); });
                    row.col(|ui| { ui.label(rec.posted_time.as_deref().unwrap_or("")); });
                    row.col(|ui| {
                        ui.label(truncate(rec.post_text.as_deref().unwrap_or(""), 120));
                    });
                    row.col(|ui| { ui.label(rec.reactions.as_deref().unwrap_or("")); });
                    row.col(|ui| { ui.label(rec.comments.as_deref().unwrap_or("")); });
                });
            });
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s!(s);
    }
    let cut: String = s.chars().take(max_chars).collect();
    join!(cut, "…")
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        if self.running {
            // keep polling the worker while it runs
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.controls(ui);
            ui.add_space(2.0);
            self.export_bar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let status = self.status.lock().unwrap().clone();
            ui.horizontal(|ui| {
                ui.label(status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} posts", self.records.len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.results_table(ui);
        });
    }
}
