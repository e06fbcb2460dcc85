//! Chattr desktop window: egui/eframe application.
//!
//! # Architecture
//!
//! [`ChattrApp`] is the top-level [`eframe::App`].  It owns the
//! [`ChatSession`] and two channel endpoints:
//!
//! * `submit_tx`: sends a [`Submission`] to the [`SubmissionRunner`].
//! * `event_rx` : receives [`SessionEvent`]s back from the runner.
//!
//! # Layout
//!
//! | Region | Content |
//! |--------|---------|
//! | Top    | Mode toggle, "Translate to" language, persona (conversation only) |
//! | Centre | Message list; translations under replies in conversation mode, typing indicator |
//! | Bottom | Error label, text input, Submit button |
//!
//! [`SubmissionRunner`]: crate::session::SubmissionRunner

use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::{ClientSettings, Mode};
use crate::languages::TargetLanguage;
use crate::persona::{find_persona, PRESET_PERSONAS};
use crate::session::{ChatSession, Message, SessionEvent, Submission, GENERIC_ERROR};

const OUTGOING_FILL: egui::Color32 = egui::Color32::from_rgb(52, 94, 168);
const INCOMING_FILL: egui::Color32 = egui::Color32::from_rgb(58, 58, 62);
const TRANSLATION_TEXT: egui::Color32 = egui::Color32::from_rgb(170, 170, 170);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 136, 68);

pub struct ChattrApp {
    session: ChatSession,
    input: String,
    submit_tx: mpsc::Sender<Submission>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// Where selection changes are written back to.
    settings_path: PathBuf,
    /// Typing-indicator animation phase.
    dots_phase: f32,
}

impl ChattrApp {
    pub fn new(
        settings: ClientSettings,
        settings_path: PathBuf,
        submit_tx: mpsc::Sender<Submission>,
        event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Self {
        Self {
            session: ChatSession::new(settings),
            input: String::new(),
            submit_tx,
            event_rx,
            settings_path,
            dots_phase: 0.0,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.session.apply(event);
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    fn submit(&mut self) {
        let Some(submission) = self.session.begin_submit(&self.input) else {
            return;
        };
        self.input.clear();

        if let Err(e) = self.submit_tx.try_send(submission) {
            log::error!("submission runner unavailable: {e}");
            self.session
                .apply(SessionEvent::Failed(GENERIC_ERROR.to_string()));
            self.session.apply(SessionEvent::Loading(false));
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.session.settings().save_to(&self.settings_path) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_top_bar(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.session.is_loading();
        let settings = self.session.settings().clone();
        let mut changed = false;

        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label("Mode:");
                for mode in [Mode::Translation, Mode::Conversation] {
                    if ui
                        .selectable_label(settings.mode == mode, mode.label())
                        .clicked()
                    {
                        changed |= self.session.set_mode(mode);
                    }
                }

                ui.separator();

                ui.label("Translate to:");
                let mut target = settings.target_language;
                egui::ComboBox::from_id_salt("target-language")
                    .selected_text(language_label(target))
                    .show_ui(ui, |ui| {
                        for lang in TargetLanguage::all() {
                            ui.selectable_value(&mut target, lang, language_label(lang));
                        }
                    });
                changed |= self.session.set_target_language(target);

                ui.separator();

                ui.add_enabled_ui(settings.mode == Mode::Conversation, |ui| {
                    ui.label("Character:");
                    let selected = find_persona(&settings.character_id)
                        .map(|p| p.name)
                        .unwrap_or("Unknown");
                    let mut character_id = settings.character_id.clone();
                    egui::ComboBox::from_id_salt("character")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for persona in PRESET_PERSONAS {
                                let label = match persona.icon {
                                    Some(icon) => format!("{icon} {}", persona.name),
                                    None => persona.name.to_string(),
                                };
                                ui.selectable_value(&mut character_id, persona.id.to_string(), label)
                                    .on_hover_text(persona.description);
                            }
                        });
                    changed |= self.session.set_character(&character_id);
                });
            });
        });

        if changed {
            self.persist_settings();
        }
    }

    fn draw_messages(&self, ui: &mut egui::Ui) {
        let conversation = self.session.settings().mode == Mode::Conversation;

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in self.session.messages() {
                    draw_message(ui, message, conversation);
                    ui.add_space(6.0);
                }

                if conversation && self.session.is_loading() {
                    let dots = ".".repeat(1 + (self.dots_phase as usize) % 3);
                    ui.label(
                        egui::RichText::new(format!("AI is typing{dots}"))
                            .color(TRANSLATION_TEXT)
                            .italics(),
                    );
                }
            });
    }

    fn draw_input(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = self.session.error() {
            ui.label(egui::RichText::new(error).color(ERROR_TEXT));
        }

        let enabled = !self.session.is_loading();
        let mut submit = false;

        ui.horizontal(|ui| {
            let input_width = ui.available_width() - 80.0;
            let response = ui.add_enabled(
                enabled,
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("Type here")
                    .desired_width(input_width),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
                response.request_focus();
            }

            if ui
                .add_enabled(enabled, egui::Button::new("Submit"))
                .clicked()
            {
                submit = true;
            }
        });

        if submit {
            self.submit();
        }
    }
}

fn language_label(lang: TargetLanguage) -> String {
    format!("{} ({})", lang.name(), lang.native_name())
}

fn draw_message(ui: &mut egui::Ui, message: &Message, show_translation: bool) {
    let (layout, fill) = if message.incoming {
        (egui::Layout::left_to_right(egui::Align::TOP), INCOMING_FILL)
    } else {
        (egui::Layout::right_to_left(egui::Align::TOP), OUTGOING_FILL)
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&message.content).color(egui::Color32::WHITE));

                    if show_translation {
                        if let Some(translation) = &message.translation {
                            ui.separator();
                            ui.label(
                                egui::RichText::new(translation)
                                    .color(TRANSLATION_TEXT)
                                    .size(12.0),
                            );
                        }
                    }

                    if message.timestamp > 2 {
                        ui.label(
                            egui::RichText::new(message.time_label())
                                .color(TRANSLATION_TEXT)
                                .size(9.0),
                        );
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for ChattrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        if self.session.is_loading() {
            self.dots_phase += 0.05;
            if self.dots_phase >= 3.0 {
                self.dots_phase = 0.0;
            }
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let panel_frame = egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(8));

        egui::TopBottomPanel::top("selectors")
            .frame(panel_frame)
            .show(ctx, |ui| self.draw_top_bar(ui));

        egui::TopBottomPanel::bottom("input")
            .frame(panel_frame)
            .show(ctx, |ui| self.draw_input(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_messages(ui));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.persist_settings();
        log::info!("Chattr window closing");
    }
}
