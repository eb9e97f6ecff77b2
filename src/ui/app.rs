//! Main MediAssist application and eframe integration

use crate::audio::buffer::RecordingBuffer;
#[cfg(feature = "audio-io")]
use crate::audio::capture::AudioRecorder;
use crate::audio::resampler::resample_audio;
use crate::audio::wav::write_temp_wav;
use crate::integration::{OrchestratorHandle, SessionEvent};
use crate::session::health::HealthTracker;
use crate::speech::transcribe::RECOGNITION_SAMPLE_RATE;
use crate::speech::worker::TranscriptionEvent;
use crate::ui::components::{ChatPanel, HealthSidebar, InputAction, InputBar};
use crate::ui::state::{RecordingState, UiState};
use crate::ui::theme::Theme;
use crossbeam_channel::{Receiver, Sender};
use egui::{CentralPanel, RichText, SidePanel, TopBottomPanel};
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

const ABOUT_TEXT: &str = "MediAssist AI is an AI healthcare assistant for general health \
information.\n\nWhat it can do:\n\u{2022} Answer general wellness questions\n\u{2022} Explain \
medical terms\n\u{2022} Give healthy lifestyle tips\n\nLimitations:\n\u{2022} Cannot diagnose\n\
\u{2022} Cannot access personal data\n\u{2022} Not for emergencies";

/// Main MediAssist application
pub struct MediAssistApp {
    handle: OrchestratorHandle,
    state: UiState,
    tracker: HealthTracker,
    theme: Theme,
    show_about: bool,

    /// Microphone recorder, absent when no device is available
    #[cfg(feature = "audio-io")]
    audio_recorder: Option<AudioRecorder>,
    audio_tx: Sender<Vec<f32>>,
    audio_rx: Receiver<Vec<f32>>,
    recording_buffer: RecordingBuffer,
    capture_rate: u32,
    /// Keeps the transient WAV alive until its transcription finishes
    pending_recording: Option<NamedTempFile>,
}

impl MediAssistApp {
    /// Create the application
    pub fn new(cc: &eframe::CreationContext<'_>, handle: OrchestratorHandle) -> Self {
        let theme = Theme::light();
        theme.apply(&cc.egui_ctx);

        let (audio_tx, audio_rx) = crossbeam_channel::bounded(1024);

        #[cfg(feature = "audio-io")]
        let audio_recorder = match AudioRecorder::new() {
            Ok(recorder) => {
                info!(
                    "Recorder initialized: {}Hz, {} channel(s)",
                    recorder.sample_rate(),
                    recorder.channels()
                );
                Some(recorder)
            }
            Err(e) => {
                warn!("Failed to initialize recorder: {}", e);
                None
            }
        };

        #[cfg(feature = "audio-io")]
        let capture_rate = audio_recorder
            .as_ref()
            .map(|recorder| recorder.sample_rate())
            .unwrap_or(RECOGNITION_SAMPLE_RATE);

        #[cfg(not(feature = "audio-io"))]
        let capture_rate = RECOGNITION_SAMPLE_RATE;

        Self {
            handle,
            state: UiState::new(),
            tracker: HealthTracker::new(),
            theme,
            show_about: false,
            #[cfg(feature = "audio-io")]
            audio_recorder,
            audio_tx,
            audio_rx,
            recording_buffer: RecordingBuffer::for_sample_rate(capture_rate),
            capture_rate,
            pending_recording: None,
        }
    }

    /// Drain captured audio chunks into the recording buffer
    fn process_audio(&mut self) {
        while let Ok(samples) = self.audio_rx.try_recv() {
            self.recording_buffer.write(&samples);
        }
    }

    /// Submit a query to the session worker
    fn submit_query(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }

        self.state.is_generating = true;
        self.state.status = None;

        if let Err(e) = self.handle.process_query(text) {
            error!("Failed to submit query: {}", e);
            self.state.is_generating = false;
            self.state.status = Some(e.user_message());
        }
    }

    fn start_recording(&mut self) {
        if !self.state.recording_state.is_idle() {
            return;
        }

        self.recording_buffer.clear();
        self.state.last_transcription = None;

        #[cfg(feature = "audio-io")]
        {
            let recorder = match self.audio_recorder.as_mut() {
                Some(recorder) => recorder,
                None => {
                    self.state.status = Some("No microphone available.".to_string());
                    return;
                }
            };

            match recorder.start(self.audio_tx.clone()) {
                Ok(()) => {
                    self.state.recording_state = RecordingState::Recording;
                    self.state.status = None;
                }
                Err(e) => {
                    error!("Failed to start recording: {}", e);
                    self.state.status = Some(e.user_message());
                }
            }
        }

        #[cfg(not(feature = "audio-io"))]
        {
            self.state.status = Some("Voice input is not available in this build.".to_string());
        }
    }

    fn stop_recording(&mut self) {
        if !self.state.recording_state.is_recording() {
            return;
        }

        #[cfg(feature = "audio-io")]
        if let Some(recorder) = self.audio_recorder.as_mut() {
            if let Err(e) = recorder.stop() {
                error!("Failed to stop recording: {}", e);
            }
        }

        // Pick up any chunks still in flight from the capture callback
        self.process_audio();

        let samples = self.recording_buffer.drain();
        if samples.is_empty() {
            self.state.recording_state = RecordingState::Idle;
            self.state.status = Some("No audio recorded.".to_string());
            return;
        }

        info!(
            "Recording stopped: {:.2}s of audio",
            samples.len() as f32 / self.capture_rate as f32
        );

        let result = resample_audio(&samples, self.capture_rate, RECOGNITION_SAMPLE_RATE)
            .and_then(|resampled| write_temp_wav(&resampled, RECOGNITION_SAMPLE_RATE));

        match result {
            Ok(file) => {
                let path = file.path().to_path_buf();
                self.pending_recording = Some(file);

                if let Err(e) = self.handle.transcribe(path) {
                    error!("Failed to request transcription: {}", e);
                    self.pending_recording = None;
                    self.state.recording_state = RecordingState::Idle;
                    self.state.status = Some(e.user_message());
                } else {
                    self.state.recording_state = RecordingState::Processing;
                }
            }
            Err(e) => {
                error!("Failed to encode recording: {}", e);
                self.state.recording_state = RecordingState::Idle;
                self.state.status = Some(e.user_message());
            }
        }
    }

    /// Process pending events from both workers
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Some(event) = self.handle.try_recv_session_event() {
            match event {
                SessionEvent::GenerationStarted => {
                    self.state.is_generating = true;
                }
                SessionEvent::AssistantTurn { .. } => {
                    self.state.is_generating = false;

                    if let Some(turn) = self.handle.session().last_turn() {
                        let now = ctx.input(|input| input.time);
                        self.state.typing.start(&turn, now);
                    }
                }
                SessionEvent::SessionCleared => {
                    self.state.is_generating = false;
                    self.state.typing.reset();
                    self.state.last_transcription = None;
                    self.state.status = None;
                }
                SessionEvent::Error(e) => {
                    error!("Session worker error: {}", e);
                    self.state.is_generating = false;
                    self.state.status = Some(e);
                }
                SessionEvent::Shutdown => {
                    info!("Session worker shut down");
                }
            }
        }

        while let Some(event) = self.handle.try_recv_transcription_event() {
            match event {
                TranscriptionEvent::Result(outcome) => {
                    self.state.recording_state = RecordingState::Idle;
                    // Transcription is done with the transient WAV
                    self.pending_recording = None;

                    self.state.last_transcription =
                        Some(outcome.user_message().to_string());

                    // Failure sentinels are shown, never submitted
                    if let Some(text) = outcome.recognized_text() {
                        self.submit_query(text.to_string());
                    }
                }
                TranscriptionEvent::Shutdown => {
                    info!("Transcription worker shut down");
                }
            }
        }

        // Advance the typing reveal
        let now = ctx.input(|input| input.time);
        self.state.typing.tick(now);
        if self.state.typing.is_active() {
            ctx.request_repaint();
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("\u{1f3e5}").size(28.0));

            ui.vertical(|ui| {
                ui.label(
                    RichText::new("MediAssist AI")
                        .size(22.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.label(
                    RichText::new("Your personal healthcare assistant")
                        .size(12.0)
                        .color(self.theme.text_muted),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear chat").clicked() {
                    if let Err(e) = self.handle.clear_session() {
                        error!("Failed to clear session: {}", e);
                    }
                }

                if ui.button("About").clicked() {
                    self.show_about = !self.show_about;
                }
            });
        });
    }
}

impl eframe::App for MediAssistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_audio();
        self.poll_events(ctx);

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_header(ui);
            ui.add_space(6.0);
        });

        SidePanel::right("health_sidebar")
            .default_width(260.0)
            .show(ctx, |ui| {
                HealthSidebar::new(&mut self.tracker, &mut self.state, &self.theme).show(ui);
            });

        TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            ui.add_space(6.0);

            if let Some(ref status) = self.state.status {
                ui.label(
                    RichText::new(status)
                        .size(12.0)
                        .color(self.theme.warning),
                );
            }

            if self.state.recording_state.is_recording() {
                ui.label(
                    RichText::new("Recording... Speak now!")
                        .size(12.0)
                        .color(self.theme.recording),
                );
            }

            let action = InputBar::new(&mut self.state, &self.theme).show(ui);
            ui.add_space(6.0);

            match action {
                Some(InputAction::Submit(text)) => self.submit_query(text),
                Some(InputAction::StartRecording) => self.start_recording(),
                Some(InputAction::StopRecording) => self.stop_recording(),
                None => {}
            }
        });

        CentralPanel::default().show(ctx, |ui| {
            let turns = self.handle.session().turns();
            let clicked = ChatPanel::new(&turns, &self.state, &self.theme).show(ui);

            if let Some(suggestion) = clicked {
                if self.state.can_submit() {
                    self.submit_query(suggestion);
                }
            }
        });

        if self.show_about {
            egui::Window::new("About MediAssist AI")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(RichText::new(ABOUT_TEXT).size(13.0));
                });
        }
    }
}
