use super::audio_state::AudioState;
use egui::{widgets::Slider, Color32, CornerRadius, Frame, RichText, Ui};
use egui_phosphor::regular;
use std::time::Duration;

/// Audio player controls component
pub struct AudioControls;

impl AudioControls {
    /// Render the audio controls UI
    pub fn render(ui: &mut Ui, state: &mut AudioState) {
        // Keep the timer moving while something plays or downloads
        if state.is_playing || state.is_loading {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }

        let has_audio = state.current_source.is_some();

        Frame::new()
            .inner_margin(8.0)
            .fill(ui.visuals().window_fill)
            .corner_radius(CornerRadius::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    // Play/pause button with phosphor icons
                    let (play_icon, play_color) = if state.is_playing {
                        (regular::PAUSE_CIRCLE, Color32::from_rgb(255, 200, 100))
                    } else {
                        (regular::PLAY_CIRCLE, Color32::from_rgb(100, 255, 150))
                    };
                    let play_color = if has_audio {
                        play_color
                    } else {
                        Color32::from_gray(150)
                    };

                    let play_text = RichText::new(play_icon).size(24.0).color(play_color);
                    if ui.add(egui::Button::new(play_text)).clicked() && has_audio {
                        state.toggle_play();
                    }

                    let can_stop = has_audio && (state.is_playing || state.current_position > 0.0);
                    let stop_color = if can_stop {
                        Color32::from_rgb(255, 100, 100)
                    } else {
                        Color32::from_gray(150)
                    };
                    let stop_text = RichText::new(regular::STOP_CIRCLE).size(24.0).color(stop_color);
                    if ui.add(egui::Button::new(stop_text)).clicked() && can_stop {
                        state.stop();
                    }

                    ui.add_space(8.0);

                    match &state.current_source {
                        Some(source) => {
                            ui.label(
                                RichText::new(&source.label)
                                    .color(ui.visuals().strong_text_color())
                                    .size(16.0),
                            )
                            .on_hover_text(source.url.as_str());
                            if state.is_loading {
                                ui.spinner();
                            }
                        }
                        None => {
                            ui.label(
                                RichText::new("Pick a recording to play")
                                    .color(ui.visuals().weak_text_color()),
                            );
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut volume = state.volume * 100.0;
                        let slider = ui.add(
                            Slider::new(&mut volume, 0.0..=100.0)
                                .show_value(false)
                                .text(""),
                        );
                        if slider.changed() {
                            state.set_volume(volume / 100.0);
                        }

                        let volume_icon = if state.volume <= 0.0 {
                            regular::SPEAKER_NONE
                        } else if state.volume < 0.5 {
                            regular::SPEAKER_LOW
                        } else {
                            regular::SPEAKER_HIGH
                        };
                        ui.label(RichText::new(volume_icon).size(16.0));

                        ui.add_space(8.0);
                        ui.label(RichText::new(state.format_duration()).monospace());

                        let mut progress = state.progress();
                        let seek = ui
                            .scope(|ui| {
                                ui.spacing_mut().slider_width = (ui.available_width() - 60.0).max(40.0);
                                ui.add_enabled(
                                    has_audio && state.total_duration > 0.0,
                                    Slider::new(&mut progress, 0.0..=1.0)
                                        .show_value(false)
                                        .text(""),
                                )
                            })
                            .inner;
                        if seek.drag_stopped() {
                            state.set_position(progress * state.total_duration);
                        }

                        ui.label(RichText::new(state.format_position()).monospace());
                    });
                });
            });
    }
}
