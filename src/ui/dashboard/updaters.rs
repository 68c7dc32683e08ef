//! Dashboard state update logic
//!
//! Folds background outcomes and queued events into the dashboard state

use super::input::settings_index;
use super::state::{DashboardState, Mode, Outcome, Prompt, PromptKind};
use crate::config::ConfigField;
use crate::error::WarroomError;
use crate::events::{Event, Source};
use crate::network::ApiResponse;
use crate::status::Service;

impl DashboardState {
    /// Advance the animation tick and move queued events into the activity log.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    fn log_reply(&mut self, source: Source, action: &str, response: &ApiResponse) {
        if response.ok {
            self.add_event(Event::success(
                source,
                format!("{}: HTTP {}", action, response.status),
            ));
        } else {
            let error = WarroomError::Remote {
                status: response.status,
                body: response.body_text(),
            };
            self.add_event(Event::error(source, action, &error));
        }
    }

    /// Apply one outcome. Outcomes are applied in arrival order; the last one wins.
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Outcome::Status(status) => {
                let source = match status.service {
                    Service::Gateway => Source::Gateway,
                    Service::Relay => Source::Relay,
                };
                self.add_event(Event::refresh(source, status.to_string()));
                match status.service {
                    Service::Gateway => self.gateway_status = status,
                    Service::Relay => self.relay_status = status,
                }
            }
            Outcome::Guild(Ok(snapshot)) => {
                let channels = snapshot.tree().channel_count();
                let name = snapshot.guild_name().to_string();
                self.app.replace_snapshot(snapshot);
                self.clamp_cursors();
                self.add_event(Event::refresh(
                    Source::Relay,
                    format!("Loaded {} ({} channels)", name, channels),
                ));
            }
            Outcome::Guild(Err(e)) => {
                if matches!(e, WarroomError::Config(_)) && self.mode == Mode::Normal {
                    self.mode = Mode::Settings(settings_index(ConfigField::RelayUrl));
                }
                self.add_event(Event::error(Source::Relay, "Failed to load guild state", &e));
            }
            Outcome::Action(Ok(dispatched)) => {
                let description = dispatched.description.clone();
                let (response, reload_error) = self.app.apply(dispatched);
                self.log_reply(Source::Relay, &description, &response);
                self.last_response = Some(response.to_pretty_string());
                if let Some(e) = reload_error {
                    self.add_event(Event::error(Source::Relay, "Failed to load guild state", &e));
                }
                self.clamp_cursors();
            }
            Outcome::Action(Err(e)) => {
                self.add_event(Event::error(Source::Relay, "Request failed", &e));
            }
            Outcome::Modules(Ok(modules)) => {
                self.modules = modules;
                self.clamp_cursors();
            }
            Outcome::Modules(Err(e)) => {
                self.add_event(Event::error(Source::Gateway, "Failed to list modules", &e));
            }
            Outcome::ModuleUpdate { action, result } => match result {
                Ok(update) => {
                    self.log_reply(Source::Gateway, &action, &update.response);
                    self.modules = update.modules;
                    self.clamp_cursors();
                }
                Err(e) => self.add_event(Event::error(Source::Gateway, &action, &e)),
            },
            Outcome::ModuleConfig { name, result } => match result {
                Ok(text) => {
                    // The prompt is a single line; compact the pretty text.
                    let input = serde_json::from_str::<serde_json::Value>(&text)
                        .map(|v| v.to_string())
                        .unwrap_or(text);
                    self.mode = Mode::Prompt(
                        Prompt::new(
                            PromptKind::ModuleConfig {
                                module: name.clone(),
                            },
                            format!("{} config", name),
                        )
                        .with_input(input),
                    );
                }
                Err(e) => self.add_event(Event::error(
                    Source::Gateway,
                    &format!("Failed to load {} config", name),
                    &e,
                )),
            },
            Outcome::ModuleSaved { name, result } => match result {
                Ok(response) => {
                    self.log_reply(Source::Gateway, &format!("Save {} config", name), &response)
                }
                Err(e) => self.add_event(Event::error(
                    Source::Gateway,
                    &format!("Save {} config", name),
                    &e,
                )),
            },
            Outcome::SettingsSaved(Ok(())) => {
                self.add_event(Event::success(Source::Dashboard, "Settings saved"));
            }
            Outcome::SettingsSaved(Err(e)) => {
                self.add_event(Event::error(Source::Dashboard, "Failed to save settings", &e));
            }
            Outcome::SettingsCleared(Ok(())) => {
                self.add_event(Event::success(Source::Dashboard, "Settings cleared"));
            }
            Outcome::SettingsCleared(Err(e)) => {
                self.add_event(Event::error(Source::Dashboard, "Failed to clear settings", &e));
            }
        }
    }
}
