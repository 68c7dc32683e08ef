//! Main application state and UI loop
//!
//! Contains the App struct, the UI event loop and the background task launcher

use crate::config::Config;
use crate::consts::cli_consts::OUTCOME_QUEUE_SIZE;
use crate::dispatcher;
use crate::modules;
use crate::session::SessionData;
use crate::state::load_snapshot;
use crate::status::{check_gateway, check_relay};
use crate::ui::dashboard::{DashboardState, Intent, Outcome, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Guild tree, module panel and activity log.
    Dashboard(Box<DashboardState>),
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Configuration and clients.
    session: SessionData,

    ui_config: UIConfig,

    /// Background tasks report here; the UI loop drains it every frame.
    outcome_sender: mpsc::Sender<Outcome>,
    outcome_receiver: mpsc::Receiver<Outcome>,
}

impl App {
    pub fn new(session: SessionData, ui_config: UIConfig) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel(OUTCOME_QUEUE_SIZE);
        Self {
            current_screen: Screen::Splash,
            session,
            ui_config,
            outcome_sender,
            outcome_receiver,
        }
    }

    /// Leaves the splash screen and starts the initial status check and loads.
    fn open_dashboard(&mut self) {
        let mut state = DashboardState::new(self.session.config.clone(), self.ui_config.clone());
        for intent in [Intent::CheckStatus, Intent::Reload, Intent::RefreshModules] {
            start(&mut self.session, &self.outcome_sender, &mut state, intent);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }
}

/// Runs `task` in the background and delivers its outcome to the UI loop.
fn spawn<F>(sender: &mpsc::Sender<Outcome>, state: &mut DashboardState, task: F)
where
    F: Future<Output = Outcome> + Send + 'static,
{
    state.in_flight += 1;
    let sender = sender.clone();
    tokio::spawn(async move {
        // The receiver only goes away when the UI has exited.
        let _ = sender.send(task.await).await;
    });
}

/// Starts the work behind `intent`. Returns true when the application should exit.
///
/// There is no cancellation: every started task delivers its outcome, and the
/// last one to arrive wins.
fn start(
    session: &mut SessionData,
    sender: &mpsc::Sender<Outcome>,
    state: &mut DashboardState,
    intent: Intent,
) -> bool {
    let relay = Arc::clone(&session.relay);
    let gateway = Arc::clone(&session.gateway);
    let guild_id = state.app.config.guild_id().map(str::to_string);

    match intent {
        Intent::Quit => return true,
        Intent::CheckStatus => {
            let relay_for_status = Arc::clone(&relay);
            spawn(sender, state, async move {
                Outcome::Status(check_gateway(gateway.as_ref()).await)
            });
            spawn(sender, state, async move {
                Outcome::Status(check_relay(relay_for_status.as_ref()).await)
            });
        }
        Intent::Reload => spawn(sender, state, async move {
            Outcome::Guild(load_snapshot(relay.as_ref(), guild_id).await)
        }),
        Intent::Dispatch(request) => spawn(sender, state, async move {
            Outcome::Action(dispatcher::execute(request, relay.as_ref(), guild_id).await)
        }),
        Intent::RefreshModules => spawn(sender, state, async move {
            Outcome::Modules(modules::list_modules(gateway.as_ref()).await)
        }),
        Intent::ToggleModule { name, next } => spawn(sender, state, async move {
            let verb = if next { "Enable" } else { "Disable" };
            Outcome::ModuleUpdate {
                action: format!("{} {}", verb, name),
                result: modules::toggle_active(gateway.as_ref(), &name, next).await,
            }
        }),
        Intent::LockModule { name, reason } => spawn(sender, state, async move {
            Outcome::ModuleUpdate {
                action: format!("Lock {}", name),
                result: modules::lock(gateway.as_ref(), &name, &reason).await,
            }
        }),
        Intent::UnlockModule { name } => spawn(sender, state, async move {
            Outcome::ModuleUpdate {
                action: format!("Unlock {}", name),
                result: modules::unlock(gateway.as_ref(), &name).await,
            }
        }),
        Intent::EditModuleConfig { name } => spawn(sender, state, async move {
            let result = modules::edit_config(gateway.as_ref(), &name).await;
            Outcome::ModuleConfig { name, result }
        }),
        Intent::SaveModuleConfig { name, text } => spawn(sender, state, async move {
            let result = modules::save_config(gateway.as_ref(), &name, &text).await;
            Outcome::ModuleSaved { name, result }
        }),
        Intent::SaveSettings => {
            let config = state.app.config.normalized();
            let saved = config.save(&session.config_path);
            session.reconnect(config);
            state.in_flight += 1;
            state.apply_outcome(Outcome::SettingsSaved(saved));
            for follow_up in [Intent::CheckStatus, Intent::Reload, Intent::RefreshModules] {
                start(session, sender, state, follow_up);
            }
        }
        Intent::ClearSettings => {
            let cleared = Config::clear(&session.config_path);
            let config = Config::load(&session.config_path);
            session.reconnect(config.clone());
            state.app.config = config;
            state.in_flight += 1;
            state.apply_outcome(Outcome::SettingsCleared(cleared));
            for follow_up in [Intent::CheckStatus, Intent::Reload, Intent::RefreshModules] {
                start(session, sender, state, follow_up);
            }
        }
    }
    false
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Apply everything the background tasks delivered since the last frame
        while let Ok(outcome) = app.outcome_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.apply_outcome(outcome);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.open_dashboard();
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            return Ok(());
                        }
                        // Any other key skips the splash screen
                        app.open_dashboard();
                    }
                    Screen::Dashboard(state) => {
                        for intent in state.handle_key(key) {
                            if start(&mut app.session, &app.outcome_sender, state, intent) {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;
    use crate::network::ApiResponse;
    use crate::relay::MockRelay;
    use std::path::PathBuf;

    fn session(relay: MockRelay, gateway: MockGateway) -> SessionData {
        SessionData {
            config: Config::default(),
            config_path: PathBuf::from("/nonexistent/config.json"),
            relay: Arc::new(relay),
            gateway: Arc::new(gateway),
        }
    }

    #[tokio::test]
    async fn reload_intent_delivers_guild_outcome() {
        let mut relay = MockRelay::new();
        relay.expect_is_configured().return_const(true);
        relay.expect_guild_state().times(1).returning(|_| {
            Ok(ApiResponse::from_text(
                200,
                r#"{"guild":{"id":"1","name":"HQ"},"channels":[]}"#,
            ))
        });
        let mut session = session(relay, MockGateway::new());
        let (sender, mut receiver) = mpsc::channel(4);
        let mut state = DashboardState::new(Config::default(), UIConfig::new(false));

        assert!(!start(&mut session, &sender, &mut state, Intent::Reload));
        assert_eq!(state.in_flight, 1);

        let outcome = receiver.recv().await.unwrap();
        state.apply_outcome(outcome);
        assert_eq!(state.in_flight, 0);
        assert_eq!(state.app.snapshot.as_ref().unwrap().guild_name(), "HQ");
    }

    #[tokio::test]
    async fn status_intent_checks_both_services() {
        let mut relay = MockRelay::new();
        relay.expect_is_configured().return_const(false);
        let mut gateway = MockGateway::new();
        gateway.expect_is_configured().return_const(true);
        gateway
            .expect_core_status()
            .returning(|| Ok(ApiResponse::from_text(200, "{}")));
        let mut session = session(relay, gateway);
        let (sender, mut receiver) = mpsc::channel(4);
        let mut state = DashboardState::new(Config::default(), UIConfig::new(false));

        start(&mut session, &sender, &mut state, Intent::CheckStatus);
        assert_eq!(state.in_flight, 2);
        for _ in 0..2 {
            let outcome = receiver.recv().await.unwrap();
            state.apply_outcome(outcome);
        }
        assert!(state.gateway_status.up);
        assert!(!state.relay_status.up);
    }

    #[tokio::test]
    async fn clear_settings_removes_file_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let saved = Config {
            relay_url: "https://relay.example.com".to_string(),
            ..Config::default()
        };
        saved.save(&config_path).unwrap();

        let mut session = SessionData::new(saved.clone(), config_path.clone());
        let (sender, _receiver) = mpsc::channel(8);
        let mut state = DashboardState::new(saved, UIConfig::new(false));
        state.mode = crate::ui::dashboard::state::Mode::Settings(0);

        assert!(!start(&mut session, &sender, &mut state, Intent::ClearSettings));
        assert!(!config_path.exists());
        assert_eq!(state.app.config, Config::load(&config_path));
        assert_eq!(session.config, state.app.config);
        // Status check (two tasks), reload and module refresh are under way.
        assert_eq!(state.in_flight, 4);
        assert!(
            state
                .pending_events
                .iter()
                .any(|e| e.msg.contains("Settings cleared"))
        );
    }

    #[test]
    fn quit_intent_stops_the_loop() {
        let mut session = session(MockRelay::new(), MockGateway::new());
        let (sender, _receiver) = mpsc::channel(1);
        let mut state = DashboardState::new(Config::default(), UIConfig::new(false));
        assert!(start(&mut session, &sender, &mut state, Intent::Quit));
    }
}
