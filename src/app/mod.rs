// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns the simulated host page, watches it for a video
//! surface, binds a `LoopController` once one appears and translates player
//! and loop panel messages into calls on the surface and the controller.
//! The controller is dropped when its surface leaves the page, after which a
//! new watch starts, and when the loop panel is closed.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::application::port::document::SurfaceLocator;
use crate::application::port::VideoSurface;
use crate::application::{LoopController, Mark, VideoDetector};
use crate::config::{self, Config};
use crate::domain::playback::LoopState;
use crate::error::Error;
use crate::i18n::I18n;
use crate::infrastructure::{SimulatedDocument, SimulatedPage, SimulatedSurface};
use crate::ui::loop_panel::{self, Event as LoopPanelEvent};
use crate::ui::player::{self, Event as PlayerEvent};
use iced::{window, Element, Subscription, Task, Theme};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::info;

type SurfaceSlot = Rc<RefCell<Option<Rc<SimulatedSurface>>>>;
type PageDetector = VideoDetector<SimulatedDocument, SimulatedDocument>;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    page: SimulatedPage,
    detector: PageDetector,
    /// Filled by the detector callback, drained on the next update.
    found_surface: SurfaceSlot,
    surface: Option<Rc<SimulatedSurface>>,
    controller: Option<LoopController>,
    player: player::State,
    loop_panel: loop_panel::State,
    config_warning: Option<String>,
    last_tick: Option<Instant>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("page_loaded", &self.page.is_loaded())
            .field("controller", &self.controller)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 540;
pub const WINDOW_DEFAULT_WIDTH: u32 = 860;
pub const MIN_WINDOW_HEIGHT: u32 = 360;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings. Close requests are routed through `update`
/// so the controller and detector are released first.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the config, builds the page and starts watching it for a video.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir);
        let i18n = I18n::new(flags.lang, &config);

        let page = SimulatedPage::new(config.page_script());
        let found_surface: SurfaceSlot = Rc::new(RefCell::new(None));
        let detector = watch_for_surface(&page.document(), &found_surface);

        info!(locale = %i18n.current_locale(), "replay repeat started");

        let mut app = App {
            i18n,
            config,
            page,
            detector,
            found_surface,
            surface: None,
            controller: None,
            player: player::State::default(),
            loop_panel: loop_panel::State::default(),
            config_warning,
            last_tick: None,
        };
        app.acquire_surface();

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.config.tick_interval()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(now) => {
                let elapsed = self.last_tick.map_or_else(
                    || self.config.tick_interval(),
                    |last| now.saturating_duration_since(last),
                );
                self.last_tick = Some(now);
                self.advance(elapsed);
            }
            Message::Player(message) => {
                let event = self.player.update(message);
                self.handle_player_event(event);
            }
            Message::LoopPanel(message) => {
                let event = self.loop_panel.update(message);
                self.handle_loop_panel_event(event);
            }
            Message::WindowCloseRequested(id) => {
                self.shutdown();
                return window::close(id);
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            player: &self.player,
            playback: self.playback_state(),
            loop_panel: self.controller.as_ref().map(|_| &self.loop_panel),
            offer_loop_panel: self.surface.is_some() && self.controller.is_none(),
            config_warning: self.config_warning.as_deref(),
        })
    }

    /// Runs the page for `elapsed`, releases a surface that left the page,
    /// picks up a newly found one and refreshes the panel from the controller.
    fn advance(&mut self, elapsed: Duration) {
        self.page.tick(elapsed);
        self.release_detached_surface();
        self.acquire_surface();
        if let Some(controller) = &self.controller {
            self.loop_panel.observe(controller.snapshot());
        }
    }

    fn acquire_surface(&mut self) {
        let Some(surface) = self.found_surface.borrow_mut().take() else {
            return;
        };

        info!(duration = ?surface.duration(), "video surface acquired, showing loop panel");
        self.surface = Some(surface);
        self.bind_controller();
    }

    /// Binds a fresh controller to the current surface and shows the panel.
    fn bind_controller(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let controller = LoopController::bind(
            Rc::clone(surface) as Rc<dyn VideoSurface>,
            self.config.loop_settings(),
        );
        self.loop_panel.sync(controller.snapshot());
        self.controller = Some(controller);
    }

    /// Unbinds and drops the controller; the panel is hidden with it.
    fn release_controller(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.unbind();
        }
    }

    /// Drops the controller once its surface is no longer in the document
    /// and starts watching for the next one.
    fn release_detached_surface(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let attached = self
            .page
            .document()
            .find_surface()
            .is_some_and(|found| Rc::ptr_eq(&found, surface));
        if attached {
            return;
        }

        info!("video surface removed from the page, releasing loop controller");
        self.release_controller();
        self.surface = None;
        self.player = player::State::default();
        self.found_surface.borrow_mut().take();
        self.detector = watch_for_surface(&self.page.document(), &self.found_surface);
    }

    fn handle_player_event(&mut self, event: PlayerEvent) {
        let Some(surface) = self.surface.clone() else {
            return;
        };
        match event {
            PlayerEvent::None => {}
            PlayerEvent::TogglePlayback => {
                surface.toggle_playback();
            }
            PlayerEvent::Seek(position) => {
                surface.set_position(position);
                surface.dispatch_pending();
            }
            PlayerEvent::NextReplay => {
                self.page.replace_video();
                self.release_detached_surface();
                self.acquire_surface();
            }
            PlayerEvent::ShowLoopPanel => {
                if self.controller.is_none() {
                    self.bind_controller();
                }
            }
        }
    }

    fn handle_loop_panel_event(&mut self, event: LoopPanelEvent) {
        if event == LoopPanelEvent::Close {
            self.release_controller();
            info!("loop panel closed");
            return;
        }

        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        match event {
            LoopPanelEvent::None | LoopPanelEvent::Close => {}
            LoopPanelEvent::MarkStart => {
                let mark = controller.mark_start();
                report_mark(&mut self.loop_panel, mark, controller.snapshot());
            }
            LoopPanelEvent::MarkEnd => {
                let mark = controller.mark_end();
                report_mark(&mut self.loop_panel, mark, controller.snapshot());
            }
            LoopPanelEvent::ApplyRange { start, end } => {
                match controller.set_range(start, end) {
                    Ok(_) => self.loop_panel.sync(controller.snapshot()),
                    Err(err) => self.loop_panel.show_error(Error::from(err).i18n_key()),
                }
            }
            LoopPanelEvent::ToggleLoop => {
                controller.toggle();
                self.loop_panel.observe(controller.snapshot());
            }
        }
    }

    fn playback_state(&self) -> Option<player::PlaybackState> {
        self.surface.as_ref().map(|surface| player::PlaybackState {
            is_playing: surface.is_playing(),
            position_secs: surface.current_position(),
            duration_secs: surface.duration(),
        })
    }

    /// Releases the controller subscription and the document observer.
    fn shutdown(&mut self) {
        self.release_controller();
        self.detector.stop();
        if let Some(surface) = &self.surface {
            surface.pause();
        }
        info!("replay repeat closing");
    }
}

/// Refreshes the panel after a mark; a refused mark keeps the user's inputs.
fn report_mark(panel: &mut loop_panel::State, mark: Mark, snapshot: LoopState) {
    if mark.is_applied() {
        panel.sync(snapshot);
    } else {
        panel.observe(snapshot);
        panel.show_info("loop-status-mark-rejected");
    }
}

/// Starts a detector on `document` that parks the found surface in `slot`.
fn watch_for_surface(document: &Rc<SimulatedDocument>, slot: &SurfaceSlot) -> PageDetector {
    let mut detector = VideoDetector::new(Rc::clone(document), Rc::clone(document));
    let slot = Rc::clone(slot);
    detector.start(move |surface| {
        *slot.borrow_mut() = Some(surface);
    });
    detector
}
