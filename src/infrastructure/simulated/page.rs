// SPDX-License-Identifier: MPL-2.0
//! Scripted host page.
//!
//! [`SimulatedPage`] stands in for the streaming site: it builds its element
//! tree a few steps at a time, inserts the `<video>` element after a delay
//! and loads the media's metadata a little later, so the video detector and
//! the duration fallback of the loop controller both see realistic timing.
//! [`SimulatedPage::replace_video`] tears the video down and schedules a new
//! one, as the site does when it moves on to the next replay.

use super::document::{ElementId, SimulatedDocument};
use super::surface::SimulatedSurface;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Delay between the `<video>` insertion and its metadata becoming available.
pub const METADATA_DELAY: Duration = Duration::from_millis(500);

/// Timing of the scripted page load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageScript {
    /// Media duration once metadata is loaded.
    pub video_duration_secs: f64,
    /// Time after page start at which the `<video>` element is inserted.
    pub video_appears_after: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageStep {
    Layout,
    PlayerShell,
    Video,
    Metadata,
}

/// Host page that reveals a video surface over time.
#[derive(Debug)]
pub struct SimulatedPage {
    document: Rc<SimulatedDocument>,
    surface: Rc<SimulatedSurface>,
    duration_secs: f64,
    video_appears_after: Duration,
    elapsed: Duration,
    steps: VecDeque<(Duration, PageStep)>,
    player_shell: Option<ElementId>,
    video: Option<ElementId>,
}

impl SimulatedPage {
    #[must_use]
    pub fn new(script: PageScript) -> Self {
        let appears = script.video_appears_after;
        let steps = VecDeque::from([
            (Duration::ZERO, PageStep::Layout),
            (appears / 2, PageStep::PlayerShell),
            (appears, PageStep::Video),
            (appears + METADATA_DELAY, PageStep::Metadata),
        ]);

        Self {
            document: Rc::new(SimulatedDocument::new()),
            surface: Rc::new(SimulatedSurface::new()),
            duration_secs: script.video_duration_secs,
            video_appears_after: appears,
            elapsed: Duration::ZERO,
            steps,
            player_shell: None,
            video: None,
        }
    }

    /// The page's document, shared with the video detector.
    #[must_use]
    pub fn document(&self) -> Rc<SimulatedDocument> {
        Rc::clone(&self.document)
    }

    /// The page's current video surface, whether or not it has been inserted yet.
    #[must_use]
    pub fn surface(&self) -> Rc<SimulatedSurface> {
        Rc::clone(&self.surface)
    }

    /// Returns true once every scripted step has run.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.steps.is_empty()
    }

    /// Removes the current `<video>` element and schedules a fresh surface,
    /// inserted `video_appears_after` from now with its metadata following.
    ///
    /// The old surface is paused and never re-inserted.
    pub fn replace_video(&mut self) {
        if let Some(id) = self.video.take() {
            self.document.remove_element(id);
        }
        self.surface.pause();
        self.surface = Rc::new(SimulatedSurface::new());

        self.steps
            .retain(|(_, step)| !matches!(step, PageStep::Video | PageStep::Metadata));
        let appears = self.elapsed + self.video_appears_after;
        self.steps.push_back((appears, PageStep::Video));
        self.steps
            .push_back((appears + METADATA_DELAY, PageStep::Metadata));
        debug!(appears_ms = appears.as_millis() as u64, "video replaced");
    }

    /// Advances page time, runs due steps and media playback, then delivers
    /// pending document and surface notifications.
    pub fn tick(&mut self, elapsed: Duration) {
        self.elapsed += elapsed;

        while let Some(&(due, step)) = self.steps.front() {
            if due > self.elapsed {
                break;
            }
            self.steps.pop_front();
            self.run(step);
        }

        self.surface.advance(elapsed);
        self.document.dispatch_pending();
        self.surface.dispatch_pending();
    }

    fn run(&mut self, step: PageStep) {
        debug!(?step, elapsed_ms = self.elapsed.as_millis() as u64, "page step");
        match step {
            PageStep::Layout => {
                let header = self.document.insert_element(None, "header");
                self.document.insert_element(Some(header), "nav");
                self.document.insert_element(None, "main");
            }
            PageStep::PlayerShell => {
                let shell = self.document.insert_element(None, "div");
                self.document.insert_element(Some(shell), "div");
                self.player_shell = Some(shell);
            }
            PageStep::Video => {
                let id = self
                    .document
                    .insert_video(self.player_shell, Rc::clone(&self.surface));
                self.video = Some(id);
            }
            PageStep::Metadata => {
                self.surface.set_duration(Some(self.duration_secs));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{SurfaceLocator, VideoSurface};

    fn script() -> PageScript {
        PageScript {
            video_duration_secs: 60.0,
            video_appears_after: Duration::from_millis(1000),
        }
    }

    #[test]
    fn video_is_absent_before_delay() {
        let mut page = SimulatedPage::new(script());
        page.tick(Duration::from_millis(900));
        assert!(page.document().find_surface().is_none());
        assert!(page.document().element_count() > 0);
    }

    #[test]
    fn video_appears_after_delay_without_metadata() {
        let mut page = SimulatedPage::new(script());
        page.tick(Duration::from_millis(1000));
        let surface = page.document().find_surface().expect("video inserted");
        assert!(Rc::ptr_eq(&surface, &page.surface()));
        assert_eq!(surface.duration(), None);
    }

    #[test]
    fn metadata_loads_after_video() {
        let mut page = SimulatedPage::new(script());
        page.tick(Duration::from_millis(1000));
        page.tick(METADATA_DELAY);
        assert_eq!(page.surface().duration(), Some(60.0));
        assert!(page.is_loaded());
    }

    #[test]
    fn replace_video_removes_old_surface_and_inserts_new_one() {
        let mut page = SimulatedPage::new(script());
        page.tick(Duration::from_secs(2));
        let old = page.surface();
        old.play();

        page.replace_video();
        assert!(page.document().find_surface().is_none());
        assert!(!old.is_playing());
        assert!(!Rc::ptr_eq(&old, &page.surface()));
        assert!(!page.is_loaded());

        page.tick(Duration::from_millis(1000));
        let found = page.document().find_surface().expect("new video inserted");
        assert!(Rc::ptr_eq(&found, &page.surface()));
        assert_eq!(found.duration(), None);

        page.tick(METADATA_DELAY);
        assert_eq!(page.surface().duration(), Some(60.0));
    }

    #[test]
    fn tick_advances_playing_surface() {
        let mut page = SimulatedPage::new(script());
        page.tick(Duration::from_secs(2));
        page.surface().play();
        page.tick(Duration::from_millis(250));
        assert!((page.surface().current_position() - 0.25).abs() < 1e-9);
    }
}
