//! Hero section over the mock document.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::dom::element::{DomElement, MockDom, NodeId};
use crate::dom::quiz_page::SharedDom;
use crate::error::{InteractionError, InteractionResult};
use crate::hero::markup;
use crate::hero::{HeroController, HeroView, MediaElement, MediaEvent, PlaybackIcon, TrackBounds};

/// Playback state of a [`MockVideo`]
#[derive(Debug, Clone, PartialEq)]
pub struct VideoState {
    /// Paused flag
    pub paused: bool,
    /// Muted flag
    pub muted: bool,
    /// Position in seconds
    pub current_time: f64,
    /// Duration in seconds, `NaN` until metadata loads
    pub duration: f64,
    /// Reject play requests, as an autoplay policy would
    pub reject_play: bool,
    /// Play requests received
    pub play_requests: usize,
    pending: Vec<MediaEvent>,
}

impl Default for VideoState {
    fn default() -> Self {
        Self {
            paused: true,
            muted: true,
            current_time: 0.0,
            duration: f64::NAN,
            reject_play: false,
            play_requests: 0,
            pending: Vec::new(),
        }
    }
}

/// Shared handle to a fake video element
///
/// State changes queue the notifications a real element would dispatch;
/// [`MockVideo::take_events`] drains them for delivery to the controller.
#[derive(Debug, Clone, Default)]
pub struct MockVideo {
    state: Rc<RefCell<VideoState>>,
}

impl MockVideo {
    /// Creates a paused, muted video without metadata
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a video with a known duration
    #[must_use]
    pub fn with_duration(seconds: f64) -> Self {
        let video = Self::new();
        video.state.borrow_mut().duration = seconds;
        video
    }

    /// Makes future play requests fail
    pub fn reject_play(&self, reject: bool) {
        self.state.borrow_mut().reject_play = reject;
    }

    /// Advance playback by `seconds`, queueing a time update
    pub fn tick(&self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.current_time += seconds;
        state.pending.push(MediaEvent::TimeUpdate);
    }

    /// Pause from outside the controller, e.g. the browser's own controls
    pub fn external_pause(&self) {
        self.pause_inner();
    }

    /// Drains queued notifications
    #[must_use]
    pub fn take_events(&self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    /// Snapshot of the playback state
    #[must_use]
    pub fn snapshot(&self) -> VideoState {
        self.state.borrow().clone()
    }

    fn pause_inner(&self) {
        let mut state = self.state.borrow_mut();
        if !state.paused {
            state.paused = true;
            state.pending.push(MediaEvent::Pause);
        }
    }
}

impl MediaElement for MockVideo {
    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn play(&mut self) -> InteractionResult<()> {
        let mut state = self.state.borrow_mut();
        state.play_requests += 1;
        if state.reject_play {
            return Err(InteractionError::playback(
                "NotAllowedError: play() requires a user gesture first",
            ));
        }
        if state.paused {
            state.paused = false;
            state.pending.push(MediaEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_inner();
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.current_time = seconds;
        state.pending.push(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }
}

/// Which parts of the hero markup to render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroMarkup {
    /// Render the cinema watch and exit buttons
    pub cinema_buttons: bool,
    /// Render play/pause, progress and time controls
    pub controls: bool,
    /// Render the video element
    pub video: bool,
    /// Bounds reported for the progress track
    pub track: TrackBounds,
}

impl Default for HeroMarkup {
    fn default() -> Self {
        Self {
            cinema_buttons: true,
            controls: true,
            video: true,
            track: TrackBounds::new(0.0, 400.0),
        }
    }
}

/// Renders the hero section and the highlights section after it
pub fn append_hero_section(dom: &mut MockDom, parent: NodeId, options: HeroMarkup) -> NodeId {
    let section = dom.append(parent, DomElement::new("section").with_id(markup::SECTION_ID));
    if options.video {
        dom.append(
            section,
            DomElement::new("video").with_attr(markup::ATTR_VIDEO, "hero.video"),
        );
    }
    dom.append(
        section,
        DomElement::new("button")
            .with_attr(markup::ATTR_MATERIAL, markup::CTA_PRIMARY)
            .with_text("Get started"),
    );
    if options.cinema_buttons {
        dom.append(
            section,
            DomElement::new("button")
                .with_class(markup::WATCH_BUTTON)
                .with_text("Watch"),
        );
        dom.append(
            section,
            DomElement::new("button").with_class(markup::EXIT_BUTTON),
        );
    }
    if options.controls {
        let controls = dom.append(
            section,
            DomElement::new("div").with_class("hero-video-controls"),
        );
        dom.append(
            controls,
            DomElement::new("button").with_class(markup::PLAY_PAUSE),
        );
        let track = dom.append(
            controls,
            DomElement::new("div")
                .with_class(markup::PROGRESS_TRACK)
                .with_attr("data-left", &options.track.left.to_string())
                .with_attr("data-width", &options.track.width.to_string()),
        );
        dom.append(track, DomElement::new("div").with_class(markup::PROGRESS_FILL));
        dom.append(
            controls,
            DomElement::new("span")
                .with_class(markup::TIME_LABEL)
                .with_text("0:00"),
        );
    }
    dom.append(parent, DomElement::new("section").with_id(markup::HIGHLIGHTS_ID));
    section
}

/// [`HeroView`] over the hero section of a [`MockDom`]
#[derive(Debug)]
pub struct DomHeroView {
    dom: SharedDom,
    section: NodeId,
    watch: NodeId,
    exit: NodeId,
    cta: Option<NodeId>,
    play_pause: Option<NodeId>,
    track: Option<NodeId>,
    fill: Option<NodeId>,
    time_label: Option<NodeId>,
}

impl DomHeroView {
    /// Captures the hero handles
    ///
    /// Returns `None` (and logs) when the section or either cinema button
    /// is missing.
    #[must_use]
    pub fn bind(dom: SharedDom) -> Option<Self> {
        let d = dom.borrow();
        let section = d.get_element_by_id(markup::SECTION_ID);
        let watch = section.and_then(|s| d.query_first(s, markup::WATCH_BUTTON));
        let exit = section.and_then(|s| d.query_first(s, markup::EXIT_BUTTON));
        let (Some(section), Some(watch), Some(exit)) = (section, watch, exit) else {
            warn!("hero cinema controls not installed: section or cinema buttons missing");
            return None;
        };
        let cta = d.query_attr(section, markup::ATTR_MATERIAL, markup::CTA_PRIMARY);
        let play_pause = d.query_first(section, markup::PLAY_PAUSE);
        let track = d.query_first(section, markup::PROGRESS_TRACK);
        let fill = d.query_first(section, markup::PROGRESS_FILL);
        let time_label = d.query_first(section, markup::TIME_LABEL);
        drop(d);
        Some(Self {
            dom,
            section,
            watch,
            exit,
            cta,
            play_pause,
            track,
            fill,
            time_label,
        })
    }

    /// Hero section
    #[must_use]
    pub const fn section(&self) -> NodeId {
        self.section
    }

    /// Watch button
    #[must_use]
    pub const fn watch_button(&self) -> NodeId {
        self.watch
    }

    /// Exit button
    #[must_use]
    pub const fn exit_button(&self) -> NodeId {
        self.exit
    }

    /// Primary call-to-action
    #[must_use]
    pub const fn cta_button(&self) -> Option<NodeId> {
        self.cta
    }

    /// Play/pause button
    #[must_use]
    pub const fn play_pause(&self) -> Option<NodeId> {
        self.play_pause
    }

    /// Progress fill
    #[must_use]
    pub const fn progress_fill(&self) -> Option<NodeId> {
        self.fill
    }

    /// Time label
    #[must_use]
    pub const fn time_label(&self) -> Option<NodeId> {
        self.time_label
    }

    /// Bounds of the progress track, if present
    #[must_use]
    pub fn track_bounds(&self) -> Option<TrackBounds> {
        let dom = self.dom.borrow();
        let track = dom.get(self.track?)?;
        let read = |key: &str| track.get_attr(key).and_then(|v| v.parse::<f64>().ok());
        Some(TrackBounds::new(read("data-left")?, read("data-width")?))
    }
}

impl HeroView for DomHeroView {
    fn set_cinema_mode(&mut self, enabled: bool) {
        let mut dom = self.dom.borrow_mut();
        if enabled {
            dom.add_class(self.section, markup::CINEMA_MODE);
        } else {
            dom.remove_class(self.section, markup::CINEMA_MODE);
        }
    }

    fn set_playback_icon(&mut self, icon: PlaybackIcon) {
        let Some(button) = self.play_pause else {
            return;
        };
        let mut dom = self.dom.borrow_mut();
        dom.set_text(button, icon.svg());
        dom.set_attr(button, "aria-label", icon.label());
    }

    fn set_progress(&mut self, percent: f64) {
        if let Some(fill) = self.fill {
            self.dom
                .borrow_mut()
                .set_style(fill, "width", &format!("{percent}%"));
        }
    }

    fn set_time_label(&mut self, label: &str) {
        if let Some(node) = self.time_label {
            self.dom.borrow_mut().set_text(node, label);
        }
    }

    fn scroll_to_highlights(&mut self) {
        let mut dom = self.dom.borrow_mut();
        if let Some(target) = dom.get_element_by_id(markup::HIGHLIGHTS_ID) {
            dom.scroll_into_view(target);
        }
    }
}

/// Mock-page hero controller
pub type MockHero = HeroController<DomHeroView, MockVideo>;

/// Binds the hero section of `dom`; `video` is attached only when the
/// markup contains a video element
#[must_use]
pub fn install_hero(dom: &SharedDom, video: MockVideo) -> Option<MockHero> {
    let view = DomHeroView::bind(Rc::clone(dom))?;
    let has_video = {
        let d = dom.borrow();
        d.descendants(view.section())
            .into_iter()
            .any(|n| {
                d.get(n).is_some_and(|e| {
                    e.tag == "video" && e.get_attr(markup::ATTR_VIDEO).is_some()
                })
            })
    };
    Some(HeroController::new(view, has_video.then_some(video)))
}
