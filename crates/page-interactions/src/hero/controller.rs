use tracing::{debug, warn};

use crate::error::InteractionResult;
use crate::hero::time::format_time;

/// Video element driven by the controller
pub trait MediaElement {
    /// Whether playback is paused
    fn is_paused(&self) -> bool;

    /// Request playback
    ///
    /// # Errors
    ///
    /// Returns [`crate::InteractionError::Playback`] when the request is
    /// rejected synchronously. Hosts whose play request settles later report
    /// rejections themselves.
    fn play(&mut self) -> InteractionResult<()>;

    /// Request playback whose rejection is expected and not worth reporting,
    /// such as muted background playback
    ///
    /// # Errors
    ///
    /// Same as [`MediaElement::play`].
    fn play_quietly(&mut self) -> InteractionResult<()> {
        self.play()
    }

    /// Pause playback
    fn pause(&mut self);

    /// Mute or unmute audio
    fn set_muted(&mut self, muted: bool);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Duration in seconds; `NaN` while unknown
    fn duration(&self) -> f64;
}

/// Affordances around the hero video
pub trait HeroView {
    /// Apply or remove the cinema-mode appearance
    fn set_cinema_mode(&mut self, enabled: bool);

    /// Show `icon` on the play/pause button
    fn set_playback_icon(&mut self, icon: PlaybackIcon);

    /// Set the progress fill width in percent
    fn set_progress(&mut self, percent: f64);

    /// Set the current-time label
    fn set_time_label(&mut self, label: &str);

    /// Smoothly scroll the highlights section into view
    fn scroll_to_highlights(&mut self);
}

/// Glyph shown on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIcon {
    /// Media is paused; clicking plays
    Play,
    /// Media is playing; clicking pauses
    Pause,
}

impl PlaybackIcon {
    /// Icon matching the paused state
    #[must_use]
    pub const fn for_paused(paused: bool) -> Self {
        if paused {
            Self::Play
        } else {
            Self::Pause
        }
    }

    /// Accessible label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
        }
    }

    /// Inline SVG markup
    #[must_use]
    pub const fn svg(self) -> &'static str {
        match self {
            Self::Play => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" "#,
                r#"viewBox="0 0 24 24" "#,
                r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" "#,
                r#"stroke-linejoin="round"><polygon points="5 3 19 12 5 21 5 3"/></svg>"#
            ),
            Self::Pause => concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" "#,
                r#"viewBox="0 0 24 24" "#,
                r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" "#,
                r#"stroke-linejoin="round"><rect x="6" y="4" width="4" height="16"/>"#,
                r#"<rect x="14" y="4" width="4" height="16"/></svg>"#
            ),
        }
    }
}

/// Notifications raised by the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback started
    Play,
    /// Playback paused
    Pause,
    /// Position advanced
    TimeUpdate,
}

/// Horizontal extent of the progress track in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    /// Left edge
    pub left: f64,
    /// Width
    pub width: f64,
}

impl TrackBounds {
    /// Creates bounds
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Position of `client_x` along the track, clamped to `[0, 1]`
    ///
    /// `None` when the track has no usable width.
    #[must_use]
    pub fn ratio(&self, client_x: f64) -> Option<f64> {
        if !self.width.is_finite() || self.width <= 0.0 || !client_x.is_finite() {
            return None;
        }
        Some(((client_x - self.left) / self.width).clamp(0.0, 1.0))
    }
}

fn usable_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Cinema-mode and playback controls for the hero video
#[derive(Debug)]
pub struct HeroController<V, M> {
    view: V,
    media: Option<M>,
    cinema: bool,
}

impl<V: HeroView, M: MediaElement> HeroController<V, M> {
    /// Creates a controller; `media` is `None` when the page has no video
    pub const fn new(view: V, media: Option<M>) -> Self {
        Self {
            view,
            media,
            cinema: false,
        }
    }

    /// Enter cinema mode: show the immersive view and play with sound
    pub fn enter_cinema(&mut self) {
        self.cinema = true;
        self.view.set_cinema_mode(true);
        if let Some(media) = self.media.as_mut() {
            media.set_muted(false);
            if let Err(e) = media.play() {
                warn!("Video play failed: {e}");
            }
        }
        debug!("entered cinema mode");
    }

    /// Leave cinema mode: restore the background view and keep playing muted
    pub fn exit_cinema(&mut self) {
        self.cinema = false;
        self.view.set_cinema_mode(false);
        if let Some(media) = self.media.as_mut() {
            media.set_muted(true);
            if let Err(e) = media.play_quietly() {
                debug!("background play rejected: {e}");
            }
        }
        debug!("exited cinema mode");
    }

    /// Play when paused, pause otherwise
    ///
    /// The icon is left alone; it follows the media's own notifications.
    pub fn toggle_playback(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        if media.is_paused() {
            if let Err(e) = media.play() {
                warn!("Play failed: {e}");
            }
        } else {
            media.pause();
        }
    }

    /// The media started playing
    pub fn on_play(&mut self) {
        self.view.set_playback_icon(PlaybackIcon::Pause);
    }

    /// The media paused
    pub fn on_pause(&mut self) {
        self.view.set_playback_icon(PlaybackIcon::Play);
    }

    /// Mirror the playback position into the progress fill and time label
    pub fn on_time_update(&mut self) {
        let Some(media) = self.media.as_ref() else {
            return;
        };
        let Some(duration) = usable_duration(media.duration()) else {
            return;
        };
        let now = media.current_time();
        self.view.set_progress(now / duration * 100.0);
        self.view.set_time_label(&format_time(now));
    }

    /// Dispatch a media notification
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play => self.on_play(),
            MediaEvent::Pause => self.on_pause(),
            MediaEvent::TimeUpdate => self.on_time_update(),
        }
    }

    /// Seek to the position of a click on the progress track
    ///
    /// Returns the new position, or `None` when nothing moved.
    pub fn seek_to_click(&mut self, client_x: f64, track: TrackBounds) -> Option<f64> {
        let media = self.media.as_mut()?;
        let duration = usable_duration(media.duration())?;
        let target = track.ratio(client_x)? * duration;
        media.set_current_time(target);
        Some(target)
    }

    /// Primary call-to-action: scroll to the highlights section
    pub fn primary_cta(&mut self) {
        self.view.scroll_to_highlights();
    }

    /// Whether cinema mode is on
    #[must_use]
    pub const fn is_cinema(&self) -> bool {
        self.cinema
    }

    /// The view
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// The media element, if any
    #[must_use]
    pub const fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    /// Mutable access to the media element
    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }
}
