//! Hero video cinema mode.
//!
//! The landing section's background video can be promoted to an immersive
//! "cinema" view with its own play/pause button, progress bar and time
//! label. [`HeroController`] holds the logic; the page supplies a
//! [`HeroView`] for the affordances and a [`MediaElement`] for the video.

mod controller;
mod time;

pub use controller::{
    HeroController, HeroView, MediaElement, MediaEvent, PlaybackIcon, TrackBounds,
};
pub use time::format_time;

/// Hooks the hero markup provides
pub mod markup {
    /// Hero section element id
    pub const SECTION_ID: &str = "overview";
    /// Class toggled on the hero section while in cinema mode
    pub const CINEMA_MODE: &str = "cinema-mode";
    /// Button entering cinema mode
    pub const WATCH_BUTTON: &str = "hero-cinema-secondary";
    /// Button leaving cinema mode
    pub const EXIT_BUTTON: &str = "hero-exit-cinema";
    /// Play/pause button
    pub const PLAY_PAUSE: &str = "hero-video-playpause";
    /// Clickable progress track
    pub const PROGRESS_TRACK: &str = "hero-video-progress-track";
    /// Progress fill inside the track
    pub const PROGRESS_FILL: &str = "hero-video-progress-fill";
    /// Current-time label
    pub const TIME_LABEL: &str = "hero-video-time";
    /// Attribute marking the hero video
    pub const ATTR_VIDEO: &str = "data-material-video";
    /// Attribute identifying the primary call-to-action
    pub const ATTR_MATERIAL: &str = "data-material";
    /// Value of [`ATTR_MATERIAL`] on the primary call-to-action
    pub const CTA_PRIMARY: &str = "hero.ctaPrimary";
    /// Id of the section the call-to-action scrolls to
    pub const HIGHLIGHTS_ID: &str = "highlights";
}
