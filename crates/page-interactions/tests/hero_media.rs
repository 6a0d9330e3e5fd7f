//! Hero cinema-mode scenarios over the mock document

use page_interactions::hero::markup;
use page_interactions::prelude::*;

struct HeroPage {
    dom: SharedDom,
    video: MockVideo,
    hero: MockHero,
}

impl HeroPage {
    fn new(options: HeroMarkup, video: MockVideo) -> Self {
        let dom = shared(MockDom::new());
        {
            let mut d = dom.borrow_mut();
            let body = d.body();
            append_hero_section(&mut d, body, options);
        }
        let hero = install_hero(&dom, video.clone()).unwrap();
        Self { dom, video, hero }
    }

    /// Delivers queued media notifications, as the event loop would
    fn pump(&mut self) {
        for event in self.video.take_events() {
            self.hero.handle_media_event(event);
        }
    }

    fn click_watch(&mut self) {
        if self.dom.borrow_mut().click(self.hero.view().watch_button()) {
            self.hero.enter_cinema();
        }
        self.pump();
    }

    fn click_exit(&mut self) {
        if self.dom.borrow_mut().click(self.hero.view().exit_button()) {
            self.hero.exit_cinema();
        }
        self.pump();
    }

    fn click_play_pause(&mut self) {
        let button = self.hero.view().play_pause().unwrap();
        if self.dom.borrow_mut().click(button) {
            self.hero.toggle_playback();
        }
        self.pump();
    }

    fn click_track(&mut self, client_x: f64) -> Option<f64> {
        let bounds = self.hero.view().track_bounds()?;
        let moved = self.hero.seek_to_click(client_x, bounds);
        self.pump();
        moved
    }

    fn in_cinema(&self) -> bool {
        self.dom
            .borrow()
            .has_class(self.hero.view().section(), markup::CINEMA_MODE)
    }

    fn aria_label(&self) -> Option<String> {
        let button = self.hero.view().play_pause()?;
        self.dom
            .borrow()
            .get(button)?
            .get_attr("aria-label")
            .map(str::to_string)
    }

    fn time_label(&self) -> Option<String> {
        let node = self.hero.view().time_label()?;
        self.dom.borrow().text(node).map(str::to_string)
    }

    fn fill_width(&self) -> Option<String> {
        let node = self.hero.view().progress_fill()?;
        self.dom.borrow().style(node, "width").map(str::to_string)
    }
}

#[test]
fn test_watch_enters_cinema_with_sound() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::with_duration(90.0));
    page.click_watch();

    assert!(page.in_cinema());
    assert!(page.hero.is_cinema());
    let state = page.video.snapshot();
    assert!(!state.muted);
    assert!(!state.paused);
    assert_eq!(page.aria_label().as_deref(), Some("Pause"));
}

#[test]
fn test_exit_mutes_and_keeps_playing() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::with_duration(90.0));
    page.click_watch();
    page.click_exit();

    assert!(!page.in_cinema());
    let state = page.video.snapshot();
    assert!(state.muted);
    assert!(!state.paused);
}

#[test]
fn test_blocked_autoplay_keeps_play_icon() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::with_duration(90.0));
    page.video.reject_play(true);
    page.click_watch();

    assert!(page.in_cinema());
    assert!(page.video.snapshot().paused);
    assert_eq!(page.aria_label(), None);

    page.click_play_pause();
    assert!(page.video.snapshot().paused);
    assert_eq!(page.aria_label(), None);
}

#[test]
fn test_play_pause_icon_follows_media_state() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::with_duration(90.0));
    page.click_play_pause();
    assert_eq!(page.aria_label().as_deref(), Some("Pause"));

    page.click_play_pause();
    assert_eq!(page.aria_label().as_deref(), Some("Play"));

    page.click_play_pause();
    page.video.external_pause();
    page.pump();
    assert_eq!(page.aria_label().as_deref(), Some("Play"));
    let button = page.hero.view().play_pause().unwrap();
    let dom = page.dom.borrow();
    assert!(dom.text(button).unwrap().contains("polygon"));
}

#[test]
fn test_progress_and_time_label_track_playback() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::with_duration(200.0));
    page.video.tick(50.0);
    page.pump();
    assert_eq!(page.fill_width().as_deref(), Some("25%"));
    assert_eq!(page.time_label().as_deref(), Some("0:50"));

    page.video.tick(15.0);
    page.pump();
    assert_eq!(page.time_label().as_deref(), Some("1:05"));
}

#[test]
fn test_progress_ignored_until_metadata() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::new());
    page.video.tick(5.0);
    page.pump();
    assert_eq!(page.fill_width(), None);
    assert_eq!(page.time_label().as_deref(), Some("0:00"));
}

#[test]
fn test_seek_by_clicking_track() {
    let options = HeroMarkup {
        track: TrackBounds::new(100.0, 400.0),
        ..HeroMarkup::default()
    };
    let mut page = HeroPage::new(options, MockVideo::with_duration(120.0));

    assert_eq!(page.click_track(300.0), Some(60.0));
    assert_eq!(page.fill_width().as_deref(), Some("50%"));
    assert_eq!(page.time_label().as_deref(), Some("1:00"));

    assert_eq!(page.click_track(50.0), Some(0.0));
    assert_eq!(page.click_track(900.0), Some(120.0));
}

#[test]
fn test_seek_without_duration_is_noop() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::new());
    assert_eq!(page.click_track(200.0), None);
    assert_eq!(page.video.snapshot().current_time, 0.0);
}

#[test]
fn test_primary_cta_scrolls_to_highlights() {
    let mut page = HeroPage::new(HeroMarkup::default(), MockVideo::new());
    page.hero.primary_cta();
    let dom = page.dom.borrow();
    let highlights = dom.get_element_by_id(markup::HIGHLIGHTS_ID).unwrap();
    assert!(dom
        .event_history()
        .contains(&DomEvent::ScrollIntoView { target: highlights }));
}

#[test]
fn test_missing_cinema_buttons_skip_install() {
    let dom = shared(MockDom::new());
    {
        let mut d = dom.borrow_mut();
        let body = d.body();
        append_hero_section(
            &mut d,
            body,
            HeroMarkup {
                cinema_buttons: false,
                ..HeroMarkup::default()
            },
        );
    }
    assert!(install_hero(&dom, MockVideo::new()).is_none());
}

#[test]
fn test_cinema_without_controls_or_video() {
    let options = HeroMarkup {
        controls: false,
        video: false,
        ..HeroMarkup::default()
    };
    let mut page = HeroPage::new(options, MockVideo::new());
    page.click_watch();
    assert!(page.in_cinema());
    assert_eq!(page.video.snapshot().play_requests, 0);
    page.click_exit();
    assert!(!page.in_cinema());
}
