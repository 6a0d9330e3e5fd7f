use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlVideoElement, MouseEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::browser::{
    add_class, document, install_diagnostics, listen, query, remove_class, set_style,
};
use crate::error::{InteractionError, InteractionResult};
use crate::hero::markup;
use crate::hero::{HeroController, HeroView, MediaElement, MediaEvent, PlaybackIcon, TrackBounds};

fn scroll_to_highlights(document: &Document) {
    if let Some(target) = document.get_element_by_id(markup::HIGHLIGHTS_ID) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// [`MediaElement`] over the hero `<video>`
#[derive(Debug, Clone)]
pub struct WebVideo {
    video: HtmlVideoElement,
}

impl WebVideo {
    /// Wraps `video`
    #[must_use]
    pub const fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }

    /// Starts playback; a late rejection is reported only when `report`
    fn request_play(&self, report: bool) -> InteractionResult<()> {
        let promise = self
            .video
            .play()
            .map_err(|err| InteractionError::playback(format!("{err:?}")))?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                if report {
                    warn!(error = ?err, "Video play failed");
                }
            }
        });
        Ok(())
    }
}

impl MediaElement for WebVideo {
    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    fn play(&mut self) -> InteractionResult<()> {
        self.request_play(true)
    }

    fn play_quietly(&mut self) -> InteractionResult<()> {
        self.request_play(false)
    }

    fn pause(&mut self) {
        let _ = self.video.pause();
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }
}

/// [`HeroView`] over the live hero section
#[derive(Debug)]
pub struct WebHeroView {
    document: Document,
    section: Element,
    play_pause: Option<Element>,
    fill: Option<Element>,
    time_label: Option<Element>,
}

impl HeroView for WebHeroView {
    fn set_cinema_mode(&mut self, enabled: bool) {
        if enabled {
            add_class(&self.section, markup::CINEMA_MODE);
        } else {
            remove_class(&self.section, markup::CINEMA_MODE);
        }
    }

    fn set_playback_icon(&mut self, icon: PlaybackIcon) {
        if let Some(button) = &self.play_pause {
            button.set_inner_html(icon.svg());
            let _ = button.set_attribute("aria-label", icon.label());
        }
    }

    fn set_progress(&mut self, percent: f64) {
        if let Some(fill) = &self.fill {
            set_style(fill, "width", &format!("{percent}%"));
        }
    }

    fn set_time_label(&mut self, label: &str) {
        if let Some(node) = &self.time_label {
            node.set_text_content(Some(label));
        }
    }

    fn scroll_to_highlights(&mut self) {
        scroll_to_highlights(&self.document);
    }
}

type SharedHero = Rc<RefCell<HeroController<WebHeroView, WebVideo>>>;

/// Wire the hero call-to-action and cinema-mode controls
///
/// Returns whether the cinema controller was installed; it needs the hero
/// section and both cinema buttons. The call-to-action is wired either way.
#[wasm_bindgen(js_name = installHero)]
pub fn install_hero() -> Result<bool, JsValue> {
    install_diagnostics();

    let document = document()?;
    let Some(root) = document.document_element() else {
        return Ok(false);
    };
    let section_selector = format!("section#{}", markup::SECTION_ID);
    let class = |name: &str| query(&root, &format!(".{name}"));

    let cta = query(
        &root,
        &format!(
            r#"{section_selector} button[{}="{}"]"#,
            markup::ATTR_MATERIAL,
            markup::CTA_PRIMARY
        ),
    );
    let section = query(&root, &section_selector);
    let watch = class(markup::WATCH_BUTTON);
    let exit = class(markup::EXIT_BUTTON);

    let (Some(section), Some(watch), Some(exit)) = (section, watch, exit) else {
        if let Some(cta) = cta {
            let doc = document.clone();
            listen(&cta, "click", move |_: Event| scroll_to_highlights(&doc))?;
        }
        return Ok(false);
    };

    let play_pause = class(markup::PLAY_PAUSE);
    let track = class(markup::PROGRESS_TRACK);
    let video = query(
        &root,
        &format!("{section_selector} video[{}]", markup::ATTR_VIDEO),
    )
    .and_then(|v| v.dyn_into::<HtmlVideoElement>().ok());

    let view = WebHeroView {
        document: document.clone(),
        section,
        play_pause: play_pause.clone(),
        fill: class(markup::PROGRESS_FILL),
        time_label: class(markup::TIME_LABEL),
    };
    let hero: SharedHero = Rc::new(RefCell::new(HeroController::new(
        view,
        video.clone().map(WebVideo::new),
    )));

    if let Some(cta) = cta {
        let h = Rc::clone(&hero);
        listen(&cta, "click", move |_: Event| h.borrow_mut().primary_cta())?;
    }

    if let Some(video) = &video {
        for (name, event) in [
            ("timeupdate", MediaEvent::TimeUpdate),
            ("play", MediaEvent::Play),
            ("pause", MediaEvent::Pause),
        ] {
            let h = Rc::clone(&hero);
            listen(video, name, move |_: Event| h.borrow_mut().handle_media_event(event))?;
        }

        if let Some(button) = &play_pause {
            let h = Rc::clone(&hero);
            listen(button, "click", move |_: Event| h.borrow_mut().toggle_playback())?;
        }

        if let Some(track) = track {
            let h = Rc::clone(&hero);
            let bounds_of = track.clone();
            listen(&track, "click", move |e: MouseEvent| {
                let rect = bounds_of.get_bounding_client_rect();
                let bounds = TrackBounds::new(rect.left(), rect.width());
                h.borrow_mut().seek_to_click(f64::from(e.client_x()), bounds);
            })?;
        }
    }

    let h = Rc::clone(&hero);
    listen(&watch, "click", move |_: Event| h.borrow_mut().enter_cinema())?;
    let h = Rc::clone(&hero);
    listen(&exit, "click", move |_: Event| h.borrow_mut().exit_cinema())?;

    Ok(true)
}
