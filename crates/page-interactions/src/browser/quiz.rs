use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use js_sys::{Function, Reflect};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::browser::{
    add_class, document, install_diagnostics, listen, query, query_all, remove_class, set_style,
    PerformanceClock,
};
use crate::content::{Material, QuizContent};
use crate::quiz::feedback::Particle;
use crate::quiz::markup::{self, animation};
use crate::quiz::{PageMode, QuizEngine, QuizPage, QuizView};

fn class_selector(class: &str) -> String {
    // Tailwind-style names such as `border-white/10` need escaping
    format!(".{}", class.replace('/', "\\/"))
}

fn page_mode(document: &Document) -> PageMode {
    document.body().map_or(PageMode::Live, |body| {
        PageMode::from_body_classes(body.class_name().split_whitespace())
    })
}

/// Calls `window.lucide.createIcons()` when the icon library is loaded
fn refresh_lucide() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(lucide) = Reflect::get(&window, &JsValue::from_str("lucide")) else {
        return;
    };
    if lucide.is_undefined() || lucide.is_null() {
        return;
    }
    let Ok(create) = Reflect::get(&lucide, &JsValue::from_str("createIcons")) else {
        return;
    };
    if let Some(create) = create.dyn_ref::<Function>() {
        if let Err(err) = create.call0(&lucide) {
            warn!(error = ?err, "icon refresh failed");
        }
    }
}

#[derive(Debug)]
struct WebOption {
    button: Element,
    checkmark: Option<Element>,
    stroke: Option<Element>,
    particles: Option<Element>,
}

#[derive(Debug)]
struct WebCard {
    card: Element,
    options: BTreeMap<usize, WebOption>,
    explanation: Option<Element>,
    next_container: Option<Element>,
}

/// [`QuizView`] over a quiz section of the live document
#[derive(Debug)]
pub struct WebQuizView {
    section: Element,
    container: Option<Element>,
    chevron: Option<Element>,
    summary: Option<Element>,
    final_score: Option<Element>,
    total_score: Option<Element>,
    cards: BTreeMap<usize, WebCard>,
}

impl WebQuizView {
    /// Captures handles below `section`
    #[must_use]
    pub fn bind(section: Element) -> Self {
        let bind_option = |button: Element| {
            let checkmark = query(&button, &class_selector(markup::OPTION_CHECKMARK));
            let index = button.get_attribute(markup::ATTR_OPTION_INDEX);
            let option = WebOption {
                stroke: checkmark.as_ref().and_then(|c| query(c, "svg polyline")),
                particles: query(&button, &class_selector(markup::OPTION_PARTICLES)),
                checkmark,
                button,
            };
            (index, option)
        };
        let bind_card = |card: Element| {
            let options = query_all(&card, &class_selector(markup::OPTION_BUTTON));
            let index = card.get_attribute(markup::ATTR_QUESTION_INDEX);
            let card = WebCard {
                options: markup::key_by_index(options.into_iter().map(bind_option)),
                explanation: query(&card, &class_selector(markup::EXPLANATION_PANEL)),
                next_container: query(&card, &class_selector(markup::NEXT_CONTAINER)),
                card,
            };
            (index, card)
        };
        let cards = markup::key_by_index(
            query_all(&section, &class_selector(markup::QUESTION_CARD))
                .into_iter()
                .map(bind_card),
        );
        Self {
            container: query(&section, &class_selector(markup::QUESTIONS_CONTAINER)),
            chevron: query(&section, &class_selector(markup::CHEVRON)),
            summary: query(&section, &class_selector(markup::SCORE_SUMMARY)),
            final_score: query(&section, &class_selector(markup::FINAL_SCORE)),
            total_score: query(&section, &class_selector(markup::TOTAL_SCORE)),
            section,
            cards,
        }
    }

    fn option(&self, question: usize, option: usize) -> Option<&WebOption> {
        self.cards.get(&question).and_then(|c| c.options.get(&option))
    }

    fn style_option(button: &Element, marker: &str, style: [&str; 2]) {
        add_class(button, marker);
        remove_class(button, markup::NEUTRAL_BORDER);
        for class in style {
            add_class(button, class);
        }
    }

    fn show_checkmark(option: &WebOption) {
        if let Some(check) = &option.checkmark {
            remove_class(check, markup::CHECK_HIDDEN);
            for class in markup::CHECK_VISIBLE {
                add_class(check, class);
            }
        }
    }

    fn reveal(el: Option<&Element>, anim: &str) -> bool {
        let Some(el) = el else {
            return false;
        };
        remove_class(el, markup::HIDDEN);
        set_style(el, "animation", anim);
        true
    }
}

impl QuizView for WebQuizView {
    fn set_collapsed(&mut self, collapsed: bool) {
        if collapsed {
            add_class(&self.section, markup::COLLAPSED);
            remove_class(&self.section, markup::EXPANDED);
        } else {
            remove_class(&self.section, markup::COLLAPSED);
            add_class(&self.section, markup::EXPANDED);
        }
        if let Some(chevron) = &self.chevron {
            set_style(chevron, "transform", markup::chevron_transform(collapsed));
        }
    }

    fn scroll_into_view(&mut self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        self.section
            .scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn show_question(&mut self, question: usize) {
        for (&i, card) in &self.cards {
            if i == question {
                add_class(&card.card, markup::ACTIVE);
                set_style(&card.card, "animation", animation::CARD_IN);
            } else {
                remove_class(&card.card, markup::ACTIVE);
            }
        }
    }

    fn hide_question(&mut self, question: usize) {
        if let Some(card) = self.cards.get(&question) {
            remove_class(&card.card, markup::ACTIVE);
        }
    }

    fn begin_exit(&mut self, question: usize) {
        if let Some(card) = self.cards.get(&question) {
            set_style(&card.card, "animation", animation::CARD_OUT);
        }
    }

    fn mark_correct(&mut self, question: usize, option: usize) {
        let Some(opt) = self.option(question, option) else {
            return;
        };
        Self::style_option(&opt.button, markup::OPTION_CORRECT, markup::CORRECT_STYLE);
        Self::show_checkmark(opt);
        if let Some(stroke) = &opt.stroke {
            let _ = stroke.set_attribute(
                "style",
                &format!(
                    "stroke-dasharray: 100; stroke-dashoffset: 100; animation: {};",
                    animation::CHECK_DRAW
                ),
            );
        }
        set_style(&opt.button, "animation", animation::BOUNCE);
    }

    fn mark_wrong(&mut self, question: usize, option: usize) {
        if let Some(opt) = self.option(question, option) {
            Self::style_option(&opt.button, markup::OPTION_WRONG, markup::WRONG_STYLE);
            set_style(&opt.button, "animation", animation::SHAKE);
        }
    }

    fn reveal_correct(&mut self, question: usize, option: usize) {
        if let Some(opt) = self.option(question, option) {
            Self::style_option(
                &opt.button,
                markup::OPTION_CORRECT_REVEAL,
                markup::CORRECT_STYLE,
            );
            Self::show_checkmark(opt);
        }
    }

    fn burst_particles(&mut self, question: usize, option: usize, particles: &[Particle]) {
        let Some(host) = self.option(question, option).and_then(|o| o.particles.as_ref()) else {
            return;
        };
        host.set_inner_html("");
        let Some(doc) = host.owner_document() else {
            return;
        };
        for particle in particles {
            let Ok(el) = doc.create_element("div") else {
                continue;
            };
            el.set_class_name(markup::PARTICLE);
            let _ = el.set_attribute("style", &particle.css_text());
            let _ = host.append_child(&el);
        }
    }

    fn clear_particles(&mut self, question: usize, option: usize) {
        if let Some(host) = self.option(question, option).and_then(|o| o.particles.as_ref()) {
            host.set_inner_html("");
        }
    }

    fn disable_options(&mut self, question: usize) {
        let Some(card) = self.cards.get(&question) else {
            return;
        };
        for opt in card.options.values() {
            if let Some(button) = opt.button.dyn_ref::<HtmlButtonElement>() {
                button.set_disabled(true);
            }
            add_class(&opt.button, markup::CURSOR_NOT_ALLOWED);
            set_style(&opt.button, "pointer-events", "none");
        }
    }

    fn show_explanation(&mut self, question: usize) -> bool {
        let panel = self.cards.get(&question).and_then(|c| c.explanation.as_ref());
        Self::reveal(panel, animation::EXPLANATION)
    }

    fn show_next(&mut self, question: usize) -> bool {
        let next = self.cards.get(&question).and_then(|c| c.next_container.as_ref());
        Self::reveal(next, animation::NEXT)
    }

    fn show_summary(&mut self, correct: usize, total: usize) -> bool {
        for card in self.cards.values() {
            remove_class(&card.card, markup::ACTIVE);
        }
        if let Some(container) = &self.container {
            set_style(container, "min-height", "0");
            set_style(container, "height", "0");
            set_style(container, "overflow", "hidden");
        }
        let (Some(summary), Some(score)) = (&self.summary, &self.final_score) else {
            return false;
        };
        score.set_text_content(Some(&correct.to_string()));
        if let Some(node) = &self.total_score {
            node.set_text_content(Some(&total.to_string()));
        }
        Self::reveal(Some(summary), animation::SUMMARY)
    }

    fn restore(&mut self) {
        if let Some(summary) = &self.summary {
            add_class(summary, markup::HIDDEN);
        }
        if let Some(container) = &self.container {
            for property in ["min-height", "height", "overflow"] {
                set_style(container, property, "");
            }
        }
        for card in self.cards.values() {
            for panel in [&card.explanation, &card.next_container].into_iter().flatten() {
                add_class(panel, markup::HIDDEN);
            }
            for opt in card.options.values() {
                if let Some(button) = opt.button.dyn_ref::<HtmlButtonElement>() {
                    button.set_disabled(false);
                }
                set_style(&opt.button, "pointer-events", "auto");
                for class in markup::FEEDBACK_CLASSES {
                    remove_class(&opt.button, class);
                }
                add_class(&opt.button, markup::NEUTRAL_BORDER);
                set_style(&opt.button, "animation", "");
                if let Some(check) = &opt.checkmark {
                    for class in markup::CHECK_VISIBLE {
                        remove_class(check, class);
                    }
                    add_class(check, markup::CHECK_HIDDEN);
                }
                if let Some(host) = &opt.particles {
                    host.set_inner_html("");
                }
            }
        }
    }

    fn refresh_icons(&mut self) {
        refresh_lucide();
    }
}

/// [`QuizPage`] over the live document
#[derive(Debug, Clone)]
pub struct WebQuizPage {
    document: Document,
}

impl WebQuizPage {
    /// Creates a page over `document`
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    fn section(&self, quiz_id: &str) -> Option<Element> {
        self.document
            .query_selector(&format!(r#"[{}="{quiz_id}"]"#, markup::ATTR_QUIZ_ID))
            .ok()
            .flatten()
    }
}

impl QuizPage for WebQuizPage {
    type View = WebQuizView;

    fn quiz_ids(&self) -> Vec<String> {
        let Some(root) = self.document.document_element() else {
            return Vec::new();
        };
        query_all(
            &root,
            &format!("{}[{}]", class_selector(markup::SECTION), markup::ATTR_QUIZ_ID),
        )
        .into_iter()
        .filter_map(|s| s.get_attribute(markup::ATTR_QUIZ_ID))
        .collect()
    }

    fn bind(&mut self, quiz_id: &str, _content: &QuizContent) -> Option<WebQuizView> {
        self.section(quiz_id).map(WebQuizView::bind)
    }
}

type SharedEngine = Rc<RefCell<QuizEngine<WebQuizPage>>>;

/// Engine plus the timer currently armed for its next deadline
#[derive(Debug, Clone)]
struct Pump {
    engine: SharedEngine,
    armed: Rc<Cell<Option<u64>>>,
}

impl Pump {
    /// Arms a `setTimeout` for the engine's next deadline unless an
    /// earlier one is already pending
    fn arm(&self) {
        let Some(deadline) = self.engine.borrow().next_deadline() else {
            return;
        };
        if self.armed.get().is_some_and(|armed| armed <= deadline) {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let delay = deadline.saturating_sub(self.engine.borrow().now_ms());
        let pump = self.clone();
        let fire = Closure::once_into_js(move || {
            pump.armed.set(None);
            pump.engine.borrow_mut().run_due();
            pump.arm();
        });
        let timeout = i32::try_from(delay).unwrap_or(i32::MAX);
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), timeout)
            .is_ok()
        {
            self.armed.set(Some(deadline));
        }
    }
}

/// Quiz engine entry point for the documentation page
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserQuizEngine {
    pump: Pump,
    document: Document,
    wired: Rc<RefCell<HashSet<String>>>,
}

#[wasm_bindgen]
impl BrowserQuizEngine {
    /// Create an engine; `material_json` is the section renderer's
    /// material document, or absent if it has not loaded
    #[wasm_bindgen(constructor)]
    pub fn new(material_json: Option<String>) -> Result<BrowserQuizEngine, JsValue> {
        install_diagnostics();

        let document = document()?;
        let mut engine = QuizEngine::new(WebQuizPage::new(document.clone()), PerformanceClock);
        if let Some(json) = material_json {
            let material =
                Material::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
            engine.set_content(material);
        }
        Ok(Self {
            pump: Pump {
                engine: Rc::new(RefCell::new(engine)),
                armed: Rc::new(Cell::new(None)),
            },
            document,
            wired: Rc::new(RefCell::new(HashSet::new())),
        })
    }

    /// Replace the material document
    #[wasm_bindgen(js_name = setMaterial)]
    pub fn set_material(&self, material_json: &str) -> Result<(), JsValue> {
        let material =
            Material::from_json(material_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.pump.engine.borrow_mut().set_content(material);
        Ok(())
    }

    /// Initialize one quiz; returns whether it is live
    pub fn init(&self, quiz_id: &str) -> bool {
        let live = self.pump.engine.borrow_mut().init(quiz_id);
        if live {
            if let Err(err) = self.wire(quiz_id) {
                warn!(quiz_id, error = ?err, "quiz listeners not attached");
            }
        }
        live
    }

    /// Initialize every quiz section on the page
    #[wasm_bindgen(js_name = initAll)]
    pub fn init_all(&self) -> usize {
        let ids = self.pump.engine.borrow().page().quiz_ids();
        ids.iter().filter(|id| self.init(id)).count()
    }

    /// Collapse or expand a quiz; returns the new collapsed state
    #[wasm_bindgen(js_name = toggleCollapse)]
    pub fn toggle_collapse(&self, quiz_id: &str) -> Option<bool> {
        self.pump.engine.borrow_mut().toggle_collapse(quiz_id)
    }

    /// Start a quiz over
    pub fn reset(&self, quiz_id: &str) -> bool {
        self.pump.engine.borrow_mut().reset(quiz_id)
    }

    /// Correct answers so far
    #[wasm_bindgen(js_name = correctCount)]
    pub fn correct_count(&self, quiz_id: &str) -> Option<usize> {
        self.pump
            .engine
            .borrow()
            .state(quiz_id)
            .map(crate::quiz::QuizState::correct_count)
    }
}

impl BrowserQuizEngine {
    /// Attaches click listeners to the section's option and next buttons,
    /// once per quiz
    fn wire(&self, quiz_id: &str) -> Result<(), JsValue> {
        if !self.wired.borrow_mut().insert(quiz_id.to_string()) {
            return Ok(());
        }
        let Some(section) = self.pump.engine.borrow().page().section(quiz_id) else {
            return Ok(());
        };

        for button in query_all(&section, &class_selector(markup::OPTION_BUTTON)) {
            let index = |attr: &str| {
                button
                    .get_attribute(attr)
                    .and_then(|v| v.parse::<usize>().ok())
            };
            let (Some(question), Some(option)) = (
                index(markup::ATTR_QUESTION_INDEX),
                index(markup::ATTR_OPTION_INDEX),
            ) else {
                continue;
            };
            let pump = self.pump.clone();
            let document = self.document.clone();
            let id = quiz_id.to_string();
            listen(&button, "click", move |_: Event| {
                let mode = page_mode(&document);
                pump.engine.borrow_mut().select(&id, question, option, mode);
                pump.arm();
            })?;
        }

        for button in query_all(&section, &class_selector(markup::NEXT_BUTTON)) {
            let pump = self.pump.clone();
            let document = self.document.clone();
            let id = quiz_id.to_string();
            listen(&button, "click", move |_: Event| {
                let mode = page_mode(&document);
                pump.engine.borrow_mut().advance(&id, mode);
                pump.arm();
            })?;
        }
        Ok(())
    }
}
