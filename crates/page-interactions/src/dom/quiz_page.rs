//! Quiz markup and view over the mock document.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::content::QuizContent;
use crate::dom::element::{DomElement, MockDom, NodeId};
use crate::quiz::feedback::Particle;
use crate::quiz::markup::{self, animation};
use crate::quiz::{QuizPage, QuizView};

/// Mock document shared between a page, its views and a test driver
pub type SharedDom = Rc<RefCell<MockDom>>;

/// Wraps a document for sharing
#[must_use]
pub fn shared(dom: MockDom) -> SharedDom {
    Rc::new(RefCell::new(dom))
}

/// Which optional parts of the quiz markup to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkupOptions {
    /// Explanation panels for questions that carry an explanation
    pub explanations: bool,
    /// Next buttons on every card
    pub next_buttons: bool,
    /// Score summary panel
    pub summary: bool,
    /// Checkmarks and particle hosts inside options
    pub decorations: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            explanations: true,
            next_buttons: true,
            summary: true,
            decorations: true,
        }
    }
}

impl MarkupOptions {
    /// Omit explanation panels
    #[must_use]
    pub const fn without_explanations(mut self) -> Self {
        self.explanations = false;
        self
    }

    /// Omit next buttons
    #[must_use]
    pub const fn without_next_buttons(mut self) -> Self {
        self.next_buttons = false;
        self
    }

    /// Omit the score summary
    #[must_use]
    pub const fn without_summary(mut self) -> Self {
        self.summary = false;
        self
    }

    /// Omit checkmarks and particle hosts
    #[must_use]
    pub const fn without_decorations(mut self) -> Self {
        self.decorations = false;
        self
    }
}

/// Renders a quiz section under `parent` the way the section renderer does
pub fn append_quiz_section(
    dom: &mut MockDom,
    parent: NodeId,
    quiz_id: &str,
    content: &QuizContent,
    options: MarkupOptions,
) -> NodeId {
    let section = dom.append(
        parent,
        DomElement::new("section")
            .with_class(markup::SECTION)
            .with_attr(markup::ATTR_QUIZ_ID, quiz_id),
    );
    let toggle = dom.append(
        section,
        DomElement::new("button")
            .with_class(markup::TOGGLE_BUTTON)
            .with_text(content.title.as_deref().unwrap_or("Quiz")),
    );
    dom.append(toggle, DomElement::new("i").with_class(markup::CHEVRON));

    let container = dom.append(
        section,
        DomElement::new("div").with_class(markup::QUESTIONS_CONTAINER),
    );
    for (q, question) in content.questions.iter().enumerate() {
        let index = q.to_string();
        let card = dom.append(
            container,
            DomElement::new("div")
                .with_class(markup::QUESTION_CARD)
                .with_attr(markup::ATTR_QUESTION_INDEX, &index),
        );
        dom.append(card, DomElement::new("h4").with_text(&question.prompt));
        for (o, label) in question.options.iter().enumerate() {
            let button = dom.append(
                card,
                DomElement::new("button")
                    .with_class(markup::OPTION_BUTTON)
                    .with_class(markup::NEUTRAL_BORDER)
                    .with_attr(markup::ATTR_QUESTION_INDEX, &index)
                    .with_attr(markup::ATTR_OPTION_INDEX, &o.to_string())
                    .with_text(label),
            );
            if options.decorations {
                let check = dom.append(
                    button,
                    DomElement::new("span")
                        .with_class(markup::OPTION_CHECKMARK)
                        .with_class(markup::CHECK_HIDDEN),
                );
                let svg = dom.append(check, DomElement::new("svg"));
                dom.append(svg, DomElement::new("polyline"));
                dom.append(
                    button,
                    DomElement::new("div").with_class(markup::OPTION_PARTICLES),
                );
            }
        }
        if options.explanations {
            if let Some(text) = &question.explanation {
                dom.append(
                    card,
                    DomElement::new("div")
                        .with_class(markup::EXPLANATION_PANEL)
                        .with_class(markup::HIDDEN)
                        .with_text(text),
                );
            }
        }
        if options.next_buttons {
            let next = dom.append(
                card,
                DomElement::new("div")
                    .with_class(markup::NEXT_CONTAINER)
                    .with_class(markup::HIDDEN),
            );
            dom.append(
                next,
                DomElement::new("button")
                    .with_class(markup::NEXT_BUTTON)
                    .with_text("Next"),
            );
        }
    }

    if options.summary {
        let summary = dom.append(
            section,
            DomElement::new("div")
                .with_class(markup::SCORE_SUMMARY)
                .with_class(markup::HIDDEN),
        );
        dom.append(
            summary,
            DomElement::new("span")
                .with_class(markup::FINAL_SCORE)
                .with_text("0"),
        );
        dom.append(summary, DomElement::new("span").with_text(" / "));
        dom.append(
            summary,
            DomElement::new("span")
                .with_class(markup::TOTAL_SCORE)
                .with_text(&content.len().to_string()),
        );
        dom.append(
            summary,
            DomElement::new("button")
                .with_class(markup::RESET_BUTTON)
                .with_text("Retake"),
        );
    }
    section
}

/// Handles of one option button
#[derive(Debug, Clone, Copy)]
struct OptionHandles {
    button: NodeId,
    checkmark: Option<NodeId>,
    stroke: Option<NodeId>,
    particles: Option<NodeId>,
}

/// Handles of one question card
#[derive(Debug, Clone)]
struct CardHandles {
    card: NodeId,
    options: BTreeMap<usize, OptionHandles>,
    explanation: Option<NodeId>,
    next_container: Option<NodeId>,
    next_button: Option<NodeId>,
}

/// [`QuizView`] over one quiz section of a [`MockDom`]
#[derive(Debug)]
pub struct DomQuizView {
    dom: SharedDom,
    section: NodeId,
    container: Option<NodeId>,
    chevron: Option<NodeId>,
    toggle: Option<NodeId>,
    summary: Option<NodeId>,
    final_score: Option<NodeId>,
    total_score: Option<NodeId>,
    reset_button: Option<NodeId>,
    cards: BTreeMap<usize, CardHandles>,
}

impl DomQuizView {
    /// Captures handles below `section`
    #[must_use]
    pub fn bind(dom: SharedDom, section: NodeId) -> Self {
        let d = dom.borrow();
        let attr = |node: NodeId, key: &str| {
            d.get(node)
                .and_then(|e| e.get_attr(key))
                .map(str::to_string)
        };
        let bind_option = |button: NodeId| {
            let checkmark = d.query_first(button, markup::OPTION_CHECKMARK);
            let stroke = checkmark.and_then(|c| {
                d.descendants(c)
                    .into_iter()
                    .find(|n| d.get(*n).is_some_and(|e| e.tag == "polyline"))
            });
            let handles = OptionHandles {
                button,
                checkmark,
                stroke,
                particles: d.query_first(button, markup::OPTION_PARTICLES),
            };
            (attr(button, markup::ATTR_OPTION_INDEX), handles)
        };
        let bind_card = |card: NodeId| {
            let options = d.query_class(card, markup::OPTION_BUTTON);
            let handles = CardHandles {
                card,
                options: markup::key_by_index(options.into_iter().map(&bind_option)),
                explanation: d.query_first(card, markup::EXPLANATION_PANEL),
                next_container: d.query_first(card, markup::NEXT_CONTAINER),
                next_button: d.query_first(card, markup::NEXT_BUTTON),
            };
            (attr(card, markup::ATTR_QUESTION_INDEX), handles)
        };
        let cards = markup::key_by_index(
            d.query_class(section, markup::QUESTION_CARD)
                .into_iter()
                .map(bind_card),
        );
        let container = d.query_first(section, markup::QUESTIONS_CONTAINER);
        let chevron = d.query_first(section, markup::CHEVRON);
        let toggle = d.query_first(section, markup::TOGGLE_BUTTON);
        let summary = d.query_first(section, markup::SCORE_SUMMARY);
        let final_score = d.query_first(section, markup::FINAL_SCORE);
        let total_score = d.query_first(section, markup::TOTAL_SCORE);
        let reset_button = d.query_first(section, markup::RESET_BUTTON);
        drop(d);

        Self {
            dom,
            section,
            container,
            chevron,
            toggle,
            summary,
            final_score,
            total_score,
            reset_button,
            cards,
        }
    }

    /// The section element
    #[must_use]
    pub const fn section(&self) -> NodeId {
        self.section
    }

    /// Card element of `question`
    #[must_use]
    pub fn card(&self, question: usize) -> Option<NodeId> {
        self.cards.get(&question).map(|c| c.card)
    }

    /// Number of bound cards
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Option button of `question`
    #[must_use]
    pub fn option_button(&self, question: usize, option: usize) -> Option<NodeId> {
        self.option(question, option).map(|o| o.button)
    }

    /// Checkmark of an option
    #[must_use]
    pub fn checkmark(&self, question: usize, option: usize) -> Option<NodeId> {
        self.option(question, option).and_then(|o| o.checkmark)
    }

    /// Particle host of an option
    #[must_use]
    pub fn particle_host(&self, question: usize, option: usize) -> Option<NodeId> {
        self.option(question, option).and_then(|o| o.particles)
    }

    /// Explanation panel of `question`
    #[must_use]
    pub fn explanation(&self, question: usize) -> Option<NodeId> {
        self.cards.get(&question).and_then(|c| c.explanation)
    }

    /// Next-button wrapper of `question`
    #[must_use]
    pub fn next_container(&self, question: usize) -> Option<NodeId> {
        self.cards.get(&question).and_then(|c| c.next_container)
    }

    /// Next button of `question`
    #[must_use]
    pub fn next_button(&self, question: usize) -> Option<NodeId> {
        self.cards.get(&question).and_then(|c| c.next_button)
    }

    /// Questions container
    #[must_use]
    pub const fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Collapse chevron
    #[must_use]
    pub const fn chevron(&self) -> Option<NodeId> {
        self.chevron
    }

    /// Header toggle button
    #[must_use]
    pub const fn toggle_button(&self) -> Option<NodeId> {
        self.toggle
    }

    /// Score summary panel
    #[must_use]
    pub const fn summary(&self) -> Option<NodeId> {
        self.summary
    }

    /// Final score placeholder
    #[must_use]
    pub const fn final_score(&self) -> Option<NodeId> {
        self.final_score
    }

    /// Question count placeholder
    #[must_use]
    pub const fn total_score(&self) -> Option<NodeId> {
        self.total_score
    }

    /// Retake button
    #[must_use]
    pub const fn reset_button(&self) -> Option<NodeId> {
        self.reset_button
    }

    /// Indices of cards currently carrying the active class
    #[must_use]
    pub fn active_cards(&self) -> Vec<usize> {
        let dom = self.dom.borrow();
        self.cards
            .iter()
            .filter(|(_, c)| dom.has_class(c.card, markup::ACTIVE))
            .map(|(i, _)| *i)
            .collect()
    }

    fn option(&self, question: usize, option: usize) -> Option<&OptionHandles> {
        self.cards.get(&question).and_then(|c| c.options.get(&option))
    }

    fn show_checkmark(dom: &mut MockDom, handles: &OptionHandles) {
        if let Some(check) = handles.checkmark {
            dom.remove_class(check, markup::CHECK_HIDDEN);
            for class in markup::CHECK_VISIBLE {
                dom.add_class(check, class);
            }
        }
    }

    fn style_option(dom: &mut MockDom, button: NodeId, marker: &str, style: [&str; 2]) {
        dom.add_class(button, marker);
        dom.remove_class(button, markup::NEUTRAL_BORDER);
        for class in style {
            dom.add_class(button, class);
        }
    }

    fn reveal(dom: &mut MockDom, node: Option<NodeId>, anim: &str) -> bool {
        let Some(node) = node else {
            return false;
        };
        dom.remove_class(node, markup::HIDDEN);
        dom.set_style(node, "animation", anim);
        true
    }
}

impl QuizView for DomQuizView {
    fn set_collapsed(&mut self, collapsed: bool) {
        let mut dom = self.dom.borrow_mut();
        if collapsed {
            dom.add_class(self.section, markup::COLLAPSED);
            dom.remove_class(self.section, markup::EXPANDED);
        } else {
            dom.remove_class(self.section, markup::COLLAPSED);
            dom.add_class(self.section, markup::EXPANDED);
        }
        if let Some(chevron) = self.chevron {
            dom.set_style(chevron, "transform", markup::chevron_transform(collapsed));
        }
    }

    fn scroll_into_view(&mut self) {
        self.dom.borrow_mut().scroll_into_view(self.section);
    }

    fn show_question(&mut self, question: usize) {
        let mut dom = self.dom.borrow_mut();
        for (&i, card) in &self.cards {
            if i == question {
                dom.add_class(card.card, markup::ACTIVE);
                dom.set_style(card.card, "animation", animation::CARD_IN);
            } else {
                dom.remove_class(card.card, markup::ACTIVE);
            }
        }
    }

    fn hide_question(&mut self, question: usize) {
        if let Some(card) = self.card(question) {
            self.dom.borrow_mut().remove_class(card, markup::ACTIVE);
        }
    }

    fn begin_exit(&mut self, question: usize) {
        if let Some(card) = self.card(question) {
            self.dom
                .borrow_mut()
                .set_style(card, "animation", animation::CARD_OUT);
        }
    }

    fn mark_correct(&mut self, question: usize, option: usize) {
        let Some(handles) = self.option(question, option).copied() else {
            return;
        };
        let mut dom = self.dom.borrow_mut();
        Self::style_option(
            &mut dom,
            handles.button,
            markup::OPTION_CORRECT,
            markup::CORRECT_STYLE,
        );
        Self::show_checkmark(&mut dom, &handles);
        if let Some(stroke) = handles.stroke {
            dom.set_style(stroke, "stroke-dasharray", "100");
            dom.set_style(stroke, "stroke-dashoffset", "100");
            dom.set_style(stroke, "animation", animation::CHECK_DRAW);
        }
        dom.set_style(handles.button, "animation", animation::BOUNCE);
    }

    fn mark_wrong(&mut self, question: usize, option: usize) {
        let Some(button) = self.option_button(question, option) else {
            return;
        };
        let mut dom = self.dom.borrow_mut();
        Self::style_option(&mut dom, button, markup::OPTION_WRONG, markup::WRONG_STYLE);
        dom.set_style(button, "animation", animation::SHAKE);
    }

    fn reveal_correct(&mut self, question: usize, option: usize) {
        let Some(handles) = self.option(question, option).copied() else {
            return;
        };
        let mut dom = self.dom.borrow_mut();
        Self::style_option(
            &mut dom,
            handles.button,
            markup::OPTION_CORRECT_REVEAL,
            markup::CORRECT_STYLE,
        );
        Self::show_checkmark(&mut dom, &handles);
    }

    fn burst_particles(&mut self, question: usize, option: usize, particles: &[Particle]) {
        let Some(host) = self.particle_host(question, option) else {
            return;
        };
        let mut dom = self.dom.borrow_mut();
        dom.clear_children(host);
        for particle in particles {
            dom.append(
                host,
                DomElement::new("div")
                    .with_class(markup::PARTICLE)
                    .with_attr("style", &particle.css_text()),
            );
        }
    }

    fn clear_particles(&mut self, question: usize, option: usize) {
        if let Some(host) = self.particle_host(question, option) {
            self.dom.borrow_mut().clear_children(host);
        }
    }

    fn disable_options(&mut self, question: usize) {
        let Some(card) = self.cards.get(&question) else {
            return;
        };
        let mut dom = self.dom.borrow_mut();
        for option in card.options.values() {
            dom.set_disabled(option.button, true);
            dom.add_class(option.button, markup::CURSOR_NOT_ALLOWED);
            dom.set_style(option.button, "pointer-events", "none");
        }
    }

    fn show_explanation(&mut self, question: usize) -> bool {
        let panel = self.explanation(question);
        Self::reveal(&mut self.dom.borrow_mut(), panel, animation::EXPLANATION)
    }

    fn show_next(&mut self, question: usize) -> bool {
        let next = self.next_container(question);
        Self::reveal(&mut self.dom.borrow_mut(), next, animation::NEXT)
    }

    fn show_summary(&mut self, correct: usize, total: usize) -> bool {
        let mut dom = self.dom.borrow_mut();
        for card in self.cards.values() {
            dom.remove_class(card.card, markup::ACTIVE);
        }
        if let Some(container) = self.container {
            dom.set_style(container, "min-height", "0");
            dom.set_style(container, "height", "0");
            dom.set_style(container, "overflow", "hidden");
        }
        let (Some(summary), Some(score)) = (self.summary, self.final_score) else {
            return false;
        };
        dom.set_text(score, &correct.to_string());
        if let Some(node) = self.total_score {
            dom.set_text(node, &total.to_string());
        }
        Self::reveal(&mut dom, Some(summary), animation::SUMMARY)
    }

    fn restore(&mut self) {
        let mut dom = self.dom.borrow_mut();
        if let Some(summary) = self.summary {
            dom.add_class(summary, markup::HIDDEN);
        }
        if let Some(container) = self.container {
            for property in ["min-height", "height", "overflow"] {
                dom.set_style(container, property, "");
            }
        }
        for card in self.cards.values() {
            for panel in [card.explanation, card.next_container].into_iter().flatten() {
                dom.add_class(panel, markup::HIDDEN);
            }
            for option in card.options.values() {
                dom.set_disabled(option.button, false);
                dom.set_style(option.button, "pointer-events", "auto");
                for class in markup::FEEDBACK_CLASSES {
                    dom.remove_class(option.button, class);
                }
                dom.add_class(option.button, markup::NEUTRAL_BORDER);
                dom.set_style(option.button, "animation", "");
                if let Some(check) = option.checkmark {
                    for class in markup::CHECK_VISIBLE {
                        dom.remove_class(check, class);
                    }
                    dom.add_class(check, markup::CHECK_HIDDEN);
                }
                if let Some(host) = option.particles {
                    dom.clear_children(host);
                }
            }
        }
    }

    fn refresh_icons(&mut self) {
        self.dom.borrow_mut().refresh_icons();
    }
}

/// [`QuizPage`] over a shared [`MockDom`]
#[derive(Debug, Clone)]
pub struct MockQuizPage {
    dom: SharedDom,
}

impl MockQuizPage {
    /// Creates a page over `dom`
    #[must_use]
    pub const fn new(dom: SharedDom) -> Self {
        Self { dom }
    }

    /// The shared document
    #[must_use]
    pub const fn dom(&self) -> &SharedDom {
        &self.dom
    }

    fn find_section(&self, quiz_id: &str) -> Option<NodeId> {
        let dom = self.dom.borrow();
        dom.query_class(dom.root(), markup::SECTION)
            .into_iter()
            .find(|n| dom.get(*n).and_then(|e| e.get_attr(markup::ATTR_QUIZ_ID)) == Some(quiz_id))
    }
}

impl QuizPage for MockQuizPage {
    type View = DomQuizView;

    fn quiz_ids(&self) -> Vec<String> {
        let dom = self.dom.borrow();
        dom.query_class(dom.root(), markup::SECTION)
            .into_iter()
            .filter_map(|n| dom.get(n).and_then(|e| e.get_attr(markup::ATTR_QUIZ_ID)))
            .map(str::to_string)
            .collect()
    }

    fn bind(&mut self, quiz_id: &str, _content: &QuizContent) -> Option<DomQuizView> {
        let section = self.find_section(quiz_id)?;
        Some(DomQuizView::bind(Rc::clone(&self.dom), section))
    }
}
