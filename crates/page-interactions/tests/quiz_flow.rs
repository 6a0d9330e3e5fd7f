//! End-to-end quiz scenarios over the mock document
//!
//! Every scenario is written against `QuizDriver`, so the same steps would
//! replay against a browser-backed driver.

use page_interactions::prelude::*;
use page_interactions::quiz::markup;

fn two_questions() -> QuizContent {
    QuizContent::new(vec![
        Question::new("Which keyword declares an immutable binding?", &["var", "let", "mut"], 1)
            .with_explanation("`let` bindings are immutable unless marked `mut`."),
        Question::new("Which macro prints a line?", &["println!", "print", "echo!"], 0)
            .with_explanation("`println!` appends a newline."),
    ])
}

fn answer_and_advance<D: QuizDriver>(driver: &mut D, question: usize, option: usize) {
    assert!(driver.click_option(question, option));
    driver.wait(600);
    assert!(driver.click_next(question));
    driver.wait(400);
}

fn option_classes(driver: &MockQuizDriver, q: usize, o: usize) -> Vec<String> {
    let view = driver.view().unwrap();
    let node = view.option_button(q, o).unwrap();
    driver.dom().borrow().get(node).unwrap().classes.clone()
}

// ===== Scenarios =====

#[test]
fn test_two_correct_answers_reach_summary() {
    let mut driver = MockQuizDriver::new("rust-basics", two_questions()).unwrap();

    assert!(driver.click_option(0, 1));
    assert_eq!(driver.correct_count(), 1);
    driver.wait(600);
    assert!(driver.click_next(0));
    driver.wait(400);
    assert_eq!(driver.active_questions(), vec![1]);
    assert_eq!(
        driver.engine().state("rust-basics").unwrap().current_index(),
        1
    );

    assert!(driver.click_option(1, 0));
    assert_eq!(driver.correct_count(), 2);
    driver.wait(600);
    assert!(driver.click_next(1));
    driver.wait(400);

    assert!(driver.active_questions().is_empty());
    assert_eq!(driver.score_text().as_deref(), Some("2"));
    let view = driver.view().unwrap();
    let dom = driver.dom().borrow();
    assert_eq!(dom.text(view.total_score().unwrap()), Some("2"));
    assert_eq!(dom.style(view.container().unwrap(), "height"), Some("0"));
}

#[test]
fn test_wrong_answer_reveals_correct_option_after_delay() {
    let mut driver = MockQuizDriver::new("rust-basics", two_questions()).unwrap();

    assert!(driver.click_option(0, 0));
    assert_eq!(driver.correct_count(), 0);
    assert!(option_classes(&driver, 0, 0).contains(&markup::OPTION_WRONG.to_string()));
    assert!(!option_classes(&driver, 0, 1).contains(&markup::OPTION_CORRECT_REVEAL.to_string()));

    driver.wait(299);
    assert!(!option_classes(&driver, 0, 1).contains(&markup::OPTION_CORRECT_REVEAL.to_string()));
    driver.wait(1);
    let revealed = option_classes(&driver, 0, 1);
    assert!(revealed.contains(&markup::OPTION_CORRECT_REVEAL.to_string()));
    assert!(revealed.contains(&"border-green-500".to_string()));
    assert!(!revealed.contains(&markup::NEUTRAL_BORDER.to_string()));
    assert_eq!(driver.correct_count(), 0);
}

#[test]
fn test_toggle_collapse_expands_scrolls_and_restores() {
    let mut driver = MockQuizDriver::new("rust-basics", two_questions()).unwrap();
    assert!(driver.is_collapsed());

    assert_eq!(driver.toggle_collapse(), Some(false));
    assert!(!driver.is_collapsed());
    let section = driver.view().unwrap().section();
    assert!(driver
        .dom()
        .borrow()
        .event_history()
        .contains(&DomEvent::ScrollIntoView { target: section }));

    assert_eq!(driver.toggle_collapse(), Some(true));
    assert!(driver.is_collapsed());
}

#[test]
fn test_explicitly_expanded_quiz_starts_open() {
    let driver =
        MockQuizDriver::new("open", two_questions().with_collapsed(false)).unwrap();
    assert!(!driver.is_collapsed());
    let view = driver.view().unwrap();
    assert_eq!(
        driver.dom().borrow().style(view.chevron().unwrap(), "transform"),
        Some("rotate(180deg)")
    );
}

// ===== Selection rules =====

#[test]
fn test_select_ignores_inactive_and_answered_questions() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    assert!(!driver.click_option(1, 0));
    assert!(driver.click_option(0, 1));
    assert!(!driver.click_option(0, 2));
    assert_eq!(driver.correct_count(), 1);
    assert_eq!(
        driver.engine().state("q").unwrap().answer_for(0),
        Some(1)
    );
}

#[test]
fn test_edit_mode_ignores_answers_and_next() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    driver.set_edit_mode(true);
    assert!(!driver.click_option(0, 1));
    assert_eq!(driver.engine().pending_effects(), 0);

    driver.set_edit_mode(false);
    assert!(driver.click_option(0, 1));
    driver.wait(600);
    driver.set_edit_mode(true);
    assert!(!driver.click_next(0));
    driver.wait(400);
    assert_eq!(driver.active_questions(), vec![0]);
}

#[test]
fn test_rapid_next_clicks_advance_once() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    driver.click_option(0, 1);
    driver.wait(600);
    assert!(driver.click_next(0));
    assert!(!driver.click_next(0));
    driver.wait(400);
    assert_eq!(driver.active_questions(), vec![1]);
    assert_eq!(driver.engine().state("q").unwrap().current_index(), 1);
}

#[test]
fn test_feedback_timeline() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    let view_nodes = {
        let v = driver.view().unwrap();
        (
            v.explanation(0).unwrap(),
            v.next_container(0).unwrap(),
            v.particle_host(0, 1).unwrap(),
        )
    };
    let (explanation, next, particles) = view_nodes;
    let hidden = |d: &MockQuizDriver, n| d.dom().borrow().has_class(n, markup::HIDDEN);
    let particle_count =
        |d: &MockQuizDriver| d.dom().borrow().get(particles).unwrap().children().len();

    driver.click_option(0, 1);
    assert_eq!(particle_count(&driver), 12);
    assert!(hidden(&driver, explanation));

    driver.wait(400);
    assert!(!hidden(&driver, explanation));
    assert!(hidden(&driver, next));

    driver.wait(200);
    assert!(!hidden(&driver, next));
    assert_eq!(particle_count(&driver), 12);

    driver.wait(400);
    assert_eq!(particle_count(&driver), 0);
}

#[test]
fn test_options_disabled_after_answer() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    driver.click_option(0, 2);
    let view = driver.view().unwrap();
    let dom = driver.dom().borrow();
    for o in 0..3 {
        let button = view.option_button(0, o).unwrap();
        assert!(dom.is_disabled(button));
        assert!(dom.has_class(button, markup::CURSOR_NOT_ALLOWED));
        assert_eq!(dom.style(button, "pointer-events"), Some("none"));
    }
}

// ===== Reset =====

fn observable(driver: &MockQuizDriver) -> String {
    let view = driver.view().unwrap();
    let dom = driver.dom().borrow();
    let mut out = format!(
        "{:?}|{}|{:?}|",
        driver.engine().state("q").unwrap(),
        driver.correct_count(),
        driver.active_questions()
    );
    for node in dom.descendants(view.section()) {
        let e = dom.get(node).unwrap();
        let mut classes = e.classes.clone();
        classes.sort();
        out.push_str(&format!(
            "{}:{:?}:{:?}:{}:{};",
            e.tag,
            classes,
            e.styles,
            e.disabled,
            e.children().len()
        ));
    }
    out
}

#[test]
fn test_reset_restores_initial_state() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    answer_and_advance(&mut driver, 0, 0);
    answer_and_advance(&mut driver, 1, 0);
    assert_eq!(driver.score_text().as_deref(), Some("1"));

    assert!(driver.reset());
    let state = driver.engine().state("q").unwrap();
    assert!(state.answers().is_empty());
    assert_eq!(state.correct_count(), 0);
    assert_eq!(state.current_index(), 0);
    assert_eq!(driver.active_questions(), vec![0]);
    assert_eq!(driver.score_text(), None);

    let view = driver.view().unwrap();
    let dom = driver.dom().borrow();
    for q in 0..2 {
        assert!(dom.has_class(view.explanation(q).unwrap(), markup::HIDDEN));
        assert!(dom.has_class(view.next_container(q).unwrap(), markup::HIDDEN));
        for o in 0..3 {
            assert!(!dom.is_disabled(view.option_button(q, o).unwrap()));
        }
    }
    assert_eq!(dom.style(view.container().unwrap(), "height"), None);
}

#[test]
fn test_reset_twice_matches_reset_once() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    driver.click_option(0, 0);
    driver.wait(300);

    driver.reset();
    let once = observable(&driver);
    driver.reset();
    let twice = observable(&driver);

    // The epoch is the only thing allowed to differ
    let strip = |s: &str| s.replace(|c: char| c.is_ascii_digit(), "#");
    assert_eq!(strip(&once), strip(&twice));
}

#[test]
fn test_reset_discards_in_flight_effects() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    driver.click_option(0, 0);
    driver.reset();
    driver.wait(1_000);

    let view = driver.view().unwrap();
    let dom = driver.dom().borrow();
    assert!(dom.has_class(view.explanation(0).unwrap(), markup::HIDDEN));
    assert!(dom.has_class(view.next_container(0).unwrap(), markup::HIDDEN));
    let correct = view.option_button(0, 1).unwrap();
    assert!(!dom.has_class(correct, markup::OPTION_CORRECT_REVEAL));
}

#[test]
fn test_quiz_is_replayable_after_reset() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    answer_and_advance(&mut driver, 0, 1);
    answer_and_advance(&mut driver, 1, 1);
    assert_eq!(driver.score_text().as_deref(), Some("1"));

    driver.reset();
    answer_and_advance(&mut driver, 0, 1);
    answer_and_advance(&mut driver, 1, 0);
    assert_eq!(driver.score_text().as_deref(), Some("2"));
}

#[test]
fn test_reinit_from_summary_starts_over() {
    let mut driver = MockQuizDriver::new("q", two_questions()).unwrap();
    answer_and_advance(&mut driver, 0, 1);
    answer_and_advance(&mut driver, 1, 0);
    assert_eq!(driver.score_text().as_deref(), Some("2"));

    assert!(driver.engine_mut().init("q"));
    assert_eq!(driver.score_text(), None);
    assert_eq!(driver.active_questions(), vec![0]);
    assert_eq!(driver.correct_count(), 0);
    {
        let view = driver.view().unwrap();
        let dom = driver.dom().borrow();
        assert_eq!(dom.style(view.container().unwrap(), "height"), None);
        assert!(!dom.is_disabled(view.option_button(0, 1).unwrap()));
    }

    assert!(driver.click_option(0, 1));
    assert_eq!(driver.correct_count(), 1);
    driver.wait(600);
    assert!(driver.click_next(0));
    driver.wait(400);
    answer_and_advance(&mut driver, 1, 2);
    assert_eq!(driver.score_text().as_deref(), Some("1"));
}

// ===== Degraded markup =====

#[test]
fn test_missing_optional_markup_still_scores() {
    let options = MarkupOptions::default()
        .without_explanations()
        .without_decorations()
        .without_summary();
    let mut driver = MockQuizDriver::with_options(
        "bare",
        two_questions(),
        options,
        InteractionConfig::default(),
    )
    .unwrap();

    answer_and_advance(&mut driver, 0, 1);
    answer_and_advance(&mut driver, 1, 0);
    assert_eq!(driver.correct_count(), 2);
    assert!(driver.engine().state("bare").unwrap().is_summary());
    assert_eq!(driver.score_text(), None);
    assert!(driver.active_questions().is_empty());
}

#[test]
fn test_without_next_buttons_quiz_stays_on_question() {
    let options = MarkupOptions::default().without_next_buttons();
    let mut driver = MockQuizDriver::with_options(
        "q",
        two_questions(),
        options,
        InteractionConfig::default(),
    )
    .unwrap();
    driver.click_option(0, 1);
    driver.wait(1_000);
    assert!(!driver.click_next(0));
    assert_eq!(driver.active_questions(), vec![0]);
}

// ===== Page-level initialization =====

#[test]
fn test_init_all_over_page_with_several_quizzes() {
    let mut dom = MockDom::new();
    let body = dom.body();
    let first = two_questions();
    let second = QuizContent::new(vec![Question::new("?", &["a", "b"], 0)]).with_collapsed(false);
    append_quiz_section(&mut dom, body, "first", &first, MarkupOptions::default());
    append_quiz_section(&mut dom, body, "second", &second, MarkupOptions::default());
    append_quiz_section(&mut dom, body, "orphan", &second, MarkupOptions::default());
    let dom = shared(dom);

    let material = Material::new()
        .with_quiz("first", first)
        .with_quiz("second", second)
        .with_quiz("unplaced", two_questions());
    let mut engine = QuizEngine::new(MockQuizPage::new(dom.clone()), ManualClock::new())
        .with_content(material);

    assert_eq!(engine.init_all(), 2);
    assert_eq!(engine.quiz_ids(), vec!["first", "second"]);
    assert_eq!(engine.is_collapsed("first"), Some(true));
    assert_eq!(engine.is_collapsed("second"), Some(false));
    assert_eq!(engine.is_collapsed("orphan"), None);
    assert!(!engine.init("unplaced"));

    // Independent instances: answering one leaves the other untouched
    engine.select("first", 0, 1, PageMode::Live);
    assert_eq!(engine.state("first").unwrap().correct_count(), 1);
    assert_eq!(engine.state("second").unwrap().correct_count(), 0);
    assert!(dom.borrow().icon_refreshes() >= 2);
}

#[test]
fn test_material_json_drives_engine() {
    let json = r#"{
        "index": {
            "intro": {"type": "hero", "title": "Welcome"},
            "check": {
                "collapsed": false,
                "questions": [
                    {
                        "question": "Pick b",
                        "options": ["a", "b"],
                        "answer": 1,
                        "explanation": "b it is"
                    }
                ]
            }
        }
    }"#;
    let material = Material::from_json(json).unwrap();
    let content = material.quiz("check").unwrap().clone();

    let mut dom = MockDom::new();
    let body = dom.body();
    append_quiz_section(&mut dom, body, "check", &content, MarkupOptions::default());
    let mut engine = QuizEngine::new(MockQuizPage::new(shared(dom)), ManualClock::new())
        .with_content(material);

    assert_eq!(engine.init_all(), 1);
    assert!(engine.select("check", 0, 1, PageMode::Live).unwrap().correct);
}

#[test]
fn test_custom_timing_config() {
    let config = InteractionConfig::from_json(r#"{"quiz": {"transition_ms": 100}}"#).unwrap();
    let mut driver =
        MockQuizDriver::with_options("q", two_questions(), MarkupOptions::default(), config)
            .unwrap();
    driver.click_option(0, 1);
    driver.wait(600);
    driver.click_next(0);
    driver.wait(100);
    assert_eq!(driver.active_questions(), vec![1]);
}
