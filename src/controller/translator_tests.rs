//! Tests for the intent translator

use super::*;

fn translator() -> IntentTranslator {
    IntentTranslator::new(true)
}

fn key_event(key: InputKey, text_after: &str) -> FieldEvent {
    FieldEvent::KeyInput {
        key,
        text_after: text_after.to_string(),
    }
}

#[test]
fn test_typed_change_becomes_query_changed() {
    let mut translator = translator();
    let dispatch = translator.translate(&key_event(InputKey::Char('a'), "a"), false);

    assert_eq!(dispatch.intent, Some(Intent::QueryChanged("a".to_string())));
    assert!(!dispatch.suppress_default);
}

#[test]
fn test_unchanged_text_produces_no_intent() {
    let mut translator = translator();
    translator.translate(&key_event(InputKey::Char('a'), "a"), false);

    // A keystroke that left the value alone must not refire
    let dispatch = translator.translate(&key_event(InputKey::Other, "a"), false);
    assert_eq!(dispatch, Dispatch::none());
}

#[test]
fn test_backspace_to_empty_is_a_change() {
    let mut translator = translator();
    translator.translate(&key_event(InputKey::Char('a'), "a"), false);

    let dispatch = translator.translate(&key_event(InputKey::Backspace, ""), false);
    assert_eq!(dispatch.intent, Some(Intent::QueryChanged(String::new())));
}

#[test]
fn test_caret_and_modifier_keys_are_ignored() {
    let mut translator = translator();
    for key in [
        InputKey::Left,
        InputKey::Right,
        InputKey::Shift,
        InputKey::Control,
        InputKey::Alt,
        InputKey::Meta,
    ] {
        assert_eq!(translator.translate(&key_event(key, "abc"), true), Dispatch::none());
    }
}

#[test]
fn test_arrows_navigate_when_list_is_showing() {
    let mut translator = translator();

    let down = translator.translate(&key_event(InputKey::Down, ""), true);
    assert_eq!(down.intent, Some(Intent::Navigate(Direction::Down)));
    assert!(down.suppress_default);

    let up = translator.translate(&key_event(InputKey::Up, ""), true);
    assert_eq!(up.intent, Some(Intent::Navigate(Direction::Up)));
    assert!(up.suppress_default);
}

#[test]
fn test_arrows_open_then_navigate_when_list_is_hidden() {
    let mut translator = translator();

    let dispatch = translator.translate(&key_event(InputKey::Down, ""), false);
    assert_eq!(
        dispatch.intent,
        Some(Intent::OpenThenNavigate(Direction::Down))
    );
    assert!(dispatch.suppress_default);
}

#[test]
fn test_enter_commits_only_while_showing() {
    let mut translator = translator();

    let showing = translator.translate(&key_event(InputKey::Enter, ""), true);
    assert_eq!(showing.intent, Some(Intent::Commit));
    assert!(showing.suppress_default);

    // With the list closed, enter belongs to the host
    let hidden = translator.translate(&key_event(InputKey::Enter, ""), false);
    assert_eq!(hidden, Dispatch::none());
}

#[test]
fn test_tab_commits_without_consuming_the_key() {
    let mut translator = translator();
    let dispatch = translator.translate(&key_event(InputKey::Tab, ""), true);

    assert_eq!(dispatch.intent, Some(Intent::Commit));
    assert!(!dispatch.suppress_default);
}

#[test]
fn test_tab_ignored_when_select_on_tab_is_off() {
    let mut translator = IntentTranslator::new(false);
    let dispatch = translator.translate(&key_event(InputKey::Tab, ""), true);

    assert_eq!(dispatch, Dispatch::none());
}

#[test]
fn test_escape_dismisses_and_is_consumed_only_while_showing() {
    let mut translator = translator();

    let showing = translator.translate(&key_event(InputKey::Escape, ""), true);
    assert_eq!(showing.intent, Some(Intent::Dismiss));
    assert!(showing.suppress_default);

    let hidden = translator.translate(&key_event(InputKey::Escape, ""), false);
    assert_eq!(hidden.intent, Some(Intent::Dismiss));
    assert!(!hidden.suppress_default);
}

#[test]
fn test_focus_and_blur_toggle_activation() {
    let mut translator = translator();

    let focus = translator.translate(&FieldEvent::Focus, false);
    assert_eq!(focus.intent, Some(Intent::Activate));

    let blur = translator.translate(&FieldEvent::Blur, false);
    assert_eq!(blur.intent, Some(Intent::Deactivate));
}

#[test]
fn test_double_click_opens_a_hidden_list() {
    let mut translator = translator();

    assert_eq!(translator.translate(&FieldEvent::Click, false), Dispatch::none());
    let second = translator.translate(&FieldEvent::Click, false);
    assert_eq!(second.intent, Some(Intent::OpenList));
}

#[test]
fn test_click_counter_resets_after_firing() {
    let mut translator = translator();
    translator.translate(&FieldEvent::Click, false);
    translator.translate(&FieldEvent::Click, false);

    // The gesture consumed both clicks; a single new click is not enough
    assert_eq!(translator.translate(&FieldEvent::Click, false), Dispatch::none());
}

#[test]
fn test_double_click_on_open_list_does_nothing() {
    let mut translator = translator();
    translator.translate(&FieldEvent::Click, true);
    let second = translator.translate(&FieldEvent::Click, true);

    assert_eq!(second, Dispatch::none());
}

#[test]
fn test_escape_resets_the_click_counter() {
    let mut translator = translator();
    translator.translate(&FieldEvent::Click, false);
    translator.translate(&key_event(InputKey::Escape, ""), false);

    // The earlier click no longer counts toward the gesture
    assert_eq!(translator.translate(&FieldEvent::Click, false), Dispatch::none());
}

#[test]
fn test_blur_resets_the_click_counter() {
    let mut translator = translator();
    translator.translate(&FieldEvent::Click, false);
    translator.translate(&FieldEvent::Blur, false);
    translator.translate(&FieldEvent::Focus, false);

    assert_eq!(translator.translate(&FieldEvent::Click, false), Dispatch::none());
}

#[test]
fn test_paste_becomes_paste_changed() {
    let mut translator = translator();
    let dispatch = translator.translate(
        &FieldEvent::Paste {
            text_after: "pasted".to_string(),
        },
        false,
    );

    assert_eq!(dispatch.intent, Some(Intent::PasteChanged("pasted".to_string())));
}

#[test]
fn test_paste_of_identical_text_is_ignored() {
    let mut translator = translator();
    translator.sync_observed("same");

    let dispatch = translator.translate(
        &FieldEvent::Paste {
            text_after: "same".to_string(),
        },
        false,
    );
    assert_eq!(dispatch, Dispatch::none());
}

#[test]
fn test_sync_observed_suppresses_programmatic_writes() {
    let mut translator = translator();
    translator.sync_observed("Apple");

    // The widget wrote "Apple" itself; the next key event reporting it
    // must not read as typing
    let dispatch = translator.translate(&key_event(InputKey::Other, "Apple"), false);
    assert_eq!(dispatch, Dispatch::none());
}
