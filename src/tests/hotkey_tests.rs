//! Tests for keyboard dispatch and listener lifetime.

use std::sync::Arc;

use super::{blank_samples, cat_dog, labeler_with_host};
use crate::config::ContainerConfig;
use crate::keybindings::Key;
use crate::message::Message;
use crate::model::{Annotation, LabelEntry};
use crate::navigation::ExitReason;

#[test]
fn test_label_shortcut_commits_in_single_mode() {
    let (mut labeler, host) =
        labeler_with_host(cat_dog(false), blank_samples(3), ContainerConfig::default(), None);
    let subscription = labeler.hotkey_subscription().unwrap();

    assert!(labeler.handle_key(subscription, Key::Char('D')));
    assert_eq!(
        host.borrow().saves,
        vec![(0, Some(Annotation::Single("dog".into())))]
    );
    assert_eq!(labeler.sample_index(), 1);
}

#[test]
fn test_navigation_keys() {
    let (mut labeler, host) =
        labeler_with_host(cat_dog(true), blank_samples(3), ContainerConfig::default(), None);
    let subscription = labeler.hotkey_subscription().unwrap();

    labeler.handle_key(subscription, Key::Char('c'));
    labeler.handle_key(subscription, Key::Space);
    assert_eq!(labeler.sample_index(), 1);
    labeler.handle_key(subscription, Key::Right);
    assert_eq!(labeler.sample_index(), 2);
    labeler.handle_key(subscription, Key::Left);
    assert_eq!(labeler.sample_index(), 1);
    labeler.handle_key(subscription, Key::Backspace);
    assert_eq!(labeler.sample_index(), 0);

    assert_eq!(
        host.borrow().saves,
        vec![
            (0, Some(Annotation::Multiple(vec!["cat".into()]))),
            (1, Some(Annotation::Multiple(vec![]))),
        ]
    );

    assert!(labeler.handle_key(subscription, Key::Enter));
    assert_eq!(host.borrow().exits, vec![None]);
}

#[test]
fn test_unbound_key_is_not_handled() {
    let (mut labeler, _) =
        labeler_with_host(cat_dog(false), blank_samples(2), ContainerConfig::default(), None);
    let subscription = labeler.hotkey_subscription().unwrap();

    assert!(!labeler.handle_key(subscription, Key::Char('z')));
    assert_eq!(labeler.sample_index(), 0);
}

#[test]
fn test_disabled_hotkeys() {
    let container = ContainerConfig {
        disable_hotkeys: true,
    };
    let (mut labeler, _) = labeler_with_host(cat_dog(false), blank_samples(2), container, None);

    assert_eq!(labeler.hotkey_subscription(), None);
    assert_eq!(labeler.listen(), None);
    assert!(labeler.render().buttons.iter().all(|b| b.shortcut.is_none()));

    labeler.set_disable_hotkeys(false);
    let subscription = labeler.hotkey_subscription().unwrap();
    assert!(labeler.handle_key(subscription, Key::Space));

    labeler.set_disable_hotkeys(true);
    assert!(!labeler.handle_key(subscription, Key::Space));
    assert_eq!(labeler.sample_index(), 1);
}

#[test]
fn test_exit_releases_listener() {
    let (mut labeler, host) =
        labeler_with_host(cat_dog(false), blank_samples(1), ContainerConfig::default(), None);
    let subscription = labeler.hotkey_subscription().unwrap();

    labeler.handle_key(subscription, Key::Enter);
    assert_eq!(host.borrow().exits, vec![None]);
    assert!(!labeler.handle_key(subscription, Key::Enter));
    assert_eq!(host.borrow().exits.len(), 1);

    let resubscribed = labeler.listen().unwrap();
    assert_ne!(resubscribed, subscription);
    assert!(labeler.handle_key(resubscribed, Key::Backspace));
    assert_eq!(
        host.borrow().exits.last(),
        Some(&Some(ExitReason::GoToPrevious))
    );
}

#[test]
fn test_new_label_list_invalidates_old_listener() {
    let (mut labeler, _) =
        labeler_with_host(cat_dog(true), blank_samples(2), ContainerConfig::default(), None);
    let old = labeler.hotkey_subscription().unwrap();

    let same = Arc::clone(labeler.labels());
    labeler.set_labels(same).unwrap();
    assert_eq!(labeler.hotkey_subscription(), Some(old), "same list keeps listener");

    let fresh: Arc<[LabelEntry]> = ["fox", "owl"].into_iter().map(LabelEntry::from).collect();
    labeler.set_labels(fresh).unwrap();
    assert!(!labeler.handle_key(old, Key::Char('f')));

    let current = labeler.hotkey_subscription().unwrap();
    assert!(labeler.handle_key(current, Key::Char('f')));
    assert_eq!(labeler.selection().ids(), ["fox".to_string()]);
    assert_eq!(labeler.catalog().shortcut_for("owl"), Some('o'));
}

#[test]
fn test_invalid_label_list_keeps_catalog() {
    let (mut labeler, _) =
        labeler_with_host(cat_dog(false), blank_samples(2), ContainerConfig::default(), None);

    let broken: Arc<[LabelEntry]> = ["a", "a"].into_iter().map(LabelEntry::from).collect();
    assert!(labeler.set_labels(broken).is_err());
    assert_eq!(labeler.catalog().len(), 2);
    assert_eq!(labeler.catalog().position("dog"), Some(1));
}

#[test]
fn test_messages() {
    let (mut labeler, host) =
        labeler_with_host(cat_dog(true), blank_samples(3), ContainerConfig::default(), None);
    let subscription = labeler.hotkey_subscription().unwrap();

    labeler.update(Message::ClickLabel("dog".into()));
    labeler.update(Message::Key {
        subscription,
        key: Key::Char('c'),
    });
    labeler.update(Message::Next(None));
    labeler.update(Message::Prev);
    labeler.update(Message::Next(Some(Annotation::Single("cat".into()))));
    labeler.update(Message::RemoveSample);
    labeler.update(Message::NextNoSave);
    labeler.update(Message::Done);

    let host = host.borrow();
    assert_eq!(
        host.saves,
        vec![
            (0, Some(Annotation::Multiple(vec!["dog".into(), "cat".into()]))),
            (0, Some(Annotation::Single("cat".into()))),
        ]
    );
    assert_eq!(host.removals, 1);
    assert_eq!(host.exits, vec![Some(ExitReason::GoToNext), None]);
}
