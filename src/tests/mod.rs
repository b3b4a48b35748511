//! Scenario tests driving the labeler through a recording host.
//!
//! These tests exercise the full flow from clicks and key presses to the
//! save and exit callbacks.

mod hotkey_tests;

use std::cell::RefCell;
use std::rc::Rc;

use crate::classifier::ImageClassification;
use crate::config::{ContainerConfig, InterfaceConfig};
use crate::model::{Annotation, Sample};
use crate::navigation::ExitReason;

/// Everything the labeler reported to its host.
#[derive(Debug, Default)]
pub(crate) struct HostLog {
    pub saves: Vec<(usize, Option<Annotation>)>,
    pub exits: Vec<Option<ExitReason>>,
    pub removals: usize,
}

/// Build a labeler whose callbacks record into a shared [`HostLog`].
pub(crate) fn labeler_with_host(
    interface: InterfaceConfig,
    samples: Vec<Sample>,
    container: ContainerConfig,
    sample_index: Option<usize>,
) -> (ImageClassification, Rc<RefCell<HostLog>>) {
    let log = Rc::new(RefCell::new(HostLog::default()));
    let saves = Rc::clone(&log);
    let exits = Rc::clone(&log);
    let removals = Rc::clone(&log);

    let labeler = ImageClassification::builder(interface)
        .samples(samples)
        .container(container)
        .sample_index(sample_index)
        .on_save_task_output_item(move |index, output| {
            saves.borrow_mut().saves.push((index, output));
        })
        .on_exit(move |reason| exits.borrow_mut().exits.push(reason))
        .on_remove_sample(move || removals.borrow_mut().removals += 1)
        .build()
        .expect("valid test configuration");

    (labeler, log)
}

/// `count` unannotated samples.
pub(crate) fn blank_samples(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| Sample::new(format!("image_{i}.png")))
        .collect()
}

/// Shorthand for a two-label cat/dog interface.
pub(crate) fn cat_dog(allow_multiple: bool) -> InterfaceConfig {
    InterfaceConfig::with_labels(["cat", "dog"]).allow_multiple(allow_multiple)
}
