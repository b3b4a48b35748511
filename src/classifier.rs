//! The image classification labeler.
//!
//! [`ImageClassification`] ties the label catalog, the selection state
//! machine and the sample cursor together. The host feeds it clicks, key
//! presses and re-render inputs; it answers through the save and exit
//! callbacks and through [`ImageClassification::render`].

use std::sync::Arc;

use web_time::Instant;

use crate::callback::{ExitCallback, RemoveSampleCallback, SaveCallback};
use crate::catalog::{CatalogCache, LabelCatalog};
use crate::config::{ContainerConfig, InterfaceConfig};
use crate::error::{ClassifyError, Result};
use crate::keybindings::{HotkeyAction, Key, KeyBindings};
use crate::message::Message;
use crate::model::{Annotation, LabelEntry, Sample};
use crate::navigation::{ExitReason, NavigationOutcome, SampleCursor};
use crate::selection::{Selection, SelectionMode, ToggleOutcome};
use crate::view::{ClassificationView, LabelButton};
use crate::widget_state::{HotkeySubscription, WidgetState};

/// Builder for [`ImageClassification`].
#[derive(Debug)]
pub struct ImageClassificationBuilder {
    interface: InterfaceConfig,
    container: ContainerConfig,
    samples: Vec<Sample>,
    sample_index: Option<usize>,
    on_save: SaveCallback,
    on_exit: ExitCallback,
    on_remove_sample: RemoveSampleCallback,
}

impl ImageClassificationBuilder {
    /// Set the samples to classify.
    pub fn samples(mut self, samples: Vec<Sample>) -> Self {
        self.samples = samples;
        self
    }

    /// Set container options.
    pub fn container(mut self, container: ContainerConfig) -> Self {
        self.container = container;
        self
    }

    /// Let the host control the sample index.
    pub fn sample_index(mut self, index: Option<usize>) -> Self {
        self.sample_index = index;
        self
    }

    /// Called with `(index, output)` on every commit.
    pub fn on_save_task_output_item<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, Option<Annotation>) + 'static,
    {
        let mut f = f;
        self.on_save = SaveCallback::new(move |(index, output)| f(index, output));
        self
    }

    /// Called when the labeler asks to leave the session.
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<ExitReason>) + 'static,
    {
        self.on_exit = ExitCallback::new(f);
        self
    }

    /// Called when the user asks to remove the current sample.
    pub fn on_remove_sample<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let mut f = f;
        self.on_remove_sample = RemoveSampleCallback::new(move |()| f());
        self
    }

    /// Validate the configuration and activate the labeler.
    ///
    /// Fails without rendering anything when no usable label list is
    /// configured, when there are no samples, or when the host index is out
    /// of range.
    pub fn build(self) -> Result<ImageClassification> {
        let labels: Arc<[LabelEntry]> = self.interface.resolved_labels()?.into();
        let mut catalog_cache = CatalogCache::new();
        let (catalog, _) = catalog_cache.get_or_build(&labels)?;

        if self.samples.is_empty() {
            return Err(ClassifyError::NoSamples);
        }
        if let Some(index) = self.sample_index {
            check_index(index, self.samples.len())?;
        }

        let mode = self.interface.selection_mode();
        let cursor = SampleCursor::new(self.sample_index, self.samples.len());
        let bindings = catalog.key_bindings();

        let mut labeler = ImageClassification {
            labels,
            mode,
            container: self.container,
            samples: self.samples,
            catalog_cache,
            catalog,
            bindings,
            cursor,
            selection: Selection::Empty,
            widgets: WidgetState::new(),
            on_save: self.on_save,
            on_exit: self.on_exit,
            on_remove_sample: self.on_remove_sample,
        };
        labeler.load_current_sample();
        if !labeler.container.disable_hotkeys {
            labeler.widgets.hotkeys.acquire();
        }

        log::info!(
            "Started classification: {} labels, {} samples, {:?} select",
            labeler.catalog.len(),
            labeler.samples.len(),
            labeler.mode
        );
        Ok(labeler)
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(ClassifyError::index_out_of_range(index, len));
    }
    Ok(())
}

/// Single-image classification labeler.
#[derive(Debug)]
pub struct ImageClassification {
    labels: Arc<[LabelEntry]>,
    mode: SelectionMode,
    container: ContainerConfig,
    samples: Vec<Sample>,
    catalog_cache: CatalogCache,
    catalog: Arc<LabelCatalog>,
    bindings: KeyBindings,
    cursor: SampleCursor,
    selection: Selection,
    widgets: WidgetState,
    on_save: SaveCallback,
    on_exit: ExitCallback,
    on_remove_sample: RemoveSampleCallback,
}

impl ImageClassification {
    /// Start building a labeler for the given interface.
    pub fn builder(interface: InterfaceConfig) -> ImageClassificationBuilder {
        ImageClassificationBuilder {
            interface,
            container: ContainerConfig::default(),
            samples: Vec::new(),
            sample_index: None,
            on_save: SaveCallback::none(),
            on_exit: ExitCallback::none(),
            on_remove_sample: RemoveSampleCallback::none(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Current sample index.
    pub fn sample_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_sample(&self) -> Option<&Sample> {
        self.samples.get(self.cursor.index())
    }

    /// The annotation a commit would store right now.
    pub fn current_output(&self) -> Option<Annotation> {
        self.selection.to_annotation(self.mode)
    }

    /// Label currently shown enlarged, if any.
    pub fn enlarged_label(&self) -> Option<&str> {
        self.widgets.enlarged.label()
    }

    /// Handle for dispatching key events, while a listener is registered.
    pub fn hotkey_subscription(&self) -> Option<HotkeySubscription> {
        self.widgets.hotkeys.current()
    }

    // ========================================================================
    // User actions
    // ========================================================================

    /// Apply a message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::ClickLabel(id) => {
                self.click_label(&id);
            }
            Message::Key { subscription, key } => {
                self.handle_key(subscription, key);
            }
            Message::Next(Some(output)) => {
                self.commit_output(Some(output));
            }
            Message::Next(None) => {
                self.commit();
            }
            Message::Prev => {
                self.retreat();
            }
            Message::Done => self.finish(),
            Message::NextNoSave => self.next_no_save(),
            Message::RemoveSample => self.remove_sample(),
        }
    }

    /// Toggle a label by id, as a button click would.
    ///
    /// Returns `None` for an id that is not in the catalog.
    pub fn click_label(&mut self, id: &str) -> Option<ToggleOutcome> {
        self.click_label_at(id, Instant::now())
    }

    /// [`click_label`](Self::click_label) with an explicit clock.
    pub fn click_label_at(&mut self, id: &str, now: Instant) -> Option<ToggleOutcome> {
        let Some(index) = self.catalog.position(id) else {
            log::warn!("Ignoring click on unknown label '{}'", id);
            return None;
        };
        Some(self.toggle_label(index, now))
    }

    /// Dispatch a key press received under `subscription`.
    ///
    /// Returns true if the key was bound and handled. Keys arriving under a
    /// stale or released subscription are ignored.
    pub fn handle_key(&mut self, subscription: HotkeySubscription, key: Key) -> bool {
        self.handle_key_at(subscription, key, Instant::now())
    }

    /// [`handle_key`](Self::handle_key) with an explicit clock.
    pub fn handle_key_at(
        &mut self,
        subscription: HotkeySubscription,
        key: Key,
        now: Instant,
    ) -> bool {
        if !self.widgets.hotkeys.accepts(subscription) {
            log::debug!("Dropping {:?} from stale hotkey subscription", key);
            return false;
        }
        let Some(action) = self.bindings.action_for_key(key) else {
            return false;
        };

        log::debug!("⌨️ {:?} -> {:?}", key, action);
        match action {
            HotkeyAction::Next => {
                self.commit();
            }
            HotkeyAction::Previous => {
                self.retreat();
            }
            HotkeyAction::Done => self.finish(),
            HotkeyAction::ToggleLabel(index) => {
                self.toggle_label(index, now);
            }
        }
        true
    }

    fn toggle_label(&mut self, index: usize, now: Instant) -> ToggleOutcome {
        let catalog = Arc::clone(&self.catalog);
        let id = catalog.labels()[index].id.as_str();

        self.widgets.enlarged.enlarge(id, now);
        let outcome = self.selection.toggle(id, self.mode);
        log::debug!(
            "🏷️ Toggled '{}' on sample {}: {:?} -> {:?}",
            id,
            self.cursor.index(),
            outcome,
            self.selection.ids()
        );

        if outcome.commits() {
            let output = self.selection.to_annotation(self.mode);
            self.commit_output(output);
        }
        outcome
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Save the current selection for the current sample and advance.
    pub fn commit(&mut self) -> NavigationOutcome {
        let output = self.selection.to_annotation(self.mode);
        self.commit_output(output)
    }

    /// Save `output` for the current sample and advance.
    ///
    /// On the last sample the cursor stays put and the host is asked to
    /// leave towards the next item.
    pub fn commit_output(&mut self, output: Option<Annotation>) -> NavigationOutcome {
        let index = self.cursor.index();
        log::debug!("💾 Saving sample {}: {:?}", index, output);
        if !self.on_save.call((index, output)) {
            log::warn!("No save handler registered; output for sample {} dropped", index);
        }

        let outcome = self.cursor.advance();
        match outcome {
            NavigationOutcome::Moved(_) => self.load_current_sample(),
            NavigationOutcome::Exit(reason) => self.exit(Some(reason)),
        }
        outcome
    }

    /// Go back one sample without saving.
    ///
    /// On the first sample the host is asked to leave towards the previous
    /// item instead.
    pub fn retreat(&mut self) -> NavigationOutcome {
        let outcome = self.cursor.retreat();
        match outcome {
            NavigationOutcome::Moved(_) => self.load_current_sample(),
            NavigationOutcome::Exit(reason) => self.exit(Some(reason)),
        }
        outcome
    }

    /// Leave the session without saving.
    pub fn finish(&mut self) {
        self.exit(None);
    }

    /// Leave towards the next item without saving the current sample.
    pub fn next_no_save(&mut self) {
        self.exit(Some(ExitReason::GoToNext));
    }

    /// Ask the host to remove the current sample.
    pub fn remove_sample(&mut self) {
        if !self.on_remove_sample.call(()) {
            log::debug!("No remove-sample handler registered");
        }
    }

    fn exit(&mut self, reason: Option<ExitReason>) {
        let reason_name = reason.map_or("done", ExitReason::as_str);
        if self.on_exit.call(reason) {
            log::info!("🚪 Exiting classification session ({})", reason_name);
            self.widgets.hotkeys.release();
        } else {
            log::debug!("Exit ({}) requested but no exit handler registered", reason_name);
        }
    }

    /// Reset the selection from the current sample's stored annotation.
    fn load_current_sample(&mut self) {
        let annotation = self
            .samples
            .get(self.cursor.index())
            .and_then(|sample| sample.annotation.as_ref());
        self.selection = Selection::from_annotation(annotation, self.mode);
        log::debug!(
            "Loaded sample {} with selection {:?}",
            self.cursor.index(),
            self.selection.ids()
        );
    }

    // ========================================================================
    // Host inputs
    // ========================================================================

    /// Feed the host's sample index.
    ///
    /// A changed index replaces the local cursor and discards any unsaved
    /// selection. `None` leaves the cursor under local control.
    pub fn set_external_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            check_index(index, self.samples.len())?;
        }
        if self.cursor.sync_external(index) {
            log::debug!("Host moved to sample {}", self.cursor.index());
            self.load_current_sample();
        }
        Ok(())
    }

    /// Replace the samples, e.g. after the host stored a committed output.
    ///
    /// The selection is re-derived from the current sample.
    pub fn set_samples(&mut self, samples: Vec<Sample>) -> Result<()> {
        if samples.is_empty() {
            return Err(ClassifyError::NoSamples);
        }
        self.samples = samples;
        self.cursor.set_len(self.samples.len());
        self.load_current_sample();
        Ok(())
    }

    /// Replace the label list.
    ///
    /// The catalog is rebuilt only when `labels` is a different list than the
    /// current one; a rebuild also re-registers the keyboard listener so
    /// handles bound to the old shortcuts go stale. On error the previous
    /// catalog stays in place.
    pub fn set_labels(&mut self, labels: Arc<[LabelEntry]>) -> Result<()> {
        let (catalog, rebuilt) = self.catalog_cache.get_or_build(&labels)?;
        if !rebuilt {
            return Ok(());
        }

        self.labels = labels;
        self.bindings = catalog.key_bindings();
        self.catalog = catalog;
        if self.widgets.hotkeys.is_active() {
            self.widgets.hotkeys.acquire();
        }
        Ok(())
    }

    /// The configured label list.
    pub fn labels(&self) -> &Arc<[LabelEntry]> {
        &self.labels
    }

    /// Switch between single- and multi-select.
    pub fn set_allow_multiple(&mut self, allow_multiple: bool) {
        let mode = SelectionMode::from_allow_multiple(allow_multiple);
        if mode != self.mode {
            self.mode = mode;
            self.selection.coerce(mode);
        }
    }

    /// Turn keyboard handling off or back on.
    pub fn set_disable_hotkeys(&mut self, disable: bool) {
        self.container.disable_hotkeys = disable;
        if disable {
            self.widgets.hotkeys.release();
        } else if !self.widgets.hotkeys.is_active() {
            self.widgets.hotkeys.acquire();
        }
    }

    /// Register a keyboard listener again, e.g. after an exit released it.
    ///
    /// Returns `None` while hotkeys are disabled.
    pub fn listen(&mut self) -> Option<HotkeySubscription> {
        if self.container.disable_hotkeys {
            return None;
        }
        Some(
            self.widgets
                .hotkeys
                .current()
                .unwrap_or_else(|| self.widgets.hotkeys.acquire()),
        )
    }

    /// Advance the clock for timed view state. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.widgets.enlarged.poll(now)
    }

    /// When [`tick`](Self::tick) next needs to run, if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.widgets.enlarged.deadline()
    }

    /// Cancel timers and release the keyboard listener.
    pub fn teardown(&mut self) {
        self.widgets.teardown();
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Build the view model for the current sample.
    pub fn render(&self) -> ClassificationView {
        let show_shortcuts = !self.container.disable_hotkeys;
        let buttons = self
            .catalog
            .labels()
            .iter()
            .enumerate()
            .map(|(index, label)| LabelButton {
                id: label.id.clone(),
                description: label.description.clone(),
                color: self.catalog.color(index).unwrap_or_default(),
                shortcut: if show_shortcuts {
                    self.catalog.shortcut(index)
                } else {
                    None
                },
                checked: self.selection.contains(&label.id),
                enlarged: self.widgets.enlarged.is_enlarged(&label.id),
            })
            .collect();

        ClassificationView {
            image_url: self
                .current_sample()
                .map(|sample| sample.image_url.clone())
                .unwrap_or_default(),
            sample_index: self.cursor.index(),
            sample_count: self.cursor.len(),
            progress: self.cursor.progress(),
            buttons,
        }
    }
}

impl Drop for ImageClassification {
    fn drop(&mut self) {
        self.teardown();
    }
}
