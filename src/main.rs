//! Session replay for the image classification labeler.
//!
//! Usage: `image-classification <session.json>`
//!
//! Reads one event per line from stdin and prints every save and exit as a
//! JSON line on stdout. Events are key names (`space`, `backspace`, `enter`,
//! `left`, `right`, or a single character), `click <label id>`, `next`,
//! `prev`, `done`, `skip` and `remove`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// The replay tool reads files and stdin, which the browser build has no use for
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::rc::Rc;

    use image_classification::{
        Annotation, ClassifyError, ExitReason, ImageClassification, Key, Message, SessionConfig,
    };
    use serde::Serialize;

    /// Something the labeler reported to the host.
    #[derive(Debug, Serialize)]
    #[serde(tag = "event", rename_all = "lowercase")]
    enum HostEvent {
        Save {
            index: usize,
            output: Option<Annotation>,
        },
        Exit {
            reason: Option<ExitReason>,
        },
        Remove {
            index: usize,
        },
    }

    fn rust_log_set() -> bool {
        std::env::var_os("RUST_LOG").is_some()
    }

    fn init_logging() {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Trace)
            .parse_default_env()
            .init();
        if !rust_log_set() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }

    /// Turn an input line into a message for the labeler.
    fn parse_line(line: &str, labeler: &mut ImageClassification) -> Option<Message> {
        if let Some(id) = line.strip_prefix("click ") {
            return Some(Message::ClickLabel(id.trim().to_string()));
        }
        match line {
            "next" => Some(Message::Next(None)),
            "prev" => Some(Message::Prev),
            "done" => Some(Message::Done),
            "skip" => Some(Message::NextNoSave),
            "remove" => Some(Message::RemoveSample),
            _ => {
                let key = Key::from_name(line)?;
                let subscription = labeler.listen()?;
                Some(Message::Key { subscription, key })
            }
        }
    }

    pub fn run() -> Result<(), ClassifyError> {
        init_logging();

        let path = std::env::args_os().nth(1).map(PathBuf::from).ok_or_else(|| {
            ClassifyError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "usage: image-classification <session.json>",
            ))
        })?;

        let session = SessionConfig::load(&path)?;
        if !rust_log_set() {
            log::set_max_level(session.log_level.to_level_filter());
        }

        let events: Rc<RefCell<Vec<HostEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let saves = Rc::clone(&events);
        let exits = Rc::clone(&events);
        let exited = Rc::new(RefCell::new(false));
        let exit_flag = Rc::clone(&exited);
        let removals = Rc::clone(&events);
        let current_index = Rc::new(RefCell::new(0usize));
        let removal_index = Rc::clone(&current_index);

        let mut labeler = ImageClassification::builder(session.interface)
            .samples(session.samples)
            .container(session.container)
            .sample_index(session.sample_index)
            .on_save_task_output_item(move |index, output| {
                saves.borrow_mut().push(HostEvent::Save { index, output });
            })
            .on_exit(move |reason| {
                exits.borrow_mut().push(HostEvent::Exit { reason });
                *exit_flag.borrow_mut() = true;
            })
            .on_remove_sample(move || {
                let index = *removal_index.borrow();
                removals.borrow_mut().push(HostEvent::Remove { index });
            })
            .build()?;

        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            *current_index.borrow_mut() = labeler.sample_index();
            match parse_line(line, &mut labeler) {
                Some(message) => labeler.update(message),
                None => log::warn!("Unrecognized input: {:?}", line),
            }

            for event in events.borrow_mut().drain(..) {
                writeln!(stdout, "{}", serde_json::to_string(&event)?)?;
            }
            if *exited.borrow() {
                break;
            }
        }

        labeler.teardown();
        Ok(())
    }
}
