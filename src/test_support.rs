//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;

use crate::actions::{Menu, MenuChoice};
use crate::console::{Console, NoPacer};
use crate::error::ActionError;
use crate::fetch::Fetcher;
use crate::opener::UrlOpener;
use crate::ui::ChoiceSource;

/// Cloneable in-memory writer; every clone sees the same bytes.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Colourless, zero-delay console plus a handle on what it wrote.
pub fn quiet_console() -> (Console, SharedBuffer) {
    let buf = SharedBuffer::default();
    let console = Console::new(Box::new(buf.clone()), Box::new(NoPacer), Duration::ZERO);
    (console, buf)
}

/// Records every target it is asked to open; optionally fails.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: RefCell<Vec<String>>,
    pub fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        RecordingOpener {
            opened: RefCell::default(),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, target: &str) -> Result<(), ActionError> {
        self.opened.borrow_mut().push(target.to_string());
        if self.fail {
            return Err(ActionError::Open {
                target: target.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no browser registered"),
            });
        }
        Ok(())
    }
}

/// What `FakeFetcher` does when asked to download.
pub enum FakeResponse {
    Body(&'static [u8]),
    Status(StatusCode),
}

pub struct FakeFetcher {
    response: FakeResponse,
    pub requests: Rc<RefCell<Vec<(String, PathBuf)>>>,
}

impl FakeFetcher {
    pub fn serving(body: &'static [u8]) -> Self {
        FakeFetcher {
            response: FakeResponse::Body(body),
            requests: Rc::default(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        FakeFetcher {
            response: FakeResponse::Status(status),
            requests: Rc::default(),
        }
    }
}

impl Fetcher for FakeFetcher {
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, ActionError> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), dest.to_path_buf()));
        match &self.response {
            FakeResponse::Body(body) => {
                std::fs::write(dest, body).map_err(|source| ActionError::FileSystem {
                    path: dest.to_path_buf(),
                    source,
                })?;
                Ok(body.len() as u64)
            }
            FakeResponse::Status(status) => Err(ActionError::Status {
                url: url.to_string(),
                status: *status,
            }),
        }
    }
}

/// Answers menu prompts from a fixed script.
pub struct ScriptedChoices {
    script: VecDeque<MenuChoice>,
    pub prompts: usize,
}

impl ScriptedChoices {
    pub fn new(choices: &[MenuChoice]) -> Self {
        ScriptedChoices {
            script: choices.iter().copied().collect(),
            prompts: 0,
        }
    }
}

impl ChoiceSource for ScriptedChoices {
    fn select(&mut self, _menu: &Menu) -> Result<MenuChoice> {
        self.prompts += 1;
        self.script
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted after {} prompts", self.prompts))
    }
}

/// Files directly inside `dir`.
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default();
    files.sort();
    files
}
