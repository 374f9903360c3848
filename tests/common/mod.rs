#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

use sentiq::client::ChatClient;
use sentiq::error::{Error, Result};
use sentiq::prompts::ChatMessage;

/// Chat client scripted with canned replies. Counts every invocation so
/// tests can assert the cache-hit property.
pub struct StubClient {
    replies: RefCell<VecDeque<String>>,
    calls: RefCell<usize>,
}

impl StubClient {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: RefCell::new(replies.iter().map(|s| s.to_string()).collect()),
            calls: RefCell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl ChatClient for StubClient {
    fn complete(&self, _messages: &[ChatMessage], _temperature: f32) -> Result<String> {
        *self.calls.borrow_mut() += 1;
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Api("stub client has no reply left".to_string()))
    }
}

/// Write `content` to a file named `name` in a fresh temp dir; returns the
/// dir (keep it alive) and the file path.
pub fn write_input(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
