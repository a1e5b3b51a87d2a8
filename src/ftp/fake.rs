//! In-memory FTP server for tests.

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeZone, Utc};
use suppaftp::FtpError;

use crate::error::{AppError, Result};
use crate::ftp::session::{FtpConnector, FtpSession};
use crate::models::FileEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    List(String),
    Put(String),
    Remove(String),
    Retrieve(String),
}

enum Node {
    Dir,
    File {
        data: Vec<u8>,
        modified: Option<DateTime<Utc>>,
    },
}

#[derive(Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    ops: Vec<Op>,
    connects: usize,
    closes: usize,
    refuse: bool,
    failing_puts: HashSet<String>,
    failing_removes: HashSet<String>,
}

#[derive(Default)]
pub struct FakeConnector {
    state: Arc<Mutex<State>>,
}

fn not_available(path: &str) -> AppError {
    AppError::Ftp(FtpError::ConnectionError(io::Error::new(
        io::ErrorKind::NotFound,
        format!("550 {}: No such file or directory", path),
    )))
}

fn parent(path: &str) -> &str {
    path.rsplit_once('/').map(|(p, _)| p).unwrap_or("")
}

impl FakeConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_dir(&self, path: &str) {
        self.lock().nodes.insert(path.to_string(), Node::Dir);
    }

    pub fn add_file(&self, path: &str, data: &[u8]) {
        let noon = Utc.with_ymd_and_hms(2024, 6, 13, 15, 0, 0).unwrap();
        self.add_file_at(path, data, Some(noon));
    }

    pub fn add_file_at(&self, path: &str, data: &[u8], modified: Option<DateTime<Utc>>) {
        self.lock().nodes.insert(
            path.to_string(),
            Node::File {
                data: data.to_vec(),
                modified,
            },
        );
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        match self.lock().nodes.get(path) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn refuse_connections(&self) {
        self.lock().refuse = true;
    }

    pub fn fail_puts_to(&self, path: &str) {
        self.lock().failing_puts.insert(path.to_string());
    }

    pub fn fail_removes_of(&self, path: &str) {
        self.lock().failing_removes.insert(path.to_string());
    }

    pub fn ops(&self) -> Vec<Op> {
        self.lock().ops.clone()
    }

    pub fn connects(&self) -> usize {
        self.lock().connects
    }

    pub fn closes(&self) -> usize {
        self.lock().closes
    }
}

impl FtpConnector for FakeConnector {
    fn connect(&self) -> Result<Box<dyn FtpSession>> {
        let mut state = self.lock();
        if state.refuse {
            return Err(AppError::Connect {
                addr: "fake:21".to_string(),
                source: FtpError::ConnectionError(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            });
        }
        state.connects += 1;
        Ok(Box::new(FakeSession {
            state: self.state.clone(),
            closed: false,
        }))
    }
}

struct FakeSession {
    state: Arc<Mutex<State>>,
    closed: bool,
}

impl FakeSession {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl FtpSession for FakeSession {
    fn list(&mut self, path: &str) -> Result<Vec<FileEntry>> {
        let dir = path.trim_end_matches('/');
        let mut state = self.lock();
        state.ops.push(Op::List(dir.to_string()));

        let entries: Vec<FileEntry> = state
            .nodes
            .iter()
            .filter(|(p, _)| parent(p) == dir)
            .map(|(p, node)| {
                let name = p.rsplit('/').next().unwrap_or_default().to_string();
                match node {
                    Node::Dir => FileEntry {
                        name,
                        size: 0,
                        is_directory: true,
                        date_modified: None,
                    },
                    Node::File { data, modified } => FileEntry {
                        name,
                        size: data.len() as u64,
                        is_directory: false,
                        date_modified: *modified,
                    },
                }
            })
            .collect();

        if entries.is_empty() && !state.nodes.contains_key(dir) {
            return Err(not_available(dir));
        }
        Ok(entries)
    }

    fn put(&mut self, path: &str, data: &[u8]) -> Result<u64> {
        let mut state = self.lock();
        state.ops.push(Op::Put(path.to_string()));
        if state.failing_puts.contains(path) {
            return Err(not_available(path));
        }
        let modified = Some(Utc.with_ymd_and_hms(2024, 6, 13, 15, 0, 0).unwrap());
        state.nodes.insert(
            path.to_string(),
            Node::File {
                data: data.to_vec(),
                modified,
            },
        );
        Ok(data.len() as u64)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let mut state = self.lock();
        state.ops.push(Op::Remove(path.to_string()));
        if state.failing_removes.contains(path) {
            return Err(not_available(path));
        }
        if !matches!(state.nodes.get(path), Some(Node::File { .. })) {
            return Err(not_available(path));
        }
        state.nodes.remove(path);
        Ok(())
    }

    fn retrieve(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut state = self.lock();
        state.ops.push(Op::Retrieve(path.to_string()));
        match state.nodes.get(path) {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            _ => Err(not_available(path)),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.lock().closes += 1;
        }
    }
}
