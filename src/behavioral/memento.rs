//! Memento: originators capture their state into opaque snapshots that a
//! caretaker stores and replays without being able to read them.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{PatternError, Result};

const ALLOWED_SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Snapshots
// =============================================================================

/// The captured state, tagged by the kind of originator that produced it.
/// Payloads are private to this module.
#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Text(String),
    Counter(i64),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Counter(_) => "counter",
        }
    }

    fn preview(&self) -> String {
        match self {
            Payload::Text(text) => text.chars().take(9).collect(),
            Payload::Counter(count) => count.to_string(),
        }
    }
}

/// Immutable once created. Outside this module only its metadata is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    payload: Payload,
    created_at: DateTime<Utc>,
}

impl Snapshot {
    fn new(payload: Payload) -> Self {
        Self {
            payload,
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> String {
        format!(
            "{} / ({})...",
            self.created_at.timestamp_nanos_opt().unwrap_or_default(),
            self.payload.preview()
        )
    }

    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub trait Originator {
    fn save(&self) -> Snapshot;

    /// Fails with [`PatternError::InvalidSnapshot`] for a foreign snapshot kind.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<()>;
}

// =============================================================================
// Originators
// =============================================================================

#[derive(Debug, Clone)]
pub struct TextOriginator {
    state: String,
    generated_len: usize,
}

impl TextOriginator {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            generated_len: 30,
        }
    }

    pub fn with_generated_len(mut self, len: usize) -> Self {
        self.generated_len = len;
        self
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
    }

    /// Business logic that replaces the state with random letters.
    pub fn do_something(&mut self) -> &str {
        self.state = random_string(self.generated_len);
        tracing::debug!(state = %self.state, "originator state changed");
        &self.state
    }
}

fn random_string(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALLOWED_SYMBOLS[rng.gen_range(0..ALLOWED_SYMBOLS.len())] as char)
        .collect()
}

impl Originator for TextOriginator {
    fn save(&self) -> Snapshot {
        Snapshot::new(Payload::Text(self.state.clone()))
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        match &snapshot.payload {
            Payload::Text(state) => {
                self.state = state.clone();
                Ok(())
            }
            other => Err(PatternError::InvalidSnapshot {
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CounterOriginator {
    count: i64,
}

impl CounterOriginator {
    pub fn new(count: i64) -> Self {
        Self { count }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn increment(&mut self, by: i64) -> i64 {
        self.count += by;
        self.count
    }
}

impl Originator for CounterOriginator {
    fn save(&self) -> Snapshot {
        Snapshot::new(Payload::Counter(self.count))
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        match snapshot.payload {
            Payload::Counter(count) => {
                self.count = count;
                Ok(())
            }
            ref other => Err(PatternError::InvalidSnapshot {
                expected: "counter",
                found: other.kind(),
            }),
        }
    }
}

// =============================================================================
// Caretaker
// =============================================================================

/// Owns an originator and a stack of its snapshots.
pub struct Caretaker<O: Originator> {
    originator: O,
    history: Vec<Snapshot>,
}

impl<O: Originator> Caretaker<O> {
    pub fn new(originator: O) -> Self {
        Self {
            originator,
            history: Vec::new(),
        }
    }

    pub fn originator(&self) -> &O {
        &self.originator
    }

    pub fn originator_mut(&mut self) -> &mut O {
        &mut self.originator
    }

    pub fn into_originator(self) -> O {
        self.originator
    }

    pub fn backup(&mut self) {
        let snapshot = self.originator.save();
        tracing::debug!(name = %snapshot.name(), "saving originator state");
        self.history.push(snapshot);
    }

    /// Pushes a snapshot produced elsewhere, e.g. shared history.
    pub fn import(&mut self, snapshot: Snapshot) {
        self.history.push(snapshot);
    }

    /// Pops snapshots until one restores cleanly, returning its name.
    /// Snapshots the originator rejects are discarded. `None` once the
    /// history is exhausted, in which case the originator is untouched.
    pub fn undo(&mut self) -> Option<String> {
        while let Some(snapshot) = self.history.pop() {
            match self.originator.restore(&snapshot) {
                Ok(()) => {
                    let name = snapshot.name();
                    tracing::debug!(%name, "restored originator state");
                    return Some(name);
                }
                Err(err) => {
                    tracing::warn!(name = %snapshot.name(), error = %err, "skipping snapshot");
                }
            }
        }
        None
    }

    pub fn history(&self) -> Vec<String> {
        self.history.iter().map(Snapshot::name).collect()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
