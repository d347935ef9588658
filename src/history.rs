use log::debug;

use crate::surface::Surface;

/// Number of snapshots kept by default, including the blank initial state.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Immutable copy of a surface's pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Snapshot {
    pub fn of(surface: &Surface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            pixels: surface.pixels().to_vec(),
        }
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether this snapshot holds exactly the surface's current pixels.
    pub fn matches(&self, surface: &Surface) -> bool {
        self.size() == surface.size() && self.pixels == surface.pixels()
    }

    fn restore_onto(&self, surface: &mut Surface) {
        surface.load(self.width, self.height, &self.pixels);
    }
}

/// Bounded linear undo over whole-surface snapshots.
///
/// Entries after the current index are dropped on every capture, so there is
/// never anything to redo.
#[derive(Debug)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    /// `None` only before the first capture.
    index: Option<usize>,
    limit: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl SnapshotHistory {
    /// A `limit` of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: None,
            limit: limit.max(1),
        }
    }

    /// Record the surface as the newest state.
    pub fn capture(&mut self, surface: &Surface) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(Snapshot::of(surface));
        let mut index = self.snapshots.len() - 1;

        if self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
            index -= 1;
        }
        self.index = Some(index);

        debug!("history: captured snapshot {} of {}", index + 1, self.snapshots.len());
    }

    /// Step back one snapshot and restore it onto `surface`.
    ///
    /// Returns false, leaving everything untouched, at the oldest snapshot.
    pub fn undo(&mut self, surface: &mut Surface) -> bool {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                self.snapshots[i - 1].restore_onto(surface);
                debug!("history: undo to snapshot {}", i);
                true
            }
            _ => false,
        }
    }

    /// Forget everything and start over with `surface` as the initial state.
    pub fn reset(&mut self, surface: &Surface) {
        self.snapshots.clear();
        self.index = None;
        self.capture(surface);
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.index.and_then(|i| self.snapshots.get(i))
    }
}
