//! Intermediate code stream
//!
//! An append-only sequence of units. Forward references are made by
//! reserving a location marker before the target is known and fixing it
//! up once the parser reaches the target:
//!
//! ```text
//! reserve_marker()  ->  [.., LocationMarker(None), ..]
//! ... emit code ...
//! fixup(marker)     ->  [.., LocationMarker(Some(len)), ..]
//! ```
//!
//! A `Marker` is consumed by `fixup`, so a slot can never be written twice.

use std::fmt;

use super::tokens::TokenKind;
use crate::util::config::DEFAULT_CODE_SEGMENT_SIZE;
use crate::util::diagnostic::{Fatal, PResult};

/// One unit of intermediate code
#[derive(Debug, Clone, PartialEq)]
pub enum IcodeUnit {
    /// A recorded source token
    Token(TokenKind),
    /// Source line of the statement that follows
    LineMarker(usize),
    /// Forward reference; `None` until fixed up
    LocationMarker(Option<usize>),
}

/// Handle to a reserved, not yet resolved location marker
#[must_use = "a reserved location marker must be fixed up"]
#[derive(Debug, PartialEq, Eq)]
pub struct Marker {
    slot: usize,
}

impl Marker {
    /// Index of the placeholder unit in the stream
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Intermediate code stream
#[derive(Debug, Clone)]
pub struct Icode {
    units: Vec<IcodeUnit>,
    capacity: usize,
    pending: usize,
}

impl Default for Icode {
    fn default() -> Self {
        Self::new()
    }
}

impl Icode {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CODE_SEGMENT_SIZE)
    }

    /// Stream that holds at most `capacity` units
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: Vec::new(),
            capacity,
            pending: 0,
        }
    }

    /// Append a unit
    pub fn append(
        &mut self,
        unit: IcodeUnit,
    ) -> PResult {
        if self.units.len() >= self.capacity {
            tracing::warn!("code segment overflow at {} units", self.capacity);
            return Err(Fatal::CodeSegmentOverflow {
                capacity: self.capacity,
            });
        }
        self.units.push(unit);
        Ok(())
    }

    /// Append a recorded token
    pub fn append_token(
        &mut self,
        kind: TokenKind,
    ) -> PResult {
        self.append(IcodeUnit::Token(kind))
    }

    /// Append a placeholder and return the handle that resolves it
    pub fn reserve_marker(&mut self) -> PResult<Marker> {
        let slot = self.units.len();
        self.append(IcodeUnit::LocationMarker(None))?;
        self.pending += 1;
        tracing::trace!("reserve location marker @{}", slot);
        Ok(Marker { slot })
    }

    /// Resolve `marker` to the current end of the stream
    pub fn fixup(
        &mut self,
        marker: Marker,
    ) {
        let location = self.units.len();
        match self.units.get_mut(marker.slot) {
            Some(IcodeUnit::LocationMarker(target)) => {
                debug_assert!(target.is_none(), "marker @{} fixed up twice", marker.slot);
                *target = Some(location);
                self.pending -= 1;
                tracing::trace!("fixup location marker @{} -> {}", marker.slot, location);
            }
            other => {
                debug_assert!(false, "slot @{} is not a location marker: {:?}", marker.slot, other);
            }
        }
    }

    /// Resolved target of the marker at `slot`
    pub fn location_of(
        &self,
        slot: usize,
    ) -> Option<usize> {
        match self.units.get(slot) {
            Some(IcodeUnit::LocationMarker(target)) => *target,
            _ => None,
        }
    }

    /// Position the next appended unit will occupy
    pub fn current_location(&self) -> usize {
        self.units.len()
    }

    /// Markers reserved but not yet fixed up
    pub fn pending_markers(&self) -> usize {
        self.pending
    }

    pub fn units(&self) -> &[IcodeUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Slots of every location marker, in stream order
    pub fn marker_slots(&self) -> Vec<usize> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, u)| matches!(u, IcodeUnit::LocationMarker(_)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Position of the first recorded token equal to `kind` at or after `from`
    pub fn find_token(
        &self,
        kind: &TokenKind,
        from: usize,
    ) -> Option<usize> {
        self.units
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, u)| matches!(u, IcodeUnit::Token(k) if k == kind))
            .map(|(i, _)| i)
    }
}

impl fmt::Display for Icode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, unit) in self.units.iter().enumerate() {
            match unit {
                IcodeUnit::Token(kind) => writeln!(f, "{:5}  {}", i, kind)?,
                IcodeUnit::LineMarker(line) => writeln!(f, "{:5}  .line {}", i, line)?,
                IcodeUnit::LocationMarker(Some(target)) => {
                    writeln!(f, "{:5}  @-> {}", i, target)?
                }
                IcodeUnit::LocationMarker(None) => writeln!(f, "{:5}  @-> ?", i)?,
            }
        }
        Ok(())
    }
}
