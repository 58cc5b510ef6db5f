//! Kind inference over sampled values.
//!
//! A [`Detector`] accumulates samples for one column and reports the
//! narrowest [`Kind`] that accounts for all of them. Samples fall into
//! lanes: bool, numeric, temporal, bytes and text. Within the numeric lane
//! kinds widen along `Int < Float < Decimal`; text samples narrow a running
//! set of candidate interpretations.

use std::sync::Arc;

use nom::combinator::all_consuming;
use nom::number::complete::recognize_float;
use tracing::debug;

use super::layouts::LAYOUTS;
use super::{Kind, Sample};
use crate::error::{SlqError, SlqResult};

/// Converts a raw sample into the canonical form of the detected kind.
pub type Normalizer = Arc<dyn Fn(&Sample) -> SlqResult<Sample> + Send + Sync>;

/// Text tokens accepted as booleans. Matching is case-sensitive.
const BOOL_TOKENS: [&str; 4] = ["true", "false", "yes", "no"];

/// Sequential accumulator for one detection pass.
#[derive(Debug, Clone)]
pub struct Detector {
    samples: usize,
    empty_text: bool,
    native_bool: bool,
    native_bytes: bool,
    numeric: Option<Kind>,
    native_temporal: Option<Kind>,
    temporal_conflict: bool,
    text: usize,
    text_bool: bool,
    text_numeric: bool,
    layouts: Vec<usize>,
}

/// The lane a group of samples resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    Bool,
    Numeric(Kind),
    Temporal(Kind),
    Bytes,
    Text,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    pub fn new() -> Self {
        Self {
            samples: 0,
            empty_text: false,
            native_bool: false,
            native_bytes: false,
            numeric: None,
            native_temporal: None,
            temporal_conflict: false,
            text: 0,
            text_bool: true,
            text_numeric: true,
            layouts: (0..LAYOUTS.len()).collect(),
        }
    }

    /// Clear all state so the detector can start a new pass.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of samples seen in this pass.
    pub fn len(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Record one sample.
    pub fn sample(&mut self, value: impl Into<Sample>) {
        self.samples += 1;
        match value.into() {
            Sample::Null => {}
            Sample::Bool(_) => self.native_bool = true,
            Sample::Int(_) => self.widen(Kind::Int),
            Sample::UInt(_) => self.widen(Kind::Int),
            Sample::Float(_) => self.widen(Kind::Float),
            Sample::Number(_) => self.widen(Kind::Decimal),
            Sample::Bytes(_) => self.native_bytes = true,
            Sample::Datetime(_) => self.native_temporal(Kind::Datetime),
            Sample::Date(_) => self.native_temporal(Kind::Date),
            Sample::Time(_) => self.native_temporal(Kind::Time),
            Sample::Text(s) if s.is_empty() => self.empty_text = true,
            Sample::Text(s) => self.sample_text(&s),
        }
    }

    fn widen(&mut self, kind: Kind) {
        self.numeric = Some(match self.numeric {
            None => kind,
            Some(current) => numeric_join(current, kind),
        });
    }

    fn native_temporal(&mut self, kind: Kind) {
        match self.native_temporal {
            Some(current) if current != kind => self.temporal_conflict = true,
            _ => self.native_temporal = Some(kind),
        }
    }

    fn sample_text(&mut self, s: &str) {
        self.text += 1;
        if self.text_bool && !BOOL_TOKENS.contains(&s) {
            self.text_bool = false;
        }
        if self.text_numeric && !is_numeric_text(s) {
            self.text_numeric = false;
        }
        if !self.layouts.is_empty() {
            self.layouts.retain(|&i| LAYOUTS[i].matches(s));
        }
    }

    /// The lane all text samples fit in, if any text was seen.
    fn text_lane(&self) -> Option<Lane> {
        if self.text == 0 {
            return None;
        }
        Some(if self.text_bool {
            Lane::Bool
        } else if self.text_numeric {
            Lane::Numeric(Kind::Decimal)
        } else if let Some(&i) = self.layouts.first() {
            Lane::Temporal(LAYOUTS[i].kind)
        } else {
            Lane::Text
        })
    }

    fn native_lanes(&self) -> Vec<Lane> {
        let mut lanes = Vec::new();
        if self.native_bool {
            lanes.push(Lane::Bool);
        }
        if let Some(kind) = self.numeric {
            lanes.push(Lane::Numeric(kind));
        }
        if let Some(kind) = self.native_temporal {
            lanes.push(Lane::Temporal(kind));
        }
        if self.native_bytes {
            lanes.push(Lane::Bytes);
        }
        lanes
    }

    fn has_natives(&self) -> bool {
        self.native_bool
            || self.native_bytes
            || self.numeric.is_some()
            || self.native_temporal.is_some()
    }

    /// Report the detected kind and, when values need reinterpreting,
    /// the normalizer that converts them.
    pub fn detect(&self) -> SlqResult<(Kind, Option<Normalizer>)> {
        let natives = self.native_lanes();
        let text = self.text_lane();

        if natives.is_empty() && text.is_none() {
            let kind = if self.empty_text { Kind::Text } else { Kind::Null };
            debug!(%kind, samples = self.samples, "detected kind (no values)");
            return Ok((kind, None));
        }

        let lane = if self.temporal_conflict {
            None
        } else {
            merge_lanes(text.into_iter().chain(natives.iter().copied()))
        };

        let lane = match (lane, text) {
            (Some(lane), _) => lane,
            (None, Some(_)) => Lane::Text,
            (None, None) => {
                return Err(SlqError::Ambiguous(format!(
                    "native samples span incompatible kinds: {:?}",
                    natives
                )));
            }
        };

        let detected = match lane {
            Lane::Bool => (Kind::Bool, None),
            Lane::Numeric(kind) => (kind, None),
            Lane::Bytes => (Kind::Bytes, None),
            Lane::Temporal(kind) => {
                let layout = if self.text > 0 { self.layouts.first().copied() } else { None };
                (kind, Some(temporal_normalizer(kind, layout)))
            }
            Lane::Text if self.has_natives() => (Kind::Text, Some(text_normalizer())),
            Lane::Text => (Kind::Text, None),
        };

        debug!(kind = %detected.0, samples = self.samples, "detected kind");
        Ok(detected)
    }
}

fn numeric_rank(kind: Kind) -> u8 {
    match kind {
        Kind::Int => 0,
        Kind::Float => 1,
        _ => 2,
    }
}

fn numeric_join(a: Kind, b: Kind) -> Kind {
    if numeric_rank(a) >= numeric_rank(b) { a } else { b }
}

/// Fold lanes into one; `None` when two lanes cannot be reconciled.
fn merge_lanes(lanes: impl Iterator<Item = Lane>) -> Option<Lane> {
    let mut merged: Option<Lane> = None;
    for lane in lanes {
        merged = Some(match (merged, lane) {
            (None, lane) => lane,
            (Some(Lane::Numeric(a)), Lane::Numeric(b)) => Lane::Numeric(numeric_join(a, b)),
            (Some(a), b) if a == b => a,
            _ => return None,
        });
    }
    merged
}

/// Plain numeric text: optional sign, digits, optional fraction and exponent.
fn is_numeric_text(s: &str) -> bool {
    all_consuming(recognize_float::<&str, nom::error::Error<&str>>)(s).is_ok()
}

fn temporal_normalizer(kind: Kind, layout: Option<usize>) -> Normalizer {
    Arc::new(move |value: &Sample| match value {
        v if v.is_blank() => Ok(Sample::Null),
        Sample::Text(s) => {
            let layout = layout
                .map(|i| &LAYOUTS[i])
                .ok_or_else(|| SlqError::normalize(kind, s, "no layout detected for text"))?;
            layout
                .parse(s)
                .ok_or_else(|| {
                    SlqError::normalize(kind, s, format!("does not match layout {}", layout.name))
                })
        }
        Sample::Datetime(_) if kind == Kind::Datetime => Ok(value.clone()),
        Sample::Date(_) if kind == Kind::Date => Ok(value.clone()),
        Sample::Time(_) if kind == Kind::Time => Ok(value.clone()),
        other => Err(SlqError::normalize(kind, other, "not a temporal value")),
    })
}

fn text_normalizer() -> Normalizer {
    Arc::new(|value: &Sample| match value {
        Sample::Null | Sample::Text(_) => Ok(value.clone()),
        other => Ok(Sample::Text(other.to_string())),
    })
}

/// Run a single detection pass over `samples`.
pub fn detect_kind<I, T>(samples: I) -> SlqResult<(Kind, Option<Normalizer>)>
where
    I: IntoIterator<Item = T>,
    T: Into<Sample>,
{
    let mut detector = Detector::new();
    for value in samples {
        detector.sample(value);
    }
    detector.detect()
}

/// Detect one kind per column over row-shaped samples.
///
/// Rows shorter than the widest row contribute nulls for missing cells.
pub fn detect_columns(rows: &[Vec<Sample>]) -> SlqResult<Vec<(Kind, Option<Normalizer>)>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut detectors = vec![Detector::new(); width];
    for row in rows {
        for (i, detector) in detectors.iter_mut().enumerate() {
            detector.sample(row.get(i).cloned().unwrap_or(Sample::Null));
        }
    }
    detectors.iter().map(Detector::detect).collect()
}
