/*
ShootemUp - Arcade Shooter
*/
use bevy::log::{debug, info, warn};
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::level::LevelDefinition;

/// Record Layout: levelNumber,name,enemySpawnRate,enemySpeed,enemyHealth,enemiesRequired
pub const FIELD_NAMES: [&str; 6] = [
    "level_number",
    "name",
    "enemy_spawn_rate",
    "enemy_speed",
    "enemy_health",
    "enemies_required",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read level file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no valid level records in {}", .path.display())]
    Empty { path: PathBuf },
}

/// Why a Single Record Line Was Thrown Away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected 6 comma-separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} out of range: '{value}'")]
    OutOfRange { field: &'static str, value: String },
    #[error("line is not valid UTF-8")]
    Encoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    Record(&'a str),
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let t = line.trim_start();
    if t.is_empty() {
        LineKind::Blank
    } else if t.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Record(line)
    }
}

/// Receives Per-Line Outcomes While a Level File is Parsed
/// Line Numbers are 1-Based
pub trait LoadDiagnostics {
    fn skipped(&mut self, _line_no: usize) {}
    fn accepted(&mut self, line_no: usize, level: &LevelDefinition);
    fn rejected(&mut self, line_no: usize, line: &str, err: &LineError);
}

/// Default Sink, Writes Everything to the Bevy Log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl LoadDiagnostics for LogDiagnostics {
    fn skipped(&mut self, line_no: usize) {
        debug!("line {line_no} skipped (comment or blank)");
    }

    fn accepted(&mut self, _line_no: usize, level: &LevelDefinition) {
        info!(
            "Level {} loaded: {} (spawn:{}, speed:{}, health:{}, required:{})",
            level.level_number,
            level.name,
            level.enemy_spawn_rate,
            level.enemy_speed,
            level.enemy_health,
            level.enemies_required,
        );
    }

    fn rejected(&mut self, line_no: usize, line: &str, err: &LineError) {
        warn!("parse error on line {line_no}: {err} ('{line}')");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub line_no: usize,
    pub line: String,
    pub error: LineError,
}

/// Keeps Every Outcome in Memory (Tests + level_check)
#[derive(Debug, Clone, Default)]
pub struct RecordedDiagnostics {
    pub skipped: Vec<usize>,
    pub accepted: Vec<usize>,
    pub rejected: Vec<Rejection>,
}

impl LoadDiagnostics for RecordedDiagnostics {
    fn skipped(&mut self, line_no: usize) {
        self.skipped.push(line_no);
    }

    fn accepted(&mut self, line_no: usize, _level: &LevelDefinition) {
        self.accepted.push(line_no);
    }

    fn rejected(&mut self, line_no: usize, line: &str, err: &LineError) {
        self.rejected.push(Rejection {
            line_no,
            line: line.to_owned(),
            error: err.clone(),
        });
    }
}

/// Summary Handed Back on a Successful Load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub rejected: usize,
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, LineError> {
    let raw = raw.trim();
    raw.parse::<T>().map_err(|_| LineError::InvalidNumber {
        field,
        value: raw.to_owned(),
    })
}

fn parse_tuning(field: &'static str, raw: &str) -> Result<f32, LineError> {
    let v: f32 = parse_field(field, raw)?;
    if !v.is_finite() || v < 0.0 {
        return Err(LineError::OutOfRange {
            field,
            value: raw.trim().to_owned(),
        });
    }
    Ok(v)
}

/// Parse One Data Record, Name Keeps Internal Whitespace
pub fn parse_record(line: &str) -> Result<LevelDefinition, LineError> {
    let fields: Vec<&str> = line.split(',').collect();
    let [number, name, spawn, speed, health, required] = fields.as_slice() else {
        return Err(LineError::FieldCount { found: fields.len() });
    };

    let level_number: u32 = parse_field(FIELD_NAMES[0], number)?;
    if level_number == 0 {
        return Err(LineError::OutOfRange {
            field: FIELD_NAMES[0],
            value: number.trim().to_owned(),
        });
    }

    Ok(LevelDefinition {
        level_number,
        name: name.trim().to_owned(),
        enemy_spawn_rate: parse_tuning(FIELD_NAMES[2], spawn)?,
        enemy_speed: parse_tuning(FIELD_NAMES[3], speed)?,
        enemy_health: parse_field(FIELD_NAMES[4], health)?,
        enemies_required: parse_field(FIELD_NAMES[5], required)?,
    })
}

/// Tolerant Pass Over the Whole Text: Bad Lines are Reported and Dropped
pub fn parse_levels(text: &str, sink: &mut dyn LoadDiagnostics) -> (Vec<LevelDefinition>, usize) {
    parse_lines(text.lines().map(|l| Ok::<_, Cow<'_, str>>(Cow::Borrowed(l))), sink)
}

/// Byte Version of `parse_levels`, Each Line Decoded on its Own
/// so a Stray Non-UTF-8 Byte Only Costs That One Line
pub fn parse_level_bytes(bytes: &[u8], sink: &mut dyn LoadDiagnostics) -> (Vec<LevelDefinition>, usize) {
    if bytes.is_empty() {
        return (Vec::new(), 0);
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);

    let lines = body.split(|&b| b == b'\n').map(|raw| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        std::str::from_utf8(raw)
            .map(Cow::Borrowed)
            .map_err(|_| String::from_utf8_lossy(raw))
    });
    parse_lines(lines, sink)
}

// Err Carries a Lossy Rendering of an Undecodable Line
fn parse_lines<'a>(
    lines: impl Iterator<Item = Result<Cow<'a, str>, Cow<'a, str>>>,
    sink: &mut dyn LoadDiagnostics,
) -> (Vec<LevelDefinition>, usize) {
    let mut levels = Vec::new();
    let mut rejected = 0;

    for (i, line) in lines.enumerate() {
        let line_no = i + 1;
        let (line, decoded) = match line {
            Ok(l) => (l, true),
            Err(lossy) => (lossy, false),
        };

        match classify_line(&line) {
            LineKind::Blank | LineKind::Comment => sink.skipped(line_no),
            LineKind::Record(record) if !decoded => {
                sink.rejected(line_no, record, &LineError::Encoding);
                rejected += 1;
            }
            LineKind::Record(record) => match parse_record(record) {
                Ok(level) => {
                    sink.accepted(line_no, &level);
                    levels.push(level);
                }
                Err(err) => {
                    sink.rejected(line_no, record, &err);
                    rejected += 1;
                }
            },
        }
    }

    (levels, rejected)
}

/// Same as `read_levels` for Text Already in Memory, `origin` Only Labels Errors
pub fn levels_from_str(
    text: &str,
    origin: &Path,
    sink: &mut dyn LoadDiagnostics,
) -> Result<(Vec<LevelDefinition>, LoadReport), LoadError> {
    finish(parse_levels(text, sink), origin)
}

/// Only a File That Cannot be Read at All is `Unreadable`
pub fn read_levels(
    path: &Path,
    sink: &mut dyn LoadDiagnostics,
) -> Result<(Vec<LevelDefinition>, LoadReport), LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    finish(parse_level_bytes(&bytes, sink), path)
}

fn finish(
    (levels, rejected): (Vec<LevelDefinition>, usize),
    origin: &Path,
) -> Result<(Vec<LevelDefinition>, LoadReport), LoadError> {
    if levels.is_empty() {
        return Err(LoadError::Empty {
            path: origin.to_path_buf(),
        });
    }

    let report = LoadReport {
        loaded: levels.len(),
        rejected,
    };
    Ok((levels, report))
}
