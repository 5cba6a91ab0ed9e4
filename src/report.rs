//! # Status Report Parsing
//!
//! Pure parsing of the Apache `mod_status` machine-readable report
//! (`/server-status/?auto`) into a typed [`StatusReport`]. No I/O happens
//! here — fetching the raw body is the job of [`crate::fetch`].
//!
//! The report format is line-oriented `Key: Value` text, but fields may be
//! missing (e.g. when `ExtendedStatus` is off server-side) and may appear in
//! any order. Parsing therefore never fails: every field that cannot be
//! extracted falls back to zero/empty, and a malformed or empty body yields
//! an all-zero report rather than an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref TOTAL_ACCESSES: Regex = Regex::new(r"Total Accesses: (.*)").unwrap();
    static ref TOTAL_KBYTES: Regex = Regex::new(r"Total kBytes: (.*)").unwrap();
    static ref CPU_LOAD: Regex = Regex::new(r"CPULoad: (.*)").unwrap();
    // Anchored to line start: "Uptime: <n>" can legitimately appear inside
    // other fields' values, unlike the remaining keys, which are unambiguous.
    static ref UPTIME: Regex = Regex::new(r"(?m)^Uptime: (.*)$").unwrap();
    static ref REQ_PER_SEC: Regex = Regex::new(r"ReqPerSec: (.*)").unwrap();
    static ref BYTES_PER_SEC: Regex = Regex::new(r"BytesPerSec: (.*)").unwrap();
    static ref BYTES_PER_REQ: Regex = Regex::new(r"BytesPerReq: (.*)").unwrap();
    static ref BUSY_WORKERS: Regex = Regex::new(r"BusyWorkers: (.*)").unwrap();
    static ref IDLE_WORKERS: Regex = Regex::new(r"IdleWorkers: (.*)").unwrap();
    static ref SCOREBOARD: Regex = Regex::new(r"Scoreboard: (.*)").unwrap();
}

/// Scoreboard characters that mark a slot as not busy: `.` is an open slot,
/// `_` is a worker waiting for a connection. Every other character counts as
/// busy in some request-handling phase.
const IDLE_SLOTS: [char; 2] = ['.', '_'];

/// A parsed server-status report.
///
/// Immutable once constructed; all fields are read through accessors. The
/// derived [`utilization`](Self::utilization) is computed exactly once, from
/// the scoreboard, at construction time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    total_accesses: u64,
    total_kbytes: u64,
    cpu_load: f64,
    uptime_seconds: u64,
    requests_per_second: f64,
    bytes_per_second: f64,
    bytes_per_request: f64,
    busy_workers: u64,
    idle_workers: u64,
    scoreboard: String,
    utilization: f64,
    #[serde(skip)]
    raw: String,
}

impl StatusReport {
    /// Parse a raw `?auto` response body into a report.
    ///
    /// Each field is extracted with its own single-capture-group pattern over
    /// the whole body; the first match wins. Missing fields and captures that
    /// do not parse as the declared numeric type default to zero/empty.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();

        let scoreboard = match_string(&SCOREBOARD, &raw);
        let utilization = scoreboard_utilization(&scoreboard);

        Self {
            total_accesses: match_int(&TOTAL_ACCESSES, &raw),
            total_kbytes: match_int(&TOTAL_KBYTES, &raw),
            cpu_load: match_float(&CPU_LOAD, &raw),
            uptime_seconds: match_int(&UPTIME, &raw),
            requests_per_second: match_float(&REQ_PER_SEC, &raw),
            bytes_per_second: match_float(&BYTES_PER_SEC, &raw),
            bytes_per_request: match_float(&BYTES_PER_REQ, &raw),
            busy_workers: match_int(&BUSY_WORKERS, &raw),
            idle_workers: match_int(&IDLE_WORKERS, &raw),
            scoreboard,
            utilization,
            raw,
        }
    }

    /// Total requests served since the server started.
    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    /// Total traffic served, in kilobytes.
    pub fn total_kbytes(&self) -> u64 {
        self.total_kbytes
    }

    pub fn cpu_load(&self) -> f64 {
        self.cpu_load
    }

    /// Server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.uptime_seconds
    }

    pub fn requests_per_second(&self) -> f64 {
        self.requests_per_second
    }

    pub fn bytes_per_second(&self) -> f64 {
        self.bytes_per_second
    }

    pub fn bytes_per_request(&self) -> f64 {
        self.bytes_per_request
    }

    pub fn busy_workers(&self) -> u64 {
        self.busy_workers
    }

    pub fn idle_workers(&self) -> u64 {
        self.idle_workers
    }

    /// One character per worker slot; see [`IDLE_SLOTS`] for the idle codes.
    pub fn scoreboard(&self) -> &str {
        &self.scoreboard
    }

    /// Fraction of scoreboard slots in a busy state, in `[0.0, 1.0]`.
    ///
    /// An empty scoreboard (field absent from the report) yields `0.0`, never
    /// a division by zero.
    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// The unparsed response body.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Busy slots over total slots; `0.0` for an empty scoreboard.
fn scoreboard_utilization(scoreboard: &str) -> f64 {
    if scoreboard.is_empty() {
        return 0.0;
    }

    let busy = scoreboard.chars().filter(|c| !IDLE_SLOTS.contains(c)).count();
    busy as f64 / scoreboard.chars().count() as f64
}

fn match_string(pattern: &Regex, raw: &str) -> String {
    pattern
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().trim().to_string())
        .unwrap_or_default()
}

fn match_int(pattern: &Regex, raw: &str) -> u64 {
    match_string(pattern, raw).parse().unwrap_or_default()
}

fn match_float(pattern: &Regex, raw: &str) -> f64 {
    match_string(pattern, raw).parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_BODY: &str = "\
Total Accesses: 84370
Total kBytes: 1065893
CPULoad: .497742
Uptime: 85624
ReqPerSec: .985356
BytesPerSec: 12747.2
BytesPerReq: 12936.7
BusyWorkers: 3
IdleWorkers: 47
Scoreboard: W_W.__...W.....................................___
";

    #[test]
    fn parses_every_field_from_a_full_report() {
        let report = StatusReport::parse(FULL_BODY);

        assert_eq!(report.total_accesses(), 84370);
        assert_eq!(report.total_kbytes(), 1065893);
        assert_eq!(report.cpu_load(), 0.497742);
        assert_eq!(report.uptime_seconds(), 85624);
        assert_eq!(report.requests_per_second(), 0.985356);
        assert_eq!(report.bytes_per_second(), 12747.2);
        assert_eq!(report.bytes_per_request(), 12936.7);
        assert_eq!(report.busy_workers(), 3);
        assert_eq!(report.idle_workers(), 47);
        assert_eq!(
            report.scoreboard(),
            "W_W.__...W.....................................___"
        );
        assert_eq!(report.raw(), FULL_BODY);
    }

    #[test]
    fn missing_fields_default_without_affecting_present_ones() {
        // ExtendedStatus off: only the worker lines are present.
        let body = "BusyWorkers: 2\nIdleWorkers: 8\nScoreboard: WW________\n";
        let report = StatusReport::parse(body);

        assert_eq!(report.busy_workers(), 2);
        assert_eq!(report.idle_workers(), 8);
        assert_eq!(report.scoreboard(), "WW________");
        assert_eq!(report.total_accesses(), 0);
        assert_eq!(report.total_kbytes(), 0);
        assert_eq!(report.cpu_load(), 0.0);
        assert_eq!(report.uptime_seconds(), 0);
        assert_eq!(report.requests_per_second(), 0.0);
        assert_eq!(report.bytes_per_second(), 0.0);
        assert_eq!(report.bytes_per_request(), 0.0);
    }

    #[test]
    fn empty_body_yields_an_all_zero_report() {
        let report = StatusReport::parse("");

        assert_eq!(report.total_accesses(), 0);
        assert_eq!(report.total_kbytes(), 0);
        assert_eq!(report.cpu_load(), 0.0);
        assert_eq!(report.uptime_seconds(), 0);
        assert_eq!(report.requests_per_second(), 0.0);
        assert_eq!(report.bytes_per_second(), 0.0);
        assert_eq!(report.bytes_per_request(), 0.0);
        assert_eq!(report.busy_workers(), 0);
        assert_eq!(report.idle_workers(), 0);
        assert_eq!(report.scoreboard(), "");
        assert_eq!(report.utilization(), 0.0);
    }

    #[test]
    fn utilization_counts_non_idle_slots() {
        assert_eq!(StatusReport::parse("Scoreboard: S._W\n").utilization(), 0.5);
        assert_eq!(
            StatusReport::parse("Scoreboard: ...___...\n").utilization(),
            0.0
        );
        assert_eq!(
            StatusReport::parse("Scoreboard: WWWWWWWWWW\n").utilization(),
            1.0
        );
    }

    #[test]
    fn uptime_only_matches_at_line_start() {
        // "Uptime: 100" also appears embedded in another field's value; only
        // the line-start occurrence may be captured.
        let body = "ServerComment: maintenance at Uptime: 100 hours\nUptime: 42\n";
        assert_eq!(StatusReport::parse(body).uptime_seconds(), 42);
    }

    #[test]
    fn unanchored_fields_match_without_a_trailing_newline() {
        let report = StatusReport::parse("BusyWorkers: 5");
        assert_eq!(report.busy_workers(), 5);
    }

    #[test]
    fn malformed_numeric_values_default_to_zero() {
        let body = "Total Accesses: lots\nCPULoad: none\nBusyWorkers: 4\n";
        let report = StatusReport::parse(body);

        assert_eq!(report.total_accesses(), 0);
        assert_eq!(report.cpu_load(), 0.0);
        assert_eq!(report.busy_workers(), 4);
    }

    #[test]
    fn first_match_wins_when_a_field_repeats() {
        let body = "BusyWorkers: 7\nBusyWorkers: 9\n";
        assert_eq!(StatusReport::parse(body).busy_workers(), 7);
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(StatusReport::parse(FULL_BODY), StatusReport::parse(FULL_BODY));
    }
}
