//! Edge-list and coordinate file loading.
//!
//! Edge lists hold one edge per line: `<node-id> <node-id> <distance>`.
//! Coordinate files hold `<node-id> <latitude> <longitude>`. Blank lines are
//! ignored; lines of any other shape are skipped and counted.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use super::{GraphError, GraphStore};

/// Summary of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records applied to the graph.
    pub loaded: usize,
    /// Non-blank lines that were skipped.
    pub skipped_lines: usize,
}

/// A parsed edge-list line.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub distance: f64,
}

/// Parse one edge-list line.
///
/// Returns `None` for lines that are not exactly two identifiers followed by
/// a finite, non-negative distance. Blank lines also yield `None`.
pub fn parse_edge_line(line: &str) -> Option<EdgeRecord<'_>> {
    let mut tokens = line.split_whitespace();
    let from = tokens.next()?;
    let to = tokens.next()?;
    let distance: f64 = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() || !distance.is_finite() || distance < 0.0 {
        return None;
    }
    Some(EdgeRecord { from, to, distance })
}

/// Parse one coordinate line into `(node-id, latitude, longitude)`.
///
/// Only the shape is checked here; range checks happen when the position is
/// applied to a node.
pub fn parse_coordinate_line(line: &str) -> Option<(&str, f64, f64)> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let lat: f64 = tokens.next()?.parse().ok()?;
    let lon: f64 = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((name, lat, lon))
}

impl GraphStore {
    /// Replace the graph with the edges read from `reader`.
    ///
    /// The new graph is built separately and swapped in once the reader is
    /// exhausted. A read error mid-stream leaves the graph empty.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<LoadReport, std::io::Error> {
        self.clear();

        let mut fresh = GraphStore::new();
        let mut report = LoadReport::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let applied = parse_edge_line(&line)
                .map(|rec| fresh.add_edge(rec.from, rec.to, rec.distance).is_ok())
                .unwrap_or(false);

            if applied {
                report.loaded += 1;
            } else {
                debug!(line = line_no + 1, content = %line, "skipping malformed edge line");
                report.skipped_lines += 1;
            }
        }

        *self = fresh;
        Ok(report)
    }

    /// Replace the graph with the edges in the file at `path`.
    ///
    /// If the file cannot be opened or read, the graph is left empty and the
    /// error is returned; callers may carry on with the empty graph.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, GraphError> {
        let path = path.as_ref();
        self.clear();

        let result = File::open(path)
            .and_then(|file| self.load_from_reader(BufReader::new(file)));

        match result {
            Ok(report) => {
                info!(
                    path = %path.display(),
                    nodes = self.node_count(),
                    edges = self.edge_count(),
                    skipped = report.skipped_lines,
                    "graph loaded"
                );
                Ok(report)
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "could not load graph; continuing with empty graph");
                self.clear();
                Err(GraphError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Build a new graph from an edge-list file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<(Self, LoadReport), GraphError> {
        let mut graph = GraphStore::new();
        let report = graph.load_from_file(path)?;
        Ok((graph, report))
    }

    /// Apply coordinates read from `reader` to existing nodes.
    ///
    /// Lines naming unknown nodes, or with invalid coordinates, are skipped.
    pub fn apply_coordinates<R: BufRead>(&mut self, reader: R) -> Result<LoadReport, std::io::Error> {
        let mut report = LoadReport::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let applied = parse_coordinate_line(&line)
                .map(|(name, lat, lon)| self.set_position(name, lat, lon).is_ok())
                .unwrap_or(false);

            if applied {
                report.loaded += 1;
            } else {
                debug!(line = line_no + 1, content = %line, "skipping coordinate line");
                report.skipped_lines += 1;
            }
        }

        Ok(report)
    }

    /// Apply coordinates from the file at `path`. The graph's edges are untouched.
    pub fn load_coordinates_from_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, GraphError> {
        let path = path.as_ref();
        let io_err = |source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let report = self.apply_coordinates(BufReader::new(file)).map_err(io_err)?;

        info!(
            path = %path.display(),
            applied = report.loaded,
            skipped = report.skipped_lines,
            "coordinates loaded"
        );
        Ok(report)
    }
}
