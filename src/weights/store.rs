use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::network::topology::Topology;

/// A detached weight set: both matrices plus the topology they were sized
/// for. This is what the store reads, writes, and hands to a `Network`.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub topology: Topology,
    /// Input→hidden weights, `inputs × hidden`.
    pub w_in: Vec<Vec<f64>>,
    /// Hidden→output weights, `hidden × outputs`.
    pub w_out: Vec<Vec<f64>>,
}

impl Weights {
    /// An all-zero weight set sized for `topology`.
    pub fn zeros(topology: Topology) -> Weights {
        Weights {
            topology,
            w_in: vec![vec![0.0; topology.hidden]; topology.inputs],
            w_out: vec![vec![0.0; topology.outputs]; topology.hidden],
        }
    }
}

/// Why a weight file could not be loaded.
///
/// `TopologyMismatch` and `Io` (typically a missing file) are non-fatal by
/// contract: callers fall back to fresh or manually entered weights instead
/// of aborting.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Parse { line: usize, message: String },
    TopologyMismatch { expected: Topology, found: Topology },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read weights file: {}", e),
            LoadError::Parse { line, message } => {
                write!(f, "malformed weights file at line {}: {}", line, message)
            }
            LoadError::TopologyMismatch { expected, found } => write!(
                f,
                "weights file topology {} does not match network topology {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> LoadError {
        LoadError::Io(e)
    }
}

/// Writes a weight set as plain text: a `inputs hidden outputs` header
/// line, a blank line, then one `layer row col value` line per weight
/// (layer 0 is input→hidden, layer 1 is hidden→output).
///
/// Values use Rust's shortest-roundtrip `f64` formatting, so a
/// write-then-read cycle reproduces the matrices exactly.
pub fn save(weights: &Weights, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let t = weights.topology;
    writeln!(writer, "{} {} {}", t.inputs, t.hidden, t.outputs)?;
    writeln!(writer)?;

    for (a, row) in weights.w_in.iter().enumerate() {
        for (b, value) in row.iter().enumerate() {
            writeln!(writer, "0 {} {} {}", a, b, value)?;
        }
    }
    for (a, row) in weights.w_out.iter().enumerate() {
        for (b, value) in row.iter().enumerate() {
            writeln!(writer, "1 {} {} {}", a, b, value)?;
        }
    }

    writer.flush()
}

/// Reads a weight set written by `save`, validating the header against
/// `expected` before touching any matrix data. A mismatched header yields
/// `TopologyMismatch` and leaves the caller's network untouched.
pub fn load(path: &Path, expected: Topology) -> Result<Weights, LoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut weights = Weights::zeros(expected);
    let mut header_seen = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if !header_seen {
            let found = parse_header(&tokens, number)?;
            if found != expected {
                return Err(LoadError::TopologyMismatch { expected, found });
            }
            header_seen = true;
            continue;
        }

        let (layer, a, b, value) = parse_entry(&tokens, number)?;
        let matrix = match layer {
            0 => &mut weights.w_in,
            1 => &mut weights.w_out,
            _ => {
                return Err(LoadError::Parse {
                    line: number,
                    message: format!("layer index must be 0 or 1, got {}", layer),
                })
            }
        };
        let row = matrix.get_mut(a).ok_or_else(|| LoadError::Parse {
            line: number,
            message: format!("row index {} out of range for layer {}", a, layer),
        })?;
        let slot = row.get_mut(b).ok_or_else(|| LoadError::Parse {
            line: number,
            message: format!("column index {} out of range for layer {}", b, layer),
        })?;
        *slot = value;
    }

    if !header_seen {
        return Err(LoadError::Parse {
            line: 1,
            message: "missing topology header".to_string(),
        });
    }

    Ok(weights)
}

fn parse_header(tokens: &[&str], line: usize) -> Result<Topology, LoadError> {
    if tokens.len() != 3 {
        return Err(LoadError::Parse {
            line,
            message: format!("expected 3 header values, got {}", tokens.len()),
        });
    }
    let mut sizes = [0usize; 3];
    for (slot, token) in sizes.iter_mut().zip(tokens) {
        *slot = token.parse().map_err(|_| LoadError::Parse {
            line,
            message: format!("'{}' is not a valid layer size", token),
        })?;
    }
    if sizes.contains(&0) {
        return Err(LoadError::Parse {
            line,
            message: "layer sizes must be positive".to_string(),
        });
    }
    Ok(Topology::new(sizes[0], sizes[1], sizes[2]))
}

fn parse_entry(tokens: &[&str], line: usize) -> Result<(usize, usize, usize, f64), LoadError> {
    if tokens.len() != 4 {
        return Err(LoadError::Parse {
            line,
            message: format!("expected 'layer row col value', got {} tokens", tokens.len()),
        });
    }
    let layer = tokens[0].parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("'{}' is not a valid layer index", tokens[0]),
    })?;
    let a = tokens[1].parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("'{}' is not a valid row index", tokens[1]),
    })?;
    let b = tokens[2].parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("'{}' is not a valid column index", tokens[2]),
    })?;
    let value = tokens[3].parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("'{}' is not a valid weight value", tokens[3]),
    })?;
    Ok((layer, a, b, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("perceptron-nn-{}-{}", std::process::id(), name))
    }

    fn sample_weights() -> Weights {
        let topology = Topology::new(2, 3, 1);
        let mut weights = Weights::zeros(topology);
        weights.w_in = vec![
            vec![0.1, -0.25, 0.3333333333333333],
            vec![1.5e-7, 42.0, -0.875],
        ];
        weights.w_out = vec![vec![0.6], vec![-0.2], vec![0.05]];
        weights
    }

    #[test]
    fn round_trips_exactly() {
        let path = temp_path("roundtrip.txt");
        let original = sample_weights();

        save(&original, &path).unwrap();
        let loaded = load(&path, original.topology).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn mismatched_header_reports_both_topologies() {
        let path = temp_path("mismatch.txt");
        save(&sample_weights(), &path).unwrap();

        let result = load(&path, Topology::new(4, 3, 1));
        fs::remove_file(&path).unwrap();

        match result {
            Err(LoadError::TopologyMismatch { expected, found }) => {
                assert_eq!(expected, Topology::new(4, 3, 1));
                assert_eq!(found, Topology::new(2, 3, 1));
            }
            other => panic!("expected TopologyMismatch, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load(&temp_path("no-such-file.txt"), Topology::new(2, 2, 1));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn malformed_value_reports_line_number() {
        let path = temp_path("malformed.txt");
        fs::write(&path, "2 2 1\n\n0 0 0 not-a-number\n").unwrap();

        let result = load(&path, Topology::new(2, 2, 1));
        fs::remove_file(&path).unwrap();

        match result {
            Err(LoadError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let path = temp_path("out-of-range.txt");
        fs::write(&path, "2 2 1\n\n0 5 0 1.0\n").unwrap();

        let result = load(&path, Topology::new(2, 2, 1));
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(LoadError::Parse { line: 3, .. })));
    }
}
