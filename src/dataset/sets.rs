use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::network::topology::Topology;

/// An ordered sequence of (input, target) pairs.
///
/// Order is significant: training updates weights online, one example at a
/// time, so the sequence determines the update trajectory.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
}

impl TrainingSet {
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> TrainingSet {
        assert_eq!(
            inputs.len(),
            targets.len(),
            "inputs and targets must have equal length ({} vs {})",
            inputs.len(),
            targets.len()
        );
        TrainingSet { inputs, targets }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Why a dataset file could not be read. `Io` (typically a missing file) is
/// non-fatal by contract: callers fall back to interactive entry.
#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    Parse { message: String },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "cannot read dataset file: {}", e),
            DatasetError::Parse { message } => write!(f, "malformed dataset file: {}", message),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<io::Error> for DatasetError {
    fn from(e: io::Error) -> DatasetError {
        DatasetError::Io(e)
    }
}

/// Reads a training set file: a leading set count, then for each set
/// `inputs` values followed by `outputs` values, all whitespace-separated.
pub fn read_training_sets(path: &Path, topology: Topology) -> Result<TrainingSet, DatasetError> {
    let text = fs::read_to_string(path)?;
    let mut tokens = Tokens::new(&text);

    let count = tokens.next_usize("set count")?;
    let mut inputs = Vec::with_capacity(count);
    let mut targets = Vec::with_capacity(count);

    for set in 1..=count {
        inputs.push(tokens.next_vector(topology.inputs, set, "input")?);
        targets.push(tokens.next_vector(topology.outputs, set, "output")?);
    }
    tokens.expect_end()?;

    Ok(TrainingSet::new(inputs, targets))
}

/// Reads a testing set file: a leading set count, then `inputs` values per
/// set, all whitespace-separated.
pub fn read_testing_sets(path: &Path, inputs: usize) -> Result<Vec<Vec<f64>>, DatasetError> {
    let text = fs::read_to_string(path)?;
    let mut tokens = Tokens::new(&text);

    let count = tokens.next_usize("set count")?;
    let mut sets = Vec::with_capacity(count);
    for set in 1..=count {
        sets.push(tokens.next_vector(inputs, set, "input")?);
    }
    tokens.expect_end()?;

    Ok(sets)
}

/// Whitespace token stream over a dataset file's contents.
struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Tokens<'a> {
        Tokens { iter: text.split_whitespace() }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize, DatasetError> {
        let token = self.iter.next().ok_or_else(|| DatasetError::Parse {
            message: format!("unexpected end of file, expected {}", what),
        })?;
        token.parse().map_err(|_| DatasetError::Parse {
            message: format!("'{}' is not a valid {}", token, what),
        })
    }

    fn next_vector(&mut self, len: usize, set: usize, kind: &str) -> Result<Vec<f64>, DatasetError> {
        let mut values = Vec::with_capacity(len);
        for index in 0..len {
            let token = self.iter.next().ok_or_else(|| DatasetError::Parse {
                message: format!("unexpected end of file in {} {} of set {}", kind, index, set),
            })?;
            let value = token.parse().map_err(|_| DatasetError::Parse {
                message: format!("'{}' is not a valid {} value (set {})", token, kind, set),
            })?;
            values.push(value);
        }
        Ok(values)
    }

    fn expect_end(&mut self) -> Result<(), DatasetError> {
        match self.iter.next() {
            None => Ok(()),
            Some(token) => Err(DatasetError::Parse {
                message: format!("trailing data starting at '{}'", token),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("perceptron-nn-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_and_training_file() {
        let path = temp_file(
            "and-train.txt",
            "4\n0 0 0\n0 1 0\n1 0 0\n1 1 1\n",
        );
        let set = read_training_sets(&path, Topology::new(2, 2, 1)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.inputs[3], vec![1.0, 1.0]);
        assert_eq!(set.targets[3], vec![1.0]);
        assert_eq!(set.targets[0], vec![0.0]);
    }

    #[test]
    fn reads_testing_file() {
        let path = temp_file("test-sets.txt", "2\n0.5 0.25\n1 0\n");
        let sets = read_testing_sets(&path, 2).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(sets, vec![vec![0.5, 0.25], vec![1.0, 0.0]]);
    }

    #[test]
    fn truncated_file_is_a_parse_error() {
        let path = temp_file("truncated.txt", "2\n0 0 0\n1 1\n");
        let result = read_training_sets(&path, Topology::new(2, 2, 1));
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn non_numeric_value_is_a_parse_error() {
        let path = temp_file("non-numeric.txt", "1\n0 x 0\n");
        let result = read_training_sets(&path, Topology::new(2, 2, 1));
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("perceptron-nn-no-such-dataset.txt");
        let result = read_testing_sets(&path, 2);
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
