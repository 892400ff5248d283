//! Validated interactive prompts.
//!
//! Each prompt re-asks until the input parses and satisfies its constraint,
//! matching the label/requirement message style of the original console
//! interface. End of input on stdin is surfaced as an `UnexpectedEof` error
//! rather than looping forever.

use std::io::{self, Write};

use crate::dataset::sets::TrainingSet;
use crate::network::topology::Topology;
use crate::weights::store::Weights;

fn prompt_with<T>(
    label: &str,
    requirement: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<T> {
    let stdin = io::stdin();
    loop {
        print!(" - {}: ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("end of input while reading '{}'", label),
            ));
        }

        match parse(line.trim()) {
            Some(value) => return Ok(value),
            None => println!("   - {} must be {}.", label, requirement),
        }
    }
}

/// Any finite double.
pub fn prompt_f64(label: &str) -> io::Result<f64> {
    prompt_with(label, "a valid double", |s| {
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    })
}

/// A finite double greater than or equal to `min`.
pub fn prompt_f64_min(label: &str, min: f64) -> io::Result<f64> {
    prompt_with(label, &format!("a valid double >= {}", min), |s| {
        s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= min)
    })
}

/// A non-negative integer greater than or equal to `min`.
pub fn prompt_usize_min(label: &str, min: usize) -> io::Result<usize> {
    prompt_with(label, &format!("a valid integer >= {}", min), |s| {
        s.parse::<usize>().ok().filter(|v| *v >= min)
    })
}

/// `true` or `false`.
pub fn prompt_bool(label: &str) -> io::Result<bool> {
    prompt_with(label, "'true' or 'false'", |s| s.parse::<bool>().ok())
}

/// A path ending in `.json` or `.txt`.
pub fn prompt_file_path(label: &str) -> io::Result<String> {
    prompt_with(label, "a valid file path (.json or .txt)", |s| {
        if s.ends_with(".json") || s.ends_with(".txt") {
            Some(s.to_string())
        } else {
            None
        }
    })
}

/// Reads testing sets from the console: a set count, then one input value
/// per prompt.
pub fn prompt_testing_sets(inputs: usize) -> io::Result<Vec<Vec<f64>>> {
    println!();
    println!("Reading testing input sets.");
    let count = prompt_usize_min("Number of testing sets", 1)?;

    let mut sets = Vec::with_capacity(count);
    for t in 1..=count {
        println!();
        println!("Testing set #{}.", t);
        let mut input = Vec::with_capacity(inputs);
        for k in 0..inputs {
            input.push(prompt_f64(&format!("Input {}", k))?);
        }
        sets.push(input);
    }
    Ok(sets)
}

/// Reads training sets from the console: a set count, then the input and
/// target values of each set.
pub fn prompt_training_sets(topology: Topology) -> io::Result<TrainingSet> {
    println!();
    println!("Reading training input sets.");
    let count = prompt_usize_min("Number of training sets", 1)?;

    let mut inputs = Vec::with_capacity(count);
    let mut targets = Vec::with_capacity(count);
    for t in 1..=count {
        println!();
        println!("Training set #{}.", t);
        let mut input = Vec::with_capacity(topology.inputs);
        for k in 0..topology.inputs {
            input.push(prompt_f64(&format!("Input {}", k))?);
        }
        let mut target = Vec::with_capacity(topology.outputs);
        for i in 0..topology.outputs {
            target.push(prompt_f64(&format!("Output {}", i))?);
        }
        inputs.push(input);
        targets.push(target);
    }
    Ok(TrainingSet::new(inputs, targets))
}

/// Reads a full weight set from the console, one element at a time, walking
/// input→hidden then hidden→output.
pub fn prompt_weights(topology: Topology) -> io::Result<Weights> {
    println!();
    println!("Reading weights manually.");

    let mut weights = Weights::zeros(topology);
    for k in 0..topology.inputs {
        for j in 0..topology.hidden {
            weights.w_in[k][j] = prompt_f64(&format!("W[0][{}][{}]", k, j))?;
        }
    }
    for j in 0..topology.hidden {
        for i in 0..topology.outputs {
            weights.w_out[j][i] = prompt_f64(&format!("W[1][{}][{}]", j, i))?;
        }
    }
    Ok(weights)
}
