use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use perceptron_nn::config::run_config::{ConfigSource, RunConfig};
use perceptron_nn::console::prompt;
use perceptron_nn::dataset::sets;
use perceptron_nn::network::network::Network;
use perceptron_nn::network::topology::Topology;
use perceptron_nn::train::loop_fn::train_loop;
use perceptron_nn::train::report::{StopReason, TrainReport};
use perceptron_nn::train::train_config::TrainConfig;
use perceptron_nn::weights::init;
use perceptron_nn::weights::store::{self, Weights};

/// One-hidden-layer perceptron trainer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON configuration file; options are prompted
    /// interactively when omitted.
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let auto = args.config.is_some();

    let config = match &args.config {
        Some(path) => {
            let (config, source) = RunConfig::load(Path::new(path));
            match source {
                ConfigSource::File => {
                    println!("Configuration file found, loading configuration options.")
                }
                ConfigSource::DefaultsMissingFile => println!(
                    "{} configuration file not found, using default options.",
                    "warning:".yellow()
                ),
                ConfigSource::DefaultsMalformed(e) => println!(
                    "{} malformed configuration file ({}), using default options.",
                    "warning:".yellow(),
                    e
                ),
            }
            config.validate()?;
            config
        }
        None => RunConfig::default(),
    };

    let topology = if auto {
        config.topology()
    } else {
        println!();
        println!("{}", "Reading configuration options.".bold());
        Topology::new(
            prompt::prompt_usize_min("Number of input nodes", 1)?,
            prompt::prompt_usize_min("Number of hidden nodes", 1)?,
            prompt::prompt_usize_min("Number of output nodes", 1)?,
        )
    };

    println!();
    println!("{}", "Network configuration".bold());
    println!(" - Number of input nodes: {}", topology.inputs);
    println!(" - Number of hidden nodes: {}", topology.hidden);
    println!(" - Number of output nodes: {}", topology.outputs);

    match prompt_operation()? {
        Operation::Run => run_network(topology, &config, auto),
        Operation::Train => train_network(topology, &config, auto),
    }
}

enum Operation {
    Run,
    Train,
}

fn prompt_operation() -> io::Result<Operation> {
    let stdin = io::stdin();
    loop {
        println!();
        print!("Run or train network? ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input while choosing an operation",
            ));
        }
        match line.trim() {
            "run" => return Ok(Operation::Run),
            "train" => return Ok(Operation::Train),
            other => println!("'{}' is not an option, enter 'run' or 'train'.", other),
        }
    }
}

/// Run-only mode: acquire weights and testing sets, then print one output
/// vector per input.
fn run_network(topology: Topology, config: &RunConfig, auto: bool) -> Result<()> {
    let weights = if auto {
        match &config.weights_file {
            Some(path) => load_weights_or_manual(Path::new(path), topology)?,
            None => prompt::prompt_weights(topology)?,
        }
    } else if prompt::prompt_bool("Use weights file")? {
        let path = prompt::prompt_file_path("Weights file path")?;
        load_weights_or_manual(Path::new(&path), topology)?
    } else {
        prompt::prompt_weights(topology)?
    };
    let mut network = Network::with_weights(weights);

    let inputs = if auto {
        match &config.testing_file {
            Some(path) => read_testing_or_manual(Path::new(path), topology.inputs)?,
            None => prompt::prompt_testing_sets(topology.inputs)?,
        }
    } else if prompt::prompt_bool("Use testing file")? {
        let path = prompt::prompt_file_path("Testing file path")?;
        read_testing_or_manual(Path::new(&path), topology.inputs)?
    } else {
        prompt::prompt_testing_sets(topology.inputs)?
    };

    let outputs = network.evaluate(&inputs);
    println!();
    for (input, output) in inputs.iter().zip(&outputs) {
        println!("Inputs: {}, F: {}", fmt_vec(input), fmt_vec(output));
    }
    Ok(())
}

/// Training mode: acquire initial weights and the training set, run the
/// convergence loop, report, and persist the final weights if configured.
fn train_network(topology: Topology, config: &RunConfig, auto: bool) -> Result<()> {
    let config = if auto { config.clone() } else { prompt_train_options()? };

    println!();
    println!("{}", "Training options".bold());
    println!(" - Random weight range: {} to {}", config.min_random, config.max_random);
    println!(" - Max iterations: {}", config.max_iterations);
    println!(" - Lambda: {}", config.lambda);
    println!(" - Error threshold: {}", config.error_threshold);

    let weights = match &config.weights_file {
        Some(path) => match store::load(Path::new(path), topology) {
            Ok(weights) => weights,
            Err(e) => {
                println!("{} {}, randomizing weights instead.", "warning:".yellow(), e);
                init::randomize(topology, config.min_random, config.max_random)
            }
        },
        None => init::randomize(topology, config.min_random, config.max_random),
    };
    let mut network = Network::with_weights(weights);

    let set = match &config.training_file {
        Some(path) => match sets::read_training_sets(Path::new(path), topology) {
            Ok(set) => set,
            Err(e) => {
                println!("{} {}, reading training sets manually.", "warning:".yellow(), e);
                prompt::prompt_training_sets(topology)?
            }
        },
        None => prompt::prompt_training_sets(topology)?,
    };

    let mut train_config =
        TrainConfig::new(config.lambda, config.max_iterations, config.error_threshold);
    if config.autosave_interval > 0 {
        match &config.saved_weights_file {
            Some(path) => {
                train_config =
                    train_config.with_autosave(config.autosave_interval, path.into());
            }
            None => println!(
                "{} autosave interval set but no saved weights file configured, \
                 training without checkpoints.",
                "warning:".yellow()
            ),
        }
    }

    let report = train_loop(&mut network, &set, &train_config);
    print_report(&report, &train_config);

    if let Some(path) = &config.saved_weights_file {
        store::save(&network.weights(), Path::new(path))?;
        println!();
        println!("Weights saved to {}.", path);
    }
    Ok(())
}

/// Prompts for every training-related option, mirroring the config file's
/// fields.
fn prompt_train_options() -> io::Result<RunConfig> {
    println!();
    println!("{}", "Reading training options.".bold());

    let mut config = RunConfig::default();
    config.lambda = prompt::prompt_f64_min("Lambda", 0.0)?;
    config.max_iterations = prompt::prompt_usize_min("Max iterations", 0)?;
    config.error_threshold = prompt::prompt_f64_min("Error threshold", 0.0)?;
    config.min_random = prompt::prompt_f64("Min random")?;
    config.max_random = loop {
        let value = prompt::prompt_f64("Max random")?;
        if value > config.min_random {
            break value;
        }
        println!("   - Max random must be greater than min random ({}).", config.min_random);
    };
    config.autosave_interval = prompt::prompt_usize_min("Autosave interval (0 disables)", 0)?;

    config.weights_file = if prompt::prompt_bool("Use weights file")? {
        Some(prompt::prompt_file_path("Weights file path")?)
    } else {
        None
    };
    config.training_file = if prompt::prompt_bool("Use training file")? {
        Some(prompt::prompt_file_path("Training file path")?)
    } else {
        None
    };
    config.saved_weights_file = if prompt::prompt_bool("Save weights")? {
        Some(prompt::prompt_file_path("Saved weights file path")?)
    } else {
        None
    };

    Ok(config)
}

fn load_weights_or_manual(path: &Path, topology: Topology) -> io::Result<Weights> {
    match store::load(path, topology) {
        Ok(weights) => Ok(weights),
        Err(e) => {
            println!("{} {}, reading weights manually.", "warning:".yellow(), e);
            prompt::prompt_weights(topology)
        }
    }
}

fn read_testing_or_manual(path: &Path, inputs: usize) -> io::Result<Vec<Vec<f64>>> {
    match sets::read_testing_sets(path, inputs) {
        Ok(sets) => Ok(sets),
        Err(e) => {
            println!("{} {}, reading testing sets manually.", "warning:".yellow(), e);
            prompt::prompt_testing_sets(inputs)
        }
    }
}

fn print_report(report: &TrainReport, config: &TrainConfig) {
    println!();
    match report.stop_reason {
        StopReason::MaxIterations => println!(
            "{}",
            format!("Max number of iterations reached ({}).", report.iterations).yellow()
        ),
        StopReason::ErrorThreshold => {
            println!("{} total iterations.", report.iterations);
            println!(
                "{}",
                format!(
                    "Error threshold met: {} total error compared to threshold {}.",
                    report.final_error, config.error_threshold
                )
                .green()
            );
        }
    }

    for (iteration, message) in &report.autosave_failures {
        println!(
            "{} autosave at iteration {} failed: {}",
            "warning:".yellow(),
            iteration,
            message
        );
    }

    for eval in &report.evaluations {
        println!(
            "Inputs: {}, T: {}, F: {}",
            fmt_vec(&eval.input),
            fmt_vec(&eval.expected),
            fmt_vec(&eval.predicted)
        );
    }
}

fn fmt_vec(values: &[f64]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}
