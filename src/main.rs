use std::{fs, io::BufRead, process};

use cnf_course_helper::{Grammar, GrammarError, NormalizeOptions, EXAMPLE_GRAMMAR};

fn print_help() {
    println!("Usage: cnf-course-helper outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions of the input grammar");
    println!("  nullable: Nullable non-terminals of the input grammar");
    println!("  cnf: Productions in Chomsky normal form");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -e: Keep the empty string through a new start symbol");
    println!("  -x: Use the built-in example grammar (no grammar file allowed)");
    println!("  -o FILE: Write the normal form as JSON to FILE");
    println!("The grammar is read from stdin when no file is given.");
    println!("Input starting with '{{' is read as a JSON grammar literal.");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn render(g: &Grammar, output_format: &OutputFormat) -> Result<String, GrammarError> {
    Ok(match output_format {
        OutputFormat::Plain => g.to_production_output_vec().to_plaintext(),
        OutputFormat::LaTeX => g.to_production_output_vec().to_latex(),
        OutputFormat::JSON => g.to_json()?,
    })
}

enum Input<'a> {
    Example,
    Stdin,
    File(&'a str),
}

struct Args<'a> {
    outputs: Vec<&'a str>,
    output_format: OutputFormat,
    options: NormalizeOptions,
    input: Input<'a>,
    output_file: Option<&'a str>,
}

/// `None` means the help text should be printed instead.
fn parse_args(args: &[String]) -> Option<Args> {
    let mut outputs: Vec<&str> = Vec::new();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "nullable", "cnf"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut options = NormalizeOptions::default();
    let mut use_example = false;
    let mut output_file: Option<&str> = None;

    while i < args.len() && args[i].starts_with('-') {
        match args[i].as_str() {
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::JSON,
            "-e" => options.preserve_empty_string = true,
            "-x" => use_example = true,
            "-o" if i + 1 < args.len() => {
                i += 1;
                output_file = Some(args[i].as_str());
            }
            _ => return None,
        }
        i += 1;
    }

    if i + 1 < args.len() || (outputs.is_empty() && output_file.is_none()) {
        return None;
    }

    let input = match (use_example, args.get(i)) {
        (true, None) => Input::Example,
        // -x and a grammar file contradict each other
        (true, Some(_)) => return None,
        (false, None) => Input::Stdin,
        (false, Some(file)) => Input::File(file.as_str()),
    };

    Some(Args {
        outputs,
        output_format,
        options,
        input,
        output_file,
    })
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let args = match parse_args(&args) {
        Some(args) => args,
        None => {
            print_help();
            return;
        }
    };

    let input: String = match args.input {
        Input::Example => EXAMPLE_GRAMMAR.to_string(),
        Input::Stdin => std::io::stdin()
            .lock()
            .lines()
            .map_while(Result::ok)
            .collect::<Vec<String>>()
            .join("\n"),
        Input::File(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                process::exit(1);
            }
        },
    };

    if let Err(e) = run(
        &input,
        &args.outputs,
        &args.output_format,
        &args.options,
        args.output_file,
    ) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(
    input: &str,
    outputs: &[&str],
    output_format: &OutputFormat,
    options: &NormalizeOptions,
    output_file: Option<&str>,
) -> Result<(), GrammarError> {
    let g = Grammar::load(input)?;
    let mut cnf: Option<Grammar> = None;

    for &output in outputs {
        match output {
            "prod" => println!("{}", render(&g, output_format)?),
            "nullable" => {
                let nullable = g.to_nullable_output();
                println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => nullable.to_plaintext(),
                        OutputFormat::LaTeX => nullable.to_latex(),
                        OutputFormat::JSON => serde_json::to_string(&nullable.names)?,
                    }
                );
            }
            "cnf" => {
                let normalized = g.normalize_with(options)?;
                println!("{}", render(&normalized, output_format)?);
                cnf = Some(normalized);
            }
            _ => {}
        }
    }

    if let Some(path) = output_file {
        let normalized = match cnf {
            Some(g) => g,
            None => g.normalize_with(options)?,
        };
        if let Err(e) = fs::write(path, normalized.to_json()?) {
            eprintln!("Failed to write {}: {}", path, e);
            process::exit(1);
        }
        eprintln!("Wrote {}", path);
    }

    Ok(())
}
