// Command-line interface for markdom
//
// This binary converts documents between the formats known to the markdom library.
// Every conversion is a single pass: the source format's dispatcher drives the target
// format's handler directly.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. Reading from stdin ("-") needs --from.
// Usage:
//  markdom <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  markdom convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  markdom list                                                               - List formats
//
// Configuration:
//
// Target options come from the embedded defaults, then ./markdom.toml, then --config <file>.
//
// Extra Parameters:
//
// Format-specific options can also be passed using --extra-<option> <value>. They win over
// configuration files. The CLI layer strips the "extra-" prefix and hands the option to the
// target format, which rejects options it does not know.
// Example:
//  markdom doc.md --to json --extra-pretty_print true

use clap::{Arg, ArgAction, Command, ValueHint};
use markdom::FormatRegistry;
use markdom_config::{Loader, MarkdomConfig};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const STDIN: &str = "-";
const LOG_ENV: &str = "MARKDOM_LOG";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("markdom")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, HTML, JSON, YAML and XML")
        .long_about(
            "markdom converts documents through the Markdom document model.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (default)\n  \
            - list:    Show the available formats\n\n\
            Extra Parameters:\n  \
            Use --extra-<option> [value] to pass options to the target format.\n  \
            Boolean options can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            markdom doc.md --to html                          # Convert to HTML (stdout)\n  \
            markdom doc.md --to xml -o doc.xml                # Write to a file\n  \
            cat doc.json | markdom - --from json --to yaml    # Read stdin\n  \
            markdom doc.md --to json --extra-pretty_print     # Indented JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a markdom.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Sources: markdown, json, yaml, xml\n\
                    Targets: markdown, html, xhtml, json, yaml, xml, debug\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List the available formats")
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .help("Also show file extensions and option names")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && (!cleaned_args[1].starts_with('-') || cleaned_args[1] == STDIN)
                && !["convert", "list", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let registry = FormatRegistry::default();

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            let from = match sub_matches.get_one::<String>("from") {
                Some(from) => from.to_string(),
                None => detect_source_format(&registry, input),
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params, &config);
        }
        Some(("list", sub_matches)) => {
            handle_list_command(&registry, sub_matches.get_flag("verbose"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn detect_source_format(registry: &FormatRegistry, input: &str) -> String {
    if input == STDIN {
        eprintln!("Error: --from is required when reading from stdin");
        std::process::exit(1);
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == STDIN {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MarkdomConfig,
) {
    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let format_options = target_options(config, to, extra_params);
    tracing::debug!(input, ?format_options, "target options");
    let result = registry
        .convert(&source, from, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Configured options of the target format, with --extra-* parameters on top.
fn target_options(
    config: &MarkdomConfig,
    to: &str,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = config.format_options(to);
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Handle the list command
fn handle_list_command(registry: &FormatRegistry, verbose: bool) {
    println!("Available formats:\n");
    for format in registry.formats() {
        println!(
            "  {:<10} {:<6} {:<10} {}",
            format.name(),
            if format.supports_parsing() { "read" } else { "" },
            if format.supports_serialization() { "write" } else { "" },
            format.description()
        );
        if verbose {
            println!("             extensions: {}", format.file_extensions().join(", "));
            println!("             options:    {}", format.option_keys().join(", "));
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MarkdomConfig {
    let loader = Loader::new().with_optional_file("markdom.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_parse_extra_args_empty() {
        let args = args(&["markdom", "convert", "doc.md", "--to", "html"]);
        let (cleaned, extra) = parse_extra_args(&args);

        assert_eq!(cleaned, args);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_parse_extra_args_single_param() {
        let (cleaned, extra) = parse_extra_args(&args(&[
            "markdom",
            "doc.md",
            "--extra-pretty_print",
            "false",
            "--to",
            "json",
        ]));

        assert_eq!(cleaned, args(&["markdom", "doc.md", "--to", "json"]));
        assert_eq!(extra.get("pretty_print"), Some(&"false".to_string()));
    }

    #[test]
    fn test_parse_extra_args_boolean_flag() {
        let (cleaned, extra) = parse_extra_args(&args(&[
            "markdom",
            "doc.md",
            "--extras-word_wrap",
            "--to",
            "yaml",
        ]));

        assert_eq!(cleaned, args(&["markdom", "doc.md", "--to", "yaml"]));
        assert_eq!(extra.get("word_wrap"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_extra_args_boolean_flag_at_end() {
        let (_, extra) = parse_extra_args(&args(&["markdom", "doc.md", "--extra-escape_html"]));
        assert_eq!(extra.get("escape_html"), Some(&"true".to_string()));
    }

    #[test]
    fn extra_params_override_configuration() {
        let config = markdom_config::load_defaults().unwrap();
        let extras = HashMap::from([("pretty_print".to_string(), "true".to_string())]);
        let options = target_options(&config, "json", &extras);
        assert_eq!(options.get("pretty_print"), Some(&"true".to_string()));
        assert_eq!(options.get("escape_unicode"), Some(&"false".to_string()));
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
