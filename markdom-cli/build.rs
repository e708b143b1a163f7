use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the registry's format names
// We need to duplicate this here since build scripts can't access the library
const SOURCE_FORMATS: &[&str] = &["json", "markdown", "xml", "yaml"];
const TARGET_FORMATS: &[&str] = &["debug", "html", "json", "markdown", "xhtml", "xml", "yaml"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let config = Arg::new("config")
        .long("config")
        .value_name("PATH")
        .help("Path to a markdom.toml configuration file")
        .value_hint(ValueHint::FilePath)
        .global(true);

    let mut cmd = Command::new("markdom")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, HTML, JSON, YAML and XML")
        .arg_required_else_help(true)
        .arg(config)
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
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
                        .help("Source format")
                        .value_parser(clap::builder::PossibleValuesParser::new(SOURCE_FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(TARGET_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("list").about("List the available formats").arg(
                Arg::new("verbose")
                    .long("verbose")
                    .short('v')
                    .action(ArgAction::SetTrue),
            ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "markdom", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "markdom", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "markdom", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
