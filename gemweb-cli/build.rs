use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] =
    &["lines-json", "lines-simple", "blocks-json", "blocks-treeviz"];

fn path_arg(name: &'static str, help: &'static str, index: usize, hint: ValueHint) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(index)
        .value_hint(hint)
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("gemweb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert gemtext pages and capsules to HTML")
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a gemweb.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a gemtext file is classified and grouped")
                .arg(path_arg("path", "Path to the gemtext file", 1, ValueHint::FilePath))
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a single page (default command)")
                .arg(path_arg("input", "Input file path", 1, ValueHint::FilePath))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format")
                        .value_parser(["gemtext"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_parser(["html", "gemtext", "treeviz"]),
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
            Command::new("build")
                .about("Mirror a capsule directory into a web root")
                .arg(path_arg("source", "Capsule directory to read", 1, ValueHint::DirPath))
                .arg(path_arg("target", "Directory to create", 2, ValueHint::DirPath)),
        )
        .subcommand(
            Command::new("format")
                .about("Format a gemtext file")
                .arg(path_arg("input", "Input file path", 1, ValueHint::FilePath)),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "gemweb", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "gemweb", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "gemweb", &outdir)?;

    Ok(())
}
