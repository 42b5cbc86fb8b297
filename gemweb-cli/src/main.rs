// Command-line interface for gemweb
//
// This binary converts gemtext pages (and whole capsule directories) into HTML.
//
// The core capabilities live in the gemweb-babel crate; this binary only deals with files,
// configuration and process exit codes.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. The to defaults to html.
// Usage:
//  gemweb <input> [--to <format>] [--from <format>] [--output <file>]  - Convert a page (default)
//  gemweb convert <input> [--to <format>] ...   - Same as above (explicit)
//  gemweb build <source-dir> <target-dir>       - Mirror a capsule into a web root
//  gemweb inspect <path> [<transform>]          - Execute a transform (defaults to "blocks-treeviz")
//  gemweb format <input>                        - Rewrite a page as canonical gemtext
//  gemweb --list-transforms                     - List available transforms
//
// Extra Parameters:
//
// Settings from gemweb.toml can be overridden per run with --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix; known keys update the configuration, anything
// left over is handed to the target format.
// Example:
//  gemweb build capsule www --extra-on-error skip --extra-doctype

use gemweb_cli::site::SiteBuilder;
use gemweb_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use gemweb_babel::{FormatRegistry, HtmlOptions};
use gemweb_config::{ErrorPolicy, GemwebConfig, Loader};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "build", "inspect", "format", "help"];

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
            // A following arg is the value unless it is another flag
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

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
    Command::new("gemweb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert gemtext pages and capsules to HTML")
        .long_about(
            "gemweb turns gemtext (text/gemini) documents into HTML.\n\n\
            Commands:\n  \
            - convert: Convert a single page (default command)\n  \
            - build:   Mirror a capsule directory into a web root\n  \
            - inspect: View the line events or blocks of a page\n  \
            - format:  Rewrite a page as canonical gemtext\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration for one run.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            gemweb index.gmi                         # Convert to HTML (outputs to stdout)\n  \
            gemweb index.gmi -o index.html           # Convert to an HTML file\n  \
            gemweb build capsule/ public/            # Convert a whole capsule\n  \
            gemweb inspect index.gmi lines-simple    # See how each line was classified"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .long_about(
                    "View the structure of a gemtext file at different processing stages.\n\n\
                    Transforms (stage-format):\n  \
                    - lines-json:     Line events as JSON\n  \
                    - lines-simple:   One line number and event kind per line\n  \
                    - blocks-json:    Block tree as JSON\n  \
                    - blocks-treeviz: Block tree visualization (default)\n\n\
                    Examples:\n  \
                    gemweb inspect page.gmi                 # Tree visualization (default)\n  \
                    gemweb inspect page.gmi lines-simple    # Line classification"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the gemtext file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'blocks-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a single page (default command)")
                .long_about(
                    "Convert a document between formats.\n\n\
                    Supported formats:\n  \
                    - gemtext: Gemini hypertext (.gmi, .gemini)\n  \
                    - html:    HTML page (.html), output only\n  \
                    - treeviz: Block tree visualization, output only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    gemweb convert index.gmi                      # HTML to stdout\n  \
                    gemweb convert index.gmi -o index.html        # HTML file\n  \
                    gemweb notes.txt --from gemtext --to html     # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
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
                        .help("Target format")
                        .default_value("html")
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
            Command::new("build")
                .about("Mirror a capsule directory into a web root")
                .long_about(
                    "Copy a whole directory tree, converting every gemtext page to HTML.\n\n\
                    The target directory must not exist. Pages are written next to their\n\
                    sources with the target extension; all other files are copied verbatim.\n\n\
                    Relevant settings ([build] in gemweb.toml, or --extra-<name>):\n  \
                    on-error          abort (default) or skip failing pages\n  \
                    keep-sources      keep the .gmi files in the target (default true)\n  \
                    source-extension  extension of pages to convert (default gmi)\n  \
                    target-extension  extension of generated pages (default html)"
                )
                .arg(
                    Arg::new("source")
                        .help("Capsule directory to read")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("target")
                        .help("Directory to create")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Format a gemtext file")
                .long_about(
                    "Parse a gemtext file and write it back in canonical form:\n\
                    one blank line between blocks, normalized markers and link spacing.\n\n\
                    Output is always written to stdout.\n\n\
                    Examples:\n  \
                    gemweb format input.gmi                  # Format to stdout\n  \
                    gemweb format input.gmi > formatted.gmi  # Redirect to file"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // If no subcommand is given, retry with "convert" injected
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
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

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to has a default");

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match FormatRegistry::default().detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("build", sub_matches)) => {
            let source = sub_matches
                .get_one::<String>("source")
                .expect("source is required");
            let target = sub_matches
                .get_one::<String>("target")
                .expect("target is required");
            handle_build_command(Path::new(source), Path::new(target), &config);
        }
        Some(("format", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            // Format command always outputs to stdout (no -o flag)
            handle_convert_command(input, "gemtext", "gemtext", None, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, extra_params: &HashMap<String, String>) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let output = transforms::execute_transform(&source, transform, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &GemwebConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error in '{input}': {e}");
        std::process::exit(1);
    });
    debug!(input, from, to, blocks = doc.body.len(), "parsed input");

    // Format-specific parameters: configured defaults first, then --extra-* leftovers
    let mut format_options = if to == "html" {
        html_params_from_config(config)
    } else {
        HashMap::new()
    };
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
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

/// Handle the build command
fn handle_build_command(source: &Path, target: &Path, config: &GemwebConfig) {
    let options = HtmlOptions::from(&config.convert.html);
    let report = SiteBuilder::new(&config.build, &options)
        .build(source, target)
        .unwrap_or_else(|e| {
            eprintln!("Build failed: {e}");
            std::process::exit(1);
        });

    println!(
        "Converted {} pages, copied {} files into {}",
        report.converted.len(),
        report.copied,
        target.display()
    );
    if !report.skipped.is_empty() {
        eprintln!("Skipped {} pages:", report.skipped.len());
        for (path, reason) in &report.skipped {
            eprintln!("  {}: {reason}", path.display());
        }
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  lines   - Line events, one per source line");
    println!("  blocks  - Block tree (final parsed document)\n");

    println!("Formats:");
    println!("  json    - JSON output (all stages)");
    println!("  simple  - Line number and event kind (lines only)");
    println!("  treeviz - Tree visualization (blocks only)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> GemwebConfig {
    let loader = Loader::new().with_optional_file("gemweb.toml");
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

/// Move known --extra-* keys into the configuration. Unknown keys stay in
/// `extra_params` for the target format.
fn apply_config_overrides(config: &mut GemwebConfig, extra_params: &mut HashMap<String, String>) {
    let html = &mut config.convert.html;
    if let Some(raw) = extra_params.remove("pretty") {
        html.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = extra_params.remove("doctype") {
        html.doctype = parse_bool_arg("doctype", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["title-from-heading", "title"]) {
        html.title_from_heading = parse_bool_arg("title-from-heading", &raw);
    }
    if let Some(raw) = extra_params.remove("lang") {
        html.lang = raw;
    }

    let build = &mut config.build;
    if let Some(raw) = take_override(extra_params, &["on-error", "on_error"]) {
        build.on_error = match raw.to_lowercase().as_str() {
            "abort" => ErrorPolicy::Abort,
            "skip" => ErrorPolicy::Skip,
            other => {
                eprintln!("Invalid value '{other}' for --extra-on-error (expected abort or skip)");
                std::process::exit(1);
            }
        };
    }
    if let Some(raw) = extra_params.remove("keep-sources") {
        build.keep_sources = parse_bool_arg("keep-sources", &raw);
    }
    if let Some(raw) = extra_params.remove("source-extension") {
        build.source_extension = raw;
    }
    if let Some(raw) = extra_params.remove("target-extension") {
        build.target_extension = raw;
    }
}

fn html_params_from_config(config: &GemwebConfig) -> HashMap<String, String> {
    let html = &config.convert.html;
    let mut params = HashMap::new();
    params.insert("pretty".to_string(), html.pretty.to_string());
    params.insert("doctype".to_string(), html.doctype.to_string());
    params.insert(
        "title-from-heading".to_string(),
        html.title_from_heading.to_string(),
    );
    params.insert("lang".to_string(), html.lang.clone());
    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
