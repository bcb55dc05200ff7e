/**
 * DI Transformer CLI - ditc
 *
 * Scan, transform and generate the dependency-injection configuration of a project
 */
use clap::{Arg, ArgAction, ArgMatches, Command};
use di_transformer_cli::{init_logging, load_options, run_build, run_generate, run_scan, run_transform, CommandContext};
use std::path::PathBuf;
use std::process;

fn cli() -> Command {
    Command::new("ditc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dependency-injection transformer for TypeScript components")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to di.config.json")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print results as JSON")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log debug output")
                .global(true),
        )
        .subcommand(Command::new("scan").about("Print the implementation catalog"))
        .subcommand(
            Command::new("transform")
                .about("Rewrite component files")
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .value_name("DIR")
                        .help("Write transformed files below DIR instead of in place"),
                )
                .arg(Arg::new("files").value_name("FILES").num_args(0..)),
        )
        .subcommand(
            Command::new("generate")
                .about("Write the configuration module")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Override the configured output path"),
                ),
        )
        .subcommand(Command::new("build").about("Scan, transform and generate"))
}

// Global flags are read from the subcommand's matches, where clap propagates them.
fn run(name: &str, sub: &ArgMatches) -> anyhow::Result<bool> {
    let config = sub.get_one::<String>("config").map(PathBuf::from);
    let options = load_options(config.as_deref())?;
    let ctx = CommandContext::new(options, sub.get_flag("json"));

    let outcome = match name {
        "scan" => run_scan(&ctx)?,
        "transform" => {
            let files: Vec<String> = sub
                .get_many::<String>("files")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let out_dir = sub.get_one::<String>("out-dir").map(String::as_str);
            run_transform(&ctx, &files, out_dir)?
        }
        "generate" => {
            let output = sub.get_one::<String>("output").map(String::as_str);
            run_generate(&ctx, output)?
        }
        _ => run_build(&ctx)?,
    };

    println!("{}", outcome.output);
    Ok(outcome.failed)
}

fn main() {
    let matches = cli().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        process::exit(2);
    };
    init_logging(sub.get_flag("verbose"));

    match run(name, sub) {
        Ok(false) => {}
        Ok(true) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
