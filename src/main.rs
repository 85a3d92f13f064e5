use anyhow::{anyhow, Result};
use blueschema::app::{App, Command};
use blueschema::config::Config;
use blueschema::logger;
use blueschema::state::{ActionPath, Category, NewItemKind};
use clap::{
    crate_authors, crate_description, crate_version, App as Cli, AppSettings, Arg, ArgMatches,
    SubCommand,
};
use log::LevelFilter;
use std::path::PathBuf;

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    let level = match matches.occurrences_of("verbose") {
        0 => config.level_filter()?,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    logger::init_stderr(level)?;

    let command = command(&matches)?;
    App::start(config, command)
}

fn cli() -> Cli<'static, 'static> {
    let category = Arg::with_name("category")
        .help("entities, actions, dataSources, services, environment or accessControl")
        .required(true);
    let id = Arg::with_name("id").help("Item identifier").required(true);
    let path = Arg::with_name("path")
        .long("path")
        .short("p")
        .takes_value(true)
        .help("Group ids leading to an action tree level, e.g. g1/g2");

    Cli::new("blueschema")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .takes_value(true)
                .help("Directory holding config.yml"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .multiple(true)
                .help("Log more (repeat for trace output)"),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("List the items of a category")
                .arg(category.clone())
                .arg(path.clone())
                .arg(
                    Arg::with_name("search")
                        .long("search")
                        .short("s")
                        .takes_value(true)
                        .help("Only show items whose name or description contains this text"),
                ),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Print one item as JSON")
                .arg(category.clone())
                .arg(id.clone())
                .arg(path.clone()),
        )
        .subcommand(
            SubCommand::with_name("new")
                .about("Create an item with placeholder values")
                .arg(category.clone())
                .arg(path.clone())
                .arg(
                    Arg::with_name("group")
                        .long("group")
                        .help("Create a group instead of an action"),
                )
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .short("n")
                        .takes_value(true)
                        .help("Name of the new item"),
                ),
        )
        .subcommand(
            SubCommand::with_name("duplicate")
                .about("Copy an item under a new id")
                .arg(category.clone())
                .arg(id.clone())
                .arg(path.clone()),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Remove an item")
                .arg(category)
                .arg(id)
                .arg(path),
        )
        .subcommand(
            SubCommand::with_name("export")
                .about("Generate the application JSON document")
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .help("Directory to write the export file to"),
                )
                .arg(
                    Arg::with_name("print")
                        .long("print")
                        .help("Print the export to stdout"),
                ),
        )
        .subcommand(
            SubCommand::with_name("reset").about("Replace the document with the sample data"),
        )
}

fn command(matches: &ArgMatches) -> Result<Command> {
    match matches.subcommand() {
        ("list", Some(args)) => Ok(Command::List {
            category: category(args)?,
            path: path(args)?,
            search: args.value_of("search").map(str::to_string),
        }),
        ("show", Some(args)) => Ok(Command::Show {
            category: category(args)?,
            path: path(args)?,
            id: id(args)?,
        }),
        ("new", Some(args)) => Ok(Command::New {
            category: category(args)?,
            path: path(args)?,
            kind: if args.is_present("group") {
                NewItemKind::Group
            } else {
                NewItemKind::Action
            },
            name: args.value_of("name").map(str::to_string),
        }),
        ("duplicate", Some(args)) => Ok(Command::Duplicate {
            category: category(args)?,
            path: path(args)?,
            id: id(args)?,
        }),
        ("delete", Some(args)) => Ok(Command::Delete {
            category: category(args)?,
            path: path(args)?,
            id: id(args)?,
        }),
        ("export", Some(args)) => Ok(Command::Export {
            output: args.value_of("output").map(PathBuf::from),
            print: args.is_present("print") || !args.is_present("output"),
        }),
        ("reset", _) => Ok(Command::Reset),
        (other, _) => Err(anyhow!("Unknown command '{}'", other)),
    }
}

fn category(args: &ArgMatches) -> Result<Category> {
    let value = args
        .value_of("category")
        .ok_or_else(|| anyhow!("Missing category"))?;
    value.parse().map_err(|e: String| anyhow!(e))
}

fn path(args: &ArgMatches) -> Result<ActionPath> {
    args.value_of("path")
        .unwrap_or("")
        .parse()
        .map_err(|e: String| anyhow!(e))
}

fn id(args: &ArgMatches) -> Result<String> {
    args.value_of("id")
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Missing id"))
}
