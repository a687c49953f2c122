use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use pmql::Dialect;
use pmql::cli::{self, CliError, Mode, RunOptions, RunResult};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "pmql")]
#[command(about = "PMQL - compile filter queries into parameterized SQL, or evaluate arithmetic")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Sqlite,
    Postgres,
}

impl From<DialectArg> for Dialect {
    fn from(d: DialectArg) -> Self {
        match d {
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Postgres => Dialect::Postgres,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an integer arithmetic expression
    Eval {
        /// The expression, e.g. '2*(1+5)'
        expression: String,
    },

    /// Compile a query and print its SQL, bindings and predicate tree
    Compile {
        /// The PMQL query
        query: String,

        /// SQL flavour used for rendering
        #[arg(short, long, value_enum, default_value_t = DialectArg::Sqlite)]
        dialect: DialectArg,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Filter JSON records with a query
    Filter {
        /// The PMQL query
        query: String,

        /// JSON records (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Only validate syntax
    Check {
        /// The text to validate
        text: String,

        /// Use the arithmetic grammar instead of the query grammar
        #[arg(long)]
        arithmetic: bool,
    },

    /// Show documentation, optionally for one topic
    Docs {
        /// Topic name (omit to list topics)
        topic: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PMQL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval { expression } => run(RunOptions {
            mode: Mode::Eval,
            text: expression,
            ..Default::default()
        }),
        Commands::Compile {
            query,
            dialect,
            pretty,
        } => run(RunOptions {
            mode: Mode::Compile,
            text: query,
            dialect: dialect.into(),
            pretty,
            ..Default::default()
        }),
        Commands::Filter {
            query,
            input,
            pretty,
        } => read_input(input).and_then(|input| {
            run(RunOptions {
                mode: Mode::Filter,
                text: query,
                input,
                pretty,
                ..Default::default()
            })
        }),
        Commands::Check { text, arithmetic } => run(RunOptions {
            mode: Mode::Check { arithmetic },
            text,
            ..Default::default()
        }),
        Commands::Docs { topic: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs { topic: Some(topic) } => cli::get_doc_topic(&topic).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run(options: RunOptions) -> Result<(), CliError> {
    match cli::execute(&options)? {
        RunResult::SyntaxValid => println!("Syntax is valid"),
        RunResult::Integer(n) => println!("{}", n),
        RunResult::Json(output) => {
            let json = if options.pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
