use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr};

use devstats_core::DevstatsConfig;
use devstats_report::{run_report, OutputFormat, QUESTION_COUNT};
use devstats_table::Dataset;

const CONFIG_FILE: &str = ".devstats.toml";

#[derive(Parser)]
#[command(
    name = "devstats",
    version,
    about = "Descriptive statistics over exported users and repositories",
    long_about = "devstats answers sixteen fixed questions about a users table and a\n\
                   repositories table exported as CSV: top-N rankings, value counts,\n\
                   correlations and simple linear regressions.\n\n\
                   Examples:\n  \
                     devstats report                          Answer every question\n  \
                     devstats report -q 1 -q 8                Answer questions 1 and 8 only\n  \
                     devstats report --city Berlin --top-n 10 Override the analysis settings\n  \
                     devstats --format json report            Machine-readable output\n  \
                     devstats init                            Create a .devstats.toml file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .devstats.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for the report.\n\n\
                       Formats:\n  \
                         text      One labelled line per question (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Answer the questions over the users and repositories tables
    #[command(long_about = "Answer the questions over the users and repositories tables.\n\n\
        Both CSV files need a header row and a `login` column. Other columns are\n\
        optional: a question whose columns are missing reports an error and the\n\
        rest still run.\n\n\
        Examples:\n  devstats report\n  devstats report --users data/users.csv --repositories data/repositories.csv\n  devstats report --question 10 --question 13")]
    Report {
        /// Users CSV (overrides [input] users)
        #[arg(long)]
        users: Option<PathBuf>,

        /// Repositories CSV (overrides [input] repositories)
        #[arg(long)]
        repositories: Option<PathBuf>,

        /// Answer only this question (1-16); repeatable
        #[arg(long, short, value_parser = clap::value_parser!(u8).range(1..=QUESTION_COUNT as i64))]
        question: Vec<u8>,

        /// City matched against user locations (overrides [analysis] city)
        #[arg(long)]
        city: Option<String>,

        /// Size of the top-N rankings (overrides [analysis] top_n)
        #[arg(long)]
        top_n: Option<usize>,

        /// Follower threshold for the city ranking (overrides [analysis] min_followers)
        #[arg(long)]
        min_followers: Option<u64>,

        /// Exit with non-zero code if any question could not be answered
        #[arg(long)]
        strict: bool,
    },
    /// Create a default .devstats.toml configuration file
    #[command(long_about = "Create a default .devstats.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .devstats.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1mdevstats\x1b[0m v{version}: statistics over exported users and repositories\n");

        println!("Quick start:");
        println!("  \x1b[36mdevstats init\x1b[0m              Create a .devstats.toml config file");
        println!("  \x1b[36mdevstats report\x1b[0m            Answer every question\n");

        println!("All commands:");
        println!("  \x1b[32mreport\x1b[0m    Rankings, counts, correlations and regressions");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!("devstats v{version}: statistics over exported users and repositories\n");

        println!("Quick start:");
        println!("  devstats init              Create a .devstats.toml config file");
        println!("  devstats report            Answer every question\n");

        println!("All commands:");
        println!("  report    Rankings, counts, correlations and regressions");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'devstats <command> --help' for details.");
}

fn load_config(explicit: Option<&Path>) -> Result<DevstatsConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if !default_path.exists() {
                return Ok(DevstatsConfig::default());
            }
            default_path
        }
    };
    DevstatsConfig::from_file(path)
        .into_diagnostic()
        .wrap_err(format!("loading {}", path.display()))
}

const DEFAULT_CONFIG: &str = r#"# devstats configuration

[input]
# users = "users.csv"
# repositories = "repositories.csv"

[analysis]
# Case-insensitive substring matched against each user's location
# city = "Paris"
# Question 1 keeps users with strictly more followers than this
# min_followers = 200
# Question 6 looks at users who joined after this date
# joined_after = "2020-01-01"
# Size of every top-N ranking
# top_n = 5
# How many licenses question 3 lists
# top_licenses = 3
# Count users without a company as their own bucket in question 4
# include_blank_company = true
"#;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))?;
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    if cli.verbose {
        eprintln!("format: {}", cli.format.name());
    }

    match cli.command {
        None => {
            print_welcome(use_color);
            return Ok(());
        }
        Some(Command::Report {
            users,
            repositories,
            ref question,
            city,
            top_n,
            min_followers,
            strict,
        }) => {
            if let Some(users) = users {
                config.input.users = users;
            }
            if let Some(repositories) = repositories {
                config.input.repositories = repositories;
            }
            if let Some(city) = city {
                config.analysis.city = city;
            }
            if let Some(top_n) = top_n {
                config.analysis.top_n = top_n;
            }
            if let Some(min_followers) = min_followers {
                config.analysis.min_followers = min_followers;
            }
            config.analysis.validate().into_diagnostic()?;

            if cli.verbose {
                let a = &config.analysis;
                eprintln!(
                    "analysis: city={:?} min_followers={} joined_after={} top_n={} top_licenses={} include_blank_company={}",
                    a.city, a.min_followers, a.joined_after, a.top_n, a.top_licenses, a.include_blank_company
                );
            }

            let data = match Dataset::load(&config.input.users, &config.input.repositories) {
                Ok(data) => data,
                Err(e @ devstats_core::DevstatsError::FileNotFound(_)) => {
                    miette::bail!(miette::miette!(
                        help = "Pass --users/--repositories or set them under [input] in {CONFIG_FILE}",
                        "{e}"
                    ));
                }
                Err(e) => return Err(e).into_diagnostic().wrap_err("loading tables"),
            };

            if cli.verbose {
                eprintln!(
                    "users: {} rows from {} ({} columns, {} skipped)",
                    data.users.len(),
                    config.input.users.display(),
                    data.users.columns().len(),
                    data.users.skipped(),
                );
                eprintln!(
                    "repositories: {} rows from {} ({} columns, {} skipped)",
                    data.repositories.len(),
                    config.input.repositories.display(),
                    data.repositories.columns().len(),
                    data.repositories.skipped(),
                );
            }

            let report = run_report(&data, &config.analysis, question).into_diagnostic()?;

            print!("{}", cli.format.render(&report).into_diagnostic()?);

            let failures = report.failures();
            if failures > 0 {
                if cli.verbose {
                    eprintln!("{failures} question(s) could not be answered");
                }
                if strict {
                    std::process::exit(1);
                }
            }
        }
        Some(Command::Init) => {
            let path = Path::new(CONFIG_FILE);
            if path.exists() {
                miette::bail!("{CONFIG_FILE} already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created {CONFIG_FILE} with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "devstats", &mut std::io::stdout());
        }
    }

    Ok(())
}
