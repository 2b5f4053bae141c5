use clap::{Args, Parser, Subcommand};
use spoon::clipboard::SystemClipboard;
use spoon::config::default_state_path;
use spoon::logger::initialize_logger;
use spoon::reporting::{count_tokens, print_stats, print_tree};
use spoon::state::StateStore;
use spoon::{Session, SpoonConfig, SpoonError, TitleMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,

    #[arg(short = 'r', long, global = true, default_value = ".")]
    root: PathBuf,

    #[arg(long, global = true, default_value = ".gitignore")]
    ignore_file: PathBuf,

    #[arg(long = "ignore", global = true, help = "Extra patterns to ignore (e.g., 'build/', '*.pyc')")]
    ignore_patterns: Vec<String>,

    #[arg(long, global = true, env = "SPOON_STATE_FILE")]
    state_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Show the file tree with the current selection.
    Tree(SelectionArgs),
    /// Copy the selected files to the clipboard and remember the selection.
    Copy(CopyArgs),
    /// Forget the saved selection.
    Clear,
}

#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    #[arg(short = 'e', long = "ext", help = "File name suffix to list, e.g. .py or .test.py")]
    extension: Option<String>,
    #[arg(short = 's', long, help = "File or directory to check")]
    select: Vec<String>,
    #[arg(short = 'd', long, help = "File or directory to uncheck")]
    deselect: Vec<String>,
    #[arg(short = 'a', long, conflicts_with = "none")]
    all: bool,
    #[arg(short = 'n', long)]
    none: bool,
}

#[derive(Args, Debug, Clone)]
struct CopyArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    #[arg(long, help = "Title each file with its relative path instead of its name")]
    full_paths: bool,
    #[arg(long, help = "Keep leading and trailing whitespace of file contents")]
    no_trim: bool,
    #[arg(long, default_value = "false")]
    no_stats: bool,
    #[arg(short = 'M', long, default_value = "gpt-4o")]
    model: String,
    #[arg(long, help = "Exit right after copying instead of keeping the clipboard alive (Linux)")]
    no_wait: bool,
}

fn apply_selection(session: &mut Session, args: &SelectionArgs) -> Result<(), SpoonError> {
    if let Some(extension) = &args.extension {
        session.set_extension(extension);
    }
    if args.all {
        session.toggle_select_all(true);
    }
    if args.none {
        session.toggle_select_all(false);
    }
    for path in &args.select {
        session.set_checked(path, true)?;
    }
    for path in &args.deselect {
        session.set_checked(path, false)?;
    }
    Ok(())
}

async fn run(cli_args: CliArgs) -> Result<(), SpoonError> {
    let mut config = SpoonConfig {
        root: cli_args.root,
        ignore_file: cli_args.ignore_file,
        extra_ignore_patterns: cli_args.ignore_patterns,
        state_path: cli_args.state_file.unwrap_or_else(default_state_path),
        ..SpoonConfig::default()
    };

    match cli_args.cmd {
        SubCommands::Tree(args) => {
            let mut session = Session::open(config);
            apply_selection(&mut session, &args)?;
            print_tree(session.tree(), session.extension());
        }
        SubCommands::Copy(args) => {
            if args.full_paths {
                config.title_mode = TitleMode::RelativePath;
            }
            config.trim_content = !args.no_trim;

            let mut session = Session::open(config);
            apply_selection(&mut session, &args.selection)?;
            print_tree(session.tree(), session.extension());

            let mut clipboard = SystemClipboard::default();
            let Some(exported) = session.submit(&mut clipboard).await? else {
                return Ok(());
            };
            if !args.no_stats {
                match count_tokens(&exported, &args.model) {
                    Ok(counts) => print_stats(session.tree(), &counts),
                    Err(e) => warn!("Skipping token statistics: {}", e),
                }
            }
            if !args.no_wait {
                if let Err(e) = clipboard.hold() {
                    warn!("Could not keep the clipboard alive: {}", e);
                }
            }
        }
        SubCommands::Clear => {
            StateStore::new(config.state_path).clear()?;
            info!("Selection cleared.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    match run(cli_args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
