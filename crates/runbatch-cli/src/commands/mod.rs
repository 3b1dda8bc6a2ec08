use anyhow::Result;
use runbatch_cli::cli::Commands;
use runbatch_cli::config::RunbatchConfig;

pub mod completions;
pub mod emit;
pub mod expand;
pub mod list;
pub mod show;
pub mod validate;

pub fn handle(command: &Commands, config: &RunbatchConfig) -> Result<()> {
    match command {
        Commands::Validate { table } => validate::handle(table, config),
        Commands::List { table, format } => list::handle(table, config, *format),
        Commands::Show {
            case,
            table,
            format,
        } => show::handle(table, config, case, *format),
        Commands::Commands {
            table,
            cases,
            program,
            model,
            format,
        } => emit::handle(
            table,
            config,
            cases,
            program.as_deref(),
            model.as_deref(),
            *format,
        ),
        Commands::Expand { table, cases, out } => expand::handle(table, config, cases, out),
        Commands::Completions { shell, out } => completions::handle(*shell, out.as_deref()),
    }
}
