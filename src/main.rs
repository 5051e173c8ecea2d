use clap::Parser;
use edaparts::cli::{Cli, Commands};
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    // EDAPARTS_LOG takes the usual filter syntax; --verbose raises the default
    let default_level = if global.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EDAPARTS_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init(args) => edaparts::cli::commands::init::run(args),
        Commands::Cmp(cmd) => edaparts::cli::commands::cmp::run(cmd, &global),
        Commands::Fp(cmd) => edaparts::cli::commands::fp::run(cmd, &global),
        Commands::Sym(cmd) => edaparts::cli::commands::sym::run(cmd, &global),
        Commands::View(cmd) => edaparts::cli::commands::view::run(cmd, &global),
        Commands::Kicad(cmd) => edaparts::cli::commands::kicad::run(cmd, &global),
        Commands::Db(cmd) => edaparts::cli::commands::db::run(cmd, &global),
        Commands::Completions(args) => edaparts::cli::commands::completions::run(args),
    }
}
