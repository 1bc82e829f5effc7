use clap::Parser;
use simplelog::{ColorChoice as LogColor, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use wwid::application::{
    ChangesOptions, ChangesService, ConfigService, RecentOptions, RecentService,
};
use wwid::cli::{Cli, Commands};
use wwid::error::WwidError;
use wwid::infrastructure::{terminal, DoingFile, Settings};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, LogColor::Auto);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), WwidError> {
    match cli.command {
        Commands::Recent {
            count,
            section,
            template,
            config_template,
            times,
            totals,
            tag_sort,
            tag_order,
            highlight,
        } => {
            let settings = Settings::load()?;
            let path = cli.file.unwrap_or_else(|| settings.doing_file_path());
            log::debug!("Reading activity log {}", path.display());

            let options = RecentOptions {
                count,
                section,
                template,
                config_template,
                times,
                totals,
                tag_sort,
                tag_order,
                highlight,
            };
            let service = RecentService::new(DoingFile::new(path), settings);
            let output = service.execute(&options, terminal::render_context(cli.color))?;
            print!("{}", output);
            Ok(())
        }
        Commands::Changes {
            changelog,
            lookup,
            search,
            only,
            latest,
        } => {
            let options = ChangesOptions {
                lookup,
                search,
                changes_only: only,
                latest,
            };
            let output = ChangesService::new(changelog).execute(&options)?;
            println!("{}", output.trim_end());
            Ok(())
        }
        Commands::Config { key } => {
            let service = ConfigService::new(Settings::load()?);
            match key {
                Some(k) => println!("{}", service.get(&k)?),
                None => print!("{}", service.list()?),
            }
            Ok(())
        }
    }
}
