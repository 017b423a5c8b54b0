use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use ibank_cli::config::{paths::BankPaths, settings::Settings};
use ibank_cli::menu::{ClientMenu, ManagerMenu, Terminal};
use ibank_cli::services::ManagerService;
use ibank_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ibank",
    version,
    about = "Text-menu banking terminal",
    long_about = "ibank is a text-menu banking terminal. Customers log in to view \
                  their accounts, send money and pay for services; managers use the \
                  back-office terminal to register clients, accounts, services and ATMs."
)]
struct Cli {
    /// Directory holding settings, data, exchange files and the log
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the customer terminal
    Client,

    /// Start the back-office terminal
    #[command(alias = "admin")]
    Manager,

    /// Initialize the bank and create the first manager
    Init {
        /// Login of the first manager
        #[arg(long, default_value = "admin")]
        manager_login: String,

        /// Password of the first manager
        #[arg(long, env = "IBANK_MANAGER_PASSWORD", hide_env_values = true)]
        manager_password: String,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BankPaths::with_base_dir(dir),
        None => BankPaths::new()?,
    };
    paths.ensure_directories()?;

    let mut settings = Settings::load_or_create(&paths)?;
    ibank_cli::logging::init(&paths, &settings)?;
    tracing::info!(base_dir = %paths.base_dir().display(), "start application");

    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Commands::Client => {
            let mut term = Terminal::new(io::stdin().lock(), io::stdout().lock());
            ClientMenu::new(&storage, &settings).run(&mut term)?;
        }
        Commands::Manager => {
            if ManagerService::new(&storage).count()? == 0 {
                bail!("No managers yet. Run 'ibank init' first.");
            }
            let mut term = Terminal::new(io::stdin().lock(), io::stdout().lock());
            ManagerMenu::new(&storage).run(&mut term)?;
        }
        Commands::Init {
            manager_login,
            manager_password,
        } => {
            println!("Initializing ibank at: {}", paths.base_dir().display());

            let managers = ManagerService::new(&storage);
            if managers.count()? == 0 {
                managers.create(&manager_login, &manager_password)?;
                println!("Manager '{}' created.", manager_login.trim());
            } else {
                println!("Managers already exist; none created.");
            }

            settings.setup_completed = true;
            settings.save(&paths)?;

            println!("Initialization complete!");
            println!();
            println!("Run 'ibank manager' to open the back office.");
        }
        Commands::Config => {
            println!("ibank Configuration");
            println!("===================");
            println!("Base directory:     {}", paths.base_dir().display());
            println!("Data directory:     {}", paths.data_dir().display());
            println!("Exchange directory: {}", paths.exchange_dir().display());
            println!("Log file:           {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Log level:       {}", settings.log_level);
            println!("  Initialized:     {}", settings.setup_completed);
        }
    }

    tracing::info!("finish application");
    Ok(())
}
