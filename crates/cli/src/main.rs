//! Ibank CLI - account identifiers and balances from the command line
//!
//! Usage:
//! ```bash
//! ibank account-number
//! ibank iban --country GB --bank WEST --branch 123456 --account 98765432
//! ibank validate "GB82 WEST 1234 5698 7654 32"
//! ibank balance PRIMARY=100 SAVINGS=50
//! ibank demo --owner 7 --accounts 3
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use ibank_business::ServiceConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{balance, demo, identifiers};

/// Ibank - bank account number and IBAN generation
#[derive(Parser)]
#[command(name = "ibank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON service config file
    #[arg(long, env = "IBANK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an account number
    AccountNumber,

    /// Generate an IBAN
    Iban {
        /// Two-letter country code
        #[arg(long, env = "IBANK_COUNTRY_CODE")]
        country: Option<String>,
        /// Bank identifier
        #[arg(long, env = "IBANK_BANK_IDENTIFIER")]
        bank: Option<String>,
        /// Branch code
        #[arg(long, env = "IBANK_BRANCH_CODE")]
        branch: Option<String>,
        /// Account number (generated when omitted)
        #[arg(long)]
        account: Option<String>,
    },

    /// Validate an IBAN
    Validate {
        /// IBAN in electronic or print format
        iban: String,
    },

    /// Summarise balances given as CATEGORY=AMOUNT
    Balance {
        /// Entries such as PRIMARY=100 or SAVINGS=50.25, applied in order
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Create accounts in memory and print the owner's balance summary
    Demo {
        /// Owner id
        #[arg(long, default_value_t = 1)]
        owner: u64,
        /// Number of accounts to open
        #[arg(long, default_value_t = 2)]
        accounts: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ServiceConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::AccountNumber => {
            identifiers::account_number(&config, cli.json)?;
        }

        Commands::Iban {
            country,
            bank,
            branch,
            account,
        } => {
            let request = identifiers::IbanRequest {
                country: country.unwrap_or_else(|| config.default_country_code.clone()),
                bank: bank.unwrap_or_else(|| config.default_bank_identifier.clone()),
                branch: branch.unwrap_or_else(|| config.default_branch_code.clone()),
                account,
            };
            identifiers::iban(&config, &request, cli.json)?;
        }

        Commands::Validate { iban } => {
            identifiers::validate(&iban, cli.json)?;
        }

        Commands::Balance { entries } => {
            balance::summarize(&entries, cli.json)?;
        }

        Commands::Demo { owner, accounts } => {
            demo::run(config, owner, accounts, cli.json).await?;
        }
    }

    Ok(())
}
