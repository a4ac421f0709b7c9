//! Riddim CLI - Command-line storefront for the Riddim music store.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! riddim products --category guitars
//!
//! # Manage the cart (line numbers as shown by `cart show`)
//! riddim cart add violin
//! riddim cart inc 1
//! riddim cart show
//!
//! # Pay for the order
//! riddim checkout --payment 74750
//!
//! # Validate account forms
//! riddim account login -u marcia -p one-love
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog, optionally filtered by category
//! - `cart` - Show and change the cart
//! - `totals` - Print subtotal, tax and total
//! - `checkout` - Confirm the order against a payment amount
//! - `account` - Validate login and registration forms

#![cfg_attr(not(test), forbid(unsafe_code))]
// The CLI is the presentation layer and writes its views to the terminal
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use riddim_storefront::AppError;
use riddim_storefront::catalog::CategoryFilter;
use riddim_storefront::config::{LogFormat, StorefrontConfig};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "riddim")]
#[command(author, version, about = "Riddim music store")]
struct Cli {
    /// Storage file (overrides `RIDDIM_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Category to show (`all`, `guitars`, `pianos`, `drums`, `strings`, `repair`, `wind`)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print cart totals
    Totals,
    /// Confirm the order
    Checkout {
        /// Amount paid
        #[arg(short, long)]
        payment: Decimal,
    },
    /// Validate account forms
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product name (case-insensitive)
        product: String,

        /// Unit price for an item that is not in the catalog
        #[arg(long)]
        price: Option<Decimal>,
    },
    /// Remove a line
    Remove {
        /// Line number from `cart show`
        line: usize,
    },
    /// Increase a line's quantity by one
    Inc {
        /// Line number from `cart show`
        line: usize,
    },
    /// Decrease a line's quantity by one, removing it at zero
    Dec {
        /// Line number from `cart show`
        line: usize,
    },
    /// Change a line's quantity by a signed amount
    Qty {
        /// Line number from `cart show`
        line: usize,

        /// Amount to add (negative to subtract)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Validate a login form
    Login {
        #[arg(short, long, default_value = "")]
        username: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Validate a registration form
    Register {
        #[arg(long, default_value = "")]
        full_name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        username: String,

        #[arg(long, default_value = "")]
        password: String,

        #[arg(long, default_value = "")]
        confirm_password: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config) {
        if e.is_user_error() {
            eprintln!("{}", render::user_error(&e));
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the default `warn`.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), AppError> {
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    match cli.command {
        Commands::Products { category } => commands::products::list(category),
        Commands::Cart { action } => {
            let mut cart = commands::open_cart(&config)?;
            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Add { product, price } => {
                    commands::cart::add(&mut cart, &product, price)?;
                }
                CartAction::Remove { line } => commands::cart::remove(&mut cart, line)?,
                CartAction::Inc { line } => commands::cart::change(&mut cart, line, 1)?,
                CartAction::Dec { line } => commands::cart::change(&mut cart, line, -1)?,
                CartAction::Qty { line, delta } => {
                    commands::cart::change(&mut cart, line, delta)?;
                }
                CartAction::Clear => commands::cart::clear(&mut cart)?,
            }
        }
        Commands::Totals => {
            let cart = commands::open_cart(&config)?;
            commands::cart::totals(&cart);
        }
        Commands::Checkout { payment } => {
            let mut cart = commands::open_cart(&config)?;
            commands::checkout::confirm(&mut cart, payment)?;
        }
        Commands::Account { action } => match action {
            AccountAction::Login { username, password } => {
                commands::account::login(username, password)?;
            }
            AccountAction::Register {
                full_name,
                email,
                username,
                password,
                confirm_password,
            } => {
                commands::account::register(
                    full_name,
                    email,
                    username,
                    password,
                    confirm_password,
                )?;
            }
        },
    }
    Ok(())
}
