//! Orderly CLI - inspect and submit post-purchase order edits.
//!
//! # Usage
//!
//! ```bash
//! # Can this order still be edited?
//! orderly status --order gid://shopify/Order/1001
//!
//! # Preview totals after changing quantities and adding a variant
//! orderly preview --order gid://shopify/Order/1001 \
//!     --set L1=3 --add gid://shopify/ProductVariant/9=1@20.00
//!
//! # Submit the edit
//! orderly submit --order gid://shopify/Order/1001 --set L1=3
//!
//! # Update the shipping address
//! orderly address --order gid://shopify/Order/1001 --city Dhaka --zip 1207
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERLY_API_BASE_URL` - Backend base URL
//! - `ORDERLY_SESSION_TOKEN` - Bearer session token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orderly")]
#[command(author, version, about = "Orderly order-edit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether an order can still be edited, and why not
    Status {
        /// Order GID (e.g. gid://shopify/Order/1001)
        #[arg(short, long)]
        order: String,
    },
    /// Preview recalculated totals for a pending edit
    Preview {
        /// Order GID
        #[arg(short, long)]
        order: String,
        /// Quantity override, LINE_ITEM_ID=QTY (repeatable)
        #[arg(long = "set", value_name = "LINE_ITEM_ID=QTY")]
        set: Vec<String>,
        /// Variant to add, VARIANT_GID=QTY[@UNIT_PRICE] (repeatable)
        #[arg(long = "add", value_name = "VARIANT_GID=QTY[@PRICE]")]
        add: Vec<String>,
    },
    /// Build the diff payload and submit it
    Submit {
        /// Order GID
        #[arg(short, long)]
        order: String,
        /// Quantity override, LINE_ITEM_ID=QTY (repeatable)
        #[arg(long = "set", value_name = "LINE_ITEM_ID=QTY")]
        set: Vec<String>,
        /// Variant to add, VARIANT_GID=QTY (repeatable)
        #[arg(long = "add", value_name = "VARIANT_GID=QTY")]
        add: Vec<String>,
    },
    /// Update the order's shipping (or billing) address
    Address {
        /// Order GID
        #[arg(short, long)]
        order: String,
        /// Target the billing address instead of shipping
        #[arg(long)]
        billing: bool,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        address1: String,
        #[arg(long, default_value = "")]
        address2: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        province: String,
        #[arg(long, default_value = "")]
        country: String,
        #[arg(long, default_value = "")]
        zip: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        company: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Status { order } => commands::status::show(&order).await?,
        Commands::Preview { order, set, add } => {
            commands::edit::preview(&order, &set, &add).await?;
        }
        Commands::Submit { order, set, add } => {
            commands::edit::submit(&order, &set, &add).await?;
        }
        Commands::Address {
            order,
            billing,
            first_name,
            last_name,
            address1,
            address2,
            city,
            province,
            country,
            zip,
            phone,
            company,
        } => {
            let address = orderly_client::AddressInput {
                first_name,
                last_name,
                address1,
                address2,
                city,
                province,
                country,
                zip,
                phone,
                company,
            };
            commands::address::update(&order, billing, address).await?;
        }
    }
    Ok(())
}
