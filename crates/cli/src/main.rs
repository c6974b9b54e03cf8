//! MisterDesign CLI - cart, wishlist and catalog tools.
//!
//! Works on the same data directory as the storefront, so changes show up on
//! the next page load.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with line totals
//! md-cli cart list
//!
//! # Drop product 3 from the wishlist
//! md-cli wishlist remove 3
//!
//! # Move product 3 from the wishlist into the cart
//! md-cli wishlist move-to-cart 3
//!
//! # Empty the cart
//! md-cli cart clear
//!
//! # Look up products in the remote API
//! md-cli products list
//! md-cli products show 3
//! ```
//!
//! # Commands
//!
//! - `cart` - List, remove from, or clear the cart
//! - `wishlist` - List, remove from, move to cart, or clear the wishlist
//! - `products` - Read the product API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use misterdesign_core::{CollectionName, ProductId};

mod commands;

#[derive(Parser)]
#[command(name = "md-cli")]
#[command(author, version, about = "MisterDesign storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Read the product API
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart items with line totals
    List,
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Remove every item from the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List wishlist items
    List,
    /// Remove a product from the wishlist
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Move a product from the wishlist into the cart
    MoveToCart {
        /// Product id
        id: ProductId,
    },
    /// Remove every item from the wishlist
    Clear,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product
    List,
    /// Show one product
    Show {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => {
            let store = commands::open_store()?;
            match action {
                CartAction::List => {
                    commands::collections::list(&store, CollectionName::Cart);
                }
                CartAction::Remove { id } => {
                    commands::collections::remove(&store, CollectionName::Cart, id)?;
                }
                CartAction::Clear => commands::collections::clear(&store, CollectionName::Cart)?,
            }
        }
        Commands::Wishlist { action } => {
            let store = commands::open_store()?;
            match action {
                WishlistAction::List => {
                    commands::collections::list(&store, CollectionName::Wishlist);
                }
                WishlistAction::Remove { id } => {
                    commands::collections::remove(&store, CollectionName::Wishlist, id)?;
                }
                WishlistAction::MoveToCart { id } => {
                    commands::collections::move_to_cart(&store, id)?;
                }
                WishlistAction::Clear => {
                    commands::collections::clear(&store, CollectionName::Wishlist)?;
                }
            }
        }
        Commands::Products { action } => {
            let catalog = commands::catalog_client()?;
            match action {
                ProductsAction::List => commands::products::list(&catalog).await?,
                ProductsAction::Show { id } => commands::products::show(&catalog, id).await?,
            }
        }
    }
    Ok(())
}
