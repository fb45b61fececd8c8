//! Storefront CLI - browse, buy and manage an account against the Fake Store API.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! storefront products --category electronics --search ssd
//!
//! # Log in, fill the cart and check out through the payment relay
//! storefront login mor_2314 83r5^_
//! storefront cart add 3 --quantity 2
//! storefront checkout
//!
//! # Past orders
//! storefront orders
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use shop_client::{ClientConfig, Storefront};
use shop_core::{LocalCart, OrderSummary, Product, ProductFilter, ProfileUpdate};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Fake Store storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered
    Products {
        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,

        /// Text matched against title, description and price
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// List product categories
    Categories,
    /// Show a single product
    Product { id: u64 },
    /// Log in and remember the session
    Login { username: String, password: String },
    /// Forget the stored session
    Logout,
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
    },
    /// Inspect or fill the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Create a payment intent for the cart and print the payment sheet parameters
    Checkout,
    /// List past orders
    Orders,
    /// Show a past order
    Order { id: u64 },
    /// Show or change the shipping address
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Show or change profile details
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        product_id: u64,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    Show,
    /// Change address fields; omitted ones keep their current value
    Set {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        zipcode: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    Set {
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load().context("loading client configuration")?;
    let storefront = Storefront::new(config)?;

    match cli.command {
        Commands::Products { category, search } => {
            let filter = ProductFilter {
                category,
                search,
            };
            let products = storefront.browse(&filter).await?;
            for product in &products {
                print_product_line(&storefront, product);
            }
            println!("{} products", products.len());
        }
        Commands::Categories => {
            for category in storefront.categories().await? {
                println!("{}", category);
            }
        }
        Commands::Product { id } => {
            let product = storefront.product(id).await?;
            print_product_line(&storefront, &product);
            println!("  category: {}", product.category);
            if let Some(rating) = &product.rating {
                println!("  rating:   {:.1} ({} reviews)", rating.rate, rating.count);
            }
            println!("  {}", product.description);
        }
        Commands::Login { username, password } => {
            let session = storefront.login(&username, &password).await?;
            println!(
                "Logged in as {} ({})",
                session.user.username,
                session.user.full_name()
            );
        }
        Commands::Logout => {
            storefront.logout()?;
            println!("Logged out");
        }
        Commands::Register {
            username,
            password,
            firstname,
            lastname,
        } => {
            let id = storefront
                .register(&username, &password, &firstname, &lastname)
                .await?;
            println!("Registered {} (id {})", username, id);
        }
        Commands::Cart { action } => match action {
            CartAction::Show => {
                let cart = storefront.load_cart().await?;
                print_cart(&storefront, &cart);
            }
            CartAction::Add {
                product_id,
                quantity,
            } => {
                let cart = storefront.add_to_cart(product_id, quantity).await?;
                println!("Added product {} x{} (cart {})", product_id, quantity, cart.id);
            }
        },
        Commands::Checkout => {
            let cart = storefront.load_cart().await?;
            print_cart(&storefront, &cart);
            let sheet = storefront.checkout(&cart).await?;
            println!("{}", serde_json::to_string_pretty(&sheet)?);
        }
        Commands::Orders => {
            for order in storefront.order_history().await? {
                print_order(&order);
            }
        }
        Commands::Order { id } => {
            let order = storefront.order(id).await?;
            print_order(&order);
            for line in &order.lines {
                println!("    {} x{}  {}", line.product.title, line.quantity, line.product.price);
            }
        }
        Commands::Address { action } => match action {
            AddressAction::Show => {
                let address = storefront.address().await?;
                println!(
                    "{} {}, {} {}",
                    address.street, address.number, address.city, address.zipcode
                );
            }
            AddressAction::Set {
                city,
                street,
                number,
                zipcode,
            } => {
                let mut form = storefront.address_form().await?;
                if let Some(v) = city {
                    form.city = v;
                }
                if let Some(v) = street {
                    form.street = v;
                }
                if let Some(v) = number {
                    form.number = v;
                }
                if let Some(v) = zipcode {
                    form.zipcode = v;
                }
                let address = storefront.update_address(form).await?;
                println!(
                    "Address updated: {} {}, {} {}",
                    address.street, address.number, address.city, address.zipcode
                );
            }
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show => {
                let user = storefront.profile()?;
                println!("{} ({})", user.full_name(), user.username);
                println!("  email: {}", user.email);
                println!("  phone: {}", user.phone);
            }
            ProfileAction::Set {
                firstname,
                lastname,
                username,
                email,
                phone,
            } => {
                let current = storefront.profile()?;
                let mut update = ProfileUpdate::from_user(&current);
                if let Some(v) = firstname {
                    update.firstname = v;
                }
                if let Some(v) = lastname {
                    update.lastname = v;
                }
                if let Some(v) = username {
                    update.username = v;
                }
                if let Some(v) = email {
                    update.email = v;
                }
                if let Some(v) = phone {
                    update.phone = v;
                }
                let user = storefront.update_profile(&update)?;
                println!("Profile updated for {}", user.username);
            }
        },
    }

    Ok(())
}

fn print_product_line(storefront: &Storefront, product: &Product) {
    println!(
        "{:>4}  {:<60}  {}",
        product.id,
        product.title,
        product.unit_price(storefront.config().currency).display()
    );
}

fn print_cart(storefront: &Storefront, cart: &LocalCart) {
    let currency = storefront.config().currency;
    for item in cart.items() {
        println!(
            "{:>4}  {:<50} x{:<3} {}",
            item.product.id,
            item.product.title,
            item.quantity,
            item.line_total(currency).display()
        );
    }
    println!("Total: {} ({} items)", cart.total(currency).display(), cart.item_count());
}

fn print_order(order: &OrderSummary) {
    println!(
        "Order #{}  {}  {} items  {}",
        order.id,
        order.day(),
        order.item_count(),
        order.total.display()
    );
}
