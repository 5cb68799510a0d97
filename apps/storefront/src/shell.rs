//! # Session Shell
//!
//! Line-oriented front end over the command layer. Each line is one
//! screen action:
//!
//! ```text
//! products            list the catalog
//! show <id>           product detail
//! add <id>            add one unit to the cart
//! remove <id>         drop a line item
//! qty <id> <n>        set a quantity (0 removes)
//! cart                show the cart and total
//! clear               empty the cart
//! checkout            place the order and empty the cart
//! config              show store settings
//! help                this list
//! quit                end the session
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::commands::{cart, checkout, config, product};
use crate::error::ApiError;
use crate::state::{CartStore, CatalogState, ConfigState};
use storefront_core::CartLineItem;

const HELP: &str = "\
commands:
  products            list the catalog
  show <id>           product detail
  add <id>            add one unit to the cart
  remove <id>         drop a line item
  qty <id> <n>        set a quantity (0 removes)
  cart                show the cart and total
  clear               empty the cart
  checkout            place the order and empty the cart
  config              show store settings
  help                this list
  quit                end the session";

/// Errors parsing a shell line.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("quantity must be a whole number, got '{0}'")]
    InvalidQuantity(String),
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Products,
    Show(String),
    Add(String),
    Remove(String),
    Quantity(String, i64),
    Cart,
    Clear,
    Checkout,
    Config,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();

        match command.as_str() {
            "products" | "ls" => Ok(ShellCommand::Products),
            "show" => Ok(ShellCommand::Show(next_id(&mut parts, "show")?)),
            "add" => Ok(ShellCommand::Add(next_id(&mut parts, "add")?)),
            "remove" | "rm" => Ok(ShellCommand::Remove(next_id(&mut parts, "remove")?)),
            "qty" => {
                let product_id = next_id(&mut parts, "qty")?;
                let raw = parts.next().ok_or(ParseError::MissingArgument {
                    command: "qty",
                    argument: "a quantity",
                })?;
                let quantity = raw
                    .parse()
                    .map_err(|_| ParseError::InvalidQuantity(raw.to_string()))?;
                Ok(ShellCommand::Quantity(product_id, quantity))
            }
            "cart" => Ok(ShellCommand::Cart),
            "clear" => Ok(ShellCommand::Clear),
            "checkout" => Ok(ShellCommand::Checkout),
            "config" => Ok(ShellCommand::Config),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn next_id<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<String, ParseError> {
    parts
        .next()
        .map(str::to_string)
        .ok_or(ParseError::MissingArgument {
            command,
            argument: "a product id",
        })
}

/// A shopping session: the state every screen shares.
#[derive(Debug)]
pub struct Session {
    config: ConfigState,
    catalog: CatalogState,
    cart: Arc<CartStore>,
}

impl Session {
    pub fn new(config: ConfigState, catalog: CatalogState, cart: Arc<CartStore>) -> Self {
        Session {
            config,
            catalog,
            cart,
        }
    }

    /// Reads commands from `input` until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "Welcome to {}. Type 'help' for commands.", self.config.store_name)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ShellCommand>() {
                Ok(command) => {
                    if !self.execute(command, &mut output)? {
                        break;
                    }
                }
                Err(e) => {
                    debug!(line = %line, error = %e, "Unparsable shell line");
                    writeln!(output, "error: {}", e)?;
                }
            }
        }

        writeln!(output, "Goodbye.")?;
        Ok(())
    }

    /// Runs one command. Returns `false` when the session should end.
    pub fn execute<W: Write>(&self, command: ShellCommand, out: &mut W) -> io::Result<bool> {
        let result: Result<(), ApiError> = match command {
            ShellCommand::Products => {
                for p in product::list_products(&self.catalog) {
                    writeln!(
                        out,
                        "[{}] {}  {}  ⭐ {}",
                        p.id,
                        p.title,
                        self.config.format_currency(p.price_cents),
                        p.rating
                    )?;
                }
                Ok(())
            }
            ShellCommand::Show(id) => match product::get_product(&self.catalog, &id) {
                Ok(p) => {
                    writeln!(out, "{}", p.title)?;
                    writeln!(out, "  price:    {}", self.config.format_currency(p.price_cents))?;
                    writeln!(out, "  rating:   {}", p.rating)?;
                    if let Some(category) = &p.category {
                        writeln!(out, "  category: {}", category)?;
                    }
                    if let Some(description) = &p.description {
                        writeln!(out, "  {}", description)?;
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            },
            ShellCommand::Add(id) => match cart::add_to_cart(&self.catalog, &self.cart, &id) {
                Ok(response) => {
                    writeln!(out, "Added to cart! ({} items)", response.totals.total_quantity)?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            ShellCommand::Remove(id) => {
                let response = cart::remove_from_cart(&self.cart, &id);
                self.print_cart(&response.items, response.totals.total_cents, out)?;
                Ok(())
            }
            ShellCommand::Quantity(id, quantity) => {
                match cart::update_cart_item(&self.cart, &id, quantity) {
                    Ok(response) => {
                        self.print_cart(&response.items, response.totals.total_cents, out)?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            ShellCommand::Cart => {
                let response = cart::get_cart(&self.cart);
                self.print_cart(&response.items, response.totals.total_cents, out)?;
                Ok(())
            }
            ShellCommand::Clear => {
                cart::clear_cart(&self.cart);
                writeln!(out, "Cart cleared.")?;
                Ok(())
            }
            ShellCommand::Checkout => match checkout::checkout(&self.cart) {
                Ok(receipt) => {
                    writeln!(
                        out,
                        "Order {} placed: {} items, total {}",
                        receipt.order_id,
                        receipt.total_quantity,
                        self.config.format_currency(receipt.total_cents)
                    )?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            ShellCommand::Config => {
                let config = config::get_config(&self.config);
                writeln!(out, "store:             {}", config.store_name)?;
                writeln!(out, "max item quantity: {}", config.max_item_quantity)?;
                writeln!(out, "max cart items:    {}", config.max_cart_items)?;
                Ok(())
            }
            ShellCommand::Help => {
                writeln!(out, "{}", HELP)?;
                Ok(())
            }
            ShellCommand::Quit => return Ok(false),
        };

        if let Err(e) = result {
            warn!(code = ?e.code, "{}", e.message);
            writeln!(out, "error: {}", e.message)?;
        }
        Ok(true)
    }

    fn print_cart<W: Write>(
        &self,
        items: &[CartLineItem],
        total_cents: i64,
        out: &mut W,
    ) -> io::Result<()> {
        if items.is_empty() {
            writeln!(out, "Your cart is empty")?;
        }
        for item in items {
            writeln!(
                out,
                "[{}] {}  Quantity: {}  {}",
                item.product_id,
                item.title,
                item.quantity,
                self.config.format_currency(item.line_total().cents())
            )?;
        }
        writeln!(out, "Total: {}", self.config.format_currency(total_cents))
    }
}
