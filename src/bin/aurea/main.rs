//! Aurea command line storefront
//!
//! Browse the catalog and manage a cart from the terminal. Set `--data-dir`
//! (or `AUREA_DATA_DIR`) to keep the cart between runs.

use std::io::{self, Write};

use anyhow::{Result, bail};
use aurea::{
    prelude::*,
    render::{self, Container},
};
use tracing::debug;

mod config;
mod observability;
mod output;

use crate::config::{Command, Config};

/// Storefront entry point
pub fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        // Help and version output are not failures.
        Err(err) if !err.use_stderr() => {
            err.print()?;

            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    observability::init_subscriber(&config.logging)?;

    let catalog = match &config.catalog {
        Some(path) => CatalogStore::from_path(path),
        None => CatalogStore::default(),
    };

    match &config.data_dir {
        Some(dir) => run(&config.command, catalog, FileStorage::new(dir)),
        None => run(&config.command, catalog, MemoryStorage::new()),
    }
}

fn run<S: CartStorage>(command: &Command, catalog: CatalogStore, storage: S) -> Result<()> {
    let ledger = Ledger::open_with_observer(storage, Notifications::new())?;
    let mut storefront = Storefront::new(catalog, ledger);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = execute(command, &mut storefront, &mut out);

    for message in storefront.ledger_mut().observer_mut().drain() {
        writeln!(out, "{message}")?;
    }

    result
}

fn execute<S: CartStorage>(
    command: &Command,
    storefront: &mut Storefront<S, Notifications>,
    out: &mut impl Write,
) -> Result<()> {
    debug!(?command, "running command");

    match command {
        Command::List { filter, html } => {
            let filter = filter.filter();

            if *html {
                let mut container = Container::new("products-grid");
                storefront.catalog().render_into(&mut container, &filter);

                writeln!(out, "{}", container.html())?;
            } else {
                output::write_products(out, &storefront.catalog().filter(&filter))?;
            }
        }
        Command::Show { id, html } => {
            let product = storefront.show_product(id)?;

            if *html {
                writeln!(out, "{}", render::product_detail(product))?;
            } else {
                output::write_product(out, product)?;
            }
        }
        Command::Add { id } => {
            storefront.add_to_cart(id)?;
        }
        Command::Remove { index } => {
            storefront.remove_from_cart(*index)?;
        }
        Command::Cart { html } => {
            let ledger = storefront.ledger();

            if *html {
                writeln!(out, "{}", render::cart_counter(ledger.len()))?;
                writeln!(out, "{}", render::cart(ledger.list())?)?;
            } else {
                write_cart(&mut *out, ledger.list())?;
            }
        }
        Command::Checkout {
            address,
            payment,
            html,
        } => match storefront.checkout(address, payment.as_deref()) {
            Ok(order) if *html => writeln!(out, "{}", render::order_confirmation(&order))?,
            Ok(order) => write_order(&mut *out, &order)?,
            // The observer has already queued the reason for display.
            Err(StorefrontError::Ledger(LedgerError::Checkout(_))) => bail!("checkout rejected"),
            Err(error) => return Err(error.into()),
        },
        Command::Source => {
            let catalog = storefront.catalog();
            catalog.load();

            let rejection = catalog.rejection().map(ToString::to_string);

            output::write_source(
                out,
                catalog.source_info(),
                catalog.origin(),
                rejection.as_deref(),
            )?;
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            ContactMessage::new(name, email, message).validate()?;

            writeln!(out, "Thank you for your message! We will get back to you soon.")?;
        }
    }

    Ok(())
}
