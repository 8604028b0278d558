use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use tracing::{error, info, warn};

use crate::{
    catalog::loader_for,
    cli::{
        args::*,
        shell::{ShellCommand, ShellParseError, SHELL_HELP},
    },
    models::{
        cart::LedgerChange,
        filter::{FilterState, Selection},
        part::PartId,
    },
    services::{ActionOutcome, CatalogService, SessionError, StoreAction, StorefrontSession},
    utils::{
        formatting::{
            format_cart_summary, format_cart_table, format_filters, format_options,
            format_part_detail, format_part_table, format_stats, EMPTY_CART, EMPTY_RESULTS,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");
static WRENCH: Emoji<'_, '_> = Emoji("🔧 ", "");

pub struct CliApp {
    config: Config,
    catalog: CatalogService,
}

impl CliApp {
    pub async fn new(config: Config) -> Result<Self> {
        let loader = loader_for(config.catalog_path.as_deref());
        let catalog = loader
            .load()
            .await
            .with_context(|| format!("Failed to load catalog from {}", loader.describe()))?;

        if catalog.is_empty() {
            warn!("Catalog from {} contains no parts", loader.describe());
        }

        Ok(Self {
            config,
            catalog: CatalogService::new(Arc::new(catalog)),
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::List { search, brand, category, format } => {
                self.handle_list(search, brand, category, format)
            }
            Commands::Brands => self.handle_options("Brands", self.catalog.brands()),
            Commands::Categories => self.handle_options("Categories", self.catalog.categories()),
            Commands::Show { id } => self.handle_show(id),
            Commands::Stats => self.handle_stats(),
            Commands::Quote { ids, format } => self.handle_quote(ids, format),
            Commands::Shell => self.handle_shell(),
        }
    }

    fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    fn handle_list(&self, search: Option<String>, brand: String, category: String, format: OutputFormat) -> Result<()> {
        let filters = FilterState::new()
            .with_query(search.unwrap_or_default())
            .with_brand(Selection::from(brand.as_str()))
            .with_category(Selection::from(category.as_str()));

        let parts = self.catalog.filter(&filters);

        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&parts)
                    .context("Failed to serialize parts")?;
                println!("{}", json);
            }
            OutputFormat::Table => {
                if parts.is_empty() {
                    println!("{} {}", INFO, EMPTY_RESULTS);
                } else {
                    println!("{} {}", INFO, style(format!("Found {} parts", parts.len())).bold());
                    println!("{}", format_part_table(&parts, self.currency()));
                }
            }
        }

        Ok(())
    }

    fn handle_options(&self, title: &str, options: Vec<Selection>) -> Result<()> {
        println!("{} {}", INFO, style(title).bold().cyan());
        println!("{}", format_options(&options));
        Ok(())
    }

    fn handle_show(&self, id: u32) -> Result<()> {
        match self.catalog.find(PartId(id)) {
            Some(part) => {
                println!("{} {}", INFO, style("Part Details").bold().cyan());
                println!("{}", format_part_detail(part, self.currency()));
            }
            None => {
                println!("{} No part with id {}", CROSS, style(id).red());
            }
        }
        Ok(())
    }

    fn handle_stats(&self) -> Result<()> {
        println!("{} {}", INFO, style("Catalog Statistics").bold().cyan());
        print!("{}", format_stats(&self.catalog.stats()));
        Ok(())
    }

    fn handle_quote(&self, ids: Vec<u32>, format: OutputFormat) -> Result<()> {
        let mut session = StorefrontSession::new(self.catalog.clone());

        for id in ids {
            if let Err(e) = session.dispatch(StoreAction::AddToCart(PartId(id))) {
                if matches!(format, OutputFormat::Table) {
                    println!("{} Skipped {}: {}", WARNING, style(id).yellow(), e);
                }
                warn!("Quote skipped part {}: {}", id, e);
            }
        }

        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&session.cart_snapshot())
                    .context("Failed to serialize cart")?;
                println!("{}", json);
            }
            OutputFormat::Table => self.print_cart(&session),
        }
        Ok(())
    }

    // Interactive session
    fn handle_shell(&self) -> Result<()> {
        let mut session = StorefrontSession::new(self.catalog.clone());
        let theme = ColorfulTheme::default();

        println!("{} {}", WRENCH, style("Auto Parts Store").bold().cyan());
        println!(
            "{}",
            style(format!(
                "Session {} started {}. Type 'help' for commands.",
                session.id(),
                session.started_at().format("%Y-%m-%d %H:%M:%S")
            ))
            .dim()
        );

        loop {
            let prompt = format!("{}[{}]", CART, session.total_count());
            let line: String = Input::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .context("Failed to read shell input")?;

            match ShellCommand::parse(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute_shell_command(&mut session, command, &theme)?,
                Err(ShellParseError::Empty) => {}
                Err(e) => println!("{} {}", CROSS, style(e).red()),
            }
        }

        info!("Session {} ended with {} items in cart", session.id(), session.total_count());
        println!("{} Bye!", CHECKMARK);
        Ok(())
    }

    fn execute_shell_command(&self, session: &mut StorefrontSession, command: ShellCommand, theme: &ColorfulTheme) -> Result<()> {
        let action = match command {
            ShellCommand::List => {
                self.print_visible(session);
                return Ok(());
            }
            ShellCommand::Brands => return self.handle_options("Brands", session.brands()),
            ShellCommand::Categories => return self.handle_options("Categories", session.categories()),
            ShellCommand::Cart => {
                self.print_cart(session);
                return Ok(());
            }
            ShellCommand::Help => {
                println!("{}", SHELL_HELP);
                return Ok(());
            }
            ShellCommand::Clear => {
                if session.cart_items().is_empty() {
                    println!("{} {}", INFO, EMPTY_CART);
                    return Ok(());
                }
                let confirm = Confirm::with_theme(theme)
                    .with_prompt("Remove everything from the cart?")
                    .default(false)
                    .interact()?;
                if !confirm {
                    println!("Cart left unchanged");
                    return Ok(());
                }
                StoreAction::ClearCart
            }
            ShellCommand::Search(query) => StoreAction::Search(query),
            ShellCommand::Brand(brand) => StoreAction::SelectBrand(brand),
            ShellCommand::Category(category) => StoreAction::SelectCategory(category),
            ShellCommand::Reset => StoreAction::ResetFilters,
            ShellCommand::Add(id) => StoreAction::AddToCart(id),
            ShellCommand::Quantity(id, quantity) => StoreAction::SetQuantity(id, quantity),
            ShellCommand::Increment(id) => StoreAction::Increment(id),
            ShellCommand::Decrement(id) => StoreAction::Decrement(id),
            ShellCommand::Remove(id) => StoreAction::Remove(id),
            ShellCommand::Quit => return Ok(()),
        };

        match session.dispatch(action) {
            Ok(ActionOutcome::FiltersChanged) => self.print_visible(session),
            Ok(ActionOutcome::Cart(change)) => self.report_change(session, change),
            Err(SessionError::UnknownPart(id)) => {
                println!("{} No part with id {}", CROSS, style(id).red());
            }
            Err(e) => {
                println!("{} {}", WARNING, style(&e).yellow());
                error!("Cart action failed: {}", e);
            }
        }

        Ok(())
    }

    fn report_change(&self, session: &StorefrontSession, change: LedgerChange) {
        match change {
            LedgerChange::Unchanged => println!("{} Cart unchanged", INFO),
            other => println!("{} Cart {}", CHECKMARK, other),
        }
        println!(
            "{}",
            format_cart_summary(session.total_count(), session.total_price(), self.currency())
        );
    }

    fn print_visible(&self, session: &StorefrontSession) {
        println!("{}", format_filters(session.filters()));
        let parts = session.visible_parts();
        if parts.is_empty() {
            println!("{} {}", INFO, EMPTY_RESULTS);
        } else {
            println!("{}", format_part_table(&parts, self.currency()));
        }
    }

    fn print_cart(&self, session: &StorefrontSession) {
        let items = session.cart_items();
        if items.is_empty() {
            println!("{} {}", INFO, EMPTY_CART);
            return;
        }

        println!("{} {}", CART, style("Cart").bold().cyan());
        println!("{}", format_cart_table(items, self.currency()));
        println!(
            "{}",
            format_cart_summary(session.total_count(), session.total_price(), self.currency())
        );
    }
}
