use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{
    cart::CartItem,
    filter::{FilterState, Selection},
    part::{Part, Price},
};
use crate::services::catalog_service::CatalogStats;

pub const EMPTY_RESULTS: &str = "No parts found. Try changing the search parameters.";
pub const EMPTY_CART: &str = "Your cart is empty. Add some parts.";

const NAME_WIDTH: usize = 30;

#[derive(Tabled)]
struct PartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Article")]
    article: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Availability")]
    availability: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Article")]
    article: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Line Total")]
    line_total: String,
}

pub fn format_price(price: Price, currency: &str) -> String {
    format!("{} {}", price, currency)
}

pub fn format_part_table(parts: &[&Part], currency: &str) -> String {
    if parts.is_empty() {
        return String::new();
    }

    let rows: Vec<PartTableRow> = parts
        .iter()
        .map(|part| PartTableRow {
            id: part.id.to_string(),
            name: truncate(&part.name, NAME_WIDTH),
            article: part.article.clone(),
            brand: part.brand.clone(),
            category: part.category.clone(),
            price: format_price(part.price, currency),
            availability: format_availability(part.in_stock),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_cart_table(items: &[CartItem], currency: &str) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = items
        .iter()
        .map(|item| CartTableRow {
            id: item.part.id.to_string(),
            name: truncate(&item.part.name, NAME_WIDTH),
            article: item.part.article.clone(),
            price: format_price(item.part.price, currency),
            quantity: item.quantity.to_string(),
            line_total: format_price(item.line_total(), currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_cart_summary(total_count: u64, total_price: Price, currency: &str) -> String {
    format!(
        "{}: {}   {}: {}",
        style("Items").bold(),
        style(total_count).cyan(),
        style("Total").bold(),
        style(format_price(total_price, currency)).green().bold()
    )
}

pub fn format_part_detail(part: &Part, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("ID").bold(), style(part.id).cyan()));
    output.push_str(&format!("{}: {}\n", style("Name").bold(), style(&part.name).green()));
    output.push_str(&format!("{}: {}\n", style("Article").bold(), &part.article));
    output.push_str(&format!("{}: {}\n", style("Brand").bold(), &part.brand));
    output.push_str(&format!("{}: {}\n", style("Category").bold(), &part.category));
    output.push_str(&format!(
        "{}: {}\n",
        style("Price").bold(),
        style(format_price(part.price, currency)).yellow()
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Availability").bold(),
        format_availability(part.in_stock)
    ));

    if !part.image.is_empty() {
        output.push_str(&format!("{}: {}\n", style("Image").bold(), style(&part.image).dim()));
    }

    output
}

pub fn format_options(options: &[Selection]) -> String {
    options
        .iter()
        .map(|option| match option {
            Selection::All => style(option).dim().to_string(),
            Selection::Only(_) => option.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_filters(filters: &FilterState) -> String {
    let query = if filters.query.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", filters.query)
    };
    format!(
        "{} {}  {} {}  {} {}",
        style("search:").dim(),
        query,
        style("brand:").dim(),
        filters.brand,
        style("category:").dim(),
        filters.category
    )
}

pub fn format_stats(stats: &CatalogStats) -> String {
    format!(
        "{}: {}\n{}: {}\n{}: {}\n{}: {}\n",
        style("Parts").bold(),
        stats.total_parts,
        style("In stock").bold(),
        style(stats.in_stock).green(),
        style("Brands").bold(),
        stats.brands,
        style("Categories").bold(),
        stats.categories
    )
}

fn format_availability(in_stock: bool) -> String {
    if in_stock {
        style("In stock").green().to_string()
    } else {
        style("On order").yellow().to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
