//! Demo: stock a small perfume catalog and print the inventory summary.

use anyhow::Context;
use clap::Parser;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use aroma_ledger::{
    InventoryLedger, InventorySummary, LedgerConfig, NewProduct, Product, ProductId,
    SaleRequest, SalesStatistics, SharedLedger,
};

#[derive(Debug, Parser)]
#[command(name = "aroma", about = "Perfume inventory and sales ledger demo")]
struct Args {
    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Sell one unit of this product at list price, then report sales
    /// statistics too.
    #[arg(long, value_name = "PRODUCT_ID")]
    sell: Option<ProductId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    products: Vec<&'a Product>,
    summary: InventorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    sales_statistics: Option<SalesStatistics>,
}

fn main() -> anyhow::Result<()> {
    aroma_observability::init();
    let args = Args::parse();

    let ledger = SharedLedger::new(InventoryLedger::with_config(LedgerConfig::from_env()));
    ledger.with_ledger_mut(|ledger| {
        ledger.add_product(NewProduct::new(
            "Chanel N°5",
            "Chanel",
            dec!(450.00),
            12,
            100,
            "Feminino",
        ));
        ledger.add_product(NewProduct::new("Sauvage", "Dior", dec!(380.00), 8, 100, "Masculino"));
    });

    let sales_statistics = match args.sell {
        Some(product_id) => {
            let price = ledger
                .get_product(product_id)
                .map(|product| product.price())
                .with_context(|| format!("product {product_id} is not in the catalog"))?;
            ledger
                .record_sale(SaleRequest::new(product_id, 1, price, "Cliente Exemplo"))
                .with_context(|| format!("selling product {product_id}"))?;
            Some(ledger.sales_statistics().context("computing sales statistics")?)
        }
        None => None,
    };

    let printed = ledger.with_ledger(|ledger| -> anyhow::Result<usize> {
        let report = Report {
            products: ledger.list_products(None, None),
            summary: ledger.inventory_summary().context("summarizing inventory")?,
            sales_statistics,
        };

        if args.json {
            let out = serde_json::to_string_pretty(&report).context("serializing report")?;
            println!("{out}");
        } else {
            print_text(&report);
        }
        Ok(report.products.len())
    })?;

    tracing::debug!(products = printed, "report printed");
    Ok(())
}

fn print_text(report: &Report<'_>) {
    println!("Perfumes in inventory:");
    for product in &report.products {
        println!(
            "- {} ({}): {} units",
            product.name(),
            product.brand(),
            product.stock_quantity()
        );
    }

    println!();
    println!("Inventory summary:");
    println!("- Total items: {}", report.summary.total_stock_units);
    println!("- Total value: {}", brl(report.summary.total_inventory_value));

    if let Some(stats) = &report.sales_statistics {
        println!();
        println!("Sales statistics:");
        println!("- Today: {}", brl(stats.today_sales));
        println!("- Total: {}", brl(stats.total_sales));
        println!("- Items sold: {}", stats.items_sold);
        println!("- Unique customers: {}", stats.unique_customers);
    }
}

/// `R$` amount with two decimals.
fn brl(amount: Decimal) -> String {
    format!(
        "R$ {:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
