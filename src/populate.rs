use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use rand::{seq::SliceRandom, Rng};
use rust_decimal::Decimal;

use crate::{
    storage::{Storage, StorageRead, StorageTx, StorageWrite},
    types::{money, Product, SalesRecord},
};

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Enormous", "Mediocre", "Synergistic", "Heavy Duty",
    "Lightweight", "Aerodynamic", "Durable",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Leather", "Silk",
    "Wool", "Linen", "Marble", "Iron", "Bronze", "Copper", "Aluminum", "Paper",
];

const ITEMS: &[&str] = &[
    "Chair", "Car", "Computer", "Gloves", "Pants", "Shirt", "Table", "Shoes", "Hat", "Plate",
    "Knife", "Bottle", "Coat", "Lamp", "Keyboard", "Bag", "Bench", "Clock", "Watch", "Wallet",
];

const CATEGORIES: &[&str] = &[
    "Books", "Movies", "Music", "Games", "Electronics", "Computers", "Home", "Garden", "Tools",
    "Grocery", "Health", "Beauty", "Toys", "Kids", "Baby", "Clothing", "Shoes", "Jewelry",
    "Sports", "Outdoors", "Automotive", "Industrial",
];

const MIN_PRICE_CENTS: i64 = 100;
const MAX_PRICE_CENTS: i64 = 100_000;
const MAX_QUANTITY: i64 = 999;

#[derive(Clone, Copy, Debug)]
pub struct PopulateOptions {
    pub products: usize,
    pub records: usize,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            products: 200,
            records: 10_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulateSummary {
    pub products: usize,
    pub records: usize,
}

/// Earliest generated sale date.
pub fn first_sale_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn random_product<R: Rng + ?Sized>(rng: &mut R) -> Result<Product> {
    let name = format!(
        "{} {} {}",
        pick(rng, ADJECTIVES),
        pick(rng, MATERIALS),
        pick(rng, ITEMS)
    );
    let category = pick(rng, CATEGORIES).to_string();
    let price = money::from_cents(rng.gen_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS));
    Ok(Product::new(name, Some(category), price)?)
}

pub fn random_sales_record<R: Rng + ?Sized>(
    rng: &mut R,
    product: &Product,
    now: DateTime<Utc>,
) -> Result<SalesRecord> {
    let quantity_sold = rng.gen_range(1..=MAX_QUANTITY);
    let total_sales_amount = product.price * Decimal::from(quantity_sold);

    let start = first_sale_date().timestamp_micros();
    let end = now.timestamp_micros().max(start);
    let micros = rng.gen_range(start..=end);
    let date_of_sale = DateTime::<Utc>::from_timestamp_micros(micros)
        .with_context(|| format!("timestamp {micros} out of range"))?;

    Ok(SalesRecord::new(
        product.clone(),
        quantity_sold,
        total_sales_amount,
        Some(date_of_sale),
    )?)
}

/// Inserts random products, then random sales records cycling over every
/// stored product in id order. Everything lands in a single transaction.
pub fn populate<S: Storage, R: Rng + ?Sized>(
    storage: &S,
    options: PopulateOptions,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<PopulateSummary> {
    let tx = storage.begin_tx().context("starting populate transaction")?;

    for _ in 0..options.products {
        let product = random_product(rng)?;
        tx.save_product(&product)?;
    }
    log::info!("📦 Created {} products", options.products);

    let products = tx.list_products()?;
    if options.records > 0 && products.is_empty() {
        bail!("cannot create sales records without any products");
    }

    for product in products.iter().cycle().take(options.records) {
        let record = random_sales_record(rng, product, now)?;
        tx.save_sales_record(&record)?;
    }
    log::info!("🧾 Created {} sales records", options.records);

    tx.commit().context("committing populate transaction")?;
    Ok(PopulateSummary {
        products: options.products,
        records: options.records,
    })
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}
