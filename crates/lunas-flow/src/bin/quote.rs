//! # Quote Tool
//!
//! Prices a checkout from a product fixture, without touching any gateway.
//! Development aid for checking tier selection, coupon math, PPN, and
//! installment schedules against expected rupiah amounts.
//!
//! ## Usage
//! ```bash
//! # Quote a product fixture at its current price
//! cargo run -p lunas-flow --bin quote -- --product ./product.json
//!
//! # Pin a price tier
//! cargo run -p lunas-flow --bin quote -- --product ./product.json --price early-bird
//!
//! # Apply a coupon (percent or fixed rupiah)
//! cargo run -p lunas-flow --bin quote -- --product ./product.json --coupon 10%
//! cargo run -p lunas-flow --bin quote -- --product ./product.json --coupon 50000
//!
//! # Quote an installment plan
//! cargo run -p lunas-flow --bin quote -- --product ./product.json --installments 3
//! ```
//!
//! ## Fixture Format
//! A single product as the catalog API serves it:
//! ```json
//! { "id": "...", "code": "RUST-101", "name": "Kelas Rust Dasar",
//!   "price": 1000000, "ppn": 11.0, "prices": [], "installment": 6 }
//! ```

use std::env;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use lunas_core::{
    compose, select_price, Coupon, CouponOutcome, CouponValueType, DueKind, InstallmentRequest,
    OrderItem, OrderPayload, Payer, Product,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lunas=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Parses `10%` as a percentage coupon, anything else as fixed rupiah.
fn parse_coupon(raw: &str) -> Result<Coupon, String> {
    let (value_str, value_type) = match raw.strip_suffix('%') {
        Some(percent) => (percent, CouponValueType::Percentage),
        None => (raw, CouponValueType::Fixed),
    };

    let value: f64 = value_str
        .parse()
        .map_err(|_| format!("cannot parse coupon value: {}", raw))?;

    Ok(Coupon {
        code: "DEV".to_string(),
        value,
        value_type,
    })
}

/// Payer that satisfies every form rule, so fixtures price cleanly.
fn dev_payer() -> Payer {
    Payer {
        name: "Dev Payer".to_string(),
        email: "dev@example.com".to_string(),
        phone: "081234567890".to_string(),
        company: None,
        position: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut product_path = String::from("./product.json");
    let mut price_id: Option<String> = None;
    let mut coupon_arg: Option<String> = None;
    let mut installments: Option<u32> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--product" | "-p" => {
                if i + 1 < args.len() {
                    product_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--price" => {
                if i + 1 < args.len() {
                    price_id = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--coupon" | "-c" => {
                if i + 1 < args.len() {
                    coupon_arg = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--installments" | "-n" => {
                if i + 1 < args.len() {
                    installments = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Lunas Quote Tool");
                println!();
                println!("Usage: quote [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --product <PATH>     Product fixture (default: ./product.json)");
                println!("      --price <TIER_ID>    Pin a specific price tier");
                println!("  -c, --coupon <VALUE>     Coupon: 10% (percent) or 50000 (fixed)");
                println!("  -n, --installments <N>   Quote an N-period plan");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let contents = std::fs::read_to_string(&product_path)?;
    let product: Product = serde_json::from_str(&contents)?;

    let coupon = match coupon_arg.as_deref() {
        Some(raw) => Some(parse_coupon(raw)?),
        None => None,
    };

    let selected = select_price(&product, price_id.as_deref(), Utc::now())?;

    let mut builder = OrderPayload::builder()
        .payer(dev_payer())
        .payment_method("bank_transfer")
        .add_item(OrderItem::for_product(&product.id));
    if let Some(count) = installments {
        builder = builder.installment(InstallmentRequest {
            amount: count,
            is_booking: false,
        });
    }
    let payload = builder.build();

    let summary = compose(&product, &selected, coupon.as_ref(), &payload)?;

    println!("💰 Lunas Quote");
    println!("==============");
    println!("Product:   {} ({})", product.name, product.code);
    match &summary.price_title {
        Some(title) => println!("Price:     {} ({})", summary.base_price, title),
        None => println!("Price:     {}", summary.base_price),
    }

    match &summary.coupon {
        CouponOutcome::Absent => {}
        CouponOutcome::Applied { code } => {
            println!("Coupon:    -{} ({})", summary.discount, code);
        }
        CouponOutcome::Ignored { code, reason } => {
            println!("Coupon:    {} ignored ({})", code, reason);
        }
    }

    println!("Subtotal:  {}", summary.subtotal);
    if !summary.tax_rate.is_zero() {
        println!("PPN {}%:   {}", summary.tax_rate.percentage(), summary.tax);
    }
    println!("Grand:     {}", summary.grand_total);

    if let Some(schedule) = &summary.schedule {
        println!();
        println!("Installments ({:?}):", schedule.source);
        for (idx, amount) in schedule.amounts.iter().enumerate() {
            println!("  {}. {}", idx + 1, amount);
        }
    }

    let due_label = match summary.due_kind {
        DueKind::BookingFee => "booking fee",
        DueKind::FirstInstallment => "first installment",
        DueKind::FullPayment => "full payment",
    };
    println!();
    println!("Due now:   {} ({})", summary.amount_due, due_label);

    Ok(())
}
