use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, stdout, Write};
use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::RngExt;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

const PROBABILITY_CHARGE: f64 = 0.70;
const PROBABILITY_PAYMENT: f64 = 0.28;
// the remaining probability mass becomes deliberately invalid rows

const PRODUCTS: [&str; 3] = ["Diesel", "Petrol", "CNG"];
const VEHICLE_PREFIXES: [&str; 4] = ["GJ-05", "GJ-18", "MH-04", "RJ-14"];

struct GeneratorConfig {
    num_records: usize,
    num_accounts: usize,
    output_path: String,
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);
        let num_accounts = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(500);

        Self {
            num_records,
            num_accounts,
            output_path: "samples/stress_test.csv".to_string(),
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!(
        "Generating {} ledger records for {} accounts in {}...",
        config.num_records, config.num_accounts, config.output_path
    );

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = io::BufWriter::new(file);

    writeln!(writer, "date,account,vehicle,amount,type,description")?;

    let mut rng = rand::rng();

    for index in 1..=config.num_records {
        let account_id = rng.random_range(1..=config.num_accounts as u32);
        let roll: f64 = rng.random();

        if roll < PROBABILITY_CHARGE {
            generate_charge(&mut writer, &mut rng, account_id)?;
        } else if roll < PROBABILITY_CHARGE + PROBABILITY_PAYMENT {
            generate_payment(&mut writer, &mut rng, account_id)?;
        } else {
            generate_invalid_record(&mut writer, &mut rng, account_id)?;
        }

        if index % 100_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    println!("\nGeneration complete.");

    Ok(())
}

fn random_date<R: Rng>(rng: &mut R) -> NaiveDate {
    let fiscal_year_start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

    fiscal_year_start
        .checked_add_days(Days::new(rng.random_range(0..365)))
        .unwrap()
}

fn random_amount<R: Rng>(rng: &mut R, max: f64) -> Decimal {
    Decimal::from_f64(rng.random_range(50.0..max)).unwrap().round_dp(2)
}

fn random_vehicle<R: Rng>(rng: &mut R) -> String {
    let prefix = VEHICLE_PREFIXES.choose(rng).unwrap();

    format!("{}-{:02}-{:04}", prefix, rng.random_range(1..=99u32), rng.random_range(1..=9999u32))
}

fn generate_charge<W: Write, R: Rng>(writer: &mut W, rng: &mut R, account_id: u32) -> io::Result<()> {
    let product = PRODUCTS.choose(rng).unwrap();

    writeln!(
        writer,
        "{},{},{},{},charge,{}",
        random_date(rng),
        account_id,
        random_vehicle(rng),
        random_amount(rng, 25_000.0),
        product
    )
}

fn generate_payment<W: Write, R: Rng>(writer: &mut W, rng: &mut R, account_id: u32) -> io::Result<()> {
    writeln!(
        writer,
        "{},{},,{},payment,NEFT",
        random_date(rng),
        account_id,
        random_amount(rng, 50_000.0)
    )
}

fn generate_invalid_record<W: Write, R: Rng>(writer: &mut W, rng: &mut R, account_id: u32) -> io::Result<()> {
    let invalid_rows = [
        format!("yesterday,{},,100.00,charge,bad date", account_id),
        format!("{},{},,,charge,missing amount", random_date(rng), account_id),
        format!("{},,,250.00,payment,missing account", random_date(rng)),
        format!("{},{},,100.00,refund,unknown type", random_date(rng), account_id),
        format!("{},{},,-40.00,charge,negative amount", random_date(rng), account_id),
        format!(" ,{}, , ,charge, ", account_id),
    ];

    let row = invalid_rows.choose(rng).unwrap();

    writeln!(writer, "{}", row)
}
