//! # Seed Data Generator
//!
//! Populates the database with demo bookings for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 bookings (default)
//! cargo run -p shutter-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shutter-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p shutter-db --bin seed -- --db ./data/shutter.db
//! ```
//!
//! ## Generated Bookings
//! Creates realistic bookings across all booking types:
//! - Equipment rentals (camera bodies, lenses, lighting, audio)
//! - Event coverage, function shoots, studio sessions
//!
//! Each booking has:
//! - Daily code: `SB-YYYYMMDD-NNNN`
//! - 1-3 equipment lines with frozen daily rates
//! - A 1-7 day date range, some with metered hours
//! - A payment ledger advanced to a deterministic pseudo-random point

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use std::env;

use shutter_core::duration::resolve;
use shutter_core::pricing::{compute_breakdown, PriceInputs};
use shutter_core::{
    Booking, BookingStatus, BookingType, EquipmentLine, EventDetails, EventType, Money,
    PaymentDecision, PaymentMethod, PaymentStatus,
};
use shutter_db::{Database, DbConfig};
use uuid::Uuid;

/// Demo equipment catalog: (ref_id, daily rate in rupees)
const CATALOG: &[(&str, i64)] = &[
    ("cam-5d-mk4", 2_500),
    ("cam-r6", 3_000),
    ("cam-a7iii", 2_800),
    ("lens-24-70", 1_200),
    ("lens-70-200", 1_500),
    ("lens-50-prime", 600),
    ("light-godox-kit", 1_000),
    ("light-aputure-600", 1_800),
    ("gimbal-rs3", 900),
    ("drone-mavic", 3_500),
    ("audio-rode-kit", 700),
    ("tripod-manfrotto", 300),
];

const BOOKING_TYPES: &[BookingType] = &[
    BookingType::EquipmentRental,
    BookingType::EventCoverage,
    BookingType::FunctionShoot,
    BookingType::StudioSession,
];

const EVENT_TYPES: &[EventType] = &[
    EventType::Wedding,
    EventType::Birthday,
    EventType::Corporate,
    EventType::Party,
    EventType::Portrait,
    EventType::Fashion,
    EventType::Product,
    EventType::Other,
];

const VENUES: &[(&str, &str)] = &[
    ("Lakeside Hall", "12 MG Road"),
    ("Grand Palms", "4 Residency Road"),
    ("Sunset Terrace", "88 Beach Lane"),
    ("The Courtyard", "23 Church Street"),
    ("Studio One", "7 Industrial Layout"),
];

const METHODS: &[PaymentMethod] = &[
    PaymentMethod::Upi,
    PaymentMethod::Cash,
    PaymentMethod::CreditCard,
    PaymentMethod::BankTransfer,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./shutter_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shutter Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of bookings to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./shutter_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Shutter Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Bookings: {}", count);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.bookings().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} bookings", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating bookings...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let booking = generate_booking(seed);
        if let Err(e) = db.bookings().insert(&booking).await {
            eprintln!("Failed to insert {}: {}", booking.booking_code, e);
            continue;
        }
        generated += 1;

        if generated % 50 == 0 {
            println!("  Generated {} bookings...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} bookings in {:?}", generated, elapsed);

    let confirmed = db
        .bookings()
        .list(&shutter_db::BookingFilter {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        })
        .await?;
    println!("  Confirmed bookings: {}", confirmed.total);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single booking with deterministic pseudo-random data.
fn generate_booking(seed: usize) -> Booking {
    let now = Utc::now();

    // Spread start dates across ±45 days around today
    let base = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap_or(now.date_naive());
    let start_date = base + Duration::days((seed * 7 % 90) as i64 - 45);
    let end_date = start_date + Duration::days((seed % 7) as i64);

    let include_hours = seed % 3 == 0;
    let (start_time, end_time) = if include_hours {
        (
            NaiveTime::from_hms_opt(9, 0, 0),
            NaiveTime::from_hms_opt(9 + (seed % 9) as u32, 30, 0),
        )
    } else {
        (None, None)
    };

    let duration = resolve(start_date, end_date, include_hours, start_time, end_time)
        .unwrap_or_default();

    // 1-3 equipment lines
    let line_count = 1 + seed % 3;
    let equipment: Vec<EquipmentLine> = (0..line_count)
        .map(|n| {
            let (ref_id, rate) = CATALOG[(seed * 5 + n * 3) % CATALOG.len()];
            EquipmentLine {
                equipment_ref_id: ref_id.to_string(),
                quantity: 1 + (seed + n) as i64 % 2,
                daily_rate_paise: Money::from_rupees(rate).paise(),
            }
        })
        .collect();

    let booking_type = BOOKING_TYPES[seed % BOOKING_TYPES.len()];
    let service_charges = match booking_type {
        BookingType::EquipmentRental => Money::from_rupees(500),
        _ => Money::from_rupees(2_000),
    };

    // Every fifth customer is a subscriber with a flat benefit
    let subscription_ref_id = (seed % 5 == 0).then(|| format!("plan-gold-{:03}", seed % 20));
    let discount = if subscription_ref_id.is_some() {
        Money::from_rupees(250)
    } else {
        Money::zero()
    };

    let pricing = compute_breakdown(&PriceInputs {
        lines: &equipment,
        duration,
        include_hours,
        service_charges,
        discount,
    });

    let (venue, address) = VENUES[seed % VENUES.len()];
    let code_date = start_date.format("%Y%m%d");

    let mut booking = Booking {
        id: Uuid::new_v4().to_string(),
        booking_code: format!("SB-{}-{:04}", code_date, seed + 1),
        customer_id: format!("cust-{:04}", seed % 60),
        booking_type,
        event_type: EVENT_TYPES[seed % EVENT_TYPES.len()],
        start_date,
        end_date,
        include_hours,
        start_time,
        end_time,
        total_days: duration.total_days,
        total_minutes: duration.total_minutes,
        equipment,
        subscription_ref_id,
        details: EventDetails {
            venue: venue.to_string(),
            address: address.to_string(),
            contact_person: format!("Contact {:02}", seed % 40),
            contact_phone: format!("98{:08}", seed * 7919 % 100_000_000),
            special_requirements: (seed % 4 == 0).then(|| "Backup battery kit".to_string()),
            guest_count: (seed % 2 == 0).then(|| 50 + (seed as i64 * 13) % 400),
        },
        pricing,
        status: BookingStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        payment_requests: Vec::new(),
        cancellation_reason: None,
        cancelled_at: None,
        created_at: now,
        updated_at: now,
        version: 0,
    };

    advance_lifecycle(&mut booking, seed);
    booking
}

/// Walks the booking through part of its lifecycle based on the seed.
fn advance_lifecycle(booking: &mut Booking, seed: usize) {
    let now = Utc::now();
    let method = METHODS[seed % METHODS.len()];

    // Transition failures can't happen from Pending with this sequence;
    // ledger failures only if the total is tiny, so ignore errors.
    match seed % 6 {
        // Pending, untouched
        0 => {}
        // Pending with an open payment request
        1 => {
            let half = Money::from_paise(booking.pricing.total_paise / 2);
            let _ = booking.create_payment_request(half, method, now);
        }
        // Confirmed with an accepted advance
        2 | 3 => {
            let _ = booking.confirm(now);
            let advance = Money::from_paise(booking.pricing.total_paise / 4);
            if let Ok(request) = booking.create_payment_request(advance, method, now) {
                let id = request.id.clone();
                let _ = booking.process_payment_request(&id, PaymentDecision::Accept, None, now);
            }
        }
        // Completed and fully paid
        4 => {
            let _ = booking.confirm(now);
            let _ = booking.begin(now);
            let _ = booking.complete(now);
            let total = Money::from_paise(booking.pricing.total_paise);
            if let Ok(request) = booking.create_payment_request(total, method, now) {
                let id = request.id.clone();
                let _ = booking.process_payment_request(&id, PaymentDecision::Accept, None, now);
            }
        }
        // Cancelled
        _ => {
            let _ = booking.cancel("customer rescheduled", now);
        }
    }
}
