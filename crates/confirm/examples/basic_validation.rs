//! Basic Validation Example
//!
//! Registers a rule set and validates a couple of records against it.
//!
//! Run with:
//! ```bash
//! cargo run -p confirm --example basic_validation
//! ```

use confirm::{Record, RuleEngine};

const SIGNUP_RULES: &[&str] = &[
    "email,email,required",
    "password,password,required",
    "confirmPassword,compare,required,,password",
    "age,integer,required,,13,120",
    "role,authRole,optional,Guest",
    "wakeUp,time,optional",
    "newsletter,boolean,optional,false",
];

fn main() {
    println!("Basic Validation Example");
    println!("========================\n");

    let mut engine = RuleEngine::new();
    if let Err(e) = engine.add_rules("sign up", SIGNUP_RULES) {
        eprintln!("Bad rule set: {}", e);
        return;
    }

    validate_good_record(&engine);
    validate_bad_record(&engine);
}

// ============================================================================
// Valid Record
// ============================================================================

fn validate_good_record(engine: &RuleEngine) {
    println!("1. Valid Record");
    println!("---------------");

    let mut record = Record::new()
        .with("email", "  Jane.Doe@Example.COM ")
        .with("password", "Abcd-1234")
        .with("confirmPassword", "Abcd-1234")
        .with("age", "34")
        .with("wakeUp", "6:45 pm")
        .with("newsletter", "yes");

    match engine.validate("sign up", &mut record) {
        Ok(errors) if errors.is_empty() => {
            println!("  Valid. Coerced record:");
            print_record(&record);
        }
        Ok(errors) => println!("  Unexpected errors:\n{}", errors),
        Err(e) => println!("  Setup error: {}", e),
    }
    println!();
}

// ============================================================================
// Invalid Record
// ============================================================================

fn validate_bad_record(engine: &RuleEngine) {
    println!("2. Invalid Record");
    println!("-----------------");

    let mut record = Record::new()
        .with("email", "jane")
        .with("password", "abcd1234")
        .with("confirmPassword", "abcd")
        .with("age", "9")
        .with("wakeUp", "25:00");

    match engine.validate("sign up", &mut record) {
        Ok(errors) => {
            for message in errors.messages() {
                println!("  - {}", message);
            }
        }
        Err(e) => println!("  Setup error: {}", e),
    }
    println!();
}

fn print_record(record: &Record) {
    let mut fields: Vec<_> = record.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in fields {
        println!("    {:<16} {:?}", key, value);
    }
}
