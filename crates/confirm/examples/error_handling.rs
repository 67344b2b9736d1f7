//! Error Handling Example
//!
//! Shows the two error channels: data errors collected in `ValidationErrors`,
//! and configuration errors returned as `Err(ConfigError)`.
//!
//! Run with:
//! ```bash
//! RUST_LOG=confirm=debug cargo run -p confirm --example error_handling
//! ```

use confirm::{ConfigError, ErrorType, Record, RuleEngine};

fn main() {
    tracing_subscriber::fmt::init();

    println!("Error Handling Example");
    println!("======================\n");

    demonstrate_data_errors();
    demonstrate_config_errors();

    println!("Summary:");
    println!("  - ValidationErrors collects every data problem");
    println!("  - ErrorType classifies each message");
    println!("  - ConfigError means the engine is mis-wired");
}

fn demonstrate_data_errors() {
    println!("1. Data Errors");
    println!("--------------");

    let mut engine = RuleEngine::new();
    if let Err(e) = engine.add_rules(
        "profile",
        &["name,string,required,,2,40,title", "born,date,required", "score,float,optional,,0,100"],
    ) {
        println!("  Setup error: {}", e);
        return;
    }

    let mut record = Record::new().with("name", "x").with("score", "250");
    match engine.validate("profile", &mut record) {
        Ok(errors) => {
            for error in &errors {
                println!(
                    "  {:<6} {:<14} {}",
                    error.field,
                    error.error_type.to_string(),
                    error.message
                );
            }
            let missing = errors
                .as_slice()
                .iter()
                .filter(|e| e.error_type == ErrorType::Missing)
                .count();
            println!("  {} missing, {} total", missing, errors.len());
            if let Err(errors) = errors.into_result() {
                println!("  into_result: {}", errors);
            }
        }
        Err(e) => println!("  Setup error: {}", e),
    }
    println!();
}

fn demonstrate_config_errors() {
    println!("2. Configuration Errors");
    println!("-----------------------");

    let mut engine = RuleEngine::new();
    let attempts: [(&str, &[&str]); 3] = [
        ("broken", &["name,string"]),
        ("color", &["color,enum,required"]),
        ("fine", &["code,regex,required,,("]),
    ];
    for (title, rules) in attempts {
        match engine.add_rules(title, rules) {
            Ok(_) => println!("  [{}] registered", title),
            Err(e) => println!("  [{}] rejected: {}", title, e),
        }
    }

    let mut record = Record::new().with("code", "abc");
    match engine.validate("fine", &mut record) {
        Err(e @ ConfigError::InvalidPattern { .. }) => println!("  validate: {}", e),
        other => println!("  validate: {:?}", other),
    }

    match engine.validate("missing", &mut record) {
        Err(e) => println!("  validate: {}", e),
        Ok(_) => println!("  validate: unexpectedly succeeded"),
    }
    println!();
}
