//! Custom Validators Example
//!
//! Registers custom types, one from a plain parser and one with full control
//! over the messages it reports.
//!
//! Run with:
//! ```bash
//! cargo run -p confirm --example custom_validators
//! ```

use confirm::{
    ConfigResult, ErrorType, FnTypeValidator, ParserValidator, Record, RuleEngine,
    ValidationError, ValidatorKind, Value,
};

fn main() {
    println!("Custom Validators Example");
    println!("=========================\n");

    if let Err(e) = run() {
        eprintln!("Setup error: {}", e);
    }
}

fn run() -> ConfigResult<()> {
    let mut engine = RuleEngine::new();

    // Parser only: the engine handles required/default/coercion
    engine.types_mut().add(
        "zip",
        ValidatorKind::custom(ParserValidator::new(|value: &Value| {
            let digits: String = value.as_str()?.chars().filter(char::is_ascii_digit).collect();
            (digits.len() == 5).then(|| Value::String(digits))
        })),
    )?;

    // Full validator: reports its own message
    engine.types_mut().add(
        "even",
        ValidatorKind::custom(FnTypeValidator::new(|rule, data, _ctx, errors| {
            match data.get(&rule.name).and_then(Value::as_i64) {
                Some(n) if n % 2 == 0 => Ok(true),
                _ => {
                    errors.add(ValidationError::new(
                        rule.name.as_str(),
                        format!("\"{}\" must be an even number", rule.name),
                        ErrorType::Custom,
                    ));
                    Ok(false)
                }
            }
        })),
    )?;

    engine.enums_mut().add("Sizes", ["Small", "Medium", "Large"])?;
    engine.add_rules(
        "order",
        &[
            "zip,zip,required",
            "pairs,even,required",
            "size,enum,optional,Medium,Sizes",
        ],
    )?;

    let mut record = Record::new().with("zip", "90-210").with("pairs", 4);
    let errors = engine.validate("order", &mut record)?;
    println!("1. Valid order: {} error(s)", errors.len());
    println!("   zip  = {:?}", record.get("zip"));
    println!("   size = {:?}\n", record.get("size"));

    let mut record = Record::new().with("zip", "123").with("pairs", 3).with("size", "huge");
    let errors = engine.validate("order", &mut record)?;
    println!("2. Invalid order:");
    for error in &errors {
        println!("   - [{}] {}", error.error_type, error.message);
    }
    println!();

    println!("Summary:");
    println!("  - ParserValidator: parser plus the shared field protocol");
    println!("  - FnTypeValidator: complete control over messages");
    Ok(())
}
