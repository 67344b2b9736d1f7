//! End-to-end validation tests

use confirm::parsers::{parse_enum, parse_password, parse_time};
use confirm::*;

fn signup_engine() -> RuleEngine {
    let mut engine = RuleEngine::new();
    engine
        .add_rules(
            "sign up",
            &[
                "email,email,required",
                "password,password,required",
                "confirmPassword,compare,required,,password",
                "birthday,date,optional",
                "age,integer,required,,13,120",
                "role,authRole,optional,Guest",
                "wakeUp,time,optional",
                "newsletter,boolean,optional,false",
            ],
        )
        .unwrap();
    engine
}

fn complete_record() -> Record {
    Record::new()
        .with("email", "Jane.Doe@Example.com")
        .with("password", "Abcd-1234")
        .with("confirmPassword", "Abcd-1234")
        .with("birthday", "1990-04-01")
        .with("age", "34")
        .with("role", "admin")
        .with("wakeUp", "6:45 am")
        .with("newsletter", "yes")
}

// ============================================================================
// Type Registry Tests
// ============================================================================

#[test]
fn test_builtin_types_registered() {
    let engine = RuleEngine::new();
    for name in [
        "authRole", "boolean", "compare", "date", "email", "enum", "float", "integer", "password",
        "regex", "string", "time",
    ] {
        assert!(engine.types().find(name).is_some(), "{}", name);
    }
}

#[test]
fn test_type_add_find_remove() {
    let mut engine = RuleEngine::new();
    let validator = ValidatorKind::custom(ParserValidator::new(|value: &Value| {
        value.as_str().map(|s| Value::from(s.trim()))
    }));

    engine.types_mut().add("trimmed", validator.clone()).unwrap();
    assert_eq!(engine.types().find("trimmed").unwrap().validator, validator);

    assert!(matches!(
        engine.types_mut().add("trimmed", ValidatorKind::String),
        Err(ConfigError::DuplicateType(_))
    ));
    assert!(matches!(
        engine.types_mut().add("email", ValidatorKind::String),
        Err(ConfigError::DuplicateType(_))
    ));

    engine.types_mut().remove("trimmed").unwrap();
    assert!(engine.types().find("trimmed").is_none());
}

// ============================================================================
// Rule Set Tests
// ============================================================================

#[test]
fn test_complete_record_is_valid() {
    let engine = signup_engine();
    let mut record = complete_record();

    let errors = engine.validate("sign up", &mut record).unwrap();
    assert!(errors.is_empty(), "{}", errors);

    assert_eq!(record.get("email"), Some(&Value::from("jane.doe@example.com")));
    assert_eq!(record.get("age"), Some(&Value::Int(34)));
    assert_eq!(record.get("role"), Some(&Value::from("Admin")));
    assert_eq!(record.get("wakeUp"), Some(&Value::from("06:45")));
    assert_eq!(record.get("newsletter"), Some(&Value::Bool(true)));
    assert!(record.get("birthday").and_then(Value::as_date).is_some());
}

#[test]
fn test_removed_required_field_reports_only_that_field() {
    let engine = signup_engine();

    for field in ["email", "password", "age"] {
        let mut record = complete_record();
        record.remove(field).unwrap();

        let errors = engine.validate("sign up", &mut record).unwrap();
        if field == "password" {
            // confirmPassword no longer has anything to match
            assert_eq!(
                errors.messages(),
                vec![
                    "\"password\" is required".to_string(),
                    "\"confirmpassword\" and \"password\" do not match".to_string(),
                ]
            );
        } else {
            assert_eq!(errors.messages(), vec![format!("\"{}\" is required", field)]);
        }
    }
}

#[test]
fn test_optional_fields_take_defaults() {
    let engine = signup_engine();
    let mut record = complete_record();
    record.remove("role");
    record.remove("newsletter");
    record.remove("wakeUp");

    let errors = engine.validate("sign up", &mut record).unwrap();
    assert!(errors.is_empty());
    assert_eq!(record.get("role"), Some(&Value::from("Guest")));
    assert_eq!(record.get("newsletter"), Some(&Value::from("false")));
    assert!(!record.contains("wakeUp"));
}

#[test]
fn test_default_overrides_required() {
    let mut engine = RuleEngine::new();
    engine.add_rules("flags", &["active,boolean,required,false"]).unwrap();

    let mut record = Record::new();
    let errors = engine.validate("flags", &mut record).unwrap();
    assert!(errors.is_empty());
    assert_eq!(record.get("active"), Some(&Value::from("false")));
}

#[test]
fn test_case_variant_keys_validate_consistently() {
    let mut engine = RuleEngine::new();
    engine.add_rules("contact", &["email,email,required"]).unwrap();

    for _ in 0..20 {
        let mut record = Record::new().with("Email", "a@b.co").with("EMAIL", "bad");
        let errors = engine.validate("contact", &mut record).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(record.get("Email"), Some(&Value::from("a@b.co")));
        assert_eq!(record.get("EMAIL"), Some(&Value::from("bad")));
    }
}

#[test]
fn test_validation_is_idempotent() {
    let engine = signup_engine();
    let mut record = complete_record();

    assert!(engine.validate("sign up", &mut record).unwrap().is_empty());
    let first = record.clone();

    assert!(engine.validate("sign up", &mut record).unwrap().is_empty());
    assert_eq!(record, first);
}

#[test]
fn test_every_error_is_collected() {
    let engine = signup_engine();
    let mut record = Record::new()
        .with("email", "not an email")
        .with("password", "abcd1234")
        .with("confirmPassword", "abcd")
        .with("birthday", "someday")
        .with("age", "7")
        .with("role", "root")
        .with("wakeUp", "25:00")
        .with("newsletter", "maybe");

    let errors = engine.validate("sign up", &mut record).unwrap();
    assert_eq!(
        errors.messages(),
        vec![
            "\"email\" is not a valid \"email\"".to_string(),
            "\"password\" is not a valid \"password\"".to_string(),
            "\"confirmpassword\" and \"password\" do not match".to_string(),
            "\"birthday\" is not a valid \"date\"".to_string(),
            "\"age\" cannot be less than 13".to_string(),
            "\"role\" is not a valid \"authrole\"".to_string(),
            "\"wakeup\" is not a valid \"time\"".to_string(),
            "\"newsletter\" is not a valid \"boolean\"".to_string(),
        ]
    );
    assert_eq!(errors.for_field("role")[0].error_type, ErrorType::EnumError);
    assert_eq!(errors.for_field("age")[0].error_type, ErrorType::RangeError);
}

#[test]
fn test_duplicate_title_keeps_existing_set() {
    let mut engine = signup_engine();
    let err = engine
        .add_rules("Sign Up", &["email,string,optional"])
        .unwrap_err();
    assert_eq!(err.to_string(), "[Sign Up] Duplicate definition of rules");

    let set = engine.rules().find("sign up").unwrap();
    assert_eq!(set.len(), 8);
    assert_eq!(set.rules[0].type_name, "email");
    assert_eq!(engine.rules().len(), 1);
}

#[test]
fn test_malformed_rule_strings() {
    let mut engine = RuleEngine::new();
    let cases = [
        ("a", vec![",string,required"], "[a] Name of property is missing"),
        ("b", vec!["name"], "[b] Type of property is missing"),
        ("c", vec!["name,string"], "[c] Exists is missing"),
        (
            "d",
            vec!["color,enum,required"],
            "[d] \"color\" is type \"enum\" and must specify enumeration type",
        ),
    ];
    for (title, rules, message) in cases {
        let err = engine.add_rules(title, &rules).unwrap_err();
        assert_eq!(err.to_string(), message);
    }
    assert!(engine.rules().is_empty());
}

#[test]
fn test_unknown_title_is_config_error() {
    let engine = signup_engine();
    let mut record = complete_record();
    assert!(matches!(
        engine.validate("log in", &mut record),
        Err(ConfigError::UnknownRuleSet(_))
    ));
}

// ============================================================================
// Parameterized Types
// ============================================================================

#[test]
fn test_enum_rules() {
    let mut engine = RuleEngine::new();
    engine
        .enums_mut()
        .add("Colors", ["Red", "Green", "Blue"])
        .unwrap();
    engine
        .add_rules("paint", &["color,enum,required,,Colors", "trim,enum,optional,Blue,colors"])
        .unwrap();

    let mut record = Record::new().with("color", "rED");
    assert!(engine.validate("paint", &mut record).unwrap().is_empty());
    assert_eq!(record.get("color"), Some(&Value::from("Red")));
    assert_eq!(record.get("trim"), Some(&Value::from("Blue")));

    engine.enums_mut().update("Colors", ["Cyan", "Magenta"]).unwrap();
    let mut record = Record::new().with("color", "red");
    let errors = engine.validate("paint", &mut record).unwrap();
    assert_eq!(errors.messages(), vec!["\"color\" is not a valid \"enum\"".to_string()]);

    engine.enums_mut().remove("Colors").unwrap();
    let mut record = Record::new().with("color", "cyan");
    assert!(matches!(
        engine.validate("paint", &mut record),
        Err(ConfigError::UnknownEnum(_))
    ));
}

#[test]
fn test_regex_rules() {
    let mut engine = RuleEngine::new();
    engine
        .add_rules("contact", &[r"phone,regex,required,,^\d{3}-\d{4}$"])
        .unwrap();
    engine.add_rules("unbounded", &["code,regex,optional"]).unwrap();

    let mut record = Record::new().with("phone", "555-1234");
    assert!(engine.validate("contact", &mut record).unwrap().is_empty());

    let mut record = Record::new().with("code", "x");
    assert!(matches!(
        engine.validate("unbounded", &mut record),
        Err(ConfigError::MissingParameter { .. })
    ));
}

#[test]
fn test_regex_pattern_mismatch() {
    let mut engine = RuleEngine::new();
    engine
        .add_rules("contact", &[r"phone,regex,required,,^\d{3}-\d{4}$"])
        .unwrap();

    let mut record = Record::new().with("phone", "5551234");
    let errors = engine.validate("contact", &mut record).unwrap();
    assert_eq!(
        errors.messages(),
        vec![r#""phone" does not match pattern "^\d{3}-\d{4}$""#.to_string()]
    );
}

#[test]
fn test_compare_without_param_is_config_error() {
    let mut engine = RuleEngine::new();
    engine.add_rules("pair", &["b,compare,required"]).unwrap();

    let mut record = Record::new().with("b", "1");
    let err = engine.validate("pair", &mut record).unwrap_err();
    assert!(matches!(err, ConfigError::MissingParameter { .. }));
}

#[test]
fn test_compare_matches_int_and_float() {
    let mut engine = RuleEngine::new();
    engine.add_rules("pair", &["b,compare,required,,a"]).unwrap();

    let mut record = Record::new().with("a", 1).with("b", 1.0);
    assert!(engine.validate("pair", &mut record).unwrap().is_empty());

    let mut record = Record::new().with("a", 1).with("b", "1");
    assert_eq!(engine.validate("pair", &mut record).unwrap().len(), 1);
}

#[test]
fn test_string_constraints() {
    let mut engine = RuleEngine::new();
    engine
        .add_rules(
            "person",
            &["first,string,required,,1,20,title", "code,string,optional,,,3,upper"],
        )
        .unwrap();

    let mut record = Record::new().with("first", "mARY anne").with("code", "abc");
    assert!(engine.validate("person", &mut record).unwrap().is_empty());
    assert_eq!(record.get("first"), Some(&Value::from("Mary Anne")));
    assert_eq!(record.get("code"), Some(&Value::from("ABC")));

    let mut record = Record::new().with("first", "Ann").with("code", "abcd");
    let errors = engine.validate("person", &mut record).unwrap();
    assert_eq!(
        errors.messages(),
        vec!["\"code\" must be no more than 3 characters".to_string()]
    );
}

#[test]
fn test_float_rules() {
    let mut engine = RuleEngine::new();
    engine.add_rules("item", &["price,float,required,,0"]).unwrap();

    let mut record = Record::new().with("price", "19.99");
    assert!(engine.validate("item", &mut record).unwrap().is_empty());
    assert_eq!(record.get("price"), Some(&Value::Float(19.99)));

    let mut record = Record::new().with("price", "-1");
    let errors = engine.validate("item", &mut record).unwrap();
    assert_eq!(errors.messages(), vec!["\"price\" cannot be less than 0".to_string()]);
}

// ============================================================================
// Custom Types and Configuration
// ============================================================================

#[test]
fn test_custom_type() {
    let mut engine = RuleEngine::new();
    engine
        .types_mut()
        .add(
            "even",
            ValidatorKind::custom(FnTypeValidator::new(|rule, data, _ctx, errors| {
                match data.get(&rule.name).and_then(Value::as_i64) {
                    Some(n) if n % 2 == 0 => Ok(true),
                    _ => {
                        errors.add(ValidationError::new(
                            rule.name.as_str(),
                            format!("\"{}\" must be even", rule.name),
                            ErrorType::Custom,
                        ));
                        Ok(false)
                    }
                }
            })),
        )
        .unwrap();
    engine.add_rules("pairs", &["count,even,required"]).unwrap();

    let mut record = Record::new().with("count", 3);
    let errors = engine.validate("pairs", &mut record).unwrap();
    assert_eq!(errors.messages(), vec!["\"count\" must be even".to_string()]);

    let mut record = Record::new().with("count", 8);
    assert!(engine.validate("pairs", &mut record).unwrap().is_empty());
}

#[test]
fn test_config_drives_password_and_roles() {
    let config = EngineConfig::new()
        .auth_roles(["Reader", "Editor"])
        .password(PasswordPolicy::default().min_symbol(0).min_length(6));
    let mut engine = RuleEngine::with_config(config);
    engine
        .add_rules("account", &["password,password,required", "role,authRole,required"])
        .unwrap();

    let mut record = Record::new().with("password", "Abc123").with("role", "EDITOR");
    assert!(engine.validate("account", &mut record).unwrap().is_empty());
    assert_eq!(record.get("role"), Some(&Value::from("Editor")));

    let mut record = Record::new().with("password", "Abc123").with("role", "Admin");
    assert_eq!(engine.validate("account", &mut record).unwrap().len(), 1);
}

// ============================================================================
// Parser Properties
// ============================================================================

#[test]
fn test_parser_examples() {
    let roles = ["Guest", "Subscriber", "Admin"];
    assert_eq!(parse_enum(&Value::from("ADMIN"), &roles), Some(Value::from("Admin")));
    assert_eq!(parse_enum(&Value::from("nope"), &roles), None);

    assert_eq!(parse_time(&Value::from("1:30:30 PM")), Some(Value::from("13:30:30")));
    assert_eq!(parse_time(&Value::from("25:00")), None);

    let policy = PasswordPolicy::default();
    assert_eq!(
        parse_password(&Value::from("Abcd-1234"), &policy),
        Some(Value::from("Abcd-1234"))
    );
    assert_eq!(parse_password(&Value::from("abcd1234"), &policy), None);
}

// ============================================================================
// JSON Interop
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_json_record_round_trip() {
    let engine = signup_engine();
    let json = serde_json::json!({
        "email": "JANE@EXAMPLE.COM",
        "password": "Abcd-1234",
        "confirmPassword": "Abcd-1234",
        "age": 40,
        "newsletter": false
    });

    let mut record = Record::try_from(json).unwrap();
    assert!(engine.validate("sign up", &mut record).unwrap().is_empty());

    let out = serde_json::Value::from(record);
    assert_eq!(out["email"], "jane@example.com");
    assert_eq!(out["age"], 40);
    assert_eq!(out["role"], "Guest");
}

#[cfg(feature = "serde")]
#[test]
fn test_json_numbers_compare_equal() {
    let mut engine = RuleEngine::new();
    engine.add_rules("pair", &["b,compare,required,,a"]).unwrap();

    let mut record = Record::try_from(serde_json::json!({"a": 1, "b": 1.0})).unwrap();
    assert!(engine.validate("pair", &mut record).unwrap().is_empty());
}
