//! Unit tests for the definition parsers

use instill_core::{ConditionKind, ContainsSource, MatchMode, ValueSource};
use instill_parser::{ConditionParser, DefinitionParser, ParseError, VariableParser};

#[test]
fn parse_variable_condition() {
    let yaml = r#"
id: install.full
type: variable
variable: install.type
value: full
"#;
    let cond = ConditionParser::parse(yaml).unwrap();
    assert_eq!(cond.id(), "install.full");
    assert!(matches!(
        cond.kind(),
        ConditionKind::Variable { name, value } if name == "install.type" && value == "full"
    ));
}

#[test]
fn parse_nested_combinator() {
    let yaml = r#"
id: docs.or.full
type: or
operands:
  - type: ref
    ref: install.full
  - id: wants.docs
    type: exists
    variable: install.docs
"#;
    let cond = ConditionParser::parse(yaml).unwrap();
    let ConditionKind::Or(operands) = cond.kind() else {
        panic!("expected or condition");
    };
    assert_eq!(operands.len(), 2);
    // First operand had no id, so it gets a derived one
    assert_eq!(operands[0].id(), "docs.or.full#0");
    assert_eq!(operands[1].id(), "wants.docs");
}

#[test]
fn xor_with_three_operands_fails_at_parse_time() {
    let yaml = r#"
id: too.many
type: xor
operands:
  - { type: exists, variable: a }
  - { type: exists, variable: b }
  - { type: exists, variable: c }
"#;
    let err = ConditionParser::parse(yaml).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("too.many"), "error should name the condition: {message}");
    assert!(message.contains("at most two"));
}

#[test]
fn empty_and_fails_at_parse_time() {
    let yaml = r#"
id: empty.and
type: and
"#;
    let err = ConditionParser::parse(yaml).unwrap_err();
    assert!(err.to_string().contains("empty.and"));
}

#[test]
fn unknown_type_is_an_error() {
    let yaml = r#"
id: mystery
type: sometimes
"#;
    let err = ConditionParser::parse(yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnknownConditionType { .. }));
    assert!(err.to_string().contains("mystery"));
}

#[test]
fn parse_contains_regex_flags() {
    let yaml = r#"
id: has.entry
type: contains
file: "${app.home}/app.cfg"
pattern: "^mode=prod$"
regex: true
whole-line: true
multiline: true
"#;
    let cond = ConditionParser::parse(yaml).unwrap();
    let ConditionKind::Contains { source, mode, .. } = cond.kind() else {
        panic!("expected contains condition");
    };
    assert!(matches!(source, ContainsSource::File(path) if path == "${app.home}/app.cfg"));
    assert_eq!(
        *mode,
        MatchMode::Regex {
            case_insensitive: false,
            whole_line: true,
            multiline: true,
            dot_all: false,
        }
    );
}

#[test]
fn variable_requires_exactly_one_source() {
    let yaml = r#"
name: db.port
value: "5432"
environment: APP_DB_PORT
"#;
    let err = VariableParser::parse(yaml).unwrap_err();
    assert!(err.to_string().contains("db.port"));
    assert!(err.to_string().contains("exactly one"));
}

#[test]
fn parse_config_file_variable() {
    let yaml = r#"
name: jdbc.url
config-file:
  file: "${app.home}/db.ini"
  section: db
  key: url
condition: install.full
"#;
    let var = VariableParser::parse(yaml).unwrap();
    assert_eq!(var.name, "jdbc.url");
    assert_eq!(var.condition_id.as_deref(), Some("install.full"));
    assert!(matches!(&var.value, ValueSource::ConfigFile { section: Some(s), .. } if s == "db"));
    assert_eq!(var.referenced_names(), vec!["app.home"]);
}

#[test]
fn parse_full_document() {
    let yaml = r#"
conditions:
  - id: install.full
    type: variable
    variable: install.type
    value: full
  - id: not.full
    type: not
    operands:
      - type: ref
        ref: install.full
variables:
  - name: app.home
    value: "${user.home}/app"
  - name: docs.dir
    value: "${app.home}/docs"
    condition: install.full
"#;
    let definition = DefinitionParser::parse(yaml).unwrap();
    assert_eq!(definition.conditions.len(), 2);
    assert_eq!(definition.variables.len(), 2);
}

#[test]
fn duplicate_condition_ids_rejected() {
    let yaml = r#"
conditions:
  - id: dup
    type: exists
    variable: a
  - id: dup
    type: exists
    variable: b
"#;
    let err = DefinitionParser::parse(yaml).unwrap_err();
    assert!(matches!(err, ParseError::DuplicateCondition(id) if id == "dup"));
}
