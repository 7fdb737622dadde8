use super::*;
use crate::helpers::models::*;
use crate::models::{EquipmentAttr, VesselAttr};

struct NoFields;

impl FieldSource for NoFields {
    fn resolve(&self, _: &Field) -> Option<Value> {
        None
    }
}

#[test]
fn can_fold_arithmetic_left_to_right() {
    // (1 + 2) * 3 without precedence
    let rule = rule("1 plus 2 mul 3 equal 9");

    assert_eq!(rule.check(&NoFields), RuleCheck::Pass);
}

parameterized_test! {can_check_comparison, (text, expected), {
    assert_eq!(rule(text).check(&NoFields), expected);
}}

can_check_comparison! {
    case01_sup_greater: ("5 sup 4", RuleCheck::Pass),
    case02_sup_equal: ("4 sup 4", RuleCheck::Pass),
    case03_sup_less: ("3 sup 4", RuleCheck::Fail),
    case04_inf_less: ("3 inf 4", RuleCheck::Pass),
    case05_inf_greater: ("5 inf 4", RuleCheck::Fail),
    case06_equal_within_tolerance: ("0.1 plus 0.2 equal 0.3", RuleCheck::Pass),
    case07_equal_text: ("tug equal tug", RuleCheck::Pass),
    case08_not_equal_text: ("tug equal barge", RuleCheck::Fail),
    case09_mixed_equal: ("tug equal 1", RuleCheck::Fail),
    case10_ordered_text: ("tug sup 1", RuleCheck::Unresolved(Unresolved::TypeMismatch)),
    case11_div_by_zero: ("1 div 0 sup 0", RuleCheck::Unresolved(Unresolved::DivisionByZero)),
}

#[test]
fn can_report_missing_field() {
    let rule = rule("vessel.deck_space sup 100");

    assert_eq!(rule.check(&NoFields), RuleCheck::Unresolved(Unresolved::Missing(Field::Vessel(VesselAttr::DeckSpace))));
}

#[test]
fn can_check_rule_across_candidates() {
    let vessel = test_vessel("v1", "barge", &[(VesselAttr::DeckSpace, 500.)]);
    let equipment = test_equipment(
        "e1",
        "piling",
        &[(EquipmentAttr::Length, 10.), (EquipmentAttr::Width, 20.), (EquipmentAttr::Footprint, 100.)],
    );
    let context = RuleContext { vessel: Some(&vessel), equipment: Some(&equipment), port: None };

    let area = "equipment.length mul equipment.width plus equipment.footprint";
    assert_eq!(rule(&format!("{area} inf vessel.deck_space")).check(&context), RuleCheck::Pass);
    assert_eq!(rule(&format!("{area} sup vessel.deck_space")).check(&context), RuleCheck::Fail);
}

#[test]
fn can_display_rule_in_infix_form() {
    assert_eq!(rule("vessel.deck_space sup 120").to_string(), "vessel.deck_space >= 120");
    assert_eq!(
        rule("equipment.length mul equipment.width plus 5 inf vessel.deck_space").to_string(),
        "((equipment.length * equipment.width) + 5) <= vessel.deck_space"
    );
    assert_eq!(rule("vessel.kind equal jack-up").to_string(), "vessel.kind == 'jack-up'");
}

#[test]
fn can_add_consumer_offset() {
    let rule = rule("equipment.mass inf vessel.max_cargo");
    let equipment = test_equipment("e1", "piling", &[(EquipmentAttr::Mass, 100.)]);
    let vessel = test_vessel("v1", "barge", &[(VesselAttr::MaxCargo, 150.)]);
    let context = RuleContext { vessel: Some(&vessel), equipment: Some(&equipment), port: None };

    let reserved = rule.with_consumer_offset(ConsumerSide::Left, 60.);

    assert_eq!(rule.check(&context), RuleCheck::Pass);
    assert_eq!(reserved.check(&context), RuleCheck::Fail);
    assert_eq!(reserved.to_string(), "(equipment.mass + 60) <= vessel.max_cargo");
}

parameterized_test! {can_reject_malformed_tokens, text, {
    let tokens = text.split_whitespace().map(Token::parse).collect::<Result<Vec<_>, _>>();
    let result = tokens.and_then(Rule::from_tokens);

    assert!(result.is_err(), "'{text}' should be rejected");
}}

can_reject_malformed_tokens! {
    case01_no_comparison: "1 plus 2",
    case02_two_comparisons: "1 sup 2 inf 3",
    case03_dangling_operator: "1 plus sup 2",
    case04_empty_side: "sup 2",
    case05_missing_operator: "1 2 sup 3",
    case06_unknown_field: "vessel.wingspan sup 3",
    case07_empty_right: "1 sup",
}

#[test]
fn can_parse_fields() {
    assert_eq!(Field::parse("port.id"), Some(Field::Kind(Subject::Port)));
    assert_eq!(Field::parse("equipment.kind"), Some(Field::Kind(Subject::Equipment)));
    assert_eq!(Field::parse("port.jacking_capability"), Some(Field::Port(PortAttr::JackingCapability)));
    assert_eq!(Field::parse("deck_space"), None);
}
