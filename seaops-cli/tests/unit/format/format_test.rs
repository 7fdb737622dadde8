use super::*;

fn create_errors() -> Vec<FormatError> {
    vec![
        FormatError::new("E0001".to_string(), "cause1".to_string(), "action1".to_string()),
        FormatError::new_with_details(
            "E0004".to_string(),
            "cause2".to_string(),
            "action2".to_string(),
            "details2".to_string(),
        ),
    ]
}

#[test]
fn can_display_error_without_details() {
    let errors = create_errors();

    assert_eq!(errors[1].to_string(), "E0004, cause: 'cause2', action: 'action2'.");
    assert_eq!(errors[1].to_string_with_details(), "E0004, cause: 'cause2', action: 'action2'. details: 'details2'");
    assert_eq!(errors[0].to_string_with_details(), errors[0].to_string());
}

#[test]
fn can_format_many_errors() {
    let errors = create_errors();

    let text = FormatError::format_many(&errors, "\n");

    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("E0001"));
}

#[test]
fn can_format_many_errors_as_json() {
    let errors = create_errors();

    let json = FormatError::format_many_to_json(&errors);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["code"], "E0001");
    assert!(array[0]["details"].is_null());
    assert_eq!(array[1]["details"], "details2");
}
