use super::suggestion;

#[test]
fn it_returns_suggestions_by_position() {
    assert_eq!(suggestion(1), Some("What's the weather today?"));
    assert_eq!(suggestion(4), Some("What courses do you offer?"));
}

#[test]
fn it_returns_none_out_of_range() {
    assert_eq!(suggestion(0), None);
    assert_eq!(suggestion(5), None);
}
