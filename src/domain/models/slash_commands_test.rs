use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse("   ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    assert!(SlashCommand::parse("!q").is_none());
}

#[test]
fn it_parse_plain_text() {
    assert!(SlashCommand::parse("Tell me about France").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_parse_surrounding_whitespace() {
    let cmd = SlashCommand::parse("  /clear  ").unwrap();
    assert!(cmd.is_clear());
    assert!(cmd.args.is_empty());
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(text).unwrap().is_quit());
    }
}

#[test]
fn it_is_not_quit() {
    let cmd = SlashCommand::parse("/clear").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_clear() {
    assert!(SlashCommand::parse("/cl").unwrap().is_clear());
    assert!(SlashCommand::parse("/clear").unwrap().is_clear());
}

#[test]
fn it_is_cancel() {
    assert!(SlashCommand::parse("/x").unwrap().is_cancel());
    assert!(SlashCommand::parse("/cancel").unwrap().is_cancel());
}

#[test]
fn it_is_suggestions() {
    assert!(SlashCommand::parse("/s").unwrap().is_suggestions());
    assert!(SlashCommand::parse("/suggestions").unwrap().is_suggestions());
}

#[test]
fn it_is_suggest_with_number() {
    let cmd = SlashCommand::parse("/suggest 2").unwrap();
    assert!(cmd.is_suggest());
    assert_eq!(cmd.number_arg(), Some(2));
}

#[test]
fn it_is_copy_without_number() {
    let cmd = SlashCommand::parse("/c").unwrap();
    assert!(cmd.is_copy());
    assert_eq!(cmd.number_arg(), None);
}

#[test]
fn it_ignores_invalid_number() {
    let cmd = SlashCommand::parse("/copy abc").unwrap();
    assert!(cmd.is_copy());
    assert_eq!(cmd.number_arg(), None);
}

#[test]
fn it_is_voice() {
    assert!(SlashCommand::parse("/v").unwrap().is_voice());
    assert!(SlashCommand::parse("/voice").unwrap().is_voice());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}
