use super::media_for;
use super::COLLEGE_IMAGE_URL;
use super::FRANCE_IMAGE_URL;

#[test]
fn it_matches_france() {
    assert_eq!(
        media_for("Tell me about France"),
        Some(FRANCE_IMAGE_URL.to_string())
    );
}

#[test]
fn it_matches_vignan() {
    assert_eq!(
        media_for("What is Vignan?"),
        Some(COLLEGE_IMAGE_URL.to_string())
    );
}

#[test]
fn it_matches_college_ignoring_case() {
    assert_eq!(
        media_for("Which COLLEGE is this?"),
        Some(COLLEGE_IMAGE_URL.to_string())
    );
}

#[test]
fn it_prefers_the_first_keyword() {
    assert_eq!(
        media_for("Is there a college in france?"),
        Some(FRANCE_IMAGE_URL.to_string())
    );
}

#[test]
fn it_returns_none_without_keywords() {
    assert_eq!(media_for("Hi"), None);
    assert_eq!(media_for(""), None);
}
