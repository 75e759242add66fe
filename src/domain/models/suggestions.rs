#[cfg(test)]
#[path = "suggestions_test.rs"]
mod tests;

pub const SUGGESTIONS: [&str; 4] = [
    "What's the weather today?",
    "Tell me a joke",
    "Who is the principal?",
    "What courses do you offer?",
];

/// Looks up a suggestion by its 1-based position in the list.
pub fn suggestion(number: usize) -> Option<&'static str> {
    if number == 0 {
        return None;
    }

    return SUGGESTIONS.get(number - 1).copied();
}
