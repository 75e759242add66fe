#[cfg(test)]
#[path = "media_test.rs"]
mod tests;

pub const GREETING_IMAGE_URL: &str = "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60";
pub const FRANCE_IMAGE_URL: &str = "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60";
pub const COLLEGE_IMAGE_URL: &str = "https://images.unsplash.com/photo-1523050854058-8df90110c9f1?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=60";

/// Keywords are lowercase. Checked in order, first match wins.
const KEYWORD_MEDIA: &[(&str, &str)] = &[
    ("france", FRANCE_IMAGE_URL),
    ("college", COLLEGE_IMAGE_URL),
    ("vignan", COLLEGE_IMAGE_URL),
];

/// Finds the supplementary image for a submitted prompt by scanning it for
/// known keywords, ignoring case.
pub fn media_for(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();

    return KEYWORD_MEDIA
        .iter()
        .find(|(keyword, _)| return lowered.contains(keyword))
        .map(|(_, url)| return url.to_string());
}
