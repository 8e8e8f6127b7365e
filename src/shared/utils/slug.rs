/// Turn a title into a URL slug: lowercase ASCII alphanumerics with single
/// hyphens between words, no leading or trailing hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_title() {
        assert_eq!(slugify("Company Report"), "company-report");
    }

    #[test]
    fn punctuation_collapses_to_single_hyphen() {
        assert_eq!(slugify("Q3 -- Financial / Report!"), "q3-financial-report");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(slugify("  spaced out  "), "spaced-out");
    }

    #[test]
    fn non_ascii_dropped() {
        assert_eq!(slugify("résumé 2024"), "r-sum-2024");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slugify("!!!"), "");
    }
}
