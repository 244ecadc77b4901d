//! Bean-style accessor names.

use alloc::borrow::Cow;
use alloc::string::String;

/// Uppercases the first character of `s`.
///
/// Empty input and input whose first character has no uppercase form
/// (or is already uppercase) are returned borrowed and unchanged.
///
/// # Examples
///
/// ```
/// use ix_utils::capitalize_first_letter;
///
/// assert_eq!(capitalize_first_letter("sourceDirectory"), "SourceDirectory");
/// assert_eq!(capitalize_first_letter("Build"), "Build");
/// assert_eq!(capitalize_first_letter(""), "");
/// ```
pub fn capitalize_first_letter(s: &str) -> Cow<'_, str> {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Cow::Borrowed(s);
    };

    let mut upper = first.to_uppercase();
    if upper.len() == 1 && upper.clone().next() == Some(first) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.extend(&mut upper);
    out.push_str(chars.as_str());
    Cow::Owned(out)
}

/// Builds the accessor name for `property` with the given prefix,
/// e.g. `get` + `build` = `getBuild`.
///
/// # Examples
///
/// ```
/// use ix_utils::accessor_name;
///
/// assert_eq!(accessor_name("get", "build"), "getBuild");
/// assert_eq!(accessor_name("is", "offline"), "isOffline");
/// ```
pub fn accessor_name(prefix: &str, property: &str) -> String {
    let base = capitalize_first_letter(property);
    let mut name = String::with_capacity(prefix.len() + base.len());
    name.push_str(prefix);
    name.push_str(&base);
    name
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;

    use super::{accessor_name, capitalize_first_letter};

    #[test]
    fn no_op_inputs_stay_borrowed() {
        assert!(matches!(capitalize_first_letter(""), Cow::Borrowed("")));
        assert!(matches!(capitalize_first_letter("Name"), Cow::Borrowed("Name")));
        assert!(matches!(capitalize_first_letter("1st"), Cow::Borrowed("1st")));
    }

    #[test]
    fn non_ascii_first_letter() {
        assert_eq!(capitalize_first_letter("ärger"), "Ärger");
        assert_eq!(accessor_name("get", "ß"), "getSS");
    }
}
