/// Replaces each occurrence of `placeholder` in `text` with `replacement`.
///
/// An occurrence followed by an identifier character is part of a longer
/// name and is left alone, so replacing `@id` does not touch `@ids`. The
/// text is not otherwise parsed; placeholders inside string literals are
/// replaced too.
pub(crate) fn replace(text: &str, placeholder: &str, replacement: &str) -> String {
    if placeholder.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(placeholder) {
        let end = pos + placeholder.len();
        let continues = rest[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');

        out.push_str(&rest[..pos]);
        out.push_str(if continues {
            placeholder
        } else {
            replacement
        });
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}
