/// URL slug for a product name: `"Men's Hiking Boots"` → `"men-s-hiking-boots"`.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, then trims leading and trailing dashes.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}
