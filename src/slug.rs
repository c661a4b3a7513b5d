// 🔗 Slugs - one rule for every topic and category link
//
// Lowercase, every run of non-alphanumeric characters collapses into a single
// '-', no leading or trailing '-'.
//
//   "AI & Robotics"  → "ai-robotics"
//   "Tesla FSD"      → "tesla-fsd"
//   "Apple M3 Chip"  → "apple-m3-chip"

/// Build the URL slug for a topic or category name
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
