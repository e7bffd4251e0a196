const MAX_SLUG_LEN: usize = 60;

/// Derives a stable fund identifier.
///
/// The ISIN wins when one is supplied; placeholders such as `N/A` count as absent.
/// Otherwise the name is slugged into `f-<slug>`.
pub fn make_fund_id(fund_name: &str, isin: Option<&str>) -> String {
    if let Some(isin) = isin {
        let isin = isin.trim().to_ascii_uppercase();
        if !matches!(isin.as_str(), "" | "N/A" | "NONE") {
            return isin;
        }
    }

    let mut slug = String::with_capacity(fund_name.len());
    let mut pending_dash = false;
    for c in fund_name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    // The slug is pure ASCII, so byte truncation is safe.
    slug.truncate(MAX_SLUG_LEN);
    format!("f-{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isin_is_preferred_and_normalised() {
        assert_eq!(make_fund_id("Fundsmith Equity", Some(" gb00b41yby68 ")), "GB00B41YBY68");
    }

    #[test]
    fn placeholder_isin_falls_back_to_slug() {
        assert_eq!(make_fund_id("L&G UK Index", Some("N/A")), "f-l-g-uk-index");
        assert_eq!(make_fund_id("L&G UK Index", Some("  ")), "f-l-g-uk-index");
        assert_eq!(make_fund_id("--Trojan  Income (O)--", None), "f-trojan-income-o");
    }

    #[test]
    fn slug_is_capped() {
        let name = "a".repeat(80);
        assert_eq!(make_fund_id(&name, None).len(), 2 + MAX_SLUG_LEN);
    }
}
