/// Flat query parameters for the feed endpoint. Serializes in insertion order;
/// re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pairs: Vec<(String, String)>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Appends `query` to `base_url`. Keys and values are written verbatim, without
/// percent-encoding.
pub fn build_query_url(base_url: &str, query: &QuerySpec) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    if query.is_empty() {
        return base.to_string();
    }
    let terms = query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>();
    format!("{base}?{}", terms.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country_since() -> QuerySpec {
        QuerySpec::new()
            .with("country", "USA")
            .with("since", "2010-01-01")
    }

    #[test]
    fn returns_base_url_for_empty_query() {
        assert_eq!(
            build_query_url("http://baseurl", &QuerySpec::new()),
            "http://baseurl"
        );
        assert_eq!(
            build_query_url("http://baseurl/", &QuerySpec::new()),
            "http://baseurl"
        );
    }

    #[test]
    fn strips_only_one_trailing_slash() {
        assert_eq!(
            build_query_url("http://baseurl//", &QuerySpec::new()),
            "http://baseurl/"
        );
    }

    #[test]
    fn appends_parameters_in_insertion_order() {
        assert_eq!(
            build_query_url("http://baseurl", &country_since()),
            "http://baseurl?country=USA&since=2010-01-01"
        );
        assert_eq!(
            build_query_url("http://baseurl/", &country_since()),
            "http://baseurl?country=USA&since=2010-01-01"
        );
    }

    #[test]
    fn last_write_wins_and_keeps_position() {
        let query = country_since().with("country", "CAN");
        assert_eq!(query.len(), 2);
        assert_eq!(query.get("country"), Some("CAN"));
        assert_eq!(
            build_query_url("http://baseurl", &query),
            "http://baseurl?country=CAN&since=2010-01-01"
        );
    }

    #[test]
    fn does_not_percent_encode() {
        let query = QuerySpec::new().with("city", "San Francisco&co");
        assert_eq!(
            build_query_url("http://baseurl", &query),
            "http://baseurl?city=San Francisco&co"
        );
    }
}
