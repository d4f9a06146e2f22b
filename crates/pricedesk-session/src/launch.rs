use reqwest::Url;

use crate::error::SessionError;

/// Parameters an embedding host passes when it launches the app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub shop: Option<String>,
    pub host: Option<String>,
}

impl LaunchParams {
    /// Builds launch parameters, treating empty strings as absent.
    #[must_use]
    pub fn new(shop: Option<String>, host: Option<String>) -> Self {
        Self {
            shop: non_empty(shop),
            host: non_empty(host),
        }
    }

    /// Reads `shop` and `host` from a launch URL's query string. Other query
    /// parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidLaunchUrl`] if `url` does not parse.
    pub fn from_url(url: &str) -> Result<Self, SessionError> {
        let parsed = Url::parse(url).map_err(|e| SessionError::InvalidLaunchUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let mut shop = None;
        let mut host = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "shop" => shop = Some(value.into_owned()),
                "host" => host = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(Self::new(shop, host))
    }

    /// Overlays explicitly given values on top of `self`.
    #[must_use]
    pub fn merge(self, shop: Option<String>, host: Option<String>) -> Self {
        Self {
            shop: non_empty(shop).or(self.shop),
            host: non_empty(host).or(self.host),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_reads_shop_and_host() {
        let params = LaunchParams::from_url(
            "https://app.example.com/?shop=demo.myshopify.com&host=YWRtaW4&embedded=1",
        )
        .unwrap();
        assert_eq!(params.shop.as_deref(), Some("demo.myshopify.com"));
        assert_eq!(params.host.as_deref(), Some("YWRtaW4"));
    }

    #[test]
    fn from_url_without_params_is_empty() {
        let params = LaunchParams::from_url("https://app.example.com/").unwrap();
        assert_eq!(params, LaunchParams::default());
    }

    #[test]
    fn empty_values_are_absent() {
        let params = LaunchParams::from_url("https://app.example.com/?shop=&host=").unwrap();
        assert_eq!(params, LaunchParams::default());
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(matches!(
            LaunchParams::from_url("not a url"),
            Err(SessionError::InvalidLaunchUrl { .. })
        ));
    }

    #[test]
    fn merge_prefers_explicit_values() {
        let base = LaunchParams::new(Some("a.myshopify.com".into()), Some("h1".into()));
        let merged = base.merge(Some("b.myshopify.com".into()), None);
        assert_eq!(merged.shop.as_deref(), Some("b.myshopify.com"));
        assert_eq!(merged.host.as_deref(), Some("h1"));
    }
}
