use std::fmt;

/// CDN provider used for every generated package URL.
///
/// A single process-wide setting: persisted in localStorage and overridable
/// by the `cdn` query parameter read once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CdnProvider {
    #[default]
    Unpkg,
    Jsdelivr,
    JsdelivrFastly,
    /// npmmirror registry, whose file URLs use a path-based form instead of
    /// the `@version` suffix.
    Npmmirror,
}

impl CdnProvider {
    /// All providers, in settings display order.
    pub const ALL: &[CdnProvider] = &[
        CdnProvider::Unpkg,
        CdnProvider::Jsdelivr,
        CdnProvider::JsdelivrFastly,
        CdnProvider::Npmmirror,
    ];

    /// Stable identifier used in storage and query parameters.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Unpkg => "unpkg",
            Self::Jsdelivr => "jsdelivr",
            Self::JsdelivrFastly => "jsdelivr-fastly",
            Self::Npmmirror => "npmmirror",
        }
    }

    /// Parse a stored or query-supplied identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "unpkg" => Some(Self::Unpkg),
            "jsdelivr" => Some(Self::Jsdelivr),
            "jsdelivr-fastly" => Some(Self::JsdelivrFastly),
            "npmmirror" => Some(Self::Npmmirror),
            _ => None,
        }
    }
}

impl fmt::Display for CdnProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for provider in CdnProvider::ALL {
            assert_eq!(CdnProvider::from_id(provider.id()), Some(*provider));
        }
        assert_eq!(CdnProvider::from_id("skypack"), None);
    }
}
