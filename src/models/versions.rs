use std::fmt;

/// The fixed set of libraries with switchable versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VersionKey {
    Vue,
    ElementPlus,
    TypeScript,
    Pinia,
}

impl VersionKey {
    /// All keys, in picker display order.
    pub const ALL: &[VersionKey] = &[
        VersionKey::Vue,
        VersionKey::ElementPlus,
        VersionKey::TypeScript,
        VersionKey::Pinia,
    ];

    /// Human-readable label for the version picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vue => "Vue",
            Self::ElementPlus => "Element Plus",
            Self::TypeScript => "TypeScript",
            Self::Pinia => "Pinia",
        }
    }

    /// npm package whose published versions feed the picker.
    pub fn package(&self) -> &'static str {
        match self {
            Self::Vue => "vue",
            Self::ElementPlus => "element-plus",
            Self::TypeScript => "typescript",
            Self::Pinia => "pinia",
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selected version for each [`VersionKey`].
///
/// Values are `"latest"`, a specific version string, or a provider tag such
/// as `"preview"` for Element Plus preview deployments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versions {
    pub vue: String,
    pub element_plus: String,
    pub typescript: String,
    pub pinia: String,
}

impl Versions {
    pub fn get(&self, key: VersionKey) -> &str {
        match key {
            VersionKey::Vue => &self.vue,
            VersionKey::ElementPlus => &self.element_plus,
            VersionKey::TypeScript => &self.typescript,
            VersionKey::Pinia => &self.pinia,
        }
    }

    pub fn set(&mut self, key: VersionKey, version: impl Into<String>) {
        let slot = match key {
            VersionKey::Vue => &mut self.vue,
            VersionKey::ElementPlus => &mut self.element_plus,
            VersionKey::TypeScript => &mut self.typescript,
            VersionKey::Pinia => &mut self.pinia,
        };
        *slot = version.into();
    }
}

impl Default for Versions {
    fn default() -> Self {
        Self {
            vue: "latest".into(),
            element_plus: "latest".into(),
            typescript: "latest".into(),
            pinia: "latest".into(),
        }
    }
}
