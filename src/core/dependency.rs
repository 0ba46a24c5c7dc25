//! CDN dependency resolution.
//!
//! Builds CDN URLs for every package the sandbox can import and synthesizes
//! the built-in import map from the selected library versions. All URL
//! builders are pure; the only network access lives in the version-list
//! fetchers feeding the pickers, which are off the compile path.

use serde::{Deserialize, Serialize};

use crate::config::{
    ELEMENT_PLUS_NIGHTLY_PKG, MIN_ELEMENT_PLUS_VERSION, MIN_VUE_VERSION, PKG_METADATA_API,
    VERSIONS_CACHE_PREFIX,
};
use crate::core::error::FetchError;
use crate::core::import_map::ImportMap;
use crate::models::{CdnProvider, Versions};
use crate::utils::{at_least, fetch_json_cached};

/// One entry in the fixed dependency table.
struct Dependency {
    /// Package name when it differs from the specifier.
    pkg: Option<&'static str>,
    /// Pinned version; `None` resolves unpinned.
    version: Option<String>,
    /// Sub-path into the published bundle.
    path: &'static str,
}

/// Compute a CDN URL for `pkg` at `version` (unpinned when `None`).
///
/// URL shapes are provider-specific and fixed:
/// - unpkg: `https://unpkg.com/{pkg}@{version}{path}`
/// - jsdelivr: `https://cdn.jsdelivr.net/npm/{pkg}@{version}{path}`
/// - jsdelivr-fastly: `https://fastly.jsdelivr.net/npm/{pkg}@{version}{path}`
/// - npmmirror: `https://registry.npmmirror.com/{pkg}/{version}/files{path}`,
///   with the literal `latest` standing in when unpinned
pub fn gen_cdn_link(
    provider: CdnProvider,
    pkg: &str,
    version: Option<&str>,
    path: &str,
) -> String {
    let pinned = version.map(|v| format!("@{v}")).unwrap_or_default();
    match provider {
        CdnProvider::Unpkg => format!("https://unpkg.com/{pkg}{pinned}{path}"),
        CdnProvider::Jsdelivr => format!("https://cdn.jsdelivr.net/npm/{pkg}{pinned}{path}"),
        CdnProvider::JsdelivrFastly => {
            format!("https://fastly.jsdelivr.net/npm/{pkg}{pinned}{path}")
        }
        CdnProvider::Npmmirror => format!(
            "https://registry.npmmirror.com/{pkg}/{}/files{path}",
            version.unwrap_or("latest")
        ),
    }
}

/// URL of the browser build of `@vue/compiler-sfc` matching `version`.
///
/// Loaded dynamically before a Vue version change is committed, so the
/// compiler and the declared version never disagree.
pub fn gen_compiler_sfc_link(provider: CdnProvider, version: &str) -> String {
    gen_cdn_link(
        provider,
        "@vue/compiler-sfc",
        Some(version),
        "/dist/compiler-sfc.esm-browser.js",
    )
}

/// Synthesize the built-in import map for the selected versions.
///
/// Pure function of its inputs: same selection, provider, and nightly flag
/// always produce a byte-identical map.
pub fn gen_import_map(versions: &Versions, provider: CdnProvider, nightly: bool) -> ImportMap {
    let element_plus_pkg = if nightly {
        ELEMENT_PLUS_NIGHTLY_PKG
    } else {
        "element-plus"
    };

    let deps: &[(&str, Dependency)] = &[
        (
            "vue",
            Dependency {
                pkg: Some("@vue/runtime-dom"),
                version: Some(versions.vue.clone()),
                path: "/dist/runtime-dom.esm-browser.js",
            },
        ),
        (
            "@vue/shared",
            Dependency {
                pkg: None,
                version: Some(versions.vue.clone()),
                path: "/dist/shared.esm-bundler.js",
            },
        ),
        (
            "element-plus",
            Dependency {
                pkg: Some(element_plus_pkg),
                version: Some(versions.element_plus.clone()),
                path: "/dist/index.full.min.mjs",
            },
        ),
        (
            "element-plus/",
            Dependency {
                pkg: Some("element-plus"),
                version: Some(versions.element_plus.clone()),
                path: "/",
            },
        ),
        (
            "@element-plus/icons-vue",
            Dependency {
                pkg: None,
                version: None,
                path: "/dist/index.min.js",
            },
        ),
        // Pinia and its peer/shim packages, all unpinned
        (
            "@vue/devtools-api",
            Dependency {
                pkg: None,
                version: None,
                path: "/lib/esm/index.js",
            },
        ),
        (
            "@vue/composition-api",
            Dependency {
                pkg: None,
                version: None,
                path: "/dist/vue-composition-api.mjs",
            },
        ),
        (
            "vue-demi",
            Dependency {
                pkg: None,
                version: None,
                path: "/lib/index.mjs",
            },
        ),
        (
            "pinia",
            Dependency {
                pkg: None,
                version: None,
                path: "/dist/pinia.mjs",
            },
        ),
    ];

    let mut map = ImportMap::default();
    for (specifier, dep) in deps {
        map.insert(
            *specifier,
            gen_cdn_link(provider, dep.pkg.unwrap_or(specifier), dep.version.as_deref(), dep.path),
        );
    }
    map
}

/// Import-map overrides for an Element Plus preview deployment.
///
/// The main bundle is redirected to the preview host; deep imports have no
/// preview build, so the prefix is marked unresolvable instead of silently
/// falling through to a released version.
pub fn preview_overrides(pr: &str) -> ImportMap {
    let mut map = ImportMap::default();
    map.insert(
        "element-plus",
        format!("https://preview-{pr}-element-plus.surge.sh/bundle/index.full.min.mjs"),
    );
    map.insert("element-plus/", "unsupported");
    map
}

// =============================================================================
// Version Lists
// =============================================================================

/// Subset of the jsdelivr package metadata payload.
#[derive(Deserialize, Serialize)]
struct PackageMetadata {
    versions: Vec<String>,
}

/// Fetch the published versions of `pkg`, newest first, with session caching.
async fn fetch_versions(pkg: &str) -> Result<Vec<String>, FetchError> {
    let url = format!("{PKG_METADATA_API}/{pkg}");
    let cache_key = format!("{VERSIONS_CACHE_PREFIX}:{pkg}");
    let metadata: PackageMetadata = fetch_json_cached(&url, &cache_key).await?;
    Ok(metadata.versions)
}

/// Vue versions offered by the picker (floor: 3.2.0).
pub async fn supported_vue_versions() -> Result<Vec<String>, FetchError> {
    let versions = fetch_versions("vue").await?;
    Ok(filter_floor(versions, MIN_VUE_VERSION))
}

/// Element Plus versions offered by the picker (floor: 2.0.0; nightly
/// builds are unfiltered).
pub async fn supported_element_plus_versions(nightly: bool) -> Result<Vec<String>, FetchError> {
    let pkg = if nightly {
        ELEMENT_PLUS_NIGHTLY_PKG
    } else {
        "element-plus"
    };
    let versions = fetch_versions(pkg).await?;
    if nightly {
        return Ok(versions);
    }
    Ok(filter_floor(versions, MIN_ELEMENT_PLUS_VERSION))
}

/// Published versions of `pkg` without a floor (TypeScript, Pinia).
pub async fn supported_versions(pkg: &str) -> Result<Vec<String>, FetchError> {
    fetch_versions(pkg).await
}

fn filter_floor(versions: Vec<String>, floor: &str) -> Vec<String> {
    versions
        .into_iter()
        .filter(|v| at_least(v, floor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_link_shapes() {
        assert_eq!(
            gen_cdn_link(CdnProvider::Unpkg, "element-plus", Some("2.7.0"), "/dist/index.css"),
            "https://unpkg.com/element-plus@2.7.0/dist/index.css"
        );
        assert_eq!(
            gen_cdn_link(CdnProvider::Jsdelivr, "element-plus", Some("2.7.0"), "/dist/index.css"),
            "https://cdn.jsdelivr.net/npm/element-plus@2.7.0/dist/index.css"
        );
        assert_eq!(
            gen_cdn_link(
                CdnProvider::JsdelivrFastly,
                "element-plus",
                Some("2.7.0"),
                "/dist/index.css"
            ),
            "https://fastly.jsdelivr.net/npm/element-plus@2.7.0/dist/index.css"
        );
        assert_eq!(
            gen_cdn_link(CdnProvider::Npmmirror, "element-plus", Some("2.7.0"), "/dist/index.css"),
            "https://registry.npmmirror.com/element-plus/2.7.0/files/dist/index.css"
        );
    }

    #[test]
    fn test_unpinned_link_omits_version() {
        assert_eq!(
            gen_cdn_link(CdnProvider::Unpkg, "pinia", None, "/dist/pinia.mjs"),
            "https://unpkg.com/pinia/dist/pinia.mjs"
        );
        // The mirror registry has no unpinned path segment; "latest" stands in
        assert_eq!(
            gen_cdn_link(CdnProvider::Npmmirror, "pinia", None, "/dist/pinia.mjs"),
            "https://registry.npmmirror.com/pinia/latest/files/dist/pinia.mjs"
        );
    }

    #[test]
    fn test_import_map_entries() {
        let versions = Versions {
            vue: "3.4.0".into(),
            element_plus: "2.7.0".into(),
            ..Default::default()
        };
        let map = gen_import_map(&versions, CdnProvider::Unpkg, false);

        assert_eq!(
            map.imports["vue"],
            "https://unpkg.com/@vue/runtime-dom@3.4.0/dist/runtime-dom.esm-browser.js"
        );
        assert_eq!(
            map.imports["@vue/shared"],
            "https://unpkg.com/@vue/shared@3.4.0/dist/shared.esm-bundler.js"
        );
        assert_eq!(
            map.imports["element-plus"],
            "https://unpkg.com/element-plus@2.7.0/dist/index.full.min.mjs"
        );
        assert_eq!(
            map.imports["element-plus/"],
            "https://unpkg.com/element-plus@2.7.0/"
        );
        // Peer packages resolve unpinned
        assert_eq!(
            map.imports["pinia"],
            "https://unpkg.com/pinia/dist/pinia.mjs"
        );
        assert_eq!(
            map.imports["vue-demi"],
            "https://unpkg.com/vue-demi/lib/index.mjs"
        );
    }

    #[test]
    fn test_provider_changes_shape_not_entry_set() {
        let versions = Versions {
            vue: "3.4.0".into(),
            element_plus: "2.7.0".into(),
            ..Default::default()
        };
        let unpkg = gen_import_map(&versions, CdnProvider::Unpkg, false);
        let jsdelivr = gen_import_map(&versions, CdnProvider::Jsdelivr, false);

        let unpkg_keys: Vec<_> = unpkg.imports.keys().collect();
        let jsdelivr_keys: Vec<_> = jsdelivr.imports.keys().collect();
        assert_eq!(unpkg_keys, jsdelivr_keys);
        assert_ne!(unpkg.imports["vue"], jsdelivr.imports["vue"]);
    }

    #[test]
    fn test_mirror_provider_changes_shape_not_entry_set() {
        let versions = Versions {
            vue: "3.4.0".into(),
            element_plus: "2.7.0".into(),
            ..Default::default()
        };
        let unpkg = gen_import_map(&versions, CdnProvider::Unpkg, false);
        let mirror = gen_import_map(&versions, CdnProvider::Npmmirror, false);

        let unpkg_keys: Vec<_> = unpkg.imports.keys().collect();
        let mirror_keys: Vec<_> = mirror.imports.keys().collect();
        assert_eq!(unpkg_keys, mirror_keys);

        assert_eq!(
            mirror.imports["vue"],
            "https://registry.npmmirror.com/@vue/runtime-dom/3.4.0/files/dist/runtime-dom.esm-browser.js"
        );
        // Unpinned entries substitute the literal "latest"
        assert_eq!(
            mirror.imports["pinia"],
            "https://registry.npmmirror.com/pinia/latest/files/dist/pinia.mjs"
        );
    }

    #[test]
    fn test_nightly_swaps_main_bundle_only() {
        let versions = Versions::default();
        let map = gen_import_map(&versions, CdnProvider::Unpkg, true);
        assert_eq!(
            map.imports["element-plus"],
            "https://unpkg.com/@element-plus/nightly@latest/dist/index.full.min.mjs"
        );
        // Deep imports still point at the released package
        assert_eq!(
            map.imports["element-plus/"],
            "https://unpkg.com/element-plus@latest/"
        );
    }

    #[test]
    fn test_determinism() {
        let versions = Versions::default();
        let a = gen_import_map(&versions, CdnProvider::Unpkg, false);
        let b = gen_import_map(&versions, CdnProvider::Unpkg, false);
        assert_eq!(a.to_json_pretty(), b.to_json_pretty());
    }

    #[test]
    fn test_preview_overrides() {
        let map = preview_overrides("1234");
        assert_eq!(
            map.imports["element-plus"],
            "https://preview-1234-element-plus.surge.sh/bundle/index.full.min.mjs"
        );
        assert_eq!(map.imports["element-plus/"], "unsupported");
    }

    #[test]
    fn test_compiler_sfc_link() {
        assert_eq!(
            gen_compiler_sfc_link(CdnProvider::Unpkg, "3.4.0"),
            "https://unpkg.com/@vue/compiler-sfc@3.4.0/dist/compiler-sfc.esm-browser.js"
        );
    }

    #[test]
    fn test_floor_filter() {
        let versions = vec![
            "3.4.21".to_string(),
            "3.2.0".to_string(),
            "3.1.5".to_string(),
            "2.7.16".to_string(),
        ];
        assert_eq!(
            filter_floor(versions, MIN_VUE_VERSION),
            vec!["3.4.21".to_string(), "3.2.0".to_string()]
        );
    }
}
