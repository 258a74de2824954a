//! Per-request SPA routing decisions.

use std::borrow::Cow;

use url::Url;

use crate::assets::{clean_path, AssetTree, ScopedTree};
use crate::config::SpaConfig;
use crate::error::{FoyerError, Result};

/// What to do with one incoming request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path belongs to the API surface; another handler owns it and the
    /// resolver writes nothing.
    Skip,
    /// Serve this file from the asset tree.
    Asset(String),
    /// Serve the index document so client-side routing can take over.
    Index,
    /// Forward the whole request to the frontend dev server.
    Proxy(Url),
}

/// Immutable per-process routing policy. Cheap to share behind an `Arc`;
/// `resolve` takes `&self` and allocates only the candidate path.
pub struct SpaResolver<T> {
    tree: ScopedTree<T>,
    index_file: String,
    api_prefix: String,
    proxy_target: Url,
    dev_mode: bool,
}

impl<T: AssetTree> SpaResolver<T> {
    /// Build a resolver, reading dev mode from the configured environment
    /// variable.
    pub fn new(config: SpaConfig, tree: T) -> Result<Self> {
        let dev_mode = config.detect_dev_mode();
        Self::with_mode(config, tree, dev_mode)
    }

    /// Build a resolver with dev mode decided by the caller. In production
    /// mode the index document must exist under the asset root or
    /// construction fails; in dev mode a missing index only logs a warning,
    /// since requests will be proxied to the dev server anyway.
    pub fn with_mode(config: SpaConfig, tree: T, dev_mode: bool) -> Result<Self> {
        let proxy_target =
            Url::parse(&config.dev_proxy_url).map_err(|source| FoyerError::InvalidProxyTarget {
                url: config.dev_proxy_url.clone(),
                source,
            })?;

        let tree = ScopedTree::new(tree, &config.asset_root);

        if !tree.contains(&config.index_file) {
            let root = config.asset_root.trim_matches('/');
            let path = if root.is_empty() {
                config.index_file.clone()
            } else {
                format!("{}/{}", root, config.index_file)
            };
            if dev_mode {
                tracing::warn!(
                    "spa assets not found at {path:?}; okay in dev mode since requests are \
                     proxied to {proxy_target}, but a production build will refuse to start"
                );
            } else {
                return Err(FoyerError::MissingIndexAsset { path });
            }
        }

        Ok(Self {
            tree,
            index_file: config.index_file,
            api_prefix: config.api_prefix,
            proxy_target,
            dev_mode,
        })
    }

    /// Decide what one request path maps to.
    pub fn resolve(&self, path: &str) -> Resolution {
        if path.starts_with(&self.api_prefix) {
            return Resolution::Skip;
        }
        if self.dev_mode {
            return Resolution::Proxy(self.proxy_target.clone());
        }
        let mut candidate = clean_path(path);
        if candidate.is_empty() {
            candidate = self.index_file.clone();
        }
        if self.tree.contains(&candidate) {
            Resolution::Asset(candidate)
        } else {
            Resolution::Index
        }
    }

    /// Read a file under the asset root.
    pub fn open(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        self.tree.read(path)
    }

    /// Read the index document.
    pub fn open_index(&self) -> Option<Cow<'static, [u8]>> {
        self.tree.read(&self.index_file)
    }

    /// The configured index document name.
    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    pub fn proxy_target(&self) -> &Url {
        &self.proxy_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryTree;
    use tracing_test::traced_test;

    fn demo_tree() -> MemoryTree {
        MemoryTree::new()
            .with_file("index.html", "<html>shell</html>")
            .with_file("assets/app.js", "console.log('app')")
    }

    fn production(tree: MemoryTree) -> SpaResolver<MemoryTree> {
        SpaResolver::with_mode(SpaConfig::default(), tree, false).unwrap()
    }

    #[test]
    fn api_prefixed_paths_are_skipped_in_both_modes() {
        let prod = production(demo_tree());
        assert_eq!(prod.resolve("/api/message"), Resolution::Skip);
        assert_eq!(prod.resolve("/api"), Resolution::Skip);

        let dev = SpaResolver::with_mode(SpaConfig::default(), demo_tree(), true).unwrap();
        assert_eq!(dev.resolve("/api/message"), Resolution::Skip);
    }

    #[test]
    fn dev_mode_proxies_every_non_api_path_unchanged() {
        let config = SpaConfig {
            dev_proxy_url: "http://localhost:9999".to_string(),
            ..SpaConfig::default()
        };
        let expected = Url::parse(&config.dev_proxy_url).unwrap();
        let dev = SpaResolver::with_mode(config, demo_tree(), true).unwrap();

        assert_eq!(dev.resolve("/"), Resolution::Proxy(expected.clone()));
        assert_eq!(dev.resolve("/assets/app.js"), Resolution::Proxy(expected.clone()));
        assert_eq!(dev.resolve("/profile/42"), Resolution::Proxy(expected));
    }

    #[test]
    fn existing_files_are_served_from_the_tree() {
        let resolver = production(demo_tree());
        assert_eq!(
            resolver.resolve("/assets/app.js"),
            Resolution::Asset("assets/app.js".to_string())
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_the_index() {
        let resolver = production(demo_tree());
        assert_eq!(resolver.resolve("/dashboard/settings"), Resolution::Index);
        assert_eq!(resolver.resolve("/profile/42"), Resolution::Index);
    }

    #[test]
    fn root_resolves_like_the_index_file_itself() {
        let resolver = production(demo_tree());
        let root = resolver.resolve("/");
        assert_eq!(root, resolver.resolve("/index.html"));
        assert_eq!(root, Resolution::Asset("index.html".to_string()));
    }

    #[test]
    fn directory_paths_fall_back_to_the_index() {
        // "assets" only exists as a prefix of "assets/app.js", not as a file.
        let resolver = production(demo_tree());
        assert_eq!(resolver.resolve("/assets"), Resolution::Index);
        assert_eq!(resolver.resolve("/assets/"), Resolution::Index);
    }

    #[test]
    fn traversal_never_escapes_the_asset_root() {
        let tree = MemoryTree::new()
            .with_file("dist/index.html", "<html>")
            .with_file("secret.txt", "keep out");
        let config = SpaConfig {
            asset_root: "dist".to_string(),
            ..SpaConfig::default()
        };
        let resolver = SpaResolver::with_mode(config, tree, false).unwrap();

        assert_eq!(resolver.resolve("/../secret.txt"), Resolution::Index);
        assert_eq!(resolver.resolve("/secret.txt"), Resolution::Index);
        assert_eq!(resolver.resolve("/../../etc/passwd"), Resolution::Index);
        assert_eq!(
            resolver.resolve("/index.html"),
            Resolution::Asset("index.html".to_string())
        );
        assert!(resolver.open("../secret.txt").is_none());
    }

    #[test]
    fn production_construction_fails_without_the_index_asset() {
        let err = SpaResolver::with_mode(SpaConfig::default(), MemoryTree::new(), false)
            .err()
            .expect("construction should fail");
        match err {
            FoyerError::MissingIndexAsset { path } => assert_eq!(path, "index.html"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_index_error_names_the_scoped_path() {
        let config = SpaConfig {
            asset_root: "frontend/dist".to_string(),
            ..SpaConfig::default()
        };
        let err = SpaResolver::with_mode(config, MemoryTree::new(), false)
            .err()
            .expect("construction should fail");
        match err {
            FoyerError::MissingIndexAsset { path } => {
                assert_eq!(path, "frontend/dist/index.html");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[traced_test]
    #[test]
    fn dev_construction_only_warns_without_the_index_asset() {
        let resolver = SpaResolver::with_mode(SpaConfig::default(), MemoryTree::new(), true)
            .expect("dev construction should succeed");
        assert!(logs_contain("spa assets not found"));
        // Still proxies rather than serving from the empty tree.
        assert!(matches!(resolver.resolve("/"), Resolution::Proxy(_)));
    }

    #[test]
    fn invalid_proxy_url_fails_construction() {
        let config = SpaConfig {
            dev_proxy_url: "not a url".to_string(),
            ..SpaConfig::default()
        };
        let err = SpaResolver::with_mode(config, demo_tree(), true)
            .err()
            .expect("construction should fail");
        assert!(matches!(err, FoyerError::InvalidProxyTarget { .. }));
    }
}
