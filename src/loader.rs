//! Manifest loading with a JSON dump fallback.
//!
//! Applications usually parse the CSS manifest while developing and ship a JSON
//! dump of it for production. [`ManifestLoader`] implements that policy: it
//! resolves the CSS file, loads it when asked to, optionally writes the dump, and
//! falls back to the dump when the CSS could not be loaded.
//!
//! Loading problems never escape as errors here, they are logged and recorded on
//! the returned [`LoadedManifest`].
//!
//! ```rust,no_run
//! use css_styleguide::{LoadStatus, ManifestLoader};
//! use std::path::Path;
//!
//! let loader = ManifestLoader::new().with_static_dir("static");
//! let loaded = loader.get_manifest(
//!     Path::new("css/styleguide_manifest.css"),
//!     Some(Path::new("styleguide_manifest.json")),
//!     true,
//!     true,
//! );
//!
//! if loaded.status == LoadStatus::Failed {
//!     eprintln!("{}", loaded.loading_error.unwrap_or_default());
//! }
//! ```

use crate::model::DEFAULT_JSON_INDENT;
use crate::{Manifest, Result, SerializerOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Where the manifest of a [`LoadedManifest`] comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was loaded
    Empty,
    /// Loaded from the CSS source
    Live,
    /// Restored from a JSON dump
    Dump,
    /// Neither source could be loaded
    Failed,
}

impl LoadStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Empty => "empty",
            LoadStatus::Live => "live",
            LoadStatus::Dump => "dump",
            LoadStatus::Failed => "failed",
        }
    }
}

/// A manifest with its loading outcome.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub status: LoadStatus,
    /// Message of the last loading failure
    pub loading_error: Option<String>,
}

impl LoadedManifest {
    #[must_use]
    pub fn new(manifest: Manifest) -> Self {
        LoadedManifest {
            manifest,
            status: LoadStatus::Empty,
            loading_error: None,
        }
    }

    fn fail(&mut self, msg: String) {
        self.status = LoadStatus::Failed;
        self.loading_error = Some(msg);
    }
}

/// Resolves and loads manifests from static directories.
#[derive(Debug, Clone, Default)]
pub struct ManifestLoader {
    static_dirs: Vec<PathBuf>,
    options: SerializerOptions,
}

impl ManifestLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory relative CSS paths are searched in, after the previous ones.
    #[must_use]
    pub fn with_static_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.static_dirs.push(dir.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: SerializerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn static_dirs(&self) -> &[PathBuf] {
        &self.static_dirs
    }

    /// Resolves a CSS manifest path.
    ///
    /// An absolute path is returned when it exists. A relative path is searched in
    /// every static directory, in order, and the first existing file wins.
    #[must_use]
    pub fn resolve_css_filepath(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() {
            return path.exists().then(|| path.to_path_buf());
        }

        self.static_dirs
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
    }

    /// Loads the manifest from its CSS source, then writes the JSON dump when
    /// `save_dump` is enabled and a `json_filepath` is given.
    pub fn get_css_manifest(
        &self,
        state: &mut LoadedManifest,
        path: &Path,
        json_filepath: Option<&Path>,
        save_dump: bool,
    ) {
        state.status = LoadStatus::Live;

        let resolved = match self.resolve_css_filepath(path) {
            Some(resolved) => resolved,
            None => {
                let msg = format!("Unable to find CSS manifest from: {}", path.display());
                warn!("{}", msg);
                state.fail(msg);
                return;
            }
        };

        debug!("Loading CSS manifest: {}", resolved.display());

        let loaded = state.manifest.load_path(&resolved).map(|_| ());

        for warning in state.manifest.warnings() {
            warn!("{}", warning);
        }

        if let Err(err) = loaded {
            let msg = format!(
                "Unable to load CSS manifest from {}: {}",
                resolved.display(),
                err
            );
            error!("{}", msg);
            for line in err.diagnostics() {
                error!("{}", line);
            }
            state.fail(msg);
            return;
        }

        if let (true, Some(json_filepath)) = (save_dump, json_filepath) {
            if let Err(err) = write_dump(&state.manifest, json_filepath) {
                error!(
                    "Unable to write JSON manifest to {}: {}",
                    json_filepath.display(),
                    err
                );
            }
        }
    }

    /// Restores the manifest from a JSON dump.
    pub fn get_json_manifest(&self, state: &mut LoadedManifest, path: &Path) {
        state.status = LoadStatus::Dump;

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let msg = format!("Unable to find JSON manifest from: {}", path.display());
                warn!("{}", msg);
                state.fail(msg);
                return;
            }
            Err(err) => {
                let msg = format!(
                    "Unable to read JSON manifest from {}: {}",
                    path.display(),
                    err
                );
                warn!("{}", msg);
                state.fail(msg);
                return;
            }
        };

        debug!("Loading JSON manifest: {}", path.display());

        match Manifest::from_json(&content) {
            Ok(manifest) => state.manifest = manifest,
            Err(err) => {
                let msg = format!("Invalid JSON manifest: {}", err);
                warn!("{}", msg);
                state.fail(msg);
            }
        }
    }

    /// Loads a manifest from CSS or from its JSON dump.
    ///
    /// In development mode the CSS source is loaded first. The JSON dump is read
    /// when nothing was loaded yet or when the CSS loading failed.
    #[must_use]
    pub fn get_manifest(
        &self,
        css_filepath: &Path,
        json_filepath: Option<&Path>,
        save_dump: bool,
        development_mode: bool,
    ) -> LoadedManifest {
        let mut state = LoadedManifest::new(Manifest::with_options(self.options.clone()));

        if development_mode {
            self.get_css_manifest(&mut state, css_filepath, json_filepath, save_dump);
        }

        if let (LoadStatus::Empty | LoadStatus::Failed, Some(json_filepath)) =
            (state.status, json_filepath)
        {
            self.get_json_manifest(&mut state, json_filepath);
        }

        state
    }
}

fn write_dump(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = manifest.to_json(DEFAULT_JSON_INDENT)?;
    fs::write(path, json)?;
    Ok(())
}
