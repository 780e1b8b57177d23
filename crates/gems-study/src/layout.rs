//! Conventional on-disk layout of a study directory.
//!
//! ```text
//! <study>/input/models/*.yml
//! <study>/input/components/components.yml
//! <study>/input/components/series/<name>.txt
//! ```

use std::path::{Path, PathBuf};

use gems_model::{ExpressionParser, LibraryMap, load_yaml_library, resolve_libraries};

use crate::error::StudyResult;
use crate::schema::{InputSystem, load_yaml_system};
use crate::series::TxtSeriesLoader;

#[derive(Debug, Clone)]
pub struct StudyLayout {
    root: PathBuf,
}

impl StudyLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.join("input").join("models")
    }

    pub fn components_file(&self) -> PathBuf {
        self.root.join("input").join("components").join("components.yml")
    }

    pub fn series_dir(&self) -> PathBuf {
        self.root.join("input").join("components").join("series")
    }

    /// Library files in the models directory, sorted by path.
    pub fn model_files(&self) -> StudyResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(self.models_dir())? {
            let path = entry?.path();
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"));
            if path.is_file() && is_yaml {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load and resolve every library of the study.
    pub fn load_libraries(&self, parser: &dyn ExpressionParser) -> StudyResult<LibraryMap> {
        let inputs = self
            .model_files()?
            .iter()
            .map(|path| load_yaml_library(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(resolve_libraries(&inputs, parser)?)
    }

    pub fn load_system(&self) -> StudyResult<InputSystem> {
        load_yaml_system(&self.components_file())
    }

    pub fn series_loader(&self) -> TxtSeriesLoader {
        TxtSeriesLoader::new(self.series_dir())
    }
}
