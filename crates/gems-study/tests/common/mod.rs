#![allow(dead_code)]

use std::path::{Path, PathBuf};

use gems_model::testing::TermParser;
use gems_model::{InputLibrary, LibraryMap, load_yaml_library, resolve_libraries};
use gems_study::StudyLayout;

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn study() -> StudyLayout {
    StudyLayout::new(data_dir().join("study"))
}

pub fn load_library(dir: &str, name: &str) -> InputLibrary {
    let path = data_dir().join(dir).join(format!("{name}.yml"));
    load_yaml_library(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

pub fn study_libraries() -> LibraryMap {
    study()
        .load_libraries(&TermParser)
        .unwrap_or_else(|e| panic!("Failed to load study libraries: {e}"))
}

pub fn resolve(inputs: &[InputLibrary]) -> LibraryMap {
    resolve_libraries(inputs, &TermParser).unwrap_or_else(|e| panic!("Failed to resolve: {e}"))
}
