//! Common test utilities for bundler integration tests

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

/// A scratch project holding application trees and an output directory
pub struct TestProject {
    /// Temporary directory, removed on drop
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create the two applications used throughout the tests
    pub fn with_test_apps() -> Self {
        let project = Self::new();
        project.write_file("apps/test-app1/config1.xml", "<config1/>");
        project.write_file("apps/test-app1/config2.xml", "<config2/>");
        project.write_file("apps/test-app1/globals.xml", "<globals/>");
        project.write_file("apps/test-app2/config-a.xml", "<config-a/>");
        project.write_file("apps/test-app2/globals.xml", "<globals/>");
        project
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Pack `files` into a zip application package at `path`
    #[allow(dead_code)]
    pub fn write_package(&self, path: &str, files: &[(&str, &str)]) -> PathBuf {
        let package = self.path.join(path);
        if let Some(parent) = package.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        let file = fs::File::create(&package).expect("Failed to create package");
        let mut zip = ZipWriter::new(file);
        for (name, content) in files {
            zip.start_file(*name, SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            zip.write_all(content.as_bytes())
                .expect("Failed to write zip entry");
        }
        zip.finish().expect("Failed to finish package");
        package
    }

    /// Absolute path of an application directory
    pub fn app(&self, name: &str) -> PathBuf {
        self.path.join("apps").join(name)
    }

    /// Bundle output directory
    pub fn output_dir(&self) -> PathBuf {
        self.path.join("target/mule-bundle")
    }

    /// Read a file of the output directory
    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output_dir().join(name)).expect("Failed to read output file")
    }

    /// Sorted file names present in the output directory
    pub fn output_files(&self) -> Vec<String> {
        list_files(&self.output_dir())
    }
}

/// Sorted file names directly inside `dir`
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| {
                e.expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
